use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a003_order::aggregate::{
    AddItemDto, AddItemResponse, OkResponse, OrderDetail, OrderListRow, StartOrderDto,
    StartOrderResponse, StatusResponse, UpdateItemDto,
};

use crate::domain::a003_order::service;
use crate::shared::data::db::get_connection;
use crate::shared::error::ApiResult;
use crate::system::auth::extractor::CurrentUser;

const OK: OkResponse = OkResponse { ok: true };

/// POST /api/v1/pedidos/start
pub async fn start(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<StartOrderDto>,
) -> ApiResult<(StatusCode, Json<StartOrderResponse>)> {
    let pedido_id = service::start(get_connection(), &claims.sub, dto).await?;
    Ok((StatusCode::CREATED, Json(StartOrderResponse { pedido_id })))
}

/// GET /api/v1/pedidos
pub async fn list() -> ApiResult<Json<Vec<OrderListRow>>> {
    Ok(Json(service::list(get_connection()).await?))
}

/// GET /api/v1/pedidos/:id
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<Json<OrderDetail>> {
    Ok(Json(service::detail(get_connection(), &id).await?))
}

/// DELETE /api/v1/pedidos/:id
pub async fn delete(Path(id): Path<String>) -> ApiResult<Json<OkResponse>> {
    service::delete(get_connection(), &id).await?;
    Ok(Json(OK))
}

/// POST /api/v1/pedidos/:id/items
pub async fn add_item(
    Path(id): Path<String>,
    Json(dto): Json<AddItemDto>,
) -> ApiResult<(StatusCode, Json<AddItemResponse>)> {
    let item_id = service::add_item(get_connection(), &id, dto).await?;
    Ok((StatusCode::CREATED, Json(AddItemResponse { ok: true, item_id })))
}

/// PUT /api/v1/pedidos/:id/items/:item_id
pub async fn update_item(
    Path((id, item_id)): Path<(String, String)>,
    Json(dto): Json<UpdateItemDto>,
) -> ApiResult<Json<OkResponse>> {
    service::update_item(get_connection(), &id, &item_id, dto).await?;
    Ok(Json(OK))
}

/// DELETE /api/v1/pedidos/:id/items/:item_id
pub async fn delete_item(Path((id, item_id)): Path<(String, String)>) -> ApiResult<Json<OkResponse>> {
    service::delete_item(get_connection(), &id, &item_id).await?;
    Ok(Json(OK))
}

/// POST /api/v1/pedidos/:id/submit
pub async fn submit(Path(id): Path<String>) -> ApiResult<Json<StatusResponse>> {
    Ok(Json(service::submit(get_connection(), &id).await?))
}

/// POST /api/v1/pedidos/:id/approve
pub async fn approve(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<StatusResponse>> {
    Ok(Json(service::approve(get_connection(), &claims.sub, &id).await?))
}

/// POST /api/v1/pedidos/:id/cancel
pub async fn cancel(Path(id): Path<String>) -> ApiResult<Json<StatusResponse>> {
    Ok(Json(service::cancel(get_connection(), &id).await?))
}
