use axum::{extract::Query, http::StatusCode, Json};
use contracts::domain::a001_client::aggregate::CreatedResponse;
use contracts::domain::a002_product::aggregate::{
    CreateMovementDto, CreateProductDto, InventorySummaryRow,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::a002_product::service;
use crate::shared::data::db::get_connection;
use crate::shared::error::ApiResult;
use crate::system::auth::extractor::CurrentUser;

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    #[serde(default)]
    pub pedido_id: Option<String>,
}

/// GET /api/v1/inventario/resumen?pedido_id=
pub async fn inventory_summary(
    Query(query): Query<SummaryQuery>,
) -> ApiResult<Json<Vec<InventorySummaryRow>>> {
    let rows = service::inventory_summary(get_connection(), query.pedido_id.as_deref()).await?;
    Ok(Json(rows))
}

/// POST /api/v1/inventario/movimientos
pub async fn create_movement(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<CreateMovementDto>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let id = service::create_movement(get_connection(), &claims.sub, dto).await?;
    Ok((StatusCode::CREATED, Json(json!({"ok": true, "id": id}))))
}

/// POST /api/v1/productos
pub async fn create_product(
    Json(dto): Json<CreateProductDto>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let id = service::create_product(get_connection(), dto).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}
