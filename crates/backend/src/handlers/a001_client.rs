use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a001_client::aggregate::{Client, ClientQuery, CreateClientDto, CreatedResponse};

use crate::domain::a001_client::service;
use crate::shared::data::db::get_connection;
use crate::shared::error::ApiResult;

/// GET /api/v1/clientes?q=&limit=
pub async fn search(Query(query): Query<ClientQuery>) -> ApiResult<Json<Vec<Client>>> {
    Ok(Json(service::search(get_connection(), &query).await?))
}

/// GET /api/v1/clientes/:id
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<Json<Client>> {
    Ok(Json(service::get(get_connection(), &id).await?))
}

/// POST /api/v1/clientes
pub async fn create(Json(dto): Json<CreateClientDto>) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let id = service::create(get_connection(), dto).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}
