use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a001_client::aggregate::CreatedResponse;
use contracts::system::users::{CreateUserDto, UpdateUserDto, User};
use serde_json::{json, Value};

use crate::shared::data::db::get_connection;
use crate::shared::error::ApiResult;
use crate::system::auth::extractor::CurrentUser;
use crate::system::users::service;

/// GET /api/v1/admin/users
pub async fn list() -> ApiResult<Json<Vec<User>>> {
    Ok(Json(service::list(get_connection()).await?))
}

/// GET /api/v1/admin/users/:id
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<Json<User>> {
    Ok(Json(service::get(get_connection(), &id).await?))
}

/// POST /api/v1/admin/users
pub async fn create(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<CreateUserDto>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let id = service::create(get_connection(), claims.profile, dto).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// PUT /api/v1/admin/users/:id
pub async fn update(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(dto): Json<UpdateUserDto>,
) -> ApiResult<Json<Value>> {
    service::update(get_connection(), claims.profile, &id, dto).await?;
    Ok(Json(json!({"ok": true})))
}

/// DELETE /api/v1/admin/users/:id
pub async fn delete(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    service::delete(get_connection(), &claims, &id).await?;
    Ok(Json(json!({"ok": true})))
}
