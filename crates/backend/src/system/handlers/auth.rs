use axum::Json;
use contracts::system::auth::{LoginRequest, LoginResponse, MeResponse};
use serde_json::{json, Value};

use crate::shared::data::db::get_connection;
use crate::shared::error::ApiResult;
use crate::system::auth::{extractor::CurrentUser, jwt};
use crate::system::users::service as user_service;

/// GET /api/v1/health
pub async fn health() -> Json<Value> {
    Json(json!({"ok": true}))
}

/// POST /api/v1/auth/login
pub async fn login(Json(request): Json<LoginRequest>) -> ApiResult<Json<LoginResponse>> {
    let keys = jwt::keys()?;
    let response = user_service::login(get_connection(), keys, request).await?;
    Ok(Json(response))
}

/// GET /api/v1/me
pub async fn me(CurrentUser(claims): CurrentUser) -> ApiResult<Json<MeResponse>> {
    Ok(Json(user_service::me(get_connection(), &claims).await?))
}
