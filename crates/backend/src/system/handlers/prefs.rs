use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::shared::data::db::get_connection;
use crate::shared::error::ApiResult;
use crate::system::auth::extractor::CurrentUser;
use crate::system::prefs::service as prefs_service;

#[derive(Debug, Deserialize)]
pub struct UpdatePrefsBody {
    #[serde(default)]
    pub prefs: Value,
}

/// PUT /api/v1/users/me/prefs
pub async fn update_my_prefs(
    CurrentUser(claims): CurrentUser,
    Json(body): Json<UpdatePrefsBody>,
) -> ApiResult<Json<Value>> {
    let prefs = prefs_service::update(get_connection(), &claims.sub, body.prefs).await?;
    Ok(Json(json!({"ok": true, "prefs": prefs})))
}
