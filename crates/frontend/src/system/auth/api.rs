use contracts::system::auth::{LoginRequest, LoginResponse, MeResponse};
use contracts::system::prefs::ThemePrefs;
use serde::Serialize;
use serde_json::Value;

use crate::shared::api_utils::{get_json, post_json, put_json, ApiClientError};

/// Login with email and password
pub async fn login(email: String, password: String) -> Result<LoginResponse, ApiClientError> {
    let request = LoginRequest { email, password };
    post_json("/auth/login", &request).await
}

/// Get current user info and stored prefs
pub async fn me() -> Result<MeResponse, ApiClientError> {
    get_json("/me").await
}

#[derive(Serialize)]
struct UpdatePrefsBody<'a> {
    prefs: &'a ThemePrefs,
}

pub async fn update_prefs(prefs: &ThemePrefs) -> Result<(), ApiClientError> {
    let _: Value = put_json("/users/me/prefs", &UpdatePrefsBody { prefs }).await?;
    Ok(())
}
