use contracts::domain::a001_client::aggregate::CreatedResponse;
use contracts::system::users::{CreateUserDto, UpdateUserDto, User};
use serde_json::Value;

use crate::shared::api_utils::{delete_json, get_json, post_json, put_json, ApiClientError};

/// Fetch all users
pub async fn fetch_users() -> Result<Vec<User>, ApiClientError> {
    get_json("/admin/users").await
}

pub async fn fetch_user(id: &str) -> Result<User, ApiClientError> {
    get_json(&format!("/admin/users/{}", id)).await
}

/// Create new user; возвращает id
pub async fn create_user(dto: &CreateUserDto) -> Result<String, ApiClientError> {
    let created: CreatedResponse = post_json("/admin/users", dto).await?;
    Ok(created.id)
}

pub async fn update_user(id: &str, dto: &UpdateUserDto) -> Result<(), ApiClientError> {
    let _: Value = put_json(&format!("/admin/users/{}", id), dto).await?;
    Ok(())
}

pub async fn delete_user(id: &str) -> Result<(), ApiClientError> {
    let _: Value = delete_json(&format!("/admin/users/{}", id)).await?;
    Ok(())
}
