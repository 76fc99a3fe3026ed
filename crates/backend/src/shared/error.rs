use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contracts::shared::api_error::ErrorBody;
use thiserror::Error;

/// Ошибка API с HTTP-статусом. Тело всегда `{"error": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::Validation(vec![msg.into()])
    }

    pub fn forbidden() -> Self {
        ApiError::Forbidden("Permiso denegado".to_string())
    }

    /// `Ok(())` для пустого списка ошибок валидации
    pub fn check(errors: Vec<String>) -> ApiResult<()> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(errors))
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ApiError::Validation(errors) if errors.len() > 1 => ErrorBody::list(errors.clone()),
            ApiError::Internal(_) => ErrorBody::message("Error interno"),
            other => ErrorBody::message(other.to_string()),
        }
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(err: sea_orm::DbErr) -> Self {
        ApiError::Internal(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(err) = &self {
            tracing::error!("Internal error: {:#}", err);
        }
        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validation_body_is_string_or_list() {
        let one = ApiError::bad_request("nombre requerido");
        assert_eq!(one.status(), StatusCode::BAD_REQUEST);
        assert_eq!(serde_json::to_value(one.body()).unwrap(), json!({"error": "nombre requerido"}));

        let many = ApiError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(serde_json::to_value(many.body()).unwrap(), json!({"error": ["a", "b"]}));
    }

    #[test]
    fn internal_details_are_hidden() {
        let err = ApiError::from(anyhow::anyhow!("disk I/O error"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(serde_json::to_value(err.body()).unwrap(), json!({"error": "Error interno"}));
    }

    #[test]
    fn check_passes_empty_list() {
        assert!(ApiError::check(vec![]).is_ok());
        assert!(matches!(
            ApiError::check(vec!["x".into()]),
            Err(ApiError::Validation(_))
        ));
    }
}
