//! API utilities for frontend-backend communication
//!
//! Базовый URL берётся из `API_BASE_URL` на этапе сборки; если переменная
//! не задана, используется тот же origin (`/api/v1`), а при запуске через
//! dev-сервер на другом порту — локальный backend на :3000.
//! Все запросы получают `Authorization: Bearer` из хранилища сессии,
//! ошибки приводятся к [`ApiClientError`].

use std::fmt;

use contracts::shared::api_error::extract_error_message;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::system::auth::storage;

pub const API_PREFIX: &str = "/api/v1";
pub const BACKEND_PORT: &str = "3000";
pub const LOCAL_DEV_BASE: &str = "http://localhost:3000/api/v1";

/// Убирает пробелы и завершающие `/`; пустые и "undefined"/"null" значения отбрасываются
pub fn normalize_base(raw: &str) -> Option<String> {
    let s = raw.trim();
    if s.is_empty() || s == "undefined" || s == "null" {
        return None;
    }
    Some(s.trim_end_matches('/').to_string())
}

/// Выбор базового URL по настройке сборки и адресу страницы
pub fn resolve_base(configured: Option<&str>, protocol: &str, hostname: &str, port: &str) -> String {
    if let Some(base) = configured.and_then(normalize_base) {
        return base;
    }
    if port.is_empty() {
        format!("{}//{}{}", protocol, hostname, API_PREFIX)
    } else if port == BACKEND_PORT {
        format!("{}//{}:{}{}", protocol, hostname, port, API_PREFIX)
    } else {
        LOCAL_DEV_BASE.to_string()
    }
}

/// Get the base URL for API requests
///
/// # Example
/// ```rust,ignore
/// let url = format!("{}/pedidos/{}", api_base(), id);
/// ```
pub fn api_base() -> String {
    let configured = option_env!("API_BASE_URL");
    let window = match web_sys::window() {
        Some(w) => w,
        None => return resolve_base(configured, "http:", "localhost", BACKEND_PORT),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "localhost".to_string());
    let port = location.port().unwrap_or_default();
    resolve_base(configured, &protocol, &hostname, &port)
}

/// Build a full API URL from a path relative to `/api/v1`
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Ошибка обращения к API
#[derive(Debug, Clone, PartialEq)]
pub enum ApiClientError {
    /// Запрос не дошёл до сервера
    Network(String),
    /// 401: токен отсутствует, истёк или неверные учётные данные
    Unauthorized(String),
    Http { status: u16, message: String },
    /// Ответ не разобрался как ожидаемый JSON
    Decode(String),
}

impl ApiClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiClientError::Unauthorized(_))
    }

    /// Текст для уведомления
    pub fn message(&self) -> String {
        match self {
            ApiClientError::Network(_) => "No se pudo conectar con el servidor".to_string(),
            ApiClientError::Unauthorized(msg) => msg.clone(),
            ApiClientError::Http { message, .. } => message.clone(),
            ApiClientError::Decode(_) => "Respuesta inválida del servidor".to_string(),
        }
    }
}

impl fmt::Display for ApiClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiClientError::Network(e) => write!(f, "network error: {}", e),
            ApiClientError::Unauthorized(msg) => write!(f, "unauthorized: {}", msg),
            ApiClientError::Http { status, message } => write!(f, "HTTP {}: {}", status, message),
            ApiClientError::Decode(e) => write!(f, "decode error: {}", e),
        }
    }
}

/// Сессию завершает только 401; 403 остаётся обычной ошибкой запроса
fn status_error(status: u16, message: String) -> ApiClientError {
    if status == 401 {
        ApiClientError::Unauthorized(message)
    } else {
        ApiClientError::Http { status, message }
    }
}

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    let builder = builder.header("Accept", "application/json");
    match storage::get_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiClientError> {
    let status = response.status();
    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(status, &response.status_text(), &body);
        return Err(status_error(status, message));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiClientError::Decode(e.to_string()))
}

fn network(e: gloo_net::Error) -> ApiClientError {
    ApiClientError::Network(e.to_string())
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiClientError> {
    let response = authorized(Request::get(&api_url(path)))
        .send()
        .await
        .map_err(network)?;
    read_json(response).await
}

pub async fn post_json<B, T>(path: &str, body: &B) -> Result<T, ApiClientError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let request = authorized(Request::post(&api_url(path)))
        .json(body)
        .map_err(|e| ApiClientError::Decode(e.to_string()))?;
    let response = request.send().await.map_err(network)?;
    read_json(response).await
}

pub async fn put_json<B, T>(path: &str, body: &B) -> Result<T, ApiClientError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let request = authorized(Request::put(&api_url(path)))
        .json(body)
        .map_err(|e| ApiClientError::Decode(e.to_string()))?;
    let response = request.send().await.map_err(network)?;
    read_json(response).await
}

pub async fn delete_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiClientError> {
    let response = authorized(Request::delete(&api_url(path)))
        .send()
        .await
        .map_err(network)?;
    read_json(response).await
}

/// GET `/health` без авторизации; возвращает HTTP-статус
pub async fn ping_health() -> Result<u16, ApiClientError> {
    let response = Request::get(&api_url("/health"))
        .send()
        .await
        .map_err(network)?;
    Ok(response.status())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_base_wins_and_loses_trailing_slashes() {
        assert_eq!(
            resolve_base(Some(" https://api.textil.co/api/v1// "), "http:", "localhost", "8080"),
            "https://api.textil.co/api/v1"
        );
        assert_eq!(
            resolve_base(Some("undefined"), "https:", "gestor.co", ""),
            "https://gestor.co/api/v1"
        );
    }

    #[test]
    fn fallback_depends_on_port() {
        assert_eq!(
            resolve_base(None, "http:", "192.168.1.5", "3000"),
            "http://192.168.1.5:3000/api/v1"
        );
        assert_eq!(resolve_base(None, "http:", "localhost", "8080"), LOCAL_DEV_BASE);
    }

    #[test]
    fn paths_join_with_single_slash() {
        assert_eq!(join_url("http://h/api/v1", "/pedidos"), "http://h/api/v1/pedidos");
        assert_eq!(join_url("http://h/api/v1", "pedidos"), "http://h/api/v1/pedidos");
    }

    #[test]
    fn forbidden_does_not_end_the_session() {
        let forbidden = status_error(403, "Permiso denegado".into());
        assert!(!forbidden.is_unauthorized());
        assert_eq!(forbidden.message(), "Permiso denegado");
        assert!(status_error(401, "No autorizado".into()).is_unauthorized());
    }

    #[test]
    fn error_messages_for_toasts() {
        let err = ApiClientError::Http {
            status: 409,
            message: "Stock insuficiente".into(),
        };
        assert_eq!(err.message(), "Stock insuficiente");
        assert!(!err.is_unauthorized());
        assert!(ApiClientError::Unauthorized("Token inválido".into()).is_unauthorized());
        assert_eq!(
            ApiClientError::Network("fetch failed".into()).message(),
            "No se pudo conectar con el servidor"
        );
    }
}
