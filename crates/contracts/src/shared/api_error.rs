//! Единый формат ошибок API: `{"error": "..."}` или `{"error": ["...", "..."]}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: Value,
}

impl ErrorBody {
    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            error: Value::String(msg.into()),
        }
    }

    pub fn list(messages: Vec<String>) -> Self {
        Self {
            error: Value::Array(messages.into_iter().map(Value::String).collect()),
        }
    }
}

/// Достаёт человекочитаемое сообщение из тела ответа с ошибкой.
///
/// Порядок: поле `error` (строка или массив), поле `message`,
/// сырой текст, затем `Error {status}: {status_text}`.
pub fn extract_error_message(status: u16, status_text: &str, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["error", "message"] {
            match value.get(key) {
                Some(Value::String(s)) if !s.trim().is_empty() => return s.clone(),
                Some(Value::Array(items)) if !items.is_empty() => {
                    return items
                        .iter()
                        .map(|v| match v {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect::<Vec<_>>()
                        .join("; ");
                }
                _ => {}
            }
        }
    }
    let text = body.trim();
    if !text.is_empty() && !text.starts_with('<') && text.len() <= 300 {
        return format!("Error {}: {}", status, text);
    }
    format!("Error {}: {}", status, status_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_field_string_or_list() {
        assert_eq!(
            extract_error_message(404, "Not Found", r#"{"error":"Pedido no encontrado"}"#),
            "Pedido no encontrado"
        );
        assert_eq!(
            extract_error_message(400, "Bad Request", r#"{"error":["a requerido","b inválida"]}"#),
            "a requerido; b inválida"
        );
        assert_eq!(
            extract_error_message(422, "", r#"{"message":"campo"}"#),
            "campo"
        );
    }

    #[test]
    fn non_json_bodies() {
        assert_eq!(extract_error_message(502, "Bad Gateway", "upstream down"), "Error 502: upstream down");
        assert_eq!(
            extract_error_message(500, "Internal Server Error", "<html>oops</html>"),
            "Error 500: Internal Server Error"
        );
        assert_eq!(extract_error_message(503, "Service Unavailable", ""), "Error 503: Service Unavailable");
    }

    #[test]
    fn body_shapes() {
        let v = serde_json::to_value(ErrorBody::list(vec!["x".into()])).unwrap();
        assert_eq!(v, serde_json::json!({"error": ["x"]}));
        let v = serde_json::to_value(ErrorBody::message("y")).unwrap();
        assert_eq!(v, serde_json::json!({"error": "y"}));
    }
}
