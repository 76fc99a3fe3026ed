use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use contracts::shared::money::format_quantity;

/// Middleware для логирования HTTP запросов
///
/// Одна строка на запрос: время (UTC-5, Bogotá) | длительность | размер тела | статус метод путь
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Читаем тело ответа, чтобы узнать реальный размер
    match to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            println!(
                "{}",
                log_line(parts.status, &method, &path, start.elapsed().as_millis(), Some(bytes.len()))
            );
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(_) => {
            println!(
                "{}",
                log_line(parts.status, &method, &path, start.elapsed().as_millis(), None)
            );
            Response::from_parts(parts, Body::default())
        }
    }
}

fn log_line(
    status: StatusCode,
    method: &Method,
    path: &str,
    millis: u128,
    size: Option<usize>,
) -> String {
    let timestamp = Utc::now() - chrono::Duration::hours(5);
    // голубой для 200, жёлтый для остальных и для ошибок чтения тела
    let color_code = match (status.as_u16(), size) {
        (200, Some(_)) => "36",
        _ => "33",
    };
    let size_text = size
        .map(|s| format_quantity(s as f64))
        .unwrap_or_else(|| "error".to_string());
    format!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
        color_code,
        timestamp.format("%H:%M:%S"),
        millis,
        size_text,
        status.as_u16(),
        method.as_str(),
        path
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_has_grouped_size_and_color() {
        let line = log_line(StatusCode::OK, &Method::GET, "/api/v1/pedidos", 12, Some(1234567));
        assert!(line.starts_with("\x1b[36m"));
        assert!(line.contains("1.234.567"));
        assert!(line.ends_with("GET /api/v1/pedidos"));

        let failed = log_line(StatusCode::NOT_FOUND, &Method::POST, "/x", 1, None);
        assert!(failed.starts_with("\x1b[33m"));
        assert!(failed.contains("error"));
    }
}
