#![allow(clippy::too_many_arguments, clippy::derivable_impls)]

pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::http::{header, HeaderValue, Method};
    use axum::{middleware, Router};
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{AllowOrigin, Any, CorsLayer};
    use tower_http::services::ServeDir;

    system::tracing::initialize()?;

    // Конфигурация: config.toml рядом с exe + переменные окружения
    shared::config::set_config(shared::config::load_config()?)?;
    let config = shared::config::get_config()?;

    // Initialize database
    let db_path = shared::config::get_database_path(config)?;
    shared::data::db::initialize_database(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    // JWT secret (config or sys_settings)
    system::auth::jwt::initialize(shared::data::db::get_connection(), &config.auth).await?;

    // Ensure admin user exists
    system::initialization::ensure_admin_user_exists(shared::data::db::get_connection(), &config.admin)
        .await?;

    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();
    let cors = if origins.is_empty() {
        CorsLayer::new().allow_origin(Any)
    } else {
        tracing::info!("CORS restricted to {} origin(s)", origins.len());
        CorsLayer::new().allow_origin(AllowOrigin::list(origins))
    }
    .allow_methods([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let app = Router::new()
        .nest("/api/v1", routes::configure_routes())
        .fallback_service(ServeDir::new("dist"))
        .layer(middleware::from_fn(system::middleware::request_logger::request_logger))
        .layer(cors);

    let host: std::net::IpAddr = config.server.host.parse().map_err(|e| {
        anyhow::anyhow!("Invalid server host '{}': {}", config.server.host, e)
    })?;
    let addr = SocketAddr::new(host, config.server.port);

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    config.server.port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", config.server.port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
