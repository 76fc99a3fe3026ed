use axum::{
    middleware,
    routing::{delete, get, post, put, MethodRouter},
    Router,
};

use crate::system::auth::middleware::{
    require_admin, require_approver, require_auth, require_catalog, require_manager, require_seller,
};
use crate::{handlers, system};

/// Конфигурация всех роутов приложения (монтируется под `/api/v1`)
pub fn configure_routes() -> Router {
    Router::new()
        // ========================================
        // SYSTEM ROUTES (PUBLIC)
        // ========================================
        .route("/health", get(system::handlers::auth::health))
        .route("/auth/login", post(system::handlers::auth::login))
        // ========================================
        // SYSTEM ROUTES (PROTECTED)
        // ========================================
        .route(
            "/me",
            get(system::handlers::auth::me).layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/users/me/prefs",
            put(system::handlers::prefs::update_my_prefs).layer(middleware::from_fn(require_auth)),
        )
        // Gestión de usuarios: gerente lee y crea, administrador edita y elimina
        .route(
            "/admin/users",
            get(system::handlers::users::list)
                .post(system::handlers::users::create)
                .layer(middleware::from_fn(require_manager)),
        )
        .route(
            "/admin/users/:id",
            get(system::handlers::users::get_by_id)
                .layer(middleware::from_fn(require_manager))
                .merge(
                    put(system::handlers::users::update)
                        .delete(system::handlers::users::delete)
                        .layer(middleware::from_fn(require_admin)),
                ),
        )
        // ========================================
        // BUSINESS ROUTES
        // ========================================
        // A001 Clientes
        .route(
            "/clientes",
            get(handlers::a001_client::search)
                .layer(middleware::from_fn(require_auth))
                .merge(seller(post(handlers::a001_client::create))),
        )
        .route(
            "/clientes/:id",
            get(handlers::a001_client::get_by_id).layer(middleware::from_fn(require_auth)),
        )
        // A002 Productos e inventario
        .route(
            "/inventario/resumen",
            get(handlers::a002_product::inventory_summary).layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/inventario/movimientos",
            seller(post(handlers::a002_product::create_movement)),
        )
        .route(
            "/productos",
            post(handlers::a002_product::create_product).layer(middleware::from_fn(require_catalog)),
        )
        // A003 Pedidos
        .route(
            "/pedidos",
            get(handlers::a003_order::list).layer(middleware::from_fn(require_auth)),
        )
        .route("/pedidos/start", seller(post(handlers::a003_order::start)))
        .route(
            "/pedidos/:id",
            get(handlers::a003_order::get_by_id)
                .layer(middleware::from_fn(require_auth))
                .merge(seller(delete(handlers::a003_order::delete))),
        )
        .route(
            "/pedidos/:id/items",
            seller(post(handlers::a003_order::add_item)),
        )
        .route(
            "/pedidos/:id/items/:item_id",
            seller(
                put(handlers::a003_order::update_item).delete(handlers::a003_order::delete_item),
            ),
        )
        .route("/pedidos/:id/submit", seller(post(handlers::a003_order::submit)))
        .route("/pedidos/:id/approve", approver(post(handlers::a003_order::approve)))
        .route("/pedidos/:id/cancel", approver(post(handlers::a003_order::cancel)))
}

fn seller(route: MethodRouter) -> MethodRouter {
    route.layer(middleware::from_fn(require_seller))
}

fn approver(route: MethodRouter) -> MethodRouter {
    route.layer(middleware::from_fn(require_approver))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use contracts::enums::user_profile::UserProfile;
    use tower::ServiceExt;

    use crate::system::auth::jwt;

    fn bearer(profile: UserProfile) -> String {
        let token = jwt::test_keys()
            .issue("u-1", "usuario@gestor.local", profile)
            .unwrap();
        format!("Bearer {}", token)
    }

    async fn call(method: &str, uri: &str, profile: Option<UserProfile>) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(profile) = profile {
            builder = builder.header("Authorization", bearer(profile));
        }
        let req = builder.body(Body::from("{}")).unwrap();
        let resp = configure_routes().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn seller_cannot_approve_or_cancel() {
        for action in ["approve", "cancel"] {
            let (status, body) = call("POST", &format!("/pedidos/p-1/{}", action), Some(UserProfile::Seller)).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{}", action);
            assert_eq!(body, serde_json::json!({"error": "Permiso denegado"}));
        }
    }

    #[tokio::test]
    async fn viewer_is_read_only() {
        let writes = [
            ("POST", "/pedidos/start"),
            ("POST", "/pedidos/p-1/items"),
            ("PUT", "/pedidos/p-1/items/i-1"),
            ("DELETE", "/pedidos/p-1"),
            ("POST", "/pedidos/p-1/submit"),
            ("POST", "/clientes"),
            ("POST", "/inventario/movimientos"),
        ];
        for (method, uri) in writes {
            let (status, _) = call(method, uri, Some(UserProfile::Viewer)).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{} {}", method, uri);
        }
    }

    #[tokio::test]
    async fn only_admin_edits_or_deletes_users() {
        for method in ["PUT", "DELETE"] {
            let (status, _) = call(method, "/admin/users/u-2", Some(UserProfile::Manager)).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{}", method);
        }
        let (status, _) = call("GET", "/admin/users", Some(UserProfile::Seller)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn seller_cannot_create_products() {
        let (status, _) = call("POST", "/productos", Some(UserProfile::Seller)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn missing_or_forged_token_is_unauthorized() {
        jwt::test_keys();
        let (status, body) = call("GET", "/pedidos", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, serde_json::json!({"error": "No autorizado"}));

        let forged = jwt::JwtKeys::new("otra-clave", 1)
            .issue("u-1", "x@gestor.local", UserProfile::Admin)
            .unwrap();
        let req = Request::builder()
            .uri("/pedidos")
            .header("Authorization", format!("Bearer {}", forged))
            .body(Body::empty())
            .unwrap();
        let resp = configure_routes().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
