use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use contracts::enums::user_profile::UserProfile;
use contracts::system::auth::TokenClaims;

use crate::shared::error::ApiError;

/// Разбор `Authorization: Bearer <jwt>`
fn authenticate(req: &Request<Body>) -> Result<TokenClaims, ApiError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("No autorizado".to_string()))?;

    let keys = super::jwt::keys()?;
    keys.validate(token)
        .map_err(|_| ApiError::Unauthorized("Token inválido o expirado".to_string()))
}

async fn require(
    mut req: Request<Body>,
    next: Next,
    allowed: fn(&UserProfile) -> bool,
) -> Result<Response, ApiError> {
    let claims = authenticate(&req)?;
    if !allowed(&claims.profile) {
        tracing::warn!(
            "Access denied for {} ({}) to {}",
            claims.email,
            claims.profile.code(),
            req.uri().path()
        );
        return Err(ApiError::forbidden());
    }
    // Add claims to request extensions for use in handlers
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Middleware that requires valid JWT authentication
pub async fn require_auth(req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    require(req, next, |_| true).await
}

/// Vendedor y superiores: crear pedidos, mover inventario
pub async fn require_seller(req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    require(req, next, UserProfile::can_edit_orders).await
}

/// Gerente o administrador
pub async fn require_manager(req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    require(req, next, UserProfile::can_manage_users).await
}

/// Aprobar y cancelar pedidos
pub async fn require_approver(req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    require(req, next, UserProfile::can_approve_orders).await
}

/// Alta de productos en el catálogo
pub async fn require_catalog(req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    require(req, next, UserProfile::can_manage_products).await
}

/// Middleware that requires admin privileges
pub async fn require_admin(req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    require(req, next, UserProfile::can_edit_users).await
}
