use axum::{middleware::Next, response::Response};
use std::sync::Arc;
use tracing::debug;

use crate::common::auth::AuthUser;
use crate::common::UserId;
use crate::domains::auth::JwtService;

/// JWT authentication middleware
///
/// Extracts the JWT from the Authorization header, verifies it, and adds
/// AuthUser to request extensions. If no token or an invalid token is
/// present, the request continues without AuthUser (public access); the
/// handlers decide whether authentication is required.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let auth_user = extract_auth_user(&request, &jwt_service);

    if let Some(user) = auth_user {
        debug!(
            "Authenticated user: {} (staff: {})",
            user.user_id, user.is_staff
        );
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Extract and verify the JWT from a request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    // Get Authorization header
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Extract token (handle both "Bearer <token>" and raw token)
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    // Verify token
    let claims = jwt_service.verify_token(token).ok()?;

    Some(AuthUser {
        user_id: UserId::from_uuid(claims.user_id),
        username: claims.username,
        is_staff: claims.is_staff,
    })
}
