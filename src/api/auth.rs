//! HTTP Basic authentication gate

use axum::{
    extract::{Request, State},
    http::{header::WWW_AUTHENTICATE, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::headers::{authorization::Basic, Authorization, HeaderMapExt};

use crate::{error::AppError, models::principal::Principal, AppState};

use super::AuthenticatedUser;

/// Authenticate every request outside the console prefix.
///
/// On success the resolved [`Principal`] is stored in the request extensions
/// for [`AuthenticatedUser`] to pick up. Evaluation is stateless: no session
/// or cookie is issued.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let access = &state.services.access;

    if access.is_public_path(request.uri().path()) {
        return next.run(request).await;
    }

    let Some(Authorization(basic)) = request.headers().typed_get::<Authorization<Basic>>() else {
        return challenge(access.realm(), "Missing basic credentials");
    };

    match access.authenticate(basic.username(), basic.password()).await {
        Ok(principal) => {
            tracing::debug!(username = %principal.username, role = ?principal.role, "authenticated");
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(AppError::Authentication(message)) => challenge(access.realm(), &message),
        Err(e) => e.into_response(),
    }
}

fn challenge(realm: &str, message: &str) -> Response {
    let mut response = AppError::Authentication(message.to_string()).into_response();
    if let Ok(value) = HeaderValue::from_str(&format!("Basic realm=\"{}\"", realm)) {
        response.headers_mut().insert(WWW_AUTHENTICATE, value);
    }
    response
}

/// Current principal
#[utoipa::path(
    get,
    path = "/me",
    tag = "auth",
    security(("basic_auth" = [])),
    responses(
        (status = 200, description = "Authenticated principal", body = Principal),
        (status = 401, description = "Missing or invalid credentials", body = crate::error::ErrorResponse)
    )
)]
pub async fn me(AuthenticatedUser(principal): AuthenticatedUser) -> Json<Principal> {
    Json(principal)
}
