use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use gateward_core::{IdentityClaim, PermissionOptions, PermissionRegistry, check_permissions};

use crate::auth::jwt::{JwtAuthConfig, TokenAuthError, validate_auth_token};
use crate::http::routes::AuthApiError;

/// Authentication gate.
///
/// Verifies the bearer credential and attaches the decoded
/// `IdentityClaim` to the request's extensions for downstream guards and
/// handlers. Any failure rejects the request before a handler runs.
#[tracing::instrument(name = "Authenticate request", skip_all)]
pub async fn authenticate(
    State(config): State<JwtAuthConfig>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthApiError> {
    let token = extract_bearer_token(request.headers())?;
    let claims = validate_auth_token(token, &config)?;

    request.extensions_mut().insert(claims.identity());

    Ok(next.run(request).await)
}

/// Per-route authorization state: the process-wide read-only registry
/// plus the constraints this route was declared with at startup.
#[derive(Clone)]
pub struct AuthzState {
    registry: Arc<PermissionRegistry>,
    options: PermissionOptions,
}

impl AuthzState {
    pub fn new(registry: Arc<PermissionRegistry>, options: PermissionOptions) -> Self {
        Self { registry, options }
    }
}

/// Authorization gate.
///
/// Expects `authenticate` to have run on the same route. Mount with
/// `middleware::from_fn_with_state(AuthzState::new(registry, options), authorize)`,
/// one state value per protected route.
#[tracing::instrument(name = "Authorize request", skip_all)]
pub async fn authorize(
    State(state): State<AuthzState>,
    request: Request,
    next: Next,
) -> Result<Response, AuthApiError> {
    let Some(identity) = request.extensions().get::<IdentityClaim>().copied() else {
        // Route wiring mistake: the authorization gate ran without the
        // authentication gate in front of it.
        tracing::error!("authorize guard mounted without authenticate");
        return Err(AuthApiError::MissingToken);
    };

    check_permissions(&state.options, &state.registry, identity.role)?;

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, TokenAuthError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .ok_or(TokenAuthError::MissingToken)?;

    let header = header.to_str().map_err(|_| TokenAuthError::InvalidToken)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(TokenAuthError::InvalidToken)?
        .trim();

    if token.is_empty() {
        return Err(TokenAuthError::MissingToken);
    }

    Ok(token)
}
