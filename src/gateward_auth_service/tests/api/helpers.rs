use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    middleware,
    routing::get,
};
use gateward_adapters::{
    auth::{AuthzState, JwtAuthConfig, authenticate, authorize, generate_auth_token},
    email::MockEmailClient,
    persistence::HashMapUserStore,
};
use gateward_auth_service::AuthService;
use gateward_core::{
    Email, EmailClient, NewUser, Password, PermissionOptions, PermissionRegistry, Role, User,
    UserStore,
};
use secrecy::Secret;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub user_store: HashMapUserStore,
    pub email_client: MockEmailClient,
    pub jwt_config: JwtAuthConfig,
}

impl TestApp {
    pub fn new() -> Self {
        let user_store = HashMapUserStore::new();
        let email_client = MockEmailClient::new();
        let router = AuthService::new(user_store.clone(), email_client.clone()).into_router();

        Self {
            router,
            user_store,
            email_client,
            jwt_config: test_jwt_config(),
        }
    }

    /// Same app wired with a different mail collaborator.
    pub fn with_email_client<E>(email_client: E) -> (Self, E)
    where
        E: EmailClient + Clone + 'static,
    {
        let user_store = HashMapUserStore::new();
        let router = AuthService::new(user_store.clone(), email_client.clone()).into_router();

        (
            Self {
                router,
                user_store,
                // Unused recorder; the caller holds the real client.
                email_client: MockEmailClient::new(),
                jwt_config: test_jwt_config(),
            },
            email_client,
        )
    }

    pub async fn seed_user(&self, email: &str, password: &str, role: Role) -> User {
        self.user_store
            .add_user(NewUser::new(
                Email::try_from(email.to_owned()).unwrap(),
                Password::try_from(password.to_owned()).unwrap(),
                role,
            ))
            .await
            .unwrap()
    }

    pub fn bearer_for(&self, user: &User) -> String {
        let token = generate_auth_token(user.id(), user.role(), &self.jwt_config).unwrap();
        format!("Bearer {token}")
    }
}

pub fn test_jwt_config() -> JwtAuthConfig {
    JwtAuthConfig {
        jwt_secret: Secret::from("test-secret".to_owned()),
        token_ttl_in_seconds: 600,
    }
}

/// A host-application route guarded by the two gates: authenticate runs
/// first, then the per-route authorization constraints.
pub fn protected_router(
    jwt_config: JwtAuthConfig,
    registry: Arc<PermissionRegistry>,
    options: PermissionOptions,
) -> Router {
    Router::new()
        .route("/protected", get(|| async { "ok" }))
        .route_layer(middleware::from_fn_with_state(
            AuthzState::new(registry, options),
            authorize,
        ))
        .route_layer(middleware::from_fn_with_state(jwt_config, authenticate))
}

/// A mis-wired route: authorization mounted without authentication.
pub fn misconfigured_router(
    registry: Arc<PermissionRegistry>,
    options: PermissionOptions,
) -> Router {
    Router::new()
        .route("/protected", get(|| async { "ok" }))
        .route_layer(middleware::from_fn_with_state(
            AuthzState::new(registry, options),
            authorize,
        ))
}

pub async fn post_json(
    router: &Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(router, request).await
}

pub async fn get_with_auth(
    router: &Router,
    uri: &str,
    bearer: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(bearer) = bearer {
        builder = builder.header(header::AUTHORIZATION, bearer);
    }
    let request = builder.body(Body::empty()).unwrap();

    send(router, request).await
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, body)
}
