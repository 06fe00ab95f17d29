use axum::{Router, routing::post};
use gateward_adapters::http::routes::{request_password_reset, set_password};
use gateward_core::{EmailClient, UserStore};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Main authentication service that provides the credential-reset routes
///
/// The authentication and authorization guards are not wired here: they
/// are mounted per protected route by the host application, see
/// `gateward_adapters::auth::{authenticate, authorize}`.
pub struct AuthService {
    router: Router,
}

impl AuthService {
    /// Create a new AuthService with the provided store and email client
    ///
    /// # Note on Architecture
    /// Stores implement Clone via internal sharing (Arc or pool handle).
    /// Each route is given its specific state requirements, avoiding
    /// unnecessary cloning.
    pub fn new<U, E>(user_store: U, email_client: E) -> Self
    where
        U: UserStore + Clone + 'static,
        E: EmailClient + Clone + 'static,
    {
        let router = Router::new()
            // Reset request needs the user store and the mail collaborator
            .route(
                "/request-password-reset",
                post(request_password_reset::<U, E>),
            )
            .with_state((user_store.clone(), email_client))
            // Set password only needs the user store
            .route("/set-password", post(set_password::<U>))
            .with_state(user_store);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the AuthService into a router that can be nested into
    /// another application
    pub fn into_router(self) -> Router {
        self.with_trace_layer().router
    }

    /// Run the auth service as a standalone server
    pub async fn run_standalone(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let router = self.into_router();

        tracing::info!("Auth service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
