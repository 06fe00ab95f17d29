use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use gateward_application::RequestPasswordResetUseCase;
use gateward_core::{Email, EmailClient, UserStore};
use secrecy::Secret;
use serde::Deserialize;

use super::error::AuthApiError;

#[derive(Deserialize)]
pub struct RequestPasswordResetRequest {
    pub email: Secret<String>,
}

#[tracing::instrument(name = "Request password reset", skip_all)]
pub async fn request_password_reset<U, E>(
    State((user_store, email_client)): State<(U, E)>,
    Json(request): Json<RequestPasswordResetRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let email = Email::try_from(request.email)?;

    let use_case = RequestPasswordResetUseCase::new(user_store, email_client);
    use_case.execute(email).await?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "message": "Password reset token sent" })),
    ))
}
