use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use gateward_application::SetPasswordUseCase;
use gateward_core::{Password, ResetToken, UserStore};
use secrecy::Secret;
use serde::Deserialize;

use super::error::AuthApiError;

#[derive(Deserialize)]
pub struct SetPasswordRequest {
    pub token: String,
    #[serde(rename = "newPassword")]
    pub new_password: Secret<String>,
}

#[tracing::instrument(name = "Set password", skip_all)]
pub async fn set_password<U>(
    State(user_store): State<U>,
    Json(request): Json<SetPasswordRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + Clone + 'static,
{
    // An unparseable candidate fails exactly like an unknown one; the
    // response never says why a token was rejected.
    let token = ResetToken::try_from(request.token)
        .map_err(|_| AuthApiError::InvalidOrExpiredToken)?;
    let new_password = Password::try_from(request.new_password)?;

    let use_case = SetPasswordUseCase::new(user_store);
    use_case.execute(token, new_password).await?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "message": "Password set successfully" })),
    ))
}
