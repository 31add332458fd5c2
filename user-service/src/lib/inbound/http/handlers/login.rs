use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AuthenticatedUserData;
use super::WRONG_CREDENTIALS_MESSAGE;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<AuthenticatedUserData>, ApiError> {
    // Neither a malformed email nor an out-of-policy password can match an
    // account.
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::BadRequest(WRONG_CREDENTIALS_MESSAGE.to_string()))?;
    let password = Password::new(body.password)
        .map_err(|_| ApiError::BadRequest(WRONG_CREDENTIALS_MESSAGE.to_string()))?;

    let authenticated = state
        .user_service
        .login(&email, password.as_str())
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthenticatedUserData {
            user: (&authenticated.user).into(),
            token: authenticated.access_token,
        },
    ))
}

/// HTTP request body for logging in (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}
