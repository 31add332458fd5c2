use auth::FailureCategory;
use auth::TokenError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

pub const MISSING_OR_MALFORMED_MESSAGE: &str = "missing or malformed JWT";
pub const INVALID_OR_EXPIRED_MESSAGE: &str = "invalid or expired auth token";

/// Middleware that checks the bearer token on every request it guards.
///
/// On success the token's [`auth::Identity`] is inserted into the request
/// extensions, where handlers read it with `Extension<Identity>`. On failure
/// the request is short-circuited and the next handler never runs.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let identity = {
        let authorization = match req.headers().get(AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| {
                reject(TokenError::Malformed(
                    "authorization header is not valid UTF-8".to_string(),
                ))
            })?),
            None => None,
        };

        state
            .authenticator
            .authenticate_bearer(authorization)
            .map_err(reject)?
    };

    tracing::debug!(user_id = %identity.id, "Request authenticated");
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

fn reject(err: TokenError) -> Response {
    tracing::warn!(kind = err.kind(), "Rejected request token");

    match err.category() {
        FailureCategory::BadRequest => {
            ApiError::BadRequest(MISSING_OR_MALFORMED_MESSAGE.to_string()).into_response()
        }
        FailureCategory::Unauthorized => {
            ApiError::Unauthorized(INVALID_OR_EXPIRED_MESSAGE.to_string()).into_response()
        }
    }
}
