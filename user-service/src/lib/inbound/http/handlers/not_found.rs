use super::ApiError;

pub async fn not_found() -> ApiError {
    ApiError::NotFound("404 Not Found".to_string())
}
