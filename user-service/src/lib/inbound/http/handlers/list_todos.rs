use auth::Identity;
use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::caller_id;
use super::ApiError;
use super::ApiSuccess;
use super::TodoPageData;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::Pagination;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct TodoQuery {
    page: Option<u32>,
    limit: Option<u32>,
}

/// One page of the caller's todos, newest first.
pub async fn list_todos(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    query: Result<Query<TodoQuery>, QueryRejection>,
) -> Result<ApiSuccess<TodoPageData>, ApiError> {
    let owner = caller_id(&identity)?;
    let Query(params) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let pagination = Pagination::new(params.page, params.limit).map_err(TodoError::from)?;

    state
        .todo_service
        .list_todos(&owner, pagination)
        .await
        .map_err(ApiError::from)
        .map(|ref page| ApiSuccess::new(StatusCode::OK, page.into()))
}
