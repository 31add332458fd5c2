use auth::Identity;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::caller_id;
use super::ApiError;
use super::ApiSuccess;
use super::TodoData;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::TodoDescription;
use crate::domain::todo::models::TodoTitle;
use crate::inbound::http::router::AppState;

/// HTTP request body for creating a todo (raw JSON)
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    title: String,
    #[serde(default)]
    description: String,
}

impl CreateTodoRequest {
    fn try_into_command(self) -> Result<CreateTodoCommand, TodoError> {
        let title = TodoTitle::new(self.title)?;
        let description = TodoDescription::new(self.description)?;
        Ok(CreateTodoCommand::new(title, description))
    }
}

pub async fn create_todo(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<CreateTodoRequest>,
) -> Result<ApiSuccess<TodoData>, ApiError> {
    let owner = caller_id(&identity)?;
    let command = body.try_into_command()?;

    state
        .todo_service
        .create_todo(&owner, command)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::CREATED, todo.into()))
}
