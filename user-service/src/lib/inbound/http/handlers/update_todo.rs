use auth::Identity;
use axum::extract::Path;
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
use crate::domain::todo::models::TodoDescription;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::inbound::http::router::AppState;

/// HTTP request body for replacing a todo (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    title: String,
    #[serde(default)]
    description: String,
}

impl UpdateTodoRequest {
    fn try_into_command(self) -> Result<UpdateTodoCommand, TodoError> {
        let title = TodoTitle::new(self.title)?;
        let description = TodoDescription::new(self.description)?;
        Ok(UpdateTodoCommand::new(title, description))
    }
}

pub async fn update_todo(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    Json(body): Json<UpdateTodoRequest>,
) -> Result<ApiSuccess<TodoData>, ApiError> {
    let owner = caller_id(&identity)?;
    let todo_id = TodoId::from_string(&id).map_err(TodoError::from)?;
    let command = body.try_into_command()?;

    state
        .todo_service
        .update_todo(&owner, &todo_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::OK, todo.into()))
}
