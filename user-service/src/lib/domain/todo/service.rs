use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::Pagination;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoPage;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::domain::todo::ports::TodoRepository;
use crate::domain::todo::ports::TodoServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for todo operations.
pub struct TodoService<TR>
where
    TR: TodoRepository,
{
    repository: Arc<TR>,
}

impl<TR> TodoService<TR>
where
    TR: TodoRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }

    /// Load a todo and check that `owner` may touch it.
    async fn owned_todo(&self, owner: &UserId, id: &TodoId) -> Result<Todo, TodoError> {
        let todo = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TodoError::NotFound(*id))?;

        if !todo.is_owned_by(owner) {
            tracing::warn!(todo_id = %id, user_id = %owner, "Rejected access to foreign todo");
            return Err(TodoError::Forbidden(*id));
        }

        Ok(todo)
    }
}

#[async_trait]
impl<TR> TodoServicePort for TodoService<TR>
where
    TR: TodoRepository,
{
    async fn create_todo(
        &self,
        owner: &UserId,
        command: CreateTodoCommand,
    ) -> Result<Todo, TodoError> {
        let now = Utc::now();
        let todo = Todo {
            id: TodoId::new(),
            owner: *owner,
            title: command.title,
            description: command.description,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(todo).await?;
        tracing::info!(todo_id = %created.id, user_id = %owner, "Todo created");

        Ok(created)
    }

    async fn list_todos(
        &self,
        owner: &UserId,
        pagination: Pagination,
    ) -> Result<TodoPage, TodoError> {
        let items = self
            .repository
            .find_by_owner(owner, pagination.limit(), pagination.offset())
            .await?;
        let total = self.repository.count_by_owner(owner).await?;

        Ok(TodoPage {
            items,
            page: pagination.page(),
            limit: pagination.limit(),
            total,
        })
    }

    async fn update_todo(
        &self,
        owner: &UserId,
        id: &TodoId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, TodoError> {
        let mut todo = self.owned_todo(owner, id).await?;

        todo.title = command.title;
        todo.description = command.description;
        todo.updated_at = Utc::now();

        self.repository.update(todo).await
    }

    async fn delete_todo(&self, owner: &UserId, id: &TodoId) -> Result<(), TodoError> {
        self.owned_todo(owner, id).await?;
        self.repository.delete(id).await?;
        tracing::info!(todo_id = %id, user_id = %owner, "Todo deleted");

        Ok(())
    }
}
