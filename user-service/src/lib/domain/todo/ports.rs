use async_trait::async_trait;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::Pagination;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoPage;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::domain::user::models::UserId;

/// Port for todo domain service operations.
///
/// Every operation acts on behalf of `owner`, the authenticated caller.
#[async_trait]
pub trait TodoServicePort: Send + Sync + 'static {
    /// Create a todo owned by `owner`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_todo(&self, owner: &UserId, command: CreateTodoCommand)
        -> Result<Todo, TodoError>;

    /// List one page of the owner's todos, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_todos(&self, owner: &UserId, pagination: Pagination)
        -> Result<TodoPage, TodoError>;

    /// Replace title and description of an owned todo.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `Forbidden` - Todo belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn update_todo(
        &self,
        owner: &UserId,
        id: &TodoId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, TodoError>;

    /// Delete an owned todo.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `Forbidden` - Todo belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn delete_todo(&self, owner: &UserId, id: &TodoId) -> Result<(), TodoError>;
}

/// Persistence operations for todo aggregate.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    /// Persist new todo to storage.
    async fn create(&self, todo: Todo) -> Result<Todo, TodoError>;

    /// Retrieve todo by identifier, whoever owns it.
    ///
    /// # Returns
    /// Optional todo entity (None if not found)
    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoError>;

    /// Retrieve a slice of the owner's todos ordered newest first.
    async fn find_by_owner(
        &self,
        owner: &UserId,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<Todo>, TodoError>;

    /// Count all todos of the owner.
    async fn count_by_owner(&self, owner: &UserId) -> Result<u64, TodoError>;

    /// Overwrite a stored todo.
    ///
    /// # Errors
    /// * `NotFound` - Todo vanished before the write
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, todo: Todo) -> Result<Todo, TodoError>;

    /// Remove a todo.
    ///
    /// # Errors
    /// * `NotFound` - Todo vanished before the delete
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &TodoId) -> Result<(), TodoError>;
}
