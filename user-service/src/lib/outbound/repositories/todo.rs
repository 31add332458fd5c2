use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoDescription;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::ports::TodoRepository;
use crate::domain::user::models::UserId;

pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn todo_from_row(row: PgRow) -> Result<Todo, TodoError> {
    let id: Uuid = row.try_get("id").map_err(database_error)?;
    let user_id: Uuid = row.try_get("user_id").map_err(database_error)?;
    let title: String = row.try_get("title").map_err(database_error)?;
    let description: String = row.try_get("description").map_err(database_error)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(database_error)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(database_error)?;

    Ok(Todo {
        id: TodoId(id),
        owner: UserId(user_id),
        title: TodoTitle::new(title)?,
        description: TodoDescription::new(description)?,
        created_at,
        updated_at,
    })
}

fn database_error(e: sqlx::Error) -> TodoError {
    TodoError::DatabaseError(e.to_string())
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn create(&self, todo: Todo) -> Result<Todo, TodoError> {
        sqlx::query(
            r#"
            INSERT INTO todos (id, user_id, title, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(todo.id.0)
        .bind(todo.owner.0)
        .bind(todo.title.as_str())
        .bind(todo.description.as_str())
        .bind(todo.created_at)
        .bind(todo.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(todo)
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, title, description, created_at, updated_at
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(todo_from_row).transpose()
    }

    async fn find_by_owner(
        &self,
        owner: &UserId,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<Todo>, TodoError> {
        let offset = i64::try_from(offset)
            .map_err(|_| TodoError::DatabaseError(format!("Offset out of range: {}", offset)))?;

        let rows = sqlx::query(
            r#"
            SELECT id, user_id, title, description, created_at, updated_at
            FROM todos
            WHERE user_id = $1
            ORDER BY created_at DESC, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner.0)
        .bind(i64::from(limit))
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(todo_from_row).collect()
    }

    async fn count_by_owner(&self, owner: &UserId) -> Result<u64, TodoError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM todos WHERE user_id = $1")
            .bind(owner.0)
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)?;

        let total: i64 = row.try_get("total").map_err(database_error)?;
        Ok(total.max(0) as u64)
    }

    async fn update(&self, todo: Todo) -> Result<Todo, TodoError> {
        let result = sqlx::query(
            r#"
            UPDATE todos
            SET title = $2, description = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(todo.id.0)
        .bind(todo.title.as_str())
        .bind(todo.description.as_str())
        .bind(todo.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(todo.id));
        }

        Ok(todo)
    }

    async fn delete(&self, id: &TodoId) -> Result<(), TodoError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(*id));
        }

        Ok(())
    }
}
