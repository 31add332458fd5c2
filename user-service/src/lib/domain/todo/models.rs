use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::todo::errors::DescriptionError;
use crate::domain::todo::errors::PaginationError;
use crate::domain::todo::errors::TitleError;
use crate::domain::todo::errors::TodoIdError;
use crate::domain::user::models::UserId;

/// Todo aggregate entity.
///
/// Every todo belongs to exactly one user; only that user may read or
/// change it.
#[derive(Debug, Clone)]
pub struct Todo {
    pub id: TodoId,
    pub owner: UserId,
    pub title: TodoTitle,
    pub description: TodoDescription,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        self.owner == *user
    }
}

/// Todo unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(pub Uuid);

impl TodoId {
    /// Generate a new random todo ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a todo ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, TodoIdError> {
        Uuid::parse_str(s)
            .map(TodoId)
            .map_err(|e| TodoIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Todo title, 1-255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    const MAX_LENGTH: usize = 255;

    /// Create a new validated title.
    ///
    /// # Errors
    /// * `Empty` - Title is empty or whitespace only
    /// * `TooLong` - More than 255 characters
    pub fn new(title: String) -> Result<Self, TitleError> {
        if title.trim().is_empty() {
            return Err(TitleError::Empty);
        }

        let length = title.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(TitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Free-form todo description, may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoDescription(String);

impl TodoDescription {
    const MAX_LENGTH: usize = 100_000;

    /// # Errors
    /// * `TooLong` - More than 100000 characters
    pub fn new(description: String) -> Result<Self, DescriptionError> {
        let length = description.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(DescriptionError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(description))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Page selection for listing todos. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    limit: u32,
}

impl Pagination {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;

    /// Build a page selection, falling back to page 1 and 10 items.
    ///
    /// # Errors
    /// * `ZeroPage` - Page is zero
    /// * `LimitOutOfRange` - Limit is zero or above 100
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Result<Self, PaginationError> {
        let page = page.unwrap_or(Self::DEFAULT_PAGE);
        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT);

        if page == 0 {
            return Err(PaginationError::ZeroPage);
        }
        if limit == 0 || limit > Self::MAX_LIMIT {
            return Err(PaginationError::LimitOutOfRange {
                max: Self::MAX_LIMIT,
                actual: limit,
            });
        }

        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of rows to skip before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// One page of a user's todos plus the user's total count.
#[derive(Debug, Clone)]
pub struct TodoPage {
    pub items: Vec<Todo>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

/// Command to create a todo for the calling user.
#[derive(Debug, Clone)]
pub struct CreateTodoCommand {
    pub title: TodoTitle,
    pub description: TodoDescription,
}

impl CreateTodoCommand {
    pub fn new(title: TodoTitle, description: TodoDescription) -> Self {
        Self { title, description }
    }
}

/// Command replacing a todo's title and description.
#[derive(Debug, Clone)]
pub struct UpdateTodoCommand {
    pub title: TodoTitle,
    pub description: TodoDescription,
}

impl UpdateTodoCommand {
    pub fn new(title: TodoTitle, description: TodoDescription) -> Self {
        Self { title, description }
    }
}
