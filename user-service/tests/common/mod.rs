#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordHasher;
use auth::PasswordParams;
use axum::body::Body;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::sync::Mutex;
use tower::ServiceExt;
use user_service::domain::todo::errors::TodoError;
use user_service::domain::todo::models::Todo;
use user_service::domain::todo::models::TodoId;
use user_service::domain::todo::ports::TodoRepository;
use user_service::domain::todo::service::TodoService;
use user_service::domain::user::models::User;
use user_service::domain::user::models::UserId;
use user_service::domain::user::ports::UserRepository;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::user::errors::UserError;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Repository keeping users in memory, with the same uniqueness rule as the
/// `users_email_key` constraint.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .await
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }
}

/// Todo repository kept in memory, ordered newest first on listing.
#[derive(Default)]
pub struct InMemoryTodoRepository {
    todos: Mutex<HashMap<TodoId, Todo>>,
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn create(&self, todo: Todo) -> Result<Todo, TodoError> {
        self.todos.lock().await.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoError> {
        Ok(self.todos.lock().await.get(id).cloned())
    }

    async fn find_by_owner(
        &self,
        owner: &UserId,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<Todo>, TodoError> {
        let todos = self.todos.lock().await;
        let mut owned: Vec<Todo> = todos
            .values()
            .filter(|todo| todo.owner == *owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.0.cmp(&b.id.0)));

        Ok(owned
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_by_owner(&self, owner: &UserId) -> Result<u64, TodoError> {
        let todos = self.todos.lock().await;
        Ok(todos.values().filter(|todo| todo.owner == *owner).count() as u64)
    }

    async fn update(&self, todo: Todo) -> Result<Todo, TodoError> {
        let mut todos = self.todos.lock().await;
        match todos.get_mut(&todo.id) {
            Some(stored) => {
                *stored = todo.clone();
                Ok(todo)
            }
            None => Err(TodoError::NotFound(todo.id)),
        }
    }

    async fn delete(&self, id: &TodoId) -> Result<(), TodoError> {
        self.todos
            .lock()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(TodoError::NotFound(*id))
    }
}

/// Router wired to in-memory repositories, driven without a socket.
pub struct TestApp {
    pub router: Router,
    pub repository: Arc<InMemoryUserRepository>,
    pub jwt_handler: JwtHandler,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    pub fn message(&self) -> &str {
        self.body["data"]["message"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    pub fn new() -> Self {
        let hasher = PasswordHasher::with_params(PasswordParams {
            iterations: 1,
            memory_kib: 64,
            parallelism: 1,
            output_len: 32,
            salt_len: 16,
        })
        .expect("Invalid test hasher parameters");
        let jwt_handler = JwtHandler::new(JWT_SECRET).expect("Failed to build JWT handler");

        let authenticator = Arc::new(Authenticator::from_parts(
            hasher,
            jwt_handler.clone(),
            Some(chrono::Duration::hours(24)),
        ));

        let repository = Arc::new(InMemoryUserRepository::default());
        let user_service = Arc::new(UserService::new(
            Arc::clone(&repository),
            Arc::clone(&authenticator),
        ));
        let todo_service = Arc::new(TodoService::new(Arc::new(
            InMemoryTodoRepository::default(),
        )));

        Self {
            router: create_router(user_service, todo_service, authenticator),
            repository,
            jwt_handler,
        }
    }

    /// POST a JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");

        self.send(request).await
    }

    /// GET with an optional raw Authorization header value.
    pub async fn get(&self, path: &str, authorization: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let request = builder
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    /// GET with an Authorization header that need not be valid UTF-8.
    pub async fn get_with_header(&self, path: &str, authorization: HeaderValue) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .header(header::AUTHORIZATION, authorization)
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Send a request carrying `Bearer <token>` and an optional JSON body.
    pub async fn authorized(
        &self,
        method: Method,
        path: &str,
        token: &str,
        body: Option<Value>,
    ) -> TestResponse {
        let builder = Request::builder()
            .method(method)
            .uri(path)
            .header(header::AUTHORIZATION, format!("Bearer {}", token));

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send(request).await
    }

    /// Register a user and return the issued token.
    pub async fn register(&self, email: &str, password: &str, name: &str) -> String {
        let response = self
            .post(
                "/api/auth/register",
                serde_json::json!({
                    "email": email,
                    "password": password,
                    "name": name,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);

        response.body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}
