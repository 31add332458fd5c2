use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::PasswordError;
use chrono::Utc;

use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Argon2 work runs on the blocking thread pool so request workers stay free.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuing
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);

        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
                .await
                .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))??;

        Ok(password_hash)
    }

    async fn verify_and_issue(
        &self,
        user: &User,
        password: &str,
    ) -> Result<String, AuthenticationError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_string();
        let stored_hash = user.password_hash.clone();
        let identity = user.identity();

        tokio::task::spawn_blocking(move || {
            authenticator
                .authenticate(&password, &stored_hash, &identity)
                .map(|result| result.access_token)
        })
        .await
        .map_err(|e| {
            AuthenticationError::PasswordError(PasswordError::HashingFailed(format!(
                "Password verification task failed: {}",
                e
            )))
        })?
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register_user(
        &self,
        command: CreateUserCommand,
    ) -> Result<AuthenticatedUser, UserError> {
        let password_hash = self
            .hash_password(command.password.as_str().to_string())
            .await?;

        let user = User {
            id: UserId::new(),
            email: command.email,
            name: command.name,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;

        let access_token = self.authenticator.issue_token(&created_user.identity())?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(AuthenticatedUser {
            user: created_user,
            access_token,
        })
    }

    async fn login(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<AuthenticatedUser, UserError> {
        let user = match self.repository.find_by_email(email.as_str()).await? {
            Some(user) => user,
            None => {
                // Same Argon2 cost as a real verification, so response time
                // does not reveal whether the email is registered.
                if let Err(e) = self.hash_password(password.to_string()).await {
                    tracing::debug!(error = %e, "Decoy hashing failed");
                }
                tracing::debug!("Login rejected: unknown email");
                return Err(UserError::InvalidCredentials);
            }
        };

        match self.verify_and_issue(&user, password).await {
            Ok(access_token) => {
                tracing::info!(user_id = %user.id, "User logged in");
                Ok(AuthenticatedUser { user, access_token })
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
                Err(UserError::InvalidCredentials)
            }
            Err(AuthenticationError::PasswordError(
                e @ (PasswordError::MalformedCredential(_) | PasswordError::VersionMismatch { .. }),
            )) => Err(UserError::CorruptCredential {
                user_id: user.id.to_string(),
                reason: e.to_string(),
            }),
            Err(AuthenticationError::PasswordError(e)) => Err(UserError::Password(e)),
            Err(AuthenticationError::JwtError(e)) => Err(UserError::Token(e)),
        }
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}
