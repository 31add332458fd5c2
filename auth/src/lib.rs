//! Authentication utilities library
//!
//! Provides the identity layer for the service:
//! - Password hashing (Argon2id, self-describing encoded credentials)
//! - JWT issuance and verification (HS512)
//! - Per-request bearer token classification
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hash.starts_with("$argon2id$v=19,m=61440,t=1,p=4$"));
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Identity, JwtHandler, TokenAuthenticator, TokenIssuer};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let issuer = TokenIssuer::new(handler.clone(), None);
//! let gate = TokenAuthenticator::new(handler);
//!
//! let identity = Identity::new("u1", "a@b.com", "A");
//! let token = issuer.issue(&identity).unwrap();
//! let header = format!("Bearer {}", token);
//! assert_eq!(gate.authenticate(Some(header.as_str())).unwrap(), identity);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Identity};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let identity = Identity::new("user123", "alice@example.com", "Alice");
//! let result = auth.authenticate("password123", &hash, &identity).unwrap();
//!
//! // Validate token
//! let decoded = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded, identity);
//! ```

pub mod authenticator;
pub mod identity;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use identity::Identity;
pub use jwt::Claims;
pub use jwt::FailureCategory;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenAuthenticator;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use password::EncodedCredential;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordParams;
