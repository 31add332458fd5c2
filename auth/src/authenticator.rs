use chrono::Duration;

use crate::identity::Identity;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenAuthenticator;
use crate::jwt::TokenError;
use crate::jwt::TokenIssuer;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT handling.
///
/// Owns the credential hasher, the token issuer and the token gate. The
/// issuer and the gate share one signing key and algorithm.
#[derive(Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_authenticator: TokenAuthenticator,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator with default hashing cost, HS512 and a
    /// 24 hour token lifetime.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    ///
    /// # Errors
    /// * `SigningFailure` - Secret is empty
    pub fn new(jwt_secret: &[u8]) -> Result<Self, JwtError> {
        Ok(Self::from_parts(
            PasswordHasher::new(),
            JwtHandler::new(jwt_secret)?,
            Some(Duration::hours(TokenIssuer::DEFAULT_TTL_HOURS)),
        ))
    }

    /// Assemble an authenticator from configured parts.
    ///
    /// # Arguments
    /// * `password_hasher` - Hasher carrying the cost parameters for new hashes
    /// * `jwt_handler` - Signing key and algorithm shared by issuing and verifying
    /// * `token_ttl` - Lifetime of issued tokens, `None` for no `exp` claim
    pub fn from_parts(
        password_hasher: PasswordHasher,
        jwt_handler: JwtHandler,
        token_ttl: Option<Duration>,
    ) -> Self {
        Self {
            password_hasher,
            token_issuer: TokenIssuer::new(jwt_handler.clone(), token_ttl),
            token_authenticator: TokenAuthenticator::new(jwt_handler),
        }
    }

    pub fn password_hasher(&self) -> &PasswordHasher {
        &self.password_hasher
    }

    pub fn token_issuer(&self) -> &TokenIssuer {
        &self.token_issuer
    }

    pub fn token_authenticator(&self) -> &TokenAuthenticator {
        &self.token_authenticator
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored encoded credential.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a token for `identity`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored encoded credential
    /// * `identity` - Subject to put in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored credential cannot be parsed or replayed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        identity: &Identity,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_issuer.issue(identity)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token without password verification.
    ///
    /// Used right after registration, once the account is persisted.
    pub fn issue_token(&self, identity: &Identity) -> Result<String, JwtError> {
        self.token_issuer.issue(identity)
    }

    /// Validate a bare token and return its identity.
    pub fn validate_token(&self, token: &str) -> Result<Identity, TokenError> {
        self.token_authenticator.authenticate_token(token)
    }

    /// Validate the text of an `Authorization` header.
    pub fn authenticate_bearer(&self, authorization: Option<&str>) -> Result<Identity, TokenError> {
        self.token_authenticator.authenticate(authorization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::PasswordParams;

    fn authenticator(secret: &[u8]) -> Authenticator {
        let hasher = PasswordHasher::with_params(PasswordParams {
            iterations: 1,
            memory_kib: 256,
            parallelism: 1,
            output_len: 32,
            salt_len: 16,
        })
        .unwrap();

        Authenticator::from_parts(
            hasher,
            JwtHandler::new(secret).unwrap(),
            Some(Duration::hours(1)),
        )
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator(b"test_secret_key_at_least_32_bytes!");

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let identity = Identity::new("user123", "user@example.com", "User");
        let result = authenticator
            .authenticate(password, &hash, &identity)
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());

        let decoded = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(decoded, identity);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator(b"test_secret_key_at_least_32_bytes!");

        let hash = authenticator.hash_password("my_password").unwrap();
        let identity = Identity::new("user123", "user@example.com", "User");

        let result = authenticator.authenticate("wrong_password", &hash, &identity);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_corrupt_credential() {
        let authenticator = authenticator(b"secret");
        let identity = Identity::new("user123", "user@example.com", "User");

        let result = authenticator.authenticate("my_password", "$argon2id$broken", &identity);
        assert!(matches!(
            result,
            Err(AuthenticationError::PasswordError(
                PasswordError::MalformedCredential(_)
            ))
        ));
    }

    #[test]
    fn test_end_to_end_scenarios() {
        let authenticator = authenticator(b"k");

        let encoded = authenticator.hash_password("correct horse").unwrap();
        assert!(authenticator.verify_password("correct horse", &encoded).unwrap());
        assert!(!authenticator.verify_password("wrong horse", &encoded).unwrap());

        let identity = Identity::new("u1", "a@b.com", "A");
        let token = authenticator.issue_token(&identity).unwrap();
        assert_eq!(authenticator.validate_token(&token), Ok(identity));

        let other = Authenticator::new(b"different-key").unwrap();
        assert_eq!(
            other.validate_token(&token),
            Err(TokenError::SignatureInvalid)
        );
    }

    #[test]
    fn test_authenticate_bearer() {
        let authenticator = authenticator(b"k");
        let identity = Identity::new("u1", "a@b.com", "A");
        let token = authenticator.issue_token(&identity).unwrap();

        let header = format!("Bearer {}", token);
        assert_eq!(
            authenticator.authenticate_bearer(Some(header.as_str())),
            Ok(identity)
        );
        assert_eq!(
            authenticator.authenticate_bearer(None),
            Err(TokenError::Missing)
        );
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            Authenticator::new(b""),
            Err(JwtError::SigningFailure(_))
        ));
    }
}
