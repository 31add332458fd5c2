use thiserror::Error;

/// Error type for building keys and issuing tokens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to sign token: {0}")]
    SigningFailure(String),

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

/// Classified outcome of a rejected bearer token.
///
/// The detail carried by `Malformed` is for logs only; responses are built
/// from [`TokenError::category`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Missing bearer token")]
    Missing,

    #[error("Malformed bearer token: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token is expired")]
    Expired,
}

/// User-visible grouping of token failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    /// Resend a well-formed authorization header.
    BadRequest,
    /// Authenticate again.
    Unauthorized,
}

impl TokenError {
    pub fn category(&self) -> FailureCategory {
        match self {
            TokenError::Missing | TokenError::Malformed(_) => FailureCategory::BadRequest,
            TokenError::SignatureInvalid | TokenError::Expired => FailureCategory::Unauthorized,
        }
    }

    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::Missing => "missing",
            TokenError::Malformed(_) => "malformed",
            TokenError::SignatureInvalid => "signature_invalid",
            TokenError::Expired => "expired",
        }
    }
}
