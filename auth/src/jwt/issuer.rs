use chrono::Duration;

use super::claims::Claims;
use super::errors::JwtError;
use super::handler::JwtHandler;
use crate::identity::Identity;

/// Issues signed bearer tokens for verified identities.
#[derive(Clone)]
pub struct TokenIssuer {
    handler: JwtHandler,
    ttl: Option<Duration>,
}

impl TokenIssuer {
    pub const DEFAULT_TTL_HOURS: i64 = 24;

    /// Create an issuer.
    ///
    /// # Arguments
    /// * `handler` - Codec holding the signing key
    /// * `ttl` - Lifetime stamped into `exp`; `None` issues tokens without expiry
    pub fn new(handler: JwtHandler, ttl: Option<Duration>) -> Self {
        Self { handler, ttl }
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Issue a token carrying `sub`, `email`, `name`, `iat` and `exp`.
    ///
    /// # Errors
    /// * `SigningFailure` - Expiry overflows or token signing failed
    pub fn issue(&self, identity: &Identity) -> Result<String, JwtError> {
        self.sign(&Claims::for_identity(identity, self.ttl)?)
    }

    /// Sign an explicit claim set.
    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        self.handler.encode(claims)
    }
}
