use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;
use crate::identity::Identity;

/// Claim set carried by every bearer token.
///
/// Decoded as a typed struct: a payload with a missing or mistyped field is
/// rejected instead of being partially read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account identifier)
    pub sub: String,

    pub email: String,

    pub name: String,

    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Create claims for an identity without timestamps.
    pub fn new(identity: &Identity) -> Self {
        Self {
            sub: identity.id.clone(),
            email: identity.email.clone(),
            name: identity.name.clone(),
            iat: None,
            exp: None,
        }
    }

    /// Create claims issued now, expiring after `ttl` when one is given.
    ///
    /// # Arguments
    /// * `identity` - Authenticated subject
    /// * `ttl` - Token lifetime, `None` for tokens without `exp`
    ///
    /// # Errors
    /// * `SigningFailure` - `now + ttl` is not a representable time
    pub fn for_identity(identity: &Identity, ttl: Option<Duration>) -> Result<Self, JwtError> {
        let now = Utc::now();
        let claims = Self::new(identity).with_issued_at(now.timestamp());

        match ttl {
            Some(ttl) => {
                let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
                    JwtError::SigningFailure(format!("token lifetime {} overflows", ttl))
                })?;
                Ok(claims.with_expiration(expires_at.timestamp()))
            }
            None => Ok(claims),
        }
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Check if token is expired; a token is dead from the second of `exp` on.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(false, |exp| current_timestamp >= exp)
    }

    pub fn identity(&self) -> Identity {
        Identity {
            id: self.sub.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Identity {
            id: claims.sub,
            email: claims.email,
            name: claims.name,
        }
    }
}
