use chrono::Utc;

use super::errors::TokenError;
use super::handler::JwtHandler;
use crate::identity::Identity;

/// Authorization scheme expected in front of the token.
pub const BEARER_SCHEME: &str = "Bearer";

/// Per-request token gate.
///
/// Turns the raw `Authorization` header into an [`Identity`] or a classified
/// [`TokenError`]:
///
/// * no header → `Missing`
/// * wrong scheme, not three segments, undecodable parts → `Malformed`
/// * signature mismatch under the shared key → `SignatureInvalid`
/// * `exp` at or before now → `Expired`
#[derive(Clone)]
pub struct TokenAuthenticator {
    handler: JwtHandler,
}

impl TokenAuthenticator {
    pub fn new(handler: JwtHandler) -> Self {
        Self { handler }
    }

    /// Authenticate the text of an `Authorization` header.
    ///
    /// # Arguments
    /// * `authorization` - Header value, `None` when the header is absent
    ///
    /// # Returns
    /// Identity decoded from a verified token
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<Identity, TokenError> {
        let token = extract_bearer(authorization)?;
        self.authenticate_token(token)
    }

    /// Authenticate a bare token against the current time.
    pub fn authenticate_token(&self, token: &str) -> Result<Identity, TokenError> {
        self.authenticate_token_at(token, Utc::now().timestamp())
    }

    /// Authenticate a bare token against an explicit Unix timestamp.
    pub fn authenticate_token_at(&self, token: &str, now: i64) -> Result<Identity, TokenError> {
        let claims = self.handler.decode(token)?;

        if claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims.into())
    }
}

/// Pull the token out of a `Bearer <token>` header value.
///
/// # Errors
/// * `Missing` - Header absent or blank
/// * `Malformed` - Other scheme, or no token after the scheme
pub fn extract_bearer(authorization: Option<&str>) -> Result<&str, TokenError> {
    let header = authorization
        .map(str::trim)
        .filter(|header| !header.is_empty())
        .ok_or(TokenError::Missing)?;

    let (scheme, token) = header.split_once(' ').ok_or_else(|| {
        TokenError::Malformed(format!("expected '{} <token>'", BEARER_SCHEME))
    })?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(TokenError::Malformed(format!(
            "unsupported authorization scheme '{}'",
            scheme
        )));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(TokenError::Malformed("empty bearer token".to_string()));
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::jwt::Claims;
    use crate::jwt::TokenIssuer;

    fn pair(secret: &[u8]) -> (TokenIssuer, TokenAuthenticator) {
        let handler = JwtHandler::new(secret).unwrap();
        (
            TokenIssuer::new(handler.clone(), Some(Duration::hours(1))),
            TokenAuthenticator::new(handler),
        )
    }

    fn identity() -> Identity {
        Identity::new("u1", "a@b.com", "A")
    }

    #[test]
    fn test_issued_token_round_trips() {
        let (issuer, authenticator) = pair(b"k");
        let token = issuer.issue(&identity()).unwrap();

        let header = format!("Bearer {}", token);
        let authenticated = authenticator
            .authenticate(Some(header.as_str()))
            .expect("Authentication failed");

        assert_eq!(authenticated, identity());
    }

    #[test]
    fn test_different_key_is_signature_invalid() {
        let (issuer, _) = pair(b"k");
        let (_, other) = pair(b"different-key");

        let token = issuer.issue(&identity()).unwrap();
        assert_eq!(
            other.authenticate_token(&token),
            Err(TokenError::SignatureInvalid)
        );
    }

    #[test]
    fn test_missing_header() {
        let (_, authenticator) = pair(b"k");

        assert_eq!(authenticator.authenticate(None), Err(TokenError::Missing));
        assert_eq!(authenticator.authenticate(Some("   ")), Err(TokenError::Missing));
    }

    #[test]
    fn test_malformed_header() {
        let (issuer, authenticator) = pair(b"k");
        let token = issuer.issue(&identity()).unwrap();

        let headers = [
            token.clone(),
            format!("Basic {}", token),
            "Bearer".to_string(),
            "Bearer    ".to_string(),
            "Bearer not-a-jwt".to_string(),
            "Bearer a.b".to_string(),
            "Bearer a.b.c.d".to_string(),
        ];

        for header in headers {
            let result = authenticator.authenticate(Some(header.as_str()));
            assert!(
                matches!(result, Err(TokenError::Malformed(_))),
                "header {:?} gave {:?}",
                header,
                result
            );
        }
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let (issuer, authenticator) = pair(b"k");
        let token = issuer.issue(&identity()).unwrap();

        let header = format!("bearer {}", token);
        assert!(authenticator.authenticate(Some(header.as_str())).is_ok());
    }

    #[test]
    fn test_tampered_payload_and_signature() {
        let (issuer, authenticator) = pair(b"k");
        let token = issuer.issue(&identity()).unwrap();

        let header_len = token.find('.').unwrap() + 1;
        for index in header_len..token.len() {
            let original = token.as_bytes()[index];
            if original == b'.' {
                continue;
            }
            let replacement = if original == b'A' { 'B' } else { 'A' };

            let mut tampered = token.clone();
            tampered.replace_range(index..index + 1, &replacement.to_string());

            assert_eq!(
                authenticator.authenticate_token(&tampered),
                Err(TokenError::SignatureInvalid),
                "tampering at {} was not rejected",
                index
            );
        }
    }

    #[test]
    fn test_expired_token() {
        let (issuer, authenticator) = pair(b"k");
        let claims = Claims::new(&identity())
            .with_issued_at(1_000)
            .with_expiration(2_000);
        let token = issuer.sign(&claims).unwrap();

        assert!(authenticator.authenticate_token_at(&token, 1_999).is_ok());
        assert_eq!(
            authenticator.authenticate_token_at(&token, 2_000),
            Err(TokenError::Expired)
        );
        assert_eq!(
            authenticator.authenticate_token(&token),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_token_without_expiry_accepted() {
        let (issuer, authenticator) = pair(b"k");
        let token = issuer.sign(&Claims::new(&identity())).unwrap();

        assert_eq!(authenticator.authenticate_token(&token), Ok(identity()));
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(Some("Bearer abc")), Ok("abc"));
        assert_eq!(extract_bearer(Some("  Bearer   abc  ")), Ok("abc"));
        assert_eq!(extract_bearer(None), Err(TokenError::Missing));
    }
}
