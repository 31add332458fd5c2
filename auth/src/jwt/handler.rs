use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;
use super::errors::TokenError;

/// JWT codec shared by the issuing and verifying sides.
///
/// Holds the server secret and the signing algorithm, both fixed at
/// construction. Only HMAC-SHA-512 is accepted.
#[derive(Clone)]
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    pub const DEFAULT_ALGORITHM: Algorithm = Algorithm::HS512;

    /// Create a new JWT handler signing with HS512.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Errors
    /// * `SigningFailure` - Secret is empty
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        Self::with_algorithm(secret, Self::DEFAULT_ALGORITHM)
    }

    /// Create a new JWT handler for an explicit algorithm.
    ///
    /// # Errors
    /// * `SigningFailure` - Secret is empty
    /// * `UnsupportedAlgorithm` - Algorithm is weaker than HS512 or not an HMAC
    pub fn with_algorithm(secret: &[u8], algorithm: Algorithm) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::SigningFailure(
                "signing key must not be empty".to_string(),
            ));
        }
        if algorithm != Algorithm::HS512 {
            return Err(JwtError::UnsupportedAlgorithm(format!("{:?}", algorithm)));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Sign claims into a compact `header.payload.signature` token.
    ///
    /// # Errors
    /// * `SigningFailure` - The signing primitive rejected the input
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailure(e.to_string()))
    }

    /// Check structure and signature, then decode the typed claim set.
    ///
    /// Expiry is not checked here; see `TokenAuthenticator`.
    ///
    /// # Errors
    /// * `Malformed` - Not three segments, undecodable header, or a payload
    ///   that does not match `Claims`
    /// * `SignatureInvalid` - Signature does not verify under this key, or
    ///   the header names another algorithm
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 || segments.iter().any(|segment| segment.is_empty()) {
            return Err(TokenError::Malformed(format!(
                "expected 3 non-empty segments, got {}",
                segments.len()
            )));
        }

        let mut validation = Validation::new(self.algorithm);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::SignatureInvalid
                }
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}
