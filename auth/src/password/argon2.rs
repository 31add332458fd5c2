use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::encoded::EncodedCredential;
use super::errors::PasswordError;
use super::params::PasswordParams;

/// Password hashing implementation.
///
/// Derives keys with Argon2id and stores them as an [`EncodedCredential`]
/// string carrying the cost parameters, the salt and the derived key.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: PasswordParams,
}

impl PasswordHasher {
    /// Create a new password hasher with the default cost parameters.
    pub fn new() -> Self {
        Self {
            params: PasswordParams::default(),
        }
    }

    /// Create a password hasher with explicit cost parameters.
    ///
    /// # Errors
    /// * `InvalidParams` - Parameters violate the Argon2 constraints
    pub fn with_params(params: PasswordParams) -> Result<Self, PasswordError> {
        params.validate()?;
        argon2_params(&params).map_err(|e| PasswordError::InvalidParams(e.to_string()))?;
        Ok(Self { params })
    }

    /// Parameters used for new hashes.
    pub fn params(&self) -> &PasswordParams {
        &self.params
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Returns
    /// Encoded credential, e.g. `$argon2id$v=19,m=61440,t=1,p=4$<salt>$<hash>`
    ///
    /// # Errors
    /// * `RandomnessUnavailable` - The OS random source failed to produce a salt
    /// * `HashingFailed` - Key derivation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt = vec![0u8; self.params.salt_len as usize];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| PasswordError::RandomnessUnavailable(e.to_string()))?;

        let hash = derive_key(password, &salt, &self.params)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        Ok(EncodedCredential::new(&self.params, salt, hash).to_string())
    }

    /// Verify a password against a stored encoded credential.
    ///
    /// The key is re-derived with the parameters and salt embedded in
    /// `encoded`, not with this hasher's parameters.
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `MalformedCredential` - Encoding cannot be parsed or replayed
    /// * `VersionMismatch` - Encoding was produced by another Argon2 version
    pub fn verify(&self, password: &str, encoded: &str) -> Result<bool, PasswordError> {
        let credential: EncodedCredential = encoded.parse()?;

        let computed = derive_key(password, &credential.salt, &credential.params())
            .map_err(|e| PasswordError::MalformedCredential(e.to_string()))?;

        Ok(constant_time_eq(&credential.hash, &computed))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn argon2_params(params: &PasswordParams) -> Result<Params, argon2::Error> {
    Params::new(
        params.memory_kib,
        params.iterations,
        params.parallelism,
        Some(params.output_len as usize),
    )
}

fn derive_key(
    password: &str,
    salt: &[u8],
    params: &PasswordParams,
) -> Result<Vec<u8>, argon2::Error> {
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params(params)?);

    let mut output = vec![0u8; params.output_len as usize];
    argon2.hash_password_into(password.as_bytes(), salt, &mut output)?;
    Ok(output)
}

// Runs over every byte regardless of where the first difference is.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let diff = a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y));
    std::hint::black_box(diff) == 0
}
