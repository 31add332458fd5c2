use super::errors::PasswordError;

/// Cost parameters for Argon2id.
///
/// The three cost values are written into every encoded credential, so they
/// can be raised later without invalidating credentials created under older
/// settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordParams {
    /// Number of passes over memory (t).
    pub iterations: u32,
    /// Memory size in KiB (m).
    pub memory_kib: u32,
    /// Degree of parallelism (p).
    pub parallelism: u32,
    /// Length of the derived key in bytes.
    pub output_len: u32,
    /// Length of the random salt in bytes.
    pub salt_len: u32,
}

impl PasswordParams {
    pub const DEFAULT_ITERATIONS: u32 = 1;
    pub const DEFAULT_MEMORY_KIB: u32 = 60 * 1024;
    pub const DEFAULT_PARALLELISM: u32 = 4;
    pub const DEFAULT_OUTPUT_LEN: u32 = 32;
    pub const DEFAULT_SALT_LEN: u32 = 16;

    const MIN_OUTPUT_LEN: u32 = 4;
    const MIN_SALT_LEN: u32 = 8;
    const MIN_MEMORY_PER_LANE: u32 = 8;

    /// Check the invariants Argon2 places on the parameter set.
    ///
    /// # Errors
    /// * `InvalidParams` - A value is zero, memory is starved by parallelism,
    ///   or the output/salt length is below the Argon2 minimum
    pub fn validate(&self) -> Result<(), PasswordError> {
        if self.iterations == 0 {
            return Err(PasswordError::InvalidParams(
                "iterations must be greater than zero".to_string(),
            ));
        }
        if self.parallelism == 0 {
            return Err(PasswordError::InvalidParams(
                "parallelism must be greater than zero".to_string(),
            ));
        }
        let min_memory = self.parallelism.saturating_mul(Self::MIN_MEMORY_PER_LANE);
        if self.memory_kib < min_memory {
            return Err(PasswordError::InvalidParams(format!(
                "memory must be at least {} KiB for {} lanes, got {}",
                min_memory, self.parallelism, self.memory_kib
            )));
        }
        if self.output_len < Self::MIN_OUTPUT_LEN {
            return Err(PasswordError::InvalidParams(format!(
                "output length must be at least {} bytes, got {}",
                Self::MIN_OUTPUT_LEN,
                self.output_len
            )));
        }
        if self.salt_len < Self::MIN_SALT_LEN {
            return Err(PasswordError::InvalidParams(format!(
                "salt length must be at least {} bytes, got {}",
                Self::MIN_SALT_LEN,
                self.salt_len
            )));
        }
        Ok(())
    }
}

impl Default for PasswordParams {
    fn default() -> Self {
        Self {
            iterations: Self::DEFAULT_ITERATIONS,
            memory_kib: Self::DEFAULT_MEMORY_KIB,
            parallelism: Self::DEFAULT_PARALLELISM,
            output_len: Self::DEFAULT_OUTPUT_LEN,
            salt_len: Self::DEFAULT_SALT_LEN,
        }
    }
}
