use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;

use super::errors::PasswordError;
use super::params::PasswordParams;

/// Algorithm tag written in the first field of every encoded credential.
pub const ALGORITHM: &str = "argon2id";

/// Argon2 version supported by this build (0x13).
pub const VERSION: u32 = 0x13;

const SEPARATOR: char = '$';
const FIELD_COUNT: usize = 5;

/// Self-describing Argon2id credential.
///
/// Textual form:
/// `$argon2id$v=19,m=<memory KiB>,t=<iterations>,p=<lanes>$<salt>$<hash>`
/// with salt and hash in unpadded standard base64. The encoding is the only
/// source of the parameters used to verify a password against it.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedCredential {
    pub version: u32,
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
    pub salt: Vec<u8>,
    pub hash: Vec<u8>,
}

impl EncodedCredential {
    /// Build a credential for freshly derived material.
    pub fn new(params: &PasswordParams, salt: Vec<u8>, hash: Vec<u8>) -> Self {
        Self {
            version: VERSION,
            memory_kib: params.memory_kib,
            iterations: params.iterations,
            parallelism: params.parallelism,
            salt,
            hash,
        }
    }

    /// Parameters embedded in the encoding, with lengths taken from the
    /// stored salt and hash.
    pub fn params(&self) -> PasswordParams {
        PasswordParams {
            iterations: self.iterations,
            memory_kib: self.memory_kib,
            parallelism: self.parallelism,
            output_len: self.hash.len() as u32,
            salt_len: self.salt.len() as u32,
        }
    }

    fn parse_params(field: &str) -> Result<[u32; 4], PasswordError> {
        let mut values = [0u32; 4];
        let mut parts = field.split(',');

        for (slot, key) in values.iter_mut().zip(["v", "m", "t", "p"]) {
            let part = parts.next().ok_or_else(|| {
                PasswordError::MalformedCredential(format!("missing '{}' parameter", key))
            })?;
            let raw = part
                .strip_prefix(key)
                .and_then(|rest| rest.strip_prefix('='))
                .ok_or_else(|| {
                    PasswordError::MalformedCredential(format!("expected '{}=' parameter", key))
                })?;
            *slot = raw.parse::<u32>().map_err(|e| {
                PasswordError::MalformedCredential(format!("invalid '{}' parameter: {}", key, e))
            })?;
        }

        if parts.next().is_some() {
            return Err(PasswordError::MalformedCredential(
                "unexpected trailing parameters".to_string(),
            ));
        }

        Ok(values)
    }

    fn decode_field(field: &str, name: &str) -> Result<Vec<u8>, PasswordError> {
        let bytes = STANDARD_NO_PAD
            .decode(field)
            .map_err(|e| PasswordError::MalformedCredential(format!("invalid {}: {}", name, e)))?;

        if bytes.is_empty() {
            return Err(PasswordError::MalformedCredential(format!("empty {}", name)));
        }

        Ok(bytes)
    }
}

impl FromStr for EncodedCredential {
    type Err = PasswordError;

    /// Parse the five `$`-delimited fields.
    ///
    /// # Errors
    /// * `MalformedCredential` - Wrong field count, unknown algorithm, bad
    ///   parameter list or invalid base64
    /// * `VersionMismatch` - Embedded version differs from `VERSION`
    fn from_str(encoded: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = encoded.split(SEPARATOR).collect();
        if fields.len() != FIELD_COUNT || !fields[0].is_empty() {
            return Err(PasswordError::MalformedCredential(format!(
                "expected {} '{}'-delimited fields",
                FIELD_COUNT, SEPARATOR
            )));
        }

        if fields[1] != ALGORITHM {
            return Err(PasswordError::MalformedCredential(format!(
                "unsupported algorithm '{}'",
                fields[1]
            )));
        }

        let [version, memory_kib, iterations, parallelism] = Self::parse_params(fields[2])?;
        if version != VERSION {
            return Err(PasswordError::VersionMismatch {
                expected: VERSION,
                found: version,
            });
        }

        let salt = Self::decode_field(fields[3], "salt")?;
        let hash = Self::decode_field(fields[4], "hash")?;

        Ok(Self {
            version,
            memory_kib,
            iterations,
            parallelism,
            salt,
            hash,
        })
    }
}

impl fmt::Display for EncodedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{sep}{alg}{sep}v={v},m={m},t={t},p={p}{sep}{salt}{sep}{hash}",
            sep = SEPARATOR,
            alg = ALGORITHM,
            v = self.version,
            m = self.memory_kib,
            t = self.iterations,
            p = self.parallelism,
            salt = STANDARD_NO_PAD.encode(&self.salt),
            hash = STANDARD_NO_PAD.encode(&self.hash),
        )
    }
}

// Key material stays out of debug output.
impl fmt::Debug for EncodedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedCredential")
            .field("version", &self.version)
            .field("memory_kib", &self.memory_kib)
            .field("iterations", &self.iterations)
            .field("parallelism", &self.parallelism)
            .field("salt_len", &self.salt.len())
            .field("hash_len", &self.hash.len())
            .finish()
    }
}
