use std::env;
use std::str::FromStr;

use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordHasher;
use auth::PasswordParams;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use jsonwebtoken::Algorithm;
use serde::Deserialize;

const DEVELOPMENT_MODE: &str = "development";

/// Signing secret shipped in `config/development.toml`.
const DEVELOPMENT_SECRET: &str = "development-only-secret-change-me";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "JwtConfig::default_algorithm")]
    pub algorithm: String,
    pub expiration_hours: i64,
}

/// Argon2id cost parameters for newly created credentials.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
    pub output_len: u32,
    pub salt_len: u32,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| DEVELOPMENT_MODE.to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;
        config.check_run_mode(&run_mode)?;

        Ok(config)
    }

    /// Warn in development mode and refuse the checked-in development secret
    /// in any other mode.
    pub fn check_run_mode(&self, run_mode: &str) -> Result<(), ConfigError> {
        if run_mode == DEVELOPMENT_MODE {
            tracing::warn!(
                run_mode,
                "Running in development mode; set RUN_MODE and JWT__SECRET for deployments"
            );
            return Ok(());
        }

        if self.jwt.secret == DEVELOPMENT_SECRET {
            return Err(ConfigError::Message(format!(
                "jwt.secret is the development secret in run mode '{}'; set JWT__SECRET",
                run_mode
            )));
        }

        Ok(())
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".to_string()));
        }
        self.jwt.token_ttl()?;
        self.authenticator().map(|_| ())
    }

    /// Build the authenticator described by the `jwt` and `password` sections.
    pub fn authenticator(&self) -> Result<Authenticator, ConfigError> {
        let password_hasher = PasswordHasher::with_params(self.password.params())
            .map_err(|e| ConfigError::Message(e.to_string()))?;
        let jwt_handler = JwtHandler::with_algorithm(self.jwt.secret.as_bytes(), self.jwt.algorithm()?)
            .map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(Authenticator::from_parts(
            password_hasher,
            jwt_handler,
            Some(self.jwt.token_ttl()?),
        ))
    }
}

impl JwtConfig {
    /// Longest accepted token lifetime: one year.
    pub const MAX_EXPIRATION_HOURS: i64 = 24 * 365;

    fn default_algorithm() -> String {
        "HS512".to_string()
    }

    /// Token lifetime, bounded to `1..=MAX_EXPIRATION_HOURS` hours.
    pub fn token_ttl(&self) -> Result<Duration, ConfigError> {
        if !(1..=Self::MAX_EXPIRATION_HOURS).contains(&self.expiration_hours) {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be between 1 and {}, got {}",
                Self::MAX_EXPIRATION_HOURS,
                self.expiration_hours
            )));
        }

        Duration::try_hours(self.expiration_hours).ok_or_else(|| {
            ConfigError::Message(format!(
                "jwt.expiration_hours out of range: {}",
                self.expiration_hours
            ))
        })
    }

    pub fn algorithm(&self) -> Result<Algorithm, ConfigError> {
        Algorithm::from_str(&self.algorithm).map_err(|_| {
            ConfigError::Message(format!("unknown jwt.algorithm '{}'", self.algorithm))
        })
    }
}

// The secret is never printed.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl PasswordConfig {
    pub fn params(&self) -> PasswordParams {
        PasswordParams {
            iterations: self.iterations,
            memory_kib: self.memory_kib,
            parallelism: self.parallelism,
            output_len: self.output_len,
            salt_len: self.salt_len,
        }
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        let params = PasswordParams::default();
        Self {
            memory_kib: params.memory_kib,
            iterations: params.iterations,
            parallelism: params.parallelism,
            output_len: params.output_len,
            salt_len: params.salt_len,
        }
    }
}
