pub mod argon2;
pub mod encoded;
pub mod errors;
pub mod params;

pub use argon2::PasswordHasher;
pub use encoded::EncodedCredential;
pub use errors::PasswordError;
pub use params::PasswordParams;
