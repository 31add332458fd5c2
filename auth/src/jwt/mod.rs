pub mod authenticator;
pub mod claims;
pub mod errors;
pub mod handler;
pub mod issuer;

pub use authenticator::extract_bearer;
pub use authenticator::TokenAuthenticator;
pub use claims::Claims;
pub use errors::FailureCategory;
pub use errors::JwtError;
pub use errors::TokenError;
pub use handler::JwtHandler;
pub use issuer::TokenIssuer;
