use serde::Deserialize;
use serde::Serialize;

/// Authenticated subject of a request.
///
/// Produced by token verification and inserted into the request context;
/// handlers read it instead of re-parsing the token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque account identifier, fixed at account creation
    pub id: String,
    pub email: String,
    /// Display name
    pub name: String,
}

impl Identity {
    pub fn new(id: impl ToString, email: impl ToString, name: impl ToString) -> Self {
        Self {
            id: id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
        }
    }
}
