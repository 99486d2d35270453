pub mod password;
pub mod token;

pub use token::{issue_token, validate_token, Claims};

use thiserror::Error;

/// Authentication failures surfaced by the token validator and the guard.
/// Every variant maps to 401 at the HTTP boundary; the distinction exists
/// for logging and tests.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing or malformed Authorization header")]
    MissingToken,

    #[error("Token has expired")]
    Expired,

    #[error("Invalid token")]
    Malformed,

    #[error("Unknown user")]
    UserNotFound,
}
