//! Authentication error types.

use thiserror::Error;

/// Errors from the login/logout protocol.
///
/// Both variants are recoverable: the caller re-prompts for credentials and
/// the store itself stays usable.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected the credentials. The message is fixed and
    /// user-facing; the response status is deliberately not echoed.
    #[error("wrong credentials or inexistent account")]
    InvalidCredentials,

    /// The request could not be completed at the transport level.
    #[error("transport error: {0}")]
    Transport(String),
}
