//! Client error taxonomy shared by all three downstream contracts.

use thiserror::Error;

/// Errors a downstream client call can produce.
///
/// `Timeout` and `Transport` both mean the downstream answer is unknown;
/// callers treat them identically when deciding whether to compensate.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The addressed entity does not exist (or is owned by someone else).
    #[error("resource not found")]
    NotFound,

    /// A conditional update lost: the stored value did not match the
    /// expected one.
    #[error("conditional update conflict")]
    Conflict,

    /// The downstream service rejected the request as invalid.
    #[error("downstream rejected request: {0}")]
    Rejected(String),

    /// The downstream call exceeded its deadline.
    #[error("downstream call timed out: {0}")]
    Timeout(String),

    /// Transport-level failure (connect error, 5xx, broken body).
    #[error("downstream transport failure: {0}")]
    Transport(String),

    /// The response arrived but could not be decoded.
    #[error("failed to decode downstream response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Returns true for failures where the downstream state is unknown.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ClientError::Timeout(_) | ClientError::Transport(_))
    }
}
