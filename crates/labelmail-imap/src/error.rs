//! Error types reported by the transport.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while a primitive is executed against the server.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error during network operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Server returned NO response.
    #[error("Server returned NO: {0}")]
    No(String),

    /// Server returned BAD response.
    #[error("Server returned BAD: {0}")]
    Bad(String),

    /// Server sent BYE (disconnecting).
    #[error("Server sent BYE: {0}")]
    Bye(String),

    /// Operation timed out.
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// Invalid state for the requested operation.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Protocol violation or unexpected data.
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl Error {
    /// Returns true if the server answered and refused the command.
    ///
    /// Rejections are distinct from connectivity failures: the session is
    /// still usable after one.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::No(_) | Self::Bad(_))
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections() {
        assert!(Error::No("[TRYCREATE] no such mailbox".into()).is_rejection());
        assert!(Error::Bad("syntax".into()).is_rejection());
    }

    #[test]
    fn connectivity_is_not_rejection() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        assert!(!Error::Io(io).is_rejection());
        assert!(!Error::Bye("shutting down".into()).is_rejection());
        assert!(!Error::Timeout(Duration::from_secs(60)).is_rejection());
    }

    #[test]
    fn display() {
        assert_eq!(
            Error::No("Unknown mailbox".into()).to_string(),
            "Server returned NO: Unknown mailbox"
        );
    }
}
