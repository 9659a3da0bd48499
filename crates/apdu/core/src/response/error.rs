//! Error types specific to APDU responses

use thiserror::Error;

use super::status::{StatusOutcome, StatusWord};

/// Error for a non-success status word in an APDU response
///
/// Carries the classified outcome so diagnostics read as `"6a 82: File not found"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{status}: {outcome}")]
pub struct StatusError {
    /// Status word that caused the error
    pub status: StatusWord,
    /// Classification of the status word
    pub outcome: StatusOutcome,
}

impl StatusError {
    /// Create a new status error
    pub const fn new(sw1: u8, sw2: u8) -> Self {
        Self::from_status(StatusWord::new(sw1, sw2))
    }

    /// Create a status error from an existing status word
    pub const fn from_status(status: StatusWord) -> Self {
        Self {
            status,
            outcome: status.classify(),
        }
    }

    /// Get the status word
    pub const fn status_word(&self) -> StatusWord {
        self.status
    }

    /// Get the classified outcome
    pub const fn outcome(&self) -> StatusOutcome {
        self.outcome
    }

    /// Remaining verification attempts, for 63 CX
    pub const fn retries_left(&self) -> Option<u8> {
        self.outcome.retries_left()
    }
}

impl From<StatusWord> for StatusError {
    fn from(status: StatusWord) -> Self {
        Self::from_status(status)
    }
}

/// Error for APDU response processing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    /// Response too short to hold a status word, carries the byte count received
    #[error("Incomplete response: {0} bytes, no room for a status word")]
    Incomplete(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        assert_eq!(StatusError::new(0x6A, 0x82).to_string(), "6a 82: File not found");
        assert_eq!(
            StatusError::new(0x63, 0xC1).to_string(),
            "63 c1: Verification failed (1 retries left)"
        );
        assert_eq!(
            StatusError::new(0x6C, 0x00).to_string(),
            "6c 00: Unknown status word"
        );
    }

    #[test]
    fn test_status_error_retries() {
        assert_eq!(StatusError::new(0x63, 0xC2).retries_left(), Some(2));
        assert_eq!(StatusError::new(0x69, 0x84).retries_left(), None);
    }
}
