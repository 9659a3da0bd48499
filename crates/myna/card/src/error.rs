//! Error types for My Number card operations

use myna_apdu_core::response::error::{ResponseError, StatusError};
use myna_apdu_core::{StatusWord, TransportError};

/// Result type for My Number card operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for My Number card operations
///
/// Every variant is terminal for the flow that produced it: nothing after the
/// failing step is sent and no partial artifact is returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transport failed to carry an exchange
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The card answered a step with a non-success status word
    #[error("{step}: {error}")]
    Status {
        /// Flow step that was rejected
        step: &'static str,
        /// Status word and its classification
        error: StatusError,
    },

    /// Response bytes do not match the expected layout
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Missing or malformed input, detected before anything was sent for it
    #[error("Invalid input: {0}")]
    Input(&'static str),
}

impl Error {
    /// Attach an APDU layer error to the flow step it happened in
    pub(crate) fn at_step(step: &'static str, error: myna_apdu_core::Error) -> Self {
        match error {
            myna_apdu_core::Error::Status(error) => Self::Status { step, error },
            myna_apdu_core::Error::Transport(error) => Self::Transport(error),
            myna_apdu_core::Error::Context { source, .. } => Self::at_step(step, *source),
            myna_apdu_core::Error::Response(ResponseError::Incomplete(received)) => {
                Self::Format(FormatError::truncated(2, received))
            }
            myna_apdu_core::Error::InvalidCommandLength(_) => Self::Input("malformed command"),
            myna_apdu_core::Error::InvalidCommandData(reason) => Self::Input(reason),
        }
    }

    /// Status word the card rejected a step with, if any
    pub const fn status_word(&self) -> Option<StatusWord> {
        match self {
            Self::Status { error, .. } => Some(error.status_word()),
            _ => None,
        }
    }

    /// Remaining PIN attempts reported by the card, if any
    pub const fn retries_left(&self) -> Option<u8> {
        match self {
            Self::Status { error, .. } => error.retries_left(),
            _ => None,
        }
    }
}

impl From<myna_apdu_core::Error> for Error {
    fn from(error: myna_apdu_core::Error) -> Self {
        Self::at_step("exchange", error)
    }
}

/// Binary layout errors in card responses and locally built structures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// A tag byte other than the expected one
    #[error("Unexpected tag: expected {expected:#04x}, found {found:#04x}")]
    UnexpectedTag {
        /// Tag that was expected
        expected: u8,
        /// Tag that was read
        found: u8,
    },

    /// A length runs past the end of the supplied buffer
    #[error("Truncated data: needed {needed} bytes, {available} available")]
    Truncated {
        /// Bytes required by the encoded length
        needed: usize,
        /// Bytes actually available
        available: usize,
    },

    /// A length field that cannot be decoded or encoded
    #[error("Invalid length: {0}")]
    InvalidLength(&'static str),

    /// Malformed object identifier
    #[error("Invalid object identifier: {0}")]
    InvalidOid(&'static str),

    /// Text field that is not valid UTF-8
    #[error("Invalid text in {0} field")]
    InvalidText(&'static str),

    /// Identifier that is not 12 ASCII digits
    #[error("Invalid identifier")]
    InvalidIdentifier,
}

impl FormatError {
    /// Build a truncation error
    pub const fn truncated(needed: usize, available: usize) -> Self {
        Self::Truncated { needed, available }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_carries_step() {
        let err = Error::at_step("verify PIN", myna_apdu_core::Error::status(0x63, 0xC2));
        assert_eq!(err.retries_left(), Some(2));
        assert_eq!(err.status_word(), Some(StatusWord::new(0x63, 0xC2)));
        assert_eq!(
            err.to_string(),
            "verify PIN: 63 c2: Verification failed (2 retries left)"
        );
    }

    #[test]
    fn test_context_is_unwrapped() {
        let apdu = myna_apdu_core::Error::status(0x6A, 0x82).with_context("select");
        let err = Error::at_step("select identifier file", apdu);
        assert!(matches!(err, Error::Status { step: "select identifier file", .. }));
    }

    #[test]
    fn test_short_response_is_a_format_error() {
        let apdu = myna_apdu_core::Error::from(ResponseError::Incomplete(1));
        let err = Error::at_step("select certificate", apdu);
        assert!(matches!(
            err,
            Error::Format(FormatError::Truncated {
                needed: 2,
                available: 1
            })
        ));
    }

    #[test]
    fn test_transport_error_passes_through() {
        let err = Error::from(myna_apdu_core::Error::from(TransportError::Timeout));
        assert!(matches!(err, Error::Transport(TransportError::Timeout)));
        assert_eq!(err.retries_left(), None);
    }
}
