//! Core error type for all APDU operations
//!
//! This module provides a centralized error type used throughout the myna_apdu_core crate.
//! Transport, response and status failures are consolidated here so that callers can
//! bubble them up with `?` and still tell them apart.

use crate::response::error::{ResponseError, StatusError};
use crate::response::status::StatusWord;
use crate::transport::TransportError;

/// Result type for APDU operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type that encompasses all possible errors in the crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transport failed to carry the exchange
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response could not be split into payload and status word
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// The card answered with a non-success status word
    #[error(transparent)]
    Status(#[from] StatusError),

    /// Invalid command length
    #[error("Invalid command length: {0}")]
    InvalidCommandLength(usize),

    /// Invalid command data
    #[error("Invalid command data: {0}")]
    InvalidCommandData(&'static str),

    /// Context error with message and source error
    #[error("{context}: {source}")]
    Context {
        /// Contextual message
        context: String,
        /// Source error
        source: Box<Self>,
    },
}

impl Error {
    /// Create a new error with context information
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create a new status error
    pub const fn status(sw1: u8, sw2: u8) -> Self {
        Self::Status(StatusError::new(sw1, sw2))
    }

    /// Get the status word if this error was caused by one
    pub fn status_word(&self) -> Option<StatusWord> {
        match self {
            Self::Status(e) => Some(e.status_word()),
            Self::Context { source, .. } => source.status_word(),
            _ => None,
        }
    }
}

/// Extension trait for Result with APDU Errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context<S: Into<String>>(self, context: S) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context<S: Into<String>>(self, context: S) -> Self {
        self.map_err(|e| e.with_context(context))
    }
}
