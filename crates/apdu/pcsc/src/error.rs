//! Error types for PC/SC transport

use myna_apdu_core::TransportError;

/// PC/SC-specific errors
#[derive(Debug, thiserror::Error)]
pub enum PcscError {
    /// PC/SC error
    #[error("PC/SC error: {0}")]
    Pcsc(#[from] pcsc::Error),

    /// No readers available
    #[error("No readers available")]
    NoReadersAvailable,

    /// Reader not found
    #[error("Reader not found: {0}")]
    ReaderNotFound(String),

    /// No card present in reader
    #[error("No card present in reader: {0}")]
    NoCard(String),

    /// Card was reset
    #[error("Card was reset")]
    CardReset,

    /// Card was removed
    #[error("Card was removed")]
    CardRemoved,
}

impl From<PcscError> for TransportError {
    fn from(error: PcscError) -> Self {
        match error {
            PcscError::Pcsc(pcsc::Error::Timeout) => Self::Timeout,
            PcscError::Pcsc(pcsc::Error::Cancelled) => Self::Cancelled,
            PcscError::Pcsc(pcsc::Error::InsufficientBuffer) => Self::BufferTooSmall,
            PcscError::Pcsc(pcsc::Error::NoSmartcard)
            | PcscError::NoCard(_)
            | PcscError::CardRemoved => Self::Connection,
            PcscError::Pcsc(e) => Self::Driver(e as i32),
            PcscError::CardReset => Self::Device,
            other => Self::other(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_mapping() {
        assert!(matches!(
            TransportError::from(PcscError::NoCard("reader".into())),
            TransportError::Connection
        ));
        assert!(matches!(
            TransportError::from(PcscError::Pcsc(pcsc::Error::Timeout)),
            TransportError::Timeout
        ));
        assert!(matches!(
            TransportError::from(PcscError::Pcsc(pcsc::Error::InsufficientBuffer)),
            TransportError::BufferTooSmall
        ));
        assert_eq!(
            TransportError::from(PcscError::ReaderNotFound("Foo".into())).to_string(),
            "Reader not found: Foo"
        );
    }
}
