//! Status word definitions for APDU responses
//!
//! [`StatusWord::classify`] is the single place where a status word is turned into a
//! [`StatusOutcome`]. The reason table follows the diagnostics card vendors document
//! for ISO/IEC 7816-4 status words and must stay byte-for-byte stable: operators
//! match on the exact `(SW1, SW2)` pairs.

use std::fmt;

use tracing::Level;

/// Status Word (SW1-SW2) from an APDU response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusWord {
    /// First status byte (SW1)
    pub sw1: u8,
    /// Second status byte (SW2)
    pub sw2: u8,
}

/// Classification of a status word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusOutcome {
    /// Normal completion (90 00)
    Success,
    /// Command succeeded and more response bytes are available (61 XX)
    MoreDataAvailable {
        /// Number of bytes still available (SW2)
        remaining: u8,
    },
    /// Warning processing (62 XX, 63 XX)
    Warning {
        /// Human readable reason
        reason: &'static str,
        /// Remaining verification attempts, for 63 CX
        retries_left: Option<u8>,
    },
    /// Execution or checking error, or an unknown status word
    Error {
        /// Human readable reason, empty when the status word is unknown
        reason: &'static str,
    },
}

impl StatusOutcome {
    /// Whether the outcome lets a flow continue
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success | Self::MoreDataAvailable { .. })
    }

    /// Human readable reason of the outcome
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Success => "Normal completion",
            Self::MoreDataAvailable { .. } => "More data available",
            Self::Warning { reason, .. } | Self::Error { reason } => *reason,
        }
    }

    /// Remaining verification attempts, if the card reported them
    pub const fn retries_left(&self) -> Option<u8> {
        match self {
            Self::Warning { retries_left, .. } => *retries_left,
            _ => None,
        }
    }
}

impl fmt::Display for StatusOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoreDataAvailable { remaining } => {
                write!(f, "More data available ({remaining} bytes)")
            }
            Self::Warning {
                reason,
                retries_left: Some(retries),
            } => write!(f, "{reason} ({retries} retries left)"),
            _ if self.reason().is_empty() => f.write_str("Unknown status word"),
            _ => f.write_str(self.reason()),
        }
    }
}

impl StatusWord {
    /// Create a new status word
    pub const fn new(sw1: u8, sw2: u8) -> Self {
        Self { sw1, sw2 }
    }

    /// Create from a u16 value (SW1 | SW2)
    pub const fn from_u16(status: u16) -> Self {
        Self {
            sw1: (status >> 8) as u8,
            sw2: status as u8,
        }
    }

    /// Convert to a u16 value (SW1 | SW2)
    pub const fn to_u16(&self) -> u16 {
        ((self.sw1 as u16) << 8) | (self.sw2 as u16)
    }

    /// Check if this status word lets a command sequence continue
    ///
    /// True for normal completion (90 00) and for "more data available" (61 XX).
    pub const fn is_success(&self) -> bool {
        self.is_normal_completion() || self.is_more_data_available()
    }

    /// Check if this status word is exactly 90 00
    pub const fn is_normal_completion(&self) -> bool {
        self.sw1 == 0x90 && self.sw2 == 0x00
    }

    /// Check if this status word indicates more data is available (61 XX)
    pub const fn is_more_data_available(&self) -> bool {
        self.sw1 == 0x61
    }

    /// Get the number of remaining bytes when SW1 = 61
    pub const fn remaining_bytes(&self) -> Option<u8> {
        if self.sw1 == 0x61 {
            Some(self.sw2)
        } else {
            None
        }
    }

    /// Check if this status word indicates a warning (62 XX, 63 XX)
    pub const fn is_warning(&self) -> bool {
        self.sw1 == 0x62 || self.sw1 == 0x63
    }

    /// Remaining verification attempts encoded as 63 CX
    pub const fn retries_left(&self) -> Option<u8> {
        if self.sw1 == 0x63 && (self.sw2 >> 4) == 0x0C {
            Some(self.sw2 & 0x0F)
        } else {
            None
        }
    }

    /// Get the appropriate tracing level for this status word
    pub const fn tracing_level(&self) -> Level {
        if self.is_success() {
            Level::DEBUG
        } else if self.is_warning() {
            Level::INFO
        } else {
            Level::WARN
        }
    }

    /// Get the reason text of this status word
    ///
    /// Returns an empty string for status words that are not in the table.
    pub const fn reason(&self) -> &'static str {
        match self.sw1 {
            0x90 if self.sw2 == 0x00 => "Normal completion",
            0x61 => "More data available",
            0x62 => match self.sw2 {
                0x81 => "Part of returned data may be corrupted",
                0x83 => "Selected file has been invalidated",
                _ => "State of non-volatile memory unchanged",
            },
            0x63 => match self.sw2 {
                0x81 => "File filled up by the last write",
                n if (n >> 4) == 0x0C => "Verification failed",
                _ => "State of non-volatile memory changed",
            },
            0x64 => match self.sw2 {
                0x01 => "Command timed out",
                _ => "State of non-volatile memory unchanged",
            },
            0x65 => match self.sw2 {
                0x01 => "Memory write error",
                _ => "State of non-volatile memory changed",
            },
            0x66 => match self.sw2 {
                0x00 => "Timeout while receiving",
                0x01 => "Parity error while receiving",
                0x02 => "Checksum error while receiving",
                0x69 => "Incorrect encryption/decryption padding",
                _ => "Security error",
            },
            0x67 => match self.sw2 {
                0x00 => "Wrong length in Lc/Le field",
                _ => "Wrong length",
            },
            0x68 => "Function in CLA not supported",
            0x69 => match self.sw2 {
                0x81 => "Command incompatible with file structure",
                0x82 => "Security status not satisfied",
                0x83 => "Authentication method blocked",
                0x84 => "Referenced data blocked",
                0x85 => "Conditions of use not satisfied",
                0x86 => "File does not exist (command not allowed)",
                0x87 => "Expected secure messaging data objects missing",
                0x88 => "Secure messaging data objects incorrect",
                _ => "Command not allowed",
            },
            0x6A => match self.sw2 {
                0x80 => "Incorrect parameters in the data field",
                0x81 => "Function not supported",
                0x82 => "File not found",
                0x83 => "Record not found",
                0x84 => "Not enough memory space in the record or file",
                0x85 => "Lc inconsistent with TLV structure",
                0x86 => "Incorrect parameters P1-P2",
                0x87 => "Lc inconsistent with P1-P2",
                0x88 => "Referenced data not found",
                0x89 => "File already exists",
                0x8A => "DF name already exists",
                _ => "Wrong parameters",
            },
            0x6B => "Wrong parameters",
            0x6D => "Instruction code not supported or invalid",
            0x6E => "Class not supported",
            0x6F => "Internal error, no precise diagnosis",
            _ => "",
        }
    }

    /// Classify this status word
    pub const fn classify(&self) -> StatusOutcome {
        match self.sw1 {
            0x90 if self.sw2 == 0x00 => StatusOutcome::Success,
            0x61 => StatusOutcome::MoreDataAvailable {
                remaining: self.sw2,
            },
            0x62 | 0x63 => StatusOutcome::Warning {
                reason: self.reason(),
                retries_left: self.retries_left(),
            },
            _ => StatusOutcome::Error {
                reason: self.reason(),
            },
        }
    }
}

impl From<(u8, u8)> for StatusWord {
    fn from(tuple: (u8, u8)) -> Self {
        Self::new(tuple.0, tuple.1)
    }
}

impl From<u16> for StatusWord {
    fn from(status: u16) -> Self {
        Self::from_u16(status)
    }
}

impl From<StatusWord> for u16 {
    fn from(status: StatusWord) -> Self {
        status.to_u16()
    }
}

impl fmt::Display for StatusWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x} {:02x}", self.sw1, self.sw2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_word_from_to_u16() {
        let sw = StatusWord::from_u16(0x9000);
        assert_eq!(sw.sw1, 0x90);
        assert_eq!(sw.sw2, 0x00);
        assert_eq!(sw.to_u16(), 0x9000);
    }

    #[test]
    fn test_is_success() {
        assert!(StatusWord::new(0x90, 0x00).is_success());
        for sw2 in [0x00, 0x10, 0xFF] {
            assert!(StatusWord::new(0x61, sw2).is_success());
        }
        assert!(!StatusWord::new(0x6A, 0x82).is_success());
        assert!(!StatusWord::new(0x90, 0x01).is_success());
        assert!(!StatusWord::new(0x63, 0xC3).is_success());
    }

    #[test]
    fn test_classify_success_and_more_data() {
        assert_eq!(StatusWord::new(0x90, 0x00).classify(), StatusOutcome::Success);
        assert_eq!(
            StatusWord::new(0x61, 0x15).classify(),
            StatusOutcome::MoreDataAvailable { remaining: 0x15 }
        );
        assert_eq!(StatusWord::new(0x61, 0x15).remaining_bytes(), Some(0x15));
        assert_eq!(StatusWord::new(0x90, 0x00).remaining_bytes(), None);
    }

    #[test]
    fn test_classify_retries() {
        let outcome = StatusWord::new(0x63, 0xC3).classify();
        assert_eq!(outcome.retries_left(), Some(3));
        assert_eq!(outcome.reason(), "Verification failed");
        assert_eq!(outcome.to_string(), "Verification failed (3 retries left)");

        assert_eq!(StatusWord::new(0x63, 0xC0).classify().retries_left(), Some(0));
        assert_eq!(StatusWord::new(0x63, 0x81).classify().retries_left(), None);
        assert_eq!(
            StatusWord::new(0x63, 0x81).reason(),
            "File filled up by the last write"
        );
        assert_eq!(
            StatusWord::new(0x63, 0x00).reason(),
            "State of non-volatile memory changed"
        );
    }

    #[test]
    fn test_classify_warnings() {
        let outcome = StatusWord::new(0x62, 0x83).classify();
        assert_eq!(
            outcome,
            StatusOutcome::Warning {
                reason: "Selected file has been invalidated",
                retries_left: None,
            }
        );
        assert!(!outcome.is_success());
        assert_eq!(
            StatusWord::new(0x62, 0x00).reason(),
            "State of non-volatile memory unchanged"
        );
    }

    #[test]
    fn test_classify_errors_with_fallback() {
        assert_eq!(
            StatusWord::new(0x6A, 0x82).classify(),
            StatusOutcome::Error {
                reason: "File not found"
            }
        );
        assert_eq!(StatusWord::new(0x6A, 0x8A).reason(), "DF name already exists");
        assert_eq!(StatusWord::new(0x6A, 0x99).reason(), "Wrong parameters");
        assert_eq!(StatusWord::new(0x69, 0x84).reason(), "Referenced data blocked");
        assert_eq!(StatusWord::new(0x69, 0x00).reason(), "Command not allowed");
        assert_eq!(
            StatusWord::new(0x66, 0x69).reason(),
            "Incorrect encryption/decryption padding"
        );
        assert_eq!(StatusWord::new(0x66, 0x10).reason(), "Security error");
        assert_eq!(StatusWord::new(0x67, 0x00).reason(), "Wrong length in Lc/Le field");
        assert_eq!(StatusWord::new(0x67, 0x01).reason(), "Wrong length");
        assert_eq!(StatusWord::new(0x64, 0x01).reason(), "Command timed out");
        assert_eq!(StatusWord::new(0x65, 0x01).reason(), "Memory write error");
        assert_eq!(StatusWord::new(0x68, 0x82).reason(), "Function in CLA not supported");
        assert_eq!(StatusWord::new(0x6B, 0x00).reason(), "Wrong parameters");
        assert_eq!(
            StatusWord::new(0x6D, 0x00).reason(),
            "Instruction code not supported or invalid"
        );
        assert_eq!(StatusWord::new(0x6E, 0x00).reason(), "Class not supported");
        assert_eq!(
            StatusWord::new(0x6F, 0x00).reason(),
            "Internal error, no precise diagnosis"
        );
    }

    #[test]
    fn test_unknown_status_words() {
        for sw in [
            StatusWord::new(0x6C, 0x10),
            StatusWord::new(0x90, 0x01),
            StatusWord::new(0x00, 0x00),
        ] {
            assert_eq!(sw.classify(), StatusOutcome::Error { reason: "" });
            assert_eq!(sw.classify().to_string(), "Unknown status word");
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(StatusWord::new(0x6A, 0x82).to_string(), "6a 82");
        assert_eq!(
            StatusWord::new(0x61, 0x20).classify().to_string(),
            "More data available (32 bytes)"
        );
    }

    #[test]
    fn test_tracing_level() {
        assert_eq!(StatusWord::new(0x90, 0x00).tracing_level(), Level::DEBUG);
        assert_eq!(StatusWord::new(0x63, 0xC2).tracing_level(), Level::INFO);
        assert_eq!(StatusWord::new(0x6A, 0x82).tracing_level(), Level::WARN);
    }
}
