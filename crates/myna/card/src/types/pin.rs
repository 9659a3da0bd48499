use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{Error, Result};

/// Shape a credential must have before it may be sent in a VERIFY
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinKind {
    /// 4 digit PIN of the JPKI authentication key
    AuthPin,
    /// 6 to 16 alphanumeric password of the JPKI signature key
    SignPassword,
    /// 4 digit PIN of the card-face application
    CardFacePin,
}

impl PinKind {
    /// Check `value` against the shape of this kind
    fn check(&self, value: &str) -> Result<()> {
        match self {
            Self::AuthPin | Self::CardFacePin => {
                if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(Error::Input("PIN must be exactly 4 digits"));
                }
            }
            Self::SignPassword => {
                if !(6..=16).contains(&value.len()) {
                    return Err(Error::Input("signing password must be 6 to 16 characters"));
                }
                if !value.bytes().all(|b| b.is_ascii_alphanumeric()) {
                    return Err(Error::Input("signing password must be alphanumeric"));
                }
            }
        }
        Ok(())
    }
}

/// A PIN or password, wiped from memory when dropped
///
/// [`VerifyCommand`](crate::commands::VerifyCommand) wipes its copy too. The
/// serialised APDU handed to the transport is a plain buffer and is not wiped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Pin(String);

impl Pin {
    /// Wrap a credential
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Check the credential against the shape required by `kind`
    pub fn validate(&self, kind: PinKind) -> Result<()> {
        kind.check(&self.0)
    }

    /// Bytes sent in the VERIFY body
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(<redacted>)")
    }
}

impl From<&str> for Pin {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Pin {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
