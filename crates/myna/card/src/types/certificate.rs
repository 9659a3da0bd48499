use bytes::Bytes;
use derive_more::{Deref, Display};

use crate::commands::FileSelector;
use crate::types::PinKind;

/// Certificates stored in the JPKI application
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CertType {
    /// User certificate for authentication
    #[display("authentication certificate")]
    Auth,
    /// CA certificate of the authentication certificate
    #[display("authentication CA certificate")]
    AuthCa,
    /// User certificate for signatures
    #[display("signature certificate")]
    Sign,
    /// CA certificate of the signature certificate
    #[display("signature CA certificate")]
    SignCa,
}

impl CertType {
    /// Elementary file holding the certificate
    pub const fn selector(&self) -> FileSelector {
        match self {
            Self::Auth => FileSelector::AuthCert,
            Self::AuthCa => FileSelector::AuthCaCert,
            Self::Sign => FileSelector::SignCert,
            Self::SignCa => FileSelector::SignCaCert,
        }
    }

    /// Only the signature certificate is behind the signing password
    pub const fn requires_pin(&self) -> bool {
        matches!(self, Self::Sign)
    }

    /// File name used when the certificate is written without an explicit path
    pub const fn default_file_name(&self) -> &'static str {
        match self {
            Self::Auth => "auth_cert.der",
            Self::AuthCa => "auth_ca_cert.der",
            Self::Sign => "sign_cert.der",
            Self::SignCa => "sign_ca_cert.der",
        }
    }
}

/// Private keys stored in the JPKI application
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Authentication key, unlocked by the 4 digit PIN
    #[display("authentication key")]
    Auth,
    /// Signature key, unlocked by the signing password
    #[display("signature key")]
    Sign,
}

impl KeyType {
    /// PIN file guarding the key
    pub const fn pin_selector(&self) -> FileSelector {
        match self {
            Self::Auth => FileSelector::AuthPin,
            Self::Sign => FileSelector::SignPin,
        }
    }

    /// Elementary file of the key
    pub const fn key_selector(&self) -> FileSelector {
        match self {
            Self::Auth => FileSelector::AuthKey,
            Self::Sign => FileSelector::SignKey,
        }
    }

    /// Shape of the credential unlocking the key
    pub const fn pin_kind(&self) -> PinKind {
        match self {
            Self::Auth => PinKind::AuthPin,
            Self::Sign => PinKind::SignPassword,
        }
    }
}

/// A DER encoded X.509 certificate as stored on the card
#[derive(Debug, Clone, PartialEq, Eq, Deref)]
pub struct Certificate(Bytes);

impl Certificate {
    /// Wrap DER bytes read from the card
    pub const fn from_der(der: Bytes) -> Self {
        Self(der)
    }

    /// DER bytes
    pub fn as_der(&self) -> &[u8] {
        &self.0
    }

    /// Take the DER bytes
    pub fn into_der(self) -> Bytes {
        self.0
    }
}

impl AsRef<[u8]> for Certificate {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
