use bytes::Bytes;
use derive_more::{Deref, From};

/// Raw signature returned by COMPUTE DIGITAL SIGNATURE
#[derive(Debug, Clone, PartialEq, Eq, Deref, From)]
pub struct Signature(Bytes);

impl Signature {
    /// Signature bytes
    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
