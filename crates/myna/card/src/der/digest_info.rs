//! `DigestInfo` construction for COMPUTE DIGITAL SIGNATURE
//!
//! ```text
//! DigestInfo ::= SEQUENCE {
//!     digestAlgorithm SEQUENCE { algorithm OBJECT IDENTIFIER, parameters NULL },
//!     digest          OCTET STRING
//! }
//! ```
//!
//! Every length is written in short form, which covers all supported digests.

use bytes::{BufMut, Bytes, BytesMut};
use derive_more::Display;
use sha2::{Digest, Sha256, Sha384, Sha512};

use super::oid::ObjectIdentifier;
use super::tag;
use crate::constants::{OID_SHA256, OID_SHA384, OID_SHA512};
use crate::error::FormatError;

/// Hash algorithm applied to the signing target
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    /// SHA-256
    #[default]
    #[display("SHA-256")]
    Sha256,
    /// SHA-384
    #[display("SHA-384")]
    Sha384,
    /// SHA-512
    #[display("SHA-512")]
    Sha512,
}

impl DigestAlgorithm {
    /// Dotted object identifier of the algorithm
    pub const fn oid_str(&self) -> &'static str {
        match self {
            Self::Sha256 => OID_SHA256,
            Self::Sha384 => OID_SHA384,
            Self::Sha512 => OID_SHA512,
        }
    }

    /// Object identifier of the algorithm
    pub fn oid(&self) -> Result<ObjectIdentifier, FormatError> {
        self.oid_str().parse()
    }

    /// Digest length in bytes
    pub const fn output_len(&self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// Hash `content`
    pub fn digest(&self, content: &[u8]) -> Bytes {
        match self {
            Self::Sha256 => Bytes::copy_from_slice(&Sha256::digest(content)),
            Self::Sha384 => Bytes::copy_from_slice(&Sha384::digest(content)),
            Self::Sha512 => Bytes::copy_from_slice(&Sha512::digest(content)),
        }
    }
}

/// DER encoded `DigestInfo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestInfo {
    encoded: Bytes,
    digest_offset: usize,
}

impl DigestInfo {
    /// Largest content a short-form length can describe
    const SHORT_FORM_MAX: usize = 0x7F;

    /// Build a `DigestInfo` around an already computed digest
    pub fn build(algorithm: &ObjectIdentifier, digest: &[u8]) -> Result<Self, FormatError> {
        let oid = algorithm.as_bytes();
        let algorithm_len = 2 + oid.len() + 2;
        let content_len = 2 + algorithm_len + 2 + digest.len();

        if oid.len() > Self::SHORT_FORM_MAX || content_len > Self::SHORT_FORM_MAX {
            return Err(FormatError::InvalidLength("DigestInfo needs a long-form length"));
        }

        let mut buf = BytesMut::with_capacity(2 + content_len);
        buf.put_u8(tag::SEQUENCE);
        buf.put_u8(content_len as u8);

        buf.put_u8(tag::SEQUENCE);
        buf.put_u8(algorithm_len as u8);
        buf.put_u8(tag::OBJECT_IDENTIFIER);
        buf.put_u8(oid.len() as u8);
        buf.put_slice(oid);
        buf.put_u8(tag::NULL);
        buf.put_u8(0x00);

        buf.put_u8(tag::OCTET_STRING);
        buf.put_u8(digest.len() as u8);
        let digest_offset = buf.len();
        buf.put_slice(digest);

        Ok(Self {
            encoded: buf.freeze(),
            digest_offset,
        })
    }

    /// Hash `content` and wrap the digest
    pub fn for_content(algorithm: DigestAlgorithm, content: &[u8]) -> Result<Self, FormatError> {
        Self::build(&algorithm.oid()?, &algorithm.digest(content))
    }

    /// Content of the OCTET STRING
    pub fn digest(&self) -> &[u8] {
        &self.encoded[self.digest_offset..]
    }

    /// Encoded bytes
    pub fn as_bytes(&self) -> &Bytes {
        &self.encoded
    }

    /// Length of the encoding
    pub fn len(&self) -> usize {
        self.encoded.len()
    }

    /// Whether the encoding is empty, which never happens for a built value
    pub fn is_empty(&self) -> bool {
        self.encoded.is_empty()
    }
}

impl AsRef<[u8]> for DigestInfo {
    fn as_ref(&self) -> &[u8] {
        &self.encoded
    }
}

impl From<DigestInfo> for Bytes {
    fn from(info: DigestInfo) -> Self {
        info.encoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_sha256_layout() {
        let oid: ObjectIdentifier = OID_SHA256.parse().unwrap();
        let digest = [0xAB; 32];
        let info = DigestInfo::build(&oid, &digest).unwrap();

        assert_eq!(info.len(), 51);
        assert_eq!(&info.as_ref()[..6], &hex!("3031300D0609"));
        assert_eq!(
            &info.as_ref()[..19],
            &hex!("3031300D060960864801650304020105000420")
        );
        assert_eq!(info.digest(), &digest);
    }

    #[test]
    fn test_for_content_matches_independent_hash() {
        let content = b"important document";
        let info = DigestInfo::for_content(DigestAlgorithm::Sha256, content).unwrap();
        assert_eq!(info.digest(), Sha256::digest(content).as_slice());

        let info = DigestInfo::for_content(DigestAlgorithm::Sha512, content).unwrap();
        assert_eq!(info.len(), 83);
        assert_eq!(&info.as_ref()[..6], &hex!("3051300D0609"));
        assert_eq!(info.digest(), Sha512::digest(content).as_slice());
    }

    #[test]
    fn test_rejects_long_form() {
        let oid: ObjectIdentifier = OID_SHA256.parse().unwrap();
        assert!(matches!(
            DigestInfo::build(&oid, &[0u8; 120]),
            Err(FormatError::InvalidLength(_))
        ));
    }

    #[test]
    fn test_algorithm_properties() {
        for algorithm in [
            DigestAlgorithm::Sha256,
            DigestAlgorithm::Sha384,
            DigestAlgorithm::Sha512,
        ] {
            assert_eq!(algorithm.digest(b"").len(), algorithm.output_len());
            assert!(algorithm.oid().is_ok());
        }
        assert_eq!(DigestAlgorithm::default(), DigestAlgorithm::Sha256);
        assert_eq!(DigestAlgorithm::Sha384.to_string(), "SHA-384");
    }
}
