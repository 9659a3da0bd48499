//! Binary codecs for card data
//!
//! - [`length`]: ASN.1 definite lengths and the 3-byte field header of card-face records
//! - [`oid`]: object identifier arcs in base-128
//! - [`digest_info`]: PKCS #1 `DigestInfo` for COMPUTE DIGITAL SIGNATURE

pub mod digest_info;
pub mod length;
pub mod oid;

pub use digest_info::{DigestAlgorithm, DigestInfo};
pub use length::{DerLength, Field, FieldReader, decode_der_length, decode_field, encode_der_length};
pub use oid::{ObjectIdentifier, decode_oid, encode_oid};

/// DER tags used by this crate
pub mod tag {
    /// SEQUENCE
    pub const SEQUENCE: u8 = 0x30;
    /// OBJECT IDENTIFIER
    pub const OBJECT_IDENTIFIER: u8 = 0x06;
    /// NULL
    pub const NULL: u8 = 0x05;
    /// OCTET STRING
    pub const OCTET_STRING: u8 = 0x04;
}
