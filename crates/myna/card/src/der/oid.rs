//! Object identifier codec
//!
//! The first two arcs `X.Y` share one byte `40 * X + Y`; every further arc is
//! written in base-128, high bit set on all but its last byte.

use std::{fmt, str::FromStr};

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::FormatError;

/// Encode a dotted object identifier into DER content bytes (no tag or length)
pub fn encode_oid(dotted: &str) -> Result<Bytes, FormatError> {
    let arcs = dotted
        .split('.')
        .map(|arc| {
            if arc.is_empty() || !arc.bytes().all(|b| b.is_ascii_digit()) {
                return Err(FormatError::InvalidOid("non-numeric arc"));
            }
            arc.parse::<u64>()
                .map_err(|_| FormatError::InvalidOid("arc too large"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let [x, y, rest @ ..] = arcs.as_slice() else {
        return Err(FormatError::InvalidOid("at least two arcs are required"));
    };
    if *x > 2 {
        return Err(FormatError::InvalidOid("first arc must be 0, 1 or 2"));
    }
    if *x < 2 && *y >= 40 {
        return Err(FormatError::InvalidOid("second arc must be below 40"));
    }
    let first = x * 40 + y;
    if first > 0xFF {
        return Err(FormatError::InvalidOid("first two arcs do not fit in one byte"));
    }

    let mut buf = BytesMut::with_capacity(1 + rest.len() * 2);
    buf.put_u8(first as u8);
    for &arc in rest {
        put_base128(&mut buf, arc);
    }
    Ok(buf.freeze())
}

fn put_base128(buf: &mut BytesMut, arc: u64) {
    let groups = (u64::BITS - arc.leading_zeros()).div_ceil(7).max(1);
    for i in (0..groups).rev() {
        let digit = ((arc >> (i * 7)) & 0x7F) as u8;
        buf.put_u8(if i == 0 { digit } else { digit | 0x80 });
    }
}

/// Decode DER content bytes (no tag or length) into a dotted object identifier
pub fn decode_oid(encoded: &[u8]) -> Result<String, FormatError> {
    let [first, rest @ ..] = encoded else {
        return Err(FormatError::InvalidOid("empty encoding"));
    };

    let mut x = u64::from(*first / 40);
    let mut y = u64::from(*first % 40);
    if x > 2 {
        y += (x - 2) * 40;
        x = 2;
    }

    let mut dotted = format!("{x}.{y}");
    let mut value: u64 = 0;
    for &byte in rest {
        if value > u64::MAX >> 7 {
            return Err(FormatError::InvalidOid("arc too large"));
        }
        value = (value << 7) | u64::from(byte & 0x7F);
        if byte & 0x80 == 0 {
            dotted.push('.');
            dotted.push_str(&value.to_string());
            value = 0;
        }
    }

    if rest.last().is_some_and(|b| b & 0x80 != 0) {
        return Err(FormatError::InvalidOid("unterminated arc"));
    }

    Ok(dotted)
}

/// An object identifier kept in both dotted and encoded form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectIdentifier {
    dotted: String,
    encoded: Bytes,
}

impl ObjectIdentifier {
    /// Build from DER content bytes
    pub fn from_der_content(encoded: &[u8]) -> Result<Self, FormatError> {
        Ok(Self {
            dotted: decode_oid(encoded)?,
            encoded: Bytes::copy_from_slice(encoded),
        })
    }

    /// DER content bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.encoded
    }

    /// Dotted form
    pub fn as_str(&self) -> &str {
        &self.dotted
    }
}

impl FromStr for ObjectIdentifier {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let encoded = encode_oid(s)?;
        // Normalise arcs such as "01" through the decoder
        Ok(Self {
            dotted: decode_oid(&encoded)?,
            encoded,
        })
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_encode_sha256() {
        assert_eq!(
            encode_oid("2.16.840.1.101.3.4.2.1").unwrap().as_ref(),
            &hex!("608648016503040201")
        );
    }

    #[test]
    fn test_decode_md5() {
        assert_eq!(
            decode_oid(&hex!("2A864886F70D0205")).unwrap(),
            "1.2.840.113549.2.5"
        );
    }

    #[test]
    fn test_round_trip() {
        for oid in [
            "0.0",
            "0.39",
            "1.2.840.113549.1.1.11",
            "2.5.4.3",
            "2.16.840.1.101.3.4.2.3",
            "1.3.6.1.4.1.311.2.1.4",
            "2.5.18446744073709551615",
        ] {
            assert_eq!(decode_oid(&encode_oid(oid).unwrap()).unwrap(), oid, "{oid}");
        }
    }

    #[test]
    fn test_decode_folds_large_first_arc() {
        // 0x78 = 120 = 40 * 3 + 0 which is really 2.40
        assert_eq!(decode_oid(&[0x78, 0x01]).unwrap(), "2.40.1");
        assert_eq!(decode_oid(&[0xFF]).unwrap(), "2.175");
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(encode_oid("1").is_err());
        assert!(encode_oid("1.2.x").is_err());
        assert!(encode_oid("1..2").is_err());
        assert!(encode_oid("3.1").is_err());
        assert!(encode_oid("1.40").is_err());
        assert!(encode_oid("2.176").is_err());
        assert!(decode_oid(&[]).is_err());
        assert!(decode_oid(&hex!("2A86")).is_err());
    }

    #[test]
    fn test_object_identifier() {
        let oid: ObjectIdentifier = "2.16.840.1.101.3.4.2.01".parse().unwrap();
        assert_eq!(oid.as_str(), "2.16.840.1.101.3.4.2.1");
        assert_eq!(oid.as_bytes(), &hex!("608648016503040201"));
        assert_eq!(
            ObjectIdentifier::from_der_content(oid.as_bytes()).unwrap(),
            oid
        );
        assert_eq!(oid.to_string(), "2.16.840.1.101.3.4.2.1");
    }
}
