//! Length encodings
//!
//! Two independent formats share this module:
//!
//! - ASN.1 definite length. Short form is a single byte `0..=127`; long form is
//!   `0x80 | n` followed by `n` big-endian length bytes.
//! - The field header of card-face records: 3 bytes of which only the last is a
//!   length, followed by that many value bytes.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::FormatError;

/// Widest long-form length accepted, in bytes
const MAX_LENGTH_OCTETS: usize = 4;

/// Size of a card-face field header
pub const FIELD_HEADER_LEN: usize = 3;

/// A decoded ASN.1 definite length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerLength {
    /// Number of content bytes
    pub length: usize,
    /// Bytes taken by the length field itself
    pub header_width: usize,
}

/// Decode an ASN.1 definite length starting at the first length byte
pub fn decode_der_length(buf: &[u8]) -> Result<DerLength, FormatError> {
    let Some(&first) = buf.first() else {
        return Err(FormatError::truncated(1, 0));
    };

    if first & 0x80 == 0 {
        return Ok(DerLength {
            length: first as usize,
            header_width: 1,
        });
    }

    let octets = (first & 0x7F) as usize;
    if octets == 0 {
        return Err(FormatError::InvalidLength("indefinite length"));
    }
    if octets > MAX_LENGTH_OCTETS {
        return Err(FormatError::InvalidLength("length does not fit in 4 bytes"));
    }
    if buf.len() < 1 + octets {
        return Err(FormatError::truncated(1 + octets, buf.len()));
    }

    let length = buf[1..=octets]
        .iter()
        .fold(0usize, |acc, &b| (acc << 8) | b as usize);

    Ok(DerLength {
        length,
        header_width: 1 + octets,
    })
}

/// Encode a length in the shortest ASN.1 definite form
pub fn encode_der_length(length: usize) -> Bytes {
    if length < 0x80 {
        return Bytes::copy_from_slice(&[length as u8]);
    }

    let be = length.to_be_bytes();
    let skip = be.iter().take_while(|&&b| b == 0).count();
    let octets = &be[skip..];

    let mut buf = BytesMut::with_capacity(1 + octets.len());
    buf.put_u8(0x80 | octets.len() as u8);
    buf.put_slice(octets);
    buf.freeze()
}

/// A field of a card-face record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    /// The two header bytes in front of the length, not interpreted
    pub prefix: [u8; 2],
    /// Field value
    pub value: &'a [u8],
}

impl Field<'_> {
    /// Bytes taken by the header
    pub const fn header_len(&self) -> usize {
        FIELD_HEADER_LEN
    }

    /// Bytes taken by the value
    pub const fn value_len(&self) -> usize {
        self.value.len()
    }

    /// Total bytes taken by the field
    pub const fn encoded_len(&self) -> usize {
        FIELD_HEADER_LEN + self.value.len()
    }
}

/// Decode one field at the start of `buf`
pub fn decode_field(buf: &[u8]) -> Result<Field<'_>, FormatError> {
    let [p0, p1, len, rest @ ..] = buf else {
        return Err(FormatError::truncated(FIELD_HEADER_LEN, buf.len()));
    };

    let len = *len as usize;
    if rest.len() < len {
        return Err(FormatError::truncated(FIELD_HEADER_LEN + len, buf.len()));
    }

    Ok(Field {
        prefix: [*p0, *p1],
        value: &rest[..len],
    })
}

/// Sequential reader over consecutive card-face fields
#[derive(Debug, Clone)]
pub struct FieldReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    /// Start reading at the beginning of `buf`
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Read the next field and return its value
    pub fn next_field(&mut self) -> Result<&'a [u8], FormatError> {
        let field = decode_field(&self.buf[self.pos..])?;
        self.pos += field.encoded_len();
        Ok(field.value)
    }

    /// Read the next field header only, leaving the value unread
    ///
    /// Returns the length announced by the header.
    pub fn next_header(&mut self) -> Result<usize, FormatError> {
        match &self.buf[self.pos..] {
            [_, _, len, ..] => {
                self.pos += FIELD_HEADER_LEN;
                Ok(*len as usize)
            }
            rest => Err(FormatError::truncated(FIELD_HEADER_LEN, rest.len())),
        }
    }

    /// Read the next field as UTF-8 text
    pub fn next_text(&mut self, field: &'static str) -> Result<String, FormatError> {
        let value = self.next_field()?;
        std::str::from_utf8(value)
            .map(str::to_owned)
            .map_err(|_| FormatError::InvalidText(field))
    }

    /// Bytes consumed so far
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read
    pub const fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }
}
