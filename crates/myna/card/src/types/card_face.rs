use std::fmt;

use derive_more::Display;

use crate::constants::layout::{IDENTIFIER_LEN, IDENTIFIER_OFFSET};
use crate::der::FieldReader;
use crate::error::FormatError;

/// The 12 digit individual number
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Extract the identifier from the record of the identifier file
    pub fn from_record(record: &[u8]) -> Result<Self, FormatError> {
        let end = IDENTIFIER_OFFSET + IDENTIFIER_LEN;
        let digits = record
            .get(IDENTIFIER_OFFSET..end)
            .ok_or(FormatError::truncated(end, record.len()))?;
        Self::try_from(digits)
    }

    /// The digits as text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&[u8]> for Identifier {
    type Error = FormatError;

    fn try_from(digits: &[u8]) -> Result<Self, Self::Error> {
        if digits.len() != IDENTIFIER_LEN || !digits.iter().all(u8::is_ascii_digit) {
            return Err(FormatError::InvalidIdentifier);
        }
        // ASCII digits are valid UTF-8
        Ok(Self(digits.iter().map(|&b| b as char).collect()))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier(********{})", &self.0[8..])
    }
}

/// Sex as recorded on the card face
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    /// Code `1`
    Male,
    /// Code `2`
    Female,
    /// Code `9`
    #[display("Not applicable")]
    NotApplicable,
    /// Any other code
    Unknown,
}

impl Sex {
    /// Map the raw code of the sex field
    pub fn from_code(code: &[u8]) -> Self {
        match code {
            b"1" => Self::Male,
            b"2" => Self::Female,
            b"9" => Self::NotApplicable,
            _ => Self::Unknown,
        }
    }
}

/// The basic four fields printed on the card face
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalRecord {
    /// Full name
    pub name: String,
    /// Address
    pub address: String,
    /// Birth date as recorded, `YYYYMMDD`
    pub birth_date: String,
    /// Sex
    pub sex: Sex,
}

impl PersonalRecord {
    /// Parse the record of the basic four fields file
    ///
    /// The record opens with a header announcing its length and a reserved field,
    /// followed by name, address, birth date and sex code in that order.
    pub fn parse(record: &[u8]) -> Result<Self, FormatError> {
        let mut reader = FieldReader::new(record);

        reader.next_header()?;
        reader.next_field()?;

        let name = reader.next_text("name")?;
        let address = reader.next_text("address")?;
        let birth_date = reader.next_text("birth date")?;
        let sex = Sex::from_code(reader.next_field()?);

        Ok(Self {
            name,
            address,
            birth_date,
            sex,
        })
    }
}
