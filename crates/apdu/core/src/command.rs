//! APDU command definitions and traits
//!
//! This module provides types and traits for working with APDU commands
//! according to ISO/IEC 7816-4.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use crate::{Error, Response};

/// Expected response length (Le) of an APDU command
///
/// Short `Le` is a single byte where `0x00` requests up to 256 bytes. Extended `Le`
/// is two bytes where `0x0000` requests up to 65536 bytes; without a command body
/// it is serialised as `00 HI LO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpectedLength {
    /// Single byte Le
    Short(u8),
    /// Two byte Le (extended length APDU)
    Extended(u16),
}

impl ExpectedLength {
    /// Pick the narrowest encoding able to request exactly `len` bytes
    pub const fn for_length(len: usize) -> Option<Self> {
        match len {
            0..=255 => Some(Self::Short(len as u8)),
            256 => Some(Self::Short(0)),
            257..=65535 => Some(Self::Extended(len as u16)),
            65536 => Some(Self::Extended(0)),
            _ => None,
        }
    }

    /// Maximum number of response bytes requested by this Le
    pub const fn max_response_len(&self) -> usize {
        match *self {
            Self::Short(0) => 256,
            Self::Short(n) => n as usize,
            Self::Extended(0) => 65536,
            Self::Extended(n) => n as usize,
        }
    }

    /// Whether this Le forces the extended APDU format
    pub const fn is_extended(&self) -> bool {
        matches!(self, Self::Extended(_))
    }

    /// Le as the two byte value used in extended APDUs
    const fn as_extended(&self) -> u16 {
        // 65536 wraps to 0x0000 which is exactly the extended encoding of it
        self.max_response_len() as u16
    }
}

/// Core trait for APDU commands
pub trait ApduCommand {
    /// Success response type
    type Success;

    /// Error response type
    type Error: From<Error> + fmt::Debug;

    /// Command class (CLA)
    fn class(&self) -> u8;

    /// Instruction code (INS)
    fn instruction(&self) -> u8;

    /// First parameter (P1)
    fn p1(&self) -> u8;

    /// Second parameter (P2)
    fn p2(&self) -> u8;

    /// Command payload data (optional)
    fn data(&self) -> Option<&[u8]>;

    /// Expected response length (optional)
    fn expected_length(&self) -> Option<ExpectedLength>;

    /// Whether the command must be serialised in extended format
    fn is_extended(&self) -> bool {
        self.data().is_some_and(|data| data.len() > 255)
            || self.expected_length().is_some_and(|le| le.is_extended())
    }

    /// Convert to raw APDU bytes
    fn to_bytes(&self) -> Bytes {
        let mut buffer = BytesMut::with_capacity(self.command_length());
        let extended = self.is_extended();

        // Header: CLA, INS, P1, P2
        buffer.put_u8(self.class());
        buffer.put_u8(self.instruction());
        buffer.put_u8(self.p1());
        buffer.put_u8(self.p2());

        // Add Lc and data if present
        let has_data = match self.data() {
            Some(data) => {
                if extended {
                    buffer.put_u8(0x00);
                    buffer.put_u16(data.len() as u16);
                } else {
                    buffer.put_u8(data.len() as u8);
                }
                buffer.put_slice(data);
                true
            }
            None => false,
        };

        // Add Le if present
        if let Some(le) = self.expected_length() {
            if extended {
                if !has_data {
                    buffer.put_u8(0x00);
                }
                buffer.put_u16(le.as_extended());
            } else {
                // 256 wraps to 0x00, the short encoding of it
                buffer.put_u8(le.max_response_len() as u8);
            }
        }

        buffer.freeze()
    }

    /// Calculate length of serialized command
    fn command_length(&self) -> usize {
        // Header (CLA, INS, P1, P2) is always 4 bytes
        let mut length = 4;
        let extended = self.is_extended();

        if let Some(data) = self.data() {
            length += if extended { 3 } else { 1 } + data.len();
        }

        if self.expected_length().is_some() {
            length += match (extended, self.data().is_some()) {
                (false, _) => 1,
                (true, true) => 2,
                (true, false) => 3,
            };
        }

        length
    }

    /// Convert to a generic Command
    fn to_command(&self) -> Command {
        Command {
            cla: self.class(),
            ins: self.instruction(),
            p1: self.p1(),
            p2: self.p2(),
            data: self.data().map(Bytes::copy_from_slice),
            le: self.expected_length(),
        }
    }

    /// Parse response into the command's response type
    fn parse_response(&self, response: Response) -> Result<Self::Success, Self::Error>;
}

/// Generic APDU command structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Command class byte
    pub cla: u8,
    /// Instruction byte
    pub ins: u8,
    /// Parameter 1
    pub p1: u8,
    /// Parameter 2
    pub p2: u8,
    /// Command data (optional)
    pub data: Option<Bytes>,
    /// Expected length (optional)
    pub le: Option<ExpectedLength>,
}

impl Command {
    /// Create a new command with just the header bytes
    pub const fn new(cla: u8, ins: u8, p1: u8, p2: u8) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data: None,
            le: None,
        }
    }

    /// Create a new command with expected response length (Le)
    pub const fn new_with_le(cla: u8, ins: u8, p1: u8, p2: u8, le: ExpectedLength) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data: None,
            le: Some(le),
        }
    }

    /// Create a new command with data payload
    pub fn new_with_data<T: Into<Bytes>>(cla: u8, ins: u8, p1: u8, p2: u8, data: T) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data: Some(data.into()),
            le: None,
        }
    }

    /// Create a new command with both data and expected length
    pub fn new_with_data_and_le<T: Into<Bytes>>(
        cla: u8,
        ins: u8,
        p1: u8,
        p2: u8,
        data: T,
        le: ExpectedLength,
    ) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data: Some(data.into()),
            le: Some(le),
        }
    }

    /// Set the data field
    pub fn with_data<T: Into<Bytes>>(mut self, data: T) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Set the expected length field
    pub const fn with_le(mut self, le: ExpectedLength) -> Self {
        self.le = Some(le);
        self
    }

    /// Parse a command from raw bytes
    ///
    /// Understands the short cases 1-4 and the extended cases used by this crate
    /// (extended Le without a body, and extended Lc with an optional two byte Le).
    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        if data.len() < 4 {
            return Err(Error::InvalidCommandLength(data.len()));
        }

        let mut command = Self::new(data[0], data[1], data[2], data[3]);
        let body = &data[4..];

        match body {
            [] => {}
            [le] => command.le = Some(ExpectedLength::Short(*le)),
            [0x00, hi, lo] => {
                command.le = Some(ExpectedLength::Extended(u16::from_be_bytes([*hi, *lo])));
            }
            [0x00, hi, lo, rest @ ..] => {
                let lc = u16::from_be_bytes([*hi, *lo]) as usize;
                if rest.len() < lc {
                    return Err(Error::InvalidCommandLength(data.len()));
                }
                command.data = Some(Bytes::copy_from_slice(&rest[..lc]));
                match &rest[lc..] {
                    [] => {}
                    [hi, lo] => {
                        command.le = Some(ExpectedLength::Extended(u16::from_be_bytes([*hi, *lo])));
                    }
                    _ => return Err(Error::InvalidCommandLength(data.len())),
                }
            }
            [lc, rest @ ..] => {
                let lc = *lc as usize;
                if rest.len() < lc {
                    return Err(Error::InvalidCommandLength(data.len()));
                }
                command.data = Some(Bytes::copy_from_slice(&rest[..lc]));
                match &rest[lc..] {
                    [] => {}
                    [le] => command.le = Some(ExpectedLength::Short(*le)),
                    _ => return Err(Error::InvalidCommandLength(data.len())),
                }
            }
        }

        Ok(command)
    }
}

impl ApduCommand for Command {
    type Success = Response;
    type Error = Error;

    fn class(&self) -> u8 {
        self.cla
    }

    fn instruction(&self) -> u8 {
        self.ins
    }

    fn p1(&self) -> u8 {
        self.p1
    }

    fn p2(&self) -> u8 {
        self.p2
    }

    fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    fn expected_length(&self) -> Option<ExpectedLength> {
        self.le
    }

    fn parse_response(&self, response: Response) -> Result<Self::Success, Self::Error> {
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_command_serialization() {
        let data = Bytes::from_static(&[
            0xD3, 0x92, 0xF0, 0x00, 0x26, 0x01, 0x00, 0x00, 0x00, 0x01,
        ]);
        let cmd = Command::new_with_data(0x00, 0xA4, 0x04, 0x0C, data);
        assert_eq!(cmd.to_bytes().as_ref(), hex!("00A4040C0AD392F000260100000001"));

        let cmd = Command::new_with_le(0x00, 0xB0, 0x00, 0x02, ExpectedLength::Short(0x01));
        assert_eq!(cmd.to_bytes().as_ref(), hex!("00B0000201"));
    }

    #[test]
    fn test_extended_le_without_data() {
        let cmd = Command::new_with_le(0x00, 0xB0, 0x00, 0x04, ExpectedLength::Extended(0x0123));
        assert_eq!(cmd.to_bytes().as_ref(), hex!("00B00004000123"));
        assert_eq!(cmd.command_length(), 7);
    }

    #[test]
    fn test_command_length() {
        let cmd1 = Command::new(0x00, 0xB0, 0x00, 0x00);
        assert_eq!(cmd1.command_length(), 4);

        let cmd2 = Command::new_with_le(0x00, 0xB0, 0x00, 0x00, ExpectedLength::Short(0xFF));
        assert_eq!(cmd2.command_length(), 5);

        let data = Bytes::from_static(&[0x01, 0x02, 0x03]);
        let cmd3 = Command::new_with_data(0x00, 0xD6, 0x00, 0x00, data.clone());
        assert_eq!(cmd3.command_length(), 8);

        let cmd4 =
            Command::new_with_data_and_le(0x80, 0x2A, 0x00, 0x80, data, ExpectedLength::Short(0));
        assert_eq!(cmd4.command_length(), 9);
        assert_eq!(cmd4.to_bytes().len(), 9);
    }

    #[test]
    fn test_expected_length_for_length() {
        assert_eq!(ExpectedLength::for_length(4), Some(ExpectedLength::Short(4)));
        assert_eq!(ExpectedLength::for_length(256), Some(ExpectedLength::Short(0)));
        assert_eq!(ExpectedLength::for_length(258), Some(ExpectedLength::Extended(258)));
        assert_eq!(ExpectedLength::for_length(70000), None);
        assert_eq!(ExpectedLength::Short(0).max_response_len(), 256);
        assert_eq!(ExpectedLength::Extended(0).max_response_len(), 65536);
    }

    #[test]
    fn test_command_from_bytes() {
        // Simple command with no data or Le
        let cmd = Command::from_bytes(&[0x00, 0xA4, 0x04, 0x00]).unwrap();
        assert_eq!((cmd.cla, cmd.ins, cmd.p1, cmd.p2), (0x00, 0xA4, 0x04, 0x00));
        assert!(cmd.data.is_none());
        assert!(cmd.le.is_none());

        // Command with data but no Le
        let cmd = Command::from_bytes(&hex!("0020008004 31323334")).unwrap();
        assert_eq!(cmd.data.as_deref(), Some(&b"1234"[..]));
        assert!(cmd.le.is_none());

        // Command with data and Le
        let cmd = Command::from_bytes(&hex!("802A008003 010203 00")).unwrap();
        assert_eq!(cmd.data.as_deref(), Some(&[0x01, 0x02, 0x03][..]));
        assert_eq!(cmd.le, Some(ExpectedLength::Short(0)));

        // Command with no data but with Le
        let cmd = Command::from_bytes(&hex!("00B00000FF")).unwrap();
        assert!(cmd.data.is_none());
        assert_eq!(cmd.le, Some(ExpectedLength::Short(0xFF)));

        // Extended Le without data
        let cmd = Command::from_bytes(&hex!("00B00004000123")).unwrap();
        assert_eq!(cmd.le, Some(ExpectedLength::Extended(0x0123)));

        // Truncated body
        assert!(Command::from_bytes(&hex!("0020008004 3132")).is_err());
    }

    #[test]
    fn test_round_trip_through_bytes() {
        let cmd = Command::new_with_le(0x00, 0xB0, 0x00, 0x04, ExpectedLength::Extended(0x0654));
        assert_eq!(Command::from_bytes(&cmd.to_bytes()).unwrap(), cmd);
    }
}
