use bytes::Bytes;
use myna_apdu_core::{ApduCommand, ExpectedLength, Response};

use crate::constants::{cla, ins};

/// READ BINARY from the currently selected elementary file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadBinaryCommand {
    offset: u16,
    le: ExpectedLength,
}

impl ReadBinaryCommand {
    /// Highest offset that P1-P2 can address without switching to a short file identifier
    pub const MAX_OFFSET: u16 = 0x7FFF;

    /// Read `le` bytes at `offset`
    ///
    /// Returns `None` when the offset does not fit in 15 bits.
    pub const fn new(offset: u16, le: ExpectedLength) -> Option<Self> {
        if offset > Self::MAX_OFFSET {
            return None;
        }
        Some(Self { offset, le })
    }

    /// Offset of the read
    pub const fn offset(&self) -> u16 {
        self.offset
    }
}

impl ApduCommand for ReadBinaryCommand {
    type Success = Bytes;
    type Error = myna_apdu_core::Error;

    fn class(&self) -> u8 {
        cla::ISO7816
    }

    fn instruction(&self) -> u8 {
        ins::READ_BINARY
    }

    fn p1(&self) -> u8 {
        (self.offset >> 8) as u8
    }

    fn p2(&self) -> u8 {
        self.offset as u8
    }

    fn data(&self) -> Option<&[u8]> {
        None
    }

    fn expected_length(&self) -> Option<ExpectedLength> {
        Some(self.le)
    }

    fn parse_response(&self, response: Response) -> Result<Self::Success, Self::Error> {
        Ok(response.into_payload()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_short_reads() {
        let cmd = ReadBinaryCommand::new(0, ExpectedLength::Short(4)).unwrap();
        assert_eq!(cmd.to_bytes().as_ref(), &hex!("00B0000004"));

        let cmd = ReadBinaryCommand::new(2, ExpectedLength::Short(1)).unwrap();
        assert_eq!(cmd.to_bytes().as_ref(), &hex!("00B0000201"));

        let cmd = ReadBinaryCommand::new(0, ExpectedLength::Short(0)).unwrap();
        assert_eq!(cmd.to_bytes().as_ref(), &hex!("00B0000000"));
    }

    #[test]
    fn test_extended_read() {
        let cmd = ReadBinaryCommand::new(4, ExpectedLength::Extended(0x0654)).unwrap();
        assert_eq!(cmd.to_bytes().as_ref(), &hex!("00B00004000654"));
    }

    #[test]
    fn test_offset_range() {
        assert!(ReadBinaryCommand::new(0x8000, ExpectedLength::Short(1)).is_none());
        let cmd = ReadBinaryCommand::new(0x0123, ExpectedLength::Short(1)).unwrap();
        assert_eq!((cmd.p1(), cmd.p2()), (0x01, 0x23));
    }

    #[test]
    fn test_payload_is_returned() {
        let cmd = ReadBinaryCommand::new(0, ExpectedLength::Short(4)).unwrap();
        let payload = cmd
            .parse_response(Response::from_bytes(&hex!("30820654 9000")).unwrap())
            .unwrap();
        assert_eq!(payload.as_ref(), &hex!("30820654"));
    }
}
