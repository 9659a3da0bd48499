use bytes::Bytes;
use myna_apdu_core::{ApduCommand, ExpectedLength, Response};

use crate::constants::{cla, ins, signature_params};
use crate::der::DigestInfo;
use crate::types::Signature;

/// COMPUTE DIGITAL SIGNATURE with the currently selected private key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputeSignatureCommand {
    digest_info: Bytes,
}

impl ComputeSignatureCommand {
    /// Sign an encoded `DigestInfo`
    pub fn with_digest_info(digest_info: &DigestInfo) -> Self {
        Self {
            digest_info: digest_info.as_bytes().clone(),
        }
    }
}

impl ApduCommand for ComputeSignatureCommand {
    type Success = Signature;
    type Error = myna_apdu_core::Error;

    fn class(&self) -> u8 {
        cla::PROPRIETARY
    }

    fn instruction(&self) -> u8 {
        ins::COMPUTE_DIGITAL_SIGNATURE
    }

    fn p1(&self) -> u8 {
        signature_params::P1
    }

    fn p2(&self) -> u8 {
        signature_params::P2
    }

    fn data(&self) -> Option<&[u8]> {
        Some(&self.digest_info)
    }

    fn expected_length(&self) -> Option<ExpectedLength> {
        Some(ExpectedLength::Short(0))
    }

    fn parse_response(&self, response: Response) -> Result<Self::Success, Self::Error> {
        Ok(Signature::from(response.into_payload()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::der::DigestAlgorithm;

    #[test]
    fn test_signature_command_layout() {
        let info = DigestInfo::for_content(DigestAlgorithm::Sha256, b"abc").unwrap();
        let bytes = ComputeSignatureCommand::with_digest_info(&info).to_bytes();

        assert_eq!(&bytes[..5], &[0x80, 0x2A, 0x00, 0x80, 0x33]);
        assert_eq!(&bytes[5..56], info.as_ref());
        assert_eq!(bytes[56], 0x00);
        assert_eq!(bytes.len(), 57);
    }
}
