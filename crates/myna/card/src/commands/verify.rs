use std::fmt;

use myna_apdu_core::{ApduCommand, ExpectedLength, Response};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{cla, ins, verify_p2};
use crate::types::Pin;

/// VERIFY against the currently selected PIN file
///
/// Never retried: every rejected attempt counts towards the card's lockout.
/// The PIN copy held here is wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct VerifyCommand {
    pin: Vec<u8>,
}

impl VerifyCommand {
    /// Create a VERIFY command carrying `pin` as ASCII
    pub fn with_pin(pin: &Pin) -> Self {
        Self {
            pin: pin.as_bytes().to_vec(),
        }
    }
}

impl fmt::Debug for VerifyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyCommand")
            .field("pin_len", &self.pin.len())
            .finish()
    }
}

impl ApduCommand for VerifyCommand {
    type Success = ();
    type Error = myna_apdu_core::Error;

    fn class(&self) -> u8 {
        cla::ISO7816
    }

    fn instruction(&self) -> u8 {
        ins::VERIFY
    }

    fn p1(&self) -> u8 {
        0x00
    }

    fn p2(&self) -> u8 {
        verify_p2::SELECTED_PIN
    }

    fn data(&self) -> Option<&[u8]> {
        Some(self.pin.as_slice())
    }

    fn expected_length(&self) -> Option<ExpectedLength> {
        None
    }

    fn parse_response(&self, response: Response) -> Result<Self::Success, Self::Error> {
        response.into_payload()?;
        Ok(())
    }
}
