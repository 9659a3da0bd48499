//! Scripted transport for driving card flows without hardware

use std::collections::VecDeque;

use bytes::Bytes;
use myna_apdu_core::{ApduCommand, CardExecutor, CardTransport, TransportError};
use myna_card::MyNumberCard;
use myna_card::commands::FileSelector;

/// Success status word
pub const OK: &[u8] = &[0x90, 0x00];

/// Transport that answers with a fixed script and records every command
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: VecDeque<Bytes>,
    /// Commands received, in order
    pub commands: Vec<Bytes>,
}

impl ScriptedTransport {
    pub fn new<I, R>(responses: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
    {
        Self {
            responses: responses
                .into_iter()
                .map(|r| Bytes::copy_from_slice(r.as_ref()))
                .collect(),
            commands: Vec::new(),
        }
    }

    /// Responses the flow never asked for
    pub fn unused(&self) -> usize {
        self.responses.len()
    }
}

impl CardTransport for ScriptedTransport {
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        self.commands.push(Bytes::copy_from_slice(command));
        self.responses
            .pop_front()
            .ok_or_else(|| TransportError::other("script exhausted"))
    }

    fn is_connected(&self) -> bool {
        true
    }

    fn reset(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}

/// Card session over a scripted transport
pub type ScriptedCard = MyNumberCard<CardExecutor<ScriptedTransport>>;

pub fn card<I, R>(responses: I) -> ScriptedCard
where
    I: IntoIterator<Item = R>,
    R: AsRef<[u8]>,
{
    MyNumberCard::with_transport(ScriptedTransport::new(responses))
}

pub fn sent(card: &ScriptedCard) -> &[Bytes] {
    &card.executor().transport().commands
}

/// Wire bytes of the SELECT for `selector`
pub fn select(selector: FileSelector) -> Bytes {
    selector.command().to_bytes()
}

/// Response payload followed by 90 00
pub fn ok_with(payload: &[u8]) -> Vec<u8> {
    let mut response = payload.to_vec();
    response.extend_from_slice(OK);
    response
}
