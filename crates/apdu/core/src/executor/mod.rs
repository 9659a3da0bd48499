//! Executor for APDU command execution
//!
//! An executor owns a [`CardTransport`] and turns typed commands into exchanges:
//! serialise, transmit, split the status word, hand the [`Response`] back to the
//! command for parsing.

use std::fmt;

use bytes::Bytes;
use tracing::{debug, instrument, trace};

use crate::command::ApduCommand;
use crate::response::Response;
use crate::transport::CardTransport;
use crate::Result;

/// VERIFY carries a PIN in its body
const INS_VERIFY: u8 = 0x20;

/// Hex rendering of a command for traces, with secret bodies elided
pub fn redacted_hex(command: &[u8]) -> String {
    match command {
        [_, INS_VERIFY, _, _, ..] if command.len() > 4 => {
            format!("{} <redacted {} bytes>", hex::encode(&command[..4]), command.len() - 4)
        }
        _ => hex::encode(command),
    }
}

/// Trait for APDU command execution
pub trait Executor: Send + fmt::Debug {
    /// Transmit raw command bytes and return the raw response, status word included
    #[instrument(
        level = "trace",
        skip_all,
        fields(executor = std::any::type_name::<Self>(), len = command.len())
    )]
    fn transmit(&mut self, command: &[u8]) -> Result<Bytes> {
        trace!(command = %redacted_hex(command), "Transmitting command");
        let response = self.do_transmit(command);
        match &response {
            Ok(bytes) => {
                trace!(response = %hex::encode(bytes), "Received response");
            }
            Err(err) => {
                debug!(error = ?err, "Error during transmission");
            }
        }
        response
    }

    /// Internal implementation of transmit
    fn do_transmit(&mut self, command: &[u8]) -> Result<Bytes>;

    /// Send a command and split the answer into payload and status word
    ///
    /// Non-success status words are returned as a [`Response`], not as an error.
    fn transceive<C: ApduCommand + ?Sized>(&mut self, command: &C) -> Result<Response> {
        let raw = self.transmit(&command.to_bytes())?;
        Ok(Response::try_from(raw)?)
    }

    /// Execute a typed APDU command and let it parse its own response
    fn execute<C: ApduCommand>(
        &mut self,
        command: &C,
    ) -> std::result::Result<C::Success, C::Error> {
        let response = self.transceive(command)?;
        command.parse_response(response)
    }

    /// Reset the executor, including the transport
    fn reset(&mut self) -> Result<()>;
}

/// Card executor implementation that sends commands straight to a transport
///
/// Responses are handed to the caller, not kept.
#[derive(Debug)]
pub struct CardExecutor<T: CardTransport> {
    /// The transport used for communication
    transport: T,
}

impl<T: CardTransport> CardExecutor<T> {
    /// Create a new card executor with the given transport
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Get a reference to the underlying transport
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Get a mutable reference to the underlying transport
    pub const fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Take ownership of the transport and return it
    pub fn into_transport(self) -> T {
        self.transport
    }
}

impl<T: CardTransport> Executor for CardExecutor<T> {
    fn do_transmit(&mut self, command: &[u8]) -> Result<Bytes> {
        Ok(self.transport.transmit_raw(command)?)
    }

    fn reset(&mut self) -> Result<()> {
        Ok(self.transport.reset()?)
    }
}
