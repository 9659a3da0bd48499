//! Command catalog of the My Number card
//!
//! Each command is a typed [`ApduCommand`](myna_apdu_core::ApduCommand) whose
//! response parser turns a non-success status word into an error.

mod compute_signature;
mod read_binary;
mod select;
mod verify;

pub use compute_signature::ComputeSignatureCommand;
pub use read_binary::ReadBinaryCommand;
pub use select::{FileSelector, SelectCommand};
pub use verify::VerifyCommand;
