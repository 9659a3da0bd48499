//! Protocol engine for the My Number card
//!
//! Talks to two applications on the card through any [`Executor`](myna_apdu_core::Executor):
//!
//! - JPKI: authentication and signature certificates, their CA certificates, and
//!   signatures made with the two private keys
//! - Card-face input support: the individual number and the basic four fields
//!
//! ```no_run
//! # fn run(transport: impl myna_apdu_core::CardTransport) -> myna_card::Result<()> {
//! use myna_card::{CertType, KeyType, MyNumberCard, Pin};
//!
//! let mut card = MyNumberCard::with_transport(transport);
//! let certificate = card.read_certificate(CertType::Auth, None)?;
//! let signature = card.sign(KeyType::Auth, &Pin::new("1234"), b"document")?;
//! # let _ = (certificate, signature);
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod application;
pub mod commands;
pub mod constants;
pub mod der;
mod error;
mod types;

pub use application::MyNumberCard;
pub use der::DigestAlgorithm;
pub use error::{Error, FormatError, Result};
pub use types::{
    CertType, Certificate, Identifier, KeyType, PersonalRecord, Pin, PinKind, Sex, Signature,
};
