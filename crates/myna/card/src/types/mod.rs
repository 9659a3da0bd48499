mod card_face;
mod certificate;
mod pin;
mod signature;

pub use card_face::{Identifier, PersonalRecord, Sex};
pub use certificate::{CertType, Certificate, KeyType};
pub use pin::{Pin, PinKind};
pub use signature::Signature;
