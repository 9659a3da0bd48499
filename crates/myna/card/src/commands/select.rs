use myna_apdu_core::{ApduCommand, ExpectedLength, Response};

use crate::constants::{
    CARD_FACE_AID, JPKI_AID, card_face_ef, cla, ins, jpki_ef, select_p1, select_p2,
};

/// Selectable applications and elementary files
///
/// An elementary file can only be selected after its [`parent`](Self::parent)
/// application; flows select in that order, nothing tracks it for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileSelector {
    /// JPKI application
    JpkiAp,
    /// Authentication PIN
    AuthPin,
    /// Authentication private key
    AuthKey,
    /// Authentication certificate
    AuthCert,
    /// Authentication CA certificate
    AuthCaCert,
    /// Signing password
    SignPin,
    /// Signature private key
    SignKey,
    /// Signature certificate
    SignCert,
    /// Signature CA certificate
    SignCaCert,
    /// Card-face input support application
    CardFaceAp,
    /// Card-face PIN
    CardFacePin,
    /// Individual number
    Identifier,
    /// Name, address, birth date and sex
    BasicFourFields,
}

impl FileSelector {
    /// AID of an application or identifier of an elementary file
    pub const fn id(&self) -> &'static [u8] {
        match self {
            Self::JpkiAp => JPKI_AID,
            Self::AuthPin => &jpki_ef::AUTH_PIN,
            Self::AuthKey => &jpki_ef::AUTH_KEY,
            Self::AuthCert => &jpki_ef::AUTH_CERT,
            Self::AuthCaCert => &jpki_ef::AUTH_CA_CERT,
            Self::SignPin => &jpki_ef::SIGN_PIN,
            Self::SignKey => &jpki_ef::SIGN_KEY,
            Self::SignCert => &jpki_ef::SIGN_CERT,
            Self::SignCaCert => &jpki_ef::SIGN_CA_CERT,
            Self::CardFaceAp => CARD_FACE_AID,
            Self::CardFacePin => &card_face_ef::PIN,
            Self::Identifier => &card_face_ef::IDENTIFIER,
            Self::BasicFourFields => &card_face_ef::BASIC_FOUR_FIELDS,
        }
    }

    /// Whether this is an application selected by name
    pub const fn is_application(&self) -> bool {
        matches!(self, Self::JpkiAp | Self::CardFaceAp)
    }

    /// Application that must be selected first
    pub const fn parent(&self) -> Option<Self> {
        match self {
            Self::JpkiAp | Self::CardFaceAp => None,
            Self::CardFacePin | Self::Identifier | Self::BasicFourFields => Some(Self::CardFaceAp),
            _ => Some(Self::JpkiAp),
        }
    }

    /// Step name used in logs and errors
    pub const fn label(&self) -> &'static str {
        match self {
            Self::JpkiAp => "select JPKI application",
            Self::AuthPin => "select authentication PIN",
            Self::AuthKey => "select authentication key",
            Self::AuthCert => "select authentication certificate",
            Self::AuthCaCert => "select authentication CA certificate",
            Self::SignPin => "select signing password",
            Self::SignKey => "select signature key",
            Self::SignCert => "select signature certificate",
            Self::SignCaCert => "select signature CA certificate",
            Self::CardFaceAp => "select card-face application",
            Self::CardFacePin => "select card-face PIN",
            Self::Identifier => "select identifier file",
            Self::BasicFourFields => "select basic four fields file",
        }
    }

    /// SELECT command for this target
    pub const fn command(&self) -> SelectCommand {
        SelectCommand { selector: *self }
    }
}

/// SELECT FILE without response data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectCommand {
    selector: FileSelector,
}

impl SelectCommand {
    /// Target of the command
    pub const fn selector(&self) -> FileSelector {
        self.selector
    }
}

impl ApduCommand for SelectCommand {
    type Success = ();
    type Error = myna_apdu_core::Error;

    fn class(&self) -> u8 {
        cla::ISO7816
    }

    fn instruction(&self) -> u8 {
        ins::SELECT
    }

    fn p1(&self) -> u8 {
        if self.selector.is_application() {
            select_p1::BY_NAME
        } else {
            select_p1::EF_UNDER_CURRENT_DF
        }
    }

    fn p2(&self) -> u8 {
        select_p2::NO_RESPONSE_DATA
    }

    fn data(&self) -> Option<&[u8]> {
        Some(self.selector.id())
    }

    fn expected_length(&self) -> Option<ExpectedLength> {
        None
    }

    fn parse_response(&self, response: Response) -> Result<Self::Success, Self::Error> {
        response.into_payload()?;
        Ok(())
    }
}
