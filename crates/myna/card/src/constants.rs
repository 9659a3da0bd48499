//! Constants of the My Number card command set
//!
//! Application identifiers and elementary file identifiers are part of the wire
//! contract with the card and must match byte for byte.

/// JPKI (public personal authentication) application AID
pub const JPKI_AID: &[u8] = b"\xD3\x92\xF0\x00\x26\x01\x00\x00\x00\x01";

/// Card-face input support application AID
pub const CARD_FACE_AID: &[u8] = b"\xD3\x92\x10\x00\x31\x00\x01\x01\x04\x08";

/// SHA-256 object identifier
pub const OID_SHA256: &str = "2.16.840.1.101.3.4.2.1";
/// SHA-384 object identifier
pub const OID_SHA384: &str = "2.16.840.1.101.3.4.2.2";
/// SHA-512 object identifier
pub const OID_SHA512: &str = "2.16.840.1.101.3.4.2.3";

/// Command classes
pub mod cla {
    /// ISO7816 command class
    pub const ISO7816: u8 = 0x00;
    /// Proprietary command class
    pub const PROPRIETARY: u8 = 0x80;
}

/// Instruction codes
pub mod ins {
    /// SELECT FILE
    pub const SELECT: u8 = 0xA4;
    /// VERIFY
    pub const VERIFY: u8 = 0x20;
    /// READ BINARY
    pub const READ_BINARY: u8 = 0xB0;
    /// COMPUTE DIGITAL SIGNATURE
    pub const COMPUTE_DIGITAL_SIGNATURE: u8 = 0x2A;
}

/// Parameter values for SELECT (P1)
pub mod select_p1 {
    /// Select by DF name
    pub const BY_NAME: u8 = 0x04;
    /// Select elementary file under the current DF
    pub const EF_UNDER_CURRENT_DF: u8 = 0x02;
}

/// Parameter values for SELECT (P2)
pub mod select_p2 {
    /// First or only occurrence, no response data
    pub const NO_RESPONSE_DATA: u8 = 0x0C;
}

/// Parameter values for VERIFY (P2)
pub mod verify_p2 {
    /// Reference data of the currently selected PIN file
    pub const SELECTED_PIN: u8 = 0x80;
}

/// Parameter values for COMPUTE DIGITAL SIGNATURE
pub mod signature_params {
    /// P1
    pub const P1: u8 = 0x00;
    /// P2, key of the currently selected key file
    pub const P2: u8 = 0x80;
}

/// Elementary files of the JPKI application
pub mod jpki_ef {
    /// Signature certificate
    pub const SIGN_CERT: [u8; 2] = [0x00, 0x01];
    /// Signature CA certificate
    pub const SIGN_CA_CERT: [u8; 2] = [0x00, 0x02];
    /// Signature private key
    pub const SIGN_KEY: [u8; 2] = [0x00, 0x1A];
    /// Signature password
    pub const SIGN_PIN: [u8; 2] = [0x00, 0x1B];
    /// Authentication certificate
    pub const AUTH_CERT: [u8; 2] = [0x00, 0x0A];
    /// Authentication CA certificate
    pub const AUTH_CA_CERT: [u8; 2] = [0x00, 0x0B];
    /// Authentication private key
    pub const AUTH_KEY: [u8; 2] = [0x00, 0x17];
    /// Authentication PIN
    pub const AUTH_PIN: [u8; 2] = [0x00, 0x18];
}

/// Elementary files of the card-face application
pub mod card_face_ef {
    /// Card-face PIN
    pub const PIN: [u8; 2] = [0x00, 0x11];
    /// Individual number
    pub const IDENTIFIER: [u8; 2] = [0x00, 0x01];
    /// Basic four fields: name, address, birth date, sex
    pub const BASIC_FOUR_FIELDS: [u8; 2] = [0x00, 0x02];
}

/// Layout of card records
pub mod layout {
    /// Bytes requested to learn a certificate's tag and length
    pub const CERT_HEADER_LEN: u8 = 4;
    /// Offset of the certificate body read
    pub const CERT_BODY_OFFSET: u16 = 4;
    /// Offset of the identifier inside its record
    pub const IDENTIFIER_OFFSET: usize = 3;
    /// Number of digits of the identifier
    pub const IDENTIFIER_LEN: usize = 12;
    /// Offset of the length probe in the basic four fields record
    pub const BASIC_FOUR_PROBE_OFFSET: u16 = 2;
    /// Bytes preceding the length counted by the probe
    pub const BASIC_FOUR_HEADER_LEN: usize = 3;
}
