//! My Number card application
//!
//! [`MyNumberCard`] owns the executor for the lifetime of a session and runs the
//! four flows on it. A flow is a straight sequence of steps; the first step the
//! card rejects ends it with an error and nothing after that step is sent.

use bytes::{Bytes, BytesMut};
use myna_apdu_core::{
    ApduCommand, CardExecutor, CardTransport, Executor, ExpectedLength, StatusWord,
};
use tracing::{Level, debug, info, instrument, warn};

use crate::commands::{ComputeSignatureCommand, FileSelector, ReadBinaryCommand, VerifyCommand};
use crate::constants::layout::{
    BASIC_FOUR_HEADER_LEN, BASIC_FOUR_PROBE_OFFSET, CERT_BODY_OFFSET, CERT_HEADER_LEN,
};
use crate::der::{DigestAlgorithm, DigestInfo, decode_der_length, tag};
use crate::error::{Error, FormatError, Result};
use crate::types::{
    CertType, Certificate, Identifier, KeyType, PersonalRecord, Pin, PinKind, Signature,
};

/// My Number card session
#[derive(Debug)]
pub struct MyNumberCard<E: Executor> {
    /// Command executor
    executor: E,
}

impl<T: CardTransport> MyNumberCard<CardExecutor<T>> {
    /// Open a session directly on a transport
    pub const fn with_transport(transport: T) -> Self {
        Self::new(CardExecutor::new(transport))
    }
}

impl<E: Executor> MyNumberCard<E> {
    /// Open a session on an executor
    pub const fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Get a reference to the executor
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// Get a mutable reference to the executor
    pub const fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }

    /// End the session and hand the executor back
    pub fn into_executor(self) -> E {
        self.executor
    }

    /// Read a certificate from the JPKI application
    ///
    /// `password` is only used, and then required, for [`CertType::Sign`].
    #[instrument(skip_all, fields(cert = %cert_type))]
    pub fn read_certificate(
        &mut self,
        cert_type: CertType,
        password: Option<&Pin>,
    ) -> Result<Certificate> {
        let password = if cert_type.requires_pin() {
            let password = password.ok_or(Error::Input(
                "the signature certificate requires the signing password",
            ))?;
            password.validate(PinKind::SignPassword)?;
            Some(password)
        } else {
            None
        };

        self.select(FileSelector::JpkiAp)?;
        if let Some(password) = password {
            self.select(FileSelector::SignPin)?;
            self.verify(password)?;
        }
        self.select(cert_type.selector())?;

        let header = self.read_binary(
            "read certificate header",
            0,
            ExpectedLength::Short(CERT_HEADER_LEN),
        )?;
        let cert_length = certificate_length(&header)?;
        debug!(cert_length, "Certificate length");

        let body = self.read_binary(
            "read certificate body",
            CERT_BODY_OFFSET,
            ExpectedLength::Extended(cert_length),
        )?;
        if body.len() != cert_length as usize {
            return Err(FormatError::truncated(cert_length as usize, body.len()).into());
        }

        let mut der = BytesMut::with_capacity(header.len() + body.len());
        der.extend_from_slice(&header);
        der.extend_from_slice(&body);

        info!(len = der.len(), "Certificate read");
        Ok(Certificate::from_der(der.freeze()))
    }

    /// Sign `content` with a JPKI private key using SHA-256
    pub fn sign(&mut self, key: KeyType, pin: &Pin, content: &[u8]) -> Result<Signature> {
        self.sign_with(key, pin, content, DigestAlgorithm::Sha256)
    }

    /// Sign `content` with a JPKI private key using the given digest algorithm
    #[instrument(skip(self, pin, content), fields(content_len = content.len()))]
    pub fn sign_with(
        &mut self,
        key: KeyType,
        pin: &Pin,
        content: &[u8],
        algorithm: DigestAlgorithm,
    ) -> Result<Signature> {
        pin.validate(key.pin_kind())?;

        self.select(FileSelector::JpkiAp)?;
        self.select(key.pin_selector())?;
        self.verify(pin)?;
        self.select(key.key_selector())?;

        let digest_info = DigestInfo::for_content(algorithm, content)?;
        debug!(digest_info = %hex::encode(digest_info.as_bytes()), "DigestInfo");

        let signature = self.step(
            "compute digital signature",
            &ComputeSignatureCommand::with_digest_info(&digest_info),
        )?;

        info!(len = signature.len(), "Signature computed");
        Ok(signature)
    }

    /// Read the 12 digit individual number from the card-face application
    #[instrument(skip_all)]
    pub fn read_identifier(&mut self, pin: &Pin) -> Result<Identifier> {
        pin.validate(PinKind::CardFacePin)?;

        self.unlock_card_face(pin)?;
        self.select(FileSelector::Identifier)?;

        let record = self.read_binary("read identifier", 0, ExpectedLength::Short(0))?;
        Identifier::from_record(&record).map_err(Error::from)
    }

    /// Read name, address, birth date and sex from the card-face application
    #[instrument(skip_all)]
    pub fn read_personal_data(&mut self, pin: &Pin) -> Result<PersonalRecord> {
        pin.validate(PinKind::CardFacePin)?;

        self.unlock_card_face(pin)?;
        self.select(FileSelector::BasicFourFields)?;

        let probe = self.read_binary(
            "read basic four fields length",
            BASIC_FOUR_PROBE_OFFSET,
            ExpectedLength::Short(1),
        )?;
        let total = match probe.first() {
            Some(&len) => len as usize + BASIC_FOUR_HEADER_LEN,
            None => return Err(FormatError::truncated(1, 0).into()),
        };
        debug!(total, "Basic four fields length");

        let le = ExpectedLength::for_length(total)
            .ok_or(Error::Format(FormatError::InvalidLength("record too long")))?;
        let record = self.read_binary("read basic four fields", 0, le)?;

        PersonalRecord::parse(&record).map_err(Error::from)
    }

    /// Select the card-face application and verify its PIN
    fn unlock_card_face(&mut self, pin: &Pin) -> Result<()> {
        self.select(FileSelector::CardFaceAp)?;
        self.select(FileSelector::CardFacePin)?;
        self.verify(pin)
    }

    fn select(&mut self, selector: FileSelector) -> Result<()> {
        self.step(selector.label(), &selector.command())
    }

    fn verify(&mut self, pin: &Pin) -> Result<()> {
        self.step("verify PIN", &VerifyCommand::with_pin(pin))
    }

    fn read_binary(
        &mut self,
        step: &'static str,
        offset: u16,
        le: ExpectedLength,
    ) -> Result<Bytes> {
        let command = ReadBinaryCommand::new(offset, le)
            .ok_or(Error::Input("READ BINARY offset out of range"))?;
        self.step(step, &command)
    }

    /// Run one flow step: exchange, log the status word, let the command judge it
    fn step<C>(&mut self, step: &'static str, command: &C) -> Result<C::Success>
    where
        C: ApduCommand<Error = myna_apdu_core::Error>,
    {
        info!(step, "Running step");

        let response = self
            .executor
            .transceive(command)
            .map_err(|e| Error::at_step(step, e))?;
        log_status(step, response.status());

        command
            .parse_response(response)
            .map_err(|e| Error::at_step(step, e))
    }
}

fn log_status(step: &'static str, status: StatusWord) {
    let level = status.tracing_level();
    if level == Level::DEBUG {
        debug!(step, %status, "Step succeeded");
    } else if level == Level::INFO {
        info!(step, %status, outcome = %status.classify(), "Step rejected with a warning");
    } else {
        warn!(step, %status, outcome = %status.classify(), "Step rejected");
    }
}

/// Content length announced by the first bytes of a certificate
fn certificate_length(header: &[u8]) -> Result<u16> {
    let (&first, rest) = header.split_first().ok_or(FormatError::truncated(1, 0))?;
    if first != tag::SEQUENCE {
        return Err(FormatError::UnexpectedTag {
            expected: tag::SEQUENCE,
            found: first,
        }
        .into());
    }

    let length = decode_der_length(rest)?.length;
    match u16::try_from(length) {
        Ok(length) if length > 0 => Ok(length),
        _ => Err(FormatError::InvalidLength("certificate length out of range").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_certificate_length() {
        assert_eq!(certificate_length(&hex!("30820654")).unwrap(), 0x0654);
        assert_eq!(certificate_length(&hex!("30450201")).unwrap(), 0x45);
    }

    #[test]
    fn test_certificate_length_rejects_bad_headers() {
        assert!(matches!(
            certificate_length(&hex!("31820654")),
            Err(Error::Format(FormatError::UnexpectedTag { found: 0x31, .. }))
        ));
        assert!(matches!(
            certificate_length(&[]),
            Err(Error::Format(FormatError::Truncated { .. }))
        ));
        assert!(matches!(
            certificate_length(&hex!("3000")),
            Err(Error::Format(FormatError::InvalidLength(_)))
        ));
        assert!(matches!(
            certificate_length(&hex!("3083010000")),
            Err(Error::Format(FormatError::InvalidLength(_)))
        ));
    }
}
