//! `myna`: read certificates, sign files and read card-face data from a My Number card

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use eyre::{OptionExt, WrapErr};
use myna_apdu_core::CardExecutor;
use myna_apdu_transport_pcsc::{ConnectStrategy, PcscConfig, PcscDeviceManager, PcscTransport};
use myna_card::{CertType, DigestAlgorithm, KeyType, MyNumberCard, Pin};
use tracing::{debug, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

use config::Settings;
use display::{error, key_value_box, section_title, success, warning};

mod config;
mod display;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Reader to use, matched against part of its name
    #[arg(short, long, global = true)]
    reader: Option<String>,

    /// Settings file, defaults to ~/.myna/myna.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    /// 4 digit PIN, overrides secrets.password1
    #[arg(long, global = true)]
    pin: Option<String>,

    /// Signing password, overrides secrets.password2
    #[arg(long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List detected readers
    List,

    /// Read a certificate and write it as DER
    Cert {
        /// Certificate to read
        #[arg(short = 't', long = "type", value_enum)]
        cert_type: CertArg,

        /// Output file, defaults to <type>_cert.der
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Sign a file with one of the JPKI keys
    Sign {
        /// Key to sign with
        #[arg(short, long, value_enum, default_value = "auth")]
        key: KeyArg,

        /// File to sign
        #[arg(short, long)]
        input: PathBuf,

        /// Output file, defaults to <input>.sig
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Digest algorithm
        #[arg(short, long, value_enum, default_value = "sha256")]
        digest: DigestArg,
    },

    /// Print the individual number
    Identifier,

    /// Print name, address, birth date and sex
    PersonalData,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CertArg {
    Auth,
    AuthCa,
    Sign,
    SignCa,
}

impl From<CertArg> for CertType {
    fn from(arg: CertArg) -> Self {
        match arg {
            CertArg::Auth => Self::Auth,
            CertArg::AuthCa => Self::AuthCa,
            CertArg::Sign => Self::Sign,
            CertArg::SignCa => Self::SignCa,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum KeyArg {
    Auth,
    Sign,
}

impl From<KeyArg> for KeyType {
    fn from(arg: KeyArg) -> Self {
        match arg {
            KeyArg::Auth => Self::Auth,
            KeyArg::Sign => Self::Sign,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum DigestArg {
    Sha256,
    Sha384,
    Sha512,
}

impl From<DigestArg> for DigestAlgorithm {
    fn from(arg: DigestArg) -> Self {
        match arg {
            DigestArg::Sha256 => Self::Sha256,
            DigestArg::Sha384 => Self::Sha384,
            DigestArg::Sha512 => Self::Sha512,
        }
    }
}

type Card = MyNumberCard<CardExecutor<PcscTransport>>;

fn setup_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .init();
}

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result = run(cli);
    if let Err(report) = &result {
        if let Some(card_error) = report.downcast_ref::<myna_card::Error>() {
            report_card_error(card_error);
        }
    }
    result
}

fn run(cli: Cli) -> eyre::Result<()> {
    let manager = PcscDeviceManager::new().wrap_err("failed to establish PC/SC context")?;

    if let Commands::List = cli.command {
        return list_readers(&manager);
    }

    let settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "Loaded settings");

    let reader = cli.reader.or(settings.reader);
    let transport = manager
        .connect_strategy(
            ConnectStrategy::from_reader_name(reader.as_deref()),
            PcscConfig::default(),
        )
        .wrap_err("failed to connect to the card")?;
    println!("Using reader: {}", transport.reader_name());

    let mut card = MyNumberCard::with_transport(transport);
    let pin = cli.pin.or(settings.secrets.password1).map(Pin::new);
    let password = cli.password.or(settings.secrets.password2).map(Pin::new);

    match cli.command {
        Commands::List => Ok(()),
        Commands::Cert { cert_type, output } => {
            read_certificate(&mut card, cert_type.into(), password.as_ref(), output)
        }
        Commands::Sign {
            key,
            input,
            output,
            digest,
        } => {
            let key = KeyType::from(key);
            let credential = match key {
                KeyType::Auth => pin.as_ref(),
                KeyType::Sign => password.as_ref(),
            }
            .ok_or_eyre("no credential for this key, pass --pin or --password")?;
            sign_file(&mut card, key, credential, &input, output, digest.into())
        }
        Commands::Identifier => {
            let pin = pin.ok_or_eyre("the card-face PIN is required, pass --pin")?;
            let identifier = card.read_identifier(&pin)?;
            println!("{}", key_value_box("Individual number", vec![(
                "Number",
                identifier.to_string()
            )]));
            Ok(())
        }
        Commands::PersonalData => {
            let pin = pin.ok_or_eyre("the card-face PIN is required, pass --pin")?;
            let record = card.read_personal_data(&pin)?;
            println!("{}", key_value_box("Personal data", vec![
                ("Name", record.name),
                ("Address", record.address),
                ("Birth date", record.birth_date),
                ("Sex", record.sex.to_string()),
            ]));
            Ok(())
        }
    }
}

fn list_readers(manager: &PcscDeviceManager) -> eyre::Result<()> {
    let readers = manager.list_readers()?;
    if readers.is_empty() {
        println!("{}", warning("No readers found."));
        return Ok(());
    }

    println!("{}", section_title("Available readers"));
    for (i, reader) in readers.iter().enumerate() {
        let status = if reader.has_card() {
            "card present"
        } else {
            "no card"
        };
        println!("{}. {} ({})", i + 1, reader.name(), status);
    }
    Ok(())
}

fn read_certificate(
    card: &mut Card,
    cert_type: CertType,
    password: Option<&Pin>,
    output: Option<PathBuf>,
) -> eyre::Result<()> {
    let certificate = card.read_certificate(cert_type, password)?;
    let output = output.unwrap_or_else(|| PathBuf::from(cert_type.default_file_name()));

    std::fs::write(&output, certificate.as_der())
        .wrap_err_with(|| format!("failed to write {}", output.display()))?;
    println!(
        "{}",
        success(&certificate_written(cert_type, certificate.as_der().len(), &output))
    );
    Ok(())
}

fn certificate_written(cert_type: CertType, len: usize, output: &Path) -> String {
    format!("{cert_type} ({len} bytes) written to {}", output.display())
}

fn sign_file(
    card: &mut Card,
    key: KeyType,
    credential: &Pin,
    input: &Path,
    output: Option<PathBuf>,
    digest: DigestAlgorithm,
) -> eyre::Result<()> {
    let content =
        std::fs::read(input).wrap_err_with(|| format!("failed to read {}", input.display()))?;
    let signature = card.sign_with(key, credential, &content, digest)?;

    let output = output.unwrap_or_else(|| signature_path(input));
    std::fs::write(&output, signature.as_ref())
        .wrap_err_with(|| format!("failed to write {}", output.display()))?;
    println!(
        "{}",
        success(&format!("{digest} signature written to {}", output.display()))
    );
    debug!(signature = %hex::encode(signature.as_ref()), "Signature");
    Ok(())
}

/// `document.pdf` signs to `document.pdf.sig`
fn signature_path(input: &Path) -> PathBuf {
    let mut path = input.as_os_str().to_owned();
    path.push(".sig");
    PathBuf::from(path)
}

fn report_card_error(err: &myna_card::Error) {
    match err.retries_left() {
        Some(0) => eprintln!("{}", error("The credential is blocked")),
        Some(retries) => eprintln!(
            "{}",
            warning(&format!("Wrong credential, {retries} attempts left"))
        ),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_path() {
        assert_eq!(
            signature_path(Path::new("dir/document.pdf")),
            PathBuf::from("dir/document.pdf.sig")
        );
    }

    #[test]
    fn test_certificate_written_message() {
        assert_eq!(
            certificate_written(CertType::Auth, 1620, Path::new("auth_cert.der")),
            "authentication certificate (1620 bytes) written to auth_cert.der"
        );
    }

    #[test]
    fn test_parse_sign_command() {
        let cli = Cli::try_parse_from([
            "myna", "sign", "--key", "sign", "--input", "a.txt", "--digest", "sha384",
        ])
        .unwrap();
        match cli.command {
            Commands::Sign {
                key, input, digest, ..
            } => {
                assert!(key == KeyArg::Sign);
                assert_eq!(input, PathBuf::from("a.txt"));
                assert_eq!(DigestAlgorithm::from(digest), DigestAlgorithm::Sha384);
            }
            _ => panic!("expected sign"),
        }
    }

    #[test]
    fn test_parse_cert_command() {
        let cli = Cli::try_parse_from(["myna", "--reader", "SONY", "cert", "--type", "sign-ca"])
            .unwrap();
        assert_eq!(cli.reader.as_deref(), Some("SONY"));
        match cli.command {
            Commands::Cert { cert_type, output } => {
                assert_eq!(CertType::from(cert_type), CertType::SignCa);
                assert!(output.is_none());
            }
            _ => panic!("expected cert"),
        }
    }
}
