//! Settings for the `myna` command
//!
//! Read from `~/.myna/myna.toml` (or `--config`) and `MYNA_` environment
//! variables, the latter taking priority:
//!
//! ```toml
//! reader = "SONY FeliCa"
//!
//! [secrets]
//! password1 = "1234"
//! password2 = "ABC123"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use eyre::OptionExt;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::{Deserialize, Serialize};

/// Environment variable prefix, `MYNA_SECRETS_PASSWORD1` maps to `secrets.password1`
const ENV_PREFIX: &str = "MYNA_";

#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub(crate) struct Settings {
    /// Reader name, or part of it
    #[serde(default)]
    pub(crate) reader: Option<String>,
    #[serde(default)]
    pub(crate) secrets: Secrets,
}

/// Stored credentials
#[derive(Serialize, Deserialize, Default, PartialEq, Eq)]
pub(crate) struct Secrets {
    /// 4 digit PIN of the authentication key and the card-face application
    #[serde(default)]
    pub(crate) password1: Option<String>,
    /// Signing password
    #[serde(default)]
    pub(crate) password2: Option<String>,
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |secret: &Option<String>| secret.as_ref().map(|_| "<redacted>");
        f.debug_struct("Secrets")
            .field("password1", &redact(&self.password1))
            .field("password2", &redact(&self.password2))
            .finish()
    }
}

/// Default location of the settings file
pub(crate) fn default_config_path() -> eyre::Result<PathBuf> {
    Ok(std::env::home_dir()
        .ok_or_eyre("home directory not found")?
        .join(".myna")
        .join("myna.toml"))
}

impl Settings {
    pub(crate) fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("_"))
    }

    /// Load settings, a missing file counts as empty
    pub(crate) fn load(path: Option<&Path>) -> eyre::Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_config_path()?,
        };
        Ok(Self::figment(&path).extract()?)
    }
}
