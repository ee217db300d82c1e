use std::fs;
use std::io;
use std::path::Path;

use mention_logging::mention_debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How strictly strings are accepted as URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UrlValidation {
    /// Syntax check only. Used when the host runs in debug mode so local
    /// test sites are accepted.
    Syntax,
    /// Only public http(s) URLs on standard ports.
    #[default]
    Http,
}

impl UrlValidation {
    /// Maps the host's debug-mode flag onto a validation mode.
    pub fn from_debug_flag(debug: bool) -> Self {
        if debug {
            UrlValidation::Syntax
        } else {
            UrlValidation::Http
        }
    }
}

/// Handler options, read from RON. Missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerSettings {
    pub url_validation: UrlValidation,
}

/// Failure to read or parse a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid settings: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

impl HandlerSettings {
    /// Parses settings from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, SettingsError> {
        Ok(ron::from_str(text)?)
    }

    /// Loads settings from a RON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                mention_debug!("No settings at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Self::from_ron_str(&text)
    }
}
