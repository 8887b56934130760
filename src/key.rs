//! Deploy key material
use std::{
    fs::read_to_string,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use home::home_dir;
use log::debug;

use crate::errors::{MirrorKitError, MirrorKitErrorKind};

/// Marker expected somewhere in a PEM private key
pub const KEY_MARKER: &str = "PRIVATE KEY";

/// Default key file, relative to the home directory
const DEFAULT_KEY_FILE: [&str; 2] = [".ssh", "gitlab_gha_mirror"];

/// Private key text read from a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    /// Key text, ending with exactly one newline
    text: String,
}

impl KeyMaterial {
    /// Key text
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Check that `text` looks like a private key
/// # Errors
/// `NotAKeyFile` if the marker is missing
pub fn validate_key_text(text: &str) -> Result<(), MirrorKitError> {
    if text.contains(KEY_MARKER) {
        Ok(())
    } else {
        Err(MirrorKitError::new(MirrorKitErrorKind::NotAKeyFile))
    }
}

/// Read and validate the key at `path`
/// # Errors
/// - `FileNotFound` if `path` isn't a file
/// - `NotReadable` if it can't be read as UTF-8 text
/// - `NotAKeyFile` if it doesn't contain a private key
pub fn read_key_file(path: &Path) -> Result<KeyMaterial, MirrorKitError> {
    if !path.is_file() {
        return Err(MirrorKitError::new(MirrorKitErrorKind::FileNotFound)
            .with_text(format!("{} not found or not a file", path.display())));
    }
    let data = read_to_string(path).map_err(|e| {
        let text = match e.kind() {
            ErrorKind::InvalidData => format!("{} is not UTF-8 text", path.display()),
            _ => path.display().to_string(),
        };
        MirrorKitError::with_source(MirrorKitErrorKind::NotReadable, e).with_text(text)
    })?;
    validate_key_text(&data).map_err(|e| e.with_text(path.display().to_string()))?;
    debug!("Read key from {}", path.display());
    Ok(KeyMaterial {
        text: format!("{}\n", data.trim_end_matches('\n')),
    })
}

/// Default location of the deploy key
/// # Errors
/// Error if the home directory can't be found
pub fn default_key_path() -> Result<PathBuf, MirrorKitError> {
    match home_dir() {
        Some(path) if !path.as_os_str().is_empty() => {
            Ok(DEFAULT_KEY_FILE.iter().fold(path, |acc, part| acc.join(part)))
        }
        _ => Err(MirrorKitError::new(MirrorKitErrorKind::Config)
            .with_text("Unable to get your home dir! home::home_dir() isn't working")),
    }
}
