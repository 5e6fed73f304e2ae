//! Loading strip options from a JSON-with-comments config file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use uncomment_core::{StripOptions, strip_comments_default};

/// Config file picked up from the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILE: &str = ".uncommentrc.json";

/// Errors that can occur when loading a config file.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file '{}'", path.display())]
    Io {
        /// Path that was attempted.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// The file is not a valid options object once comments are removed.
    #[error("invalid config file '{}': {source}", path.display())]
    InvalidJson {
        /// Path of the offending file.
        path: PathBuf,
        /// The deserialization error.
        #[source]
        source: serde_json::Error,
    },
}

/// Parse options from JSONC text. Comments are removed with the stripper
/// itself before the JSON is deserialized.
pub(crate) fn load_options_from_str(text: &str) -> Result<StripOptions, serde_json::Error> {
    let json = strip_comments_default(text);
    if json.trim().is_empty() {
        return Ok(StripOptions::default());
    }
    serde_json::from_str(&json)
}

/// Load options from `path`.
pub(crate) fn load_options(path: &Path) -> Result<StripOptions, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let options = load_options_from_str(&text).map_err(|source| ConfigError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), ?options, "loaded config file");
    Ok(options)
}

/// Resolve the base options, in priority order:
///   1. Explicit `--config` path (must exist)
///   2. [`DEFAULT_CONFIG_FILE`] in the working directory, when present
///   3. Built-in defaults
pub(crate) fn resolve_options(explicit: Option<&Path>) -> Result<StripOptions, ConfigError> {
    if let Some(path) = explicit {
        return load_options(path);
    }
    let fallback = Path::new(DEFAULT_CONFIG_FILE);
    if fallback.is_file() {
        return load_options(fallback);
    }
    Ok(StripOptions::default())
}
