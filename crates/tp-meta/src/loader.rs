//! Locating and reading codec configuration files
//!
//! Project configuration lives at `.tutorial/blocks.toml`, found by walking
//! up from the working directory:
//!
//! ```text
//! project/
//!   .tutorial/
//!     blocks.toml
//!   chapters/
//!     intro.html
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CodecConfig;
use crate::{Error, Result};

/// Directory holding project configuration
pub const CONFIG_DIR: &str = ".tutorial";

/// Default configuration file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "blocks.toml";

/// Load a configuration file.
///
/// Format is detected from the file extension:
/// - `.toml` -> TOML
/// - `.json` -> JSON
/// - `.yaml`, `.yml` -> YAML
///
/// The loaded configuration is validated before it is returned.
pub fn load(path: &Path) -> Result<CodecConfig> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    let config: CodecConfig = match extension.to_lowercase().as_str() {
        "toml" => toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            format: "TOML".into(),
            message: e.to_string(),
        })?,
        "json" => serde_json::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            format: "JSON".into(),
            message: e.to_string(),
        })?,
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            format: "YAML".into(),
            message: e.to_string(),
        })?,
        _ => {
            return Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            });
        }
    };

    config.validate().map_err(|e| Error::InvalidConfig {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::debug!(path = %path.display(), "Loaded codec configuration");
    Ok(config)
}

/// Find `.tutorial/blocks.toml` in `start` or any of its ancestors
pub fn discover(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}

/// Load `explicit` if given, otherwise a discovered project file, otherwise
/// the platform defaults.
///
/// An explicit path that does not exist is an error; a missing project file
/// is not.
pub fn load_or_default(explicit: Option<&Path>, start: &Path) -> Result<CodecConfig> {
    if let Some(path) = explicit {
        return load(path);
    }

    match discover(start) {
        Some(path) => load(&path),
        None => {
            tracing::debug!(start = %start.display(), "No codec configuration found, using defaults");
            Ok(CodecConfig::default())
        }
    }
}
