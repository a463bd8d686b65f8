//! Application configuration read from a TOML file.
//!
//! Every key is optional. A missing file gives the defaults.
//!
//! ```toml
//! [logging]
//! level = "debug"
//! file = "quote-builder.log"
//!
//! [export]
//! typst_bin = "typst"
//! output_dir = "preventivi"
//!
//! [mail]
//! enabled = true
//! host = "smtp.example.it"
//! port = 587
//! user = "preventivi@example.it"
//! password = "secret"
//! from_name = "Belotti Macchine Agricole"
//! from_email = "preventivi@example.it"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "quote-builder.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub export: ExportConfig,
    pub mail: MailConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level or full filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// Append log records to this file as well as stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Typst compiler executable.
    pub typst_bin: String,
    /// Directory the exported PDFs are written to.
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            typst_bin: "typst".to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub from_name: String,
    pub from_email: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: String::new(),
            port: 587,
            user: String::new(),
            password: String::new(),
            from_name: "Belotti Macchine Agricole".to_string(),
            from_email: String::new(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(
        input: &str,
        origin: &str,
    ) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    /// Loads `path`. With `required == false` a missing file yields defaults.
    pub fn load(
        path: &Path,
        required: bool,
    ) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text, &path.display().to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml_str("", "test").unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.export.typst_bin, "typst");
        assert_eq!(config.mail.port, 587);
        assert!(!config.mail.enabled);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [export]
            output_dir = "preventivi"

            [mail]
            enabled = true
            host = "smtp.example.it"
            "#,
            "test",
        )
        .unwrap();

        assert_eq!(config.export.output_dir, PathBuf::from("preventivi"));
        assert_eq!(config.export.typst_bin, "typst");
        assert!(config.mail.enabled);
        assert_eq!(config.mail.host, "smtp.example.it");
        assert_eq!(config.mail.port, 587);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn logging_section_sets_level_and_file() {
        let config = AppConfig::from_toml_str(
            "[logging]\nlevel = \"debug\"\nfile = \"quote-builder.log\"\n",
            "test",
        )
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("quote-builder.log")));
        assert_eq!(AppConfig::default().logging.file, None);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = AppConfig::from_toml_str("[mail\nenabled = ", "broken.toml");

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn missing_optional_file_gives_defaults() {
        let config = AppConfig::load(Path::new("/no/such/quote-builder.toml"), false).unwrap();

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = AppConfig::load(Path::new("/no/such/quote-builder.toml"), true);

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
