//! Widget configuration.
//!
//! Display strings and layout defaults for the components, loadable from a
//! TOML file. Every field has a default so a partial file is valid:
//!
//! ```toml
//! [select]
//! placeholder = "Pick a life-line..."
//! max_visible = 6
//!
//! [table]
//! sticky_header = true
//! header_offset = 1
//! max_body_height = 20
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`WidgetConfig`].
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is out of range.
    #[error("Invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Top-level widget configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Searchable select settings.
    pub select: SelectConfig,
    /// Data table settings.
    pub table: TableConfig,
}

/// Searchable select settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    /// Placeholder shown when no value is selected.
    pub placeholder: String,
    /// Maximum dropdown rows before the list scrolls.
    pub max_visible: usize,
    /// Line shown when the filtered list is empty.
    pub no_results_text: String,
    /// Line shown while a remote search is in flight.
    pub searching_text: String,
    /// Delimiter joining the fields of a composite option label.
    pub label_delimiter: String,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            placeholder: "Select...".to_string(),
            max_visible: 8,
            no_results_text: "No results".to_string(),
            searching_text: "Searching...".to_string(),
            label_delimiter: " · ".to_string(),
        }
    }
}

/// Data table settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Message shown when there are no rows.
    pub empty_message: String,
    /// Label next to the loading spinner.
    pub loading_message: String,
    /// Text drawn for null or missing values.
    pub null_placeholder: String,
    /// Text of the badge drawn in place of a faulted cell.
    pub error_badge: String,
    /// Pin the header above a scrolling body.
    pub sticky_header: bool,
    /// Rows between the top of the table area and the pinned header.
    pub header_offset: u16,
    /// Upper bound on body rows; `None` fills the available height.
    pub max_body_height: Option<u16>,
    /// Cap on the natural width of columns without a width hint.
    pub natural_width_cap: u16,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            empty_message: "No records found".to_string(),
            loading_message: "Loading...".to_string(),
            null_placeholder: "-".to_string(),
            error_badge: "error".to_string(),
            sticky_header: true,
            header_offset: 0,
            max_body_height: None,
            natural_width_cap: 40,
        }
    }
}

impl WidgetConfig {
    /// Load and validate configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded widget config");
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, falling back to defaults if it is absent.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                tracing::warn!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.select.max_visible == 0 {
            return Err(ConfigError::Invalid {
                field: "select.max_visible",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.select.label_delimiter.is_empty() {
            return Err(ConfigError::Invalid {
                field: "select.label_delimiter",
                reason: "must not be empty".to_string(),
            });
        }
        if self.table.max_body_height == Some(0) {
            return Err(ConfigError::Invalid {
                field: "table.max_body_height",
                reason: "must be at least 1 when set".to_string(),
            });
        }
        if self.table.natural_width_cap < 3 {
            return Err(ConfigError::Invalid {
                field: "table.natural_width_cap",
                reason: "must be at least 3".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = WidgetConfig::default();
        assert_eq!(config.select.max_visible, 8);
        assert_eq!(config.table.null_placeholder, "-");
        assert!(config.table.sticky_header);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = WidgetConfig::from_toml_str(
            r#"
            [table]
            header_offset = 2
            max_body_height = 12
            "#,
        )
        .unwrap();

        assert_eq!(config.table.header_offset, 2);
        assert_eq!(config.table.max_body_height, Some(12));
        assert_eq!(config.table.empty_message, "No records found");
        assert_eq!(config.select, SelectConfig::default());
    }

    #[test]
    fn test_rejects_zero_max_visible() {
        let err = WidgetConfig::from_toml_str("[select]\nmax_visible = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "select.max_visible",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_body_height() {
        let err = WidgetConfig::from_toml_str("[table]\nmax_body_height = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_parse_error() {
        let err = WidgetConfig::from_toml_str("[select\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[select]\nplaceholder = \"Pick a client\"").unwrap();

        let config = WidgetConfig::load(file.path()).unwrap();
        assert_eq!(config.select.placeholder, "Pick a client");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = WidgetConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_or_default_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("widgets.toml");
        let config = WidgetConfig::load_or_default(Some(&missing)).unwrap();
        assert_eq!(config, WidgetConfig::default());
        assert_eq!(WidgetConfig::load_or_default(None).unwrap(), WidgetConfig::default());
    }
}
