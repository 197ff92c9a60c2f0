//! Tool configuration module.
//!
//! Handles loading and validating `sitespec.toml`. Configuration is a single
//! optional file in the working directory; user values override stock
//! defaults, and unknown keys are rejected to catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! store_path = "sitespec-pages.json"   # Persisted page data
//! templates_path = "templates.json"    # Template catalog
//! export_dir = "."                     # Where export artifacts are written
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file within the working directory.
pub const CONFIG_FILENAME: &str = "sitespec.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `sitespec.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Path of the persisted page-store blob.
    pub store_path: String,
    /// Path of the template catalog JSON document.
    pub templates_path: String,
    /// Directory export artifacts are written into.
    pub export_dir: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            store_path: "sitespec-pages.json".to_string(),
            templates_path: "templates.json".to_string(),
            export_dir: ".".to_string(),
        }
    }
}

impl ToolConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_path.is_empty() {
            return Err(ConfigError::Validation("store_path must not be empty".into()));
        }
        if self.templates_path.is_empty() {
            return Err(ConfigError::Validation(
                "templates_path must not be empty".into(),
            ));
        }
        if self.export_dir.is_empty() {
            return Err(ConfigError::Validation("export_dir must not be empty".into()));
        }
        Ok(())
    }
}

/// Load config from `sitespec.toml` in the given directory.
///
/// Returns stock defaults when the file doesn't exist; rejects unknown keys
/// and validates the result otherwise.
pub fn load_config(dir: &Path) -> Result<ToolConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(ToolConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    let config: ToolConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `sitespec.toml` with all keys documented.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# sitespec Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Path of the persisted page data (one JSON document for the whole tree).
store_path = "sitespec-pages.json"

# Path of the template catalog. Each entry maps a template key to
# { name, description, pages: [...] }.
templates_path = "templates.json"

# Directory export artifacts are written into.
export_dir = "."
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.store_path, "sitespec-pages.json");
        assert_eq!(config.templates_path, "templates.json");
        assert_eq!(config.export_dir, ".");
    }

    #[test]
    fn partial_config_overrides_one_key() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r#"export_dir = "out""#,
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.export_dir, "out");
        assert_eq!(config.store_path, "sitespec-pages.json");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r#"store_pth = "typo.json""#,
        )
        .unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn empty_paths_fail_validation() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), r#"store_path = """#).unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "not [ valid").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let parsed: ToolConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = ToolConfig::default();
        assert_eq!(parsed.store_path, defaults.store_path);
        assert_eq!(parsed.templates_path, defaults.templates_path);
        assert_eq!(parsed.export_dir, defaults.export_dir);
    }
}
