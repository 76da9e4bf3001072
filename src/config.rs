//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table and the user's file is merged on top of it, so
//! a config file only needs the keys it overrides.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base_dir = "base"     # Base template directory
//! sites_dir = "sites"   # Export root; each course lands in <sites_dir>/<subject><number>
//!
//! [templates]
//! strict = false        # Reject templates with HTML parse errors
//!
//! [output]
//! indent = 2            # Spaces per nesting level in written pages (1-8)
//! ```
//!
//! ## Partial Configuration
//!
//! ```toml
//! # Only move the export root
//! sites_dir = "/var/www/courses"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Exporter configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory holding the base templates and their `css/` and `images/`.
    pub base_dir: PathBuf,
    /// Root under which course directories are written.
    pub sites_dir: PathBuf,
    pub templates: TemplatesConfig,
    pub output: OutputConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("base"),
            sites_dir: PathBuf::from("sites"),
            templates: TemplatesConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=8).contains(&self.output.indent) {
            return Err(ConfigError::Validation(
                "output.indent must be 1-8".into(),
            ));
        }
        if self.base_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "base_dir must not be empty".into(),
            ));
        }
        if self.sites_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "sites_dir must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplatesConfig {
    /// Treat any recovered HTML parse error as a malformed template.
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Spaces per nesting level when serializing pages.
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// course-site has one overlay: a single `config.toml` on top of the stock
/// defaults, with no per-directory cascade. The merge still happens at the
/// `toml::Value` level so defaults and user values reach `SiteConfig` through
/// one deserialize-and-validate path.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist, `Err` if it exists but
/// contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the file at `path`, falling back to stock defaults when
/// it does not exist.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    if overlay.is_none() {
        log::debug!("no config at {}, using defaults", path.display());
    }
    resolve_config(stock_defaults_value()?, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Course Site Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Directory holding the base templates (index.html, syllabus.html,
# schedule.html, hws.html, projects.html) and their css/ and images/
# directories. Generate one with `course-site gen-templates base`.
base_dir = "base"

# Export root. Each course is written to <sites_dir>/<subject><number>,
# e.g. sites/CSE219. The css/ and images/ directories are copied from
# base_dir only when the course directory does not exist yet.
sites_dir = "sites"

# ---------------------------------------------------------------------------
# Template loading
# ---------------------------------------------------------------------------
[templates]
# When true, a base template with any HTML parse error is rejected and its
# page is skipped. When false, the parser's recovered tree is used.
strict = false

# ---------------------------------------------------------------------------
# Page output
# ---------------------------------------------------------------------------
[output]
# Spaces per nesting level in the written HTML (1-8).
indent = 2
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.base_dir, PathBuf::from("base"));
        assert_eq!(config.sites_dir, PathBuf::from("sites"));
        assert!(!config.templates.strict);
        assert_eq!(config.output.indent, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_partial_config() {
        let config: SiteConfig = toml::from_str(
            r#"
sites_dir = "/srv/www"

[output]
indent = 4
"#,
        )
        .unwrap();
        assert_eq!(config.sites_dir, PathBuf::from("/srv/www"));
        assert_eq!(config.output.indent, 4);
        // Defaults preserved
        assert_eq!(config.base_dir, PathBuf::from("base"));
        assert!(!config.templates.strict);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("site_dir = \"x\"");
        assert!(result.is_err());
        let result: Result<SiteConfig, _> = toml::from_str("[templates]\nstrictness = true");
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_indent_out_of_range() {
        let mut config = SiteConfig::default();
        config.output.indent = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
        config.output.indent = 9;
        assert!(config.validate().is_err());
        config.output.indent = 8;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_dirs() {
        let mut config = SiteConfig::default();
        config.sites_dir = PathBuf::new();
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // Merging
    // =========================================================================

    #[test]
    fn merge_keeps_base_keys_and_overrides_nested() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str("[templates]\nstrict = true").unwrap();
        let config: SiteConfig = merge_toml(base, overlay).try_into().unwrap();
        assert!(config.templates.strict);
        assert_eq!(config.output.indent, 2);
        assert_eq!(config.base_dir, PathBuf::from("base"));
    }

    #[test]
    fn resolve_config_validates() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str("[output]\nindent = 12").unwrap();
        assert!(matches!(
            resolve_config(base, Some(overlay)),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn scalar_overlay_replaces_table_and_is_rejected() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str("templates = true").unwrap();
        assert!(matches!(
            resolve_config(base, Some(overlay)),
            Err(ConfigError::Toml(_))
        ));
    }

    // =========================================================================
    // load_config
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "base_dir = \"templates\"\n[templates]\nstrict = true\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.base_dir, PathBuf::from("templates"));
        assert!(config.templates.strict);
        assert_eq!(config.sites_dir, PathBuf::from("sites"));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "base_dir = ").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn stock_config_toml_round_trips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }
}
