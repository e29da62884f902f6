//! Application configuration for internparse.
//!
//! User config lives at `~/.internparse/internparse.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{InternParseError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "internparse.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".internparse";

// ---------------------------------------------------------------------------
// Config structs (matching internparse.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Major matcher tuning.
    #[serde(default)]
    pub matcher: MatcherSection,

    /// Taxonomy source.
    #[serde(default)]
    pub taxonomy: TaxonomySection,

    /// Batch processing.
    #[serde(default)]
    pub batch: BatchSection,

    /// Output formatting.
    #[serde(default)]
    pub output: OutputSection,
}

/// `[matcher]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherSection {
    /// Largest edit distance the fuzzy fallback tier accepts.
    #[serde(default = "default_fuzzy_max_distance")]
    pub fuzzy_max_distance: usize,
}

impl Default for MatcherSection {
    fn default() -> Self {
        Self {
            fuzzy_max_distance: default_fuzzy_max_distance(),
        }
    }
}

fn default_fuzzy_max_distance() -> usize {
    1
}

/// `[taxonomy]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomySection {
    /// Path to a taxonomy TOML file replacing the built-in tables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// `[batch]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSection {
    /// Number of records processed concurrently.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for BatchSection {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}

fn default_concurrency() -> usize {
    4
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    /// Pretty-print JSON output.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self { pretty: true }
    }
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Runtime configs (merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime matcher configuration.
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Largest accepted edit distance for the fuzzy fallback.
    pub fuzzy_max_distance: usize,
    /// Optional override taxonomy file.
    pub taxonomy_path: Option<PathBuf>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for MatcherConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            fuzzy_max_distance: config.matcher.fuzzy_max_distance,
            taxonomy_path: config.taxonomy.path.as_ref().map(PathBuf::from),
        }
    }
}

/// Runtime batch configuration.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Records in flight at once (never below 1).
    pub concurrency: usize,
    /// Pretty-print each output record.
    pub pretty: bool,
}

impl From<&AppConfig> for BatchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            concurrency: config.batch.concurrency.max(1),
            pretty: config.output.pretty,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.internparse/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| InternParseError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.internparse/internparse.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| InternParseError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        InternParseError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| InternParseError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| InternParseError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| InternParseError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("fuzzy_max_distance = 1"));
        assert!(toml_str.contains("concurrency = 4"));
        assert!(!toml_str.contains("path"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let toml_str = r#"
[matcher]
fuzzy_max_distance = 2

[taxonomy]
path = "/etc/internparse/taxonomy.toml"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.matcher.fuzzy_max_distance, 2);
        assert_eq!(config.batch.concurrency, 4);
        assert!(config.output.pretty);

        let matcher = MatcherConfig::from(&config);
        assert_eq!(
            matcher.taxonomy_path.as_deref(),
            Some(Path::new("/etc/internparse/taxonomy.toml"))
        );
    }

    #[test]
    fn batch_concurrency_never_zero() {
        let mut config = AppConfig::default();
        config.batch.concurrency = 0;
        assert_eq!(BatchConfig::from(&config).concurrency, 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config_from(Path::new("/nonexistent/internparse.toml")).unwrap_err();
        assert!(matches!(err, InternParseError::Io { .. }));
    }
}
