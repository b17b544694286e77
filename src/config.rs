//! Configuration module for Filterkit
//!
//! Handles loading configuration from:
//! - Default values
//! - A configuration file (explicit path, `FILTERKIT_CONFIG`, or `./filterkit.{toml,yml,yaml,json}`)
//! - Environment variables
//!
//! Besides the settings Filterkit itself uses, the file carries two free-form
//! trees that templates can read: `values` (through `config()`) and
//! `translations` (through `trans()`).

use crate::error::{Error, Result};
use crate::obfuscate::ObfuscatorOptions;
use crate::telemetry::LoggingConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

static ID_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("static regex")
});

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults of the `mailto` filter
    pub mailto: MailtoConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Values exposed to templates through `config()`
    pub values: serde_json::Value,

    /// Translation table used by `trans()`
    pub translations: serde_json::Value,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mailto: MailtoConfig::default(),
            logging: LoggingConfig::default(),
            values: serde_json::Value::Object(serde_json::Map::new()),
            translations: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

/// Defaults of the `mailto` filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailtoConfig {
    /// Render addresses as links unless the template says otherwise
    pub link: bool,

    /// Protect addresses unless the template says otherwise
    pub protect: bool,

    /// Text shown until the decoder script runs
    pub placeholder: String,

    /// Prefix of generated element ids
    pub id_prefix: String,
}

impl Default for MailtoConfig {
    fn default() -> Self {
        let options = ObfuscatorOptions::default();
        Self {
            link: true,
            protect: true,
            placeholder: options.placeholder,
            id_prefix: options.id_prefix,
        }
    }
}

impl MailtoConfig {
    /// Obfuscator presentation options.
    pub fn obfuscator_options(&self) -> ObfuscatorOptions {
        ObfuscatorOptions {
            placeholder: self.placeholder.clone(),
            id_prefix: self.id_prefix.clone(),
        }
    }
}

impl Config {
    /// Load configuration from the standard location or `config_path`.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = match Self::get_config_paths(config_path)
            .into_iter()
            .find(|p| p.exists())
        {
            Some(path) => {
                debug!(path = %path.display(), "loading configuration");
                Self::from_file(&path)?
            }
            None => {
                if let Some(path) = config_path {
                    return Err(Error::config_load(path, "file does not exist"));
                }
                Config::default()
            }
        };

        // Apply environment variable overrides
        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Get the list of configuration file paths to check
    fn get_config_paths(explicit_path: Option<&PathBuf>) -> Vec<PathBuf> {
        // Explicit path takes priority
        if let Some(path) = explicit_path {
            return vec![path.clone()];
        }

        let mut paths = Vec::new();

        if let Ok(env_config) = std::env::var("FILTERKIT_CONFIG") {
            paths.push(PathBuf::from(env_config));
        }

        for name in ["filterkit.toml", "filterkit.yml", "filterkit.yaml", "filterkit.json"] {
            paths.push(PathBuf::from(name));
        }

        paths
    }

    /// Parse a configuration file, picking the format from its extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config_load(path, e.to_string()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let parsed: std::result::Result<Config, String> = match extension {
            "yml" | "yaml" => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
            "json" => serde_json::from_str(&content).map_err(|e| e.to_string()),
            "toml" => toml::from_str(&content).map_err(|e| e.to_string()),
            _ => {
                // Try TOML first, then YAML
                toml::from_str(&content)
                    .or_else(|_| serde_yaml::from_str(&content))
                    .map_err(|e| e.to_string())
            }
        };

        parsed.map_err(|message| Error::config_load(path, message))
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // FILTERKIT_MAILTO_LINK
        if let Some(link) = env_flag("FILTERKIT_MAILTO_LINK") {
            self.mailto.link = link;
        }

        // FILTERKIT_MAILTO_PROTECT
        if let Some(protect) = env_flag("FILTERKIT_MAILTO_PROTECT") {
            self.mailto.protect = protect;
        }

        // FILTERKIT_MAILTO_PLACEHOLDER
        if let Ok(placeholder) = std::env::var("FILTERKIT_MAILTO_PLACEHOLDER") {
            self.mailto.placeholder = placeholder;
        }

        // FILTERKIT_LOG_LEVEL
        if let Ok(level) = std::env::var("FILTERKIT_LOG_LEVEL") {
            if let Ok(level) = level.parse() {
                self.logging.level = level;
            }
        }

        // FILTERKIT_LOG_FORMAT
        if let Ok(format) = std::env::var("FILTERKIT_LOG_FORMAT") {
            if let Ok(format) = format.parse() {
                self.logging.format = format;
            }
        }
    }

    /// Check values serde cannot check.
    pub fn validate(&self) -> Result<()> {
        if !ID_PREFIX.is_match(&self.mailto.id_prefix) {
            return Err(Error::Config(format!(
                "mailto.id_prefix '{}' must start with a letter and contain only letters, digits, '-' or '_'",
                self.mailto.id_prefix
            )));
        }
        if !self.values.is_object() {
            return Err(Error::Config("'values' must be a table".to_string()));
        }
        if !self.translations.is_object() {
            return Err(Error::Config("'translations' must be a table".to_string()));
        }
        Ok(())
    }
}

fn env_flag(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Looks up `key` in a nested JSON tree.
///
/// A key that exists verbatim at some level wins over splitting it on dots,
/// so `{"a.b": 1}` and `{"a": {"b": 1}}` both answer `a.b`.
pub fn lookup_dotted<'a>(tree: &'a serde_json::Value, key: &str) -> Option<&'a serde_json::Value> {
    let object = tree.as_object()?;
    if let Some(found) = object.get(key) {
        return Some(found);
    }
    let mut rest = key;
    while let Some((head, tail)) = split_at_dot(rest, key) {
        if let Some(child) = object.get(head) {
            if let Some(found) = lookup_dotted(child, tail) {
                return Some(found);
            }
        }
        rest = tail;
        if rest.is_empty() {
            break;
        }
    }
    None
}

// Splits `key` at the first dot after the prefix already consumed (`key.len() - rest.len()`).
fn split_at_dot<'k>(rest: &'k str, key: &'k str) -> Option<(&'k str, &'k str)> {
    let consumed = key.len() - rest.len();
    let pos = rest.find('.')?;
    Some((&key[..consumed + pos], &rest[pos + 1..]))
}
