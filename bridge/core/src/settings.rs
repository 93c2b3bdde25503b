//! TOML Settings File Support
//!
//! Centralized settings loading for the bridge and its developer rig,
//! supporting a TOML file at `~/.config/easel/bridge.toml`.
//!
//! These are deployment settings for the bridge itself. They have nothing to
//! do with the synchronized [`ExtensionConfig`](crate::config::ExtensionConfig),
//! which lives on the host.
//!
//! # Settings Priority
//!
//! Values are loaded with the following priority (highest first):
//! 1. CLI arguments (via [`SettingsOverrides`])
//! 2. Environment variables
//! 3. TOML settings file
//! 4. Default values
//!
//! # Example Settings
//!
//! ```toml
//! [extension]
//! variant = "viewer"
//!
//! [log]
//! local_prefix = "EASEL"
//!
//! [rig]
//! store_path = "/tmp/easel/broadcaster.json"
//! ```
//!
//! # Environment Variables
//!
//! - `EASEL_VARIANT`: `config` or `viewer`
//! - `EASEL_LOG_PREFIX`: prefix for local UI log lines
//! - `EASEL_STORE_PATH`: file backing the rig's broadcaster record

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bridge::ExtensionVariant;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read the settings file
    #[error("Failed to read settings file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML settings: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid settings value
    #[error("Invalid settings: {0}")]
    ValidationError(String),
}

// =============================================================================
// Source Tracking
// =============================================================================

/// Tracks where the effective settings came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML settings file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "settings file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Structures
// =============================================================================

/// `[extension]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionToml {
    /// Deployment variant name
    pub variant: Option<String>,
}

/// `[log]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogToml {
    /// Prefix for local UI log lines
    pub local_prefix: Option<String>,
}

/// `[rig]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RigToml {
    /// File backing the simulated broadcaster record
    pub store_path: Option<PathBuf>,
}

/// Top-level TOML settings structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeToml {
    /// Extension section
    pub extension: ExtensionToml,
    /// Log section
    pub log: LogToml,
    /// Rig section
    pub rig: RigToml,
}

// =============================================================================
// Effective Settings
// =============================================================================

/// Effective bridge settings after all sources are applied
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BridgeSettings {
    /// Which UI the bridge serves
    pub variant: ExtensionVariant,

    /// Explicit local log prefix; `None` uses the variant's default
    pub log_prefix: Option<String>,

    /// File backing the rig's broadcaster record
    pub store_path: Option<PathBuf>,

    /// Path to the settings file that was loaded (if any)
    pub settings_file_path: Option<PathBuf>,

    source: ConfigSource,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            variant: ExtensionVariant::default(),
            log_prefix: None,
            store_path: default_store_path(),
            settings_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl BridgeSettings {
    /// Create settings with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix for local UI log lines
    #[must_use]
    pub fn log_prefix(&self) -> &str {
        self.log_prefix
            .as_deref()
            .unwrap_or_else(|| self.variant.default_log_prefix())
    }

    /// Highest-priority source that contributed a value
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Get the default settings file path
///
/// Returns `$XDG_CONFIG_HOME/easel/bridge.toml` or `~/.config/easel/bridge.toml`.
#[must_use]
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("easel").join("bridge.toml"))
}

/// Default location of the rig's broadcaster record
fn default_store_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("easel").join("broadcaster.json"))
}

/// Load settings from all sources with proper priority
///
/// # Errors
///
/// Returns an error if the settings file exists but cannot be parsed, or a
/// variant name is not recognised. A missing file is not an error.
pub fn load_settings() -> Result<BridgeSettings, SettingsError> {
    load_settings_from_path(default_settings_path())
}

/// Load settings from a specific path, then apply environment overrides
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or holds an
/// invalid value.
pub fn load_settings_from_path(path: Option<PathBuf>) -> Result<BridgeSettings, SettingsError> {
    load_settings_with_env(path, |key| std::env::var(key).ok())
}

fn load_settings_with_env(
    path: Option<PathBuf>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<BridgeSettings, SettingsError> {
    let mut settings = BridgeSettings::default();

    if let Some(ref settings_path) = path {
        if settings_path.exists() {
            let toml_content =
                std::fs::read_to_string(settings_path).map_err(|e| SettingsError::ReadError {
                    path: settings_path.clone(),
                    source: e,
                })?;

            let toml_settings: BridgeToml = toml::from_str(&toml_content)?;
            apply_toml_settings(&mut settings, &toml_settings)?;
            settings.settings_file_path = Some(settings_path.clone());
            settings.source = ConfigSource::File;

            tracing::info!(
                path = %settings_path.display(),
                "Loaded settings from file"
            );
        } else {
            tracing::debug!(
                path = %settings_path.display(),
                "Settings file not found, using defaults"
            );
        }
    }

    apply_env_settings(&mut settings, env)?;

    Ok(settings)
}

fn parse_variant(value: &str) -> Result<ExtensionVariant, SettingsError> {
    value.parse().map_err(SettingsError::ValidationError)
}

fn apply_toml_settings(
    settings: &mut BridgeSettings,
    toml: &BridgeToml,
) -> Result<(), SettingsError> {
    if let Some(ref variant) = toml.extension.variant {
        settings.variant = parse_variant(variant)?;
    }
    if toml.log.local_prefix.is_some() {
        settings.log_prefix = toml.log.local_prefix.clone();
    }
    if toml.rig.store_path.is_some() {
        settings.store_path = toml.rig.store_path.clone();
    }
    Ok(())
}

fn apply_env_settings(
    settings: &mut BridgeSettings,
    env: impl Fn(&str) -> Option<String>,
) -> Result<(), SettingsError> {
    if let Some(variant) = env("EASEL_VARIANT") {
        settings.variant = parse_variant(&variant)?;
        settings.source = ConfigSource::Env;
    }
    if let Some(prefix) = env("EASEL_LOG_PREFIX") {
        settings.log_prefix = Some(prefix);
        settings.source = ConfigSource::Env;
    }
    if let Some(path) = env("EASEL_STORE_PATH") {
        if !path.is_empty() {
            settings.store_path = Some(PathBuf::from(path));
            settings.source = ConfigSource::Env;
        }
    }
    Ok(())
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI overrides to settings
///
/// Use this after [`load_settings`] to apply command-line argument overrides.
#[derive(Clone, Debug, Default)]
pub struct SettingsOverrides {
    /// Variant override
    pub variant: Option<ExtensionVariant>,

    /// Log prefix override
    pub log_prefix: Option<String>,

    /// Store path override
    pub store_path: Option<PathBuf>,
}

impl SettingsOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set variant override
    #[must_use]
    pub fn with_variant(mut self, variant: ExtensionVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Set log prefix override
    #[must_use]
    pub fn with_log_prefix(mut self, prefix: String) -> Self {
        self.log_prefix = Some(prefix);
        self
    }

    /// Set store path override
    #[must_use]
    pub fn with_store_path(mut self, path: PathBuf) -> Self {
        self.store_path = Some(path);
        self
    }

    /// Apply overrides to loaded settings
    pub fn apply(&self, settings: &mut BridgeSettings) {
        if self.variant.is_some() || self.log_prefix.is_some() || self.store_path.is_some() {
            settings.source = ConfigSource::Cli;
        }

        if let Some(variant) = self.variant {
            settings.variant = variant;
        }
        if let Some(ref prefix) = self.log_prefix {
            settings.log_prefix = Some(prefix.clone());
        }
        if let Some(ref path) = self.store_path {
            settings.store_path = Some(path.clone());
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
