//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/hierarchy/hierarchy.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `HIERARCHY_*` prefix, `__` between sections

use std::path::{Path, PathBuf};

use config::{Config, Environment, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("environment override: {0}")]
    Environment(String),
}

/// Terminal output settings for the driver binary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Containers contribute a heading line ahead of their children
    pub show_containers: bool,
    /// Colored terminal output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_containers: true,
            color: true,
        }
    }
}

/// Raw output config; `None` means "not specified, inherit".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawOutputConfig {
    pub show_containers: Option<bool>,
    pub color: Option<bool>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub max_depth: Option<usize>,
    pub output: RawOutputConfig,
}

/// Unified configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Maximum tree height accepted by attach (default: unbounded)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    pub output: OutputConfig,
}

/// Get the XDG config directory.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "hierarchy").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("hierarchy.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn env_err(e: config::ConfigError) -> SettingsError {
    SettingsError::Environment(e.to_string())
}

/// Boolean override at `key`; unset is `None`, anything but a boolean is an error.
fn env_bool(config: &Config, key: &str) -> Result<Option<bool>, SettingsError> {
    match config.get_bool(key) {
        Ok(val) => Ok(Some(val)),
        Err(config::ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(env_err(e)),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            max_depth: overlay.max_depth.or(self.max_depth),
            output: OutputConfig {
                show_containers: overlay
                    .output
                    .show_containers
                    .unwrap_or(self.output.show_containers),
                color: overlay.output.color.unwrap_or(self.output.color),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_from(global_config_path().as_deref(), explicit, None)
    }

    /// Layered load with every source injectable.
    ///
    /// `env` replaces the process environment when given, which keeps tests
    /// independent of each other.
    #[instrument(level = "debug")]
    pub fn load_from(
        global: Option<&Path>,
        explicit: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, SettingsError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, skipped when absent
        if let Some(global_path) = global {
            if global_path.exists() {
                debug!(path = %global_path.display(), "loading global config");
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Explicit config, must exist
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(SettingsError::NotFound(path.to_path_buf()));
            }
            debug!(path = %path.display(), "loading explicit config");
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables
        Self::apply_env_overrides(current, env)
    }

    /// Apply HIERARCHY_* environment variables as explicit overrides.
    fn apply_env_overrides(
        mut settings: Self,
        env: Option<Map<String, String>>,
    ) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("HIERARCHY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .map_err(env_err)?;

        if let Ok(val) = config.get_string("max_depth") {
            settings.max_depth = match val.as_str() {
                "" | "none" => None,
                _ => Some(
                    val.parse()
                        .map_err(|_| SettingsError::Environment(format!("max_depth: {}", val)))?,
                ),
            };
        }
        if let Some(val) = env_bool(&config, "output.show_containers")? {
            settings.output.show_containers = val;
        }
        if let Some(val) = env_bool(&config, "output.color")? {
            settings.output.color = val;
        }

        Ok(settings)
    }

    /// Settings rendered as TOML, as shown by `config show`.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::Parse {
            path: PathBuf::from("<settings>"),
            message: e.to_string(),
        })
    }
}
