//! YAML configuration file
//!
//! Every field is optional; missing fields take their defaults. Command-line
//! flags override file values.
//!
//! ```yaml
//! params:
//!   drift: 3.0
//!   volatility: 17.0
//!   horizon_months: 12
//! sampler: box-muller
//! seed: 42
//! debounce_ms: 100
//! start_month: 2025-01
//! show_table: true
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use jiff::civil::Date;
use retsim_core::SamplerMethod;
use retsim_core::SimulationParameters;
use retsim_core::scheduler::DEFAULT_DEBOUNCE;
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(String),
    Serialize(String),
    InvalidStartMonth(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {e}"),
            ConfigError::Parse(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::Serialize(msg) => write!(f, "Serialization error: {msg}"),
            ConfigError::InvalidStartMonth(value) => {
                write!(f, "invalid start month '{value}' (expected YYYY-MM)")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE.as_millis() as u64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetsimConfig {
    pub params: SimulationParameters,
    pub sampler: SamplerMethod,
    /// Fixed seed for reproducible runs; OS entropy when unset
    pub seed: Option<u64>,
    pub debounce_ms: u64,
    /// First month of the table, `YYYY-MM`
    pub start_month: Option<String>,
    pub show_table: bool,
}

impl Default for RetsimConfig {
    fn default() -> Self {
        Self {
            params: SimulationParameters::default(),
            sampler: SamplerMethod::default(),
            seed: None,
            debounce_ms: default_debounce_ms(),
            start_month: None,
            show_table: false,
        }
    }
}

impl RetsimConfig {
    /// `{config_dir}/retsim/config.yaml`, if the platform has a config dir
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("retsim").join("config.yaml"))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_saphyr::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_saphyr::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load an explicitly requested config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load the config at the default path, falling back to defaults if it
    /// is missing or unreadable.
    #[must_use]
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "Loaded config");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to load config, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Write the config atomically (temp file, then rename)
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let yaml = self.to_yaml()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, yaml)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Parsed `start_month`, as the first day of that month
    pub fn start_date(&self) -> Result<Option<Date>, ConfigError> {
        self.start_month.as_deref().map(parse_month).transpose()
    }
}

/// Parse `YYYY-MM` into the first day of the month
pub fn parse_month(value: &str) -> Result<Date, ConfigError> {
    let invalid = || ConfigError::InvalidStartMonth(value.to_string());
    let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
    let year: i16 = year.parse().map_err(|_| invalid())?;
    let month: i8 = month.parse().map_err(|_| invalid())?;
    Date::new(year, month, 1).map_err(|_| invalid())
}
