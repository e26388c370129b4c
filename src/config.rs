//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`HCUBE_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use hypercube_core::SweepTiming;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Animation timing
    #[serde(default)]
    pub timing: SweepTiming,
    /// Simulated bomb used by the demo driver
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`HCUBE_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // User config is optional
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // HCUBE_SIMULATION__SERIAL=TEST12 -> simulation.serial = "TEST12"
        figment = figment.merge(Env::prefixed("HCUBE_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Simulated bomb configuration for the demo driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Device serial code (alphanumeric, at least 6 characters)
    pub serial: String,
    /// How many other solvable modules the bomb carries
    pub other_modules: usize,
    /// Seconds between simulated external solves
    pub solve_interval: f32,
    /// Fixed rng seed; omit for an entropy seed
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            serial: "AB3XY9".to_string(),
            other_modules: 3,
            solve_interval: 6.0,
            seed: None,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.timing.sweep, 2.0);
        assert_eq!(config.timing.pre_sweep_pause, 0.75);
        assert_eq!(config.simulation.serial, "AB3XY9");
        assert_eq!(config.simulation.seed, None);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("serial"));
        assert!(toml.contains("sweep"));
    }

    #[test]
    fn test_missing_config_dir_falls_back_to_defaults() {
        let config = AppConfig::load_from("no/such/dir").unwrap();
        assert_eq!(config.timing.color_fade, 1.0);
    }
}
