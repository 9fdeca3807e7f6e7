//! CLI configuration

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use dms_core::MapHandlerBuilder;
use dms_profiles::{CurrencyRoomMapper, ExchangeRates, GoogleMappingProfile};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file '{}'", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Which Google room mapping to register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    /// Copy room fields unchanged
    Standard,
    /// Convert prices between EUR and USD
    Enhanced,
}

/// Settings read from `--config`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Unset means each command picks its own profile
    pub profile: Option<ProfileKind>,
    /// Rates for the enhanced profile
    pub exchange_rates: ExchangeRates,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            profile: None,
            exchange_rates: ExchangeRates::default(),
        }
    }
}

impl CliConfig {
    /// Load from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Configured profile, or `fallback` when the file does not name one
    pub fn profile_or(&self, fallback: ProfileKind) -> ProfileKind {
        self.profile.unwrap_or(fallback)
    }

    /// Builder with `profile` applied
    pub fn handler_builder(&self, profile: ProfileKind) -> dms_core::Result<MapHandlerBuilder> {
        let builder = MapHandlerBuilder::new();
        match profile {
            ProfileKind::Standard => builder.with_profile(&GoogleMappingProfile::new()),
            ProfileKind::Enhanced => builder.with_profile(&GoogleMappingProfile::with_room_mapper(
                CurrencyRoomMapper::new(self.exchange_rates.clone()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.profile, None);
        assert_eq!(config.profile_or(ProfileKind::Enhanced), ProfileKind::Enhanced);
        assert_eq!(
            config.exchange_rates.rate("EUR", "USD"),
            Some(Decimal::new(108, 2))
        );
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: CliConfig = serde_yaml::from_str("profile: enhanced\n").unwrap();
        assert_eq!(config.profile, Some(ProfileKind::Enhanced));
        assert_eq!(config.profile_or(ProfileKind::Standard), ProfileKind::Enhanced);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.exchange_rates, ExchangeRates::default());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = CliConfig::load(Path::new("/nonexistent/dms.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_enhanced_builder_registers_reservation_aliases() {
        let builder = CliConfig::default()
            .handler_builder(ProfileKind::Enhanced)
            .unwrap();
        assert!(builder.resolver().contains("Model.Reservation"));
        assert!(builder.resolver().contains("Google.Reservation"));
        assert_eq!(builder.registry().len(), 2);
    }
}
