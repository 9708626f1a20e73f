//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file. Provider API keys are never
//! stored in the file — each provider section names the environment variable
//! to read (loaded from `.env` via `dotenvy` in the binary).

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::domain::{Sport, SportConfig};
use crate::error::{ConfigError, Result};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Per-sport threshold and alias overrides. Sports without an entry use
    /// the shipped [`SportConfig::tuned_for`] defaults.
    #[serde(default)]
    pub sports: BTreeMap<Sport, SportConfig>,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format: `pretty` or `json`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub odds_api: OddsApiConfig,
    #[serde(default)]
    pub kalshi: KalshiConfig,
    #[serde(default)]
    pub polymarket: PolymarketConfig,
}

/// The Odds API (sportsbook aggregator; Pinnacle is the sharp anchor).
#[derive(Debug, Clone, Deserialize)]
pub struct OddsApiConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_odds_api_url")]
    pub base_url: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_odds_api_key_env")]
    pub api_key_env: String,
    /// Bookmaker whose prices anchor the comparison.
    #[serde(default = "default_bookmaker")]
    pub bookmaker: String,
}

fn default_odds_api_url() -> String {
    "https://api.the-odds-api.com".to_string()
}

fn default_odds_api_key_env() -> String {
    "ODDS_API_KEY".to_string()
}

fn default_bookmaker() -> String {
    "pinnacle".to_string()
}

impl Default for OddsApiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_odds_api_url(),
            api_key_env: default_odds_api_key_env(),
            bookmaker: default_bookmaker(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct KalshiConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_kalshi_url")]
    pub base_url: String,
}

fn default_kalshi_url() -> String {
    "https://api.elections.kalshi.com/trade-api/v2".to_string()
}

impl Default for KalshiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_kalshi_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PolymarketConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_polymarket_url")]
    pub base_url: String,
    /// Fee haircut applied to raw outcome prices.
    #[serde(default)]
    pub fee: Decimal,
}

fn default_polymarket_url() -> String {
    "https://gamma-api.polymarket.com".to_string()
}

impl Default for PolymarketConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_polymarket_url(),
            fee: Decimal::ZERO,
        }
    }
}

const fn default_true() -> bool {
    true
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file, falling back to defaults when it is absent.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Effective per-sport configuration: the configured entry, or the
    /// shipped defaults.
    pub fn sport(&self, sport: Sport) -> SportConfig {
        self.sports
            .get(&sport)
            .cloned()
            .unwrap_or_else(|| SportConfig::tuned_for(sport))
    }

    fn validate(&self) -> Result<()> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected 'pretty' or 'json', got '{}'", self.logging.format),
            }
            .into());
        }

        let fee = self.providers.polymarket.fee;
        if fee < Decimal::ZERO || fee >= Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "providers.polymarket.fee",
                reason: format!("fee must be in [0, 1), got {fee}"),
            }
            .into());
        }

        for (sport, sport_config) in &self.sports {
            Self::validate_sport(*sport, sport_config)?;
        }
        Ok(())
    }

    fn validate_sport(sport: Sport, config: &SportConfig) -> Result<()> {
        let unit = |value: f64| (0.0..=1.0).contains(&value);
        if !unit(config.match_confidence_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "match_confidence_threshold",
                reason: format!(
                    "[sports.{sport}] must be in [0, 1], got {}",
                    config.match_confidence_threshold
                ),
            }
            .into());
        }
        if !unit(config.fuzzy_match_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "fuzzy_match_threshold",
                reason: format!(
                    "[sports.{sport}] must be in [0, 1], got {}",
                    config.fuzzy_match_threshold
                ),
            }
            .into());
        }
        if config.time_threshold_hours <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "time_threshold_hours",
                reason: format!(
                    "[sports.{sport}] must be positive, got {}",
                    config.time_threshold_hours
                ),
            }
            .into());
        }
        if config.min_edge_threshold < Decimal::ZERO || config.min_edge_threshold >= Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "min_edge_threshold",
                reason: format!(
                    "[sports.{sport}] must be in [0, 1), got {}",
                    config.min_edge_threshold
                ),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize the global tracing subscriber from the logging section.
    ///
    /// `RUST_LOG` takes precedence over the configured level.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));
        let builder = tracing_subscriber::fmt().with_env_filter(filter);
        if self.logging.format == "json" {
            builder.json().init();
        } else {
            builder.init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn default_config_validates() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(config.providers.odds_api.enabled);
        assert_eq!(config.providers.odds_api.bookmaker, "pinnacle");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn unconfigured_sport_falls_back_to_tuned_defaults() {
        let config = Config::default();
        let mlb = config.sport(Sport::Mlb);
        assert_eq!(mlb.min_edge_threshold, dec!(0.02));
        assert!((mlb.match_confidence_threshold - 0.55).abs() < 1e-9);
    }

    #[test]
    fn toml_overrides_sport_thresholds() {
        let config: Config = toml::from_str(
            r#"
[sports.nfl]
min_edge_threshold = 0.05

[sports.nfl.teams]
XXX = ["Expansion Team"]
"#,
        )
        .unwrap();
        let nfl = config.sport(Sport::Nfl);
        assert_eq!(nfl.min_edge_threshold, dec!(0.05));
        assert_eq!(nfl.teams["XXX"], vec!["Expansion Team".to_string()]);
    }

    #[test]
    fn out_of_range_confidence_is_rejected() {
        let config: Config = toml::from_str(
            r#"
[sports.nba]
match_confidence_threshold = 1.5
"#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err
            .to_string()
            .contains("match_confidence_threshold"));
    }
}
