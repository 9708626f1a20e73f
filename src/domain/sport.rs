//! Sport, outcome side, and data provider enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Leagues the engine understands.
///
/// NCAAF/NCAAB are recognized but ship without built-in team alias tables;
/// aligning them requires a `[sports.*.teams]` configuration block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Nfl,
    Mlb,
    Nba,
    Nhl,
    Ncaaf,
    Ncaab,
}

impl Sport {
    /// All supported sports, in display order.
    pub const ALL: [Sport; 6] = [
        Sport::Nfl,
        Sport::Mlb,
        Sport::Nba,
        Sport::Nhl,
        Sport::Ncaaf,
        Sport::Ncaab,
    ];

    /// Lowercase key used in configuration and game IDs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Nfl => "nfl",
            Sport::Mlb => "mlb",
            Sport::Nba => "nba",
            Sport::Nhl => "nhl",
            Sport::Ncaaf => "ncaaf",
            Sport::Ncaab => "ncaab",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nfl" => Ok(Sport::Nfl),
            "mlb" => Ok(Sport::Mlb),
            "nba" => Ok(Sport::Nba),
            "nhl" => Ok(Sport::Nhl),
            "ncaaf" => Ok(Sport::Ncaaf),
            "ncaab" => Ok(Sport::Ncaab),
            other => Err(format!(
                "unknown sport '{other}' (expected one of: nfl, mlb, nba, nhl, ncaaf, ncaab)"
            )),
        }
    }
}

/// Which side of a two-way market a quote prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }

    /// The opposing side.
    pub fn opposite(&self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data sources quotes can originate from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    OddsApi,
    Kalshi,
    Polymarket,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OddsApi => "odds_api",
            Provider::Kalshi => "kalshi",
            Provider::Polymarket => "polymarket",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
