//! Domain identifier types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::sport::Sport;

/// Canonical team identifier - newtype for type safety.
///
/// For recognized teams this is the canonical code from the sport's alias
/// table (e.g. `HOU`, `BAL`). Unrecognized surface forms survive as their
/// normalized raw string so the aligner's fuzzy path can still work with
/// them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(String);

impl TeamId {
    /// Create a new TeamId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the team ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TeamId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for TeamId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Stable synthetic game key - newtype for type safety.
///
/// Synthesized from the sport, canonical team codes, and the scheduled date
/// so the same real-world event keys identically regardless of which
/// provider's payload produced the record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    /// Create a new GameId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Synthesize the canonical key for an away-at-home matchup.
    pub fn synthesize(
        sport: Sport,
        away: &TeamId,
        home: &TeamId,
        game_time: Option<DateTime<Utc>>,
    ) -> Self {
        let date = match game_time {
            Some(t) => t.format("%Y%m%d").to_string(),
            None => "tbd".to_string(),
        };
        Self(format!(
            "{}-{}-{}-{}",
            sport,
            away.as_str().to_ascii_lowercase().replace(' ', "_"),
            home.as_str().to_ascii_lowercase().replace(' ', "_"),
            date
        ))
    }

    /// Get the game ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for GameId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for GameId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn game_id_includes_sport_teams_and_date() {
        let t = Utc.with_ymd_and_hms(2024, 9, 5, 23, 10, 0).unwrap();
        let id = GameId::synthesize(
            Sport::Mlb,
            &TeamId::from("NYY"),
            &TeamId::from("BOS"),
            Some(t),
        );
        assert_eq!(id.as_str(), "mlb-nyy-bos-20240905");
    }

    #[test]
    fn game_id_without_time_uses_placeholder() {
        let id = GameId::synthesize(Sport::Nfl, &TeamId::from("HOU"), &TeamId::from("BAL"), None);
        assert_eq!(id.as_str(), "nfl-hou-bal-tbd");
    }
}
