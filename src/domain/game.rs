//! Normalized game records and provider data availability.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ids::{GameId, TeamId};
use super::quote::GameQuotes;
use super::sport::{Provider, Sport};

/// A normalized event with quotes from one or more providers.
///
/// Records are created at the provider boundary once a raw payload has been
/// parsed, merged by the aligner when another provider's record denotes the
/// same real-world event, and treated as immutable by the detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub game_id: GameId,
    pub sport: Sport,
    pub home_team: TeamId,
    pub away_team: TeamId,
    pub game_time: Option<DateTime<Utc>>,
    pub quotes: BTreeMap<Provider, GameQuotes>,
}

impl GameRecord {
    /// Build a record for a single provider's quotes, synthesizing the
    /// canonical game key.
    pub fn new(
        sport: Sport,
        home_team: TeamId,
        away_team: TeamId,
        game_time: Option<DateTime<Utc>>,
        provider: Provider,
        quotes: GameQuotes,
    ) -> Self {
        let game_id = GameId::synthesize(sport, &away_team, &home_team, game_time);
        let mut map = BTreeMap::new();
        map.insert(provider, quotes);
        Self {
            game_id,
            sport,
            home_team,
            away_team,
            game_time,
            quotes: map,
        }
    }

    /// Number of providers quoting this game.
    pub fn provider_count(&self) -> usize {
        self.quotes.len()
    }

    /// Away-at-home matchup string, e.g. `NYY @ BOS`.
    pub fn matchup(&self) -> String {
        format!("{} @ {}", self.away_team, self.home_team)
    }
}

/// Outcome of a provider fetch pass.
///
/// Fetch failures are surfaced explicitly instead of being papered over with
/// synthetic records; the caller decides whether an analysis pass can proceed
/// with the providers that did respond.
#[derive(Debug, Clone)]
pub enum DataAvailability {
    /// The provider responded; records may legitimately be empty.
    Available(Vec<GameRecord>),
    /// The provider could not serve data for this pass.
    Unavailable { provider: Provider, reason: String },
}

impl DataAvailability {
    /// The records, if the provider was available.
    pub fn records(&self) -> Option<&[GameRecord]> {
        match self {
            DataAvailability::Available(records) => Some(records),
            DataAvailability::Unavailable { .. } => None,
        }
    }

    /// Whether the provider served data.
    pub fn is_available(&self) -> bool {
        matches!(self, DataAvailability::Available(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quote::Quote;
    use crate::domain::sport::Side;

    #[test]
    fn new_record_synthesizes_game_id_and_registers_provider() {
        let quote = Quote::from_american(Provider::OddsApi, Side::Home, -140).unwrap();
        let record = GameRecord::new(
            Sport::Nfl,
            TeamId::from("BAL"),
            TeamId::from("HOU"),
            None,
            Provider::OddsApi,
            GameQuotes::home_only(quote),
        );

        assert_eq!(record.game_id.as_str(), "nfl-hou-bal-tbd");
        assert_eq!(record.provider_count(), 1);
        assert_eq!(record.matchup(), "HOU @ BAL");
    }

    #[test]
    fn availability_accessors() {
        let available = DataAvailability::Available(vec![]);
        assert!(available.is_available());
        assert_eq!(available.records().map(<[_]>::len), Some(0));

        let down = DataAvailability::Unavailable {
            provider: Provider::Kalshi,
            reason: "http 503".into(),
        };
        assert!(!down.is_available());
        assert!(down.records().is_none());
    }
}
