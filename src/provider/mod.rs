//! Provider fetch clients.
//!
//! Each data source gets a thin REST client that fetches raw provider
//! payloads and converts them into canonical [`GameRecord`]s at this
//! boundary. Provider-specific shapes (cents prices, stringified outcome
//! arrays, title-encoded matchups) never leak past this module.

mod kalshi;
mod odds_api;
mod polymarket;

pub use kalshi::KalshiClient;
pub use odds_api::OddsApiClient;
pub use polymarket::PolymarketClient;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::domain::{GameRecord, Provider, Sport};
use crate::error::ProviderError;

/// Inclusive scheduling window an analysis pass covers.
#[derive(Debug, Clone, Copy)]
pub struct TimeWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeWindow {
    /// A window from now through `days` days out.
    pub fn next_days(days: i64) -> Self {
        let from = Utc::now();
        Self {
            from,
            to: from + Duration::days(days),
        }
    }

    /// Whether a (possibly unknown) start time falls inside the window.
    /// Records without a timestamp are kept; the aligner scores them down.
    pub fn admits(&self, game_time: Option<DateTime<Utc>>) -> bool {
        game_time.map_or(true, |t| self.from <= t && t <= self.to)
    }
}

/// A data source that can list upcoming games with prices.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Which provider this client fetches from.
    fn provider(&self) -> Provider;

    /// Fetch and normalize games for a sport inside the window.
    async fn fetch_games(
        &self,
        sport: Sport,
        window: &TimeWindow,
    ) -> Result<Vec<GameRecord>, ProviderError>;
}

/// Extract `(away, home)` surface names from a market title.
///
/// Handles the title shapes seen across prediction markets: `"X @ Y"`,
/// `"X vs Y"` / `"X vs. Y"`, and `"Will X beat Y?"`. When the separator is
/// `vs`, the second team is assumed to be home.
pub(crate) fn parse_matchup(title: &str) -> Option<(String, String)> {
    let cleaned = title.trim().trim_end_matches('?');

    if let Some(rest) = strip_prefix_ci(cleaned, "will ") {
        if let Some((first, second)) = split_once_ci(rest, " beat ") {
            return Some((first.trim().to_string(), second.trim().to_string()));
        }
    }

    for separator in [" @ ", " at ", " vs. ", " vs ", " v "] {
        if let Some((first, second)) = split_once_ci(cleaned, separator) {
            let first = first.trim();
            // Strip trailing qualifiers like "Winner" from the second half.
            let second = second
                .trim()
                .trim_end_matches("Winner")
                .trim_end_matches("winner")
                .trim_end_matches(':')
                .trim();
            if !first.is_empty() && !second.is_empty() {
                return Some((first.to_string(), second.to_string()));
            }
        }
    }

    None
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

fn split_once_ci<'a>(s: &'a str, separator: &str) -> Option<(&'a str, &'a str)> {
    // ASCII-lowercasing keeps byte offsets valid for slicing the original.
    let lower = s.to_ascii_lowercase();
    let idx = lower.find(&separator.to_ascii_lowercase())?;
    let first = s.get(..idx)?;
    let second = s.get(idx + separator.len()..)?;
    Some((first, second))
}
