//! Polymarket client (gamma API, outcome prices as probability strings).

use std::str::FromStr;

use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::PolymarketConfig;
use crate::domain::align::AliasTable;
use crate::domain::{GameQuotes, GameRecord, Provider, Quote, Side, Sport};
use crate::error::ProviderError;

use super::{parse_matchup, ProviderClient, TimeWindow};

/// Gamma tag slugs by league.
fn tag_slug(sport: Sport) -> &'static str {
    match sport {
        Sport::Nfl => "nfl",
        Sport::Mlb => "mlb",
        Sport::Nba => "nba",
        Sport::Nhl => "nhl",
        Sport::Ncaaf => "ncaaf",
        Sport::Ncaab => "ncaab",
    }
}

#[derive(Debug, Deserialize)]
struct Market {
    question: String,
    /// JSON-encoded array of outcome names, e.g. `["Texans", "Ravens"]`.
    #[serde(default)]
    outcomes: Option<String>,
    /// JSON-encoded array of prices, e.g. `["0.42", "0.58"]`.
    #[serde(default, rename = "outcomePrices")]
    outcome_prices: Option<String>,
    #[serde(default, rename = "gameStartTime")]
    game_start_time: Option<DateTime<Utc>>,
    #[serde(default, rename = "endDate")]
    end_date: Option<DateTime<Utc>>,
}

pub struct PolymarketClient {
    client: Client,
    config: PolymarketConfig,
    aliases: AliasTable,
}

impl PolymarketClient {
    pub fn new(config: PolymarketConfig, aliases: AliasTable) -> Self {
        Self {
            client: Client::new(),
            config,
            aliases,
        }
    }

    /// Convert one market into a game record.
    ///
    /// The question names the matchup; the outcome array names the two teams
    /// with their prices in the same order. Outcomes are mapped onto
    /// home/away by canonical identity, falling back to the question's
    /// away-first ordering.
    fn normalize(&self, sport: Sport, market: &Market) -> Option<GameRecord> {
        let (away_raw, home_raw) = parse_matchup(&market.question)?;
        let away = self.aliases.canonicalize(&away_raw);
        let home = self.aliases.canonicalize(&home_raw);

        let outcomes = decode_array(market.outcomes.as_deref())?;
        let prices = decode_array(market.outcome_prices.as_deref())?;
        if outcomes.len() != 2 || prices.len() != 2 {
            return None;
        }

        let mut quotes = GameQuotes::default();
        for (name, price) in outcomes.iter().zip(&prices) {
            let probability = match Decimal::from_str(price) {
                Ok(p) => p,
                Err(_) => {
                    warn!(question = %market.question, %price, "unparseable polymarket price");
                    continue;
                }
            };
            let canonical = self.aliases.canonicalize(name);
            let side = if canonical.id == home.id {
                Side::Home
            } else if canonical.id == away.id {
                Side::Away
            } else if quotes.away.is_none() {
                Side::Away
            } else {
                Side::Home
            };
            match Quote::from_probability(Provider::Polymarket, side, probability, self.config.fee)
            {
                Ok(quote) => match side {
                    Side::Home => quotes.home = Some(quote),
                    Side::Away => quotes.away = Some(quote),
                },
                Err(err) => {
                    // Settled books price at 0 or 1; nothing to compare.
                    debug!(question = %market.question, %err, "skipping polymarket outcome");
                }
            }
        }
        if quotes.home.is_none() && quotes.away.is_none() {
            return None;
        }

        let game_time = market.game_start_time.or(market.end_date);
        Some(GameRecord::new(
            sport,
            home.id,
            away.id,
            game_time,
            Provider::Polymarket,
            quotes,
        ))
    }
}

/// Gamma stringifies nested arrays; decode `'["a", "b"]'` into its items.
fn decode_array(raw: Option<&str>) -> Option<Vec<String>> {
    serde_json::from_str(raw?).ok()
}

#[async_trait::async_trait]
impl ProviderClient for PolymarketClient {
    fn provider(&self) -> Provider {
        Provider::Polymarket
    }

    async fn fetch_games(
        &self,
        sport: Sport,
        window: &TimeWindow,
    ) -> Result<Vec<GameRecord>, ProviderError> {
        let url = format!(
            "{}/markets?tag_slug={}&closed=false&limit=200",
            self.config.base_url,
            tag_slug(sport)
        );

        debug!(%sport, %url, "fetching polymarket markets");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ProviderError::Http {
                provider: Provider::Polymarket,
                source,
            })?;
        if !response.status().is_success() {
            return Err(ProviderError::Status {
                provider: Provider::Polymarket,
                status: response.status().as_u16(),
            });
        }
        let markets: Vec<Market> =
            response
                .json()
                .await
                .map_err(|source| ProviderError::Http {
                    provider: Provider::Polymarket,
                    source,
                })?;

        let records: Vec<GameRecord> = markets
            .iter()
            .filter_map(|market| self.normalize(sport, market))
            .filter(|record| window.admits(record.game_time))
            .collect();
        debug!(
            markets = markets.len(),
            records = records.len(),
            "normalized polymarket payload"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn client() -> PolymarketClient {
        PolymarketClient::new(
            PolymarketConfig::default(),
            AliasTable::builtin(Sport::Nfl).unwrap(),
        )
    }

    fn sample_market() -> Market {
        serde_json::from_value(serde_json::json!({
            "question": "Texans vs. Ravens",
            "outcomes": "[\"Ravens\", \"Texans\"]",
            "outcomePrices": "[\"0.58\", \"0.42\"]",
            "gameStartTime": "2025-09-07T17:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn maps_outcomes_onto_sides_by_canonical_identity() {
        let record = client().normalize(Sport::Nfl, &sample_market()).unwrap();
        assert_eq!(record.home_team.as_str(), "BAL");
        assert_eq!(record.away_team.as_str(), "HOU");

        let quotes = &record.quotes[&Provider::Polymarket];
        // Ravens listed first but map to home via the alias table.
        let home = quotes.side(Side::Home).unwrap();
        assert!((home.implied_probability() - dec!(0.58)).abs() < dec!(0.01));
        let away = quotes.side(Side::Away).unwrap();
        assert!((away.implied_probability() - dec!(0.42)).abs() < dec!(0.01));
    }

    #[test]
    fn skips_settled_books() {
        let market: Market = serde_json::from_value(serde_json::json!({
            "question": "Texans vs. Ravens",
            "outcomes": "[\"Ravens\", \"Texans\"]",
            "outcomePrices": "[\"1\", \"0\"]"
        }))
        .unwrap();
        assert!(client().normalize(Sport::Nfl, &market).is_none());
    }

    #[test]
    fn skips_markets_without_price_arrays() {
        let market: Market = serde_json::from_value(serde_json::json!({
            "question": "Texans vs. Ravens"
        }))
        .unwrap();
        assert!(client().normalize(Sport::Nfl, &market).is_none());
    }
}
