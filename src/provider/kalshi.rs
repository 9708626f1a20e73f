//! Kalshi client (prediction-market contracts priced in cents).

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::KalshiConfig;
use crate::domain::align::AliasTable;
use crate::domain::{GameQuotes, GameRecord, Provider, Quote, Side, Sport};
use crate::error::ProviderError;

use super::{parse_matchup, ProviderClient, TimeWindow};

/// Game-winner series tickers by league.
fn series_ticker(sport: Sport) -> &'static str {
    match sport {
        Sport::Nfl => "KXNFLGAME",
        Sport::Mlb => "KXMLBGAME",
        Sport::Nba => "KXNBAGAME",
        Sport::Nhl => "KXNHLGAME",
        Sport::Ncaaf => "KXNCAAFGAME",
        Sport::Ncaab => "KXNCAABGAME",
    }
}

/// Pages fetched per pass; enough for a full league slate.
const MAX_PAGES: usize = 10;

#[derive(Debug, Deserialize)]
struct MarketsResponse {
    #[serde(default)]
    markets: Vec<Market>,
    #[serde(default)]
    cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Market {
    title: String,
    #[serde(default)]
    yes_ask: Option<u32>,
    #[serde(default)]
    no_ask: Option<u32>,
    /// Kalshi exposes listing/expiration times rather than kickoff; the
    /// aligner's time window is deliberately wide to absorb the skew.
    #[serde(default)]
    expected_expiration_time: Option<DateTime<Utc>>,
    #[serde(default)]
    close_time: Option<DateTime<Utc>>,
}

pub struct KalshiClient {
    client: Client,
    config: KalshiConfig,
    aliases: AliasTable,
}

impl KalshiClient {
    pub fn new(config: KalshiConfig, aliases: AliasTable) -> Self {
        Self {
            client: Client::new(),
            config,
            aliases,
        }
    }

    /// Convert one market into a game record.
    ///
    /// Titles follow `"X vs Y"` / `"Will X beat Y"` with the second team at
    /// home; YES prices the first (away) team winning, NO the home team.
    fn normalize(&self, sport: Sport, market: &Market) -> Option<GameRecord> {
        let (away_raw, home_raw) = match parse_matchup(&market.title) {
            Some(teams) => teams,
            None => {
                debug!(title = %market.title, "kalshi title has no parseable matchup");
                return None;
            }
        };

        let away_quote = market.yes_ask.and_then(|cents| {
            quote_from_cents(cents, Side::Away, &market.title)
        });
        let home_quote = market.no_ask.and_then(|cents| {
            quote_from_cents(cents, Side::Home, &market.title)
        });
        if away_quote.is_none() && home_quote.is_none() {
            return None;
        }

        let game_time = market.expected_expiration_time.or(market.close_time);
        Some(GameRecord::new(
            sport,
            self.aliases.canonicalize(&home_raw).id,
            self.aliases.canonicalize(&away_raw).id,
            game_time,
            Provider::Kalshi,
            GameQuotes {
                home: home_quote,
                away: away_quote,
            },
        ))
    }
}

fn quote_from_cents(cents: u32, side: Side, title: &str) -> Option<Quote> {
    match Quote::from_kalshi_cents(Provider::Kalshi, side, cents) {
        Ok(quote) => Some(quote),
        Err(err) => {
            // 0 and 100 show up on settled or one-sided books.
            warn!(%title, cents, %err, "skipping unusable kalshi price");
            None
        }
    }
}

#[async_trait::async_trait]
impl ProviderClient for KalshiClient {
    fn provider(&self) -> Provider {
        Provider::Kalshi
    }

    async fn fetch_games(
        &self,
        sport: Sport,
        window: &TimeWindow,
    ) -> Result<Vec<GameRecord>, ProviderError> {
        let mut records = Vec::new();
        let mut cursor: Option<String> = None;

        for _ in 0..MAX_PAGES {
            let mut url = format!(
                "{}/markets?series_ticker={}&status=open&limit=200",
                self.config.base_url,
                series_ticker(sport)
            );
            if let Some(ref c) = cursor {
                url.push_str("&cursor=");
                url.push_str(c);
            }

            debug!(%sport, %url, "fetching kalshi markets");
            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|source| ProviderError::Http {
                    provider: Provider::Kalshi,
                    source,
                })?;
            if !response.status().is_success() {
                return Err(ProviderError::Status {
                    provider: Provider::Kalshi,
                    status: response.status().as_u16(),
                });
            }
            let page: MarketsResponse =
                response
                    .json()
                    .await
                    .map_err(|source| ProviderError::Http {
                        provider: Provider::Kalshi,
                        source,
                    })?;

            records.extend(
                page.markets
                    .iter()
                    .filter_map(|market| self.normalize(sport, market))
                    .filter(|record| window.admits(record.game_time)),
            );

            cursor = page.cursor.filter(|c| !c.is_empty());
            if cursor.is_none() {
                break;
            }
        }

        debug!(records = records.len(), "normalized kalshi payload");
        Ok(records)
    }
}
