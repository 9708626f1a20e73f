//! The Odds API client (sportsbook prices, Pinnacle anchor).

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::OddsApiConfig;
use crate::domain::align::AliasTable;
use crate::domain::{GameQuotes, GameRecord, Provider, Quote, Side, Sport};
use crate::error::ProviderError;

use super::{ProviderClient, TimeWindow};

/// Odds API sport keys, per their catalog.
fn sport_key(sport: Sport) -> &'static str {
    match sport {
        Sport::Nfl => "americanfootball_nfl",
        Sport::Mlb => "baseball_mlb",
        Sport::Nba => "basketball_nba",
        Sport::Nhl => "icehockey_nhl",
        Sport::Ncaaf => "americanfootball_ncaaf",
        Sport::Ncaab => "basketball_ncaab",
    }
}

#[derive(Debug, Deserialize)]
struct Event {
    commence_time: DateTime<Utc>,
    home_team: String,
    away_team: String,
    #[serde(default)]
    bookmakers: Vec<Bookmaker>,
}

#[derive(Debug, Deserialize)]
struct Bookmaker {
    key: String,
    #[serde(default)]
    markets: Vec<Market>,
}

#[derive(Debug, Deserialize)]
struct Market {
    key: String,
    #[serde(default)]
    outcomes: Vec<Outcome>,
}

#[derive(Debug, Deserialize)]
struct Outcome {
    name: String,
    /// American odds; the API serializes them as JSON numbers.
    price: f64,
}

pub struct OddsApiClient {
    client: Client,
    config: OddsApiConfig,
    aliases: AliasTable,
}

impl OddsApiClient {
    pub fn new(config: OddsApiConfig, aliases: AliasTable) -> Self {
        Self {
            client: Client::new(),
            config,
            aliases,
        }
    }

    fn request_url(
        &self,
        sport: Sport,
        window: &TimeWindow,
        api_key: &str,
    ) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.config.base_url)
            .and_then(|base| base.join(&format!("/v4/sports/{}/odds", sport_key(sport))))
            .map_err(|e| ProviderError::Decode {
                provider: Provider::OddsApi,
                reason: format!("invalid base url: {e}"),
            })?;
        url.query_pairs_mut()
            .append_pair("regions", "us")
            .append_pair("markets", "h2h")
            .append_pair("oddsFormat", "american")
            .append_pair("bookmakers", &self.config.bookmaker)
            .append_pair(
                "commenceTimeFrom",
                &window.from.to_rfc3339_opts(SecondsFormat::Secs, true),
            )
            .append_pair(
                "commenceTimeTo",
                &window.to.to_rfc3339_opts(SecondsFormat::Secs, true),
            )
            .append_pair("apiKey", api_key);
        Ok(url)
    }

    /// Convert one event into a game record, if it carries usable prices.
    fn normalize(&self, sport: Sport, event: &Event) -> Option<GameRecord> {
        let market = event
            .bookmakers
            .iter()
            .find(|b| b.key == self.config.bookmaker)
            .and_then(|b| b.markets.iter().find(|m| m.key == "h2h"))?;

        let mut home = None;
        let mut away = None;
        for outcome in &market.outcomes {
            let american = outcome.price.round() as i64;
            let side = if outcome.name == event.home_team {
                Side::Home
            } else if outcome.name == event.away_team {
                Side::Away
            } else {
                continue; // draw or prop outcome
            };
            match Quote::from_american(Provider::OddsApi, side, american) {
                Ok(quote) => match side {
                    Side::Home => home = Some(quote),
                    Side::Away => away = Some(quote),
                },
                Err(err) => {
                    warn!(
                        team = %outcome.name,
                        price = outcome.price,
                        %err,
                        "skipping unusable odds_api outcome"
                    );
                }
            }
        }
        if home.is_none() && away.is_none() {
            return None;
        }

        let home_team = self.aliases.canonicalize(&event.home_team).id;
        let away_team = self.aliases.canonicalize(&event.away_team).id;
        Some(GameRecord::new(
            sport,
            home_team,
            away_team,
            Some(event.commence_time),
            Provider::OddsApi,
            GameQuotes { home, away },
        ))
    }
}

#[async_trait::async_trait]
impl ProviderClient for OddsApiClient {
    fn provider(&self) -> Provider {
        Provider::OddsApi
    }

    async fn fetch_games(
        &self,
        sport: Sport,
        window: &TimeWindow,
    ) -> Result<Vec<GameRecord>, ProviderError> {
        let api_key = std::env::var(&self.config.api_key_env).map_err(|_| {
            ProviderError::MissingApiKey {
                provider: Provider::OddsApi,
                env: self.config.api_key_env.clone(),
            }
        })?;
        let url = self.request_url(sport, window, &api_key)?;

        debug!(%sport, "fetching odds_api events");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ProviderError::Http {
                provider: Provider::OddsApi,
                source,
            })?;
        if !response.status().is_success() {
            return Err(ProviderError::Status {
                provider: Provider::OddsApi,
                status: response.status().as_u16(),
            });
        }
        let events: Vec<Event> =
            response
                .json()
                .await
                .map_err(|source| ProviderError::Http {
                    provider: Provider::OddsApi,
                    source,
                })?;

        let records: Vec<GameRecord> = events
            .iter()
            .filter_map(|event| self.normalize(sport, event))
            .filter(|record| window.admits(record.game_time))
            .collect();
        debug!(events = events.len(), records = records.len(), "normalized odds_api payload");
        Ok(records)
    }
}
