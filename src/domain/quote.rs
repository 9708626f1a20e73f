//! Normalized price quotes.
//!
//! A [`Quote`] carries one side's price from one provider in all three odds
//! representations. Construction goes through the conversion functions so the
//! triple is always internally consistent: whichever representation was the
//! source of truth, the other two are derived from it and round-trip within
//! tolerance.

use rust_decimal::Decimal;
use serde::Serialize;

use super::error::DomainError;
use super::odds;
use super::sport::{Provider, Side};

/// One side's price for one outcome from one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    provider: Provider,
    outcome: Side,
    american_odds: i64,
    decimal_odds: Decimal,
    implied_probability: Decimal,
}

impl Quote {
    /// Build a quote from American odds (sportsbook source of truth).
    pub fn from_american(
        provider: Provider,
        outcome: Side,
        american: i64,
    ) -> Result<Self, DomainError> {
        let decimal_odds = odds::american_to_decimal(american)?;
        let implied_probability = odds::decimal_to_probability(decimal_odds)?;
        Ok(Self {
            provider,
            outcome,
            american_odds: american,
            decimal_odds,
            implied_probability,
        })
    }

    /// Build a quote from a raw win probability (prediction-market source of
    /// truth), applying a platform fee haircut before conversion.
    ///
    /// The American odds are derived first and the decimal/probability pair is
    /// then re-derived from them, so the stored triple is exactly as coarse as
    /// the integer odds convention allows.
    pub fn from_probability(
        provider: Provider,
        outcome: Side,
        probability: Decimal,
        fee: Decimal,
    ) -> Result<Self, DomainError> {
        let american = odds::probability_to_american(probability, fee)?;
        Self::from_american(provider, outcome, american)
    }

    /// Build a quote from a Kalshi contract price in cents, using the
    /// observed price table.
    pub fn from_kalshi_cents(
        provider: Provider,
        outcome: Side,
        cents: u32,
    ) -> Result<Self, DomainError> {
        let american = odds::kalshi_cents_to_american(cents)?;
        Self::from_american(provider, outcome, american)
    }

    /// Provider this quote came from.
    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Which side of the market this quote prices.
    pub fn outcome(&self) -> Side {
        self.outcome
    }

    /// American odds (e.g. +140, -262).
    pub fn american_odds(&self) -> i64 {
        self.american_odds
    }

    /// Decimal odds (> 1.0).
    pub fn decimal_odds(&self) -> Decimal {
        self.decimal_odds
    }

    /// Implied probability in (0, 1).
    pub fn implied_probability(&self) -> Decimal {
        self.implied_probability
    }

    /// The same price re-labelled for the opposite side.
    ///
    /// Used when a provider's record was matched with home/away flipped and
    /// its quotes have to be re-oriented before merging.
    pub fn reoriented(mut self, outcome: Side) -> Self {
        self.outcome = outcome;
        self
    }

    /// Construct a quote from raw parts, bypassing validation.
    ///
    /// Only for tests that need to feed deliberately inconsistent data into
    /// downstream validation paths.
    #[cfg(any(test, feature = "testkit"))]
    pub fn from_parts_unchecked(
        provider: Provider,
        outcome: Side,
        american_odds: i64,
        decimal_odds: Decimal,
        implied_probability: Decimal,
    ) -> Self {
        Self {
            provider,
            outcome,
            american_odds,
            decimal_odds,
            implied_probability,
        }
    }
}

/// Both sides' quotes from a single provider for one game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameQuotes {
    pub home: Option<Quote>,
    pub away: Option<Quote>,
}

impl GameQuotes {
    /// Quotes with only the home side priced.
    pub fn home_only(home: Quote) -> Self {
        Self {
            home: Some(home),
            away: None,
        }
    }

    /// Quotes with both sides priced.
    pub fn both(home: Quote, away: Quote) -> Self {
        Self {
            home: Some(home),
            away: Some(away),
        }
    }

    /// The quote for a given side, if present.
    pub fn side(&self, side: Side) -> Option<&Quote> {
        match side {
            Side::Home => self.home.as_ref(),
            Side::Away => self.away.as_ref(),
        }
    }

    /// Swap home and away, re-labelling each quote's outcome.
    pub fn flipped(self) -> Self {
        Self {
            home: self.away.map(|q| q.reoriented(Side::Home)),
            away: self.home.map(|q| q.reoriented(Side::Away)),
        }
    }

    /// Fill any side this provider has not priced yet from `other`.
    pub fn absorb(&mut self, other: GameQuotes) {
        if self.home.is_none() {
            self.home = other.home;
        }
        if self.away.is_none() {
            self.away = other.away;
        }
    }
}
