//! Domain validation errors for the odds core.
//!
//! These errors are returned by conversion functions and the detector when a
//! documented numeric precondition is violated. They carry enough context
//! (field value, provider, game id) for the caller to log or display without
//! re-deriving anything; the core itself never logs or retries.

use rust_decimal::Decimal;
use thiserror::Error;

use super::ids::GameId;
use super::sport::Provider;

/// Errors raised when odds-math invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// American odds of zero have no defined price.
    #[error("american odds of zero are undefined")]
    ZeroAmerican,

    /// Decimal odds must exceed 1.0 (a price of 1.0 pays back only the stake).
    #[error("decimal odds must be greater than 1.0, got {decimal}")]
    DecimalOutOfRange {
        /// The invalid decimal odds that were provided.
        decimal: Decimal,
    },

    /// Probabilities must lie strictly between 0 and 1.
    #[error("probability must be in (0, 1), got {probability}")]
    ProbabilityOutOfRange {
        /// The invalid probability that was provided.
        probability: Decimal,
    },

    /// Kalshi contract prices are quoted in whole cents from 1 to 99.
    #[error("kalshi price must be between 1 and 99 cents, got {cents}")]
    CentsOutOfRange {
        /// The invalid cents value that was provided.
        cents: u32,
    },

    /// A structurally valid quote carried a probability outside (0, 1).
    ///
    /// The detector refuses to drop the quote and continue: a bad probability
    /// this deep in the pipeline points at an upstream normalization bug.
    #[error(
        "malformed quote from {provider} for game {game_id}: \
         implied probability {probability} outside (0, 1)"
    )]
    MalformedQuote {
        /// Provider whose quote failed validation.
        provider: Provider,
        /// Game the quote belongs to.
        game_id: GameId,
        /// The offending probability.
        probability: Decimal,
    },
}
