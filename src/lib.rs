//! Linesman - cross-book sports odds normalization and mispricing detection.
//!
//! This crate compares moneyline prices for the same game across a sharp
//! sportsbook anchor (Pinnacle via The Odds API) and prediction markets
//! (Kalshi, Polymarket), and ranks the implied-probability discrepancies.
//!
//! # Architecture
//!
//! The core is a pure, synchronous pipeline over already-fetched data:
//!
//! - **`domain::odds`** - conversions between American, decimal, and
//!   implied-probability representations, including the observed Kalshi
//!   cents price table.
//! - **`domain::align`** - matches each provider's game records to the same
//!   real-world event through team-name canonicalization, fuzzy matching,
//!   and start-time proximity.
//! - **`domain::detect`** - scans aligned multi-provider games for edges,
//!   computing expected value and Kelly stake per opportunity.
//!
//! Provider payloads are normalized into canonical types at the `provider`
//! boundary; nothing inside `domain` branches on provider identity.
//!
//! # Modules
//!
//! - [`config`] - TOML configuration with per-sport thresholds and alias
//!   overrides
//! - [`domain`] - provider-agnostic types and the three core components
//! - [`error`] - error types for the crate
//! - [`provider`] - REST fetch clients for each data source
//! - [`cli`] - command definitions for the `linesman` binary
//!
//! # Example
//!
//! ```
//! use linesman::domain::{GameAligner, OpportunityDetector, Sport, SportConfig};
//! use rust_decimal_macros::dec;
//!
//! let aligner = GameAligner::new(Sport::Nfl, SportConfig::tuned_for(Sport::Nfl)).unwrap();
//! let merged = aligner.align_many(&[]);
//! let detector = OpportunityDetector::new(dec!(0.02));
//! assert!(detector.detect(&merged).unwrap().is_empty());
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod provider;

pub use error::{Error, Result};
