//! Provider-agnostic odds core.
//!
//! Everything in this module is synchronous, pure, and stateless: odds
//! conversions, game alignment, and mispricing detection all operate on
//! already-fetched in-memory data. Provider identity never drives a branch
//! here — raw payloads are converted to the canonical types at the provider
//! boundary before any of this logic runs.

pub mod align;
pub mod odds;

mod detect;
mod error;
mod game;
mod ids;
mod quote;
mod sport;

// Core domain types
pub use error::DomainError;
pub use game::{DataAvailability, GameRecord};
pub use ids::{GameId, TeamId};
pub use quote::{GameQuotes, Quote};
pub use sport::{Provider, Side, Sport};

// Alignment
pub use align::{AlignmentResult, GameAligner, MatchedPair, SportConfig};

// Detection
pub use detect::{Opportunity, OpportunityBuildError, OpportunityBuilder, OpportunityDetector};
