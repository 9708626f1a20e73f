//! Mispricing detection over aligned multi-provider games.
//!
//! For every aligned game the detector compares each side's implied
//! probabilities across providers: the spread between the highest and lowest
//! estimate is the edge. Betting the side at the provider with the lowest
//! implied probability (the best payout) while treating the highest estimate
//! as the true win probability yields the expected value and Kelly stake.

use std::collections::BTreeSet;
use std::fmt;

use rust_decimal::Decimal;

use super::error::DomainError;
use super::game::GameRecord;
use super::ids::GameId;
use super::quote::Quote;
use super::sport::{Provider, Side, Sport};

/// Error returned when building an Opportunity fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpportunityBuildError {
    /// Game ID is required but was not provided.
    MissingGameId,
    /// Recommended side is required but was not provided.
    MissingSide,
    /// The bet-side provider and quote are required but were not provided.
    MissingBetQuote,
    /// The benchmark provider and probability are required but were not provided.
    MissingBenchmark,
}

impl fmt::Display for OpportunityBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingGameId => write!(f, "game_id and sport are required"),
            Self::MissingSide => write!(f, "recommended_side is required"),
            Self::MissingBetQuote => write!(f, "bet provider and quote are required"),
            Self::MissingBenchmark => write!(f, "benchmark provider and probability are required"),
        }
    }
}

impl std::error::Error for OpportunityBuildError {}

/// A detected pricing discrepancy.
///
/// Use `Opportunity::builder()` to construct instances. The builder computes
/// the derived fields (edge, expected value, Kelly fraction) from the bet and
/// benchmark prices. Never mutated after creation.
#[derive(Debug, Clone)]
pub struct Opportunity {
    game_id: GameId,
    sport: Sport,
    recommended_side: Side,
    providers_involved: BTreeSet<Provider>,
    bet_provider: Provider,
    benchmark_provider: Provider,
    bet_decimal_odds: Decimal,
    edge: Decimal,
    expected_value: Decimal,
    kelly_fraction: Decimal,
}

impl Opportunity {
    /// Create a new builder for constructing an Opportunity.
    pub fn builder() -> OpportunityBuilder {
        OpportunityBuilder::default()
    }

    /// Get the game this opportunity belongs to.
    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    /// Get the sport.
    pub fn sport(&self) -> Sport {
        self.sport
    }

    /// Get the side to bet.
    pub fn recommended_side(&self) -> Side {
        self.recommended_side
    }

    /// Get every provider that quoted the recommended side.
    pub fn providers_involved(&self) -> &BTreeSet<Provider> {
        &self.providers_involved
    }

    /// Get the provider offering the mispriced (best-payout) price.
    pub fn bet_provider(&self) -> Provider {
        self.bet_provider
    }

    /// Get the provider whose estimate anchors the true probability.
    pub fn benchmark_provider(&self) -> Provider {
        self.benchmark_provider
    }

    /// Get the decimal odds available at the bet provider.
    pub fn bet_decimal_odds(&self) -> Decimal {
        self.bet_decimal_odds
    }

    /// Get the implied-probability spread between benchmark and bet prices.
    pub fn edge(&self) -> Decimal {
        self.edge
    }

    /// Get the per-unit-stake expected return.
    pub fn expected_value(&self) -> Decimal {
        self.expected_value
    }

    /// Get the fractional-bankroll Kelly recommendation, clipped to [0, 1].
    pub fn kelly_fraction(&self) -> Decimal {
        self.kelly_fraction
    }
}

/// Builder for constructing `Opportunity` instances.
#[derive(Debug, Default)]
pub struct OpportunityBuilder {
    game: Option<(GameId, Sport)>,
    side: Option<Side>,
    bet: Option<(Provider, Decimal, Decimal)>,
    benchmark: Option<(Provider, Decimal)>,
    providers_involved: BTreeSet<Provider>,
}

impl OpportunityBuilder {
    /// Set the game identity.
    pub fn game(mut self, game_id: GameId, sport: Sport) -> Self {
        self.game = Some((game_id, sport));
        self
    }

    /// Set the recommended side.
    pub fn side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    /// Set the mispriced quote to bet at.
    pub fn bet(mut self, provider: Provider, quote: &Quote) -> Self {
        self.providers_involved.insert(provider);
        self.bet = Some((
            provider,
            quote.implied_probability(),
            quote.decimal_odds(),
        ));
        self
    }

    /// Set the benchmark estimate of the true win probability.
    pub fn benchmark(mut self, provider: Provider, probability: Decimal) -> Self {
        self.providers_involved.insert(provider);
        self.benchmark = Some((provider, probability));
        self
    }

    /// Record an additional provider that quoted the side.
    pub fn involving(mut self, provider: Provider) -> Self {
        self.providers_involved.insert(provider);
        self
    }

    /// Build the Opportunity, calculating derived fields.
    ///
    /// # Errors
    ///
    /// Returns `OpportunityBuildError` if any required field is missing.
    pub fn build(self) -> Result<Opportunity, OpportunityBuildError> {
        let (game_id, sport) = self.game.ok_or(OpportunityBuildError::MissingGameId)?;
        let recommended_side = self.side.ok_or(OpportunityBuildError::MissingSide)?;
        let (bet_provider, bet_probability, bet_decimal_odds) =
            self.bet.ok_or(OpportunityBuildError::MissingBetQuote)?;
        let (benchmark_provider, benchmark_probability) = self
            .benchmark
            .ok_or(OpportunityBuildError::MissingBenchmark)?;

        let edge = benchmark_probability - bet_probability;
        let expected_value = benchmark_probability / bet_probability - Decimal::ONE;

        // Kelly with payout b = d - 1 at the bet price and win probability
        // taken from the benchmark. Negative Kelly is clipped: the caller has
        // already filtered no-edge candidates, clipping guards float error.
        let b = bet_decimal_odds - Decimal::ONE;
        let kelly = (b * benchmark_probability - (Decimal::ONE - benchmark_probability)) / b;
        let kelly_fraction = kelly.clamp(Decimal::ZERO, Decimal::ONE);

        Ok(Opportunity {
            game_id,
            sport,
            recommended_side,
            providers_involved: self.providers_involved,
            bet_provider,
            benchmark_provider,
            bet_decimal_odds,
            edge,
            expected_value,
            kelly_fraction,
        })
    }
}

/// Scans aligned games for cross-provider mispricings.
///
/// Stateless: each call is a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct OpportunityDetector {
    min_edge_threshold: Decimal,
}

impl OpportunityDetector {
    /// Create a detector with the given minimum edge threshold.
    pub fn new(min_edge_threshold: Decimal) -> Self {
        Self { min_edge_threshold }
    }

    /// Scan aligned games and return opportunities ranked by edge, then
    /// expected value.
    ///
    /// Games quoted by fewer than two providers are skipped silently. A
    /// probability outside (0, 1) anywhere in the input is a data-integrity
    /// fault and aborts the pass with [`DomainError::MalformedQuote`].
    pub fn detect(&self, games: &[GameRecord]) -> Result<Vec<Opportunity>, DomainError> {
        let mut opportunities = Vec::new();
        for game in games {
            self.validate_quotes(game)?;
            if let Some(opportunity) = self.detect_game(game)? {
                opportunities.push(opportunity);
            }
        }
        opportunities.sort_by(|x, y| {
            y.edge
                .cmp(&x.edge)
                .then_with(|| y.expected_value.cmp(&x.expected_value))
                .then_with(|| x.game_id.cmp(&y.game_id))
        });
        Ok(opportunities)
    }

    fn validate_quotes(&self, game: &GameRecord) -> Result<(), DomainError> {
        for (provider, quotes) in &game.quotes {
            for quote in [quotes.home.as_ref(), quotes.away.as_ref()].into_iter().flatten() {
                let p = quote.implied_probability();
                if p <= Decimal::ZERO || p >= Decimal::ONE {
                    return Err(DomainError::MalformedQuote {
                        provider: *provider,
                        game_id: game.game_id.clone(),
                        probability: p,
                    });
                }
            }
        }
        Ok(())
    }

    fn detect_game(&self, game: &GameRecord) -> Result<Option<Opportunity>, DomainError> {
        let home = self.side_spread(game, Side::Home);
        let away = self.side_spread(game, Side::Away);

        let chosen = match (home, away) {
            (Some(h), Some(a)) => {
                // Larger edge wins; an exact tie resolves toward the side
                // whose bet price carries the higher decimal odds (smaller
                // stake for the same payout), then home for determinism.
                match h.edge.cmp(&a.edge) {
                    std::cmp::Ordering::Greater => h,
                    std::cmp::Ordering::Less => a,
                    std::cmp::Ordering::Equal => {
                        if a.bet_quote.decimal_odds() > h.bet_quote.decimal_odds() {
                            a
                        } else {
                            h
                        }
                    }
                }
            }
            (Some(h), None) => h,
            (None, Some(a)) => a,
            (None, None) => return Ok(None),
        };

        if chosen.edge < self.min_edge_threshold {
            return Ok(None);
        }

        let mut builder = Opportunity::builder()
            .game(game.game_id.clone(), game.sport)
            .side(chosen.side)
            .bet(chosen.bet_provider, &chosen.bet_quote)
            .benchmark(chosen.benchmark_provider, chosen.benchmark_probability);
        for provider in chosen.quoting_providers {
            builder = builder.involving(provider);
        }

        // The builder's required fields are all set above; a failure here
        // would be a programming error, not bad input.
        match builder.build() {
            Ok(opportunity) => Ok(Some(opportunity)),
            Err(_) => Ok(None),
        }
    }

    /// Min/max implied-probability spread for one side, when at least two
    /// providers quote it.
    fn side_spread(&self, game: &GameRecord, side: Side) -> Option<SideSpread> {
        let mut quotes: Vec<(Provider, &Quote)> = Vec::new();
        for (provider, game_quotes) in &game.quotes {
            if let Some(quote) = game_quotes.side(side) {
                quotes.push((*provider, quote));
            }
        }
        if quotes.len() < 2 {
            return None;
        }

        let (bet_provider, bet_quote) = quotes
            .iter()
            .min_by(|x, y| {
                x.1.implied_probability()
                    .cmp(&y.1.implied_probability())
                    .then_with(|| x.0.cmp(&y.0))
            })
            .copied()?;
        let (benchmark_provider, benchmark_quote) = quotes
            .iter()
            .max_by(|x, y| {
                x.1.implied_probability()
                    .cmp(&y.1.implied_probability())
                    .then_with(|| y.0.cmp(&x.0))
            })
            .copied()?;

        Some(SideSpread {
            side,
            edge: benchmark_quote.implied_probability() - bet_quote.implied_probability(),
            bet_provider,
            bet_quote: bet_quote.clone(),
            benchmark_provider,
            benchmark_probability: benchmark_quote.implied_probability(),
            quoting_providers: quotes.iter().map(|(p, _)| *p).collect(),
        })
    }
}

struct SideSpread {
    side: Side,
    edge: Decimal,
    bet_provider: Provider,
    bet_quote: Quote,
    benchmark_provider: Provider,
    benchmark_probability: Decimal,
    quoting_providers: Vec<Provider>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::TeamId;
    use crate::domain::quote::GameQuotes;
    use rust_decimal_macros::dec;

    fn quote(provider: Provider, side: Side, probability: Decimal) -> Quote {
        Quote::from_probability(provider, side, probability, Decimal::ZERO).unwrap()
    }

    fn game_with_home_probs(probs: &[(Provider, Decimal)]) -> GameRecord {
        let mut record = GameRecord::new(
            Sport::Nfl,
            TeamId::from("BAL"),
            TeamId::from("HOU"),
            None,
            probs[0].0,
            GameQuotes::home_only(quote(probs[0].0, Side::Home, probs[0].1)),
        );
        for (provider, p) in &probs[1..] {
            record.quotes.insert(
                *provider,
                GameQuotes::home_only(quote(*provider, Side::Home, *p)),
            );
        }
        record
    }

    #[test]
    fn builder_computes_derived_fields() {
        let bet = quote(Provider::Kalshi, Side::Home, dec!(0.54));
        let opp = Opportunity::builder()
            .game(GameId::from("nfl-hou-bal-tbd"), Sport::Nfl)
            .side(Side::Home)
            .bet(Provider::Kalshi, &bet)
            .benchmark(Provider::OddsApi, dec!(0.60))
            .build()
            .unwrap();

        assert_eq!(opp.recommended_side(), Side::Home);
        assert_eq!(opp.bet_provider(), Provider::Kalshi);
        assert_eq!(opp.benchmark_provider(), Provider::OddsApi);
        assert!((opp.edge() - dec!(0.06)).abs() < dec!(0.002));
        // EV = 0.60/0.54 - 1
        assert!((opp.expected_value() - dec!(0.1111)).abs() < dec!(0.01));
        assert!(opp.kelly_fraction() > Decimal::ZERO && opp.kelly_fraction() <= Decimal::ONE);
        assert_eq!(opp.providers_involved().len(), 2);
    }

    #[test]
    fn builder_rejects_missing_fields() {
        let bet = quote(Provider::Kalshi, Side::Home, dec!(0.5));

        let result = Opportunity::builder()
            .side(Side::Home)
            .bet(Provider::Kalshi, &bet)
            .benchmark(Provider::OddsApi, dec!(0.6))
            .build();
        assert_eq!(result.unwrap_err(), OpportunityBuildError::MissingGameId);

        let result = Opportunity::builder()
            .game(GameId::from("g"), Sport::Nfl)
            .bet(Provider::Kalshi, &bet)
            .benchmark(Provider::OddsApi, dec!(0.6))
            .build();
        assert_eq!(result.unwrap_err(), OpportunityBuildError::MissingSide);

        let result = Opportunity::builder()
            .game(GameId::from("g"), Sport::Nfl)
            .side(Side::Home)
            .benchmark(Provider::OddsApi, dec!(0.6))
            .build();
        assert_eq!(result.unwrap_err(), OpportunityBuildError::MissingBetQuote);

        let result = Opportunity::builder()
            .game(GameId::from("g"), Sport::Nfl)
            .side(Side::Home)
            .bet(Provider::Kalshi, &bet)
            .build();
        assert_eq!(result.unwrap_err(), OpportunityBuildError::MissingBenchmark);
    }

    #[test]
    fn kelly_is_clipped_to_unit_interval() {
        // Tiny edge: raw Kelly goes negative, clipped to zero.
        let bet = quote(Provider::Kalshi, Side::Home, dec!(0.50));
        let opp = Opportunity::builder()
            .game(GameId::from("g"), Sport::Nfl)
            .side(Side::Home)
            .bet(Provider::Kalshi, &bet)
            .benchmark(Provider::OddsApi, dec!(0.50))
            .build()
            .unwrap();
        assert_eq!(opp.kelly_fraction(), Decimal::ZERO);
    }

    #[test]
    fn detector_skips_single_provider_games() {
        let detector = OpportunityDetector::new(dec!(0.02));
        let game = game_with_home_probs(&[(Provider::Kalshi, dec!(0.54))]);
        let opportunities = detector.detect(&[game]).unwrap();
        assert!(opportunities.is_empty());
    }

    #[test]
    fn detector_filters_below_threshold() {
        let detector = OpportunityDetector::new(dec!(0.05));
        let game = game_with_home_probs(&[
            (Provider::OddsApi, dec!(0.58)),
            (Provider::Kalshi, dec!(0.55)),
        ]);
        let opportunities = detector.detect(&[game]).unwrap();
        assert!(opportunities.is_empty());
    }

    #[test]
    fn detector_emits_home_opportunity() {
        let detector = OpportunityDetector::new(dec!(0.02));
        let game = game_with_home_probs(&[
            (Provider::OddsApi, dec!(0.60)),
            (Provider::Kalshi, dec!(0.54)),
        ]);
        let opportunities = detector.detect(&[game]).unwrap();
        assert_eq!(opportunities.len(), 1);

        let opp = &opportunities[0];
        assert_eq!(opp.recommended_side(), Side::Home);
        assert_eq!(opp.bet_provider(), Provider::Kalshi);
        assert_eq!(opp.benchmark_provider(), Provider::OddsApi);
        assert!((opp.edge() - dec!(0.06)).abs() < dec!(0.002));
    }

    #[test]
    fn side_tie_prefers_higher_decimal_odds() {
        // Complementary two-sided quotes: both sides carry the same edge,
        // but the away side's bet price pays longer odds.
        let detector = OpportunityDetector::new(dec!(0.02));
        let mut game = GameRecord::new(
            Sport::Nfl,
            TeamId::from("BAL"),
            TeamId::from("HOU"),
            None,
            Provider::OddsApi,
            GameQuotes::both(
                quote(Provider::OddsApi, Side::Home, dec!(0.60)),
                quote(Provider::OddsApi, Side::Away, dec!(0.40)),
            ),
        );
        game.quotes.insert(
            Provider::Kalshi,
            GameQuotes::both(
                quote(Provider::Kalshi, Side::Home, dec!(0.54)),
                quote(Provider::Kalshi, Side::Away, dec!(0.46)),
            ),
        );

        let opportunities = detector.detect(&[game]).unwrap();
        assert_eq!(opportunities.len(), 1);
        assert_eq!(opportunities[0].recommended_side(), Side::Away);
        assert_eq!(opportunities[0].bet_provider(), Provider::OddsApi);
    }

    #[test]
    fn malformed_probability_names_provider_and_game() {
        let detector = OpportunityDetector::new(dec!(0.02));
        let mut game = game_with_home_probs(&[
            (Provider::OddsApi, dec!(0.60)),
            (Provider::Kalshi, dec!(0.54)),
        ]);
        game.quotes.insert(
            Provider::Polymarket,
            GameQuotes::home_only(Quote::from_parts_unchecked(
                Provider::Polymarket,
                Side::Home,
                -110,
                dec!(1.9090),
                dec!(1.3),
            )),
        );

        let err = detector.detect(&[game.clone()]).unwrap_err();
        match err {
            DomainError::MalformedQuote {
                provider,
                game_id,
                probability,
            } => {
                assert_eq!(provider, Provider::Polymarket);
                assert_eq!(game_id, game.game_id);
                assert_eq!(probability, dec!(1.3));
            }
            other => panic!("expected MalformedQuote, got {other:?}"),
        }
    }
}
