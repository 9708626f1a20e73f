use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use linesman::domain::{
    odds, GameQuotes, GameRecord, OpportunityDetector, Provider, Quote, Side, Sport, TeamId,
};

/// Quote whose implied probability is exactly `p` (no American-odds
/// quantization), as a provider reporting raw probabilities would emit.
fn exact_quote(provider: Provider, side: Side, p: Decimal) -> Quote {
    let decimal = Decimal::ONE / p;
    let american = odds::probability_to_american(p, Decimal::ZERO).unwrap();
    Quote::from_parts_unchecked(provider, side, american, decimal, p)
}

fn home_only_game(home: &str, away: &str, probs: &[(Provider, Decimal)]) -> GameRecord {
    let mut record = GameRecord::new(
        Sport::Nfl,
        TeamId::from(home),
        TeamId::from(away),
        None,
        probs[0].0,
        GameQuotes::home_only(exact_quote(probs[0].0, Side::Home, probs[0].1)),
    );
    for (provider, p) in &probs[1..] {
        record.quotes.insert(
            *provider,
            GameQuotes::home_only(exact_quote(*provider, Side::Home, *p)),
        );
    }
    record
}

#[test]
fn end_to_end_hou_bal_scenario() {
    // Two providers report HOU @ BAL; home implied probabilities 0.54 and
    // 0.60 on the same raw (un-vigged) basis.
    let detector = OpportunityDetector::new(dec!(0.02));
    let game = home_only_game(
        "BAL",
        "HOU",
        &[
            (Provider::OddsApi, dec!(0.60)),
            (Provider::Kalshi, dec!(0.54)),
        ],
    );

    let opportunities = detector.detect(&[game]).unwrap();
    assert_eq!(opportunities.len(), 1);

    let opp = &opportunities[0];
    assert_eq!(opp.recommended_side(), Side::Home);
    assert_eq!(opp.edge(), dec!(0.06));
    assert_eq!(opp.bet_provider(), Provider::Kalshi);
    assert_eq!(opp.benchmark_provider(), Provider::OddsApi);
    assert_eq!(opp.providers_involved().len(), 2);
    // EV = 0.60 / 0.54 - 1
    assert!((opp.expected_value() - dec!(0.111111)).abs() < dec!(0.0001));
}

#[test]
fn no_opportunity_below_edge_threshold() {
    let detector = OpportunityDetector::new(dec!(0.02));
    let game = home_only_game(
        "BAL",
        "HOU",
        &[
            (Provider::OddsApi, dec!(0.55)),
            (Provider::Kalshi, dec!(0.54)),
        ],
    );
    assert!(detector.detect(&[game]).unwrap().is_empty());
}

#[test]
fn every_returned_edge_clears_the_threshold() {
    let threshold = dec!(0.03);
    let detector = OpportunityDetector::new(threshold);

    let games = vec![
        home_only_game(
            "BAL",
            "HOU",
            &[
                (Provider::OddsApi, dec!(0.60)),
                (Provider::Kalshi, dec!(0.54)),
            ],
        ),
        home_only_game(
            "KC",
            "BUF",
            &[
                (Provider::OddsApi, dec!(0.52)),
                (Provider::Kalshi, dec!(0.50)),
            ],
        ),
        home_only_game(
            "PHI",
            "DAL",
            &[
                (Provider::OddsApi, dec!(0.47)),
                (Provider::Polymarket, dec!(0.55)),
            ],
        ),
        home_only_game("SEA", "SF", &[(Provider::Kalshi, dec!(0.61))]),
    ];

    let opportunities = detector.detect(&games).unwrap();
    assert_eq!(opportunities.len(), 2);
    for opp in &opportunities {
        assert!(opp.edge() >= threshold);
        assert!(opp.kelly_fraction() >= Decimal::ZERO);
        assert!(opp.kelly_fraction() <= Decimal::ONE);
    }
}

#[test]
fn opportunities_rank_by_edge_then_expected_value() {
    let detector = OpportunityDetector::new(dec!(0.02));
    let games = vec![
        home_only_game(
            "KC",
            "BUF",
            &[
                (Provider::OddsApi, dec!(0.55)),
                (Provider::Kalshi, dec!(0.52)),
            ],
        ),
        home_only_game(
            "BAL",
            "HOU",
            &[
                (Provider::OddsApi, dec!(0.60)),
                (Provider::Kalshi, dec!(0.54)),
            ],
        ),
    ];

    let opportunities = detector.detect(&games).unwrap();
    assert_eq!(opportunities.len(), 2);
    assert!(opportunities[0].edge() >= opportunities[1].edge());
    assert_eq!(opportunities[0].edge(), dec!(0.06));
}

#[test]
fn single_provider_games_are_skipped_silently() {
    let detector = OpportunityDetector::new(dec!(0.02));
    let game = home_only_game("BAL", "HOU", &[(Provider::Kalshi, dec!(0.54))]);
    assert!(detector.detect(&[game]).unwrap().is_empty());
}

#[test]
fn malformed_quote_aborts_with_context() {
    let detector = OpportunityDetector::new(dec!(0.02));
    let mut game = home_only_game(
        "BAL",
        "HOU",
        &[
            (Provider::OddsApi, dec!(0.60)),
            (Provider::Kalshi, dec!(0.54)),
        ],
    );
    game.quotes.insert(
        Provider::Polymarket,
        GameQuotes::home_only(Quote::from_parts_unchecked(
            Provider::Polymarket,
            Side::Home,
            -110,
            dec!(1.909),
            dec!(0),
        )),
    );

    let err = detector.detect(&[game.clone()]).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("polymarket"), "got: {message}");
    assert!(message.contains(game.game_id.as_str()), "got: {message}");
}

#[test]
fn kelly_stays_clipped_for_razor_thin_edges() {
    let detector = OpportunityDetector::new(dec!(0.0));
    let game = home_only_game(
        "BAL",
        "HOU",
        &[
            (Provider::OddsApi, dec!(0.5001)),
            (Provider::Kalshi, dec!(0.5000)),
        ],
    );
    let opportunities = detector.detect(&[game]).unwrap();
    assert_eq!(opportunities.len(), 1);
    let kelly = opportunities[0].kelly_fraction();
    assert!(kelly >= Decimal::ZERO && kelly <= Decimal::ONE);
}
