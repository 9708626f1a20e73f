use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal_macros::dec;

use linesman::domain::{
    GameAligner, GameQuotes, GameRecord, Provider, Quote, Side, Sport, SportConfig, TeamId,
};

fn nfl_aligner() -> GameAligner {
    GameAligner::new(Sport::Nfl, SportConfig::tuned_for(Sport::Nfl)).unwrap()
}

fn mlb_aligner() -> GameAligner {
    GameAligner::new(Sport::Mlb, SportConfig::tuned_for(Sport::Mlb)).unwrap()
}

fn kickoff(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 7, hour, 0, 0).unwrap()
}

fn record(
    sport: Sport,
    provider: Provider,
    home: &str,
    away: &str,
    time: Option<DateTime<Utc>>,
    home_probability: rust_decimal::Decimal,
) -> GameRecord {
    let quote = Quote::from_probability(provider, Side::Home, home_probability, dec!(0)).unwrap();
    GameRecord::new(
        sport,
        TeamId::from(home),
        TeamId::from(away),
        time,
        provider,
        GameQuotes::home_only(quote),
    )
}

#[test]
fn aligns_across_provider_naming_conventions() {
    let aligner = nfl_aligner();
    let sharp = vec![record(
        Sport::Nfl,
        Provider::OddsApi,
        "Baltimore Ravens",
        "Houston Texans",
        Some(kickoff(17)),
        dec!(0.60),
    )];
    let market = vec![record(
        Sport::Nfl,
        Provider::Kalshi,
        "BAL",
        "Texans",
        Some(kickoff(17)),
        dec!(0.55),
    )];

    let result = aligner.align(&sharp, &market);
    assert_eq!(result.matched_pairs.len(), 1);
    assert!(result.unmatched_a.is_empty());
    assert!(result.unmatched_b.is_empty());

    let pair = &result.matched_pairs[0];
    assert!(!pair.flipped);
    assert!(pair.confidence >= 0.9, "confidence was {}", pair.confidence);

    let merged = pair.merged();
    assert_eq!(merged.provider_count(), 2);
}

#[test]
fn alignment_is_idempotent() {
    let aligner = nfl_aligner();
    let a = vec![
        record(
            Sport::Nfl,
            Provider::OddsApi,
            "Baltimore Ravens",
            "Houston Texans",
            Some(kickoff(17)),
            dec!(0.60),
        ),
        record(
            Sport::Nfl,
            Provider::OddsApi,
            "Kansas City Chiefs",
            "Buffalo Bills",
            Some(kickoff(20)),
            dec!(0.55),
        ),
    ];
    let b = vec![
        record(
            Sport::Nfl,
            Provider::Kalshi,
            "Chiefs",
            "Bills",
            Some(kickoff(21)),
            dec!(0.52),
        ),
        record(
            Sport::Nfl,
            Provider::Kalshi,
            "Ravens",
            "Texans",
            Some(kickoff(18)),
            dec!(0.57),
        ),
    ];

    let first = aligner.align(&a, &b);
    let second = aligner.align(&a, &b);

    let ids = |result: &linesman::domain::AlignmentResult| {
        result
            .matched_pairs
            .iter()
            .map(|p| (p.a.game_id.clone(), p.b.game_id.clone(), p.flipped))
            .collect::<Vec<_>>()
    };
    assert_eq!(ids(&first), ids(&second));
    assert_eq!(first.matched_pairs.len(), 2);
}

#[test]
fn alignment_is_symmetric_modulo_order() {
    let aligner = nfl_aligner();
    let a = vec![
        record(
            Sport::Nfl,
            Provider::OddsApi,
            "Baltimore Ravens",
            "Houston Texans",
            Some(kickoff(17)),
            dec!(0.60),
        ),
        record(
            Sport::Nfl,
            Provider::OddsApi,
            "Kansas City Chiefs",
            "Buffalo Bills",
            Some(kickoff(20)),
            dec!(0.55),
        ),
    ];
    let b = vec![
        record(
            Sport::Nfl,
            Provider::Kalshi,
            "Ravens",
            "Texans",
            Some(kickoff(18)),
            dec!(0.57),
        ),
        record(
            Sport::Nfl,
            Provider::Kalshi,
            "Chiefs",
            "Bills",
            Some(kickoff(21)),
            dec!(0.52),
        ),
    ];

    let forward = aligner.align(&a, &b);
    let backward = aligner.align(&b, &a);

    let unordered = |result: &linesman::domain::AlignmentResult| {
        let mut pairs: Vec<_> = result
            .matched_pairs
            .iter()
            .map(|p| {
                let mut ids = [p.a.game_id.clone(), p.b.game_id.clone()];
                ids.sort();
                ids
            })
            .collect();
        pairs.sort();
        pairs
    };
    assert_eq!(unordered(&forward), unordered(&backward));
}

#[test]
fn unmatched_games_are_returned_not_raised() {
    let aligner = mlb_aligner();
    let game_day = Utc.with_ymd_and_hms(2024, 9, 5, 23, 0, 0).unwrap();

    let a = vec![record(
        Sport::Mlb,
        Provider::OddsApi,
        "BOS",
        "NYY",
        Some(game_day),
        dec!(0.48),
    )];
    // No record within the time window for any pair involving NYY/BOS.
    let b = vec![record(
        Sport::Mlb,
        Provider::Kalshi,
        "SF",
        "LAD",
        Some(game_day),
        dec!(0.50),
    )];

    let result = aligner.align(&a, &b);
    assert!(result.matched_pairs.is_empty());
    assert_eq!(result.unmatched_a.len(), 1);
    assert_eq!(result.unmatched_a[0].game_id.as_str(), "mlb-nyy-bos-20240905");
    assert_eq!(result.unmatched_b.len(), 1);
}

#[test]
fn time_window_excludes_stale_listings() {
    let aligner = mlb_aligner();
    let a = vec![record(
        Sport::Mlb,
        Provider::OddsApi,
        "Boston Red Sox",
        "New York Yankees",
        Some(kickoff(17)),
        dec!(0.48),
    )];
    // Same matchup, but three days out: beyond the MLB proximity window
    // (a different game of the series).
    let b = vec![record(
        Sport::Mlb,
        Provider::Kalshi,
        "Red Sox",
        "Yankees",
        Some(kickoff(17) + Duration::days(3)),
        dec!(0.52),
    )];

    let result = aligner.align(&a, &b);
    assert!(result.matched_pairs.is_empty());
    assert_eq!(result.unmatched_a.len(), 1);
    assert_eq!(result.unmatched_b.len(), 1);
}

#[test]
fn flipped_listings_match_and_merge_onto_correct_sides() {
    let aligner = nfl_aligner();
    let a = vec![record(
        Sport::Nfl,
        Provider::OddsApi,
        "Baltimore Ravens",
        "Houston Texans",
        Some(kickoff(17)),
        dec!(0.60),
    )];
    // Provider B lists the matchup with home/away swapped.
    let b = vec![record(
        Sport::Nfl,
        Provider::Kalshi,
        "Texans",
        "Ravens",
        Some(kickoff(17)),
        dec!(0.42),
    )];

    let result = aligner.align(&a, &b);
    assert_eq!(result.matched_pairs.len(), 1);
    let pair = &result.matched_pairs[0];
    assert!(pair.flipped);

    // B's "home" 0.42 quote belongs to the Texans, which are away in A's
    // orientation.
    let merged = pair.merged();
    let kalshi = &merged.quotes[&Provider::Kalshi];
    let away = kalshi.side(Side::Away).expect("flipped quote lands on away");
    assert_eq!(away.outcome(), Side::Away);
    assert!((away.implied_probability() - dec!(0.42)).abs() < dec!(0.01));
    assert!(kalshi.side(Side::Home).is_none());
}

#[test]
fn ties_break_toward_smaller_time_offset() {
    let aligner = mlb_aligner();
    let a = vec![record(
        Sport::Mlb,
        Provider::OddsApi,
        "Boston Red Sox",
        "New York Yankees",
        Some(kickoff(17)),
        dec!(0.48),
    )];
    // Doubleheader: two candidate listings, identical teams, different start
    // times. The closer listing must win.
    let b = vec![
        record(
            Sport::Mlb,
            Provider::Kalshi,
            "Red Sox",
            "Yankees",
            Some(kickoff(21)),
            dec!(0.51),
        ),
        record(
            Sport::Mlb,
            Provider::Kalshi,
            "Red Sox",
            "Yankees",
            Some(kickoff(18)),
            dec!(0.52),
        ),
    ];

    let result = aligner.align(&a, &b);
    assert_eq!(result.matched_pairs.len(), 1);
    let pair = &result.matched_pairs[0];
    assert_eq!(pair.time_offset_seconds, Some(3600));
    assert_eq!(result.unmatched_b.len(), 1);
}

#[test]
fn align_many_folds_unmatched_records_through() {
    let aligner = nfl_aligner();
    let lists = vec![
        vec![record(
            Sport::Nfl,
            Provider::OddsApi,
            "Baltimore Ravens",
            "Houston Texans",
            Some(kickoff(17)),
            dec!(0.60),
        )],
        vec![
            record(
                Sport::Nfl,
                Provider::Kalshi,
                "Ravens",
                "Texans",
                Some(kickoff(17)),
                dec!(0.55),
            ),
            record(
                Sport::Nfl,
                Provider::Kalshi,
                "Chiefs",
                "Bills",
                Some(kickoff(20)),
                dec!(0.52),
            ),
        ],
    ];

    let merged = aligner.align_many(&lists);
    assert_eq!(merged.len(), 2);

    let multi: Vec<_> = merged.iter().filter(|r| r.provider_count() == 2).collect();
    assert_eq!(multi.len(), 1);
    assert_eq!(multi[0].matchup(), "Houston Texans @ Baltimore Ravens");
}
