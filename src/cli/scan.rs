//! The `scan` subcommand: fetch, align, detect, report.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tabled::{Table, Tabled};
use tracing::{info, warn};

use crate::cli::output;
use crate::config::Config;
use crate::domain::{
    DataAvailability, GameAligner, GameRecord, Opportunity, OpportunityDetector, Provider,
};
use crate::provider::{
    KalshiClient, OddsApiClient, PolymarketClient, ProviderClient, TimeWindow,
};

use super::ScanArgs;

#[derive(Tabled)]
struct OpportunityRow {
    #[tabled(rename = "Game")]
    game: String,
    #[tabled(rename = "Side")]
    side: String,
    #[tabled(rename = "Bet At")]
    bet: String,
    #[tabled(rename = "Benchmark")]
    benchmark: String,
    #[tabled(rename = "Edge")]
    edge: String,
    #[tabled(rename = "EV")]
    expected_value: String,
    #[tabled(rename = "Kelly")]
    kelly: String,
}

pub async fn run(args: &ScanArgs) -> anyhow::Result<()> {
    let config = Config::load_or_default(&args.config)?;
    config.init_logging();

    let sport = args.sport;
    let mut sport_config = config.sport(sport);
    if let Some(min_edge) = args.min_edge {
        sport_config.min_edge_threshold = min_edge;
    }

    let aligner = GameAligner::new(sport, sport_config.clone())?;
    let aliases = aligner.aliases().clone();
    let window = TimeWindow::next_days(args.days);

    info!(%sport, days = args.days, "starting scan pass");

    // Fetch every enabled provider concurrently; alignment and detection
    // wait for all of them so a pass never runs on partially fetched data.
    let providers = &config.providers;
    let odds_api = providers.odds_api.enabled.then(|| {
        OddsApiClient::new(providers.odds_api.clone(), aliases.clone())
    });
    let kalshi = providers.kalshi.enabled.then(|| {
        KalshiClient::new(providers.kalshi.clone(), aliases.clone())
    });
    let polymarket = providers.polymarket.enabled.then(|| {
        PolymarketClient::new(providers.polymarket.clone(), aliases.clone())
    });

    let (odds_api_result, kalshi_result, polymarket_result) = tokio::join!(
        fetch_optional(odds_api.as_ref(), sport, &window),
        fetch_optional(kalshi.as_ref(), sport, &window),
        fetch_optional(polymarket.as_ref(), sport, &window),
    );

    let mut available: Vec<(Provider, Vec<GameRecord>)> = Vec::new();
    let mut unavailable: Vec<(Provider, String)> = Vec::new();
    for (provider, availability) in [odds_api_result, kalshi_result, polymarket_result]
        .into_iter()
        .flatten()
    {
        match availability {
            DataAvailability::Available(records) => available.push((provider, records)),
            DataAvailability::Unavailable { reason, .. } => {
                warn!(%provider, %reason, "provider unavailable for this pass");
                unavailable.push((provider, reason));
            }
        }
    }

    output::section(&format!("Scan: {sport}"));
    for (provider, records) in &available {
        output::key_value(provider.as_str(), format!("{} games", records.len()));
    }
    for (provider, reason) in &unavailable {
        output::warn(&format!("{provider} unavailable: {reason}"));
    }

    if available.len() < 2 {
        output::warn(
            "need at least two available providers to compare prices; nothing to scan",
        );
        return Ok(());
    }

    let lists: Vec<Vec<GameRecord>> = available.into_iter().map(|(_, r)| r).collect();
    let merged = aligner.align_many(&lists);
    let multi_provider = merged
        .iter()
        .filter(|record| record.provider_count() >= 2)
        .count();

    let detector = OpportunityDetector::new(sport_config.min_edge_threshold);
    let opportunities = detector.detect(&merged)?;

    output::note(&format!(
        "{} games total, {} quoted by multiple providers",
        merged.len(),
        multi_provider
    ));

    if opportunities.is_empty() {
        output::ok(&format!(
            "no mispricings above the {} edge threshold",
            pct(sport_config.min_edge_threshold)
        ));
        return Ok(());
    }

    render(&opportunities, &merged);
    output::ok(&format!("{} mispricings found", opportunities.len()));
    Ok(())
}

/// Fetch from one optional client, folding the outcome into an explicit
/// availability value instead of aborting the whole pass.
async fn fetch_optional<C: ProviderClient>(
    client: Option<&C>,
    sport: crate::domain::Sport,
    window: &TimeWindow,
) -> Option<(Provider, DataAvailability)> {
    let client = client?;
    let availability = match client.fetch_games(sport, window).await {
        Ok(records) => DataAvailability::Available(records),
        Err(err) => DataAvailability::Unavailable {
            provider: client.provider(),
            reason: err.to_string(),
        },
    };
    Some((client.provider(), availability))
}

fn render(opportunities: &[Opportunity], merged: &[GameRecord]) {
    let by_id: BTreeMap<_, _> = merged.iter().map(|r| (r.game_id.clone(), r)).collect();

    let rows: Vec<OpportunityRow> = opportunities
        .iter()
        .map(|opp| {
            let game = by_id
                .get(opp.game_id())
                .map(|record| record.matchup())
                .unwrap_or_else(|| opp.game_id().to_string());
            OpportunityRow {
                game,
                side: opp.recommended_side().to_string(),
                bet: format!(
                    "{} @ {:.2}",
                    opp.bet_provider(),
                    opp.bet_decimal_odds()
                ),
                benchmark: opp.benchmark_provider().to_string(),
                edge: pct(opp.edge()),
                expected_value: pct(opp.expected_value()),
                kelly: pct(opp.kelly_fraction()),
            }
        })
        .collect();

    let table = Table::new(rows).to_string();
    println!();
    for line in table.lines() {
        println!("  {line}");
    }
    println!();
}

fn pct(value: Decimal) -> String {
    format!("{:.1}%", value * Decimal::from(100))
}
