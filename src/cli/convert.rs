//! One-shot conversion utilities and config diagnostics.

use anyhow::bail;
use rust_decimal::Decimal;
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::config::Config;
use crate::domain::align::AliasTable;
use crate::domain::{odds, Sport};

use super::{ConfigPathArg, ConvertArgs, TableArgs};

/// Convert a single price and print the full representation triple.
pub fn run(args: &ConvertArgs) -> anyhow::Result<()> {
    let inputs =
        args.american.is_some() as u8 + args.probability.is_some() as u8 + args.cents.is_some() as u8;
    if inputs != 1 {
        bail!("provide exactly one of --american, --probability, or --cents");
    }

    let american = if let Some(american) = args.american {
        american
    } else if let Some(probability) = args.probability {
        odds::probability_to_american(probability, args.fee)?
    } else if let Some(cents) = args.cents {
        odds::kalshi_cents_to_american(cents)?
    } else {
        unreachable!("input count checked above");
    };

    let decimal = odds::american_to_decimal(american)?;
    let probability = odds::decimal_to_probability(decimal)?;

    output::section("Odds conversion");
    if let Some(cents) = args.cents {
        output::key_value("Kalshi price", format!("{cents}¢"));
    }
    if args.fee > Decimal::ZERO {
        output::key_value("Fee haircut", format!("{:.1}%", args.fee * Decimal::from(100)));
    }
    output::key_value("American", format!("{american:+}"));
    output::key_value("Decimal", format!("{decimal:.4}"));
    output::key_value(
        "Implied",
        format!("{:.2}%", probability * Decimal::from(100)),
    );
    Ok(())
}

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "Cents")]
    cents: String,
    #[tabled(rename = "American")]
    american: String,
    #[tabled(rename = "Implied")]
    implied: String,
}

/// Print the observed Kalshi conversion table for a cents range.
pub fn table(args: &TableArgs) -> anyhow::Result<()> {
    if args.start < 1 || args.end > 99 || args.start > args.end {
        bail!("cents range must satisfy 1 <= start <= end <= 99");
    }

    let rows: Vec<TableRow> = odds::conversion_table()
        .filter(|(cents, _)| (args.start..=args.end).contains(cents))
        .map(|(cents, american)| TableRow {
            cents: format!("{cents}¢"),
            american: format!("{american:+}"),
            implied: format!("{cents}%"),
        })
        .collect();

    output::section("Kalshi cents → American odds");
    let table = Table::new(rows).to_string();
    for line in table.lines() {
        println!("  {line}");
    }
    Ok(())
}

/// Validate a config file and report the effective per-sport settings.
pub fn check_config(args: &ConfigPathArg) -> anyhow::Result<()> {
    let config = Config::load(&args.config)?;
    output::ok(&format!("{} is valid", args.config.display()));

    output::section("Logging");
    output::key_value("level", &config.logging.level);
    output::key_value("format", &config.logging.format);

    output::section("Providers");
    output::key_value("odds_api", enabled_str(config.providers.odds_api.enabled));
    output::key_value("kalshi", enabled_str(config.providers.kalshi.enabled));
    output::key_value(
        "polymarket",
        enabled_str(config.providers.polymarket.enabled),
    );

    output::section("Sports");
    for sport in Sport::ALL {
        let sport_config = config.sport(sport);
        match AliasTable::with_overrides(sport, &sport_config.teams) {
            Some(aliases) => output::key_value(
                sport.as_str(),
                format!(
                    "{} teams, confidence >= {:.2}, edge >= {}, window {}h",
                    aliases.team_count(),
                    sport_config.match_confidence_threshold,
                    sport_config.min_edge_threshold,
                    sport_config.time_threshold_hours,
                ),
            ),
            None => output::warn(&format!(
                "{} has no alias table; configure [sports.{}.teams] to align it",
                sport, sport
            )),
        }
    }
    Ok(())
}

fn enabled_str(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}
