//! Odds conversions between American, decimal, and implied-probability forms.
//!
//! All conversions are pure functions over `Decimal` inputs. Two paths exist
//! for turning a prediction-market price into American odds:
//!
//! - [`probability_to_american`] applies the direct formula with an optional
//!   platform fee haircut on the probability side.
//! - [`kalshi_cents_to_american`] consults the observed Kalshi price table,
//!   which embeds the platform's actual pricing and is not derivable from
//!   the direct formula.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::DomainError;

/// Observed Kalshi cents-to-American-odds price table, 1¢ through 99¢.
///
/// Carried verbatim from the platform's published contract pricing. Note the
/// rows are not reproducible from the direct probability formula: the table
/// embeds Kalshi's fee schedule, most visibly near the midpoint (50¢ maps to
/// -107 rather than -100).
const CENTS_TO_AMERICAN: [i64; 99] = [
    9253, 4573, 3015, 2243, 1773, 1463, 1241, 1074, 945, 841, // 1-10
    756, 685, 625, 574, 529, 490, 456, 425, 398, 373, // 11-20
    351, 331, 312, 295, 280, 265, 252, 240, 228, 217, // 21-30
    207, 198, 189, 181, 173, 166, 159, 152, 146, 140, // 31-40
    134, 129, 123, 119, 114, 109, 105, 101, -103, -107, // 41-50
    -112, -116, -121, -126, -131, -137, -142, -148, -154, -161, // 51-60
    -168, -175, -182, -191, -199, -208, -218, -228, -238, -250, // 61-70
    -262, -276, -290, -305, -321, -339, -358, -379, -402, -427, // 71-80
    -456, -487, -522, -561, -606, -658, -719, -792, -881, -991, // 81-90
    -1133, -1316, -1559, -1898, -2396, -3169, -4279, -5151, -9901, // 91-99
];

/// Convert American odds to decimal odds.
///
/// # Errors
///
/// Returns [`DomainError::ZeroAmerican`] for `american == 0`, which has no
/// defined price.
pub fn american_to_decimal(american: i64) -> Result<Decimal, DomainError> {
    if american == 0 {
        return Err(DomainError::ZeroAmerican);
    }
    let hundred = Decimal::from(100);
    if american > 0 {
        Ok(Decimal::from(american) / hundred + Decimal::ONE)
    } else {
        Ok(hundred / Decimal::from(american.abs()) + Decimal::ONE)
    }
}

/// Convert decimal odds to implied probability.
///
/// # Errors
///
/// Returns [`DomainError::DecimalOutOfRange`] unless `decimal > 1.0`.
pub fn decimal_to_probability(decimal: Decimal) -> Result<Decimal, DomainError> {
    if decimal <= Decimal::ONE {
        return Err(DomainError::DecimalOutOfRange { decimal });
    }
    Ok(Decimal::ONE / decimal)
}

/// Convert a win probability to American odds, with an optional fee haircut.
///
/// The fee models a prediction-market platform's transaction cost and is
/// applied on the probability side: `adjusted = probability * (1 - fee)`.
/// Probabilities at or above one half produce negative (favorite) odds.
///
/// # Errors
///
/// Returns [`DomainError::ProbabilityOutOfRange`] unless `0 < probability < 1`
/// and the fee-adjusted probability stays inside (0, 1).
pub fn probability_to_american(probability: Decimal, fee: Decimal) -> Result<i64, DomainError> {
    if probability <= Decimal::ZERO || probability >= Decimal::ONE {
        return Err(DomainError::ProbabilityOutOfRange { probability });
    }
    let adjusted = probability * (Decimal::ONE - fee);
    if adjusted <= Decimal::ZERO || adjusted >= Decimal::ONE {
        return Err(DomainError::ProbabilityOutOfRange {
            probability: adjusted,
        });
    }

    let hundred = Decimal::from(100);
    let half = Decimal::new(5, 1);
    let raw = if adjusted >= half {
        -hundred * adjusted / (Decimal::ONE - adjusted)
    } else {
        hundred * (Decimal::ONE - adjusted) / adjusted
    };
    let rounded = raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    // The magnitude is bounded well inside i64 for probabilities that survive
    // Decimal's 28-digit precision.
    rounded
        .to_i64()
        .ok_or(DomainError::ProbabilityOutOfRange { probability })
}

/// Convert a Kalshi contract price in cents to American odds via the
/// observed price table.
///
/// # Errors
///
/// Returns [`DomainError::CentsOutOfRange`] unless `1 <= cents <= 99`.
pub fn kalshi_cents_to_american(cents: u32) -> Result<i64, DomainError> {
    if !(1..=99).contains(&cents) {
        return Err(DomainError::CentsOutOfRange { cents });
    }
    Ok(CENTS_TO_AMERICAN[(cents - 1) as usize])
}

/// Iterate the full observed price table as `(cents, american)` rows.
pub fn conversion_table() -> impl Iterator<Item = (u32, i64)> {
    (1..=99u32).map(|cents| (cents, CENTS_TO_AMERICAN[(cents - 1) as usize]))
}
