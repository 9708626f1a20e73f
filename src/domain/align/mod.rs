//! Cross-provider game alignment.
//!
//! Providers spell teams differently, flip home/away, and report slightly
//! different start times for the same real-world event. The aligner
//! canonicalizes team names through a per-sport alias table, scores candidate
//! pairs as `team_match_score * time_proximity_score`, and keeps the
//! highest-confidence pairing above the sport's threshold.
//!
//! Unmatched records are returned, never raised; the only error path is a
//! sport with no alias table configured.

mod alias;
mod teams;

pub use alias::{normalize, AliasTable, Canonical};

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ConfigError;

use super::game::GameRecord;
use super::sport::Sport;

fn default_match_confidence_threshold() -> f64 {
    0.5
}

fn default_time_threshold_hours() -> f64 {
    12.0
}

fn default_fuzzy_match_threshold() -> f64 {
    0.85
}

fn default_min_edge_threshold() -> Decimal {
    Decimal::new(3, 2) // 0.03
}

/// Per-sport alignment and detection thresholds, plus alias overrides.
///
/// Loaded from the `[sports.*]` config tables; [`SportConfig::tuned_for`]
/// supplies the shipped defaults for each league.
#[derive(Debug, Clone, Deserialize)]
pub struct SportConfig {
    /// Minimum confidence for a pair to count as the same game.
    #[serde(default = "default_match_confidence_threshold")]
    pub match_confidence_threshold: f64,

    /// Maximum start-time skew between providers, in hours.
    #[serde(default = "default_time_threshold_hours")]
    pub time_threshold_hours: f64,

    /// Minimum Jaro-Winkler similarity for the fuzzy team-name fallback.
    #[serde(default = "default_fuzzy_match_threshold")]
    pub fuzzy_match_threshold: f64,

    /// Minimum implied-probability edge for the detector.
    #[serde(default = "default_min_edge_threshold")]
    pub min_edge_threshold: Decimal,

    /// Team alias overrides: canonical code -> surface forms. Extends (or,
    /// for college sports, provides) the built-in table.
    #[serde(default)]
    pub teams: BTreeMap<String, Vec<String>>,
}

impl Default for SportConfig {
    fn default() -> Self {
        Self {
            match_confidence_threshold: default_match_confidence_threshold(),
            time_threshold_hours: default_time_threshold_hours(),
            fuzzy_match_threshold: default_fuzzy_match_threshold(),
            min_edge_threshold: default_min_edge_threshold(),
            teams: BTreeMap::new(),
        }
    }
}

impl SportConfig {
    /// Shipped thresholds for a league.
    ///
    /// Baseball gets a tighter edge floor and shorter time window than the
    /// football default (doubleheaders sit hours apart); college sports get a
    /// stricter confidence bar since their alias coverage is user-supplied.
    pub fn tuned_for(sport: Sport) -> Self {
        let base = Self::default();
        match sport {
            Sport::Nfl => base,
            Sport::Mlb => Self {
                match_confidence_threshold: 0.55,
                time_threshold_hours: 8.0,
                min_edge_threshold: Decimal::new(2, 2),
                ..base
            },
            Sport::Nba | Sport::Nhl => Self {
                time_threshold_hours: 8.0,
                ..base
            },
            Sport::Ncaaf | Sport::Ncaab => Self {
                match_confidence_threshold: 0.6,
                fuzzy_match_threshold: 0.9,
                min_edge_threshold: Decimal::new(4, 2),
                ..base
            },
        }
    }
}

/// A pair of provider records judged to denote the same event.
#[derive(Debug, Clone)]
pub struct MatchedPair {
    pub a: GameRecord,
    pub b: GameRecord,
    /// Combined team/time confidence in [0, 1].
    pub confidence: f64,
    /// Whether `b` listed home/away opposite to `a`.
    pub flipped: bool,
    /// Absolute start-time offset, when both sides carry a timestamp.
    pub time_offset_seconds: Option<i64>,
}

impl MatchedPair {
    /// Merge `b`'s quotes into a copy of `a`, re-orienting them when the
    /// match was made with home/away flipped.
    pub fn merged(&self) -> GameRecord {
        let mut merged = self.a.clone();
        for (provider, quotes) in &self.b.quotes {
            let oriented = if self.flipped {
                quotes.clone().flipped()
            } else {
                quotes.clone()
            };
            match merged.quotes.entry(*provider) {
                Entry::Occupied(mut existing) => existing.get_mut().absorb(oriented),
                Entry::Vacant(slot) => {
                    slot.insert(oriented);
                }
            }
        }
        if merged.game_time.is_none() {
            merged.game_time = self.b.game_time;
        }
        merged
    }
}

/// Output of aligning two provider record sets.
#[derive(Debug, Clone, Default)]
pub struct AlignmentResult {
    pub matched_pairs: Vec<MatchedPair>,
    pub unmatched_a: Vec<GameRecord>,
    pub unmatched_b: Vec<GameRecord>,
}

impl AlignmentResult {
    /// Merged multi-provider records for every matched pair.
    pub fn merged_records(&self) -> Vec<GameRecord> {
        self.matched_pairs.iter().map(MatchedPair::merged).collect()
    }
}

/// Scored candidate pairing between one record from each side.
#[derive(Debug)]
struct Candidate {
    a_idx: usize,
    b_idx: usize,
    confidence: f64,
    flipped: bool,
    offset_seconds: Option<i64>,
    /// Symmetric tie-break keys (identical regardless of which list is "a").
    home_key: String,
    away_key: String,
    id_key: (String, String),
}

/// Matches equivalent game records across providers for one sport.
#[derive(Debug, Clone)]
pub struct GameAligner {
    config: SportConfig,
    aliases: AliasTable,
}

impl GameAligner {
    /// Build an aligner for a sport.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingAliasTable`] when the sport has neither
    /// a built-in alias table nor configured team overrides.
    pub fn new(sport: Sport, config: SportConfig) -> Result<Self, ConfigError> {
        let aliases = AliasTable::with_overrides(sport, &config.teams)
            .ok_or(ConfigError::MissingAliasTable { sport })?;
        Ok(Self { config, aliases })
    }

    /// Sport this aligner is configured for.
    pub fn sport(&self) -> Sport {
        self.aliases.sport()
    }

    /// The alias table in use (shared with the provider boundary).
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Align two provider record sets.
    ///
    /// Never fails: records without a counterpart land in `unmatched_a` /
    /// `unmatched_b`. Candidate selection is a global greedy pass over
    /// symmetric sort keys, so the result is deterministic and stable under
    /// swapping the two inputs.
    pub fn align(&self, a: &[GameRecord], b: &[GameRecord]) -> AlignmentResult {
        let a_teams: Vec<_> = a.iter().map(|r| self.canonical_pair(r)).collect();
        let b_teams: Vec<_> = b.iter().map(|r| self.canonical_pair(r)).collect();

        let mut candidates = Vec::new();
        for (a_idx, a_record) in a.iter().enumerate() {
            for (b_idx, b_record) in b.iter().enumerate() {
                if let Some(candidate) = self.score_pair(
                    a_idx,
                    a_record,
                    &a_teams[a_idx],
                    b_idx,
                    b_record,
                    &b_teams[b_idx],
                ) {
                    candidates.push(candidate);
                }
            }
        }

        candidates.sort_by(|x, y| {
            y.confidence
                .total_cmp(&x.confidence)
                .then_with(|| {
                    let x_off = (x.offset_seconds.is_none(), x.offset_seconds.unwrap_or(0));
                    let y_off = (y.offset_seconds.is_none(), y.offset_seconds.unwrap_or(0));
                    x_off.cmp(&y_off)
                })
                .then_with(|| x.home_key.cmp(&y.home_key))
                .then_with(|| x.away_key.cmp(&y.away_key))
                .then_with(|| x.id_key.cmp(&y.id_key))
        });

        let mut used_a = vec![false; a.len()];
        let mut used_b = vec![false; b.len()];
        let mut matched_pairs = Vec::new();
        for candidate in candidates {
            if used_a[candidate.a_idx] || used_b[candidate.b_idx] {
                continue;
            }
            used_a[candidate.a_idx] = true;
            used_b[candidate.b_idx] = true;
            matched_pairs.push(MatchedPair {
                a: a[candidate.a_idx].clone(),
                b: b[candidate.b_idx].clone(),
                confidence: candidate.confidence,
                flipped: candidate.flipped,
                time_offset_seconds: candidate.offset_seconds,
            });
        }

        let unmatched_a = a
            .iter()
            .zip(&used_a)
            .filter(|(_, used)| !**used)
            .map(|(record, _)| record.clone())
            .collect();
        let unmatched_b = b
            .iter()
            .zip(&used_b)
            .filter(|(_, used)| !**used)
            .map(|(record, _)| record.clone())
            .collect();

        AlignmentResult {
            matched_pairs,
            unmatched_a,
            unmatched_b,
        }
    }

    /// Fold several provider record sets into merged multi-provider records.
    ///
    /// The first list anchors; every unmatched record is carried through as
    /// its own single-provider group so the caller sees the full universe.
    pub fn align_many(&self, lists: &[Vec<GameRecord>]) -> Vec<GameRecord> {
        let mut iter = lists.iter();
        let mut merged: Vec<GameRecord> = match iter.next() {
            Some(first) => first.clone(),
            None => return Vec::new(),
        };
        for next in iter {
            let result = self.align(&merged, next);
            let mut folded = result.merged_records();
            folded.extend(result.unmatched_a);
            folded.extend(result.unmatched_b);
            merged = folded;
        }
        merged
    }

    fn canonical_pair(&self, record: &GameRecord) -> (Canonical, Canonical) {
        (
            self.aliases.canonicalize(record.home_team.as_str()),
            self.aliases.canonicalize(record.away_team.as_str()),
        )
    }

    fn score_pair(
        &self,
        a_idx: usize,
        a_record: &GameRecord,
        a_teams: &(Canonical, Canonical),
        b_idx: usize,
        b_record: &GameRecord,
        b_teams: &(Canonical, Canonical),
    ) -> Option<Candidate> {
        let (a_home, a_away) = a_teams;
        let (b_home, b_away) = b_teams;

        // Direct orientation first, flipped as the symmetric fallback when a
        // provider listed home/away the other way around.
        let direct = self.team_score(a_home, b_home) * self.team_score(a_away, b_away);
        let crossed = self.team_score(a_home, b_away) * self.team_score(a_away, b_home);
        let (team_score, flipped) = if direct >= crossed {
            (direct, false)
        } else {
            (crossed, true)
        };
        if team_score <= 0.0 {
            return None;
        }

        let (time_score, offset_seconds) =
            self.time_score(a_record.game_time, b_record.game_time);
        let confidence = team_score * time_score;
        if confidence < self.config.match_confidence_threshold {
            return None;
        }

        let mut home_key = a_home.id.as_str().min(b_home.id.as_str()).to_string();
        let mut away_key = a_away.id.as_str().min(b_away.id.as_str()).to_string();
        if flipped {
            home_key = a_home.id.as_str().min(b_away.id.as_str()).to_string();
            away_key = a_away.id.as_str().min(b_home.id.as_str()).to_string();
        }
        let mut id_key = (
            a_record.game_id.as_str().to_string(),
            b_record.game_id.as_str().to_string(),
        );
        if id_key.1 < id_key.0 {
            id_key = (id_key.1, id_key.0);
        }

        Some(Candidate {
            a_idx,
            b_idx,
            confidence,
            flipped,
            offset_seconds,
            home_key,
            away_key,
            id_key,
        })
    }

    /// Score two canonicalized team names.
    ///
    /// Canonical equality scores 1.0. If canonicalization failed on either
    /// side, fall back to Jaro-Winkler similarity gated by the configured
    /// threshold. Two recognized but different teams never match.
    fn team_score(&self, x: &Canonical, y: &Canonical) -> f64 {
        if x.id == y.id {
            return 1.0;
        }
        if x.recognized && y.recognized {
            return 0.0;
        }
        let similarity = strsim::jaro_winkler(
            &normalize(x.id.as_str()),
            &normalize(y.id.as_str()),
        );
        if similarity >= self.config.fuzzy_match_threshold {
            similarity
        } else {
            0.0
        }
    }

    /// Score start-time proximity: 1.0 at zero offset, decaying linearly to
    /// 0.0 at the configured threshold. Missing timestamps score a neutral
    /// 0.5 rather than excluding the pair.
    fn time_score(
        &self,
        a: Option<DateTime<Utc>>,
        b: Option<DateTime<Utc>>,
    ) -> (f64, Option<i64>) {
        let (a, b) = match (a, b) {
            (Some(a), Some(b)) => (a, b),
            _ => return (0.5, None),
        };
        let offset = (a - b).num_seconds().abs();
        let threshold = (self.config.time_threshold_hours * 3600.0) as i64;
        if threshold <= 0 || offset >= threshold {
            return (0.0, Some(offset));
        }
        let score = 1.0 - offset as f64 / threshold as f64;
        (score, Some(offset))
    }
}
