//! Team-name canonicalization through per-sport alias tables.

use std::collections::{BTreeMap, HashMap};

use crate::domain::ids::TeamId;
use crate::domain::sport::Sport;

use super::teams;

/// Normalize a surface form for comparison: lowercase, alphanumeric only,
/// single-space separated.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Result of canonicalizing a raw team string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canonical {
    /// Canonical team code, or the normalized raw string when unrecognized.
    pub id: TeamId,
    /// Whether the surface form hit the alias table.
    pub recognized: bool,
}

/// Per-sport mapping from normalized surface forms to canonical team codes.
#[derive(Debug, Clone)]
pub struct AliasTable {
    sport: Sport,
    lookup: HashMap<String, TeamId>,
    team_count: usize,
}

impl AliasTable {
    /// Build a table from `(canonical, aliases)` rows. The canonical code is
    /// always registered as an alias for itself.
    pub fn from_rows<'a, I, A>(sport: Sport, rows: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, A)>,
        A: IntoIterator<Item = &'a str>,
    {
        let mut lookup = HashMap::new();
        let mut team_count = 0;
        for (canonical, aliases) in rows {
            team_count += 1;
            let id = TeamId::from(canonical);
            lookup.insert(normalize(canonical), id.clone());
            for alias in aliases {
                lookup.insert(normalize(alias), id.clone());
            }
        }
        Self {
            sport,
            lookup,
            team_count,
        }
    }

    /// The built-in table for a sport, if one ships with the engine.
    pub fn builtin(sport: Sport) -> Option<Self> {
        let rows = match sport {
            Sport::Nfl => teams::nfl(),
            Sport::Mlb => teams::mlb(),
            Sport::Nba => teams::nba(),
            Sport::Nhl => teams::nhl(),
            Sport::Ncaaf | Sport::Ncaab => return None,
        };
        Some(Self::from_rows(
            sport,
            rows.iter().map(|(c, a)| (*c, a.iter().copied())),
        ))
    }

    /// The built-in table extended with configured overrides. Returns `None`
    /// when neither source provides any teams.
    pub fn with_overrides(
        sport: Sport,
        overrides: &BTreeMap<String, Vec<String>>,
    ) -> Option<Self> {
        let mut table = match Self::builtin(sport) {
            Some(table) => table,
            None if overrides.is_empty() => return None,
            None => Self {
                sport,
                lookup: HashMap::new(),
                team_count: 0,
            },
        };
        for (canonical, aliases) in overrides {
            let id = TeamId::from(canonical.as_str());
            if table.lookup.insert(normalize(canonical), id.clone()).is_none() {
                table.team_count += 1;
            }
            for alias in aliases {
                table.lookup.insert(normalize(alias), id.clone());
            }
        }
        Some(table)
    }

    /// Sport this table canonicalizes for.
    pub fn sport(&self) -> Sport {
        self.sport
    }

    /// Number of canonical teams in the table.
    pub fn team_count(&self) -> usize {
        self.team_count
    }

    /// Canonicalize a raw team string.
    ///
    /// Unknown surface forms are kept as their normalized text and flagged,
    /// so downstream matching can fall back to fuzzy comparison instead of
    /// discarding the record.
    pub fn canonicalize(&self, raw: &str) -> Canonical {
        let normalized = normalize(raw);
        match self.lookup.get(&normalized) {
            Some(id) => Canonical {
                id: id.clone(),
                recognized: true,
            },
            None => Canonical {
                id: TeamId::new(normalized),
                recognized: false,
            },
        }
    }
}
