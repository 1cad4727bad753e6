
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

lazy_static! {
    /// The standard severity order used by variant effect annotators, MODIFIER < LOW < MODERATE < HIGH
    pub static ref DEFAULT_IMPACT_RANKS: BTreeMap<String, u8> = [
        ("HIGH", 3),
        ("MODERATE", 2),
        ("LOW", 1),
        ("MODIFIER", 0)
    ].into_iter()
        .map(|(label, rank)| (label.to_string(), rank))
        .collect();
}

/// Rank used when a gene STATE is not itself a known impact label; this is MODERATE in the default table
pub const DEFAULT_THRESHOLD: u8 = 2;

/// Immutable mapping from impact labels to ordinal severity.
/// This is loaded once and shared read-only by every clause evaluation.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ImpactRanking {
    /// Map from impact label to rank, higher is more severe
    ranks: BTreeMap<String, u8>,
    /// The rank to require when the expected label is unrecognized
    #[serde(default = "default_threshold")]
    default_threshold: u8
}

fn default_threshold() -> u8 {
    DEFAULT_THRESHOLD
}

impl Default for ImpactRanking {
    fn default() -> Self {
        Self {
            ranks: DEFAULT_IMPACT_RANKS.clone(),
            default_threshold: DEFAULT_THRESHOLD
        }
    }
}

impl ImpactRanking {
    /// Constructor for a custom table
    pub fn new(ranks: BTreeMap<String, u8>, default_threshold: u8) -> Self {
        Self {
            ranks, default_threshold
        }
    }

    /// Returns the rank of a label, or None if the label is not in the table
    pub fn rank(&self, label: &str) -> Option<u8> {
        self.ranks.get(label).copied()
    }

    /// The rank a clause must reach; unrecognized labels fall back to the default threshold
    pub fn expected_rank(&self, expected_label: &str) -> u8 {
        self.rank(expected_label).unwrap_or(self.default_threshold)
    }

    /// Returns true if the most severe observed rank meets or exceeds the expected one.
    /// # Arguments
    /// * `expected_label` - the STATE from a gene clause, may be any token
    /// * `observed_ranks` - ranks of every annotated variant in the region; empty never matches
    pub fn meets_threshold(&self, expected_label: &str, observed_ranks: &[u8]) -> bool {
        match observed_ranks.iter().max() {
            Some(&max_rank) => max_rank >= self.expected_rank(expected_label),
            None => false
        }
    }

    pub fn ranks(&self) -> &BTreeMap<String, u8> {
        &self.ranks
    }

    pub fn default_threshold(&self) -> u8 {
        self.default_threshold
    }
}
