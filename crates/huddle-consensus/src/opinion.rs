// crates/huddle-consensus/src/opinion.rs
//
// Opinion weights: each member's say in the final decision, derived only
// from their position in the leader ranking.

use serde::{Deserialize, Serialize};

use huddle_core::MemberId;

/// A member's normalized voting weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpinionWeight {
    pub member_id: MemberId,
    /// Exact share `(N - r) / (N (N + 1) / 2)` for rank `r`.
    pub weight: f64,
}

impl OpinionWeight {
    /// Weight rounded to two decimals for presentation.
    pub fn rounded(&self) -> f64 {
        round_to_hundredths(self.weight)
    }
}

/// Distribute weights over members in ranked order (index 0 = most influential).
///
/// Rank `r` gets raw weight `N - r`; weights are divided by `N (N + 1) / 2`
/// so they sum to 1 and never increase with rank.
pub fn distribute_opinion_weights(ranked: &[MemberId]) -> Vec<OpinionWeight> {
    let n = ranked.len();
    if n == 0 {
        return Vec::new();
    }
    let total = (n * (n + 1) / 2) as f64;
    ranked
        .iter()
        .enumerate()
        .map(|(rank, id)| OpinionWeight {
            member_id: id.clone(),
            weight: (n - rank) as f64 / total,
        })
        .collect()
}

/// Round to two decimal places the way `{:.2}` prints the value.
///
/// Formatting rounds the exact binary value with ties to even, so 0.125
/// becomes 0.12 and 0.075 (stored just below) becomes 0.07.
pub(crate) fn round_to_hundredths(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
