// crates/huddle-consensus/src/report.rs
//
// Client-facing consensus result.
//
// Shape: { "leaderId", "top3Preferences": [label, ...],
//          "opinionWeight": [{ "userId", "weight" }, ...] }
// Categories appear as display labels and weights are rounded to two
// decimals.

use serde::{Deserialize, Serialize};

use huddle_core::MemberId;

use crate::engine::ConsensusOutcome;

/// One entry of the `opinionWeight` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpinionWeightEntry {
    pub user_id: MemberId,
    pub weight: f64,
}

/// The consensus result as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusReport {
    pub leader_id: MemberId,
    pub top3_preferences: Vec<String>,
    pub opinion_weight: Vec<OpinionWeightEntry>,
}

impl From<&ConsensusOutcome> for ConsensusReport {
    fn from(outcome: &ConsensusOutcome) -> Self {
        Self {
            leader_id: outcome.leader.leader_id.clone(),
            top3_preferences: outcome
                .top_preferences
                .iter()
                .map(|c| c.label().to_string())
                .collect(),
            opinion_weight: outcome
                .opinion_weights
                .iter()
                .map(|w| OpinionWeightEntry {
                    user_id: w.member_id.clone(),
                    weight: w.rounded(),
                })
                .collect(),
        }
    }
}

impl ConsensusReport {
    /// Serialize to a compact JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
