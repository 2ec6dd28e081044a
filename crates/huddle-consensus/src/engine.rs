// crates/huddle-consensus/src/engine.rs
//
// Consensus engine: fetch a group's ratings and run the full pipeline.
//
// Steps:
// 1. Validate the group id
// 2. Fetch the rating table from the provider (bounded by a timeout)
// 3. Reject empty, singleton, and oversized groups
// 4. Build trust and similarity matrices
// 5. Select the leader and rank members
// 6. Compute influence weights and aggregate consensus ratings
// 7. Reduce to top preferences and opinion weights
//
// Steps 4-7 are pure and synchronous. Every call builds its own matrices;
// nothing is cached or shared between calls.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use huddle_core::{
    Category, ConsensusRatingMatrix, GroupId, HuddleError, PreferenceMatrixProvider, RatingMatrix,
};
use huddle_reputation::{select_leader, LeaderResult, SimilarityMatrix, TrustMatrix};

use crate::aggregation::aggregate_consensus;
use crate::opinion::{distribute_opinion_weights, OpinionWeight};
use crate::preferences::top_preferences;
use crate::report::ConsensusReport;
use crate::weights::InfluenceWeights;

/// Limits applied by [`ConsensusEngine`] around each computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Largest group accepted. Cost grows with the square of group size.
    pub max_group_size: usize,
    /// Wall-clock bound on the provider fetch.
    pub fetch_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_group_size: 64,
            fetch_timeout: Duration::from_millis(5000),
        }
    }
}

/// Everything one consensus run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsensusOutcome {
    pub group_id: GroupId,
    pub leader: LeaderResult,
    /// Highest mean consensus categories, descending.
    pub top_preferences: Vec<Category>,
    /// Voting weights in ranked order.
    pub opinion_weights: Vec<OpinionWeight>,
    pub trust: TrustMatrix,
    pub similarity: SimilarityMatrix,
    pub consensus: ConsensusRatingMatrix,
}

impl ConsensusOutcome {
    /// The client-facing view of this outcome.
    pub fn report(&self) -> ConsensusReport {
        ConsensusReport::from(self)
    }
}

/// Run the consensus pipeline over an already-fetched rating table.
///
/// Fails with `EmptyGroup` for zero members and `InsufficientGroupSize` for
/// one. Numeric degeneracies (members who rated nothing, constant rating
/// vectors, zero weight denominators) resolve to 0 and never fail.
pub fn run_consensus(group_id: &GroupId, ratings: &RatingMatrix) -> Result<ConsensusOutcome, HuddleError> {
    match ratings.member_count() {
        0 => return Err(HuddleError::EmptyGroup(group_id.clone())),
        1 => {
            return Err(HuddleError::InsufficientGroupSize {
                group_id: group_id.clone(),
                members: 1,
            })
        }
        _ => {}
    }

    let trust = TrustMatrix::from_ratings(ratings);
    let similarity = SimilarityMatrix::from_ratings(ratings);
    debug!(
        group = %group_id,
        members = ratings.member_count(),
        categories = ratings.category_count(),
        "Built trust and similarity matrices"
    );

    let leader = select_leader(ratings.members(), &trust, &similarity).ok_or_else(|| {
        HuddleError::MalformedData(format!(
            "group {}: matrix sizes do not match the member list",
            group_id
        ))
    })?;

    let weights = InfluenceWeights::compute(&trust, &similarity, &leader);
    let consensus = aggregate_consensus(ratings, &weights)?;
    ensure_finite(group_id, &leader, &consensus)?;
    let top = top_preferences(&consensus);
    let opinion_weights = distribute_opinion_weights(&leader.ranked_ids());

    info!(
        group = %group_id,
        leader = %leader.leader_id,
        leader_impact = leader.leader_impact,
        "Consensus complete"
    );

    Ok(ConsensusOutcome {
        group_id: group_id.clone(),
        leader,
        top_preferences: top,
        opinion_weights,
        trust,
        similarity,
        consensus,
    })
}

/// Reject a run whose scores or consensus values overflowed.
///
/// Ratings are only bounded by `f64`, so extreme inputs can push the leader
/// score, a consensus cell, or a category mean to infinity or NaN.
fn ensure_finite(
    group_id: &GroupId,
    leader: &LeaderResult,
    consensus: &ConsensusRatingMatrix,
) -> Result<(), HuddleError> {
    if !leader.leader_impact.is_finite()
        || leader.ranking.iter().any(|r| !r.combined_score.is_finite())
    {
        return Err(HuddleError::MalformedData(format!(
            "group {}: ratings produce a non-finite leader score",
            group_id
        )));
    }
    let cells_finite = consensus.rows().iter().flatten().all(|c| c.is_finite());
    if !cells_finite || consensus.column_means().iter().any(|m| !m.is_finite()) {
        return Err(HuddleError::MalformedData(format!(
            "group {}: ratings produce non-finite consensus values",
            group_id
        )));
    }
    Ok(())
}

/// Fetches a group's ratings from a provider and runs [`run_consensus`].
pub struct ConsensusEngine<P> {
    provider: P,
    config: EngineConfig,
}

impl<P: PreferenceMatrixProvider> ConsensusEngine<P> {
    /// Create an engine with default limits.
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, EngineConfig::default())
    }

    pub fn with_config(provider: P, config: EngineConfig) -> Self {
        Self { provider, config }
    }

    /// Compute the consensus for `group_id`.
    ///
    /// The provider fetch is the only await point and is bounded by
    /// `fetch_timeout`. The rest of the computation is CPU-bound.
    pub async fn compute(&self, group_id: &str) -> Result<ConsensusOutcome, HuddleError> {
        let group_id = GroupId::parse(group_id)?;

        let ratings = tokio::time::timeout(
            self.config.fetch_timeout,
            self.provider.fetch_ratings(&group_id),
        )
        .await
        .map_err(|_| {
            HuddleError::Timeout(format!(
                "fetching ratings for group {} took longer than {:?}",
                group_id, self.config.fetch_timeout
            ))
        })??;

        let members = ratings.member_count();
        if members > self.config.max_group_size {
            return Err(HuddleError::GroupTooLarge {
                group_id,
                members,
                max: self.config.max_group_size,
            });
        }

        run_consensus(&group_id, &ratings)
    }

    /// Compute the consensus and return only the client-facing report.
    pub async fn compute_report(&self, group_id: &str) -> Result<ConsensusReport, HuddleError> {
        Ok(self.compute(group_id).await?.report())
    }
}
