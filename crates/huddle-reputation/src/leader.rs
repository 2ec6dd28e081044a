// crates/huddle-reputation/src/leader.rs
//
// Leader selection: rank members by combined trust + similarity influence.
//
// The member order produced here is the only input to opinion weighting, so
// ties must resolve deterministically: equal scores keep the rating table's
// first-seen order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use huddle_core::MemberId;

use crate::similarity::SimilarityMatrix;
use crate::trust_matrix::TrustMatrix;

/// Constant offset on the trust side of the influence score.
///
/// Influence has been scored as `sum(trust row) - 1 + sum(similarity row) - 1`
/// with trust's diagonal at 0 and similarity's at 1. With both sums taken
/// over other members only, that formula leaves -1 on the trust side. It
/// shifts every member equally and never changes the ranking.
const TRUST_SCORE_OFFSET: f64 = -1.0;

/// One member's influence breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMember {
    /// Row position in the source rating table.
    pub index: usize,
    pub member_id: MemberId,
    pub trust_score: f64,
    pub similarity_score: f64,
    /// `trust_score + similarity_score`.
    pub combined_score: f64,
}

/// Outcome of leader selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderResult {
    /// Row position of the leader in the source rating table.
    pub leader_index: usize,
    pub leader_id: MemberId,
    /// Leader's combined score over `N - 1`, clamped to [0.0, 1.0].
    pub leader_impact: f64,
    /// All members, combined score descending, ties in table order.
    pub ranking: Vec<RankedMember>,
}

impl LeaderResult {
    /// Member ids in ranked order.
    pub fn ranked_ids(&self) -> Vec<MemberId> {
        self.ranking.iter().map(|r| r.member_id.clone()).collect()
    }
}

/// Rank members and select the leader.
///
/// # Arguments
/// * `members` - Member ids in rating-table order.
/// * `trust` - Directional trust matrix over the same members.
/// * `similarity` - Similarity matrix over the same members.
///
/// Returns `None` when there are fewer than two members, since `N - 1`
/// normalization is undefined there.
pub fn select_leader(
    members: &[MemberId],
    trust: &TrustMatrix,
    similarity: &SimilarityMatrix,
) -> Option<LeaderResult> {
    let n = members.len();
    if n < 2 || trust.size() != n || similarity.size() != n {
        return None;
    }

    let mut ranking: Vec<RankedMember> = members
        .iter()
        .enumerate()
        .map(|(index, id)| {
            let trust_score = trust.outgoing_sum(index) + TRUST_SCORE_OFFSET;
            let similarity_score = similarity.others_sum(index);
            RankedMember {
                index,
                member_id: id.clone(),
                trust_score,
                similarity_score,
                combined_score: trust_score + similarity_score,
            }
        })
        .collect();

    // sort_by is stable: equal scores keep table order.
    ranking.sort_by(|a, b| {
        b.combined_score
            .partial_cmp(&a.combined_score)
            .unwrap_or(Ordering::Equal)
    });

    let leader = &ranking[0];
    let leader_impact = (leader.combined_score / (n - 1) as f64).clamp(0.0, 1.0);

    debug!(
        leader = %leader.member_id,
        combined_score = leader.combined_score,
        leader_impact,
        "Selected group leader"
    );

    Some(LeaderResult {
        leader_index: leader.index,
        leader_id: leader.member_id.clone(),
        leader_impact,
        ranking,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use huddle_core::{Category, RatingMatrix};

    fn table(rows: &[(&str, Vec<f64>)]) -> RatingMatrix {
        let k = rows[0].1.len();
        let mut m = RatingMatrix::new(Category::ALL[..k].to_vec()).unwrap();
        for (id, r) in rows {
            m.push_member((*id).into(), r.clone()).unwrap();
        }
        m
    }

    fn run(m: &RatingMatrix) -> Option<LeaderResult> {
        select_leader(
            m.members(),
            &TrustMatrix::from_ratings(m),
            &SimilarityMatrix::from_ratings(m),
        )
    }

    #[test]
    fn member_closest_to_the_group_leads() {
        let m = table(&[
            ("a", vec![5.0, 4.0, 1.0]),
            ("b", vec![5.0, 4.0, 2.0]),
            ("c", vec![1.0, 0.0, 5.0]),
        ]);
        let result = run(&m).unwrap();
        assert_eq!(result.leader_id.as_str(), "b");
        let order: Vec<&str> = result.ranking.iter().map(|r| r.member_id.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
        assert!(result.leader_impact > 0.0 && result.leader_impact < 0.05);
    }

    #[test]
    fn ties_resolve_in_table_order() {
        let m = table(&[("a", vec![5.0, 0.0]), ("b", vec![5.0, 0.0])]);
        let result = run(&m).unwrap();
        assert_eq!(result.leader_id.as_str(), "a");
        assert_eq!(result.ranked_ids(), vec![MemberId::new("a"), MemberId::new("b")]);
        let r = &result.ranking[0];
        assert_eq!(r.combined_score, result.ranking[1].combined_score);
    }

    #[test]
    fn scores_exclude_self_and_keep_trust_offset() {
        let m = table(&[("a", vec![5.0, 0.0]), ("b", vec![5.0, 0.0])]);
        let result = run(&m).unwrap();
        // trust(a, b) = 1, similarity(a, b) = 1.
        let a = &result.ranking[0];
        assert!((a.trust_score - 0.0).abs() < 1e-12);
        assert!((a.similarity_score - 1.0).abs() < 1e-12);
        assert!((result.leader_impact - 1.0).abs() < 1e-12);
    }

    #[test]
    fn impact_is_clamped_into_unit_interval() {
        // Strongly anti-correlated members drive combined scores negative.
        let m = table(&[("a", vec![5.0, 0.0, 0.0]), ("b", vec![0.0, 0.0, 5.0])]);
        let result = run(&m).unwrap();
        assert!(result.ranking[0].combined_score < 0.0);
        assert_eq!(result.leader_impact, 0.0);
    }

    #[test]
    fn fewer_than_two_members_has_no_leader() {
        let m = table(&[("solo", vec![3.0, 1.0])]);
        assert!(run(&m).is_none());
    }
}
