// crates/huddle-consensus/src/weights.rs
//
// Influence weight matrix for consensus aggregation.
//
// W[u][v] is how strongly member v's rating pulls member u's rating toward
// it. Built from trust(u, v) and similarity(u, v), with a boost when v is
// the group leader.

use serde::{Deserialize, Serialize};

use huddle_reputation::{LeaderResult, SimilarityMatrix, TrustMatrix};

/// Influence weight of member v on member u.
///
/// * Leader: `0.5 * (leader_impact + s * t) / (s + t)`
/// * Anyone else: `s * t / (s + t)`
///
/// where `s = similarity(u, v)` and `t = trust(u, v)`. Returns 0.0 when
/// `s + t == 0`.
pub fn influence_weight(v_is_leader: bool, leader_impact: f64, similarity: f64, trust: f64) -> f64 {
    let denom = similarity + trust;
    if denom == 0.0 {
        return 0.0;
    }
    let product = similarity * trust;
    if v_is_leader {
        0.5 * (leader_impact + product) / denom
    } else {
        product / denom
    }
}

/// A dense weight matrix where W[u][v] = influence of v on u.
///
/// The diagonal is unused and stays 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluenceWeights {
    /// Dense weight matrix: weights[target][source].
    pub weights: Vec<Vec<f64>>,
}

impl InfluenceWeights {
    /// Create a new zero-initialized `n x n` weight matrix.
    pub fn new(n: usize) -> Self {
        Self {
            weights: vec![vec![0.0; n]; n],
        }
    }

    /// Compute weights for every ordered pair of distinct members.
    pub fn compute(trust: &TrustMatrix, similarity: &SimilarityMatrix, leader: &LeaderResult) -> Self {
        let n = trust.size();
        let mut w = Self::new(n);
        for u in 0..n {
            for v in 0..n {
                if u == v {
                    continue;
                }
                w.set(
                    u,
                    v,
                    influence_weight(
                        v == leader.leader_index,
                        leader.leader_impact,
                        similarity.get(u, v),
                        trust.get_trust(u, v),
                    ),
                );
            }
        }
        w
    }

    pub fn size(&self) -> usize {
        self.weights.len()
    }

    /// Set the influence of member `source` on member `target`.
    pub fn set(&mut self, target: usize, source: usize, w: f64) {
        self.weights[target][source] = w;
    }

    /// Get the influence of member `source` on member `target`.
    pub fn get(&self, target: usize, source: usize) -> f64 {
        self.weights[target][source]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huddle_core::{Category, MemberId, RatingMatrix};
    use huddle_reputation::select_leader;

    fn table(rows: &[(&str, Vec<f64>)]) -> RatingMatrix {
        let k = rows[0].1.len();
        let mut m = RatingMatrix::new(Category::ALL[..k].to_vec()).unwrap();
        for (id, r) in rows {
            m.push_member((*id).into(), r.clone()).unwrap();
        }
        m
    }

    #[test]
    fn non_leader_weight_is_half_harmonic_mean() {
        let w = influence_weight(false, 0.9, 0.5, 0.5);
        assert!((w - 0.25).abs() < 1e-12);
    }

    #[test]
    fn leader_weight_includes_impact() {
        // 0.5 * (0.4 + 0.5 * 0.5) / 1.0
        let w = influence_weight(true, 0.4, 0.5, 0.5);
        assert!((w - 0.325).abs() < 1e-12);
    }

    #[test]
    fn zero_denominator_gives_zero_weight() {
        assert_eq!(influence_weight(false, 0.0, 0.0, 0.0), 0.0);
        assert_eq!(influence_weight(true, 1.0, 0.0, 0.0), 0.0);
        // Negative similarity can cancel trust exactly.
        assert_eq!(influence_weight(false, 0.0, -0.5, 0.5), 0.0);
    }

    #[test]
    fn zero_similarity_silences_non_leaders() {
        assert_eq!(influence_weight(false, 0.7, 0.0, 1.0), 0.0);
        // The leader still carries its impact.
        assert!((influence_weight(true, 0.6, 0.0, 1.0) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn set_and_get_are_directional() {
        let mut w = InfluenceWeights::new(2);
        w.set(0, 1, 0.5);
        assert_eq!(w.get(0, 1), 0.5);
        assert_eq!(w.get(1, 0), 0.0);
        assert_eq!(w.size(), 2);
    }

    #[test]
    fn trust_is_read_from_target_to_source() {
        // Proportional rows: every pairwise similarity is 1.
        let ratings = table(&[
            ("a", vec![1.0, 2.0, 3.0]),
            ("b", vec![2.0, 4.0, 6.0]),
            ("c", vec![3.0, 6.0, 9.0]),
        ]);
        let similarity = SimilarityMatrix::from_ratings(&ratings);
        let mut trust = TrustMatrix::new(3);
        trust.set_trust(0, 1, 0.9);
        trust.set_trust(1, 0, 0.2);
        trust.set_trust(0, 2, 0.5);
        trust.set_trust(2, 0, 0.25);
        trust.set_trust(1, 2, 0.4);
        trust.set_trust(2, 1, 0.6);
        let leader = LeaderResult {
            leader_index: 2,
            leader_id: MemberId::new("c"),
            leader_impact: 0.8,
            ranking: Vec::new(),
        };

        let w = InfluenceWeights::compute(&trust, &similarity, &leader);

        // W[u][v] = t(u, v) / (1 + t(u, v)) when s = 1.
        assert!((w.get(0, 1) - 0.9 / 1.9).abs() < 1e-12, "W[a][b] = {}", w.get(0, 1));
        assert!((w.get(1, 0) - 0.2 / 1.2).abs() < 1e-12, "W[b][a] = {}", w.get(1, 0));
        assert!((w.get(2, 0) - 0.25 / 1.25).abs() < 1e-12, "W[c][a] = {}", w.get(2, 0));
        assert!((w.get(2, 1) - 0.6 / 1.6).abs() < 1e-12, "W[c][b] = {}", w.get(2, 1));

        // Leader boost applies where c is the source.
        assert!((w.get(0, 2) - 0.5 * (0.8 + 0.5) / 1.5).abs() < 1e-12, "W[a][c] = {}", w.get(0, 2));
        assert!((w.get(1, 2) - 0.5 * (0.8 + 0.4) / 1.4).abs() < 1e-12, "W[b][c] = {}", w.get(1, 2));

        for u in 0..3 {
            assert_eq!(w.get(u, u), 0.0);
        }
    }

    #[test]
    fn negative_leader_score_carries_no_impact() {
        // Disjoint tastes: no trust, pairwise similarity -0.5.
        let ratings = table(&[
            ("a", vec![5.0, 0.0, 0.0]),
            ("b", vec![0.0, 5.0, 0.0]),
            ("c", vec![0.0, 0.0, 5.0]),
        ]);
        let trust = TrustMatrix::from_ratings(&ratings);
        let similarity = SimilarityMatrix::from_ratings(&ratings);
        let leader = select_leader(ratings.members(), &trust, &similarity).unwrap();

        assert!((leader.ranking[0].combined_score + 2.0).abs() < 1e-12);
        assert_eq!(leader.leader_impact, 0.0);

        let w = InfluenceWeights::compute(&trust, &similarity, &leader);
        // With the raw impact of -1 these would be 0.5 * (-1) / (-0.5) = 1.
        let l = leader.leader_index;
        for u in (0..3).filter(|&u| u != l) {
            assert_eq!(w.get(u, l), 0.0, "W[{}][leader] = {}", u, w.get(u, l));
        }
    }
}
