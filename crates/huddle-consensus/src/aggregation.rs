// crates/huddle-consensus/src/aggregation.rs
//
// Consensus rating aggregation.
//
// For each member u and each category i that u rated:
//   consensus(u, i) = r(u, i) + sum over v != u with r(v, i) > 0 of
//                     W[u][v] * (r(v, i) - r(u, i))
// Unrated entries are never imputed and stay 0. All adjustments read the
// original ratings, so member order does not affect the result.

use huddle_core::{ConsensusRatingMatrix, HuddleError, RatingMatrix};

use crate::weights::InfluenceWeights;

/// Produce the full N x K consensus table for every member of the group.
///
/// Fails only if `weights` does not cover the same members as `ratings`.
pub fn aggregate_consensus(
    ratings: &RatingMatrix,
    weights: &InfluenceWeights,
) -> Result<ConsensusRatingMatrix, HuddleError> {
    let n = ratings.member_count();
    let k = ratings.category_count();
    if weights.size() != n {
        return Err(HuddleError::MalformedData(format!(
            "weight matrix covers {} members, rating table has {}",
            weights.size(),
            n
        )));
    }

    let mut rows = vec![vec![0.0_f64; k]; n];
    for (u, row) in rows.iter_mut().enumerate() {
        for (i, cell) in row.iter_mut().enumerate() {
            let own = ratings.get(u, i);
            if own <= 0.0 {
                continue;
            }
            let influence: f64 = (0..n)
                .filter(|&v| v != u)
                .filter(|&v| ratings.get(v, i) > 0.0)
                .map(|v| weights.get(u, v) * (ratings.get(v, i) - own))
                .sum();
            *cell = own + influence;
        }
    }

    ConsensusRatingMatrix::from_rows(ratings, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use huddle_core::Category;

    fn two_members() -> RatingMatrix {
        RatingMatrix::new(vec![Category::American, Category::Bar])
            .unwrap()
            .with_member("a", vec![4.0, 0.0])
            .unwrap()
            .with_member("b", vec![2.0, 3.0])
            .unwrap()
    }

    #[test]
    fn every_member_is_adjusted() {
        let ratings = two_members();
        let mut w = InfluenceWeights::new(2);
        w.set(0, 1, 0.5);
        w.set(1, 0, 0.25);

        let consensus = aggregate_consensus(&ratings, &w).unwrap();

        // a: 4 + 0.5 * (2 - 4) = 3
        assert!((consensus.get(0, 0) - 3.0).abs() < 1e-12);
        // b: 2 + 0.25 * (4 - 2) = 2.5
        assert!((consensus.get(1, 0) - 2.5).abs() < 1e-12);
        // b rated Bar but a did not: no contribution.
        assert!((consensus.get(1, 1) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn unrated_entries_are_never_imputed() {
        let ratings = two_members();
        let mut w = InfluenceWeights::new(2);
        w.set(0, 1, 1.0);
        w.set(1, 0, 1.0);
        let consensus = aggregate_consensus(&ratings, &w).unwrap();
        assert_eq!(consensus.get(0, 1), 0.0);
    }

    #[test]
    fn zero_weights_leave_ratings_unchanged() {
        let ratings = two_members();
        let consensus = aggregate_consensus(&ratings, &InfluenceWeights::new(2)).unwrap();
        assert_eq!(consensus.rows(), ratings.rows());
    }

    #[test]
    fn all_zero_member_contributes_nothing() {
        let ratings = RatingMatrix::new(vec![Category::American, Category::Bar])
            .unwrap()
            .with_member("a", vec![4.0, 1.0])
            .unwrap()
            .with_member("ghost", vec![0.0, 0.0])
            .unwrap();
        let mut w = InfluenceWeights::new(2);
        w.set(0, 1, 0.9);
        let consensus = aggregate_consensus(&ratings, &w).unwrap();
        assert_eq!(consensus.rows()[0], vec![4.0, 1.0]);
        assert_eq!(consensus.rows()[1], vec![0.0, 0.0]);
    }

    #[test]
    fn mismatched_weights_are_rejected() {
        let ratings = two_members();
        assert!(matches!(
            aggregate_consensus(&ratings, &InfluenceWeights::new(3)),
            Err(HuddleError::MalformedData(_))
        ));
    }
}
