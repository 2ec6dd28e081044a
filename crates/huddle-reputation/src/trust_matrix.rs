// crates/huddle-reputation/src/trust_matrix.rs
//
// Trust matrix: T(from, to) trust values between group members.
//
// Each entry T(u, v) blends two signals about how much member `u` can rely
// on member `v`'s taste: partnership (the share of u's rated categories that
// v also rated) and rating distance (closeness of the full rating vectors).

use serde::{Deserialize, Serialize};

use huddle_core::RatingMatrix;

/// A dense, directional trust matrix where T(from, to) = trust value.
///
/// Indexed by member position in the source [`RatingMatrix`]. Values lie in
/// [0.0, 1.0]. T(u, v) need not equal T(v, u), and the diagonal is always 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustMatrix {
    /// Dense trust entries: entries[from][to].
    entries: Vec<Vec<f64>>,
}

impl TrustMatrix {
    /// Create a zero-initialized `n x n` trust matrix.
    pub fn new(n: usize) -> Self {
        Self {
            entries: vec![vec![0.0; n]; n],
        }
    }

    /// Build the trust matrix for every ordered pair of members.
    ///
    /// For u != v:
    /// - partnership(u, v) = |R_u ∩ R_v| / |R_u|, where R_x is the set of
    ///   categories x rated above zero. Normalized by u's set only.
    /// - distance(u, v) = 1 / (1 + euclidean(u, v)) over the full vectors.
    /// - trust(u, v) = harmonic mean of partnership and distance.
    ///
    /// A member who rated nothing gets an all-zero trust row.
    pub fn from_ratings(ratings: &RatingMatrix) -> Self {
        let n = ratings.member_count();
        let mut matrix = Self::new(n);

        for u in 0..n {
            let rated = ratings.rated_columns(u);
            if rated.is_empty() {
                continue;
            }
            for v in 0..n {
                if u == v {
                    continue;
                }
                let shared = rated.iter().filter(|&&i| ratings.get(v, i) > 0.0).count();
                let partnership = shared as f64 / rated.len() as f64;
                let distance = 1.0 / (1.0 + euclidean(ratings.row(u), ratings.row(v)));
                matrix.set_trust(u, v, harmonic_mean(partnership, distance));
            }
        }

        matrix
    }

    /// Number of members covered by the matrix.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Set the trust value from member `from` to member `to`.
    ///
    /// Values are clamped to [0.0, 1.0].
    pub fn set_trust(&mut self, from: usize, to: usize, value: f64) {
        self.entries[from][to] = value.clamp(0.0, 1.0);
    }

    /// Get the trust value from member `from` to member `to`.
    pub fn get_trust(&self, from: usize, to: usize) -> f64 {
        self.entries[from][to]
    }

    /// Sum of the trust `from` places in every other member.
    pub fn outgoing_sum(&self, from: usize) -> f64 {
        self.entries[from]
            .iter()
            .enumerate()
            .filter(|(to, _)| *to != from)
            .map(|(_, t)| t)
            .sum()
    }
}

/// Euclidean distance between two equal-length rating vectors.
fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// 2ab / (a + b), or 0 when both inputs are 0.
fn harmonic_mean(a: f64, b: f64) -> f64 {
    let denom = a + b;
    if denom == 0.0 {
        0.0
    } else {
        2.0 * a * b / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huddle_core::Category;

    fn table(rows: &[(&str, Vec<f64>)]) -> RatingMatrix {
        let k = rows[0].1.len();
        let mut m = RatingMatrix::new(Category::ALL[..k].to_vec()).unwrap();
        for (id, r) in rows {
            m.push_member((*id).into(), r.clone()).unwrap();
        }
        m
    }

    #[test]
    fn identical_single_rating_members_trust_fully() {
        let m = table(&[("a", vec![5.0, 0.0]), ("b", vec![5.0, 0.0])]);
        let t = TrustMatrix::from_ratings(&m);
        assert!((t.get_trust(0, 1) - 1.0).abs() < 1e-12);
        assert!((t.get_trust(1, 0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn diagonal_is_zero() {
        let m = table(&[
            ("a", vec![5.0, 1.0, 0.0]),
            ("b", vec![2.0, 0.0, 3.0]),
            ("c", vec![1.0, 1.0, 1.0]),
        ]);
        let t = TrustMatrix::from_ratings(&m);
        for i in 0..3 {
            assert_eq!(t.get_trust(i, i), 0.0);
        }
    }

    #[test]
    fn partnership_is_normalized_by_source_member() {
        // a rated {0}, b rated {0, 1}; euclidean = sqrt(4 + 16).
        let m = table(&[("a", vec![5.0, 0.0]), ("b", vec![3.0, 4.0])]);
        let t = TrustMatrix::from_ratings(&m);
        let distance = 1.0 / (1.0 + 20.0_f64.sqrt());
        let expected_ab = 2.0 * 1.0 * distance / (1.0 + distance);
        let expected_ba = 2.0 * 0.5 * distance / (0.5 + distance);
        assert!((t.get_trust(0, 1) - expected_ab).abs() < 1e-12);
        assert!((t.get_trust(1, 0) - expected_ba).abs() < 1e-12);
        assert!(
            t.get_trust(0, 1) > t.get_trust(1, 0),
            "trust should be asymmetric: {} vs {}",
            t.get_trust(0, 1),
            t.get_trust(1, 0)
        );
    }

    #[test]
    fn member_with_no_ratings_has_zero_trust_row() {
        let m = table(&[("a", vec![0.0, 0.0]), ("b", vec![3.0, 4.0]), ("c", vec![1.0, 0.0])]);
        let t = TrustMatrix::from_ratings(&m);
        assert_eq!(t.get_trust(0, 1), 0.0);
        assert_eq!(t.get_trust(0, 2), 0.0);
        assert_eq!(t.outgoing_sum(0), 0.0);
        // Others sharing nothing with an empty rater also get zero partnership.
        assert_eq!(t.get_trust(1, 0), 0.0);
    }

    #[test]
    fn trust_values_stay_in_unit_interval() {
        let m = table(&[
            ("a", vec![5.0, 4.0, 0.0, 1.0]),
            ("b", vec![0.0, 4.0, 2.0, 1.0]),
            ("c", vec![9.0, 0.0, 0.0, 0.0]),
            ("d", vec![1.0, 1.0, 1.0, 1.0]),
        ]);
        let t = TrustMatrix::from_ratings(&m);
        for u in 0..4 {
            for v in 0..4 {
                let value = t.get_trust(u, v);
                assert!((0.0..=1.0).contains(&value), "trust({}, {}) = {}", u, v, value);
            }
        }
    }

    #[test]
    fn set_trust_clamps() {
        let mut t = TrustMatrix::new(2);
        t.set_trust(0, 1, 1.7);
        t.set_trust(1, 0, -0.2);
        assert_eq!(t.get_trust(0, 1), 1.0);
        assert_eq!(t.get_trust(1, 0), 0.0);
    }
}
