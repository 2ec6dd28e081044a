// crates/huddle-reputation/src/similarity.rs
//
// Pearson similarity between members' full rating vectors.

use serde::{Deserialize, Serialize};

use huddle_core::RatingMatrix;

/// A dense, symmetric similarity matrix where S(u, v) = S(v, u).
///
/// Entries are Pearson correlation coefficients in [-1.0, 1.0] computed over
/// the full vectors, unrated zeros included. The diagonal is 1. Any pair
/// involving a zero-variance vector is 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    entries: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    /// Compute the similarity of every pair of members.
    pub fn from_ratings(ratings: &RatingMatrix) -> Self {
        let n = ratings.member_count();
        let centered: Vec<Option<Vec<f64>>> = ratings.rows().iter().map(|r| center(r)).collect();

        let mut entries = vec![vec![0.0; n]; n];
        for u in 0..n {
            entries[u][u] = 1.0;
            for v in (u + 1)..n {
                let value = match (&centered[u], &centered[v]) {
                    (Some(a), Some(b)) => pearson(a, b),
                    _ => 0.0,
                };
                entries[u][v] = value;
                entries[v][u] = value;
            }
        }

        Self { entries }
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, u: usize, v: usize) -> f64 {
        self.entries[u][v]
    }

    /// Sum of `u`'s similarity to every other member.
    pub fn others_sum(&self, u: usize) -> f64 {
        self.entries[u]
            .iter()
            .enumerate()
            .filter(|(v, _)| *v != u)
            .map(|(_, s)| s)
            .sum()
    }
}

/// Scale a vector into [0, 1] by its largest entry, then subtract the mean.
///
/// `None` when all entries are equal. Correlation is scale-invariant, and
/// the scaling keeps squared deviations finite for very large ratings.
fn center(values: &[f64]) -> Option<Vec<f64>> {
    let first = *values.first()?;
    if values.iter().all(|&x| x == first) {
        return None;
    }
    let scale = values.iter().fold(0.0_f64, |m, &x| m.max(x.abs()));
    let scaled: Vec<f64> = values.iter().map(|&x| x / scale).collect();
    let mean = scaled.iter().sum::<f64>() / scaled.len() as f64;
    Some(scaled.iter().map(|&x| x - mean).collect())
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        cov += x * y;
        var_a += x * x;
        var_b += y * y;
    }
    let denom = (var_a * var_b).sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    (cov / denom).clamp(-1.0, 1.0)
}
