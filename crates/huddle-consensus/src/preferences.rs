// crates/huddle-consensus/src/preferences.rs

use std::cmp::Ordering;

use huddle_core::{Category, ConsensusRatingMatrix};

/// Number of categories reported as the group's top preferences.
pub const TOP_PREFERENCE_COUNT: usize = 3;

/// Select the `min(TOP_PREFERENCE_COUNT, K)` categories with the highest
/// mean consensus rating, descending. Equal means keep column order.
pub fn top_preferences(consensus: &ConsensusRatingMatrix) -> Vec<Category> {
    let means = consensus.column_means();
    let mut columns: Vec<usize> = (0..means.len()).collect();
    columns.sort_by(|&a, &b| means[b].partial_cmp(&means[a]).unwrap_or(Ordering::Equal));
    columns
        .into_iter()
        .take(TOP_PREFERENCE_COUNT)
        .map(|c| consensus.categories()[c])
        .collect()
}
