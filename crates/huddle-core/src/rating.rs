// crates/huddle-core/src/rating.rs
//
// Rating tables: the N x K member-by-category input and the adjusted
// consensus table of the same shape.
//
// Members are kept as an ordered id list plus an id -> index lookup; rows are
// plain dense vectors indexed by position. Row order is the provider's
// first-seen order and is the tie-break order for every ranking downstream.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::HuddleError;
use crate::identity::MemberId;

/// An N x K table of member ratings over an ordered category set.
///
/// Values are finite and non-negative; `0.0` means "unrated". Only built
/// through [`RatingMatrix::push_member`], so it serializes but does not
/// deserialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingMatrix {
    members: Vec<MemberId>,
    #[serde(skip)]
    index: HashMap<MemberId, usize>,
    categories: Vec<Category>,
    rows: Vec<Vec<f64>>,
}

impl RatingMatrix {
    /// Create an empty table over the given category columns.
    ///
    /// Fails if the column list is empty or repeats a category.
    pub fn new(categories: Vec<Category>) -> Result<Self, HuddleError> {
        if categories.is_empty() {
            return Err(HuddleError::MalformedData(
                "rating table needs at least one category".to_string(),
            ));
        }
        for (i, c) in categories.iter().enumerate() {
            if categories[..i].contains(c) {
                return Err(HuddleError::MalformedData(format!(
                    "duplicate category column: {}",
                    c.key()
                )));
            }
        }
        Ok(Self {
            members: Vec::new(),
            index: HashMap::new(),
            categories,
            rows: Vec::new(),
        })
    }

    /// Create an empty table over the full canonical category set.
    pub fn with_all_categories() -> Self {
        Self {
            members: Vec::new(),
            index: HashMap::new(),
            categories: Category::ALL.to_vec(),
            rows: Vec::new(),
        }
    }

    /// Append a member row.
    ///
    /// The row must have one entry per category, each finite and >= 0, and the
    /// member must not already be present.
    pub fn push_member(&mut self, id: MemberId, ratings: Vec<f64>) -> Result<(), HuddleError> {
        if self.index.contains_key(&id) {
            return Err(HuddleError::MalformedData(format!(
                "duplicate member: {}",
                id
            )));
        }
        if ratings.len() != self.categories.len() {
            return Err(HuddleError::MalformedData(format!(
                "member {} has {} ratings, expected {}",
                id,
                ratings.len(),
                self.categories.len()
            )));
        }
        if let Some((col, bad)) = ratings
            .iter()
            .enumerate()
            .find(|(_, r)| !r.is_finite() || **r < 0.0)
        {
            return Err(HuddleError::MalformedData(format!(
                "member {} has invalid rating {} for {}",
                id,
                bad,
                self.categories[col].key()
            )));
        }
        self.index.insert(id.clone(), self.members.len());
        self.members.push(id);
        self.rows.push(ratings);
        Ok(())
    }

    /// Builder-style variant of [`RatingMatrix::push_member`].
    pub fn with_member(mut self, id: impl Into<String>, ratings: Vec<f64>) -> Result<Self, HuddleError> {
        self.push_member(MemberId::new(id), ratings)?;
        Ok(self)
    }

    /// Number of members (N).
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Number of categories (K).
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[MemberId] {
        &self.members
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Position of a member in row order.
    pub fn index_of(&self, id: &MemberId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn member(&self, idx: usize) -> &MemberId {
        &self.members[idx]
    }

    /// The full rating vector of the member at `idx`.
    pub fn row(&self, idx: usize) -> &[f64] {
        &self.rows[idx]
    }

    pub fn get(&self, member: usize, category: usize) -> f64 {
        self.rows[member][category]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Indices of the categories member `idx` has rated (rating > 0).
    pub fn rated_columns(&self, idx: usize) -> Vec<usize> {
        self.rows[idx]
            .iter()
            .enumerate()
            .filter(|(_, r)| **r > 0.0)
            .map(|(i, _)| i)
            .collect()
    }
}

/// The adjusted N x K table produced by consensus aggregation.
///
/// Same members, categories, and shape as the [`RatingMatrix`] it was
/// derived from. Entries unrated in the input stay `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusRatingMatrix {
    members: Vec<MemberId>,
    categories: Vec<Category>,
    rows: Vec<Vec<f64>>,
}

impl ConsensusRatingMatrix {
    /// Wrap adjusted rows computed from `source`.
    ///
    /// Fails if the shape does not match the source table.
    pub fn from_rows(source: &RatingMatrix, rows: Vec<Vec<f64>>) -> Result<Self, HuddleError> {
        if rows.len() != source.member_count()
            || rows.iter().any(|r| r.len() != source.category_count())
        {
            return Err(HuddleError::MalformedData(
                "consensus table shape does not match its source".to_string(),
            ));
        }
        Ok(Self {
            members: source.members().to_vec(),
            categories: source.categories().to_vec(),
            rows,
        })
    }

    pub fn members(&self) -> &[MemberId] {
        &self.members
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn get(&self, member: usize, category: usize) -> f64 {
        self.rows[member][category]
    }

    /// Arithmetic mean of each category column across all members.
    ///
    /// Returns zeros when the table has no members.
    pub fn column_means(&self) -> Vec<f64> {
        let k = self.categories.len();
        let n = self.rows.len();
        if n == 0 {
            return vec![0.0; k];
        }
        let mut sums = vec![0.0_f64; k];
        for row in &self.rows {
            for (sum, value) in sums.iter_mut().zip(row.iter()) {
                *sum += value;
            }
        }
        sums.into_iter().map(|s| s / n as f64).collect()
    }
}
