// crates/huddle-store/src/snapshot.rs
//
// JSON snapshot preference store.
//
// File layout:
//
//   {
//     "groups": [{ "id": "room-1", "members": ["u1", "u2"] }],
//     "preferences": [{ "userId": "u1", "american": 3, ..., "western": 0 }]
//   }
//
// Each preference record carries every category key. The file is opened
// and read inside each fetch and the handle is dropped before the fetch
// returns, so no descriptor outlives a request.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use huddle_core::{Category, GroupId, HuddleError, MemberId, PreferenceMatrixProvider, RatingMatrix};

use crate::memory::join_preferences;

/// A group and its participants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRecord {
    pub id: GroupId,
    pub members: Vec<MemberId>,
}

/// One member's stored preferences, keyed by category key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceRecord {
    pub user_id: MemberId,
    #[serde(flatten)]
    pub ratings: HashMap<String, serde_json::Value>,
}

impl PreferenceRecord {
    /// Ratings in canonical category order.
    ///
    /// Fails on unknown keys, missing categories, and non-numeric or
    /// negative values.
    pub fn to_row(&self) -> Result<Vec<f64>, HuddleError> {
        let mut row = vec![None; Category::ALL.len()];
        for (key, value) in &self.ratings {
            let category = Category::from_key(key).ok_or_else(|| {
                HuddleError::MalformedData(format!(
                    "member {}: unknown category key {:?}",
                    self.user_id, key
                ))
            })?;
            let rating = value.as_f64().filter(|r| r.is_finite() && *r >= 0.0).ok_or_else(|| {
                HuddleError::MalformedData(format!(
                    "member {}: invalid rating {} for {}",
                    self.user_id, value, key
                ))
            })?;
            row[category.index()] = Some(rating);
        }
        row.into_iter()
            .zip(Category::ALL)
            .map(|(rating, category)| {
                rating.ok_or_else(|| {
                    HuddleError::MalformedData(format!(
                        "member {}: missing rating for {}",
                        self.user_id,
                        category.key()
                    ))
                })
            })
            .collect()
    }
}

/// The full contents of a snapshot file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferenceSnapshot {
    #[serde(default)]
    pub groups: Vec<GroupRecord>,
    #[serde(default)]
    pub preferences: Vec<PreferenceRecord>,
}

impl PreferenceSnapshot {
    /// Parse a snapshot from JSON text.
    pub fn from_json(text: &str) -> Result<Self, HuddleError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build the rating table for one group.
    ///
    /// Unknown group ids are `InvalidInput`. Only preference rows of the
    /// group's participants are validated.
    pub fn ratings_for(&self, group_id: &GroupId) -> Result<RatingMatrix, HuddleError> {
        let group = self
            .groups
            .iter()
            .find(|g| &g.id == group_id)
            .ok_or_else(|| HuddleError::InvalidInput(format!("unknown group: {}", group_id)))?;

        let mut preferences = HashMap::new();
        for record in &self.preferences {
            if group.members.contains(&record.user_id) {
                preferences.insert(record.user_id.clone(), record.to_row()?);
            }
        }
        join_preferences(group_id, &group.members, &preferences)
    }
}

/// Preference provider backed by a JSON snapshot file.
#[derive(Debug, Clone)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the snapshot file.
    pub async fn load(&self) -> Result<PreferenceSnapshot, HuddleError> {
        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            HuddleError::Provider(format!("reading {}: {}", self.path.display(), e))
        })?;
        PreferenceSnapshot::from_json(&text)
    }
}

#[async_trait]
impl PreferenceMatrixProvider for JsonFilePreferenceStore {
    async fn fetch_ratings(&self, group_id: &GroupId) -> Result<RatingMatrix, HuddleError> {
        let snapshot = self.load().await?;
        debug!(
            path = %self.path.display(),
            groups = snapshot.groups.len(),
            preferences = snapshot.preferences.len(),
            "Loaded preference snapshot"
        );
        snapshot.ratings_for(group_id)
    }
}
