// crates/huddle-store/src/memory.rs
//
// In-memory preference store implementing `PreferenceMatrixProvider`.
//
// Holds two tables, group participants and per-member preferences, and
// joins them on fetch. Suitable for services that load preferences up front
// and for tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::warn;

use huddle_core::{Category, GroupId, HuddleError, MemberId, PreferenceMatrixProvider, RatingMatrix};

/// In-memory participant and preference tables.
#[derive(Debug, Default)]
pub struct InMemoryPreferenceStore {
    /// Group id -> participants in join order.
    groups: RwLock<HashMap<GroupId, Vec<MemberId>>>,
    /// Member id -> ratings in canonical category order.
    preferences: RwLock<HashMap<MemberId, Vec<f64>>>,
}

impl InMemoryPreferenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group and its participants, replacing any previous list.
    pub fn insert_group<I, M>(&self, group_id: &str, members: I) -> Result<(), HuddleError>
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        let members: Vec<MemberId> = members.into_iter().map(MemberId::new).collect();
        self.groups
            .write()
            .map_err(|_| HuddleError::Provider("group table lock poisoned".to_string()))?
            .insert(GroupId::new(group_id), members);
        Ok(())
    }

    /// Store a member's preferences. Categories not listed are unrated (0).
    pub fn set_preferences(&self, member_id: &str, ratings: &[(Category, f64)]) -> Result<(), HuddleError> {
        let mut row = vec![0.0; Category::ALL.len()];
        for &(category, value) in ratings {
            if !value.is_finite() || value < 0.0 {
                return Err(HuddleError::MalformedData(format!(
                    "member {} has invalid rating {} for {}",
                    member_id,
                    value,
                    category.key()
                )));
            }
            row[category.index()] = value;
        }
        self.preferences
            .write()
            .map_err(|_| HuddleError::Provider("preference table lock poisoned".to_string()))?
            .insert(MemberId::new(member_id), row);
        Ok(())
    }

    /// Number of registered groups.
    pub fn group_count(&self) -> Result<usize, HuddleError> {
        self.groups
            .read()
            .map(|g| g.len())
            .map_err(|_| HuddleError::Provider("group table lock poisoned".to_string()))
    }
}

#[async_trait]
impl PreferenceMatrixProvider for InMemoryPreferenceStore {
    async fn fetch_ratings(&self, group_id: &GroupId) -> Result<RatingMatrix, HuddleError> {
        let groups = self
            .groups
            .read()
            .map_err(|_| HuddleError::Provider("group table lock poisoned".to_string()))?;
        let members = groups
            .get(group_id)
            .ok_or_else(|| HuddleError::InvalidInput(format!("unknown group: {}", group_id)))?;
        let preferences = self
            .preferences
            .read()
            .map_err(|_| HuddleError::Provider("preference table lock poisoned".to_string()))?;
        join_preferences(group_id, members, &preferences)
    }
}

/// Join a participant list with stored preference rows.
///
/// Participants without a row are skipped; the rest keep participant order.
pub(crate) fn join_preferences(
    group_id: &GroupId,
    members: &[MemberId],
    preferences: &HashMap<MemberId, Vec<f64>>,
) -> Result<RatingMatrix, HuddleError> {
    let mut table = RatingMatrix::with_all_categories();
    for member in members {
        match preferences.get(member) {
            Some(row) => table.push_member(member.clone(), row.clone())?,
            None => warn!(
                group = %group_id,
                member = %member,
                "Participant has no stored preferences; leaving out of consensus"
            ),
        }
    }
    Ok(table)
}
