// crates/huddle-core/src/traits.rs

use async_trait::async_trait;

use crate::error::HuddleError;
use crate::identity::GroupId;
use crate::rating::RatingMatrix;

/// Source of the per-member rating table for a group.
///
/// Implemented by huddle-store (in-memory and JSON snapshot backends).
/// Implementations acquire any backing resource (file handle, connection,
/// pool checkout) inside `fetch_ratings` and release it before returning,
/// on success and failure alike.
#[async_trait]
pub trait PreferenceMatrixProvider: Send + Sync {
    /// Fetch the rating table for `group_id`.
    ///
    /// Returns `InvalidInput` if the group is unknown. A known group whose
    /// members have no preference rows yields an empty table.
    async fn fetch_ratings(&self, group_id: &GroupId) -> Result<RatingMatrix, HuddleError>;
}

#[async_trait]
impl<P: PreferenceMatrixProvider + ?Sized> PreferenceMatrixProvider for std::sync::Arc<P> {
    async fn fetch_ratings(&self, group_id: &GroupId) -> Result<RatingMatrix, HuddleError> {
        (**self).fetch_ratings(group_id).await
    }
}
