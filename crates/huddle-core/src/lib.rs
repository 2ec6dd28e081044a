// crates/huddle-core/src/lib.rs
//
// huddle-core: Core types, category set, errors, and provider traits for
// Huddle group consensus.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines the cuisine category set, member and group identifiers, the
// rating table handed to the consensus engine, the error type, and the
// provider trait that supplies ratings for a group.

pub mod category;
pub mod error;
pub mod identity;
pub mod rating;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use huddle_core::RatingMatrix;`

// Category set
pub use category::Category;

// Identifiers
pub use identity::{GroupId, MemberId};

// Rating tables
pub use rating::{ConsensusRatingMatrix, RatingMatrix};

// Error type
pub use error::HuddleError;

// Traits
pub use traits::PreferenceMatrixProvider;
