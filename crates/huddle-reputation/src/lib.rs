// crates/huddle-reputation/src/lib.rs
//
// huddle-reputation: Trust matrix, similarity matrix, and leader selection
// for Huddle group consensus.
//
// Trust is directional (how much of what u rated does v share, and how close
// are their ratings); similarity is the symmetric Pearson correlation of the
// full rating vectors. Together they rank members by influence and pick the
// group leader.

pub mod leader;
pub mod similarity;
pub mod trust_matrix;

pub use leader::{select_leader, LeaderResult, RankedMember};
pub use similarity::SimilarityMatrix;
pub use trust_matrix::TrustMatrix;
