// crates/huddle-consensus/src/lib.rs
//
// huddle-consensus: Influence weighting, consensus ratings, opinion weights,
// and the consensus engine for Huddle.
//
// Given a group's rating table, this crate pulls each member's ratings toward
// their peers in proportion to trust and similarity (with an extra pull toward
// the leader), then reduces the result to the group's top categories and a
// voting weight per member.

pub mod aggregation;
pub mod engine;
pub mod opinion;
pub mod preferences;
pub mod report;
pub mod weights;

pub use engine::{run_consensus, ConsensusEngine, ConsensusOutcome, EngineConfig};
pub use report::{ConsensusReport, OpinionWeightEntry};
