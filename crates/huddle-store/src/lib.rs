// crates/huddle-store/src/lib.rs
//
// huddle-store: Preference providers for Huddle group consensus.
//
// A group's rating table is the join of its participant list with each
// participant's stored cuisine preferences. Participants without a stored
// preference row are left out of the table. Provides an in-memory store for
// services and tests, and a JSON snapshot file store that reads the file on
// every fetch.

pub mod memory;
pub mod snapshot;

// Re-export key types for ergonomic access from downstream crates.
pub use memory::InMemoryPreferenceStore;
pub use snapshot::{GroupRecord, JsonFilePreferenceStore, PreferenceRecord, PreferenceSnapshot};
