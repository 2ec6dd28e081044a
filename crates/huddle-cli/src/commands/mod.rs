// crates/huddle-cli/src/commands/mod.rs
//
// Command module declarations for the Huddle CLI.

pub mod categories;
pub mod consensus;
