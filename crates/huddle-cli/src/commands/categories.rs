// crates/huddle-cli/src/commands/categories.rs
//
// `huddle categories`: list the cuisine categories with their storage keys
// and display labels.

use tabled::Tabled;

use huddle_core::{Category, HuddleError};

use crate::output::{format_json, format_table, OutputFormat};

/// A row in the category table.
#[derive(Tabled, serde::Serialize)]
struct CategoryRow {
    #[tabled(rename = "Column")]
    column: usize,
    #[tabled(rename = "Key")]
    key: &'static str,
    #[tabled(rename = "Label")]
    label: &'static str,
}

/// Run the categories command.
pub fn run(format: OutputFormat) -> Result<(), HuddleError> {
    let rows: Vec<CategoryRow> = Category::ALL
        .iter()
        .map(|c| CategoryRow {
            column: c.index(),
            key: c.key(),
            label: c.label(),
        })
        .collect();

    match format {
        OutputFormat::Table => println!("{}", format_table(&rows)),
        OutputFormat::Json => println!("{}", format_json(&rows)?),
    }
    Ok(())
}
