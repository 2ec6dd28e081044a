// crates/huddle-cli/src/commands/consensus.rs
//
// `huddle consensus --group <id>`: compute a group's leader, top cuisine
// preferences, and opinion weights from the preference snapshot.

use clap::Args;
use tabled::Tabled;

use huddle_consensus::ConsensusEngine;
use huddle_core::HuddleError;
use huddle_store::JsonFilePreferenceStore;

use crate::config::{expand_tilde, HuddleConfig};
use crate::output::{format_json, format_table, OutputFormat};

/// Group consensus command.
#[derive(Debug, Args)]
pub struct ConsensusCmd {
    /// Group (chat room) id.
    #[arg(long)]
    pub group: String,

    /// Preference snapshot to read instead of the configured `data_path`.
    #[arg(long)]
    pub data: Option<String>,

    /// Override the configured maximum group size.
    #[arg(long)]
    pub max_group_size: Option<usize>,
}

/// A row in the opinion weight table.
#[derive(Tabled)]
struct WeightRow {
    #[tabled(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Member")]
    member: String,
    #[tabled(rename = "Influence")]
    influence: String,
    #[tabled(rename = "Weight")]
    weight: String,
}

/// Run the consensus command.
pub async fn run(
    cmd: &ConsensusCmd,
    config: &HuddleConfig,
    format: OutputFormat,
) -> Result<(), HuddleError> {
    let path = match &cmd.data {
        Some(p) => expand_tilde(p),
        None => config.data_path(),
    };
    let mut engine_config = config.engine_config();
    if let Some(max) = cmd.max_group_size {
        engine_config.max_group_size = max;
    }

    let store = JsonFilePreferenceStore::new(path);
    tracing::debug!("Reading preferences from {}", store.path().display());
    let engine = ConsensusEngine::with_config(store, engine_config);
    let outcome = engine.compute(&cmd.group).await?;
    let report = outcome.report();

    match format {
        OutputFormat::Json => println!("{}", format_json(&report)?),
        OutputFormat::Table => {
            println!("Group:   {}", outcome.group_id);
            println!(
                "Leader:  {} (impact {:.3})",
                outcome.leader.leader_id, outcome.leader.leader_impact
            );
            println!("Top:     {}", report.top3_preferences.join(", "));
            println!();
            let rows: Vec<WeightRow> = outcome
                .leader
                .ranking
                .iter()
                .zip(report.opinion_weight.iter())
                .enumerate()
                .map(|(rank, (ranked, entry))| WeightRow {
                    rank: rank + 1,
                    member: entry.user_id.to_string(),
                    influence: format!("{:.3}", ranked.combined_score),
                    weight: format!("{:.2}", entry.weight),
                })
                .collect();
            println!("{}", format_table(&rows));
        }
    }
    Ok(())
}
