//! Inspect command - summarize a saved Q-table

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    adapters::MsgPackRepository,
    cli::{load_app_config, output, resolve_table_path},
    export::{QTableExporter, QTableRecord},
    ports::QTableRepository,
};

#[derive(Parser, Debug)]
#[command(about = "Summarize what the agent has learned")]
pub struct InspectArgs {
    /// TOML configuration file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Q-table file (overrides storage.table_path)
    #[arg(long, short = 't')]
    pub table: Option<PathBuf>,

    /// Number of highest-valued entries to show
    #[arg(long, short = 'n', default_value_t = 10)]
    pub top: usize,

    /// Print the summary as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct TableSummary {
    path: String,
    entries: usize,
    states: usize,
    top: Vec<QTableRecord>,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let config = load_app_config(args.config.as_deref())?;
    let path = resolve_table_path(&config, args.table);

    let Some(table) = MsgPackRepository::new()
        .load(&path)
        .with_context(|| format!("Failed to load Q-table from {}", path.display()))?
    else {
        println!("No Q-table at {}", path.display());
        return Ok(());
    };

    let summary = TableSummary {
        path: path.display().to_string(),
        entries: table.len(),
        states: output::distinct_states(&table),
        top: QTableExporter::top(&table, args.top),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    output::print_section("Q-table");
    output::print_kv("File", &summary.path);
    output::print_kv("Entries", &output::format_number(summary.entries));
    output::print_kv("States", &output::format_number(summary.states));

    if !summary.top.is_empty() {
        println!("\n  Top {} values:", summary.top.len());
        for record in &summary.top {
            println!(
                "  {:>9.3}  {}  ({},{})->({},{}){}",
                record.value,
                record.state,
                record.from_row,
                record.from_col,
                record.to_row,
                record.to_col,
                if record.jump { " jump" } else { "" }
            );
        }
    }
    Ok(())
}
