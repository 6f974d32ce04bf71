//! Export command - write a saved Q-table as CSV or JSON

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};

use crate::{
    adapters::MsgPackRepository,
    cli::{load_app_config, resolve_table_path},
    export::QTableExporter,
    ports::QTableRepository,
};

#[derive(Parser, Debug)]
#[command(about = "Export the learned Q-table")]
pub struct ExportArgs {
    /// TOML configuration file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Q-table file (overrides storage.table_path)
    #[arg(long, short = 't')]
    pub table: Option<PathBuf>,

    /// Output file path
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    /// Export format
    #[arg(long, short = 'f', value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format
    Csv,
    /// JSON format
    Json,
}

pub fn execute(args: ExportArgs) -> Result<()> {
    let config = load_app_config(args.config.as_deref())?;
    let path = resolve_table_path(&config, args.table);

    let table = MsgPackRepository::new()
        .load(&path)
        .with_context(|| format!("Failed to load Q-table from {}", path.display()))?
        .ok_or_else(|| anyhow!("No Q-table at {}", path.display()))?;

    let rows = match args.format {
        ExportFormat::Csv => QTableExporter::export_csv(&table, &args.output),
        ExportFormat::Json => QTableExporter::export_json(&table, &args.output),
    }
    .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("Exported {rows} entries to {}", args.output.display());
    Ok(())
}
