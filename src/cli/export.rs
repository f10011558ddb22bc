//! Export CLI command

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::error::{TrackerError, TrackerResult};
use crate::export::export_transactions_csv;
use crate::storage::{RecordStore, Storage};

use super::FilterArgs;

/// Arguments for `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output CSV file
    pub file: PathBuf,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> TrackerResult<()> {
    let entries = storage.query_transactions(&args.filter.to_filter(storage)?)?;

    if entries.is_empty() {
        println!("No transactions to export.");
        return Ok(());
    }

    let file = File::create(&args.file).map_err(|e| {
        TrackerError::Export(format!("Failed to create {}: {}", args.file.display(), e))
    })?;
    let written = export_transactions_csv(&entries, BufWriter::new(file))?;

    info!(rows = written, path = %args.file.display(), "exported transactions");
    println!("Exported {} transactions to {}", written, args.file.display());
    Ok(())
}
