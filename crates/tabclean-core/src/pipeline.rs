//! The clean pipeline: load, optionally filter, write

use crate::config::CleanConfig;
use crate::error::Result;
use crate::filter::apply_filters;
use crate::loader::load_csv;
use crate::table::Table;
use crate::writer::write_csv;
use std::path::PathBuf;
use tracing::info;

/// Outcome of a clean run
#[derive(Debug, Clone)]
pub struct CleanReport {
    /// The table as written
    pub table: Table,
    /// Rows read from the input, header included
    pub rows_read: usize,
    pub output_path: PathBuf,
}

impl CleanReport {
    /// Rows removed by filtering
    pub fn rows_dropped(&self) -> usize {
        self.rows_read - self.table.row_count()
    }
}

/// Apply the configured filters to a loaded table
pub fn prepare(config: &CleanConfig, table: Table) -> Result<Table> {
    if config.drop_invalid_rows {
        apply_filters(table)
    } else {
        Ok(table)
    }
}

/// Run the whole pipeline for `config`
///
/// `inspect` sees the final table before it is written.
pub fn run_clean<F>(config: &CleanConfig, inspect: F) -> Result<CleanReport>
where
    F: FnOnce(&Table),
{
    let table = load_csv(&config.input_file)?;
    let rows_read = table.row_count();
    let table = prepare(config, table)?;
    inspect(&table);

    let output_path = write_csv(&table, &config.output_dir, &config.output_file)?;
    info!(
        input = %config.input_file.display(),
        output = %output_path.display(),
        "clean complete"
    );

    Ok(CleanReport {
        table,
        rows_read,
        output_path,
    })
}
