//! Group-by summaries over a table with a header row
//!
//! Used for the housing price export: mean `purchase_price` per `region`
//! and the number of sales per `house_type`.

use crate::error::{Error, Result};
use crate::table::Table;
use crate::writer::{ensure_dir, write_lines};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const REGION_COLUMN: &str = "region";
pub const PRICE_COLUMN: &str = "purchase_price";
pub const HOUSE_TYPE_COLUMN: &str = "house_type";

/// Mean of a value column for one group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMean {
    pub group: String,
    pub mean: f64,
    /// Rows that contributed to the mean
    pub count: usize,
}

/// Occurrences of one distinct value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Output format for [`write_summary`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryFormat {
    #[default]
    Csv,
    Json,
}

impl SummaryFormat {
    pub fn extension(self) -> &'static str {
        match self {
            SummaryFormat::Csv => "csv",
            SummaryFormat::Json => "json",
        }
    }
}

/// Both housing aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingSummary {
    pub average_price_by_region: Vec<GroupMean>,
    pub house_type_distribution: Vec<ValueCount>,
}

fn column_index(table: &Table, column: &str) -> Result<usize> {
    table.find_column(column).ok_or_else(|| Error::MissingColumn {
        column: column.to_string(),
    })
}

/// Mean of `value_col` grouped by `group_col`, sorted by group
///
/// Rows with an empty group, a missing value or a non-numeric value are
/// skipped.
pub fn mean_by_group(table: &Table, group_col: &str, value_col: &str) -> Result<Vec<GroupMean>> {
    let group_idx = column_index(table, group_col)?;
    let value_idx = column_index(table, value_col)?;

    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    let mut skipped = 0usize;

    for row in table.data_rows() {
        let group = match row.get(group_idx) {
            Some(g) if !g.is_empty() => g,
            _ => {
                skipped += 1;
                continue;
            }
        };
        let value = match row.get(value_idx).map(str::parse::<f64>) {
            Some(Ok(v)) if v.is_finite() => v,
            _ => {
                skipped += 1;
                continue;
            }
        };
        let entry = sums.entry(group).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    if skipped > 0 {
        warn!(skipped, group_col, value_col, "skipped rows without a usable value");
    }

    Ok(sums
        .into_iter()
        .map(|(group, (sum, count))| GroupMean {
            group: group.to_string(),
            mean: sum / count as f64,
            count,
        })
        .collect())
}

/// Count of each distinct non-empty value in `column`, most frequent first
pub fn value_counts(table: &Table, column: &str) -> Result<Vec<ValueCount>> {
    let idx = column_index(table, column)?;

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in table.data_rows().iter().filter_map(|r| r.get(idx)) {
        if !value.is_empty() {
            *counts.entry(value).or_insert(0) += 1;
        }
    }

    let mut counts: Vec<ValueCount> = counts
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect();
    // stable: ties stay in value order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(counts)
}

/// Compute the housing price aggregates
pub fn housing_summary(table: &Table) -> Result<HousingSummary> {
    Ok(HousingSummary {
        average_price_by_region: mean_by_group(table, REGION_COLUMN, PRICE_COLUMN)?,
        house_type_distribution: value_counts(table, HOUSE_TYPE_COLUMN)?,
    })
}

/// Write both aggregates to `dir`, returning the files written
pub fn write_summary<P: AsRef<Path>>(
    summary: &HousingSummary,
    dir: P,
    format: SummaryFormat,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    ensure_dir(dir)?;

    let regions = dir.join(format!("average_price_by_region.{}", format.extension()));
    let types = dir.join(format!("house_type_distribution.{}", format.extension()));

    match format {
        SummaryFormat::Csv => {
            let region_lines = std::iter::once(format!("{},mean_{}", REGION_COLUMN, PRICE_COLUMN))
                .chain(
                    summary
                        .average_price_by_region
                        .iter()
                        .map(|g| format!("{},{}", g.group, g.mean)),
                );
            write_lines(&regions, region_lines)?;

            let type_lines = std::iter::once(format!("{},count", HOUSE_TYPE_COLUMN)).chain(
                summary
                    .house_type_distribution
                    .iter()
                    .map(|v| format!("{},{}", v.value, v.count)),
            );
            write_lines(&types, type_lines)?;
        }
        SummaryFormat::Json => {
            write_json(&regions, &summary.average_price_by_region)?;
            write_json(&types, &summary.house_type_distribution)?;
        }
    }

    info!(dir = %dir.display(), format = format.extension(), "wrote summary");
    Ok(vec![regions, types])
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
