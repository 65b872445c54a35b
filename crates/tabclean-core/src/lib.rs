//! tabclean-core: loading, cleaning and writing small delimited text files
//!
//! This library provides functionality to:
//! - Load comma-delimited files into tables with up-front path validation
//! - Drop rows with empty fields or a non-numeric leading id
//! - Write tables back out, creating the output directory as needed
//! - Tally letters in name lists, split logs by severity and summarise
//!   housing price tables

pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod logsplit;
pub mod names;
pub mod pipeline;
pub mod stats;
pub mod table;
pub mod writer;

pub use config::{CleanConfig, CleanOverrides};
pub use error::{Error, ErrorKind, Result};
pub use filter::{apply_filters, drop_empty_rows, drop_invalid_ids};
pub use loader::{load_csv, load_csv_quoted, parse_csv_str, parse_quoted_csv_str, read_text};
pub use logsplit::{split_by_severity, split_log_file, write_buckets, Severity, SeverityBuckets};
pub use names::{count_letters, parse_names, read_names, sort_names, NameOrder};
pub use pipeline::{run_clean, CleanReport};
pub use stats::{housing_summary, mean_by_group, value_counts, write_summary, HousingSummary, SummaryFormat};
pub use table::{Row, Table};
pub use writer::{ensure_dir, write_csv};
