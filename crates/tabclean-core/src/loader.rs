//! Loader for comma-delimited text files
//!
//! Paths are validated before any parsing, in a fixed order: existence,
//! regular file, read permission, then extension. Files are read whole;
//! inputs are expected to be small.

use crate::error::{Error, Result};
use crate::table::{Row, Table};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Extension expected by [`load_csv`]
pub const CSV_EXTENSION: &str = "csv";

/// Field delimiter for every file this crate reads or writes
pub const DELIMITER: u8 = b',';

/// Load a CSV file into a Table
///
/// Each line becomes one row, blank lines included. Fields are split on the
/// comma with no quoting rules and trimmed of surrounding whitespace. Rows
/// may have differing lengths.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let content = read_csv_file(path)?;
    let table = parse_csv_str(&content, path)?;
    debug!(path = %path.display(), rows = table.row_count(), "loaded csv");
    Ok(table)
}

/// Load a CSV file that may use RFC 4180 quoting
///
/// Quoted fields may hold commas and line breaks. Fully empty lines are
/// skipped. The path checks match [`load_csv`].
pub fn load_csv_quoted<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let content = read_csv_file(path)?;
    let table = parse_quoted_csv_str(&content, path)?;
    debug!(path = %path.display(), rows = table.row_count(), "loaded quoted csv");
    Ok(table)
}

/// Parse comma-delimited text into a Table, one row per line
///
/// `source` names the input in error messages.
pub fn parse_csv_str<P: AsRef<Path>>(content: &str, source: P) -> Result<Table> {
    let path = source.as_ref();
    let mut rows = Vec::new();
    for line in content.lines() {
        rows.push(split_line(line, path)?);
    }
    non_empty(rows, path)
}

/// Parse CSV text with quoting into a Table
pub fn parse_quoted_csv_str<P: AsRef<Path>>(content: &str, source: P) -> Result<Table> {
    let path = source.as_ref();
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(DELIMITER)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|e| Error::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
        rows.push(Row::new(record.iter().map(str::to_string).collect()));
    }
    non_empty(rows, path)
}

/// Split one line on the delimiter; an empty line is a row with one empty field
fn split_line(line: &str, path: &Path) -> Result<Row> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .delimiter(DELIMITER)
        .trim(csv::Trim::All)
        .from_reader(line.as_bytes());

    let mut record = csv::StringRecord::new();
    let found = csv_reader
        .read_record(&mut record)
        .map_err(|e| Error::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;

    if !found {
        return Ok(Row::from_fields([""]));
    }
    Ok(Row::new(record.iter().map(str::to_string).collect()))
}

fn non_empty(rows: Vec<Row>, path: &Path) -> Result<Table> {
    if rows.iter().all(Row::is_blank) {
        return Err(Error::EmptyInput {
            path: path.to_path_buf(),
        });
    }
    Ok(Table::new(rows))
}

fn read_csv_file(path: &Path) -> Result<String> {
    let mut file = open_checked(path)?;

    if path.extension().map_or(true, |ext| ext != CSV_EXTENSION) {
        return Err(Error::WrongExtension {
            path: path.to_path_buf(),
            expected: CSV_EXTENSION.to_string(),
        });
    }

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::read(path, e))?;
    Ok(content)
}

/// Read a whole text file after the existence, type and permission checks
///
/// No extension is enforced. Whitespace-only content is rejected.
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let mut file = open_checked(path)?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::read(path, e))?;

    if content.trim().is_empty() {
        return Err(Error::EmptyInput {
            path: path.to_path_buf(),
        });
    }
    Ok(content)
}

fn open_checked(path: &Path) -> Result<File> {
    let metadata = fs::metadata(path).map_err(|e| Error::read(path, e))?;
    if !metadata.is_file() {
        return Err(Error::NotAFile {
            path: path.to_path_buf(),
        });
    }
    File::open(path).map_err(|e| Error::read(path, e))
}
