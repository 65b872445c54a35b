//! Core table types for delimited text data

use serde::{Deserialize, Serialize};

/// An ordered list of rows; row 0 is conventionally the header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Row data, header included
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a table from its rows
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Build a table from raw field lists
    pub fn from_fields<I, R, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(Row::from_fields).collect(),
        }
    }

    /// Get the number of rows, header included
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first row, if any
    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Rows after the header
    pub fn data_rows(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Find a column index by header name
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.header()?.fields.iter().position(|f| f == name)
    }

    /// Borrow the table as nested string slices
    pub fn to_fields(&self) -> Vec<Vec<&str>> {
        self.rows
            .iter()
            .map(|r| r.fields.iter().map(String::as_str).collect())
            .collect()
    }
}

/// A row of text fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub fields: Vec<String>,
}

impl Row {
    /// Create a new row
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn from_fields<R, S>(fields: R) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Get a field by column index
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// True when any field is empty after trimming
    pub fn has_empty_field(&self) -> bool {
        self.fields.iter().any(|f| f.trim().is_empty())
    }

    /// True when the first field is a non-empty run of ASCII digits
    pub fn has_valid_id(&self) -> bool {
        self.fields
            .first()
            .is_some_and(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
    }

    /// True for a row with no fields or a single empty one (a blank line)
    pub fn is_blank(&self) -> bool {
        self.fields.len() <= 1 && self.fields.iter().all(|f| f.is_empty())
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.fields.join("\t"))
    }
}
