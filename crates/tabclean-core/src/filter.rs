//! Row filters
//!
//! Both predicates keep row 0 untouched, since it is treated as the header.

use crate::error::{Error, Result};
use crate::table::{Row, Table};
use tracing::{debug, info};

/// Remove data rows that contain an empty field
pub fn drop_empty_rows(table: Table) -> Result<Table> {
    retain_data_rows(table, "empty-field", |row| !row.has_empty_field())
}

/// Remove data rows whose first field is not a non-empty run of ASCII digits
pub fn drop_invalid_ids(table: Table) -> Result<Table> {
    retain_data_rows(table, "invalid-id", Row::has_valid_id)
}

/// Run both filters: empty-field rows first, then invalid ids
pub fn apply_filters(table: Table) -> Result<Table> {
    let before = table.row_count();
    let table = drop_invalid_ids(drop_empty_rows(table)?)?;
    info!(
        kept = table.row_count(),
        dropped = before - table.row_count(),
        "filtered rows"
    );
    Ok(table)
}

fn retain_data_rows<F>(table: Table, name: &str, keep: F) -> Result<Table>
where
    F: Fn(&Row) -> bool,
{
    if table.is_empty() {
        return Err(Error::EmptyTable);
    }

    let before = table.row_count();
    let rows: Vec<Row> = table
        .rows
        .into_iter()
        .enumerate()
        .filter(|(i, row)| *i == 0 || keep(row))
        .map(|(_, row)| row)
        .collect();

    debug!(filter = name, dropped = before - rows.len(), "applied filter");
    Ok(Table::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_fields(vec![
            vec!["id", "name"],
            vec!["1", "Alice"],
            vec!["", "Bob"],
            vec!["-2", "Carl"],
            vec!["3", "Dana"],
        ])
    }

    #[test]
    fn test_drop_empty_rows() {
        let table = drop_empty_rows(sample()).unwrap();
        assert_eq!(table.row_count(), 4);
        assert!(table.rows.iter().all(|r| r.get(1) != Some("Bob")));
    }

    #[test]
    fn test_drop_empty_rows_idempotent() {
        let once = drop_empty_rows(sample()).unwrap();
        let twice = drop_empty_rows(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_drop_invalid_ids() {
        let table = Table::from_fields(vec![
            vec!["id", "name"],
            vec!["1", "a"],
            vec!["", "b"],
            vec!["-2", "c"],
            vec!["3.0", "d"],
            vec!["x4", "e"],
            vec!["0042", "f"],
        ]);
        let table = drop_invalid_ids(table).unwrap();
        assert_eq!(
            table.to_fields(),
            vec![vec!["id", "name"], vec!["1", "a"], vec!["0042", "f"]]
        );
    }

    #[test]
    fn test_header_is_never_dropped() {
        let table = Table::from_fields(vec![vec!["", "name"]]);
        assert_eq!(drop_empty_rows(table.clone()).unwrap(), table);
        assert_eq!(drop_invalid_ids(table.clone()).unwrap(), table);
    }

    #[test]
    fn test_empty_table_is_error() {
        assert!(matches!(
            drop_empty_rows(Table::default()),
            Err(Error::EmptyTable)
        ));
        assert!(matches!(
            drop_invalid_ids(Table::default()),
            Err(Error::EmptyTable)
        ));
        assert!(matches!(apply_filters(Table::default()), Err(Error::EmptyTable)));
    }

    #[test]
    fn test_apply_filters_end_to_end() {
        let table = apply_filters(sample()).unwrap();
        assert_eq!(
            table.to_fields(),
            vec![vec!["id", "name"], vec!["1", "Alice"], vec!["3", "Dana"]]
        );
    }
}
