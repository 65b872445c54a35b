//! Writers for tables and plain line files

use crate::error::{Error, Result};
use crate::table::Table;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Create `dir` and any missing parents; succeeds if it already exists
pub fn ensure_dir<P: AsRef<Path>>(dir: P) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| Error::CreateDir {
        path: dir.to_path_buf(),
        source: e,
    })?;
    debug!(dir = %dir.display(), "output directory ready");
    Ok(())
}

/// Write a table as comma-joined lines to `output_dir/filename`
///
/// Any existing file is overwritten. Fields are never quoted, so a field
/// holding a comma will not survive a reload.
pub fn write_csv<P: AsRef<Path>>(table: &Table, output_dir: P, filename: &str) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    ensure_dir(output_dir)?;

    let path = output_dir.join(filename);
    write_lines(&path, table.rows.iter().map(|row| row.fields.join(",")))?;

    info!(path = %path.display(), rows = table.row_count(), "wrote csv");
    Ok(path)
}

/// Write one line per item to `path`, creating or truncating it
pub fn write_lines<I, S>(path: &Path, lines: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let to_error = |e: std::io::Error| match e.kind() {
        std::io::ErrorKind::PermissionDenied => Error::PermissionDenied {
            path: path.to_path_buf(),
            source: e,
        },
        _ => Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        },
    };

    let file = File::create(path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{}", line.as_ref()).map_err(to_error)?;
    }
    writer.flush().map_err(to_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_csv;
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_nested_dir() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("a").join("b");
        let table = Table::from_fields([["id", "name"], ["1", "Alice"]]);

        let path = write_csv(&table, &out, "out.csv").unwrap();
        assert_eq!(path, out.join("out.csv"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "id,name\n1,Alice\n");
    }

    #[test]
    fn test_write_into_existing_dir_overwrites() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("out.csv"), "old,content\nmore,lines\n").unwrap();

        let table = Table::from_fields([["x"]]);
        write_csv(&table, dir.path(), "out.csv").unwrap();
        write_csv(&table, dir.path(), "out.csv").unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("out.csv")).unwrap(),
            "x\n"
        );
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let table = Table::from_fields(vec![
            vec!["id", "name", "city"],
            vec!["1", "Alice", "Aarhus"],
            vec!["2", "", "Odense"],
            vec!["3", "Carl"],
        ]);

        let path = write_csv(&table, dir.path(), "rt.csv").unwrap();
        assert_eq!(load_csv(&path).unwrap(), table);
    }

    #[test]
    fn test_round_trip_keeps_blank_rows() {
        let dir = tempdir().unwrap();
        let table = Table::from_fields(vec![
            vec!["name"],
            vec!["Alice"],
            vec![""],
            vec!["Bob"],
            vec![""],
        ]);

        let path = write_csv(&table, dir.path(), "names.csv").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "name\nAlice\n\nBob\n\n");
        assert_eq!(load_csv(&path).unwrap(), table);
    }

    #[test]
    fn test_dir_blocked_by_file() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("taken");
        fs::write(&blocker, "").unwrap();

        let err = write_csv(&Table::from_fields([["x"]]), blocker.join("sub"), "o.csv")
            .unwrap_err();
        assert!(matches!(err, Error::CreateDir { ref path, .. } if path == &blocker.join("sub")));
    }
}
