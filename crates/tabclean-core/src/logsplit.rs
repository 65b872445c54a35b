//! Split a log file into one file per severity

use crate::error::Result;
use crate::loader::read_text;
use crate::writer::{ensure_dir, write_lines};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Severity tag found in a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Success,
}

impl Severity {
    /// Every severity, in matching priority order
    pub const ALL: [Severity; 4] = [
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Success,
    ];

    /// The tag searched for in each line
    pub fn tag(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Success => "SUCCESS",
        }
    }

    /// Output file name, e.g. `warning_log.txt`
    pub fn file_name(self) -> String {
        format!("{}_log.txt", self.tag().to_lowercase())
    }

    /// First severity whose tag occurs anywhere in `line`
    pub fn classify(line: &str) -> Option<Severity> {
        Severity::ALL.into_iter().find(|s| line.contains(s.tag()))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.tag())
    }
}

/// Log lines grouped by severity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityBuckets {
    pub buckets: BTreeMap<Severity, Vec<String>>,
    /// Lines with no recognised tag
    pub unmatched: usize,
}

impl SeverityBuckets {
    pub fn get(&self, severity: Severity) -> &[String] {
        self.buckets.get(&severity).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

/// Group the lines of `text` by severity
///
/// Blank lines are ignored. Every severity gets a bucket, possibly empty.
pub fn split_by_severity(text: &str) -> SeverityBuckets {
    let mut result = SeverityBuckets {
        buckets: Severity::ALL.into_iter().map(|s| (s, Vec::new())).collect(),
        unmatched: 0,
    };

    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        match Severity::classify(line) {
            Some(severity) => result
                .buckets
                .entry(severity)
                .or_default()
                .push(line.to_string()),
            None => {
                debug!(line, "no severity tag");
                result.unmatched += 1;
            }
        }
    }
    result
}

/// Write each bucket to `<severity>_log.txt` under `dir`
pub fn write_buckets<P: AsRef<Path>>(buckets: &SeverityBuckets, dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    ensure_dir(dir)?;

    let mut written = Vec::with_capacity(Severity::ALL.len());
    for severity in Severity::ALL {
        let path = dir.join(severity.file_name());
        write_lines(&path, buckets.get(severity))?;
        written.push(path);
    }
    Ok(written)
}

/// Read `input` and write its per-severity files to `dir`
pub fn split_log_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, dir: Q) -> Result<SeverityBuckets> {
    let buckets = split_by_severity(&read_text(input.as_ref())?);
    write_buckets(&buckets, dir.as_ref())?;
    info!(
        input = %input.as_ref().display(),
        lines = buckets.total(),
        unmatched = buckets.unmatched,
        "split log"
    );
    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const LOG: &str = "\
2024-01-01 10:00 INFO service started
2024-01-01 10:01 WARNING disk at 80%
2024-01-01 10:02 ERROR write failed

2024-01-01 10:03 SUCCESS retry ok
2024-01-01 10:04 DEBUG noise
2024-01-01 10:05 ERROR retry logged INFO too
";

    #[test]
    fn test_classify_priority() {
        assert_eq!(Severity::classify("x ERROR y INFO"), Some(Severity::Info));
        assert_eq!(Severity::classify("x WARNING ERROR"), Some(Severity::Warning));
        assert_eq!(Severity::classify("info lower"), None);
    }

    #[test]
    fn test_split_by_severity() {
        let buckets = split_by_severity(LOG);
        assert_eq!(buckets.get(Severity::Info).len(), 2);
        assert_eq!(buckets.get(Severity::Warning).len(), 1);
        assert_eq!(buckets.get(Severity::Error).len(), 1);
        assert_eq!(buckets.get(Severity::Success).len(), 1);
        assert_eq!(buckets.unmatched, 1);
        assert_eq!(buckets.total(), 5);
    }

    #[test]
    fn test_write_buckets_includes_empty_files() {
        let dir = tempdir().unwrap();
        let buckets = split_by_severity("only INFO here\n");
        let written = write_buckets(&buckets, dir.path().join("logs")).unwrap();

        assert_eq!(written.len(), 4);
        let info = fs::read_to_string(dir.path().join("logs/info_log.txt")).unwrap();
        assert_eq!(info, "only INFO here\n");
        let errors = fs::read_to_string(dir.path().join("logs/error_log.txt")).unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_split_log_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("app.log");
        fs::write(&input, LOG).unwrap();

        let buckets = split_log_file(&input, dir.path().join("out")).unwrap();
        assert_eq!(buckets.total(), 5);
        assert!(dir.path().join("out/success_log.txt").is_file());
    }
}
