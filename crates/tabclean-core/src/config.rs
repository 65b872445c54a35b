//! Configuration for the clean pipeline

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for one run of [`crate::pipeline::run_clean`]
///
/// Build it once (defaults, then an optional TOML file, then CLI flags)
/// and pass it by reference afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanConfig {
    pub input_file: PathBuf,
    pub output_dir: PathBuf,
    pub output_file: String,
    /// Run both row filters before writing
    pub drop_invalid_rows: bool,
    /// Print the table before writing
    pub verbose: bool,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanOverrides {
    pub input_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub output_file: Option<String>,
    pub drop_invalid_rows: bool,
    pub verbose: bool,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from("Data/source_data.csv"),
            output_dir: PathBuf::from("output"),
            output_file: "output_data.csv".to_string(),
            drop_invalid_rows: false,
            verbose: false,
        }
    }
}

impl CleanConfig {
    /// Load a config from a TOML file; missing keys take their defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
        toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Defaults, then the TOML file at `path` if given, then `overrides`
    pub fn resolve(path: Option<&Path>, overrides: CleanOverrides) -> Result<Self> {
        let base = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(overrides))
    }

    /// Apply command-line values on top of this config
    ///
    /// Paths given replace the current ones. Flags can only switch an
    /// option on.
    pub fn with_overrides(self, overrides: CleanOverrides) -> Self {
        Self {
            input_file: overrides.input_file.unwrap_or(self.input_file),
            output_dir: overrides.output_dir.unwrap_or(self.output_dir),
            output_file: overrides.output_file.unwrap_or(self.output_file),
            drop_invalid_rows: overrides.drop_invalid_rows || self.drop_invalid_rows,
            verbose: overrides.verbose || self.verbose,
        }
    }

    /// Path the cleaned table is written to
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }
}
