//! Scaffolder configuration
//!
//! Settings come from two places: command-line flags and an optional config
//! file (`database.json` or `migrate.toml`). Boolean flags are OR-combined.
//! For `migrations-dir` and `mode` the command line wins over the file,
//! which wins over the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::create::{DEFAULT_MIGRATIONS_DIR, MigrationRequest};
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::path::ALL_MODE;

/// Config files probed in the working directory, in order.
pub const LOCAL_CONFIG_FILES: [&str; 2] = ["database.json", "migrate.toml"];

/// Options read from a config file. Unknown keys are ignored, so the file
/// can be shared with the migration runner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FileConfig {
    pub migrations_dir: Option<PathBuf>,
    pub mode: Option<String>,
    #[serde(default)]
    pub sql_file: bool,
    #[serde(default)]
    pub coffee_file: bool,
    #[serde(default)]
    pub ignore_on_init: bool,
}

impl FileConfig {
    /// Parse a config file; `.json` files as JSON, anything else as TOML.
    pub fn load(path: &Path) -> ScaffoldResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ScaffoldError::config(path, e.to_string()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(&content).map_err(|e| ScaffoldError::config(path, e.to_string()))
        } else {
            toml::from_str(&content).map_err(|e| ScaffoldError::config(path, e.to_string()))
        }
    }

    /// Load the explicit config file, or the first default one that exists.
    ///
    /// An explicit path must exist. Missing default files are not an error.
    pub fn discover(explicit: Option<&Path>) -> ScaffoldResult<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        for candidate in default_locations() {
            if candidate.is_file() {
                tracing::debug!("Using config file {}", candidate.display());
                return Ok((Self::load(&candidate)?, Some(candidate)));
            }
        }

        Ok((Self::default(), None))
    }
}

fn default_locations() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = LOCAL_CONFIG_FILES.iter().map(PathBuf::from).collect();
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("migrate-scaffold").join("config.toml"));
    }
    paths
}

/// Options given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub migrations_dir: Option<PathBuf>,
    pub mode: Option<String>,
    pub sql_file: bool,
    pub coffee_file: bool,
    pub ignore_on_init: bool,
}

/// Fully resolved settings handed to the scaffolder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub migrations_dir: PathBuf,
    pub mode: String,
    pub sql_file: bool,
    pub coffee_file: bool,
    pub ignore_on_init: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            migrations_dir: PathBuf::from(DEFAULT_MIGRATIONS_DIR),
            mode: ALL_MODE.to_string(),
            sql_file: false,
            coffee_file: false,
            ignore_on_init: false,
        }
    }
}

impl Settings {
    /// Merge command-line options over a config file.
    pub fn resolve(cli: &CliOverrides, file: &FileConfig) -> Self {
        let defaults = Self::default();
        Self {
            migrations_dir: cli
                .migrations_dir
                .clone()
                .or_else(|| file.migrations_dir.clone())
                .unwrap_or(defaults.migrations_dir),
            mode: cli
                .mode
                .clone()
                .or_else(|| file.mode.clone())
                .unwrap_or(defaults.mode),
            sql_file: cli.sql_file || file.sql_file,
            coffee_file: cli.coffee_file || file.coffee_file,
            ignore_on_init: cli.ignore_on_init || file.ignore_on_init,
        }
    }

    /// Build the request for one migration name.
    pub fn request(&self, raw_name: impl Into<String>) -> MigrationRequest {
        MigrationRequest::new(raw_name)
            .base_dir(&self.migrations_dir)
            .mode(&self.mode)
            .sql(self.sql_file)
            .coffee(self.coffee_file)
            .ignore_on_init(self.ignore_on_init)
    }
}
