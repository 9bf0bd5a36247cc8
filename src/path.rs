//! Target path derivation for a possibly nested migration name.
//!
//! ```text
//! name            directory                     title
//! create-users    migrations/                   create-users
//! auth/users      migrations/auth               auth
//! auth/users/     migrations/auth/users         users
//! a/b/name        migrations/a/b                b
//! ```
//!
//! A trailing slash means "use this name as a folder": the title is the
//! second-to-last segment of a nested name, or the first segment when the
//! second-to-last one is empty (`a//`).

use std::path::{Path, PathBuf};

use crate::error::{ScaffoldError, ScaffoldResult};

/// Mode that places migrations directly in the base directory.
pub const ALL_MODE: &str = "all";

/// Sub-directory holding companion SQL files.
pub const SQL_DIR: &str = "sqls";

/// Where a migration lands and what it is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Directory of the primary migration file.
    pub directory: PathBuf,
    /// Title used to build every artifact file name.
    pub title: String,
    /// `base_dir[/mode]`, the root for companion SQL files.
    pub mode_dir: PathBuf,
    /// Number of nested folders between `mode_dir` and `directory`.
    pub depth: usize,
}

/// `base_dir` joined with `mode`, unless the mode is `all` (or blank).
pub fn mode_dir(base_dir: &Path, mode: &str) -> PathBuf {
    if mode.is_empty() || mode == ALL_MODE {
        base_dir.to_path_buf()
    } else {
        base_dir.join(mode)
    }
}

/// Resolve a raw migration name against the base directory and mode.
pub fn resolve(raw_name: &str, base_dir: &Path, mode: &str) -> ScaffoldResult<ResolvedTarget> {
    if raw_name.is_empty() {
        return Err(ScaffoldError::EmptyName);
    }

    let segments: Vec<&str> = raw_name.split('/').collect();
    let root = mode_dir(base_dir, mode);

    let (title, folders) = match segments.as_slice() {
        [single] => (*single, &[][..]),
        [folders @ .., _last] => {
            let title = match folders[folders.len() - 1] {
                "" => segments[0],
                folder => folder,
            };
            (title, folders)
        }
        [] => return Err(ScaffoldError::EmptyName),
    };

    if title.is_empty() {
        return Err(ScaffoldError::EmptyName);
    }

    let mut directory = root.clone();
    let mut depth = 0;
    for folder in folders.iter().filter(|f| !f.is_empty()) {
        directory.push(folder);
        depth += 1;
    }

    tracing::debug!(
        "Resolved '{}' to {} (title: {})",
        raw_name,
        directory.display(),
        title
    );

    Ok(ResolvedTarget {
        directory,
        title: title.to_string(),
        mode_dir: root,
        depth,
    })
}

/// Companion SQL directory under `dir`.
pub fn sql_dir(dir: &Path) -> PathBuf {
    dir.join(SQL_DIR)
}
