//! Idempotent directory provisioning.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

use crate::error::{ScaffoldError, ScaffoldResult};

/// Make sure `path` exists as a directory, creating missing parents.
///
/// Calling this on an existing directory is a no-op, including when another
/// process created it between the existence check and `create_dir_all`.
pub fn ensure_dir(path: &Path) -> ScaffoldResult<()> {
    if path.is_dir() {
        return Ok(());
    }

    if path.exists() {
        return Err(ScaffoldError::dir_create(
            path,
            io::Error::new(ErrorKind::AlreadyExists, "path exists and is not a directory"),
        ));
    }

    match fs::create_dir_all(path) {
        Ok(()) => {
            tracing::debug!("Created directory {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(ScaffoldError::dir_create(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_missing_parents() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("a/b/c");
        ensure_dir(&path).unwrap();
        assert!(path.is_dir());
    }

    #[test]
    fn test_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("migrations");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep.js"), "x").unwrap();

        ensure_dir(&path).unwrap();
        ensure_dir(&path).unwrap();

        let entries: Vec<_> = fs::read_dir(&path).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert!(path.join("keep.js").is_file());
    }

    #[test]
    fn test_file_in_the_way() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("migrations");
        fs::write(&path, "not a dir").unwrap();

        let err = ensure_dir(&path).unwrap_err();
        assert!(matches!(err, ScaffoldError::DirCreateFailed { .. }));

        let nested = path.join("sqls");
        assert!(matches!(
            ensure_dir(&nested),
            Err(ScaffoldError::DirCreateFailed { .. })
        ));
    }
}
