//! Persisting rendered artifacts.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Persists one rendered file.
///
/// The scaffolder calls this once per artifact, strictly in order, and stops
/// at the first error.
pub trait ArtifactWriter {
    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Writes artifacts to the local filesystem.
///
/// Files are opened with `create_new`, so an existing migration is never
/// overwritten.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsWriter;

impl ArtifactWriter for FsWriter {
    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
        file.write_all(contents.as_bytes())?;
        file.flush()
    }
}
