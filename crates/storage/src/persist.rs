//! Atomic file replacement

use crate::errors::{Error, Result};
use std::io::Write;
use std::path::Path;

/// Replace `path` with `bytes` through a temporary file in the same directory
///
/// Readers either see the previous file or the complete new one. Missing
/// parent directories are created.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, "create directory", e))?;

    let mut temp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| Error::io(dir, "create temporary file", e))?;
    temp.write_all(bytes)
        .map_err(|e| Error::io(temp.path(), "write temporary file", e))?;
    temp.persist(path)
        .map_err(|e| Error::io(path, "persist", e.error))?;

    tracing::trace!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_parents_and_replaces() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("file.plist");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        let leftovers = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }
}
