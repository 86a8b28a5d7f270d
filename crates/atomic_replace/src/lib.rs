// crates/atomic_replace/src/lib.rs

use std::fs;
use std::io;
use std::path::Path;

use tempfile::{Builder, TempPath};

/// A scratch file reused for every normalized candidate in one run.
///
/// The path is reserved inside the traversal root so it always shares a
/// filesystem with the files it will replace, keeping the final rename a
/// single atomic operation. A successful replace moves the file away from
/// the scratch path; `recreate` brings it back for the next candidate. The
/// path is removed when the value is dropped, on every exit path.
pub struct ScratchFile {
    path: TempPath,
}

impl ScratchFile {
    /// Reserves a uniquely named scratch path inside `dir`.
    pub fn create_in(dir: &Path) -> io::Result<Self> {
        let path = Builder::new()
            .prefix("ObjectFactory")
            .suffix(".tmp")
            .tempfile_in(dir)?
            .into_temp_path();
        Ok(Self { path })
    }

    /// Opens the scratch path as an empty file, truncating any previous
    /// contents. Must be called before each use: a replace renames the file
    /// away, leaving only the reserved path behind.
    pub fn recreate(&self) -> io::Result<()> {
        fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Atomically replaces `target` with the contents at `scratch`.
///
/// This is a single rename with replace-existing semantics; on failure the
/// target is left exactly as it was.
pub fn replace_file(scratch: &Path, target: &Path) -> io::Result<()> {
    fs::rename(scratch, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_scratch_lives_inside_dir() {
        let dir = tempdir().unwrap();
        let scratch = ScratchFile::create_in(dir.path()).unwrap();
        assert_eq!(scratch.path().parent().unwrap(), dir.path());
        assert!(scratch.path().exists());
    }

    #[test]
    fn test_recreate_truncates() {
        let dir = tempdir().unwrap();
        let scratch = ScratchFile::create_in(dir.path()).unwrap();
        fs::write(scratch.path(), "stale contents").unwrap();
        scratch.recreate().unwrap();
        assert_eq!(fs::read(scratch.path()).unwrap(), b"");
    }

    #[test]
    fn test_replace_swaps_contents() {
        let dir = tempdir().unwrap();
        let scratch = ScratchFile::create_in(dir.path()).unwrap();
        let target = dir.path().join("ObjectFactory.java");
        fs::write(&target, "old").unwrap();
        fs::write(scratch.path(), "new").unwrap();

        replace_file(scratch.path(), &target).unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"new");
        // The rename moved the file away from the scratch path.
        assert!(!scratch.path().exists());
    }

    #[test]
    fn test_recreate_after_replace() {
        let dir = tempdir().unwrap();
        let scratch = ScratchFile::create_in(dir.path()).unwrap();
        let target = dir.path().join("ObjectFactory.java");
        fs::write(&target, "old").unwrap();
        fs::write(scratch.path(), "new").unwrap();
        replace_file(scratch.path(), &target).unwrap();

        scratch.recreate().unwrap();
        assert!(scratch.path().exists());
        assert_eq!(fs::read(scratch.path()).unwrap(), b"");
    }

    #[test]
    fn test_failed_replace_leaves_target_intact() {
        let dir = tempdir().unwrap();
        let scratch = ScratchFile::create_in(dir.path()).unwrap();
        let target = dir.path().join("ObjectFactory.java");
        fs::write(&target, "original").unwrap();

        // The scratch path was renamed away (simulated by removing it), so
        // the rename has no source and must fail.
        fs::remove_file(scratch.path()).unwrap();
        assert!(replace_file(scratch.path(), &target).is_err());
        assert_eq!(fs::read(&target).unwrap(), b"original");
    }

    #[test]
    fn test_drop_removes_scratch_path() {
        let dir = tempdir().unwrap();
        let path = {
            let scratch = ScratchFile::create_in(dir.path()).unwrap();
            scratch.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
