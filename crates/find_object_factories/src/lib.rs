// crates/find_object_factories/src/lib.rs

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The basename the xjc tool gives its generated factory class.
pub const TARGET_FILE_NAME: &str = "ObjectFactory.java";

/// Recursively collects every regular file under `root` whose basename is
/// exactly `ObjectFactory.java`.
///
/// Directory symlinks are followed (walkdir detects and refuses symlink
/// loops). Entries are visited in file-name order per directory, so the
/// result is deterministic for a given tree. A missing root, or a root that
/// is not a directory, yields an empty list.
///
/// # Errors
///
/// Any error during enumeration (an unreadable directory, an I/O fault) is
/// returned; the caller treats it as fatal rather than skipping the entry.
pub fn find_object_factories(root: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }
    let mut found = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && entry.file_name() == TARGET_FILE_NAME {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}
