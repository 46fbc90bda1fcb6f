//! Output Locator
//!
//! After a successful run the result artifact sits somewhere inside the run's
//! output tree; exactly one file with the expected name is produced per run.
//! The locator walks the tree and reports the first directory containing it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Final contig sequences produced by SPAdes.
pub const FINAL_CONTIGS: &str = "contigs.fasta";
/// Final scaffold sequences produced by SPAdes.
pub const FINAL_SCAFFOLDS: &str = "scaffolds.fasta";

/// Recursively searches `root` for a file named `file_name` and returns the
/// first containing directory, or `None` when the tree holds no such file.
///
/// Files in a directory are checked before its subdirectories are descended.
pub fn find_file_dir(root: &Path, file_name: &str) -> io::Result<Option<PathBuf>> {
    let mut subdirs = Vec::new();

    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
        } else if entry.file_name().to_str() == Some(file_name) {
            return Ok(Some(root.to_path_buf()));
        }
    }

    for dir in subdirs {
        if let Some(found) = find_file_dir(&dir, file_name)? {
            return Ok(Some(found));
        }
    }

    Ok(None)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_finds_file_three_levels_deep() {
        let root = TempDir::new().unwrap();
        let deep = root.path().join("K55").join("misc").join("final");
        fs::create_dir_all(&deep).unwrap();
        File::create(deep.join(FINAL_CONTIGS)).unwrap();
        // decoys that must not match
        File::create(root.path().join("spades.log")).unwrap();
        File::create(root.path().join("K55").join("contigs.paths")).unwrap();

        let found = find_file_dir(root.path(), FINAL_CONTIGS).unwrap();
        assert_eq!(found, Some(deep));
    }

    #[test]
    fn test_finds_file_at_root() {
        let root = TempDir::new().unwrap();
        File::create(root.path().join(FINAL_SCAFFOLDS)).unwrap();

        let found = find_file_dir(root.path(), FINAL_SCAFFOLDS).unwrap();
        assert_eq!(found, Some(root.path().to_path_buf()));
    }

    #[test]
    fn test_absent_file_yields_none() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("a").join("b")).unwrap();

        let found = find_file_dir(root.path(), FINAL_CONTIGS).unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let root = TempDir::new().unwrap();
        let gone = root.path().join("never_created");
        assert!(find_file_dir(&gone, FINAL_CONTIGS).is_err());
    }
}
