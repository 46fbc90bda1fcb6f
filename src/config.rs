//! Runner configuration.
//!
//! Everything the invocation compiler needs from the environment is resolved
//! up front and threaded in as an explicit value: the scratch directory, the
//! SPAdes executable, and the tool version string. The compiler itself never
//! reads ambient process state, which keeps compilation pure and testable.

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Resolved configuration for one runner instance.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Scratch directory under which per-run output directories are created.
    pub scratch: PathBuf,
    /// SPAdes entry point, usually an absolute path to `spades.py`.
    pub spades_exe: PathBuf,
    /// Version label recorded in diagnostics, e.g. `SPADES-4.0.0`.
    pub spades_version: String,
}

/// Locates an executable by absolute path or by scanning `PATH`.
pub fn find_executable(name: &str) -> Result<PathBuf> {
    let path = Path::new(name);
    if path.is_absolute() && path.exists() {
        return Ok(path.to_path_buf());
    }

    if let Ok(paths) = env::var("PATH") {
        for dir in env::split_paths(&paths) {
            let full_path = dir.join(name);
            if full_path.exists() && full_path.is_file() {
                return Ok(full_path);
            }
        }
    }

    anyhow::bail!("{} not found in PATH. Please install it or add it to your PATH.", name)
}

/// Creates a fresh, uniquely named scratch directory under `base`.
///
/// Each run owns its scratch tree exclusively, so concurrent runs never
/// contend for output paths.
pub fn create_unique_scratch(base: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(base)
        .with_context(|| format!("Failed to create scratch base {}", base.display()))?;

    let dir = tempfile::Builder::new()
        .prefix("spades_")
        .tempdir_in(base)
        .context("Failed to create scratch directory")?;

    // The scratch tree must outlive this process; detach it from the guard.
    Ok(dir.keep())
}

/// Derives a provenance version label from a recorded commit hash.
///
/// A full 40-character hex hash is taken verbatim; anything else, including
/// the `local-docker-image` marker used by test deployments and a missing
/// hash, falls back to the `dev` tag.
pub fn version_from_commit(commit: Option<&str>) -> String {
    match commit {
        Some(c) if c.len() == 40 && c.chars().all(|ch| ch.is_ascii_hexdigit()) => c.to_string(),
        _ => "dev".to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_from_full_hash() {
        let hash = "a3f9c2e8b1d04756a3f9c2e8b1d04756a3f9c2e8";
        assert_eq!(version_from_commit(Some(hash)), hash);
    }

    #[test]
    fn test_version_fallback() {
        assert_eq!(version_from_commit(None), "dev");
        assert_eq!(version_from_commit(Some("local-docker-image")), "dev");
        // too short
        assert_eq!(version_from_commit(Some("a3f9c2e8")), "dev");
        // right length, not hex
        assert_eq!(
            version_from_commit(Some("zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz")),
            "dev"
        );
    }

    #[test]
    fn test_find_executable_absolute() {
        let found = find_executable("/bin/sh").unwrap();
        assert_eq!(found, PathBuf::from("/bin/sh"));
    }

    #[test]
    fn test_find_executable_missing() {
        assert!(find_executable("no_such_tool_xyz").is_err());
    }

    #[test]
    fn test_unique_scratch_dirs() {
        let base = tempfile::tempdir().unwrap();
        let a = create_unique_scratch(base.path()).unwrap();
        let b = create_unique_scratch(base.path()).unwrap();
        assert_ne!(a, b);
        assert!(a.is_dir());
        assert!(b.is_dir());
    }
}
