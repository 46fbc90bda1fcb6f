//! Process Runner
//!
//! Executes a compiled invocation as a blocking subprocess, capturing both
//! output streams in full. A non-zero exit status is not an error here; it is
//! recorded in the [`RunResult`] for the caller to interpret, usually via
//! [`RunResult::ensure_success`].

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::error::SpadesError;
use crate::invocation::CompiledInvocation;

/// Outcome of one subprocess execution.
#[derive(Debug)]
pub struct RunResult {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    outdir: PathBuf,
}

impl RunResult {
    pub fn outdir(&self) -> &Path {
        &self.outdir
    }

    /// Maps a non-zero exit status to [`SpadesError::ExternalProcessFailure`],
    /// pointing at the `spades.log` the assembler leaves in its output
    /// directory.
    pub fn ensure_success(&self) -> Result<(), SpadesError> {
        if self.status.success() {
            return Ok(());
        }
        Err(SpadesError::ExternalProcessFailure {
            code: self.status.code(),
            stderr: self.stderr.trim().to_string(),
            log_path: self.outdir.join("spades.log"),
        })
    }
}

/// Runs the invocation to completion, echoing the command line and captured
/// stdout to stderr; captured stderr is echoed only when the process failed.
pub fn run(invocation: &CompiledInvocation) -> Result<RunResult> {
    let tokens = invocation.tokens();
    eprintln!("Running: {}", invocation.command_line());

    let output = Command::new(&tokens[0])
        .args(&tokens[1..])
        .output()
        .with_context(|| format!("Failed to run {}", tokens[0]))?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !stdout.trim().is_empty() {
        eprintln!("{}", stdout.trim_end());
    }
    if !output.status.success() && !stderr.trim().is_empty() {
        eprintln!("{}", stderr.trim_end());
    }

    Ok(RunResult {
        status: output.status,
        stdout,
        stderr,
        outdir: invocation.outdir().to_path_buf(),
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation(tokens: &[&str]) -> CompiledInvocation {
        CompiledInvocation::new(
            tokens.iter().map(|t| t.to_string()).collect(),
            PathBuf::from("/tmp/run_out"),
        )
    }

    #[test]
    fn test_captures_stdout() {
        let result = run(&invocation(&["echo", "hello"])).unwrap();
        assert!(result.status.success());
        assert_eq!(result.stdout.trim(), "hello");
        assert!(result.ensure_success().is_ok());
    }

    #[test]
    fn test_nonzero_exit_is_not_a_run_error() {
        let result = run(&invocation(&["sh", "-c", "echo oops >&2; exit 3"])).unwrap();
        assert!(!result.status.success());
        assert_eq!(result.status.code(), Some(3));
        assert_eq!(result.stderr.trim(), "oops");

        match result.ensure_success() {
            Err(SpadesError::ExternalProcessFailure {
                code,
                stderr,
                log_path,
            }) => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "oops");
                assert_eq!(log_path, PathBuf::from("/tmp/run_out/spades.log"));
            }
            other => panic!("expected ExternalProcessFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_executable_is_a_run_error() {
        assert!(run(&invocation(&["no_such_tool_xyz"])).is_err());
    }
}
