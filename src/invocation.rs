//! Invocation Compiler
//!
//! Turns a structured assembly request (libraries + mode + resources +
//! options) into a validated, ready-to-execute SPAdes command line.
//!
//! Compilation enforces the mode policy before any library flag is emitted,
//! so an invalid request never produces a partial invocation. The only I/O
//! performed is creating the run's output directory; everything else is pure
//! token assembly.
//!
//! Token ordering is deterministic: base flags, mode/modifier flags, k-mer
//! list, paired-end libraries in caller order (numbered from 1), single-end
//! libraries in caller order (numbered from 1), then PacBio before Nanopore
//! long reads.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::RunnerConfig;
use crate::error::SpadesError;
use crate::library::{LongReadLibrary, LongReadPlatform, PairedEndLibrary, SingleEndLibrary};
use crate::mode::{AssemblyMode, LongReadRule, PairedEndRule};

// ============================================================================
// Request
// ============================================================================

/// Resource limits passed through to SPAdes. Both values are positive.
#[derive(Debug, Clone, Copy)]
pub struct ResourceLimits {
    pub threads: usize,
    pub memory_gb: usize,
}

/// Optional modifiers orthogonal to the assembly mode.
#[derive(Debug, Clone, Default)]
pub struct AssemblyOptions {
    /// Request the mismatch-correction pass. Silently dropped for
    /// metagenomic mode, where SPAdes rejects it.
    pub careful: bool,
    /// Force the legacy GFA 1.1 assembly-graph format (4.x defaults to 1.2).
    pub gfa11: bool,
    /// k-mer sizes, passed through comma-joined in caller-given order.
    pub k_list: Option<Vec<usize>>,
}

/// One complete assembly request, consumed by [`InvocationCompiler::compile`].
#[derive(Debug, Clone)]
pub struct AssemblyRequest {
    pub mode: AssemblyMode,
    /// Name of the run's output directory under the scratch root.
    pub run_name: String,
    pub pe_libs: Vec<PairedEndLibrary>,
    pub se_libs: Vec<SingleEndLibrary>,
    pub long_reads: Vec<LongReadLibrary>,
    pub resources: ResourceLimits,
    pub options: AssemblyOptions,
}

// ============================================================================
// Compiled invocation
// ============================================================================

/// A fully resolved SPAdes command: the argument tokens (program first) and
/// the run's output directory. Never mutated after compilation.
#[derive(Debug, Clone)]
pub struct CompiledInvocation {
    tokens: Vec<String>,
    outdir: PathBuf,
}

impl CompiledInvocation {
    pub(crate) fn new(tokens: Vec<String>, outdir: PathBuf) -> Self {
        Self { tokens, outdir }
    }

    /// The ordered argument tokens, program name first.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn outdir(&self) -> &Path {
        &self.outdir
    }

    /// The tokens joined for log output.
    pub fn command_line(&self) -> String {
        self.tokens.join(" ")
    }
}

// ============================================================================
// Compiler
// ============================================================================

/// Compiles assembly requests against an explicit [`RunnerConfig`].
pub struct InvocationCompiler {
    config: RunnerConfig,
}

impl InvocationCompiler {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Validates the request against the mode policy and compiles it into a
    /// [`CompiledInvocation`].
    ///
    /// # Errors
    /// - [`SpadesError::InvalidLibraryCombination`] when metagenomic mode is
    ///   given anything but exactly one PE library, or when long reads are
    ///   supplied to a mode that forbids them
    /// - [`SpadesError::MissingLongRead`] when hybrid mode has no long-read
    ///   library
    /// - [`SpadesError::OutputDir`] when the output directory cannot be
    ///   created
    pub fn compile(&self, req: &AssemblyRequest) -> Result<CompiledInvocation, SpadesError> {
        let policy = req.mode.policy();

        // All policy checks happen before a single library flag is emitted.
        if policy.paired_end == PairedEndRule::ExactlyOne && req.pe_libs.len() != 1 {
            return Err(SpadesError::InvalidLibraryCombination(format!(
                "{} mode requires exactly one paired-end library, got {}",
                req.mode,
                req.pe_libs.len()
            )));
        }
        match policy.long_reads {
            LongReadRule::Forbidden if !req.long_reads.is_empty() => {
                return Err(SpadesError::InvalidLibraryCombination(format!(
                    "{} mode does not accept long-read libraries",
                    req.mode
                )));
            }
            LongReadRule::Required if req.long_reads.is_empty() => {
                return Err(SpadesError::MissingLongRead);
            }
            _ => {}
        }

        // Idempotent: re-compiling into an existing run directory is fine.
        let outdir = self.config.scratch.join(&req.run_name);
        fs::create_dir_all(&outdir).map_err(|source| SpadesError::OutputDir {
            path: outdir.clone(),
            source,
        })?;

        let mut tokens = vec![
            path_token(&self.config.spades_exe),
            "-o".to_string(),
            path_token(&outdir),
            "-t".to_string(),
            req.resources.threads.to_string(),
            "-m".to_string(),
            req.resources.memory_gb.to_string(),
        ];

        if req.options.gfa11 {
            tokens.push("--gfa11".to_string());
        }
        if let Some(flag) = policy.mode_flag {
            tokens.push(flag.to_string());
        }
        if req.options.careful && policy.careful_allowed {
            tokens.push("--careful".to_string());
        }

        if let Some(k_list) = &req.options.k_list {
            let joined = k_list
                .iter()
                .map(|k| k.to_string())
                .collect::<Vec<_>>()
                .join(",");
            tokens.push("-k".to_string());
            tokens.push(joined);
        }

        for (idx, lib) in req.pe_libs.iter().enumerate() {
            let n = idx + 1;
            match lib {
                PairedEndLibrary::Interleaved(path) => {
                    tokens.push(format!("--pe{n}-12"));
                    tokens.push(path_token(path));
                }
                PairedEndLibrary::Split { left, right } => {
                    tokens.push(format!("--pe{n}-1"));
                    tokens.push(path_token(left));
                    tokens.push(format!("--pe{n}-2"));
                    tokens.push(path_token(right));
                }
            }
        }

        for (idx, lib) in req.se_libs.iter().enumerate() {
            tokens.push(format!("--s{}", idx + 1));
            tokens.push(path_token(&lib.path));
        }

        // PacBio flags first, then Nanopore; order is fixed.
        for platform in [LongReadPlatform::PacBio, LongReadPlatform::Nanopore] {
            for lib in req.long_reads.iter().filter(|l| l.platform == platform) {
                tokens.push(platform.flag().to_string());
                tokens.push(path_token(&lib.path));
            }
        }

        Ok(CompiledInvocation::new(tokens, outdir))
    }
}

fn path_token(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

// ============================================================================
// Tests
// ============================================================================
