//! spaderun - SPAdes assembly invocation runner
//!
//! Configures and invokes the external SPAdes assembler for the standard,
//! isolate, metagenomic and hybrid (long+short read) assembly strategies,
//! then resolves the produced contig/scaffold file inside the run's output
//! tree.
//!
//! The assembly algorithm itself lives entirely in SPAdes; this crate owns
//! the step from "structured description of libraries, mode and resources"
//! to "validated command line" and back from "finished subprocess" to
//! "artifact path".
//!
//! # Modules
//! - `library`: typed paired-end / single-end / long-read library descriptors
//! - `mode`: assembly modes and their per-mode flag policies
//! - `invocation`: the invocation compiler, request in, command line out
//! - `runner`: blocking subprocess execution with full stream capture
//! - `locator`: recursive output-artifact discovery
//! - `config`: explicit runner configuration (scratch, executable, version)
//! - `error`: the closed set of error kinds

pub mod config;
pub mod error;
pub mod invocation;
pub mod library;
pub mod locator;
pub mod mode;
pub mod runner;
