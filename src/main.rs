use anyhow::Result;
use clap::Parser;
use std::env;
use std::path::PathBuf;

use spaderun::config::{create_unique_scratch, find_executable, version_from_commit, RunnerConfig};
use spaderun::invocation::{AssemblyOptions, AssemblyRequest, InvocationCompiler, ResourceLimits};
use spaderun::library::{
    LongReadLibrary, LongReadPlatform, PairedEndLibrary, RawPairedEnd, SingleEndLibrary,
};
use spaderun::locator::{find_file_dir, FINAL_CONTIGS, FINAL_SCAFFOLDS};
use spaderun::mode::AssemblyMode;
use spaderun::runner;

fn parse_mode(s: &str) -> Result<AssemblyMode, String> {
    s.parse()
}

fn parse_threads(s: &str) -> Result<usize, String> {
    let val: usize = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if val == 0 {
        Err("Thread count must be at least 1".to_string())
    } else {
        Ok(val)
    }
}

fn parse_memory(s: &str) -> Result<usize, String> {
    let val: usize = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if val == 0 {
        Err("Memory budget must be at least 1 GB".to_string())
    } else {
        Ok(val)
    }
}

#[derive(Parser)]
#[command(name = "spaderun")]
#[command(version)]
#[command(about = "Compile, execute and resolve SPAdes assembly runs")]
#[command(long_about = r#"
spaderun - SPAdes assembly invocation runner

Compiles a validated spades.py command line from the supplied sequencing
libraries, assembly mode and resource limits, executes it, and prints the
path of the resulting sequence file.

MODES:
  standard   default SPAdes pipeline
  isolate    high-coverage isolate data (--isolate)
  meta       metaSPAdes; exactly one paired-end library, --careful rejected
  hybrid     short reads plus PacBio/Nanopore long reads (required)

OUTPUT:
  The run executes in a fresh scratch directory under -o. On success the
  absolute path of contigs.fasta (or scaffolds.fasta with --scaffolds) is
  printed on stdout; all diagnostics go to stderr.

EXAMPLES:
  # Standard assembly of one split pair
  spaderun -1 R1.fq -2 R2.fq -t 16 -m 250 -o scratch/

  # Metagenomic assembly from an interleaved library
  spaderun --mode meta --pe12 reads.fq -o scratch/

  # Hybrid assembly with Nanopore long reads
  spaderun --mode hybrid -1 R1.fq -2 R2.fq --nanopore long.fq -o scratch/
"#)]
struct Args {
    #[arg(long, value_name = "MODE", default_value = "standard", value_parser = parse_mode, help_heading = "Assembly")]
    mode: AssemblyMode,

    #[arg(short = '1', long = "pe1", value_name = "FILE", help_heading = "Input")]
    pe1: Vec<String>,

    #[arg(short = '2', long = "pe2", value_name = "FILE", help_heading = "Input")]
    pe2: Vec<String>,

    #[arg(long, value_name = "FILE", help_heading = "Input")]
    pe12: Vec<String>,

    #[arg(short = 's', long, value_name = "FILE", help_heading = "Input")]
    single: Vec<String>,

    #[arg(long, value_name = "FILE", help_heading = "Input")]
    pacbio: Vec<String>,

    #[arg(long, value_name = "FILE", help_heading = "Input")]
    nanopore: Vec<String>,

    #[arg(long, help_heading = "Assembly")]
    careful: bool,

    #[arg(long, help_heading = "Assembly")]
    gfa11: bool,

    #[arg(short = 'k', long = "k-list", value_name = "SIZES", value_delimiter = ',', help_heading = "Assembly")]
    k_list: Option<Vec<usize>>,

    #[arg(short = 'o', long, value_name = "DIR", default_value = "spades_scratch", help_heading = "Output")]
    outdir: PathBuf,

    #[arg(short = 'n', long, value_name = "NAME", default_value = "spades_run", help_heading = "Output")]
    run_name: String,

    #[arg(long, help_heading = "Output")]
    scaffolds: bool,

    #[arg(short = 't', long, value_name = "NUM", default_value = "16", value_parser = parse_threads, help_heading = "Runtime")]
    threads: usize,

    #[arg(short = 'm', long = "memory-gb", value_name = "GB", default_value = "250", value_parser = parse_memory, help_heading = "Runtime")]
    memory_gb: usize,

    #[arg(long, value_name = "VERSION", help_heading = "Runtime")]
    spades_version: Option<String>,

    #[arg(long, value_name = "HASH", help_heading = "Runtime")]
    module_commit: Option<String>,

    #[arg(short = 'v', long, help_heading = "Runtime")]
    verbose: bool,
}

fn build_pe_libs(pe1: &[String], pe2: &[String], pe12: &[String]) -> Result<Vec<PairedEndLibrary>> {
    if pe1.len() != pe2.len() {
        anyhow::bail!(
            "-1 and -2 must be given the same number of times ({} vs {})",
            pe1.len(),
            pe2.len()
        );
    }

    let mut libs = Vec::new();
    for (left, right) in pe1.iter().zip(pe2) {
        let raw = RawPairedEnd {
            left: Some(left.clone()),
            right: Some(right.clone()),
            ..Default::default()
        };
        libs.push(raw.normalize()?);
    }
    for file in pe12 {
        let raw = RawPairedEnd {
            interleaved: Some(file.clone()),
            ..Default::default()
        };
        libs.push(raw.normalize()?);
    }
    Ok(libs)
}

fn resolve_spades_version(flag: Option<&str>) -> String {
    let raw = match flag {
        Some(v) => v.to_string(),
        None => env::var("SPADES_VERSION").unwrap_or_else(|_| "unknown".to_string()),
    };
    format!("SPADES-{}", raw)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let spades_exe = find_executable("spades.py")?;
    let spades_version = resolve_spades_version(args.spades_version.as_deref());
    let scratch = create_unique_scratch(&args.outdir)?;

    if args.verbose {
        eprintln!("Found spades.py: {}", spades_exe.display());
        eprintln!("Tool version: {}", spades_version);
        eprintln!(
            "Module version: {}",
            version_from_commit(args.module_commit.as_deref())
        );
        eprintln!("Scratch dir: {}", scratch.display());
    }

    let pe_libs = build_pe_libs(&args.pe1, &args.pe2, &args.pe12)?;
    let se_libs = args
        .single
        .iter()
        .map(|s| SingleEndLibrary::new(s))
        .collect::<Result<Vec<_>, _>>()?;

    let mut long_reads = Vec::new();
    for file in &args.pacbio {
        long_reads.push(LongReadLibrary::new(LongReadPlatform::PacBio, file)?);
    }
    for file in &args.nanopore {
        long_reads.push(LongReadLibrary::new(LongReadPlatform::Nanopore, file)?);
    }

    let request = AssemblyRequest {
        mode: args.mode,
        run_name: args.run_name.clone(),
        pe_libs,
        se_libs,
        long_reads,
        resources: ResourceLimits {
            threads: args.threads,
            memory_gb: args.memory_gb,
        },
        options: AssemblyOptions {
            careful: args.careful,
            gfa11: args.gfa11,
            k_list: args.k_list.clone(),
        },
    };

    let compiler = InvocationCompiler::new(RunnerConfig {
        scratch,
        spades_exe,
        spades_version,
    });
    let invocation = compiler.compile(&request)?;

    let result = runner::run(&invocation)?;
    result.ensure_success()?;

    let artifact = if args.scaffolds {
        FINAL_SCAFFOLDS
    } else {
        FINAL_CONTIGS
    };
    match find_file_dir(result.outdir(), artifact)? {
        Some(dir) => {
            if args.verbose {
                eprintln!("Found {} in {}", artifact, dir.display());
            }
            // the artifact path is the handoff to the persistence/report layer
            println!("{}", dir.join(artifact).display());
        }
        None => anyhow::bail!(
            "assembly finished but {} was not found under {}",
            artifact,
            result.outdir().display()
        ),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_pe_libs_orders_split_then_interleaved() {
        let libs = build_pe_libs(
            &["a_L.fq".to_string()],
            &["a_R.fq".to_string()],
            &["b.fq".to_string()],
        )
        .unwrap();
        assert_eq!(libs.len(), 2);
        assert!(matches!(libs[0], PairedEndLibrary::Split { .. }));
        assert!(matches!(libs[1], PairedEndLibrary::Interleaved(_)));
    }

    #[test]
    fn test_build_pe_libs_rejects_unbalanced_mates() {
        let result = build_pe_libs(&["a_L.fq".to_string(), "b_L.fq".to_string()], &["a_R.fq".to_string()], &[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_threads_rejects_zero() {
        assert!(parse_threads("0").is_err());
        assert_eq!(parse_threads("16").unwrap(), 16);
        assert!(parse_memory("0").is_err());
        assert_eq!(parse_memory("250").unwrap(), 250);
    }

    #[test]
    fn test_resolve_spades_version_prefers_flag() {
        assert_eq!(resolve_spades_version(Some("4.0.0")), "SPADES-4.0.0");
    }
}
