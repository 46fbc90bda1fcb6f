//! Assembly Mode Policy
//!
//! SPAdes runs in one of four overall strategies. Each mode carries a fixed
//! policy record describing which library/flag combinations are legal:
//!
//! ```text
//! Mode      PE libraries   --careful   Long reads   Mode flag
//! standard  0..N           allowed     forbidden    (none)
//! isolate   0..N           allowed     forbidden    --isolate
//! meta      exactly 1      forbidden   optional     --meta
//! hybrid    0..N           allowed     required     (none)
//! ```
//!
//! The policy is a pure lookup; the invocation compiler queries it before any
//! flag is emitted, so a new mode cannot silently bypass a validation rule.

use std::fmt;
use std::str::FromStr;

/// The overall assembly strategy passed to SPAdes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyMode {
    Standard,
    Isolate,
    Meta,
    Hybrid,
}

/// Whether a mode accepts long-read libraries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongReadRule {
    Forbidden,
    Optional,
    Required,
}

/// Paired-end library cardinality accepted by a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairedEndRule {
    /// Any number of PE libraries, including none.
    Any,
    /// metaSPAdes works best with exactly one PE library.
    ExactlyOne,
}

/// Per-mode flag legality, queried by the invocation compiler.
#[derive(Debug, Clone, Copy)]
pub struct ModePolicy {
    /// Mode-selecting flag emitted into the command line, if any.
    pub mode_flag: Option<&'static str>,
    /// `--careful` is not allowed in metaSPAdes.
    pub careful_allowed: bool,
    pub long_reads: LongReadRule,
    pub paired_end: PairedEndRule,
}

impl AssemblyMode {
    /// Pure lookup of the mode's policy record.
    pub fn policy(self) -> ModePolicy {
        match self {
            AssemblyMode::Standard => ModePolicy {
                mode_flag: None,
                careful_allowed: true,
                long_reads: LongReadRule::Forbidden,
                paired_end: PairedEndRule::Any,
            },
            AssemblyMode::Isolate => ModePolicy {
                mode_flag: Some("--isolate"),
                careful_allowed: true,
                long_reads: LongReadRule::Forbidden,
                paired_end: PairedEndRule::Any,
            },
            AssemblyMode::Meta => ModePolicy {
                mode_flag: Some("--meta"),
                careful_allowed: false,
                long_reads: LongReadRule::Optional,
                paired_end: PairedEndRule::ExactlyOne,
            },
            AssemblyMode::Hybrid => ModePolicy {
                mode_flag: None,
                careful_allowed: true,
                long_reads: LongReadRule::Required,
                paired_end: PairedEndRule::Any,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AssemblyMode::Standard => "standard",
            AssemblyMode::Isolate => "isolate",
            AssemblyMode::Meta => "meta",
            AssemblyMode::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for AssemblyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AssemblyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(AssemblyMode::Standard),
            "isolate" => Ok(AssemblyMode::Isolate),
            "meta" => Ok(AssemblyMode::Meta),
            "hybrid" => Ok(AssemblyMode::Hybrid),
            _ => Err(format!(
                "Unknown assembly mode '{}'. Valid modes: standard, isolate, meta, hybrid",
                s
            )),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_policy_forbids_careful() {
        let policy = AssemblyMode::Meta.policy();
        assert!(!policy.careful_allowed);
        assert_eq!(policy.paired_end, PairedEndRule::ExactlyOne);
        assert_eq!(policy.long_reads, LongReadRule::Optional);
        assert_eq!(policy.mode_flag, Some("--meta"));
    }

    #[test]
    fn test_hybrid_policy_requires_long_reads() {
        let policy = AssemblyMode::Hybrid.policy();
        assert_eq!(policy.long_reads, LongReadRule::Required);
        assert!(policy.careful_allowed);
        assert_eq!(policy.mode_flag, None);
    }

    #[test]
    fn test_short_read_modes_forbid_long_reads() {
        assert_eq!(
            AssemblyMode::Standard.policy().long_reads,
            LongReadRule::Forbidden
        );
        assert_eq!(
            AssemblyMode::Isolate.policy().long_reads,
            LongReadRule::Forbidden
        );
        assert_eq!(AssemblyMode::Isolate.policy().mode_flag, Some("--isolate"));
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("meta".parse::<AssemblyMode>().unwrap(), AssemblyMode::Meta);
        assert_eq!(
            "hybrid".parse::<AssemblyMode>().unwrap(),
            AssemblyMode::Hybrid
        );
        assert!("metagenomic".parse::<AssemblyMode>().is_err());
    }
}
