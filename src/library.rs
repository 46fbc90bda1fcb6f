//! Sequencing Library Descriptors
//!
//! Typed, immutable descriptions of the read sets handed to SPAdes:
//! paired-end (interleaved or split left/right), single-end, and long-read
//! (PacBio / Nanopore) libraries.
//!
//! Raw caller records arrive with optional fields and are normalized here
//! into the typed descriptors. Normalization is the only place library shape
//! is checked; beyond this point a descriptor is always well-formed.
//!
//! # Example Usage
//! ```
//! use spaderun::library::{PairedEndLibrary, RawPairedEnd};
//!
//! let raw = RawPairedEnd {
//!     left: Some("R1.fq".into()),
//!     right: Some("R2.fq".into()),
//!     ..Default::default()
//! };
//! let lib = raw.normalize().unwrap();
//! assert!(matches!(lib, PairedEndLibrary::Split { .. }));
//! ```

use std::path::PathBuf;

use crate::error::SpadesError;

// ============================================================================
// Raw caller records
// ============================================================================

/// A paired-end library as supplied by the caller, before validation.
///
/// Exactly one of {`interleaved`, (`left` AND `right`)} must be present.
#[derive(Debug, Clone, Default)]
pub struct RawPairedEnd {
    /// Single file with both mates interleaved.
    pub interleaved: Option<String>,
    /// Forward-mate file of a split pair.
    pub left: Option<String>,
    /// Reverse-mate file of a split pair.
    pub right: Option<String>,
}

impl RawPairedEnd {
    /// Normalizes the raw record into a typed [`PairedEndLibrary`].
    ///
    /// # Errors
    /// Returns [`SpadesError::MalformedLibrary`] if:
    /// - both an interleaved file and a left/right file are declared
    /// - neither an interleaved file nor a complete left/right pair is declared
    /// - any declared file path is empty
    pub fn normalize(&self) -> Result<PairedEndLibrary, SpadesError> {
        match (&self.interleaved, &self.left, &self.right) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(SpadesError::MalformedLibrary(
                "paired-end library declares both an interleaved file and a left/right pair"
                    .to_string(),
            )),
            (Some(path), None, None) => {
                Ok(PairedEndLibrary::Interleaved(nonempty_path(path, "interleaved")?))
            }
            (None, Some(left), Some(right)) => Ok(PairedEndLibrary::Split {
                left: nonempty_path(left, "left")?,
                right: nonempty_path(right, "right")?,
            }),
            (None, Some(_), None) | (None, None, Some(_)) => Err(SpadesError::MalformedLibrary(
                "paired-end library declares only one mate of a left/right pair".to_string(),
            )),
            (None, None, None) => Err(SpadesError::MalformedLibrary(
                "paired-end library declares neither an interleaved file nor a left/right pair"
                    .to_string(),
            )),
        }
    }
}

fn nonempty_path(path: &str, field: &str) -> Result<PathBuf, SpadesError> {
    if path.is_empty() {
        return Err(SpadesError::MalformedLibrary(format!(
            "empty {field} file path"
        )));
    }
    Ok(PathBuf::from(path))
}

// ============================================================================
// Typed descriptors
// ============================================================================

/// A validated paired-end read library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairedEndLibrary {
    /// Both mates interleaved in one file.
    Interleaved(PathBuf),
    /// Separate forward/reverse mate files.
    Split { left: PathBuf, right: PathBuf },
}

/// A validated single-end read library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleEndLibrary {
    pub path: PathBuf,
}

impl SingleEndLibrary {
    pub fn new(path: &str) -> Result<Self, SpadesError> {
        Ok(Self {
            path: nonempty_path(path, "single-end")?,
        })
    }
}

/// Third-generation sequencing platform of a long-read library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongReadPlatform {
    PacBio,
    Nanopore,
}

impl LongReadPlatform {
    /// The SPAdes flag used to pass reads from this platform.
    pub fn flag(self) -> &'static str {
        match self {
            LongReadPlatform::PacBio => "--pacbio",
            LongReadPlatform::Nanopore => "--nanopore",
        }
    }
}

/// A validated long-read library, tagged with its platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongReadLibrary {
    pub platform: LongReadPlatform,
    pub path: PathBuf,
}

impl LongReadLibrary {
    pub fn new(platform: LongReadPlatform, path: &str) -> Result<Self, SpadesError> {
        Ok(Self {
            platform,
            path: nonempty_path(path, "long-read")?,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_split_pair() {
        let raw = RawPairedEnd {
            left: Some("L.fq".to_string()),
            right: Some("R.fq".to_string()),
            ..Default::default()
        };
        let lib = raw.normalize().unwrap();
        assert_eq!(
            lib,
            PairedEndLibrary::Split {
                left: PathBuf::from("L.fq"),
                right: PathBuf::from("R.fq"),
            }
        );
    }

    #[test]
    fn test_normalize_interleaved() {
        let raw = RawPairedEnd {
            interleaved: Some("both.fq".to_string()),
            ..Default::default()
        };
        let lib = raw.normalize().unwrap();
        assert_eq!(lib, PairedEndLibrary::Interleaved(PathBuf::from("both.fq")));
    }

    #[test]
    fn test_interleaved_and_pair_rejected() {
        let raw = RawPairedEnd {
            interleaved: Some("both.fq".to_string()),
            left: Some("L.fq".to_string()),
            right: Some("R.fq".to_string()),
        };
        assert!(matches!(
            raw.normalize(),
            Err(SpadesError::MalformedLibrary(_))
        ));
    }

    #[test]
    fn test_incomplete_pair_rejected() {
        let raw = RawPairedEnd {
            left: Some("L.fq".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            raw.normalize(),
            Err(SpadesError::MalformedLibrary(_))
        ));
    }

    #[test]
    fn test_empty_record_rejected() {
        let raw = RawPairedEnd::default();
        assert!(matches!(
            raw.normalize(),
            Err(SpadesError::MalformedLibrary(_))
        ));
    }

    #[test]
    fn test_empty_path_rejected() {
        let raw = RawPairedEnd {
            left: Some(String::new()),
            right: Some("R.fq".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            raw.normalize(),
            Err(SpadesError::MalformedLibrary(_))
        ));

        assert!(SingleEndLibrary::new("").is_err());
        assert!(LongReadLibrary::new(LongReadPlatform::PacBio, "").is_err());
    }

    #[test]
    fn test_platform_flags() {
        assert_eq!(LongReadPlatform::PacBio.flag(), "--pacbio");
        assert_eq!(LongReadPlatform::Nanopore.flag(), "--nanopore");
    }
}
