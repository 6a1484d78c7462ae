//! Error types for problem-set tracking.
//!
//! Every fallible operation in `texty-core` returns [`TextyError`]. The
//! variants are coarse on purpose so the CLI can decide per variant whether a
//! failure aborts the invocation or is reported and skipped.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TextyError>;

/// Errors that can occur while loading, mutating or saving problem sets.
#[derive(Debug, Error)]
pub enum TextyError {
    /// No problem set exists for the given chapter and section.
    #[error("no problem set for chapter {chapter} section {section}")]
    SectionNotFound { chapter: u32, section: u32 },

    /// The backing file does not exist.
    #[error("storage not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// A header, record or blob could not be decoded.
    #[error("format error: {0}")]
    Format(String),

    /// A problem index is outside the problem set.
    #[error("problem {problem} is out of range for a set of {problem_count} problems")]
    Range { problem: u32, problem_count: u32 },

    /// A right or wrong tally is already at its maximum.
    #[error("the {tally} tally of chapter {chapter} section {section} is full")]
    TallyOverflow {
        chapter: u32,
        section: u32,
        tally: &'static str,
    },

    /// A random draw has nothing eligible to choose from.
    #[error("nothing to choose from: {0}")]
    Domain(String),

    /// Reading or writing storage failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TextyError {
    /// Returns `true` for lookups that found nothing (unknown section or file).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TextyError::SectionNotFound { .. } | TextyError::SourceNotFound(_)
        )
    }

    /// Returns `true` if the caller can report this error and keep going with
    /// the rest of a batch.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TextyError::SectionNotFound { .. }
                | TextyError::Range { .. }
                | TextyError::TallyOverflow { .. }
                | TextyError::Domain(_)
        )
    }

    pub(crate) fn format(msg: impl Into<String>) -> Self {
        TextyError::Format(msg.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TextyError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        let missing = TextyError::SectionNotFound {
            chapter: 2,
            section: 1,
        };
        assert!(missing.is_not_found());
        assert!(missing.is_recoverable());

        let range = TextyError::Range {
            problem: 40,
            problem_count: 39,
        };
        assert!(!range.is_not_found());
        assert!(range.is_recoverable());

        let full = TextyError::TallyOverflow {
            chapter: 1,
            section: 1,
            tally: "right",
        };
        assert!(full.is_recoverable());
        assert_eq!(full.to_string(), "the right tally of chapter 1 section 1 is full");

        assert!(!TextyError::format("bad header").is_recoverable());
        assert!(TextyError::SourceNotFound(PathBuf::from("book.txt")).is_not_found());
    }

    #[test]
    fn messages() {
        let err = TextyError::Range {
            problem: 40,
            problem_count: 39,
        };
        assert_eq!(
            err.to_string(),
            "problem 40 is out of range for a set of 39 problems"
        );
        let err = TextyError::SourceNotFound(PathBuf::from("algebra.txy"));
        assert_eq!(err.to_string(), "storage not found: algebra.txy");
    }
}
