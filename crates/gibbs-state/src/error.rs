//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use crate::section::SectionId;

/// Errors that can occur while building or attaching a state arena.
///
/// Every variant is fatal to initialization: a failed build aborts
/// before the header is written, so no half-initialized handle exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateError {
    /// The backing block could not be allocated.
    AllocationFailed {
        /// Number of bytes requested.
        requested_bytes: usize,
    },
    /// A raw block is shorter than its own header claims it must be.
    BlockTooSmall {
        /// Words required by the recomputed layout.
        required_words: usize,
        /// Words actually present.
        actual_words: usize,
    },
    /// The block does not begin with the arena magic word.
    BadMagic {
        /// The word found where the magic was expected.
        found: u64,
    },
    /// The block was written by an unknown layout version.
    UnsupportedVersion {
        /// The version found in the header.
        found: u64,
    },
    /// The header's stored offset table disagrees with the layout
    /// recomputed from the header's own dimensions.
    TableMismatch {
        /// The first section whose span disagrees.
        section: SectionId,
    },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { requested_bytes } => {
                write!(f, "unable to allocate {requested_bytes} bytes for state arena")
            }
            Self::BlockTooSmall {
                required_words,
                actual_words,
            } => {
                write!(
                    f,
                    "raw block has {actual_words} words, layout requires {required_words}"
                )
            }
            Self::BadMagic { found } => {
                write!(f, "block does not start with the arena magic (found {found:#018x})")
            }
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported arena layout version {found}")
            }
            Self::TableMismatch { section } => {
                write!(f, "stored offset table disagrees at section {section:?}")
            }
        }
    }
}

impl Error for StateError {}
