//! Kernel error types.

use std::error::Error;
use std::fmt;

use gibbs_core::ConfigError;
use gibbs_state::SectionId;

/// Errors from likelihood and flux kernel evaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum KineticsError {
    /// A fatal configuration error surfaced during kernel evaluation
    /// (base reaction out of range, zero base likelihood).
    Config(ConfigError),
    /// An input vector's length does not match the arena's dimensions.
    LengthMismatch {
        /// Required length.
        expected: usize,
        /// Length supplied.
        actual: usize,
    },
    /// A reaction index is outside `[0, reactions)`.
    ReactionOutOfRange {
        /// The offending index.
        reaction: usize,
        /// Number of reactions.
        limit: usize,
    },
    /// A section the kernel needs is not materialized in this arena.
    MissingSection {
        /// The absent section.
        section: SectionId,
    },
    /// The regulated strategy was invoked without an activity vector.
    MissingRegulation,
}

impl fmt::Display for KineticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "configuration error: {err}"),
            Self::LengthMismatch { expected, actual } => {
                write!(f, "input vector has {actual} elements, arena expects {expected}")
            }
            Self::ReactionOutOfRange { reaction, limit } => {
                write!(f, "reaction {reaction} is not in [0, {limit})")
            }
            Self::MissingSection { section } => {
                write!(f, "arena section {section:?} is not materialized")
            }
            Self::MissingRegulation => {
                write!(f, "regulated flux strategy requires an activity vector")
            }
        }
    }
}

impl Error for KineticsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for KineticsError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}
