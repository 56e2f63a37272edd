//! Strongly-typed indices into the network's sorted tables.

use std::fmt;

/// Identifies a unique molecule by its position in the sorted directory.
///
/// Assigned after the directory is sorted and deduplicated, so the
/// ordering is `(compartment, case-normalized name)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MoleculeId(pub u32);

impl fmt::Display for MoleculeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for MoleculeId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a unique compartment by its position in the sorted
/// compartment directory. Index 0 is always the implicit global
/// compartment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompartmentId(pub u32);

impl fmt::Display for CompartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CompartmentId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
