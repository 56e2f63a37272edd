//! Reaction input types.
//!
//! [`ParsedReaction`] is the contract with the upstream reaction-file
//! parser: an ordered list of reactions, each an ordered list of
//! `(molecule, compartment, signed coefficient)` triples with reactants
//! negative and products positive. [`AssembledReaction`] is the same
//! reaction after directory indices are resolved and duplicate species
//! coalesced.

use gibbs_core::{CompartmentId, MoleculeId};
use smallvec::SmallVec;

/// One species participation as written in the reaction file.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedSpecies {
    /// Molecule name as written.
    pub molecule: String,
    /// Compartment name; empty for the global compartment.
    pub compartment: String,
    /// Signed stoichiometric coefficient: reactants negative, products
    /// positive. Never zero in well-formed input.
    pub coefficient: i64,
}

impl ParsedSpecies {
    /// Convenience constructor.
    pub fn new(molecule: &str, compartment: &str, coefficient: i64) -> Self {
        Self {
            molecule: molecule.to_string(),
            compartment: compartment.to_string(),
            coefficient,
        }
    }
}

/// One reaction as produced by the upstream parser, in file order.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedReaction {
    /// Reaction title line, kept for echo output.
    pub title: String,
    /// Participating species in written order.
    pub species: Vec<ParsedSpecies>,
}

impl ParsedReaction {
    /// A reaction with the given title and no species yet.
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            species: Vec::new(),
        }
    }

    /// Append a species participation, builder style.
    pub fn with(mut self, molecule: &str, compartment: &str, coefficient: i64) -> Self {
        self.species
            .push(ParsedSpecies::new(molecule, compartment, coefficient));
        self
    }
}

/// One matrix entry after index resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReactionEntry {
    /// Directory index of the molecule.
    pub molecule: MoleculeId,
    /// Directory index of the molecule's compartment.
    pub compartment: CompartmentId,
    /// Signed stoichiometric coefficient. Never zero: entries that
    /// cancel are dropped during assembly.
    pub coefficient: i64,
    /// Byte offset of the molecule's name in the network name table.
    pub name: u32,
}

/// A reaction with directory indices resolved and duplicates coalesced.
///
/// Reactions rarely touch more than a handful of species, so entries
/// stay inline up to eight participants.
#[derive(Clone, Debug, PartialEq)]
pub struct AssembledReaction {
    /// Byte offset of the title in the network's title table.
    pub title: u32,
    /// Entries in written order, zero coefficients removed.
    pub entries: SmallVec<[ReactionEntry; 8]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_preserves_order() {
        let rxn = ParsedReaction::new("A + B => C")
            .with("A", "", -1)
            .with("B", "", -1)
            .with("C", "", 1);
        assert_eq!(rxn.species.len(), 3);
        assert_eq!(rxn.species[0].molecule, "A");
        assert_eq!(rxn.species[2].coefficient, 1);
    }
}
