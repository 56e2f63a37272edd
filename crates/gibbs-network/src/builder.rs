//! Network assembly: parser output to lookup structures.
//!
//! [`Network::assemble`] runs the whole initialization pipeline the
//! simulation needs before an arena can be planned: intern names, build
//! the sorted directories, resolve every reaction's indices, coalesce
//! canceling coefficients, and construct both sparse matrices.

use gibbs_core::CompartmentId;
use smallvec::SmallVec;

use crate::matrix::{MoleculeMatrix, ReactionMatrix};
use crate::reaction::{AssembledReaction, ParsedReaction, ReactionEntry};
use crate::species::{
    CompartmentDirectory, CompartmentRecord, MoleculeDirectory, MoleculeRecord,
};
use crate::text::NameTable;

/// A compartment declaration supplied by the upstream parser.
///
/// Compartments referenced by reactions but never declared receive the
/// default volume.
#[derive(Clone, Debug, PartialEq)]
pub struct CompartmentDecl {
    /// Compartment name; empty declares the global compartment.
    pub name: String,
    /// Volume in liters.
    pub volume: f64,
}

impl CompartmentDecl {
    /// Convenience constructor.
    pub fn new(name: &str, volume: f64) -> Self {
        Self {
            name: name.to_string(),
            volume,
        }
    }
}

/// Everything the arena planner and the kernels need to know about the
/// reaction network, in final sorted-and-indexed form.
#[derive(Clone, Debug)]
pub struct Network {
    /// Sorted molecule directory.
    pub molecules: MoleculeDirectory,
    /// Sorted compartment directory.
    pub compartments: CompartmentDirectory,
    /// Reaction-major sparse matrix.
    pub reaction_major: ReactionMatrix,
    /// Molecule-major sparse matrix.
    pub molecule_major: MoleculeMatrix,
    /// Reaction title text, kept for echo output.
    pub titles: NameTable,
    /// Per-reaction byte offset into `titles`.
    pub title_offsets: Vec<u32>,
}

impl Network {
    /// Assemble a network from parsed reactions and compartment
    /// declarations.
    ///
    /// Declared compartments take priority over inferred ones, so a
    /// declaration's volume always wins. Species appearing on both
    /// sides of a reaction are coalesced by summing coefficients;
    /// entries that cancel to zero are dropped.
    pub fn assemble(
        reactions: &[ParsedReaction],
        compartments: &[CompartmentDecl],
        default_volume: f64,
    ) -> Self {
        // Compartment directory: declarations first (their volumes win
        // the dedup), then the implicit global compartment, then
        // anything only mentioned by a reaction.
        let mut cmpt_text = NameTable::new();
        let mut cmpt_records = Vec::with_capacity(compartments.len() + 1);
        for decl in compartments {
            let name = cmpt_text.intern(&decl.name);
            cmpt_records.push(CompartmentRecord::new(name, decl.volume));
        }
        cmpt_records.push(CompartmentRecord::new(0, default_volume));
        for reaction in reactions {
            for species in &reaction.species {
                let name = cmpt_text.intern(&species.compartment);
                cmpt_records.push(CompartmentRecord::new(name, default_volume));
            }
        }
        let compartment_dir = CompartmentDirectory::from_unsorted(cmpt_records, cmpt_text);

        // Molecule directory over one shared name table.
        let mut text = NameTable::new();
        let mut mol_records = Vec::new();
        for reaction in reactions {
            for species in &reaction.species {
                let name = text.intern(&species.molecule);
                let compartment = compartment_dir
                    .lookup(&species.compartment)
                    .unwrap_or(CompartmentId(0));
                mol_records.push(MoleculeRecord::new(name, compartment));
            }
        }
        let molecule_dir = MoleculeDirectory::from_unsorted(mol_records, text);

        // Resolve each reaction against the directories, coalescing
        // duplicate species within the reaction.
        let mut titles = NameTable::new();
        let mut title_offsets = Vec::with_capacity(reactions.len());
        let mut assembled = Vec::with_capacity(reactions.len());
        for reaction in reactions {
            let title = titles.intern(&reaction.title);
            title_offsets.push(title);

            let mut entries: SmallVec<[ReactionEntry; 8]> = SmallVec::new();
            for species in &reaction.species {
                let compartment = compartment_dir
                    .lookup(&species.compartment)
                    .unwrap_or(CompartmentId(0));
                let molecule = molecule_dir
                    .lookup(&species.molecule, compartment)
                    .expect("species was interned during directory construction");
                match entries.iter_mut().find(|e| e.molecule == molecule) {
                    Some(existing) => existing.coefficient += species.coefficient,
                    None => entries.push(ReactionEntry {
                        molecule,
                        compartment,
                        coefficient: species.coefficient,
                        name: molecule_dir
                            .get(molecule)
                            .map(|r| r.name)
                            .unwrap_or_default(),
                    }),
                }
            }
            entries.retain(|e| e.coefficient != 0);
            assembled.push(AssembledReaction { title, entries });
        }

        let reaction_major = ReactionMatrix::build(&assembled);
        let molecule_major = MoleculeMatrix::transpose(&reaction_major, molecule_dir.len());

        Self {
            molecules: molecule_dir,
            compartments: compartment_dir,
            reaction_major,
            molecule_major,
            titles,
            title_offsets,
        }
    }

    /// Number of reactions.
    pub fn reaction_count(&self) -> usize {
        self.reaction_major.reaction_count()
    }

    /// Number of unique molecules.
    pub fn molecule_count(&self) -> usize {
        self.molecules.len()
    }

    /// Number of unique compartments (including the global one).
    pub fn compartment_count(&self) -> usize {
        self.compartments.len()
    }

    /// Number of stored matrix entries.
    pub fn entry_count(&self) -> usize {
        self.reaction_major.entry_count()
    }
}
