//! Dual sparse representations of the stoichiometric matrix.
//!
//! [`ReactionMatrix`] is the reaction-major form: a compressed-row
//! layout with one offset per reaction (length R+1) over parallel entry
//! arrays. [`MoleculeMatrix`] is its molecule-major transpose, built by
//! counting sort in O(N) with no comparison sort. The two forms always
//! hold the same entry multiset.
//!
//! Entry arrays are `i64` so they can be copied verbatim into the state
//! arena's word sections and read back from a raw block.

use std::ops::Range;

use crate::reaction::AssembledReaction;

/// Reaction-major sparse stoichiometric matrix (compressed-row form).
///
/// For reaction `r`, the half-open entry range is
/// `offsets[r] .. offsets[r + 1]`; within it, `molecules`,
/// `compartments`, `coefficients`, and `names` are parallel. Sign
/// encodes reactant (−) versus product (+); zero coefficients are never
/// stored.
#[derive(Clone, Debug, PartialEq)]
pub struct ReactionMatrix {
    offsets: Vec<i64>,
    molecules: Vec<i64>,
    compartments: Vec<i64>,
    coefficients: Vec<i64>,
    names: Vec<i64>,
}

impl ReactionMatrix {
    /// Build the reaction-major matrix in input order.
    ///
    /// Assembly has already coalesced duplicates; any zero coefficient
    /// that survives is skipped here so the invariant holds regardless.
    pub fn build(reactions: &[AssembledReaction]) -> Self {
        let entry_estimate: usize = reactions.iter().map(|r| r.entries.len()).sum();
        let mut matrix = Self {
            offsets: Vec::with_capacity(reactions.len() + 1),
            molecules: Vec::with_capacity(entry_estimate),
            compartments: Vec::with_capacity(entry_estimate),
            coefficients: Vec::with_capacity(entry_estimate),
            names: Vec::with_capacity(entry_estimate),
        };
        matrix.offsets.push(0);
        for reaction in reactions {
            for entry in &reaction.entries {
                if entry.coefficient == 0 {
                    continue;
                }
                matrix.molecules.push(i64::from(entry.molecule.0));
                matrix.compartments.push(i64::from(entry.compartment.0));
                matrix.coefficients.push(entry.coefficient);
                matrix.names.push(i64::from(entry.name));
            }
            matrix.offsets.push(matrix.molecules.len() as i64);
        }
        matrix
    }

    /// Number of reactions.
    pub fn reaction_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Total number of stored entries.
    pub fn entry_count(&self) -> usize {
        self.molecules.len()
    }

    /// Entry index range for one reaction.
    pub fn row(&self, reaction: usize) -> Range<usize> {
        let start = self.offsets[reaction] as usize;
        let end = self.offsets[reaction + 1] as usize;
        start..end
    }

    /// The R+1 per-reaction offset index.
    pub fn offsets(&self) -> &[i64] {
        &self.offsets
    }

    /// Molecule directory index per entry.
    pub fn molecules(&self) -> &[i64] {
        &self.molecules
    }

    /// Compartment directory index per entry.
    pub fn compartments(&self) -> &[i64] {
        &self.compartments
    }

    /// Signed stoichiometric coefficient per entry.
    pub fn coefficients(&self) -> &[i64] {
        &self.coefficients
    }

    /// Name-table byte offset per entry.
    pub fn names(&self) -> &[i64] {
        &self.names
    }

    /// Net coefficient sum for one reaction (products minus reactants),
    /// used by volume-corrected equilibrium scaling.
    pub fn coefficient_sum(&self, reaction: usize) -> i64 {
        self.row(reaction).map(|e| self.coefficients[e]).sum()
    }
}

/// Molecule-major transpose of the stoichiometric matrix.
///
/// For molecule `m`, `offsets[m] .. offsets[m + 1]` indexes parallel
/// `reactions` and `coefficients` arrays; entries within a molecule's
/// run are in ascending reaction order.
#[derive(Clone, Debug, PartialEq)]
pub struct MoleculeMatrix {
    offsets: Vec<i64>,
    reactions: Vec<i64>,
    coefficients: Vec<i64>,
}

impl MoleculeMatrix {
    /// Transpose the reaction-major matrix by counting sort.
    ///
    /// One pass counts per-molecule participations to build the offset
    /// index, a second pass scatters entries. Scanning reactions in
    /// ascending order keeps each molecule's run reaction-sorted.
    pub fn transpose(matrix: &ReactionMatrix, molecule_count: usize) -> Self {
        let entry_count = matrix.entry_count();
        let mut offsets = vec![0i64; molecule_count + 1];
        for &molecule in matrix.molecules() {
            offsets[molecule as usize + 1] += 1;
        }
        for m in 0..molecule_count {
            offsets[m + 1] += offsets[m];
        }

        let mut reactions = vec![0i64; entry_count];
        let mut coefficients = vec![0i64; entry_count];
        let mut cursor: Vec<i64> = offsets[..molecule_count].to_vec();
        for r in 0..matrix.reaction_count() {
            for e in matrix.row(r) {
                let molecule = matrix.molecules()[e] as usize;
                let slot = cursor[molecule] as usize;
                reactions[slot] = r as i64;
                coefficients[slot] = matrix.coefficients()[e];
                cursor[molecule] += 1;
            }
        }

        Self {
            offsets,
            reactions,
            coefficients,
        }
    }

    /// Number of molecules indexed.
    pub fn molecule_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Total number of stored entries.
    pub fn entry_count(&self) -> usize {
        self.reactions.len()
    }

    /// Entry index range for one molecule.
    pub fn row(&self, molecule: usize) -> Range<usize> {
        let start = self.offsets[molecule] as usize;
        let end = self.offsets[molecule + 1] as usize;
        start..end
    }

    /// The M+1 per-molecule offset index.
    pub fn offsets(&self) -> &[i64] {
        &self.offsets
    }

    /// Reaction index per entry.
    pub fn reactions(&self) -> &[i64] {
        &self.reactions
    }

    /// Signed stoichiometric coefficient per entry.
    pub fn coefficients(&self) -> &[i64] {
        &self.coefficients
    }
}
