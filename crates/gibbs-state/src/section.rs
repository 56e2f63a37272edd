//! Named arena sections and regions.
//!
//! Every array the simulation touches lives in exactly one [`SectionId`]
//! slot. The planner assigns each section a word span inside one of the
//! four [`RegionId`] regions; all later access resolves the section by
//! table lookup, never by recomputation.

/// The four payload regions of the arena, in block order.
///
/// The header region (dimensions + offset tables) precedes all of these
/// and is not itself a section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionId {
    /// Mutated every simulation step.
    TwoWay,
    /// Written once at build time, read thereafter.
    Incoming,
    /// Verbose-only human-readable text tables.
    Auxiliary,
    /// Scratch arrays consumed during kernel evaluation. Aliases the
    /// auxiliary region's offset when verbosity is off.
    Workspace,
}

impl RegionId {
    /// All regions in block order.
    pub const ALL: [RegionId; 4] = [
        RegionId::TwoWay,
        RegionId::Incoming,
        RegionId::Auxiliary,
        RegionId::Workspace,
    ];
}

/// Every named section of the arena, in fixed planning order.
///
/// The discriminant order *is* the layout order within each region; the
/// planner walks [`SectionId::ALL`] exactly once when computing offsets
/// and the header serializes the table in the same order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionId {
    // Two-way region.
    /// Free-energy and entropy scalar accumulators (2 floats).
    Accumulators,
    /// Current concentrations, one float per molecule.
    CurrentConcentrations,
    /// Boundary-flux concentrations, one float per molecule.
    BoundaryFluxConcentrations,
    /// Primary RNG state blob.
    RngState,
    /// Secondary RNG state blob.
    RngStateAlt,

    // Incoming region.
    /// Standard free-energy changes, one float per reaction.
    StandardFreeEnergies,
    /// Equilibrium constants, one float per reaction.
    EquilibriumConstants,
    /// Regulation activities, one float per reaction.
    Activities,
    /// Reaction-major offset index, R+1 ints.
    ReactionOffsets,
    /// Reaction-major entry molecule indices.
    EntryMolecules,
    /// Reaction-major entry compartment indices.
    EntryCompartments,
    /// Reaction-major entry signed coefficients.
    EntryCoefficients,
    /// Reaction-major entry name-text offsets.
    EntryNames,
    /// Molecule-major offset index, M+1 ints.
    MoleculeOffsets,
    /// Molecule-major entry reaction indices.
    MoleculeReactions,
    /// Molecule-major entry signed coefficients.
    MoleculeCoefficients,
    /// Sorted molecule directory records, 4 words each.
    SortedMolecules,
    /// Sorted compartment directory records, 4 words each.
    SortedCompartments,
    /// Per-molecule concentration-to-count factors.
    ConcToCount,
    /// Per-molecule count-to-concentration factors.
    CountToConc,
    /// Interned molecule name text.
    NameText,

    // Auxiliary region (materialized only when verbose).
    /// Run file-name table, fixed stride per slot.
    FileNames,
    /// Reaction title text.
    ReactionTitles,
    /// Pathway description text.
    PathwayText,
    /// Compartment name text.
    CompartmentText,

    // Workspace region.
    /// Future concentrations, one float per molecule.
    FutureConcentrations,
    /// Per-reaction free-energy scratch.
    FreeEnergyScratch,
    /// Forward reaction likelihoods.
    ForwardLikelihoods,
    /// Reverse reaction likelihoods.
    ReverseLikelihoods,
    /// Forward log-likelihood ratios.
    ForwardLogRatios,
    /// Reverse log-likelihood ratios.
    ReverseLogRatios,
    /// Cumulative post-selection likelihoods, R+1 floats.
    PostselectionLikelihoods,
    /// No-op likelihood history (verbose only).
    NoOpLikelihoods,
    /// Forward likelihood view history, H×R floats (verbose only).
    ReactionViews,
    /// Reverse likelihood view history, H×R floats (verbose only).
    ReverseReactionViews,
    /// Reaction fire counters, R+1 ints (verbose only).
    ReactionFires,
}

impl SectionId {
    /// All sections in planning order.
    pub const ALL: [SectionId; 36] = [
        SectionId::Accumulators,
        SectionId::CurrentConcentrations,
        SectionId::BoundaryFluxConcentrations,
        SectionId::RngState,
        SectionId::RngStateAlt,
        SectionId::StandardFreeEnergies,
        SectionId::EquilibriumConstants,
        SectionId::Activities,
        SectionId::ReactionOffsets,
        SectionId::EntryMolecules,
        SectionId::EntryCompartments,
        SectionId::EntryCoefficients,
        SectionId::EntryNames,
        SectionId::MoleculeOffsets,
        SectionId::MoleculeReactions,
        SectionId::MoleculeCoefficients,
        SectionId::SortedMolecules,
        SectionId::SortedCompartments,
        SectionId::ConcToCount,
        SectionId::CountToConc,
        SectionId::NameText,
        SectionId::FileNames,
        SectionId::ReactionTitles,
        SectionId::PathwayText,
        SectionId::CompartmentText,
        SectionId::FutureConcentrations,
        SectionId::FreeEnergyScratch,
        SectionId::ForwardLikelihoods,
        SectionId::ReverseLikelihoods,
        SectionId::ForwardLogRatios,
        SectionId::ReverseLogRatios,
        SectionId::PostselectionLikelihoods,
        SectionId::NoOpLikelihoods,
        SectionId::ReactionViews,
        SectionId::ReverseReactionViews,
        SectionId::ReactionFires,
    ];

    /// The region this section belongs to.
    pub fn region(self) -> RegionId {
        use SectionId::*;
        match self {
            Accumulators | CurrentConcentrations | BoundaryFluxConcentrations | RngState
            | RngStateAlt => RegionId::TwoWay,
            StandardFreeEnergies | EquilibriumConstants | Activities | ReactionOffsets
            | EntryMolecules | EntryCompartments | EntryCoefficients | EntryNames
            | MoleculeOffsets | MoleculeReactions | MoleculeCoefficients | SortedMolecules
            | SortedCompartments | ConcToCount | CountToConc | NameText => RegionId::Incoming,
            FileNames | ReactionTitles | PathwayText | CompartmentText => RegionId::Auxiliary,
            FutureConcentrations | FreeEnergyScratch | ForwardLikelihoods
            | ReverseLikelihoods | ForwardLogRatios | ReverseLogRatios
            | PostselectionLikelihoods | NoOpLikelihoods | ReactionViews
            | ReverseReactionViews | ReactionFires => RegionId::Workspace,
        }
    }
}

/// A section's word span within the arena block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    /// Starting word offset from the beginning of the block.
    pub offset: usize,
    /// Length in words.
    pub len: usize,
}

impl Span {
    /// One-past-the-end word offset.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_every_section_once() {
        for (i, a) in SectionId::ALL.iter().enumerate() {
            for b in &SectionId::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn planning_order_groups_regions_contiguously() {
        // Sections of the same region must be adjacent in ALL, because
        // the planner walks ALL once while assigning region bounds.
        let regions: Vec<RegionId> = SectionId::ALL.iter().map(|s| s.region()).collect();
        let mut seen = Vec::new();
        for region in regions {
            if seen.last() != Some(&region) {
                assert!(!seen.contains(&region), "region {region:?} split in ALL");
                seen.push(region);
            }
        }
        assert_eq!(seen.len(), RegionId::ALL.len());
    }
}
