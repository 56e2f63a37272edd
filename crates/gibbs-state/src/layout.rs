//! Deterministic arena layout planning.
//!
//! [`LayoutPlan::compute`] maps problem dimensions to the word span of
//! every section, in one fixed pass over [`SectionId::ALL`]. The same
//! dimensions always produce the same plan, which is what makes a raw
//! block reinterpretable: the header stores the dimensions, and any
//! reader recomputes the identical table.
//!
//! All offsets and lengths are in 8-byte words. Sections are padded to
//! the 16-byte alignment granularity (2 words): odd-length vectors get
//! one padding element.

use indexmap::IndexMap;

use crate::rng::RNG_STATE_WORDS;
use crate::section::{RegionId, SectionId, Span};

/// Bytes per arena word.
pub const WORD_BYTES: usize = 8;

/// Alignment granularity in words (16 bytes).
pub const ALIGN_WORDS: usize = 2;

/// Words per sorted-molecule directory record.
pub const MOLECULE_RECORD_WORDS: usize = 4;

/// Words per sorted-compartment directory record.
pub const COMPARTMENT_RECORD_WORDS: usize = 4;

/// Number of file-name slots in the auxiliary region.
pub const FILE_SLOTS: usize = 13;

/// Words in the scalar accumulator section (free energy + entropy).
pub const ACCUMULATOR_WORDS: usize = 2;

/// First word of every arena block.
pub const HEADER_MAGIC: u64 = u64::from_le_bytes(*b"gibbsst\0");

/// Current layout version, second word of every block.
pub const LAYOUT_VERSION: u64 = 1;

/// Words used to serialize [`Dimensions`] in the header.
pub const DIMS_WORDS: usize = 11;

const REGION_TABLE_WORDS: usize = RegionId::ALL.len() * 2;
const SECTION_TABLE_WORDS: usize = SectionId::ALL.len() * 2;

/// Header length in words: magic, version, dimensions, region table,
/// section table, padded to alignment.
pub const HEADER_WORDS: usize =
    pad_words(2 + DIMS_WORDS + REGION_TABLE_WORDS + SECTION_TABLE_WORDS);

/// Pad a word count to the alignment granularity.
const fn pad_words(len: usize) -> usize {
    len + (len & (ALIGN_WORDS - 1))
}

/// Words needed to hold `bytes` bytes, padded to alignment.
const fn words_for_bytes(bytes: usize) -> usize {
    pad_words(bytes.div_ceil(WORD_BYTES))
}

/// Problem dimensions from which the whole layout follows.
///
/// Two arenas built from equal dimensions have byte-identical layouts;
/// this is the §6 checkpoint contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Number of reactions (R).
    pub reactions: usize,
    /// Number of unique molecules (M).
    pub molecules: usize,
    /// Number of stored matrix entries (N).
    pub entries: usize,
    /// Number of unique compartments (C).
    pub compartments: usize,
    /// Molecule name blob length in bytes.
    pub name_bytes: usize,
    /// Reaction title blob length in bytes.
    pub title_bytes: usize,
    /// Pathway text blob length in bytes.
    pub pathway_bytes: usize,
    /// Compartment name blob length in bytes.
    pub compartment_text_bytes: usize,
    /// Fixed stride of one file-name slot in bytes.
    pub max_filename_bytes: usize,
    /// Length of the likelihood view history (H).
    pub view_history: usize,
    /// Whether the auxiliary text region is materialized.
    pub verbose: bool,
}

impl Dimensions {
    /// Serialize into the header's dimension words.
    pub fn to_words(&self) -> [u64; DIMS_WORDS] {
        [
            self.reactions as u64,
            self.molecules as u64,
            self.entries as u64,
            self.compartments as u64,
            self.name_bytes as u64,
            self.title_bytes as u64,
            self.pathway_bytes as u64,
            self.compartment_text_bytes as u64,
            self.max_filename_bytes as u64,
            self.view_history as u64,
            u64::from(self.verbose),
        ]
    }

    /// Deserialize from the header's dimension words.
    pub fn from_words(words: &[u64; DIMS_WORDS]) -> Self {
        Self {
            reactions: words[0] as usize,
            molecules: words[1] as usize,
            entries: words[2] as usize,
            compartments: words[3] as usize,
            name_bytes: words[4] as usize,
            title_bytes: words[5] as usize,
            pathway_bytes: words[6] as usize,
            compartment_text_bytes: words[7] as usize,
            max_filename_bytes: words[8] as usize,
            view_history: words[9] as usize,
            verbose: words[10] != 0,
        }
    }
}

/// The computed layout: one span per materialized section, one span per
/// region, and the block total.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutPlan {
    dims: Dimensions,
    regions: [Span; 4],
    sections: IndexMap<SectionId, Span>,
    total_words: usize,
}

impl LayoutPlan {
    /// Compute the layout for the given dimensions.
    ///
    /// Sections are placed in [`SectionId::ALL`] order. With verbosity
    /// off, the auxiliary sections are not materialized and the
    /// workspace region starts at the auxiliary region's offset — the
    /// deliberate alias that reuses echo-text memory as scratch space.
    pub fn compute(dims: &Dimensions) -> Self {
        let r = dims.reactions;
        let m = dims.molecules;
        let n = dims.entries;
        let c = dims.compartments;
        let h = dims.view_history;

        let mut sections = IndexMap::with_capacity(SectionId::ALL.len());
        let mut cursor = HEADER_WORDS;
        let place = |sections: &mut IndexMap<SectionId, Span>,
                         cursor: &mut usize,
                         id: SectionId,
                         len: usize| {
            sections.insert(
                id,
                Span {
                    offset: *cursor,
                    len,
                },
            );
            *cursor += len;
        };

        // Two-way region.
        let two_way_offset = cursor;
        place(&mut sections, &mut cursor, SectionId::Accumulators, ACCUMULATOR_WORDS);
        place(&mut sections, &mut cursor, SectionId::CurrentConcentrations, pad_words(m));
        place(&mut sections, &mut cursor, SectionId::BoundaryFluxConcentrations, pad_words(m));
        place(&mut sections, &mut cursor, SectionId::RngState, RNG_STATE_WORDS);
        place(&mut sections, &mut cursor, SectionId::RngStateAlt, RNG_STATE_WORDS);
        let two_way = Span {
            offset: two_way_offset,
            len: cursor - two_way_offset,
        };

        // Incoming region.
        let incoming_offset = cursor;
        place(&mut sections, &mut cursor, SectionId::StandardFreeEnergies, pad_words(r));
        place(&mut sections, &mut cursor, SectionId::EquilibriumConstants, pad_words(r));
        place(&mut sections, &mut cursor, SectionId::Activities, pad_words(r));
        place(&mut sections, &mut cursor, SectionId::ReactionOffsets, pad_words(r + 1));
        place(&mut sections, &mut cursor, SectionId::EntryMolecules, pad_words(n));
        place(&mut sections, &mut cursor, SectionId::EntryCompartments, pad_words(n));
        place(&mut sections, &mut cursor, SectionId::EntryCoefficients, pad_words(n));
        place(&mut sections, &mut cursor, SectionId::EntryNames, pad_words(n));
        place(&mut sections, &mut cursor, SectionId::MoleculeOffsets, pad_words(m + 1));
        place(&mut sections, &mut cursor, SectionId::MoleculeReactions, pad_words(n));
        place(&mut sections, &mut cursor, SectionId::MoleculeCoefficients, pad_words(n));
        place(&mut sections, &mut cursor, SectionId::SortedMolecules, m * MOLECULE_RECORD_WORDS);
        place(&mut sections, &mut cursor, SectionId::SortedCompartments, c * COMPARTMENT_RECORD_WORDS);
        place(&mut sections, &mut cursor, SectionId::ConcToCount, pad_words(m));
        place(&mut sections, &mut cursor, SectionId::CountToConc, pad_words(m));
        place(&mut sections, &mut cursor, SectionId::NameText, words_for_bytes(dims.name_bytes));
        let incoming = Span {
            offset: incoming_offset,
            len: cursor - incoming_offset,
        };

        // Auxiliary region. Its length is computed even when the
        // sections are not materialized, so the region table always
        // records how much echo text a verbose build would need.
        let auxiliary_offset = cursor;
        let file_names_len = words_for_bytes(FILE_SLOTS * dims.max_filename_bytes);
        let titles_len = words_for_bytes(dims.title_bytes);
        let pathway_len = words_for_bytes(dims.pathway_bytes);
        let cmpt_text_len = words_for_bytes(dims.compartment_text_bytes);
        let auxiliary_len = file_names_len + titles_len + pathway_len + cmpt_text_len;
        if dims.verbose {
            place(&mut sections, &mut cursor, SectionId::FileNames, file_names_len);
            place(&mut sections, &mut cursor, SectionId::ReactionTitles, titles_len);
            place(&mut sections, &mut cursor, SectionId::PathwayText, pathway_len);
            place(&mut sections, &mut cursor, SectionId::CompartmentText, cmpt_text_len);
        }
        let auxiliary = Span {
            offset: auxiliary_offset,
            len: auxiliary_len,
        };

        // Workspace region: after the auxiliary text when verbose,
        // aliased onto it otherwise.
        let workspace_offset = cursor;
        place(&mut sections, &mut cursor, SectionId::FutureConcentrations, pad_words(m));
        place(&mut sections, &mut cursor, SectionId::FreeEnergyScratch, pad_words(r));
        place(&mut sections, &mut cursor, SectionId::ForwardLikelihoods, pad_words(r));
        place(&mut sections, &mut cursor, SectionId::ReverseLikelihoods, pad_words(r));
        place(&mut sections, &mut cursor, SectionId::ForwardLogRatios, pad_words(r));
        place(&mut sections, &mut cursor, SectionId::ReverseLogRatios, pad_words(r));
        place(&mut sections, &mut cursor, SectionId::PostselectionLikelihoods, pad_words(r + 1));
        if dims.verbose {
            place(&mut sections, &mut cursor, SectionId::NoOpLikelihoods, pad_words(h));
            place(&mut sections, &mut cursor, SectionId::ReactionViews, pad_words(h * r));
            place(&mut sections, &mut cursor, SectionId::ReverseReactionViews, pad_words(h * r));
            place(&mut sections, &mut cursor, SectionId::ReactionFires, pad_words(r + 1));
        }
        let workspace = Span {
            offset: workspace_offset,
            len: cursor - workspace_offset,
        };

        let total_words = cursor.max(auxiliary.end());

        Self {
            dims: dims.clone(),
            regions: [two_way, incoming, auxiliary, workspace],
            sections,
            total_words,
        }
    }

    /// The dimensions this plan was computed from.
    pub fn dims(&self) -> &Dimensions {
        &self.dims
    }

    /// Look up a section's span. `None` for sections not materialized
    /// under the plan's verbosity.
    pub fn section(&self, id: SectionId) -> Option<Span> {
        self.sections.get(&id).copied()
    }

    /// A region's span. The auxiliary region length is the size the
    /// echo text would need even when it is not materialized.
    pub fn region(&self, id: RegionId) -> Span {
        self.regions[id as usize]
    }

    /// Iterate over materialized sections in planning order.
    pub fn sections(&self) -> impl Iterator<Item = (SectionId, Span)> + '_ {
        self.sections.iter().map(|(&id, &span)| (id, span))
    }

    /// Total block length in words.
    pub fn total_words(&self) -> usize {
        self.total_words
    }

    /// Total block length in bytes.
    pub fn total_bytes(&self) -> usize {
        self.total_words * WORD_BYTES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn dims(verbose: bool) -> Dimensions {
        Dimensions {
            reactions: 10,
            molecules: 5,
            entries: 20,
            compartments: 2,
            name_bytes: 61,
            title_bytes: 100,
            pathway_bytes: 0,
            compartment_text_bytes: 17,
            max_filename_bytes: 128,
            view_history: 4,
            verbose,
        }
    }

    #[test]
    fn header_words_are_aligned() {
        assert_eq!(HEADER_WORDS % ALIGN_WORDS, 0);
    }

    #[test]
    fn verbose_plan_is_at_least_as_large() {
        let quiet = LayoutPlan::compute(&dims(false));
        let verbose = LayoutPlan::compute(&dims(true));
        assert!(verbose.total_words() >= quiet.total_words());
    }

    #[test]
    fn quiet_workspace_aliases_auxiliary() {
        let plan = LayoutPlan::compute(&dims(false));
        assert_eq!(
            plan.region(RegionId::Workspace).offset,
            plan.region(RegionId::Auxiliary).offset
        );
        assert!(plan.section(SectionId::FileNames).is_none());
        assert!(plan.section(SectionId::ReactionViews).is_none());
    }

    #[test]
    fn verbose_workspace_follows_auxiliary() {
        let plan = LayoutPlan::compute(&dims(true));
        assert_eq!(
            plan.region(RegionId::Workspace).offset,
            plan.region(RegionId::Auxiliary).end()
        );
        assert!(plan.section(SectionId::FileNames).is_some());
    }

    #[test]
    fn odd_vectors_get_padding_elements() {
        let plan = LayoutPlan::compute(&dims(false));
        // 5 molecules pad to 6 words.
        assert_eq!(plan.section(SectionId::CurrentConcentrations).unwrap().len, 6);
        // R+1 = 11 pads to 12.
        assert_eq!(plan.section(SectionId::ReactionOffsets).unwrap().len, 12);
    }

    #[test]
    fn total_is_last_section_end() {
        let plan = LayoutPlan::compute(&dims(true));
        let last_end = plan.sections().map(|(_, s)| s.end()).max().unwrap();
        assert_eq!(plan.total_words(), last_end);
    }

    #[test]
    fn dimensions_round_trip_through_words() {
        let d = dims(true);
        assert_eq!(Dimensions::from_words(&d.to_words()), d);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_dims() -> impl Strategy<Value = Dimensions> {
            (
                1usize..64,
                1usize..64,
                1usize..256,
                1usize..8,
                1usize..512,
                0usize..512,
                0usize..64,
                0usize..64,
                prop::bool::ANY,
                0usize..16,
            )
                .prop_map(
                    |(r, m, n, c, names, titles, pathway, cmpt, verbose, history)| Dimensions {
                        reactions: r,
                        molecules: m,
                        entries: n,
                        compartments: c,
                        name_bytes: names,
                        title_bytes: titles,
                        pathway_bytes: pathway,
                        compartment_text_bytes: cmpt,
                        max_filename_bytes: 128,
                        view_history: history,
                        verbose,
                    },
                )
        }

        proptest! {
            #[test]
            fn sections_are_aligned_and_non_overlapping(d in arb_dims()) {
                let plan = LayoutPlan::compute(&d);
                let mut previous_end = HEADER_WORDS;
                for (id, span) in plan.sections() {
                    prop_assert_eq!(
                        span.offset % ALIGN_WORDS, 0,
                        "section {:?} misaligned", id
                    );
                    prop_assert!(
                        span.offset >= previous_end,
                        "section {:?} overlaps its predecessor", id
                    );
                    previous_end = span.end();
                }
                prop_assert_eq!(plan.total_words() % ALIGN_WORDS, 0);
            }

            #[test]
            fn offsets_strictly_increase_for_nonempty_sections(d in arb_dims()) {
                let plan = LayoutPlan::compute(&d);
                let offsets: Vec<usize> = plan
                    .sections()
                    .filter(|(_, s)| s.len > 0)
                    .map(|(_, s)| s.offset)
                    .collect();
                prop_assert!(offsets.windows(2).all(|w| w[0] < w[1]));
            }

            #[test]
            fn total_covers_both_region_ends(d in arb_dims()) {
                let plan = LayoutPlan::compute(&d);
                let aux = plan.region(RegionId::Auxiliary);
                let ws = plan.region(RegionId::Workspace);
                prop_assert_eq!(plan.total_words(), ws.end().max(aux.end()));
            }

            #[test]
            fn verbosity_only_grows_the_block(d in arb_dims()) {
                let quiet = LayoutPlan::compute(&Dimensions { verbose: false, ..d.clone() });
                let verbose = LayoutPlan::compute(&Dimensions { verbose: true, ..d });
                prop_assert!(verbose.total_words() >= quiet.total_words());
            }

            #[test]
            fn same_dims_same_plan(d in arb_dims()) {
                prop_assert_eq!(LayoutPlan::compute(&d), LayoutPlan::compute(&d));
            }
        }
    }
}
