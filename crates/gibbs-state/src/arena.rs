//! The contiguous state arena.
//!
//! One zero-initialized `Vec<u64>` block holds every array the
//! simulation touches. [`StateArena::build`] is the fresh-allocation
//! path: it computes the layout, fallibly allocates, copies the boot
//! payloads, and writes the header last — a failed build never leaves a
//! half-initialized handle. [`StateArena::attach`] is the fixup-only
//! path for an existing raw block (a checkpoint or a duplicated
//! replica): it recomputes the layout from the header's own dimensions
//! and verifies the stored table, copying nothing.

use std::cmp::Ordering;

use gibbs_core::{CompartmentId, MoleculeId};
use gibbs_network::species::lookup_by;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::boot::BootState;
use crate::error::StateError;
use crate::layout::{
    Dimensions, LayoutPlan, COMPARTMENT_RECORD_WORDS, DIMS_WORDS, FILE_SLOTS, HEADER_MAGIC,
    HEADER_WORDS, LAYOUT_VERSION, MOLECULE_RECORD_WORDS,
};
use crate::rng::{decode_rng, encode_rng, RNG_STATE_WORDS};
use crate::section::{RegionId, SectionId, Span};
use crate::view::{pack_bytes, FloatView, FloatViewMut, IntView, IntViewMut, TextView};

const DIMS_AT: usize = 2;
const REGION_TABLE_AT: usize = DIMS_AT + DIMS_WORDS;
const SECTION_TABLE_AT: usize = REGION_TABLE_AT + RegionId::ALL.len() * 2;

/// Which of the two arena RNG blobs to address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RngSlot {
    /// The stepper's primary generator.
    Primary,
    /// The secondary generator (acceptance draws).
    Secondary,
}

impl RngSlot {
    fn section(self) -> SectionId {
        match self {
            Self::Primary => SectionId::RngState,
            Self::Secondary => SectionId::RngStateAlt,
        }
    }
}

/// The arena: one owned block plus its layout plan.
#[derive(Clone, Debug, PartialEq)]
pub struct StateArena {
    words: Vec<u64>,
    plan: LayoutPlan,
}

impl StateArena {
    /// Build a fresh arena from a boot record.
    ///
    /// Allocation failure is reported before anything is written; the
    /// header goes in only after every payload copy has succeeded.
    pub fn build(boot: &BootState) -> Result<Self, StateError> {
        let dims = boot.dimensions();
        let plan = LayoutPlan::compute(&dims);
        let mut words: Vec<u64> = Vec::new();
        words
            .try_reserve_exact(plan.total_words())
            .map_err(|_| StateError::AllocationFailed {
                requested_bytes: plan.total_bytes(),
            })?;
        words.resize(plan.total_words(), 0);

        let mut arena = Self { words, plan };
        arena.copy_boot(boot);
        arena.write_header();
        Ok(arena)
    }

    /// Attach to an existing raw block without copying.
    ///
    /// The layout is recomputed from the dimensions the header itself
    /// records; the stored section table must match exactly, or the
    /// block is rejected as corrupt or version-skewed.
    pub fn attach(words: Vec<u64>) -> Result<Self, StateError> {
        if words.len() < HEADER_WORDS {
            return Err(StateError::BlockTooSmall {
                required_words: HEADER_WORDS,
                actual_words: words.len(),
            });
        }
        if words[0] != HEADER_MAGIC {
            return Err(StateError::BadMagic { found: words[0] });
        }
        if words[1] != LAYOUT_VERSION {
            return Err(StateError::UnsupportedVersion { found: words[1] });
        }

        let mut dim_words = [0u64; DIMS_WORDS];
        dim_words.copy_from_slice(&words[DIMS_AT..DIMS_AT + DIMS_WORDS]);
        let dims = Dimensions::from_words(&dim_words);

        let plan = LayoutPlan::compute(&dims);
        if words.len() < plan.total_words() {
            return Err(StateError::BlockTooSmall {
                required_words: plan.total_words(),
                actual_words: words.len(),
            });
        }
        for (i, &id) in SectionId::ALL.iter().enumerate() {
            let stored = Span {
                offset: words[SECTION_TABLE_AT + 2 * i] as usize,
                len: words[SECTION_TABLE_AT + 2 * i + 1] as usize,
            };
            let expected = plan.section(id).unwrap_or_default();
            if stored != expected {
                return Err(StateError::TableMismatch { section: id });
            }
        }

        Ok(Self { words, plan })
    }

    /// Clone the raw block into an independent replica.
    pub fn duplicate(&self) -> Result<Self, StateError> {
        let mut words: Vec<u64> = Vec::new();
        words
            .try_reserve_exact(self.words.len())
            .map_err(|_| StateError::AllocationFailed {
                requested_bytes: self.words.len() * 8,
            })?;
        words.extend_from_slice(&self.words);
        Self::attach(words)
    }

    /// Consume the arena, yielding the raw block (the checkpoint form).
    pub fn into_words(self) -> Vec<u64> {
        self.words
    }

    /// The raw block.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// The layout plan.
    pub fn plan(&self) -> &LayoutPlan {
        &self.plan
    }

    /// The problem dimensions.
    pub fn dims(&self) -> &Dimensions {
        self.plan.dims()
    }

    /// Number of reactions.
    pub fn reaction_count(&self) -> usize {
        self.dims().reactions
    }

    /// Number of unique molecules.
    pub fn molecule_count(&self) -> usize {
        self.dims().molecules
    }

    /// Total block size in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.plan.total_bytes()
    }

    // ── Typed section access ───────────────────────────────────────

    fn span_words(&self, id: SectionId) -> Option<&[u64]> {
        let span = self.plan.section(id)?;
        Some(&self.words[span.offset..span.end()])
    }

    fn span_words_mut(&mut self, id: SectionId) -> Option<&mut [u64]> {
        let span = self.plan.section(id)?;
        Some(&mut self.words[span.offset..span.end()])
    }

    /// Read-only float view of a section.
    pub fn floats(&self, id: SectionId) -> Option<FloatView<'_>> {
        self.span_words(id).map(FloatView::new)
    }

    /// Mutable float view of a section.
    pub fn floats_mut(&mut self, id: SectionId) -> Option<FloatViewMut<'_>> {
        self.span_words_mut(id).map(FloatViewMut::new)
    }

    /// Read-only integer view of a section.
    pub fn ints(&self, id: SectionId) -> Option<IntView<'_>> {
        self.span_words(id).map(IntView::new)
    }

    /// Mutable integer view of a section.
    pub fn ints_mut(&mut self, id: SectionId) -> Option<IntViewMut<'_>> {
        self.span_words_mut(id).map(IntViewMut::new)
    }

    /// Packed-text view of a section.
    pub fn text(&self, id: SectionId) -> Option<TextView<'_>> {
        self.span_words(id).map(TextView::new)
    }

    // ── Scalar accumulators ────────────────────────────────────────

    /// The running forward free-energy accumulator.
    pub fn dg_forward(&self) -> f64 {
        self.accumulator(0)
    }

    /// Set the forward free-energy accumulator.
    pub fn set_dg_forward(&mut self, value: f64) {
        self.set_accumulator(0, value);
    }

    /// The running entropy accumulator.
    pub fn entropy(&self) -> f64 {
        self.accumulator(1)
    }

    /// Set the entropy accumulator.
    pub fn set_entropy(&mut self, value: f64) {
        self.set_accumulator(1, value);
    }

    fn accumulator(&self, slot: usize) -> f64 {
        let words = self
            .span_words(SectionId::Accumulators)
            .expect("accumulators are always materialized");
        f64::from_bits(words[slot])
    }

    fn set_accumulator(&mut self, slot: usize, value: f64) {
        let words = self
            .span_words_mut(SectionId::Accumulators)
            .expect("accumulators are always materialized");
        words[slot] = value.to_bits();
    }

    // ── RNG blobs ──────────────────────────────────────────────────

    /// Reconstruct a generator from one of the arena's RNG blobs.
    pub fn rng(&self, slot: RngSlot) -> ChaCha8Rng {
        let words = self
            .span_words(slot.section())
            .expect("rng blobs are always materialized");
        let mut blob = [0u64; RNG_STATE_WORDS];
        blob.copy_from_slice(words);
        decode_rng(&blob)
    }

    /// Store a generator's state into one of the arena's RNG blobs.
    pub fn store_rng(&mut self, slot: RngSlot, rng: &ChaCha8Rng) {
        let blob = encode_rng(rng);
        let words = self
            .span_words_mut(slot.section())
            .expect("rng blobs are always materialized");
        words.copy_from_slice(&blob);
    }

    // ── Arena-resident directory ───────────────────────────────────

    /// The variable flag of the molecule at a directory index.
    pub fn molecule_variable(&self, molecule: usize) -> bool {
        let words = self
            .span_words(SectionId::SortedMolecules)
            .expect("molecule records are always materialized");
        words[molecule * MOLECULE_RECORD_WORDS + 2] != 0
    }

    /// The compartment of the molecule at a directory index.
    pub fn molecule_compartment(&self, molecule: usize) -> CompartmentId {
        let words = self
            .span_words(SectionId::SortedMolecules)
            .expect("molecule records are always materialized");
        CompartmentId(words[molecule * MOLECULE_RECORD_WORDS + 1] as u32)
    }

    /// The name of the molecule at a directory index.
    pub fn molecule_name(&self, molecule: usize) -> Option<String> {
        let words = self.span_words(SectionId::SortedMolecules)?;
        let offset = words[molecule * MOLECULE_RECORD_WORDS] as usize;
        Some(self.text(SectionId::NameText)?.name_at(offset))
    }

    /// The volume of the compartment at a directory index.
    pub fn compartment_volume(&self, compartment: usize) -> f64 {
        let words = self
            .span_words(SectionId::SortedCompartments)
            .expect("compartment records are always materialized");
        f64::from_bits(words[compartment * COMPARTMENT_RECORD_WORDS + 1])
    }

    /// The cached reciprocal volume of the compartment at a directory
    /// index.
    pub fn compartment_recip_volume(&self, compartment: usize) -> f64 {
        let words = self
            .span_words(SectionId::SortedCompartments)
            .expect("compartment records are always materialized");
        f64::from_bits(words[compartment * COMPARTMENT_RECORD_WORDS + 2])
    }

    /// Binary search the arena-resident molecule directory.
    ///
    /// Same comparator and fast paths as the pre-build directory, so a
    /// reattached raw block answers lookups without any side structure.
    pub fn lookup_molecule(&self, name: &str, compartment: CompartmentId) -> Option<MoleculeId> {
        let records = self.span_words(SectionId::SortedMolecules)?;
        let text = self.text(SectionId::NameText)?;
        let count = self.molecule_count();
        let index = lookup_by(count, |i| {
            let record_cmpt = records[i * MOLECULE_RECORD_WORDS + 1] as u32;
            match compartment.0.cmp(&record_cmpt) {
                Ordering::Equal => {
                    let offset = records[i * MOLECULE_RECORD_WORDS] as usize;
                    text.compare_name(name, offset)
                }
                other => other,
            }
        })?;
        Some(MoleculeId(index as u32))
    }

    // ── Kernel split ───────────────────────────────────────────────

    /// Split the block at the workspace offset so kernels can read the
    /// header/two-way/incoming sections while writing workspace
    /// sections. With verbosity off the auxiliary text sits inside the
    /// write half, which is exactly the designed alias: auxiliary reads
    /// happen only before the first workspace write.
    pub fn kernel_split(&mut self) -> (ArenaReader<'_>, Workspace<'_>) {
        let split = self.plan.region(RegionId::Workspace).offset;
        let (head, tail) = self.words.split_at_mut(split);
        (
            ArenaReader {
                words: head,
                plan: &self.plan,
            },
            Workspace {
                words: tail,
                base: split,
                plan: &self.plan,
            },
        )
    }

    // ── Build internals ────────────────────────────────────────────

    fn copy_boot(&mut self, boot: &BootState) {
        let network = &boot.network;

        self.floats_mut(SectionId::CurrentConcentrations)
            .expect("section")
            .copy_from(&boot.concentrations);
        self.floats_mut(SectionId::BoundaryFluxConcentrations)
            .expect("section")
            .copy_from(&boot.boundary_flux);

        self.store_rng(RngSlot::Primary, &ChaCha8Rng::seed_from_u64(boot.rng_seed));
        self.store_rng(
            RngSlot::Secondary,
            &ChaCha8Rng::seed_from_u64(boot.rng_seed.wrapping_add(1)),
        );

        self.floats_mut(SectionId::StandardFreeEnergies)
            .expect("section")
            .copy_from(&boot.dg0s);
        self.floats_mut(SectionId::EquilibriumConstants)
            .expect("section")
            .copy_from(&boot.kes);
        self.floats_mut(SectionId::Activities)
            .expect("section")
            .copy_from(&boot.activities);

        let rm = &network.reaction_major;
        self.ints_mut(SectionId::ReactionOffsets)
            .expect("section")
            .copy_from(rm.offsets());
        self.ints_mut(SectionId::EntryMolecules)
            .expect("section")
            .copy_from(rm.molecules());
        self.ints_mut(SectionId::EntryCompartments)
            .expect("section")
            .copy_from(rm.compartments());
        self.ints_mut(SectionId::EntryCoefficients)
            .expect("section")
            .copy_from(rm.coefficients());
        self.ints_mut(SectionId::EntryNames)
            .expect("section")
            .copy_from(rm.names());

        let mm = &network.molecule_major;
        self.ints_mut(SectionId::MoleculeOffsets)
            .expect("section")
            .copy_from(mm.offsets());
        self.ints_mut(SectionId::MoleculeReactions)
            .expect("section")
            .copy_from(mm.reactions());
        self.ints_mut(SectionId::MoleculeCoefficients)
            .expect("section")
            .copy_from(mm.coefficients());

        {
            let words = self
                .span_words_mut(SectionId::SortedMolecules)
                .expect("section");
            for (i, record) in network.molecules.records().iter().enumerate() {
                let at = i * MOLECULE_RECORD_WORDS;
                words[at] = u64::from(record.name);
                words[at + 1] = u64::from(record.compartment.0);
                words[at + 2] = u64::from(record.variable);
                words[at + 3] = u64::from(record.solvent);
            }
        }
        {
            let words = self
                .span_words_mut(SectionId::SortedCompartments)
                .expect("section");
            for (i, record) in network.compartments.records().iter().enumerate() {
                let at = i * COMPARTMENT_RECORD_WORDS;
                words[at] = u64::from(record.name);
                words[at + 1] = record.volume.to_bits();
                words[at + 2] = record.recip_volume.to_bits();
            }
        }

        let (conc_to_count, count_to_conc) = boot.conversion_factors();
        self.floats_mut(SectionId::ConcToCount)
            .expect("section")
            .copy_from(&conc_to_count);
        self.floats_mut(SectionId::CountToConc)
            .expect("section")
            .copy_from(&count_to_conc);

        pack_bytes(
            self.span_words_mut(SectionId::NameText).expect("section"),
            network.molecules.text().bytes(),
        );

        // Auxiliary text exists only in verbose builds; with verbosity
        // off these sections are absent and nothing aliases onto the
        // workspace before the kernels run.
        if boot.verbose {
            let stride = self.plan.dims().max_filename_bytes;
            let mut table = vec![0u8; FILE_SLOTS * stride];
            for (slot, name) in boot.file_names.iter().take(FILE_SLOTS).enumerate() {
                let bytes = name.as_bytes();
                let len = bytes.len().min(stride.saturating_sub(1));
                table[slot * stride..slot * stride + len].copy_from_slice(&bytes[..len]);
            }
            pack_bytes(
                self.span_words_mut(SectionId::FileNames).expect("section"),
                &table,
            );
            pack_bytes(
                self.span_words_mut(SectionId::ReactionTitles)
                    .expect("section"),
                network.titles.bytes(),
            );
            if !boot.pathway.is_empty() {
                let mut bytes = boot.pathway.as_bytes().to_vec();
                bytes.push(0);
                pack_bytes(
                    self.span_words_mut(SectionId::PathwayText).expect("section"),
                    &bytes,
                );
            }
            pack_bytes(
                self.span_words_mut(SectionId::CompartmentText)
                    .expect("section"),
                network.compartments.text().bytes(),
            );
        }
    }

    fn write_header(&mut self) {
        self.words[0] = HEADER_MAGIC;
        self.words[1] = LAYOUT_VERSION;
        let dim_words = self.plan.dims().to_words();
        self.words[DIMS_AT..DIMS_AT + DIMS_WORDS].copy_from_slice(&dim_words);
        for (i, &region) in RegionId::ALL.iter().enumerate() {
            let span = self.plan.region(region);
            self.words[REGION_TABLE_AT + 2 * i] = span.offset as u64;
            self.words[REGION_TABLE_AT + 2 * i + 1] = span.len as u64;
        }
        for (i, &id) in SectionId::ALL.iter().enumerate() {
            let span = self.plan.section(id).unwrap_or_default();
            self.words[SECTION_TABLE_AT + 2 * i] = span.offset as u64;
            self.words[SECTION_TABLE_AT + 2 * i + 1] = span.len as u64;
        }
    }
}

/// Read access to everything before the workspace region.
pub struct ArenaReader<'a> {
    words: &'a [u64],
    plan: &'a LayoutPlan,
}

impl ArenaReader<'_> {
    /// The problem dimensions.
    pub fn dims(&self) -> &Dimensions {
        self.plan.dims()
    }

    fn span_words(&self, id: SectionId) -> Option<&[u64]> {
        let span = self.plan.section(id)?;
        if span.end() > self.words.len() {
            return None;
        }
        Some(&self.words[span.offset..span.end()])
    }

    /// Read-only float view of a pre-workspace section.
    pub fn floats(&self, id: SectionId) -> Option<FloatView<'_>> {
        self.span_words(id).map(FloatView::new)
    }

    /// Read-only integer view of a pre-workspace section.
    pub fn ints(&self, id: SectionId) -> Option<IntView<'_>> {
        self.span_words(id).map(IntView::new)
    }

    /// Packed-text view of a pre-workspace section.
    pub fn text(&self, id: SectionId) -> Option<TextView<'_>> {
        self.span_words(id).map(TextView::new)
    }
}

/// Write access to the workspace region.
pub struct Workspace<'a> {
    words: &'a mut [u64],
    base: usize,
    plan: &'a LayoutPlan,
}

impl Workspace<'_> {
    fn relative(&self, id: SectionId) -> Option<Span> {
        let span = self.plan.section(id)?;
        if span.offset < self.base {
            return None;
        }
        Some(Span {
            offset: span.offset - self.base,
            len: span.len,
        })
    }

    /// Mutable float view of a workspace section.
    pub fn floats_mut(&mut self, id: SectionId) -> Option<FloatViewMut<'_>> {
        let span = self.relative(id)?;
        Some(FloatViewMut::new(
            &mut self.words[span.offset..span.end()],
        ))
    }

    /// Mutable integer view of a workspace section.
    pub fn ints_mut(&mut self, id: SectionId) -> Option<IntViewMut<'_>> {
        let span = self.relative(id)?;
        Some(IntViewMut::new(&mut self.words[span.offset..span.end()]))
    }

    /// Two disjoint mutable float views at once (e.g. the forward and
    /// reverse likelihood sections written in a single kernel pass).
    pub fn floats_mut_pair(
        &mut self,
        a: SectionId,
        b: SectionId,
    ) -> Option<(FloatViewMut<'_>, FloatViewMut<'_>)> {
        let sa = self.relative(a)?;
        let sb = self.relative(b)?;
        if sa.offset < sb.offset {
            let (left, right) = self.words.split_at_mut(sb.offset);
            Some((
                FloatViewMut::new(&mut left[sa.offset..sa.end()]),
                FloatViewMut::new(&mut right[..sb.len]),
            ))
        } else {
            let (left, right) = self.words.split_at_mut(sa.offset);
            let first = FloatViewMut::new(&mut right[..sa.len]);
            let second = FloatViewMut::new(&mut left[sb.offset..sb.end()]);
            Some((first, second))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gibbs_core::SimConfig;
    use gibbs_network::{Network, ParsedReaction};
    use rand::Rng;

    fn boot(verbose: bool) -> BootState {
        let reactions = vec![
            ParsedReaction::new("A + B => C")
                .with("A", "", -1)
                .with("B", "", -1)
                .with("C", "", 1),
            ParsedReaction::new("C => D").with("C", "", -1).with("D", "", 1),
        ];
        let network = Network::assemble(&reactions, &[], SimConfig::DEFAULT_VOLUME);
        let mut boot = BootState::new(network, SimConfig::default());
        boot.set_equilibrium_constant(0, 2.0);
        boot.set_equilibrium_constant(1, 0.5);
        boot.concentrations = vec![2.0, 3.0, 0.0, 1.0];
        boot.verbose = verbose;
        boot.view_history = 4;
        boot.rng_seed = 7;
        boot
    }

    #[test]
    fn build_populates_incoming_sections() {
        let arena = StateArena::build(&boot(false)).unwrap();
        let ke = arena.floats(SectionId::EquilibriumConstants).unwrap();
        assert_eq!(ke.get(0), 2.0);
        assert_eq!(ke.get(1), 0.5);
        let concs = arena.floats(SectionId::CurrentConcentrations).unwrap();
        assert_eq!(concs.to_vec(4), vec![2.0, 3.0, 0.0, 1.0]);
        let activities = arena.floats(SectionId::Activities).unwrap();
        assert_eq!(activities.to_vec(2), vec![1.0, 1.0]);
        assert_eq!(arena.reaction_count(), 2);
        assert_eq!(arena.molecule_count(), 4);
    }

    #[test]
    fn header_is_written_last_and_first_word_is_magic() {
        let arena = StateArena::build(&boot(false)).unwrap();
        assert_eq!(arena.words()[0], HEADER_MAGIC);
        assert_eq!(arena.words()[1], LAYOUT_VERSION);
    }

    #[test]
    fn checkpoint_round_trip_preserves_every_section() {
        let arena = StateArena::build(&boot(true)).unwrap();
        let expected: Vec<u64> = arena.words().to_vec();
        let restored = StateArena::attach(arena.into_words()).unwrap();
        assert_eq!(restored.words(), expected.as_slice());
        let ke = restored.floats(SectionId::EquilibriumConstants).unwrap();
        assert_eq!(ke.get(0), 2.0);
    }

    #[test]
    fn attach_rejects_bad_magic() {
        let mut words = StateArena::build(&boot(false)).unwrap().into_words();
        words[0] = 0xdead_beef;
        assert_eq!(
            StateArena::attach(words),
            Err(StateError::BadMagic { found: 0xdead_beef })
        );
    }

    #[test]
    fn attach_rejects_unknown_layout_version() {
        let mut words = StateArena::build(&boot(false)).unwrap().into_words();
        words[1] = 99;
        assert_eq!(
            StateArena::attach(words),
            Err(StateError::UnsupportedVersion { found: 99 })
        );
    }

    #[test]
    fn attach_rejects_truncated_block() {
        let mut words = StateArena::build(&boot(false)).unwrap().into_words();
        words.truncate(words.len() - 4);
        assert!(matches!(
            StateArena::attach(words),
            Err(StateError::BlockTooSmall { .. })
        ));
    }

    #[test]
    fn attach_rejects_corrupt_table() {
        let mut words = StateArena::build(&boot(false)).unwrap().into_words();
        words[SECTION_TABLE_AT] += 2;
        assert_eq!(
            StateArena::attach(words),
            Err(StateError::TableMismatch {
                section: SectionId::Accumulators
            })
        );
    }

    #[test]
    fn duplicate_is_independent() {
        let mut original = StateArena::build(&boot(false)).unwrap();
        let replica = original.duplicate().unwrap();
        original
            .floats_mut(SectionId::CurrentConcentrations)
            .unwrap()
            .set(0, 99.0);
        assert_eq!(
            replica
                .floats(SectionId::CurrentConcentrations)
                .unwrap()
                .get(0),
            2.0
        );
    }

    #[test]
    fn rng_blob_round_trips_through_arena() {
        let mut arena = StateArena::build(&boot(false)).unwrap();
        let mut rng = arena.rng(RngSlot::Primary);
        for _ in 0..5 {
            rng.next_u64();
        }
        arena.store_rng(RngSlot::Primary, &rng);
        let mut resumed = arena.rng(RngSlot::Primary);
        assert_eq!(resumed.next_u64(), rng.next_u64());
    }

    #[test]
    fn rng_slots_are_distinct_streams() {
        let arena = StateArena::build(&boot(false)).unwrap();
        let mut a = arena.rng(RngSlot::Primary);
        let mut b = arena.rng(RngSlot::Secondary);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn arena_directory_lookup_matches_network() {
        let boot_state = boot(false);
        let arena = StateArena::build(&boot_state).unwrap();
        assert_eq!(
            arena.lookup_molecule("A", CompartmentId(0)),
            Some(MoleculeId(0))
        );
        assert_eq!(
            arena.lookup_molecule("D", CompartmentId(0)),
            Some(MoleculeId(3))
        );
        assert_eq!(arena.lookup_molecule("E", CompartmentId(0)), None);
        assert_eq!(arena.lookup_molecule("A", CompartmentId(1)), None);
        assert_eq!(arena.molecule_name(2).as_deref(), Some("C"));
    }

    #[test]
    fn lookup_survives_reattach() {
        let arena = StateArena::build(&boot(false)).unwrap();
        let restored = StateArena::attach(arena.into_words()).unwrap();
        assert_eq!(
            restored.lookup_molecule("B", CompartmentId(0)),
            Some(MoleculeId(1))
        );
    }

    #[test]
    fn scalar_accumulators_read_back() {
        let mut arena = StateArena::build(&boot(false)).unwrap();
        assert_eq!(arena.dg_forward(), 0.0);
        arena.set_dg_forward(-4.5);
        arena.set_entropy(0.25);
        assert_eq!(arena.dg_forward(), -4.5);
        assert_eq!(arena.entropy(), 0.25);
    }

    #[test]
    fn kernel_split_reads_incoming_writes_workspace() {
        let mut arena = StateArena::build(&boot(false)).unwrap();
        {
            let (reader, mut workspace) = arena.kernel_split();
            let ke = reader.floats(SectionId::EquilibriumConstants).unwrap();
            let mut fwd = workspace.floats_mut(SectionId::ForwardLikelihoods).unwrap();
            fwd.set(0, ke.get(0) * 10.0);
        }
        assert_eq!(
            arena.floats(SectionId::ForwardLikelihoods).unwrap().get(0),
            20.0
        );
    }

    #[test]
    fn kernel_split_pair_views_are_disjoint() {
        let mut arena = StateArena::build(&boot(false)).unwrap();
        {
            let (_, mut workspace) = arena.kernel_split();
            let (mut fwd, mut rev) = workspace
                .floats_mut_pair(
                    SectionId::ForwardLikelihoods,
                    SectionId::ReverseLikelihoods,
                )
                .unwrap();
            fwd.set(1, 1.0);
            rev.set(1, 2.0);
        }
        assert_eq!(arena.floats(SectionId::ForwardLikelihoods).unwrap().get(1), 1.0);
        assert_eq!(arena.floats(SectionId::ReverseLikelihoods).unwrap().get(1), 2.0);
    }

    #[test]
    fn verbose_workspace_tail_takes_integer_writes() {
        let mut arena = StateArena::build(&boot(true)).unwrap();
        {
            let (_, mut workspace) = arena.kernel_split();
            let mut fires = workspace.ints_mut(SectionId::ReactionFires).unwrap();
            fires.set(0, 41);
            fires.set(2, 7);
        }
        let fires = arena.ints(SectionId::ReactionFires).unwrap();
        assert_eq!(fires.get(0), 41);
        assert_eq!(fires.get(2), 7);
    }

    #[test]
    fn quiet_build_has_no_auxiliary_sections() {
        let arena = StateArena::build(&boot(false)).unwrap();
        assert!(arena.text(SectionId::ReactionTitles).is_none());
        assert!(arena.floats(SectionId::ReactionViews).is_none());
    }

    #[test]
    fn verbose_build_stores_titles() {
        let mut boot_state = boot(true);
        boot_state.file_names = vec!["params.in".to_string(), "reactions.dat".to_string()];
        let arena = StateArena::build(&boot_state).unwrap();
        let titles = arena.text(SectionId::ReactionTitles).unwrap();
        assert_eq!(titles.name_at(1), "A + B => C");
        let stride = arena.dims().max_filename_bytes;
        let files = arena.text(SectionId::FileNames).unwrap();
        assert_eq!(files.name_at(0), "params.in");
        assert_eq!(files.name_at(stride), "reactions.dat");
    }

    #[test]
    fn directory_records_survive_the_copy() {
        let arena = StateArena::build(&boot(false)).unwrap();
        for i in 0..arena.molecule_count() {
            assert!(arena.molecule_variable(i));
            assert_eq!(arena.molecule_compartment(i), CompartmentId(0));
        }
        assert_eq!(arena.compartment_volume(0), SimConfig::DEFAULT_VOLUME);
        assert!(
            (arena.compartment_recip_volume(0) - 1.0 / SimConfig::DEFAULT_VOLUME).abs()
                < 1.0
        );
    }

    #[test]
    fn conversion_factor_sections_are_populated() {
        let arena = StateArena::build(&boot(false)).unwrap();
        let to_count = arena.floats(SectionId::ConcToCount).unwrap();
        let to_conc = arena.floats(SectionId::CountToConc).unwrap();
        for i in 0..arena.molecule_count() {
            assert!((to_count.get(i) * to_conc.get(i) - 1.0).abs() < 1e-9);
        }
    }
}
