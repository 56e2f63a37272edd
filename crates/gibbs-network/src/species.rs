//! Sorted molecule and compartment directories.
//!
//! Both directories are immutable sorted record tables over interned
//! names, built by a stable bottom-up merge sort and searched with a
//! fast-path binary search. The molecule comparator is
//! `(compartment, case-normalized name)`; compartments compare by name
//! alone. Construction deduplicates, so lookup behavior on duplicate
//! keys is undefined by design and never exercised.

use std::cmp::Ordering;

use gibbs_core::{CompartmentId, MoleculeId};

use crate::text::{compare_names, NameTable};

/// One molecule entry in the sorted directory.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoleculeRecord {
    /// Byte offset of the molecule's name in the directory's name table.
    pub name: u32,
    /// The compartment this molecule lives in.
    pub compartment: CompartmentId,
    /// Whether the simulation may change this molecule's concentration.
    /// Fixed (non-variable) molecules always receive zero flux.
    pub variable: bool,
    /// Whether this molecule is the compartment's solvent.
    pub solvent: bool,
}

impl MoleculeRecord {
    /// A new variable, non-solvent record.
    pub fn new(name: u32, compartment: CompartmentId) -> Self {
        Self {
            name,
            compartment,
            variable: true,
            solvent: false,
        }
    }
}

/// One compartment entry in the sorted directory.
///
/// Index 0 is always the implicit global compartment (empty name, which
/// sorts before every non-empty name).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompartmentRecord {
    /// Byte offset of the compartment's name in its name table.
    pub name: u32,
    /// Compartment volume in liters.
    pub volume: f64,
    /// Cached reciprocal volume.
    pub recip_volume: f64,
}

impl CompartmentRecord {
    /// A new record with the given name and volume.
    pub fn new(name: u32, volume: f64) -> Self {
        Self {
            name,
            volume,
            recip_volume: 1.0 / volume,
        }
    }
}

/// Stable two-pointer merge of two sorted record slices.
///
/// Ties break toward `a`; an exhausted input's remainder is appended in
/// one bulk copy. Either input may be empty.
fn merge_by<T: Copy>(a: &[T], b: &[T], mut cmp: impl FnMut(&T, &T) -> Ordering) -> Vec<T> {
    let mut merged = Vec::with_capacity(a.len() + b.len());
    let mut i = 0;
    let mut j = 0;
    while i < a.len() && j < b.len() {
        if cmp(&a[i], &b[j]) == Ordering::Greater {
            merged.push(b[j]);
            j += 1;
        } else {
            merged.push(a[i]);
            i += 1;
        }
    }
    // One of the lists is exhausted; bulk-copy the other's tail.
    merged.extend_from_slice(&a[i..]);
    merged.extend_from_slice(&b[j..]);
    merged
}

/// Bottom-up merge sort built on [`merge_by`].
fn sort_by_merge<T: Copy>(
    mut records: Vec<T>,
    mut cmp: impl FnMut(&T, &T) -> Ordering,
) -> Vec<T> {
    let mut width = 1;
    while width < records.len() {
        let mut merged = Vec::with_capacity(records.len());
        for chunk in records.chunks(2 * width) {
            let split = width.min(chunk.len());
            let (a, b) = chunk.split_at(split);
            merged.append(&mut merge_by(a, b, &mut cmp));
        }
        records = merged;
        width *= 2;
    }
    records
}

/// Binary search over any sorted, index-addressed table.
///
/// `probe(i)` reports how the sought key compares to entry `i`. The
/// search first makes exact comparisons against the first and last
/// entries, then bisects. Returns the matching index or `None`.
pub fn lookup_by(len: usize, probe: impl Fn(usize) -> Ordering) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match probe(0) {
        Ordering::Less => return None,
        Ordering::Equal => return Some(0),
        Ordering::Greater => {}
    }
    if len == 1 {
        return None;
    }
    match probe(len - 1) {
        Ordering::Greater => return None,
        Ordering::Equal => return Some(len - 1),
        Ordering::Less => {}
    }
    let mut left = 0;
    let mut right = len - 1;
    let mut mid = (left + right) >> 1;
    while mid != left {
        match probe(mid) {
            Ordering::Equal => return Some(mid),
            Ordering::Less => right = mid,
            Ordering::Greater => left = mid,
        }
        mid = (left + right) >> 1;
    }
    None
}

fn compare_molecules(a: &MoleculeRecord, b: &MoleculeRecord, text: &NameTable) -> Ordering {
    a.compartment.cmp(&b.compartment).then_with(|| {
        let a_name = text.get(a.name).unwrap_or_default();
        let b_name = text.get(b.name).unwrap_or_default();
        compare_names(a_name, b_name)
    })
}

/// Stable merge of two pre-sorted molecule record lists sharing one name
/// table. Ties break toward `a`.
pub fn merge(a: &[MoleculeRecord], b: &[MoleculeRecord], text: &NameTable) -> Vec<MoleculeRecord> {
    merge_by(a, b, |x, y| compare_molecules(x, y, text))
}

/// The immutable, sorted molecule directory.
///
/// Records are ordered by `(compartment, case-normalized name)` and
/// unique under that key; the record index is the molecule's identity
/// everywhere else in the system.
#[derive(Clone, Debug)]
pub struct MoleculeDirectory {
    records: Vec<MoleculeRecord>,
    text: NameTable,
}

impl MoleculeDirectory {
    /// Build a directory from unsorted records.
    ///
    /// Sorts with the stable merge, then drops adjacent duplicates
    /// (keeping the first occurrence) to guarantee key uniqueness.
    pub fn from_unsorted(records: Vec<MoleculeRecord>, text: NameTable) -> Self {
        let sorted = sort_by_merge(records, |a, b| compare_molecules(a, b, &text));
        let mut records = Vec::with_capacity(sorted.len());
        for record in sorted {
            if let Some(last) = records.last() {
                if compare_molecules(last, &record, &text) == Ordering::Equal {
                    continue;
                }
            }
            records.push(record);
        }
        Self { records, text }
    }

    /// Look up a molecule by name and compartment.
    ///
    /// Returns the directory index, or `None` when the key is absent
    /// (the non-fatal lookup-miss sentinel).
    pub fn lookup(&self, name: &str, compartment: CompartmentId) -> Option<MoleculeId> {
        let index = lookup_by(self.records.len(), |i| {
            let record = &self.records[i];
            compartment.cmp(&record.compartment).then_with(|| {
                compare_names(name, self.text.get(record.name).unwrap_or_default())
            })
        })?;
        Some(MoleculeId(index as u32))
    }

    /// Number of unique molecules.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The record at a directory index.
    pub fn get(&self, id: MoleculeId) -> Option<&MoleculeRecord> {
        self.records.get(id.0 as usize)
    }

    /// All records in sorted order.
    pub fn records(&self) -> &[MoleculeRecord] {
        &self.records
    }

    /// The shared name table.
    pub fn text(&self) -> &NameTable {
        &self.text
    }

    /// The name of the molecule at a directory index.
    pub fn name(&self, id: MoleculeId) -> Option<&str> {
        self.get(id).and_then(|r| self.text.get(r.name))
    }

    /// Mark a molecule as fixed or variable. Used during boot setup,
    /// before the directory is copied into the arena.
    pub fn set_variable(&mut self, id: MoleculeId, variable: bool) {
        if let Some(record) = self.records.get_mut(id.0 as usize) {
            record.variable = variable;
        }
    }

    /// Mark a molecule as the compartment solvent.
    pub fn set_solvent(&mut self, id: MoleculeId, solvent: bool) {
        if let Some(record) = self.records.get_mut(id.0 as usize) {
            record.solvent = solvent;
        }
    }
}

/// The immutable, sorted compartment directory.
#[derive(Clone, Debug)]
pub struct CompartmentDirectory {
    records: Vec<CompartmentRecord>,
    text: NameTable,
}

impl CompartmentDirectory {
    /// Build a directory from unsorted records, sorting by name and
    /// dropping adjacent duplicates.
    pub fn from_unsorted(records: Vec<CompartmentRecord>, text: NameTable) -> Self {
        let cmp = |a: &CompartmentRecord, b: &CompartmentRecord| {
            compare_names(
                text.get(a.name).unwrap_or_default(),
                text.get(b.name).unwrap_or_default(),
            )
        };
        let sorted = sort_by_merge(records, cmp);
        let mut records: Vec<CompartmentRecord> = Vec::with_capacity(sorted.len());
        for record in sorted {
            if let Some(last) = records.last() {
                if cmp(last, &record) == Ordering::Equal {
                    continue;
                }
            }
            records.push(record);
        }
        Self { records, text }
    }

    /// Look up a compartment by name.
    pub fn lookup(&self, name: &str) -> Option<CompartmentId> {
        let index = lookup_by(self.records.len(), |i| {
            compare_names(
                name,
                self.text.get(self.records[i].name).unwrap_or_default(),
            )
        })?;
        Some(CompartmentId(index as u32))
    }

    /// Number of unique compartments.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The record at a directory index.
    pub fn get(&self, id: CompartmentId) -> Option<&CompartmentRecord> {
        self.records.get(id.0 as usize)
    }

    /// All records in sorted order.
    pub fn records(&self) -> &[CompartmentRecord] {
        &self.records
    }

    /// The compartment name table.
    pub fn text(&self) -> &NameTable {
        &self.text
    }

    /// The volume of the compartment at a directory index, or `None`
    /// for an out-of-range index.
    pub fn volume(&self, id: CompartmentId) -> Option<f64> {
        self.get(id).map(|r| r.volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory(names: &[(&str, u32)]) -> MoleculeDirectory {
        let mut text = NameTable::new();
        let records = names
            .iter()
            .map(|&(name, cmpt)| MoleculeRecord::new(text.intern(name), CompartmentId(cmpt)))
            .collect();
        MoleculeDirectory::from_unsorted(records, text)
    }

    #[test]
    fn lookup_finds_each_entry_once() {
        // Directory {"A"@0, "B"@0, "C"@1}: sorted order is A, B, C.
        let dir = directory(&[("C", 1), ("A", 0), ("B", 0)]);
        assert_eq!(dir.lookup("A", CompartmentId(0)), Some(MoleculeId(0)));
        assert_eq!(dir.lookup("B", CompartmentId(0)), Some(MoleculeId(1)));
        assert_eq!(dir.lookup("C", CompartmentId(1)), Some(MoleculeId(2)));
        assert_eq!(dir.lookup("D", CompartmentId(0)), None);
        assert_eq!(dir.lookup("C", CompartmentId(0)), None);
    }

    #[test]
    fn lookup_is_case_normalized() {
        let dir = directory(&[("ATP", 0), ("adp", 0)]);
        assert!(dir.lookup("atp", CompartmentId(0)).is_some());
        assert!(dir.lookup("ADP", CompartmentId(0)).is_some());
    }

    #[test]
    fn empty_directory_misses() {
        let dir = directory(&[]);
        assert_eq!(dir.lookup("A", CompartmentId(0)), None);
    }

    #[test]
    fn duplicates_collapse_to_first() {
        let mut text = NameTable::new();
        let name = text.intern("A");
        let mut first = MoleculeRecord::new(name, CompartmentId(0));
        first.variable = false;
        let second = MoleculeRecord::new(name, CompartmentId(0));
        let dir = MoleculeDirectory::from_unsorted(vec![first, second], text);
        assert_eq!(dir.len(), 1);
        assert!(!dir.records()[0].variable);
    }

    #[test]
    fn merge_ties_prefer_first_list() {
        let mut text = NameTable::new();
        let name = text.intern("x");
        let mut a_rec = MoleculeRecord::new(name, CompartmentId(0));
        a_rec.solvent = true;
        let b_rec = MoleculeRecord::new(name, CompartmentId(0));
        let merged = merge(&[a_rec], &[b_rec], &text);
        assert!(merged[0].solvent);
        assert!(!merged[1].solvent);
    }

    #[test]
    fn merge_with_empty_sides() {
        let mut text = NameTable::new();
        let rec = MoleculeRecord::new(text.intern("x"), CompartmentId(0));
        assert_eq!(merge(&[], &[rec], &text).len(), 1);
        assert_eq!(merge(&[rec], &[], &text).len(), 1);
        assert!(merge(&[], &[], &text).is_empty());
    }

    #[test]
    fn compartment_lookup_by_name() {
        let mut text = NameTable::new();
        let records = vec![
            CompartmentRecord::new(text.intern(""), 1.0e-15),
            CompartmentRecord::new(text.intern("cytosol"), 2.0e-15),
            CompartmentRecord::new(text.intern("mito"), 5.0e-16),
        ];
        let dir = CompartmentDirectory::from_unsorted(records, text);
        // Empty name sorts first: the global compartment is index 0.
        assert_eq!(dir.lookup(""), Some(CompartmentId(0)));
        assert_eq!(dir.lookup("cytosol"), Some(CompartmentId(1)));
        assert_eq!(dir.lookup("golgi"), None);
        assert_eq!(dir.volume(CompartmentId(2)), Some(5.0e-16));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_names() -> impl Strategy<Value = Vec<(String, u32)>> {
            prop::collection::vec(("[a-z]{1,6}", 0u32..4), 0..32)
        }

        proptest! {
            #[test]
            fn lookup_hits_every_present_key(names in arb_names()) {
                let mut text = NameTable::new();
                let records: Vec<MoleculeRecord> = names
                    .iter()
                    .map(|(n, c)| MoleculeRecord::new(text.intern(n), CompartmentId(*c)))
                    .collect();
                let dir = MoleculeDirectory::from_unsorted(records, text);
                for (name, cmpt) in &names {
                    let found = dir.lookup(name, CompartmentId(*cmpt));
                    prop_assert!(found.is_some(), "lost {name}@{cmpt}");
                    let id = found.unwrap();
                    prop_assert_eq!(dir.name(id), Some(name.as_str()));
                    prop_assert_eq!(dir.get(id).unwrap().compartment, CompartmentId(*cmpt));
                }
            }

            #[test]
            fn lookup_misses_absent_keys(names in arb_names()) {
                let mut text = NameTable::new();
                let records: Vec<MoleculeRecord> = names
                    .iter()
                    .map(|(n, c)| MoleculeRecord::new(text.intern(n), CompartmentId(*c)))
                    .collect();
                let dir = MoleculeDirectory::from_unsorted(records, text);
                // Digits never appear in the generated names.
                prop_assert_eq!(dir.lookup("name0", CompartmentId(0)), None);
            }

            #[test]
            fn merge_agrees_with_full_sort(
                a in arb_names(),
                b in arb_names(),
                c in arb_names(),
            ) {
                let mut text = NameTable::new();
                let build = |names: &[(String, u32)], text: &mut NameTable| {
                    let records: Vec<MoleculeRecord> = names
                        .iter()
                        .map(|(n, c)| MoleculeRecord::new(text.intern(n), CompartmentId(*c)))
                        .collect();
                    sort_by_merge(records, |x, y| compare_molecules(x, y, text))
                };
                let sa = build(&a, &mut text);
                let sb = build(&b, &mut text);
                let sc = build(&c, &mut text);

                let pairwise = merge(&merge(&sa, &sb, &text), &sc, &text);

                let mut all = Vec::new();
                all.extend_from_slice(&sa);
                all.extend_from_slice(&sb);
                all.extend_from_slice(&sc);
                let full = sort_by_merge(all, |x, y| compare_molecules(x, y, &text));

                prop_assert_eq!(pairwise, full);
            }
        }
    }
}
