//! Species directories and sparse stoichiometric matrices.
//!
//! This crate turns the ordered reaction list produced by an external
//! parser into the immutable lookup structures the simulation reads:
//!
//! - [`NameTable`] — interned, offset-addressed name text.
//! - [`MoleculeDirectory`] / [`CompartmentDirectory`] — sorted record
//!   tables with binary-search lookup, built by stable merge.
//! - [`ReactionMatrix`] / [`MoleculeMatrix`] — the dual (reaction-major
//!   and molecule-major) sparse representations of the stoichiometric
//!   matrix.
//! - [`Network`] — the assembly of all of the above from parser output.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod matrix;
pub mod reaction;
pub mod species;
pub mod text;

pub use builder::{CompartmentDecl, Network};
pub use matrix::{MoleculeMatrix, ReactionMatrix};
pub use reaction::{AssembledReaction, ParsedReaction, ParsedSpecies, ReactionEntry};
pub use species::{CompartmentDirectory, CompartmentRecord, MoleculeDirectory, MoleculeRecord};
pub use text::NameTable;
