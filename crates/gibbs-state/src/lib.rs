//! Contiguous state arena and layout planner for gibbs simulations.
//!
//! Every array a simulation run touches lives in one zero-initialized,
//! offset-addressed block:
//!
//! ```text
//! StateArena (one Vec<u64>)
//! ├── header      — dimensions + region table + section table
//! ├── two-way     — concentrations, accumulators, RNG blobs (mutated per step)
//! ├── incoming    — ke, matrices, directories, name text (write-once)
//! ├── auxiliary   — echo text tables (verbose only)
//! └── workspace   — kernel scratch (aliases auxiliary when quiet)
//! ```
//!
//! The block is the checkpoint format: serialize the words verbatim,
//! reattach with [`StateArena::attach`], and the layout is recomputed
//! from the header's own dimensions. Independent replicas come from
//! [`StateArena::duplicate`]; no arena is ever shared for concurrent
//! mutation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod boot;
pub mod error;
pub mod layout;
pub mod rng;
pub mod section;
pub mod view;

pub use arena::{ArenaReader, RngSlot, StateArena, Workspace};
pub use boot::{BootState, SpeciesInit};
pub use error::StateError;
pub use layout::{Dimensions, LayoutPlan};
pub use section::{RegionId, SectionId, Span};
pub use view::{FloatView, FloatViewMut, IntView, IntViewMut, TextView};
