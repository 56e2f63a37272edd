//! Core types and traits for the gibbs reaction-network simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the gibbs workspace:
//! typed indices, the fatal-error taxonomy, the immutable simulation
//! configuration record, and the regulation collaborator trait.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod direction;
pub mod error;
pub mod id;
pub mod regulate;

pub use config::SimConfig;
pub use direction::Direction;
pub use error::ConfigError;
pub use id::{CompartmentId, MoleculeId};
pub use regulate::{Regulator, Unregulated};
