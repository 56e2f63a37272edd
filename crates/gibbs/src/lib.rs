//! gibbs: a biochemical reaction-network simulator core estimating
//! equilibrium and near-equilibrium concentrations from thermodynamic
//! data.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all gibbs sub-crates. For most users, adding `gibbs` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use gibbs::prelude::*;
//!
//! // Assemble the network an external parser produced.
//! let reactions = vec![
//!     ParsedReaction::new("A + B => C")
//!         .with("A", "", -1)
//!         .with("B", "", -1)
//!         .with("C", "", 1),
//! ];
//! let network = Network::assemble(&reactions, &[], SimConfig::DEFAULT_VOLUME);
//!
//! // Stage a boot record and build the arena.
//! let mut boot = BootState::new(network, SimConfig::default());
//! boot.set_equilibrium_constant(0, 2.0);
//! let misses = boot.apply_all(&[
//!     SpeciesInit::new("A", "", 2.0),
//!     SpeciesInit::new("B", "", 3.0),
//! ]);
//! assert!(misses.is_empty());
//! let mut arena = StateArena::build(&boot).unwrap();
//!
//! // One flux evaluation: the integrator loop is the caller's job.
//! let kernel = FluxKernel::new(&SimConfig::default(), FluxStrategy::Gradient, 1).unwrap();
//! let mut flux = vec![0.0; 3];
//! kernel
//!     .compute(&mut arena, &[2.0, 3.0, 0.0], None, &mut flux)
//!     .unwrap();
//! assert_eq!(flux[0], -12.0); // A is consumed at ke · [A] · [B]
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `gibbs-core` | IDs, configuration, errors, the `Regulator` trait |
//! | [`network`] | `gibbs-network` | Directories, name tables, sparse matrices |
//! | [`state`] | `gibbs-state` | The arena, layout planning, boot staging |
//! | [`kinetics`] | `gibbs-kinetics` | Likelihood and flux kernels, Hill regulation |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types: IDs, configuration, errors, regulation trait.
pub mod types {
    pub use gibbs_core::*;
}

/// Species directories and sparse stoichiometric matrices.
pub mod network {
    pub use gibbs_network::*;
}

/// The contiguous state arena and its layout planner.
pub mod state {
    pub use gibbs_state::*;
}

/// Likelihood and flux kernels.
pub mod kinetics {
    pub use gibbs_kinetics::*;
}

/// The most commonly used items, re-exported flat.
pub mod prelude {
    pub use gibbs_core::{ConfigError, Direction, Regulator, SimConfig, Unregulated};
    pub use gibbs_kinetics::{
        compute_likelihoods, update_likelihoods, FluxKernel, FluxStrategy, HillRegulator,
        HillTerm, KineticsError,
    };
    pub use gibbs_network::{CompartmentDecl, Network, ParsedReaction};
    pub use gibbs_state::{BootState, SectionId, SpeciesInit, StateArena, StateError};
}
