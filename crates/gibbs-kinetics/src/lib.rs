//! Likelihood and flux kernels for the gibbs reaction-network
//! simulator.
//!
//! Everything here reads the state arena through its computed section
//! offsets: equilibrium constants and the sparse matrices from the
//! incoming region, likelihood scratch from the workspace region. The
//! kernels are purely sequential; callers own iteration, step-size
//! control, and convergence policy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod flux;
pub mod likelihood;
pub mod regulate;

pub use error::KineticsError;
pub use flux::{FluxKernel, FluxStrategy};
pub use likelihood::{
    compute_likelihoods, likelihood_postselection, likelihood_ratio, update_likelihoods,
    update_log_ratios, update_postselection,
};
pub use regulate::{HillRegulator, HillTerm};
