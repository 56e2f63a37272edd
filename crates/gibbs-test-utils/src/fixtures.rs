//! Reference networks used across crate test suites.
//!
//! Two standard fixtures:
//!
//! - [`chain_network`] — the two-step chain `A + B => C => D` in the
//!   global compartment, with known equilibrium constants and
//!   concentrations chosen so every likelihood is easy to verify by
//!   hand.
//! - [`transport_network`] — a two-compartment glucose transport pair,
//!   for volume- and count-conversion coverage.

use gibbs_core::SimConfig;
use gibbs_network::{CompartmentDecl, Network, ParsedReaction};
use gibbs_state::{BootState, StateArena};

/// The two-step chain `A + B => C`, `C => D`.
///
/// Sorted molecule order is A, B, C, D at directory indices 0..4.
pub fn chain_network() -> Network {
    let reactions = vec![
        ParsedReaction::new("A + B => C")
            .with("A", "", -1)
            .with("B", "", -1)
            .with("C", "", 1),
        ParsedReaction::new("C => D").with("C", "", -1).with("D", "", 1),
    ];
    Network::assemble(&reactions, &[], SimConfig::DEFAULT_VOLUME)
}

/// Boot record for the chain: ke = [2.0, 0.5], concentrations
/// A=2, B=3, C=0, D=1.
///
/// With these numbers the first reaction's forward likelihood is
/// exactly `2.0 * 2 * 3 = 12` and its reverse likelihood is 0 (the
/// product side is absent).
pub fn chain_boot() -> BootState {
    let mut boot = BootState::new(chain_network(), SimConfig::default());
    boot.set_equilibrium_constant(0, 2.0);
    boot.set_equilibrium_constant(1, 0.5);
    boot.concentrations = vec![2.0, 3.0, 0.0, 1.0];
    boot.rng_seed = 11;
    boot
}

/// A built arena for the chain fixture.
pub fn chain_arena() -> StateArena {
    StateArena::build(&chain_boot()).expect("chain fixture builds")
}

/// Glucose transport between two declared compartments of different
/// volumes: `glucose[outside] => glucose[inside]`.
pub fn transport_network() -> Network {
    let reactions = vec![ParsedReaction::new("glucose transport")
        .with("glucose", "outside", -1)
        .with("glucose", "inside", 1)];
    let decls = vec![
        CompartmentDecl::new("inside", 1.0e-15),
        CompartmentDecl::new("outside", 4.0e-15),
    ];
    Network::assemble(&reactions, &decls, SimConfig::DEFAULT_VOLUME)
}

/// Boot record for the transport fixture with unit equilibrium and
/// distinct concentrations on each side of the membrane.
pub fn transport_boot() -> BootState {
    let mut boot = BootState::new(transport_network(), SimConfig::default());
    boot.concentrations = vec![5.0, 8.0];
    boot.rng_seed = 13;
    boot
}
