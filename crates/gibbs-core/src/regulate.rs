//! The [`Regulator`] collaborator trait.
//!
//! Regulation models enzyme-level control: given the current
//! concentrations and a direction, a regulator produces one
//! multiplicative activity per reaction. The flux kernel consumes the
//! resulting vector as a pure input and never recomputes it internally.

use crate::direction::Direction;

/// Produces a per-reaction multiplicative activity vector.
///
/// # Contract
///
/// - `activities()` MUST be deterministic for a given input.
/// - `out.len()` equals the network's reaction count; every element is
///   written (stale values must not leak through).
/// - Activities are multiplicative modifiers; 1.0 means unregulated.
///
/// This trait is object-safe; callers may hold regulators as
/// `Box<dyn Regulator>`.
pub trait Regulator: Send + 'static {
    /// Human-readable name for error reporting.
    fn name(&self) -> &str;

    /// Fill `out` with one activity per reaction for the given
    /// concentrations and direction.
    fn activities(&self, concentrations: &[f64], direction: Direction, out: &mut [f64]);
}

/// The trivial regulator: every reaction is fully active.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unregulated;

impl Regulator for Unregulated {
    fn name(&self) -> &str {
        "unregulated"
    }

    fn activities(&self, _concentrations: &[f64], _direction: Direction, out: &mut [f64]) {
        out.fill(1.0);
    }
}
