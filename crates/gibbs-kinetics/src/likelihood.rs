//! Reaction likelihood kernels.
//!
//! The likelihood of a reaction is its thermodynamic quotient used as a
//! rate surrogate: the forward likelihood multiplies the equilibrium
//! constant by the reactant-side power product, the reverse likelihood
//! multiplies the reciprocal constant by the product-side power
//! product. Power products are falling factorials — a coefficient of 2
//! contributes `conc * (conc - 1)` — because concentrations double as
//! counts in the Monte Carlo stepper.
//!
//! Numerical ground rules (preserved from the tuned original, not to be
//! "improved"):
//!
//! - Within the reactant-side product, a term that would be ≤ 0 halves
//!   the running product instead of zeroing it, so forward likelihoods
//!   stay finite and strictly positive.
//! - The product side is taken raw: an absent product species collapses
//!   the reverse likelihood to exactly 0.
//! - Every quotient of likelihoods masks a zero denominator with a
//!   sentinel — 1 if the numerator is nonzero, 0 otherwise — so a
//!   degenerate ratio is never an error and never a division by zero.

use gibbs_core::Direction;
use gibbs_state::{ArenaReader, IntView, SectionId, StateArena};

use crate::error::KineticsError;

fn require<T>(view: Option<T>, section: SectionId) -> Result<T, KineticsError> {
    view.ok_or(KineticsError::MissingSection { section })
}

fn check_len(expected: usize, actual: usize) -> Result<(), KineticsError> {
    if expected != actual {
        return Err(KineticsError::LengthMismatch { expected, actual });
    }
    Ok(())
}

/// Quotient of two likelihoods with the zero-denominator sentinel.
pub fn likelihood_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        if numerator != 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        numerator / denominator
    }
}

/// Both power products of one reaction: the clamped reactant side and
/// the raw product side.
fn reaction_sides(
    offsets: IntView<'_>,
    molecules: IntView<'_>,
    coefficients: IntView<'_>,
    concs: &[f64],
    reaction: usize,
    sign: i64,
) -> (f64, f64) {
    let mut left = 1.0;
    let mut right = 1.0;
    let start = offsets.get(reaction) as usize;
    let end = offsets.get(reaction + 1) as usize;
    for e in start..end {
        let coeff = sign * coefficients.get(e);
        let conc = concs[molecules.get(e) as usize];
        if coeff < 0 {
            for k in 0..(-coeff) {
                let term = conc - k as f64;
                if term <= 0.0 {
                    left *= 0.5;
                } else {
                    left *= term;
                }
            }
        } else {
            for k in 0..coeff {
                let term = conc - k as f64;
                if term <= 0.0 {
                    right = 0.0;
                } else {
                    right *= term;
                }
            }
        }
    }
    (left, right)
}

/// Compute forward and reverse likelihoods for every reaction into
/// caller-provided vectors.
///
/// `forward[r] = ke[r] · Π reactants`, `reverse[r] = Π products / ke[r]`,
/// under the side rules described in the module docs.
pub fn compute_likelihoods(
    reader: &ArenaReader<'_>,
    concs: &[f64],
    forward: &mut [f64],
    reverse: &mut [f64],
) -> Result<(), KineticsError> {
    let reactions = reader.dims().reactions;
    check_len(reader.dims().molecules, concs.len())?;
    check_len(reactions, forward.len())?;
    check_len(reactions, reverse.len())?;

    let ke = require(
        reader.floats(SectionId::EquilibriumConstants),
        SectionId::EquilibriumConstants,
    )?;
    let offsets = require(
        reader.ints(SectionId::ReactionOffsets),
        SectionId::ReactionOffsets,
    )?;
    let molecules = require(reader.ints(SectionId::EntryMolecules), SectionId::EntryMolecules)?;
    let coefficients = require(
        reader.ints(SectionId::EntryCoefficients),
        SectionId::EntryCoefficients,
    )?;

    for r in 0..reactions {
        let (left, right) = reaction_sides(offsets, molecules, coefficients, concs, r, 1);
        forward[r] = ke.get(r) * left;
        reverse[r] = right / ke.get(r);
    }
    Ok(())
}

/// Compute likelihoods for every reaction into the arena's workspace
/// sections ([`SectionId::ForwardLikelihoods`] and
/// [`SectionId::ReverseLikelihoods`]).
pub fn update_likelihoods(arena: &mut StateArena, concs: &[f64]) -> Result<(), KineticsError> {
    let (reader, mut workspace) = arena.kernel_split();
    let reactions = reader.dims().reactions;
    check_len(reader.dims().molecules, concs.len())?;

    let ke = require(
        reader.floats(SectionId::EquilibriumConstants),
        SectionId::EquilibriumConstants,
    )?;
    let offsets = require(
        reader.ints(SectionId::ReactionOffsets),
        SectionId::ReactionOffsets,
    )?;
    let molecules = require(reader.ints(SectionId::EntryMolecules), SectionId::EntryMolecules)?;
    let coefficients = require(
        reader.ints(SectionId::EntryCoefficients),
        SectionId::EntryCoefficients,
    )?;

    let (mut fwd, mut rev) = require(
        workspace.floats_mut_pair(
            SectionId::ForwardLikelihoods,
            SectionId::ReverseLikelihoods,
        ),
        SectionId::ForwardLikelihoods,
    )?;
    for r in 0..reactions {
        let (left, right) = reaction_sides(offsets, molecules, coefficients, concs, r, 1);
        fwd.set(r, ke.get(r) * left);
        rev.set(r, right / ke.get(r));
    }
    Ok(())
}

/// Refresh the log-likelihood-ratio workspace sections from the current
/// likelihood sections.
///
/// `forward_log[r] = ln(forward[r] / reverse[r])` and symmetrically for
/// the reverse ratio, with the sentinel masking both the zero
/// denominator and the log of a non-positive ratio.
pub fn update_log_ratios(arena: &mut StateArena) -> Result<(), KineticsError> {
    let reactions = arena.reaction_count();
    let forward = require(
        arena.floats(SectionId::ForwardLikelihoods),
        SectionId::ForwardLikelihoods,
    )?
    .to_vec(reactions);
    let reverse = require(
        arena.floats(SectionId::ReverseLikelihoods),
        SectionId::ReverseLikelihoods,
    )?
    .to_vec(reactions);

    let log_of = |ratio: f64| if ratio > 0.0 { ratio.ln() } else { 0.0 };

    let mut fwd_log = require(
        arena.floats_mut(SectionId::ForwardLogRatios),
        SectionId::ForwardLogRatios,
    )?;
    for r in 0..reactions {
        fwd_log.set(r, log_of(likelihood_ratio(forward[r], reverse[r])));
    }
    let mut rev_log = require(
        arena.floats_mut(SectionId::ReverseLogRatios),
        SectionId::ReverseLogRatios,
    )?;
    for r in 0..reactions {
        rev_log.set(r, log_of(likelihood_ratio(reverse[r], forward[r])));
    }
    Ok(())
}

/// The single-reaction quotient used by the Monte Carlo chooser after a
/// candidate reaction is selected.
///
/// For the reverse direction the equilibrium constant is reciprocated
/// and the coefficient signs flip, so products take the reactant role.
/// The quotient's zero denominator is masked by the sentinel.
pub fn likelihood_postselection(
    arena: &StateArena,
    concs: &[f64],
    direction: Direction,
    reaction: usize,
) -> Result<f64, KineticsError> {
    let reactions = arena.reaction_count();
    if reaction >= reactions {
        return Err(KineticsError::ReactionOutOfRange {
            reaction,
            limit: reactions,
        });
    }
    check_len(arena.molecule_count(), concs.len())?;

    let ke = require(
        arena.floats(SectionId::EquilibriumConstants),
        SectionId::EquilibriumConstants,
    )?;
    let offsets = require(
        arena.ints(SectionId::ReactionOffsets),
        SectionId::ReactionOffsets,
    )?;
    let molecules = require(arena.ints(SectionId::EntryMolecules), SectionId::EntryMolecules)?;
    let coefficients = require(
        arena.ints(SectionId::EntryCoefficients),
        SectionId::EntryCoefficients,
    )?;

    let eq_k = match direction {
        Direction::Forward => ke.get(reaction),
        Direction::Reverse => 1.0 / ke.get(reaction),
    };
    let (left, right) = reaction_sides(
        offsets,
        molecules,
        coefficients,
        concs,
        reaction,
        direction.coefficient_sign(),
    );
    Ok(likelihood_ratio(eq_k * left, right))
}

/// Fill the cumulative post-selection section: `ps[0] = 0` and
/// `ps[r + 1] = ps[r] + likelihood(r)`. Returns the total, which the
/// Monte Carlo chooser uses to scale its selection draw.
pub fn update_postselection(
    arena: &mut StateArena,
    concs: &[f64],
    direction: Direction,
) -> Result<f64, KineticsError> {
    let reactions = arena.reaction_count();
    let mut cumulative = Vec::with_capacity(reactions + 1);
    cumulative.push(0.0);
    let mut total = 0.0;
    for r in 0..reactions {
        total += likelihood_postselection(arena, concs, direction, r)?;
        cumulative.push(total);
    }
    let mut section = require(
        arena.floats_mut(SectionId::PostselectionLikelihoods),
        SectionId::PostselectionLikelihoods,
    )?;
    section.copy_from(&cumulative);
    Ok(total)
}
