//! Per-molecule flux aggregation.
//!
//! [`FluxKernel::compute`] turns the per-reaction likelihoods into one
//! signed concentration-change rate per molecule by walking the
//! molecule-major matrix. Molecules flagged non-variable receive
//! exactly zero flux under every strategy — fixed species are pinned no
//! matter what the likelihoods say.

use gibbs_core::{ConfigError, SimConfig};
use gibbs_state::{SectionId, StateArena};

use crate::error::KineticsError;
use crate::likelihood::update_likelihoods;

/// The closed set of flux approximation variants.
///
/// Selected once at configuration time; each variant is one arm of the
/// kernel, never mixed at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FluxStrategy {
    /// Concentration input; each reaction contributes its net
    /// likelihood `forward − reverse`, scaled by the molecule's
    /// coefficient.
    Gradient,
    /// Concentration input; damped net term `frl · (1 − rrl)` signed by
    /// the coefficient and normalized by the base reaction's forward
    /// likelihood.
    BaseNormalized,
    /// Count input: counts are converted to concentrations through the
    /// arena's per-molecule factors before the gradient aggregation.
    CountGradient,
    /// Gradient with equilibrium constants corrected multiplicatively
    /// by compartment volumes raised to each entry's coefficient.
    VolumeScaled,
    /// Gradient with an externally supplied per-reaction activity
    /// vector multiplying each reaction's net term.
    Regulated,
}

impl FluxStrategy {
    /// Every strategy variant.
    pub const ALL: [FluxStrategy; 5] = [
        FluxStrategy::Gradient,
        FluxStrategy::BaseNormalized,
        FluxStrategy::CountGradient,
        FluxStrategy::VolumeScaled,
        FluxStrategy::Regulated,
    ];

    /// Whether this strategy normalizes by the base reaction.
    pub fn needs_base_reaction(self) -> bool {
        matches!(self, FluxStrategy::BaseNormalized)
    }
}

/// The configured flux kernel.
///
/// Construction validates the base reaction index for strategies that
/// depend on it; the zero-likelihood check can only happen per
/// evaluation, since it depends on the concentrations.
#[derive(Clone, Copy, Debug)]
pub struct FluxKernel {
    strategy: FluxStrategy,
    base_reaction: usize,
    flux_scale: f64,
}

impl FluxKernel {
    /// Configure a kernel.
    ///
    /// Fatal [`ConfigError::BaseReactionOutOfRange`] if the strategy
    /// needs a base reaction and the configured index is outside
    /// `[0, reaction_count)`.
    pub fn new(
        config: &SimConfig,
        strategy: FluxStrategy,
        reaction_count: usize,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if strategy.needs_base_reaction() && config.base_reaction >= reaction_count {
            return Err(ConfigError::BaseReactionOutOfRange {
                reaction: config.base_reaction,
                limit: reaction_count,
            });
        }
        Ok(Self {
            strategy,
            base_reaction: config.base_reaction,
            flux_scale: config.flux_scale,
        })
    }

    /// The configured strategy.
    pub fn strategy(&self) -> FluxStrategy {
        self.strategy
    }

    /// Compute the per-molecule flux vector.
    ///
    /// `input` is a concentration vector, or a count vector for
    /// [`FluxStrategy::CountGradient`]. The likelihood workspace
    /// sections are refreshed as a side effect. `regulation` is
    /// consumed as a pure input by [`FluxStrategy::Regulated`] and
    /// ignored otherwise.
    pub fn compute(
        &self,
        arena: &mut StateArena,
        input: &[f64],
        regulation: Option<&[f64]>,
        flux: &mut [f64],
    ) -> Result<(), KineticsError> {
        let molecules = arena.molecule_count();
        let reactions = arena.reaction_count();
        check_len(molecules, input.len())?;
        check_len(molecules, flux.len())?;
        if let Some(activities) = regulation {
            check_len(reactions, activities.len())?;
        }
        let activities = match self.strategy {
            FluxStrategy::Regulated => {
                Some(regulation.ok_or(KineticsError::MissingRegulation)?)
            }
            _ => None,
        };

        // Count input converts to concentrations before anything else.
        let concs: Vec<f64> = match self.strategy {
            FluxStrategy::CountGradient => {
                let factors = require(
                    arena.floats(SectionId::CountToConc),
                    SectionId::CountToConc,
                )?;
                input
                    .iter()
                    .enumerate()
                    .map(|(i, &count)| count * factors.get(i))
                    .collect()
            }
            _ => input.to_vec(),
        };

        update_likelihoods(arena, &concs)?;
        if self.strategy == FluxStrategy::VolumeScaled {
            self.apply_volume_correction(arena)?;
        }

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

        let recip_frb = if self.strategy.needs_base_reaction() {
            let frb = forward[self.base_reaction];
            if frb == 0.0 {
                return Err(ConfigError::ZeroBaseLikelihood {
                    reaction: self.base_reaction,
                }
                .into());
            }
            1.0 / frb
        } else {
            1.0
        };

        let offsets = require(
            arena.ints(SectionId::MoleculeOffsets),
            SectionId::MoleculeOffsets,
        )?;
        let rxn_indices = require(
            arena.ints(SectionId::MoleculeReactions),
            SectionId::MoleculeReactions,
        )?;
        let coefficients = require(
            arena.ints(SectionId::MoleculeCoefficients),
            SectionId::MoleculeCoefficients,
        )?;

        for i in 0..molecules {
            if !arena.molecule_variable(i) {
                flux[i] = 0.0;
                continue;
            }
            let start = offsets.get(i) as usize;
            let end = offsets.get(i + 1) as usize;
            let total = match self.strategy {
                FluxStrategy::BaseNormalized => {
                    let mut forward_acc = 0.0;
                    let mut backward_acc = 0.0;
                    for e in start..end {
                        let r = rxn_indices.get(e) as usize;
                        let frl = forward[r];
                        let rrl = reverse[r];
                        let coeff = coefficients.get(e);
                        if coeff < 0 {
                            forward_acc = -frl;
                            backward_acc += frl * rrl;
                        } else if coeff > 0 {
                            forward_acc += frl;
                            backward_acc -= frl * rrl;
                        }
                    }
                    recip_frb * (forward_acc + backward_acc)
                }
                _ => {
                    let mut acc = 0.0;
                    for e in start..end {
                        let r = rxn_indices.get(e) as usize;
                        let mut net = forward[r] - reverse[r];
                        if let Some(activities) = activities {
                            net *= activities[r];
                        }
                        acc += coefficients.get(e) as f64 * net;
                    }
                    acc
                }
            };
            flux[i] = self.flux_scale * total;
        }
        Ok(())
    }

    /// Multiply each reaction's forward likelihood (and divide its
    /// reverse likelihood) by the compartment-volume correction
    /// `Π recip_volume(compartment)^coefficient` over its entries.
    fn apply_volume_correction(&self, arena: &mut StateArena) -> Result<(), KineticsError> {
        let reactions = arena.reaction_count();
        let entries = arena.dims().entries;
        let offsets = require(
            arena.ints(SectionId::ReactionOffsets),
            SectionId::ReactionOffsets,
        )?
        .to_vec(reactions + 1);
        let compartments = require(
            arena.ints(SectionId::EntryCompartments),
            SectionId::EntryCompartments,
        )?
        .to_vec(entries);
        let coefficients = require(
            arena.ints(SectionId::EntryCoefficients),
            SectionId::EntryCoefficients,
        )?
        .to_vec(entries);

        let mut corrections = Vec::with_capacity(reactions);
        for r in 0..reactions {
            let mut correction = 1.0;
            for e in offsets[r] as usize..offsets[r + 1] as usize {
                let recip_volume = arena.compartment_recip_volume(compartments[e] as usize);
                let coeff = coefficients[e];
                for _ in 0..coeff.abs() {
                    if coeff > 0 {
                        correction *= recip_volume;
                    } else {
                        correction /= recip_volume;
                    }
                }
            }
            corrections.push(correction);
        }

        let mut forward = require(
            arena.floats_mut(SectionId::ForwardLikelihoods),
            SectionId::ForwardLikelihoods,
        )?;
        for r in 0..reactions {
            forward.set(r, forward.get(r) * corrections[r]);
        }
        let mut reverse = require(
            arena.floats_mut(SectionId::ReverseLikelihoods),
            SectionId::ReverseLikelihoods,
        )?;
        for r in 0..reactions {
            reverse.set(r, reverse.get(r) / corrections[r]);
        }
        Ok(())
    }
}

fn require<T>(view: Option<T>, section: SectionId) -> Result<T, KineticsError> {
    view.ok_or(KineticsError::MissingSection { section })
}

fn check_len(expected: usize, actual: usize) -> Result<(), KineticsError> {
    if expected != actual {
        return Err(KineticsError::LengthMismatch { expected, actual });
    }
    Ok(())
}
