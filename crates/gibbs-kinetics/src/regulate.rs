//! Hill-equation regulation.
//!
//! The reference [`Regulator`] implementation: each reaction carries
//! zero or more Hill terms tied to a regulating species, and its
//! activity is the product of its terms. A reaction with no terms is
//! fully active.

use gibbs_core::{Direction, MoleculeId, Regulator};

/// One Hill regulation term.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HillTerm {
    /// Directory index of the regulating species.
    pub species: MoleculeId,
    /// Half-saturation constant. Must be positive.
    pub constant: f64,
    /// Hill exponent. Must be positive.
    pub exponent: f64,
    /// Activator (`false`) or inhibitor (`true`).
    pub inhibitor: bool,
}

impl HillTerm {
    /// An activator term: activity rises with the species.
    pub fn activator(species: MoleculeId, constant: f64, exponent: f64) -> Self {
        Self {
            species,
            constant,
            exponent,
            inhibitor: false,
        }
    }

    /// An inhibitor term: activity falls as the species rises.
    pub fn inhibitor(species: MoleculeId, constant: f64, exponent: f64) -> Self {
        Self {
            species,
            constant,
            exponent,
            inhibitor: true,
        }
    }

    fn evaluate(&self, concentration: f64) -> f64 {
        let c = concentration.max(0.0).powf(self.exponent);
        let k = self.constant.powf(self.exponent);
        let occupancy = if c + k > 0.0 { c / (c + k) } else { 0.0 };
        if self.inhibitor {
            1.0 - occupancy
        } else {
            occupancy
        }
    }
}

/// Per-reaction Hill regulation tables.
#[derive(Clone, Debug, Default)]
pub struct HillRegulator {
    terms: Vec<Vec<HillTerm>>,
}

impl HillRegulator {
    /// A regulator with no terms for any of `reaction_count` reactions.
    pub fn new(reaction_count: usize) -> Self {
        Self {
            terms: vec![Vec::new(); reaction_count],
        }
    }

    /// Attach a term to a reaction.
    pub fn add_term(&mut self, reaction: usize, term: HillTerm) {
        self.terms[reaction].push(term);
    }

    /// Number of reactions this regulator covers.
    pub fn reaction_count(&self) -> usize {
        self.terms.len()
    }
}

impl Regulator for HillRegulator {
    fn name(&self) -> &str {
        "hill"
    }

    fn activities(&self, concentrations: &[f64], _direction: Direction, out: &mut [f64]) {
        for (slot, terms) in out.iter_mut().zip(&self.terms) {
            *slot = terms
                .iter()
                .map(|t| t.evaluate(concentrations[t.species.0 as usize]))
                .product();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activities_for(reg: &HillRegulator, concs: &[f64]) -> Vec<f64> {
        let mut out = vec![f64::NAN; reg.reaction_count()];
        reg.activities(concs, Direction::Forward, &mut out);
        out
    }

    #[test]
    fn unregulated_reactions_are_fully_active() {
        let reg = HillRegulator::new(3);
        assert_eq!(activities_for(&reg, &[1.0]), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn activator_at_half_saturation_is_one_half() {
        let mut reg = HillRegulator::new(1);
        reg.add_term(0, HillTerm::activator(MoleculeId(0), 2.0, 1.0));
        let acts = activities_for(&reg, &[2.0]);
        assert!((acts[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn inhibitor_is_the_complement() {
        let mut activator = HillRegulator::new(1);
        activator.add_term(0, HillTerm::activator(MoleculeId(0), 3.0, 2.0));
        let mut inhibitor = HillRegulator::new(1);
        inhibitor.add_term(0, HillTerm::inhibitor(MoleculeId(0), 3.0, 2.0));
        let concs = [1.7];
        let a = activities_for(&activator, &concs)[0];
        let i = activities_for(&inhibitor, &concs)[0];
        assert!((a + i - 1.0).abs() < 1e-12);
    }

    #[test]
    fn terms_compose_multiplicatively() {
        let mut reg = HillRegulator::new(1);
        reg.add_term(0, HillTerm::activator(MoleculeId(0), 1.0, 1.0));
        reg.add_term(0, HillTerm::activator(MoleculeId(1), 1.0, 1.0));
        let acts = activities_for(&reg, &[1.0, 1.0]);
        assert!((acts[0] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn absent_species_silences_an_activated_reaction() {
        let mut reg = HillRegulator::new(1);
        reg.add_term(0, HillTerm::activator(MoleculeId(0), 1.0, 2.0));
        assert_eq!(activities_for(&reg, &[0.0]), vec![0.0]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn activities_stay_in_unit_interval(
                conc in 0.0f64..1e6,
                constant in 1e-6f64..1e3,
                exponent in 0.5f64..4.0,
                inhibitor in prop::bool::ANY,
            ) {
                let mut reg = HillRegulator::new(1);
                reg.add_term(
                    0,
                    HillTerm {
                        species: MoleculeId(0),
                        constant,
                        exponent,
                        inhibitor,
                    },
                );
                let act = activities_for(&reg, &[conc])[0];
                prop_assert!((0.0..=1.0).contains(&act));
            }
        }
    }
}
