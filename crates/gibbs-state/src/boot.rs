//! The boot structure: everything an arena build consumes, staged in
//! ordinary owned collections.
//!
//! A [`BootState`] exists only between network assembly and
//! [`StateArena::build`](crate::arena::StateArena::build). After the
//! build, all access goes through the arena's computed offsets; the
//! boot structure is never consulted again.

use gibbs_core::{ConfigError, MoleculeId, SimConfig};
use gibbs_network::Network;

use crate::layout::Dimensions;

/// Default byte stride of one auxiliary file-name slot.
pub const DEFAULT_FILENAME_BYTES: usize = 128;

/// One initial-concentration assignment from the upstream parser.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeciesInit {
    /// Molecule name.
    pub molecule: String,
    /// Compartment name; empty for the global compartment.
    pub compartment: String,
    /// Initial concentration.
    pub concentration: f64,
    /// Whether the simulation may change this species.
    pub variable: bool,
    /// Whether this species is its compartment's solvent.
    pub solvent: bool,
}

impl SpeciesInit {
    /// A variable, non-solvent assignment.
    pub fn new(molecule: &str, compartment: &str, concentration: f64) -> Self {
        Self {
            molecule: molecule.to_string(),
            compartment: compartment.to_string(),
            concentration,
            variable: true,
            solvent: false,
        }
    }

    /// Mark the species fixed: its concentration never changes and its
    /// flux is pinned to zero.
    pub fn fixed(mut self) -> Self {
        self.variable = false;
        self
    }

    /// Mark the species as the compartment solvent.
    pub fn solvent(mut self) -> Self {
        self.solvent = true;
        self
    }
}

/// Staging record for a fresh arena build.
#[derive(Clone, Debug)]
pub struct BootState {
    /// Scalar configuration.
    pub config: SimConfig,
    /// The assembled reaction network.
    pub network: Network,
    /// Initial concentrations, one per unique molecule.
    pub concentrations: Vec<f64>,
    /// Boundary-flux concentrations, one per unique molecule.
    pub boundary_flux: Vec<f64>,
    /// Standard free-energy changes, one per reaction.
    pub dg0s: Vec<f64>,
    /// Equilibrium constants, one per reaction.
    pub kes: Vec<f64>,
    /// Regulation activities, one per reaction.
    pub activities: Vec<f64>,
    /// Run file names for the auxiliary echo table (at most
    /// [`FILE_SLOTS`](crate::layout::FILE_SLOTS); longer lists are
    /// truncated at build).
    pub file_names: Vec<String>,
    /// Pathway description text.
    pub pathway: String,
    /// Likelihood view history length (verbose workspace tail).
    pub view_history: usize,
    /// Whether to materialize the auxiliary echo region.
    pub verbose: bool,
    /// Seed for the two arena RNG blobs.
    pub rng_seed: u64,
}

impl BootState {
    /// Stage a boot record for a network: zero concentrations, unit
    /// equilibrium constants, unit activities.
    pub fn new(network: Network, config: SimConfig) -> Self {
        let molecules = network.molecule_count();
        let reactions = network.reaction_count();
        Self {
            config,
            network,
            concentrations: vec![0.0; molecules],
            boundary_flux: vec![0.0; molecules],
            dg0s: vec![0.0; reactions],
            kes: vec![1.0; reactions],
            activities: vec![1.0; reactions],
            file_names: Vec::new(),
            pathway: String::new(),
            view_history: 0,
            verbose: false,
            rng_seed: 0,
        }
    }

    /// Set a reaction's standard free-energy change and derive its
    /// equilibrium constant from the configured temperature.
    pub fn set_dg0(&mut self, reaction: usize, dg0: f64) {
        self.dg0s[reaction] = dg0;
        self.kes[reaction] = self.config.ke_from_dg0(dg0);
    }

    /// Set a reaction's equilibrium constant directly.
    pub fn set_equilibrium_constant(&mut self, reaction: usize, ke: f64) {
        self.kes[reaction] = ke;
    }

    /// Apply one initial-concentration assignment.
    ///
    /// Returns the molecule's directory index, or `None` when the
    /// species is absent — the non-fatal lookup-miss sentinel the
    /// caller decides how to handle.
    pub fn apply_species(&mut self, init: &SpeciesInit) -> Option<MoleculeId> {
        let compartment = self.network.compartments.lookup(&init.compartment)?;
        let id = self.network.molecules.lookup(&init.molecule, compartment)?;
        self.concentrations[id.0 as usize] = init.concentration;
        self.network.molecules.set_variable(id, init.variable);
        self.network.molecules.set_solvent(id, init.solvent);
        Some(id)
    }

    /// Apply a batch of assignments, returning the indices of the ones
    /// whose species could not be found.
    pub fn apply_all(&mut self, inits: &[SpeciesInit]) -> Vec<usize> {
        inits
            .iter()
            .enumerate()
            .filter(|(_, init)| self.apply_species(init).is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Seed concentrations from per-molecule partition weights.
    ///
    /// Each molecule receives `total * weight / sum(weights)`. A
    /// non-positive weight sum is a fatal configuration error.
    pub fn seed_from_partition_weights(
        &mut self,
        weights: &[f64],
        total: f64,
    ) -> Result<(), ConfigError> {
        let sum: f64 = weights.iter().sum();
        if sum <= 0.0 {
            return Err(ConfigError::NonPositivePartitionSum { sum });
        }
        for (conc, &weight) in self.concentrations.iter_mut().zip(weights) {
            *conc = total * weight / sum;
        }
        Ok(())
    }

    /// Per-molecule `(conc_to_count, count_to_conc)` conversion factors
    /// from compartment volumes and Avogadro's number.
    pub fn conversion_factors(&self) -> (Vec<f64>, Vec<f64>) {
        let mut conc_to_count = Vec::with_capacity(self.network.molecule_count());
        let mut count_to_conc = Vec::with_capacity(self.network.molecule_count());
        for record in self.network.molecules.records() {
            let volume = self
                .network
                .compartments
                .volume(record.compartment)
                .unwrap_or(self.config.default_volume);
            conc_to_count.push(self.config.conc_to_count(volume));
            count_to_conc.push(self.config.count_to_conc(volume));
        }
        (conc_to_count, count_to_conc)
    }

    /// The layout dimensions this boot record implies.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            reactions: self.network.reaction_count(),
            molecules: self.network.molecule_count(),
            entries: self.network.entry_count(),
            compartments: self.network.compartment_count(),
            name_bytes: self.network.molecules.text().byte_len(),
            title_bytes: self.network.titles.byte_len(),
            pathway_bytes: if self.pathway.is_empty() {
                0
            } else {
                self.pathway.len() + 1
            },
            compartment_text_bytes: self.network.compartments.text().byte_len(),
            max_filename_bytes: DEFAULT_FILENAME_BYTES,
            view_history: self.view_history,
            verbose: self.verbose,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use gibbs_network::ParsedReaction;

    fn boot() -> BootState {
        let reactions = vec![ParsedReaction::new("A + B => C")
            .with("A", "", -1)
            .with("B", "", -1)
            .with("C", "", 1)];
        let network = Network::assemble(&reactions, &[], SimConfig::DEFAULT_VOLUME);
        BootState::new(network, SimConfig::default())
    }

    #[test]
    fn apply_species_sets_concentration_and_flags() {
        let mut boot = boot();
        let id = boot
            .apply_species(&SpeciesInit::new("B", "", 3.0).fixed())
            .unwrap();
        assert_eq!(boot.concentrations[id.0 as usize], 3.0);
        assert!(!boot.network.molecules.get(id).unwrap().variable);
    }

    #[test]
    fn apply_all_reports_misses() {
        let mut boot = boot();
        let inits = vec![
            SpeciesInit::new("A", "", 1.0),
            SpeciesInit::new("missing", "", 1.0),
            SpeciesInit::new("C", "nowhere", 1.0),
        ];
        assert_eq!(boot.apply_all(&inits), vec![1, 2]);
    }

    #[test]
    fn solvent_flag_reaches_the_directory() {
        let mut boot = boot();
        let id = boot
            .apply_species(&SpeciesInit::new("A", "", 55.0).solvent())
            .unwrap();
        assert!(boot.network.molecules.get(id).unwrap().solvent);
    }

    #[test]
    fn partition_weights_normalize() {
        let mut boot = boot();
        boot.seed_from_partition_weights(&[1.0, 1.0, 2.0], 8.0).unwrap();
        assert_eq!(boot.concentrations, vec![2.0, 2.0, 4.0]);
    }

    #[test]
    fn non_positive_weight_sum_is_fatal() {
        let mut boot = boot();
        let err = boot.seed_from_partition_weights(&[0.0, 0.0, 0.0], 1.0);
        assert_eq!(
            err,
            Err(ConfigError::NonPositivePartitionSum { sum: 0.0 })
        );
    }

    #[test]
    fn dg0_zero_gives_unit_ke() {
        let mut boot = boot();
        boot.set_dg0(0, 0.0);
        assert!((boot.kes[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn conversion_factors_are_reciprocal_pairs() {
        let boot = boot();
        let (to_count, to_conc) = boot.conversion_factors();
        for (a, b) in to_count.iter().zip(&to_conc) {
            assert!((a * b - 1.0).abs() < 1e-9);
        }
    }
}
