//! Simulation configuration parameters.
//!
//! [`SimConfig`] is the single immutable configuration record passed
//! explicitly to every component that needs scalar configuration. There
//! is no process-wide state; validated once at startup.

use crate::error::ConfigError;

/// Immutable scalar configuration for a simulation run.
///
/// Validated at construction via [`SimConfig::validate`]; all values are
/// immutable after creation.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Equilibrium temperature in kelvin. Must be positive.
    pub temperature_kelvin: f64,

    /// Avogadro's number, molecules per mole.
    pub avogadro: f64,

    /// Default compartment volume in liters, used for species in the
    /// global compartment and for compartments declared without a volume.
    pub default_volume: f64,

    /// Global flux-scaling constant: the base reaction's forward rate
    /// constant multiplied by its reactant concentration product.
    /// Supplied at configuration time by the caller's rate model.
    pub flux_scale: f64,

    /// Index of the designated base reaction used by normalized flux
    /// strategies. Usually 0.
    pub base_reaction: usize,
}

impl SimConfig {
    /// Default equilibrium temperature: 298.15 K.
    pub const DEFAULT_TEMPERATURE_KELVIN: f64 = 298.15;

    /// Default Avogadro constant, molecules per mole.
    pub const DEFAULT_AVOGADRO: f64 = 6.022214179e23;

    /// Default compartment volume: one femtoliter.
    pub const DEFAULT_VOLUME: f64 = 1.0e-15;

    /// Ideal gas constant in kcal/(mol·K).
    pub const GAS_CONSTANT_KCAL: f64 = 1.987204118e-3;

    /// Check the configuration's structural invariants.
    ///
    /// Fatal on the first violation; never retried.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.temperature_kelvin <= 0.0 {
            return Err(ConfigError::NonPositiveTemperature {
                kelvin: self.temperature_kelvin,
            });
        }
        Ok(())
    }

    /// RT in kcal/mol at the configured temperature.
    pub fn rt(&self) -> f64 {
        Self::GAS_CONSTANT_KCAL * self.temperature_kelvin
    }

    /// Equilibrium constant from a standard free-energy change in
    /// kcal/mol: `ke = exp(-dg0 / RT)`.
    pub fn ke_from_dg0(&self, dg0: f64) -> f64 {
        (-dg0 / self.rt()).exp()
    }

    /// Count-to-concentration factor for a compartment of the given
    /// volume in liters: `1 / (volume * avogadro)`.
    pub fn count_to_conc(&self, volume: f64) -> f64 {
        1.0 / (volume * self.avogadro)
    }

    /// Concentration-to-count factor for a compartment of the given
    /// volume in liters: `volume * avogadro`.
    pub fn conc_to_count(&self, volume: f64) -> f64 {
        volume * self.avogadro
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            temperature_kelvin: Self::DEFAULT_TEMPERATURE_KELVIN,
            avogadro: Self::DEFAULT_AVOGADRO,
            default_volume: Self::DEFAULT_VOLUME,
            flux_scale: 1.0,
            base_reaction: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn non_positive_temperature_is_fatal() {
        let config = SimConfig {
            temperature_kelvin: 0.0,
            ..SimConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveTemperature { kelvin: 0.0 })
        );
    }

    #[test]
    fn ke_of_zero_dg0_is_one() {
        let config = SimConfig::default();
        assert!((config.ke_from_dg0(0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn count_conversion_factors_are_reciprocal() {
        let config = SimConfig::default();
        let v = 2.5e-15;
        let product = config.count_to_conc(v) * config.conc_to_count(v);
        assert!((product - 1.0).abs() < 1e-12);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn conversion_reciprocal_for_any_volume(v in 1.0e-18f64..1.0e-9) {
                let config = SimConfig::default();
                let product = config.count_to_conc(v) * config.conc_to_count(v);
                prop_assert!((product - 1.0).abs() < 1e-9);
            }

            #[test]
            fn ke_decreases_with_dg0(dg0 in 0.1f64..50.0) {
                let config = SimConfig::default();
                prop_assert!(config.ke_from_dg0(dg0) < 1.0);
                prop_assert!(config.ke_from_dg0(-dg0) > 1.0);
            }
        }
    }
}
