//! Yield surfaces, plastic potentials and equivalent stress measures
//!
//! All strategies are stateless unit structs: every parameter (yield
//! stresses, friction and dilatancy angles) is read from the
//! [`MaterialProperties`] passed in. Gradients are returned in Voigt form
//! with the shear entries acting on engineering strains, so that
//! `∂f/∂σ · Δσ` is the directional derivative of `f`.
//!
//! Plasticity is associative when the same strategy type is used as yield
//! surface and plastic potential.

pub mod drucker_prager;
pub mod rankine;
pub mod simo_ju;
pub mod tresca;
pub mod von_mises;

pub use drucker_prager::DruckerPrager;
pub use rankine::Rankine;
pub use simo_ju::SimoJu;
pub use tresca::Tresca;
pub use von_mises::VonMises;

use std::fmt::Debug;

use crate::error::{CLError, CLResult};
use crate::math::Vec6;
use crate::properties::{MaterialProperties, SofteningType};

/// Scalar stress measure compared against a threshold
pub trait EquivalentStress: Debug + Clone + Default + Send + Sync {
    /// Equivalent stress of `stress`; strain-driven measures also read `strain`
    fn equivalent_stress(
        &self,
        stress: &Vec6,
        strain: &Vec6,
        props: &MaterialProperties,
    ) -> CLResult<f64>;

    /// Threshold of the virgin material
    fn initial_threshold(&self, props: &MaterialProperties) -> CLResult<f64>;

    /// Softening parameter A of the isotropic damage laws
    ///
    /// Regularized with the fracture energy over the characteristic length.
    fn damage_parameter(
        &self,
        props: &MaterialProperties,
        characteristic_length: f64,
        softening: SofteningType,
    ) -> CLResult<f64> {
        let gf = props.tension_fracture_energy()?;
        let sigma_c = props.compression_yield()?;
        let n = props.yield_ratio()?;
        let e = props.young_modulus;
        let limit = 2.0 * e * gf * n * n / (sigma_c * sigma_c);
        if characteristic_length >= limit {
            return Err(CLError::FractureEnergyTooLow {
                characteristic_length,
                limit,
            });
        }
        let a = match softening {
            SofteningType::Exponential => {
                1.0 / (gf * n * n * e / (characteristic_length * sigma_c * sigma_c) - 0.5)
            }
            SofteningType::Linear => {
                -(sigma_c * sigma_c) / (2.0 * e * gf * n * n / characteristic_length)
            }
        };
        Ok(a)
    }
}

/// Yield function f(σ) = σ_eq(σ) - threshold with its stress gradient
pub trait YieldSurface: EquivalentStress {
    /// ∂f/∂σ
    fn yield_derivative(&self, stress: &Vec6, props: &MaterialProperties) -> CLResult<Vec6>;
}

/// Flow direction of the plastic strain
pub trait PlasticPotential: Debug + Clone + Default + Send + Sync {
    /// ∂g/∂σ
    fn potential_derivative(&self, stress: &Vec6, props: &MaterialProperties) -> CLResult<Vec6>;
}


#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exponential_damage_parameter() {
        let props = MaterialProperties::new(30.0e3, 0.2)
            .with_yield_stress(3.0)
            .with_fracture_energy(0.1);
        let a = VonMises
            .damage_parameter(&props, 10.0, SofteningType::Exponential)
            .unwrap();
        // 1 / (Gf E / (lc σ²) - 0.5) = 1 / (300 / 90 - 0.5)
        assert_relative_eq!(a, 1.0 / (300.0 / 90.0 - 0.5), epsilon = 1e-12);
    }

    #[test]
    fn test_fracture_energy_too_low() {
        let props = MaterialProperties::new(30.0e3, 0.2)
            .with_yield_stress(3.0)
            .with_fracture_energy(0.1);
        // limit = 2 E Gf / σ² = 666.7
        let err = VonMises
            .damage_parameter(&props, 1000.0, SofteningType::Linear)
            .unwrap_err();
        assert!(matches!(err, CLError::FractureEnergyTooLow { .. }));
    }
}
