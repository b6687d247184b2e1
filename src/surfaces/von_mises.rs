//! Von Mises (J2) surface
//!
//! σ_eq = √(3 J2). Pressure insensitive; the initial threshold is the
//! compression yield stress.

use super::{EquivalentStress, PlasticPotential, YieldSurface};
use crate::error::CLResult;
use crate::math::invariants::{assemble_gradient, StressInvariants};
use crate::math::Vec6;
use crate::properties::MaterialProperties;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VonMises;

impl VonMises {
    fn gradient(stress: &Vec6) -> Vec6 {
        let inv = StressInvariants::new(stress);
        assemble_gradient(&inv, 0.0, 3.0_f64.sqrt(), 0.0)
    }
}

impl EquivalentStress for VonMises {
    fn equivalent_stress(
        &self,
        stress: &Vec6,
        _strain: &Vec6,
        _props: &MaterialProperties,
    ) -> CLResult<f64> {
        let inv = StressInvariants::new(stress);
        Ok((3.0 * inv.j2).sqrt())
    }

    fn initial_threshold(&self, props: &MaterialProperties) -> CLResult<f64> {
        Ok(props.compression_yield()?.abs())
    }
}

impl YieldSurface for VonMises {
    fn yield_derivative(&self, stress: &Vec6, _props: &MaterialProperties) -> CLResult<Vec6> {
        Ok(Self::gradient(stress))
    }
}

impl PlasticPotential for VonMises {
    fn potential_derivative(&self, stress: &Vec6, _props: &MaterialProperties) -> CLResult<Vec6> {
        Ok(Self::gradient(stress))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surfaces::test_support::{general_stress, numerical_gradient, properties};
    use approx::assert_relative_eq;

    #[test]
    fn test_uniaxial_equivalent_stress() {
        let props = properties();
        let sigma = Vec6::new(-250.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let eq = VonMises.equivalent_stress(&sigma, &Vec6::zeros(), &props).unwrap();
        assert_relative_eq!(eq, 250.0, epsilon = 1e-10);
        assert_relative_eq!(VonMises.initial_threshold(&props).unwrap(), 30.0);
    }

    #[test]
    fn test_gradient_matches_finite_difference() {
        let props = properties();
        let sigma = general_stress();
        let grad = VonMises.yield_derivative(&sigma, &props).unwrap();
        let fd = numerical_gradient(&VonMises, &sigma, &props);
        for k in 0..6 {
            assert_relative_eq!(grad[k], fd[k], epsilon = 1e-6);
        }
        assert_eq!(grad, VonMises.potential_derivative(&sigma, &props).unwrap());
    }

    #[test]
    fn test_hydrostatic_gradient_is_zero() {
        let props = properties();
        let sigma = Vec6::new(10.0, 10.0, 10.0, 0.0, 0.0, 0.0);
        assert_eq!(VonMises.yield_derivative(&sigma, &props).unwrap(), Vec6::zeros());
    }
}
