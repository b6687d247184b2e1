//! Tresca (maximum shear) surface: σ_eq = 2 cos θ √J2 = σ1 - σ3

use super::{EquivalentStress, PlasticPotential, YieldSurface};
use crate::error::CLResult;
use crate::math::invariants::{assemble_gradient, lode_coefficients, StressInvariants};
use crate::math::Vec6;
use crate::properties::MaterialProperties;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tresca;

impl Tresca {
    fn gradient(stress: &Vec6) -> Vec6 {
        let inv = StressInvariants::new(stress);
        let sqrt_j2 = inv.j2.sqrt();
        let theta = inv.lode_angle;
        let (c2, c3) = lode_coefficients(&inv, 2.0 * theta.cos(), -2.0 * sqrt_j2 * theta.sin());
        assemble_gradient(&inv, 0.0, c2, c3)
    }
}

impl EquivalentStress for Tresca {
    fn equivalent_stress(
        &self,
        stress: &Vec6,
        _strain: &Vec6,
        _props: &MaterialProperties,
    ) -> CLResult<f64> {
        let inv = StressInvariants::new(stress);
        Ok(2.0 * inv.lode_angle.cos() * inv.j2.sqrt())
    }

    fn initial_threshold(&self, props: &MaterialProperties) -> CLResult<f64> {
        Ok(props.compression_yield()?.abs())
    }
}

impl YieldSurface for Tresca {
    fn yield_derivative(&self, stress: &Vec6, _props: &MaterialProperties) -> CLResult<Vec6> {
        Ok(Self::gradient(stress))
    }
}

impl PlasticPotential for Tresca {
    fn potential_derivative(&self, stress: &Vec6, _props: &MaterialProperties) -> CLResult<Vec6> {
        Ok(Self::gradient(stress))
    }
}
