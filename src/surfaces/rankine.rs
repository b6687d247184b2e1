//! Rankine (maximum principal stress) surface
//!
//! σ_eq = σ1 = I1/3 + (2/√3) √J2 cos(θ + π/6). The threshold is the
//! tension yield stress.

use std::f64::consts::FRAC_PI_6;

use super::{EquivalentStress, PlasticPotential, YieldSurface};
use crate::error::CLResult;
use crate::math::invariants::{
    assemble_gradient, lode_coefficients, principal_stresses, StressInvariants,
};
use crate::math::Vec6;
use crate::properties::MaterialProperties;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rankine;

impl Rankine {
    fn gradient(stress: &Vec6) -> Vec6 {
        let inv = StressInvariants::new(stress);
        let k = 2.0 / 3.0_f64.sqrt();
        let angle = inv.lode_angle + FRAC_PI_6;
        let (c2, c3) = lode_coefficients(&inv, k * angle.cos(), -k * inv.j2.sqrt() * angle.sin());
        assemble_gradient(&inv, 1.0 / 3.0, c2, c3)
    }
}

impl EquivalentStress for Rankine {
    fn equivalent_stress(
        &self,
        stress: &Vec6,
        _strain: &Vec6,
        _props: &MaterialProperties,
    ) -> CLResult<f64> {
        Ok(principal_stresses(stress)[0])
    }

    fn initial_threshold(&self, props: &MaterialProperties) -> CLResult<f64> {
        Ok(props.tension_yield()?.abs())
    }
}

impl YieldSurface for Rankine {
    fn yield_derivative(&self, stress: &Vec6, _props: &MaterialProperties) -> CLResult<Vec6> {
        Ok(Self::gradient(stress))
    }
}

impl PlasticPotential for Rankine {
    fn potential_derivative(&self, stress: &Vec6, _props: &MaterialProperties) -> CLResult<Vec6> {
        Ok(Self::gradient(stress))
    }
}
