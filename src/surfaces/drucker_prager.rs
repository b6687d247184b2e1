//! Drucker-Prager cone
//!
//! σ_eq = CFL (2 sinφ I1 / (√3 (3 - sinφ)) + √J2) with
//! CFL = √3 (3 - sinφ) / (3 (1 - sinφ)), scaled so that uniaxial
//! compression returns the compressive stress. The plastic potential has
//! the same form with the dilatancy angle ψ in place of φ.

use super::{EquivalentStress, PlasticPotential, YieldSurface};
use crate::error::{CLError, CLResult};
use crate::math::invariants::{assemble_gradient, StressInvariants};
use crate::math::Vec6;
use crate::properties::MaterialProperties;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DruckerPrager;

/// (c1, c2) multipliers of ∂I1/∂σ and ∂√J2/∂σ for the angle with sine `sin`
fn cone_coefficients(sin: f64) -> CLResult<(f64, f64)> {
    if !(sin.abs() < 1.0) {
        return Err(CLError::InvalidProperty {
            name: "friction_angle",
            reason: "must lie in (-90, 90) degrees".to_string(),
        });
    }
    let cfl = -3.0_f64.sqrt() * (3.0 - sin) / (3.0 * sin - 3.0);
    let c1 = cfl * 2.0 * sin / (3.0_f64.sqrt() * (3.0 - sin));
    Ok((c1, cfl))
}

impl EquivalentStress for DruckerPrager {
    fn equivalent_stress(
        &self,
        stress: &Vec6,
        _strain: &Vec6,
        props: &MaterialProperties,
    ) -> CLResult<f64> {
        let inv = StressInvariants::new(stress);
        let (c1, c2) = cone_coefficients(props.friction_angle_rad()?.sin())?;
        Ok(c1 * inv.i1 + c2 * inv.j2.sqrt())
    }

    fn initial_threshold(&self, props: &MaterialProperties) -> CLResult<f64> {
        let sin = props.friction_angle_rad()?.sin();
        let sigma_t = props.tension_yield()?;
        Ok((sigma_t * (3.0 + sin) / (3.0 * sin - 3.0)).abs())
    }
}

impl YieldSurface for DruckerPrager {
    fn yield_derivative(&self, stress: &Vec6, props: &MaterialProperties) -> CLResult<Vec6> {
        let inv = StressInvariants::new(stress);
        let (c1, c2) = cone_coefficients(props.friction_angle_rad()?.sin())?;
        Ok(assemble_gradient(&inv, c1, c2, 0.0))
    }
}

impl PlasticPotential for DruckerPrager {
    fn potential_derivative(&self, stress: &Vec6, props: &MaterialProperties) -> CLResult<Vec6> {
        let inv = StressInvariants::new(stress);
        // associative when no dilatancy angle is given
        let psi = props
            .dilatancy_angle_rad()
            .or_else(|_| props.friction_angle_rad())?;
        let (c1, c2) = cone_coefficients(psi.sin())?;
        Ok(assemble_gradient(&inv, c1, c2, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surfaces::test_support::{general_stress, numerical_gradient, properties};
    use approx::assert_relative_eq;

    #[test]
    fn test_uniaxial_compression_is_calibrated() {
        let props = properties();
        let sigma = Vec6::new(0.0, 0.0, -30.0, 0.0, 0.0, 0.0);
        let eq = DruckerPrager
            .equivalent_stress(&sigma, &Vec6::zeros(), &props)
            .unwrap();
        assert_relative_eq!(eq, 30.0, epsilon = 1e-10);
    }

    #[test]
    fn test_pressure_sensitivity() {
        let props = properties();
        let strain = Vec6::zeros();
        let tension = Vec6::new(10.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let eq_t = DruckerPrager.equivalent_stress(&tension, &strain, &props).unwrap();
        let eq_c = DruckerPrager.equivalent_stress(&(-tension), &strain, &props).unwrap();
        assert!(eq_t > eq_c);
    }

    #[test]
    fn test_gradient_matches_finite_difference() {
        let props = properties();
        let sigma = general_stress();
        let grad = DruckerPrager.yield_derivative(&sigma, &props).unwrap();
        let fd = numerical_gradient(&DruckerPrager, &sigma, &props);
        for k in 0..6 {
            assert_relative_eq!(grad[k], fd[k], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_non_associative_potential() {
        let props = properties();
        let sigma = general_stress();
        let f = DruckerPrager.yield_derivative(&sigma, &props).unwrap();
        let g = DruckerPrager.potential_derivative(&sigma, &props).unwrap();
        // smaller dilatancy means less volumetric flow
        assert!(g[0] + g[1] + g[2] < f[0] + f[1] + f[2]);

        let associative = MaterialProperties::new(30.0e3, 0.2)
            .with_yield_stress(3.0)
            .with_angles(30.0, 30.0);
        assert_eq!(
            DruckerPrager.yield_derivative(&sigma, &associative).unwrap(),
            DruckerPrager.potential_derivative(&sigma, &associative).unwrap()
        );
    }
}
