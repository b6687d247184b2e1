//! Simo-Ju strain energy norm for isotropic damage
//!
//! σ_eq = (r n + (1 - r)) √(σ·ε) with r the tensile ratio of the principal
//! stresses and n = σc / σt. The measure has units of stress over √E, so
//! the initial threshold is σc / √E.

use super::EquivalentStress;
use crate::error::CLResult;
use crate::math::invariants::tensile_ratio;
use crate::math::Vec6;
use crate::properties::MaterialProperties;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimoJu;

impl EquivalentStress for SimoJu {
    fn equivalent_stress(
        &self,
        stress: &Vec6,
        strain: &Vec6,
        props: &MaterialProperties,
    ) -> CLResult<f64> {
        let n = props.yield_ratio()?;
        let r = tensile_ratio(stress);
        let energy = stress.dot(strain).max(0.0);
        Ok((r * n + (1.0 - r)) * energy.sqrt())
    }

    fn initial_threshold(&self, props: &MaterialProperties) -> CLResult<f64> {
        Ok(props.compression_yield()?.abs() / props.young_modulus.sqrt())
    }
}
