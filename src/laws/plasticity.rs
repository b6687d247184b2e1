//! Generic plasticity law
//!
//! Parameterized by a yield surface `Y` and a plastic potential `G`; using
//! the same type for both gives associative flow. The hardening rule
//! selects isotropic hardening or isotropic plus kinematic hardening.

use super::{ConstitutiveLaw, Kinematics, PointResponse};
use crate::error::{CLError, CLResult};
use crate::integrators::{integrate_plasticity, HardeningRule, PointInput};
use crate::math::{Dimension, Vec6};
use crate::parameters::Parameters;
use crate::properties::MaterialProperties;
use crate::state::{InternalLayout, InternalState};
use crate::surfaces::{PlasticPotential, YieldSurface};
use crate::variables::{Variable, PLASTICITY_VARIABLES};

#[derive(Debug, Clone)]
pub struct PlasticityLaw<Y, G> {
    yield_surface: Y,
    potential: G,
    rule: HardeningRule,
    dimension: Dimension,
    kinematics: Kinematics,
    state: InternalState,
}

impl<Y, G> PlasticityLaw<Y, G>
where
    Y: YieldSurface,
    G: PlasticPotential,
{
    pub fn new(rule: HardeningRule, dimension: Dimension, kinematics: Kinematics) -> Self {
        Self {
            yield_surface: Y::default(),
            potential: G::default(),
            rule,
            dimension,
            kinematics,
            state: InternalState::default(),
        }
    }

    /// Isotropic hardening law
    pub fn isotropic(dimension: Dimension, kinematics: Kinematics) -> Self {
        Self::new(HardeningRule::Isotropic, dimension, kinematics)
    }

    /// Kinematic hardening law
    pub fn kinematic(dimension: Dimension, kinematics: Kinematics) -> Self {
        Self::new(HardeningRule::Kinematic, dimension, kinematics)
    }

    pub fn rule(&self) -> HardeningRule {
        self.rule
    }
}

impl<Y, G> ConstitutiveLaw for PlasticityLaw<Y, G>
where
    Y: YieldSurface + 'static,
    G: PlasticPotential + 'static,
{
    fn dimension(&self) -> Dimension {
        self.dimension
    }

    fn kinematics(&self) -> Kinematics {
        self.kinematics
    }

    fn capabilities(&self) -> &'static [Variable] {
        PLASTICITY_VARIABLES
    }

    fn layout(&self) -> InternalLayout {
        InternalLayout::Plasticity
    }

    fn state(&self) -> &InternalState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut InternalState {
        &mut self.state
    }

    fn check(&self, props: &MaterialProperties) -> CLResult<()> {
        props.check_inelastic()?;
        props.check_hardening()?;
        self.yield_surface.initial_threshold(props)?;
        if self.rule == HardeningRule::Kinematic {
            props
                .kinematic_hardening
                .ok_or(CLError::MissingProperty("kinematic_hardening"))?;
        }
        Ok(())
    }

    fn integrate(&self, strain: &Vec6, params: &Parameters) -> CLResult<PointResponse> {
        let elastic = params.properties.elastic_matrix();
        let input = PointInput {
            elastic: &elastic,
            strain,
            state: &self.state,
            props: params.properties,
            characteristic_length: params.characteristic_length,
        };
        let result = integrate_plasticity(&self.yield_surface, &self.potential, self.rule, &input)?;
        Ok(PointResponse {
            stress: result.stress,
            state: result.state,
            secant_factor: 1.0,
        })
    }

    fn equivalent_stress(
        &self,
        stress: &Vec6,
        strain: &Vec6,
        props: &MaterialProperties,
    ) -> CLResult<Option<f64>> {
        self.yield_surface
            .equivalent_stress(stress, strain, props)
            .map(Some)
    }

    fn has_back_stress(&self) -> bool {
        self.rule == HardeningRule::Kinematic
    }

    fn boxed_clone(&self) -> Box<dyn ConstitutiveLaw> {
        Box::new(self.clone())
    }
}

/// Plasticity law with associative flow
pub type AssociativePlasticityLaw<S> = PlasticityLaw<S, S>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec;
    use crate::parameters::StressMeasure;
    use crate::properties::HardeningCurve;
    use crate::surfaces::VonMises;
    use approx::assert_relative_eq;

    fn props() -> MaterialProperties {
        MaterialProperties::new(200e9, 0.3)
            .with_yield_stress(250e6)
            .with_linear_hardening(10e9)
    }

    fn uniaxial(value: f64) -> Vec {
        Vec::from_vec(vec![value, 0.0, 0.0, 0.0, 0.0, 0.0])
    }

    #[test]
    fn test_calculate_does_not_commit() {
        let props = props();
        let law = AssociativePlasticityLaw::<VonMises>::isotropic(Dimension::ThreeD, Kinematics::SmallStrain);
        let mut params = Parameters::new(&props, Dimension::ThreeD).with_strain(uniaxial(5e-3));

        law.calculate_material_response_cauchy(&mut params).unwrap();
        let first = params.stress_vector.clone();
        law.calculate_material_response_cauchy(&mut params).unwrap();
        assert_eq!(params.stress_vector, first);
        assert_eq!(law.state(), &InternalState::default());
    }

    #[test]
    fn test_finalize_commits_plastic_strain() {
        let props = props();
        let mut law =
            AssociativePlasticityLaw::<VonMises>::isotropic(Dimension::ThreeD, Kinematics::SmallStrain);
        let mut params = Parameters::new(&props, Dimension::ThreeD).with_strain(uniaxial(2.5e-3));
        law.finalize_material_response(&mut params, StressMeasure::Cauchy).unwrap();

        let mut ep = Vec::zeros(0);
        assert!(law.get_vector(Variable::PlasticStrainVector, &mut ep));
        assert!(ep[0] > 0.0);
        // isochoric flow
        assert_relative_eq!(ep[0] + ep[1] + ep[2], 0.0, epsilon = 1e-15);

        // unloading to zero strain is elastic and leaves a residual stress
        let mut params = Parameters::new(&props, Dimension::ThreeD).with_strain(uniaxial(0.0));
        law.calculate_material_response_cauchy(&mut params).unwrap();
        assert!(params.stress_vector[0] < 0.0);
    }

    #[test]
    fn test_check_reports_missing_curve() {
        let props = MaterialProperties::new(200e9, 0.3).with_yield_stress(250e6);
        let law = AssociativePlasticityLaw::<VonMises>::isotropic(Dimension::ThreeD, Kinematics::SmallStrain);
        assert!(law.check(&props).is_err());
        let props = props.with_hardening_curve(HardeningCurve::PerfectPlasticity);
        assert!(law.check(&props).is_ok());

        let kinematic = AssociativePlasticityLaw::<VonMises>::kinematic(Dimension::ThreeD, Kinematics::SmallStrain);
        assert!(kinematic.check(&props).is_err());
    }

    #[test]
    fn test_uniaxial_stress_query() {
        let props = props();
        let law = AssociativePlasticityLaw::<VonMises>::isotropic(Dimension::ThreeD, Kinematics::SmallStrain);
        let mut params = Parameters::new(&props, Dimension::ThreeD).with_strain(uniaxial(1e-4));
        let q = law
            .calculate_value_scalar(Variable::UniaxialStress, &mut params)
            .unwrap()
            .unwrap();
        // elastic: √(3 J2) of the predictor, (λ + 2μ - λ) ε = 2μ ε
        assert_relative_eq!(q, 2.0 * 200e9 / 2.6 * 1e-4, max_relative = 1e-12);
        assert!(law
            .calculate_value_vector(Variable::BackStressVector, &mut params)
            .unwrap()
            .is_none());
    }
}
