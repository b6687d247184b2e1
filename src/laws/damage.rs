//! Isotropic damage law driven by an equivalent stress measure `S`

use super::{ConstitutiveLaw, Kinematics, PointResponse};
use crate::error::CLResult;
use crate::integrators::{integrate_damage, PointInput};
use crate::math::{Dimension, Vec6};
use crate::parameters::Parameters;
use crate::properties::MaterialProperties;
use crate::state::{InternalLayout, InternalState};
use crate::surfaces::EquivalentStress;
use crate::variables::{Variable, DAMAGE_VARIABLES};

#[derive(Debug, Clone)]
pub struct DamageLaw<S> {
    measure: S,
    dimension: Dimension,
    kinematics: Kinematics,
    state: InternalState,
}

impl<S: EquivalentStress> DamageLaw<S> {
    pub fn new(dimension: Dimension, kinematics: Kinematics) -> Self {
        Self {
            measure: S::default(),
            dimension,
            kinematics,
            state: InternalState::default(),
        }
    }
}

impl<S: EquivalentStress + 'static> ConstitutiveLaw for DamageLaw<S> {
    fn dimension(&self) -> Dimension {
        self.dimension
    }

    fn kinematics(&self) -> Kinematics {
        self.kinematics
    }

    fn capabilities(&self) -> &'static [Variable] {
        DAMAGE_VARIABLES
    }

    fn layout(&self) -> InternalLayout {
        InternalLayout::Damage
    }

    fn state(&self) -> &InternalState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut InternalState {
        &mut self.state
    }

    fn check(&self, props: &MaterialProperties) -> CLResult<()> {
        props.check_inelastic()?;
        props.softening()?;
        props.tension_fracture_energy()?;
        self.measure.initial_threshold(props)?;
        Ok(())
    }

    fn integrate(&self, strain: &Vec6, params: &Parameters) -> CLResult<PointResponse> {
        let props = params.properties;
        let elastic = props.elastic_matrix();
        let input = PointInput {
            elastic: &elastic,
            strain,
            state: &self.state,
            props,
            characteristic_length: params.characteristic_length,
        };
        let update = integrate_damage(&self.measure, props.softening()?, &input)?;
        let secant_factor = 1.0 - update.state.damage;
        Ok(PointResponse {
            stress: update.stress,
            state: update.state,
            secant_factor,
        })
    }

    fn equivalent_stress(
        &self,
        stress: &Vec6,
        strain: &Vec6,
        props: &MaterialProperties,
    ) -> CLResult<Option<f64>> {
        self.measure.equivalent_stress(stress, strain, props).map(Some)
    }

    fn boxed_clone(&self) -> Box<dyn ConstitutiveLaw> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec;
    use crate::options::{IntegrationOptions, TangentOperator};
    use crate::parameters::StressMeasure;
    use crate::properties::SofteningType;
    use crate::surfaces::SimoJu;
    use approx::assert_relative_eq;

    fn props() -> MaterialProperties {
        MaterialProperties::new(30.0e3, 0.2)
            .with_yield_stresses(3.0, 30.0)
            .with_fracture_energy(0.1)
            .with_softening(SofteningType::Exponential)
            .with_integration(IntegrationOptions::default().with_tangent(TangentOperator::Secant))
    }

    #[test]
    fn test_simo_ju_loading_and_secant_tangent() {
        let props = props();
        let mut law = DamageLaw::<SimoJu>::new(Dimension::ThreeD, Kinematics::SmallStrain);
        assert!(law.check(&props).is_ok());

        let strain = Vec::from_vec(vec![5e-4, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let mut params = Parameters::new(&props, Dimension::ThreeD)
            .with_strain(strain)
            .with_characteristic_length(0.1)
            .with_constitutive_tensor(true);
        law.finalize_material_response(&mut params, StressMeasure::Cauchy).unwrap();

        let d = law.get_scalar(Variable::Damage).unwrap();
        assert!(d > 0.0 && d < 1.0);
        assert!(law.get_scalar(Variable::Threshold).unwrap() > SimoJu.initial_threshold(&props).unwrap());

        let c = props.elastic_matrix();
        assert_relative_eq!(params.constitutive_matrix[(0, 0)], (1.0 - d) * c[(0, 0)], epsilon = 1e-9);
        assert_relative_eq!(params.stress_vector[0], (1.0 - d) * c[(0, 0)] * 5e-4, epsilon = 1e-9);
    }

    #[test]
    fn test_internal_variables_round_trip() {
        let mut law = DamageLaw::<SimoJu>::new(Dimension::ThreeD, Kinematics::SmallStrain);
        assert!(law.set_vector(Variable::InternalVariables, &[0.1, 0.2, 0.3]));
        let mut out = Vec::zeros(3);
        assert!(law.get_vector(Variable::InternalVariables, &mut out));
        assert_eq!(out.len(), 2);
        assert_relative_eq!(out[0], 0.1);
        assert_relative_eq!(out[1], 0.2);
        assert!(!law.has(Variable::PlasticStrainVector));
    }

    #[test]
    fn test_check_requires_softening_type() {
        let props = MaterialProperties::new(30.0e3, 0.2)
            .with_yield_stress(3.0)
            .with_fracture_energy(0.1);
        let law = DamageLaw::<SimoJu>::new(Dimension::ThreeD, Kinematics::SmallStrain);
        assert!(law.check(&props).is_err());
    }
}
