//! Linear elastic law (St. Venant-Kirchhoff in finite strain)

use super::{ConstitutiveLaw, Kinematics, PointResponse};
use crate::error::CLResult;
use crate::math::{Dimension, Vec6};
use crate::parameters::Parameters;
use crate::properties::MaterialProperties;
use crate::state::{InternalLayout, InternalState};
use crate::variables::{Variable, ELASTIC_VARIABLES};

#[derive(Debug, Clone)]
pub struct ElasticLaw {
    dimension: Dimension,
    kinematics: Kinematics,
    state: InternalState,
}

impl ElasticLaw {
    pub fn new(dimension: Dimension, kinematics: Kinematics) -> Self {
        Self {
            dimension,
            kinematics,
            state: InternalState::default(),
        }
    }
}

impl ConstitutiveLaw for ElasticLaw {
    fn dimension(&self) -> Dimension {
        self.dimension
    }

    fn kinematics(&self) -> Kinematics {
        self.kinematics
    }

    fn capabilities(&self) -> &'static [Variable] {
        ELASTIC_VARIABLES
    }

    fn layout(&self) -> InternalLayout {
        InternalLayout::Elastic
    }

    fn state(&self) -> &InternalState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut InternalState {
        &mut self.state
    }

    fn check(&self, props: &MaterialProperties) -> CLResult<()> {
        props.check_elastic()
    }

    fn integrate(&self, strain: &Vec6, params: &Parameters) -> CLResult<PointResponse> {
        Ok(PointResponse {
            stress: params.properties.elastic_matrix() * strain,
            state: self.state.clone(),
            secant_factor: 1.0,
        })
    }

    fn boxed_clone(&self) -> Box<dyn ConstitutiveLaw> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Mat3, Vec};
    use crate::parameters::StressMeasure;
    use approx::assert_relative_eq;

    #[test]
    fn test_plane_strain_response() {
        let props = MaterialProperties::new(1500.0, 0.25);
        let law = ElasticLaw::new(Dimension::PlaneStrain, Kinematics::SmallStrain);
        let mut params = Parameters::new(&props, Dimension::PlaneStrain)
            .with_strain(Vec::from_vec(vec![1e-3, 0.0, 2e-3]))
            .with_constitutive_tensor(true);
        law.calculate_material_response_cauchy(&mut params).unwrap();
        assert_relative_eq!(params.stress_vector[0], 1.8, epsilon = 1e-12);
        assert_relative_eq!(params.stress_vector[1], 0.6, epsilon = 1e-12);
        assert_relative_eq!(params.stress_vector[2], 1.2, epsilon = 1e-12);
        assert_eq!(params.constitutive_matrix.shape(), (3, 3));
    }

    #[test]
    fn test_finite_strain_push_forward() {
        let props = MaterialProperties::new(1000.0, 0.0);
        let law = ElasticLaw::new(Dimension::ThreeD, Kinematics::FiniteStrain);
        let f = Mat3::from_diagonal(&nalgebra::Vector3::new(1.1, 1.0, 1.0));
        let mut params = Parameters::new(&props, Dimension::ThreeD).with_deformation_gradient(f);

        law.calculate_material_response(&mut params, StressMeasure::PK2).unwrap();
        // E_xx = ½ (1.21 - 1)
        assert_relative_eq!(params.strain_vector[0], 0.105, epsilon = 1e-12);
        let pk2 = params.stress_vector[0];
        assert_relative_eq!(pk2, 105.0, epsilon = 1e-9);

        law.calculate_material_response(&mut params, StressMeasure::Kirchhoff).unwrap();
        assert_relative_eq!(params.stress_vector[0], 1.21 * pk2, epsilon = 1e-9);

        law.calculate_material_response(&mut params, StressMeasure::Cauchy).unwrap();
        assert_relative_eq!(params.stress_vector[0], 1.1 * pk2, epsilon = 1e-9);

        // Cauchy uses the det F carried by the parameters
        params.determinant_f = 1.21;
        law.calculate_material_response(&mut params, StressMeasure::Cauchy).unwrap();
        assert_relative_eq!(params.stress_vector[0], pk2, epsilon = 1e-9);
    }

    #[test]
    fn test_elastic_law_stores_nothing() {
        let mut law = ElasticLaw::new(Dimension::ThreeD, Kinematics::SmallStrain);
        let mut out = Vec::zeros(3);
        assert!(!law.has(Variable::InternalVariables));
        assert!(!law.get_vector(Variable::InternalVariables, &mut out));
        assert!(!law.set_scalar(Variable::Damage, 0.1));
    }
}
