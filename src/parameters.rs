//! Per-call parameters passed to a constitutive law
//!
//! A `Parameters` record carries the kinematic input of one integration
//! point together with the output slots the law fills in. Material
//! properties are borrowed, never copied.

use serde::{Deserialize, Serialize};

use crate::error::{CLError, CLResult};
use crate::math::{kinematics, Dimension, Mat, Mat3, Vec};
use crate::properties::MaterialProperties;

/// Stress measure requested from a law
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressMeasure {
    /// Cauchy (true) stress σ
    Cauchy,
    /// Second Piola-Kirchhoff stress S
    PK2,
    /// Kirchhoff stress τ = J σ
    Kirchhoff,
}

/// Flags controlling a constitutive call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawOptions {
    /// Take the strain vector as given instead of computing it from F
    pub use_element_provided_strain: bool,
    /// Fill the stress vector slot
    pub compute_stress: bool,
    /// Fill the constitutive matrix slot
    pub compute_constitutive_tensor: bool,
}

impl Default for LawOptions {
    fn default() -> Self {
        Self {
            use_element_provided_strain: true,
            compute_stress: true,
            compute_constitutive_tensor: false,
        }
    }
}

/// Time stepping information forwarded by the solver
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub time: f64,
    pub delta_time: f64,
    pub step: usize,
}

/// Input and output slots of one constitutive call
#[derive(Debug, Clone)]
pub struct Parameters<'a> {
    pub options: LawOptions,
    /// Strain vector (engineering shear); overwritten when computed from F
    pub strain_vector: Vec,
    /// Stress output slot
    pub stress_vector: Vec,
    /// Tangent output slot
    pub constitutive_matrix: Mat,
    pub deformation_gradient: Option<Mat3>,
    pub determinant_f: f64,
    /// Element size used for fracture energy regularization
    pub characteristic_length: f64,
    pub process_info: ProcessInfo,
    pub properties: &'a MaterialProperties,
}

impl<'a> Parameters<'a> {
    /// Create zeroed slots sized for the given dimension
    pub fn new(properties: &'a MaterialProperties, dimension: Dimension) -> Self {
        let n = dimension.strain_size();
        Self {
            options: LawOptions::default(),
            strain_vector: Vec::zeros(n),
            stress_vector: Vec::zeros(n),
            constitutive_matrix: Mat::zeros(n, n),
            deformation_gradient: None,
            determinant_f: 1.0,
            characteristic_length: 1.0,
            process_info: ProcessInfo::default(),
            properties,
        }
    }

    /// Set the strain vector
    pub fn with_strain(mut self, strain: Vec) -> Self {
        self.strain_vector = strain;
        self
    }

    /// Set F and its determinant; the strain will be computed from F
    pub fn with_deformation_gradient(mut self, f: Mat3) -> Self {
        self.determinant_f = f.determinant();
        self.deformation_gradient = Some(f);
        self.options.use_element_provided_strain = false;
        self
    }

    pub fn with_characteristic_length(mut self, length: f64) -> Self {
        self.characteristic_length = length;
        self
    }

    /// Request the tangent operator
    pub fn with_constitutive_tensor(mut self, compute: bool) -> Self {
        self.options.compute_constitutive_tensor = compute;
        self
    }

    pub fn with_process_info(mut self, process_info: ProcessInfo) -> Self {
        self.process_info = process_info;
        self
    }

    /// Deformation gradient with its admissible determinant
    ///
    /// The determinant is read from `determinant_f`.
    pub fn checked_deformation_gradient(&self) -> CLResult<(Mat3, f64)> {
        let f = self
            .deformation_gradient
            .ok_or(CLError::MissingDeformationGradient)?;
        let det = kinematics::checked_determinant(self.determinant_f)?;
        Ok((f, det))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_parameters_are_sized() {
        let props = MaterialProperties::new(210e9, 0.3);
        let params = Parameters::new(&props, Dimension::PlaneStrain);
        assert_eq!(params.strain_vector.len(), 3);
        assert_eq!(params.constitutive_matrix.shape(), (3, 3));
        assert!(params.options.use_element_provided_strain);
    }

    #[test]
    fn test_deformation_gradient_switches_strain_source() {
        let props = MaterialProperties::new(210e9, 0.3);
        let f = Mat3::from_diagonal(&nalgebra::Vector3::new(1.0, 1.0, 0.5));
        let params = Parameters::new(&props, Dimension::ThreeD).with_deformation_gradient(f);
        assert!(!params.options.use_element_provided_strain);
        assert_eq!(params.determinant_f, 0.5);

        let (_, det) = params.checked_deformation_gradient().unwrap();
        assert_eq!(det, 0.5);
    }

    #[test]
    fn test_supplied_determinant_is_used() {
        let props = MaterialProperties::new(210e9, 0.3);
        let f = Mat3::from_diagonal(&nalgebra::Vector3::new(1.0, 1.0, 0.5));
        let mut params = Parameters::new(&props, Dimension::ThreeD).with_deformation_gradient(f);
        params.determinant_f = 0.8;
        let (_, det) = params.checked_deformation_gradient().unwrap();
        assert_eq!(det, 0.8);

        params.determinant_f = 0.0;
        assert!(matches!(
            params.checked_deformation_gradient(),
            Err(CLError::SingularDeformation(_))
        ));
    }

    #[test]
    fn test_missing_deformation_gradient() {
        let props = MaterialProperties::new(210e9, 0.3);
        let params = Parameters::new(&props, Dimension::ThreeD);
        assert!(matches!(
            params.checked_deformation_gradient(),
            Err(CLError::MissingDeformationGradient)
        ));
    }
}
