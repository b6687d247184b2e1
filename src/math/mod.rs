//! Mathematical utilities for constitutive calculations
//!
//! Stress vectors use the Voigt order `[xx, yy, zz, xy, yz, xz]`. Strain
//! vectors use the same order with engineering shear components
//! (`γ = 2ε`), so that `σ · ε` is the work-conjugate product.

pub mod invariants;
pub mod kinematics;

use nalgebra::{DMatrix, DVector, Matrix3, Matrix6, SVector, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{CLError, CLResult};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;
pub type Mat3 = Matrix3<f64>;
pub type Mat6 = Matrix6<f64>;
pub type Vec3 = Vector3<f64>;
/// 6-component Voigt vector
pub type Vec6 = SVector<f64, 6>;

/// Voigt positions kept by the plane strain condensation
const PLANE_STRAIN_MAP: [usize; 3] = [0, 1, 3];

/// Geometric idealization of the integration point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    /// 2D plane strain: vectors `[xx, yy, xy]`
    PlaneStrain,
    /// Full 3D: vectors `[xx, yy, zz, xy, yz, xz]`
    ThreeD,
}

impl Default for Dimension {
    fn default() -> Self {
        Self::ThreeD
    }
}

impl Dimension {
    /// Length of the strain/stress vectors for this idealization
    pub fn strain_size(self) -> usize {
        match self {
            Self::PlaneStrain => 3,
            Self::ThreeD => 6,
        }
    }

    /// Voigt positions of the external components in the full vector
    pub fn components(self) -> &'static [usize] {
        match self {
            Self::PlaneStrain => &PLANE_STRAIN_MAP,
            Self::ThreeD => &[0, 1, 2, 3, 4, 5],
        }
    }

    /// Check that an external vector matches the expected length
    pub fn check_len(self, found: usize) -> CLResult<()> {
        let expected = self.strain_size();
        if found != expected {
            return Err(CLError::DimensionMismatch { expected, found });
        }
        Ok(())
    }

    /// Expand an external vector into the full 6-component Voigt form
    ///
    /// Out-of-plane components of plane strain vectors are zero.
    pub fn expand(self, v: &Vec) -> CLResult<Vec6> {
        self.check_len(v.len())?;
        let mut full = Vec6::zeros();
        match self {
            Self::ThreeD => full.copy_from(v),
            Self::PlaneStrain => {
                for (i, &k) in PLANE_STRAIN_MAP.iter().enumerate() {
                    full[k] = v[i];
                }
            }
        }
        Ok(full)
    }

    /// Condense a full Voigt vector to the external length
    pub fn condense(self, full: &Vec6) -> Vec {
        match self {
            Self::ThreeD => Vec::from_column_slice(full.as_slice()),
            Self::PlaneStrain => Vec::from_iterator(3, PLANE_STRAIN_MAP.iter().map(|&k| full[k])),
        }
    }

    /// Condense a full 6x6 operator to the external size
    pub fn condense_matrix(self, full: &Mat6) -> Mat {
        match self {
            Self::ThreeD => Mat::from_fn(6, 6, |i, j| full[(i, j)]),
            Self::PlaneStrain => Mat::from_fn(3, 3, |i, j| {
                full[(PLANE_STRAIN_MAP[i], PLANE_STRAIN_MAP[j])]
            }),
        }
    }
}

/// Lamé constants (λ, μ) from Young's modulus and Poisson's ratio
pub fn lame(e: f64, nu: f64) -> (f64, f64) {
    let lambda = e * nu / ((1.0 + nu) * (1.0 - 2.0 * nu));
    let mu = e / (2.0 * (1.0 + nu));
    (lambda, mu)
}

/// Bulk and shear moduli (K, G) from Young's modulus and Poisson's ratio
pub fn bulk_shear(e: f64, nu: f64) -> (f64, f64) {
    let kk = e / (3.0 * (1.0 - 2.0 * nu));
    let gg = e / (2.0 * (1.0 + nu));
    (kk, gg)
}

/// Isotropic linear elastic matrix in Voigt form (engineering shear strains)
pub fn elastic_matrix(e: f64, nu: f64) -> Mat6 {
    let (lambda, mu) = lame(e, nu);
    let mut c = Mat6::zeros();
    for i in 0..3 {
        for j in 0..3 {
            c[(i, j)] = lambda;
        }
        c[(i, i)] = lambda + 2.0 * mu;
        c[(i + 3, i + 3)] = mu;
    }
    c
}

/// Second-order identity in Voigt form
pub fn identity_vector() -> Vec6 {
    Vec6::new(1.0, 1.0, 1.0, 0.0, 0.0, 0.0)
}

/// Convert a stress-like Voigt vector to a symmetric tensor
pub fn stress_vector_to_tensor(v: &Vec6) -> Mat3 {
    Mat3::new(
        v[0], v[3], v[5],
        v[3], v[1], v[4],
        v[5], v[4], v[2],
    )
}

/// Convert a symmetric tensor to a stress-like Voigt vector
pub fn tensor_to_stress_vector(t: &Mat3) -> Vec6 {
    Vec6::new(t[(0, 0)], t[(1, 1)], t[(2, 2)], t[(0, 1)], t[(1, 2)], t[(0, 2)])
}

/// Convert an engineering strain Voigt vector to a symmetric tensor
pub fn strain_vector_to_tensor(v: &Vec6) -> Mat3 {
    Mat3::new(
        v[0], 0.5 * v[3], 0.5 * v[5],
        0.5 * v[3], v[1], 0.5 * v[4],
        0.5 * v[5], 0.5 * v[4], v[2],
    )
}

/// Convert a symmetric strain tensor to an engineering strain Voigt vector
pub fn tensor_to_strain_vector(t: &Mat3) -> Vec6 {
    Vec6::new(
        t[(0, 0)],
        t[(1, 1)],
        t[(2, 2)],
        2.0 * t[(0, 1)],
        2.0 * t[(1, 2)],
        2.0 * t[(0, 2)],
    )
}

/// Equivalent (von Mises) norm of an engineering strain vector: sqrt(2/3 ε:ε)
pub fn equivalent_strain(v: &Vec6) -> f64 {
    let normal = v[0] * v[0] + v[1] * v[1] + v[2] * v[2];
    let shear = 0.5 * (v[3] * v[3] + v[4] * v[4] + v[5] * v[5]);
    (2.0 / 3.0 * (normal + shear)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_elastic_matrix_uniaxial_strain() {
        let c = elastic_matrix(2.069e11, 0.29);
        let eps = Vec6::new(0.0, 0.0, -1.1e-4, 0.0, 0.0, 0.0);
        let sigma = c * eps;
        // λ ε and (λ + 2μ) ε
        assert_relative_eq!(sigma[0], -1.218182e7, max_relative = 1e-5);
        assert_relative_eq!(sigma[2], -2.982450e7, max_relative = 1e-5);
        assert_relative_eq!(sigma[3], 0.0);
    }

    #[test]
    fn test_plane_strain_condensation() {
        let dim = Dimension::PlaneStrain;
        let v = Vec::from_vec(vec![1.0, 2.0, 3.0]);
        let full = dim.expand(&v).unwrap();
        assert_eq!(full, Vec6::new(1.0, 2.0, 0.0, 3.0, 0.0, 0.0));
        assert_eq!(dim.condense(&full), v);

        let c = dim.condense_matrix(&elastic_matrix(1500.0, 0.25));
        assert_eq!(c.nrows(), 3);
        assert_relative_eq!(c[(0, 0)], 1800.0, epsilon = 1e-10);
        assert_relative_eq!(c[(0, 1)], 600.0, epsilon = 1e-10);
        assert_relative_eq!(c[(2, 2)], 600.0, epsilon = 1e-10);
    }

    #[test]
    fn test_dimension_mismatch() {
        let v = Vec::zeros(4);
        assert!(matches!(
            Dimension::ThreeD.expand(&v),
            Err(CLError::DimensionMismatch { expected: 6, found: 4 })
        ));
    }

    #[test]
    fn test_tensor_round_trip_keeps_engineering_shear() {
        let eps = Vec6::new(1.0, 2.0, 3.0, 0.4, 0.6, 0.8);
        let t = strain_vector_to_tensor(&eps);
        assert_relative_eq!(t[(0, 1)], 0.2);
        assert_eq!(tensor_to_strain_vector(&t), eps);
    }

    #[test]
    fn test_equivalent_strain_uniaxial_plastic_flow() {
        // isochoric uniaxial plastic flow: εp = (1, -1/2, -1/2)
        let eps = Vec6::new(1.0, -0.5, -0.5, 0.0, 0.0, 0.0);
        assert_relative_eq!(equivalent_strain(&eps), 1.0, epsilon = 1e-14);
    }
}
