//! Strain measures and stress transformations for finite deformations

use super::{stress_vector_to_tensor, tensor_to_strain_vector, tensor_to_stress_vector, Mat3, Vec6};
use crate::error::{CLError, CLResult};

/// Green-Lagrange strain E = ½ (FᵀF - I) as an engineering strain vector
pub fn green_lagrange_strain(f: &Mat3) -> Vec6 {
    let e = 0.5 * (f.transpose() * f - Mat3::identity());
    tensor_to_strain_vector(&e)
}

/// Infinitesimal strain ε = sym(F) - I as an engineering strain vector
pub fn infinitesimal_strain(f: &Mat3) -> Vec6 {
    let eps = 0.5 * (f + f.transpose()) - Mat3::identity();
    tensor_to_strain_vector(&eps)
}

/// Check that det F is admissible and return it
pub fn checked_determinant(det: f64) -> CLResult<f64> {
    if !(det > 0.0) {
        return Err(CLError::SingularDeformation(det));
    }
    Ok(det)
}

/// Push forward a second Piola-Kirchhoff stress: τ = F S Fᵀ
pub fn pk2_to_kirchhoff(pk2: &Vec6, f: &Mat3) -> Vec6 {
    let s = stress_vector_to_tensor(pk2);
    tensor_to_stress_vector(&(f * s * f.transpose()))
}

/// Cauchy stress from the Kirchhoff stress: σ = τ / J
pub fn kirchhoff_to_cauchy(tau: &Vec6, det_f: f64) -> Vec6 {
    tau / det_f
}
