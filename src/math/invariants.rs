//! Stress invariants and their gradients in Voigt form

use super::{identity_vector, stress_vector_to_tensor, tensor_to_stress_vector, Vec3, Vec6};

/// Below this value of J2 the deviatoric part is treated as zero
const J2_TOLERANCE: f64 = 1.0e-24;

/// First invariant I1 = tr(σ)
pub fn i1(sigma: &Vec6) -> f64 {
    sigma[0] + sigma[1] + sigma[2]
}

/// Deviatoric part of a stress vector
pub fn deviator(sigma: &Vec6) -> Vec6 {
    let p = i1(sigma) / 3.0;
    let mut s = *sigma;
    for i in 0..3 {
        s[i] -= p;
    }
    s
}

/// Second deviatoric invariant J2 = ½ s:s
pub fn j2(dev: &Vec6) -> f64 {
    0.5 * (dev[0] * dev[0] + dev[1] * dev[1] + dev[2] * dev[2])
        + dev[3] * dev[3]
        + dev[4] * dev[4]
        + dev[5] * dev[5]
}

/// Third deviatoric invariant J3 = det(s)
pub fn j3(dev: &Vec6) -> f64 {
    stress_vector_to_tensor(dev).determinant()
}

/// Lode angle θ ∈ [-π/6, π/6] with sin 3θ = -3√3 J3 / (2 J2^{3/2})
///
/// Uniaxial tension maps to -π/6, uniaxial compression to +π/6.
pub fn lode_angle(j2: f64, j3: f64) -> f64 {
    if j2 < J2_TOLERANCE {
        return 0.0;
    }
    let sin3 = (-3.0 * 3.0_f64.sqrt() * j3 / (2.0 * j2 * j2.sqrt())).clamp(-1.0, 1.0);
    sin3.asin() / 3.0
}

/// Principal stresses sorted from largest to smallest
pub fn principal_stresses(sigma: &Vec6) -> Vec3 {
    let mut values: [f64; 3] = stress_vector_to_tensor(sigma).symmetric_eigenvalues().into();
    values.sort_by(|a, b| b.total_cmp(a));
    Vec3::new(values[0], values[1], values[2])
}

/// Share of tension in the principal stresses: Σ⟨σi⟩ / Σ|σi|
///
/// A zero stress counts as pure tension.
pub fn tensile_ratio(sigma: &Vec6) -> f64 {
    let p = principal_stresses(sigma);
    let total: f64 = p.iter().map(|s| s.abs()).sum();
    if total < f64::EPSILON {
        return 1.0;
    }
    p.iter().map(|s| s.max(0.0)).sum::<f64>() / total
}

/// Stress invariants evaluated once and shared by the gradient assembly
#[derive(Debug, Clone, Copy)]
pub struct StressInvariants {
    pub i1: f64,
    pub j2: f64,
    pub j3: f64,
    pub lode_angle: f64,
    pub deviator: Vec6,
}

impl StressInvariants {
    pub fn new(sigma: &Vec6) -> Self {
        let dev = deviator(sigma);
        let j2 = j2(&dev);
        let j3 = j3(&dev);
        Self {
            i1: i1(sigma),
            j2,
            j3,
            lode_angle: lode_angle(j2, j3),
            deviator: dev,
        }
    }

    /// True when the deviatoric stress vanishes
    pub fn is_hydrostatic(&self) -> bool {
        self.j2 < J2_TOLERANCE
    }
}

/// ∂I1/∂σ
pub fn first_vector() -> Vec6 {
    identity_vector()
}

/// ∂√J2/∂σ (zero for a hydrostatic state)
pub fn second_vector(inv: &StressInvariants) -> Vec6 {
    if inv.is_hydrostatic() {
        return Vec6::zeros();
    }
    let sqrt_j2 = inv.j2.sqrt();
    let s = &inv.deviator;
    let mut v = Vec6::zeros();
    for i in 0..3 {
        v[i] = s[i] / (2.0 * sqrt_j2);
        v[i + 3] = s[i + 3] / sqrt_j2;
    }
    v
}

/// ∂J3/∂σ = s·s - ⅔ J2 I, shear terms doubled for Voigt contraction
pub fn third_vector(inv: &StressInvariants) -> Vec6 {
    let s = stress_vector_to_tensor(&inv.deviator);
    let mut v = tensor_to_stress_vector(&(s * s));
    for i in 0..3 {
        v[i] -= 2.0 / 3.0 * inv.j2;
        v[i + 3] *= 2.0;
    }
    v
}

/// Assemble c1 ∂I1/∂σ + c2 ∂√J2/∂σ + c3 ∂J3/∂σ
pub fn assemble_gradient(inv: &StressInvariants, c1: f64, c2: f64, c3: f64) -> Vec6 {
    let mut g = c1 * first_vector() + c2 * second_vector(inv);
    if c3 != 0.0 {
        g += c3 * third_vector(inv);
    }
    g
}

/// Coefficients (c2, c3) for a function f(I1, √J2, θ)
///
/// Given ∂f/∂√J2 and ∂f/∂θ, returns the multipliers of ∂√J2/∂σ and ∂J3/∂σ.
/// The θ-terms are dropped within one degree of the ±30° corners where
/// cos 3θ vanishes.
pub fn lode_coefficients(inv: &StressInvariants, df_dsqrt_j2: f64, df_dtheta: f64) -> (f64, f64) {
    let corner = (inv.lode_angle.abs().to_degrees()) > 29.0;
    if inv.is_hydrostatic() || corner {
        return (df_dsqrt_j2, 0.0);
    }
    let theta3 = 3.0 * inv.lode_angle;
    let sqrt_j2 = inv.j2.sqrt();
    let c2 = df_dsqrt_j2 - theta3.tan() / sqrt_j2 * df_dtheta;
    let c3 = -3.0_f64.sqrt() / (2.0 * theta3.cos() * inv.j2 * sqrt_j2) * df_dtheta;
    (c2, c3)
}
