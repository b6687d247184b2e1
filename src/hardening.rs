//! Hardening and softening evolution
//!
//! Threshold curves are driven by the normalized plastic dissipation κ or by
//! the accumulated equivalent plastic strain ε̄p. The dissipation is
//! regularized by the fracture energy over the characteristic length so that
//! softening responses do not depend on the element size.

use log::warn;

use crate::error::{CLError, CLResult};
use crate::math::invariants::tensile_ratio;
use crate::math::{equivalent_strain, Vec6};
use crate::properties::{HardeningCurve, KinematicHardening, MaterialProperties};

/// Largest admissible plastic dissipation
pub const MAX_PLASTIC_DISSIPATION: f64 = 0.9999;

/// Threshold value with its derivatives
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    pub value: f64,
    /// ∂threshold/∂κ
    pub slope_dissipation: f64,
    /// ∂threshold/∂ε̄p
    pub slope_plastic_strain: f64,
}

impl Threshold {
    fn from_dissipation(value: f64, slope: f64) -> Self {
        Self {
            value,
            slope_dissipation: slope,
            slope_plastic_strain: 0.0,
        }
    }

    fn from_plastic_strain(value: f64, slope: f64) -> Self {
        Self {
            value,
            slope_dissipation: 0.0,
            slope_plastic_strain: slope,
        }
    }
}

/// True for curves whose threshold decreases with dissipation
pub fn is_softening(curve: HardeningCurve) -> bool {
    matches!(
        curve,
        HardeningCurve::LinearSoftening
            | HardeningCurve::ExponentialSoftening
            | HardeningCurve::InitialHardeningExponentialSoftening
    )
}

/// Evaluate the threshold curve at (κ, ε̄p)
pub fn threshold(
    props: &MaterialProperties,
    curve: HardeningCurve,
    initial_threshold: f64,
    dissipation: f64,
    plastic_strain: f64,
) -> CLResult<Threshold> {
    let r0 = initial_threshold;
    let kappa = dissipation;
    let t = match curve {
        HardeningCurve::LinearSoftening => {
            let value = r0 * (1.0 - kappa).sqrt();
            Threshold::from_dissipation(value, -0.5 * r0 * r0 / value)
        }
        HardeningCurve::ExponentialSoftening => {
            Threshold::from_dissipation(r0 * (1.0 - kappa), -r0)
        }
        HardeningCurve::InitialHardeningExponentialSoftening => {
            initial_hardening(props, r0, kappa)?
        }
        HardeningCurve::PerfectPlasticity => Threshold::from_dissipation(r0, 0.0),
        HardeningCurve::LinearHardening => {
            let h = props
                .isotropic_hardening_modulus
                .ok_or(CLError::MissingProperty("isotropic_hardening_modulus"))?;
            Threshold::from_plastic_strain(r0 + h * plastic_strain, h)
        }
        HardeningCurve::CurveDefinedByPoints => {
            let (value, slope) = interpolate(&props.hardening_curve_points, plastic_strain)?;
            Threshold::from_plastic_strain(value, slope)
        }
    };
    Ok(t)
}

fn initial_hardening(props: &MaterialProperties, r0: f64, kappa: f64) -> CLResult<Threshold> {
    if kappa >= 1.0 {
        return Err(CLError::IllPosedStep(format!(
            "plastic dissipation {kappa} outside the softening branch"
        )));
    }
    let peak = props
        .maximum_stress
        .ok_or(CLError::MissingProperty("maximum_stress"))?;
    let cap = props
        .maximum_stress_position
        .ok_or(CLError::MissingProperty("maximum_stress_position"))?;

    let ro = (1.0 - r0 / peak).sqrt();
    let k = (3.0 - ro) * (1.0 + ro);
    let alpha = (((1.0 - (1.0 - ro).powi(2)) / (k * cap)).ln() / (1.0 - cap)).exp();
    let alpha_pow = alpha.powf(1.0 - kappa);
    let phi = (1.0 - ro).powi(2) + k * kappa * alpha_pow;

    let value = peak * (2.0 * phi.sqrt() - phi);
    let slope = peak * (1.0 / phi.sqrt() - 1.0) * k * alpha_pow * (1.0 - alpha.ln() * kappa);
    Ok(Threshold::from_dissipation(value, slope))
}

/// Piecewise linear interpolation; flat beyond the last point
fn interpolate(points: &[[f64; 2]], x: f64) -> CLResult<(f64, f64)> {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(CLError::MissingProperty("hardening_curve_points")),
    };
    if x <= first[0] {
        return Ok((first[1], 0.0));
    }
    if x >= last[0] {
        return Ok((last[1], 0.0));
    }
    for w in points.windows(2) {
        let ([x0, y0], [x1, y1]) = (w[0], w[1]);
        if x <= x1 {
            let slope = (y1 - y0) / (x1 - x0);
            return Ok((y0 + slope * (x - x0), slope));
        }
    }
    Ok((last[1], 0.0))
}

/// Fail when the element is too large for the fracture energy
///
/// The limit is `2 E g_c / σc²`; beyond it the softening branch snaps back.
pub fn check_regularization(props: &MaterialProperties, characteristic_length: f64) -> CLResult<()> {
    let gc = props.compression_fracture_energy()?;
    let sigma_c = props.compression_yield()?;
    let limit = 2.0 * props.young_modulus * gc / (sigma_c * sigma_c);
    if characteristic_length > limit {
        return Err(CLError::FractureEnergyTooLow {
            characteristic_length,
            limit,
        });
    }
    Ok(())
}

/// Factor h with Δκ = h σ·Δεp
///
/// Zero when no fracture energy is defined, in which case κ stays at zero.
pub fn dissipation_factor(
    props: &MaterialProperties,
    characteristic_length: f64,
    stress: &Vec6,
) -> CLResult<f64> {
    if props.fracture_energy.is_none() {
        return Ok(0.0);
    }
    let g_t = props.tension_fracture_energy()? / characteristic_length;
    let g_c = props.compression_fracture_energy()? / characteristic_length;
    let r_t = tensile_ratio(stress);
    Ok(r_t / g_t + (1.0 - r_t) / g_c)
}

/// Add a dissipation increment to κ
///
/// Increments outside [0, 1] are discarded. The result never decreases
/// and stays below one.
pub fn accumulate_dissipation(dissipation: f64, increment: f64) -> f64 {
    if !(0.0..=1.0).contains(&increment) {
        warn!("discarding plastic dissipation increment {increment:e}");
        return dissipation;
    }
    (dissipation + increment).min(MAX_PLASTIC_DISSIPATION).max(dissipation)
}

impl KinematicHardening {
    /// Back stress after a plastic strain increment `Δεp` from `back_stress`
    ///
    /// `Δεp` and the dissipation increment cover the whole step, so the
    /// recovery divisor is applied once per step.
    pub fn update(&self, back_stress: &Vec6, plastic_increment: &Vec6, dissipation_increment: f64) -> Vec6 {
        let driven = back_stress + deviatoric_drive(self.c1(), plastic_increment);
        driven / self.recovery(plastic_increment, dissipation_increment)
    }

    /// ∂α/∂λ along a flow direction `g`, used in the Newton denominator
    ///
    /// `back_stress` is the current iterate of [`Self::update`] for the step
    /// totals `plastic_increment` and `dissipation_increment`.
    pub fn slope(
        &self,
        back_stress: &Vec6,
        g: &Vec6,
        plastic_increment: &Vec6,
        dissipation_rate: f64,
        dissipation_increment: f64,
    ) -> Vec6 {
        let driven = deviatoric_drive(self.c1(), g);
        let recovery = self.recovery(plastic_increment, dissipation_increment);
        match *self {
            Self::Linear { .. } => driven,
            Self::ArmstrongFrederick { c2, .. } => {
                (driven - c2 * equivalent_strain(g) * back_stress) / recovery
            }
            Self::AraujoVoyiadjis { c2, .. } => (driven - c2 * dissipation_rate * back_stress) / recovery,
        }
    }

    /// Divisor of the implicit recovery term
    fn recovery(&self, plastic_increment: &Vec6, dissipation_increment: f64) -> f64 {
        match *self {
            Self::Linear { .. } => 1.0,
            Self::ArmstrongFrederick { c2, .. } => 1.0 + c2 * equivalent_strain(plastic_increment),
            Self::AraujoVoyiadjis { c2, .. } => 1.0 + c2 * dissipation_increment.max(0.0),
        }
    }

    pub fn c1(&self) -> f64 {
        match *self {
            Self::Linear { c1 } => c1,
            Self::ArmstrongFrederick { c1, .. } => c1,
            Self::AraujoVoyiadjis { c1, .. } => c1,
        }
    }
}

/// ⅔ C1 Δεp as a stress-like vector (engineering shear halved)
fn deviatoric_drive(c1: f64, plastic_increment: &Vec6) -> Vec6 {
    let mut v = 2.0 / 3.0 * c1 * plastic_increment;
    for i in 3..6 {
        v[i] *= 0.5;
    }
    v
}
