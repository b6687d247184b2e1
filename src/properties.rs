//! Material properties
//!
//! Properties are immutable for the duration of a solve step and are shared
//! by reference between all integration points using the same material.

use serde::{Deserialize, Serialize};

use crate::error::{CLError, CLResult};
use crate::math::{self, Mat6};
use crate::options::IntegrationOptions;

/// Threshold evolution law for plasticity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HardeningCurve {
    /// threshold = r0 √(1 - κ)
    LinearSoftening,
    /// threshold = r0 (1 - κ)
    ExponentialSoftening,
    /// Hardening up to `maximum_stress` then exponential softening
    InitialHardeningExponentialSoftening,
    /// threshold = r0
    PerfectPlasticity,
    /// threshold = r0 + H ε̄p
    LinearHardening,
    /// Piecewise linear threshold versus equivalent plastic strain
    CurveDefinedByPoints,
}

/// Softening law for the isotropic damage model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SofteningType {
    Linear,
    Exponential,
}

/// Back-stress evolution law
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum KinematicHardening {
    /// α += ⅔ C1 Δεp
    Linear { c1: f64 },
    /// α = (α + ⅔ C1 Δεp) / (1 + C2 |Δεp|)
    ArmstrongFrederick { c1: f64, c2: f64 },
    /// Armstrong-Frederick with recovery driven by the dissipation increment
    AraujoVoyiadjis { c1: f64, c2: f64 },
}

/// Material constants for one material
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Young's modulus
    pub young_modulus: f64,
    /// Poisson's ratio
    pub poisson_ratio: f64,
    /// Symmetric yield stress; overrides the tension/compression values
    #[serde(default)]
    pub yield_stress: Option<f64>,
    #[serde(default)]
    pub yield_stress_tension: Option<f64>,
    #[serde(default)]
    pub yield_stress_compression: Option<f64>,
    /// Friction angle in degrees
    #[serde(default)]
    pub friction_angle: Option<f64>,
    /// Dilatancy angle in degrees
    #[serde(default)]
    pub dilatancy_angle: Option<f64>,
    /// Fracture energy (tension) per unit area
    #[serde(default)]
    pub fracture_energy: Option<f64>,
    /// Fracture energy in compression; defaults to n² G_f with n = σc/σt
    #[serde(default)]
    pub fracture_energy_compression: Option<f64>,
    #[serde(default)]
    pub hardening_curve: Option<HardeningCurve>,
    #[serde(default)]
    pub softening_type: Option<SofteningType>,
    #[serde(default)]
    pub kinematic_hardening: Option<KinematicHardening>,
    /// Modulus H of `HardeningCurve::LinearHardening`
    #[serde(default)]
    pub isotropic_hardening_modulus: Option<f64>,
    /// Peak stress of the initial hardening curve
    #[serde(default)]
    pub maximum_stress: Option<f64>,
    /// Normalized dissipation at the peak stress, in (0, 1)
    #[serde(default)]
    pub maximum_stress_position: Option<f64>,
    /// (equivalent plastic strain, threshold) pairs, strictly increasing in strain
    #[serde(default)]
    pub hardening_curve_points: Vec<[f64; 2]>,
    #[serde(default)]
    pub integration: IntegrationOptions,
}

impl MaterialProperties {
    /// Create properties with elastic constants only
    pub fn new(young_modulus: f64, poisson_ratio: f64) -> Self {
        Self {
            young_modulus,
            poisson_ratio,
            yield_stress: None,
            yield_stress_tension: None,
            yield_stress_compression: None,
            friction_angle: None,
            dilatancy_angle: None,
            fracture_energy: None,
            fracture_energy_compression: None,
            hardening_curve: None,
            softening_type: None,
            kinematic_hardening: None,
            isotropic_hardening_modulus: None,
            maximum_stress: None,
            maximum_stress_position: None,
            hardening_curve_points: Vec::new(),
            integration: IntegrationOptions::default(),
        }
    }

    pub fn with_yield_stress(mut self, yield_stress: f64) -> Self {
        self.yield_stress = Some(yield_stress);
        self
    }

    pub fn with_yield_stresses(mut self, tension: f64, compression: f64) -> Self {
        self.yield_stress_tension = Some(tension);
        self.yield_stress_compression = Some(compression);
        self
    }

    /// Friction and dilatancy angles in degrees
    pub fn with_angles(mut self, friction: f64, dilatancy: f64) -> Self {
        self.friction_angle = Some(friction);
        self.dilatancy_angle = Some(dilatancy);
        self
    }

    pub fn with_fracture_energy(mut self, fracture_energy: f64) -> Self {
        self.fracture_energy = Some(fracture_energy);
        self
    }

    pub fn with_hardening_curve(mut self, curve: HardeningCurve) -> Self {
        self.hardening_curve = Some(curve);
        self
    }

    /// Linear isotropic hardening with modulus H
    pub fn with_linear_hardening(mut self, modulus: f64) -> Self {
        self.hardening_curve = Some(HardeningCurve::LinearHardening);
        self.isotropic_hardening_modulus = Some(modulus);
        self
    }

    pub fn with_softening(mut self, softening: SofteningType) -> Self {
        self.softening_type = Some(softening);
        self
    }

    pub fn with_kinematic_hardening(mut self, rule: KinematicHardening) -> Self {
        self.kinematic_hardening = Some(rule);
        self
    }

    pub fn with_integration(mut self, options: IntegrationOptions) -> Self {
        self.integration = options;
        self
    }

    /// Isotropic elastic matrix C
    pub fn elastic_matrix(&self) -> Mat6 {
        math::elastic_matrix(self.young_modulus, self.poisson_ratio)
    }

    /// Yield stress in tension
    pub fn tension_yield(&self) -> CLResult<f64> {
        self.yield_stress
            .or(self.yield_stress_tension)
            .ok_or(CLError::MissingProperty("yield_stress_tension"))
    }

    /// Yield stress in compression
    pub fn compression_yield(&self) -> CLResult<f64> {
        self.yield_stress
            .or(self.yield_stress_compression)
            .ok_or(CLError::MissingProperty("yield_stress_compression"))
    }

    /// Ratio n = σc / σt
    pub fn yield_ratio(&self) -> CLResult<f64> {
        Ok(self.compression_yield()? / self.tension_yield()?)
    }

    /// Friction angle in radians
    pub fn friction_angle_rad(&self) -> CLResult<f64> {
        self.friction_angle
            .map(f64::to_radians)
            .ok_or(CLError::MissingProperty("friction_angle"))
    }

    /// Dilatancy angle in radians
    pub fn dilatancy_angle_rad(&self) -> CLResult<f64> {
        self.dilatancy_angle
            .map(f64::to_radians)
            .ok_or(CLError::MissingProperty("dilatancy_angle"))
    }

    pub fn tension_fracture_energy(&self) -> CLResult<f64> {
        self.fracture_energy.ok_or(CLError::MissingProperty("fracture_energy"))
    }

    pub fn compression_fracture_energy(&self) -> CLResult<f64> {
        match self.fracture_energy_compression {
            Some(gc) => Ok(gc),
            None => {
                let n = self.yield_ratio()?;
                Ok(self.tension_fracture_energy()? * n * n)
            }
        }
    }

    pub fn hardening(&self) -> CLResult<HardeningCurve> {
        self.hardening_curve.ok_or(CLError::MissingProperty("hardening_curve"))
    }

    pub fn softening(&self) -> CLResult<SofteningType> {
        self.softening_type.ok_or(CLError::MissingProperty("softening_type"))
    }

    /// Validate the elastic constants
    pub fn check_elastic(&self) -> CLResult<()> {
        if !(self.young_modulus > 0.0) {
            return Err(invalid("young_modulus", "must be positive"));
        }
        if !(self.poisson_ratio > -1.0 && self.poisson_ratio < 0.5) {
            return Err(invalid("poisson_ratio", "must lie in (-1, 0.5)"));
        }
        Ok(())
    }

    /// Validate everything an inelastic law needs before the first step
    pub fn check_inelastic(&self) -> CLResult<()> {
        self.check_elastic()?;
        for (name, value) in [
            ("yield_stress_tension", self.tension_yield()?),
            ("yield_stress_compression", self.compression_yield()?),
        ] {
            if !(value > 0.0) {
                return Err(invalid(name, "must be positive"));
            }
        }
        if let Some(gf) = self.fracture_energy {
            if !(gf > 0.0) {
                return Err(invalid("fracture_energy", "must be positive"));
            }
        }
        if self.integration.max_iterations == 0 {
            return Err(invalid("integration.max_iterations", "must be at least 1"));
        }
        if !(self.integration.tolerance > 0.0) {
            return Err(invalid("integration.tolerance", "must be positive"));
        }
        Ok(())
    }

    /// Validate the hardening curve and its data
    pub fn check_hardening(&self) -> CLResult<()> {
        match self.hardening()? {
            HardeningCurve::LinearHardening => {
                self.isotropic_hardening_modulus
                    .ok_or(CLError::MissingProperty("isotropic_hardening_modulus"))?;
            }
            HardeningCurve::InitialHardeningExponentialSoftening => {
                let peak = self.maximum_stress.ok_or(CLError::MissingProperty("maximum_stress"))?;
                let position = self
                    .maximum_stress_position
                    .ok_or(CLError::MissingProperty("maximum_stress_position"))?;
                if peak <= self.compression_yield()? {
                    return Err(invalid("maximum_stress", "must exceed the yield stress"));
                }
                if !(position > 0.0 && position < 1.0) {
                    return Err(invalid("maximum_stress_position", "must lie in (0, 1)"));
                }
                self.tension_fracture_energy()?;
            }
            HardeningCurve::CurveDefinedByPoints => {
                let points = &self.hardening_curve_points;
                if points.len() < 2 {
                    return Err(invalid("hardening_curve_points", "needs at least two points"));
                }
                if points.windows(2).any(|w| w[1][0] <= w[0][0]) {
                    return Err(invalid(
                        "hardening_curve_points",
                        "strains must be strictly increasing",
                    ));
                }
            }
            HardeningCurve::LinearSoftening | HardeningCurve::ExponentialSoftening => {
                self.tension_fracture_energy()?;
            }
            HardeningCurve::PerfectPlasticity => {}
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: &str) -> CLError {
    CLError::InvalidProperty {
        name,
        reason: reason.to_string(),
    }
}
