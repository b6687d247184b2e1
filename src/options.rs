//! Integration options for the constitutive integrators

use serde::{Deserialize, Serialize};

/// Tangent operator returned when the constitutive tensor is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TangentOperator {
    /// Elastic operator C, regardless of the plastic state
    Elastic,
    /// Elastic operator scaled by the integrity (1 - d) for damage laws;
    /// equal to `Elastic` for the other laws
    Secant,
    /// Algorithmic tangent by central differences of the stress update
    Perturbation,
}

impl Default for TangentOperator {
    fn default() -> Self {
        Self::Perturbation
    }
}

/// Options for the per-point return mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationOptions {
    /// Maximum Newton iterations of the plastic corrector
    pub max_iterations: usize,
    /// Relative tolerance on the yield condition, scaled by the threshold
    pub tolerance: f64,
    /// Tangent operator type
    pub tangent: TangentOperator,
    /// Strain perturbation for the numerical tangent, relative to the
    /// largest strain component
    pub perturbation: f64,
}

impl Default for IntegrationOptions {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-6,
            tangent: TangentOperator::Perturbation,
            perturbation: 1e-4,
        }
    }
}

impl IntegrationOptions {
    /// Set maximum iterations
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iterations = max_iter;
        self
    }

    /// Set convergence tolerance
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Set the tangent operator type
    pub fn with_tangent(mut self, tangent: TangentOperator) -> Self {
        self.tangent = tangent;
        self
    }
}
