//! Per-point history variables

use serde::{Deserialize, Serialize};

use crate::math::{Vec, Vec6};

/// Layout of the flat internal-variables vector of a law
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalLayout {
    /// No history
    Elastic,
    /// `[κ, εp_xx, εp_yy, εp_zz, εp_xy, εp_yz, εp_xz]`
    Plasticity,
    /// `[d, threshold]`
    Damage,
}

impl InternalLayout {
    pub fn len(self) -> usize {
        match self {
            Self::Elastic => 0,
            Self::Plasticity => 7,
            Self::Damage => 2,
        }
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

/// History owned by exactly one integration point
///
/// Created at zero. The threshold stays zero until the first inelastic
/// evaluation initializes it from the yield surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalState {
    /// Normalized plastic dissipation κ in [0, 1)
    pub plastic_dissipation: f64,
    /// Current yield or damage threshold
    pub threshold: f64,
    /// Plastic strain (engineering shear)
    pub plastic_strain: Vec6,
    /// Accumulated equivalent plastic strain
    pub equivalent_plastic_strain: f64,
    pub back_stress: Vec6,
    /// Damage d in [0, 1)
    pub damage: f64,
    /// Equivalent stress of the last committed step
    pub uniaxial_stress: f64,
}

impl Default for InternalState {
    fn default() -> Self {
        Self {
            plastic_dissipation: 0.0,
            threshold: 0.0,
            plastic_strain: Vec6::zeros(),
            equivalent_plastic_strain: 0.0,
            back_stress: Vec6::zeros(),
            damage: 0.0,
            uniaxial_stress: 0.0,
        }
    }
}

impl InternalState {
    /// Threshold, or `initial` when it has not been set yet
    pub fn threshold_or(&self, initial: f64) -> f64 {
        if self.threshold > 0.0 {
            self.threshold
        } else {
            initial
        }
    }

    /// Copy the flat internal variables into `out`, resizing it to the
    /// owned length
    pub fn to_internal_variables(&self, layout: InternalLayout, out: &mut Vec) {
        if out.len() != layout.len() {
            *out = Vec::zeros(layout.len());
        }
        match layout {
            InternalLayout::Elastic => {}
            InternalLayout::Plasticity => {
                out[0] = self.plastic_dissipation;
                out.rows_mut(1, 6).copy_from(&self.plastic_strain);
            }
            InternalLayout::Damage => {
                out[0] = self.damage;
                out[1] = self.threshold;
            }
        }
    }

    /// Overwrite the history from a flat vector
    ///
    /// Only the first `layout.len()` entries are read. Returns `false` and
    /// leaves the state untouched when `values` is shorter than that.
    pub fn apply_internal_variables(&mut self, layout: InternalLayout, values: &[f64]) -> bool {
        if values.len() < layout.len() {
            return false;
        }
        match layout {
            InternalLayout::Elastic => {}
            InternalLayout::Plasticity => {
                self.plastic_dissipation = values[0];
                self.plastic_strain = Vec6::from_column_slice(&values[1..7]);
            }
            InternalLayout::Damage => {
                self.damage = values[0];
                self.threshold = values[1];
            }
        }
        true
    }
}
