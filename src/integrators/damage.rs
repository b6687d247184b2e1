//! Isotropic damage integration
//!
//! σ = (1 - d) C:ε. Loading happens when the equivalent stress of the
//! effective stress exceeds the current threshold; the threshold then
//! follows the equivalent stress and d is evaluated from the softening law.

use log::{debug, warn};

use super::PointInput;
use crate::error::CLResult;
use crate::math::Vec6;
use crate::properties::SofteningType;
use crate::state::InternalState;
use crate::surfaces::EquivalentStress;

/// Upper bound on the damage variable
pub const MAX_DAMAGE: f64 = 0.99999;

/// Result of one damage evaluation
#[derive(Debug, Clone)]
pub struct DamageUpdate {
    pub stress: Vec6,
    /// Trial history, to be committed on finalize
    pub state: InternalState,
    /// True when the threshold was exceeded
    pub loading: bool,
}

/// Damage for an equivalent stress above the initial threshold `r0`
pub fn damage_value(softening: SofteningType, equivalent_stress: f64, r0: f64, a: f64) -> f64 {
    match softening {
        SofteningType::Linear => (1.0 - r0 / equivalent_stress) / (1.0 + a),
        SofteningType::Exponential => {
            1.0 - r0 / equivalent_stress * (a * (1.0 - equivalent_stress / r0)).exp()
        }
    }
}

/// Integrate one strain state with equivalent stress measure `S`
pub fn integrate_damage<S: EquivalentStress>(
    measure: &S,
    softening: SofteningType,
    input: &PointInput,
) -> CLResult<DamageUpdate> {
    let props = input.props;
    let committed = input.state;
    let effective = input.elastic * input.strain;

    let r0 = measure.initial_threshold(props)?;
    let threshold = committed.threshold_or(r0);
    let equivalent = measure.equivalent_stress(&effective, input.strain, props)?;

    if equivalent <= threshold {
        return Ok(DamageUpdate {
            stress: (1.0 - committed.damage) * effective,
            state: committed.clone(),
            loading: false,
        });
    }

    let a = measure.damage_parameter(props, input.characteristic_length, softening)?;
    let mut damage = damage_value(softening, equivalent, r0, a);
    if damage < committed.damage {
        warn!(
            "clamping damage decrease {:.6} -> {:.6}",
            committed.damage, damage
        );
        damage = committed.damage;
    }
    let damage = damage.min(MAX_DAMAGE);
    debug!("damage loading: σ_eq = {equivalent:e}, d = {damage:.6}");

    let mut state = committed.clone();
    state.damage = damage;
    state.threshold = equivalent;
    state.uniaxial_stress = equivalent;
    Ok(DamageUpdate {
        stress: (1.0 - damage) * effective,
        state,
        loading: true,
    })
}
