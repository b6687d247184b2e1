//! Constitutive integrators
//!
//! Integrators map a strain and the committed history of one point to a
//! stress and a trial history. They never mutate the committed state; the
//! calling law decides whether to commit.

pub mod damage;
pub mod plasticity;

pub use damage::{integrate_damage, DamageUpdate, MAX_DAMAGE};
pub use plasticity::{integrate_plasticity, HardeningRule, ReturnMapping};

use crate::math::{Mat6, Vec6};
use crate::properties::MaterialProperties;
use crate::state::InternalState;

/// Inputs shared by the integrators
#[derive(Debug, Clone, Copy)]
pub struct PointInput<'a> {
    /// Elastic operator C
    pub elastic: &'a Mat6,
    /// Total strain in the law's strain measure
    pub strain: &'a Vec6,
    /// Committed history
    pub state: &'a InternalState,
    pub props: &'a MaterialProperties,
    pub characteristic_length: f64,
}
