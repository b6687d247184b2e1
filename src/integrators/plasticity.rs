//! Implicit return mapping for plasticity
//!
//! Newton iteration on the plastic multiplier. Every iteration applies the
//! correction `dλ = r / (∂f/∂σ : C : ∂g/∂σ + A_kin + A_iso)` and adds
//! `dλ ∂g/∂σ` to the step's total plastic strain `Δεp`. The stress and the
//! hardening variables are then recomputed from the trial stress and the
//! committed history with that total before the yield condition is checked.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::PointInput;
use crate::error::{CLError, CLResult};
use crate::hardening::{self, accumulate_dissipation, dissipation_factor, Threshold};
use crate::math::{equivalent_strain, Vec6};
use crate::properties::{KinematicHardening, MaterialProperties};
use crate::state::InternalState;
use crate::surfaces::{PlasticPotential, YieldSurface};

/// Hardening rule of a plasticity law
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HardeningRule {
    /// Threshold evolution only
    Isotropic,
    /// Threshold evolution plus a back stress shifting the surface
    Kinematic,
}

/// Result of one return mapping
#[derive(Debug, Clone)]
pub struct ReturnMapping {
    pub stress: Vec6,
    /// Trial history, to be committed on finalize
    pub state: InternalState,
    pub iterations: usize,
    pub plastic: bool,
}

/// Integrate one strain state with yield surface `Y` and potential `G`
pub fn integrate_plasticity<Y, G>(
    yield_surface: &Y,
    potential: &G,
    rule: HardeningRule,
    input: &PointInput,
) -> CLResult<ReturnMapping>
where
    Y: YieldSurface,
    G: PlasticPotential,
{
    let props = input.props;
    let lc = input.characteristic_length;
    let tolerance = props.integration.tolerance;
    let curve = props.hardening()?;
    let kinematic = match rule {
        HardeningRule::Isotropic => None,
        HardeningRule::Kinematic => Some(
            props
                .kinematic_hardening
                .ok_or(CLError::MissingProperty("kinematic_hardening"))?,
        ),
    };
    if hardening::is_softening(curve) {
        hardening::check_regularization(props, lc)?;
    }

    let committed = input.state;
    let r0 = yield_surface.initial_threshold(props)?;
    let threshold_at = |state: &InternalState| {
        hardening::threshold(
            props,
            curve,
            r0,
            state.plastic_dissipation,
            state.equivalent_plastic_strain,
        )
    };
    let residual_at = |stress: &Vec6, state: &InternalState, t: &Threshold| -> CLResult<f64> {
        let eq = yield_surface.equivalent_stress(&(stress - state.back_stress), input.strain, props)?;
        Ok(eq - t.value)
    };

    let trial_stress = input.elastic * (input.strain - committed.plastic_strain);
    let mut threshold = threshold_at(committed)?;
    let mut residual = residual_at(&trial_stress, committed, &threshold)?;
    if residual <= tolerance * threshold.value {
        return Ok(ReturnMapping {
            stress: trial_stress,
            state: committed.clone(),
            iterations: 0,
            plastic: false,
        });
    }

    let mut stress = trial_stress;
    let mut state = committed.clone();
    // plastic strain accumulated over the step
    let mut increment = Vec6::zeros();
    let max_iterations = props.integration.max_iterations;
    for iteration in 1..=max_iterations {
        let (denominator, flow) = plastic_denominator(
            yield_surface,
            potential,
            kinematic.as_ref(),
            input,
            &stress,
            &state,
            &increment,
            &threshold,
        )?;

        let dlambda = residual / denominator;
        increment += dlambda * flow;
        stress = trial_stress - input.elastic * increment;
        state = step_state(committed, &increment, &stress, kinematic.as_ref(), props, lc)?;

        threshold = threshold_at(&state)?;
        residual = residual_at(&stress, &state, &threshold)?;
        trace!("return mapping iteration {iteration}: dλ = {dlambda:e}, residual = {residual:e}");

        if residual.abs() <= tolerance * threshold.value {
            state.threshold = threshold.value;
            state.uniaxial_stress = threshold.value + residual;
            debug!(
                "return mapping converged in {iteration} iterations (κ = {:.6}, ε̄p = {:e})",
                state.plastic_dissipation, state.equivalent_plastic_strain
            );
            return Ok(ReturnMapping {
                stress,
                state,
                iterations: iteration,
                plastic: true,
            });
        }
    }

    Err(CLError::ReturnMappingDiverged {
        iterations: max_iterations,
        residual,
    })
}

/// History after a total plastic strain increment `Δεp` over the step
///
/// κ, ε̄p and α are rebuilt from the committed values on every iteration.
fn step_state(
    committed: &InternalState,
    increment: &Vec6,
    stress: &Vec6,
    kinematic: Option<&KinematicHardening>,
    props: &MaterialProperties,
    characteristic_length: f64,
) -> CLResult<InternalState> {
    let mut state = committed.clone();
    state.plastic_strain = committed.plastic_strain + increment;
    state.equivalent_plastic_strain = committed.equivalent_plastic_strain + equivalent_strain(increment);

    let factor = dissipation_factor(props, characteristic_length, stress)?;
    state.plastic_dissipation =
        accumulate_dissipation(committed.plastic_dissipation, factor * stress.dot(increment));
    if let Some(rule) = kinematic {
        state.back_stress = rule.update(
            &committed.back_stress,
            increment,
            state.plastic_dissipation - committed.plastic_dissipation,
        );
    }
    Ok(state)
}

/// -∂r/∂λ at the current iterate, with the flow direction ∂g/∂σ
#[allow(clippy::too_many_arguments)]
fn plastic_denominator<Y, G>(
    yield_surface: &Y,
    potential: &G,
    kinematic: Option<&KinematicHardening>,
    input: &PointInput,
    stress: &Vec6,
    state: &InternalState,
    increment: &Vec6,
    threshold: &Threshold,
) -> CLResult<(f64, Vec6)>
where
    Y: YieldSurface,
    G: PlasticPotential,
{
    let props: &MaterialProperties = input.props;
    let relative = stress - state.back_stress;
    let f = yield_surface.yield_derivative(&relative, props)?;
    let g = potential.potential_derivative(&relative, props)?;

    let dissipation_rate =
        dissipation_factor(props, input.characteristic_length, stress)? * stress.dot(&g);
    let mut denominator = f.dot(&(input.elastic * g))
        + threshold.slope_dissipation * dissipation_rate
        + threshold.slope_plastic_strain * equivalent_strain(&g);
    if let Some(rule) = kinematic {
        let dissipated = state.plastic_dissipation - input.state.plastic_dissipation;
        denominator += f.dot(&rule.slope(&state.back_stress, &g, increment, dissipation_rate, dissipated));
    }

    if !(denominator > 0.0) {
        return Err(CLError::IllPosedStep(format!(
            "non-positive plastic modulus {denominator:e}"
        )));
    }
    Ok((denominator, g))
}
