//! Data-parallel updates over many integration points
//!
//! Each law owns its history and each `Parameters` record its output slots,
//! so points are processed independently. Material properties are shared by
//! reference.

use rayon::prelude::*;

use crate::error::{CLError, CLResult};
use crate::laws::ConstitutiveLaw;
use crate::parameters::{Parameters, StressMeasure};

fn check_lengths(laws: usize, params: usize) -> CLResult<()> {
    if laws != params {
        return Err(CLError::DimensionMismatch {
            expected: laws,
            found: params,
        });
    }
    Ok(())
}

/// Trial evaluation of every point
pub fn calculate_points<L: ConstitutiveLaw>(
    laws: &[L],
    params: &mut [Parameters],
    measure: StressMeasure,
) -> CLResult<()> {
    check_lengths(laws.len(), params.len())?;
    laws.par_iter()
        .zip(params.par_iter_mut())
        .try_for_each(|(law, p)| law.calculate_material_response(p, measure))
}

/// Evaluate and commit every point
///
/// Stops at the first failing point; points already processed keep their
/// committed history.
pub fn finalize_points<L: ConstitutiveLaw>(
    laws: &mut [L],
    params: &mut [Parameters],
    measure: StressMeasure,
) -> CLResult<()> {
    check_lengths(laws.len(), params.len())?;
    laws.par_iter_mut()
        .zip(params.par_iter_mut())
        .try_for_each(|(law, p)| law.finalize_material_response(p, measure))
}
