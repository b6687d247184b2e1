//! Single material point driver
//!
//! Runs a prescribed path of strains or deformation gradients through one
//! law, committing every step, and records the stress history.

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::CLResult;
use crate::laws::{ConstitutiveLaw, Kinematics, LawKind};
use crate::math::{Dimension, Mat3, Vec};
use crate::parameters::{Parameters, ProcessInfo, StressMeasure};
use crate::properties::MaterialProperties;
use crate::variables::Variable;

/// One prescribed step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStep {
    /// Voigt strain of the law's dimension
    Strain(std::vec::Vec<f64>),
    /// Deformation gradient, row by row
    DeformationGradient([[f64; 3]; 3]),
}

fn default_characteristic_length() -> f64 {
    1.0
}

fn default_measure() -> StressMeasure {
    StressMeasure::Cauchy
}

/// Driver configuration, usually read from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverInput {
    pub law: LawKind,
    #[serde(default)]
    pub dimension: Dimension,
    #[serde(default)]
    pub kinematics: Kinematics,
    pub properties: MaterialProperties,
    #[serde(default = "default_characteristic_length")]
    pub characteristic_length: f64,
    #[serde(default = "default_measure")]
    pub measure: StressMeasure,
    #[serde(default)]
    pub delta_time: f64,
    pub steps: std::vec::Vec<LoadStep>,
}

/// Committed response after one step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: usize,
    pub strain: std::vec::Vec<f64>,
    pub stress: std::vec::Vec<f64>,
    /// Equivalent stress of the committed step
    pub uniaxial_stress: f64,
    pub plastic_dissipation: Option<f64>,
    pub damage: Option<f64>,
    pub internal_variables: std::vec::Vec<f64>,
}

/// Run the whole path; stops at the first failing step
pub fn run(input: &DriverInput) -> CLResult<std::vec::Vec<StepRecord>> {
    let mut law = input.law.build(input.dimension, input.kinematics);
    law.check(&input.properties)?;
    info!(
        "driving {:?} ({:?}, {:?}) through {} steps",
        input.law,
        input.dimension,
        input.kinematics,
        input.steps.len()
    );

    let mut records = std::vec::Vec::with_capacity(input.steps.len());
    for (i, load) in input.steps.iter().enumerate() {
        let process_info = ProcessInfo {
            time: (i + 1) as f64 * input.delta_time,
            delta_time: input.delta_time,
            step: i + 1,
        };
        let params = Parameters::new(&input.properties, input.dimension)
            .with_characteristic_length(input.characteristic_length)
            .with_process_info(process_info);
        let mut params = match load {
            LoadStep::Strain(values) => {
                input.dimension.check_len(values.len())?;
                params.with_strain(Vec::from_column_slice(values))
            }
            LoadStep::DeformationGradient(rows) => {
                params.with_deformation_gradient(Mat3::from_fn(|r, c| rows[r][c]))
            }
        };
        law.finalize_material_response(&mut params, input.measure)?;
        records.push(record(law.as_ref(), &params, i + 1));
    }
    Ok(records)
}

/// Read a JSON driver input and run it
pub fn run_file<P: AsRef<Path>>(path: P) -> CLResult<std::vec::Vec<StepRecord>> {
    let text = std::fs::read_to_string(path)?;
    let input: DriverInput = serde_json::from_str(&text)?;
    run(&input)
}

fn record(law: &dyn ConstitutiveLaw, params: &Parameters, step: usize) -> StepRecord {
    let mut internal = Vec::zeros(0);
    if !law.get_vector(Variable::InternalVariables, &mut internal) {
        internal = Vec::zeros(0);
    }
    StepRecord {
        step,
        strain: params.strain_vector.iter().copied().collect(),
        stress: params.stress_vector.iter().copied().collect(),
        uniaxial_stress: law.state().uniaxial_stress,
        plastic_dissipation: law.get_scalar(Variable::PlasticDissipation),
        damage: law.get_scalar(Variable::Damage),
        internal_variables: internal.iter().copied().collect(),
    }
}
