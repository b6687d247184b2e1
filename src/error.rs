//! Error types for the constitutive kernel

use thiserror::Error;

/// Main error type for constitutive law operations
#[derive(Error, Debug)]
pub enum CLError {
    #[error("Material property '{0}' is not defined")]
    MissingProperty(&'static str),

    #[error("Invalid material property '{name}': {reason}")]
    InvalidProperty { name: &'static str, reason: String },

    #[error(
        "Fracture energy is too low: characteristic length {characteristic_length} exceeds the limit {limit}"
    )]
    FractureEnergyTooLow {
        characteristic_length: f64,
        limit: f64,
    },

    #[error("Return mapping did not converge after {iterations} iterations (residual {residual:e})")]
    ReturnMappingDiverged { iterations: usize, residual: f64 },

    #[error("Ill-posed plastic step: {0}")]
    IllPosedStep(String),

    #[error("Deformation gradient is singular or inverted (det F = {0})")]
    SingularDeformation(f64),

    #[error("Vector length mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("A deformation gradient is required for this call")]
    MissingDeformationGradient,

    #[error("Unknown constitutive law '{0}'")]
    UnknownLaw(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for constitutive law operations
pub type CLResult<T> = Result<T, CLError>;
