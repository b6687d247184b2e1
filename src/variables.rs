//! Typed variables exposed by constitutive laws
//!
//! Each law advertises a fixed capability set at construction. Queries for
//! variables outside that set, or with the wrong value kind, return `None`
//! (reads) or `false` (writes).

use serde::{Deserialize, Serialize};

/// Value category of a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Scalar,
    Vector,
    Matrix,
}

/// Named quantity readable from (and sometimes writable to) a law
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variable {
    PlasticDissipation,
    Threshold,
    Damage,
    UniaxialStress,
    EquivalentPlasticStrain,
    PlasticStrainVector,
    BackStressVector,
    InternalVariables,
    StressVector,
    StrainVector,
    PlasticStrainTensor,
    BackStressTensor,
    StressTensor,
    StrainTensor,
    ElasticConstitutiveMatrix,
}

impl Variable {
    pub fn kind(self) -> VariableKind {
        match self {
            Self::PlasticDissipation
            | Self::Threshold
            | Self::Damage
            | Self::UniaxialStress
            | Self::EquivalentPlasticStrain => VariableKind::Scalar,
            Self::PlasticStrainVector
            | Self::BackStressVector
            | Self::InternalVariables
            | Self::StressVector
            | Self::StrainVector => VariableKind::Vector,
            Self::PlasticStrainTensor
            | Self::BackStressTensor
            | Self::StressTensor
            | Self::StrainTensor
            | Self::ElasticConstitutiveMatrix => VariableKind::Matrix,
        }
    }
}

/// Stored variables of the elastic law
pub const ELASTIC_VARIABLES: &[Variable] = &[];

/// Stored variables of the plasticity laws
pub const PLASTICITY_VARIABLES: &[Variable] = &[
    Variable::PlasticDissipation,
    Variable::PlasticStrainVector,
    Variable::PlasticStrainTensor,
    Variable::InternalVariables,
];

/// Stored variables of the damage law
pub const DAMAGE_VARIABLES: &[Variable] = &[
    Variable::Damage,
    Variable::Threshold,
    Variable::InternalVariables,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_sets_are_disjoint_from_derived_values() {
        for derived in [
            Variable::UniaxialStress,
            Variable::EquivalentPlasticStrain,
            Variable::BackStressVector,
            Variable::BackStressTensor,
        ] {
            assert!(!PLASTICITY_VARIABLES.contains(&derived));
        }
        assert!(DAMAGE_VARIABLES.contains(&Variable::InternalVariables));
    }

    #[test]
    fn test_variable_kinds() {
        assert_eq!(Variable::Damage.kind(), VariableKind::Scalar);
        assert_eq!(Variable::InternalVariables.kind(), VariableKind::Vector);
        assert_eq!(Variable::StressTensor.kind(), VariableKind::Matrix);
    }
}
