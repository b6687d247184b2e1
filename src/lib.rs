//! FEM Constitutive - per integration point constitutive laws
//!
//! Stress update kernel for finite element codes:
//! - Yield surfaces and plastic potentials (von Mises, Drucker-Prager,
//!   Tresca, Rankine) plus the Simo-Ju damage measure
//! - Implicit return mapping with isotropic and kinematic hardening
//! - Isotropic damage with linear or exponential softening
//! - Small and finite strain laws with Cauchy, PK2 and Kirchhoff output
//! - Bonded discrete-element contact
//!
//! ## Example
//! ```rust
//! use fem_constitutive::prelude::*;
//!
//! let props = MaterialProperties::new(200e9, 0.3)
//!     .with_yield_stress(250e6)
//!     .with_linear_hardening(10e9);
//!
//! let mut law = PlasticityLaw::<VonMises, VonMises>::isotropic(
//!     Dimension::ThreeD,
//!     Kinematics::SmallStrain,
//! );
//! law.check(&props).unwrap();
//!
//! let strain = nalgebra::DVector::from_vec(vec![2e-3, 0.0, 0.0, 0.0, 0.0, 0.0]);
//! let mut params = Parameters::new(&props, Dimension::ThreeD).with_strain(strain);
//! law.finalize_material_response_cauchy(&mut params).unwrap();
//!
//! assert!(law.get_scalar(Variable::PlasticDissipation).is_some());
//! ```

pub mod batch;
pub mod contact;
pub mod driver;
pub mod error;
pub mod hardening;
pub mod integrators;
pub mod laws;
pub mod math;
pub mod options;
pub mod parameters;
pub mod properties;
pub mod state;
pub mod surfaces;
pub mod variables;

// Re-export common types
pub mod prelude {
    pub use crate::batch::{calculate_points, finalize_points};
    pub use crate::contact::{BondForces, BondGeometry, ContinuumBond};
    pub use crate::error::{CLError, CLResult};
    pub use crate::integrators::HardeningRule;
    pub use crate::laws::{
        AssociativePlasticityLaw, ConstitutiveLaw, DamageLaw, ElasticLaw, Kinematics, LawKind,
        PlasticityLaw,
    };
    pub use crate::math::Dimension;
    pub use crate::options::{IntegrationOptions, TangentOperator};
    pub use crate::parameters::{Parameters, ProcessInfo, StressMeasure};
    pub use crate::properties::{
        HardeningCurve, KinematicHardening, MaterialProperties, SofteningType,
    };
    pub use crate::state::InternalState;
    pub use crate::surfaces::{DruckerPrager, Rankine, SimoJu, Tresca, VonMises};
    pub use crate::variables::Variable;
}
