//! Constitutive laws
//!
//! A law owns the history of exactly one integration point. The
//! `calculate_*` calls are trial evaluations: they take `&self`, fill the
//! output slots of [`Parameters`] and never touch the committed state.
//! `finalize_*` repeats the evaluation and commits the resulting history.
//!
//! Small strain laws work with the infinitesimal strain and return the
//! same stress for every [`StressMeasure`]. Finite strain laws work with
//! the Green-Lagrange strain and a St. Venant-Kirchhoff predictor in the
//! reference configuration: the integrated stress is the second
//! Piola-Kirchhoff stress, pushed forward on request. The tangent returned
//! by finite strain laws is always the material tangent ∂S/∂E.

pub mod damage;
pub mod elastic;
pub mod plasticity;

pub use damage::DamageLaw;
pub use elastic::ElasticLaw;
pub use plasticity::{AssociativePlasticityLaw, PlasticityLaw};

use std::fmt::Debug;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CLError, CLResult};
use crate::integrators::HardeningRule;
use crate::math::kinematics::{
    green_lagrange_strain, infinitesimal_strain, kirchhoff_to_cauchy, pk2_to_kirchhoff,
};
use crate::math::{strain_vector_to_tensor, stress_vector_to_tensor, Dimension, Mat, Mat3, Mat6, Vec, Vec6};
use crate::options::TangentOperator;
use crate::parameters::{Parameters, StressMeasure};
use crate::properties::MaterialProperties;
use crate::state::{InternalLayout, InternalState};
use crate::surfaces::{DruckerPrager, Rankine, SimoJu, Tresca, VonMises, YieldSurface};
use crate::variables::{Variable, VariableKind};

/// Strain measure of a law
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kinematics {
    /// Infinitesimal strain, Cauchy stress
    SmallStrain,
    /// Green-Lagrange strain, second Piola-Kirchhoff stress
    FiniteStrain,
}

impl Default for Kinematics {
    fn default() -> Self {
        Self::SmallStrain
    }
}

/// Stress and trial history produced by one integration
#[derive(Debug, Clone)]
pub struct PointResponse {
    /// Stress conjugate to the law's strain measure
    pub stress: Vec6,
    pub state: InternalState,
    /// Scale of the elastic operator for the secant tangent
    pub secant_factor: f64,
}

/// Per-point constitutive law
pub trait ConstitutiveLaw: Debug + Send + Sync {
    fn dimension(&self) -> Dimension;

    fn kinematics(&self) -> Kinematics;

    /// Variables stored by the law and readable with `get_*`
    fn capabilities(&self) -> &'static [Variable];

    /// Layout of `Variable::InternalVariables`
    fn layout(&self) -> InternalLayout;

    /// Committed history
    fn state(&self) -> &InternalState;

    fn state_mut(&mut self) -> &mut InternalState;

    /// Validate the material properties before the first step
    fn check(&self, props: &MaterialProperties) -> CLResult<()>;

    /// Integrate a full Voigt strain against the committed history
    fn integrate(&self, strain: &Vec6, params: &Parameters) -> CLResult<PointResponse>;

    /// Equivalent stress used for `Variable::UniaxialStress`
    fn equivalent_stress(
        &self,
        _stress: &Vec6,
        _strain: &Vec6,
        _props: &MaterialProperties,
    ) -> CLResult<Option<f64>> {
        Ok(None)
    }

    /// True when the law evolves a back stress
    fn has_back_stress(&self) -> bool {
        false
    }

    fn boxed_clone(&self) -> Box<dyn ConstitutiveLaw>;

    fn strain_size(&self) -> usize {
        self.dimension().strain_size()
    }

    fn has(&self, variable: Variable) -> bool {
        self.capabilities().contains(&variable)
    }

    /// Stored variable of the given value kind
    fn stores(&self, variable: Variable, kind: VariableKind) -> bool {
        variable.kind() == kind && self.has(variable)
    }

    /// Trial evaluation; fills the requested output slots
    fn calculate_material_response(
        &self,
        params: &mut Parameters,
        measure: StressMeasure,
    ) -> CLResult<()> {
        respond(self, params, measure).map(|_| ())
    }

    fn calculate_material_response_cauchy(&self, params: &mut Parameters) -> CLResult<()> {
        self.calculate_material_response(params, StressMeasure::Cauchy)
    }

    fn calculate_material_response_pk2(&self, params: &mut Parameters) -> CLResult<()> {
        self.calculate_material_response(params, StressMeasure::PK2)
    }

    fn calculate_material_response_kirchhoff(&self, params: &mut Parameters) -> CLResult<()> {
        self.calculate_material_response(params, StressMeasure::Kirchhoff)
    }

    /// Evaluate and commit the history
    fn finalize_material_response(
        &mut self,
        params: &mut Parameters,
        measure: StressMeasure,
    ) -> CLResult<()> {
        let response = respond(&*self, params, measure)?;
        *self.state_mut() = response.state;
        Ok(())
    }

    fn finalize_material_response_cauchy(&mut self, params: &mut Parameters) -> CLResult<()> {
        self.finalize_material_response(params, StressMeasure::Cauchy)
    }

    fn finalize_material_response_pk2(&mut self, params: &mut Parameters) -> CLResult<()> {
        self.finalize_material_response(params, StressMeasure::PK2)
    }

    fn finalize_material_response_kirchhoff(&mut self, params: &mut Parameters) -> CLResult<()> {
        self.finalize_material_response(params, StressMeasure::Kirchhoff)
    }

    /// Read a stored scalar
    fn get_scalar(&self, variable: Variable) -> Option<f64> {
        if !self.stores(variable, VariableKind::Scalar) {
            return None;
        }
        let state = self.state();
        match variable {
            Variable::PlasticDissipation => Some(state.plastic_dissipation),
            Variable::Threshold => Some(state.threshold),
            Variable::Damage => Some(state.damage),
            _ => None,
        }
    }

    /// Read a stored vector into `out`, resizing it to the stored length
    fn get_vector(&self, variable: Variable, out: &mut Vec) -> bool {
        if !self.stores(variable, VariableKind::Vector) {
            return false;
        }
        match variable {
            Variable::PlasticStrainVector => {
                *out = self.dimension().condense(&self.state().plastic_strain);
                true
            }
            Variable::InternalVariables => {
                self.state().to_internal_variables(self.layout(), out);
                true
            }
            _ => false,
        }
    }

    /// Read a stored tensor into `out`
    fn get_matrix(&self, variable: Variable, out: &mut Mat) -> bool {
        if !self.stores(variable, VariableKind::Matrix) {
            return false;
        }
        match variable {
            Variable::PlasticStrainTensor => {
                *out = to_dynamic(&strain_vector_to_tensor(&self.state().plastic_strain));
                true
            }
            _ => false,
        }
    }

    fn set_scalar(&mut self, variable: Variable, value: f64) -> bool {
        if !self.stores(variable, VariableKind::Scalar) {
            return false;
        }
        let state = self.state_mut();
        match variable {
            Variable::PlasticDissipation => state.plastic_dissipation = value,
            Variable::Threshold => state.threshold = value,
            Variable::Damage => state.damage = value,
            _ => return false,
        }
        true
    }

    /// Overwrite a stored vector; only the leading stored length is read
    fn set_vector(&mut self, variable: Variable, values: &[f64]) -> bool {
        if !self.stores(variable, VariableKind::Vector) {
            return false;
        }
        match variable {
            Variable::InternalVariables => {
                let layout = self.layout();
                self.state_mut().apply_internal_variables(layout, values)
            }
            Variable::PlasticStrainVector => {
                let n = self.strain_size();
                if values.len() < n {
                    return false;
                }
                match self.dimension().expand(&Vec::from_column_slice(&values[..n])) {
                    Ok(full) => {
                        self.state_mut().plastic_strain = full;
                        true
                    }
                    Err(_) => false,
                }
            }
            _ => false,
        }
    }

    /// Derived scalar for the current parameters; `None` when unsupported
    fn calculate_value_scalar(
        &self,
        variable: Variable,
        params: &mut Parameters,
    ) -> CLResult<Option<f64>> {
        match variable {
            Variable::UniaxialStress => {
                let strain = strain_measure(self, params)?;
                let response = self.integrate(&strain, params)?;
                let relative = response.stress - response.state.back_stress;
                self.equivalent_stress(&relative, &strain, params.properties)
            }
            Variable::EquivalentPlasticStrain if self.layout() == InternalLayout::Plasticity => {
                let strain = strain_measure(self, params)?;
                let response = self.integrate(&strain, params)?;
                Ok(Some(response.state.equivalent_plastic_strain))
            }
            _ => Ok(self.get_scalar(variable)),
        }
    }

    /// Derived vector for the current parameters; `None` when unsupported
    fn calculate_value_vector(
        &self,
        variable: Variable,
        params: &mut Parameters,
    ) -> CLResult<Option<Vec>> {
        let dim = self.dimension();
        match variable {
            Variable::StrainVector => {
                let strain = strain_measure(self, params)?;
                Ok(Some(dim.condense(&strain)))
            }
            Variable::StressVector => {
                let strain = strain_measure(self, params)?;
                let response = self.integrate(&strain, params)?;
                let stress = push_forward(self, &response.stress, params, StressMeasure::Cauchy)?;
                Ok(Some(dim.condense(&stress)))
            }
            Variable::BackStressVector if self.has_back_stress() => {
                let strain = strain_measure(self, params)?;
                let response = self.integrate(&strain, params)?;
                Ok(Some(dim.condense(&response.state.back_stress)))
            }
            _ => {
                let mut out = Vec::zeros(0);
                Ok(self.get_vector(variable, &mut out).then_some(out))
            }
        }
    }

    /// Derived tensor for the current parameters; `None` when unsupported
    fn calculate_value_matrix(
        &self,
        variable: Variable,
        params: &mut Parameters,
    ) -> CLResult<Option<Mat>> {
        match variable {
            Variable::StrainTensor => {
                let strain = strain_measure(self, params)?;
                Ok(Some(to_dynamic(&strain_vector_to_tensor(&strain))))
            }
            Variable::StressTensor => {
                let strain = strain_measure(self, params)?;
                let response = self.integrate(&strain, params)?;
                let stress = push_forward(self, &response.stress, params, StressMeasure::Cauchy)?;
                Ok(Some(to_dynamic(&stress_vector_to_tensor(&stress))))
            }
            Variable::BackStressTensor if self.has_back_stress() => {
                let strain = strain_measure(self, params)?;
                let response = self.integrate(&strain, params)?;
                Ok(Some(to_dynamic(&stress_vector_to_tensor(&response.state.back_stress))))
            }
            Variable::ElasticConstitutiveMatrix => Ok(Some(
                self.dimension()
                    .condense_matrix(&params.properties.elastic_matrix()),
            )),
            _ => {
                let mut out = Mat::zeros(0, 0);
                Ok(self.get_matrix(variable, &mut out).then_some(out))
            }
        }
    }
}

impl Clone for Box<dyn ConstitutiveLaw> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}

fn to_dynamic(t: &Mat3) -> Mat {
    Mat::from_fn(3, 3, |i, j| t[(i, j)])
}

/// Strain in the law's measure, from the element or from F
///
/// When computed from F the strain slot of `params` is overwritten.
pub fn strain_measure<L>(law: &L, params: &mut Parameters) -> CLResult<Vec6>
where
    L: ConstitutiveLaw + ?Sized,
{
    let dim = law.dimension();
    if params.options.use_element_provided_strain {
        return dim.expand(&params.strain_vector);
    }
    let (f, _) = params.checked_deformation_gradient()?;
    let full = match law.kinematics() {
        Kinematics::SmallStrain => infinitesimal_strain(&f),
        Kinematics::FiniteStrain => green_lagrange_strain(&f),
    };
    params.strain_vector = dim.condense(&full);
    dim.expand(&params.strain_vector)
}

/// Convert the integrated stress to the requested measure
pub fn push_forward<L>(
    law: &L,
    stress: &Vec6,
    params: &Parameters,
    measure: StressMeasure,
) -> CLResult<Vec6>
where
    L: ConstitutiveLaw + ?Sized,
{
    match (law.kinematics(), measure) {
        (Kinematics::SmallStrain, _) | (Kinematics::FiniteStrain, StressMeasure::PK2) => Ok(*stress),
        (Kinematics::FiniteStrain, StressMeasure::Kirchhoff) => {
            let (f, _) = params.checked_deformation_gradient()?;
            Ok(pk2_to_kirchhoff(stress, &f))
        }
        (Kinematics::FiniteStrain, StressMeasure::Cauchy) => {
            let (f, det) = params.checked_deformation_gradient()?;
            Ok(kirchhoff_to_cauchy(&pk2_to_kirchhoff(stress, &f), det))
        }
    }
}

/// Central-difference tangent of the integrated stress
///
/// Only the columns of the law's external components are filled.
pub fn perturbation_tangent<L>(law: &L, strain: &Vec6, params: &Parameters) -> CLResult<Mat6>
where
    L: ConstitutiveLaw + ?Sized,
{
    let h = params.properties.integration.perturbation * strain.amax().max(1e-6);
    let mut tangent = Mat6::zeros();
    for &k in law.dimension().components() {
        let mut plus = *strain;
        plus[k] += h;
        let mut minus = *strain;
        minus[k] -= h;
        let s_plus = law.integrate(&plus, params)?.stress;
        let s_minus = law.integrate(&minus, params)?.stress;
        tangent.set_column(k, &((s_plus - s_minus) / (2.0 * h)));
    }
    Ok(tangent)
}

fn tangent<L>(law: &L, strain: &Vec6, params: &Parameters, response: &PointResponse) -> CLResult<Mat>
where
    L: ConstitutiveLaw + ?Sized,
{
    let c = params.properties.elastic_matrix();
    let full = match params.properties.integration.tangent {
        TangentOperator::Elastic => c,
        TangentOperator::Secant => response.secant_factor * c,
        TangentOperator::Perturbation => perturbation_tangent(law, strain, params)?,
    };
    Ok(law.dimension().condense_matrix(&full))
}

/// Shared body of calculate and finalize
fn respond<L>(law: &L, params: &mut Parameters, measure: StressMeasure) -> CLResult<PointResponse>
where
    L: ConstitutiveLaw + ?Sized,
{
    let strain = strain_measure(law, params)?;
    let response = law.integrate(&strain, params)?;
    if params.options.compute_stress {
        let stress = push_forward(law, &response.stress, params, measure)?;
        params.stress_vector = law.dimension().condense(&stress);
    }
    if params.options.compute_constitutive_tensor {
        params.constitutive_matrix = tangent(law, &strain, params, &response)?;
    }
    Ok(response)
}

/// Yield surfaces and plastic potentials selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceKind {
    VonMises,
    DruckerPrager,
    Tresca,
    Rankine,
}

/// Equivalent stress measures selectable for damage laws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasureKind {
    VonMises,
    DruckerPrager,
    Tresca,
    Rankine,
    SimoJu,
}

/// Law selection from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LawKind {
    Elastic,
    Plasticity {
        yield_surface: SurfaceKind,
        potential: SurfaceKind,
        hardening: HardeningRule,
    },
    Damage {
        measure: MeasureKind,
    },
}

impl LawKind {
    /// Create a law with a fresh history
    pub fn build(self, dimension: Dimension, kinematics: Kinematics) -> Box<dyn ConstitutiveLaw> {
        match self {
            Self::Elastic => Box::new(ElasticLaw::new(dimension, kinematics)),
            Self::Plasticity {
                yield_surface,
                potential,
                hardening,
            } => match yield_surface {
                SurfaceKind::VonMises => {
                    plasticity_law::<VonMises>(potential, hardening, dimension, kinematics)
                }
                SurfaceKind::DruckerPrager => {
                    plasticity_law::<DruckerPrager>(potential, hardening, dimension, kinematics)
                }
                SurfaceKind::Tresca => {
                    plasticity_law::<Tresca>(potential, hardening, dimension, kinematics)
                }
                SurfaceKind::Rankine => {
                    plasticity_law::<Rankine>(potential, hardening, dimension, kinematics)
                }
            },
            Self::Damage { measure } => match measure {
                MeasureKind::VonMises => Box::new(DamageLaw::<VonMises>::new(dimension, kinematics)),
                MeasureKind::DruckerPrager => {
                    Box::new(DamageLaw::<DruckerPrager>::new(dimension, kinematics))
                }
                MeasureKind::Tresca => Box::new(DamageLaw::<Tresca>::new(dimension, kinematics)),
                MeasureKind::Rankine => Box::new(DamageLaw::<Rankine>::new(dimension, kinematics)),
                MeasureKind::SimoJu => Box::new(DamageLaw::<SimoJu>::new(dimension, kinematics)),
            },
        }
    }
}

fn plasticity_law<Y>(
    potential: SurfaceKind,
    rule: HardeningRule,
    dimension: Dimension,
    kinematics: Kinematics,
) -> Box<dyn ConstitutiveLaw>
where
    Y: YieldSurface + 'static,
{
    match potential {
        SurfaceKind::VonMises => Box::new(PlasticityLaw::<Y, VonMises>::new(rule, dimension, kinematics)),
        SurfaceKind::DruckerPrager => {
            Box::new(PlasticityLaw::<Y, DruckerPrager>::new(rule, dimension, kinematics))
        }
        SurfaceKind::Tresca => Box::new(PlasticityLaw::<Y, Tresca>::new(rule, dimension, kinematics)),
        SurfaceKind::Rankine => Box::new(PlasticityLaw::<Y, Rankine>::new(rule, dimension, kinematics)),
    }
}

fn surface_from_name(name: &str) -> Option<SurfaceKind> {
    match name {
        "von_mises" => Some(SurfaceKind::VonMises),
        "drucker_prager" => Some(SurfaceKind::DruckerPrager),
        "tresca" => Some(SurfaceKind::Tresca),
        "rankine" => Some(SurfaceKind::Rankine),
        _ => None,
    }
}

impl FromStr for LawKind {
    type Err = CLError;

    /// Parse `elastic`, `plasticity:<yield>:<potential>:<isotropic|kinematic>`
    /// or `damage:<measure>`, with surfaces in snake case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || CLError::UnknownLaw(s.to_string());
        let parts: std::vec::Vec<&str> = s.trim().split(':').collect();
        match parts.as_slice() {
            ["elastic"] => Ok(Self::Elastic),
            ["plasticity", y, g, rule] => {
                let hardening = match *rule {
                    "isotropic" => HardeningRule::Isotropic,
                    "kinematic" => HardeningRule::Kinematic,
                    _ => return Err(unknown()),
                };
                Ok(Self::Plasticity {
                    yield_surface: surface_from_name(y).ok_or_else(unknown)?,
                    potential: surface_from_name(g).ok_or_else(unknown)?,
                    hardening,
                })
            }
            ["damage", "simo_ju"] => Ok(Self::Damage {
                measure: MeasureKind::SimoJu,
            }),
            ["damage", m] => {
                let measure = match surface_from_name(m).ok_or_else(unknown)? {
                    SurfaceKind::VonMises => MeasureKind::VonMises,
                    SurfaceKind::DruckerPrager => MeasureKind::DruckerPrager,
                    SurfaceKind::Tresca => MeasureKind::Tresca,
                    SurfaceKind::Rankine => MeasureKind::Rankine,
                };
                Ok(Self::Damage { measure })
            }
            _ => Err(unknown()),
        }
    }
}
