//! Bonded discrete-element contact
//!
//! A continuum bond between two spherical particles acts as a bar with the
//! cross section of the smaller particle. The bond carries compression
//! undamaged; in tension it softens linearly once the tensile strength is
//! reached, dissipating the fracture energy per unit area. Degenerate
//! geometry (zero area or zero initial distance) produces no force.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::CLResult;
use crate::math::Vec3;
use crate::properties::MaterialProperties;

/// Below this value an area or a distance counts as zero
const GEOMETRY_TOLERANCE: f64 = 1.0e-20;

/// Geometry of one bonded pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondGeometry {
    pub radius_1: f64,
    pub radius_2: f64,
    /// Centre distance when the bond was created
    pub initial_distance: f64,
    pub current_distance: f64,
    /// Relative tangential displacement of the contact point
    pub tangential_displacement: Vec3,
}

impl BondGeometry {
    /// Cross section π r_min²
    pub fn contact_area(&self) -> f64 {
        let r = self.radius_1.min(self.radius_2);
        PI * r * r
    }

    pub fn is_degenerate(&self) -> bool {
        self.contact_area() < GEOMETRY_TOLERANCE || self.initial_distance < GEOMETRY_TOLERANCE
    }

    /// Normal opening; positive in tension
    pub fn opening(&self) -> f64 {
        self.current_distance - self.initial_distance
    }
}

/// Forces transmitted by a bond
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondForces {
    /// Normal force, positive in compression
    pub normal: f64,
    pub tangential: Vec3,
    pub damage: f64,
}

/// History of one bond
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContinuumBond {
    damage: f64,
}

impl ContinuumBond {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn damage(&self) -> f64 {
        self.damage
    }

    pub fn is_broken(&self) -> bool {
        self.damage >= 1.0
    }

    /// Normal and shear stiffness (kn = E A / d0, kt = kn / (2 (1 + ν)))
    pub fn stiffness(geometry: &BondGeometry, props: &MaterialProperties) -> (f64, f64) {
        let kn = props.young_modulus * geometry.contact_area() / geometry.initial_distance;
        let kt = kn / (2.0 * (1.0 + props.poisson_ratio));
        (kn, kt)
    }

    /// Trial forces for the current geometry
    pub fn calculate_forces(
        &self,
        geometry: &BondGeometry,
        props: &MaterialProperties,
    ) -> CLResult<BondForces> {
        if geometry.is_degenerate() {
            return Ok(BondForces {
                normal: 0.0,
                tangential: Vec3::zeros(),
                damage: self.damage,
            });
        }
        let (kn, kt) = Self::stiffness(geometry, props);
        let opening = geometry.opening();
        let damage = if opening > 0.0 {
            self.damage.max(self.tensile_damage(geometry, props, opening)?)
        } else {
            self.damage
        };

        let normal = if opening > 0.0 {
            -(1.0 - damage) * kn * opening
        } else {
            -kn * opening
        };
        Ok(BondForces {
            normal,
            tangential: -(1.0 - damage) * kt * geometry.tangential_displacement,
            damage,
        })
    }

    /// Evaluate and commit the bond damage
    pub fn finalize(
        &mut self,
        geometry: &BondGeometry,
        props: &MaterialProperties,
    ) -> CLResult<BondForces> {
        let forces = self.calculate_forces(geometry, props)?;
        self.damage = forces.damage;
        Ok(forces)
    }

    /// Secant damage of the linear softening branch
    fn tensile_damage(
        &self,
        geometry: &BondGeometry,
        props: &MaterialProperties,
        opening: f64,
    ) -> CLResult<f64> {
        let strength = props.tension_yield()?;
        let elastic_limit = strength * geometry.initial_distance / props.young_modulus;
        if opening <= elastic_limit {
            return Ok(0.0);
        }
        let ultimate = match props.fracture_energy {
            Some(gf) => 2.0 * gf / strength,
            None => elastic_limit,
        };
        if opening >= ultimate || ultimate <= elastic_limit {
            return Ok(1.0);
        }
        Ok(1.0 - elastic_limit / opening * (ultimate - opening) / (ultimate - elastic_limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn geometry(current: f64) -> BondGeometry {
        BondGeometry {
            radius_1: 1.0,
            radius_2: 2.0,
            initial_distance: 3.0,
            current_distance: current,
            tangential_displacement: Vec3::new(0.0, 1e-3, 0.0),
        }
    }

    fn props() -> MaterialProperties {
        // elastic limit 3e-3, ultimate opening 1e-2
        MaterialProperties::new(1000.0, 0.25)
            .with_yield_stress(1.0)
            .with_fracture_energy(5e-3)
    }

    #[test]
    fn test_compression_is_elastic() {
        let bond = ContinuumBond::new();
        let forces = bond.calculate_forces(&geometry(2.99), &props()).unwrap();
        let kn = 1000.0 * PI / 3.0;
        assert_relative_eq!(forces.normal, kn * 0.01, epsilon = 1e-9);
        assert_relative_eq!(forces.tangential[1], -kn / 2.5 * 1e-3, epsilon = 1e-12);
        assert_eq!(forces.damage, 0.0);
    }

    #[test]
    fn test_tensile_softening_is_monotone() {
        let props = props();
        let mut bond = ContinuumBond::new();
        let peak = bond.finalize(&geometry(3.003), &props).unwrap();
        assert_relative_eq!(peak.normal, -PI, epsilon = 1e-9);

        let soft = bond.finalize(&geometry(3.006), &props).unwrap();
        assert!(soft.damage > 0.0);
        // stress on the softening line: σt (δu - δ) / (δu - δ0)
        assert_relative_eq!(soft.normal, -PI * 4.0 / 7.0, epsilon = 1e-9);

        let reclosed = bond.finalize(&geometry(3.001), &props).unwrap();
        assert_eq!(reclosed.damage, soft.damage);

        let broken = bond.finalize(&geometry(3.02), &props).unwrap();
        assert!(bond.is_broken());
        assert_eq!(broken.normal, 0.0);
    }

    #[test]
    fn test_degenerate_geometry_gives_zero_force() {
        let props = props();
        let bond = ContinuumBond::new();

        let mut zero_area = geometry(2.5);
        zero_area.radius_1 = 0.0;
        let forces = bond.calculate_forces(&zero_area, &props).unwrap();
        assert_eq!(forces.normal, 0.0);
        assert_eq!(forces.tangential, Vec3::zeros());

        let mut zero_distance = geometry(0.0);
        zero_distance.initial_distance = 0.0;
        let forces = bond.calculate_forces(&zero_distance, &props).unwrap();
        assert_eq!(forces.normal, 0.0);
        assert!(forces.normal.is_finite());
    }
}
