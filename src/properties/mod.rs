//! Sectional property engine
//!
//! Integration runs in a fixed order for every query: effective weights
//! (hole policy), homogenized integrals, then the derived quantities
//! (principal axes, shear, torsion, stiffness).

pub mod clipping;
pub mod containment;
pub mod derived;
pub mod homogenize;
pub mod integrals;
pub mod stiffness;
pub mod torsion;
pub mod volume;

pub use containment::{effective_weights, ContainmentGraph, HolePolicy};
pub use derived::{DerivedProperties, PrincipalAxes};
pub use homogenize::Homogenized;
pub use integrals::PolygonIntegrals;
pub use torsion::{TorsionProperties, TorsionWarning};
pub use volume::{integrate_volume, QuadratureSpec};
