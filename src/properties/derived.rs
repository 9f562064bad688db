//! Principal axes, radii of gyration and elastic section moduli

use serde::{Deserialize, Serialize};

use super::homogenize::Homogenized;
use crate::geometry::Section;
use crate::math::Mat2;

/// Relative size of `Ixy` below which the axes are treated as principal
const SYMMETRY_TOLERANCE: f64 = 1e-12;

/// Principal moments and orientation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrincipalAxes {
    /// Major principal moment
    pub i1: f64,
    /// Minor principal moment
    pub i2: f64,
    /// Rotation of the principal axes from the local axes, degrees
    pub theta_deg: f64,
}

impl PrincipalAxes {
    /// Eigen-decomposition of the centroidal inertia tensor
    pub fn from_inertia(ixx: f64, iyy: f64, ixy: f64) -> Self {
        let tensor = Mat2::new(ixx, ixy, ixy, iyy);
        let eigen = tensor.symmetric_eigenvalues();
        let (i1, i2) = if eigen[0] >= eigen[1] {
            (eigen[0], eigen[1])
        } else {
            (eigen[1], eigen[0])
        };

        let scale = ixx.abs() + iyy.abs();
        let theta_deg = if ixy.abs() <= SYMMETRY_TOLERANCE * scale {
            0.0
        } else {
            0.5 * (2.0 * ixy).atan2(ixx - iyy).to_degrees()
        };

        Self { i1, i2, theta_deg }
    }
}

/// Properties derived from the centroidal integrals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedProperties {
    pub principal: PrincipalAxes,
    /// Radius of gyration about the centroidal x-axis
    pub rx: f64,
    /// Radius of gyration about the centroidal y-axis
    pub ry: f64,
    /// Largest vertex distance from the centroidal x-axis
    pub y_extreme: f64,
    /// Largest vertex distance from the centroidal y-axis
    pub x_extreme: f64,
    /// Elastic modulus `Ixx / y_extreme`
    pub wx: f64,
    /// Elastic modulus `Iyy / x_extreme`
    pub wy: f64,
}

impl DerivedProperties {
    pub fn compute(section: &Section, base: &Homogenized) -> Self {
        let c = base.centroid;
        let (mut x_extreme, mut y_extreme) = (0.0_f64, 0.0_f64);
        for v in section.polygons().iter().flat_map(|p| p.vertices()) {
            x_extreme = x_extreme.max((v.x - c.x).abs());
            y_extreme = y_extreme.max((v.y - c.y).abs());
        }

        let modulus = |i: f64, d: f64| if d > 0.0 { i / d } else { 0.0 };

        Self {
            principal: PrincipalAxes::from_inertia(base.ixx, base.iyy, base.ixy),
            rx: (base.ixx / base.area).sqrt(),
            ry: (base.iyy / base.area).sqrt(),
            y_extreme,
            x_extreme,
            wx: modulus(base.ixx, y_extreme),
            wy: modulus(base.iyy, x_extreme),
        }
    }
}
