//! Mathematical utilities for section integration

pub mod quadrature;

use nalgebra::{Matrix2, Matrix3, Vector3};

pub use quadrature::{QuadratureRule, TriangleRule, MAX_QUADRATURE_POINTS};

pub type Mat2 = Matrix2<f64>;
pub type Mat3 = Matrix3<f64>;
pub type Vec3 = Vector3<f64>;
