//! Sectional stiffness matrix by quadrature over triangle fans
//!
//! Generalized strains `(ε0, κx, κy)` produce the strain field
//! `ε(x, y) = ε0 + κx·y + κy·x`. The matrix relating them to `(N, Mx, My)` is
//!
//! ```text
//! K = E_ref Σ w_k ∫ [1, y, x]ᵀ [1, y, x] dA
//! ```
//!
//! Every polygon is split into a fan of triangles around its vertex mean and
//! each triangle is integrated with a fixed-point rule.

use crate::geometry::{Point, Polygon, Section};
use crate::math::{Mat3, TriangleRule, Vec3};

/// Stiffness matrix about the local origin of the section plane
pub fn stiffness_matrix(section: &Section, weights: &[f64], e_ref: f64, rule: TriangleRule) -> Mat3 {
    stiffness_matrix_about(section, weights, e_ref, rule, Point::new(0.0, 0.0))
}

/// Stiffness matrix with curvatures measured from axes through `origin`
pub fn stiffness_matrix_about(
    section: &Section,
    weights: &[f64],
    e_ref: f64,
    rule: TriangleRule,
    origin: Point,
) -> Mat3 {
    let mut k = Mat3::zeros();
    for (polygon, &w) in section.polygons().iter().zip(weights) {
        if w == 0.0 {
            continue;
        }
        k += polygon_stiffness(polygon, rule, origin) * (e_ref * w);
    }
    k
}

fn polygon_stiffness(polygon: &Polygon, rule: TriangleRule, origin: Point) -> Mat3 {
    let vertices = polygon.vertices();
    let n = vertices.len() as f64;
    let hub = Point::new(
        vertices.iter().map(|v| v.x).sum::<f64>() / n,
        vertices.iter().map(|v| v.y).sum::<f64>() / n,
    );

    let mut k = Mat3::zeros();
    for (a, b) in polygon.edges() {
        let [s00, s01, s02, s11, s12, s22] = rule.integrate(hub, a, b, |p| {
            let shape = Vec3::new(1.0, p.y - origin.y, p.x - origin.x);
            [
                shape[0] * shape[0],
                shape[0] * shape[1],
                shape[0] * shape[2],
                shape[1] * shape[1],
                shape[1] * shape[2],
                shape[2] * shape[2],
            ]
        });
        #[rustfmt::skip]
        let block = Mat3::new(
            s00, s01, s02,
            s01, s11, s12,
            s02, s12, s22,
        );
        k += block;
    }
    k
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::integrals::PolygonIntegrals;
    use approx::assert_relative_eq;

    fn l_shape() -> Polygon {
        Polygon::new(
            "l",
            vec![
                Point::new(0.0, 0.0),
                Point::new(4.0, 0.0),
                Point::new(4.0, 1.0),
                Point::new(1.0, 1.0),
                Point::new(1.0, 3.0),
                Point::new(0.0, 3.0),
            ],
            1.0,
        )
        .unwrap()
    }

    #[test]
    fn test_matches_closed_form_integrals_on_concave_polygon() {
        let polygon = l_shape();
        let p = PolygonIntegrals::of(polygon.vertices());
        let section = Section::new(0.0, vec![polygon]).unwrap();

        for rule in [TriangleRule::Strang3, TriangleRule::Dunavant6] {
            let k = stiffness_matrix(&section, &[1.0], 210.0, rule);
            assert_relative_eq!(k[(0, 0)], 210.0 * p.area, epsilon = 1e-9);
            assert_relative_eq!(k[(0, 1)], 210.0 * p.qx, epsilon = 1e-9);
            assert_relative_eq!(k[(0, 2)], 210.0 * p.qy, epsilon = 1e-9);
            assert_relative_eq!(k[(1, 1)], 210.0 * p.ixx, epsilon = 1e-9);
            assert_relative_eq!(k[(1, 2)], 210.0 * p.ixy, epsilon = 1e-9);
            assert_relative_eq!(k[(2, 2)], 210.0 * p.iyy, epsilon = 1e-9);
            assert_relative_eq!(k, k.transpose(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_centroidal_matrix_decouples_axial_and_bending() {
        let section = Section::new(0.0, vec![l_shape()]).unwrap();
        let p = PolygonIntegrals::of(section.polygons()[0].vertices());
        let c = p.centroid().unwrap();
        let k = stiffness_matrix_about(&section, &[1.0], 1.0, TriangleRule::Dunavant6, c);
        assert_relative_eq!(k[(0, 1)], 0.0, epsilon = 1e-10);
        assert_relative_eq!(k[(0, 2)], 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_weights_scale_each_polygon() {
        let a = Polygon::rectangle("a", 0.0, 0.0, 1.0, 1.0, 2.0).unwrap();
        let section = Section::new(0.0, vec![a]).unwrap();
        let k = stiffness_matrix(&section, &[2.0], 1.0, TriangleRule::Strang3);
        assert_relative_eq!(k[(0, 0)], 2.0, epsilon = 1e-12);
        assert_relative_eq!(k[(1, 1)], 2.0 / 3.0, epsilon = 1e-12);
    }
}
