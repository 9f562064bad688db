//! Closed-form polygon integrals
//!
//! All quantities come from boundary sums over the closed vertex ring
//! (Green's theorem), so they are exact for any simple polygon and signed by
//! orientation: clockwise rings give negative area.

use serde::{Deserialize, Serialize};

use crate::geometry::{edges, Point};

/// Area, first and second moments of one polygon about the local origin
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonIntegrals {
    /// Signed area
    pub area: f64,
    /// First moment about the x-axis, `∫ y dA`
    pub qx: f64,
    /// First moment about the y-axis, `∫ x dA`
    pub qy: f64,
    /// `∫ y² dA`
    pub ixx: f64,
    /// `∫ x² dA`
    pub iyy: f64,
    /// `∫ x y dA`
    pub ixy: f64,
}

impl PolygonIntegrals {
    /// Integrate a closed vertex ring
    pub fn of(vertices: &[Point]) -> Self {
        let mut acc = Self::default();
        for (a, b) in edges(vertices) {
            let cross = a.x * b.y - b.x * a.y;
            acc.area += cross;
            acc.qx += (a.y + b.y) * cross;
            acc.qy += (a.x + b.x) * cross;
            acc.ixx += (a.y * a.y + a.y * b.y + b.y * b.y) * cross;
            acc.iyy += (a.x * a.x + a.x * b.x + b.x * b.x) * cross;
            acc.ixy += (a.x * b.y + 2.0 * a.x * a.y + 2.0 * b.x * b.y + b.x * a.y) * cross;
        }
        Self {
            area: acc.area / 2.0,
            qx: acc.qx / 6.0,
            qy: acc.qy / 6.0,
            ixx: acc.ixx / 12.0,
            iyy: acc.iyy / 12.0,
            ixy: acc.ixy / 24.0,
        }
    }

    /// Local centroid `(Qy / A, Qx / A)`, `None` for a zero-area ring
    pub fn centroid(&self) -> Option<Point> {
        if self.area == 0.0 {
            None
        } else {
            Some(Point::new(self.qy / self.area, self.qx / self.area))
        }
    }

    /// Second moments about axes through `c`, parallel to the local axes
    ///
    /// Parallel-axis shift written without dividing by the area:
    /// `∫ (y - cy)² dA = Ixx - 2 cy Qx + cy² A`.
    pub fn second_moments_about(&self, c: Point) -> (f64, f64, f64) {
        let ixx = self.ixx - 2.0 * c.y * self.qx + c.y * c.y * self.area;
        let iyy = self.iyy - 2.0 * c.x * self.qy + c.x * c.x * self.area;
        let ixy = self.ixy - c.x * self.qx - c.y * self.qy + c.x * c.y * self.area;
        (ixx, iyy, ixy)
    }

    /// First moment `∫ (y - y_ref) dA` about a horizontal axis at `y_ref`
    pub fn first_moment_about_y(&self, y_ref: f64) -> f64 {
        self.qx - y_ref * self.area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rect(x0: f64, y0: f64, b: f64, h: f64) -> Vec<Point> {
        vec![
            Point::new(x0, y0),
            Point::new(x0 + b, y0),
            Point::new(x0 + b, y0 + h),
            Point::new(x0, y0 + h),
        ]
    }

    #[test]
    fn test_rectangle_at_origin() {
        let (b, h) = (2.0, 3.0);
        let p = PolygonIntegrals::of(&rect(0.0, 0.0, b, h));
        assert_relative_eq!(p.area, b * h, epsilon = 1e-12);
        assert_relative_eq!(p.qx, b * h * h / 2.0, epsilon = 1e-12);
        assert_relative_eq!(p.qy, h * b * b / 2.0, epsilon = 1e-12);
        assert_relative_eq!(p.ixx, b * h.powi(3) / 3.0, epsilon = 1e-12);
        assert_relative_eq!(p.iyy, h * b.powi(3) / 3.0, epsilon = 1e-12);
        assert_relative_eq!(p.ixy, b * b * h * h / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_centroidal_rectangle() {
        let (b, h) = (2.0, 3.0);
        let p = PolygonIntegrals::of(&rect(5.0, -7.0, b, h));
        let c = p.centroid().unwrap();
        assert_relative_eq!(c.x, 6.0, epsilon = 1e-12);
        assert_relative_eq!(c.y, -5.5, epsilon = 1e-12);

        let (ixx, iyy, ixy) = p.second_moments_about(c);
        assert_relative_eq!(ixx, b * h.powi(3) / 12.0, epsilon = 1e-10);
        assert_relative_eq!(iyy, h * b.powi(3) / 12.0, epsilon = 1e-10);
        assert_relative_eq!(ixy, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_right_triangle_product_moment() {
        // Right triangle with legs b along x and h along y: Ixy_c = -b²h²/72
        let (b, h) = (3.0, 2.0);
        let tri = vec![Point::new(0.0, 0.0), Point::new(b, 0.0), Point::new(0.0, h)];
        let p = PolygonIntegrals::of(&tri);
        let (_, _, ixy) = p.second_moments_about(p.centroid().unwrap());
        assert_relative_eq!(ixy, -b * b * h * h / 72.0, epsilon = 1e-12);
    }

    #[test]
    fn test_clockwise_ring_is_negative() {
        let mut ring = rect(0.0, 0.0, 1.0, 1.0);
        ring.reverse();
        assert_relative_eq!(PolygonIntegrals::of(&ring).area, -1.0);
    }
}
