//! Weighted (homogenized) area, centroid and inertia of a section

use serde::{Deserialize, Serialize};

use super::integrals::PolygonIntegrals;
use crate::error::{SectionError, SectionResult};
use crate::geometry::{Point, Section};

/// Homogenized base properties of a section at one station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Homogenized {
    /// Station coordinate
    pub z: f64,
    /// `Σ w_k A_k`
    pub area: f64,
    /// Global centroid
    pub centroid: Point,
    /// Centroidal second moment `∫ (y - Cy)² dA`, weighted
    pub ixx: f64,
    /// Centroidal second moment `∫ (x - Cx)² dA`, weighted
    pub iyy: f64,
    /// Centroidal product moment, weighted
    pub ixy: f64,
    /// Per-polygon integrals about the local origin, in section order
    pub polygons: Vec<PolygonIntegrals>,
    /// Effective weight per polygon, in section order
    pub weights: Vec<f64>,
}

impl Homogenized {
    /// Integrate a section with the given effective weights
    ///
    /// Fails with [`SectionError::DegenerateSection`] when the weighted area
    /// vanishes relative to `Σ |w_k A_k|` (scaled by `tolerance`).
    pub fn compute(section: &Section, weights: &[f64], tolerance: f64) -> SectionResult<Self> {
        if weights.len() != section.len() {
            return Err(SectionError::InvalidInput(format!(
                "{} weights for {} polygons",
                weights.len(),
                section.len()
            )));
        }

        let polygons: Vec<PolygonIntegrals> = section
            .polygons()
            .iter()
            .map(|p| PolygonIntegrals::of(p.vertices()))
            .collect();

        let mut area = 0.0;
        let mut scale = 0.0;
        let mut qx = 0.0;
        let mut qy = 0.0;
        for (p, &w) in polygons.iter().zip(weights) {
            area += w * p.area;
            scale += (w * p.area).abs();
            qx += w * p.qx;
            qy += w * p.qy;
        }
        if scale == 0.0 || area.abs() <= tolerance * scale {
            return Err(SectionError::DegenerateSection { z: section.z() });
        }

        let centroid = Point::new(qy / area, qx / area);

        // Parallel-axis shift of every polygon to the global centroid
        let (mut ixx, mut iyy, mut ixy) = (0.0, 0.0, 0.0);
        for (p, &w) in polygons.iter().zip(weights) {
            let (px, py, pxy) = p.second_moments_about(centroid);
            ixx += w * px;
            iyy += w * py;
            ixy += w * pxy;
        }

        Ok(Self {
            z: section.z(),
            area,
            centroid,
            ixx,
            iyy,
            ixy,
            polygons,
            weights: weights.to_vec(),
        })
    }

    /// Polar moment `J = Ixx + Iyy` about the centroid
    pub fn polar(&self) -> f64 {
        self.ixx + self.iyy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;
    use approx::assert_relative_eq;

    #[test]
    fn test_t_section() {
        // Flange 4 x 1 on top of a 1 x 3 web
        let section = Section::new(
            0.0,
            vec![
                Polygon::rectangle("flange", -2.0, 3.0, 4.0, 1.0, 1.0).unwrap(),
                Polygon::rectangle("web", -0.5, 0.0, 1.0, 3.0, 1.0).unwrap(),
            ],
        )
        .unwrap();
        let h = Homogenized::compute(&section, &[1.0, 1.0], 1e-12).unwrap();

        assert_relative_eq!(h.area, 7.0, epsilon = 1e-12);
        let cy = (4.0 * 3.5 + 3.0 * 1.5) / 7.0;
        assert_relative_eq!(h.centroid.y, cy, epsilon = 1e-12);
        assert_relative_eq!(h.centroid.x, 0.0, epsilon = 1e-12);

        let ixx = 4.0 / 12.0 + 4.0 * (3.5 - cy).powi(2) + 27.0 / 12.0 + 3.0 * (1.5 - cy).powi(2);
        assert_relative_eq!(h.ixx, ixx, epsilon = 1e-10);
        assert_relative_eq!(h.iyy, 64.0 / 12.0 + 3.0 / 12.0, epsilon = 1e-10);
        assert_relative_eq!(h.ixy, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_weights_scale_contribution() {
        let section = Section::new(
            0.0,
            vec![
                Polygon::rectangle("a", 0.0, 0.0, 1.0, 1.0, 1.0).unwrap(),
                Polygon::rectangle("b", 1.0, 0.0, 1.0, 1.0, 3.0).unwrap(),
            ],
        )
        .unwrap();
        let h = Homogenized::compute(&section, &[1.0, 3.0], 1e-12).unwrap();
        assert_relative_eq!(h.area, 4.0, epsilon = 1e-12);
        assert_relative_eq!(h.centroid.x, (0.5 + 3.0 * 1.5) / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_area_is_degenerate() {
        let section = Section::new(2.0, vec![Polygon::rectangle("a", 0.0, 0.0, 1.0, 1.0, 0.0).unwrap()]).unwrap();
        let result = Homogenized::compute(&section, &[0.0], 1e-12);
        assert!(matches!(result, Err(SectionError::DegenerateSection { z }) if z == 2.0));
    }
}
