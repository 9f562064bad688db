//! Analysis options and the per-station analysis pipeline

use serde::{Deserialize, Serialize};

use crate::error::{SectionError, SectionResult};
use crate::geometry::Section;
use crate::math::{Mat3, TriangleRule};
use crate::properties::clipping::partial_first_moment;
use crate::properties::stiffness::{stiffness_matrix_about, stiffness_matrix as raw_stiffness};
use crate::properties::{effective_weights, DerivedProperties, Homogenized, HolePolicy, TorsionProperties};
use crate::results::{AnalysisResult, SectionProperties};

/// Options for sectional analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// How zero/negative weight polygons are combined with their hosts
    pub hole_policy: HolePolicy,
    /// Reference modulus multiplying the stiffness matrix
    pub e_ref: f64,
    /// Triangle rule used by the stiffness integration
    pub triangle_rule: TriangleRule,
    /// Relative tolerance below which the weighted area counts as zero
    pub tolerance: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            hole_policy: HolePolicy::Additive,
            e_ref: 1.0,
            triangle_rule: TriangleRule::Dunavant6,
            tolerance: 1e-12,
        }
    }
}

impl AnalysisOptions {
    /// Options with containment-aware hole subtraction
    pub fn nested() -> Self {
        Self {
            hole_policy: HolePolicy::Nested,
            ..Self::default()
        }
    }

    pub fn with_hole_policy(mut self, policy: HolePolicy) -> Self {
        self.hole_policy = policy;
        self
    }

    pub fn with_e_ref(mut self, e_ref: f64) -> Self {
        self.e_ref = e_ref;
        self
    }

    pub fn with_triangle_rule(mut self, rule: TriangleRule) -> Self {
        self.triangle_rule = rule;
        self
    }

    /// Set the degenerate-area tolerance
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }
}

fn homogenize(section: &Section, options: &AnalysisOptions) -> SectionResult<Homogenized> {
    let weights = effective_weights(section, options.hole_policy)?;
    Homogenized::compute(section, &weights, options.tolerance)
}

/// Every sectional property of one section, as typed values
pub fn section_properties(section: &Section, options: &AnalysisOptions) -> SectionResult<SectionProperties> {
    let base = homogenize(section, options)?;
    let derived = DerivedProperties::compute(section, &base);
    let torsion = TorsionProperties::compute(section, &base);
    let q_na = partial_first_moment(section, &base.weights, base.centroid.y, base.centroid.y);

    log::debug!(
        "Section z = {}: A = {:.6e}, Ix = {:.6e}, Iy = {:.6e}",
        section.z(),
        base.area,
        base.ixx,
        base.iyy
    );

    Ok(SectionProperties {
        base,
        derived,
        torsion,
        q_na,
    })
}

/// Full analysis of one section as an ordered key/value report
pub fn full_analysis(section: &Section, options: &AnalysisOptions) -> SectionResult<AnalysisResult> {
    let properties = section_properties(section, options)?;
    Ok(AnalysisResult::from_properties(&properties))
}

/// First moment of the area above `y = y_cut` about the centroidal x-axis
pub fn statical_moment(section: &Section, y_cut: f64, options: &AnalysisOptions) -> SectionResult<f64> {
    let (min, max) = section.bounds();
    if !y_cut.is_finite() || y_cut < min.y || y_cut > max.y {
        return Err(SectionError::CutOutOfRange {
            y_cut,
            y_min: min.y,
            y_max: max.y,
        });
    }
    let base = homogenize(section, options)?;
    Ok(partial_first_moment(section, &base.weights, y_cut, base.centroid.y))
}

/// Statical moment with the cut at the neutral axis, the maximum for most sections
pub fn statical_moment_at_centroid(section: &Section, options: &AnalysisOptions) -> SectionResult<f64> {
    let base = homogenize(section, options)?;
    Ok(partial_first_moment(section, &base.weights, base.centroid.y, base.centroid.y))
}

/// Axial/bending stiffness matrix about the local origin
pub fn stiffness_matrix(section: &Section, options: &AnalysisOptions) -> SectionResult<Mat3> {
    let weights = effective_weights(section, options.hole_policy)?;
    Ok(raw_stiffness(section, &weights, options.e_ref, options.triangle_rule))
}

/// Stiffness matrix about the homogenized centroid
///
/// The axial/bending coupling terms vanish up to quadrature round-off.
pub fn centroidal_stiffness_matrix(section: &Section, options: &AnalysisOptions) -> SectionResult<Mat3> {
    let base = homogenize(section, options)?;
    Ok(stiffness_matrix_about(
        section,
        &base.weights,
        options.e_ref,
        options.triangle_rule,
        base.centroid,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;
    use crate::results::AnalysisKey;
    use approx::assert_relative_eq;

    fn rectangle_section(b: f64, h: f64) -> Section {
        Section::new(0.0, vec![Polygon::rectangle("web", 0.0, 0.0, b, h, 1.0).unwrap()]).unwrap()
    }

    #[test]
    fn test_full_analysis_rectangle() {
        let (b, h) = (2.0, 4.0);
        let result = full_analysis(&rectangle_section(b, h), &AnalysisOptions::default()).unwrap();

        assert_relative_eq!(result.get(AnalysisKey::Area), b * h, epsilon = 1e-12);
        assert_relative_eq!(result.get(AnalysisKey::CentroidX), 1.0, epsilon = 1e-12);
        assert_relative_eq!(result.get(AnalysisKey::CentroidY), 2.0, epsilon = 1e-12);
        assert_relative_eq!(result.get(AnalysisKey::Ixx), b * h.powi(3) / 12.0, epsilon = 1e-10);
        assert_relative_eq!(result.get(AnalysisKey::Iyy), h * b.powi(3) / 12.0, epsilon = 1e-10);
        assert_relative_eq!(result.get(AnalysisKey::Ixy), 0.0, epsilon = 1e-10);
        assert_relative_eq!(result.get(AnalysisKey::I1), b * h.powi(3) / 12.0, epsilon = 1e-10);
        assert_relative_eq!(result.get(AnalysisKey::Wx), b * h * h / 6.0, epsilon = 1e-10);
        assert_relative_eq!(result.get(AnalysisKey::QNeutralAxis), b * h * h / 8.0, epsilon = 1e-10);
        assert_eq!(result.get(AnalysisKey::JWall), 0.0);
        assert_eq!(result.get(AnalysisKey::JCell), 0.0);
    }

    #[test]
    fn test_key_order_is_fixed() {
        let result = full_analysis(&rectangle_section(1.0, 1.0), &AnalysisOptions::default()).unwrap();
        let keys: Vec<&str> = result.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "A", "Cx", "Cy", "Ix", "Iy", "Ixy", "J", "I1", "I2", "theta_deg", "rx", "ry", "Wx", "Wy", "J_sv",
                "Q_na", "J_sv_wall", "J_sv_cell", "J_roark", "J_roark_fidelity",
            ]
        );
    }

    #[test]
    fn test_statical_moment_profile() {
        let (b, h) = (2.0, 4.0);
        let section = rectangle_section(b, h);
        let options = AnalysisOptions::default();

        // Q(y) = b/2 (h²/4 - (y - h/2)²)
        let q = statical_moment(&section, 3.0, &options).unwrap();
        assert_relative_eq!(q, b / 2.0 * (h * h / 4.0 - 1.0), epsilon = 1e-10);
        assert_relative_eq!(statical_moment(&section, h, &options).unwrap(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(statical_moment(&section, 0.0, &options).unwrap(), 0.0, epsilon = 1e-10);
        assert_relative_eq!(
            statical_moment_at_centroid(&section, &options).unwrap(),
            b * h * h / 8.0,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_statical_moment_rejects_out_of_range_cut() {
        let section = rectangle_section(1.0, 1.0);
        let err = statical_moment(&section, 1.5, &AnalysisOptions::default());
        assert!(matches!(err, Err(SectionError::CutOutOfRange { .. })));
        assert!(statical_moment(&section, f64::NAN, &AnalysisOptions::default()).is_err());
    }

    #[test]
    fn test_centroidal_stiffness_matrix() {
        let (b, h) = (2.0, 4.0);
        let options = AnalysisOptions::default().with_e_ref(210.0);
        let k = centroidal_stiffness_matrix(&rectangle_section(b, h), &options).unwrap();

        assert_relative_eq!(k[(0, 0)], 210.0 * b * h, epsilon = 1e-9);
        assert_relative_eq!(k[(1, 1)], 210.0 * b * h.powi(3) / 12.0, epsilon = 1e-9);
        assert_relative_eq!(k[(2, 2)], 210.0 * h * b.powi(3) / 12.0, epsilon = 1e-9);
        assert_relative_eq!(k[(0, 1)], 0.0, epsilon = 1e-9);
        assert_relative_eq!(k[(0, 2)], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: AnalysisOptions = serde_json::from_str(r#"{"hole_policy": "nested"}"#).unwrap();
        assert_eq!(options.hole_policy, HolePolicy::Nested);
        assert_eq!(options.e_ref, 1.0);
        assert_eq!(options.triangle_rule, TriangleRule::Dunavant6);
    }
}
