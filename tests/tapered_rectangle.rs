use approx::assert_relative_eq;
use section_field::prelude::*;

/// b = 1, h grows from 1 to 2 over z in [0, 5]
fn tapered_rectangle() -> ContinuousSectionField {
    let start = Section::new(0.0, vec![Polygon::rectangle("r", 0.0, 0.0, 1.0, 1.0, 1.0).unwrap()]).unwrap();
    let end = Section::new(5.0, vec![Polygon::rectangle("r", 0.0, 0.0, 1.0, 2.0, 1.0).unwrap()]).unwrap();
    ContinuousSectionField::new(start, end).unwrap()
}

#[test]
fn properties_follow_the_taper() {
    let field = tapered_rectangle();
    let options = AnalysisOptions::default();

    for (z, h) in [(0.0, 1.0), (2.5, 1.5), (5.0, 2.0)] {
        let result = field.full_analysis_at(z, &options).unwrap();
        assert_relative_eq!(result.get(AnalysisKey::Area), h, epsilon = 1e-12);
        assert_relative_eq!(result.get(AnalysisKey::CentroidX), 0.5, epsilon = 1e-12);
        assert_relative_eq!(result.get(AnalysisKey::CentroidY), h / 2.0, epsilon = 1e-12);
        assert_relative_eq!(result.get(AnalysisKey::Ixx), h.powi(3) / 12.0, epsilon = 1e-12);
        assert_relative_eq!(result.get(AnalysisKey::Iyy), h / 12.0, epsilon = 1e-12);
        assert_relative_eq!(result.get(AnalysisKey::Ixy), 0.0, epsilon = 1e-12);
        assert_relative_eq!(result.get(AnalysisKey::QNeutralAxis), h * h / 8.0, epsilon = 1e-12);
    }
}

#[test]
fn volume_of_the_taper() {
    // ∫ (1 + z/5) dz over [0, 5]
    let field = tapered_rectangle();
    let volume = integrate_volume(&field, &QuadratureSpec::gauss_legendre(2), &AnalysisOptions::default()).unwrap();
    assert_relative_eq!(volume, 7.5, epsilon = 1e-12);
}

#[test]
fn stiffness_matches_integrals_along_the_taper() {
    let field = tapered_rectangle();
    let options = AnalysisOptions::default().with_triangle_rule(TriangleRule::Strang3);
    let section = field.section(2.5).unwrap();
    let k = centroidal_stiffness_matrix(&section, &options).unwrap();
    let props = section_properties(&section, &options).unwrap();

    assert_relative_eq!(k[(0, 0)], props.area(), epsilon = 1e-12);
    assert_relative_eq!(k[(1, 1)], props.base.ixx, epsilon = 1e-12);
    assert_relative_eq!(k[(2, 2)], props.base.iyy, epsilon = 1e-12);
}
