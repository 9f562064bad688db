use approx::assert_relative_eq;
use section_field::prelude::*;

fn flanged_field() -> ContinuousSectionField {
    let start = Section::new(
        1.0,
        vec![
            Polygon::rectangle("flange", -1.0, 0.9, 2.0, 0.1, 1.0).unwrap(),
            Polygon::rectangle("web", -0.05, 0.0, 0.1, 0.9, 1.0)
                .unwrap()
                .with_wall(Thickness::Explicit(0.1)),
        ],
    )
    .unwrap();
    let end = Section::new(
        4.0,
        vec![
            Polygon::rectangle("flange", -0.7, 1.4, 1.4, 0.15, 0.8).unwrap(),
            Polygon::rectangle("web", -0.04, 0.0, 0.08, 1.4, 1.2)
                .unwrap()
                .with_wall(Thickness::Explicit(0.08)),
        ],
    )
    .unwrap();
    ContinuousSectionField::new(start, end).unwrap()
}

#[test]
fn boundary_sections_are_reproduced_exactly() {
    let field = flanged_field();
    assert_eq!(&field.section(field.z0()).unwrap(), field.start());
    assert_eq!(&field.section(field.z1()).unwrap(), field.end());
}

#[test]
fn repeated_queries_are_bit_identical() {
    let field = flanged_field();
    let options = AnalysisOptions::default();
    for z in [1.0, 1.7, 2.5, 3.999] {
        let a = field.full_analysis_at(z, &options).unwrap();
        let b = field.full_analysis_at(z, &options).unwrap();
        for ((ka, va), (kb, vb)) in a.iter().zip(b.iter()) {
            assert_eq!(ka, kb);
            assert_eq!(va.to_bits(), vb.to_bits(), "{ka} differs at z = {z}");
        }
    }
}

#[test]
fn queries_outside_the_domain_are_rejected() {
    let field = flanged_field();
    for z in [0.999_999, 4.000_001, f64::NAN, f64::INFINITY] {
        assert!(
            matches!(field.section(z), Err(SectionError::OutOfDomain { .. })),
            "z = {z} accepted"
        );
    }
}

#[test]
fn weights_interpolate_linearly_without_laws() {
    let field = flanged_field();
    let mid = field.section(2.5).unwrap();
    assert_relative_eq!(mid.polygon("flange").unwrap().weight(), 0.9, epsilon = 1e-12);
    assert_relative_eq!(mid.polygon("web").unwrap().weight(), 1.1, epsilon = 1e-12);
    match mid.polygon("web").unwrap().tags().wall {
        Some(Thickness::Explicit(t)) => assert_relative_eq!(t, 0.09, epsilon = 1e-12),
        other => panic!("unexpected wall tag {other:?}"),
    }
}

#[test]
fn weight_law_overrides_linear_interpolation() {
    let mut field = flanged_field();
    field.set_weight_laws(&["web,web : w0 + (w1 - w0) * t^2"]).unwrap();

    let mid = field.section(2.5).unwrap();
    assert_relative_eq!(mid.polygon("web").unwrap().weight(), 1.05, epsilon = 1e-12);
    assert_relative_eq!(mid.polygon("flange").unwrap().weight(), 0.9, epsilon = 1e-12);

    assert!(field.set_weight_laws(&["web,flange : 1"]).is_err());
    assert!(field.set_weight_laws(&["web,web : sqrt("]).is_err());
    // A rejected table leaves the installed one in place
    assert_relative_eq!(field.section(2.5).unwrap().polygon("web").unwrap().weight(), 1.05, epsilon = 1e-12);
}

#[test]
fn mismatched_boundaries_are_rejected() {
    let start = Section::new(0.0, vec![Polygon::rectangle("a", 0.0, 0.0, 1.0, 1.0, 1.0).unwrap()]).unwrap();
    let triangle = Polygon::new(
        "a",
        vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)],
        1.0,
    )
    .unwrap();
    let end = Section::new(1.0, vec![triangle]).unwrap();
    assert!(matches!(
        ContinuousSectionField::new(start.clone(), end),
        Err(SectionError::VertexCountMismatch { .. })
    ));
    assert!(matches!(
        ContinuousSectionField::new(start.clone(), start.at(0.0)),
        Err(SectionError::InvalidInterval { .. })
    ));
}
