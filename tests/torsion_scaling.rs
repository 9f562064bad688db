use approx::assert_relative_eq;
use section_field::prelude::*;

/// Square box of side `b` and wall `t` as a slit-encoded ring
fn box_cell(b: f64, t: f64) -> Polygon {
    let vertices = vec![
        Point::new(0.0, 0.0),
        Point::new(b, 0.0),
        Point::new(b, b),
        Point::new(0.0, b),
        Point::new(0.0, 0.0),
        Point::new(t, t),
        Point::new(t, b - t),
        Point::new(b - t, b - t),
        Point::new(b - t, t),
        Point::new(t, t),
    ];
    Polygon::new("box", vertices, 1.0).unwrap().with_cell(Thickness::Explicit(t))
}

fn analyze(polygon: Polygon) -> AnalysisResult {
    let section = Section::new(0.0, vec![polygon]).unwrap();
    full_analysis(&section, &AnalysisOptions::default()).unwrap()
}

#[test]
fn cell_constant_matches_bredt_closed_form() {
    let (b, t) = (10.0, 1.0);
    let result = analyze(box_cell(b, t));
    let area_m = (b - t) * (b - t);
    let expected = 4.0 * area_m * area_m * t / (4.0 * (b - t));
    assert_relative_eq!(result.get(AnalysisKey::JCell), expected, max_relative = 1e-12);
    assert_eq!(result.get(AnalysisKey::JWall), 0.0);
}

#[test]
fn cell_scales_cubically_with_fixed_thickness() {
    let lambda = 1.7;
    let base = analyze(box_cell(10.0, 1.0)).get(AnalysisKey::JCell);
    let scaled = analyze(box_cell(10.0, 1.0).scaled(lambda)).get(AnalysisKey::JCell);
    assert_relative_eq!(scaled / base, lambda.powi(3), max_relative = 1e-10);
}

#[test]
fn cell_scales_quartically_when_thickness_scales_too() {
    let lambda = 1.7;
    let base = analyze(box_cell(10.0, 1.0)).get(AnalysisKey::JCell);
    let scaled = analyze(box_cell(10.0, 1.0).scaled(lambda).with_cell(Thickness::Explicit(lambda)))
        .get(AnalysisKey::JCell);
    assert_relative_eq!(scaled / base, lambda.powi(4), max_relative = 1e-10);
}

#[test]
fn open_wall_scales_quadratically_with_fixed_thickness() {
    let lambda = 2.5;
    let strip = Polygon::rectangle("wall", 0.0, 0.0, 10.0, 0.5, 1.0)
        .unwrap()
        .with_wall(Thickness::Explicit(0.5));
    let base = analyze(strip.clone()).get(AnalysisKey::JWall);
    let scaled = analyze(strip.scaled(lambda)).get(AnalysisKey::JWall);
    assert_relative_eq!(base, 10.0 * 0.125 / 3.0, max_relative = 1e-12);
    assert_relative_eq!(scaled / base, lambda.powi(2), max_relative = 1e-10);
}

#[test]
fn solid_estimate_scales_quartically() {
    let lambda = 3.0;
    let plate = Polygon::rectangle("plate", 0.0, 0.0, 4.0, 1.0, 1.0).unwrap();
    let base = analyze(plate.clone()).get(AnalysisKey::JSolid);
    let scaled = analyze(plate.scaled(lambda)).get(AnalysisKey::JSolid);
    assert_relative_eq!(scaled / base, lambda.powi(4), max_relative = 1e-10);
}

#[test]
fn ambiguous_tags_are_reported() {
    let strip = Polygon::rectangle("both", 0.0, 0.0, 10.0, 0.5, 1.0)
        .unwrap()
        .with_wall(Thickness::Explicit(0.5))
        .with_cell(Thickness::Inferred);
    let result = analyze(strip);
    assert_eq!(result.get(AnalysisKey::JWall), 0.0);
    assert!(result
        .warnings
        .iter()
        .any(|w| matches!(w, TorsionWarning::AmbiguousTags { polygon } if polygon == "both")));
}
