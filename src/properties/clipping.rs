//! Half-plane clipping and partial statical moments
//!
//! Polygons are clipped against `y >= y_cut` with a single
//! Sutherland–Hodgman pass. For concave input the output ring may run
//! along the cut line between separate pieces; those bridge edges are
//! traversed in both directions and cancel in every boundary integral.

use crate::geometry::{edges, Point, Section};

use super::integrals::PolygonIntegrals;

/// Clip a closed ring to the half-plane `y >= y_cut`
///
/// Returns `None` when nothing of the ring lies above the cut.
pub fn clip_above(vertices: &[Point], y_cut: f64) -> Option<Vec<Point>> {
    let inside = |p: &Point| p.y >= y_cut;
    let crossing = |a: &Point, b: &Point| {
        let s = (y_cut - a.y) / (b.y - a.y);
        Point::new(a.x + s * (b.x - a.x), y_cut)
    };

    let mut output = Vec::with_capacity(vertices.len() + 2);
    for (current, next) in edges(vertices) {
        match (inside(&current), inside(&next)) {
            (true, true) => output.push(next),
            (true, false) => output.push(crossing(&current, &next)),
            (false, true) => {
                output.push(crossing(&current, &next));
                output.push(next);
            }
            (false, false) => {}
        }
    }

    if output.len() < 3 {
        None
    } else {
        Some(output)
    }
}

/// Weighted first moment of the region above `y_cut` about the axis `y = y_ref`
///
/// `weights` are the effective polygon weights in section order.
pub(crate) fn partial_first_moment(section: &Section, weights: &[f64], y_cut: f64, y_ref: f64) -> f64 {
    section
        .polygons()
        .iter()
        .zip(weights)
        .filter_map(|(polygon, &w)| {
            let clipped = clip_above(polygon.vertices(), y_cut)?;
            let integrals = PolygonIntegrals::of(&clipped);
            if integrals.area == 0.0 {
                return None;
            }
            Some(w * integrals.first_moment_about_y(y_ref))
        })
        .sum()
}
