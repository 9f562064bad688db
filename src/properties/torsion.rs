//! Torsion constants
//!
//! Four estimates are produced and never substituted for one another:
//!
//! * `J_sv` - semi-empirical value for compact solid sections, always defined
//! * `J_sv_wall` - open thin-walled segments, `Σ b t³ / 3`
//! * `J_sv_cell` - closed thin-walled cells, Bredt–Batho `4 A_m² / ∮ ds/t`
//! * `J_roark` - wall segments with the rectangle correction of Roark,
//!   reported with a fidelity index

use serde::{Deserialize, Serialize};

use super::homogenize::Homogenized;
use crate::geometry::{perimeter, shoelace_area, Point, Polygon, Section, Thickness};

/// Denominator of the solid-section estimate `A⁴ / (40 Ip)`
const SOLID_TORSION_FACTOR: f64 = 40.0;

/// Relative distance under which two vertices are the same point
const COINCIDENT_TOLERANCE: f64 = 1e-12;

/// Non-fatal conditions found while computing torsion constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TorsionWarning {
    /// Polygon tagged as both wall and cell; only the cell path was used
    AmbiguousTags { polygon: String },
    /// Single-loop cell without an explicit thickness; contributes nothing
    CellWithoutThickness { polygon: String },
}

impl std::fmt::Display for TorsionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TorsionWarning::AmbiguousTags { polygon } => {
                write!(f, "polygon '{polygon}' is tagged both wall and cell; using the cell path only")
            }
            TorsionWarning::CellWithoutThickness { polygon } => {
                write!(f, "cell '{polygon}' has a single loop and no explicit thickness; ignored")
            }
        }
    }
}

/// All torsion estimates of one section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TorsionProperties {
    pub j_sv: f64,
    pub j_sv_wall: f64,
    pub j_sv_cell: f64,
    pub j_roark: f64,
    /// `1` for slender walls where the Roark correction is reliable, `0` for stout ones
    pub roark_fidelity: f64,
    pub warnings: Vec<TorsionWarning>,
}

impl TorsionProperties {
    /// Compute every estimate for a section with its effective weights
    pub fn compute(section: &Section, base: &Homogenized) -> Self {
        let mut result = Self {
            j_sv: solid_torsion(base.area, base.polar()),
            ..Self::default()
        };

        let mut fidelity_sum = 0.0;
        let mut fidelity_area = 0.0;

        for (polygon, &w) in section.polygons().iter().zip(&base.weights) {
            let tags = polygon.tags();
            if tags.is_ambiguous() {
                log::warn!(
                    "Polygon '{}' at z = {} is tagged both wall and cell; using the cell path only",
                    polygon.name(),
                    section.z()
                );
                result.warnings.push(TorsionWarning::AmbiguousTags {
                    polygon: polygon.name().to_string(),
                });
            }

            if let Some(thickness) = tags.cell {
                match cell_torsion(polygon.vertices(), thickness) {
                    Some(j) => result.j_sv_cell += w * j,
                    None => result.warnings.push(TorsionWarning::CellWithoutThickness {
                        polygon: polygon.name().to_string(),
                    }),
                }
            } else if let Some(thickness) = tags.wall {
                if let Some(segment) = WallSegment::of(polygon, thickness) {
                    result.j_sv_wall += w * segment.open_torsion();
                    result.j_roark += w * segment.roark_torsion();
                    fidelity_sum += segment.area * segment.fidelity();
                    fidelity_area += segment.area;
                }
            }
        }

        if fidelity_area > 0.0 {
            result.roark_fidelity = (fidelity_sum / fidelity_area).clamp(0.0, 1.0);
        }
        result
    }
}

/// Semi-empirical torsion constant of a compact section, `A⁴ / (40 Ip)`
///
/// Returns zero for a non-positive polar moment so it is defined for any
/// polygon set.
pub fn solid_torsion(area: f64, polar: f64) -> f64 {
    if polar > 0.0 && polar.is_finite() {
        area.powi(4) / (SOLID_TORSION_FACTOR * polar)
    } else {
        0.0
    }
}

/// Thin rectangular strip reduced to length `b` and thickness `t`
#[derive(Debug, Clone, Copy, PartialEq)]
struct WallSegment {
    area: f64,
    length: f64,
    thickness: f64,
}

impl WallSegment {
    fn of(polygon: &Polygon, thickness: Thickness) -> Option<Self> {
        let area = polygon.signed_area().abs();
        let t = match thickness {
            Thickness::Explicit(t) => t,
            Thickness::Inferred => {
                let p = polygon.perimeter();
                if p > 0.0 {
                    2.0 * area / p
                } else {
                    0.0
                }
            }
        };
        if area <= 0.0 || t <= 0.0 || !t.is_finite() {
            return None;
        }
        Some(Self {
            area,
            length: area / t,
            thickness: t,
        })
    }

    fn open_torsion(&self) -> f64 {
        self.length * self.thickness.powi(3) / 3.0
    }

    /// Longer and shorter side
    fn sides(&self) -> (f64, f64) {
        if self.length >= self.thickness {
            (self.length, self.thickness)
        } else {
            (self.thickness, self.length)
        }
    }

    fn roark_torsion(&self) -> f64 {
        let (a, c) = self.sides();
        let r = c / a;
        a * c.powi(3) * (1.0 / 3.0 - 0.21 * r * (1.0 - r.powi(4) / 12.0))
    }

    fn fidelity(&self) -> f64 {
        let (a, c) = self.sides();
        1.0 - c / a
    }
}

/// Bredt–Batho torsion constant of one cell polygon
///
/// `None` when a single-loop cell has no explicit thickness.
fn cell_torsion(vertices: &[Point], thickness: Thickness) -> Option<f64> {
    let explicit = match thickness {
        Thickness::Explicit(t) if t > 0.0 => Some(t),
        _ => None,
    };

    match split_slit_ring(vertices) {
        (outer, Some(inner)) => Some(ring_torsion(&outer, &inner, explicit)),
        (outer, None) => {
            let t = explicit?;
            let mut outer = outer;
            if shoelace_area(&outer) < 0.0 {
                outer.reverse();
            }
            let midline = inset(&outer, t / 2.0);
            let area_m = shoelace_area(&midline).max(0.0);
            let length_m = perimeter(&midline);
            Some(if length_m > 0.0 {
                4.0 * area_m * area_m * t / length_m
            } else {
                0.0
            })
        }
    }
}

/// Split `[outer..., outer[0], inner..., inner[0]]` into its two loops
///
/// The inner loop is returned counter-clockwise, starting at the vertex the
/// slit connects to.
fn split_slit_ring(vertices: &[Point]) -> (Vec<Point>, Option<Vec<Point>>) {
    let scale = vertices
        .iter()
        .map(|v| v.x.abs().max(v.y.abs()))
        .fold(0.0_f64, f64::max)
        .max(1.0);
    let same = |a: &Point, b: &Point| a.distance_to(b) <= COINCIDENT_TOLERANCE * scale;

    let Some(k) = (1..vertices.len()).find(|&k| same(&vertices[k], &vertices[0])) else {
        return (vertices.to_vec(), None);
    };

    let outer = vertices[..k].to_vec();
    let mut inner = vertices[k + 1..].to_vec();
    if inner.len() > 1 && same(&inner[0], &inner[inner.len() - 1]) {
        inner.pop();
    }
    if outer.len() < 3 || inner.len() < 3 {
        return (outer, None);
    }

    // Clockwise inner loop i0, i1, ..., i_{m-1} becomes i0, i_{m-1}, ..., i1
    if shoelace_area(&inner) < 0.0 {
        inner[1..].reverse();
    }
    (outer, Some(inner))
}

fn ring_torsion(outer: &[Point], inner: &[Point], explicit: Option<f64>) -> f64 {
    if outer.len() == inner.len() {
        let n = outer.len();
        let midline: Vec<Point> = outer.iter().zip(inner).map(|(o, i)| o.midpoint(i)).collect();
        let area_m = shoelace_area(&midline).abs();

        let mut ds_over_t = 0.0;
        for j in 0..n {
            let k = (j + 1) % n;
            let ds = midline[j].distance_to(&midline[k]);
            if ds == 0.0 {
                continue;
            }
            let t = match explicit {
                Some(t) => t,
                None => shoelace_area(&[outer[j], outer[k], inner[k], inner[j]]).abs() / ds,
            };
            if t > 0.0 {
                ds_over_t += ds / t;
            }
        }
        if ds_over_t > 0.0 {
            4.0 * area_m * area_m / ds_over_t
        } else {
            0.0
        }
    } else {
        let (a_out, a_in) = (shoelace_area(outer).abs(), shoelace_area(inner).abs());
        let area_m = 0.5 * (a_out + a_in);
        let length_m = 0.5 * (perimeter(outer) + perimeter(inner));
        if length_m <= 0.0 {
            return 0.0;
        }
        let t = explicit.unwrap_or((a_out - a_in) / length_m);
        4.0 * area_m * area_m * t / length_m
    }
}

/// Offset a counter-clockwise ring inwards by `distance` (mitred corners)
fn inset(ring: &[Point], distance: f64) -> Vec<Point> {
    let n = ring.len();
    let offset_line = |i: usize| {
        let (a, b) = (ring[i], ring[(i + 1) % n]);
        let len = a.distance_to(&b);
        let d = if len > 0.0 {
            Point::new((b.x - a.x) / len, (b.y - a.y) / len)
        } else {
            Point::new(0.0, 0.0)
        };
        // Left normal points inwards on a counter-clockwise ring
        (Point::new(a.x - d.y * distance, a.y + d.x * distance), d)
    };

    (0..n)
        .map(|i| {
            let (p1, d1) = offset_line((i + n - 1) % n);
            let (p2, d2) = offset_line(i);
            let denom = d1.x * d2.y - d1.y * d2.x;
            if denom.abs() < 1e-12 {
                p2
            } else {
                let s = ((p2.x - p1.x) * d2.y - (p2.y - p1.y) * d2.x) / denom;
                Point::new(p1.x + s * d1.x, p1.y + s * d1.y)
            }
        })
        .collect()
}
