//! Polygon - a weighted, closed region of a cross-section

use serde::{Deserialize, Serialize};

use super::Point;
use crate::error::{SectionError, SectionResult};

/// Wall thickness attached to a torsion tag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Thickness {
    /// Thickness given by the caller
    Explicit(f64),
    /// Thickness derived from the polygon geometry
    Inferred,
}

/// Torsion role tags of a polygon
///
/// A polygon may carry both tags. That combination is accepted here and
/// reported as an ambiguity by the torsion module, which then uses the
/// closed-cell path only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolygonTags {
    /// Open thin-wall segment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall: Option<Thickness>,
    /// Closed thin-walled cell
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<Thickness>,
}

impl PolygonTags {
    pub fn is_plain(&self) -> bool {
        self.wall.is_none() && self.cell.is_none()
    }

    pub fn is_ambiguous(&self) -> bool {
        self.wall.is_some() && self.cell.is_some()
    }
}

/// A named, weighted polygon in the section plane
///
/// Vertices are an implicitly closed ring (the last vertex connects back to
/// the first). Polygons built through [`Polygon::new`] are validated:
/// at least three finite vertices and a strictly positive signed area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolygonData")]
pub struct Polygon {
    name: String,
    vertices: Vec<Point>,
    weight: f64,
    #[serde(skip_serializing_if = "PolygonTags::is_plain")]
    tags: PolygonTags,
}

/// Unvalidated polygon record, used for deserialization
#[derive(Debug, Clone, Deserialize)]
struct PolygonData {
    name: String,
    vertices: Vec<Point>,
    #[serde(default = "default_weight")]
    weight: f64,
    #[serde(default)]
    tags: PolygonTags,
}

fn default_weight() -> f64 {
    1.0
}

impl TryFrom<PolygonData> for Polygon {
    type Error = SectionError;

    fn try_from(data: PolygonData) -> SectionResult<Self> {
        Ok(Polygon::new(&data.name, data.vertices, data.weight)?.with_tags(data.tags))
    }
}

impl Polygon {
    /// Create a validated polygon
    pub fn new(name: &str, vertices: Vec<Point>, weight: f64) -> SectionResult<Self> {
        if vertices.len() < 3 {
            return Err(SectionError::TooFewVertices {
                name: name.to_string(),
                count: vertices.len(),
            });
        }
        if !vertices.iter().all(Point::is_finite) || !weight.is_finite() {
            return Err(SectionError::NonFiniteCoordinate(name.to_string()));
        }

        let area = shoelace_area(&vertices);
        if area <= 0.0 {
            return Err(SectionError::NonPositiveArea {
                name: name.to_string(),
                area,
            });
        }

        Ok(Self {
            name: name.to_string(),
            vertices,
            weight,
            tags: PolygonTags::default(),
        })
    }

    /// Create an axis-aligned rectangle from its lower-left corner
    pub fn rectangle(name: &str, x0: f64, y0: f64, width: f64, height: f64, weight: f64) -> SectionResult<Self> {
        Self::new(
            name,
            vec![
                Point::new(x0, y0),
                Point::new(x0 + width, y0),
                Point::new(x0 + width, y0 + height),
                Point::new(x0, y0 + height),
            ],
            weight,
        )
    }

    /// Create a regular `n`-gon inscribed in a circle of the given radius
    pub fn regular(name: &str, center: Point, radius: f64, n: usize, weight: f64) -> SectionResult<Self> {
        let vertices = (0..n)
            .map(|i| {
                let angle = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
                Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
            })
            .collect();
        Self::new(name, vertices, weight)
    }

    /// Build a polygon without validation.
    ///
    /// Interpolated polygons may twist or self-intersect between valid
    /// boundary states, so the field uses this path.
    pub(crate) fn from_parts(name: String, vertices: Vec<Point>, weight: f64, tags: PolygonTags) -> Self {
        Self {
            name,
            vertices,
            weight,
            tags,
        }
    }

    /// Tag the polygon as an open thin-wall segment
    pub fn with_wall(mut self, thickness: Thickness) -> Self {
        self.tags.wall = Some(thickness);
        self
    }

    /// Tag the polygon as a closed thin-walled cell
    pub fn with_cell(mut self, thickness: Thickness) -> Self {
        self.tags.cell = Some(thickness);
        self
    }

    pub fn with_tags(mut self, tags: PolygonTags) -> Self {
        self.tags = tags;
        self
    }

    /// Copy of the polygon with a different weight
    pub fn with_weight(&self, weight: f64) -> Self {
        Self {
            weight,
            ..self.clone()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn tags(&self) -> PolygonTags {
        self.tags
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Iterate over the closed ring of edges `(v[i], v[i+1])`, wrapping last to first
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        edges(&self.vertices)
    }

    /// Signed area (positive for counter-clockwise rings)
    pub fn signed_area(&self) -> f64 {
        shoelace_area(&self.vertices)
    }

    pub fn perimeter(&self) -> f64 {
        perimeter(&self.vertices)
    }

    /// Bounding box as `(min, max)` corners
    pub fn bounds(&self) -> (Point, Point) {
        bounds(&self.vertices)
    }

    /// Even-odd ray casting point containment test
    pub fn contains_point(&self, p: &Point) -> bool {
        let mut crossings = 0;
        for (v0, v1) in self.edges() {
            let (y_min, y_max) = if v0.y < v1.y { (v0.y, v1.y) } else { (v1.y, v0.y) };
            if p.y < y_min || p.y >= y_max {
                continue;
            }
            let t = (p.y - v0.y) / (v1.y - v0.y);
            let x_crossing = v0.x + t * (v1.x - v0.x);
            if x_crossing > p.x {
                crossings += 1;
            }
        }
        crossings % 2 == 1
    }

    /// Uniformly scale all vertices about the origin
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            vertices: self.vertices.iter().map(|v| v.scaled(factor)).collect(),
            ..self.clone()
        }
    }
}

/// Closed ring of edges over a vertex slice
pub(crate) fn edges(vertices: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let n = vertices.len();
    (0..n).map(move |i| (vertices[i], vertices[(i + 1) % n]))
}

pub(crate) fn shoelace_area(vertices: &[Point]) -> f64 {
    0.5 * edges(vertices)
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum::<f64>()
}

pub(crate) fn perimeter(vertices: &[Point]) -> f64 {
    edges(vertices).map(|(a, b)| a.distance_to(&b)).sum()
}

pub(crate) fn bounds(vertices: &[Point]) -> (Point, Point) {
    let mut min = Point::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for v in vertices {
        min.x = min.x.min(v.x);
        min.y = min.y.min(v.y);
        max.x = max.x.max(v.x);
        max.y = max.y.max(v.y);
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_area_and_perimeter() {
        let rect = Polygon::rectangle("r", 0.0, 0.0, 2.0, 3.0, 1.0).unwrap();
        assert!((rect.signed_area() - 6.0).abs() < 1e-12);
        assert!((rect.perimeter() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_clockwise_polygon_is_rejected() {
        let result = Polygon::new(
            "cw",
            vec![Point::new(0.0, 0.0), Point::new(0.0, 1.0), Point::new(1.0, 1.0), Point::new(1.0, 0.0)],
            1.0,
        );
        assert!(matches!(result, Err(SectionError::NonPositiveArea { .. })));
    }

    #[test]
    fn test_too_few_vertices() {
        let result = Polygon::new("line", vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)], 1.0);
        assert!(matches!(result, Err(SectionError::TooFewVertices { count: 2, .. })));
    }

    #[test]
    fn test_non_finite_vertex() {
        let result = Polygon::new(
            "nan",
            vec![Point::new(0.0, 0.0), Point::new(f64::NAN, 0.0), Point::new(1.0, 1.0)],
            1.0,
        );
        assert!(matches!(result, Err(SectionError::NonFiniteCoordinate(_))));
    }

    #[test]
    fn test_contains_point() {
        let rect = Polygon::rectangle("r", 0.0, 0.0, 2.0, 2.0, 1.0).unwrap();
        assert!(rect.contains_point(&Point::new(1.0, 1.0)));
        assert!(!rect.contains_point(&Point::new(3.0, 1.0)));
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"name": "p", "vertices": [{"x": 0, "y": 0}, {"x": 0, "y": 1}, {"x": 1, "y": 0}]}"#;
        let parsed: Result<Polygon, _> = serde_json::from_str(json);
        assert!(parsed.is_err());

        let json = r#"{"name": "p", "vertices": [{"x": 0, "y": 0}, {"x": 1, "y": 0}, {"x": 0, "y": 1}],
                       "tags": {"wall": {"explicit": 0.1}}}"#;
        let parsed: Polygon = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.weight(), 1.0);
        assert_eq!(parsed.tags().wall, Some(Thickness::Explicit(0.1)));
    }
}
