//! Section - an immutable snapshot of a cross-section at one station

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Point, Polygon};
use crate::error::{SectionError, SectionResult};

/// A named collection of polygons at one longitudinal coordinate `z`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SectionData")]
pub struct Section {
    z: f64,
    polygons: Vec<Polygon>,
}

#[derive(Debug, Clone, Deserialize)]
struct SectionData {
    z: f64,
    polygons: Vec<Polygon>,
}

impl TryFrom<SectionData> for Section {
    type Error = SectionError;

    fn try_from(data: SectionData) -> SectionResult<Self> {
        Section::new(data.z, data.polygons)
    }
}

impl Section {
    /// Create a section, checking that `z` is finite and polygon names are unique
    pub fn new(z: f64, polygons: Vec<Polygon>) -> SectionResult<Self> {
        if !z.is_finite() {
            return Err(SectionError::InvalidInput(format!("section coordinate z = {z} is not finite")));
        }
        if polygons.is_empty() {
            return Err(SectionError::InvalidInput(format!("section at z = {z} has no polygons")));
        }
        let mut seen = HashSet::new();
        for polygon in &polygons {
            if !seen.insert(polygon.name()) {
                return Err(SectionError::DuplicatePolygonName(polygon.name().to_string()));
            }
        }
        Ok(Self { z, polygons })
    }

    /// Build from polygons already known to carry unique names
    pub(crate) fn from_parts(z: f64, polygons: Vec<Polygon>) -> Self {
        Self { z, polygons }
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Find a polygon by name
    pub fn polygon(&self, name: &str) -> SectionResult<&Polygon> {
        self.polygons
            .iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| SectionError::UnknownPolygon(name.to_string()))
    }

    /// Position of a polygon by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.polygons.iter().position(|p| p.name() == name)
    }

    /// Bounding box over all polygons as `(min, max)` corners
    pub fn bounds(&self) -> (Point, Point) {
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for polygon in &self.polygons {
            let (lo, hi) = polygon.bounds();
            min.x = min.x.min(lo.x);
            min.y = min.y.min(lo.y);
            max.x = max.x.max(hi.x);
            max.y = max.y.max(hi.y);
        }
        (min, max)
    }

    /// Copy of the section placed at another station
    pub fn at(&self, z: f64) -> Self {
        Self {
            z,
            polygons: self.polygons.clone(),
        }
    }

    /// Uniformly scale every polygon about the origin
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            z: self.z,
            polygons: self.polygons.iter().map(|p| p.scaled(factor)).collect(),
        }
    }
}
