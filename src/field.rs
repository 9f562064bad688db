//! Continuous section field - ruled interpolation between two boundary sections

use std::collections::HashSet;
use std::sync::Arc;

use crate::analysis::{full_analysis, AnalysisOptions};
use crate::error::{SectionError, SectionResult};
use crate::geometry::{Point, Polygon, PolygonTags, Section, Thickness};
use crate::results::AnalysisResult;
use crate::weight::{EvalContext, WeightLawTable};

/// A member whose cross-section varies linearly between two stations
///
/// Corresponding polygons are paired once at construction; vertex `j` of a
/// pair moves on the straight line between its two boundary positions.
/// Queries never mutate the field. The weight-law table is the only
/// configurable state and is swapped as a whole.
#[derive(Debug, Clone)]
pub struct ContinuousSectionField {
    start: Section,
    end: Section,
    /// `(start index, end index)` per polygon pair, in start-section order
    pairs: Vec<(usize, usize)>,
    laws: Arc<WeightLawTable>,
}

impl ContinuousSectionField {
    /// Create a field pairing polygons by position
    pub fn new(start: Section, end: Section) -> SectionResult<Self> {
        check_counts(&start, &end)?;
        let pairs = (0..start.len()).map(|i| (i, i)).collect();
        Self::build(start, end, pairs)
    }

    /// Create a field from explicit `(start name, end name)` pairs
    ///
    /// Every polygon of each boundary section must appear in exactly one pair.
    pub fn with_name_pairs(start: Section, end: Section, names: &[(&str, &str)]) -> SectionResult<Self> {
        check_counts(&start, &end)?;
        if names.len() != start.len() {
            return Err(SectionError::InvalidInput(format!(
                "{} name pairs given for {} polygons",
                names.len(),
                start.len()
            )));
        }

        let mut used_start = HashSet::new();
        let mut used_end = HashSet::new();
        let mut pairs = Vec::with_capacity(names.len());
        for (a, b) in names {
            let i = start.index_of(a).ok_or_else(|| SectionError::UnknownPolygon(a.to_string()))?;
            let j = end.index_of(b).ok_or_else(|| SectionError::UnknownPolygon(b.to_string()))?;
            if !used_start.insert(i) || !used_end.insert(j) {
                return Err(SectionError::InvalidInput(format!(
                    "polygon pair '{a}' -> '{b}' reuses a polygon"
                )));
            }
            pairs.push((i, j));
        }
        pairs.sort_unstable();

        Self::build(start, end, pairs)
    }

    fn build(start: Section, end: Section, pairs: Vec<(usize, usize)>) -> SectionResult<Self> {
        if start.z() >= end.z() {
            return Err(SectionError::InvalidInterval {
                z0: start.z(),
                z1: end.z(),
            });
        }
        for &(i, j) in &pairs {
            let (p0, p1) = (&start.polygons()[i], &end.polygons()[j]);
            if p0.num_vertices() != p1.num_vertices() {
                return Err(SectionError::VertexCountMismatch {
                    start_name: p0.name().to_string(),
                    end_name: p1.name().to_string(),
                    start: p0.num_vertices(),
                    end: p1.num_vertices(),
                });
            }
        }

        log::debug!(
            "Built section field over [{}, {}] with {} polygon pairs",
            start.z(),
            end.z(),
            pairs.len()
        );

        Ok(Self {
            start,
            end,
            pairs,
            laws: Arc::new(WeightLawTable::new()),
        })
    }

    pub fn z0(&self) -> f64 {
        self.start.z()
    }

    pub fn z1(&self) -> f64 {
        self.end.z()
    }

    /// Field length `z1 - z0`
    pub fn length(&self) -> f64 {
        self.z1() - self.z0()
    }

    pub fn start(&self) -> &Section {
        &self.start
    }

    pub fn end(&self) -> &Section {
        &self.end
    }

    /// Polygon pairs as `(start polygon, end polygon)`
    pub fn pairs(&self) -> impl Iterator<Item = (&Polygon, &Polygon)> {
        self.pairs
            .iter()
            .map(|&(i, j)| (&self.start.polygons()[i], &self.end.polygons()[j]))
    }

    /// Current weight-law table
    pub fn weight_laws(&self) -> Arc<WeightLawTable> {
        Arc::clone(&self.laws)
    }

    /// Replace the weight-law table from `"startName,endName : expression"` entries
    ///
    /// All entries are parsed and checked against the field's polygon pairs
    /// before the old table is dropped; on error the field is unchanged.
    pub fn set_weight_laws<S: AsRef<str>>(&mut self, specs: &[S]) -> SectionResult<()> {
        let table = WeightLawTable::parse(specs)?;
        self.set_weight_law_table(table)
    }

    /// Replace the weight-law table with an already parsed one
    pub fn set_weight_law_table(&mut self, table: WeightLawTable) -> SectionResult<()> {
        for law in table.iter() {
            let i = self
                .start
                .index_of(law.start())
                .ok_or_else(|| SectionError::UnknownPolygon(law.start().to_string()))?;
            let j = self
                .end
                .index_of(law.end())
                .ok_or_else(|| SectionError::UnknownPolygon(law.end().to_string()))?;
            if !self.pairs.contains(&(i, j)) {
                return Err(SectionError::InvalidInput(format!(
                    "polygons '{}' and '{}' are not a corresponding pair",
                    law.start(),
                    law.end()
                )));
            }
        }
        log::debug!("Installed {} weight law(s)", table.len());
        self.laws = Arc::new(table);
        Ok(())
    }

    /// Interpolated section at `z` using the field's weight-law table
    pub fn section(&self, z: f64) -> SectionResult<Section> {
        self.section_with_laws(z, &self.laws)
    }

    /// Interpolated section at `z` using the given weight-law table
    ///
    /// Polygons carry the start polygon's name and follow the start order,
    /// except at `z1` where the end section's names and order are used.
    pub fn section_with_laws(&self, z: f64, laws: &WeightLawTable) -> SectionResult<Section> {
        let (z0, z1) = (self.z0(), self.z1());
        if !(z0..=z1).contains(&z) {
            return Err(SectionError::OutOfDomain { z, z0, z1 });
        }
        let t = (z - z0) / (z1 - z0);
        let at_end = t == 1.0;

        let mut pairs = self.pairs.clone();
        if at_end {
            pairs.sort_unstable_by_key(|&(_, j)| j);
        }

        let mut polygons = Vec::with_capacity(pairs.len());
        for (i, j) in pairs {
            let (p0, p1) = (&self.start.polygons()[i], &self.end.polygons()[j]);
            let vertices: Vec<Point> = p0
                .vertices()
                .iter()
                .zip(p1.vertices())
                .map(|(a, b)| a.lerp(b, t))
                .collect();

            let weight = match laws.get(p0.name()) {
                Some(law) => law.evaluate(&EvalContext {
                    z,
                    t,
                    w0: p0.weight(),
                    w1: p1.weight(),
                    length: z1 - z0,
                    current: &vertices,
                    start: p0.vertices(),
                    end: p1.vertices(),
                })?,
                None => lerp(p0.weight(), p1.weight(), t),
            };

            let tags = interpolate_tags(p0.tags(), p1.tags(), t);
            let name = if at_end { p1.name() } else { p0.name() };
            polygons.push(Polygon::from_parts(name.to_string(), vertices, weight, tags));
        }

        Ok(Section::from_parts(z, polygons))
    }

    /// `n` evenly spaced sections from `z0` to `z1` inclusive
    pub fn stations(&self, n: usize) -> SectionResult<Vec<Section>> {
        if n < 2 {
            return Err(SectionError::InvalidInput(format!("at least 2 stations required, got {n}")));
        }
        (0..n)
            .map(|k| {
                let z = if k == n - 1 {
                    self.z1()
                } else {
                    self.z0() + self.length() * k as f64 / (n - 1) as f64
                };
                self.section(z)
            })
            .collect()
    }

    /// Full property analysis of the interpolated section at `z`
    pub fn full_analysis_at(&self, z: f64, options: &AnalysisOptions) -> SectionResult<AnalysisResult> {
        full_analysis(&self.section(z)?, options)
    }
}

fn check_counts(start: &Section, end: &Section) -> SectionResult<()> {
    if start.len() != end.len() {
        return Err(SectionError::PolygonCountMismatch {
            start: start.len(),
            end: end.len(),
        });
    }
    Ok(())
}

/// `(1 - t) a + t b`, exact at both ends
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + t * b
}

/// Tags of an interpolated polygon
///
/// The boundary stations keep their own tags. Inside the field a tag present
/// at either end is kept: explicit thicknesses at both ends are interpolated,
/// otherwise the start tag wins when present and the end tag is used when not.
fn interpolate_tags(start: PolygonTags, end: PolygonTags, t: f64) -> PolygonTags {
    if t == 0.0 {
        return start;
    }
    if t == 1.0 {
        return end;
    }
    let thickness = |a: Option<Thickness>, b: Option<Thickness>| match (a, b) {
        (Some(Thickness::Explicit(ta)), Some(Thickness::Explicit(tb))) => Some(Thickness::Explicit(lerp(ta, tb, t))),
        (Some(a), _) => Some(a),
        (None, b) => b,
    };
    PolygonTags {
        wall: thickness(start.wall, end.wall),
        cell: thickness(start.cell, end.cell),
    }
}
