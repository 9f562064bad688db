//! Hole handling and the containment graph
//!
//! Two policies decide how polygon weights combine:
//!
//! * [`HolePolicy::Additive`] sums weights as given. A hole is an inner
//!   polygon with weight `-1.0` (or `-w` of its host).
//! * [`HolePolicy::Nested`] treats weights as absolute material values
//!   (`0.0` is a void). A containment graph is built and each polygon
//!   contributes `w - w_parent`, so nested regions replace their host
//!   instead of stacking on top of it.

use serde::{Deserialize, Serialize};

use crate::error::{SectionError, SectionResult};
use crate::geometry::{Polygon, Section};

/// How overlapping polygons combine their weights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolePolicy {
    /// Weights are summed as given; holes carry negative weight
    #[default]
    Additive,
    /// Weights are absolute; nested polygons replace their container
    Nested,
}

/// One polygon in the containment arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainmentNode {
    /// Index of the smallest polygon that contains this one
    pub parent: Option<usize>,
    /// Number of containers above this polygon
    pub depth: usize,
}

/// Parent/child relations between the polygons of one section
///
/// Nodes are stored in section order. A polygon contains another when every
/// vertex of the inner one lies inside it and its area is larger.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainmentGraph {
    nodes: Vec<ContainmentNode>,
}

impl ContainmentGraph {
    pub fn build(section: &Section) -> Self {
        let polygons = section.polygons();
        let areas: Vec<f64> = polygons.iter().map(|p| p.signed_area().abs()).collect();

        let mut parents = vec![None; polygons.len()];
        for (i, inner) in polygons.iter().enumerate() {
            let mut best: Option<usize> = None;
            for (j, outer) in polygons.iter().enumerate() {
                if i == j || areas[j] <= areas[i] || !contains(outer, inner) {
                    continue;
                }
                if best.map_or(true, |b| areas[j] < areas[b]) {
                    best = Some(j);
                }
            }
            parents[i] = best;
        }

        let nodes = (0..polygons.len())
            .map(|i| {
                let mut depth = 0;
                let mut cursor = parents[i];
                while let Some(p) = cursor {
                    depth += 1;
                    cursor = parents[p];
                }
                ContainmentNode {
                    parent: parents[i],
                    depth,
                }
            })
            .collect();

        Self { nodes }
    }

    pub fn nodes(&self) -> &[ContainmentNode] {
        &self.nodes
    }

    pub fn parent(&self, index: usize) -> Option<usize> {
        self.nodes.get(index).and_then(|n| n.parent)
    }

    pub fn depth(&self, index: usize) -> usize {
        self.nodes.get(index).map_or(0, |n| n.depth)
    }
}

fn contains(outer: &Polygon, inner: &Polygon) -> bool {
    inner.vertices().iter().all(|v| outer.contains_point(v))
}

/// Weight each polygon contributes to the homogenized integrals
pub fn effective_weights(section: &Section, policy: HolePolicy) -> SectionResult<Vec<f64>> {
    let polygons = section.polygons();
    match policy {
        HolePolicy::Additive => {
            if polygons.iter().any(|p| p.weight() == 0.0) {
                let graph = ContainmentGraph::build(section);
                for (i, polygon) in polygons.iter().enumerate() {
                    let host = graph.parent(i).map(|p| polygons[p].weight());
                    if polygon.weight() == 0.0 && host.is_some_and(|w| w > 0.0) {
                        log::warn!(
                            "Polygon '{}' at z = {} has weight 0 inside a positive-weight polygon; \
                             under the additive hole policy it removes nothing (use weight -1 or the nested policy)",
                            polygon.name(),
                            section.z()
                        );
                    }
                }
            }
            Ok(polygons.iter().map(Polygon::weight).collect())
        }
        HolePolicy::Nested => {
            if let Some(p) = polygons.iter().find(|p| p.weight() < 0.0) {
                return Err(SectionError::InvalidInput(format!(
                    "polygon '{}' has negative weight {}; the nested hole policy expects absolute weights (0 for voids)",
                    p.name(),
                    p.weight()
                )));
            }
            let graph = ContainmentGraph::build(section);
            Ok(polygons
                .iter()
                .enumerate()
                .map(|(i, p)| match graph.parent(i) {
                    Some(parent) => p.weight() - polygons[parent].weight(),
                    None => p.weight(),
                })
                .collect())
        }
    }
}
