//! Volume of a member by quadrature of the homogenized area along `z`

use serde::{Deserialize, Serialize};

use super::containment::effective_weights;
use super::homogenize::Homogenized;
use crate::analysis::AnalysisOptions;
use crate::error::SectionResult;
use crate::field::ContinuousSectionField;
use crate::math::QuadratureRule;

/// How `∫ A(z) dz` is sampled along the member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadratureSpec {
    pub rule: QuadratureRule,
    /// Number of equal panels the interval is split into
    #[serde(default = "default_subintervals")]
    pub subintervals: usize,
}

fn default_subintervals() -> usize {
    1
}

impl Default for QuadratureSpec {
    fn default() -> Self {
        Self::gauss_legendre(5)
    }
}

impl QuadratureSpec {
    /// Gauss–Legendre rule with `n` interior points
    pub fn gauss_legendre(n: usize) -> Self {
        Self {
            rule: QuadratureRule::GaussLegendre(n),
            subintervals: 1,
        }
    }

    /// Gauss–Lobatto rule with `n` points including both field ends
    pub fn gauss_lobatto(n: usize) -> Self {
        Self {
            rule: QuadratureRule::GaussLobatto(n),
            subintervals: 1,
        }
    }

    /// Split the interval into equal panels
    pub fn with_subintervals(mut self, subintervals: usize) -> Self {
        self.subintervals = subintervals;
        self
    }
}

/// Weighted volume `∫ A(z) dz` over `[z0, z1]`
pub fn integrate_volume(
    field: &ContinuousSectionField,
    spec: &QuadratureSpec,
    options: &AnalysisOptions,
) -> SectionResult<f64> {
    spec.rule.integrate(field.z0(), field.z1(), spec.subintervals, |z| {
        let section = field.section(z)?;
        let weights = effective_weights(&section, options.hole_policy)?;
        Ok(Homogenized::compute(&section, &weights, options.tolerance)?.area)
    })
}
