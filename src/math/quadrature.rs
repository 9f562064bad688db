//! Quadrature rules on triangles and on line intervals

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{SectionError, SectionResult};
use crate::geometry::Point;

/// Largest line rule; higher orders gain nothing in double precision
pub const MAX_QUADRATURE_POINTS: usize = 64;

/// Fixed-point rules on the reference triangle `(0,0), (1,0), (0,1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriangleRule {
    /// One point at the centroid, exact for linear integrands
    Centroid,
    /// Three interior points, exact for quadratic integrands
    Strang3,
    /// Six points, exact for quartic integrands
    #[default]
    Dunavant6,
}

impl TriangleRule {
    /// Points `(ξ, η, weight)`; weights sum to one
    pub fn points(self) -> &'static [(f64, f64, f64)] {
        const CENTROID: [(f64, f64, f64); 1] = [(1.0 / 3.0, 1.0 / 3.0, 1.0)];
        const STRANG3: [(f64, f64, f64); 3] = [
            (1.0 / 6.0, 1.0 / 6.0, 1.0 / 3.0),
            (2.0 / 3.0, 1.0 / 6.0, 1.0 / 3.0),
            (1.0 / 6.0, 2.0 / 3.0, 1.0 / 3.0),
        ];
        const A1: f64 = 0.445_948_490_915_965;
        const W1: f64 = 0.223_381_589_678_011;
        const A2: f64 = 0.091_576_213_509_771;
        const W2: f64 = 0.109_951_743_655_322;
        const DUNAVANT6: [(f64, f64, f64); 6] = [
            (A1, A1, W1),
            (1.0 - 2.0 * A1, A1, W1),
            (A1, 1.0 - 2.0 * A1, W1),
            (A2, A2, W2),
            (1.0 - 2.0 * A2, A2, W2),
            (A2, 1.0 - 2.0 * A2, W2),
        ];

        match self {
            TriangleRule::Centroid => &CENTROID,
            TriangleRule::Strang3 => &STRANG3,
            TriangleRule::Dunavant6 => &DUNAVANT6,
        }
    }

    /// Integrate `f` over the triangle `a, b, c`
    ///
    /// The result carries the sign of the triangle orientation, so fans over
    /// concave polygons still sum to the exact polygon integral.
    pub fn integrate<const N: usize>(self, a: Point, b: Point, c: Point, f: impl Fn(Point) -> [f64; N]) -> [f64; N] {
        let signed_area = 0.5 * ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y));
        let mut sum = [0.0; N];
        for &(xi, eta, w) in self.points() {
            let p = Point::new(
                a.x + xi * (b.x - a.x) + eta * (c.x - a.x),
                a.y + xi * (b.y - a.y) + eta * (c.y - a.y),
            );
            for (acc, value) in sum.iter_mut().zip(f(p)) {
                *acc += w * value;
            }
        }
        sum.map(|s| s * signed_area)
    }
}

/// One-dimensional Gauss rules on `[-1, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "points", rename_all = "snake_case")]
pub enum QuadratureRule {
    /// Interior points only, exact for degree `2n - 1`
    GaussLegendre(usize),
    /// Includes both end points, exact for degree `2n - 3`
    GaussLobatto(usize),
}

impl QuadratureRule {
    /// Nodes (ascending) and weights on `[-1, 1]`
    pub fn nodes_and_weights(self) -> SectionResult<(Vec<f64>, Vec<f64>)> {
        let n = self.point_count();
        if n > MAX_QUADRATURE_POINTS {
            return Err(SectionError::InvalidInput(format!(
                "at most {MAX_QUADRATURE_POINTS} quadrature points are supported, got {n}"
            )));
        }
        match self {
            QuadratureRule::GaussLegendre(n) if n >= 1 => Ok(gauss_legendre(n)),
            QuadratureRule::GaussLobatto(n) if n >= 2 => Ok(gauss_lobatto(n)),
            QuadratureRule::GaussLegendre(n) => Err(SectionError::InvalidInput(format!(
                "Gauss-Legendre needs at least 1 point, got {n}"
            ))),
            QuadratureRule::GaussLobatto(n) => Err(SectionError::InvalidInput(format!(
                "Gauss-Lobatto needs at least 2 points, got {n}"
            ))),
        }
    }

    /// Points per panel
    pub fn point_count(self) -> usize {
        match self {
            QuadratureRule::GaussLegendre(n) | QuadratureRule::GaussLobatto(n) => n,
        }
    }

    /// Integrate `f` over `[a, b]` split into `subintervals` equal panels
    pub fn integrate<F>(self, a: f64, b: f64, subintervals: usize, mut f: F) -> SectionResult<f64>
    where
        F: FnMut(f64) -> SectionResult<f64>,
    {
        if subintervals == 0 {
            return Err(SectionError::InvalidInput("at least one subinterval is required".to_string()));
        }
        let (nodes, weights) = self.nodes_and_weights()?;
        let h = (b - a) / subintervals as f64;

        let mut total = 0.0;
        for k in 0..subintervals {
            let lo = a + h * k as f64;
            let hi = if k + 1 == subintervals { b } else { lo + h };
            let (mid, half) = (0.5 * (lo + hi), 0.5 * (hi - lo));
            for (&x, &w) in nodes.iter().zip(&weights) {
                // Map the end nodes exactly onto the panel bounds
                let z = if x == -1.0 {
                    lo
                } else if x == 1.0 {
                    hi
                } else {
                    mid + half * x
                };
                total += half * w * f(z)?;
            }
        }
        Ok(total)
    }
}

/// Golub–Welsch: nodes are eigenvalues of the Jacobi matrix of the Legendre recurrence
fn gauss_legendre(n: usize) -> (Vec<f64>, Vec<f64>) {
    let mut jacobi = DMatrix::<f64>::zeros(n, n);
    for k in 1..n {
        let kf = k as f64;
        let beta = kf / (4.0 * kf * kf - 1.0).sqrt();
        jacobi[(k - 1, k)] = beta;
        jacobi[(k, k - 1)] = beta;
    }

    let eigen = jacobi.symmetric_eigen();
    let mut pairs: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            let v0 = eigen.eigenvectors[(0, i)];
            (eigen.eigenvalues[i], 2.0 * v0 * v0)
        })
        .collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    // Symmetrize to remove round-off asymmetry between mirrored nodes
    for i in 0..n / 2 {
        let j = n - 1 - i;
        let x = 0.5 * (pairs[j].0 - pairs[i].0);
        let w = 0.5 * (pairs[i].1 + pairs[j].1);
        pairs[i] = (-x, w);
        pairs[j] = (x, w);
    }
    if n % 2 == 1 {
        pairs[n / 2].0 = 0.0;
    }

    pairs.into_iter().unzip()
}

/// Legendre polynomials `(P_{m-1}(x), P_m(x))`
fn legendre_pair(m: usize, x: f64) -> (f64, f64) {
    let (mut p_prev, mut p) = (1.0, x);
    if m == 0 {
        return (0.0, 1.0);
    }
    for k in 2..=m {
        let kf = k as f64;
        let next = ((2.0 * kf - 1.0) * x * p - (kf - 1.0) * p_prev) / kf;
        p_prev = p;
        p = next;
    }
    (p_prev, p)
}

/// End points plus the roots of `P'_{n-1}`, refined by Newton iteration
fn gauss_lobatto(n: usize) -> (Vec<f64>, Vec<f64>) {
    let m = n - 1;
    let mf = m as f64;

    let mut nodes: Vec<f64> = (0..n)
        .map(|i| {
            if i == 0 {
                -1.0
            } else if i == m {
                1.0
            } else {
                let mut x = -(std::f64::consts::PI * i as f64 / mf).cos();
                for _ in 0..100 {
                    let (p_prev, p) = legendre_pair(m, x);
                    let dx = (x * p - p_prev) / (n as f64 * p);
                    x -= dx;
                    if dx.abs() < 1e-16 {
                        break;
                    }
                }
                x
            }
        })
        .collect();
    nodes.sort_by(f64::total_cmp);

    let weights = nodes
        .iter()
        .map(|&x| {
            let (_, p) = legendre_pair(m, x);
            2.0 / (mf * n as f64 * p * p)
        })
        .collect();
    (nodes, weights)
}
