//! Section Field - continuous cross-section fields for tapered members
//!
//! A member is described by two boundary sections made of weighted
//! polygons. Intermediate sections are obtained by linear vertex
//! interpolation along `z`, and every section can be integrated into
//! homogenized sectional properties:
//! - Area, centroid and centroidal inertias (Green's theorem)
//! - Principal axes, radii of gyration and elastic moduli
//! - Partial statical moments for shear
//! - Torsion estimates for solid, open thin-walled and closed-cell sections
//! - Axial/bending stiffness matrix and member volume by quadrature
//!
//! Polygon weights vary along the member either linearly or through weight
//! laws such as `"web,web : w0 * (1 + 0.2 * z / L)"`.
//!
//! ## Example
//! ```rust
//! use section_field::prelude::*;
//!
//! let start = Section::new(0.0, vec![Polygon::rectangle("web", -0.5, 0.0, 1.0, 1.0, 1.0).unwrap()]).unwrap();
//! let end = Section::new(5.0, vec![Polygon::rectangle("web", -0.5, 0.0, 1.0, 2.0, 1.0).unwrap()]).unwrap();
//!
//! let field = ContinuousSectionField::new(start, end).unwrap();
//! let mid = field.section(2.5).unwrap();
//!
//! let result = full_analysis(&mid, &AnalysisOptions::default()).unwrap();
//! assert!((result.get(AnalysisKey::Area) - 1.5).abs() < 1e-12);
//! ```

pub mod analysis;
pub mod error;
pub mod field;
pub mod geometry;
pub mod math;
pub mod properties;
pub mod results;
pub mod weight;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{
        centroidal_stiffness_matrix, full_analysis, section_properties, statical_moment,
        statical_moment_at_centroid, stiffness_matrix, AnalysisOptions,
    };
    pub use crate::error::{SectionError, SectionResult};
    pub use crate::field::ContinuousSectionField;
    pub use crate::geometry::{Point, Polygon, PolygonTags, Section, Thickness};
    pub use crate::math::{QuadratureRule, TriangleRule};
    pub use crate::properties::{integrate_volume, HolePolicy, QuadratureSpec, TorsionWarning};
    pub use crate::results::{AnalysisKey, AnalysisResult, SectionProperties};
    pub use crate::weight::{WeightLaw, WeightLawTable};
}
