//! Error types for the section field engine

use thiserror::Error;

/// Main error type for section field operations
#[derive(Error, Debug)]
pub enum SectionError {
    #[error("Polygon '{name}' has {count} vertices, at least 3 are required")]
    TooFewVertices { name: String, count: usize },

    #[error("Polygon '{0}' has a non-finite vertex coordinate")]
    NonFiniteCoordinate(String),

    #[error("Polygon '{name}' has non-positive signed area {area} (vertices must be counter-clockwise)")]
    NonPositiveArea { name: String, area: f64 },

    #[error("Duplicate polygon name '{0}' in section")]
    DuplicatePolygonName(String),

    #[error("Polygon count mismatch: start section has {start}, end section has {end}")]
    PolygonCountMismatch { start: usize, end: usize },

    #[error("Vertex count mismatch for pair '{start_name}' -> '{end_name}': {start} vs {end}")]
    VertexCountMismatch {
        start_name: String,
        end_name: String,
        start: usize,
        end: usize,
    },

    #[error("Polygon '{0}' not found")]
    UnknownPolygon(String),

    #[error("Invalid field interval: z0 = {z0} must be strictly less than z1 = {z1}")]
    InvalidInterval { z0: f64, z1: f64 },

    #[error("z = {z} is outside the field domain [{z0}, {z1}]")]
    OutOfDomain { z: f64, z0: f64, z1: f64 },

    #[error("Cut line y = {y_cut} is outside the section range [{y_min}, {y_max}]")]
    CutOutOfRange { y_cut: f64, y_min: f64, y_max: f64 },

    #[error("Malformed weight law '{expression}': {message}")]
    WeightLawSyntax { expression: String, message: String },

    #[error("Weight law '{expression}' failed at z = {z}: {message}")]
    WeightLawEval {
        expression: String,
        z: f64,
        message: String,
    },

    #[error("Lookup table '{path}': {message}")]
    LookupTable { path: String, message: String },

    #[error("Degenerate section at z = {z}: total weighted area is zero")]
    DegenerateSection { z: f64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for section field operations
pub type SectionResult<T> = Result<T, SectionError>;
