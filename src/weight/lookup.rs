//! External lookup tables for weight laws
//!
//! A table is a text file with two columns, `z` and `value`, separated by
//! whitespace or commas. Lines starting with `#` and blank lines are
//! ignored. `z` must be strictly increasing and at least two rows are
//! required. Parsed tables are cached per path for the life of the process;
//! files that fail to parse are never cached.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use crate::error::{SectionError, SectionResult};

static TABLE_CACHE: Lazy<RwLock<HashMap<PathBuf, Arc<LookupTable>>>> = Lazy::new(|| RwLock::new(HashMap::new()));

/// Piecewise-linear `z -> value` table
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable {
    z: Vec<f64>,
    values: Vec<f64>,
}

impl LookupTable {
    /// Build a table from sample points
    pub fn new(z: Vec<f64>, values: Vec<f64>) -> Result<Self, String> {
        if z.len() != values.len() {
            return Err(format!("{} z values but {} table values", z.len(), values.len()));
        }
        if z.len() < 2 {
            return Err("at least two rows are required".to_string());
        }
        if z.iter().chain(values.iter()).any(|v| !v.is_finite()) {
            return Err("table contains non-finite numbers".to_string());
        }
        if z.windows(2).any(|w| w[1] <= w[0]) {
            return Err("z column must be strictly increasing".to_string());
        }
        Ok(Self { z, values })
    }

    /// Parse the text format described in the module docs
    pub fn parse(text: &str) -> Result<Self, String> {
        let mut z = Vec::new();
        let mut values = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .collect();
            if fields.len() != 2 {
                return Err(format!("line {}: expected 2 columns, found {}", line_no + 1, fields.len()));
            }
            let parse = |s: &str| {
                s.parse::<f64>()
                    .map_err(|_| format!("line {}: '{s}' is not a number", line_no + 1))
            };
            z.push(parse(fields[0])?);
            values.push(parse(fields[1])?);
        }

        Self::new(z, values)
    }

    /// Load a table through the process-wide cache
    pub fn load(path: &Path) -> SectionResult<Arc<LookupTable>> {
        if let Some(table) = TABLE_CACHE.read().ok().and_then(|cache| cache.get(path).cloned()) {
            return Ok(table);
        }

        let to_error = |message: String| SectionError::LookupTable {
            path: path.display().to_string(),
            message,
        };
        let text = std::fs::read_to_string(path).map_err(|e| to_error(e.to_string()))?;
        let table = Arc::new(Self::parse(&text).map_err(to_error)?);
        log::debug!("Loaded lookup table {} ({} rows)", path.display(), table.len());

        if let Ok(mut cache) = TABLE_CACHE.write() {
            cache.insert(path.to_path_buf(), Arc::clone(&table));
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.z.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z.is_empty()
    }

    /// Range of `z` covered by the table
    pub fn domain(&self) -> (f64, f64) {
        (self.z[0], self.z[self.z.len() - 1])
    }

    /// Linear interpolation at `z`; no extrapolation outside the table range
    pub fn interpolate(&self, z: f64) -> Result<f64, String> {
        let (lo, hi) = self.domain();
        if !(lo..=hi).contains(&z) {
            return Err(format!("z = {z} is outside the table range [{lo}, {hi}]"));
        }
        let k = self.z.partition_point(|&zi| zi <= z).clamp(1, self.z.len() - 1);
        let (z0, z1) = (self.z[k - 1], self.z[k]);
        let (v0, v1) = (self.values[k - 1], self.values[k]);
        let t = (z - z0) / (z1 - z0);
        Ok(v0 + t * (v1 - v0))
    }
}
