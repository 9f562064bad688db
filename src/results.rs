//! Result types for sectional analysis

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::properties::{DerivedProperties, Homogenized, TorsionProperties, TorsionWarning};

/// Keys of a full analysis, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalysisKey {
    #[serde(rename = "A")]
    Area,
    #[serde(rename = "Cx")]
    CentroidX,
    #[serde(rename = "Cy")]
    CentroidY,
    #[serde(rename = "Ix")]
    Ixx,
    #[serde(rename = "Iy")]
    Iyy,
    #[serde(rename = "Ixy")]
    Ixy,
    #[serde(rename = "J")]
    Polar,
    #[serde(rename = "I1")]
    I1,
    #[serde(rename = "I2")]
    I2,
    #[serde(rename = "theta_deg")]
    ThetaDeg,
    #[serde(rename = "rx")]
    Rx,
    #[serde(rename = "ry")]
    Ry,
    #[serde(rename = "Wx")]
    Wx,
    #[serde(rename = "Wy")]
    Wy,
    #[serde(rename = "J_sv")]
    JSolid,
    #[serde(rename = "Q_na")]
    QNeutralAxis,
    #[serde(rename = "J_sv_wall")]
    JWall,
    #[serde(rename = "J_sv_cell")]
    JCell,
    #[serde(rename = "J_roark")]
    JRoark,
    #[serde(rename = "J_roark_fidelity")]
    RoarkFidelity,
}

impl AnalysisKey {
    /// Every key in reporting order
    pub const ALL: [AnalysisKey; 20] = [
        AnalysisKey::Area,
        AnalysisKey::CentroidX,
        AnalysisKey::CentroidY,
        AnalysisKey::Ixx,
        AnalysisKey::Iyy,
        AnalysisKey::Ixy,
        AnalysisKey::Polar,
        AnalysisKey::I1,
        AnalysisKey::I2,
        AnalysisKey::ThetaDeg,
        AnalysisKey::Rx,
        AnalysisKey::Ry,
        AnalysisKey::Wx,
        AnalysisKey::Wy,
        AnalysisKey::JSolid,
        AnalysisKey::QNeutralAxis,
        AnalysisKey::JWall,
        AnalysisKey::JCell,
        AnalysisKey::JRoark,
        AnalysisKey::RoarkFidelity,
    ];

    /// Short name used in reports and JSON
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisKey::Area => "A",
            AnalysisKey::CentroidX => "Cx",
            AnalysisKey::CentroidY => "Cy",
            AnalysisKey::Ixx => "Ix",
            AnalysisKey::Iyy => "Iy",
            AnalysisKey::Ixy => "Ixy",
            AnalysisKey::Polar => "J",
            AnalysisKey::I1 => "I1",
            AnalysisKey::I2 => "I2",
            AnalysisKey::ThetaDeg => "theta_deg",
            AnalysisKey::Rx => "rx",
            AnalysisKey::Ry => "ry",
            AnalysisKey::Wx => "Wx",
            AnalysisKey::Wy => "Wy",
            AnalysisKey::JSolid => "J_sv",
            AnalysisKey::QNeutralAxis => "Q_na",
            AnalysisKey::JWall => "J_sv_wall",
            AnalysisKey::JCell => "J_sv_cell",
            AnalysisKey::JRoark => "J_roark",
            AnalysisKey::RoarkFidelity => "J_roark_fidelity",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

impl std::fmt::Display for AnalysisKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed sectional properties of one station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    pub base: Homogenized,
    pub derived: DerivedProperties,
    pub torsion: TorsionProperties,
    /// First moment of the area above the neutral axis
    pub q_na: f64,
}

impl SectionProperties {
    pub fn z(&self) -> f64 {
        self.base.z
    }

    pub fn area(&self) -> f64 {
        self.base.area
    }

    pub fn centroid(&self) -> Point {
        self.base.centroid
    }

    /// Polar moment `Ixx + Iyy`
    pub fn polar(&self) -> f64 {
        self.base.polar()
    }

    fn value(&self, key: AnalysisKey) -> f64 {
        match key {
            AnalysisKey::Area => self.base.area,
            AnalysisKey::CentroidX => self.base.centroid.x,
            AnalysisKey::CentroidY => self.base.centroid.y,
            AnalysisKey::Ixx => self.base.ixx,
            AnalysisKey::Iyy => self.base.iyy,
            AnalysisKey::Ixy => self.base.ixy,
            AnalysisKey::Polar => self.base.polar(),
            AnalysisKey::I1 => self.derived.principal.i1,
            AnalysisKey::I2 => self.derived.principal.i2,
            AnalysisKey::ThetaDeg => self.derived.principal.theta_deg,
            AnalysisKey::Rx => self.derived.rx,
            AnalysisKey::Ry => self.derived.ry,
            AnalysisKey::Wx => self.derived.wx,
            AnalysisKey::Wy => self.derived.wy,
            AnalysisKey::JSolid => self.torsion.j_sv,
            AnalysisKey::QNeutralAxis => self.q_na,
            AnalysisKey::JWall => self.torsion.j_sv_wall,
            AnalysisKey::JCell => self.torsion.j_sv_cell,
            AnalysisKey::JRoark => self.torsion.j_roark,
            AnalysisKey::RoarkFidelity => self.torsion.roark_fidelity,
        }
    }
}

/// Flat, ordered report of a full analysis
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisValues(Vec<(AnalysisKey, f64)>);

impl AnalysisValues {
    pub fn get(&self, key: AnalysisKey) -> Option<f64> {
        self.0.iter().find(|(k, _)| *k == key).map(|&(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnalysisKey, f64)> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for AnalysisValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}

/// Result of [`crate::analysis::full_analysis`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub z: f64,
    pub values: AnalysisValues,
    pub warnings: Vec<TorsionWarning>,
}

impl AnalysisResult {
    pub fn from_properties(properties: &SectionProperties) -> Self {
        let values = AnalysisKey::ALL
            .into_iter()
            .map(|key| (key, properties.value(key)))
            .collect();
        Self {
            z: properties.z(),
            values: AnalysisValues(values),
            warnings: properties.torsion.warnings.clone(),
        }
    }

    /// Value of one key; every key is always present
    pub fn get(&self, key: AnalysisKey) -> f64 {
        self.values.get(key).unwrap_or(f64::NAN)
    }

    /// Look a value up by its report name, e.g. `"Ix"`
    pub fn get_named(&self, name: &str) -> Option<f64> {
        AnalysisKey::from_name(name).and_then(|key| self.values.get(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnalysisKey, f64)> + '_ {
        self.values.iter()
    }

    /// Print a summary table
    pub fn print_summary(&self) {
        println!("\n=== Section at z = {} ===", self.z);
        for (key, value) in self.iter() {
            println!("{:>18}: {:>14.6e}", key.as_str(), value);
        }
        for warning in &self.warnings {
            println!("  warning: {warning}");
        }
    }
}
