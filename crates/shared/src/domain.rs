use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_NAMESPACE: &str = "meyerslab";
pub const DEFAULT_SERVICE: &str = "srna_phased_loci_v0.1";

/// Identifies a remote analysis procedure on the host's search service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRef {
    pub namespace: String,
    pub service: String,
}

impl ServiceRef {
    pub fn new(namespace: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            service: service.into(),
        }
    }
}

impl Default for ServiceRef {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE, DEFAULT_SERVICE)
    }
}

impl fmt::Display for ServiceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.service)
    }
}

/// Opaque display value of a single result cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(serde_json::Number),
    Text(String),
    Flag(bool),
    Other(Value),
}

impl FieldValue {
    /// Text shown in the table cell, before HTML escaping.
    pub fn display_text(&self) -> String {
        match self {
            Self::Number(n) => number_text(n),
            Self::Text(s) => s.clone(),
            Self::Flag(b) => b.to_string(),
            Self::Other(v) => v.to_string(),
        }
    }
}

/// Whole-valued floats print without a fraction, so `100.0` reads `100`.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 {
                "0".to_string()
            } else {
                format!("{f:.0}")
            }
        }
        _ => n.to_string(),
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

/// One phased locus row as returned by the phased loci service.
///
/// Every field is optional: a record missing a field still renders, with an
/// empty cell in that column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhasedLocus {
    #[serde(default)]
    pub chromosome: Option<FieldValue>,
    #[serde(default)]
    pub start: Option<FieldValue>,
    #[serde(default)]
    pub end: Option<FieldValue>,
    #[serde(default)]
    pub phase_length: Option<FieldValue>,
    #[serde(default)]
    pub max_phasing_score: Option<FieldValue>,
    #[serde(default)]
    pub min_pvalue: Option<FieldValue>,
    #[serde(default)]
    pub locus_id: Option<FieldValue>,
    #[serde(default)]
    pub title: Option<FieldValue>,
}

impl PhasedLocus {
    /// Column headers, in display order.
    pub const COLUMNS: [&'static str; 8] = [
        "chromosome",
        "start",
        "end",
        "phase length",
        "score",
        "min pvalue",
        "locus id",
        "title",
    ];

    /// Lenient conversion used for every entry of the row collection.
    /// Anything that is not an object yields an all-empty row.
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    pub fn cells(&self) -> [Option<&FieldValue>; 8] {
        [
            self.chromosome.as_ref(),
            self.start.as_ref(),
            self.end.as_ref(),
            self.phase_length.as_ref(),
            self.max_phasing_score.as_ref(),
            self.min_pvalue.as_ref(),
            self.locus_id.as_ref(),
            self.title.as_ref(),
        ]
    }

    pub fn cell_texts(&self) -> [String; 8] {
        self.cells()
            .map(|cell| cell.map(FieldValue::display_text).unwrap_or_default())
    }
}
