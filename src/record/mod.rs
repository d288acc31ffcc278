// src/record/mod.rs
use indexmap::IndexMap;
use serde::Serialize;

/// Gender -> trait -> value-range string (e.g. "5.9–6.4").
///
/// Ranges stay textual; numeric bounds are never parsed out. Insertion order
/// follows first occurrence in the source text, which is why these are
/// IndexMaps rather than HashMaps.
pub type MeasurementTable = IndexMap<String, IndexMap<String, String>>;

/// The value attached to one extracted section.
///
/// Every section is plain prose except the reserved "measurements" section,
/// which decomposes into a gender-keyed table. Serialized untagged so the
/// JSON shape is a string or a nested object, matching the flat record
/// layout consumers expect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionValue {
    Text(String),
    Measurements(MeasurementTable),
}

impl SectionValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SectionValue::Text(s) => Some(s),
            SectionValue::Measurements(_) => None,
        }
    }

    pub fn as_measurements(&self) -> Option<&MeasurementTable> {
        match self {
            SectionValue::Text(_) => None,
            SectionValue::Measurements(table) => Some(table),
        }
    }
}

/// One extracted record: optional species name plus one entry per matched
/// section label, keyed by the label's derived key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species_name: Option<String>,

    #[serde(flatten)]
    pub sections: IndexMap<String, SectionValue>,
}

impl ExtractionResult {
    /// Normalizes a section label into its output field name:
    /// lower-cased, trimmed, interior whitespace replaced by underscores.
    pub fn derived_key(label: &str) -> String {
        label.to_lowercase().trim().replace(' ', "_")
    }

    /// Stores a section under its derived key. Distinct labels that collapse
    /// to the same key are a caller configuration error; the later value
    /// wins, as the original pipeline behaved.
    pub fn insert_section(&mut self, key: String, value: SectionValue) {
        if self.sections.contains_key(&key) {
            tracing::warn!("Derived key '{}' already present; overwriting earlier section", key);
        }
        self.sections.insert(key, value);
    }

    pub fn section(&self, key: &str) -> Option<&SectionValue> {
        self.sections.get(key)
    }
}
