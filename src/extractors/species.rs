// src/extractors/species.rs
use crate::extractors::patterns::{normalize_span, SPECIES_NAME_RE};

/// Extracts the species name from the head of a description.
///
/// The name is taken as the shortest document prefix ending in the literal
/// "sp. nov." token. A document without that anchor simply has no species
/// name; that is absence, not failure.
pub fn identify_species(text: &str) -> Option<String> {
    SPECIES_NAME_RE.find(text).map(|m| normalize_span(m.as_str()))
}
