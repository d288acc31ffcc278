// src/extractors/section.rs

// --- Imports ---
use crate::extractors::measurements::parse_measurements;
use crate::extractors::patterns::{normalize_span, LabelPattern};
use crate::extractors::species::identify_species;
use crate::record::{ExtractionResult, SectionValue};
use crate::utils::error::ExtractError;
use regex::Regex;

/// Reserved label whose section decomposes into a gender-keyed table.
const MEASUREMENTS_LABEL: &str = "measurements";

/// How section boundaries are located in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Each label is searched against the whole document, independently of
    /// the labels before it. This is the compatible default; a label token
    /// that also occurs earlier in the prose can hijack the span.
    #[default]
    IndependentSearch,
    /// A single scan position advances across the ordered labels, so each
    /// label is only searched in the text after the previous section.
    ForwardCursor,
}

// --- Main Extractor Structure ---
pub struct SectionExtractor {
    mode: ScanMode,
}

impl SectionExtractor {
    pub fn new() -> Self {
        Self { mode: ScanMode::default() }
    }

    pub fn with_mode(mode: ScanMode) -> Self {
        Self { mode }
    }

    /// Extracts one record from a description: species name plus the span of
    /// every trait label that occurs in the text.
    ///
    /// Label order defines adjacency: section i runs from the end of label
    /// i's match to the start of label i+1's match, and the last label runs
    /// to the end of the document. Labels with no match are omitted from the
    /// result. The section whose label is "measurements" (case-insensitive)
    /// is further decomposed into a gender-keyed measurement table.
    pub fn extract_record(
        &self,
        text: &str,
        trait_labels: &[String],
    ) -> Result<ExtractionResult, ExtractError> {
        tracing::debug!(
            "Extracting record with {} labels, mode {:?}",
            trait_labels.len(),
            self.mode
        );

        let mut result = ExtractionResult {
            species_name: identify_species(text),
            ..Default::default()
        };

        let mut cursor = 0usize;
        for (i, label) in trait_labels.iter().enumerate() {
            let next_label = trait_labels.get(i + 1);
            let raw = match self.mode {
                ScanMode::IndependentSearch => {
                    span_independent(text, label, next_label.map(String::as_str))?
                }
                ScanMode::ForwardCursor => {
                    span_forward(text, &mut cursor, label, next_label.map(String::as_str))?
                }
            };

            let Some(raw) = raw else {
                tracing::debug!("Label '{}' not found; omitting section", label);
                continue;
            };

            let content = normalize_span(raw);
            let key = ExtractionResult::derived_key(label);
            let value = if label.trim().eq_ignore_ascii_case(MEASUREMENTS_LABEL) {
                SectionValue::Measurements(parse_measurements(&content))
            } else {
                SectionValue::Text(content)
            };
            result.insert_section(key, value);
        }

        tracing::info!(
            "Extracted {} of {} sections (species name {})",
            result.sections.len(),
            trait_labels.len(),
            if result.species_name.is_some() { "found" } else { "absent" }
        );
        Ok(result)
    }
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole-document search for one label's span, ignoring where earlier labels
/// matched. The start and end label patterns are composed into a single
/// regex; `(?s)` lets the span cross line breaks, and the non-greedy content
/// group stops at the nearest end-label occurrence.
fn span_independent<'t>(
    text: &'t str,
    label: &str,
    next_label: Option<&str>,
) -> Result<Option<&'t str>, ExtractError> {
    let start = LabelPattern::new(label)?;
    let pattern = match next_label {
        Some(next) => {
            let end = LabelPattern::new(next)?;
            format!("(?is){}(?P<content>.*?){}", start.fragment(), end.fragment())
        }
        None => format!("(?is){}(?P<content>.*)", start.fragment()),
    };
    let span_re = Regex::new(&pattern)
        .map_err(|e| ExtractError::LabelPattern(label.to_string(), e))?;

    Ok(span_re
        .captures(text)
        .and_then(|caps| caps.name("content"))
        .map(|m| m.as_str()))
}

/// Forward-cursor search: the label is only looked for after `cursor`, and
/// the cursor advances to the start of the next label's match so a label
/// token recurring earlier in the prose cannot hijack the span.
fn span_forward<'t>(
    text: &'t str,
    cursor: &mut usize,
    label: &str,
    next_label: Option<&str>,
) -> Result<Option<&'t str>, ExtractError> {
    let start = LabelPattern::new(label)?;
    let Some(start_match) = start.find(&text[*cursor..]) else {
        return Ok(None);
    };
    let content_start = *cursor + start_match.end();

    match next_label {
        Some(next) => {
            let end = LabelPattern::new(next)?;
            match end.find(&text[content_start..]) {
                Some(end_match) => {
                    let content_end = content_start + end_match.start();
                    *cursor = content_end;
                    Ok(Some(&text[content_start..content_end]))
                }
                None => {
                    // Same absence semantics as the independent mode: a
                    // bounded section with no end boundary is omitted.
                    *cursor = content_start;
                    Ok(None)
                }
            }
        }
        None => {
            *cursor = text.len();
            Ok(Some(&text[content_start..]))
        }
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    const BASIC_DOC: &str =
        "Foo sp. nov. A new species from limestone caves. Description. Lorem ipsum. \
         Coloration. Ipsum lorem.";

    #[test]
    fn extracts_species_and_adjacent_sections() {
        let extractor = SectionExtractor::new();
        let result = extractor
            .extract_record(BASIC_DOC, &labels(&["Description", "Coloration"]))
            .unwrap();

        assert_eq!(result.species_name.as_deref(), Some("Foo sp. nov."));
        assert_eq!(
            result.section("description").and_then(|v| v.as_text()),
            Some("Lorem ipsum.")
        );
        assert_eq!(
            result.section("coloration").and_then(|v| v.as_text()),
            Some("Ipsum lorem.")
        );
    }

    #[test]
    fn result_keys_are_only_species_and_derived_labels() {
        let extractor = SectionExtractor::new();
        let result = extractor
            .extract_record(BASIC_DOC, &labels(&["Description", "Coloration"]))
            .unwrap();

        let keys: Vec<_> = result.sections.keys().cloned().collect();
        assert_eq!(keys, vec!["description", "coloration"]);
    }

    #[test]
    fn unmatched_label_is_omitted_not_empty() {
        let extractor = SectionExtractor::new();
        let result = extractor
            .extract_record(BASIC_DOC, &labels(&["Description", "Etymology", "Coloration"]))
            .unwrap();

        assert!(result.section("etymology").is_none());
        // The section before the missing label still spans to its own next
        // label's occurrence... which is absent, so it is omitted too under
        // whole-document search.
        assert!(result.section("description").is_none());
        assert_eq!(
            result.section("coloration").and_then(|v| v.as_text()),
            Some("Ipsum lorem.")
        );
    }

    #[test]
    fn last_label_spans_to_end_of_document() {
        let doc = "Bar sp. nov. Distribution. Known only from the type locality.   \n";
        let extractor = SectionExtractor::new();
        let result = extractor.extract_record(doc, &labels(&["Distribution"])).unwrap();

        assert_eq!(
            result.section("distribution").and_then(|v| v.as_text()),
            Some("Known only from the type locality.")
        );
    }

    #[test]
    fn empty_label_list_yields_at_most_species_name() {
        let extractor = SectionExtractor::new();
        let result = extractor.extract_record(BASIC_DOC, &[]).unwrap();

        assert_eq!(result.species_name.as_deref(), Some("Foo sp. nov."));
        assert!(result.sections.is_empty());
    }

    #[test]
    fn measurements_label_decomposes_into_table() {
        let doc = "Baz sp. nov. Measurements. Male: body 5.9–6.4, leg 2.0-2.5. \
                   Female: body 6.0–6.8. Distribution. Northern Laos.";
        let extractor = SectionExtractor::new();
        let result = extractor
            .extract_record(doc, &labels(&["Measurements", "Distribution"]))
            .unwrap();

        let table = result
            .section("measurements")
            .and_then(|v| v.as_measurements())
            .unwrap();
        assert_eq!(table["male"]["body"], "5.9–6.4");
        assert_eq!(table["male"]["leg"], "2.0-2.5");
        assert_eq!(table["female"]["body"], "6.0–6.8");
    }

    #[test]
    fn section_content_spans_line_breaks() {
        let doc = "Qux sp. nov. Description. Lorem\nipsum\ndolor. Coloration. Brown.";
        let extractor = SectionExtractor::new();
        let result = extractor
            .extract_record(doc, &labels(&["Description", "Coloration"]))
            .unwrap();

        assert_eq!(
            result.section("description").and_then(|v| v.as_text()),
            Some("Lorem ipsum dolor.")
        );
    }

    #[test]
    fn extraction_is_idempotent() {
        let extractor = SectionExtractor::new();
        let trait_labels = labels(&["Description", "Coloration"]);
        let first = extractor.extract_record(BASIC_DOC, &trait_labels).unwrap();
        let second = extractor.extract_record(BASIC_DOC, &trait_labels).unwrap();
        assert_eq!(first, second);
    }

    // A label token recurring in earlier prose. Independent whole-document
    // search anchors on the prose occurrence; the forward cursor does not.
    const SHADOWED_DOC: &str =
        "Gnaphosa umbra sp. nov. Close to the description of Gnaphosa prima in habitus. \
         Diagnosis. Differs by the short embolus. Description. Body elongate. \
         Coloration. Carapace brown.";

    #[test]
    fn independent_mode_misfires_on_shadowed_label() {
        let extractor = SectionExtractor::with_mode(ScanMode::IndependentSearch);
        let result = extractor
            .extract_record(SHADOWED_DOC, &labels(&["Diagnosis", "Description", "Coloration"]))
            .unwrap();

        // The span anchors on "description of Gnaphosa prima" in the prose
        // and swallows the diagnosis section. Documented compatibility
        // behavior, not a desired outcome.
        assert_eq!(
            result.section("description").and_then(|v| v.as_text()),
            Some(
                "of Gnaphosa prima in habitus. Diagnosis. Differs by the short embolus. \
                 Description. Body elongate."
            )
        );
        assert_eq!(
            result.section("diagnosis").and_then(|v| v.as_text()),
            Some("Differs by the short embolus.")
        );
    }

    #[test]
    fn forward_cursor_mode_resolves_shadowed_label() {
        let extractor = SectionExtractor::with_mode(ScanMode::ForwardCursor);
        let result = extractor
            .extract_record(SHADOWED_DOC, &labels(&["Diagnosis", "Description", "Coloration"]))
            .unwrap();

        assert_eq!(
            result.section("diagnosis").and_then(|v| v.as_text()),
            Some("Differs by the short embolus.")
        );
        assert_eq!(
            result.section("description").and_then(|v| v.as_text()),
            Some("Body elongate.")
        );
        assert_eq!(
            result.section("coloration").and_then(|v| v.as_text()),
            Some("Carapace brown.")
        );
    }

    #[test]
    fn modes_agree_on_well_formed_document() {
        let trait_labels = labels(&["Description", "Coloration"]);
        let independent = SectionExtractor::with_mode(ScanMode::IndependentSearch)
            .extract_record(BASIC_DOC, &trait_labels)
            .unwrap();
        let forward = SectionExtractor::with_mode(ScanMode::ForwardCursor)
            .extract_record(BASIC_DOC, &trait_labels)
            .unwrap();
        assert_eq!(independent, forward);
    }
}
