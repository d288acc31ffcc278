// src/extractors/patterns.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;

// --- Fixed Regex Patterns (Lazy Static) ---

/// Shortest prefix of the document ending in the "sp. nov." anchor.
/// `(?s)` lets the prefix span PDF-artifact line breaks.
pub static SPECIES_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^.*?sp\. nov\.").expect("Failed to compile SPECIES_NAME_RE")
});

/// Gender markers that open a block within a measurements section.
/// The token is captured so split fragments can be classified.
pub static GENDER_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(female|male):").expect("Failed to compile GENDER_MARKER_RE")
});

/// One trait/value pair: a run of letters and spaces followed by a numeric
/// range. The range separator may be an ASCII hyphen or an en-dash, and the
/// numbers may carry a decimal point (e.g. "body 5.9–6.4", "leg 2.0-2.5").
/// A dot only counts as part of a number when a digit follows, so a
/// sentence-terminating period after the range is left out of the capture.
pub static TRAIT_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([a-zA-Z\s]+)\s*(\d+(?:\.\d+)?\s*[–-]\s*\d+(?:\.\d+)?)")
        .expect("Failed to compile TRAIT_RANGE_RE")
});

static LINE_BREAK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*\r?\n\s*").expect("Failed to compile LINE_BREAK_RE")
});

/// Trims a matched span and collapses interior line breaks (plus the
/// indentation around them) to single spaces.
pub fn normalize_span(raw: &str) -> String {
    LINE_BREAK_RE.replace_all(raw.trim(), " ").into_owned()
}

// --- Label Matcher ---

/// Tolerant matcher for one literal section label.
///
/// Matches the label case-insensitively, followed by an optional period and
/// a whitespace character, and never as a substring of a longer word. The
/// label text is escaped, so labels containing regex metacharacters (e.g.
/// "Type material (holotype)") are taken literally.
#[derive(Debug, Clone)]
pub struct LabelPattern {
    fragment: String,
    regex: Regex,
}

impl LabelPattern {
    pub fn new(label: &str) -> Result<Self, ExtractError> {
        let fragment = format!(r"\b{}\.?\s", regex::escape(label.trim()));
        let regex = Regex::new(&format!("(?i){}", fragment))
            .map_err(|e| ExtractError::LabelPattern(label.to_string(), e))?;
        Ok(Self { fragment, regex })
    }

    /// The raw pattern fragment, for composition into a larger span regex.
    /// Case-insensitivity is applied by the composing pattern.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn find<'t>(&self, text: &'t str) -> Option<regex::Match<'t>> {
        self.regex.find(text)
    }
}
