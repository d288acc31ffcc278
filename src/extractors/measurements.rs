// src/extractors/measurements.rs
use crate::extractors::patterns::{GENDER_MARKER_RE, TRAIT_RANGE_RE};
use crate::record::MeasurementTable;
use indexmap::IndexMap;

/// A fragment of a measurements section, produced by splitting on gender
/// markers while retaining the matched token.
#[derive(Debug, PartialEq)]
enum Fragment<'t> {
    /// A "male"/"female" token, lower-cased.
    Marker(String),
    /// Free text between markers.
    Body(&'t str),
}

/// Splits the section on gender markers. `Regex::split` drops the capture,
/// so the walk over match positions is done by hand.
fn split_on_genders(content: &str) -> Vec<Fragment<'_>> {
    let mut fragments = Vec::new();
    let mut last = 0;
    for caps in GENDER_MARKER_RE.captures_iter(content) {
        let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            fragments.push(Fragment::Body(&content[last..whole.start()]));
        }
        fragments.push(Fragment::Marker(token.as_str().to_lowercase()));
        last = whole.end();
    }
    if last < content.len() {
        fragments.push(Fragment::Body(&content[last..]));
    }
    fragments
}

/// Decomposes a measurements section into gender -> trait -> range.
///
/// A gender marker opens a fresh block for that gender (a repeated marker
/// resets its earlier accumulation); within an open block every trait/range
/// pair is recorded in first-occurrence order. Text before the first marker
/// is discarded. Nothing here can fail: a section with no markers or no
/// pairs yields an empty table.
pub fn parse_measurements(content: &str) -> MeasurementTable {
    let mut table = MeasurementTable::new();
    let mut current_gender: Option<String> = None;

    for fragment in split_on_genders(content) {
        match fragment {
            Fragment::Marker(gender) => {
                table.insert(gender.clone(), IndexMap::new());
                current_gender = Some(gender);
            }
            Fragment::Body(text) => {
                if text.trim().is_empty() {
                    continue;
                }
                let Some(gender) = &current_gender else {
                    tracing::debug!("Discarding ungendered measurement fragment: '{}'", text.trim());
                    continue;
                };
                if let Some(traits) = table.get_mut(gender) {
                    for caps in TRAIT_RANGE_RE.captures_iter(text) {
                        if let (Some(name), Some(range)) = (caps.get(1), caps.get(2)) {
                            traits.insert(
                                name.as_str().trim().to_string(),
                                range.as_str().trim().to_string(),
                            );
                        }
                    }
                }
            }
        }
    }

    table
}
