// SPDX-License-Identifier: PMPL-1.0-or-later
//! Ambiguous control text - WCAG 2.4.6 Headings and Labels, 2.4.9 Link Purpose
//!
//! Flags buttons whose visible text (or submit/button/reset inputs whose
//! value) is one of a fixed set of generic phrases such as "Submit" or "OK".
//! Picking a better label needs a human, so this fixer only warns and never
//! touches the document.

use super::{Fixer, FixerResult};
use crate::document::Document;

/// Phrases that say nothing about what a control does, compared after
/// trimming and lower-casing
pub const AMBIGUOUS_PHRASES: &[&str] = &["submit", "ok", "button", "click here", "go"];

/// `<input>` types whose `value` is the visible label
const LABELLED_BY_VALUE: &[&str] = &["submit", "button", "reset"];

/// Warns about generic button and input labels
pub struct AmbiguousControlFixer;

/// Whether `text` is one of [`AMBIGUOUS_PHRASES`] once trimmed and lower-cased
pub fn is_ambiguous(text: &str) -> bool {
    let normalized = text.trim().to_lowercase();
    AMBIGUOUS_PHRASES.contains(&normalized.as_str())
}

impl Fixer for AmbiguousControlFixer {
    fn name(&self) -> &str {
        "Ambiguous-Control-Text Fixer"
    }

    fn description(&self) -> &str {
        "Flags buttons and inputs labelled with generic text like \"Submit\" or \"OK\""
    }

    fn apply(&self, document: &mut Document) -> FixerResult {
        let mut result = FixerResult::new();

        for id in document.find_by_tag("button") {
            let text = document.text_content(id);
            if is_ambiguous(&text) {
                result.add_warning(format!(
                    "<button> label \"{}\" is ambiguous, developer review needed",
                    text
                ));
            }
        }

        let inputs = document.find_all(|element| {
            element.is("input")
                && element.attr("type").is_some_and(|input_type| {
                    LABELLED_BY_VALUE
                        .iter()
                        .any(|t| input_type.eq_ignore_ascii_case(t))
                })
        });

        for id in inputs {
            let Some(element) = document.element(id) else {
                continue;
            };
            let input_type = element.attr("type").unwrap_or_default();
            let value = element.attr("value").unwrap_or_default();
            if is_ambiguous(value) {
                result.add_warning(format!(
                    "<input type=\"{}\"> value \"{}\" is ambiguous, developer review needed",
                    input_type, value
                ));
            }
        }

        result
    }
}
