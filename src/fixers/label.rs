// SPDX-License-Identifier: PMPL-1.0-or-later
//! Accessible label fixer - WCAG 1.3.1 Info and Relationships, 3.3.2 Labels (Level A)
//!
//! Every form control needs a programmatically determinable name. A control
//! counts as labelled when any of these hold, checked in order:
//!
//! 1. a non-blank `aria-label`
//! 2. an `aria-labelledby` pointing at an element with text
//! 3. a `<label for>` matching its `id`, with text
//! 4. a wrapping `<label>` with text of its own
//! 5. a non-blank `title`
//!
//! The only association made automatically is the unambiguous one: a
//! control with an `id` immediately preceded by a text-bearing `<label>`
//! that has no `for` and wraps no other control gets `for` pointed at it.
//! Everything else (placeholder-only, broken references, nothing at all)
//! is left for a developer.

use super::{annotate, describe, Fixer, FixerResult};
use crate::document::{Document, Element, NodeId};

/// Input types that are named by their value/alt or are not user-facing
const EXEMPT_INPUT_TYPES: &[&str] = &["hidden", "submit", "reset", "button", "image"];

/// Elements whose text never contributes to a surrounding label's name
const FORM_CONTROLS: &[&str] = &["input", "select", "textarea", "button"];

/// Checks form controls for an accessible name
pub struct LabelFixer;

/// What to do about one control
#[derive(Debug, PartialEq, Eq)]
enum Assessment {
    Labelled,
    /// Point this `<label>` at the control
    Associate { label: NodeId, control_id: String },
    Review(String),
}

impl Fixer for LabelFixer {
    fn name(&self) -> &str {
        "Accessible-Label Fixer"
    }

    fn description(&self) -> &str {
        "Ensures inputs, selects and textareas have an associated label"
    }

    fn apply(&self, document: &mut Document) -> FixerResult {
        let mut result = FixerResult::new();

        for id in document.find_all(needs_label) {
            match assess(document, id) {
                Assessment::Labelled => {}
                Assessment::Associate { label, control_id } => {
                    let label_text = label_text(document, label).trim().to_string();
                    let target = document.element(id).map(describe).unwrap_or_default();
                    document.set_attr(label, "for", &control_id);
                    annotate(document, label, "added-label-for");
                    result.add_change(format!(
                        "Associated <label> \"{}\" with {}",
                        label_text, target
                    ));
                }
                Assessment::Review(message) => result.add_warning(message),
            }
        }

        for label in document.find_all(|e| e.is("label") && e.has_attr("for")) {
            let target = document.attr(label, "for").unwrap_or_default();
            if document.element_by_id(target).is_none() {
                result.add_warning(format!(
                    "<label for=\"{}\"> does not match any element id, developer review needed",
                    target
                ));
            }
        }

        result
    }
}

/// Controls that must carry an accessible name
fn needs_label(element: &Element) -> bool {
    if element.is("select") || element.is("textarea") {
        return true;
    }
    if !element.is("input") {
        return false;
    }
    let input_type = element.attr("type").unwrap_or("text");
    !EXEMPT_INPUT_TYPES
        .iter()
        .any(|exempt| input_type.eq_ignore_ascii_case(exempt))
}

fn is_form_control(element: &Element) -> bool {
    FORM_CONTROLS.iter().any(|tag| element.is(tag))
}

fn non_blank(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

fn assess(document: &Document, id: NodeId) -> Assessment {
    let Some(element) = document.element(id) else {
        return Assessment::Labelled;
    };

    if non_blank(element.attr("aria-label")) {
        return Assessment::Labelled;
    }

    if let Some(refs) = element.attr("aria-labelledby").filter(|r| !r.trim().is_empty()) {
        let resolved = refs.split_whitespace().any(|reference| {
            document
                .element_by_id(reference)
                .is_some_and(|target| !document.text_content(target).trim().is_empty())
        });
        if resolved {
            return Assessment::Labelled;
        }
        return Assessment::Review(format!(
            "{} aria-labelledby references missing or empty id \"{}\", developer review needed",
            describe(element),
            refs
        ));
    }

    let control_id = element.attr("id").filter(|v| !v.is_empty());

    if let Some(control_id) = control_id {
        let explicit = document
            .find_all(|e| e.is("label") && e.attr("for") == Some(control_id))
            .into_iter()
            .any(|label| !label_text(document, label).trim().is_empty());
        if explicit {
            return Assessment::Labelled;
        }
    }

    let wrapping = document
        .ancestors(id)
        .find(|&ancestor| document.element(ancestor).is_some_and(|e| e.is("label")));
    if let Some(label) = wrapping {
        if !label_text(document, label).trim().is_empty() {
            return Assessment::Labelled;
        }
    }

    if non_blank(element.attr("title")) {
        return Assessment::Labelled;
    }

    if let Some(control_id) = control_id {
        if let Some(label) = adjacent_free_label(document, id) {
            return Assessment::Associate {
                label,
                control_id: control_id.to_string(),
            };
        }
    }

    if non_blank(element.attr("placeholder")) {
        return Assessment::Review(format!(
            "{} relies on placeholder text as its only label, developer review needed",
            describe(element)
        ));
    }

    Assessment::Review(format!(
        "{} has no accessible label, developer review needed",
        describe(element)
    ))
}

/// A `<label>` right before the control that is not yet tied to anything
fn adjacent_free_label(document: &Document, id: NodeId) -> Option<NodeId> {
    let candidate = document.previous_element_sibling(id)?;
    let label = document.element(candidate)?;
    if !label.is("label") || label.has_attr("for") {
        return None;
    }

    let wraps_control = document
        .descendants(candidate)
        .skip(1)
        .any(|node| document.element(node).is_some_and(is_form_control));
    if wraps_control || label_text(document, candidate).trim().is_empty() {
        return None;
    }

    Some(candidate)
}

/// Text a label contributes, leaving out text that belongs to nested controls
fn label_text(document: &Document, label: NodeId) -> String {
    document
        .descendants(label)
        .filter(|&node| {
            document
                .ancestors(node)
                .take_while(|&ancestor| ancestor != label)
                .all(|ancestor| !document.element(ancestor).is_some_and(is_form_control))
        })
        .filter_map(|node| document.node(node).and_then(|n| n.as_text()))
        .collect()
}
