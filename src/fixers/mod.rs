// SPDX-License-Identifier: PMPL-1.0-or-later
//! Accessibility fixers.
//!
//! Each fixer is a self-contained rule that inspects a [`Document`],
//! optionally mutates it, and reports what it changed and what it could
//! not decide on its own. Fixers are independent of one another; the
//! [`Pipeline`](crate::pipeline::Pipeline) only fixes the order in which
//! their output is concatenated.
//!
//! Message wording is a stable contract: downstream tooling matches on it.

pub mod ambiguous;
pub mod aria_required;
pub mod label;

pub use ambiguous::AmbiguousControlFixer;
pub use aria_required::AriaRequiredFixer;
pub use label::LabelFixer;

use crate::document::{Document, Element, Node, NodeId};
use serde::{Deserialize, Serialize};

/// Prefix of every marker comment a fixer leaves in the markup
pub const MARKER_PREFIX: &str = "cm-forms";

/// Trait implemented by all fixers
pub trait Fixer: Send + Sync {
    /// Human-readable name of this fixer
    fn name(&self) -> &str;

    /// Short description of what this fixer checks
    fn description(&self) -> &str;

    /// Inspect and optionally mutate the document.
    ///
    /// Must not fail: anything the fixer cannot resolve becomes a warning.
    fn apply(&self, document: &mut Document) -> FixerResult;
}

/// Changes and warnings produced by one fixer run, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixerResult {
    /// Mutations applied to the document
    pub changes: Vec<String>,
    /// Conditions needing developer review
    pub warnings: Vec<String>,
}

impl FixerResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_change(&mut self, message: impl Into<String>) {
        self.changes.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Append another result after this one
    pub fn extend(&mut self, other: FixerResult) {
        self.changes.extend(other.changes);
        self.warnings.extend(other.warnings);
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.warnings.is_empty()
    }
}

/// `<tag id="...">`, with `unknown` standing in for a missing id
pub(crate) fn describe(element: &Element) -> String {
    format!(
        "<{} id=\"{}\">",
        element.name(),
        element.attr("id").unwrap_or("unknown")
    )
}

/// Leave a `<!-- cm-forms: note -->` marker right before `id`
pub(crate) fn annotate(document: &mut Document, id: NodeId, note: &str) {
    document.insert_before(id, Node::Comment(format!(" {}: {} ", MARKER_PREFIX, note)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_uses_unknown_for_missing_id() {
        assert_eq!(describe(&Element::new("input")), "<input id=\"unknown\">");
        assert_eq!(
            describe(&Element::new("select").with_attr("id", "country")),
            "<select id=\"country\">"
        );
    }

    #[test]
    fn test_annotate_inserts_marker_before() {
        let mut doc = Document::parse("<p>x</p>");
        let p = doc.find_by_tag("p")[0];
        annotate(&mut doc, p, "note");
        assert_eq!(doc.serialize(), "<!-- cm-forms: note --><p>x</p>");
    }

    #[test]
    fn test_result_extend_keeps_order() {
        let mut first = FixerResult::new();
        first.add_change("a");
        first.add_warning("w1");
        let mut second = FixerResult::new();
        second.add_change("b");
        second.add_warning("w2");
        first.extend(second);
        assert_eq!(first.changes, vec!["a", "b"]);
        assert_eq!(first.warnings, vec!["w1", "w2"]);
        assert!(!first.is_empty());
        assert!(FixerResult::new().is_empty());
    }
}
