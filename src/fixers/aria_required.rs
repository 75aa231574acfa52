// SPDX-License-Identifier: PMPL-1.0-or-later
//! Required-field fixer - WCAG 3.3.2 Labels or Instructions, 4.1.2 Name, Role, Value
//!
//! Native `required` is not announced by every assistive technology.
//! Every element carrying `required` also gets `aria-required="true"`,
//! unless it already has a non-empty `aria-required`.

use super::{annotate, describe, Fixer, FixerResult};
use crate::document::Document;

/// Adds `aria-required="true"` next to `required`
pub struct AriaRequiredFixer;

impl Fixer for AriaRequiredFixer {
    fn name(&self) -> &str {
        "Required-Field ARIA Fixer"
    }

    fn description(&self) -> &str {
        "Mirrors the required attribute as aria-required=\"true\""
    }

    fn apply(&self, document: &mut Document) -> FixerResult {
        let mut result = FixerResult::new();

        for id in document.find_with_attr("required") {
            let Some(element) = document.element(id) else {
                continue;
            };
            if element.attr("aria-required").is_some_and(|v| !v.is_empty()) {
                continue;
            }

            let target = describe(element);
            document.set_attr(id, "aria-required", "true");
            annotate(document, id, "added-aria-required");
            result.add_change(format!("Added aria-required=\"true\" to {}", target));
        }

        result
    }
}
