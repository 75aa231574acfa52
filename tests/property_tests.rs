// SPDX-License-Identifier: PMPL-1.0-or-later
//! Property tests for the fixers over generated form markup

use cm_forms::fixers::{AmbiguousControlFixer, AriaRequiredFixer, Fixer, FixerResult, LabelFixer};
use cm_forms::{Document, Pipeline};
use proptest::prelude::*;

/// One piece of form markup, rendered from generated parts
fn form_part() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u8..20, any::<bool>()).prop_map(|(n, required)| {
            format!(
                "<input type=\"text\" id=\"f{}\"{}>",
                n,
                if required { " required" } else { "" }
            )
        }),
        any::<bool>().prop_map(|required| {
            format!("<input type=\"email\"{}>", if required { " required" } else { "" })
        }),
        (0u8..20).prop_map(|n| format!("<label for=\"f{}\">Field {}</label>", n, n)),
        Just("<label>Name</label>".to_string()),
        "[a-zA-Z ]{0,12}".prop_map(|text| format!("<button>{}</button>", text)),
        ambiguous_phrase().prop_map(|text| format!("<button>{}</button>", text)),
        ambiguous_phrase().prop_map(|text| format!("<input type=\"submit\" value=\"{}\">", text)),
        Just("<select required><option>A</option></select>".to_string()),
        Just("<textarea aria-label=\"Notes\" required></textarea>".to_string()),
        Just("<p>Some text</p>".to_string()),
    ]
}

/// An ambiguous phrase in arbitrary letter case, possibly padded
fn ambiguous_phrase() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["submit", "ok", "button", "click here", "go"]),
        prop::collection::vec(any::<bool>(), 10),
        prop::sample::select(vec!["", " ", "  "]),
    )
        .prop_map(|(phrase, upper, pad)| {
            let cased: String = phrase
                .chars()
                .zip(upper.iter().cycle())
                .map(|(c, &up)| if up { c.to_ascii_uppercase() } else { c })
                .collect();
            format!("{}{}{}", pad, cased, pad)
        })
}

fn form_markup() -> impl Strategy<Value = String> {
    prop::collection::vec(form_part(), 0..12).prop_map(|parts| format!("<form>{}</form>", parts.concat()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn required_fields_always_end_up_marked(markup in form_markup()) {
        let mut document = Document::parse(&markup);
        Pipeline::default().run(&mut document);

        for id in document.find_with_attr("required") {
            prop_assert_eq!(document.attr(id, "aria-required"), Some("true"));
        }
    }

    #[test]
    fn aria_required_fixer_is_idempotent(markup in form_markup()) {
        let mut document = Document::parse(&markup);
        AriaRequiredFixer.apply(&mut document);
        let once = document.serialize();

        let second = AriaRequiredFixer.apply(&mut document);
        prop_assert!(second.changes.is_empty());
        prop_assert_eq!(document.serialize(), once);
    }

    #[test]
    fn ambiguous_fixer_never_mutates(markup in form_markup()) {
        let mut document = Document::parse(&markup);
        let before = document.serialize();

        let result = AmbiguousControlFixer.apply(&mut document);
        prop_assert!(result.changes.is_empty());
        prop_assert_eq!(document.serialize(), before);
    }

    #[test]
    fn ambiguous_warnings_quote_the_original_text(phrase in ambiguous_phrase()) {
        let markup = format!("<button>{}</button>", phrase);
        let mut document = Document::parse(&markup);

        let result = AmbiguousControlFixer.apply(&mut document);
        prop_assert_eq!(
            result.warnings,
            vec![format!("<button> label \"{}\" is ambiguous, developer review needed", phrase)]
        );
    }

    #[test]
    fn pipeline_output_is_fixer_output_concatenated(markup in form_markup()) {
        let mut combined_doc = Document::parse(&markup);
        let combined = Pipeline::default().run(&mut combined_doc);

        let mut stepwise_doc = Document::parse(&markup);
        let fixers: Vec<Box<dyn Fixer>> = vec![
            Box::new(LabelFixer),
            Box::new(AriaRequiredFixer),
            Box::new(AmbiguousControlFixer),
        ];
        let mut expected = FixerResult::new();
        for fixer in &fixers {
            expected.extend(fixer.apply(&mut stepwise_doc));
        }

        prop_assert_eq!(combined, expected);
        prop_assert_eq!(combined_doc.serialize(), stepwise_doc.serialize());
    }

    #[test]
    fn second_pipeline_run_changes_nothing(markup in form_markup()) {
        let mut document = Document::parse(&markup);
        Pipeline::default().run(&mut document);
        let fixed = document.serialize();

        let again = Pipeline::default().run(&mut document);
        prop_assert!(again.changes.is_empty(), "changes on second run: {:?}", again.changes);
        prop_assert_eq!(document.serialize(), fixed);
    }
}
