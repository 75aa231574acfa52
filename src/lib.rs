// SPDX-License-Identifier: PMPL-1.0-or-later
//! cm-forms - accessibility fixer for HTML forms
//!
//! Parses form markup, applies a small set of correction rules and reports
//! every change made and every condition that needs a developer's review.
//! It is a local, single-pass corrector, not a full conformance checker.
//!
//! ## Fixers
//!
//! Run in this order over one shared document:
//!
//! - **Accessible label** (1.3.1/3.3.2): controls need a label, `aria-label`
//!   or `aria-labelledby`; adjacent free labels are associated automatically
//! - **Required field** (3.3.2/4.1.2): `required` is mirrored as `aria-required="true"`
//! - **Ambiguous control text** (2.4.6): "Submit", "OK", "Click here" and friends
//!
//! ## Example
//!
//! ```
//! use cm_forms::process_markup;
//!
//! let (document, result) = process_markup("<input type=\"text\" id=\"q\" required>");
//! assert_eq!(result.changes, vec!["Added aria-required=\"true\" to <input id=\"q\">"]);
//! assert!(document.serialize().contains("aria-required=\"true\""));
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod fixers;
pub mod pipeline;
pub mod report;
pub mod scanner;

pub use config::Config;
pub use document::{Document, Element, Node, NodeId};
pub use error::{CmFormsError, Result};
pub use fixers::{Fixer, FixerResult};
pub use pipeline::{
    process_batch, process_document, process_file, process_markup, DocumentReport, FileOutcome,
    Pipeline,
};
