// SPDX-License-Identifier: PMPL-1.0-or-later
//! Running the fixers over a document and packaging the outcome.
//!
//! One [`Document`] is built per input. The [`Pipeline`] hands it to each
//! fixer in turn as `&mut Document`, so no two fixers ever touch the tree
//! at the same time and each runs exactly once. Their changes and warnings
//! are concatenated in fixer order into a [`DocumentReport`].

use crate::document::Document;
use crate::error::{CmFormsError, Result};
use crate::fixers::{AmbiguousControlFixer, AriaRequiredFixer, Fixer, FixerResult, LabelFixer};
use crate::scanner;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Appended to the output path when nothing is written
pub const PREVIEW_MARKER: &str = " (preview)";

/// An ordered sequence of fixers
pub struct Pipeline {
    fixers: Vec<Box<dyn Fixer>>,
}

impl Default for Pipeline {
    /// Label fixer, then required-field fixer, then ambiguous-text fixer
    fn default() -> Self {
        Self::with_fixers(vec![
            Box::new(LabelFixer),
            Box::new(AriaRequiredFixer),
            Box::new(AmbiguousControlFixer),
        ])
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// A pipeline running exactly `fixers`, in the given order
    pub fn with_fixers(fixers: Vec<Box<dyn Fixer>>) -> Self {
        Self { fixers }
    }

    /// Names of the fixers, in run order
    pub fn fixer_names(&self) -> Vec<&str> {
        self.fixers.iter().map(|fixer| fixer.name()).collect()
    }

    /// Apply every fixer once, in order, and concatenate their output
    pub fn run(&self, document: &mut Document) -> FixerResult {
        let mut combined = FixerResult::new();

        for fixer in &self.fixers {
            let result = fixer.apply(document);
            debug!(
                fixer = fixer.name(),
                changes = result.changes.len(),
                warnings = result.warnings.len(),
                "Fixer applied"
            );
            combined.extend(result);
        }

        combined
    }
}

/// Result of processing one input document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    /// The input file
    pub source: PathBuf,
    /// Where the fixed markup goes, or the same path marked as a preview
    pub output_path: String,
    /// Every change, in pipeline order
    pub changes: Vec<String>,
    /// Every warning, in pipeline order
    pub warnings: Vec<String>,
    /// Whether writing was skipped
    pub dry_run: bool,
    /// The fixed markup; `None` in dry-run mode
    #[serde(skip)]
    pub output: Option<String>,
}

impl DocumentReport {
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Outcome for one input of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileOutcome {
    Processed(DocumentReport),
    Failed { path: PathBuf, error: String },
}

impl FileOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FileOutcome::Processed(report) => &report.source,
            FileOutcome::Failed { path, .. } => path,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, FileOutcome::Failed { .. })
    }
}

/// Parse `input` and run the default pipeline over it
pub fn process_markup(input: &str) -> (Document, FixerResult) {
    let mut document = Document::parse(input);
    let result = Pipeline::default().run(&mut document);
    (document, result)
}

/// Process already-read markup for `source` without touching the filesystem
pub fn process_document(source: &Path, input: &str, dry_run: bool) -> DocumentReport {
    let (document, result) = process_markup(input);
    let output_path = scanner::output_path_for(source).display().to_string();

    DocumentReport {
        source: source.to_path_buf(),
        output_path: if dry_run {
            format!("{}{}", output_path, PREVIEW_MARKER)
        } else {
            output_path
        },
        changes: result.changes,
        warnings: result.warnings,
        dry_run,
        output: (!dry_run).then(|| document.serialize()),
    }
}

/// Read, fix and (unless `dry_run`) write `<stem>_cm<ext>` next to `path`
pub fn process_file(path: &Path, dry_run: bool) -> Result<DocumentReport> {
    if path.file_stem().is_none() {
        return Err(CmFormsError::InvalidPath(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let report = process_document(path, &content, dry_run);

    if let Some(ref output) = report.output {
        std::fs::write(scanner::output_path_for(path), output)?;
    }

    info!(
        "Processed {} -> {} ({} changes, {} warnings)",
        path.display(),
        report.output_path,
        report.changes.len(),
        report.warnings.len()
    );

    Ok(report)
}

/// Process every path; a failing file is recorded and the rest still run
pub fn process_batch(paths: &[PathBuf], dry_run: bool) -> Vec<FileOutcome> {
    paths
        .iter()
        .map(|path| match process_file(path, dry_run) {
            Ok(report) => FileOutcome::Processed(report),
            Err(e) => {
                warn!("Failed to process {}: {}", path.display(), e);
                FileOutcome::Failed {
                    path: path.clone(),
                    error: e.to_string(),
                }
            }
        })
        .collect()
}
