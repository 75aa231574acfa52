// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for a batch of processed files.
//!
//! Supports multiple output formats:
//! - Text: the console layout (one block per file, changes then warnings)
//! - JSON: the per-file reports for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use crate::error::Result;
use crate::pipeline::FileOutcome;
use colored::{ColoredString, Colorize};
use serde::Serialize;

/// Project page shown in the banner and footer
pub const PROJECT_URL: &str = "https://github.com/comfort-mode-toolkit/cm-forms/";

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI integration
    Sarif,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Sarif => write!(f, "sarif"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Presentation switches for the text format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextOptions {
    /// Emit ANSI colors
    pub color: bool,
    /// Print the notice banner and footer
    pub banner: bool,
    /// Note that no files were written
    pub dry_run: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            color: true,
            banner: true,
            dry_run: false,
        }
    }
}

/// Rule identifier for a report message, recovered from its wording
pub fn classify(message: &str) -> &'static str {
    if message.starts_with("Added aria-required") {
        "aria-required"
    } else if message.starts_with("Associated <label>") {
        "label-association"
    } else if message.contains(" is ambiguous, ") {
        "ambiguous-control-text"
    } else if message.starts_with("<label for=") {
        "orphan-label"
    } else {
        "accessible-label"
    }
}

/// Generate a report for a batch of outcomes
pub fn generate_report(
    outcomes: &[FileOutcome],
    format: OutputFormat,
    options: TextOptions,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(generate_text_report(outcomes, options)),
        OutputFormat::Json => generate_json_report(outcomes),
        OutputFormat::Sarif => generate_sarif_report(outcomes),
    }
}

fn paint(text: &str, color: bool, style: fn(&str) -> ColoredString) -> String {
    if color {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

/// The notice printed before anything else
pub fn banner(color: bool) -> String {
    let notice = format!(
        "NOTICE: This is a pre-alpha release (v{}). No guarantees, minimal features live.\n\
         Visit {} to contribute or share feedback.",
        env!("CARGO_PKG_VERSION"),
        PROJECT_URL
    );
    let mut output = paint("[cm-forms]", color, |s| s.yellow().bold());
    output.push('\n');
    output.push_str(&paint(&notice, color, |s| s.yellow().bold()));
    output.push('\n');
    output
}

/// Hint printed when no paths are given
pub fn usage_hint(color: bool) -> String {
    paint(
        "No files provided. Usage: cm-forms <htmlfile1> ... [--dryrun]",
        color,
        |s| s.yellow(),
    )
}

/// Generate the console report
fn generate_text_report(outcomes: &[FileOutcome], options: TextOptions) -> String {
    let color = options.color;
    let mut output = String::new();

    if options.banner {
        output.push_str(&banner(color));
    }

    for outcome in outcomes {
        match outcome {
            FileOutcome::Processed(report) => {
                output.push('\n');
                let heading = format!(
                    "Processed: {} -> {}",
                    report.source.display(),
                    report.output_path
                );
                output.push_str(&paint(&heading, color, |s| s.bold()));
                output.push('\n');

                for change in &report.changes {
                    output.push_str(&format!("- {}\n", change));
                }
                for warning in &report.warnings {
                    let line = format!("WARNING: {}", warning);
                    output.push_str(&format!("- {}\n", paint(&line, color, |s| s.yellow())));
                }

                if options.dry_run {
                    output.push_str(&paint("(Dryrun mode: No files were written)", color, |s| {
                        s.dimmed()
                    }));
                    output.push('\n');
                }
            }
            FileOutcome::Failed { path, error } => {
                let line = format!("Error processing {}: {}", path.display(), error);
                output.push('\n');
                output.push_str(&paint(&line, color, |s| s.red()));
                output.push('\n');
            }
        }
    }

    if options.banner {
        output.push('\n');
        let footer = format!("For more info and feedback, visit: {}", PROJECT_URL);
        output.push_str(&paint(&footer, color, |s| s.dimmed()));
        output.push('\n');
    }

    output
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    tool: &'static str,
    version: &'static str,
    files: &'a [FileOutcome],
}

/// Generate JSON report
fn generate_json_report(outcomes: &[FileOutcome]) -> Result<String> {
    let report = JsonReport {
        tool: "cm-forms",
        version: env!("CARGO_PKG_VERSION"),
        files: outcomes,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// SARIF report structure (simplified)
#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
    #[serde(rename = "informationUri")]
    information_uri: String,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

fn sarif_result(uri: &str, message: &str, level: &str, rule_id: &str) -> SarifResult {
    SarifResult {
        rule_id: rule_id.to_string(),
        level: level.to_string(),
        message: SarifMessage {
            text: message.to_string(),
        },
        locations: vec![SarifLocation {
            physical_location: SarifPhysicalLocation {
                artifact_location: SarifArtifactLocation {
                    uri: uri.to_string(),
                },
            },
        }],
    }
}

/// Generate SARIF report. Changes are notes, warnings are warnings and
/// unreadable files are errors.
fn generate_sarif_report(outcomes: &[FileOutcome]) -> Result<String> {
    let mut results = Vec::new();

    for outcome in outcomes {
        let uri = outcome.path().display().to_string();
        match outcome {
            FileOutcome::Processed(report) => {
                for change in &report.changes {
                    results.push(sarif_result(&uri, change, "note", classify(change)));
                }
                for warning in &report.warnings {
                    results.push(sarif_result(&uri, warning, "warning", classify(warning)));
                }
            }
            FileOutcome::Failed { error, .. } => {
                results.push(sarif_result(&uri, error, "error", "processing-error"));
            }
        }
    }

    let report = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "cm-forms".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    information_uri: PROJECT_URL.to_string(),
                },
            },
            results,
        }],
    };

    Ok(serde_json::to_string_pretty(&report)?)
}
