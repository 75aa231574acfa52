// SPDX-License-Identifier: PMPL-1.0-or-later
//! cm-forms CLI - accessibility fixer for HTML forms

use cm_forms::config::{self, Config};
use cm_forms::report::{self, generate_report, OutputFormat, TextOptions};
use cm_forms::{pipeline, scanner};
use clap::{Parser, ValueEnum};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// cm-forms: you code the form, we make it accessible
///
/// Writes `<name>_cm.<ext>` next to each input unless --dryrun is given.
#[derive(Parser)]
#[command(name = "cm-forms")]
#[command(version, about, long_about = None)]
struct Cli {
    /// HTML files or directories to process
    paths: Vec<PathBuf>,

    /// Simulate changes and preview the report only
    #[arg(long, visible_alias = "dry-run")]
    dryrun: bool,

    /// Output format
    #[arg(long)]
    format: Option<FormatArg>,

    /// Write the report to a file (stdout if not specified)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Suppress the notice banner and footer
    #[arg(long, short)]
    quiet: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

fn init_logging(verbose: bool, level: &str) {
    let filter = if verbose {
        EnvFilter::new("cm_forms=debug")
    } else {
        EnvFilter::try_new(format!("cm_forms={}", level))
            .unwrap_or_else(|_| EnvFilter::new("cm_forms=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => config::discover_config(Path::new(".")),
    };

    match path {
        Some(path) => Ok(config::load_config(&path)?),
        None => Ok(Config::default()),
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_logging(cli.verbose, &config.log.level);
    debug!(?config, "Effective configuration");

    let dry_run = cli.dryrun || config.dry_run;
    let format = match cli.format {
        Some(arg) => arg.into(),
        None => config
            .format
            .parse::<OutputFormat>()
            .map_err(anyhow::Error::msg)?,
    };
    let color = cli.output.is_none() && std::io::stdout().is_terminal();

    if cli.paths.is_empty() {
        if !cli.quiet {
            print!("{}", report::banner(color));
        }
        println!("{}", report::usage_hint(color));
        return Ok(ExitCode::SUCCESS);
    }

    let inputs = scanner::collect_inputs(&cli.paths, &config);
    let outcomes = pipeline::process_batch(&inputs, dry_run);

    let options = TextOptions {
        color,
        banner: !cli.quiet,
        dry_run,
    };
    let rendered = generate_report(&outcomes, format, options)?;
    write_output(&rendered, cli.output.as_deref())?;

    if outcomes.iter().any(|outcome| outcome.is_failure()) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
