// SPDX-License-Identifier: PMPL-1.0-or-later
//! Input discovery and output path derivation.
//!
//! Explicit file arguments are taken as given. Directories are walked for
//! markup files, skipping build output directories and files that are
//! already fixer output.

use crate::config::Config;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Inserted between the file stem and extension of every output file
pub const OUTPUT_SUFFIX: &str = "_cm";

/// `dir/page.html` -> `dir/page_cm.html`
pub fn output_path_for(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file_name = match path.extension() {
        Some(ext) => format!("{}{}.{}", stem, OUTPUT_SUFFIX, ext.to_string_lossy()),
        None => format!("{}{}", stem, OUTPUT_SUFFIX),
    };

    path.with_file_name(file_name)
}

/// Whether `path` looks like something this tool already wrote
pub fn is_fixer_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}

/// Expand the given paths into the list of files to process
pub fn collect_inputs(paths: &[PathBuf], config: &Config) -> Vec<PathBuf> {
    let mut inputs = Vec::new();

    for path in paths {
        if path.is_dir() {
            let found = scan_directory(path, config);
            info!("Found {} markup files under {}", found.len(), path.display());
            inputs.extend(found);
        } else {
            // Missing files are kept so they show up as per-file failures
            inputs.push(path.clone());
        }
    }

    inputs
}

/// Walk a directory for markup files
pub fn scan_directory(dir: &Path, config: &Config) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            // Skip hidden and excluded directories
            let name = e.file_name().to_str().unwrap_or("");
            if e.depth() > 0 && e.file_type().is_dir() {
                return !config.exclude.iter().any(|x| x == name) && !name.starts_with('.');
            }
            true
        })
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        if !config.extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)) {
            continue;
        }

        if is_fixer_output(path) {
            debug!("Skipping previous output {}", path.display());
            continue;
        }

        files.push(path.to_path_buf());
    }

    files
}
