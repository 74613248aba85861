//! Directory scanner for discovering input tables

use crate::error::Result;
use crate::pipeline::OUTPUT_PREFIX;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Result of scanning directories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Root directories that were scanned
    pub roots: Vec<PathBuf>,
    /// Discovered input files, sorted by path
    pub files: Vec<PathBuf>,
    /// Files skipped because they are earlier outputs
    pub skipped_outputs: usize,
    /// Entries that could not be read (broken links, permission errors)
    pub skipped_entries: usize,
}

/// Scan one or more directories for CSV tables.
///
/// Files that already carry the output prefix are skipped so a directory
/// can be cleaned in place more than once. Unreadable entries are logged
/// and skipped; they never abort the scan.
pub fn scan_directory<P: AsRef<Path>>(roots: &[P]) -> Result<ScanResult> {
    let mut files = Vec::new();
    let mut skipped_outputs = 0;
    let mut skipped_entries = 0;

    for root in roots {
        for entry in WalkDir::new(root.as_ref()).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "entry skipped");
                    skipped_entries += 1;
                    continue;
                }
            };
            let path = entry.path();

            if !entry.file_type().is_file() || !is_csv(path) {
                continue;
            }

            if is_output(path) {
                skipped_outputs += 1;
                continue;
            }

            files.push(path.to_path_buf());
        }
    }

    files.sort();

    Ok(ScanResult {
        roots: roots.iter().map(|r| r.as_ref().to_path_buf()).collect(),
        files,
        skipped_outputs,
        skipped_entries,
    })
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn is_output(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(OUTPUT_PREFIX))
}
