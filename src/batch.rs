//! Multi-page batch driver.
//!
//! Discovers per-page report bundles in a directory, audits every page in
//! parallel, and isolates failures: a malformed report aborts its own page
//! only, never the batch. Outcomes come back sorted by page name so output
//! is deterministic regardless of scheduling.

use crate::audit::{self, PageAudit};
use crate::bench::Thresholds;
use crate::error::AuditError;
use crate::models::raw::{AxeReport, LighthouseReport, Pa11yIssue};
use crate::models::taxonomy::Taxonomy;
use glob::glob;
use rayon::prelude::*;
use std::fs;
use std::path::Path;

/// File suffixes of one page's report bundle. The axe-core and pa11y
/// reports are required; the lighthouse file is absent when the tool
/// invocation failed upstream.
pub const AXE_SUFFIX: &str = ".axe.json";
pub const PA11Y_SUFFIX: &str = ".pa11y.json";
pub const LIGHTHOUSE_SUFFIX: &str = ".lighthouse.json";

#[derive(Debug)]
/// Outcome of one page in a batch run.
pub struct PageOutcome {
    pub page: String,
    pub result: Result<PageAudit, AuditError>,
}

/// Load and deserialize one JSON report file.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AuditError> {
    let s = fs::read_to_string(path).map_err(|e| AuditError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    serde_json::from_str(&s).map_err(|e| AuditError::Parse {
        path: path.to_string_lossy().to_string(),
        detail: e.to_string(),
    })
}

/// Audit the bundle of one page rooted at `<dir>/<page>`.
pub fn audit_bundle(
    dir: &Path,
    page: &str,
    taxonomy: &Taxonomy,
    thresholds: &Thresholds,
) -> Result<PageAudit, AuditError> {
    let axe: AxeReport = read_json(&dir.join(format!("{page}{AXE_SUFFIX}")))?;
    let pa11y: Vec<Pa11yIssue> = read_json(&dir.join(format!("{page}{PA11Y_SUFFIX}")))?;
    let lighthouse_path = dir.join(format!("{page}{LIGHTHOUSE_SUFFIX}"));
    let lighthouse: Option<LighthouseReport> = if lighthouse_path.is_file() {
        Some(read_json(&lighthouse_path)?)
    } else {
        None
    };
    audit::audit_page(&axe, &pa11y, lighthouse.as_ref(), taxonomy, thresholds)
}

/// Discover page names in `dir` by their axe-core reports, sorted.
pub fn discover_pages(dir: &Path) -> Vec<String> {
    let pattern = dir
        .join(format!("*{AXE_SUFFIX}"))
        .to_string_lossy()
        .to_string();
    let mut pages: Vec<String> = match glob(&pattern) {
        Ok(entries) => entries
            .flatten()
            .filter_map(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .and_then(|n| n.strip_suffix(AXE_SUFFIX))
                    .map(|s| s.to_string())
            })
            .collect(),
        Err(_) => Vec::new(),
    };
    pages.sort();
    pages
}

/// Audit every bundle in `dir`, pages in parallel.
///
/// Each page is an independent unit of work borrowing the same immutable
/// taxonomy; a fatal error is captured in that page's outcome.
pub fn run_batch(dir: &Path, taxonomy: &Taxonomy, thresholds: &Thresholds) -> Vec<PageOutcome> {
    let pages = discover_pages(dir);
    let mut outcomes: Vec<PageOutcome> = pages
        .par_iter()
        .map(|page| PageOutcome {
            page: page.clone(),
            result: audit_bundle(dir, page, taxonomy, thresholds),
        })
        .collect();
    outcomes.sort_by(|a, b| a.page.cmp(&b.page));
    outcomes
}

/// Write the two per-page report files next to the inputs:
/// `<page>.accessibility.json` (canonical issues) and
/// `overview_<page>.json` (benchmark record).
pub fn write_reports(dir: &Path, page: &str, audit: &PageAudit) -> Result<(), AuditError> {
    let write = |path: &Path, body: String| -> Result<(), AuditError> {
        fs::write(path, body).map_err(|e| AuditError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    };
    write(
        &dir.join(format!("{page}.accessibility.json")),
        serde_json::to_string_pretty(&audit.report).unwrap(),
    )?;
    write(
        &dir.join(format!("overview_{page}.json")),
        serde_json::to_string_pretty(&audit.overview).unwrap(),
    )
}
