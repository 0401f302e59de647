//! a11ybench core library.
//!
//! This crate merges the reports of three automated accessibility tools
//! (axe-core, pa11y, Google Lighthouse) run over the same HTML page into one
//! de-duplicated issue catalog keyed by a shared WCAG-aligned rule taxonomy,
//! and scores each page with coverage-normalized, severity-weighted rates
//! plus a Red/Yellow/Green band.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `models`: Data models for findings, the rule taxonomy, raw tool
//!   reports, and output reports.
//! - `extract`: Per-tool finding extractors and the coverage counter.
//! - `aggregate`: Cross-tool aggregation into per-rule issue groups.
//! - `bench`: Benchmark rates and status classification.
//! - `audit`: Single-page engine tying extract, aggregate, and bench.
//! - `batch`: Parallel multi-page driver with per-page fault isolation.
//! - `output`: Human/JSON printers for audit and batch results.
//! - `error`: Error taxonomy for page audits.
//! - `utils`: Supporting helpers.
pub mod aggregate;
pub mod audit;
pub mod batch;
pub mod bench;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod output;
pub mod utils;
