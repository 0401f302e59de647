//! Serde shapes of the three tools' raw JSON reports.
//!
//! Only the fields the engine consumes are modeled; everything else in the
//! reports is ignored on deserialization. Field names follow each tool's
//! own casing via `rename`.

use serde::Deserialize;
use serde_json::Value as Json;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize)]
/// axe-core run result: the three categories the engine consumes.
///
/// `violations` feed the automatic issue set, `incomplete` the manual
/// follow-up set, `passes` only the coverage tally. The fourth category
/// (`inapplicable`) carries no nodes and is not read.
pub struct AxeReport {
    #[serde(default)]
    pub violations: Vec<AxeIssue>,
    #[serde(default)]
    pub incomplete: Vec<AxeIssue>,
    #[serde(default)]
    pub passes: Vec<AxeIssue>,
}

#[derive(Debug, Clone, Deserialize)]
/// One axe-core rule result with the nodes it matched.
pub struct AxeIssue {
    #[serde(rename = "helpUrl")]
    pub help_url: String,
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub description: String,
    /// Node references, optionally carrying foreground/background color
    /// data for contrast rules. Must be non-empty per entry.
    #[serde(default)]
    pub nodes: Vec<Json>,
}

#[derive(Debug, Clone, Deserialize)]
/// One pa11y issue record. pa11y reports one record per occurrence and
/// carries no node-count multiplicity.
pub struct Pa11yIssue {
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub context: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
/// Lighthouse accessibility report: the audit map plus the category score.
pub struct LighthouseReport {
    #[serde(default)]
    pub audits: BTreeMap<String, LighthouseAudit>,
    #[serde(default)]
    pub categories: LighthouseCategories,
}

#[derive(Debug, Clone, Deserialize)]
/// One lighthouse audit result.
pub struct LighthouseAudit {
    #[serde(default, rename = "scoreDisplayMode")]
    pub score_display_mode: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub title: String,
    /// Free text; the canonical help URL is embedded here as a markdown
    /// link.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub details: Option<LighthouseDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
/// Detail table of a lighthouse audit.
pub struct LighthouseDetails {
    #[serde(default)]
    pub items: Vec<Json>,
}

#[derive(Debug, Clone, Default, Deserialize)]
/// Category block; only accessibility is requested upstream.
pub struct LighthouseCategories {
    #[serde(default)]
    pub accessibility: Option<LighthouseCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LighthouseCategory {
    #[serde(default)]
    pub score: Option<f64>,
}
