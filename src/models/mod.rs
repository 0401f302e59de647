//! Shared data models for the merge engine and its report outputs.

pub mod raw;
pub mod taxonomy;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// The auditing tool a finding originated from.
///
/// Closed set: adding or removing a tool is a compile-time-checked change.
pub enum Source {
    #[serde(rename = "axe-core")]
    AxeCore,
    #[serde(rename = "pa11y")]
    Pa11y,
    #[serde(rename = "lighthouse")]
    Lighthouse,
}

impl Source {
    /// All sources in fold order: axe-core first, then pa11y, then
    /// lighthouse. Tie-breaks follow this order too.
    pub const ALL: [Source; 3] = [Source::AxeCore, Source::Pa11y, Source::Lighthouse];

    pub const fn as_str(self) -> &'static str {
        match self {
            Source::AxeCore => "axe-core",
            Source::Pa11y => "pa11y",
            Source::Lighthouse => "lighthouse",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Severity attached to a taxonomy rule.
pub enum Impact {
    Minor,
    Moderate,
    Serious,
    Critical,
}

impl Impact {
    /// Weight used by the impact-weighted rate.
    pub const fn weight(self) -> u64 {
        match self {
            Impact::Minor => 1,
            Impact::Moderate => 3,
            Impact::Serious => 6,
            Impact::Critical => 10,
        }
    }

    /// Weight of the most severe impact; normalization ceiling.
    pub const MAX_WEIGHT: u64 = 10;

    pub const fn as_str(self) -> &'static str {
        match self {
            Impact::Minor => "minor",
            Impact::Moderate => "moderate",
            Impact::Serious => "serious",
            Impact::Critical => "critical",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
/// One atomic observation reported by a tool, after adapter normalization.
///
/// Never mutated after creation. The `id` is the tool-native identifier as
/// actually seen in the raw report, kept for traceability even after the
/// rule has been resolved against the taxonomy.
pub struct Finding {
    pub source: Source,
    pub id: String,
    pub title: String,
    pub description: String,
    /// Tool-specific payload: an axe-core node reference or a lighthouse
    /// detail item. pa11y carries its context snippet in `description`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Qualitative risk band for one page.
pub enum Status {
    Red,
    Yellow,
    Green,
}

impl Status {
    pub const fn as_str(self) -> &'static str {
        match self {
            Status::Red => "Red",
            Status::Yellow => "Yellow",
            Status::Green => "Green",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
/// Per-source tally inside a reported issue.
///
/// `relative` marks the source that contributed the winning node count for
/// this rule; it is reporting metadata only and never feeds scoring.
pub struct SourceDetail {
    pub source: Source,
    pub amount: usize,
    pub relative: bool,
}

#[derive(Debug, Clone, Serialize)]
/// One canonical rule with everything the tools reported for it.
pub struct ReportedIssue {
    pub rule_name: String,
    /// Resolved severity, or `"tbd"` when the taxonomy does not know the
    /// rule yet.
    pub impact: String,
    pub amount_nodes_failed: usize,
    pub sources: Vec<SourceDetail>,
    pub issues: Vec<Finding>,
}

#[derive(Debug, Clone, Serialize)]
/// Placeholder block for criteria that still require human review.
pub struct ManualBlock {
    /// WCAG criteria outside the reach of the automatic tools, keyed by
    /// criterion id; values stay `"tbd"` until a human fills them in.
    pub checks: BTreeMap<String, String>,
    /// Rules axe-core marked `incomplete`: tested, but needing human
    /// judgement. Same shape as the automatic set, disjoint destination.
    pub follow_up: Vec<ReportedIssue>,
}

#[derive(Debug, Clone, Serialize)]
/// Canonical per-page issue report.
pub struct IssueReport {
    pub manual: ManualBlock,
    pub automatic: Vec<ReportedIssue>,
}

#[derive(Debug, Clone, Serialize)]
/// Overview/benchmark record for one page.
pub struct Overview {
    /// Lighthouse's own category score, `null` when the tool invocation
    /// failed upstream.
    pub lighthouse_score: Option<f64>,
    pub total_nodes_checked: usize,
    pub total_nodes_failed: usize,
    pub inaccessibility_rate: f64,
    pub impact_weighted_rate: f64,
    pub status: Status,
}
