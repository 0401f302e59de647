//! Single-page audit engine.
//!
//! One atomic, ordered fold per page: axe-core findings first (plus the
//! coverage tally and the manual follow-up set), then pa11y, then
//! lighthouse. Later adapters land in groups created by earlier ones, so
//! the order is part of the contract. Stateless across pages; the taxonomy
//! is the only process-wide input.

use crate::aggregate::Aggregator;
use crate::bench::{self, Thresholds};
use crate::error::AuditError;
use crate::extract;
use crate::models::raw::{AxeReport, LighthouseReport, Pa11yIssue};
use crate::models::taxonomy::Taxonomy;
use crate::models::{
    IssueReport, ManualBlock, Overview, ReportedIssue, Source, SourceDetail,
};
use std::collections::BTreeMap;

/// WCAG criteria the automatic tools cannot decide; they appear in every
/// report as placeholders for human review.
const MANUAL_CRITERIA: [&str; 7] = [
    "1.4.4",
    "1.4.10",
    "1.4.12",
    "2.1.1+2.1.2",
    "2.4.3",
    "2.4.6",
    "2.4.7",
];

#[derive(Debug, Clone)]
/// Everything one page audit produces.
pub struct PageAudit {
    pub report: IssueReport,
    pub overview: Overview,
}

/// Run the merge-and-score fold for one page.
///
/// The lighthouse report is the only tolerated absence: when the tool
/// invocation failed upstream its adapter is simply not invoked, and
/// `lighthouse_score` comes back `null`.
pub fn audit_page(
    axe: &AxeReport,
    pa11y: &[Pa11yIssue],
    lighthouse: Option<&LighthouseReport>,
    taxonomy: &Taxonomy,
    thresholds: &Thresholds,
) -> Result<PageAudit, AuditError> {
    let total_nodes_checked = extract::count_checked_nodes(axe)?;

    let mut automatic = Aggregator::new();
    let mut manual = Aggregator::new();

    automatic.extend(
        taxonomy,
        extract::extract_axe("violations", &axe.violations, taxonomy)?,
    );
    manual.extend(
        taxonomy,
        extract::extract_axe("incomplete", &axe.incomplete, taxonomy)?,
    );
    automatic.extend(taxonomy, extract::extract_pa11y(pa11y, taxonomy));

    let lighthouse_score = match lighthouse {
        Some(report) => {
            automatic.extend(
                taxonomy,
                extract::extract_lighthouse(&report.audits, taxonomy),
            );
            report
                .categories
                .accessibility
                .as_ref()
                .and_then(|c| c.score)
        }
        None => None,
    };

    let total_nodes_failed = automatic.failed_nodes();
    let inaccessibility_rate =
        bench::inaccessibility_rate(total_nodes_failed, total_nodes_checked);
    let impact_weighted_rate = bench::impact_weighted_rate(
        automatic
            .groups()
            .filter_map(|(_, g)| g.impact.map(|i| (g.amount_nodes_failed(), i))),
    );
    let status = bench::status(inaccessibility_rate, impact_weighted_rate, thresholds);

    let report = IssueReport {
        manual: ManualBlock {
            checks: manual_checks(),
            follow_up: reported_issues(&manual),
        },
        automatic: reported_issues(&automatic),
    };
    let overview = Overview {
        lighthouse_score,
        total_nodes_checked,
        total_nodes_failed,
        inaccessibility_rate,
        impact_weighted_rate,
        status,
    };
    Ok(PageAudit { report, overview })
}

fn manual_checks() -> BTreeMap<String, String> {
    MANUAL_CRITERIA
        .iter()
        .map(|c| (c.to_string(), "tbd".to_string()))
        .collect()
}

/// Render aggregated groups as ordered report entries.
fn reported_issues(aggregator: &Aggregator) -> Vec<ReportedIssue> {
    aggregator
        .groups()
        .map(|(_, group)| {
            let relative = group.relative_source();
            ReportedIssue {
                rule_name: group.name.clone(),
                impact: group
                    .impact
                    .map(|i| i.as_str().to_string())
                    .unwrap_or_else(|| "tbd".to_string()),
                amount_nodes_failed: group.amount_nodes_failed(),
                sources: Source::ALL
                    .into_iter()
                    .filter(|s| group.count(*s) > 0)
                    .map(|s| SourceDetail {
                        source: s,
                        amount: group.count(s),
                        relative: relative == Some(s),
                    })
                    .collect(),
                issues: group.findings.clone(),
            }
        })
        .collect()
}
