//! Per-tool finding extractors and the coverage counter.
//!
//! Each adapter is a pure transform from one tool's raw report shape to a
//! uniform stream of resolved findings. axe-core doubles as the coverage
//! source: it is the only tool that enumerates every DOM node it examined
//! (pass and fail alike), which the scorer uses as the rate denominator.

use crate::error::AuditError;
use crate::models::raw::{AxeIssue, AxeReport, LighthouseAudit, Pa11yIssue};
use crate::models::taxonomy::{IdKind, Resolution, Taxonomy};
use crate::models::{Finding, Source};
use regex::Regex;
use serde_json::Value as Json;
use std::collections::BTreeMap;

/// Marker separating the pa11y rule prefix from the short code.
const PA11Y_CODE_MARKER: &str = "WCAG2AA.";

/// Markdown-link pattern carrying the help URL inside a lighthouse audit
/// description.
const LIGHTHOUSE_URL_PATTERN: &str = r"\[.*?\]\((https?://[^\s\)]+)\)";

#[derive(Debug, Clone)]
/// A finding paired with the rule it resolved to.
pub struct ResolvedFinding {
    pub resolution: Resolution,
    pub finding: Finding,
}

/// Help URLs are compared without their query strings.
fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

/// Walk one axe-core category and emit one finding per affected node.
///
/// The rule is resolved once per entry via its help URL; the resolution is
/// applied to every node. An entry with an empty node list is a fatal input
/// error: coverage accounting depends on the node counts, so skipping
/// silently would break them.
pub fn extract_axe(
    category: &'static str,
    issues: &[AxeIssue],
    taxonomy: &Taxonomy,
) -> Result<Vec<ResolvedFinding>, AuditError> {
    let mut out = Vec::new();
    for issue in issues {
        if issue.nodes.is_empty() {
            return Err(empty_node_list(category, &issue.help_url));
        }
        let identifier = strip_query(&issue.help_url).to_string();
        let resolution = taxonomy.resolve(&identifier, IdKind::HelpUrl);
        for node in &issue.nodes {
            out.push(ResolvedFinding {
                resolution: resolution.clone(),
                finding: Finding {
                    source: Source::AxeCore,
                    id: identifier.clone(),
                    title: issue.help.clone(),
                    description: issue.description.clone(),
                    detail: Some(node.clone()),
                },
            });
        }
    }
    Ok(out)
}

/// Emit one finding per pa11y record, resolved by short code.
pub fn extract_pa11y(issues: &[Pa11yIssue], taxonomy: &Taxonomy) -> Vec<ResolvedFinding> {
    issues
        .iter()
        .map(|issue| {
            let identifier = pa11y_short_code(&issue.code).to_string();
            let resolution = taxonomy.resolve(&identifier, IdKind::ShortCode);
            ResolvedFinding {
                resolution,
                finding: Finding {
                    source: Source::Pa11y,
                    id: identifier,
                    title: issue.message.clone(),
                    description: issue.context.clone(),
                    detail: None,
                },
            }
        })
        .collect()
}

/// Substring of a pa11y code after the `WCAG2AA.` marker.
///
/// Codes without the marker are used verbatim; they resolve against the
/// taxonomy like any other short code.
fn pa11y_short_code(code: &str) -> &str {
    match code.split_once(PA11Y_CODE_MARKER) {
        Some((_, short)) => short,
        None => code,
    }
}

/// Walk the lighthouse audit map and emit findings for failed audits.
///
/// Audits marked `notApplicable`/`manual` or scored 1 are clean and dropped
/// before resolution. A description without a recognizable help URL routes
/// the audit to the unclassified bucket keyed by the audit id, so a failed
/// audit is never silently lost. A failed audit with no detail items still
/// emits exactly one finding with no payload.
pub fn extract_lighthouse(
    audits: &BTreeMap<String, LighthouseAudit>,
    taxonomy: &Taxonomy,
) -> Vec<ResolvedFinding> {
    let url_pattern = Regex::new(LIGHTHOUSE_URL_PATTERN).unwrap();
    let mut out = Vec::new();
    for (audit_id, audit) in audits {
        if matches!(
            audit.score_display_mode.as_deref(),
            Some("notApplicable") | Some("manual")
        ) {
            continue;
        }
        if matches!(audit.score, Some(s) if s >= 1.0) {
            continue;
        }

        let description = audit.description.clone().unwrap_or_default();
        let (identifier, resolution) =
            match url_pattern.captures(&description).and_then(|c| c.get(1)) {
                Some(m) => {
                    let url = strip_query(m.as_str()).to_string();
                    let resolution = taxonomy.resolve(&url, IdKind::HelpUrl);
                    (url, resolution)
                }
                None => (
                    audit_id.clone(),
                    Resolution::Unclassified(audit_id.clone()),
                ),
            };

        let details: Vec<Option<Json>> = match audit.details.as_ref() {
            Some(d) if !d.items.is_empty() => d.items.iter().cloned().map(Some).collect(),
            // Failed audit with an empty detail table: count it once so the
            // defect signal survives aggregation.
            _ => vec![None],
        };
        for detail in details {
            out.push(ResolvedFinding {
                resolution: resolution.clone(),
                finding: Finding {
                    source: Source::Lighthouse,
                    id: identifier.clone(),
                    title: audit.title.clone(),
                    description: description.clone(),
                    detail,
                },
            });
        }
    }
    out
}

/// Total DOM nodes axe-core examined across `violations`, `incomplete`, and
/// `passes`. This is the scoring denominator; pa11y and lighthouse report
/// failures only and cannot supply a coverage universe.
pub fn count_checked_nodes(report: &AxeReport) -> Result<usize, AuditError> {
    let mut total = 0;
    for (category, issues) in [
        ("violations", &report.violations),
        ("incomplete", &report.incomplete),
        ("passes", &report.passes),
    ] {
        for issue in issues {
            if issue.nodes.is_empty() {
                return Err(empty_node_list(category, &issue.help_url));
            }
            total += issue.nodes.len();
        }
    }
    Ok(total)
}

fn empty_node_list(category: &str, help_url: &str) -> AuditError {
    AuditError::MalformedReport {
        tool: Source::AxeCore,
        detail: format!("{category} entry '{help_url}' has an empty node list"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::taxonomy::RuleDescriptor;
    use crate::models::Impact;
    use serde_json::json;

    fn taxonomy() -> Taxonomy {
        Taxonomy::new(vec![
            RuleDescriptor {
                short_codes: vec!["Principle1.Guideline1_1.1_1_1.H37".into()],
                help_urls: vec!["https://dequeuniversity.com/rules/axe/4.10/image-alt".into()],
                impact: Impact::Critical,
                name: "Images must have alternate text".into(),
            },
            RuleDescriptor {
                short_codes: vec!["Principle1.Guideline1_4.1_4_3.G18".into()],
                help_urls: vec!["https://dequeuniversity.com/rules/axe/4.10/color-contrast".into()],
                impact: Impact::Serious,
                name: "Elements must meet color contrast thresholds".into(),
            },
        ])
    }

    fn axe_issue(url: &str, nodes: usize) -> AxeIssue {
        serde_json::from_value(json!({
            "helpUrl": url,
            "help": "help text",
            "description": "desc",
            "nodes": (0..nodes).map(|i| json!({"target": [format!("#n{i}")]})).collect::<Vec<_>>(),
        }))
        .unwrap()
    }

    #[test]
    fn test_axe_one_finding_per_node() {
        let tax = taxonomy();
        let issues = vec![axe_issue(
            "https://dequeuniversity.com/rules/axe/4.10/image-alt?application=axeAPI",
            3,
        )];
        let findings = extract_axe("violations", &issues, &tax).unwrap();
        assert_eq!(findings.len(), 3);
        for f in &findings {
            assert_eq!(f.resolution, Resolution::Known(0));
            // query string stripped from the traceability id as well
            assert_eq!(
                f.finding.id,
                "https://dequeuniversity.com/rules/axe/4.10/image-alt"
            );
            assert_eq!(f.finding.source, Source::AxeCore);
            assert!(f.finding.detail.is_some());
        }
    }

    #[test]
    fn test_axe_empty_node_list_is_fatal() {
        let tax = taxonomy();
        let issues = vec![axe_issue("https://example.org/rule", 0)];
        let err = extract_axe("violations", &issues, &tax).unwrap_err();
        assert!(matches!(
            err,
            AuditError::MalformedReport {
                tool: Source::AxeCore,
                ..
            }
        ));
    }

    #[test]
    fn test_pa11y_strips_rule_prefix() {
        let tax = taxonomy();
        let issues = vec![Pa11yIssue {
            code: "WCAG2AA.Principle1.Guideline1_4.1_4_3.G18".into(),
            message: "contrast too low".into(),
            context: "<p>x</p>".into(),
            kind: "error".into(),
        }];
        let findings = extract_pa11y(&issues, &tax);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].resolution, Resolution::Known(1));
        assert_eq!(findings[0].finding.id, "Principle1.Guideline1_4.1_4_3.G18");
        assert_eq!(findings[0].finding.description, "<p>x</p>");
    }

    #[test]
    fn test_pa11y_code_without_marker_used_verbatim() {
        let tax = taxonomy();
        let issues = vec![Pa11yIssue {
            code: "BestPractice.Custom.1".into(),
            message: "m".into(),
            context: String::new(),
            kind: "warning".into(),
        }];
        let findings = extract_pa11y(&issues, &tax);
        assert_eq!(
            findings[0].resolution,
            Resolution::Unclassified("BestPractice.Custom.1".into())
        );
    }

    fn lighthouse_audit(v: Json) -> LighthouseAudit {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_lighthouse_drops_clean_and_untestable_audits() {
        let tax = taxonomy();
        let mut audits = BTreeMap::new();
        audits.insert(
            "a".into(),
            lighthouse_audit(json!({"scoreDisplayMode": "notApplicable", "score": null})),
        );
        audits.insert(
            "b".into(),
            lighthouse_audit(json!({"scoreDisplayMode": "manual", "score": null})),
        );
        audits.insert(
            "c".into(),
            lighthouse_audit(json!({"scoreDisplayMode": "binary", "score": 1})),
        );
        assert!(extract_lighthouse(&audits, &tax).is_empty());
    }

    #[test]
    fn test_lighthouse_one_finding_per_detail_item() {
        let tax = taxonomy();
        let mut audits = BTreeMap::new();
        audits.insert(
            "image-alt".into(),
            lighthouse_audit(json!({
                "scoreDisplayMode": "binary",
                "score": 0,
                "title": "Image elements have [alt] attributes",
                "description": "Informative elements should aim for short, descriptive alternate text. [Learn more](https://dequeuniversity.com/rules/axe/4.10/image-alt?application=lighthouse).",
                "details": {"items": [{"node": 1}, {"node": 2}]},
            })),
        );
        let findings = extract_lighthouse(&audits, &tax);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].resolution, Resolution::Known(0));
        assert_eq!(
            findings[0].finding.id,
            "https://dequeuniversity.com/rules/axe/4.10/image-alt"
        );
    }

    #[test]
    fn test_lighthouse_failed_audit_without_details_counts_once() {
        let tax = taxonomy();
        let mut audits = BTreeMap::new();
        audits.insert(
            "image-alt".into(),
            lighthouse_audit(json!({
                "scoreDisplayMode": "binary",
                "score": 0,
                "title": "t",
                "description": "[Learn more](https://dequeuniversity.com/rules/axe/4.10/image-alt).",
            })),
        );
        let findings = extract_lighthouse(&audits, &tax);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].finding.detail.is_none());
    }

    #[test]
    fn test_lighthouse_without_url_routes_to_unclassified() {
        let tax = taxonomy();
        let mut audits = BTreeMap::new();
        audits.insert(
            "custom-audit".into(),
            lighthouse_audit(json!({
                "scoreDisplayMode": "binary",
                "score": 0,
                "title": "t",
                "description": "no link here",
                "details": {"items": [{"n": 1}]},
            })),
        );
        let findings = extract_lighthouse(&audits, &tax);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].resolution,
            Resolution::Unclassified("custom-audit".into())
        );
    }

    #[test]
    fn test_coverage_counts_all_three_categories() {
        let report = AxeReport {
            violations: vec![axe_issue("https://example.org/a", 2)],
            incomplete: vec![axe_issue("https://example.org/b", 3)],
            passes: vec![axe_issue("https://example.org/c", 5)],
        };
        assert_eq!(count_checked_nodes(&report).unwrap(), 10);
    }

    #[test]
    fn test_coverage_empty_node_list_is_fatal() {
        let report = AxeReport {
            violations: vec![],
            incomplete: vec![],
            passes: vec![axe_issue("https://example.org/c", 0)],
        };
        assert!(count_checked_nodes(&report).is_err());
    }
}
