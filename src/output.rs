//! Output rendering for audit and batch results.
//!
//! Supports `human` (default) and `json` outputs. The JSON form combines
//! the canonical issue report and the overview record; the human form
//! prints one line per rule plus a summary line.

use crate::audit::PageAudit;
use crate::batch::PageOutcome;
use crate::models::{ReportedIssue, Status};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn impact_tag(impact: &str, color: bool) -> String {
    let tag = format!("⟦{impact}⟧");
    if !color {
        return tag;
    }
    match impact {
        "critical" => tag.red().bold().to_string(),
        "serious" => tag.red().to_string(),
        "moderate" => tag.yellow().bold().to_string(),
        "minor" => tag.blue().bold().to_string(),
        _ => tag.bright_black().to_string(),
    }
}

fn status_tag(status: Status, color: bool) -> String {
    let name = status.as_str();
    if !color {
        return name.to_string();
    }
    match status {
        Status::Red => name.red().bold().to_string(),
        Status::Yellow => name.yellow().bold().to_string(),
        Status::Green => name.green().bold().to_string(),
    }
}

fn issue_line(issue: &ReportedIssue, color: bool) -> String {
    let tag = impact_tag(&issue.impact, color);
    let name = if color {
        issue.rule_name.clone().bold().to_string()
    } else {
        issue.rule_name.clone()
    };
    let sources = issue
        .sources
        .iter()
        .map(|s| {
            if s.relative {
                format!("{}={}*", s.source, s.amount)
            } else {
                format!("{}={}", s.source, s.amount)
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "{} {} — {} nodes ❲{}❳",
        tag, name, issue.amount_nodes_failed, sources
    )
}

/// Print one page's audit in the requested format.
pub fn print_audit(audit: &PageAudit, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_audit_json(audit)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for issue in &audit.report.automatic {
                println!("{}", issue_line(issue, color));
            }
            for issue in &audit.report.manual.follow_up {
                let line = format!("(manual follow-up) {}", issue_line(issue, color));
                if color {
                    println!("{}", line.bright_black());
                } else {
                    println!("{}", line);
                }
            }
            let overview = &audit.overview;
            let summary = format!(
                "— Summary — checked={} failed={} rate={:.3} weighted={:.3} status={}",
                overview.total_nodes_checked,
                overview.total_nodes_failed,
                overview.inaccessibility_rate,
                overview.impact_weighted_rate,
                status_tag(overview.status, color),
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Print batch outcomes: one line per page, then totals.
pub fn print_batch(outcomes: &[PageOutcome], output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_batch_json(outcomes)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for outcome in outcomes {
                match &outcome.result {
                    Ok(audit) => {
                        let overview = &audit.overview;
                        println!(
                            "{} checked={} failed={} rate={:.3} weighted={:.3} status={}",
                            outcome.page,
                            overview.total_nodes_checked,
                            overview.total_nodes_failed,
                            overview.inaccessibility_rate,
                            overview.impact_weighted_rate,
                            status_tag(overview.status, color),
                        );
                    }
                    Err(e) => {
                        let mark = if color {
                            "✖".red().to_string()
                        } else {
                            "✖".to_string()
                        };
                        println!("{} {} {}", mark, outcome.page, e);
                    }
                }
            }
            let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
            let summary = format!(
                "— Summary — pages={} failed={}",
                outcomes.len(),
                failed
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Compose the combined audit JSON (pure) for testing/snapshot purposes.
pub fn compose_audit_json(audit: &PageAudit) -> JsonVal {
    json!({
        "accessibility": serde_json::to_value(&audit.report).unwrap(),
        "overview": serde_json::to_value(&audit.overview).unwrap(),
    })
}

/// Compose the batch JSON object (pure) for testing/snapshot purposes.
pub fn compose_batch_json(outcomes: &[PageOutcome]) -> JsonVal {
    let results: Vec<JsonVal> = outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(audit) => json!({
                "page": outcome.page,
                "overview": serde_json::to_value(&audit.overview).unwrap(),
            }),
            Err(e) => json!({
                "page": outcome.page,
                "error": e.to_string(),
            }),
        })
        .collect();
    let count_status = |status: Status| {
        outcomes
            .iter()
            .filter(|o| {
                o.result
                    .as_ref()
                    .map(|a| a.overview.status == status)
                    .unwrap_or(false)
            })
            .count()
    };
    let summary = json!({
        "pages": outcomes.len(),
        "failed": outcomes.iter().filter(|o| o.result.is_err()).count(),
        "red": count_status(Status::Red),
        "yellow": count_status(Status::Yellow),
        "green": count_status(Status::Green),
    });
    json!({"results": results, "summary": summary})
}
