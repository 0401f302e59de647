//! Cross-tool aggregation of findings into per-rule issue groups.
//!
//! Groups are keyed by stable rule identity. Counts live as ordinary
//! mutable fields of the group value, never as key components, so an
//! increment is a field update rather than a pop-and-reinsert.

use crate::extract::ResolvedFinding;
use crate::models::taxonomy::{Resolution, Taxonomy};
use crate::models::{Finding, Impact, Source};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
/// Stable identity of an issue group for one page.
///
/// Known rules order by their taxonomy row; unclassified identifiers sort
/// after them, alphabetically. This is also the report output order.
pub enum RuleKey {
    Known(usize),
    Unclassified(String),
}

#[derive(Debug, Clone)]
/// Per-rule, per-page aggregate of findings from all tools.
///
/// Created the first time any tool reports the rule, mutated in place as
/// later findings arrive, never deleted within a page run.
pub struct IssueGroup {
    pub name: String,
    /// Resolved severity; `None` for rules the taxonomy does not know.
    pub impact: Option<Impact>,
    counts: [usize; 3],
    pub findings: Vec<Finding>,
}

impl IssueGroup {
    fn new(name: String, impact: Option<Impact>) -> Self {
        Self {
            name,
            impact,
            counts: [0; 3],
            findings: Vec::new(),
        }
    }

    pub fn count(&self, source: Source) -> usize {
        self.counts[source as usize]
    }

    /// Highest per-source count — deliberately the maximum, not the sum:
    /// the same underlying defect is frequently reported by more than one
    /// tool at different granularity, and summing would multiply-count it.
    pub fn amount_nodes_failed(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// The source that contributed the winning count, ties going to the
    /// first in fold order. Reporting metadata only; never feeds scoring.
    pub fn relative_source(&self) -> Option<Source> {
        let max = self.amount_nodes_failed();
        if max == 0 {
            return None;
        }
        Source::ALL.into_iter().find(|s| self.count(*s) == max)
    }

    /// Unclassified groups stay visible in the report for taxonomy
    /// maintenance but are excluded from benchmark scoring.
    pub fn is_classified(&self) -> bool {
        self.impact.is_some()
    }
}

#[derive(Debug, Default)]
/// Accumulates the issue groups of one page, keyed by rule identity.
///
/// Passed explicitly through the fold; there is no ambient aggregation
/// state.
pub struct Aggregator {
    groups: BTreeMap<RuleKey, IssueGroup>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one resolved finding into its group, creating the group on the
    /// first report of that rule.
    pub fn push(&mut self, taxonomy: &Taxonomy, resolved: ResolvedFinding) {
        let ResolvedFinding {
            resolution,
            finding,
        } = resolved;
        let (key, name, impact) = match resolution {
            Resolution::Known(index) => {
                let rule = taxonomy.rule(index);
                (RuleKey::Known(index), rule.name.clone(), Some(rule.impact))
            }
            Resolution::Unclassified(identifier) => {
                let name = identifier.clone();
                (RuleKey::Unclassified(identifier), name, None)
            }
        };
        let group = self
            .groups
            .entry(key)
            .or_insert_with(|| IssueGroup::new(name, impact));
        group.counts[finding.source as usize] += 1;
        group.findings.push(finding);
    }

    pub fn extend(&mut self, taxonomy: &Taxonomy, findings: Vec<ResolvedFinding>) {
        for f in findings {
            self.push(taxonomy, f);
        }
    }

    /// Groups in deterministic report order.
    pub fn groups(&self) -> impl Iterator<Item = (&RuleKey, &IssueGroup)> {
        self.groups.iter()
    }

    /// Total failed nodes over classified groups only.
    pub fn failed_nodes(&self) -> usize {
        self.groups
            .values()
            .filter(|g| g.is_classified())
            .map(|g| g.amount_nodes_failed())
            .sum()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
