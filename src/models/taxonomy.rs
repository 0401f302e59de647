//! Canonical rule taxonomy: loading and identifier resolution.
//!
//! The taxonomy is a fixed, ordered list of rule descriptors loaded once at
//! startup and immutable afterward. Each tool-native identifier — a short
//! code for pa11y, a help-page URL for axe-core and lighthouse — is looked
//! up against it to find the shared rule it maps onto.

use crate::error::AuditError;
use crate::models::Impact;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
/// One row of the canonical rule catalog.
///
/// Identifier sets must be mutually exclusive across rows; that is a
/// data-authoring concern checked offline, not at run time.
pub struct RuleDescriptor {
    /// Short-code identifiers (pa11y family), e.g. `Principle1.Guideline1_1.1_1_1.H37`.
    #[serde(default)]
    pub short_codes: Vec<String>,
    /// Help-page URLs (axe-core and lighthouse family), query strings
    /// already stripped.
    #[serde(default)]
    pub help_urls: Vec<String>,
    pub impact: Impact,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which identifier family to search during resolution. The two families
/// are never ambiguous: each tool emits only one kind.
pub enum IdKind {
    ShortCode,
    HelpUrl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of resolving a tool-native identifier.
pub enum Resolution {
    /// Index of the first matching row, in table order.
    Known(usize),
    /// No row claims the identifier. Kept for traceability and surfaced in
    /// the report, but excluded from scoring.
    Unclassified(String),
}

#[derive(Debug, Deserialize)]
struct TaxonomyFile {
    #[serde(default)]
    rules: Vec<RuleDescriptor>,
}

#[derive(Debug, Clone)]
/// The rule catalog, loaded once per process.
pub struct Taxonomy {
    rules: Vec<RuleDescriptor>,
}

impl Taxonomy {
    pub fn new(rules: Vec<RuleDescriptor>) -> Self {
        Self { rules }
    }

    /// Load the catalog from a TOML, JSON, or YAML file (by extension;
    /// TOML when in doubt).
    pub fn load(path: &Path) -> Result<Self, AuditError> {
        let s = fs::read_to_string(path).map_err(|e| AuditError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("toml");
        let parsed: Result<TaxonomyFile, String> = match ext {
            "json" => serde_json::from_str(&s).map_err(|e| e.to_string()),
            "yaml" | "yml" => serde_yaml::from_str(&s).map_err(|e| e.to_string()),
            _ => toml::from_str(&s).map_err(|e| e.to_string()),
        };
        let file = parsed.map_err(|detail| AuditError::Parse {
            path: path.to_string_lossy().to_string(),
            detail,
        })?;
        Ok(Self { rules: file.rules })
    }

    pub fn rules(&self) -> &[RuleDescriptor] {
        &self.rules
    }

    /// Row behind a `Resolution::Known` index.
    pub fn rule(&self, index: usize) -> &RuleDescriptor {
        &self.rules[index]
    }

    /// Resolve a tool-native identifier against the catalog.
    ///
    /// Scans rows in table order and returns the first whose matching
    /// identifier family contains the input exactly; no partial or fuzzy
    /// matching. Pure function: the same input always resolves the same.
    pub fn resolve(&self, identifier: &str, kind: IdKind) -> Resolution {
        for (index, rule) in self.rules.iter().enumerate() {
            let family = match kind {
                IdKind::ShortCode => &rule.short_codes,
                IdKind::HelpUrl => &rule.help_urls,
            };
            if family.iter().any(|id| id == identifier) {
                return Resolution::Known(index);
            }
        }
        Resolution::Unclassified(identifier.to_string())
    }
}
