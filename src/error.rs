//! Error taxonomy for page audits.
//!
//! Only conditions that abort a page land here. Identifiers the taxonomy
//! does not recognize and a missing lighthouse report are modeled in the
//! data instead of raised as errors.

use crate::models::Source;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    /// A tool report breaks its own accounting guarantees, e.g. an axe-core
    /// entry that claims nodes but carries an empty node list. Substituting
    /// zero would corrupt the coverage denominator, so the page is aborted.
    #[error("malformed {tool} report: {detail}")]
    MalformedReport { tool: Source, detail: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {detail}")]
    Parse { path: String, detail: String },
}
