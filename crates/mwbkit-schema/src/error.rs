use std::fmt;

use thiserror::Error;

/// Errors that abort loading a document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("missing `{attribute}` attribute on <{node}> at {line}")]
    MissingAttribute {
        node: String,
        attribute: String,
        line: SourceLine,
    },

    #[error("expected exactly one top-level value entry, found {found} (data node at {line})")]
    EntryCount { found: usize, line: SourceLine },

    #[error("unsupported document: expected exactly one {what}, found {found}")]
    Cardinality { what: &'static str, found: usize },

    #[error("unsupported document: the physical model has no catalog")]
    MissingCatalog,

    #[error("failed to read seed data: {0}")]
    Seed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A line in the source markup, when the reader tracked it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceLine(pub Option<u32>);

impl fmt::Display for SourceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(line) => write!(f, "line {line}"),
            None => write!(f, "<unknown line>"),
        }
    }
}
