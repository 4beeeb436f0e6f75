use std::fmt;

use crate::model::SourceTag;

/// Which column failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Identifier,
    Name,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier => write!(f, "identifier"),
            Self::Name => write!(f, "name"),
        }
    }
}

#[derive(Debug)]
pub enum ReconError {
    /// Header row not found within the scan window, or the table is empty.
    MalformedTable { source: SourceTag, reason: String },
    /// Identifier or name column unresolved for a source.
    ColumnNotFound { kind: ColumnKind, source: SourceTag },
    /// A required source role is absent or could not be assigned.
    MissingSource(String),
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad threshold, empty hint list, etc.).
    ConfigValidation(String),
    /// IO error (file read, decode, etc.).
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTable { source, reason } => {
                write!(f, "source '{source}': malformed table: {reason}")
            }
            Self::ColumnNotFound { kind, source } => {
                write!(f, "source '{source}': {kind} column not found")
            }
            Self::MissingSource(msg) => write!(f, "missing source: {msg}"),
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
