// This is a part of encoding-dbcs.
// Copyright (c) 2026, the encoding-dbcs developers.
// See README.md and LICENSE.txt for details.

//! Errors reported above the raw incremental interface.

use thiserror::Error;

use crate::types::CoderResult;

/// A conversion error that the trap refused to handle.
/// `offset` is the input position of the first problematic unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("malformed input of length {length} at offset {offset}")]
    Malformed { offset: usize, length: usize },
    #[error("unmappable input of length {length} at offset {offset}")]
    Unmappable { offset: usize, length: usize },
}

impl CodecError {
    /// Converts an error result at `offset`. Anything but `Unmappable` counts as malformed.
    pub fn from_result(result: CoderResult, offset: usize) -> CodecError {
        match result {
            CoderResult::Unmappable(length) => CodecError::Unmappable { offset, length },
            other => CodecError::Malformed { offset, length: other.length() },
        }
    }

    pub fn offset(&self) -> usize {
        match *self {
            CodecError::Malformed { offset, .. } | CodecError::Unmappable { offset, .. } => offset,
        }
    }
}

/// Failures of the charset registry.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("unknown charset label {0:?}")]
    UnknownLabel(String),
    #[error("charset label {0:?} is already registered")]
    DuplicateLabel(String),
}

#[cfg(feature = "manifest")]
pub use self::config_error::ConfigError;

#[cfg(feature = "manifest")]
mod config_error {
    use std::io;
    use std::path::PathBuf;

    use encoding_index_dbcs::{TableError, TableKind};
    use thiserror::Error;

    use super::LookupError;

    /// Failures while loading a charset manifest and its table assets.
    #[derive(Debug, Error)]
    pub enum ConfigError {
        #[error("cannot read {}: {source}", .path.display())]
        Io { path: PathBuf, #[source] source: io::Error },
        #[error("invalid manifest: {0}")]
        Json(#[from] serde_json::Error),
        #[error("invalid table asset {}: {source}", .path.display())]
        Table { path: PathBuf, #[source] source: TableError },
        #[error("{} holds a {found:?} table where a {expected:?} table is required", .path.display())]
        KindMismatch { path: PathBuf, expected: TableKind, found: TableKind },
        #[error("charset {charset} contains unknown charset {label:?}")]
        UnknownContains { charset: String, label: String },
        #[error(transparent)]
        Lookup(#[from] LookupError),
    }
}
