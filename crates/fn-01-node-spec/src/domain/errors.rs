//! Error types for spec derivation.

use std::path::PathBuf;

use thiserror::Error;

/// Spec derivation errors. Derivation never falls back to a default.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Orderer port is not a valid, non-zero TCP port.
    #[error("Invalid port '{port}' for orderer '{orderer}'")]
    InvalidPort { orderer: String, port: String },

    /// Project directory could not be turned into an absolute path.
    #[error("Cannot resolve project path '{}': {source}", path.display())]
    UnresolvableProjectPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A node or organization name is not a single plain path segment.
    #[error("Name '{segment}' is not a single path segment")]
    UnsafePathSegment { segment: String },

    /// Peer index is outside the organization's peer list.
    #[error("Peer index {index} out of range for organization '{org}' with {len} peers")]
    NodeIndexOutOfRange {
        org: String,
        index: usize,
        len: usize,
    },
}

/// Result type for spec derivation.
pub type SpecResult<T> = Result<T, SpecError>;
