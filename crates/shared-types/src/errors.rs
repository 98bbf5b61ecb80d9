//! # Error Types
//!
//! Errors raised while loading or validating a topology.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or validating a topology.
#[derive(Debug, Error)]
pub enum TopologyError {
    /// The topology file could not be read.
    #[error("Failed to read topology file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The topology document is not valid YAML or has the wrong shape.
    #[error("Failed to parse topology: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The topology declares no organizations.
    #[error("Topology declares no organizations")]
    NoOrganizations,

    /// An organization, peer or orderer has an empty name.
    #[error("Empty {kind} name in organization #{org_index}")]
    EmptyName { kind: &'static str, org_index: usize },

    /// A name is not usable as a hostname and single path segment.
    #[error("Invalid {kind} name '{name}': use letters, digits, '_', '.' or '-', starting with a letter or digit")]
    InvalidName { kind: &'static str, name: String },

    /// Two nodes share a name (container names and hostnames must be unique).
    #[error("Duplicate node name '{name}' (first in '{first_org}', again in '{second_org}')")]
    DuplicateNodeName {
        name: String,
        first_org: String,
        second_org: String,
    },

    /// An orderer's published port is not a valid, non-zero TCP port.
    #[error("Invalid port '{port}' for orderer '{orderer}'")]
    InvalidPort { orderer: String, port: String },
}

/// Result type for topology operations.
pub type TopologyResult<T> = Result<T, TopologyError>;
