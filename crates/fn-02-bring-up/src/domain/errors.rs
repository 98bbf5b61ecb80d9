//! Error types for the bring-up subsystem.
//!
//! Every engine failure is tagged with the operation that produced it and,
//! for node calls, the node it was for.

use std::fmt;

use fn_01_node_spec::{NodeKind, SpecError};
use shared_types::TopologyError;
use thiserror::Error;

/// Container engine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeOp {
    CreateNetwork,
    CreateContainer,
    StartContainer,
    ListContainers,
}

impl RuntimeOp {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateNetwork => "network_create",
            Self::CreateContainer => "container_create",
            Self::StartContainer => "container_start",
            Self::ListContainers => "container_list",
        }
    }
}

impl fmt::Display for RuntimeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateNetwork => write!(f, "network create"),
            Self::CreateContainer => write!(f, "container create"),
            Self::StartContainer => write!(f, "container start"),
            Self::ListContainers => write!(f, "container list"),
        }
    }
}

/// Errors reported by a `RuntimeClient`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The engine could not be reached at all.
    #[error("container engine unreachable: {0}")]
    Unreachable(String),

    /// The object already exists (HTTP 409 from Docker).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The referenced object does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other engine-side failure.
    #[error("engine returned status {status}: {message}")]
    Engine { status: u16, message: String },

    /// Client-side failure (transport, decoding).
    #[error("{0}")]
    Other(String),
}

/// A create or start call failed for one node.
#[derive(Debug, Clone, Error)]
#[error("{op} failed for {kind} '{node}' in group '{group}': {source}")]
pub struct ProvisionError {
    pub node: String,
    pub kind: NodeKind,
    pub group: String,
    pub op: RuntimeOp,
    #[source]
    pub source: RuntimeError,
}

/// Bring-up errors, in the order they can occur.
#[derive(Debug, Error)]
pub enum BringUpError {
    /// Topology failed validation; no engine call was made.
    #[error("invalid topology: {0}")]
    Topology(#[from] TopologyError),

    /// A node spec could not be derived; no engine call was made.
    #[error("node spec derivation failed: {0}")]
    Spec(#[from] SpecError),

    /// The shared network could not be created.
    #[error("network create failed for '{network}': {source}")]
    NetworkCreate {
        network: String,
        #[source]
        source: RuntimeError,
    },

    /// One or more node groups failed. Containers created before the failure
    /// are left in place.
    #[error("{}", describe_failures(.failures))]
    Provisioning { failures: Vec<ProvisionError> },

    /// A node group task panicked or was aborted.
    #[error("node group '{group}' did not complete: {reason}")]
    GroupAborted { group: String, reason: String },

    /// Final container listing failed. Nodes may all be running.
    #[error("container list failed: {source}")]
    Report {
        #[source]
        source: RuntimeError,
    },
}

impl BringUpError {
    /// Node-level failures, empty for other variants.
    pub fn provision_failures(&self) -> &[ProvisionError] {
        match self {
            Self::Provisioning { failures } => failures,
            _ => &[],
        }
    }
}

fn describe_failures(failures: &[ProvisionError]) -> String {
    match failures {
        [] => "node provisioning failed".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more failed group(s))", rest.len()),
    }
}

/// Result type for bring-up operations.
pub type BringUpResult<T> = Result<T, BringUpError>;
