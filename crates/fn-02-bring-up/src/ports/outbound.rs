//! # Driven Ports (Outbound SPI)
//!
//! The container engine this subsystem requires the host to provide.

use async_trait::async_trait;
use fn_01_node_spec::NodeSpec;

use crate::domain::{ContainerSummary, RuntimeError};

/// Thin facade over a container engine.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`: one handle is shared by reference
/// across every node group task. The orchestrator never mutates it; if the
/// underlying engine API is not safe for concurrent calls the implementation
/// must serialize them itself.
#[async_trait]
pub trait RuntimeClient: Send + Sync {
    /// Create a named network and return its engine id.
    ///
    /// Must return `RuntimeError::Conflict` when the name is taken.
    async fn create_network(&self, name: &str) -> Result<String, RuntimeError>;

    /// Create (but do not start) a container for `spec`, named `spec.name`,
    /// and return its engine id.
    async fn create_container(&self, spec: &NodeSpec) -> Result<String, RuntimeError>;

    /// Start a created container.
    async fn start_container(&self, id: &str) -> Result<(), RuntimeError>;

    /// Running containers, in engine order.
    async fn list_containers(&self) -> Result<Vec<ContainerSummary>, RuntimeError>;
}
