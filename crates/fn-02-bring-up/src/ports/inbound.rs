//! Driving ports (Inbound API)

use async_trait::async_trait;
use shared_types::Topology;

use crate::domain::{BringUpReport, BringUpResult, StatusReport};

/// Primary bring-up API.
#[async_trait]
pub trait NetworkBringUpApi: Send + Sync {
    /// Create the shared network and start every node of `topology`.
    ///
    /// Fails without touching the engine if the topology is invalid. On a
    /// node failure, containers created so far are left running.
    async fn bring_up(&self, topology: &Topology) -> BringUpResult<BringUpReport>;

    /// List running containers.
    async fn status(&self) -> BringUpResult<StatusReport>;
}
