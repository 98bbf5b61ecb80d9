//! Bring-up and status reports.

use std::fmt;

use fn_01_node_spec::NodeKind;
use serde::{Deserialize, Serialize};

/// One running container as listed by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSummary {
    pub id: String,
    /// Engine-reported names; Docker prefixes them with `/`.
    pub names: Vec<String>,
}

impl ContainerSummary {
    pub fn new(id: impl Into<String>, names: Vec<String>) -> Self {
        Self {
            id: id.into(),
            names,
        }
    }

    /// First name without the engine's leading `/`, or empty.
    pub fn display_name(&self) -> &str {
        self.names
            .first()
            .map(|name| name.trim_start_matches('/'))
            .unwrap_or_default()
    }
}

/// Running containers in the order the engine returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub containers: Vec<ContainerSummary>,
}

impl StatusReport {
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Display names in listing order.
    pub fn names(&self) -> Vec<&str> {
        self.containers
            .iter()
            .map(ContainerSummary::display_name)
            .collect()
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "List of containers that are running:")?;
        for container in &self.containers {
            writeln!(
                f,
                "container ID: {} with container Name: {}",
                container.id,
                container.display_name()
            )?;
        }
        Ok(())
    }
}

/// A node whose container was created and started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartedNode {
    pub name: String,
    pub kind: NodeKind,
    pub group: String,
    pub container_id: String,
}

/// Result of a successful bring-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BringUpReport {
    pub network: String,
    /// Engine id of the network, or its name when it already existed.
    pub network_id: String,
    /// The network existed before this run.
    pub network_reused: bool,
    /// Started nodes, grouped in plan order.
    pub started: Vec<StartedNode>,
    pub status: StatusReport,
}
