//! The structured container specification.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::bootstrap::BootstrapPairing;

/// Which Fabric component a container runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Peer,
    Orderer,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Peer => write!(f, "peer"),
            Self::Orderer => write!(f, "orderer"),
        }
    }
}

/// One environment entry. Rendered as `KEY=VALUE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}

impl EnvVar {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for EnvVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Bind mount access mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindMode {
    ReadWrite,
    ReadOnly,
}

/// Host path bound into the container. Rendered as `host:container[:ro]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeBinding {
    /// Always absolute.
    pub host: PathBuf,
    pub container: String,
    pub mode: BindMode,
}

impl VolumeBinding {
    pub fn read_write(host: impl Into<PathBuf>, container: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            container: container.into(),
            mode: BindMode::ReadWrite,
        }
    }

    pub fn read_only(host: impl Into<PathBuf>, container: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            container: container.into(),
            mode: BindMode::ReadOnly,
        }
    }
}

impl fmt::Display for VolumeBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host.display(), self.container)?;
        if self.mode == BindMode::ReadOnly {
            write!(f, ":ro")?;
        }
        Ok(())
    }
}

/// Transport protocol of a published port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Protocol {
    Tcp,
    Udp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp => write!(f, "tcp"),
            Self::Udp => write!(f, "udp"),
        }
    }
}

/// Container port published on the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortBinding {
    pub container_port: u16,
    pub protocol: Protocol,
    pub host_ip: String,
    pub host_port: u16,
}

impl PortBinding {
    /// TCP port published on all host interfaces.
    pub fn tcp_all_interfaces(container_port: u16, host_port: u16) -> Self {
        Self {
            container_port,
            protocol: Protocol::Tcp,
            host_ip: "0.0.0.0".to_string(),
            host_port,
        }
    }

    /// Engine port key, e.g. `7050/tcp`.
    pub fn container_key(&self) -> String {
        format!("{}/{}", self.container_port, self.protocol)
    }
}

/// Everything the engine needs to create one node container.
///
/// Derived, never persisted. One exists per container-create call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Container name; equal to the node name in the topology.
    pub name: String,
    pub kind: NodeKind,
    /// Owning organization.
    pub organization: String,
    pub hostname: String,
    pub domain: String,
    pub image: String,
    pub command: Vec<String>,
    pub env: Vec<EnvVar>,
    pub volumes: Vec<VolumeBinding>,
    pub ports: Vec<PortBinding>,
    /// Shared network the container joins.
    pub network: String,
    pub working_dir: String,
    /// Gossip pairing, peers only.
    pub bootstrap: Option<BootstrapPairing>,
}

impl NodeSpec {
    /// Value of the first environment entry with `key`.
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|var| var.key == key)
            .map(|var| var.value.as_str())
    }

    /// Number of environment entries with `key`.
    pub fn env_count(&self, key: &str) -> usize {
        self.env.iter().filter(|var| var.key == key).count()
    }

    /// `KEY=VALUE` strings for the engine.
    pub fn env_strings(&self) -> Vec<String> {
        self.env.iter().map(ToString::to_string).collect()
    }

    /// `host:container[:ro]` strings for the engine.
    pub fn bind_strings(&self) -> Vec<String> {
        self.volumes.iter().map(ToString::to_string).collect()
    }
}
