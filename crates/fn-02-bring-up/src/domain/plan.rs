//! The bring-up plan: every node spec, grouped by launch unit.
//!
//! Derivation happens entirely up front so configuration errors surface
//! before the first engine call.

use std::fmt;

use fn_01_node_spec::{NodeKind, NodeSpec, NodeSpecBuilder, SpecResult};
use shared_types::Topology;

/// Label of the single orderer group.
pub const ORDERER_GROUP: &str = "orderers";

/// Nodes launched strictly one after another.
#[derive(Debug, Clone)]
pub struct NodeGroup {
    /// `peers/<org>` or `orderers`.
    pub label: String,
    pub kind: NodeKind,
    pub specs: Vec<NodeSpec>,
}

impl NodeGroup {
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// All node groups of one run.
#[derive(Debug, Clone)]
pub struct BringUpPlan {
    pub network: String,
    pub groups: Vec<NodeGroup>,
}

impl BringUpPlan {
    /// One peer group per organization with peers, then one group holding
    /// every orderer in topology order. Empty groups are omitted.
    pub fn build(topology: &Topology, builder: &NodeSpecBuilder) -> SpecResult<Self> {
        let mut groups = Vec::with_capacity(topology.orgs.len() + 1);

        for org in topology.orgs.iter().filter(|org| !org.peers.is_empty()) {
            let specs = (0..org.peers.len())
                .map(|index| builder.peer(&org.name, &org.peers, index))
                .collect::<SpecResult<Vec<_>>>()?;
            groups.push(NodeGroup {
                label: format!("peers/{}", org.name),
                kind: NodeKind::Peer,
                specs,
            });
        }

        let orderers = topology
            .orderers()
            .map(|(org, orderer)| builder.orderer(&org.name, orderer))
            .collect::<SpecResult<Vec<_>>>()?;
        if !orderers.is_empty() {
            groups.push(NodeGroup {
                label: ORDERER_GROUP.to_string(),
                kind: NodeKind::Orderer,
                specs: orderers,
            });
        }

        Ok(Self {
            network: builder.network().to_string(),
            groups,
        })
    }

    /// Total node count across groups.
    pub fn node_count(&self) -> usize {
        self.groups.iter().map(NodeGroup::len).sum()
    }

    /// Peer specs whose gossip bootstrap points back at themselves.
    pub fn self_paired_peers(&self) -> impl Iterator<Item = &NodeSpec> {
        self.groups
            .iter()
            .flat_map(|group| group.specs.iter())
            .filter(|spec| spec.bootstrap.is_some_and(|pairing| pairing.self_paired()))
    }
}

/// One block per group, one line per node.
impl fmt::Display for BringUpPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "network {} ({} nodes)", self.network, self.node_count())?;
        for group in &self.groups {
            writeln!(f, "{}:", group.label)?;
            for spec in &group.specs {
                match spec.bootstrap {
                    Some(pairing) if pairing.self_paired() => {
                        writeln!(f, "  {} (bootstrap: self)", spec.name)?;
                    }
                    Some(_) => {
                        let target = spec
                            .env_value("CORE_PEER_GOSSIP_BOOTSTRAP")
                            .unwrap_or_default();
                        writeln!(f, "  {} (bootstrap: {target})", spec.name)?;
                    }
                    None => {
                        let ports: Vec<String> = spec
                            .ports
                            .iter()
                            .map(|p| format!("{}->{}", p.host_port, p.container_key()))
                            .collect();
                        writeln!(f, "  {} (ports: {})", spec.name, ports.join(", "))?;
                    }
                }
            }
        }
        Ok(())
    }
}
