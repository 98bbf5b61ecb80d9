//! Shared topologies and service construction.

use std::sync::Arc;

use fn_02_bring_up::test_utils::InMemoryRuntime;
use fn_02_bring_up::{BringUpConfig, BringUpContext, BringUpService, LaunchMode};
use shared_types::{Organization, Topology};

/// Network name used by every scenario.
pub const NETWORK: &str = "giou_net";

/// One organization, three peers, no orderers.
pub fn three_peers() -> Topology {
    Topology::new(vec![Organization::new("org1")
        .with_peer("peer0")
        .with_peer("peer1")
        .with_peer("peer2")])
}

/// One organization, two peers, one orderer on port 7050.
pub fn two_peers_one_orderer() -> Topology {
    Topology::new(vec![Organization::new("org1")
        .with_peer("peer0")
        .with_peer("peer1")
        .with_orderer("orderer0", "7050")])
}

/// Two organizations with two peers each and one orderer each.
pub fn two_orgs() -> Topology {
    Topology::new(vec![
        Organization::new("org1")
            .with_peer("peer0.org1.example.com")
            .with_peer("peer1.org1.example.com")
            .with_orderer("orderer0.example.com", "7050"),
        Organization::new("org2")
            .with_peer("peer0.org2.example.com")
            .with_peer("peer1.org2.example.com")
            .with_orderer("orderer1.example.com", "8050"),
    ])
}

/// Service over `runtime` with a fixed project root.
pub fn service(runtime: &Arc<InMemoryRuntime>, mode: LaunchMode) -> BringUpService<InMemoryRuntime> {
    let config = BringUpConfig {
        network_name: NETWORK.to_string(),
        project_dir: "/srv/fabnet".into(),
        mode,
        ..BringUpConfig::default()
    };
    BringUpService::new(BringUpContext::new(Arc::clone(runtime), config))
}
