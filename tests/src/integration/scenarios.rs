//! # End-to-End Scenarios
//!
//! Full bring-up runs against the recording engine, asserting on the
//! structured specs each container was created from.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fn_01_node_spec::{NodeKind, PortBinding};
    use fn_02_bring_up::test_utils::{InMemoryRuntime, RuntimeCall};
    use fn_02_bring_up::LaunchMode;

    use crate::fixtures::{service, three_peers, two_orgs, two_peers_one_orderer, NETWORK};

    const BOOTSTRAP: &str = "CORE_PEER_GOSSIP_BOOTSTRAP";

    // =========================================================================
    // Three peers, no orderers
    // =========================================================================

    #[tokio::test]
    async fn test_three_peers_mirror_bootstrap() {
        let runtime = Arc::new(InMemoryRuntime::new());
        service(&runtime, LaunchMode::Concurrent)
            .run(&three_peers())
            .await
            .unwrap();

        let calls = runtime.calls();
        let creates = calls
            .iter()
            .filter(|c| matches!(c, RuntimeCall::CreateContainer(_)))
            .count();
        let starts = calls
            .iter()
            .filter(|c| matches!(c, RuntimeCall::StartContainer(_)))
            .count();
        assert_eq!((creates, starts), (3, 3));

        let expected = [
            ("peer0", "peer2:7051"),
            ("peer1", "peer1:7051"),
            ("peer2", "peer0:7051"),
        ];
        for (peer, target) in expected {
            let spec = runtime.spec(peer).unwrap();
            assert_eq!(spec.env_value(BOOTSTRAP), Some(target), "{peer}");
        }

        // The middle peer of an odd group pairs with itself.
        let middle = runtime.spec("peer1").unwrap().bootstrap.unwrap();
        assert!(middle.self_paired());
    }

    // =========================================================================
    // Two peers and one orderer
    // =========================================================================

    #[tokio::test]
    async fn test_two_peers_and_orderer() {
        let runtime = Arc::new(InMemoryRuntime::new());
        let report = service(&runtime, LaunchMode::Concurrent)
            .run(&two_peers_one_orderer())
            .await
            .unwrap();

        assert_eq!(runtime.network_create_count(), 1);
        assert_eq!(report.network_id, format!("net-{NETWORK}"));

        assert_eq!(
            runtime.spec("peer0").unwrap().env_value(BOOTSTRAP),
            Some("peer1:7051")
        );
        assert_eq!(
            runtime.spec("peer1").unwrap().env_value(BOOTSTRAP),
            Some("peer0:7051")
        );

        let orderer = runtime.spec("orderer0").unwrap();
        assert_eq!(orderer.kind, NodeKind::Orderer);
        assert_eq!(orderer.ports, vec![PortBinding::tcp_all_interfaces(7050, 7050)]);
        assert_eq!(orderer.network, NETWORK);
    }

    #[tokio::test]
    async fn test_peer_msp_id_from_org_name() {
        let runtime = Arc::new(InMemoryRuntime::new());
        service(&runtime, LaunchMode::Sequential)
            .run(&two_orgs())
            .await
            .unwrap();

        for (peer, msp) in [
            ("peer0.org1.example.com", "Org1MSP"),
            ("peer1.org2.example.com", "Org2MSP"),
        ] {
            let spec = runtime.spec(peer).unwrap();
            assert_eq!(spec.env_count("CORE_PEER_LOCALMSPID"), 1);
            assert_eq!(spec.env_value("CORE_PEER_LOCALMSPID"), Some(msp));
        }
    }

    #[tokio::test]
    async fn test_every_bind_uses_one_project_root() {
        let runtime = Arc::new(InMemoryRuntime::new());
        service(&runtime, LaunchMode::Concurrent)
            .run(&two_orgs())
            .await
            .unwrap();

        let created = runtime.created();
        assert_eq!(created.len(), 6);
        for name in created {
            let spec = runtime.spec(&name).unwrap();
            // Only the engine socket bind lives outside the project.
            let binds: Vec<_> = spec
                .volumes
                .iter()
                .filter(|v| v.container != "/host/var/run/")
                .collect();
            assert!(!binds.is_empty(), "{name}");
            for volume in binds {
                assert!(volume.host.starts_with("/srv/fabnet"), "{name}: {volume}");
            }
        }
    }

    #[tokio::test]
    async fn test_path_escaping_names_never_reach_the_engine() {
        use fn_02_bring_up::BringUpError;
        use shared_types::{Organization, Topology, TopologyError};

        let topologies = [
            Topology::new(vec![Organization::new("org1").with_peer("/etc").with_peer("peer1")]),
            Topology::new(vec![Organization::new("org1").with_peer("../../root")]),
            Topology::new(vec![Organization::new("org1").with_orderer("../orderer0", "7050")]),
        ];
        for topology in topologies {
            let runtime = Arc::new(InMemoryRuntime::new());
            let err = service(&runtime, LaunchMode::Sequential)
                .run(&topology)
                .await
                .unwrap_err();
            assert!(
                matches!(err, BringUpError::Topology(TopologyError::InvalidName { .. })),
                "{err}"
            );
            assert!(runtime.calls().is_empty());
        }
    }

    // =========================================================================
    // Final listing
    // =========================================================================

    #[tokio::test]
    async fn test_listing_after_three_nodes() {
        let runtime = Arc::new(InMemoryRuntime::new());
        let report = service(&runtime, LaunchMode::Sequential)
            .run(&two_peers_one_orderer())
            .await
            .unwrap();

        assert_eq!(report.status.len(), 3);
        assert_eq!(report.status.names(), vec!["peer0", "peer1", "orderer0"]);

        let rendered = report.status.to_string();
        assert_eq!(rendered.lines().count(), 4);
        assert!(rendered.contains("container ID: ctr-3 with container Name: orderer0"));
    }

    // =========================================================================
    // Any peer count
    // =========================================================================

    mod properties {
        use super::*;
        use proptest::prelude::*;
        use shared_types::{Organization, Topology};

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn prop_every_peer_started_with_mirrored_bootstrap(n in 1usize..10) {
                let org = (0..n).fold(Organization::new("org1"), |org, i| org.with_peer(format!("peer{i}")));
                let topology = Topology::new(vec![org]);
                let runtime = Arc::new(InMemoryRuntime::new());

                let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
                let report = rt
                    .block_on(service(&runtime, LaunchMode::Concurrent).run(&topology))
                    .unwrap();

                prop_assert_eq!(report.started.len(), n);
                for i in 0..n {
                    let spec = runtime.spec(&format!("peer{i}")).unwrap();
                    let expected = format!("peer{}:7051", n - 1 - i);
                    prop_assert_eq!(spec.env_value(BOOTSTRAP), Some(expected.as_str()));
                }
            }
        }
    }
}
