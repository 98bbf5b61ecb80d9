//! # Group Scheduling
//!
//! Nodes within a group are strictly ordered; groups run independently and
//! stop early once a sibling has failed.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use fn_02_bring_up::test_utils::{InMemoryRuntime, RuntimeCall};
    use fn_02_bring_up::{LaunchMode, RuntimeError};

    use crate::fixtures::{service, two_orgs};

    #[tokio::test(start_paused = true)]
    async fn test_slow_group_does_not_block_others() {
        let runtime = Arc::new(
            InMemoryRuntime::new().delay_create("peer0.org1.example.com", Duration::from_secs(5)),
        );
        let report = service(&runtime, LaunchMode::Concurrent)
            .run(&two_orgs())
            .await
            .unwrap();
        assert_eq!(report.started.len(), 6);

        // org2 finishes while org1 is still waiting on its first create.
        let org2_done = runtime
            .position(&RuntimeCall::StartContainer("peer1.org2.example.com".into()))
            .unwrap();
        let org1_first = runtime
            .position(&RuntimeCall::StartContainer("peer0.org1.example.com".into()))
            .unwrap();
        assert!(org2_done < org1_first);

        // Reported in plan order all the same.
        assert_eq!(report.started[0].name, "peer0.org1.example.com");
        assert_eq!(report.started[4].group, "orderers");
    }

    #[tokio::test]
    async fn test_group_order_is_strict() {
        let runtime = Arc::new(InMemoryRuntime::new());
        service(&runtime, LaunchMode::Concurrent)
            .run(&two_orgs())
            .await
            .unwrap();

        let order = |call: RuntimeCall| runtime.position(&call).unwrap();
        assert!(
            order(RuntimeCall::StartContainer("orderer0.example.com".into()))
                < order(RuntimeCall::CreateContainer("orderer1.example.com".into()))
        );
        assert!(
            order(RuntimeCall::StartContainer("peer0.org2.example.com".into()))
                < order(RuntimeCall::CreateContainer("peer1.org2.example.com".into()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_stops_slow_sibling_before_its_next_node() {
        let runtime = Arc::new(
            InMemoryRuntime::new()
                .delay_create("peer0.org1.example.com", Duration::from_secs(2))
                .fail_create(
                    "peer0.org2.example.com",
                    RuntimeError::Engine {
                        status: 500,
                        message: "image not found".into(),
                    },
                ),
        );
        let err = service(&runtime, LaunchMode::Concurrent)
            .run(&two_orgs())
            .await
            .unwrap_err();

        assert_eq!(err.provision_failures().len(), 1);
        assert_eq!(err.provision_failures()[0].node, "peer0.org2.example.com");

        // Whatever org1 had in flight was not interrupted, but its next peer
        // and the rest of the orderer group were never attempted.
        assert!(runtime
            .position(&RuntimeCall::CreateContainer("peer1.org1.example.com".into()))
            .is_none());
        assert!(runtime
            .position(&RuntimeCall::CreateContainer("orderer1.example.com".into()))
            .is_none());
        assert!(!runtime
            .calls()
            .contains(&RuntimeCall::ListContainers));
    }
}
