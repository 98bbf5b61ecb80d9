//! # Failure Propagation
//!
//! Every engine failure surfaces with its operation and node attached, and
//! nothing after a failed node in its group is attempted.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fn_02_bring_up::test_utils::{InMemoryRuntime, RuntimeCall};
    use fn_02_bring_up::{BringUpError, LaunchMode, RuntimeError, RuntimeOp};

    use crate::fixtures::{service, three_peers, two_peers_one_orderer};

    fn engine_error(message: &str) -> RuntimeError {
        RuntimeError::Engine {
            status: 500,
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn test_second_peer_create_failure() {
        let runtime =
            Arc::new(InMemoryRuntime::new().fail_create("peer1", engine_error("no space left")));
        let err = service(&runtime, LaunchMode::Concurrent)
            .run(&three_peers())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("peer1"));
        let failure = &err.provision_failures()[0];
        assert_eq!(failure.node, "peer1");
        assert_eq!(failure.op, RuntimeOp::CreateContainer);

        let calls = runtime.calls();
        assert!(!calls.contains(&RuntimeCall::StartContainer("peer1".into())));
        assert!(!calls.contains(&RuntimeCall::CreateContainer("peer2".into())));
        // The first peer was already up and stays up.
        assert_eq!(runtime.running(), vec!["peer0"]);
    }

    #[tokio::test]
    async fn test_network_created_once_before_any_node() {
        let runtime = Arc::new(InMemoryRuntime::new());
        service(&runtime, LaunchMode::Concurrent)
            .run(&two_peers_one_orderer())
            .await
            .unwrap();

        let calls = runtime.calls();
        assert_eq!(runtime.network_create_count(), 1);
        assert!(matches!(calls[0], RuntimeCall::CreateNetwork(_)));
    }

    #[tokio::test]
    async fn test_unreachable_engine_aborts_before_nodes() {
        let runtime = Arc::new(
            InMemoryRuntime::new()
                .fail_network(RuntimeError::Unreachable("connection refused".into())),
        );
        let err = service(&runtime, LaunchMode::Concurrent)
            .run(&two_peers_one_orderer())
            .await
            .unwrap_err();

        assert!(matches!(err, BringUpError::NetworkCreate { .. }));
        assert!(runtime.created().is_empty());
    }

    #[tokio::test]
    async fn test_orderer_start_failure_names_orderer() {
        let runtime = Arc::new(
            InMemoryRuntime::new().fail_start("orderer0", engine_error("port is already allocated")),
        );
        let err = service(&runtime, LaunchMode::Sequential)
            .run(&two_peers_one_orderer())
            .await
            .unwrap_err();

        let failure = &err.provision_failures()[0];
        assert_eq!(failure.node, "orderer0");
        assert_eq!(failure.group, "orderers");
        assert_eq!(failure.op, RuntimeOp::StartContainer);
        assert!(err.to_string().contains("port is already allocated"));
    }

    #[tokio::test]
    async fn test_listing_failure_after_full_bring_up() {
        let runtime =
            Arc::new(InMemoryRuntime::new().fail_list(RuntimeError::Other("eof".into())));
        let err = service(&runtime, LaunchMode::Concurrent)
            .run(&two_peers_one_orderer())
            .await
            .unwrap_err();

        assert!(matches!(err, BringUpError::Report { .. }));
        // Every node started; only the report failed.
        assert_eq!(runtime.running().len(), 3);
    }

    #[tokio::test]
    async fn test_rerun_reuses_network_and_hits_name_conflict() {
        let runtime = Arc::new(InMemoryRuntime::new());
        let service = service(&runtime, LaunchMode::Sequential);
        service.run(&two_peers_one_orderer()).await.unwrap();

        let err = service.run(&two_peers_one_orderer()).await.unwrap_err();
        assert_eq!(runtime.network_create_count(), 2);
        let failure = &err.provision_failures()[0];
        assert_eq!(failure.node, "peer0");
        assert!(matches!(failure.source, RuntimeError::Conflict(_)));
    }
}
