//! One node group: create then start each node, strictly in order.

use std::sync::Arc;
use std::time::Instant;

use fn_01_node_spec::{NodeKind, NodeSpec};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::domain::{NodeGroup, ProvisionError, RuntimeOp, StartedNode};
use crate::metrics;
use crate::ports::RuntimeClient;

/// How a group finished.
#[derive(Debug)]
pub(crate) enum GroupResult {
    /// Every node was created and started.
    Completed,
    /// A node failed; later nodes of the group were not attempted.
    Failed(ProvisionError),
    /// Another group failed first; `skipped` nodes were never attempted.
    Cancelled { skipped: usize },
}

#[derive(Debug)]
pub(crate) struct GroupOutcome {
    pub label: String,
    pub started: Vec<StartedNode>,
    pub result: GroupResult,
}

/// Provision every node of `group` in order.
///
/// Stops at the first failure and cancels `cancel` so sibling groups stop
/// before their next node. Checks `cancel` before each node; an in-flight
/// engine call is never interrupted.
pub(crate) async fn run_group<R>(
    runtime: Arc<R>,
    group: NodeGroup,
    cancel: CancellationToken,
) -> GroupOutcome
where
    R: RuntimeClient + ?Sized,
{
    let NodeGroup { label, specs, .. } = group;
    let total = specs.len();
    let mut started = Vec::with_capacity(total);

    for (position, spec) in specs.into_iter().enumerate() {
        if cancel.is_cancelled() {
            let skipped = total - position;
            warn!(group = %label, skipped, "Another node group failed, stopping before next node");
            return GroupOutcome {
                label,
                started,
                result: GroupResult::Cancelled { skipped },
            };
        }

        match provision_node(runtime.as_ref(), &label, &spec).await {
            Ok(container_id) => started.push(StartedNode {
                name: spec.name,
                kind: spec.kind,
                group: label.clone(),
                container_id,
            }),
            Err(err) => {
                error!(group = %label, node = %err.node, op = %err.op, error = %err.source, "Node provisioning failed");
                cancel.cancel();
                return GroupOutcome {
                    label,
                    started,
                    result: GroupResult::Failed(err),
                };
            }
        }
    }

    info!(group = %label, nodes = started.len(), "Node group is up");
    GroupOutcome {
        label,
        started,
        result: GroupResult::Completed,
    }
}

/// Create then start one container. Start is never attempted if create fails.
async fn provision_node<R>(runtime: &R, group: &str, spec: &NodeSpec) -> Result<String, ProvisionError>
where
    R: RuntimeClient + ?Sized,
{
    let failed = |op: RuntimeOp, source| {
        metrics::record_provision_failure(op.as_str());
        ProvisionError {
            node: spec.name.clone(),
            kind: spec.kind,
            group: group.to_string(),
            op,
            source,
        }
    };

    debug!(
        node = %spec.name,
        image = %spec.image,
        env = ?spec.env_strings(),
        binds = ?spec.bind_strings(),
        "Creating container"
    );

    let timer = Instant::now();
    let created = runtime.create_container(spec).await;
    metrics::record_runtime_call_latency(
        RuntimeOp::CreateContainer.as_str(),
        timer.elapsed().as_secs_f64(),
    );
    let container_id = created.map_err(|source| failed(RuntimeOp::CreateContainer, source))?;
    metrics::record_container_created(kind_label(spec.kind));
    info!(node = %spec.name, container_id = %container_id, "Container created");

    let timer = Instant::now();
    let start = runtime.start_container(&container_id).await;
    metrics::record_runtime_call_latency(
        RuntimeOp::StartContainer.as_str(),
        timer.elapsed().as_secs_f64(),
    );
    start.map_err(|source| failed(RuntimeOp::StartContainer, source))?;
    metrics::record_container_started(kind_label(spec.kind));
    info!(node = %spec.name, container_id = %container_id, "Container started");

    Ok(container_id)
}

fn kind_label(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Peer => "peer",
        NodeKind::Orderer => "orderer",
    }
}
