//! # Bring-Up Orchestrator
//!
//! Drives one bring-up run:
//!
//! 1. Validate the topology and derive every node spec (no engine calls yet)
//! 2. Create the shared network, reusing it if the name is already taken
//! 3. Launch node groups, sequentially or one task per group
//! 4. List what is running
//!
//! Within a group, nodes are created and started strictly in order. Across
//! groups there is no ordering guarantee in concurrent mode.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use fn_01_node_spec::{NodeSpecBuilder, ProjectPath};
use shared_types::Topology;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, info_span, warn, Instrument};

use super::group::{run_group, GroupOutcome, GroupResult};
use super::status::StatusReporter;
use crate::domain::{
    BringUpConfig, BringUpContext, BringUpError, BringUpPlan, BringUpReport, BringUpResult,
    LaunchMode, NodeGroup, RuntimeError, RuntimeOp, StartedNode, StatusReport,
};
use crate::metrics;
use crate::ports::{NetworkBringUpApi, RuntimeClient};

/// Validate `topology` and derive every node spec under `config`.
///
/// Odd peer counts and self-paired peers are logged as warnings. Never
/// touches the engine.
pub fn plan_bring_up(topology: &Topology, config: &BringUpConfig) -> BringUpResult<BringUpPlan> {
    topology.validate()?;
    for org in topology.odd_peer_organizations() {
        warn!(
            org = %org.name,
            peers = org.peers.len(),
            "Odd peer count, middle peer will bootstrap to itself"
        );
    }

    let project = ProjectPath::resolve(&config.project_dir)?;
    let builder = NodeSpecBuilder::new(project, config.layout.clone(), config.network_name.clone());
    let plan = BringUpPlan::build(topology, &builder)?;

    for spec in plan.self_paired_peers() {
        warn!(node = %spec.name, org = %spec.organization, "Peer gossip bootstrap points at itself");
    }
    Ok(plan)
}

/// Orchestrates network and container bring-up against a `RuntimeClient`.
pub struct BringUpService<R: ?Sized> {
    ctx: BringUpContext<R>,
}

impl<R> BringUpService<R>
where
    R: RuntimeClient + ?Sized + 'static,
{
    pub fn new(ctx: BringUpContext<R>) -> Self {
        Self { ctx }
    }

    pub fn config(&self) -> &BringUpConfig {
        &self.ctx.config
    }

    /// Status reporter sharing this service's engine handle.
    pub fn reporter(&self) -> StatusReporter<R> {
        StatusReporter::new(Arc::clone(&self.ctx.runtime))
    }

    /// Validate `topology` and derive every node spec.
    ///
    /// Never touches the engine.
    pub fn plan(&self, topology: &Topology) -> BringUpResult<BringUpPlan> {
        plan_bring_up(topology, &self.ctx.config)
    }

    /// Run a full bring-up.
    ///
    /// Containers created before a failure are left in place.
    pub async fn run(&self, topology: &Topology) -> BringUpResult<BringUpReport> {
        let plan = self.plan(topology)?;
        info!(
            network = %plan.network,
            groups = plan.groups.len(),
            nodes = plan.node_count(),
            mode = ?self.ctx.config.mode,
            "Starting network bring-up"
        );

        let network = plan.network.clone();
        let (network_id, network_reused) = self.ensure_network(&network).await?;
        let started = self.launch(plan.groups).await?;

        let status = self
            .reporter()
            .report()
            .await
            .map_err(|source| BringUpError::Report { source })?;

        info!(network = %network, started = started.len(), running = status.len(), "Network bring-up complete");
        Ok(BringUpReport {
            network,
            network_id,
            network_reused,
            started,
            status,
        })
    }

    /// Create the shared network. An existing network of the same name is
    /// reused; its id is reported as the name.
    async fn ensure_network(&self, name: &str) -> BringUpResult<(String, bool)> {
        let op = RuntimeOp::CreateNetwork.as_str();
        let timer = Instant::now();
        let created = self.ctx.runtime.create_network(name).await;
        metrics::record_runtime_call_latency(op, timer.elapsed().as_secs_f64());

        match created {
            Ok(id) => {
                info!(network = %name, network_id = %id, "Network created");
                Ok((id, false))
            }
            Err(RuntimeError::Conflict(message)) => {
                warn!(network = %name, %message, "Network already exists, reusing it");
                Ok((name.to_string(), true))
            }
            Err(source) => {
                metrics::record_provision_failure(op);
                error!(network = %name, error = %source, "Network create failed");
                Err(BringUpError::NetworkCreate {
                    network: name.to_string(),
                    source,
                })
            }
        }
    }

    /// Launch every group and wait for all of them.
    async fn launch(&self, groups: Vec<NodeGroup>) -> BringUpResult<Vec<StartedNode>> {
        let cancel = CancellationToken::new();
        let outcomes = match self.ctx.config.mode {
            LaunchMode::Sequential => self.launch_sequential(groups, &cancel).await,
            LaunchMode::Concurrent => self.launch_concurrent(groups, &cancel).await?,
        };
        collect_outcomes(outcomes)
    }

    async fn launch_sequential(
        &self,
        groups: Vec<NodeGroup>,
        cancel: &CancellationToken,
    ) -> Vec<(usize, GroupOutcome)> {
        let mut outcomes = Vec::with_capacity(groups.len());
        for (index, group) in groups.into_iter().enumerate() {
            let span = info_span!("node_group", group = %group.label);
            let outcome = run_group(Arc::clone(&self.ctx.runtime), group, cancel.clone())
                .instrument(span)
                .await;
            outcomes.push((index, outcome));
        }
        outcomes
    }

    /// One task per group. Outcomes are returned in completion order.
    async fn launch_concurrent(
        &self,
        groups: Vec<NodeGroup>,
        cancel: &CancellationToken,
    ) -> BringUpResult<Vec<(usize, GroupOutcome)>> {
        let labels: Vec<String> = groups.iter().map(|group| group.label.clone()).collect();
        let mut tasks = JoinSet::new();

        for (index, group) in groups.into_iter().enumerate() {
            let span = info_span!("node_group", group = %group.label);
            let runtime = Arc::clone(&self.ctx.runtime);
            let cancel = cancel.clone();
            tasks.spawn(
                async move { (index, run_group(runtime, group, cancel).await) }.instrument(span),
            );
        }

        let mut outcomes = Vec::with_capacity(labels.len());
        let mut join_failure = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => {
                    error!(error = %err, "Node group task did not complete");
                    cancel.cancel();
                    join_failure.get_or_insert(err.to_string());
                }
            }
        }

        if let Some(reason) = join_failure {
            let finished: HashSet<usize> = outcomes.iter().map(|(index, _)| *index).collect();
            let group = labels
                .into_iter()
                .enumerate()
                .find(|(index, _)| !finished.contains(index))
                .map(|(_, label)| label)
                .unwrap_or_default();
            return Err(BringUpError::GroupAborted { group, reason });
        }
        Ok(outcomes)
    }
}

/// Fold group outcomes into started nodes (plan order) or the failures
/// (completion order).
fn collect_outcomes(mut outcomes: Vec<(usize, GroupOutcome)>) -> BringUpResult<Vec<StartedNode>> {
    let mut failures = Vec::new();
    for (_, outcome) in &mut outcomes {
        match std::mem::replace(&mut outcome.result, GroupResult::Completed) {
            GroupResult::Failed(err) => failures.push(err),
            GroupResult::Cancelled { skipped } => {
                info!(group = %outcome.label, skipped, "Node group stopped early");
            }
            GroupResult::Completed => {}
        }
    }

    if !failures.is_empty() {
        return Err(BringUpError::Provisioning { failures });
    }

    outcomes.sort_by_key(|(index, _)| *index);
    Ok(outcomes
        .into_iter()
        .flat_map(|(_, outcome)| outcome.started)
        .collect())
}

#[async_trait]
impl<R> NetworkBringUpApi for BringUpService<R>
where
    R: RuntimeClient + ?Sized + 'static,
{
    async fn bring_up(&self, topology: &Topology) -> BringUpResult<BringUpReport> {
        self.run(topology).await
    }

    async fn status(&self) -> BringUpResult<StatusReport> {
        self.reporter()
            .report()
            .await
            .map_err(|source| BringUpError::Report { source })
    }
}
