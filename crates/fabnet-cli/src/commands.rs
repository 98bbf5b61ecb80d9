//! Subcommand handlers.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use fabnet_telemetry::{log_node_event, write_metrics};
use fn_01_node_spec::ProjectPath;
use fn_02_bring_up::{
    plan_bring_up, BringUpConfig, BringUpContext, BringUpReport, BringUpService, DockerRuntime,
    RuntimeClient,
};
use shared_types::Topology;
use tracing::{info, warn};

use crate::artifacts::ArtifactPlan;
use crate::cli::{Command, UpArgs, ValidateArgs};

/// Dispatch a parsed subcommand.
pub async fn run(command: Command) -> Result<()> {
    match command {
        Command::Up(args) => up(&args).await,
        Command::Validate(args) => validate(&args),
    }
}

/// `fabnet up`: artifacts, network, nodes, status listing.
///
/// The topology is validated before any artifact tool runs.
pub async fn up(args: &UpArgs) -> Result<()> {
    let topology = load_topology(&args.topology)?;
    topology.validate().context("Topology is invalid")?;
    let config = args.bring_up_config();

    if args.skip_artifacts {
        info!("Skipping artifact generation");
    } else {
        let project = ProjectPath::resolve(&config.project_dir)
            .context("Failed to resolve project directory")?;
        ArtifactPlan::new(&topology, &project, &config.layout, &args.crypto_config)
            .generate()
            .await
            .context("Artifact generation failed")?;
    }

    let runtime = DockerRuntime::connect()
        .await
        .context("Failed to connect to the Docker engine")?;

    let result = bring_up(Arc::new(runtime), config, &topology).await;

    if let Some(path) = &args.metrics_out {
        match write_metrics(path) {
            Ok(()) => info!(path = %path.display(), "Metrics written"),
            Err(err) => warn!(error = %err, "Could not write metrics"),
        }
    }

    let report = result?;
    print!("{}", report.status);
    Ok(())
}

/// Run the orchestrator against any engine.
pub async fn bring_up<R>(
    runtime: Arc<R>,
    config: BringUpConfig,
    topology: &Topology,
) -> Result<BringUpReport>
where
    R: RuntimeClient + 'static,
{
    let service = BringUpService::new(BringUpContext::new(runtime, config));
    let report = service
        .run(topology)
        .await
        .context("Network bring-up failed")?;

    for node in &report.started {
        log_node_event!(info, node.name, node.kind, "Node running", container_id = %node.container_id);
    }
    Ok(report)
}

/// `fabnet validate`: load, validate and print the plan.
pub fn validate(args: &ValidateArgs) -> Result<()> {
    let topology = load_topology(&args.topology)?;
    topology.validate().context("Topology is invalid")?;

    let config = BringUpConfig {
        network_name: args.network.clone(),
        project_dir: args.project_dir.clone(),
        ..BringUpConfig::default()
    };
    let plan = plan_bring_up(&topology, &config).context("Node spec derivation failed")?;

    print!("{plan}");
    Ok(())
}

fn load_topology(path: &Path) -> Result<Topology> {
    let topology = Topology::load(path)
        .with_context(|| format!("Failed to load topology from {}", path.display()))?;
    info!(
        path = %path.display(),
        orgs = topology.orgs.len(),
        peers = topology.peer_count(),
        orderers = topology.orderer_count(),
        "Topology loaded"
    );
    Ok(topology)
}
