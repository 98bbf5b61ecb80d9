//! Crypto material and channel artifact generation.
//!
//! Runs the Fabric `cryptogen` and `configtxgen` tools before bring-up so the
//! bind-mounted MSP, TLS and genesis paths exist when containers start.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use fn_01_node_spec::{FilesystemLayout, ProjectPath};
use shared_types::Topology;
use thiserror::Error;
use tokio::process::Command;
use tracing::{error, info};

/// System channel the genesis block is generated for.
pub const SYSTEM_CHANNEL: &str = "sys-channel";

/// configtx.yaml profile used for the application channel.
pub const CHANNEL_PROFILE: &str = "TwoOrgsChannel";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to launch {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {}: {output}", describe_status(*.status))]
    ToolFailed {
        tool: String,
        status: Option<i32>,
        output: String,
    },

    #[error("failed to create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn describe_status(status: Option<i32>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// configtx.yaml orderer genesis profile for a consensus type.
///
/// Unknown types are taken as a profile name verbatim.
pub fn genesis_profile(consensus_type: &str) -> &str {
    match consensus_type {
        "solo" => "TwoOrgsOrdererGenesis",
        "etcdraft" => "SampleMultiNodeEtcdRaft",
        "kafka" => "SampleDevModeKafka",
        other => other,
    }
}

/// One external tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// Short tool name for logs and errors
    pub tool: String,
    pub program: PathBuf,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
}

impl ToolCommand {
    fn new(tool: &str, tool_dir: Option<&Path>) -> Self {
        let program = match tool_dir {
            Some(dir) => dir.join(tool),
            None => PathBuf::from(tool),
        };
        Self {
            tool: tool.to_string(),
            program,
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    fn path_arg(self, path: &Path) -> Self {
        let arg = path.display().to_string();
        self.arg(arg)
    }

    fn env(mut self, key: &str, value: &Path) -> Self {
        self.envs.push((key.to_string(), value.display().to_string()));
        self
    }

    /// Run to completion, capturing stdout and stderr together.
    pub async fn run(&self) -> Result<(), ArtifactError> {
        info!(tool = %self.tool, args = ?self.args, "Running artifact tool");
        let output = Command::new(&self.program)
            .args(&self.args)
            .envs(self.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ArtifactError::Spawn {
                tool: self.tool.clone(),
                source,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            error!(tool = %self.tool, status = ?output.status.code(), output = %combined, "Artifact tool failed");
            return Err(ArtifactError::ToolFailed {
                tool: self.tool.clone(),
                status: output.status.code(),
                output: combined.trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Every tool invocation needed before bring-up, in order.
#[derive(Debug, Clone)]
pub struct ArtifactPlan {
    pub artifacts_dir: PathBuf,
    pub commands: Vec<ToolCommand>,
}

impl ArtifactPlan {
    pub fn new(
        topology: &Topology,
        project: &ProjectPath,
        layout: &FilesystemLayout,
        crypto_config: &Path,
    ) -> Self {
        let tool_dir = topology.hf_tool_path.as_deref();
        let cfg_path = project.as_path().join(&layout.config_dir);
        let artifacts_dir = layout.artifacts_dir(project);
        let crypto_config = project.as_path().join(crypto_config);

        let mut commands = vec![
            ToolCommand::new("cryptogen", tool_dir)
                .arg("generate")
                .arg(format!("--config={}", crypto_config.display()))
                .arg(format!("--output={}", layout.crypto_root(project).display())),
            ToolCommand::new("configtxgen", tool_dir)
                .env("FABRIC_CFG_PATH", &cfg_path)
                .arg("-profile")
                .arg(genesis_profile(&topology.consensus_type))
                .arg("-channelID")
                .arg(SYSTEM_CHANNEL)
                .arg("-outputBlock")
                .path_arg(&layout.genesis_block(project)),
            ToolCommand::new("configtxgen", tool_dir)
                .env("FABRIC_CFG_PATH", &cfg_path)
                .arg("-profile")
                .arg(CHANNEL_PROFILE)
                .arg("-outputCreateChannelTx")
                .path_arg(&artifacts_dir.join("channel.tx"))
                .arg("-channelID")
                .arg(&topology.channel_name),
        ];

        for org in topology.orgs.iter().filter(|org| !org.peers.is_empty()) {
            let msp_id = org.msp_id();
            commands.push(
                ToolCommand::new("configtxgen", tool_dir)
                    .env("FABRIC_CFG_PATH", &cfg_path)
                    .arg("-profile")
                    .arg(CHANNEL_PROFILE)
                    .arg("-outputAnchorPeersUpdate")
                    .path_arg(&artifacts_dir.join(format!("{msp_id}anchors.tx")))
                    .arg("-channelID")
                    .arg(&topology.channel_name)
                    .arg("-asOrg")
                    .arg(msp_id),
            );
        }

        Self {
            artifacts_dir,
            commands,
        }
    }

    /// Run every command in order, stopping at the first failure.
    pub async fn generate(&self) -> Result<(), ArtifactError> {
        tokio::fs::create_dir_all(&self.artifacts_dir)
            .await
            .map_err(|source| ArtifactError::CreateDir {
                path: self.artifacts_dir.clone(),
                source,
            })?;

        for command in &self.commands {
            command.run().await?;
        }
        info!(dir = %self.artifacts_dir.display(), "Artifacts generated");
        Ok(())
    }
}
