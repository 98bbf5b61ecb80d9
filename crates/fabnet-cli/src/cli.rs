//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fn_01_node_spec::FilesystemLayout;
use fn_02_bring_up::{BringUpConfig, LaunchMode, DEFAULT_NETWORK_NAME};

/// Default topology file, relative to the project root.
pub const DEFAULT_TOPOLOGY: &str = "pkg/config/config.yaml";

/// Default cryptogen input, relative to the project root.
pub const DEFAULT_CRYPTO_CONFIG: &str = "pkg/config/crypto-config.yaml";

/// fabnet: bring a Hyperledger Fabric topology up on Docker
#[derive(Parser, Debug)]
#[command(name = "fabnet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log filter, overrides FABNET_LOG_LEVEL and RUST_LOG
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate artifacts, create the network and start every node
    Up(UpArgs),
    /// Load and validate a topology, print the plan, touch nothing
    Validate(ValidateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct UpArgs {
    /// Topology file (YAML)
    #[arg(long, env = "FABNET_TOPOLOGY", default_value = DEFAULT_TOPOLOGY)]
    pub topology: PathBuf,

    /// Project root that host bind paths are resolved against
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Shared network name
    #[arg(long, env = "FABNET_NETWORK", default_value = DEFAULT_NETWORK_NAME)]
    pub network: String,

    /// cryptogen configuration file
    #[arg(long, default_value = DEFAULT_CRYPTO_CONFIG)]
    pub crypto_config: PathBuf,

    /// Start node groups one after another instead of concurrently
    #[arg(long)]
    pub sequential: bool,

    /// Do not run cryptogen/configtxgen; use existing material
    #[arg(long)]
    pub skip_artifacts: bool,

    /// Write Prometheus metrics to this file when done
    #[arg(long)]
    pub metrics_out: Option<PathBuf>,
}

impl UpArgs {
    pub fn launch_mode(&self) -> LaunchMode {
        if self.sequential {
            LaunchMode::Sequential
        } else {
            LaunchMode::Concurrent
        }
    }

    pub fn bring_up_config(&self) -> BringUpConfig {
        BringUpConfig {
            network_name: self.network.clone(),
            project_dir: self.project_dir.clone(),
            layout: FilesystemLayout::default(),
            mode: self.launch_mode(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Topology file (YAML)
    #[arg(long, env = "FABNET_TOPOLOGY", default_value = DEFAULT_TOPOLOGY)]
    pub topology: PathBuf,

    /// Project root that host bind paths are resolved against
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Shared network name
    #[arg(long, env = "FABNET_NETWORK", default_value = DEFAULT_NETWORK_NAME)]
    pub network: String,
}
