//! Bring-up configuration and the context passed into the orchestrator.

use std::path::PathBuf;
use std::sync::Arc;

use fn_01_node_spec::FilesystemLayout;
use serde::{Deserialize, Serialize};

/// Network name used when none is configured.
pub const DEFAULT_NETWORK_NAME: &str = "fabnet";

/// How node groups are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LaunchMode {
    /// One group after another on the calling task.
    Sequential,
    /// One task per group, joined before reporting.
    #[default]
    Concurrent,
}

/// Orchestrator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BringUpConfig {
    /// Shared network every node joins.
    pub network_name: String,
    /// Project root; resolved to an absolute path once per run.
    pub project_dir: PathBuf,
    /// Location of generated crypto material and channel artifacts.
    pub layout: FilesystemLayout,
    pub mode: LaunchMode,
}

impl Default for BringUpConfig {
    fn default() -> Self {
        Self {
            network_name: DEFAULT_NETWORK_NAME.to_string(),
            project_dir: PathBuf::from("."),
            layout: FilesystemLayout::default(),
            mode: LaunchMode::default(),
        }
    }
}

/// Everything the orchestrator needs, passed in explicitly.
pub struct BringUpContext<R: ?Sized> {
    /// Engine handle shared by every node group task.
    pub runtime: Arc<R>,
    pub config: BringUpConfig,
}

impl<R: ?Sized> BringUpContext<R> {
    pub fn new(runtime: Arc<R>, config: BringUpConfig) -> Self {
        Self { runtime, config }
    }
}

impl<R: ?Sized> Clone for BringUpContext<R> {
    fn clone(&self) -> Self {
        Self {
            runtime: Arc::clone(&self.runtime),
            config: self.config.clone(),
        }
    }
}
