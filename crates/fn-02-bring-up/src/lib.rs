//! # Network Bring-Up
//!
//! Creates the shared network and every node container of a topology,
//! then reports what the engine has running.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** errors, launch configuration, the bring-up plan and
//!   reports
//! - **Ports Layer:** `RuntimeClient` (driven, the container engine) and
//!   `NetworkBringUpApi` (driving)
//! - **Service Layer:** `BringUpService` (orchestrator) and `StatusReporter`
//! - **Adapters Layer:** `DockerRuntime` (feature `docker`)
//!
//! ## Flow
//!
//! ```text
//! validate topology ─→ derive every NodeSpec ─→ create network
//!                                                    │
//!              ┌──────────────────┬──────────────────┤
//!              ↓                  ↓                  ↓
//!        peers/org1          peers/org2          orderers      (one task each)
//!     create→start ...    create→start ...    create→start ...
//!              └──────────────────┴──────────────────┘
//!                                 │ join
//!                                 ↓
//!                         list running containers
//! ```
//!
//! The first failing group cancels a shared token; sibling groups finish
//! their in-flight call and stop before their next node. Nothing that was
//! already created is removed.

pub mod adapters;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

/// In-memory container engine for tests.
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use domain::{
    BringUpConfig, BringUpContext, BringUpError, BringUpPlan, BringUpReport, BringUpResult,
    ContainerSummary, LaunchMode, NodeGroup, ProvisionError, RuntimeError, RuntimeOp,
    StartedNode, StatusReport, DEFAULT_NETWORK_NAME,
};
pub use ports::{NetworkBringUpApi, RuntimeClient};
pub use service::{plan_bring_up, BringUpService, StatusReporter};

#[cfg(feature = "docker")]
pub use adapters::DockerRuntime;
