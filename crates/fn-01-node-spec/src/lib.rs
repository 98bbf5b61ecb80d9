//! # Node Spec Builder
//!
//! Turns one topology entry into the container specification the bring-up
//! orchestrator hands to the container engine.
//!
//! ## Architecture
//!
//! - **Domain Layer:** structured `NodeSpec` values (environment, volume and
//!   port bindings), filesystem layout, gossip bootstrap pairing.
//! - **Service Layer:** `NodeSpecBuilder`, the pure derivation for peers and
//!   orderers.
//!
//! Environment and bindings stay structured until the engine boundary, where
//! `NodeSpec::env_strings` / `NodeSpec::bind_strings` render the
//! `KEY=VALUE` and `host:container[:ro]` forms the engine expects.
//!
//! ## Example
//!
//! ```rust
//! use fn_01_node_spec::{FilesystemLayout, NodeSpecBuilder, ProjectPath};
//! use shared_types::Organization;
//!
//! let org = Organization::new("org1")
//!     .with_peer("peer0.org1.example.com")
//!     .with_peer("peer1.org1.example.com");
//! let project = ProjectPath::resolve("/srv/fabnet").unwrap();
//! let builder = NodeSpecBuilder::new(project, FilesystemLayout::default(), "fabnet");
//!
//! let spec = builder.peer(&org.name, &org.peers, 0).unwrap();
//! assert_eq!(
//!     spec.env_value("CORE_PEER_GOSSIP_BOOTSTRAP"),
//!     Some("peer1.org1.example.com:7051")
//! );
//! ```

pub mod domain;
pub mod service;

pub use domain::{
    bootstrap_partner, BindMode, BootstrapPairing, EnvVar, FilesystemLayout, NodeKind, NodeSpec,
    PortBinding, ProjectPath, Protocol, SpecError, SpecResult, VolumeBinding,
};
pub use service::{
    NodeSpecBuilder, CHAINCODE_PORT, GOSSIP_PORT, ORDERER_IMAGE, ORDERER_LISTEN_PORT,
    ORDERER_WORKING_DIR, PEER_IMAGE, PEER_WORKING_DIR,
};
