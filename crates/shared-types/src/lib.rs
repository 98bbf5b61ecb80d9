//! # Shared Types Crate
//!
//! The topology model consumed by the node spec builder and the bring-up
//! orchestrator.
//!
//! ## Design Principles
//!
//! - **Read-only**: a `Topology` is never mutated once loaded; every
//!   subsystem borrows it for the whole bring-up run.
//! - **Names are addresses**: peer and orderer names double as container
//!   names and DNS hostnames on the shared network, so they must be unique
//!   across the whole topology (see [`Topology::validate`]).
//! - **Ordered**: organization, peer and orderer order is preserved from the
//!   source file because gossip bootstrap pairing depends on peer order.

pub mod entities;
pub mod errors;
pub mod validation;

pub use entities::*;
pub use errors::*;
