//! Domain layer for the node spec builder.
//!
//! - bootstrap: mirrored gossip bootstrap pairing
//! - layout: project root and on-disk crypto/artifact layout
//! - spec: the structured container specification

mod bootstrap;
mod errors;
mod layout;
mod spec;

pub use bootstrap::*;
pub use errors::*;
pub use layout::*;
pub use spec::*;
