//! Service layer: pure derivation of node specs.

mod builder;

pub use builder::*;
