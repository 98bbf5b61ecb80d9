//! Domain layer for network bring-up.

mod config;
mod errors;
mod plan;
mod report;

pub use config::*;
pub use errors::*;
pub use plan::*;
pub use report::*;
