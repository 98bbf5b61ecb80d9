//! # fabnet CLI
//!
//! Library half of the `fabnet` binary: argument definitions, artifact
//! generation and the subcommand handlers. Kept separate from `main.rs` so
//! handlers can be exercised against the in-memory engine.

pub mod artifacts;
pub mod cli;
pub mod commands;

pub use artifacts::{ArtifactError, ArtifactPlan, ToolCommand};
pub use cli::{Cli, Command, UpArgs, ValidateArgs};
