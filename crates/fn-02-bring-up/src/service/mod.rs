//! Service layer: the bring-up orchestrator and the status reporter.

mod group;
mod orchestrator;
mod status;


pub use orchestrator::{plan_bring_up, BringUpService};
pub use status::StatusReporter;
