//! Status reporter: what the engine has running after bring-up.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::domain::{RuntimeError, RuntimeOp, StatusReport};
use crate::metrics;
use crate::ports::RuntimeClient;

/// Lists running containers, preserving the engine's order.
pub struct StatusReporter<R: ?Sized> {
    runtime: Arc<R>,
}

impl<R: RuntimeClient + ?Sized> StatusReporter<R> {
    pub fn new(runtime: Arc<R>) -> Self {
        Self { runtime }
    }

    /// Query the engine and log one line per running container.
    pub async fn report(&self) -> Result<StatusReport, RuntimeError> {
        let op = RuntimeOp::ListContainers.as_str();
        let timer = Instant::now();
        let listed = self.runtime.list_containers().await;
        metrics::record_runtime_call_latency(op, timer.elapsed().as_secs_f64());

        let containers = listed.inspect_err(|_| metrics::record_provision_failure(op))?;

        info!(count = containers.len(), "List of containers that are running");
        for container in &containers {
            info!(
                container_id = %container.id,
                name = %container.display_name(),
                "Running container"
            );
        }

        Ok(StatusReport { containers })
    }
}
