//! Prometheus text exposition of the default registry.
//!
//! Bring-up metrics are registered by the orchestrator crate (feature
//! `metrics`); this module only encodes and writes them.

use std::path::Path;

use prometheus::{Encoder, TextEncoder};

use crate::TelemetryError;

/// Encode every registered metric as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsEncode(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsEncode(e.to_string()))
}

/// Write `encode_metrics()` to `path`, replacing it.
pub fn write_metrics(path: &Path) -> Result<(), TelemetryError> {
    let text = encode_metrics()?;
    std::fs::write(path, text).map_err(|source| TelemetryError::MetricsWrite {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::{register_int_counter, IntCounter};

    #[test]
    fn test_encode_includes_registered_counter() {
        let counter: IntCounter =
            register_int_counter!("fabnet_telemetry_test_total", "Test counter").unwrap();
        counter.inc();

        let text = encode_metrics().unwrap();
        assert!(text.contains("fabnet_telemetry_test_total 1"));
    }

    #[test]
    fn test_write_metrics_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.prom");
        write_metrics(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_metrics_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("metrics.prom");
        assert!(matches!(
            write_metrics(&path),
            Err(TelemetryError::MetricsWrite { .. })
        ));
    }
}
