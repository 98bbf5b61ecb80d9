//! Adapters layer: concrete container engines.

#[cfg(feature = "docker")]
mod docker;

#[cfg(feature = "docker")]
pub use docker::DockerRuntime;
