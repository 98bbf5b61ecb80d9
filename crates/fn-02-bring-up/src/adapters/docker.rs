//! Docker Engine adapter for `RuntimeClient`.

use std::collections::HashMap;

use async_trait::async_trait;
use bollard::{
    errors::Error as DockerError,
    models::{
        ContainerCreateBody, HostConfig, NetworkCreateRequest, PortBinding as DockerPortBinding,
    },
    query_parameters::{
        CreateContainerOptionsBuilder, ListContainersOptions, StartContainerOptions,
    },
    Docker,
};
use fn_01_node_spec::NodeSpec;
use tracing::{debug, info};

use crate::domain::{ContainerSummary, RuntimeError};
use crate::ports::RuntimeClient;

/// Network driver for the shared network.
const NETWORK_DRIVER: &str = "bridge";

/// `RuntimeClient` backed by the local Docker daemon.
///
/// The bollard client is safe for concurrent use, so no extra locking.
#[derive(Debug, Clone)]
pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    /// Connect using `DOCKER_HOST` or the platform default socket, then ping.
    pub async fn connect() -> Result<Self, RuntimeError> {
        let docker = Docker::connect_with_local_defaults()
            .map_err(|e| RuntimeError::Unreachable(e.to_string()))?;
        docker
            .ping()
            .await
            .map_err(|e| RuntimeError::Unreachable(e.to_string()))?;
        info!("Connected to Docker engine");
        Ok(Self { docker })
    }

    pub fn from_client(docker: Docker) -> Self {
        Self { docker }
    }
}

#[async_trait]
impl RuntimeClient for DockerRuntime {
    async fn create_network(&self, name: &str) -> Result<String, RuntimeError> {
        let request = NetworkCreateRequest {
            name: name.to_string(),
            driver: Some(NETWORK_DRIVER.to_string()),
            ..Default::default()
        };
        let created = self
            .docker
            .create_network(request)
            .await
            .map_err(map_docker_error)?;
        Ok(created.id)
    }

    async fn create_container(&self, spec: &NodeSpec) -> Result<String, RuntimeError> {
        let options = Some(CreateContainerOptionsBuilder::default().name(&spec.name).build());
        debug!(node = %spec.name, image = %spec.image, "Sending container create");
        let created = self
            .docker
            .create_container(options, container_body(spec))
            .await
            .map_err(map_docker_error)?;
        Ok(created.id)
    }

    async fn start_container(&self, id: &str) -> Result<(), RuntimeError> {
        self.docker
            .start_container(id, None::<StartContainerOptions>)
            .await
            .map_err(map_docker_error)
    }

    async fn list_containers(&self) -> Result<Vec<ContainerSummary>, RuntimeError> {
        let listed = self
            .docker
            .list_containers(None::<ListContainersOptions>)
            .await
            .map_err(map_docker_error)?;
        Ok(listed
            .into_iter()
            .map(|summary| {
                ContainerSummary::new(summary.id.unwrap_or_default(), summary.names.unwrap_or_default())
            })
            .collect())
    }
}

/// Translate a node spec into the engine's create request.
fn container_body(spec: &NodeSpec) -> ContainerCreateBody {
    let port_bindings: HashMap<String, Option<Vec<DockerPortBinding>>> = spec
        .ports
        .iter()
        .map(|port| {
            (
                port.container_key(),
                Some(vec![DockerPortBinding {
                    host_ip: Some(port.host_ip.clone()),
                    host_port: Some(port.host_port.to_string()),
                }]),
            )
        })
        .collect();

    let host_config = HostConfig {
        binds: Some(spec.bind_strings()),
        network_mode: Some(spec.network.clone()),
        port_bindings: (!port_bindings.is_empty()).then_some(port_bindings),
        ..Default::default()
    };

    ContainerCreateBody {
        image: Some(spec.image.clone()),
        cmd: Some(spec.command.clone()),
        env: Some(spec.env_strings()),
        hostname: Some(spec.hostname.clone()),
        domainname: Some(spec.domain.clone()),
        working_dir: Some(spec.working_dir.clone()),
        host_config: Some(host_config),
        ..Default::default()
    }
}

fn map_docker_error(err: DockerError) -> RuntimeError {
    match err {
        DockerError::DockerResponseServerError {
            status_code: 409,
            message,
        } => RuntimeError::Conflict(message),
        DockerError::DockerResponseServerError {
            status_code: 404,
            message,
        } => RuntimeError::NotFound(message),
        DockerError::DockerResponseServerError {
            status_code,
            message,
        } => RuntimeError::Engine {
            status: status_code,
            message,
        },
        other => RuntimeError::Other(other.to_string()),
    }
}
