//! In-memory container engine.
//!
//! Records every call in order and can be told to fail specific calls or
//! delay specific containers, so tests can assert ordering and failure
//! handling without a Docker daemon.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use fn_01_node_spec::NodeSpec;
use parking_lot::Mutex;

use crate::domain::{ContainerSummary, RuntimeError};
use crate::ports::RuntimeClient;

/// One recorded engine call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCall {
    CreateNetwork(String),
    /// Container name.
    CreateContainer(String),
    /// Container name (resolved from the id).
    StartContainer(String),
    ListContainers,
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<RuntimeCall>,
    networks: HashSet<String>,
    specs: HashMap<String, NodeSpec>,
    /// id -> name, creation order kept by `created`.
    names: HashMap<String, String>,
    created: Vec<String>,
    running: Vec<String>,
    next_id: usize,
}

#[derive(Debug, Default)]
struct Faults {
    network: Option<RuntimeError>,
    list: Option<RuntimeError>,
    create: HashMap<String, RuntimeError>,
    start: HashMap<String, RuntimeError>,
    delays: HashMap<String, Duration>,
}

/// Container engine double.
#[derive(Debug, Default)]
pub struct InMemoryRuntime {
    state: Mutex<State>,
    faults: Mutex<Faults>,
}

impl InMemoryRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend `name` already exists; creating it again yields `Conflict`.
    pub fn with_existing_network(self, name: &str) -> Self {
        self.state.lock().networks.insert(name.to_string());
        self
    }

    pub fn fail_network(self, err: RuntimeError) -> Self {
        self.faults.lock().network = Some(err);
        self
    }

    /// Fail the create call for container `name`.
    pub fn fail_create(self, name: &str, err: RuntimeError) -> Self {
        self.faults.lock().create.insert(name.to_string(), err);
        self
    }

    /// Fail the start call for container `name`.
    pub fn fail_start(self, name: &str, err: RuntimeError) -> Self {
        self.faults.lock().start.insert(name.to_string(), err);
        self
    }

    pub fn fail_list(self, err: RuntimeError) -> Self {
        self.faults.lock().list = Some(err);
        self
    }

    /// Sleep before answering the create call for `name`.
    pub fn delay_create(self, name: &str, delay: Duration) -> Self {
        self.faults.lock().delays.insert(name.to_string(), delay);
        self
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> Vec<RuntimeCall> {
        self.state.lock().calls.clone()
    }

    /// Names of created containers, in creation order.
    pub fn created(&self) -> Vec<String> {
        self.state.lock().created.clone()
    }

    /// Names of started containers, in start order.
    pub fn running(&self) -> Vec<String> {
        self.state.lock().running.clone()
    }

    /// Spec that container `name` was created from.
    pub fn spec(&self, name: &str) -> Option<NodeSpec> {
        self.state.lock().specs.get(name).cloned()
    }

    pub fn network_create_count(&self) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| matches!(call, RuntimeCall::CreateNetwork(_)))
            .count()
    }

    /// Position of `call` in the call log.
    pub fn position(&self, call: &RuntimeCall) -> Option<usize> {
        self.state.lock().calls.iter().position(|c| c == call)
    }
}

#[async_trait]
impl RuntimeClient for InMemoryRuntime {
    async fn create_network(&self, name: &str) -> Result<String, RuntimeError> {
        let fault = self.faults.lock().network.clone();
        let mut state = self.state.lock();
        state.calls.push(RuntimeCall::CreateNetwork(name.to_string()));
        if let Some(err) = fault {
            return Err(err);
        }
        if !state.networks.insert(name.to_string()) {
            return Err(RuntimeError::Conflict(format!(
                "network with name {name} already exists"
            )));
        }
        Ok(format!("net-{name}"))
    }

    async fn create_container(&self, spec: &NodeSpec) -> Result<String, RuntimeError> {
        let (delay, fault) = {
            let faults = self.faults.lock();
            (
                faults.delays.get(&spec.name).copied(),
                faults.create.get(&spec.name).cloned(),
            )
        };
        self.state
            .lock()
            .calls
            .push(RuntimeCall::CreateContainer(spec.name.clone()));

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = fault {
            return Err(err);
        }

        let mut state = self.state.lock();
        if state.specs.contains_key(&spec.name) {
            return Err(RuntimeError::Conflict(format!(
                "container name {} is already in use",
                spec.name
            )));
        }
        state.next_id += 1;
        let id = format!("ctr-{}", state.next_id);
        state.names.insert(id.clone(), spec.name.clone());
        state.specs.insert(spec.name.clone(), spec.clone());
        state.created.push(spec.name.clone());
        Ok(id)
    }

    async fn start_container(&self, id: &str) -> Result<(), RuntimeError> {
        let mut state = self.state.lock();
        let Some(name) = state.names.get(id).cloned() else {
            return Err(RuntimeError::NotFound(format!("no such container: {id}")));
        };
        state.calls.push(RuntimeCall::StartContainer(name.clone()));
        if let Some(err) = self.faults.lock().start.get(&name).cloned() {
            return Err(err);
        }
        state.running.push(name);
        Ok(())
    }

    async fn list_containers(&self) -> Result<Vec<ContainerSummary>, RuntimeError> {
        let fault = self.faults.lock().list.clone();
        let mut state = self.state.lock();
        state.calls.push(RuntimeCall::ListContainers);
        if let Some(err) = fault {
            return Err(err);
        }
        let by_name: HashMap<&str, &str> = state
            .names
            .iter()
            .map(|(id, name)| (name.as_str(), id.as_str()))
            .collect();
        Ok(state
            .running
            .iter()
            .map(|name| {
                let id = by_name.get(name.as_str()).copied().unwrap_or_default();
                ContainerSummary::new(id, vec![format!("/{name}")])
            })
            .collect())
    }
}
