//! Peer and orderer spec derivation.
//!
//! Pure functions of `(organization, node, index, peer list, project root)`.
//! Calling the builder twice with identical inputs yields identical specs.

use shared_types::{Orderer, Peer};

use crate::domain::{
    BootstrapPairing, EnvVar, FilesystemLayout, NodeKind, NodeSpec, PortBinding, ProjectPath,
    SpecError, SpecResult, VolumeBinding,
};

/// Pinned peer image.
pub const PEER_IMAGE: &str = "hyperledger/fabric-peer:1.4.6";
/// Pinned orderer image.
pub const ORDERER_IMAGE: &str = "hyperledger/fabric-orderer:1.4.6";

/// Peer listen / gossip port inside the container.
pub const GOSSIP_PORT: u16 = 7051;
/// Peer chaincode listen port inside the container.
pub const CHAINCODE_PORT: u16 = 7052;
/// Orderer listen port inside the container.
pub const ORDERER_LISTEN_PORT: u16 = 7050;

pub const PEER_WORKING_DIR: &str = "/opt/gopath/src/github.com/hyperledger/fabric/peer";
pub const ORDERER_WORKING_DIR: &str = "/opt/gopath/src/github.com/hyperledger/fabric";

const ORDERER_HOME: &str = "/var/hyperledger/orderer";

/// Derives node specs for one bring-up run.
///
/// Holds the resolved project root so every spec of the run binds the same
/// absolute paths.
#[derive(Debug, Clone)]
pub struct NodeSpecBuilder {
    project: ProjectPath,
    layout: FilesystemLayout,
    network: String,
}

impl NodeSpecBuilder {
    pub fn new(project: ProjectPath, layout: FilesystemLayout, network: impl Into<String>) -> Self {
        Self {
            project,
            layout,
            network: network.into(),
        }
    }

    pub fn project(&self) -> &ProjectPath {
        &self.project
    }

    pub fn layout(&self) -> &FilesystemLayout {
        &self.layout
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    /// Spec for peer `index` of `org`.
    ///
    /// Needs the organization's full peer list because the gossip bootstrap
    /// target is the peer mirrored across it.
    pub fn peer(&self, org: &str, peers: &[Peer], index: usize) -> SpecResult<NodeSpec> {
        let pairing = BootstrapPairing::for_index(peers.len(), index).ok_or_else(|| {
            SpecError::NodeIndexOutOfRange {
                org: org.to_string(),
                index,
                len: peers.len(),
            }
        })?;
        let name = peers[index].name.as_str();
        let partner = peers[pairing.partner].name.as_str();
        let msp_dir = self.layout.peer_msp_dir(&self.project, org, name)?;
        let state_dir = self.layout.node_state_dir(&self.project, name)?;

        Ok(NodeSpec {
            name: name.to_string(),
            kind: NodeKind::Peer,
            organization: org.to_string(),
            hostname: name.to_string(),
            domain: name.to_string(),
            image: PEER_IMAGE.to_string(),
            command: vec!["peer".into(), "node".into(), "start".into()],
            env: self.peer_env(org, name, partner),
            volumes: vec![
                VolumeBinding::read_write("/var/run/", "/host/var/run/"),
                VolumeBinding::read_only(msp_dir, "/etc/hyperledger/fabric/msp"),
                VolumeBinding::read_write(state_dir, "/var/hyperledger/production"),
            ],
            ports: Vec::new(),
            network: self.network.clone(),
            working_dir: PEER_WORKING_DIR.to_string(),
            bootstrap: Some(pairing),
        })
    }

    /// Spec for one orderer owned by `org`.
    pub fn orderer(&self, org: &str, orderer: &Orderer) -> SpecResult<NodeSpec> {
        let host_port = orderer.host_port().ok_or_else(|| SpecError::InvalidPort {
            orderer: orderer.name.clone(),
            port: orderer.port.clone(),
        })?;
        let crypto_dir = self.layout.orderer_dir(&self.project, &orderer.name)?;
        let state_dir = self.layout.node_state_dir(&self.project, &orderer.name)?;

        Ok(NodeSpec {
            name: orderer.name.clone(),
            kind: NodeKind::Orderer,
            organization: org.to_string(),
            hostname: orderer.name.clone(),
            domain: orderer.name.clone(),
            image: ORDERER_IMAGE.to_string(),
            command: vec!["orderer".into()],
            env: orderer_env(),
            volumes: vec![
                VolumeBinding::read_write(crypto_dir.join("msp"), format!("{ORDERER_HOME}/msp")),
                VolumeBinding::read_write(crypto_dir.join("tls"), format!("{ORDERER_HOME}/tls")),
                VolumeBinding::read_write(state_dir, "/var/hyperledger/production/orderer"),
                VolumeBinding::read_write(
                    self.layout.genesis_block(&self.project),
                    format!("{ORDERER_HOME}/orderer.genesis.block"),
                ),
            ],
            ports: vec![PortBinding::tcp_all_interfaces(
                ORDERER_LISTEN_PORT,
                host_port,
            )],
            network: self.network.clone(),
            working_dir: ORDERER_WORKING_DIR.to_string(),
            bootstrap: None,
        })
    }

    fn peer_env(&self, org: &str, name: &str, bootstrap_peer: &str) -> Vec<EnvVar> {
        vec![
            EnvVar::new("CORE_VM_ENDPOINT", "unix:///host/var/run/docker.sock"),
            EnvVar::new("CORE_VM_DOCKER_HOSTCONFIG_NETWORKMODE", self.network.as_str()),
            EnvVar::new("FABRIC_LOGGING_SPEC", "INFO"),
            EnvVar::new("CORE_PEER_GOSSIP_USELEADERELECTION", "true"),
            EnvVar::new("CORE_PEER_GOSSIP_ORGLEADER", "false"),
            EnvVar::new("CORE_PEER_PROFILE_ENABLED", "true"),
            EnvVar::new("CORE_PEER_ID", name),
            EnvVar::new("CORE_PEER_ADDRESS", format!("{name}:{GOSSIP_PORT}")),
            EnvVar::new("CORE_PEER_LISTENADDRESS", format!("0.0.0.0:{GOSSIP_PORT}")),
            EnvVar::new("CORE_PEER_CHAINCODEADDRESS", format!("{name}:{CHAINCODE_PORT}")),
            EnvVar::new(
                "CORE_PEER_CHAINCODELISTENADDRESS",
                format!("0.0.0.0:{CHAINCODE_PORT}"),
            ),
            EnvVar::new(
                "CORE_PEER_GOSSIP_BOOTSTRAP",
                format!("{bootstrap_peer}:{GOSSIP_PORT}"),
            ),
            EnvVar::new(
                "CORE_PEER_GOSSIP_EXTERNALENDPOINT",
                format!("{name}:{GOSSIP_PORT}"),
            ),
            EnvVar::new(
                "CORE_PEER_LOCALMSPID",
                format!("{}MSP", shared_types::title_case(org)),
            ),
        ]
    }
}

fn orderer_env() -> Vec<EnvVar> {
    let tls = format!("{ORDERER_HOME}/tls");
    vec![
        EnvVar::new("FABRIC_LOGGING_SPEC", "INFO"),
        EnvVar::new("ORDERER_GENERAL_LISTENADDRESS", "0.0.0.0"),
        EnvVar::new("ORDERER_GENERAL_GENESISMETHOD", "file"),
        EnvVar::new(
            "ORDERER_GENERAL_GENESISFILE",
            format!("{ORDERER_HOME}/orderer.genesis.block"),
        ),
        EnvVar::new("ORDERER_GENERAL_LOCALMSPID", "OrdererMSP"),
        EnvVar::new("ORDERER_GENERAL_LOCALMSPDIR", format!("{ORDERER_HOME}/msp")),
        EnvVar::new("ORDERER_GENERAL_TLS_ENABLED", "true"),
        EnvVar::new("ORDERER_GENERAL_TLS_PRIVATEKEY", format!("{tls}/server.key")),
        EnvVar::new("ORDERER_GENERAL_TLS_CERTIFICATE", format!("{tls}/server.crt")),
        EnvVar::new("ORDERER_GENERAL_TLS_ROOTCAS", format!("[{tls}/ca.crt]")),
        EnvVar::new(
            "ORDERER_GENERAL_CLUSTER_CLIENTCERTIFICATE",
            format!("{tls}/server.crt"),
        ),
        EnvVar::new(
            "ORDERER_GENERAL_CLUSTER_CLIENTPRIVATEKEY",
            format!("{tls}/server.key"),
        ),
        EnvVar::new("ORDERER_GENERAL_CLUSTER_ROOTCAS", format!("[{tls}/ca.crt]")),
    ]
}
