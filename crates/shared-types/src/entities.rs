//! # Topology Entities
//!
//! The declarative network description: a channel, a consensus type and an
//! ordered list of organizations, each owning peers and orderers.
//!
//! ## Document shape
//!
//! ```yaml
//! hfToolPath: /opt/fabric/bin   # optional, tools are looked up on PATH otherwise
//! channelName: mychannel
//! consensusType: solo
//! orgs:
//!   - name: org1
//!     peers:
//!       - name: peer0.org1.example.com
//!       - name: peer1.org1.example.com
//!     orderers:
//!       - name: orderer0.example.com
//!         port: "7050"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{TopologyError, TopologyResult};

/// The whole network to bring up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topology {
    /// Directory holding the Fabric tool binaries (`cryptogen`, `configtxgen`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hf_tool_path: Option<PathBuf>,
    /// Application channel created from the generated channel transaction.
    #[serde(default = "default_channel_name")]
    pub channel_name: String,
    /// Ordering service consensus type (`solo`, `etcdraft`, ...).
    #[serde(default = "default_consensus_type")]
    pub consensus_type: String,
    /// Organizations in declaration order.
    #[serde(default)]
    pub orgs: Vec<Organization>,
}

fn default_channel_name() -> String {
    "mychannel".to_string()
}

fn default_consensus_type() -> String {
    "solo".to_string()
}

impl Topology {
    /// Build a topology from organizations with default channel settings.
    pub fn new(orgs: Vec<Organization>) -> Self {
        Self {
            hf_tool_path: None,
            channel_name: default_channel_name(),
            consensus_type: default_consensus_type(),
            orgs,
        }
    }

    /// Parse a topology document. Does not validate it.
    pub fn from_yaml_str(input: &str) -> TopologyResult<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Read and parse a topology file. Does not validate it.
    pub fn load(path: impl AsRef<Path>) -> TopologyResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| TopologyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = raw.len(), "Read topology file");
        Self::from_yaml_str(&raw)
    }

    /// Total number of peers across all organizations.
    pub fn peer_count(&self) -> usize {
        self.orgs.iter().map(|org| org.peers.len()).sum()
    }

    /// Total number of orderers across all organizations.
    pub fn orderer_count(&self) -> usize {
        self.orgs.iter().map(|org| org.orderers.len()).sum()
    }

    /// Every orderer paired with its owning organization, in topology order.
    pub fn orderers(&self) -> impl Iterator<Item = (&Organization, &Orderer)> {
        self.orgs
            .iter()
            .flat_map(|org| org.orderers.iter().map(move |orderer| (org, orderer)))
    }
}

/// An administrative domain owning peers and orderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Short name, e.g. `org1`. Feeds MSP identifiers and crypto paths.
    pub name: String,
    /// Peers in declaration order. Order drives gossip bootstrap pairing.
    #[serde(default)]
    pub peers: Vec<Peer>,
    /// Orderers in declaration order.
    #[serde(default)]
    pub orderers: Vec<Orderer>,
}

impl Organization {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            peers: Vec::new(),
            orderers: Vec::new(),
        }
    }

    /// Append a peer (builder style).
    pub fn with_peer(mut self, name: impl Into<String>) -> Self {
        self.peers.push(Peer::new(name));
        self
    }

    /// Append an orderer (builder style).
    pub fn with_orderer(mut self, name: impl Into<String>, port: impl Into<String>) -> Self {
        self.orderers.push(Orderer::new(name, port));
        self
    }

    /// Local MSP identifier: the title-cased organization name plus `MSP`.
    ///
    /// `org1` becomes `Org1MSP`.
    pub fn msp_id(&self) -> String {
        format!("{}MSP", title_case(&self.name))
    }
}

/// A ledger-hosting node. Its name is also its hostname on the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    pub name: String,
}

impl Peer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An ordering-service node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orderer {
    pub name: String,
    /// Host-side published port for the orderer listener, as written in the
    /// topology file. Parsed when the node spec is derived.
    pub port: String,
}

impl Orderer {
    pub fn new(name: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            port: port.into(),
        }
    }

    /// Parse the published port. Zero and surrounding whitespace are rejected.
    pub fn host_port(&self) -> Option<u16> {
        self.port.parse::<u16>().ok().filter(|port| *port != 0)
    }
}

/// Upper-case the first letter of every word.
///
/// A word starts after any character that is not a letter, digit or
/// underscore, so `org1` becomes `Org1` and `sales-east` becomes `Sales-East`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for ch in input.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = !(ch.is_alphanumeric() || ch == '_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
channelName: trade
consensusType: etcdraft
orgs:
  - name: org1
    peers:
      - name: peer0.org1.example.com
      - name: peer1.org1.example.com
    orderers:
      - name: orderer0.example.com
        port: "7050"
  - name: org2
    peers:
      - name: peer0.org2.example.com
"#;

    #[test]
    fn test_parse_preserves_order() {
        let topology = Topology::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(topology.channel_name, "trade");
        assert_eq!(topology.consensus_type, "etcdraft");
        assert_eq!(topology.orgs.len(), 2);
        assert_eq!(topology.orgs[0].peers[0].name, "peer0.org1.example.com");
        assert_eq!(topology.orgs[0].peers[1].name, "peer1.org1.example.com");
        assert!(topology.orgs[1].orderers.is_empty());
        assert_eq!(topology.peer_count(), 3);
        assert_eq!(topology.orderer_count(), 1);
        assert!(topology.hf_tool_path.is_none());
    }

    #[test]
    fn test_parse_defaults() {
        let topology = Topology::from_yaml_str("orgs: []").unwrap();
        assert_eq!(topology.channel_name, "mychannel");
        assert_eq!(topology.consensus_type, "solo");
    }

    #[test]
    fn test_parse_rejects_malformed_document() {
        let err = Topology::from_yaml_str("orgs: [name: ").unwrap_err();
        assert!(matches!(err, TopologyError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Topology::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, TopologyError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("network.yaml");
        std::fs::write(&path, SAMPLE).unwrap();

        let topology = Topology::load(&path).unwrap();
        assert_eq!(topology.orgs[1].name, "org2");
    }

    #[test]
    fn test_orderers_iterates_with_owner() {
        let topology = Topology::new(vec![
            Organization::new("org1").with_orderer("o1", "7050"),
            Organization::new("org2")
                .with_orderer("o2", "8050")
                .with_orderer("o3", "9050"),
        ]);
        let pairs: Vec<_> = topology
            .orderers()
            .map(|(org, orderer)| (org.name.as_str(), orderer.name.as_str()))
            .collect();
        assert_eq!(pairs, vec![("org1", "o1"), ("org2", "o2"), ("org2", "o3")]);
    }

    #[test]
    fn test_msp_id() {
        assert_eq!(Organization::new("org1").msp_id(), "Org1MSP");
        assert_eq!(Organization::new("sales-east").msp_id(), "Sales-EastMSP");
    }

    #[test]
    fn test_title_case_words() {
        assert_eq!(title_case("org1"), "Org1");
        assert_eq!(title_case("my org"), "My Org");
        assert_eq!(title_case("snake_case"), "Snake_case");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_host_port() {
        assert_eq!(Orderer::new("o", "7050").host_port(), Some(7050));
        assert_eq!(Orderer::new("o", " 8050 ").host_port(), None);
        assert_eq!(Orderer::new("o", "8050\n").host_port(), None);
        assert_eq!(Orderer::new("o", "0").host_port(), None);
        assert_eq!(Orderer::new("o", "70x0").host_port(), None);
        assert_eq!(Orderer::new("o", "70500").host_port(), None);
    }
}
