//! # Topology Validation
//!
//! Checks that must pass before any container engine call is made.
//!
//! ## Invariants
//!
//! - At least one organization.
//! - No empty organization, peer or orderer names.
//! - Every name is hostname-safe: `[A-Za-z0-9][A-Za-z0-9_.-]*` without `..`.
//!   Names become container hostnames and host path segments.
//! - Peer and orderer names are unique across the whole topology.
//! - Every orderer port is a non-zero TCP port.
//!
//! Peer-count parity is NOT enforced here. An odd count makes the middle peer
//! bootstrap to itself, which callers surface as a warning.

use std::collections::HashMap;

use crate::entities::{Organization, Topology};
use crate::errors::{TopologyError, TopologyResult};

impl Topology {
    /// Validate the topology, returning the first violation found.
    pub fn validate(&self) -> TopologyResult<()> {
        if self.orgs.is_empty() {
            return Err(TopologyError::NoOrganizations);
        }

        // node name -> owning organization
        let mut seen: HashMap<&str, &str> = HashMap::new();

        for (org_index, org) in self.orgs.iter().enumerate() {
            if org.name.trim().is_empty() {
                return Err(TopologyError::EmptyName {
                    kind: "organization",
                    org_index,
                });
            }
            check_name("organization", &org.name)?;

            let peer_names = org.peers.iter().map(|peer| ("peer", peer.name.as_str()));
            let orderer_names = org
                .orderers
                .iter()
                .map(|orderer| ("orderer", orderer.name.as_str()));

            for (kind, name) in peer_names.chain(orderer_names) {
                if name.trim().is_empty() {
                    return Err(TopologyError::EmptyName { kind, org_index });
                }
                check_name(kind, name)?;
                if let Some(first_org) = seen.insert(name, org.name.as_str()) {
                    return Err(TopologyError::DuplicateNodeName {
                        name: name.to_string(),
                        first_org: first_org.to_string(),
                        second_org: org.name.clone(),
                    });
                }
            }

            for orderer in &org.orderers {
                if orderer.host_port().is_none() {
                    return Err(TopologyError::InvalidPort {
                        orderer: orderer.name.clone(),
                        port: orderer.port.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Organizations whose peer count is odd.
    ///
    /// With mirrored bootstrap pairing the middle peer of such an organization
    /// bootstraps to its own address.
    pub fn odd_peer_organizations(&self) -> Vec<&Organization> {
        self.orgs
            .iter()
            .filter(|org| org.peers.len() % 2 == 1)
            .collect()
    }
}

/// Whether `name` can be used as a hostname and as one host path segment.
pub fn is_safe_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_alphanumeric()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        && !name.contains("..")
}

fn check_name(kind: &'static str, name: &str) -> TopologyResult<()> {
    if is_safe_name(name) {
        Ok(())
    } else {
        Err(TopologyError::InvalidName {
            kind,
            name: name.to_string(),
        })
    }
}
