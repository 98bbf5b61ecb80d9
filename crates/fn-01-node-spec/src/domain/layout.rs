//! Project root and the on-disk layout written by the crypto and
//! channel-artifact generators.
//!
//! Renaming an organization or node must change both the generator output
//! and these paths, otherwise container start fails with a bind-mount error.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{SpecError, SpecResult};

/// Absolute project root, resolved once per bring-up run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPath(PathBuf);

impl ProjectPath {
    /// Resolve `path` against the current directory.
    ///
    /// The path does not need to exist; it only needs to be absolutisable.
    pub fn resolve(path: impl AsRef<Path>) -> SpecResult<Self> {
        let path = path.as_ref();
        std::path::absolute(path)
            .map(Self)
            .map_err(|source| SpecError::UnresolvableProjectPath {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for ProjectPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// Relative locations of generated material under the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesystemLayout {
    /// Directory (relative to the project root) holding `crypto-config/`,
    /// `channel-artifacts/` and per-node state directories.
    pub config_dir: PathBuf,
    /// DNS domain used by the crypto generator, e.g. `example.com`.
    pub domain: String,
}

impl Default for FilesystemLayout {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from("pkg/config"),
            domain: "example.com".to_string(),
        }
    }
}

impl FilesystemLayout {
    fn config_root(&self, project: &ProjectPath) -> PathBuf {
        project.as_path().join(&self.config_dir)
    }

    /// `crypto-config/` root.
    pub fn crypto_root(&self, project: &ProjectPath) -> PathBuf {
        self.config_root(project).join("crypto-config")
    }

    /// `channel-artifacts/` root.
    pub fn artifacts_dir(&self, project: &ProjectPath) -> PathBuf {
        self.config_root(project).join("channel-artifacts")
    }

    /// Genesis block shared by every orderer.
    pub fn genesis_block(&self, project: &ProjectPath) -> PathBuf {
        self.artifacts_dir(project).join("genesis.block")
    }

    /// MSP material for one peer.
    pub fn peer_msp_dir(&self, project: &ProjectPath, org: &str, peer: &str) -> SpecResult<PathBuf> {
        let org = segment(org)?;
        Ok(self
            .crypto_root(project)
            .join("peerOrganizations")
            .join(format!("{org}.{}", self.domain))
            .join("peers")
            .join(segment(peer)?)
            .join("msp"))
    }

    /// Directory holding one orderer's `msp/` and `tls/` material.
    pub fn orderer_dir(&self, project: &ProjectPath, orderer: &str) -> SpecResult<PathBuf> {
        Ok(self
            .crypto_root(project)
            .join("ordererOrganizations")
            .join(&self.domain)
            .join("orderers")
            .join(segment(orderer)?))
    }

    /// Per-node production data directory.
    pub fn node_state_dir(&self, project: &ProjectPath, node: &str) -> SpecResult<PathBuf> {
        Ok(self.config_root(project).join(segment(node)?))
    }
}

/// Accept `name` only if joining it adds exactly one normal component.
fn segment(name: &str) -> SpecResult<&str> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.chars().any(std::path::is_separator) => {
            Ok(name)
        }
        _ => Err(SpecError::UnsafePathSegment {
            segment: name.to_string(),
        }),
    }
}
