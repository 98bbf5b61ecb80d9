//! Gossip bootstrap pairing.
//!
//! Every peer needs one other peer's address at startup to join the gossip
//! overlay. Peers are paired by mirroring the index across the
//! organization's ordered peer list: peer `i` of `n` bootstraps to peer
//! `n - 1 - i`. No coordinator is needed and each peer gets a distinct
//! partner when `n` is even.
//!
//! When `n` is odd the middle peer maps to itself. That is a property of the
//! topology, not something derivation can repair, so it is reported through
//! [`BootstrapPairing::self_paired`] and never rewritten.

use serde::{Deserialize, Serialize};

/// Index of the bootstrap partner for peer `index` in a list of `len` peers.
///
/// Returns `None` when `index` is outside the list.
pub fn bootstrap_partner(len: usize, index: usize) -> Option<usize> {
    (index < len).then(|| len - 1 - index)
}

/// Outcome of pairing one peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapPairing {
    /// This peer's position in its organization.
    pub index: usize,
    /// Position of the peer it bootstraps to.
    pub partner: usize,
    /// Size of the organization's peer list.
    pub group_size: usize,
}

impl BootstrapPairing {
    /// Pair peer `index` in a list of `len` peers.
    pub fn for_index(len: usize, index: usize) -> Option<Self> {
        bootstrap_partner(len, index).map(|partner| Self {
            index,
            partner,
            group_size: len,
        })
    }

    /// The peer bootstraps to its own address (middle peer of an odd list,
    /// or the only peer of a single-peer organization).
    pub fn self_paired(&self) -> bool {
        self.index == self.partner
    }
}
