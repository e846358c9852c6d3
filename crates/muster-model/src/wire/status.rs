use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::Peer;

/// Wire shape of `tailscale status --json`.
///
/// Only the `"Peer"` map is read; everything else in the document is
/// ignored. The map is keyed by the opaque node public key, which carries
/// no meaning for dispatch and is dropped when flattening.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusSnapshot {
    #[serde(rename = "Peer", default)]
    pub peers: HashMap<String, Peer>,
}

impl StatusSnapshot {
    /// Flatten the keyed map into a peer list.
    ///
    /// Iteration order of the underlying map is unspecified, and so is the
    /// order of the returned list; dispatch makes no ordering promises.
    pub fn into_peers(self) -> Vec<Peer> {
        self.peers.into_values().collect()
    }
}
