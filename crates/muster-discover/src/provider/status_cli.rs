use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, trace};

use muster_model::{Peer, StatusSnapshot};

use crate::{DiscoveryError, Inventory};

/// Inventory provider backed by `tailscale status --json`.
///
/// The CLI is used instead of the HTTP API: the API does not expose the
/// `Online` field, and the status output already excludes the local node,
/// which is never a dispatch target.
pub struct StatusCli {
    program: String,
}

impl StatusCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for StatusCli {
    fn default() -> Self {
        Self::new("tailscale")
    }
}

#[async_trait]
impl Inventory for StatusCli {
    async fn snapshot(&self) -> Result<Vec<Peer>, DiscoveryError> {
        trace!(program = %self.program, "querying tailnet status");

        let output = Command::new(&self.program)
            .args(["status", "--json"])
            .output()
            .await?;

        if !output.status.success() {
            return Err(DiscoveryError::Status {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let snapshot: StatusSnapshot = serde_json::from_slice(&output.stdout)?;
        let peers = snapshot.into_peers();
        debug!(peers = peers.len(), "tailnet status parsed");
        Ok(peers)
    }
}
