use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use muster_model::{Peer, StatusSnapshot};

use crate::{DiscoveryError, Inventory};

/// Inventory provider reading a status JSON document from disk.
///
/// Lets operators pin or replay a snapshot instead of querying the
/// tailscale CLI on every invocation.
pub struct StaticFile {
    path: PathBuf,
}

impl StaticFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl Inventory for StaticFile {
    async fn snapshot(&self) -> Result<Vec<Peer>, DiscoveryError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let snapshot: StatusSnapshot = serde_json::from_slice(&bytes)?;
        let peers = snapshot.into_peers();
        debug!(path = %self.path.display(), peers = peers.len(), "inventory file parsed");
        Ok(peers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("muster-discover-{}-{}", name, std::process::id()));
        path
    }

    #[tokio::test]
    async fn reads_and_parses_a_snapshot_file() {
        let path = fixture_path("ok");
        let doc = r#"{
            "Peer": {
                "nodekey:aaaa": {
                    "Hostname": "web-1",
                    "TailscaleIPs": ["100.64.0.1"],
                    "Online": true,
                    "Tags": ["tag:web"]
                }
            }
        }"#;
        std::fs::write(&path, doc).unwrap();

        let peers = StaticFile::new(&path).snapshot().await.unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(peers.len(), 1);
        assert_eq!(peers[0].hostname, "web-1");
        assert!(peers[0].online);
    }

    #[tokio::test]
    async fn missing_file_surfaces_io_error() {
        let err = StaticFile::new("/nonexistent/muster-inventory.json")
            .snapshot()
            .await
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::Io(_)));
    }

    #[tokio::test]
    async fn invalid_json_surfaces_parse_error() {
        let path = fixture_path("bad");
        std::fs::write(&path, "not json at all").unwrap();

        let err = StaticFile::new(&path).snapshot().await.unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(err, DiscoveryError::Parse(_)));
    }
}
