use async_trait::async_trait;

use muster_model::Peer;

use crate::DiscoveryError;

pub mod status_cli;
pub use status_cli::StatusCli;

pub mod static_file;
pub use static_file::StaticFile;

/// Source of the peer inventory.
///
/// The dispatch engine consumes only the returned list; how it was
/// obtained is this trait's concern. Implementations return peers in
/// whatever order their source produces them.
#[async_trait]
pub trait Inventory: Send + Sync {
    async fn snapshot(&self) -> Result<Vec<Peer>, DiscoveryError>;
}
