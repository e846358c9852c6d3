use thiserror::Error;

/// Inventory acquisition failure. Always fatal: nothing is dispatched
/// when the peer list cannot be obtained or parsed.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("status command exited with {code:?}: {stderr}")]
    Status { code: Option<i32>, stderr: String },

    #[error("failed to parse status output: {0}")]
    Parse(#[from] serde_json::Error),
}
