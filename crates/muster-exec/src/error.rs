use thiserror::Error;

/// Per-peer execution failure. Never fatal to a round: each variant is
/// reported for its own peer and absorbed at the task boundary.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The selected peer has an empty address list. Raised before any
    /// transport activity; the ssh client is never spawned.
    #[error("peer '{host}' has no addresses")]
    NoAddress { host: String },

    /// The ssh client binary itself could not be started.
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The remote session failed: connection refused, authentication
    /// failure, transport timeout, or a non-zero remote exit. `detail`
    /// carries the combined diagnostic output.
    #[error("remote command failed on {target}: {detail}")]
    Remote { target: String, detail: String },

    #[error("invalid ssh configuration: {0}")]
    InvalidConfig(String),
}
