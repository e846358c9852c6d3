use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::trace;

use muster_model::Peer;

use crate::{ExecError, ExecOutput};

/// Transport seam the dispatch engine executes through.
///
/// One call performs one remote session; calling twice issues two
/// independent remote commands. Implementations never retry.
#[async_trait]
pub trait RemoteExec: Send + Sync {
    async fn execute(
        &self,
        peer: &Peer,
        user: &str,
        command: &str,
    ) -> Result<ExecOutput, ExecError>;
}

/// Configuration for the OpenSSH client transport.
#[derive(Debug, Clone)]
pub struct SshConfig {
    /// Client binary to spawn.
    pub program: String,
    /// Extra client options, each emitted as `-o <opt>`.
    pub options: Vec<String>,
    /// Connection timeout, emitted as `-o ConnectTimeout=<secs>`.
    /// All timeout semantics live in the transport; the engine has none.
    pub connect_timeout: Option<Duration>,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            program: "ssh".to_string(),
            // Host-key trust is a transport/config decision, matching the
            // tool's intended ad-hoc fleet usage.
            options: vec!["StrictHostKeyChecking=no".to_string()],
            connect_timeout: None,
        }
    }
}

impl SshConfig {
    pub fn validate(&self) -> Result<(), ExecError> {
        if self.program.trim().is_empty() {
            return Err(ExecError::InvalidConfig("empty ssh program".to_string()));
        }
        Ok(())
    }
}

/// Production transport: spawns the OpenSSH client against the peer's
/// first address.
///
/// Only the first address is ever tried; there is no fallback to later
/// entries when it is unreachable. The command string is passed to the
/// client verbatim, with no shell escaping.
pub struct OpenSsh {
    config: SshConfig,
}

impl OpenSsh {
    pub fn new(config: SshConfig) -> Self {
        Self { config }
    }

    fn build_args(&self, target: &str, command: &str) -> Vec<String> {
        let mut args = Vec::new();
        for opt in &self.config.options {
            args.push("-o".to_string());
            args.push(opt.clone());
        }
        if let Some(timeout) = self.config.connect_timeout {
            args.push("-o".to_string());
            args.push(format!("ConnectTimeout={}", timeout.as_secs()));
        }
        args.push(target.to_string());
        args.push(command.to_string());
        args
    }
}

#[async_trait]
impl RemoteExec for OpenSsh {
    async fn execute(
        &self,
        peer: &Peer,
        user: &str,
        command: &str,
    ) -> Result<ExecOutput, ExecError> {
        let addr = peer.first_address().ok_or_else(|| ExecError::NoAddress {
            host: peer.hostname.clone(),
        })?;
        let target = format!("{user}@{addr}");
        let args = self.build_args(&target, command);

        trace!(%target, program = %self.config.program, "spawning ssh client");

        let output = Command::new(&self.config.program)
            .args(&args)
            .output()
            .await
            .map_err(|e| ExecError::Spawn {
                program: self.config.program.clone(),
                source: e,
            })?;

        let mut combined = output.stdout;
        combined.extend_from_slice(&output.stderr);

        if !output.status.success() {
            return Err(ExecError::Remote {
                target,
                detail: String::from_utf8_lossy(&combined).trim().to_string(),
            });
        }

        Ok(ExecOutput::new(combined))
    }
}
