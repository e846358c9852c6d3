use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use muster_core::{DispatchEngine, select_peers};
use muster_discover::{Inventory, StaticFile, StatusCli};
use muster_exec::{OpenSsh, SshConfig};
use muster_model::{RoundSpec, TagFilter};
use muster_observe::{LoggerConfig, LoggerFormat, LoggerLevel, init_local_offset, init_logger};

/// Run a command across tailnet peers over ssh.
#[derive(Parser, Debug)]
#[command(name = "muster", version, about)]
struct Args {
    /// Remote user for the ssh session
    #[arg(long, default_value = "root")]
    sshuser: String,

    /// Command executed verbatim on each selected peer
    #[arg(long, default_value = "echo Hello from $HOST")]
    sshcommand: String,

    /// Filter peers by tag (e.g. tag:web); empty matches all
    #[arg(long, default_value = "")]
    tag: String,

    /// Cap on concurrently-executing ssh sessions; absent = unbounded
    #[arg(long)]
    limit: Option<NonZeroUsize>,

    /// Exit non-zero when any peer's command failed
    #[arg(long)]
    fail_on_error: bool,

    /// List the selected peers without dispatching anything
    #[arg(long)]
    dry_run: bool,

    /// Transport connection timeout in seconds
    #[arg(long)]
    connect_timeout: Option<u64>,

    /// Extra ssh client option, emitted as -o <opt> (repeatable)
    #[arg(long = "ssh-option")]
    ssh_options: Vec<String>,

    /// Read the status snapshot from a file instead of the tailscale CLI
    #[arg(long)]
    inventory: Option<PathBuf>,

    /// Path of the tailscale binary used for status queries
    #[arg(long, default_value = "tailscale")]
    tailscale_bin: String,

    #[arg(long, default_value = "text")]
    log_format: LoggerFormat,

    #[arg(long, default_value = "info")]
    log_level: LoggerLevel,
}

fn main() -> anyhow::Result<ExitCode> {
    // Before the runtime: local offset detection fails once threads exist.
    init_local_offset();
    let args = Args::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;
    runtime.block_on(run(args))
}

async fn run(args: Args) -> anyhow::Result<ExitCode> {
    let logger = LoggerConfig {
        format: args.log_format,
        level: args.log_level.clone(),
        ..Default::default()
    };
    init_logger(&logger)?;

    let inventory: Box<dyn Inventory> = match &args.inventory {
        Some(path) => Box::new(StaticFile::new(path)),
        None => Box::new(StatusCli::new(&args.tailscale_bin)),
    };
    // Fatal: nothing is dispatched when the peer list is unavailable.
    let peers = inventory
        .snapshot()
        .await
        .context("failed to query peer inventory")?;

    let spec = RoundSpec {
        filter: TagFilter::from(args.tag),
        user: args.sshuser,
        command: args.sshcommand,
        limit: args.limit,
    };
    spec.validate()?;

    if args.dry_run {
        let selected = select_peers(&peers, &spec.filter);
        for peer in &selected {
            info!(
                host = %peer.hostname,
                addr = peer.first_address().unwrap_or("<none>"),
                "would dispatch",
            );
        }
        info!(selected = selected.len(), "dry run, nothing dispatched");
        return Ok(ExitCode::SUCCESS);
    }

    let ssh = SshConfig {
        options: {
            let mut options = SshConfig::default().options;
            options.extend(args.ssh_options);
            options
        },
        connect_timeout: args.connect_timeout.map(Duration::from_secs),
        ..Default::default()
    };
    ssh.validate()?;

    let engine = DispatchEngine::new(Arc::new(OpenSsh::new(ssh)));
    let summary = engine.run(peers, &spec).await;

    info!(
        selected = summary.selected,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "all ssh commands completed",
    );

    if args.fail_on_error && summary.has_failures() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
