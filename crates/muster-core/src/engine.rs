use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use muster_exec::{ExecError, RemoteExec};
use muster_model::{Peer, RoundId, RoundSpec};

use crate::{RoundSummary, select_peers};

/// The dispatch-and-collect engine.
///
/// One round: select live, matching peers; launch one task per selected
/// peer; join on all of them. Each task reports its own outcome through
/// the log side-channel and is fully isolated from the others: a failure
/// or panic in one task never aborts another task or the join.
pub struct DispatchEngine {
    exec: Arc<dyn RemoteExec>,
}

impl DispatchEngine {
    pub fn new(exec: Arc<dyn RemoteExec>) -> Self {
        Self { exec }
    }

    /// Runs one dispatch round to completion.
    ///
    /// Returns only after every started task has finished, success or
    /// failure. With zero selected peers the join is already satisfied
    /// and the call returns immediately. The engine itself cannot fail
    /// once dispatch has begun; per-peer errors are absorbed at the task
    /// boundary and show up in the summary counts.
    pub async fn run(&self, peers: Vec<Peer>, spec: &RoundSpec) -> RoundSummary {
        let round = RoundId::new();
        let selected = select_peers(&peers, &spec.filter);
        debug!(
            %round,
            inventory = peers.len(),
            selected = selected.len(),
            filter = %spec.filter,
            "dispatch round starting",
        );

        // No limit means no gate: one unbounded task per selected peer.
        let semaphore = spec
            .limit
            .map(|n| Arc::new(Semaphore::new(n.get())));

        let mut tasks: JoinSet<bool> = JoinSet::new();
        for peer in &selected {
            let exec = Arc::clone(&self.exec);
            let peer = peer.clone();
            let user = spec.user.clone();
            let command = spec.command.clone();
            let semaphore = semaphore.clone();

            tasks.spawn(async move {
                // The permit only gates execution width; every selected
                // peer still gets its own task.
                let _permit = match &semaphore {
                    Some(sem) => sem.acquire().await.ok(),
                    None => None,
                };

                match exec.execute(&peer, &user, &command).await {
                    Ok(output) => {
                        info!(%round, host = %peer.hostname, "command output:\n{}", output.lossy());
                        true
                    }
                    Err(err @ ExecError::NoAddress { .. }) => {
                        warn!(%round, host = %peer.hostname, "{err}");
                        false
                    }
                    Err(err) => {
                        error!(%round, host = %peer.hostname, "{err}");
                        false
                    }
                }
            });
        }

        // The join barrier: drain the set. Task completion is its own
        // exactly-once signal on every exit path, panics included.
        let mut summary = RoundSummary {
            selected: selected.len(),
            ..Default::default()
        };
        while let Some(result) = tasks.join_next().await {
            match result {
                Ok(true) => summary.succeeded += 1,
                Ok(false) => summary.failed += 1,
                Err(err) => {
                    error!(%round, "dispatch task aborted: {err}");
                    summary.failed += 1;
                }
            }
        }

        debug!(
            %round,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "dispatch round finished",
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::num::NonZeroUsize;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use muster_exec::ExecOutput;
    use muster_model::TagFilter;

    use super::*;

    /// Scripted stand-in for the ssh transport: records every target it
    /// is invoked for and fails, panics, or stalls on demand.
    #[derive(Default)]
    struct ScriptedExec {
        fail_hosts: HashSet<String>,
        panic_hosts: HashSet<String>,
        delay: Option<Duration>,
        calls: Mutex<Vec<String>>,
        inflight: AtomicUsize,
        max_inflight: AtomicUsize,
    }

    impl ScriptedExec {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RemoteExec for ScriptedExec {
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
            self.calls.lock().unwrap().push(target.clone());

            let now = self.inflight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_inflight.fetch_max(now, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.inflight.fetch_sub(1, Ordering::SeqCst);

            if self.panic_hosts.contains(&peer.hostname) {
                panic!("scripted panic for {}", peer.hostname);
            }
            if self.fail_hosts.contains(&peer.hostname) {
                return Err(ExecError::Remote {
                    target,
                    detail: "scripted failure".to_string(),
                });
            }
            Ok(ExecOutput::new(format!("ran '{command}'").into_bytes()))
        }
    }

    fn peer(hostname: &str, addresses: &[&str], online: bool, tags: &[&str]) -> Peer {
        Peer {
            hostname: hostname.to_string(),
            addresses: addresses.iter().map(|s| s.to_string()).collect(),
            online,
            tags: tags.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn spec(filter: &str) -> RoundSpec {
        RoundSpec {
            filter: TagFilter::from(filter),
            user: "root".to_string(),
            command: "uptime".to_string(),
            limit: None,
        }
    }

    fn engine(exec: &Arc<ScriptedExec>) -> DispatchEngine {
        DispatchEngine::new(Arc::clone(exec) as Arc<dyn RemoteExec>)
    }

    #[tokio::test]
    async fn dispatches_live_tagged_peers_and_isolates_failures() {
        // a: reachable; b: no address; c: offline and must be skipped.
        let peers = vec![
            peer("a", &["10.0.0.1"], true, &["web"]),
            peer("b", &[], true, &["web"]),
            peer("c", &["10.0.0.3"], false, &["web"]),
        ];
        let exec = Arc::new(ScriptedExec::default());

        let summary = engine(&exec).run(peers, &spec("web")).await;

        assert_eq!(summary.selected, 2);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
        // Only "a" ever reaches the transport; "b" short-circuits.
        assert_eq!(exec.calls(), vec!["root@10.0.0.1"]);
    }

    #[tokio::test]
    async fn every_matching_peer_is_dispatched_exactly_once() {
        let peers: Vec<Peer> = (0..20)
            .map(|i| peer(&format!("node-{i}"), &[&format!("10.0.0.{i}")], true, &["web"]))
            .collect();
        let exec = Arc::new(ScriptedExec::default());

        let summary = engine(&exec).run(peers, &spec("web")).await;

        assert_eq!(summary.selected, 20);
        assert_eq!(summary.succeeded, 20);

        let mut calls = exec.calls();
        assert_eq!(calls.len(), 20);
        calls.sort();
        calls.dedup();
        assert_eq!(calls.len(), 20, "a peer was dispatched twice");
    }

    #[tokio::test]
    async fn offline_peers_are_never_dispatched() {
        let peers = vec![
            peer("a", &["10.0.0.1"], false, &["web"]),
            peer("b", &["10.0.0.2"], false, &[]),
        ];
        let exec = Arc::new(ScriptedExec::default());

        let summary = engine(&exec).run(peers, &spec("")).await;

        assert_eq!(summary, RoundSummary::default());
        assert!(exec.calls().is_empty());
    }

    #[tokio::test]
    async fn zero_peer_round_returns_immediately() {
        let exec = Arc::new(ScriptedExec::default());

        let summary = engine(&exec).run(vec![], &spec("")).await;

        assert_eq!(summary, RoundSummary::default());
        assert!(!summary.has_failures());
    }

    #[tokio::test]
    async fn join_waits_for_every_delayed_task() {
        let peers: Vec<Peer> = (0..5)
            .map(|i| peer(&format!("node-{i}"), &[&format!("10.0.0.{i}")], true, &[]))
            .collect();
        let exec = Arc::new(ScriptedExec {
            delay: Some(Duration::from_millis(50)),
            ..Default::default()
        });

        let summary = engine(&exec).run(peers, &spec("")).await;

        // The barrier released, so every task must have reported.
        assert_eq!(summary.succeeded + summary.failed, summary.selected);
        assert_eq!(exec.calls().len(), 5);
    }

    #[tokio::test]
    async fn one_failing_peer_does_not_disturb_the_others() {
        let peers = vec![
            peer("a", &["10.0.0.1"], true, &[]),
            peer("b", &["10.0.0.2"], true, &[]),
            peer("c", &["10.0.0.3"], true, &[]),
        ];
        let exec = Arc::new(ScriptedExec {
            fail_hosts: HashSet::from(["b".to_string()]),
            ..Default::default()
        });

        let summary = engine(&exec).run(peers, &spec("")).await;

        assert_eq!(summary.selected, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(exec.calls().len(), 3);
    }

    #[tokio::test]
    async fn panicking_task_is_absorbed_and_counted() {
        let peers = vec![
            peer("a", &["10.0.0.1"], true, &[]),
            peer("b", &["10.0.0.2"], true, &[]),
            peer("c", &["10.0.0.3"], true, &[]),
        ];
        let exec = Arc::new(ScriptedExec {
            panic_hosts: HashSet::from(["b".to_string()]),
            ..Default::default()
        });

        let summary = engine(&exec).run(peers, &spec("")).await;

        assert_eq!(summary.selected, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
    }

    #[tokio::test]
    async fn limit_of_one_serializes_execution() {
        let peers: Vec<Peer> = (0..4)
            .map(|i| peer(&format!("node-{i}"), &[&format!("10.0.0.{i}")], true, &[]))
            .collect();
        let exec = Arc::new(ScriptedExec {
            delay: Some(Duration::from_millis(20)),
            ..Default::default()
        });
        let spec = RoundSpec {
            limit: NonZeroUsize::new(1),
            ..spec("")
        };

        let summary = engine(&exec).run(peers, &spec).await;

        assert_eq!(summary.succeeded, 4);
        assert_eq!(exec.max_inflight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unbounded_round_overlaps_execution() {
        let peers: Vec<Peer> = (0..4)
            .map(|i| peer(&format!("node-{i}"), &[&format!("10.0.0.{i}")], true, &[]))
            .collect();
        let exec = Arc::new(ScriptedExec {
            delay: Some(Duration::from_millis(100)),
            ..Default::default()
        });

        let summary = engine(&exec).run(peers, &spec("")).await;

        assert_eq!(summary.succeeded, 4);
        assert!(
            exec.max_inflight.load(Ordering::SeqCst) > 1,
            "tasks never overlapped"
        );
    }
}
