//! Shared test doubles for the unregister services.
//!
//! Every double records what it was asked to do so tests can assert on
//! call counts and ordering without touching the host.

#![allow(clippy::expect_used)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{
    AgentApi, ContainerRuntime, ContainerRuntimeConnector, LocalStateStore, ProgressReporter,
    ServiceControl, UserPrompt,
};
use crate::domain::{ContainerRecord, DEFAULT_OWNERSHIP_LABEL, NodeConfigState, TeardownOptions};

// ── Agent ─────────────────────────────────────────────────────────────────────

/// How the scripted agent answers `DELETE /node`.
#[derive(Debug, Clone, Copy)]
pub enum DeleteReply {
    Ok,
    Fail(&'static str),
    /// Never answers within any test deadline.
    Hang,
}

/// One scripted `GET /node` answer.
pub type StateReply = Result<Option<NodeConfigState>, &'static str>;

/// Agent double with a scripted state sequence. Once the script runs out the
/// last answer repeats.
pub struct ScriptedAgent {
    delete: DeleteReply,
    states: Mutex<VecDeque<StateReply>>,
    last: Mutex<StateReply>,
    pub delete_calls: AtomicUsize,
    pub state_calls: AtomicUsize,
    pub last_delete_opts: Mutex<Option<TeardownOptions>>,
}

impl ScriptedAgent {
    pub fn new(delete: DeleteReply, states: impl IntoIterator<Item = StateReply>) -> Self {
        Self {
            delete,
            states: Mutex::new(states.into_iter().collect()),
            last: Mutex::new(Err("no state scripted")),
            delete_calls: AtomicUsize::new(0),
            state_calls: AtomicUsize::new(0),
            last_delete_opts: Mutex::new(None),
        }
    }

    /// Agent that tears down and reports `unconfigured` immediately.
    pub fn healthy() -> Self {
        Self::new(DeleteReply::Ok, [Ok(Some(NodeConfigState::Unconfigured))])
    }

    pub fn deletes(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn polls(&self) -> usize {
        self.state_calls.load(Ordering::SeqCst)
    }
}

impl AgentApi for ScriptedAgent {
    async fn delete_node(&self, opts: TeardownOptions) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_delete_opts.lock().expect("lock") = Some(opts);
        match self.delete {
            DeleteReply::Ok => Ok(()),
            DeleteReply::Fail(msg) => anyhow::bail!("{msg}"),
            DeleteReply::Hang => {
                tokio::time::sleep(Duration::from_secs(24 * 60 * 60)).await;
                Ok(())
            }
        }
    }

    async fn node_state(&self) -> Result<Option<NodeConfigState>> {
        self.state_calls.fetch_add(1, Ordering::SeqCst);
        let reply = {
            let mut script = self.states.lock().expect("lock");
            let mut last = self.last.lock().expect("lock");
            if let Some(next) = script.pop_front() {
                *last = next;
            }
            *last
        };
        reply.map_err(|msg| anyhow::anyhow!("{msg}"))
    }
}

// ── Host ──────────────────────────────────────────────────────────────────────

/// Service and filesystem double sharing one ordered call log.
#[derive(Default)]
pub struct FakeHost {
    pub log: Arc<Mutex<Vec<String>>>,
    pub failing: HashSet<&'static str>,
    /// How long `stop_service` takes to return.
    pub stop_delay: Duration,
}

impl FakeHost {
    pub fn failing(steps: &[&'static str]) -> Self {
        Self {
            failing: steps.iter().copied().collect(),
            ..Self::default()
        }
    }

    /// A host whose log is shared with a runtime double.
    pub fn with_log(log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().expect("lock").clone()
    }

    fn record(&self, step: &'static str) -> Result<()> {
        self.log.lock().expect("lock").push(step.to_string());
        if self.failing.contains(step) {
            anyhow::bail!("{step} failed");
        }
        Ok(())
    }
}

impl ServiceControl for FakeHost {
    async fn stop_service(&self) -> Result<()> {
        tokio::time::sleep(self.stop_delay).await;
        self.record("stop")
    }
    async fn start_service(&self) -> Result<()> {
        self.record("start")
    }
}

impl LocalStateStore for FakeHost {
    async fn remove_databases(&self) -> Result<Vec<PathBuf>> {
        self.record("remove_db")?;
        Ok(vec![PathBuf::from("/var/horizon/anax.db")])
    }
    async fn clear_policies(&self) -> Result<usize> {
        self.record("clear_policy")?;
        Ok(2)
    }
}

// ── Container runtime ─────────────────────────────────────────────────────────

/// Connector double. Each `connect` hands out a [`FakeRuntime`] whose drop
/// is counted, so tests can check the connection is always released.
#[derive(Default)]
pub struct FakeConnector {
    pub containers: Vec<ContainerRecord>,
    pub refuse_connect: bool,
    pub fail_list: bool,
    pub fail_remove: HashSet<String>,
    pub fail_prune: bool,
    pub log: Arc<Mutex<Vec<String>>>,
    pub connects: AtomicUsize,
    pub releases: Arc<AtomicUsize>,
}

impl FakeConnector {
    pub fn with(containers: Vec<ContainerRecord>) -> Self {
        Self {
            containers,
            ..Self::default()
        }
    }

    pub fn removed(&self) -> Vec<String> {
        self.log
            .lock()
            .expect("lock")
            .iter()
            .filter_map(|l| l.strip_prefix("remove:").map(str::to_string))
            .collect()
    }

    pub fn prunes(&self) -> usize {
        self.log
            .lock()
            .expect("lock")
            .iter()
            .filter(|l| *l == "prune")
            .count()
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

pub struct FakeRuntime {
    containers: Vec<ContainerRecord>,
    fail_list: bool,
    fail_remove: HashSet<String>,
    fail_prune: bool,
    log: Arc<Mutex<Vec<String>>>,
    releases: Arc<AtomicUsize>,
}

impl Drop for FakeRuntime {
    fn drop(&mut self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

impl ContainerRuntimeConnector for FakeConnector {
    type Runtime = FakeRuntime;

    async fn connect(&self) -> Result<FakeRuntime> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if self.refuse_connect {
            anyhow::bail!("dial unix /var/run/docker.sock: connect: no such file or directory");
        }
        Ok(FakeRuntime {
            containers: self.containers.clone(),
            fail_list: self.fail_list,
            fail_remove: self.fail_remove.clone(),
            fail_prune: self.fail_prune,
            log: Arc::clone(&self.log),
            releases: Arc::clone(&self.releases),
        })
    }
}

impl ContainerRuntime for FakeRuntime {
    async fn list_all(&self) -> Result<Vec<ContainerRecord>> {
        if self.fail_list {
            anyhow::bail!("daemon busy");
        }
        Ok(self.containers.clone())
    }

    async fn remove_force(&self, id: &str) -> Result<()> {
        if self.fail_remove.contains(id) {
            anyhow::bail!("removal of container {id} is already in progress");
        }
        self.log.lock().expect("lock").push(format!("remove:{id}"));
        Ok(())
    }

    async fn prune_networks(&self) -> Result<Vec<String>> {
        if self.fail_prune {
            anyhow::bail!("a prune operation is already running");
        }
        self.log.lock().expect("lock").push("prune".to_string());
        Ok(vec!["svc-net".to_string()])
    }
}

/// A container record carrying the ownership label when `owned`.
pub fn container(id: &str, owned: bool) -> ContainerRecord {
    let mut labels = HashMap::new();
    if owned {
        labels.insert(DEFAULT_OWNERSHIP_LABEL.to_string(), format!("{id}-svc"));
    } else {
        labels.insert("com.example.app".to_string(), id.to_string());
    }
    ContainerRecord {
        id: id.to_string(),
        names: vec![format!("/{id}")],
        labels,
    }
}

// ── Interaction ───────────────────────────────────────────────────────────────

/// Reporter that keeps every line, prefixed with its kind.
#[derive(Default)]
pub struct RecordingReporter {
    pub lines: RefCell<Vec<String>>,
}

impl RecordingReporter {
    pub fn warnings(&self) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter_map(|l| l.strip_prefix("warn: ").map(str::to_string))
            .collect()
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.lines.borrow_mut().push(format!("step: {message}"));
    }
    fn waiting(&self, message: &str) {
        self.lines.borrow_mut().push(format!("wait: {message}"));
    }
    fn success(&self, message: &str) {
        self.lines.borrow_mut().push(format!("ok: {message}"));
    }
    fn warn(&self, message: &str) {
        self.lines.borrow_mut().push(format!("warn: {message}"));
    }
}

/// Prompt double answering a fixed value and counting questions.
pub struct Answer {
    pub value: bool,
    pub asked: AtomicUsize,
}

impl Answer {
    pub fn yes() -> Self {
        Self { value: true, asked: AtomicUsize::new(0) }
    }
    pub fn no() -> Self {
        Self { value: false, asked: AtomicUsize::new(0) }
    }
    pub fn times_asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

impl UserPrompt for Answer {
    fn confirm(&self, _: &str) -> Result<bool> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        Ok(self.value)
    }
}
