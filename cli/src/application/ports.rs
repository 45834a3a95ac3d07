//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::future::Future;
use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{ContainerRecord, EdgeNodeConfig, NodeConfigState, TeardownOptions};

// ── Node Agent Port ───────────────────────────────────────────────────────────

/// The local node agent's REST API.
///
/// Futures are `Send` so the teardown call can run on its own task while the
/// caller races it against a deadline.
pub trait AgentApi: Send + Sync {
    /// `DELETE /node?block=true[...]`. `Ok` only for 200/204.
    fn delete_node(&self, opts: TeardownOptions) -> impl Future<Output = Result<()>> + Send;

    /// `GET /node`. `Ok(None)` when the body has no `config.state`.
    fn node_state(&self) -> impl Future<Output = Result<Option<NodeConfigState>>> + Send;
}

// ── Container Runtime Ports ───────────────────────────────────────────────────

/// An open connection to the container runtime. Released on drop.
#[allow(async_fn_in_trait)]
pub trait ContainerRuntime {
    /// List every container, including stopped ones.
    async fn list_all(&self) -> Result<Vec<ContainerRecord>>;
    /// Force-remove a container together with its anonymous volumes.
    async fn remove_force(&self, id: &str) -> Result<()>;
    /// Remove networks no container uses. Returns the removed network names.
    async fn prune_networks(&self) -> Result<Vec<String>>;
}

/// Opens a [`ContainerRuntime`] connection over the runtime's local socket.
#[allow(async_fn_in_trait)]
pub trait ContainerRuntimeConnector {
    type Runtime: ContainerRuntime;

    /// # Errors
    ///
    /// Returns an error if the runtime is not reachable.
    async fn connect(&self) -> Result<Self::Runtime>;
}

// ── Host Ports ────────────────────────────────────────────────────────────────

/// Stop/start of the node agent's background service.
#[allow(async_fn_in_trait)]
pub trait ServiceControl {
    async fn stop_service(&self) -> Result<()>;
    async fn start_service(&self) -> Result<()>;
}

/// The agent's persisted state on the local filesystem.
#[allow(async_fn_in_trait)]
pub trait LocalStateStore {
    /// Delete the agent's database files. Returns the deleted paths.
    async fn remove_databases(&self) -> Result<Vec<PathBuf>>;
    /// Delete everything inside the policy directory, keeping the directory.
    /// Returns the number of entries removed.
    async fn clear_policies(&self) -> Result<usize>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Interaction Ports ─────────────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a message for a wait of unknown length (may render as a spinner
    /// until the next call).
    fn waiting(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

/// Asks the user to confirm a destructive action.
pub trait UserPrompt {
    /// # Errors
    ///
    /// Returns an error if no answer can be obtained (e.g. no TTY).
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Abstracts loading the CLI configuration.
pub trait ConfigStore {
    /// Load the effective configuration (file, defaults, env overrides).
    fn load(&self) -> Result<EdgeNodeConfig>;
    /// Path of the configuration file, whether or not it exists.
    fn path(&self) -> Result<PathBuf>;
}
