//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Teardown errors ───────────────────────────────────────────────────────────

/// The primary teardown path (agent `DELETE /node`) did not succeed.
///
/// Both variants lead to the same branch in the orchestrator: fall back to a
/// deep clean when requested, otherwise report and stop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TeardownError {
    #[error("{0}")]
    Failed(String),

    #[error("Timeout unregistering the node after {secs}s.")]
    Timeout { secs: u64 },
}

// ── Local cleanup errors ──────────────────────────────────────────────────────

/// Errors from a container reaper pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReapError {
    #[error("Cannot connect to the container runtime: {0}")]
    RuntimeUnavailable(String),

    #[error("{}", .0.join("\n"))]
    Incomplete(Vec<String>),
}

impl ReapError {
    /// Flatten into one message per failed step.
    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        match self {
            Self::RuntimeUnavailable(_) => vec![self.to_string()],
            Self::Incomplete(failures) => failures,
        }
    }
}

/// One or more deep-clean steps failed. Every step was still attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CleanupError {
    #[error("Deep clean finished with errors:\n{}", .0.join("\n"))]
    Partial(Vec<String>),
}

impl CleanupError {
    #[must_use]
    pub fn messages(&self) -> &[String] {
        match self {
            Self::Partial(messages) => messages,
        }
    }
}

// ── Orchestration errors ──────────────────────────────────────────────────────

/// The node never reported `unconfigured` within the polling budget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Timeout waiting for node change to 'unconfigured' state after {secs}s.")]
pub struct ConvergenceTimeout {
    pub secs: u64,
}

/// Fatal outcomes of an unregister run.
#[derive(Debug, Error)]
pub enum UnregisterError {
    #[error(transparent)]
    Convergence(#[from] ConvergenceTimeout),

    #[error("Interrupted.")]
    Interrupted,

    #[error("Confirmation prompt failed: {0}")]
    Prompt(String),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid agent URL '{0}': must start with http:// or https://")]
    InvalidAgentUrl(String),

    #[error("Invalid value for {key}: must be greater than zero")]
    ZeroDuration { key: &'static str },

    #[error("Invalid value for {key}: must not be empty")]
    Empty { key: &'static str },
}
