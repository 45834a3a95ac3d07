//! Unregister run model: request, phases, and the per-run outcome.
//!
//! Built and discarded within one invocation; nothing here is persisted.

use serde::Serialize;

use crate::domain::node::TeardownOptions;

/// Immutable input for one unregister run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnregisterRequest {
    /// Skip the interactive confirmation.
    pub force_confirm: bool,
    /// Also remove the node record from the registry.
    pub remove_node_record: bool,
    /// Fall back to a local deep clean if the agent cannot tear down.
    pub deep_clean: bool,
}

impl UnregisterRequest {
    #[must_use]
    pub fn teardown_options(&self) -> TeardownOptions {
        TeardownOptions {
            remove_node: self.remove_node_record,
            deep_clean: self.deep_clean,
        }
    }
}

/// Where a run is, or where it ended.
///
/// `Start → TeardownAttempted → {DeepCleanAttempted | Skipped} → Polling →
/// {Converged | TimedOut}`. A declined prompt ends in `Cancelled`; a failed
/// teardown with no deep-clean fallback ends in `Abandoned` without polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnregisterPhase {
    Start,
    Cancelled,
    TeardownAttempted,
    DeepCleanAttempted,
    Skipped,
    Polling,
    Converged,
    TimedOut,
    Abandoned,
}

impl UnregisterPhase {
    /// Whether `next` is a legal successor of `self`.
    #[must_use]
    pub fn can_advance_to(self, next: Self) -> bool {
        use UnregisterPhase::{
            Abandoned, Cancelled, Converged, DeepCleanAttempted, Polling, Skipped, Start,
            TeardownAttempted, TimedOut,
        };
        matches!(
            (self, next),
            (Start, Cancelled | TeardownAttempted)
                | (TeardownAttempted, DeepCleanAttempted | Skipped)
                | (DeepCleanAttempted | Skipped, Polling | Abandoned)
                | (Polling, Converged | TimedOut)
        )
    }
}

/// Accumulated result of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupOutcome {
    pub primary_succeeded: bool,
    pub deep_clean_attempted: bool,
    pub deep_clean_errors: Vec<String>,
    pub converged: bool,
    /// Non-fatal problems, in the order they were reported.
    pub warnings: Vec<String>,
    pub phase: UnregisterPhase,
}

impl Default for CleanupOutcome {
    fn default() -> Self {
        Self {
            primary_succeeded: false,
            deep_clean_attempted: false,
            deep_clean_errors: Vec::new(),
            converged: false,
            warnings: Vec::new(),
            phase: UnregisterPhase::Start,
        }
    }
}

impl CleanupOutcome {
    /// Move to `next`. Illegal transitions are a programming error.
    pub fn advance(&mut self, next: UnregisterPhase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "illegal unregister transition {:?} -> {next:?}",
            self.phase
        );
        self.phase = next;
    }

    /// `true` when polling should run: the agent tore the node down, or a
    /// deep clean was attempted in its place. Partial deep-clean failures do
    /// not block polling; the polled state is the final word.
    #[must_use]
    pub fn should_poll(&self) -> bool {
        self.primary_succeeded || self.deep_clean_attempted
    }
}
