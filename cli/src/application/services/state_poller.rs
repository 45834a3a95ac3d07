//! Application service — wait for the node to report `unconfigured`.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::application::ports::AgentApi;
use crate::domain::ConvergenceTimeout;

/// Polling cadence and limits.
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    /// Total time allowed before giving up.
    pub budget: Duration,
    /// Delay between polls.
    pub interval: Duration,
    /// Limit for a single state query.
    pub query_timeout: Duration,
}

/// Poll the agent until it reports `unconfigured` or `budget` elapses.
///
/// A failed or slow query counts as "not yet converged": the agent is often
/// restarting while this runs.
///
/// # Errors
///
/// Returns [`ConvergenceTimeout`] once `budget` has elapsed without observing
/// `unconfigured`.
pub async fn await_unconfigured(
    agent: &impl AgentApi,
    settings: PollSettings,
) -> Result<(), ConvergenceTimeout> {
    let started = Instant::now();

    let mut remaining = settings.budget;
    while !remaining.is_zero() {
        let limit = settings.query_timeout.min(remaining);
        match tokio::time::timeout(limit, agent.node_state()).await {
            Ok(Ok(Some(state))) => {
                debug!(%state, "node configuration state");
                if state.is_unconfigured() {
                    return Ok(());
                }
            }
            Ok(Ok(None)) => debug!("node configuration state not reported"),
            Ok(Err(e)) => debug!(error = %format!("{e:#}"), "node state query failed"),
            Err(_) => debug!("node state query timed out"),
        }
        remaining = settings.budget.saturating_sub(started.elapsed());
        tokio::time::sleep(settings.interval.min(remaining)).await;
        remaining = settings.budget.saturating_sub(started.elapsed());
    }

    Err(ConvergenceTimeout {
        secs: settings.budget.as_secs(),
    })
}
