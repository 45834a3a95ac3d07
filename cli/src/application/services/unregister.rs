//! Application service — node unregister use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    AgentApi, ContainerRuntimeConnector, LocalStateStore, ProgressReporter, ServiceControl,
    UserPrompt,
};
use crate::application::services::deep_clean::{DeepCleanPorts, deep_clean};
use crate::application::services::state_poller::{PollSettings, await_unconfigured};
use crate::application::services::teardown::bounded_teardown;
use crate::domain::{
    CleanupOutcome, EdgeNodeConfig, UnregisterError, UnregisterPhase, UnregisterRequest,
};

/// Collaborators of an unregister run.
pub struct UnregisterPorts<'a, A, S, L, C, P> {
    pub agent: &'a Arc<A>,
    pub service: &'a S,
    pub store: &'a L,
    pub runtime: &'a C,
    pub prompt: &'a P,
}

/// Deadlines and identifiers for an unregister run.
#[derive(Debug, Clone)]
pub struct UnregisterSettings {
    pub teardown_timeout: Duration,
    pub poll: PollSettings,
    pub ownership_label: String,
}

impl UnregisterSettings {
    #[must_use]
    pub fn from_config(config: &EdgeNodeConfig) -> Self {
        Self {
            teardown_timeout: config.agent.teardown_timeout(),
            poll: PollSettings {
                budget: config.agent.convergence_timeout(),
                interval: config.agent.poll_interval(),
                query_timeout: config.agent.query_timeout(),
            },
            ownership_label: config.containers.ownership_label.clone(),
        }
    }
}

/// Unregister this node and reset it so it can be registered again.
///
/// Only a convergence timeout, an interrupt, or a failed prompt is fatal.
/// Teardown and cleanup failures are reported through `reporter` and
/// collected in the returned outcome.
///
/// `interrupt` is honoured only while waiting on the agent, during the
/// teardown call and while polling. A teardown request already sent is left
/// running. A deep clean that has started always runs to the end, so the
/// agent service is never left stopped.
///
/// # Errors
///
/// Returns [`UnregisterError::Convergence`] if the node never reports
/// `unconfigured`, [`UnregisterError::Interrupted`] if `interrupt` completes
/// while waiting, or [`UnregisterError::Prompt`] if confirmation fails.
pub async fn unregister<A, S, L, C, P>(
    request: UnregisterRequest,
    ports: &UnregisterPorts<'_, A, S, L, C, P>,
    settings: &UnregisterSettings,
    reporter: &impl ProgressReporter,
    interrupt: impl Future<Output = ()>,
) -> Result<CleanupOutcome, UnregisterError>
where
    A: AgentApi + 'static,
    S: ServiceControl,
    L: LocalStateStore,
    C: ContainerRuntimeConnector,
    P: UserPrompt,
{
    tokio::pin!(interrupt);
    let mut outcome = CleanupOutcome::default();

    if !request.force_confirm {
        let confirmed = ports
            .prompt
            .confirm("Are you sure you want to unregister this node?")
            .map_err(|e| UnregisterError::Prompt(format!("{e:#}")))?;
        if !confirmed {
            outcome.advance(UnregisterPhase::Cancelled);
            return Ok(outcome);
        }
    }

    reporter.step(
        "Unregistering this node, cancelling all agreements, stopping all workloads, \
         and restarting the node agent...",
    );
    let teardown = tokio::select! {
        biased;
        () = &mut interrupt => {
            tracing::debug!("interrupted while waiting for the node agent teardown");
            return Err(UnregisterError::Interrupted);
        }
        result = bounded_teardown(
            ports.agent,
            request.teardown_options(),
            settings.teardown_timeout,
        ) => result,
    };
    outcome.advance(UnregisterPhase::TeardownAttempted);
    match teardown {
        Ok(()) => outcome.primary_succeeded = true,
        Err(e) => record_warning(&mut outcome, reporter, e.to_string()),
    }

    if !outcome.primary_succeeded && request.deep_clean {
        outcome.deep_clean_attempted = true;
        let cleanup = DeepCleanPorts {
            service: ports.service,
            store: ports.store,
            runtime: ports.runtime,
        };
        if let Err(e) = deep_clean(&cleanup, &settings.ownership_label, reporter).await {
            for message in e.messages() {
                record_warning(&mut outcome, reporter, message.clone());
            }
            outcome.deep_clean_errors = e.messages().to_vec();
        }
        outcome.advance(UnregisterPhase::DeepCleanAttempted);
    } else {
        outcome.advance(UnregisterPhase::Skipped);
    }

    if !outcome.should_poll() {
        record_warning(
            &mut outcome,
            reporter,
            "The node agent did not confirm the teardown; skipping the configuration \
             state check. Re-run with --deep-clean to clean up locally."
                .to_string(),
        );
        outcome.advance(UnregisterPhase::Abandoned);
        return Ok(outcome);
    }

    outcome.advance(UnregisterPhase::Polling);
    reporter.waiting("Checking the node configuration state...");
    let polled = tokio::select! {
        biased;
        () = &mut interrupt => {
            tracing::debug!("interrupted while polling the node configuration state");
            return Err(UnregisterError::Interrupted);
        }
        polled = await_unconfigured(ports.agent.as_ref(), settings.poll) => polled,
    };
    match polled {
        Ok(()) => {
            outcome.converged = true;
            outcome.advance(UnregisterPhase::Converged);
            reporter.success("Node unregistered. It may now be registered again, if desired.");
            Ok(outcome)
        }
        Err(e) => {
            outcome.advance(UnregisterPhase::TimedOut);
            Err(e.into())
        }
    }
}

fn record_warning(outcome: &mut CleanupOutcome, reporter: &impl ProgressReporter, msg: String) {
    tracing::debug!(%msg, "unregister warning");
    reporter.warn(&msg);
    outcome.warnings.push(msg);
}
