//! Application service — destructive local fallback cleanup.
//!
//! Used when the agent could not tear the node down itself. The goal is to
//! get back to a clean state, so no step short-circuits the others.

use crate::application::ports::{
    ContainerRuntimeConnector, LocalStateStore, ProgressReporter, ServiceControl,
};
use crate::application::services::container_reaper::reap_containers;
use crate::application::services::local_state::erase_local_state;
use crate::domain::CleanupError;

/// Host-side collaborators of a deep clean.
pub struct DeepCleanPorts<'a, S, L, C> {
    pub service: &'a S,
    pub store: &'a L,
    pub runtime: &'a C,
}

/// Stop the agent, delete its databases and policies, remove its workload
/// containers, and start it again.
///
/// # Errors
///
/// Returns [`CleanupError::Partial`] with one message per failed step. All
/// steps were attempted regardless.
pub async fn deep_clean<S, L, C>(
    ports: &DeepCleanPorts<'_, S, L, C>,
    ownership_label: &str,
    reporter: &impl ProgressReporter,
) -> Result<(), CleanupError>
where
    S: ServiceControl,
    L: LocalStateStore,
    C: ContainerRuntimeConnector,
{
    reporter.step("Starting external deep clean...");
    let mut errors = Vec::new();

    erase_local_state(ports.service, ports.store, reporter, &mut errors).await;

    reporter.step("Deleting service containers...");
    match reap_containers(ports.runtime, ownership_label).await {
        Ok(report) => tracing::debug!(
            removed = report.removed.len(),
            networks = report.pruned_networks.len(),
            "service containers removed"
        ),
        Err(e) => errors.extend(e.into_messages()),
    }

    reporter.step("Starting the node agent service...");
    if let Err(e) = ports.service.start_service().await {
        errors.push(format!("Error starting the node agent service. {e:#}"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(CleanupError::Partial(errors))
    }
}
