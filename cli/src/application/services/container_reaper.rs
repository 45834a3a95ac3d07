//! Application service — remove the node's workload containers.
//!
//! Every container carrying the ownership label is force-removed, including
//! containers of another co-located agent that uses the same label.

use tracing::debug;

use crate::application::ports::{ContainerRuntime, ContainerRuntimeConnector};
use crate::domain::{ReapError, container};

/// What a successful reaper pass removed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReapReport {
    /// Display names of removed containers.
    pub removed: Vec<String>,
    /// Names of pruned networks.
    pub pruned_networks: Vec<String>,
}

/// Remove all containers labelled `label_key`, then prune unused networks.
///
/// The runtime connection is opened here and dropped on every return path.
/// A failed removal does not stop the pass; failures are collected.
///
/// # Errors
///
/// Returns [`ReapError::RuntimeUnavailable`] if the runtime cannot be reached,
/// or [`ReapError::Incomplete`] listing every step that failed.
pub async fn reap_containers(
    connector: &impl ContainerRuntimeConnector,
    label_key: &str,
) -> Result<ReapReport, ReapError> {
    let runtime = connector
        .connect()
        .await
        .map_err(|e| ReapError::RuntimeUnavailable(format!("{e:#}")))?;

    let records = runtime
        .list_all()
        .await
        .map_err(|e| ReapError::Incomplete(vec![format!("unable to list containers, {e:#}")]))?;

    let mut report = ReapReport::default();
    let mut failures = Vec::new();

    for record in container::owned(&records, label_key) {
        let name = record.display_name();
        match runtime.remove_force(&record.id).await {
            Ok(()) => {
                debug!(container = name, "removed service container");
                report.removed.push(name.to_string());
            }
            Err(e) => {
                debug!(container = name, error = %e, "failed to remove service container");
                failures.push(format!("Error deleting container {name}. {e:#}"));
            }
        }
    }

    match runtime.prune_networks().await {
        Ok(pruned) => {
            debug!(count = pruned.len(), "pruned unused networks");
            report.pruned_networks = pruned;
        }
        Err(e) => failures.push(format!("Error pruning networks. {e:#}")),
    }

    if failures.is_empty() {
        Ok(report)
    } else {
        Err(ReapError::Incomplete(failures))
    }
}
