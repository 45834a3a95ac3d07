//! Application service — erase the node agent's local state.

use crate::application::ports::{LocalStateStore, ProgressReporter, ServiceControl};

/// Stop the agent service, then delete its databases and policy files.
///
/// Best-effort: each step runs even if an earlier one failed. Failure
/// messages are appended to `errors` in step order.
pub async fn erase_local_state(
    service: &impl ServiceControl,
    store: &impl LocalStateStore,
    reporter: &impl ProgressReporter,
    errors: &mut Vec<String>,
) {
    tracing::debug!("stopping node agent service");
    if let Err(e) = service.stop_service().await {
        errors.push(format!("Error stopping the node agent service. {e:#}"));
    }

    reporter.step("Deleting local node agent database...");
    match store.remove_databases().await {
        Ok(paths) => tracing::debug!(count = paths.len(), "removed database files"),
        Err(e) => errors.push(format!("Error deleting the local database. {e:#}")),
    }

    match store.clear_policies().await {
        Ok(count) => tracing::debug!(count, "removed policy files"),
        Err(e) => errors.push(format!("Error deleting local policy files. {e:#}")),
    }
}
