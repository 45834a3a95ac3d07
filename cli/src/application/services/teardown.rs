//! Application service — bounded agent teardown.
//!
//! The `DELETE /node` call runs on its own task and is raced against a
//! deadline. When the deadline wins the task is detached, not aborted: the
//! agent may still finish the teardown later.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::application::ports::AgentApi;
use crate::domain::{TeardownError, TeardownOptions};

/// Ask the agent to stop all workloads and reset its configuration, waiting
/// at most `deadline` for the answer.
///
/// # Errors
///
/// Returns [`TeardownError::Failed`] for any non-success answer and
/// [`TeardownError::Timeout`] when `deadline` elapses first.
pub async fn bounded_teardown<A>(
    agent: &Arc<A>,
    opts: TeardownOptions,
    deadline: Duration,
) -> Result<(), TeardownError>
where
    A: AgentApi + 'static,
{
    let agent = Arc::clone(agent);
    let call = tokio::spawn(async move { agent.delete_node(opts).await });

    tokio::select! {
        joined = call => match joined {
            Ok(Ok(())) => {
                debug!(path = %opts.request_path(), "node delete call successful");
                Ok(())
            }
            Ok(Err(e)) => Err(TeardownError::Failed(format!("{e:#}"))),
            Err(e) => Err(TeardownError::Failed(format!("node delete call aborted: {e}"))),
        },
        () = tokio::time::sleep(deadline) => {
            debug!(secs = deadline.as_secs(), "node delete call still pending, no longer waiting");
            Err(TeardownError::Timeout { secs: deadline.as_secs() })
        }
    }
}
