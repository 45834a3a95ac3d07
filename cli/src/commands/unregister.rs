//! `edgenode unregister` — tear down this node's registration and reset it.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::unregister::{
    UnregisterPorts, UnregisterSettings, unregister,
};
use crate::domain::{CleanupOutcome, UnregisterError, UnregisterPhase, UnregisterRequest};
use crate::infra::agent::HttpAgentClient;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::docker::DockerConnector;
use crate::infra::fs::HostStateStore;
use crate::infra::service::SystemdService;
use crate::output::json;

/// Exit status for a run that never converged.
const EXIT_GENERAL_ERROR: u8 = 1;
/// Exit status after Ctrl-C (128 + SIGINT).
const EXIT_INTERRUPTED: u8 = 130;

/// Arguments for the unregister command.
#[derive(Args, Debug, Default)]
pub struct UnregisterArgs {
    /// Skip the 'Are you sure?' prompt
    #[arg(short, long)]
    pub force: bool,

    /// Also remove the node record from the management hub
    #[arg(short = 'r', long)]
    pub remove_node: bool,

    /// Clean up local agent state and workload containers if the agent
    /// cannot tear down cleanly
    #[arg(short = 'D', long)]
    pub deep_clean: bool,
}

impl From<&UnregisterArgs> for UnregisterRequest {
    fn from(args: &UnregisterArgs) -> Self {
        Self {
            force_confirm: args.force,
            remove_node_record: args.remove_node,
            deep_clean: args.deep_clean,
        }
    }
}

/// Run `edgenode unregister`.
///
/// # Errors
///
/// Returns an error if the agent client cannot be built or the confirmation
/// prompt fails. A convergence timeout or an interrupt is reported here and
/// mapped to its exit status.
pub async fn run(app: &AppContext, args: &UnregisterArgs) -> Result<ExitCode> {
    let config = &app.config;
    let agent = Arc::new(HttpAgentClient::new(
        &config.agent.url,
        config.agent.query_timeout(),
    )?);
    let service = SystemdService::new(TokioCommandRunner::default(), config.host.service.clone());
    let store = HostStateStore::from_config(&config.host);
    let runtime = DockerConnector;
    let ports = UnregisterPorts {
        agent: &agent,
        service: &service,
        store: &store,
        runtime: &runtime,
        prompt: app,
    };
    let settings = UnregisterSettings::from_config(config);
    let reporter = app.terminal_reporter();

    tracing::debug!(agent = %config.agent.url, ?args, "starting unregister");

    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::debug!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    let result = unregister(
        UnregisterRequest::from(args),
        &ports,
        &settings,
        &reporter,
        interrupt,
    )
    .await;
    drop(reporter);

    match result {
        Ok(outcome) => {
            render_outcome(app, &outcome)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e @ UnregisterError::Prompt(_)) => Err(e.into()),
        Err(e) => {
            let (code, status) = exit_status(&e);
            if app.is_json() {
                println!("{}", json::format_error(&e.to_string(), code)?);
            } else {
                app.output.error(&e.to_string());
            }
            Ok(ExitCode::from(status))
        }
    }
}

/// JSON error code and process exit status for a fatal run error.
fn exit_status(e: &UnregisterError) -> (&'static str, u8) {
    match e {
        UnregisterError::Interrupted => ("interrupted", EXIT_INTERRUPTED),
        UnregisterError::Convergence(_) => ("convergence_timeout", EXIT_GENERAL_ERROR),
        UnregisterError::Prompt(_) => ("prompt_failed", EXIT_GENERAL_ERROR),
    }
}

fn render_outcome(app: &AppContext, outcome: &CleanupOutcome) -> Result<()> {
    if app.is_json() {
        println!("{}", json::format_outcome(outcome)?);
        return Ok(());
    }
    if outcome.phase == UnregisterPhase::Cancelled {
        app.output.info("Cancelled.");
    }
    Ok(())
}
