//! Container runtime adapter backed by the Docker Engine API (`bollard`).

use anyhow::{Context, Result};
use bollard::Docker;
use bollard::container::{ListContainersOptions, RemoveContainerOptions};
use bollard::models::ContainerSummary;
use bollard::network::PruneNetworksOptions;

use crate::application::ports::{ContainerRuntime, ContainerRuntimeConnector};
use crate::domain::ContainerRecord;

/// Opens connections over the runtime's local socket.
#[derive(Debug, Default, Clone, Copy)]
pub struct DockerConnector;

impl ContainerRuntimeConnector for DockerConnector {
    type Runtime = DockerRuntime;

    async fn connect(&self) -> Result<DockerRuntime> {
        let docker = Docker::connect_with_local_defaults()
            .context("opening container runtime socket")?;
        docker.ping().await.context("pinging container runtime")?;
        tracing::debug!("connected to container runtime");
        Ok(DockerRuntime { docker })
    }
}

/// One open runtime connection. The underlying client is released on drop.
pub struct DockerRuntime {
    docker: Docker,
}

fn to_record(summary: ContainerSummary) -> Option<ContainerRecord> {
    Some(ContainerRecord {
        id: summary.id?,
        names: summary.names.unwrap_or_default(),
        labels: summary.labels.unwrap_or_default(),
    })
}

impl ContainerRuntime for DockerRuntime {
    async fn list_all(&self) -> Result<Vec<ContainerRecord>> {
        let options = ListContainersOptions::<String> {
            all: true,
            ..Default::default()
        };
        let summaries = self
            .docker
            .list_containers(Some(options))
            .await
            .context("listing containers")?;
        Ok(summaries.into_iter().filter_map(to_record).collect())
    }

    async fn remove_force(&self, id: &str) -> Result<()> {
        let options = RemoveContainerOptions {
            force: true,
            v: true,
            ..Default::default()
        };
        self.docker
            .remove_container(id, Some(options))
            .await
            .with_context(|| format!("removing container {id}"))
    }

    async fn prune_networks(&self) -> Result<Vec<String>> {
        let resp = self
            .docker
            .prune_networks(None::<PruneNetworksOptions<String>>)
            .await
            .context("pruning networks")?;
        Ok(resp.networks_deleted.unwrap_or_default())
    }
}
