//! HTTP client for the local node agent's REST API.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::StatusCode;

use crate::application::ports::AgentApi;
use crate::domain::{NodeConfigState, NodeInfo, TeardownOptions};

/// `AgentApi` over HTTP using `reqwest`.
///
/// The teardown `DELETE` carries no client-side timeout; its deadline is
/// enforced by the caller.
#[derive(Clone)]
pub struct HttpAgentClient {
    client: reqwest::Client,
    base_url: String,
    query_timeout: Duration,
}

impl HttpAgentClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, query_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("edgenode/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            query_timeout,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

impl AgentApi for HttpAgentClient {
    fn delete_node(
        &self,
        opts: TeardownOptions,
    ) -> impl std::future::Future<Output = Result<()>> + Send {
        let url = self.url(&opts.request_path());
        let request = self.client.delete(&url);
        async move {
            tracing::debug!(%url, "DELETE");
            let resp = request
                .send()
                .await
                .with_context(|| format!("DELETE {url}"))?;
            let status = resp.status();
            if status == StatusCode::OK || status == StatusCode::NO_CONTENT {
                return Ok(());
            }
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!(
                "Bad HTTP code {} from DELETE {url}: {}",
                status.as_u16(),
                body.trim()
            )
        }
    }

    fn node_state(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<NodeConfigState>>> + Send {
        let url = self.url("node");
        let request = self.client.get(&url).timeout(self.query_timeout);
        async move {
            let resp = request.send().await.with_context(|| format!("GET {url}"))?;
            let status = resp.status();
            if status != StatusCode::OK {
                anyhow::bail!("Bad HTTP code {} from GET {url}", status.as_u16());
            }
            let info: NodeInfo = resp
                .json()
                .await
                .with_context(|| format!("decoding GET {url} response"))?;
            Ok(info.config_state())
        }
    }
}
