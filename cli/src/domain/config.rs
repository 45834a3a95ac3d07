//! Domain types and validators for edgenode configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::container::DEFAULT_OWNERSHIP_LABEL;
use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

/// Environment variable that overrides `agent.url`.
pub const AGENT_URL_ENV: &str = "EDGENODE_AGENT_URL";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.edgenode/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct EdgeNodeConfig {
    pub agent: AgentConfig,
    pub host: HostConfig,
    pub containers: ContainerConfig,
}

/// Local node agent API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AgentConfig {
    /// Base URL of the agent's REST API.
    pub url: String,
    /// Deadline for the blocking `DELETE /node` call.
    pub teardown_timeout_secs: u64,
    /// Budget for waiting on the `unconfigured` state.
    pub convergence_timeout_secs: u64,
    /// Delay between state polls.
    pub poll_interval_secs: u64,
    /// Per-request timeout for `GET /node`.
    pub query_timeout_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8510".to_string(),
            teardown_timeout_secs: 180,
            convergence_timeout_secs: 180,
            poll_interval_secs: 3,
            query_timeout_secs: 30,
        }
    }
}

impl AgentConfig {
    #[must_use]
    pub fn teardown_timeout(&self) -> Duration {
        Duration::from_secs(self.teardown_timeout_secs)
    }

    #[must_use]
    pub fn convergence_timeout(&self) -> Duration {
        Duration::from_secs(self.convergence_timeout_secs)
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    #[must_use]
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

/// Host-side locations touched by a deep clean.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HostConfig {
    /// systemd unit running the node agent.
    pub service: String,
    /// Directory holding the agent's database files.
    pub db_dir: String,
    /// Extension (without dot) of the database files to delete.
    pub db_extension: String,
    /// Directory whose contents are the node's on-disk policies.
    pub policy_dir: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            service: "horizon.service".to_string(),
            db_dir: "/var/horizon".to_string(),
            db_extension: "db".to_string(),
            policy_dir: "/etc/horizon/policy.d".to_string(),
        }
    }
}

/// Container runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContainerConfig {
    /// Label key marking containers owned by the node agent.
    pub ownership_label: String,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            ownership_label: DEFAULT_OWNERSHIP_LABEL.to_string(),
        }
    }
}

// ── Overrides and validation ─────────────────────────────────────────────────

impl EdgeNodeConfig {
    /// Apply environment overrides. `lookup` is `std::env::var(..).ok()` in
    /// production.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(AGENT_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.agent.url = url.trim().to_string();
        }
        self
    }

    /// Validate values that would make an unregister run meaningless.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.agent.url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidAgentUrl(url.clone()));
        }
        for (key, value) in [
            ("agent.teardown_timeout_secs", self.agent.teardown_timeout_secs),
            ("agent.convergence_timeout_secs", self.agent.convergence_timeout_secs),
            ("agent.poll_interval_secs", self.agent.poll_interval_secs),
            ("agent.query_timeout_secs", self.agent.query_timeout_secs),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroDuration { key });
            }
        }
        for (key, value) in [
            ("host.service", &self.host.service),
            ("host.db_dir", &self.host.db_dir),
            ("host.db_extension", &self.host.db_extension),
            ("host.policy_dir", &self.host.policy_dir),
            ("containers.ownership_label", &self.containers.ownership_label),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty { key });
            }
        }
        Ok(())
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
