//! Node agent domain types: configuration state and API wire shapes.
//!
//! Pure types only — no I/O, no async.

use std::fmt;

use serde::Deserialize;

/// Configuration state reported by the local node agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeConfigState {
    Configuring,
    Configured,
    Unconfiguring,
    Unconfigured,
    /// Any value the agent reports that is not one of the above.
    Unknown,
}

impl NodeConfigState {
    /// Map the agent's `config.state` string to a state.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "configuring" => Self::Configuring,
            "configured" => Self::Configured,
            "unconfiguring" => Self::Unconfiguring,
            "unconfigured" => Self::Unconfigured,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configuring => "configuring",
            Self::Configured => "configured",
            Self::Unconfiguring => "unconfiguring",
            Self::Unconfigured => "unconfigured",
            Self::Unknown => "unknown",
        }
    }

    /// The terminal state an unregister run converges to.
    #[must_use]
    pub fn is_unconfigured(self) -> bool {
        self == Self::Unconfigured
    }
}

impl fmt::Display for NodeConfigState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of the agent's `GET /node` response. Only the fields read here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeInfo {
    #[serde(default)]
    pub config: Option<NodeConfig>,
}

/// The `config` object nested in [`NodeInfo`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeConfig {
    #[serde(default)]
    pub state: Option<String>,
}

impl NodeInfo {
    /// The reported state, or `None` when `config` or `config.state` is absent.
    #[must_use]
    pub fn config_state(&self) -> Option<NodeConfigState> {
        self.config
            .as_ref()
            .and_then(|c| c.state.as_deref())
            .map(NodeConfigState::parse)
    }
}

/// Modifiers for the agent's `DELETE /node` request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeardownOptions {
    /// Also delete the node record from the remote registry.
    pub remove_node: bool,
    /// Ask the agent to perform its own deep clean.
    pub deep_clean: bool,
}

impl TeardownOptions {
    /// Relative request path including the query string.
    ///
    /// `block=true` is always set so the agent answers only after teardown.
    #[must_use]
    pub fn request_path(&self) -> String {
        let mut path = String::from("node?block=true");
        if self.remove_node {
            path.push_str("&removeNode=true");
        }
        if self.deep_clean {
            path.push_str("&deepClean=true");
        }
        path
    }
}
