//! Infrastructure implementation of the `ConfigStore` port.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::application::ports::ConfigStore;
use crate::domain::config::EdgeNodeConfig;

/// Environment variable that points at an alternate config file.
pub const CONFIG_PATH_ENV: &str = "EDGENODE_CONFIG";

/// Production implementation of `ConfigStore` that uses a YAML file on disk.
pub struct YamlConfigStore;

impl YamlConfigStore {
    /// Parse a config document, then apply env overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is not valid YAML for the schema or a
    /// setting fails validation.
    pub fn parse(
        content: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<EdgeNodeConfig> {
        let config: EdgeNodeConfig = if content.trim().is_empty() {
            EdgeNodeConfig::default()
        } else {
            serde_yaml::from_str(content)?
        };
        let config = config.with_env_overrides(lookup);
        config.validate()?;
        Ok(config)
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<EdgeNodeConfig> {
        let path = self.path()?;
        let content = if path.exists() {
            std::fs::read_to_string(&path)
                .with_context(|| format!("cannot read {}", path.display()))?
        } else {
            String::new()
        };
        Self::parse(&content, |key| std::env::var(key).ok())
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    fn path(&self) -> Result<PathBuf> {
        if let Ok(val) = std::env::var(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".edgenode").join("config.yaml"))
    }
}
