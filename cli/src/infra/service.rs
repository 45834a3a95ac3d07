//! Infrastructure implementation of the `ServiceControl` port via `systemctl`.

use anyhow::Result;

use crate::application::ports::{CommandRunner, ServiceControl};

/// Controls the node agent's systemd unit.
pub struct SystemdService<R> {
    runner: R,
    unit: String,
}

impl<R: CommandRunner> SystemdService<R> {
    #[must_use]
    pub fn new(runner: R, unit: impl Into<String>) -> Self {
        Self {
            runner,
            unit: unit.into(),
        }
    }

    async fn systemctl(&self, action: &str) -> Result<()> {
        let output = self.runner.run("systemctl", &[action, self.unit.as_str()]).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("systemctl {action} {} failed: {}", self.unit, stderr.trim());
        }
        Ok(())
    }
}

impl<R: CommandRunner> ServiceControl for SystemdService<R> {
    async fn stop_service(&self) -> Result<()> {
        self.systemctl("stop").await
    }

    async fn start_service(&self) -> Result<()> {
        self.systemctl("start").await
    }
}
