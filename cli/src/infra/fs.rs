//! Filesystem infrastructure — implements `LocalStateStore` for the node
//! agent's database and policy files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::LocalStateStore;
use crate::domain::config::HostConfig;

/// The agent's on-disk state under fixed host paths.
pub struct HostStateStore {
    db_dir: PathBuf,
    db_extension: String,
    policy_dir: PathBuf,
}

impl HostStateStore {
    #[must_use]
    pub fn new(db_dir: PathBuf, db_extension: impl Into<String>, policy_dir: PathBuf) -> Self {
        Self {
            db_dir,
            db_extension: db_extension.into(),
            policy_dir,
        }
    }

    #[must_use]
    pub fn from_config(host: &HostConfig) -> Self {
        Self::new(
            PathBuf::from(&host.db_dir),
            host.db_extension.clone(),
            PathBuf::from(&host.policy_dir),
        )
    }
}

impl LocalStateStore for HostStateStore {
    async fn remove_databases(&self) -> Result<Vec<PathBuf>> {
        let dir = self.db_dir.clone();
        let ext = self.db_extension.clone();
        tokio::task::spawn_blocking(move || remove_files_with_extension(&dir, &ext))
            .await
            .context("spawn_blocking for remove_databases")?
    }

    async fn clear_policies(&self) -> Result<usize> {
        let dir = self.policy_dir.clone();
        tokio::task::spawn_blocking(move || clear_dir(&dir))
            .await
            .context("spawn_blocking for clear_policies")?
    }
}

/// Remove regular files directly in `dir` whose extension is `ext`.
/// A missing directory has nothing to remove.
fn remove_files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let matching = list_dir(dir)?
        .into_iter()
        .filter(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some(ext))
        .collect();
    remove_each(matching, |p| std::fs::remove_file(p))
}

/// Remove everything inside `dir`, keeping `dir` itself.
fn clear_dir(dir: &Path) -> Result<usize> {
    remove_each(list_dir(dir)?, remove_entry).map(|removed| removed.len())
}

fn list_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    std::fs::read_dir(dir)
        .with_context(|| format!("reading {}", dir.display()))?
        .map(|entry| {
            entry
                .map(|e| e.path())
                .with_context(|| format!("reading {}", dir.display()))
        })
        .collect()
}

fn remove_entry(path: &Path) -> std::io::Result<()> {
    if path.is_dir() && !path.is_symlink() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    }
}

/// Attempt `remove` on every path. One failure does not stop the rest; all
/// failures come back together in a single error, one path per line.
fn remove_each(
    paths: Vec<PathBuf>,
    mut remove: impl FnMut(&Path) -> std::io::Result<()>,
) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::with_capacity(paths.len());
    let mut failures = Vec::new();
    for path in paths {
        match remove(&path) {
            Ok(()) => removed.push(path),
            Err(e) => failures.push(format!("removing {}: {e}", path.display())),
        }
    }
    if !failures.is_empty() {
        anyhow::bail!("{}", failures.join("\n"));
    }
    Ok(removed)
}
