//! Workload container records as reported by the container runtime.

use std::collections::HashMap;

/// Label key the node agent sets on every workload container it starts.
pub const DEFAULT_OWNERSHIP_LABEL: &str = "openhorizon.anax.service_name";

/// A container as listed by the runtime. Read fresh on every cleanup pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerRecord {
    pub id: String,
    pub names: Vec<String>,
    pub labels: HashMap<String, String>,
}

impl ContainerRecord {
    /// `true` when the record carries `label_key`, whatever its value.
    #[must_use]
    pub fn is_owned_by(&self, label_key: &str) -> bool {
        self.labels.contains_key(label_key)
    }

    /// First name without the runtime's leading `/`, falling back to a short id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.names
            .first()
            .map(|n| n.trim_start_matches('/'))
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.id.get(..12).unwrap_or(&self.id))
    }
}

/// Records eligible for removal.
pub fn owned<'a>(
    records: &'a [ContainerRecord],
    label_key: &'a str,
) -> impl Iterator<Item = &'a ContainerRecord> {
    records.iter().filter(move |r| r.is_owned_by(label_key))
}
