//! Domain layer — pure types, validation, and the unregister run model.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod container;
pub mod error;
pub mod node;
pub mod unregister;

#[allow(unused_imports)]
pub use config::EdgeNodeConfig;
#[allow(unused_imports)]
pub use container::{ContainerRecord, DEFAULT_OWNERSHIP_LABEL};
#[allow(unused_imports)]
pub use error::{
    CleanupError, ConfigError, ConvergenceTimeout, ReapError, TeardownError, UnregisterError,
};
#[allow(unused_imports)]
pub use node::{NodeConfigState, NodeInfo, TeardownOptions};
#[allow(unused_imports)]
pub use unregister::{CleanupOutcome, UnregisterPhase, UnregisterRequest};
