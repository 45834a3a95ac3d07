//! Application services — use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports` — never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod container_reaper;
pub mod deep_clean;
pub mod local_state;
pub mod state_poller;
pub mod teardown;
pub mod unregister;

#[cfg(test)]
pub(crate) mod test_support;
