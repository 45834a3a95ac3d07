//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: the agent's HTTP API, the
//! container runtime, host service control, and filesystem state.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod agent;
pub mod command_runner;
pub mod config;
pub mod docker;
pub mod fs;
pub mod service;
