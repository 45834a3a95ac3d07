//! Command implementations

pub mod config;
pub mod unregister;
pub mod version;
