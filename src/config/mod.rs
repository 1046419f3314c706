//! Configuration module for search probes
//!
//! This module provides the `ProbeConfig` struct, its fluent builder with
//! validation, and an environment overlay.

// Sub-modules
pub mod builder;
pub mod env;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::ProbeConfigBuilder;
pub use types::ProbeConfig;
