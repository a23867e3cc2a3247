//! Application layer for Forge.
//!
//! This layer contains:
//! - **Services**: the [`SharedContext`] every command runs against
//! - **Commands**: queued units of work and the built-in command kinds
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types

pub mod commands;
pub mod error;
pub mod ports;
pub mod services;

pub use commands::{Command, GenerateFiles, RunShell};
pub use error::ApplicationError;
pub use ports::{GeneratorDiscovery, GeneratorRenderer, ProcessRunner, ProjectResolver};
pub use services::{ContextSettings, SharedContext, SharedContextBuilder};
