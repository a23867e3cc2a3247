//! Infrastructure adapters for Forge.
//!
//! This crate implements the ports defined in `forge_core::application::ports`.
//! It contains all filesystem and process I/O.

pub mod builtin_generators;
pub mod generator_loader;
pub mod process;
pub mod project_resolver;
pub mod renderer;

// Re-export commonly used adapters
pub use builtin_generators::{builtin_catalog, project_generator};
pub use generator_loader::LocalGeneratorLoader;
pub use process::SystemProcessRunner;
pub use project_resolver::IniProjectResolver;
pub use renderer::FileRenderer;
