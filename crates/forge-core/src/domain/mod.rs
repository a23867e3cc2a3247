//! Core domain layer for Forge.
//!
//! Pure data and rules: the resolved project, generator descriptors and the
//! catalog merge policy, and the variables a generator is rendered with.
//! Nothing in here touches the filesystem or spawns processes.

pub mod error;
pub mod generator;
pub mod project;
pub mod render;

pub use error::ProjectError;
pub use generator::{EmbeddedFile, GeneratorCatalog, GeneratorDescriptor, GeneratorSource};
pub use project::ProjectContext;
pub use render::{RenderRequest, RenderVariables};
