//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `forge-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `ProjectResolver`: reads the project descriptor
//!   - `ProcessRunner`: runs subprocesses
//!   - `GeneratorDiscovery`: catalogs project-local generators
//!   - `GeneratorRenderer`: writes a generator's files
//!
//! - **Driving (Input) Ports**: the [`SharedContext`](crate::application::SharedContext)
//!   and [`Command`](crate::application::Command) API, called by the CLI

pub mod output;

pub use output::{
    GeneratorDiscovery, GeneratorRenderer, Invocation, ProcessRunner, ProcessStatus,
    ProjectResolver,
};

#[cfg(test)]
pub use output::{
    MockGeneratorDiscovery, MockGeneratorRenderer, MockProcessRunner, MockProjectResolver,
};
