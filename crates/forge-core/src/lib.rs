//! Forge Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Forge
//! scaffolding tool: the shared process context, the command invoker, the
//! generator catalog, and the ports that infrastructure plugs into.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            forge-cli (CLI)              │
//! │  builds commands, owns the error edge   │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │            SharedContext                │
//! │  project cache · install flag · catalog │
//! │            · command queue              │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │ Resolver · Runner · Discovery · Render  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     forge-adapters (Infrastructure)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use forge_core::application::{RunShell, SharedContext};
//! use forge_core::application::ports::Invocation;
//!
//! # fn demo(ctx: SharedContext) -> forge_core::error::ForgeResult<()> {
//! let project = ctx.require_project()?;
//! ctx.enqueue(RunShell::new(
//!     Invocation::new("make").arg("install").cwd(project.project_root()),
//! ))?;
//! ctx.execute()?;
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Command, ContextSettings, GenerateFiles, RunShell, SharedContext,
        ports::{
            GeneratorDiscovery, GeneratorRenderer, Invocation, ProcessRunner, ProcessStatus,
            ProjectResolver,
        },
    };
    pub use crate::domain::{
        EmbeddedFile, GeneratorCatalog, GeneratorDescriptor, GeneratorSource, ProjectContext,
        ProjectError, RenderRequest, RenderVariables,
    };
    pub use crate::error::{ErrorCategory, ForgeError, ForgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
