//! Application services.
//!
//! The only service is the [`SharedContext`]: one per process, cloned into
//! every command, caching what has been resolved so far and owning the
//! command queue.

pub mod shared_context;

pub use shared_context::{ContextSettings, SharedContext, SharedContextBuilder};
