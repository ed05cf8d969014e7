//! Public runtime API surface.
//!
//! Gathers the types exposed to consumers of the runtime crate so the worker
//! and event modules can stay focused on orchestration.

pub mod errors;
pub mod handle;

pub use errors::{Result, RuntimeError};
pub use handle::RuntimeHandle;
