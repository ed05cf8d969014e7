//! Shared bootstrap utilities for client front-ends.
//!
//! Provides configuration loading, player session creation, and runtime
//! setup that can be reused by the terminal client or any other front-end.
pub mod builder;
pub mod config;
pub mod session;

pub use builder::{ClientBuilder, ClientSetup, generate_session_id};
pub use config::{BackendKind, ClientConfig, ConfigError, Credentials};
pub use session::establish_session;
