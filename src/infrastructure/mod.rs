//! Infrastructure layer - Adapter implementations
//!
//! This layer contains:
//! - Configuration loading (config)
//! - Workspace and metadata store adapters (repositories)
//! - Connection state handed to the jobs (state)

pub mod config;
pub mod repositories;
pub mod state;

pub use repositories::*;
pub use state::AppState;
