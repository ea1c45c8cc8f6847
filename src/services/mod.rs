//! Services Layer
//!
//! The two batch jobs. Each takes its configuration and service adapters
//! explicitly and runs strictly sequentially.

pub mod harvest_service;
pub mod inventory_service;

// Re-export for convenience
pub use harvest_service::{HarvestSummary, run_harvest};
pub use inventory_service::{InventorySummary, collect_inventory, run_inventory};
