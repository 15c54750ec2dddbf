//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod model_executor;
pub mod progress;
pub mod result_store;
pub mod summary_source;
