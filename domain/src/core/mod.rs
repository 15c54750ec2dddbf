//! Core domain concepts shared across all subdomains.
//!
//! - [`model::ModelId`]: opaque identifier of an external model
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
