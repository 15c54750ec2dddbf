//! Configuration value objects for the domain layer
//!
//! [`Settings`] is the immutable, fully merged configuration handed to the
//! pipeline. How it is assembled (defaults, files, environment) is an
//! infrastructure concern; this module only defines its shape, the built-in
//! baseline, and validation.

mod executor;
mod section;
mod settings;
mod validation;

pub use executor::{ExecutorBackend, ExecutorSettings};
pub use section::{SectionInfo, known_sections, lookup_section};
pub use settings::{ModelRoles, Settings, Thresholds};
pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
