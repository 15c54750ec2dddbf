//! Settings loading errors

use std::path::PathBuf;
use thiserror::Error;

/// Fatal settings errors.
///
/// Recoverable problems (a bad section, an unknown key) are reported as
/// [`ConfigIssue`](pipeline_domain::ConfigIssue)s instead.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<figment::Error>,
    },

    #[error("Invalid environment override {name}={value:?}: {reason}")]
    Environment {
        name: &'static str,
        value: String,
        reason: String,
    },
}
