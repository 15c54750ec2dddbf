//! Timestamped run directories

use chrono::{DateTime, Utc};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

const RUN_DIR_FORMAT: &str = "%Y%m%d_%H%M%S";
/// Give up after this many same-second collisions
const MAX_SUFFIX: u32 = 10_000;

/// Creates one directory per run under a results root.
#[derive(Debug, Clone)]
pub struct RunDirectoryManager {
    root: PathBuf,
}

impl RunDirectoryManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the directory for a run started now
    pub fn create_run_dir(&self) -> io::Result<PathBuf> {
        self.create_run_dir_at(Utc::now())
    }

    /// Create `<root>/<YYYYmmdd_HHMMSS>`, or the first free `_N` variant.
    ///
    /// Each candidate is claimed with `create_dir`, so two runs never share
    /// a directory.
    pub fn create_run_dir_at(&self, started: DateTime<Utc>) -> io::Result<PathBuf> {
        std::fs::create_dir_all(&self.root)?;

        let stem = started.format(RUN_DIR_FORMAT).to_string();
        for suffix in 0..MAX_SUFFIX {
            let name = if suffix == 0 {
                stem.clone()
            } else {
                format!("{}_{}", stem, suffix)
            };
            let candidate = self.root.join(&name);

            match std::fs::create_dir(&candidate) {
                Ok(()) => {
                    debug!("Created run directory {}", candidate.display());
                    return Ok(candidate);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            }
        }

        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free run directory for {} under {}", stem, self.root.display()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn started() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn test_name_from_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let manager = RunDirectoryManager::new(dir.path());

        let run = manager.create_run_dir_at(started()).unwrap();
        assert_eq!(run, dir.path().join("20250314_092653"));
        assert!(run.is_dir());
    }

    #[test]
    fn test_same_second_runs_get_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        let manager = RunDirectoryManager::new(dir.path());

        let first = manager.create_run_dir_at(started()).unwrap();
        let second = manager.create_run_dir_at(started()).unwrap();
        let third = manager.create_run_dir_at(started()).unwrap();

        assert_eq!(first.file_name().unwrap(), "20250314_092653");
        assert_eq!(second.file_name().unwrap(), "20250314_092653_1");
        assert_eq!(third.file_name().unwrap(), "20250314_092653_2");
    }

    #[test]
    fn test_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let manager = RunDirectoryManager::new(dir.path().join("nested").join("results"));

        let run = manager.create_run_dir_at(started()).unwrap();
        assert!(run.starts_with(manager.root()));
    }
}
