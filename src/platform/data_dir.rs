// steplog - platform/data_dir.rs
//
// Location of the shared data files a computation reads (parameter tables,
// reference sets). Resolved once at startup; a missing directory is a fatal
// configuration problem.
//
// Resolution order:
//   1. STEPLOG_SHARE environment variable
//   2. share_dir.txt next to the executable, holding an install prefix;
//      the data lives in <prefix>/share/steplog
//   3. ./share

use crate::util::constants;
use crate::util::error::DataDirError;
use std::path::{Path, PathBuf};

/// A verified, absolute data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// Resolve from the process environment and the executable location.
    pub fn discover() -> Result<Self, DataDirError> {
        let env_override = std::env::var_os(constants::DATA_DIR_ENV).map(PathBuf::from);
        let prefix_file = std::env::current_exe().ok().and_then(|exe| {
            exe.parent()
                .map(|dir| dir.join(constants::PREFIX_FILE_NAME))
        });
        Self::from_sources(env_override, prefix_file.as_deref())
    }

    /// Resolve from explicit sources, in priority order.
    ///
    /// `prefix_file` is consulted only when there is no override, and only
    /// if it exists.
    pub fn from_sources(
        env_override: Option<PathBuf>,
        prefix_file: Option<&Path>,
    ) -> Result<Self, DataDirError> {
        let candidate = match env_override {
            Some(dir) => {
                tracing::debug!(dir = %dir.display(), "Data directory from environment");
                dir
            }
            None => match prefix_file.filter(|p| p.is_file()) {
                Some(file) => {
                    let prefix = std::fs::read_to_string(file).map_err(|source| {
                        DataDirError::Io {
                            path: file.to_path_buf(),
                            source,
                        }
                    })?;
                    let dir = Path::new(prefix.trim()).join(constants::PREFIX_DATA_SUBDIR);
                    tracing::debug!(
                        prefix_file = %file.display(),
                        dir = %dir.display(),
                        "Data directory from install prefix"
                    );
                    dir
                }
                None => PathBuf::from(constants::FALLBACK_DATA_DIR),
            },
        };
        Self::at(candidate)
    }

    /// Use `dir` directly, made absolute and checked for existence.
    pub fn at(dir: impl Into<PathBuf>) -> Result<Self, DataDirError> {
        let dir = dir.into();
        let root = if dir.is_absolute() {
            dir
        } else {
            let cwd = std::env::current_dir().map_err(|source| DataDirError::Io {
                path: dir.clone(),
                source,
            })?;
            cwd.join(dir)
        };

        if !root.is_dir() {
            return Err(DataDirError::NotFound { path: root });
        }
        tracing::info!(dir = %root.display(), "Data directory resolved");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of `name` inside the data directory. Existence is not
    /// checked.
    pub fn resolve(&self, name: impl AsRef<Path>) -> PathBuf {
        self.root.join(name)
    }

    /// All paths in the data directory matching a glob `pattern`, sorted.
    ///
    /// Entries that cannot be read while matching are skipped.
    pub fn find(&self, pattern: &str) -> Result<Vec<PathBuf>, DataDirError> {
        let full = self.resolve(pattern);
        let full = full.to_string_lossy();
        let paths = glob::glob(&full).map_err(|source| DataDirError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let mut found = Vec::new();
        for entry in paths {
            match entry {
                Ok(path) => found.push(path),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping unreadable path during find");
                }
            }
        }
        Ok(found)
    }
}
