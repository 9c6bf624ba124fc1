// steplog - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation. Nothing in here is ever reported
// through the progress logger itself.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all steplog operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LogError {
    /// Verbosity input could not be interpreted.
    Level(LevelError),

    /// Data directory resolution failed.
    DataDir(DataDirError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// The destination could not be opened or written.
    ///
    /// `path` is `None` for streams that were not opened from a path
    /// (stdout, caller-supplied writers).
    Io {
        path: Option<PathBuf>,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level(e) => write!(f, "Invalid level: {e}"),
            Self::DataDir(e) => write!(f, "Data directory error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path: Some(path),
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
            Self::Io {
                path: None,
                operation,
                source,
            } => write!(f, "I/O error during {operation}: {source}"),
        }
    }
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Level(e) => Some(e),
            Self::DataDir(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Level errors
// ---------------------------------------------------------------------------

/// Verbosity input that matches no level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// Integer outside the accepted ordinal range.
    OutOfRange { value: i64, max: u8 },

    /// Name that is not one of the level names.
    UnknownName { name: String },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { value, max } => write!(
                f,
                "integer level {value} is out of range, expected 0 to {max}"
            ),
            Self::UnknownName { name } => write!(
                f,
                "'{name}' is not a level, expected silent, low, medium, high or highest"
            ),
        }
    }
}

impl std::error::Error for LevelError {}

impl From<LevelError> for LogError {
    fn from(e: LevelError) -> Self {
        Self::Level(e)
    }
}

// ---------------------------------------------------------------------------
// Data directory errors
// ---------------------------------------------------------------------------

/// Errors related to locating and searching the data directory.
#[derive(Debug)]
pub enum DataDirError {
    /// The resolved directory does not exist or is not a directory.
    NotFound { path: PathBuf },

    /// A glob pattern passed to `find` is malformed.
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    /// The prefix file or working directory could not be read.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for DataDirError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(
                f,
                "Can not find the data files. The directory '{}' does not exist",
                path.display()
            ),
            Self::Pattern { pattern, source } => {
                write!(f, "Invalid file pattern '{pattern}': {source}")
            }
            Self::Io { path, source } => {
                write!(f, "I/O error reading '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DataDirError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pattern { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<DataDirError> for LogError {
    fn from(e: DataDirError) -> Self {
        Self::DataDir(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for LogError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for steplog results.
pub type Result<T> = std::result::Result<T, LogError>;
