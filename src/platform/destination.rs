// steplog - platform/destination.rs
//
// Where the progress log goes: stdout, a caller-supplied stream, or a file
// opened (and truncated) by path.
//
// Writes go straight to the underlying stream; nothing is held back between
// messages, so a file destination can be tailed while the run is going.

use crate::util::error::{LogError, Result};
use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

/// Target accepted by `Logger::bind_destination`.
pub enum Destination {
    Stdout,
    Writer(Box<dyn Write>),
    Path(PathBuf),
}

impl Destination {
    /// Wrap an already-open stream.
    pub fn writer(w: impl Write + 'static) -> Self {
        Self::Writer(Box::new(w))
    }

    pub fn path(p: impl Into<PathBuf>) -> Self {
        Self::Path(p.into())
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("Stdout"),
            Self::Writer(_) => f.write_str("Writer(..)"),
            Self::Path(p) => f.debug_tuple("Path").field(p).finish(),
        }
    }
}

/// An open destination plus the path it came from, for error context.
pub struct Sink {
    pub(crate) out: Box<dyn Write>,
    pub(crate) path: Option<PathBuf>,
}

impl Sink {
    pub fn stdout() -> Self {
        Self {
            out: Box::new(io::stdout()),
            path: None,
        }
    }

    /// Open `dest`. Paths are created or truncated.
    pub fn open(dest: Destination) -> Result<Self> {
        match dest {
            Destination::Stdout => Ok(Self::stdout()),
            Destination::Writer(out) => Ok(Self { out, path: None }),
            Destination::Path(path) => {
                let file = File::create(&path).map_err(|source| LogError::Io {
                    path: Some(path.clone()),
                    operation: "open",
                    source,
                })?;
                tracing::debug!(path = %path.display(), "Log destination opened");
                Ok(Self {
                    out: Box::new(file),
                    path: Some(path),
                })
            }
        }
    }

    /// Write `text` verbatim in one call, mapping failures to `LogError::Io`.
    pub fn write_str(&mut self, text: &str) -> Result<()> {
        self.out
            .write_all(text.as_bytes())
            .map_err(|source| self.io_error("write", source))
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out
            .flush()
            .map_err(|source| self.io_error("flush", source))
    }

    fn io_error(&self, operation: &'static str, source: io::Error) -> LogError {
        LogError::Io {
            path: self.path.clone(),
            operation,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_path_truncates() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("run.log");
        std::fs::write(&path, "stale contents").unwrap();

        let mut sink = Sink::open(Destination::path(&path)).unwrap();
        sink.write_str("fresh\n").unwrap();
        sink.flush().unwrap();
        drop(sink);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_open_unwritable_path_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("missing-dir").join("run.log");
        let err = Sink::open(Destination::path(&path)).err().unwrap();
        assert!(
            matches!(err, LogError::Io { operation: "open", path: Some(ref p), .. } if *p == path),
            "got {err:?}"
        );
    }

    #[test]
    fn test_path_writes_visible_without_flush() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("run.log");
        let mut sink = Sink::open(Destination::path(&path)).unwrap();
        sink.write_str("first line\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first line\n");
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_surfaces() {
        let mut sink = Sink::open(Destination::writer(Broken)).unwrap();
        let err = sink.write_str("x").unwrap_err();
        assert!(matches!(err, LogError::Io { operation: "write", path: None, .. }));
    }
}
