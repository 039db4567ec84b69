use std::io;
use std::path::PathBuf;

/// Everything a [`LineSeeker`](crate::LineSeeker) operation can fail with.
#[derive(Debug)]
pub enum Error {
    /// No further line boundary ahead, or the requested line index is past
    /// the last line.
    LineNotFound,
    /// A negative line index was requested.
    InvalidLineNumber(i64),
    /// Nothing left to read in the requested direction.
    EndOfStream,
    /// A line callback asked to stop. `read_lines` treats it as completion.
    EarlyTermination,
    /// The underlying source failed a read or seek.
    Io(io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LineNotFound => write!(f, "line not found"),
            Self::InvalidLineNumber(n) => write!(f, "invalid line number: {n}"),
            Self::EndOfStream => write!(f, "end of stream"),
            Self::EarlyTermination => write!(f, "ended early"),
            Self::Io(e) => write!(f, "i/o error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Every error the `lineseek` front end can produce. Displayed as user-facing
/// messages.
#[derive(Debug)]
pub enum LineseekError {
    NotFound {
        path: PathBuf,
    },
    PermissionDenied {
        path: PathBuf,
    },
    InvalidQuery {
        query: String,
        reason: String,
    },
    IoError {
        path: PathBuf,
        source: io::Error,
    },
    Seek {
        path: PathBuf,
        source: Error,
    },
    Config {
        path: PathBuf,
        reason: String,
    },
}

impl LineseekError {
    /// Classify an `open`/`metadata` failure on `path`.
    pub(crate) fn from_io(path: &std::path::Path, e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => Self::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Self::IoError {
                path: path.to_path_buf(),
                source: e,
            },
        }
    }

    pub(crate) fn seek(path: &std::path::Path, e: Error) -> Self {
        match e {
            Error::Io(source) => Self::IoError {
                path: path.to_path_buf(),
                source,
            },
            source => Self::Seek {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// Process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } | Self::IoError { .. } => 2,
            Self::InvalidQuery { .. } | Self::Seek { .. } | Self::Config { .. } => 3,
            Self::PermissionDenied { .. } => 4,
        }
    }
}

impl std::fmt::Display for LineseekError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "not found: {}", path.display()),
            Self::PermissionDenied { path } => {
                write!(f, "{} [permission denied]", path.display())
            }
            Self::InvalidQuery { query, reason } => {
                write!(f, "invalid query \"{query}\": {reason}")
            }
            Self::IoError { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Seek { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Config { path, reason } => {
                write!(f, "bad config {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for LineseekError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError { source, .. } => Some(source),
            Self::Seek { source, .. } => Some(source),
            _ => None,
        }
    }
}
