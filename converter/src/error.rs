use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ConvertError {
    Io { path: PathBuf, source: io::Error },
    NotADirectory(PathBuf),
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Io { path, source } => {
                write!(f, "I/O error on '{}': {}", path.display(), source)
            }
            ConvertError::NotADirectory(path) => {
                write!(f, "not a directory: {}", path.display())
            }
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
