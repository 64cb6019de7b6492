use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for pak resource operations
pub type Result<T> = std::result::Result<T, PakError>;

/// Unified error type for pak resource operations
///
/// A name that resolves in no source is not an error; lookups report that
/// as `Ok(None)`.
#[derive(Debug, Error)]
pub enum PakError {
    // Open errors
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // Archive errors
    #[error("Invalid package format: {0}")]
    InvalidFormat(String),

    #[error("Short read for {name}: expected {expected} bytes, got {actual}")]
    ShortRead {
        name: String,
        expected: u32,
        actual: usize,
    },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PakError {
    pub(crate) fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PakError::Open {
            path: path.into(),
            source,
        }
    }
}

impl From<toml::de::Error> for PakError {
    fn from(err: toml::de::Error) -> Self {
        PakError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for PakError {
    fn from(err: toml::ser::Error) -> Self {
        PakError::Config(err.to_string())
    }
}
