//! Error types for the GridShift content toolkit.
//!
//! Library crates use [`SiteError`] via `thiserror`.
//! App crates (cli/validate-assets) wrap this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all content operations.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// A content directory required for a listing does not exist.
    #[error("{kind} content directory not found at {path:?}")]
    MissingContentDir { kind: &'static str, path: PathBuf },

    /// Front-matter block uses syntax outside the supported dialect.
    #[error("front-matter error on line {line}: {message}")]
    FrontMatter { line: usize, message: String },

    /// A content file could not be turned into a record.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SiteError>;

impl SiteError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a front-matter error pointing at a 1-based line of the block.
    pub fn front_matter(line: usize, msg: impl Into<String>) -> Self {
        Self::FrontMatter {
            line,
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
