//! Error types for flashpack
//!
//! Uses `thiserror` for library errors; the binary wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for flashpack operations
pub type PackResult<T> = Result<T, PackError>;

/// Main error type for flashpack operations
#[derive(Error, Debug)]
pub enum PackError {
    /// Source file listed in the manifest does not exist or is unreadable
    #[error("source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Symbol is not a valid C identifier
    #[error("invalid symbol '{symbol}' for {file} - must be a valid C identifier")]
    InvalidSymbol { symbol: String, file: PathBuf },

    /// Two manifest entries resolve to the same symbol
    #[error("duplicate symbol '{symbol}' in manifest")]
    DuplicateSymbol { symbol: String },

    /// Two manifest entries resolve to the same output file
    #[error("duplicate output path '{path}' in manifest")]
    DuplicateOutput { path: PathBuf },

    /// Manifest TOML failed to parse
    #[error("invalid manifest {file}: {message}")]
    InvalidManifest { file: PathBuf, message: String },

    /// Output path escapes the project root (security issue)
    #[error("path '{path}' escapes project root '{root}'")]
    PathEscape { path: PathBuf, root: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
