//! Error types for EncStat

use thiserror::Error;

/// EncStat error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed bin range or count
    #[error("invalid bin range: {0}")]
    InvalidRange(String),

    /// Non-positive argument to a logarithmic operation
    #[error("domain error: {0}")]
    Domain(String),

    /// Binning name already registered
    #[error("duplicate binning name: '{0}'")]
    DuplicateName(String),

    /// Binning name not registered
    #[error("unknown binning name: '{0}'")]
    UnknownName(String),

    /// Near-collinear vectors in an angle computation
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
