use thiserror::Error;

/// Errors surfaced by codecs and surface construction.
#[derive(Debug, Error)]
pub enum Error {
    /// Open/read/write failure, passed through unchanged.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid surface dimensions {width}x{height}: both must be positive")]
    InvalidDimension { width: usize, height: usize },

    #[error("invalid accumulation method {0:?} (expected \"additive\" or \"recent\")")]
    InvalidMethod(String),

    #[error("{0} is not implemented")]
    UnsupportedOperation(&'static str),

    #[error("malformed {format} stream: {reason}")]
    Format { format: &'static str, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
