//! Error types for bernstein

use thiserror::Error;

/// Result type alias for bernstein operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building geometry, loading a demo
/// configuration or writing frames
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Reading the configuration or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for a demo config
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The plotting backend failed to draw or encode a frame
    #[error("render error: {0}")]
    Render(String),

    /// A tessellation needs at least two samples per direction
    #[error("tessellation resolution must be at least 2, got {0}")]
    InvalidResolution(usize),

    /// A patch spline was addressed past its length
    #[error("patch index {index} out of range for spline with {len} patches")]
    PatchIndex { index: usize, len: usize },

    /// A patch has 16 control points
    #[error("control point index {0} out of range, a patch has 16 control points")]
    ControlPointIndex(usize),

    /// The fixed capacity of a patch spline is exhausted
    #[error("patch spline is full ({capacity} patches)")]
    SplineFull { capacity: usize },
}

impl<E: std::error::Error + Send + Sync> From<plotters::drawing::DrawingAreaErrorKind<E>> for Error {
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        Error::Render(err.to_string())
    }
}
