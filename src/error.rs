//! Error types for the raycaster.

use thiserror::Error;

/// Errors that can occur while constructing or driving a camera.
///
/// Degenerate geometry (rays parallel to a plane, zero-length rotation axes)
/// is not represented here; those cases resolve to sentinels during normal
/// operation.
#[derive(Error, Debug)]
pub enum TricastError {
    /// An argument was rejected before any state was touched.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Storage for rasters or rays could not be reserved.
    #[error("could not allocate {bytes} bytes for {what}")]
    ResourceExhausted {
        /// What was being allocated.
        what: &'static str,
        /// Requested size in bytes.
        bytes: usize,
    },

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A rendered raster could not be written out.
    #[error("output error: {0}")]
    Output(String),
}

/// Result type for raycaster operations.
pub type Result<T> = std::result::Result<T, TricastError>;
