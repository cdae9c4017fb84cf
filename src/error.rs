//! Central error handling for quadnav
//!
//! Provides a unified QuadnavError enum with consistent categorization
//! for the fallible boundaries of the crate (grid construction and I/O).

/// Centralized error type for grid-source construction
#[derive(thiserror::Error, Debug)]
pub enum QuadnavError {
    #[error("Grid error: {0}")]
    Grid(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuadnavError {
    /// Convenience constructor for grid-shaped failures
    pub fn grid<T: ToString>(msg: T) -> Self {
        QuadnavError::Grid(msg.to_string())
    }
}
