//! Error types for Voronoi diagram construction

use thiserror::Error;

/// Errors that can occur while building or emitting a diagram
#[derive(Error, Debug)]
pub enum VoronoiError {
    /// Fewer than three sites were supplied; no diagram is meaningful
    #[error("insufficient input: {count} sites given, at least 3 are required")]
    InsufficientInput { count: usize },

    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A site's resolved borders collapsed to fewer than three distinct vertices
    ///
    /// `site` is the position of the site in the input feed. Not fatal to a
    /// diagram build: the site is skipped and recorded as rejected.
    #[error("degenerate cell for site #{site}: {vertices} distinct vertices")]
    DegenerateCell { site: usize, vertices: usize },

    /// Writing to an output sink failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for voronoi operations
pub type Result<T> = std::result::Result<T, VoronoiError>;
