//! Diagram Configuration and Builder
//!
//! Options that control how cells are fenced, deduplicated and scheduled.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoronoiError};

/// Default fence offset as a fraction of the extent's x-span
pub const DEFAULT_FENCE_OFFSET_RATIO: f64 = 0.01;

/// Configuration for a single diagram build
///
/// The same configuration applied to the same sites in the same order always
/// produces bit-identical cells, whether or not the build runs in parallel.
///
/// # Example
///
/// ```rust
/// use radial_voronoi::*;
///
/// let config = DiagramConfigBuilder::new()
///     .fence_offset_ratio(0.05)
///     .unwrap()
///     .build();
///
/// assert_eq!(config.fence_offset_ratio, 0.05);
/// assert_eq!(config.duplicate_vertex_epsilon, 0.0);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramConfig {
    /// Tolerance under which two consecutive cell vertices count as one
    ///
    /// - 0.0: exact coordinate equality (default)
    /// - > 0.0: vertices whose x and y both differ by at most this amount merge
    pub duplicate_vertex_epsilon: f64,

    /// Distance of the fence lines outside the site extent, as a fraction of
    /// the extent's x-span (the y-span when every site shares one x)
    pub fence_offset_ratio: f64,

    /// Run the per-site pipeline on the rayon thread pool
    ///
    /// Ignored when the crate is built without the `parallel` feature.
    pub parallel: bool,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        DiagramConfigBuilder::new().build()
    }
}

/// Builder for creating DiagramConfig with validation
///
/// # Example
///
/// ```rust
/// use radial_voronoi::*;
///
/// // Use defaults
/// let config = DiagramConfigBuilder::new().build();
/// assert!(config.parallel);
///
/// // Customize
/// let config = DiagramConfigBuilder::new()
///     .duplicate_vertex_epsilon(1e-9)
///     .unwrap()
///     .parallel(false)
///     .build();
/// assert!(!config.parallel);
/// ```
#[derive(Debug, Clone)]
pub struct DiagramConfigBuilder {
    duplicate_vertex_epsilon: f64,
    fence_offset_ratio: f64,
    parallel: bool,
}

impl DiagramConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - duplicate_vertex_epsilon: 0.0 (exact match)
    /// - fence_offset_ratio: 0.01
    /// - parallel: true
    pub fn new() -> Self {
        Self {
            duplicate_vertex_epsilon: 0.0,
            fence_offset_ratio: DEFAULT_FENCE_OFFSET_RATIO,
            parallel: true,
        }
    }

    /// Set the duplicate-vertex tolerance
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if epsilon is negative or not finite
    pub fn duplicate_vertex_epsilon(mut self, epsilon: f64) -> Result<Self> {
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(VoronoiError::InvalidConfig(format!(
                "duplicate vertex epsilon must be finite and >= 0 (got {})",
                epsilon
            )));
        }
        self.duplicate_vertex_epsilon = epsilon;
        Ok(self)
    }

    /// Set the fence offset ratio
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the ratio is not a finite positive number
    pub fn fence_offset_ratio(mut self, ratio: f64) -> Result<Self> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(VoronoiError::InvalidConfig(format!(
                "fence offset ratio must be finite and > 0 (got {})",
                ratio
            )));
        }
        self.fence_offset_ratio = ratio;
        Ok(self)
    }

    /// Enable or disable parallel per-site processing
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build the configuration
    pub fn build(self) -> DiagramConfig {
        DiagramConfig {
            duplicate_vertex_epsilon: self.duplicate_vertex_epsilon,
            fence_offset_ratio: self.fence_offset_ratio,
            parallel: self.parallel,
        }
    }
}

impl Default for DiagramConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
