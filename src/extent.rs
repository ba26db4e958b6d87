//! Bounding rectangle of the input sites

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoronoiError};

/// Fewest sites for which a diagram is built
pub const MIN_SITES: usize = 3;

/// Axis-aligned bounding rectangle
///
/// Invariant: `xmin <= xmax` and `ymin <= ymax`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Extent {
    /// Create an extent from two corners in any order
    pub fn new(a: DVec2, b: DVec2) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self {
            xmin: min.x,
            xmax: max.x,
            ymin: min.y,
            ymax: max.y,
        }
    }

    /// Scan the site positions once for their bounding rectangle
    ///
    /// # Errors
    ///
    /// Returns `InsufficientInput` if fewer than three positions are given
    pub fn from_points(points: &[DVec2]) -> Result<Self> {
        if points.len() < MIN_SITES {
            return Err(VoronoiError::InsufficientInput {
                count: points.len(),
            });
        }

        let first = points[0];
        let (min, max) = points[1..]
            .iter()
            .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));

        Ok(Self::new(min, max))
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    #[inline]
    pub fn min(&self) -> DVec2 {
        DVec2::new(self.xmin, self.ymin)
    }

    #[inline]
    pub fn max(&self) -> DVec2 {
        DVec2::new(self.xmax, self.ymax)
    }

    /// Grow the rectangle by `offset` on every side
    pub fn expanded(&self, offset: f64) -> Self {
        Self {
            xmin: self.xmin - offset,
            xmax: self.xmax + offset,
            ymin: self.ymin - offset,
            ymax: self.ymax + offset,
        }
    }

    /// Check whether a point lies inside or on the rectangle
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.xmin && point.x <= self.xmax && point.y >= self.ymin && point.y <= self.ymax
    }
}
