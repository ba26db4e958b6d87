//! Core Voronoi generation algorithm
//!
//! Builds one site's cell at a time by brute-force half-plane intersection:
//! constraints around the site, a radial sweep over them, then ring assembly.

mod assembler;
mod constraints;
mod lloyd;
mod points;
mod resolver;

pub use assembler::{assemble_ring, same_vertex};
pub use constraints::{
    fence_offset, generate_constraints, normalize_angle, Constraint, ConstraintKind, FenceSide,
};
pub use lloyd::{lloyd_relaxation, lloyd_relaxation_with_options, LloydOptions};
pub use points::generate_random_points;
pub use resolver::{resolve_borders, RadialSweep, ResolvedBorder};

use glam::DVec2;

use crate::config::DiagramConfig;
use crate::error::{Result, VoronoiError};
use crate::extent::Extent;

/// Read-only inputs shared by every per-site computation of one build
#[derive(Debug, Clone, Copy)]
pub struct SiteContext<'a> {
    /// All site positions, in feed order
    pub sites: &'a [DVec2],
    pub extent: Extent,
    pub fence_offset: f64,
    pub duplicate_vertex_epsilon: f64,
}

impl<'a> SiteContext<'a> {
    /// Compute the extent and fence offset for a set of sites
    ///
    /// # Errors
    ///
    /// Returns `InsufficientInput` if fewer than three sites are given
    pub fn new(sites: &'a [DVec2], config: &DiagramConfig) -> Result<Self> {
        let extent = Extent::from_points(sites)?;
        Ok(Self {
            sites,
            extent,
            fence_offset: fence_offset(&extent, config.fence_offset_ratio),
            duplicate_vertex_epsilon: config.duplicate_vertex_epsilon,
        })
    }

    /// Compute the polygon ring of the site at `index`
    ///
    /// # Errors
    ///
    /// Returns `DegenerateCell` if fewer than three distinct vertices remain
    ///
    /// # Panics
    ///
    /// Panics if `index` is not smaller than `sites.len()`
    pub fn cell_ring(&self, index: usize) -> Result<Vec<DVec2>> {
        let center = self.sites[index];

        // Step 1: Half-plane constraints around the site
        let constraints = generate_constraints(center, self.sites, &self.extent, self.fence_offset);

        // Step 2: Radial sweep for the ordered borders
        let borders = resolve_borders(constraints);

        // Step 3: Vertices, deduplicated
        let ring = assemble_ring(center, &borders, self.duplicate_vertex_epsilon);

        if ring.len() < 3 {
            return Err(VoronoiError::DegenerateCell {
                site: index,
                vertices: ring.len(),
            });
        }
        Ok(ring)
    }
}
