//! Lloyd's Relaxation for uniform site distribution
//!
//! Lloyd's Relaxation iteratively evens out a site set by moving each site
//! to the centroid of its Voronoi cell.

use glam::DVec2;
use std::time::Instant;

use crate::config::DiagramConfig;
use crate::diagram::VoronoiDiagram;
use crate::error::Result;
use crate::extent::Extent;
use crate::site::sites_from_points;

/// Options for Lloyd's relaxation algorithm
#[derive(Debug, Clone, Copy)]
pub struct LloydOptions {
    /// Maximum number of iterations to run
    pub max_iterations: usize,
    /// Convergence threshold as a fraction of the larger side of the initial
    /// site extent; stop when the largest displacement falls below it
    ///
    /// Set to 0.0 to disable early termination
    pub convergence_threshold: f64,
}

impl Default for LloydOptions {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            convergence_threshold: 0.001,
        }
    }
}

/// Apply Lloyd's Relaxation for a fixed number of iterations
///
/// # Errors
///
/// Returns `InsufficientInput` if fewer than three points are given
pub fn lloyd_relaxation(points: Vec<DVec2>, config: &DiagramConfig, iterations: usize) -> Result<Vec<DVec2>> {
    let options = LloydOptions {
        max_iterations: iterations,
        ..Default::default()
    };
    lloyd_relaxation_with_options(points, config, options)
}

/// Apply Lloyd's Relaxation with custom options
///
/// Each iteration builds a full diagram of the current points and moves every
/// point with a cell to that cell's centroid. Points whose cell was rejected
/// stay where they are. Centroids lie inside the fenced extent, so the
/// relaxed set drifts by at most the fence offset per iteration.
///
/// # Errors
///
/// Returns `InsufficientInput` if fewer than three points are given
pub fn lloyd_relaxation_with_options(
    mut points: Vec<DVec2>,
    config: &DiagramConfig,
    options: LloydOptions,
) -> Result<Vec<DVec2>> {
    let extent = Extent::from_points(&points)?;
    let convergence_threshold = options.convergence_threshold * extent.width().max(extent.height());
    let total_start = Instant::now();

    tracing::debug!(
        points = points.len(),
        max_iterations = options.max_iterations,
        threshold = convergence_threshold,
        "lloyd relaxation starting"
    );

    let mut iterations_run = 0;
    let mut converged = false;

    for iteration in 0..options.max_iterations {
        let iter_start = Instant::now();
        let diagram = VoronoiDiagram::build(sites_from_points(&points), *config)?;

        let mut max_displacement: f64 = 0.0;
        for cell in diagram.cells() {
            let centroid = cell.centroid();
            let index = cell.attributes;
            max_displacement = max_displacement.max(centroid.distance(points[index]));
            points[index] = centroid;
        }
        iterations_run = iteration + 1;

        tracing::debug!(
            iteration = iterations_run,
            cells = diagram.cell_count(),
            max_displacement,
            elapsed = ?iter_start.elapsed(),
            "lloyd iteration"
        );

        if convergence_threshold > 0.0 && max_displacement < convergence_threshold {
            converged = true;
            break;
        }
    }

    tracing::debug!(
        iterations = iterations_run,
        converged,
        elapsed = ?total_start.elapsed(),
        "lloyd relaxation finished"
    );

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VoronoiError;
    use crate::generation::points::generate_random_points;

    fn scatter(count: usize, seed: u64) -> (Vec<DVec2>, Extent) {
        let extent = Extent::new(DVec2::ZERO, DVec2::new(100.0, 100.0));
        (generate_random_points(count, &extent, seed), extent)
    }

    #[test]
    fn test_lloyd_relaxation() {
        let (points, extent) = scatter(40, 42);
        let relaxed = lloyd_relaxation(points, &DiagramConfig::default(), 3).unwrap();

        assert_eq!(relaxed.len(), 40);

        // Each iteration drifts at most about one fence offset (1% of the span)
        let bounds = extent.expanded(5.0);
        for point in &relaxed {
            assert!(bounds.contains(*point), "{:?} escaped {:?}", point, bounds);
        }
    }

    #[test]
    fn test_lloyd_relaxation_determinism() {
        let config = DiagramConfig::default();
        let relaxed1 = lloyd_relaxation(scatter(30, 12345).0, &config, 2).unwrap();
        let relaxed2 = lloyd_relaxation(scatter(30, 12345).0, &config, 2).unwrap();

        // Same input should produce identical output
        assert_eq!(relaxed1, relaxed2);
    }

    #[test]
    fn test_lloyd_moves_points() {
        let (points, _) = scatter(30, 9);
        let relaxed = lloyd_relaxation(points.clone(), &DiagramConfig::default(), 1).unwrap();
        assert_ne!(points, relaxed);
    }

    #[test]
    fn test_lloyd_zero_iterations_is_identity() {
        let (points, _) = scatter(10, 1);
        let relaxed = lloyd_relaxation(points.clone(), &DiagramConfig::default(), 0).unwrap();
        assert_eq!(points, relaxed);
    }

    #[test]
    fn test_lloyd_options_default() {
        let options = LloydOptions::default();
        assert_eq!(options.max_iterations, 5);
        assert!((options.convergence_threshold - 0.001).abs() < 1e-12);
    }

    #[test]
    fn test_lloyd_requires_three_points() {
        let result = lloyd_relaxation(vec![DVec2::ZERO, DVec2::ONE], &DiagramConfig::default(), 2);
        assert!(matches!(result, Err(VoronoiError::InsufficientInput { count: 2 })));
    }
}
