//! Seeded random site placement
//!
//! Deterministic uniform scatter inside an extent, used to feed demos,
//! benchmarks and relaxation runs.

use glam::DVec2;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::extent::Extent;

/// Scatter `count` points uniformly inside `extent`
///
/// The same seed always produces the same points.
///
/// # Example
///
/// ```rust
/// use radial_voronoi::generation::generate_random_points;
/// use radial_voronoi::Extent;
/// use glam::DVec2;
///
/// let extent = Extent::new(DVec2::ZERO, DVec2::new(100.0, 50.0));
/// let points = generate_random_points(200, &extent, 42);
/// assert_eq!(points.len(), 200);
/// assert!(points.iter().all(|p| extent.contains(*p)));
/// ```
pub fn generate_random_points(count: usize, extent: &Extent, seed: u64) -> Vec<DVec2> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    (0..count)
        .map(|_| {
            let x = extent.xmin + rng.gen::<f64>() * extent.width();
            let y = extent.ymin + rng.gen::<f64>() * extent.height();
            DVec2::new(x, y)
        })
        .collect()
}
