//! Voronoi Cell Structure
//!
//! Represents the polygon of one site together with the site's attributes.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::extent::Extent;

/// A single emitted cell of the diagram
///
/// Each cell holds:
/// - The originating site's id and position
/// - The polygon ring, counter-clockwise, at least three distinct vertices
/// - The site's attributes, unchanged
///
/// The ring is stored open: the first vertex is not repeated at the end. Use
/// [`VoronoiCell::closed_ring`] for formats that require an explicit closure.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiCell<A> {
    /// Id of the originating site
    pub site_id: usize,

    /// Position of the originating site
    pub site: DVec2,

    /// Polygon vertices, counter-clockwise around the site
    pub vertices: Vec<DVec2>,

    /// Attributes of the originating site
    pub attributes: A,
}

impl<A> VoronoiCell<A> {
    /// Create a new cell
    ///
    /// This is typically called by the diagram builder, not by user code.
    pub fn new(site_id: usize, site: DVec2, vertices: Vec<DVec2>, attributes: A) -> Self {
        Self {
            site_id,
            site,
            vertices,
            attributes,
        }
    }

    /// Get the vertex count (polygon complexity)
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Iterate over the polygon edges as `(start, end)` pairs, wrapping around
    pub fn edges(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// The ring with the first vertex repeated at the end
    pub fn closed_ring(&self) -> Vec<DVec2> {
        let mut ring = self.vertices.clone();
        if let Some(&first) = self.vertices.first() {
            ring.push(first);
        }
        ring
    }

    /// First vertex, used as a local origin so the shoelace sums stay
    /// precise far from (0, 0)
    #[inline]
    fn local_origin(&self) -> DVec2 {
        self.vertices.first().copied().unwrap_or(DVec2::ZERO)
    }

    /// Shoelace area; positive for a counter-clockwise ring
    pub fn signed_area(&self) -> f64 {
        let origin = self.local_origin();
        self.edges()
            .map(|(a, b)| (a - origin).perp_dot(b - origin))
            .sum::<f64>()
            * 0.5
    }

    /// Area of the polygon
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Area centroid of the polygon
    ///
    /// Falls back to the vertex average for a zero-area ring.
    pub fn centroid(&self) -> DVec2 {
        let origin = self.local_origin();
        let mut weighted = DVec2::ZERO;
        let mut twice_area = 0.0;

        for (a, b) in self.edges() {
            let (a, b) = (a - origin, b - origin);
            let cross = a.perp_dot(b);
            twice_area += cross;
            weighted += (a + b) * cross;
        }

        if twice_area.abs() < f64::EPSILON {
            let sum: DVec2 = self.vertices.iter().copied().sum();
            return sum / self.vertices.len().max(1) as f64;
        }

        origin + weighted / (3.0 * twice_area)
    }

    /// Bounding rectangle of the polygon
    pub fn bounds(&self) -> Option<Extent> {
        let first = *self.vertices.first()?;
        let (min, max) = self
            .vertices
            .iter()
            .fold((first, first), |(min, max), v| (min.min(*v), max.max(*v)));
        Some(Extent::new(min, max))
    }

    /// Check whether the ring turns left (or runs straight) at every vertex
    ///
    /// `tolerance` absorbs floating-point noise in the cross products.
    pub fn is_convex(&self, tolerance: f64) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        (0..n).all(|i| {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let c = self.vertices[(i + 2) % n];
            (b - a).perp_dot(c - b) >= -tolerance
        })
    }

    /// Check whether a point lies inside or on the boundary of the cell
    ///
    /// Relies on the ring being convex and counter-clockwise.
    pub fn contains(&self, point: DVec2) -> bool {
        self.vertices.len() >= 3 && self.edges().all(|(a, b)| (b - a).perp_dot(point - a) >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> VoronoiCell<&'static str> {
        VoronoiCell::new(
            0,
            DVec2::new(0.5, 0.5),
            vec![
                DVec2::new(0.0, 0.0),
                DVec2::new(1.0, 0.0),
                DVec2::new(1.0, 1.0),
                DVec2::new(0.0, 1.0),
            ],
            "square",
        )
    }

    #[test]
    fn test_cell_creation() {
        let cell = unit_square();
        assert_eq!(cell.site_id, 0);
        assert_eq!(cell.vertex_count(), 4);
        assert_eq!(cell.attributes, "square");
        assert_eq!(cell.edges().count(), 4);
    }

    #[test]
    fn test_area_and_orientation() {
        let cell = unit_square();
        assert_eq!(cell.signed_area(), 1.0);
        assert_eq!(cell.area(), 1.0);

        let mut reversed = cell.clone();
        reversed.vertices.reverse();
        assert_eq!(reversed.signed_area(), -1.0);
        assert_eq!(reversed.area(), 1.0);
    }

    #[test]
    fn test_centroid() {
        let cell = unit_square();
        assert!(cell.centroid().distance(DVec2::new(0.5, 0.5)) < 1e-12);

        let triangle = VoronoiCell::new(
            1,
            DVec2::ZERO,
            vec![DVec2::new(0.0, 0.0), DVec2::new(3.0, 0.0), DVec2::new(0.0, 3.0)],
            (),
        );
        assert!(triangle.centroid().distance(DVec2::new(1.0, 1.0)) < 1e-12);
    }

    #[test]
    fn test_area_and_centroid_far_from_origin() {
        let offset = DVec2::new(600_000.0, 5_000_000.0);
        let near = VoronoiCell::new(
            3,
            DVec2::new(1.0, 1.0),
            vec![
                DVec2::new(0.0, 0.0),
                DVec2::new(3.0, 0.5),
                DVec2::new(2.5, 2.0),
                DVec2::new(0.5, 2.5),
            ],
            (),
        );
        let far = VoronoiCell::new(
            3,
            near.site + offset,
            near.vertices.iter().map(|v| *v + offset).collect(),
            (),
        );

        assert!((far.area() - near.area()).abs() < 1e-9);
        assert!((far.centroid() - offset).distance(near.centroid()) < 1e-9);
        assert!(far.contains(far.centroid()));
    }

    #[test]
    fn test_closed_ring() {
        let ring = unit_square().closed_ring();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], ring[4]);
    }

    #[test]
    fn test_bounds() {
        let bounds = unit_square().bounds().unwrap();
        assert_eq!(bounds, Extent::new(DVec2::ZERO, DVec2::ONE));
    }

    #[test]
    fn test_convexity() {
        assert!(unit_square().is_convex(0.0));

        let dart = VoronoiCell::new(
            2,
            DVec2::ZERO,
            vec![
                DVec2::new(0.0, 0.0),
                DVec2::new(2.0, 1.0),
                DVec2::new(0.0, 2.0),
                DVec2::new(0.5, 1.0),
            ],
            (),
        );
        assert!(!dart.is_convex(1e-12));
    }

    #[test]
    fn test_contains() {
        let cell = unit_square();
        assert!(cell.contains(DVec2::new(0.5, 0.5)));
        assert!(cell.contains(DVec2::new(1.0, 0.5)));
        assert!(!cell.contains(DVec2::new(1.5, 0.5)));
        assert!(!cell.contains(DVec2::new(0.5, -0.01)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_cell_serialization() {
        let cell = unit_square();
        let json = serde_json::to_string(&cell).unwrap();
        let back: VoronoiCell<String> = serde_json::from_str(&json).unwrap();

        assert_eq!(back.site_id, cell.site_id);
        assert_eq!(back.vertices, cell.vertices);
        assert_eq!(back.attributes, "square");
    }
}
