//! Input sites
//!
//! A site is a planar point carrying an opaque attribute payload that is
//! copied unchanged onto the site's cell.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single input point of the diagram
///
/// Sites are read once at the start of a build and never mutated. The `id`
/// is the caller's identity for the site; the builder does not require ids to
/// be unique, but cell lookups by id return the first match.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Site<A> {
    /// Caller-assigned identifier, carried onto the cell
    pub id: usize,
    /// Location of the site in the plane
    pub position: DVec2,
    /// Opaque payload, copied unchanged onto the cell
    pub attributes: A,
}

impl<A> Site<A> {
    /// Create a new site
    pub fn new(id: usize, x: f64, y: f64, attributes: A) -> Self {
        Self {
            id,
            position: DVec2::new(x, y),
            attributes,
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.position.y
    }
}

/// Build sites from `(x, y, attributes)` records, numbering them in feed order
///
/// # Example
///
/// ```rust
/// use radial_voronoi::sites_from_records;
///
/// let sites = sites_from_records(vec![(0.0, 0.0, "a"), (10.0, 0.0, "b")]);
/// assert_eq!(sites[1].id, 1);
/// assert_eq!(sites[1].attributes, "b");
/// ```
pub fn sites_from_records<A, I>(records: I) -> Vec<Site<A>>
where
    I: IntoIterator<Item = (f64, f64, A)>,
{
    records
        .into_iter()
        .enumerate()
        .map(|(id, (x, y, attributes))| Site::new(id, x, y, attributes))
        .collect()
}

/// Build sites from bare points; each site's attribute is its feed index
pub fn sites_from_points(points: &[DVec2]) -> Vec<Site<usize>> {
    points
        .iter()
        .enumerate()
        .map(|(id, p)| Site {
            id,
            position: *p,
            attributes: id,
        })
        .collect()
}
