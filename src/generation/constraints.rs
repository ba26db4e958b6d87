//! Half-plane constraints around one site
//!
//! Every constraint is a line given in point-angle-distance form relative to
//! the site: the line passes through `reference` and is perpendicular to the
//! vector from the site to `reference`. The site's cell lies on the site's
//! side of every constraint line.

use glam::DVec2;
use std::f64::consts::TAU;

use crate::extent::Extent;

/// Which side of the extent a fence constraint closes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FenceSide {
    East,
    North,
    West,
    South,
}

impl FenceSide {
    /// All sides, in generation order
    pub const ALL: [FenceSide; 4] = [
        FenceSide::East,
        FenceSide::North,
        FenceSide::West,
        FenceSide::South,
    ];
}

/// Origin of a constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Perpendicular bisector between the site and the neighbor at this index
    Bisector { neighbor: usize },
    /// Artificial boundary just outside the site extent
    Fence(FenceSide),
}

/// One half-plane boundary candidate for the site being processed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    /// Position in generation order; the secondary key when two borders tie
    pub order: usize,
    pub kind: ConstraintKind,
    /// A point on the boundary line, the foot of the perpendicular from the site
    pub reference: DVec2,
    /// Angle of `reference - site`, in `[0, 2π)`
    pub angle: f64,
    /// Distance from the site to `reference`
    pub distance: f64,
}

impl Constraint {
    /// Measure a constraint from the site at `center`
    ///
    /// Returns `None` for a zero-length constraint, which has no direction.
    pub fn new(order: usize, kind: ConstraintKind, center: DVec2, reference: DVec2) -> Option<Self> {
        let offset = reference - center;
        let distance = offset.length();
        if !(distance > 0.0) {
            return None;
        }

        Some(Self {
            order,
            kind,
            reference,
            angle: normalize_angle(offset.y.atan2(offset.x)),
            distance,
        })
    }
}

/// Wrap an angle into `[0, 2π)`
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative angles up to exactly 2π
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Distance of the fence lines outside the extent
///
/// Scaled by the x-span; a diagram whose sites all share one x falls back to
/// the y-span so that the fences do not collapse onto the sites.
pub fn fence_offset(extent: &Extent, ratio: f64) -> f64 {
    let span = if extent.width() > 0.0 {
        extent.width()
    } else {
        extent.height()
    };
    span * ratio
}

/// Produce every constraint for the site at `center`
///
/// One bisector per site at a different location (coincident sites, including
/// the center itself, are skipped) followed by four fences in
/// east, north, west, south order.
pub fn generate_constraints(
    center: DVec2,
    sites: &[DVec2],
    extent: &Extent,
    fence_offset: f64,
) -> Vec<Constraint> {
    let mut constraints = Vec::with_capacity(sites.len() + 4);

    for (neighbor, &site) in sites.iter().enumerate() {
        if site == center {
            continue;
        }
        let midpoint = (center + site) * 0.5;
        let order = constraints.len();
        if let Some(constraint) =
            Constraint::new(order, ConstraintKind::Bisector { neighbor }, center, midpoint)
        {
            constraints.push(constraint);
        }
    }

    for side in FenceSide::ALL {
        let reference = match side {
            FenceSide::East => DVec2::new(extent.xmax + fence_offset, center.y),
            FenceSide::North => DVec2::new(center.x, extent.ymax + fence_offset),
            FenceSide::West => DVec2::new(extent.xmin - fence_offset, center.y),
            FenceSide::South => DVec2::new(center.x, extent.ymin - fence_offset),
        };
        let order = constraints.len();
        if let Some(constraint) = Constraint::new(order, ConstraintKind::Fence(side), center, reference) {
            constraints.push(constraint);
        }
    }

    constraints
}
