//! Radial half-plane resolver
//!
//! Walks the constraints of one site counter-clockwise, starting from the
//! closest one. At every step the current border is intersected with each
//! remaining constraint that lies to its left (angular offset strictly
//! between 0 and π); the intersection reached first when walking CCW along
//! the current border decides the next border. The walk ends when it comes
//! back to the starting border.
//!
//! Each step scans the whole active set, so one site costs O(n²) and a
//! diagram O(n³).

use glam::DVec2;
use std::f64::consts::{PI, TAU};

use super::constraints::Constraint;

/// A constraint annotated with its intersection with the next border
///
/// `iangle` is measured from the site like `angle`, but is not wrapped into
/// `[0, 2π)`: it is the current border's angle plus an offset in `(-π/2, π/2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedBorder {
    pub constraint: Constraint,
    pub iangle: f64,
    pub idistance: f64,
}

impl ResolvedBorder {
    /// The cell vertex where this border meets the next one
    #[inline]
    pub fn vertex(&self, center: DVec2) -> DVec2 {
        center + self.idistance * DVec2::new(self.iangle.cos(), self.iangle.sin())
    }
}

/// Intersection of a candidate line with the current border, if the candidate
/// lies to the left of the border
///
/// Returns `(iangle, idistance)` of the intersection point relative to the site.
fn intersect(current: &Constraint, candidate: &Constraint) -> Option<(f64, f64)> {
    let mut delta = candidate.angle - current.angle;
    if delta < 0.0 {
        delta += TAU;
    }
    if !(delta > 0.0 && delta < PI) {
        return None;
    }

    let offset = (candidate.distance / current.distance - delta.cos()).atan2(delta.sin());
    let idistance = current.distance / offset.cos();
    Some((current.angle + offset, idistance))
}

/// Sweep state for one site
///
/// Iterating yields the resolved borders in CCW order. The active set is an
/// unordered vector; constraints chosen as the next border are swap-removed.
#[derive(Debug, Clone)]
pub struct RadialSweep {
    active: Vec<Constraint>,
    start: Option<Constraint>,
    current: Option<Constraint>,
}

impl RadialSweep {
    /// Start a sweep at the closest constraint
    ///
    /// The closest line always bounds the cell: its foot point is no farther
    /// from the site than any other line. Ties go to the lower generation order.
    pub fn new(constraints: Vec<Constraint>) -> Self {
        let start = constraints.iter().copied().reduce(|best, c| {
            if c.distance < best.distance || (c.distance == best.distance && c.order < best.order) {
                c
            } else {
                best
            }
        });

        Self {
            active: constraints,
            start,
            current: start,
        }
    }

    /// Pick the next border to the left of `current`
    ///
    /// Smallest `iangle` wins; equal angles fall back to generation order.
    fn next_border(&self, current: &Constraint) -> Option<(usize, f64, f64)> {
        let mut best: Option<(usize, f64, f64)> = None;

        for (index, candidate) in self.active.iter().enumerate() {
            let Some((iangle, idistance)) = intersect(current, candidate) else {
                continue;
            };
            let better = match best {
                None => true,
                Some((best_index, best_iangle, _)) => {
                    iangle < best_iangle
                        || (iangle == best_iangle && candidate.order < self.active[best_index].order)
                }
            };
            if better {
                best = Some((index, iangle, idistance));
            }
        }

        best
    }
}

impl Iterator for RadialSweep {
    type Item = ResolvedBorder;

    fn next(&mut self) -> Option<ResolvedBorder> {
        let current = self.current.take()?;
        let start = self.start?;

        let Some((index, iangle, idistance)) = self.next_border(&current) else {
            tracing::warn!(
                border = current.order,
                remaining = self.active.len(),
                "radial sweep found no border to the left; cell left open"
            );
            return None;
        };

        let chosen = self.active.swap_remove(index);
        if chosen.order != start.order && !self.active.is_empty() {
            self.current = Some(chosen);
        }

        Some(ResolvedBorder {
            constraint: current,
            iangle,
            idistance,
        })
    }
}

/// Resolve the ordered borders of one site's cell
pub fn resolve_borders(constraints: Vec<Constraint>) -> Vec<ResolvedBorder> {
    RadialSweep::new(constraints).collect()
}
