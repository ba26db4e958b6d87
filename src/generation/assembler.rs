//! Cell assembly from resolved borders

use glam::DVec2;

use super::resolver::ResolvedBorder;

/// Check whether two vertices count as one under the configured tolerance
///
/// A zero epsilon means exact coordinate equality.
#[inline]
pub fn same_vertex(a: DVec2, b: DVec2, epsilon: f64) -> bool {
    if epsilon > 0.0 {
        (a - b).abs().max_element() <= epsilon
    } else {
        a == b
    }
}

/// Turn the ordered borders of one site into a polygon ring
///
/// The ring is open (its first vertex is not repeated) and runs
/// counter-clockwise. Consecutive duplicates are dropped, including a last
/// vertex that repeats the first.
pub fn assemble_ring(center: DVec2, borders: &[ResolvedBorder], epsilon: f64) -> Vec<DVec2> {
    let mut ring: Vec<DVec2> = Vec::with_capacity(borders.len());

    for border in borders {
        let vertex = border.vertex(center);
        match ring.last() {
            Some(&last) if same_vertex(last, vertex, epsilon) => {}
            _ => ring.push(vertex),
        }
    }

    while ring.len() > 1 && same_vertex(ring[0], ring[ring.len() - 1], epsilon) {
        ring.pop();
    }

    ring
}
