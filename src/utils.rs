//! Internal utility functions and predicates shared across the graph
//! modules.

use crate::GeoFloat;
use geo_types::{Coord, CoordNum, Line};
use std::cmp::Ordering;

/// Compare two coordinates lexicographically: first by the x coordinate, then
/// by the y coordinate. Expects none of the coordinates to be NaN.
#[inline]
pub fn lex_cmp<T: CoordNum>(p: &Coord<T>, q: &Coord<T>) -> Ordering {
    p.x.partial_cmp(&q.x)
        .unwrap()
        .then_with(|| p.y.partial_cmp(&q.y).unwrap())
}

/// Euclidean distance between two coordinates.
#[inline]
pub fn coord_distance<F: GeoFloat>(p: Coord<F>, q: Coord<F>) -> F {
    ((p.x - q.x) * (p.x - q.x) + (p.y - q.y) * (p.y - q.y)).sqrt()
}

/// Distance from `p` to the closest point of the segment `line`.
pub fn point_segment_distance<F: GeoFloat>(p: Coord<F>, line: Line<F>) -> F {
    if line.start == line.end {
        return coord_distance(p, line.start);
    }

    let d = line.delta();
    let len2 = d.x * d.x + d.y * d.y;
    let r = ((p.x - line.start.x) * d.x + (p.y - line.start.y) * d.y) / len2;

    if r <= F::zero() {
        return coord_distance(p, line.start);
    }
    if r >= F::one() {
        return coord_distance(p, line.end);
    }

    let s = ((line.start.y - p.y) * d.x - (line.start.x - p.x) * d.y) / len2;
    s.abs() * len2.sqrt()
}

#[cfg(test)]
mod test {
    use super::*;
    use geo_types::coord;

    #[test]
    fn lex_cmp_orders_by_x_then_y() {
        let a = coord! { x: 0.0, y: 5.0 };
        let b = coord! { x: 1.0, y: 0.0 };
        let c = coord! { x: 1.0, y: 2.0 };
        assert_eq!(lex_cmp(&a, &b), Ordering::Less);
        assert_eq!(lex_cmp(&b, &c), Ordering::Less);
        assert_eq!(lex_cmp(&c, &c), Ordering::Equal);
    }

    #[test]
    fn point_segment_distance_projects_onto_interior() {
        let line = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 });
        assert_eq!(point_segment_distance(coord! { x: 5.0, y: 3.0 }, line), 3.0);
        // beyond the end, distance is to the endpoint
        assert_eq!(
            point_segment_distance(coord! { x: 14.0, y: 3.0 }, line),
            5.0
        );
    }
}
