use crate::kernels::{Kernel, Orientation};
use crate::utils::lex_cmp;
use crate::GeoNum;
use geo_types::{CoordNum, LineString};

/// How a linestring is wound, clockwise or counter-clockwise
#[derive(PartialEq, Clone, Debug, Eq, Copy)]
pub enum WindingOrder {
    Clockwise,
    CounterClockwise,
}

/// Twice the signed area of the ring. Positive for counter-clockwise rings.
pub(crate) fn twice_signed_ring_area<T: CoordNum>(linestring: &LineString<T>) -> T {
    if linestring.0.len() < 2 {
        return T::zero();
    }
    let mut tmp = T::zero();
    for line in linestring.lines() {
        tmp = tmp + (line.start.x * line.end.y - line.end.x * line.start.y);
    }
    tmp
}

/// Calculate, and work with, the winding order
pub trait Winding {
    type Scalar: CoordNum;

    /// Return the winding order of this object, if it has one.
    ///
    /// Uses a robust orientation predicate at the lexicographically smallest
    /// vertex, so nearly-collinear chains do not flip the answer.
    fn winding_order(&self) -> Option<WindingOrder>;

    /// True iff this is wound clockwise
    fn is_cw(&self) -> bool {
        self.winding_order() == Some(WindingOrder::Clockwise)
    }

    /// True iff this is wound counterclockwise
    fn is_ccw(&self) -> bool {
        self.winding_order() == Some(WindingOrder::CounterClockwise)
    }

    /// Change the winding order so that it is in this order
    fn make_winding_order(&mut self, winding_order: WindingOrder);
}

impl<T: GeoNum> Winding for LineString<T> {
    type Scalar = T;

    fn winding_order(&self) -> Option<WindingOrder> {
        // If the linestring has at most 3 points (i.e. at most 2 distinct
        // points for a closed ring) the winding order is unspecified.
        if self.0.len() < 4 || !self.is_closed() {
            return None;
        }

        // ignore the duplicated closing point when scanning
        let pts = &self.0[..self.0.len() - 1];
        let i = pts
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| lex_cmp(a, b))
            .map(|(idx, _)| idx)
            .unwrap();

        let mut next = (i + 1) % pts.len();
        while pts[next] == pts[i] {
            if next == i {
                // not enough unique coords to compute orientation
                return None;
            }
            next = (next + 1) % pts.len();
        }

        let mut prev = (i + pts.len() - 1) % pts.len();
        while pts[prev] == pts[i] {
            prev = (prev + pts.len() - 1) % pts.len();
        }

        match T::Ker::orient2d(pts[prev], pts[i], pts[next]) {
            Orientation::CounterClockwise => Some(WindingOrder::CounterClockwise),
            Orientation::Clockwise => Some(WindingOrder::Clockwise),
            Orientation::Collinear => None,
        }
    }

    fn make_winding_order(&mut self, winding_order: WindingOrder) {
        if let Some(current) = self.winding_order() {
            if current != winding_order {
                self.0.reverse();
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geo_types::line_string;

    #[test]
    fn ring_winding_order() {
        let ccw = line_string![(x: 0., y: 0.), (x: 2., y: 0.), (x: 1., y: 2.), (x: 0., y: 0.)];
        assert_eq!(ccw.winding_order(), Some(WindingOrder::CounterClockwise));
        assert!(ccw.is_ccw());

        let mut cw = ccw.clone();
        cw.0.reverse();
        assert_eq!(cw.winding_order(), Some(WindingOrder::Clockwise));

        cw.make_winding_order(WindingOrder::CounterClockwise);
        assert!(cw.is_ccw());
    }

    #[test]
    fn signed_area_sign_matches_winding() {
        let ccw = line_string![(x: 0., y: 0.), (x: 2., y: 0.), (x: 1., y: 2.), (x: 0., y: 0.)];
        assert!(twice_signed_ring_area(&ccw) > 0.);
        let mut cw = ccw;
        cw.0.reverse();
        assert!(twice_signed_ring_area(&cw) < 0.);
    }
}
