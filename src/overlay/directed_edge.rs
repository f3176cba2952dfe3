use crate::geomgraph::{CoordPos, Direction, Label, Quadrant};
use crate::kernels::{Kernel, Orientation};
use crate::GeoFloat;
use geo_types::Coord;

use std::fmt;

pub(crate) type DirectedEdgeId = usize;
pub(crate) type EdgeId = usize;
pub(crate) type RingId = usize;

/// The direction of an edge end, used to sort the edges leaving a node.
///
/// `EdgeEndKey`s are comparable under the ordering
/// "a has a greater angle with the x-axis than b",
/// which sorts edge ends counter-clockwise around their node.
#[derive(Clone)]
pub(crate) struct EdgeEndKey<F>
where
    F: GeoFloat,
{
    coord_0: Coord<F>,
    coord_1: Coord<F>,
    delta: Coord<F>,
    quadrant: Option<Quadrant>,
}

impl<F: GeoFloat> fmt::Debug for EdgeEndKey<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeEndKey")
            .field(
                "coords",
                &format!("{:?} -> {:?}", &self.coord_0, &self.coord_1),
            )
            .field("quadrant", &self.quadrant)
            .finish()
    }
}

impl<F: GeoFloat> EdgeEndKey<F> {
    pub fn new(coord_0: Coord<F>, coord_1: Coord<F>) -> EdgeEndKey<F> {
        let delta = coord_1 - coord_0;
        let quadrant = Quadrant::new(delta.x, delta.y);
        EdgeEndKey {
            coord_0,
            coord_1,
            delta,
            quadrant,
        }
    }

    pub fn coordinate(&self) -> &Coord<F> {
        &self.coord_0
    }

    pub(crate) fn compare_direction(&self, other: &EdgeEndKey<F>) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        if self.delta == other.delta {
            return Ordering::Equal;
        }

        match (self.quadrant, other.quadrant) {
            (Some(q1), Some(q2)) if q1 > q2 => Ordering::Greater,
            (Some(q1), Some(q2)) if q1 < q2 => Ordering::Less,
            _ => match F::Ker::orient2d(other.coord_0, other.coord_1, self.coord_1) {
                Orientation::Clockwise => Ordering::Less,
                Orientation::CounterClockwise => Ordering::Greater,
                Orientation::Collinear => Ordering::Equal,
            },
        }
    }
}

impl<F> std::cmp::Eq for EdgeEndKey<F> where F: GeoFloat {}

impl<F> std::cmp::PartialEq for EdgeEndKey<F>
where
    F: GeoFloat,
{
    fn eq(&self, other: &EdgeEndKey<F>) -> bool {
        self.delta == other.delta
    }
}

impl<F> std::cmp::PartialOrd for EdgeEndKey<F>
where
    F: GeoFloat,
{
    fn partial_cmp(&self, other: &EdgeEndKey<F>) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<F> std::cmp::Ord for EdgeEndKey<F>
where
    F: GeoFloat,
{
    fn cmp(&self, other: &EdgeEndKey<F>) -> std::cmp::Ordering {
        self.compare_direction(other)
    }
}

/// One traversal direction of an [`Edge`](crate::geomgraph::Edge) in the
/// overlay graph.
///
/// A directed edge knows the arena handle of its underlying edge, its
/// symmetric twin (the same edge walked the other way), and the `next`
/// pointers the ring builders thread through the graph. Its label is oriented
/// for this direction of travel: the reverse edge carries the flipped label.
#[derive(Debug)]
pub(crate) struct DirectedEdge<F>
where
    F: GeoFloat,
{
    edge: EdgeId,
    key: EdgeEndKey<F>,
    label: Label,
    is_forward: bool,
    sym: DirectedEdgeId,
    next: Option<DirectedEdgeId>,
    next_min: Option<DirectedEdgeId>,
    edge_ring: Option<RingId>,
    min_edge_ring: Option<RingId>,
    is_in_result: bool,
    is_visited: bool,
}

impl<F> DirectedEdge<F>
where
    F: GeoFloat,
{
    pub fn new(
        edge: EdgeId,
        coord_0: Coord<F>,
        coord_1: Coord<F>,
        label: Label,
        is_forward: bool,
        sym: DirectedEdgeId,
    ) -> DirectedEdge<F> {
        DirectedEdge {
            edge,
            key: EdgeEndKey::new(coord_0, coord_1),
            label,
            is_forward,
            sym,
            next: None,
            next_min: None,
            edge_ring: None,
            min_edge_ring: None,
            is_in_result: false,
            is_visited: false,
        }
    }

    pub fn edge(&self) -> EdgeId {
        self.edge
    }

    pub fn key(&self) -> &EdgeEndKey<F> {
        &self.key
    }

    pub fn coordinate(&self) -> &Coord<F> {
        self.key.coordinate()
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    pub fn is_forward(&self) -> bool {
        self.is_forward
    }

    pub fn sym(&self) -> DirectedEdgeId {
        self.sym
    }

    pub fn next(&self) -> Option<DirectedEdgeId> {
        self.next
    }

    pub fn set_next(&mut self, next: DirectedEdgeId) {
        self.next = Some(next);
    }

    pub fn next_min(&self) -> Option<DirectedEdgeId> {
        self.next_min
    }

    pub fn set_next_min(&mut self, next_min: DirectedEdgeId) {
        self.next_min = Some(next_min);
    }

    pub fn edge_ring(&self) -> Option<RingId> {
        self.edge_ring
    }

    pub fn set_edge_ring(&mut self, ring: RingId) {
        self.edge_ring = Some(ring);
    }

    pub fn min_edge_ring(&self) -> Option<RingId> {
        self.min_edge_ring
    }

    pub fn set_min_edge_ring(&mut self, ring: RingId) {
        self.min_edge_ring = Some(ring);
    }

    pub fn is_in_result(&self) -> bool {
        self.is_in_result
    }

    pub fn set_in_result(&mut self, is_in_result: bool) {
        self.is_in_result = is_in_result;
    }

    pub fn is_visited(&self) -> bool {
        self.is_visited
    }

    pub fn set_visited(&mut self, is_visited: bool) {
        self.is_visited = is_visited;
    }

    /// A line edge is one whose linework came from a 1-dimensional source,
    /// and which does not bound a result area of either operand.
    pub fn is_line_edge(&self) -> bool {
        let is_line = self.label.is_line(0) || self.label.is_line(1);
        let is_exterior_if_area_0 =
            !self.label.is_geom_area(0) || self.label.all_positions_equal(0, CoordPos::Outside);
        let is_exterior_if_area_1 =
            !self.label.is_geom_area(1) || self.label.all_positions_equal(1, CoordPos::Outside);
        is_line && is_exterior_if_area_0 && is_exterior_if_area_1
    }

    /// An interior area edge lies in the interior of both operands' areas on
    /// both of its sides; it separates nothing and never appears in a result
    /// boundary.
    pub fn is_interior_area_edge(&self) -> bool {
        (0..2).all(|geom_index| {
            self.label.is_geom_area(geom_index)
                && self.label.position(geom_index, Direction::Left) == Some(CoordPos::Inside)
                && self.label.position(geom_index, Direction::Right) == Some(CoordPos::Inside)
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geo_types::coord;

    #[test]
    fn key_ordering_is_ccw_from_positive_x_axis() {
        let origin = coord! { x: 0.0, y: 0.0 };
        let east = EdgeEndKey::<f64>::new(origin, coord! { x: 1.0, y: 0.0 });
        let north_east = EdgeEndKey::<f64>::new(origin, coord! { x: 1.0, y: 1.0 });
        let north_west = EdgeEndKey::<f64>::new(origin, coord! { x: -1.0, y: 1.0 });
        let south = EdgeEndKey::<f64>::new(origin, coord! { x: 0.0, y: -1.0 });

        assert!(east < north_east);
        assert!(north_east < north_west);
        assert!(north_west < south);
    }

    #[test]
    fn equal_directions_compare_equal() {
        let origin = coord! { x: 0.0, y: 0.0 };
        let key_1 = EdgeEndKey::<f64>::new(origin, coord! { x: 1.0, y: 1.0 });
        let key_2 = EdgeEndKey::<f64>::new(origin, coord! { x: 1.0, y: 1.0 });
        assert_eq!(key_1.cmp(&key_2), std::cmp::Ordering::Equal);
    }
}
