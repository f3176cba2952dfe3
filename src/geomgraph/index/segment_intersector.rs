use super::super::{Edge, LineIntersection, LineIntersector};
use crate::utils::{coord_distance, point_segment_distance};
use crate::GeoFloat;
use geo_types::{Coord, Line};

use std::cell::RefCell;

/// Computes the intersection of line segments and adds the intersection to
/// the [`Edge`s](Edge) containing the segments.
///
/// Proper intersections are always recorded: the overlay graph needs a node
/// wherever edges cross, not only where they touch.
///
/// When a `nearness_tolerance` is set (the snap-rounding noder does this),
/// segment endpoints lying within the tolerance of another segment's interior
/// are also recorded as intersections, so that snapping cannot create
/// crossings the classic detector would miss.
pub(crate) struct SegmentIntersector<F>
where
    F: GeoFloat,
{
    line_intersector: Box<dyn LineIntersector<F>>,
    nearness_tolerance: Option<F>,
}

impl<F> SegmentIntersector<F>
where
    F: GeoFloat,
{
    fn is_adjacent_segments(i1: usize, i2: usize) -> bool {
        let difference = if i1 > i2 { i1 - i2 } else { i2 - i1 };
        difference == 1
    }

    pub fn new(line_intersector: Box<dyn LineIntersector<F>>) -> SegmentIntersector<F> {
        SegmentIntersector {
            line_intersector,
            nearness_tolerance: None,
        }
    }

    /// Also treat near-vertex cases within `tolerance` as intersections.
    pub fn set_nearness_tolerance(&mut self, tolerance: F) {
        self.nearness_tolerance = Some(tolerance);
    }

    /// A trivial intersection is an apparent self-intersection which in fact is simply the point
    /// shared by adjacent line segments.  Note that closed edges require a special check for the
    /// point shared by the beginning and end segments.
    fn is_trivial_intersection(
        &self,
        intersection: LineIntersection<F>,
        edge0: &RefCell<Edge<F>>,
        segment_index_0: usize,
        edge1: &RefCell<Edge<F>>,
        segment_index_1: usize,
    ) -> bool {
        if edge0.as_ptr() != edge1.as_ptr() {
            return false;
        }

        if matches!(intersection, LineIntersection::Collinear { .. }) {
            return false;
        }

        if Self::is_adjacent_segments(segment_index_0, segment_index_1) {
            return true;
        }

        let edge0 = edge0.borrow();
        if edge0.is_closed() {
            // first and last coords in a ring are adjacent
            let max_segment_index = edge0.coords().len() - 1;
            if (segment_index_0 == 0 && segment_index_1 == max_segment_index)
                || (segment_index_1 == 0 && segment_index_0 == max_segment_index)
            {
                return true;
            }
        }

        false
    }

    pub fn add_intersections(
        &mut self,
        edge0: &RefCell<Edge<F>>,
        segment_index_0: usize,
        edge1: &RefCell<Edge<F>>,
        segment_index_1: usize,
    ) {
        // avoid a segment spuriously "intersecting" with itself
        if edge0.as_ptr() == edge1.as_ptr() && segment_index_0 == segment_index_1 {
            return;
        }

        let line_0 = Line::new(
            edge0.borrow().coords()[segment_index_0],
            edge0.borrow().coords()[segment_index_0 + 1],
        );
        let line_1 = Line::new(
            edge1.borrow().coords()[segment_index_1],
            edge1.borrow().coords()[segment_index_1 + 1],
        );

        let intersection = self.line_intersector.compute_intersection(line_0, line_1);

        if self.nearness_tolerance.is_some() {
            self.process_near_vertices(
                edge0,
                segment_index_0,
                line_0,
                edge1,
                segment_index_1,
                line_1,
            );
        }

        let Some(intersection) = intersection else {
            return;
        };

        if !self.is_trivial_intersection(
            intersection,
            edge0,
            segment_index_0,
            edge1,
            segment_index_1,
        ) {
            // In the case of self-noding, `edge0` might alias `edge1`, so it's imperative that
            // the mutable borrows are short lived and do not overlap.
            edge0
                .borrow_mut()
                .add_intersections(intersection, line_0, segment_index_0);

            edge1
                .borrow_mut()
                .add_intersections(intersection, line_1, segment_index_1);
        }
    }

    /// Snap-rounding support: record an endpoint of either segment as an
    /// intersection on the other segment when it lies within the nearness
    /// tolerance of that segment's interior.
    fn process_near_vertices(
        &mut self,
        edge0: &RefCell<Edge<F>>,
        segment_index_0: usize,
        line_0: Line<F>,
        edge1: &RefCell<Edge<F>>,
        segment_index_1: usize,
        line_1: Line<F>,
    ) {
        if edge0.as_ptr() == edge1.as_ptr() {
            return;
        }
        self.process_near_vertex(line_0.start, edge1, segment_index_1, line_1);
        self.process_near_vertex(line_0.end, edge1, segment_index_1, line_1);
        self.process_near_vertex(line_1.start, edge0, segment_index_0, line_0);
        self.process_near_vertex(line_1.end, edge0, segment_index_0, line_0);
    }

    /// A vertex is "near" a segment when it is at least the tolerance away
    /// from both segment endpoints, but within the tolerance of the segment
    /// itself.
    fn process_near_vertex(
        &mut self,
        vertex: Coord<F>,
        edge: &RefCell<Edge<F>>,
        segment_index: usize,
        line: Line<F>,
    ) {
        let tolerance = self.nearness_tolerance.unwrap();
        if coord_distance(vertex, line.start) < tolerance {
            return;
        }
        if coord_distance(vertex, line.end) < tolerance {
            return;
        }
        if point_segment_distance(vertex, line) < tolerance {
            edge.borrow_mut()
                .add_intersection(vertex, line, segment_index);
        }
    }
}
