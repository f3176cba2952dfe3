use super::{Depth, EdgeIntersection, Label, LineIntersection, RobustLineIntersector};
use crate::GeoFloat;
use geo_types::{Coord, Line};

use std::collections::BTreeSet;

/// An `Edge` represents a one dimensional line in a geometry.
///
/// Edges start out as chains of an operand's vertices and are progressively
/// noded (via their `edge_intersections`), split, and merged in the edge
/// table until every edge meets other edges only at its endpoints.
#[derive(Debug)]
pub(crate) struct Edge<F: GeoFloat> {
    /// `coordinates` of the line geometry
    coords: Vec<Coord<F>>,

    /// other edges that this edge intersects with
    edge_intersections: BTreeSet<EdgeIntersection<F>>,

    /// where the line's topological classification to the two geometries is recorded
    label: Label,

    /// per-operand area coverage accumulated while merging duplicate edges
    depth: Depth,

    /// set when depth deltas demoted every area labelling to a line
    is_collapsed: bool,

    /// set once the edge's linework has been claimed by the result
    is_in_result: bool,

    /// whether the edge is covered by the result area; `None` until computed
    covered: Option<bool>,
}

impl<F: GeoFloat> Edge<F> {
    /// Create a new Edge.
    ///
    /// - `coords` a *non-empty* Vec of Coordinates
    /// - `label` an appropriately dimensioned topology label for the Edge. See [`TopologyPosition`](super::TopologyPosition)
    ///    for details
    pub(crate) fn new(mut coords: Vec<Coord<F>>, label: Label) -> Edge<F> {
        assert!(!coords.is_empty(), "Can't add empty edge");
        // Once set, `edge.coords` never changes length.
        coords.shrink_to_fit();
        Edge {
            coords,
            label,
            edge_intersections: BTreeSet::new(),
            depth: Depth::new(),
            is_collapsed: false,
            is_in_result: false,
            covered: None,
        }
    }

    pub(crate) fn label(&self) -> &Label {
        &self.label
    }

    pub(crate) fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    pub(crate) fn depth(&self) -> &Depth {
        &self.depth
    }

    pub(crate) fn depth_mut(&mut self) -> &mut Depth {
        &mut self.depth
    }

    pub fn coords(&self) -> &[Coord<F>] {
        &self.coords
    }

    pub fn is_in_result(&self) -> bool {
        self.is_in_result
    }

    pub fn set_in_result(&mut self, is_in_result: bool) {
        self.is_in_result = is_in_result;
    }

    pub fn is_covered(&self) -> bool {
        self.covered == Some(true)
    }

    pub fn is_covered_set(&self) -> bool {
        self.covered.is_some()
    }

    pub fn set_covered(&mut self, covered: bool) {
        self.covered = Some(covered);
    }

    pub fn edge_intersections(&self) -> &BTreeSet<EdgeIntersection<F>> {
        &self.edge_intersections
    }

    pub fn edge_intersections_mut(&mut self) -> &mut BTreeSet<EdgeIntersection<F>> {
        &mut self.edge_intersections
    }

    pub fn add_edge_intersection_list_endpoints(&mut self) {
        let max_segment_index = self.coords().len() - 1;
        let first_coord = self.coords()[0];
        let max_coord = self.coords()[max_segment_index];
        self.edge_intersections_mut()
            .insert(EdgeIntersection::new(first_coord, 0, F::zero()));
        self.edge_intersections_mut().insert(EdgeIntersection::new(
            max_coord,
            max_segment_index,
            F::zero(),
        ));
    }

    pub fn is_closed(&self) -> bool {
        self.coords().first() == self.coords().last()
    }

    pub fn is_pointwise_equal(&self, other: &Edge<F>) -> bool {
        self.coords == other.coords
    }

    /// Adds EdgeIntersections for one or both intersections found for a segment of an edge to the
    /// edge intersection list.
    pub fn add_intersections(
        &mut self,
        intersection: LineIntersection<F>,
        line: Line<F>,
        segment_index: usize,
    ) {
        match intersection {
            LineIntersection::SinglePoint { intersection, .. } => {
                self.add_intersection(intersection, line, segment_index);
            }
            LineIntersection::Collinear { intersection } => {
                self.add_intersection(intersection.start, line, segment_index);
                self.add_intersection(intersection.end, line, segment_index);
            }
        }
    }

    /// Add an EdgeIntersection for `intersection`.
    ///
    /// An intersection that falls exactly on a vertex of the edge is normalized to use the higher
    /// of the two possible `segment_index`
    pub fn add_intersection(
        &mut self,
        intersection_coord: Coord<F>,
        line: Line<F>,
        segment_index: usize,
    ) {
        let mut normalized_segment_index = segment_index;
        let mut distance = RobustLineIntersector::compute_edge_distance(intersection_coord, line);

        let next_segment_index = normalized_segment_index + 1;

        if next_segment_index < self.coords.len() {
            let next_coord = self.coords[next_segment_index];
            if intersection_coord == next_coord {
                normalized_segment_index = next_segment_index;
                distance = F::zero();
            }
        }
        self.edge_intersections.insert(EdgeIntersection::new(
            intersection_coord,
            normalized_segment_index,
            distance,
        ));
    }

    /// Split this edge at each of its intersection points, appending the
    /// pieces to `split_edges`. Each piece carries a copy of this edge's
    /// label.
    pub fn add_split_edges(&mut self, split_edges: &mut Vec<Edge<F>>) {
        self.add_edge_intersection_list_endpoints();

        let mut intersections = self.edge_intersections.iter();
        // there are always at least the two endpoint intersections
        let mut prev = intersections
            .next()
            .expect("intersection list must contain the edge endpoints");
        for next in intersections {
            let split_edge = self.create_split_edge(prev, next);
            // snapped intersections can degenerate a piece to a single point
            if split_edge.coords().iter().any(|c| *c != split_edge.coords()[0]) {
                split_edges.push(split_edge);
            }
            prev = next;
        }
    }

    fn create_split_edge(
        &self,
        intersection_0: &EdgeIntersection<F>,
        intersection_1: &EdgeIntersection<F>,
    ) -> Edge<F> {
        let mut coords = Vec::with_capacity(
            intersection_1.segment_index() - intersection_0.segment_index() + 2,
        );
        coords.push(intersection_0.coordinate());

        // if the last intersection coincides with the start of its segment,
        // that vertex is the final point and must not be duplicated
        let last_segment_start = self.coords[intersection_1.segment_index()];
        let use_final_intersection = intersection_1.distance() > F::zero()
            || intersection_1.coordinate() != last_segment_start;

        for i in (intersection_0.segment_index() + 1)..=intersection_1.segment_index() {
            coords.push(self.coords[i]);
        }
        if use_final_intersection {
            coords.push(intersection_1.coordinate());
        }

        Edge::new(coords, self.label.clone())
    }

    pub fn is_collapsed(&self) -> bool {
        self.is_collapsed
    }

    pub fn set_collapsed(&mut self, is_collapsed: bool) {
        self.is_collapsed = is_collapsed;
    }

    /// A replacement for a collapsed edge: the same linework, labelled as a
    /// line.
    pub fn collapsed_edge(&self) -> Edge<F> {
        Edge::new(self.coords.clone(), self.label.to_line_label())
    }
}

#[cfg(test)]
mod test {
    use super::super::TopologyPosition;
    use super::*;
    use crate::CoordPos;
    use geo_types::coord;

    fn line_edge(coords: Vec<Coord<f64>>) -> Edge<f64> {
        Edge::new(
            coords,
            Label::new(0, TopologyPosition::line_or_point(CoordPos::Inside)),
        )
    }

    #[test]
    fn split_at_interior_intersection() {
        let mut edge = line_edge(vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 10.0, y: 0.0 },
        ]);
        let line = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 });
        edge.add_intersection(coord! { x: 4.0, y: 0.0 }, line, 0);

        let mut split_edges = Vec::new();
        edge.add_split_edges(&mut split_edges);
        assert_eq!(split_edges.len(), 2);
        assert_eq!(
            split_edges[0].coords(),
            &[coord! { x: 0.0, y: 0.0 }, coord! { x: 4.0, y: 0.0 }]
        );
        assert_eq!(
            split_edges[1].coords(),
            &[coord! { x: 4.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 }]
        );
    }

    #[test]
    fn split_without_interior_intersections_is_identity() {
        let mut edge = line_edge(vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 5.0, y: 5.0 },
            coord! { x: 10.0, y: 0.0 },
        ]);
        let mut split_edges = Vec::new();
        edge.add_split_edges(&mut split_edges);
        assert_eq!(split_edges.len(), 1);
        assert_eq!(split_edges[0].coords(), edge.coords());
    }

    #[test]
    fn intersection_at_vertex_is_normalized() {
        let mut edge = line_edge(vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 5.0, y: 0.0 },
            coord! { x: 10.0, y: 0.0 },
        ]);
        let line = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 5.0, y: 0.0 });
        edge.add_intersection(coord! { x: 5.0, y: 0.0 }, line, 0);

        let mut split_edges = Vec::new();
        edge.add_split_edges(&mut split_edges);
        assert_eq!(split_edges.len(), 2);
        assert_eq!(
            split_edges[0].coords(),
            &[coord! { x: 0.0, y: 0.0 }, coord! { x: 5.0, y: 0.0 }]
        );
        assert_eq!(
            split_edges[1].coords(),
            &[coord! { x: 5.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 }]
        );
    }
}
