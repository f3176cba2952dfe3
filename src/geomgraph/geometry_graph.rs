use super::{
    index::{EdgeSetIntersector, RStarEdgeSetIntersector, SegmentIntersector},
    CoordNode, CoordPos, Direction, Edge, Label, LineIntersector, PlanarGraph, TopologyPosition,
};
use crate::precision_model::PrecisionModel;
use crate::winding_order::{Winding, WindingOrder};
use crate::GeoFloat;
use geo_types::{Coord, Geometry, Line, LineString, Point, Polygon};

/// The topology graph of a single overlay operand.
///
/// The graph contains nodes and edges corresponding to the vertices and line
/// segments of the operand [`Geometry`]. Each component is labeled with its
/// topological location relative to the source geometry.
///
/// Note that there is no requirement that points of self-intersection be a
/// vertex. Thus, to obtain a correct topology graph, the operands must be
/// self-noded before constructing their graphs.
///
/// Two fundamental operations are supported by topology graphs:
///   - Computing the intersections between all the edges and nodes of a single graph
///   - Computing the intersections between the edges and nodes of two different graphs
pub(crate) struct GeometryGraph<'a, F>
where
    F: GeoFloat,
{
    arg_index: usize,
    parent_geometry: &'a Geometry<F>,
    precision_model: PrecisionModel,
    use_boundary_determination_rule: bool,
    has_computed_self_nodes: bool,
    planar_graph: PlanarGraph<F>,
}

/// PlanarGraph delegations
///
/// In JTS, which is written in Java, GeometryGraph inherits from PlanarGraph. Here in Rust land we
/// use composition and delegation to the same effect.
impl<F> GeometryGraph<'_, F>
where
    F: GeoFloat,
{
    pub(crate) fn edges(&self) -> &[std::rc::Rc<std::cell::RefCell<Edge<F>>>] {
        self.planar_graph.edges()
    }

    pub(crate) fn insert_edge(&mut self, edge: Edge<F>) {
        self.planar_graph.insert_edge(edge)
    }

    pub(crate) fn is_boundary_node(&self, coord: Coord<F>) -> bool {
        self.planar_graph.is_boundary_node(self.arg_index, coord)
    }

    pub(crate) fn add_node_with_coordinate(&mut self, coord: Coord<F>) -> &mut CoordNode<F> {
        self.planar_graph.add_node_with_coordinate(coord)
    }

    pub(crate) fn nodes_iter(&self) -> impl Iterator<Item = &CoordNode<F>> {
        self.planar_graph.nodes.iter()
    }
}

impl<'a, F> GeometryGraph<'a, F>
where
    F: GeoFloat + rstar::RTreeNum,
{
    pub(crate) fn new(
        arg_index: usize,
        parent_geometry: &'a Geometry<F>,
        precision_model: PrecisionModel,
    ) -> Self {
        let mut graph = GeometryGraph {
            arg_index,
            parent_geometry,
            precision_model,
            use_boundary_determination_rule: true,
            has_computed_self_nodes: false,
            planar_graph: PlanarGraph::new(),
        };
        graph.add_geometry(parent_geometry);
        graph
    }

    pub(crate) fn geometry(&self) -> &'a Geometry<F> {
        self.parent_geometry
    }

    /// Determine whether a component (node or edge) that appears multiple times in elements
    /// of a Multi-Geometry is in the boundary or the interior of the Geometry
    pub fn determine_boundary(boundary_count: usize) -> CoordPos {
        // For now, we only support the SFS "Mod-2 Rule"
        // We could make this configurable if we wanted to support alternative boundary rules.
        if boundary_count % 2 == 1 {
            CoordPos::OnBoundary
        } else {
            CoordPos::Inside
        }
    }

    fn make_precise(&self, coord: Coord<F>) -> Coord<F> {
        self.precision_model.make_precise(coord)
    }

    fn add_geometry(&mut self, geometry: &Geometry<F>) {
        use crate::HasDimensions;
        if geometry.is_empty() {
            return;
        }
        match geometry {
            Geometry::Line(line) => self.add_line(line),
            Geometry::Rect(rect) => {
                self.add_polygon(&rect.to_polygon());
            }
            Geometry::Triangle(triangle) => {
                self.add_polygon(&triangle.to_polygon());
            }
            Geometry::Point(point) => {
                self.add_point(point);
            }
            Geometry::Polygon(polygon) => self.add_polygon(polygon),
            Geometry::LineString(line_string) => self.add_line_string(line_string),
            Geometry::MultiPoint(multi_point) => {
                for point in &multi_point.0 {
                    self.add_point(point);
                }
            }
            Geometry::MultiPolygon(multi_polygon) => {
                // check if this Geometry should obey the Boundary Determination Rule
                // all collections except MultiPolygons obey the rule
                self.use_boundary_determination_rule = false;
                for polygon in &multi_polygon.0 {
                    self.add_polygon(polygon);
                }
            }
            Geometry::MultiLineString(multi_line_string) => {
                for line_string in &multi_line_string.0 {
                    self.add_line_string(line_string);
                }
            }
            Geometry::GeometryCollection(geometry_collection) => {
                for geometry in geometry_collection {
                    self.add_geometry(geometry);
                }
            }
        }
    }

    fn add_polygon_ring(
        &mut self,
        linear_ring: &LineString<F>,
        cw_left: CoordPos,
        cw_right: CoordPos,
    ) {
        debug_assert!(linear_ring.is_closed());
        if linear_ring.0.is_empty() {
            return;
        }

        let mut coords: Vec<Coord<F>> = Vec::with_capacity(linear_ring.0.len());
        // snap to the noding grid and remove repeated coords
        for coord in &linear_ring.0 {
            let coord = self.make_precise(*coord);
            if coords.last() != Some(&coord) {
                coords.push(coord)
            }
        }
        // snapping may leave the ring open when its endpoints rounded apart
        if coords.first() != coords.last() {
            if let Some(&first) = coords.first() {
                coords.push(first);
            }
        }

        if coords.len() < 4 {
            warn!("encountered invalid ring, which has undefined results");
        }
        let first_point = coords[0];

        let ring = LineString::new(coords);
        let (left, right) = match ring.winding_order() {
            Some(WindingOrder::Clockwise) => (cw_left, cw_right),
            Some(WindingOrder::CounterClockwise) => (cw_right, cw_left),
            None => {
                warn!("polygon had no winding order. Results are undefined.");
                (cw_left, cw_right)
            }
        };

        let edge = Edge::new(
            ring.0,
            Label::new(
                self.arg_index,
                TopologyPosition::area(CoordPos::OnBoundary, left, right),
            ),
        );
        self.insert_edge(edge);

        // insert the endpoint as a node, to mark that it is on the boundary
        self.insert_point(self.arg_index, first_point, CoordPos::OnBoundary);
    }

    fn add_polygon(&mut self, polygon: &Polygon<F>) {
        self.add_polygon_ring(polygon.exterior(), CoordPos::Outside, CoordPos::Inside);
        // Holes are topologically labeled opposite to the shell, since
        // the interior of the polygon lies on their opposite side
        // (on the left, if the hole is oriented CW)
        for hole in polygon.interiors() {
            self.add_polygon_ring(hole, CoordPos::Inside, CoordPos::Outside)
        }
    }

    fn add_line_string(&mut self, line_string: &LineString<F>) {
        if line_string.0.is_empty() {
            return;
        }

        let mut coords: Vec<Coord<F>> = Vec::with_capacity(line_string.0.len());
        for coord in &line_string.0 {
            let coord = self.make_precise(*coord);
            if coords.last() != Some(&coord) {
                coords.push(coord)
            }
        }

        if coords.len() < 2 {
            warn!("treating invalid linestring as point, which has undefined results");
            self.insert_point(self.arg_index, coords[0], CoordPos::Inside);
            return;
        }

        self.insert_boundary_point(*coords.first().unwrap());
        self.insert_boundary_point(*coords.last().unwrap());

        let edge = Edge::new(
            coords,
            Label::new(
                self.arg_index,
                TopologyPosition::line_or_point(CoordPos::Inside),
            ),
        );
        self.insert_edge(edge);
    }

    fn add_line(&mut self, line: &Line<F>) {
        let start = self.make_precise(line.start);
        let end = self.make_precise(line.end);
        if start == end {
            self.insert_point(self.arg_index, start, CoordPos::Inside);
            return;
        }

        self.insert_boundary_point(start);
        self.insert_boundary_point(end);

        let edge = Edge::new(
            vec![start, end],
            Label::new(
                self.arg_index,
                TopologyPosition::line_or_point(CoordPos::Inside),
            ),
        );

        self.insert_edge(edge);
    }

    /// Add a point computed externally.  The point is assumed to be a
    /// Point Geometry part, which has a location of INTERIOR.
    fn add_point(&mut self, point: &Point<F>) {
        let coord = self.make_precise(point.0);
        self.insert_point(self.arg_index, coord, CoordPos::Inside);
    }

    /// Compute self-nodes, taking advantage of the Geometry type to minimize the number of
    /// intersection tests.  (E.g. rings are not tested for self-intersection, since they are
    /// assumed to be valid).
    ///
    /// - `line_intersector` the [`LineIntersector`] to use to determine intersection
    /// - `nearness_tolerance` when set, near-vertex cases within the tolerance are
    ///   also recorded as nodes (used by snap-rounding)
    pub(crate) fn compute_self_nodes(
        &mut self,
        line_intersector: Box<dyn LineIntersector<F>>,
        nearness_tolerance: Option<F>,
    ) {
        if self.has_computed_self_nodes {
            return;
        }
        self.has_computed_self_nodes = true;

        let mut segment_intersector = SegmentIntersector::new(line_intersector);
        if let Some(tolerance) = nearness_tolerance {
            segment_intersector.set_nearness_tolerance(tolerance);
        }

        // optimize intersection search for valid Polygons and LinearRings
        let is_rings = match self.geometry() {
            Geometry::LineString(ls) => ls.is_closed(),
            Geometry::MultiLineString(ls) => ls.is_closed(),
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) | Geometry::Rect(_) | Geometry::Triangle(_) => true,
            _ => false,
        };
        let check_for_self_intersecting_edges = !is_rings;

        let mut edge_set_intersector = RStarEdgeSetIntersector::new();
        edge_set_intersector.compute_intersections_within_set(
            self.edges(),
            check_for_self_intersecting_edges,
            &mut segment_intersector,
        );
        self.add_self_intersection_nodes();
    }

    pub(crate) fn compute_edge_intersections(
        &self,
        other: &GeometryGraph<F>,
        line_intersector: Box<dyn LineIntersector<F>>,
        nearness_tolerance: Option<F>,
    ) {
        let mut segment_intersector = SegmentIntersector::new(line_intersector);
        if let Some(tolerance) = nearness_tolerance {
            segment_intersector.set_nearness_tolerance(tolerance);
        }

        let mut edge_set_intersector = RStarEdgeSetIntersector::new();
        edge_set_intersector.compute_intersections_between_sets(
            self.edges(),
            other.edges(),
            &mut segment_intersector,
        );
    }

    /// Split every edge at its intersection points, appending the noded
    /// pieces to `split_edges`.
    pub(crate) fn compute_split_edges(&self, split_edges: &mut Vec<Edge<F>>) {
        for edge in self.edges() {
            edge.borrow_mut().add_split_edges(split_edges);
        }
    }

    fn insert_point(&mut self, arg_index: usize, coord: Coord<F>, position: CoordPos) {
        let node: &mut CoordNode<F> = self.add_node_with_coordinate(coord);
        node.label_mut().set_on_position(arg_index, position);
    }

    /// Add the boundary points of 1-dim (line) geometries.
    fn insert_boundary_point(&mut self, coord: Coord<F>) {
        let arg_index = self.arg_index;
        let node: &mut CoordNode<F> = self.add_node_with_coordinate(coord);

        let label: &mut Label = node.label_mut();

        // determine the current location for the point (if any)
        let boundary_count = {
            #[allow(clippy::bool_to_int_with_if)]
            let prev_boundary_count =
                if Some(CoordPos::OnBoundary) == label.position(arg_index, Direction::On) {
                    1
                } else {
                    0
                };
            prev_boundary_count + 1
        };

        let new_position = Self::determine_boundary(boundary_count);
        label.set_on_position(arg_index, new_position);
    }

    fn add_self_intersection_nodes(&mut self) {
        let positions_and_intersections: Vec<(CoordPos, Vec<Coord<F>>)> = self
            .edges()
            .iter()
            .map(|cell| cell.borrow())
            .map(|edge| {
                let position = edge
                    .label()
                    .on_position(self.arg_index)
                    .expect("all edge labels should have an `on` position by now");
                let coordinates = edge
                    .edge_intersections()
                    .iter()
                    .map(|edge_intersection| edge_intersection.coordinate());

                (position, coordinates.collect())
            })
            .collect();

        for (position, edge_intersection_coordinates) in positions_and_intersections {
            for coordinate in edge_intersection_coordinates {
                self.add_self_intersection_node(coordinate, position)
            }
        }
    }

    /// Add a node for a self-intersection.
    ///
    /// If the node is a potential boundary node (e.g. came from an edge which is a boundary), then
    /// insert it as a potential boundary node.  Otherwise, just add it as a regular node.
    fn add_self_intersection_node(&mut self, coord: Coord<F>, position: CoordPos) {
        // if this node is already a boundary node, don't change it
        if self.is_boundary_node(coord) {
            return;
        }

        if position == CoordPos::OnBoundary && self.use_boundary_determination_rule {
            self.insert_boundary_point(coord)
        } else {
            self.insert_point(self.arg_index, coord, position)
        }
    }
}
