mod directed_edge;
mod edge_ring;
mod line_builder;
mod overlay_graph;
mod point_builder;
mod polygon_builder;

use crate::coordinate_position::{CoordPos, CoordinatePosition};
use crate::dimensions::{Dimensions, HasDimensions};
use crate::error::TopologyError;
use crate::geomgraph::{EdgeList, GeometryGraph, RobustLineIntersector};
use crate::noding::EdgeNodingValidator;
use crate::precision_model::PrecisionModel;
use overlay_graph::OverlayGraph;
use crate::GeoFloat;
use geo_types::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};

/// The boolean operation an overlay computes.
///
/// The numeric codes are part of the public contract and are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpType {
    Intersection = 1,
    Union = 2,
    Difference = 3,
    SymDifference = 4,
}

/// Per-call configuration of the overlay engine.
#[derive(Debug, Clone)]
pub struct OverlayOptions {
    /// The precision models of the two operands. The result is computed at
    /// the more precise of the two.
    pub precision_models: [PrecisionModel; 2],
    /// When set, noding uses snap-rounding at this (fixed) precision instead
    /// of classic robust noding. The usual way to recover from a noding
    /// failure is to retry the overlay with this option set.
    pub noding_precision: Option<PrecisionModel>,
    /// Re-check the noding of snap-rounded output. Classic noding is always
    /// validated; snap-rounded output is valid by construction so the check
    /// defaults to off.
    pub validate_snapped_noding: bool,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        OverlayOptions {
            precision_models: [PrecisionModel::Floating, PrecisionModel::Floating],
            noding_precision: None,
            validate_snapped_noding: false,
        }
    }
}

/// Computes the overlay of two geometries: the geometry composed of the
/// points, lines and areas satisfying the boolean operation `op`.
///
/// Empty or lower-dimensional operands are ordinary inputs yielding empty or
/// identity results. The single failure mode is a [`TopologyError`], raised
/// when noding or ring assembly meets topologically inconsistent linework;
/// callers may retry such a failure with
/// [`OverlayOptions::noding_precision`] set to enable snap-rounding.
pub fn overlay<F>(
    g0: &Geometry<F>,
    g1: &Geometry<F>,
    op: OpType,
    options: &OverlayOptions,
) -> Result<Geometry<F>, TopologyError<F>>
where
    F: GeoFloat + rstar::RTreeNum,
{
    OverlayOperation::new(g0, g1, options).compute(op)
}

/// The boolean predicate of `op`, evaluated on a pair of locations.
/// A location on a boundary counts as inside.
pub(crate) fn is_result_of_op(
    location_0: Option<CoordPos>,
    location_1: Option<CoordPos>,
    op: OpType,
) -> bool {
    fn coerce(location: Option<CoordPos>) -> bool {
        matches!(location, Some(CoordPos::Inside) | Some(CoordPos::OnBoundary))
    }
    let in_0 = coerce(location_0);
    let in_1 = coerce(location_1);
    match op {
        OpType::Intersection => in_0 && in_1,
        OpType::Union => in_0 || in_1,
        OpType::Difference => in_0 && !in_1,
        OpType::SymDifference => in_0 != in_1,
    }
}

/// Whether `coord` is covered by (not exterior to) any element of
/// `geometries`.
pub(crate) fn is_coord_covered_by<F, G>(coord: &Coord<F>, geometries: &[G]) -> bool
where
    F: GeoFloat,
    G: CoordinatePosition<Scalar = F>,
{
    geometries
        .iter()
        .any(|geometry| geometry.coordinate_position(coord) != CoordPos::Outside)
}

/// A single overlay invocation: the engine owns every structure it builds
/// and discards them when the call returns.
struct OverlayOperation<'a, F>
where
    F: GeoFloat + rstar::RTreeNum,
{
    graph_a: GeometryGraph<'a, F>,
    graph_b: GeometryGraph<'a, F>,
    graph: OverlayGraph<F>,
    edge_list: EdgeList<F>,
    line_intersector: RobustLineIntersector,
    nearness_tolerance: Option<F>,
    validate_noding: bool,
}

impl<'a, F> OverlayOperation<'a, F>
where
    F: GeoFloat + rstar::RTreeNum,
{
    fn new(g0: &'a Geometry<F>, g1: &'a Geometry<F>, options: &OverlayOptions) -> Self {
        let result_precision = options.precision_models[0].max(options.precision_models[1]);

        let (noding_precision, snap_rounding) = match options.noding_precision {
            Some(precision) => (precision, true),
            None => (result_precision, false),
        };

        // snap-rounding pins input coordinates to the grid up front; classic
        // noding leaves them untouched and only rounds computed intersections
        let ingestion_precision = if snap_rounding {
            noding_precision
        } else {
            PrecisionModel::Floating
        };

        let nearness_tolerance = if snap_rounding {
            noding_precision
                .scale()
                .map(|scale| F::one() / F::from(scale * 10.0).unwrap())
        } else {
            None
        };

        OverlayOperation {
            graph_a: GeometryGraph::new(0, g0, ingestion_precision),
            graph_b: GeometryGraph::new(1, g1, ingestion_precision),
            graph: OverlayGraph::new(),
            edge_list: EdgeList::new(),
            line_intersector: RobustLineIntersector::with_precision_model(noding_precision),
            nearness_tolerance,
            validate_noding: !snap_rounding || options.validate_snapped_noding,
        }
    }

    fn compute(mut self, op: OpType) -> Result<Geometry<F>, TopologyError<F>> {
        // Copy the operand vertices in as nodes first: the operands' own
        // classification of a coordinate (e.g. a crossing point that is also
        // a vertex) must win over anything computed later, and label merging
        // never overwrites.
        self.graph.copy_points(0, &self.graph_a);
        self.graph.copy_points(1, &self.graph_b);

        // node the operands against themselves, then against each other
        self.graph_a.compute_self_nodes(
            Box::new(self.line_intersector.clone()),
            self.nearness_tolerance,
        );
        self.graph_b.compute_self_nodes(
            Box::new(self.line_intersector.clone()),
            self.nearness_tolerance,
        );
        self.graph_a.compute_edge_intersections(
            &self.graph_b,
            Box::new(self.line_intersector.clone()),
            self.nearness_tolerance,
        );

        let mut split_edges = Vec::new();
        self.graph_a.compute_split_edges(&mut split_edges);
        self.graph_b.compute_split_edges(&mut split_edges);
        debug!("noding produced {} split edges", split_edges.len());

        for edge in split_edges {
            self.edge_list.insert_unique_edge(edge);
        }
        self.edge_list.compute_labels_from_depths();
        self.edge_list.replace_collapsed_edges();

        if self.validate_noding {
            EdgeNodingValidator::check_valid(self.edge_list.edges())?;
        }

        let edge_list = std::mem::replace(&mut self.edge_list, EdgeList::new());
        self.graph.add_edges(edge_list.into_edges());

        self.graph.compute_labelling(&self.graph_a, &self.graph_b);
        self.graph.merge_sym_labels();
        self.graph.update_node_labelling();
        self.graph.label_incomplete_nodes(&self.graph_a, &self.graph_b);

        self.graph.find_result_area_edges(op);
        self.graph.cancel_duplicate_result_edges();

        let result_polygons = polygon_builder::build_polygons(&mut self.graph)?;
        let result_lines = line_builder::build_lines(&mut self.graph, op, &result_polygons);
        let result_points =
            point_builder::build_points(&self.graph, op, &result_lines, &result_polygons);
        debug!(
            "overlay result: {} points, {} lines, {} polygons",
            result_points.len(),
            result_lines.len(),
            result_polygons.len()
        );

        Ok(self.build_geometry(op, result_points, result_lines, result_polygons))
    }

    /// Bundle the result components into a single geometry, in canonical
    /// order: points, then lines, then polygons.
    fn build_geometry(
        &self,
        op: OpType,
        mut points: Vec<Point<F>>,
        mut lines: Vec<LineString<F>>,
        mut polygons: Vec<Polygon<F>>,
    ) -> Geometry<F> {
        let count = points.len() + lines.len() + polygons.len();
        if count == 0 {
            return self.empty_result(op);
        }

        if points.len() == count {
            return if count == 1 {
                Geometry::Point(points.pop().unwrap())
            } else {
                Geometry::MultiPoint(MultiPoint(points))
            };
        }
        if lines.len() == count {
            return if count == 1 {
                Geometry::LineString(lines.pop().unwrap())
            } else {
                Geometry::MultiLineString(MultiLineString(lines))
            };
        }
        if polygons.len() == count {
            return if count == 1 {
                Geometry::Polygon(polygons.pop().unwrap())
            } else {
                Geometry::MultiPolygon(MultiPolygon(polygons))
            };
        }

        let geometries: Vec<Geometry<F>> = points
            .into_iter()
            .map(Geometry::Point)
            .chain(lines.into_iter().map(Geometry::LineString))
            .chain(polygons.into_iter().map(Geometry::Polygon))
            .collect();
        Geometry::GeometryCollection(GeometryCollection(geometries))
    }

    /// An empty result still has a well-defined dimension, derived from the
    /// operand dimensions and the operation.
    fn empty_result(&self, op: OpType) -> Geometry<F> {
        let dim_0 = dimension_code(self.graph_a.geometry().dimensions());
        let dim_1 = dimension_code(self.graph_b.geometry().dimensions());
        let result_dimension = match op {
            OpType::Intersection => dim_0.min(dim_1),
            OpType::Union => dim_0.max(dim_1),
            OpType::Difference => dim_0,
            OpType::SymDifference => dim_0.max(dim_1),
        };
        match result_dimension {
            0 => Geometry::MultiPoint(MultiPoint(vec![])),
            1 => Geometry::LineString(LineString::new(vec![])),
            2 => Geometry::Polygon(Polygon::new(LineString::new(vec![]), vec![])),
            _ => Geometry::GeometryCollection(GeometryCollection(vec![])),
        }
    }
}

fn dimension_code(dimensions: Dimensions) -> i8 {
    match dimensions {
        Dimensions::Empty => -1,
        Dimensions::ZeroDimensional => 0,
        Dimensions::OneDimensional => 1,
        Dimensions::TwoDimensional => 2,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn op_codes_are_stable() {
        assert_eq!(OpType::Intersection as i32, 1);
        assert_eq!(OpType::Union as i32, 2);
        assert_eq!(OpType::Difference as i32, 3);
        assert_eq!(OpType::SymDifference as i32, 4);
    }

    #[test]
    fn predicate_treats_boundary_as_interior() {
        use CoordPos::*;
        assert!(is_result_of_op(
            Some(OnBoundary),
            Some(Inside),
            OpType::Intersection
        ));
        assert!(is_result_of_op(Some(Outside), Some(Inside), OpType::Union));
        assert!(is_result_of_op(
            Some(Inside),
            Some(Outside),
            OpType::Difference
        ));
        assert!(!is_result_of_op(
            Some(Inside),
            Some(OnBoundary),
            OpType::SymDifference
        ));
        assert!(!is_result_of_op(None, Some(Outside), OpType::Union));
    }
}
