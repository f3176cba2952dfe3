use super::overlay_graph::OverlayGraph;
use super::{is_coord_covered_by, is_result_of_op, OpType};
use crate::GeoFloat;
use geo_types::{LineString, Point, Polygon};

/// Assemble the 0-dimensional component of the overlay result: nodes whose
/// label satisfies the operation and whose coordinate is not already covered
/// by result linework or area.
pub(crate) fn build_points<F>(
    graph: &OverlayGraph<F>,
    op: OpType,
    result_lines: &[LineString<F>],
    result_areas: &[Polygon<F>],
) -> Vec<Point<F>>
where
    F: GeoFloat + rstar::RTreeNum,
{
    let mut result_points = Vec::new();

    for (node, star) in graph.nodes_iter() {
        let star_ids = star.edge_ids();

        // if an incident edge is in the result, the node coordinate is
        // included already
        let incident_edge_in_result = star_ids
            .iter()
            .any(|&id| graph.edges()[graph.dir_edge(id).edge()].is_in_result());
        if incident_edge_in_result {
            continue;
        }

        // a node on an edge can only enter the result for intersections,
        // where boundary-on-boundary touches produce points
        if star_ids.is_empty() || op == OpType::Intersection {
            let label = node.label();
            if is_result_of_op(label.on_position(0), label.on_position(1), op)
                && !is_coord_covered_by(node.coordinate(), result_lines)
                && !is_coord_covered_by(node.coordinate(), result_areas)
            {
                result_points.push(Point(*node.coordinate()));
            }
        }
    }
    result_points
}
