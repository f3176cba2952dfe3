use super::overlay_graph::OverlayGraph;
use super::{is_coord_covered_by, is_result_of_op, OpType};
use crate::GeoFloat;
use geo_types::{LineString, Polygon};

/// Assemble the 1-dimensional component of the overlay result: line edges
/// satisfying the operation which are not covered by the result area, plus
/// (for intersections) area edges whose boundaries merely touch.
pub(crate) fn build_lines<F>(
    graph: &mut OverlayGraph<F>,
    op: OpType,
    result_areas: &[Polygon<F>],
) -> Vec<LineString<F>>
where
    F: GeoFloat + rstar::RTreeNum,
{
    find_covered_line_edges(graph, result_areas);

    let mut line_edges = Vec::new();
    for id in 0..graph.dir_edges().len() {
        collect_line_edge(graph, id, op, &mut line_edges);
        collect_boundary_touch_edge(graph, id, op, &mut line_edges);
    }

    let mut result_lines = Vec::with_capacity(line_edges.len());
    for edge_id in line_edges {
        graph.edge_mut(edge_id).set_in_result(true);
        result_lines.push(LineString::new(graph.edges()[edge_id].coords().to_vec()));
    }
    result_lines
}

/// Determine, for every line edge, whether it is covered by the result area.
///
/// Line edges incident to result area edges are classified by walking the
/// node stars; any line edge left undetermined does not touch the result
/// boundary at all, so a point-in-area test on one of its endpoints decides
/// for the whole edge.
fn find_covered_line_edges<F>(graph: &mut OverlayGraph<F>, result_areas: &[Polygon<F>])
where
    F: GeoFloat + rstar::RTreeNum,
{
    graph.find_covered_line_edges();

    for id in 0..graph.dir_edges().len() {
        let directed_edge = graph.dir_edge(id);
        let edge_id = directed_edge.edge();
        if directed_edge.is_line_edge() && !graph.edges()[edge_id].is_covered_set() {
            let covered = is_coord_covered_by(directed_edge.coordinate(), result_areas);
            graph.edge_mut(edge_id).set_covered(covered);
        }
    }
}

/// Collect a line edge satisfying the operation predicate on its on-positions.
fn collect_line_edge<F>(
    graph: &mut OverlayGraph<F>,
    id: usize,
    op: OpType,
    line_edges: &mut Vec<usize>,
)
where
    F: GeoFloat + rstar::RTreeNum,
{
    let directed_edge = graph.dir_edge(id);
    if !directed_edge.is_line_edge() {
        return;
    }

    let edge_id = directed_edge.edge();
    let label = directed_edge.label();
    if !directed_edge.is_visited()
        && is_result_of_op(label.on_position(0), label.on_position(1), op)
        && !graph.edges()[edge_id].is_covered()
    {
        line_edges.push(edge_id);
        set_visited_edge(graph, id);
    }
}

/// Collect area edges where the boundaries of the two operands touch without
/// either area being in the result there. Such linework belongs to an
/// intersection result only.
fn collect_boundary_touch_edge<F>(
    graph: &mut OverlayGraph<F>,
    id: usize,
    op: OpType,
    line_edges: &mut Vec<usize>,
)
where
    F: GeoFloat + rstar::RTreeNum,
{
    let directed_edge = graph.dir_edge(id);
    if directed_edge.is_line_edge() {
        // only interested in area edges
        return;
    }
    if directed_edge.is_visited() {
        return;
    }
    if directed_edge.is_interior_area_edge() {
        return;
    }
    let edge_id = directed_edge.edge();
    if graph.edges()[edge_id].is_in_result() {
        // the edge linework is already included in the result
        return;
    }

    let label = directed_edge.label();
    if is_result_of_op(label.on_position(0), label.on_position(1), op)
        && op == OpType::Intersection
    {
        line_edges.push(edge_id);
        set_visited_edge(graph, id);
    }
}

fn set_visited_edge<F>(graph: &mut OverlayGraph<F>, id: usize)
where
    F: GeoFloat + rstar::RTreeNum,
{
    let sym = graph.dir_edge(id).sym();
    graph.dir_edge_mut(id).set_visited(true);
    graph.dir_edge_mut(sym).set_visited(true);
}
