use super::directed_edge::{DirectedEdge, DirectedEdgeId, EdgeEndKey};
use super::{is_result_of_op, OpType};
use crate::coordinate_position::{coord_position_in_areal, CoordinatePosition};
use crate::error::TopologyError;
use crate::geomgraph::node_map::{NodeFactory, NodeMap};
use crate::geomgraph::{CoordNode, CoordPos, Direction, Edge, GeometryGraph, Label};
use crate::GeoFloat;
use geo_types::Coord;

use std::collections::BTreeMap;

/// The set of directed edges leaving one node, ordered counter-clockwise
/// starting from the positive x-axis.
pub(crate) struct DirectedEdgeStar<F>
where
    F: GeoFloat,
{
    edge_map: BTreeMap<EdgeEndKey<F>, DirectedEdgeId>,
}

impl<F: GeoFloat> DirectedEdgeStar<F> {
    pub fn new() -> Self {
        DirectedEdgeStar {
            edge_map: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: EdgeEndKey<F>, directed_edge: DirectedEdgeId) {
        self.edge_map.insert(key, directed_edge);
    }

    /// Outgoing directed edges in CCW order.
    pub fn edge_ids(&self) -> Vec<DirectedEdgeId> {
        self.edge_map.values().copied().collect()
    }
}

pub(crate) struct OverlayNodeFactory;

impl<F> NodeFactory<F> for OverlayNodeFactory
where
    F: GeoFloat,
{
    type Node = (CoordNode<F>, DirectedEdgeStar<F>);
    fn create_node(coordinate: Coord<F>) -> Self::Node {
        (CoordNode::new(coordinate), DirectedEdgeStar::new())
    }
}

/// The planar graph an overlay is computed on.
///
/// Edges, directed edges, and rings form a cyclic reference structure; the
/// graph stores edges and directed edges in arenas and threads `usize`
/// handles through them instead of references.
pub(crate) struct OverlayGraph<F>
where
    F: GeoFloat,
{
    edges: Vec<Edge<F>>,
    dir_edges: Vec<DirectedEdge<F>>,
    nodes: NodeMap<F, OverlayNodeFactory>,
}

impl<F> OverlayGraph<F>
where
    F: GeoFloat + rstar::RTreeNum,
{
    pub fn new() -> Self {
        OverlayGraph {
            edges: Vec::new(),
            dir_edges: Vec::new(),
            nodes: NodeMap::new(),
        }
    }

    pub fn edges(&self) -> &[Edge<F>] {
        &self.edges
    }

    pub fn edge_mut(&mut self, edge: usize) -> &mut Edge<F> {
        &mut self.edges[edge]
    }

    pub fn dir_edges(&self) -> &[DirectedEdge<F>] {
        &self.dir_edges
    }

    pub fn dir_edge(&self, id: DirectedEdgeId) -> &DirectedEdge<F> {
        &self.dir_edges[id]
    }

    pub fn dir_edge_mut(&mut self, id: DirectedEdgeId) -> &mut DirectedEdge<F> {
        &mut self.dir_edges[id]
    }

    pub fn nodes_iter(&self) -> impl Iterator<Item = &(CoordNode<F>, DirectedEdgeStar<F>)> {
        self.nodes.iter()
    }

    /// The CCW-ordered outgoing directed edges of the node at `coord`.
    pub fn node_star_ids(&self, coord: Coord<F>) -> Vec<DirectedEdgeId> {
        self.nodes
            .find(coord)
            .map(|(_, star)| star.edge_ids())
            .unwrap_or_default()
    }

    /// Construct the forward and reverse directed edges for every edge, and
    /// splice them into the stars of their origin nodes.
    pub fn add_edges(&mut self, edges: Vec<Edge<F>>) {
        for edge in edges {
            self.add_edge(edge);
        }
    }

    fn add_edge(&mut self, edge: Edge<F>) {
        debug_assert!(edge.coords().len() >= 2, "found edge with too few coords");

        let edge_id = self.edges.len();
        let coords = edge.coords();
        let n = coords.len();

        let forward_id = self.dir_edges.len();
        let reverse_id = forward_id + 1;

        let forward_label = edge.label().clone();
        let mut reverse_label = edge.label().clone();
        reverse_label.flip();

        let forward = DirectedEdge::new(
            edge_id,
            coords[0],
            coords[1],
            forward_label,
            true,
            reverse_id,
        );
        let reverse = DirectedEdge::new(
            edge_id,
            coords[n - 1],
            coords[n - 2],
            reverse_label,
            false,
            forward_id,
        );

        let forward_key = forward.key().clone();
        let reverse_key = reverse.key().clone();
        let forward_origin = *forward.coordinate();
        let reverse_origin = *reverse.coordinate();

        self.dir_edges.push(forward);
        self.dir_edges.push(reverse);
        self.edges.push(edge);

        let (_, star) = self.nodes.insert_node_with_coordinate(forward_origin);
        star.insert(forward_key, forward_id);
        let (_, star) = self.nodes.insert_node_with_coordinate(reverse_origin);
        star.insert(reverse_key, reverse_id);
    }

    /// Copy the nodes of an operand's geometry graph into this graph,
    /// stamping each with the operand's own classification. These labels are
    /// written before any label propagation runs, so they take precedence
    /// over anything inferred later (label merging never overwrites).
    pub fn copy_points(&mut self, geom_index: usize, arg_graph: &GeometryGraph<F>) {
        for arg_node in arg_graph.nodes_iter() {
            let (node, _star) = self
                .nodes
                .insert_node_with_coordinate(*arg_node.coordinate());

            if let Some(position) = arg_node.label().on_position(geom_index) {
                node.set_label_on_position(geom_index, position);
            }
        }
    }

    /// Compute complete labels for every directed edge: propagate area side
    /// labels around each node's star, then fill any remaining empty
    /// positions by locating the node in the other operand.
    pub fn compute_labelling(
        &mut self,
        graph_a: &GeometryGraph<F>,
        graph_b: &GeometryGraph<F>,
    ) {
        let stars: Vec<Vec<DirectedEdgeId>> =
            self.nodes.iter().map(|(_, star)| star.edge_ids()).collect();

        for star_ids in &stars {
            self.propagate_side_labels(0, star_ids);
            self.propagate_side_labels(1, star_ids);

            // A line edge whose on-position is BOUNDARY marks a dimensional
            // collapse: the operand's area vanished here, so empty positions
            // at this node are exterior to it rather than unknown.
            let mut has_dimensional_collapse_edge = [false, false];
            for &id in star_ids {
                let label = self.dir_edges[id].label();
                for (geom_index, collapsed) in has_dimensional_collapse_edge.iter_mut().enumerate()
                {
                    if label.is_line(geom_index)
                        && label.on_position(geom_index) == Some(CoordPos::OnBoundary)
                    {
                        *collapsed = true;
                    }
                }
            }

            let mut located: [Option<CoordPos>; 2] = [None, None];
            for &id in star_ids {
                let coord = *self.dir_edges[id].coordinate();
                for geom_index in 0..2 {
                    if !self.dir_edges[id].label().is_any_empty(geom_index) {
                        continue;
                    }
                    let position = if has_dimensional_collapse_edge[geom_index] {
                        CoordPos::Outside
                    } else {
                        *located[geom_index].get_or_insert_with(|| {
                            let geometry = if geom_index == 0 {
                                graph_a.geometry()
                            } else {
                                graph_b.geometry()
                            };
                            // only areal components can contain the node;
                            // a coord on a line operand is still exterior
                            // to it as far as side labelling is concerned
                            coord_position_in_areal(&coord, geometry)
                        })
                    };
                    self.dir_edges[id]
                        .label_mut()
                        .set_all_positions_if_empty(geom_index, position);
                }
            }
        }
    }

    fn propagate_side_labels(&mut self, geom_index: usize, star_ids: &[DirectedEdgeId]) {
        let mut start_position = None;

        for &id in star_ids {
            let label = self.dir_edges[id].label();
            if label.is_geom_area(geom_index) {
                if let Some(position) = label.position(geom_index, Direction::Left) {
                    start_position = Some(position);
                }
            }
        }
        if start_position.is_none() {
            return;
        }
        let mut current_position = start_position.unwrap();

        for &id in star_ids {
            let label = self.dir_edges[id].label_mut();
            if label.position(geom_index, Direction::On).is_none() {
                label.set_position(geom_index, Direction::On, current_position);
            }
            if label.is_geom_area(geom_index) {
                let left_position = label.position(geom_index, Direction::Left);
                let right_position = label.position(geom_index, Direction::Right);

                if let Some(right_position) = right_position {
                    debug_assert!(
                        right_position == current_position,
                        "side position conflict: right_position: {:?}, current_position: {:?}",
                        right_position,
                        current_position
                    );
                    debug_assert!(left_position.is_some(), "found single null side");
                    current_position = left_position.unwrap();
                } else {
                    debug_assert!(label.position(geom_index, Direction::Left).is_none());
                    label.set_position(geom_index, Direction::Right, current_position);
                    label.set_position(geom_index, Direction::Left, current_position);
                }
            }
        }
    }

    /// Merge each directed edge's label with its twin's. The twin's label
    /// was built flipped, so edges incident from only one operand also pick
    /// up what their twin learned about the other operand.
    pub fn merge_sym_labels(&mut self) {
        for id in 0..self.dir_edges.len() {
            let sym_label = self.dir_edges[self.dir_edges[id].sym()].label().clone();
            self.dir_edges[id].label_mut().merge(&sym_label);
        }
    }

    /// Fold the labelling of each node's incident edges into the node's own
    /// label. A node already labelled (e.g. because it is a vertex of an
    /// operand) keeps its labelling.
    pub fn update_node_labelling(&mut self) {
        let star_labels: Vec<(Coord<F>, Label)> = self
            .nodes
            .iter()
            .map(|(node, star)| {
                let mut star_label = Label::empty_line_or_point();
                for id in star.edge_ids() {
                    let edge_label = self.edges[self.dir_edges[id].edge()].label();
                    for geom_index in 0..2 {
                        if matches!(
                            edge_label.on_position(geom_index),
                            Some(CoordPos::Inside) | Some(CoordPos::OnBoundary)
                        ) {
                            star_label.set_on_position(geom_index, CoordPos::Inside);
                        }
                    }
                }
                (*node.coordinate(), star_label)
            })
            .collect();

        for (coord, star_label) in star_labels {
            let (node, _star) = self
                .nodes
                .find_mut(coord)
                .expect("node disappeared during labelling");
            node.label_mut().merge(&star_label);
        }
    }

    /// Label nodes which only know about one operand by locating them in the
    /// other operand's geometry, then push complete node labels down into any
    /// still-incomplete incident edge labels.
    pub fn label_incomplete_nodes(
        &mut self,
        graph_a: &GeometryGraph<F>,
        graph_b: &GeometryGraph<F>,
    ) {
        let coords: Vec<Coord<F>> = self
            .nodes
            .iter()
            .map(|(node, _)| *node.coordinate())
            .collect();

        for coord in coords {
            let (node, star) = self.nodes.find_mut(coord).expect("node map changed");
            if node.is_isolated() {
                if node.label().is_empty(0) {
                    let position = graph_a.geometry().coordinate_position(&coord);
                    node.label_mut().set_on_position(0, position);
                } else {
                    let position = graph_b.geometry().coordinate_position(&coord);
                    node.label_mut().set_on_position(1, position);
                }
            }

            let node_label = node.label().clone();
            let star_ids = star.edge_ids();
            for id in star_ids {
                for geom_index in 0..2 {
                    if let Some(position) = node_label.on_position(geom_index) {
                        self.dir_edges[id]
                            .label_mut()
                            .set_all_positions_if_empty(geom_index, position);
                    }
                }
            }
        }
    }

    /// Mark the directed edges whose right-hand side satisfies the boolean
    /// predicate of `op`. The right-hand side is tested because rings are
    /// traced with the result interior on their right.
    pub fn find_result_area_edges(&mut self, op: OpType) {
        for directed_edge in self.dir_edges.iter_mut() {
            let label = directed_edge.label();
            if label.is_area()
                && !directed_edge.is_interior_area_edge()
                && is_result_of_op(
                    label.position(0, Direction::Right),
                    label.position(1, Direction::Right),
                    op,
                )
            {
                directed_edge.set_in_result(true);
            }
        }
    }

    /// If both a directed edge and its twin were selected, the boolean
    /// operation cancelled the boundary here (e.g. a shared edge interior to
    /// a union): unmark both.
    pub fn cancel_duplicate_result_edges(&mut self) {
        for id in 0..self.dir_edges.len() {
            let sym = self.dir_edges[id].sym();
            if self.dir_edges[id].is_in_result() && self.dir_edges[sym].is_in_result() {
                self.dir_edges[id].set_in_result(false);
                self.dir_edges[sym].set_in_result(false);
            }
        }
    }

    /// Link the in-result directed edges at every node into rings: the
    /// `next` pointer of each incoming in-result edge is set to the next
    /// outgoing in-result edge in CCW order. Rings linked this way keep
    /// their face on the right-hand side.
    pub fn link_result_directed_edges(&mut self) -> Result<(), TopologyError<F>> {
        let stars: Vec<(Coord<F>, Vec<DirectedEdgeId>)> = self
            .nodes
            .iter()
            .map(|(node, star)| (*node.coordinate(), star.edge_ids()))
            .collect();

        for (coord, star_ids) in stars {
            let mut first_out: Option<DirectedEdgeId> = None;
            let mut incoming: Option<DirectedEdgeId> = None;
            let mut linking_to_outgoing = false;

            for &next_out in &star_ids {
                let next_in = self.dir_edges[next_out].sym();
                if !self.dir_edges[next_out].label().is_area() {
                    continue;
                }
                if first_out.is_none() && self.dir_edges[next_out].is_in_result() {
                    first_out = Some(next_out);
                }
                if linking_to_outgoing {
                    if !self.dir_edges[next_out].is_in_result() {
                        continue;
                    }
                    self.dir_edges[incoming.unwrap()].set_next(next_out);
                    linking_to_outgoing = false;
                } else {
                    if !self.dir_edges[next_in].is_in_result() {
                        continue;
                    }
                    incoming = Some(next_in);
                    linking_to_outgoing = true;
                }
            }
            if linking_to_outgoing {
                let first_out = first_out.ok_or_else(|| {
                    TopologyError::at_coordinate("no outgoing dirEdge found", coord)
                })?;
                debug_assert!(
                    self.dir_edges[first_out].is_in_result(),
                    "unable to link last incoming dirEdge"
                );
                self.dir_edges[incoming.unwrap()].set_next(first_out);
            }
        }
        Ok(())
    }

    /// Re-link the directed edges of one maximal ring at every node with
    /// degree > 2, choosing the next CCW edge *within the ring*: this splits
    /// the maximal ring into minimal rings. The iteration runs clockwise
    /// (reverse of the star order), mirroring the CCW pass above.
    pub fn link_minimal_directed_edges(&mut self, ring: usize, ring_edges: &[DirectedEdgeId]) {
        for &ring_edge in ring_edges {
            let coord = *self.dir_edges[ring_edge].coordinate();
            let star_ids = self.node_star_ids(coord);

            let mut first_out: Option<DirectedEdgeId> = None;
            let mut incoming: Option<DirectedEdgeId> = None;
            let mut linking_to_outgoing = false;

            for &next_out in star_ids.iter().rev() {
                let next_in = self.dir_edges[next_out].sym();
                if first_out.is_none() && self.dir_edges[next_out].edge_ring() == Some(ring) {
                    first_out = Some(next_out);
                }
                if linking_to_outgoing {
                    if self.dir_edges[next_out].edge_ring() != Some(ring) {
                        continue;
                    }
                    self.dir_edges[incoming.unwrap()].set_next_min(next_out);
                    linking_to_outgoing = false;
                } else {
                    if self.dir_edges[next_in].edge_ring() != Some(ring) {
                        continue;
                    }
                    incoming = Some(next_in);
                    linking_to_outgoing = true;
                }
            }
            if linking_to_outgoing {
                debug_assert!(first_out.is_some(), "found null for first outgoing dirEdge");
                if let Some(first_out) = first_out {
                    debug_assert!(
                        self.dir_edges[first_out].edge_ring() == Some(ring),
                        "unable to link last incoming dirEdge"
                    );
                    self.dir_edges[incoming.unwrap()].set_next_min(first_out);
                }
            }
        }
    }

    /// Mark the covered state of line edges at nodes which also carry result
    /// area edges: moving CCW around the star, crossing an in-result
    /// outgoing edge leaves the result interior, crossing an in-result
    /// incoming edge enters it. Line edges between them inherit the state.
    pub fn find_covered_line_edges(&mut self) {
        let stars: Vec<Vec<DirectedEdgeId>> =
            self.nodes.iter().map(|(_, star)| star.edge_ids()).collect();

        for star_ids in stars {
            let mut start_position: Option<CoordPos> = None;
            for &next_out in &star_ids {
                let next_in = self.dir_edges[next_out].sym();
                if !self.dir_edges[next_out].is_line_edge() {
                    if self.dir_edges[next_out].is_in_result() {
                        start_position = Some(CoordPos::Inside);
                        break;
                    }
                    if self.dir_edges[next_in].is_in_result() {
                        start_position = Some(CoordPos::Outside);
                        break;
                    }
                }
            }
            let Some(mut current_position) = start_position else {
                continue;
            };

            for &next_out in &star_ids {
                let next_in = self.dir_edges[next_out].sym();
                if self.dir_edges[next_out].is_line_edge() {
                    let edge = self.dir_edges[next_out].edge();
                    self.edges[edge].set_covered(current_position == CoordPos::Inside);
                } else {
                    if self.dir_edges[next_out].is_in_result() {
                        current_position = CoordPos::Outside;
                    }
                    if self.dir_edges[next_in].is_in_result() {
                        current_position = CoordPos::Inside;
                    }
                }
            }
        }
    }
}
