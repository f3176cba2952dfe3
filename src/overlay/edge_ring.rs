use super::directed_edge::{DirectedEdgeId, RingId};
use super::overlay_graph::OverlayGraph;
use crate::error::TopologyError;
use crate::winding_order::{Winding, WindingOrder};
use crate::GeoFloat;
use geo_types::{Coord, LineString};

/// Whether a ring was traced greedily (maximal) or by always taking the next
/// CCW branch (minimal). The kind selects which `next` pointer family and
/// which ring slot on the directed edges the walk uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RingKind {
    Maximal,
    Minimal,
}

/// A cycle of in-result directed edges, traced with the result interior on
/// its right-hand side.
pub(crate) struct EdgeRing<F>
where
    F: GeoFloat,
{
    id: RingId,
    kind: RingKind,
    edges: Vec<DirectedEdgeId>,
    ring: LineString<F>,
    is_hole: bool,
    shell: Option<RingId>,
    holes: Vec<RingId>,
}

impl<F> EdgeRing<F>
where
    F: GeoFloat + rstar::RTreeNum,
{
    /// Trace the ring starting at `start`, stamping each visited directed
    /// edge with `ring_id`.
    ///
    /// Fails when the walk runs into an unlinked directed edge, or revisits
    /// an edge of this ring - both symptoms of topologically inconsistent
    /// linework.
    pub fn build(
        graph: &mut OverlayGraph<F>,
        start: DirectedEdgeId,
        kind: RingKind,
        ring_id: RingId,
    ) -> Result<EdgeRing<F>, TopologyError<F>> {
        let mut edges = Vec::new();
        let mut coords: Vec<Coord<F>> = Vec::new();
        let mut directed_edge = start;
        let mut is_first_edge = true;

        loop {
            let ring_slot = match kind {
                RingKind::Maximal => graph.dir_edge(directed_edge).edge_ring(),
                RingKind::Minimal => graph.dir_edge(directed_edge).min_edge_ring(),
            };
            if ring_slot == Some(ring_id) {
                return Err(TopologyError::at_coordinate(
                    "directed edge visited twice during ring building",
                    *graph.dir_edge(directed_edge).coordinate(),
                ));
            }
            debug_assert!(
                graph.dir_edge(directed_edge).label().is_area(),
                "attempted to build ring from non-area edge"
            );
            edges.push(directed_edge);

            let edge_id = graph.dir_edge(directed_edge).edge();
            let is_forward = graph.dir_edge(directed_edge).is_forward();
            {
                let edge_coords = graph.edges()[edge_id].coords();
                if is_forward {
                    let start_index = if is_first_edge { 0 } else { 1 };
                    coords.extend_from_slice(&edge_coords[start_index..]);
                } else {
                    let end_index = if is_first_edge {
                        edge_coords.len()
                    } else {
                        edge_coords.len() - 1
                    };
                    coords.extend(edge_coords[..end_index].iter().rev());
                }
            }
            is_first_edge = false;

            match kind {
                RingKind::Maximal => {
                    graph.dir_edge_mut(directed_edge).set_edge_ring(ring_id);
                    // the ring claims the edge's linework for the result
                    graph.edge_mut(edge_id).set_in_result(true);
                }
                RingKind::Minimal => {
                    graph.dir_edge_mut(directed_edge).set_min_edge_ring(ring_id);
                }
            }

            let next = match kind {
                RingKind::Maximal => graph.dir_edge(directed_edge).next(),
                RingKind::Minimal => graph.dir_edge(directed_edge).next_min(),
            };
            match next {
                Some(next) if next == start => break,
                Some(next) => directed_edge = next,
                None => {
                    return Err(TopologyError::at_coordinate(
                        "found null DirectedEdge",
                        *graph.dir_edge(directed_edge).coordinate(),
                    ));
                }
            }
        }

        let ring = LineString::new(coords);
        debug_assert!(ring.is_closed());
        let is_hole = ring.winding_order() == Some(WindingOrder::CounterClockwise);

        Ok(EdgeRing {
            id: ring_id,
            kind,
            edges,
            ring,
            is_hole,
            shell: None,
            holes: Vec::new(),
        })
    }

    pub fn kind(&self) -> RingKind {
        self.kind
    }

    pub fn edges(&self) -> &[DirectedEdgeId] {
        &self.edges
    }

    pub fn ring(&self) -> &LineString<F> {
        &self.ring
    }

    /// A representative coordinate of the ring, for error reporting.
    pub fn coordinate(&self) -> Coord<F> {
        self.ring.0[0]
    }

    pub fn is_hole(&self) -> bool {
        self.is_hole
    }

    pub fn shell(&self) -> Option<RingId> {
        self.shell
    }

    pub fn set_shell(&mut self, shell: RingId) {
        self.shell = Some(shell);
    }

    pub fn holes(&self) -> &[RingId] {
        &self.holes
    }

    pub fn add_hole(&mut self, hole: RingId) {
        self.holes.push(hole);
    }

    /// Twice the degree of the ring's most-visited node. A value above 2
    /// means the ring passes through some node more than once and must be
    /// decomposed into minimal rings.
    pub fn max_node_degree(&self, graph: &OverlayGraph<F>) -> usize {
        debug_assert!(self.kind == RingKind::Maximal);
        let mut max_degree = 0;
        for &directed_edge in &self.edges {
            let coord = *graph.dir_edge(directed_edge).coordinate();
            let degree = graph
                .node_star_ids(coord)
                .iter()
                .filter(|&&id| graph.dir_edge(id).edge_ring() == Some(self.id))
                .count();
            max_degree = max_degree.max(degree);
        }
        max_degree * 2
    }
}
