use super::directed_edge::RingId;
use super::edge_ring::{EdgeRing, RingKind};
use super::overlay_graph::OverlayGraph;
use crate::coordinate_position::{coord_pos_relative_to_ring, CoordPos};
use crate::error::TopologyError;
use crate::winding_order::{twice_signed_ring_area, Winding, WindingOrder};
use crate::GeoFloat;
use geo_types::Polygon;

/// Assemble the polygonal component of the overlay result from the in-result
/// area edges of `graph`.
///
/// In-result edges are linked into maximal rings, maximal rings passing
/// through a node more than once are decomposed into minimal rings, minimal
/// rings are classified into shells and holes, and holes not adjacent to any
/// shell are placed by containment.
pub(crate) fn build_polygons<F>(
    graph: &mut OverlayGraph<F>,
) -> Result<Vec<Polygon<F>>, TopologyError<F>>
where
    F: GeoFloat + rstar::RTreeNum,
{
    graph.link_result_directed_edges()?;

    let mut rings: Vec<EdgeRing<F>> = Vec::new();
    let maximal_ring_ids = build_maximal_edge_rings(graph, &mut rings)?;

    let mut shells: Vec<RingId> = Vec::new();
    let mut free_holes: Vec<RingId> = Vec::new();

    for maximal_id in maximal_ring_ids {
        if rings[maximal_id].max_node_degree(graph) > 2 {
            // the ring revisits nodes: split it into minimal rings first
            let ring_edges = rings[maximal_id].edges().to_vec();
            graph.link_minimal_directed_edges(maximal_id, &ring_edges);
            let minimal_ids = build_minimal_rings(graph, &mut rings, &ring_edges)?;

            let shell_ids: Vec<RingId> = minimal_ids
                .iter()
                .copied()
                .filter(|&id| !rings[id].is_hole())
                .collect();
            debug_assert!(
                shell_ids.len() <= 1,
                "found two shells in minimal edge ring list"
            );
            match shell_ids.first() {
                Some(&shell_id) => {
                    // the shell's own holes are directly adjacent to it
                    for &minimal_id in &minimal_ids {
                        if rings[minimal_id].is_hole() {
                            rings[minimal_id].set_shell(shell_id);
                            rings[shell_id].add_hole(minimal_id);
                        }
                    }
                    shells.push(shell_id);
                }
                None => {
                    // all minimal rings are holes, connected only through
                    // containment; defer them
                    free_holes.extend(minimal_ids.iter().copied());
                }
            }
        } else if rings[maximal_id].is_hole() {
            free_holes.push(maximal_id);
        } else {
            shells.push(maximal_id);
        }
    }

    place_free_holes(&mut rings, &shells, &free_holes)?;

    Ok(compute_polygons(&rings, &shells))
}

fn build_maximal_edge_rings<F>(
    graph: &mut OverlayGraph<F>,
    rings: &mut Vec<EdgeRing<F>>,
) -> Result<Vec<RingId>, TopologyError<F>>
where
    F: GeoFloat + rstar::RTreeNum,
{
    let mut maximal_ring_ids = Vec::new();
    for id in 0..graph.dir_edges().len() {
        let directed_edge = graph.dir_edge(id);
        if directed_edge.is_in_result()
            && directed_edge.label().is_area()
            && directed_edge.edge_ring().is_none()
        {
            let ring_id = rings.len();
            let ring = EdgeRing::build(graph, id, RingKind::Maximal, ring_id)?;
            rings.push(ring);
            maximal_ring_ids.push(ring_id);
        }
    }
    Ok(maximal_ring_ids)
}

fn build_minimal_rings<F>(
    graph: &mut OverlayGraph<F>,
    rings: &mut Vec<EdgeRing<F>>,
    maximal_ring_edges: &[usize],
) -> Result<Vec<RingId>, TopologyError<F>>
where
    F: GeoFloat + rstar::RTreeNum,
{
    let mut minimal_ring_ids = Vec::new();
    for &directed_edge in maximal_ring_edges {
        if graph.dir_edge(directed_edge).min_edge_ring().is_none() {
            let ring_id = rings.len();
            let ring = EdgeRing::build(graph, directed_edge, RingKind::Minimal, ring_id)?;
            rings.push(ring);
            minimal_ring_ids.push(ring_id);
        }
    }
    Ok(minimal_ring_ids)
}

/// Assign every unplaced hole to the smallest shell strictly containing it.
fn place_free_holes<F>(
    rings: &mut Vec<EdgeRing<F>>,
    shells: &[RingId],
    free_holes: &[RingId],
) -> Result<(), TopologyError<F>>
where
    F: GeoFloat + rstar::RTreeNum,
{
    for &hole_id in free_holes {
        // only place holes which have not yet been assigned to a shell
        if rings[hole_id].shell().is_some() {
            continue;
        }
        match find_edge_ring_containing(rings, hole_id, shells) {
            Some(shell_id) => {
                rings[hole_id].set_shell(shell_id);
                rings[shell_id].add_hole(hole_id);
            }
            None => {
                return Err(TopologyError::at_coordinate(
                    "unable to assign free hole to a shell",
                    rings[hole_id].coordinate(),
                ));
            }
        }
    }
    Ok(())
}

/// Find the smallest shell ring strictly containing the hole, testing with a
/// hole vertex that is not also a vertex of the candidate shell.
fn find_edge_ring_containing<F>(
    rings: &[EdgeRing<F>],
    hole_id: RingId,
    shells: &[RingId],
) -> Option<RingId>
where
    F: GeoFloat + rstar::RTreeNum,
{
    let hole_ring = rings[hole_id].ring();

    let mut min_shell: Option<(RingId, F)> = None;
    for &shell_id in shells {
        let shell_ring = rings[shell_id].ring();

        let test_coord = hole_ring
            .0
            .iter()
            .find(|coord| !shell_ring.0.contains(*coord));
        let Some(test_coord) = test_coord else {
            // every hole vertex lies on the shell; it cannot be strictly contained
            continue;
        };

        if coord_pos_relative_to_ring(*test_coord, shell_ring) == CoordPos::Inside {
            let area = twice_signed_ring_area(shell_ring).abs();
            if min_shell.map_or(true, |(_, min_area)| area < min_area) {
                min_shell = Some((shell_id, area));
            }
        }
    }
    min_shell.map(|(shell_id, _)| shell_id)
}

/// Emit one polygon per shell, rewound to the conventional orientation:
/// exteriors counter-clockwise, interiors clockwise.
fn compute_polygons<F>(rings: &[EdgeRing<F>], shells: &[RingId]) -> Vec<Polygon<F>>
where
    F: GeoFloat + rstar::RTreeNum,
{
    let mut polygons = Vec::with_capacity(shells.len());
    for &shell_id in shells {
        let mut exterior = rings[shell_id].ring().clone();
        exterior.make_winding_order(WindingOrder::CounterClockwise);

        let mut interiors = Vec::with_capacity(rings[shell_id].holes().len());
        for &hole_id in rings[shell_id].holes() {
            let mut interior = rings[hole_id].ring().clone();
            interior.make_winding_order(WindingOrder::Clockwise);
            interiors.push(interior);
        }
        polygons.push(Polygon::new(exterior, interiors));
    }
    polygons
}
