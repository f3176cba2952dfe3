use super::{Direction, Edge};
use crate::utils::lex_cmp;
use crate::GeoFloat;
use geo_types::Coord;

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// The edge table: a list of noded edges, deduplicated up to reversal.
///
/// When a duplicate is inserted, its label is merged into the existing edge
/// (flipped when the duplicate runs in the opposite direction) and its area
/// sides accumulate in the existing edge's [`Depth`]. Once every edge has
/// been inserted, [`compute_labels_from_depths`](EdgeList::compute_labels_from_depths)
/// rewrites the merged labels from the accumulated depths, demoting
/// dimensionally collapsed area edges to line edges.
pub(crate) struct EdgeList<F: GeoFloat> {
    edges: Vec<Edge<F>>,
    index: BTreeMap<OrientedCoords<F>, usize>,
}

/// A coordinate sequence in canonical orientation: an edge and its reverse
/// produce the same key, which realizes "equal up to reversal" lookup.
struct OrientedCoords<F: GeoFloat>(Vec<Coord<F>>);

impl<F: GeoFloat> OrientedCoords<F> {
    fn new(coords: &[Coord<F>]) -> Self {
        let mut oriented = coords.to_vec();
        if sequence_cmp(coords, &oriented.iter().rev().cloned().collect::<Vec<_>>())
            == Ordering::Greater
        {
            oriented.reverse();
        }
        OrientedCoords(oriented)
    }
}

fn sequence_cmp<F: GeoFloat>(a: &[Coord<F>], b: &[Coord<F>]) -> Ordering {
    for (p, q) in a.iter().zip(b.iter()) {
        let ordering = lex_cmp(p, q);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.len().cmp(&b.len())
}

impl<F: GeoFloat> PartialEq for OrientedCoords<F> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl<F: GeoFloat> Eq for OrientedCoords<F> {}
impl<F: GeoFloat> PartialOrd for OrientedCoords<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<F: GeoFloat> Ord for OrientedCoords<F> {
    fn cmp(&self, other: &Self) -> Ordering {
        sequence_cmp(&self.0, &other.0)
    }
}

impl<F: GeoFloat> EdgeList<F> {
    pub fn new() -> Self {
        EdgeList {
            edges: Vec::new(),
            index: BTreeMap::new(),
        }
    }

    pub fn edges(&self) -> &[Edge<F>] {
        &self.edges
    }

    pub fn into_edges(self) -> Vec<Edge<F>> {
        self.edges
    }

    /// Insert `edge`, merging it into an equal existing edge if there is one.
    ///
    /// If the duplicate runs in the reverse direction its label is flipped
    /// before merging. The first duplicate initializes the existing edge's
    /// depth from its own label.
    pub fn insert_unique_edge(&mut self, edge: Edge<F>) {
        let key = OrientedCoords::new(edge.coords());
        match self.index.get(&key) {
            Some(&existing_index) => {
                let existing_edge = &mut self.edges[existing_index];

                let mut label_to_merge = edge.label().clone();
                if !existing_edge.is_pointwise_equal(&edge) {
                    label_to_merge.flip();
                }

                if existing_edge.depth().is_null() {
                    let existing_label = existing_edge.label().clone();
                    existing_edge.depth_mut().add(&existing_label);
                }
                existing_edge.depth_mut().add(&label_to_merge);
                existing_edge.label_mut().merge(&label_to_merge);
                debug!(
                    "merged duplicate edge: {:?} {:?}",
                    existing_edge.label(),
                    existing_edge.depth()
                );
            }
            None => {
                self.index.insert(key, self.edges.len());
                self.edges.push(edge);
            }
        }
    }

    /// Rewrite the label of every depth-carrying edge from its normalized
    /// depths. An operand whose left and right depths agree no longer bounds
    /// that operand's area anywhere along this edge: its labelling collapses
    /// to a line.
    pub fn compute_labels_from_depths(&mut self) {
        for edge in &mut self.edges {
            if edge.depth().is_null() {
                continue;
            }
            edge.depth_mut().normalize();

            let mut collapsed = false;
            for geom_index in 0..2 {
                let label = edge.label();
                if label.is_empty(geom_index)
                    || !label.is_geom_area(geom_index)
                    || edge.depth().is_geom_null(geom_index)
                {
                    continue;
                }
                if edge.depth().delta(geom_index) == 0 {
                    edge.label_mut().to_line(geom_index);
                    collapsed = true;
                } else {
                    debug_assert!(
                        edge.depth().depth(geom_index, Direction::Left).is_some(),
                        "depth of LEFT side of edge found to be depth-null"
                    );
                    let left = edge.depth().position(geom_index, Direction::Left);
                    let right = edge.depth().position(geom_index, Direction::Right);
                    edge.label_mut()
                        .set_position(geom_index, Direction::Left, left);
                    edge.label_mut()
                        .set_position(geom_index, Direction::Right, right);
                }
            }

            // an edge whose every area labelling collapsed carries no area
            // information any more; mark it for replacement by a line edge.
            // An operand still holding a fully populated area labelling keeps
            // the edge an area edge.
            let label = edge.label();
            let bounds_an_area =
                (0..2).any(|i| label.is_geom_area(i) && !label.is_any_empty(i));
            if collapsed && !bounds_an_area {
                edge.set_collapsed(true);
            }
        }
    }

    /// Swap every collapsed edge for its line-labelled replacement.
    pub fn replace_collapsed_edges(&mut self) {
        for edge in &mut self.edges {
            if edge.is_collapsed() {
                debug!("replacing collapsed edge: {:?}", edge.label());
                *edge = edge.collapsed_edge();
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::super::{CoordPos, Direction, Label, TopologyPosition};
    use super::*;
    use geo_types::coord;

    fn boundary_edge(
        coords: Vec<Coord<f64>>,
        geom_index: usize,
        left: CoordPos,
        right: CoordPos,
    ) -> Edge<f64> {
        Edge::new(
            coords,
            Label::new(
                geom_index,
                TopologyPosition::area(CoordPos::OnBoundary, left, right),
            ),
        )
    }

    fn segment() -> Vec<Coord<f64>> {
        vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 }]
    }

    fn reversed_segment() -> Vec<Coord<f64>> {
        vec![coord! { x: 10.0, y: 0.0 }, coord! { x: 0.0, y: 0.0 }]
    }

    #[test]
    fn same_direction_duplicates_merge() {
        let mut edge_list = EdgeList::new();
        edge_list.insert_unique_edge(boundary_edge(
            segment(),
            0,
            CoordPos::Outside,
            CoordPos::Inside,
        ));
        edge_list.insert_unique_edge(boundary_edge(
            segment(),
            1,
            CoordPos::Outside,
            CoordPos::Inside,
        ));

        assert_eq!(edge_list.edges().len(), 1);
        let label = edge_list.edges()[0].label();
        assert_eq!(label.position(0, Direction::Right), Some(CoordPos::Inside));
        assert_eq!(label.position(1, Direction::Right), Some(CoordPos::Inside));
    }

    #[test]
    fn reversed_duplicates_flip_before_merging() {
        let mut edge_list = EdgeList::new();
        edge_list.insert_unique_edge(boundary_edge(
            segment(),
            0,
            CoordPos::Outside,
            CoordPos::Inside,
        ));
        edge_list.insert_unique_edge(boundary_edge(
            reversed_segment(),
            1,
            CoordPos::Outside,
            CoordPos::Inside,
        ));

        assert_eq!(edge_list.edges().len(), 1);
        let label = edge_list.edges()[0].label();
        // operand 1 ran the other way, so its interior is on the merged
        // edge's left
        assert_eq!(label.position(1, Direction::Left), Some(CoordPos::Inside));
        assert_eq!(label.position(1, Direction::Right), Some(CoordPos::Outside));
    }

    #[test]
    fn opposing_same_operand_duplicates_collapse_to_line() {
        let mut edge_list = EdgeList::new();
        edge_list.insert_unique_edge(boundary_edge(
            segment(),
            0,
            CoordPos::Outside,
            CoordPos::Inside,
        ));
        edge_list.insert_unique_edge(boundary_edge(
            reversed_segment(),
            0,
            CoordPos::Outside,
            CoordPos::Inside,
        ));

        edge_list.compute_labels_from_depths();
        assert!(edge_list.edges()[0].is_collapsed());

        edge_list.replace_collapsed_edges();
        let edge = &edge_list.edges()[0];
        assert!(!edge.is_collapsed());
        assert!(edge.label().is_line(0));
        assert_eq!(edge.label().on_position(0), Some(CoordPos::OnBoundary));
    }

    #[test]
    fn depths_rewrite_labels() {
        let mut edge_list = EdgeList::new();
        // two coincident shells of the same operand: depth 2 on the right
        edge_list.insert_unique_edge(boundary_edge(
            segment(),
            0,
            CoordPos::Outside,
            CoordPos::Inside,
        ));
        edge_list.insert_unique_edge(boundary_edge(
            segment(),
            0,
            CoordPos::Outside,
            CoordPos::Inside,
        ));

        edge_list.compute_labels_from_depths();
        let label = edge_list.edges()[0].label();
        assert_eq!(label.position(0, Direction::Left), Some(CoordPos::Outside));
        assert_eq!(label.position(0, Direction::Right), Some(CoordPos::Inside));
        assert!(!edge_list.edges()[0].is_collapsed());
    }
}
