use crate::error::TopologyError;
use crate::geomgraph::Edge;
use crate::line_intersection::{line_intersection, LineIntersection};
use crate::GeoFloat;
use geo_types::{Coord, Line};

use rstar::RTree;

/// Validates that a set of noded edges is correctly noded: any two segments
/// may share only endpoints which are endpoints of *both* edges.
///
/// Robust noding with floating point arithmetic can fail on pathological
/// inputs; the overlay pipeline runs this validator after noding so that
/// such failures surface as a [`TopologyError`] instead of corrupt output.
/// Callers can then retry the overlay with snap-rounding.
pub(crate) struct EdgeNodingValidator;

struct Segment<F: GeoFloat + rstar::RTreeNum> {
    edge_index: usize,
    segment_index: usize,
    line: Line<F>,
    string_start: Coord<F>,
    string_end: Coord<F>,
    envelope: rstar::AABB<Coord<F>>,
}

impl<F> rstar::RTreeObject for Segment<F>
where
    F: GeoFloat + rstar::RTreeNum,
{
    type Envelope = rstar::AABB<Coord<F>>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl EdgeNodingValidator {
    pub fn check_valid<F>(edges: &[Edge<F>]) -> Result<(), TopologyError<F>>
    where
        F: GeoFloat + rstar::RTreeNum,
    {
        let segments: Vec<Segment<F>> = edges
            .iter()
            .enumerate()
            .flat_map(|(edge_index, edge)| {
                let coords = edge.coords();
                let string_start = coords[0];
                let string_end = coords[coords.len() - 1];
                (0..coords.len() - 1).map(move |segment_index| {
                    let line = Line::new(coords[segment_index], coords[segment_index + 1]);
                    Segment {
                        edge_index,
                        segment_index,
                        line,
                        string_start,
                        string_end,
                        envelope: rstar::AABB::from_corners(line.start, line.end),
                    }
                })
            })
            .collect();

        let tree = RTree::bulk_load(segments);
        for (a, b) in tree.intersection_candidates_with_other_tree(&tree) {
            // examine each unordered pair once
            if (a.edge_index, a.segment_index) >= (b.edge_index, b.segment_index) {
                continue;
            }
            // consecutive segments of the same edge legitimately share a vertex
            if a.edge_index == b.edge_index && b.segment_index - a.segment_index == 1 {
                continue;
            }

            match line_intersection(a.line, b.line) {
                None => {}
                Some(LineIntersection::Collinear { intersection }) => {
                    return Err(TopologyError::at_coordinate(
                        "found non-noded intersection (overlapping segments)",
                        intersection.start,
                    ));
                }
                Some(LineIntersection::SinglePoint {
                    intersection,
                    is_proper: true,
                }) => {
                    return Err(TopologyError::at_coordinate(
                        "found non-noded intersection (interior crossing)",
                        intersection,
                    ));
                }
                Some(LineIntersection::SinglePoint {
                    intersection,
                    is_proper: false,
                }) => {
                    // the shared point must be an endpoint of both edges,
                    // not just of the segments
                    let a_endpoint =
                        intersection == a.string_start || intersection == a.string_end;
                    let b_endpoint =
                        intersection == b.string_start || intersection == b.string_end;
                    if !(a_endpoint && b_endpoint) {
                        return Err(TopologyError::at_coordinate(
                            "found non-noded intersection (vertex touch)",
                            intersection,
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geomgraph::{Label, TopologyPosition};
    use crate::CoordPos;
    use geo_types::coord;

    fn line_edge(coords: Vec<Coord<f64>>) -> Edge<f64> {
        Edge::new(
            coords,
            Label::new(0, TopologyPosition::line_or_point(CoordPos::Inside)),
        )
    }

    #[test]
    fn accepts_edges_meeting_at_endpoints() {
        let edges = vec![
            line_edge(vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 5.0, y: 5.0 }]),
            line_edge(vec![coord! { x: 5.0, y: 5.0 }, coord! { x: 10.0, y: 0.0 }]),
        ];
        assert!(EdgeNodingValidator::check_valid(&edges).is_ok());
    }

    #[test]
    fn rejects_interior_crossing() {
        let edges = vec![
            line_edge(vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 10.0 }]),
            line_edge(vec![coord! { x: 0.0, y: 10.0 }, coord! { x: 10.0, y: 0.0 }]),
        ];
        let error = EdgeNodingValidator::check_valid(&edges).unwrap_err();
        assert_eq!(error.coordinate(), Some(coord! { x: 5.0, y: 5.0 }));
    }

    #[test]
    fn rejects_endpoint_on_segment_interior() {
        let edges = vec![
            line_edge(vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 }]),
            line_edge(vec![coord! { x: 5.0, y: 0.0 }, coord! { x: 5.0, y: 5.0 }]),
        ];
        assert!(EdgeNodingValidator::check_valid(&edges).is_err());
    }

    #[test]
    fn accepts_closed_ring_edge() {
        let edges = vec![line_edge(vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 10.0, y: 0.0 },
            coord! { x: 10.0, y: 10.0 },
            coord! { x: 0.0, y: 10.0 },
            coord! { x: 0.0, y: 0.0 },
        ])];
        assert!(EdgeNodingValidator::check_valid(&edges).is_ok());
    }
}
