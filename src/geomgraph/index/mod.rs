pub(crate) use edge_set_intersector::EdgeSetIntersector;
pub(crate) use rstar_edge_set_intersector::RStarEdgeSetIntersector;
pub(crate) use segment_intersector::SegmentIntersector;

mod edge_set_intersector;
mod rstar_edge_set_intersector;
mod segment_intersector;
