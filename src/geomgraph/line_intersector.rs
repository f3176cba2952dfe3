pub(crate) use crate::line_intersection::LineIntersection;
use crate::GeoFloat;
use geo_types::Line;

pub(crate) trait LineIntersector<F: GeoFloat> {
    fn compute_intersection(&mut self, l1: Line<F>, l2: Line<F>) -> Option<LineIntersection<F>>;
}
