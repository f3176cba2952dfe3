use crate::kernels::{Kernel, Orientation};
use crate::GeoNum;
use geo_types::{
    Coord, Geometry, GeometryCollection, Line, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon, Rect, Triangle,
};

/// The position of a `Coord` relative to a `Geometry`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordPos {
    OnBoundary,
    Inside,
    Outside,
}

/// Determine whether a `Coord` lies inside, outside, or on the boundary of a
/// geometry.
///
/// This is the point locator the overlay labelling consults: it is pure, it
/// holds no state, and it classifies boundaries with the OGC-SFS "mod 2"
/// rule.
pub trait CoordinatePosition {
    type Scalar: GeoNum;
    fn coordinate_position(&self, coord: &Coord<Self::Scalar>) -> CoordPos {
        let mut is_inside = false;
        let mut boundary_count = 0;

        self.calculate_coordinate_position(coord, &mut is_inside, &mut boundary_count);

        // “The boundary of an arbitrary collection of geometries whose interiors are disjoint
        // consists of geometries drawn from the boundaries of the element geometries by
        // application of the ‘mod 2’ union rule”
        //
        // ― OpenGIS Simple Feature Access § 6.1.15.1
        if boundary_count % 2 == 1 {
            CoordPos::OnBoundary
        } else if is_inside {
            CoordPos::Inside
        } else {
            CoordPos::Outside
        }
    }

    // impls of this trait must:
    //  1. set `is_inside = true` if `coord` is contained within the Interior of any component.
    //  2. increment `boundary_count` for each component whose Boundary contains `coord`.
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<Self::Scalar>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    );
}

impl<T: GeoNum> CoordinatePosition for Coord<T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        _boundary_count: &mut usize,
    ) {
        if self == coord {
            *is_inside = true;
        }
    }
}

impl<T: GeoNum> CoordinatePosition for Point<T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        _boundary_count: &mut usize,
    ) {
        if &self.0 == coord {
            *is_inside = true;
        }
    }
}

impl<T: GeoNum> CoordinatePosition for Line<T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        // degenerate line is a point
        if self.start == self.end {
            self.start
                .calculate_coordinate_position(coord, is_inside, boundary_count);
            return;
        }

        if coord == &self.start || coord == &self.end {
            *boundary_count += 1;
        } else if coord_on_segment(*coord, self) {
            *is_inside = true;
        }
    }
}

impl<T: GeoNum> CoordinatePosition for LineString<T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        if self.0.len() < 2 {
            debug_assert!(false, "invalid line string with less than 2 coords");
            return;
        }

        // A closed linestring has no boundary, per SFS
        if !self.is_closed() {
            // since self.0 is non-empty, safe to `unwrap`
            if coord == self.0.first().unwrap() || coord == self.0.last().unwrap() {
                *boundary_count += 1;
                return;
            }
        }

        if self.lines().any(|line| coord_on_segment(*coord, &line)) {
            // We've already checked for the "Boundary" condition, so if the
            // coord is on a segment it must be on the interior
            *is_inside = true
        }
    }
}

impl<T: GeoNum> CoordinatePosition for Polygon<T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        if self.exterior().0.is_empty() {
            return;
        }

        match coord_pos_relative_to_ring(*coord, self.exterior()) {
            CoordPos::Outside => {}
            CoordPos::OnBoundary => {
                *boundary_count += 1;
            }
            CoordPos::Inside => {
                for hole in self.interiors() {
                    match coord_pos_relative_to_ring(*coord, hole) {
                        CoordPos::Outside => {}
                        CoordPos::OnBoundary => {
                            *boundary_count += 1;
                            return;
                        }
                        CoordPos::Inside => {
                            return;
                        }
                    }
                }
                // the coord is *outside* the interior holes, so it's *inside* the polygon
                *is_inside = true;
            }
        }
    }
}

impl<T: GeoNum> CoordinatePosition for Rect<T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        self.to_polygon()
            .calculate_coordinate_position(coord, is_inside, boundary_count);
    }
}

impl<T: GeoNum> CoordinatePosition for Triangle<T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        self.to_polygon()
            .calculate_coordinate_position(coord, is_inside, boundary_count);
    }
}

impl<T: GeoNum> CoordinatePosition for MultiPoint<T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        _boundary_count: &mut usize,
    ) {
        if self.0.iter().any(|p| &p.0 == coord) {
            *is_inside = true;
        }
    }
}

impl<T: GeoNum> CoordinatePosition for MultiLineString<T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        for line_string in &self.0 {
            if !line_string.0.is_empty() {
                line_string.calculate_coordinate_position(coord, is_inside, boundary_count);
            }
        }
    }
}

impl<T: GeoNum> CoordinatePosition for MultiPolygon<T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        for polygon in &self.0 {
            polygon.calculate_coordinate_position(coord, is_inside, boundary_count);
        }
    }
}

impl<T: GeoNum> CoordinatePosition for GeometryCollection<T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        for geometry in self {
            geometry.calculate_coordinate_position(coord, is_inside, boundary_count);
        }
    }
}

impl<T: GeoNum> CoordinatePosition for Geometry<T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        match self {
            Geometry::Point(g) => g.calculate_coordinate_position(coord, is_inside, boundary_count),
            Geometry::Line(g) => g.calculate_coordinate_position(coord, is_inside, boundary_count),
            Geometry::LineString(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
            Geometry::Polygon(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
            Geometry::Rect(g) => g.calculate_coordinate_position(coord, is_inside, boundary_count),
            Geometry::Triangle(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
            Geometry::MultiPoint(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
            Geometry::MultiLineString(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
            Geometry::MultiPolygon(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
            Geometry::GeometryCollection(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
        }
    }
}

/// Locate a coordinate considering only the areal components of `geometry`.
///
/// Points and lines never contain a coordinate in this sense; a coordinate
/// "inside" a linestring of a collection is still `Outside` here. This is the
/// locator edge labelling uses to classify a node against an operand's area.
pub(crate) fn coord_position_in_areal<T: GeoNum>(
    coord: &Coord<T>,
    geometry: &Geometry<T>,
) -> CoordPos {
    match geometry {
        Geometry::Polygon(polygon) => polygon.coordinate_position(coord),
        Geometry::MultiPolygon(multi_polygon) => multi_polygon.coordinate_position(coord),
        Geometry::Rect(rect) => rect.coordinate_position(coord),
        Geometry::Triangle(triangle) => triangle.coordinate_position(coord),
        Geometry::GeometryCollection(collection) => {
            for geometry in collection {
                let position = coord_position_in_areal(coord, geometry);
                if position != CoordPos::Outside {
                    return position;
                }
            }
            CoordPos::Outside
        }
        _ => CoordPos::Outside,
    }
}

/// Is `coord` on the closed segment `line`?
///
/// Uses the robust orientation predicate, so truly-collinear points are
/// classified exactly.
pub(crate) fn coord_on_segment<T: GeoNum>(coord: Coord<T>, line: &Line<T>) -> bool {
    if T::Ker::orient2d(line.start, line.end, coord) != Orientation::Collinear {
        return false;
    }
    // collinear: reduce to per-axis range checks
    fn in_range<T: PartialOrd>(a: T, b: T, v: T) -> bool {
        if a <= b {
            a <= v && v <= b
        } else {
            b <= v && v <= a
        }
    }
    in_range(line.start.x, line.end.x, coord.x) && in_range(line.start.y, line.end.y, coord.y)
}

/// Calculate the position of a `Coord` relative to a closed `LineString`.
pub(crate) fn coord_pos_relative_to_ring<T: GeoNum>(
    coord: Coord<T>,
    linestring: &LineString<T>,
) -> CoordPos {
    // Use the ray-tracing algorithm: count #times a
    // horizontal ray from point (to positive infinity)
    // crosses the ring.
    //
    // See: https://en.wikipedia.org/wiki/Point_in_polygon

    debug_assert!(linestring.is_closed());

    if linestring.0.is_empty() {
        return CoordPos::Outside;
    }
    if linestring.0.len() == 1 {
        // If LineString has one point, it will not generate
        // any lines.  So, we handle this edge case separately.
        return if coord == linestring.0[0] {
            CoordPos::OnBoundary
        } else {
            CoordPos::Outside
        };
    }

    let mut crossings = 0;
    for line in linestring.lines() {
        // Check if coord lies on the line
        if coord_on_segment(coord, &line) {
            return CoordPos::OnBoundary;
        }

        // Ignore if the line is strictly to the left of the coord.
        let max_x = if line.start.x < line.end.x {
            line.end.x
        } else {
            line.start.x
        };
        if max_x < coord.x {
            continue;
        }

        // Ignore if line is horizontal. This includes an edge case where the
        // ray would overlap a horizontal segment of the ring, which is
        // irrelevant for the crossing count.
        if line.start.y == line.end.y {
            continue;
        }

        // Orient the segment upward, and count a crossing iff the segment's
        // half-open y-range [min_y, max_y) covers the ray height and the
        // coord is strictly left of the segment. The half-open range counts
        // a ray passing through a shared vertex exactly once.
        let (lo, hi) = if line.start.y < line.end.y {
            (line.start, line.end)
        } else {
            (line.end, line.start)
        };
        if lo.y <= coord.y
            && coord.y < hi.y
            && T::Ker::orient2d(lo, hi, coord) == Orientation::CounterClockwise
        {
            crossings += 1;
        }
    }
    if crossings % 2 == 1 {
        CoordPos::Inside
    } else {
        CoordPos::Outside
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geo_types::{coord, line_string, polygon};

    #[test]
    fn empty_poly() {
        let square_poly: Polygon<f64> = Polygon::new(LineString(vec![]), vec![]);
        assert_eq!(
            square_poly.coordinate_position(&coord! { x: 0.0, y: 0.0 }),
            CoordPos::Outside
        );
    }

    #[test]
    fn simple_poly() {
        let square_poly = polygon![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 2.0), (x: 0.0, y: 2.0), (x: 0.0, y: 0.0)];

        assert_eq!(
            square_poly.coordinate_position(&coord! { x: 1.0, y: 1.0 }),
            CoordPos::Inside
        );
        assert_eq!(
            square_poly.coordinate_position(&coord! { x: 0.0, y: 1.0 }),
            CoordPos::OnBoundary
        );
        assert_eq!(
            square_poly.coordinate_position(&coord! { x: 0.0, y: 0.0 }),
            CoordPos::OnBoundary
        );
        assert_eq!(
            square_poly.coordinate_position(&coord! { x: 5.0, y: 5.0 }),
            CoordPos::Outside
        );
    }

    #[test]
    fn poly_with_hole() {
        let poly = polygon![
            exterior: [(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0), (x: 0.0, y: 0.0)],
            interiors: [[(x: 3.0, y: 3.0), (x: 3.0, y: 7.0), (x: 7.0, y: 7.0), (x: 7.0, y: 3.0), (x: 3.0, y: 3.0)]],
        ];
        assert_eq!(
            poly.coordinate_position(&coord! { x: 5.0, y: 5.0 }),
            CoordPos::Outside
        );
        assert_eq!(
            poly.coordinate_position(&coord! { x: 3.0, y: 5.0 }),
            CoordPos::OnBoundary
        );
        assert_eq!(
            poly.coordinate_position(&coord! { x: 1.0, y: 5.0 }),
            CoordPos::Inside
        );
    }

    #[test]
    fn open_line_string_boundary() {
        let ls = line_string![(x: 0.0, y: 0.0), (x: 5.0, y: 0.0), (x: 5.0, y: 5.0)];
        assert_eq!(
            ls.coordinate_position(&coord! { x: 0.0, y: 0.0 }),
            CoordPos::OnBoundary
        );
        assert_eq!(
            ls.coordinate_position(&coord! { x: 2.5, y: 0.0 }),
            CoordPos::Inside
        );
        assert_eq!(
            ls.coordinate_position(&coord! { x: 2.5, y: 2.5 }),
            CoordPos::Outside
        );
    }

    #[test]
    fn ray_through_vertex_counts_once() {
        // diamond whose left vertex is at the ray height of the probe
        let diamond = line_string![(x: 1.0, y: 0.0), (x: 2.0, y: 1.0), (x: 1.0, y: 2.0), (x: 0.0, y: 1.0), (x: 1.0, y: 0.0)];
        assert_eq!(
            coord_pos_relative_to_ring(coord! { x: -1.0, y: 1.0 }, &diamond),
            CoordPos::Outside
        );
        assert_eq!(
            coord_pos_relative_to_ring(coord! { x: 1.0, y: 1.0 }, &diamond),
            CoordPos::Inside
        );
    }
}
