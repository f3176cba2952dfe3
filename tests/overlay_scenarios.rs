use geo_overlay::{overlay, OpType, OverlayOptions};
use geo_types::{Coord, Geometry, LineString, Polygon};
use wkt::wkt;

fn options() -> OverlayOptions {
    OverlayOptions::default()
}

fn ring_area(ring: &LineString<f64>) -> f64 {
    let twice: f64 = ring
        .lines()
        .map(|line| line.start.x * line.end.y - line.end.x * line.start.y)
        .sum();
    (twice / 2.0).abs()
}

fn polygon_area(polygon: &Polygon<f64>) -> f64 {
    let hole_area: f64 = polygon.interiors().iter().map(ring_area).sum();
    ring_area(polygon.exterior()) - hole_area
}

fn polygons_of(geometry: &Geometry<f64>) -> Vec<&Polygon<f64>> {
    match geometry {
        Geometry::Polygon(polygon) => vec![polygon],
        Geometry::MultiPolygon(multi_polygon) => multi_polygon.iter().collect(),
        Geometry::GeometryCollection(collection) => collection
            .iter()
            .flat_map(|geometry| polygons_of(geometry))
            .collect(),
        _ => vec![],
    }
}

fn total_area(geometry: &Geometry<f64>) -> f64 {
    polygons_of(geometry).iter().map(|p| polygon_area(p)).sum()
}

/// The vertices of a closed ring, ignoring orientation, rotation, and the
/// closing duplicate.
fn ring_vertices(ring: &LineString<f64>) -> Vec<Coord<f64>> {
    let mut coords: Vec<Coord<f64>> = ring.0[..ring.0.len() - 1].to_vec();
    coords.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap()
            .then(a.y.partial_cmp(&b.y).unwrap())
    });
    coords
}

fn square_a() -> Geometry<f64> {
    (&wkt! { POLYGON((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)) }).into()
}

fn square_b() -> Geometry<f64> {
    (&wkt! { POLYGON((5.0 5.0,15.0 5.0,15.0 15.0,5.0 15.0,5.0 5.0)) }).into()
}

#[test]
fn union_of_overlapping_squares() {
    let result = overlay(&square_a(), &square_b(), OpType::Union, &options()).unwrap();

    let Geometry::Polygon(polygon) = result else {
        panic!("union of overlapping squares should be a single polygon");
    };
    assert!(polygon.interiors().is_empty());
    assert_eq!(polygon_area(&polygon), 175.0);

    let expected: Polygon<f64> = wkt! { POLYGON((0.0 0.0,10.0 0.0,10.0 5.0,15.0 5.0,15.0 15.0,5.0 15.0,5.0 10.0,0.0 10.0,0.0 0.0)) }.into();
    assert_eq!(
        ring_vertices(polygon.exterior()),
        ring_vertices(expected.exterior())
    );
}

#[test]
fn intersection_of_overlapping_squares() {
    let result = overlay(&square_a(), &square_b(), OpType::Intersection, &options()).unwrap();

    let Geometry::Polygon(polygon) = result else {
        panic!("intersection of overlapping squares should be a single polygon");
    };
    assert_eq!(polygon_area(&polygon), 25.0);

    let expected: Polygon<f64> = wkt! { POLYGON((5.0 5.0,10.0 5.0,10.0 10.0,5.0 10.0,5.0 5.0)) }.into();
    assert_eq!(
        ring_vertices(polygon.exterior()),
        ring_vertices(expected.exterior())
    );
}

#[test]
fn difference_of_overlapping_squares() {
    let result = overlay(&square_a(), &square_b(), OpType::Difference, &options()).unwrap();

    let Geometry::Polygon(polygon) = result else {
        panic!("difference of overlapping squares should be a single polygon");
    };
    assert_eq!(polygon_area(&polygon), 75.0);

    let expected: Polygon<f64> = wkt! { POLYGON((0.0 0.0,10.0 0.0,10.0 5.0,5.0 5.0,5.0 10.0,0.0 10.0,0.0 0.0)) }.into();
    assert_eq!(
        ring_vertices(polygon.exterior()),
        ring_vertices(expected.exterior())
    );
}

#[test]
fn symmetric_difference_of_overlapping_squares() {
    let result = overlay(&square_a(), &square_b(), OpType::SymDifference, &options()).unwrap();

    let polygons = polygons_of(&result);
    assert_eq!(polygons.len(), 2);
    let mut areas: Vec<f64> = polygons.iter().map(|p| polygon_area(p)).collect();
    areas.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(areas, vec![75.0, 75.0]);
    assert_eq!(total_area(&result), 150.0);
}

#[test]
fn union_of_disjoint_squares_is_a_multi_polygon() {
    let a: Geometry<f64> = (&wkt! { POLYGON((0.0 0.0,1.0 0.0,1.0 1.0,0.0 1.0,0.0 0.0)) }).into();
    let b: Geometry<f64> = (&wkt! { POLYGON((2.0 2.0,3.0 2.0,3.0 3.0,2.0 3.0,2.0 2.0)) }).into();

    let result = overlay(&a, &b, OpType::Union, &options()).unwrap();
    let Geometry::MultiPolygon(multi_polygon) = result else {
        panic!("union of disjoint squares should be a multi polygon");
    };
    assert_eq!(multi_polygon.0.len(), 2);
    for polygon in &multi_polygon {
        assert_eq!(polygon_area(polygon), 1.0);
    }
}

#[test]
fn intersection_of_line_and_containing_polygon() {
    let line: Geometry<f64> = (&wkt! { LINESTRING(0.0 0.0,10.0 10.0) }).into();

    let result = overlay(&line, &square_a(), OpType::Intersection, &options()).unwrap();
    let Geometry::LineString(line_string) = result else {
        panic!("intersection should be the full line");
    };

    let mut endpoints = vec![line_string.0[0], line_string.0[line_string.0.len() - 1]];
    endpoints.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap());
    assert_eq!(
        endpoints,
        vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 10.0, y: 10.0 }]
    );
}

#[test]
fn union_keeps_island_inside_hole() {
    let a: Geometry<f64> = (&wkt! { POLYGON(
        (0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0),
        (3.0 3.0,7.0 3.0,7.0 7.0,3.0 7.0,3.0 3.0)
    ) })
    .into();
    let b: Geometry<f64> = (&wkt! { POLYGON((4.0 4.0,6.0 4.0,6.0 6.0,4.0 6.0,4.0 4.0)) }).into();

    let result = overlay(&a, &b, OpType::Union, &options()).unwrap();

    let polygons = polygons_of(&result);
    assert_eq!(polygons.len(), 2);

    // the outer polygon keeps its hole; the small square survives as an
    // island inside the hole
    let outer = polygons
        .iter()
        .find(|p| !p.interiors().is_empty())
        .expect("one polygon should carry the hole");
    assert_eq!(ring_area(outer.exterior()), 100.0);
    assert_eq!(outer.interiors().len(), 1);
    assert_eq!(ring_area(&outer.interiors()[0]), 16.0);

    let island = polygons
        .iter()
        .find(|p| p.interiors().is_empty())
        .expect("one polygon should be the island");
    assert_eq!(polygon_area(island), 4.0);

    assert_eq!(total_area(&result), 88.0);
}

#[test]
fn mixed_dimension_intersection_orders_points_lines_polygons() {
    let a = square_a();
    let b: Geometry<f64> = Geometry::GeometryCollection(geo_types::GeometryCollection(vec![
        geo_types::Point::try_from(wkt! { POINT(2.0 2.0) })
            .unwrap()
            .into(),
        (&wkt! { LINESTRING(-5.0 5.0,5.0 5.0) }).into(),
        (&wkt! { POLYGON((8.0 8.0,12.0 8.0,12.0 12.0,8.0 12.0,8.0 8.0)) }).into(),
    ]));

    let result = overlay(&a, &b, OpType::Intersection, &options()).unwrap();
    let Geometry::GeometryCollection(ref collection) = result else {
        panic!("mixed-dimension intersection should be a collection");
    };
    assert_eq!(collection.0.len(), 3);
    assert!(matches!(collection.0[0], Geometry::Point(_)));
    assert!(matches!(collection.0[1], Geometry::LineString(_)));
    assert!(matches!(collection.0[2], Geometry::Polygon(_)));

    let Geometry::Point(point) = &collection.0[0] else {
        unreachable!()
    };
    assert_eq!(point.0, Coord { x: 2.0, y: 2.0 });

    assert_eq!(total_area(&result), 4.0);
}

#[test]
fn difference_with_boundary_touching_hole() {
    // subtracting a diamond whose bottom vertex lies on the square's edge
    // leaves a hole that touches the exterior ring: the traced ring passes
    // through the touch node twice and must be decomposed
    let b: Geometry<f64> = (&wkt! { POLYGON((5.0 0.0,9.0 4.0,5.0 8.0,1.0 4.0,5.0 0.0)) }).into();

    let result = overlay(&square_a(), &b, OpType::Difference, &options()).unwrap();
    let Geometry::Polygon(polygon) = result else {
        panic!("difference should be a single polygon with a hole");
    };
    assert_eq!(polygon.interiors().len(), 1);
    assert_eq!(ring_area(&polygon.interiors()[0]), 32.0);
    assert_eq!(polygon_area(&polygon), 68.0);
}

#[test]
fn union_of_corner_touching_squares() {
    let b: Geometry<f64> =
        (&wkt! { POLYGON((10.0 10.0,20.0 10.0,20.0 20.0,10.0 20.0,10.0 10.0)) }).into();

    let result = overlay(&square_a(), &b, OpType::Union, &options()).unwrap();
    let polygons = polygons_of(&result);
    assert_eq!(polygons.len(), 2);
    assert_eq!(total_area(&result), 200.0);
}

#[test]
fn snap_rounding_overlay_matches_classic_result() {
    let mut options = options();
    options.noding_precision = Some(geo_overlay::PrecisionModel::fixed(1000.0));

    let result = overlay(&square_a(), &square_b(), OpType::Union, &options).unwrap();
    assert_eq!(total_area(&result), 175.0);
}
