use geo_overlay::{overlay, CoordPos, CoordinatePosition, OpType, OverlayOptions};
use geo_types::{coord, polygon, Coord, Geometry, GeometryCollection, LineString, Polygon};

fn options() -> OverlayOptions {
    OverlayOptions::default()
}

fn square_a() -> Geometry<f64> {
    polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0), (x: 0.0, y: 0.0)].into()
}

fn square_b() -> Geometry<f64> {
    polygon![(x: 5.0, y: 5.0), (x: 15.0, y: 5.0), (x: 15.0, y: 15.0), (x: 5.0, y: 15.0), (x: 5.0, y: 5.0)]
        .into()
}

fn notch() -> Geometry<f64> {
    // an L-shaped polygon, to exercise non-convex cases
    polygon![
        (x: 2.0, y: -3.0), (x: 14.0, y: -3.0), (x: 14.0, y: 8.0), (x: 9.0, y: 8.0),
        (x: 9.0, y: 2.0), (x: 2.0, y: 2.0), (x: 2.0, y: -3.0)
    ]
    .into()
}

fn ring_area(ring: &LineString<f64>) -> f64 {
    let twice: f64 = ring
        .lines()
        .map(|line| line.start.x * line.end.y - line.end.x * line.start.y)
        .sum();
    (twice / 2.0).abs()
}

fn total_area(geometry: &Geometry<f64>) -> f64 {
    fn polygon_area(polygon: &Polygon<f64>) -> f64 {
        ring_area(polygon.exterior()) - polygon.interiors().iter().map(ring_area).sum::<f64>()
    }
    match geometry {
        Geometry::Polygon(polygon) => polygon_area(polygon),
        Geometry::MultiPolygon(multi_polygon) => multi_polygon.iter().map(polygon_area).sum(),
        Geometry::GeometryCollection(collection) => collection.iter().map(total_area).sum(),
        _ => 0.0,
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Probe a grid of points, comparing membership in the overlay result with
/// the boolean predicate evaluated on the operands. Points near a boundary
/// of either operand are skipped: their classification is legitimately
/// boundary-dependent.
fn assert_matches_predicate(
    a: &Geometry<f64>,
    b: &Geometry<f64>,
    result: &Geometry<f64>,
    predicate: impl Fn(bool, bool) -> bool,
) {
    let mut x = -1.75;
    while x < 17.0 {
        let mut y = -1.75;
        while y < 17.0 {
            let coord: Coord<f64> = coord! { x: x, y: y };
            let position_a = a.coordinate_position(&coord);
            let position_b = b.coordinate_position(&coord);
            if position_a != CoordPos::OnBoundary && position_b != CoordPos::OnBoundary {
                let expected = predicate(
                    position_a == CoordPos::Inside,
                    position_b == CoordPos::Inside,
                );
                let actual = result.coordinate_position(&coord) != CoordPos::Outside;
                assert_eq!(
                    expected, actual,
                    "predicate mismatch at ({x}, {y}): expected in-result={expected}"
                );
            }
            y += 0.5;
        }
        x += 0.5;
    }
}

#[test]
fn union_and_intersection_with_self_are_identity() {
    let a = square_a();
    for op in [OpType::Union, OpType::Intersection] {
        let result = overlay(&a, &a, op, &options()).unwrap();
        assert!(approx_eq(total_area(&result), 100.0));
        assert_matches_predicate(&a, &a, &result, |in_a, _| in_a);
    }
}

#[test]
fn difference_with_self_is_empty_with_input_dimension() {
    let a = square_a();
    for op in [OpType::Difference, OpType::SymDifference] {
        let result = overlay(&a, &a, op, &options()).unwrap();
        let Geometry::Polygon(polygon) = result else {
            panic!("empty self-{op:?} of an area should be an empty polygon");
        };
        assert!(polygon.exterior().0.is_empty());
    }
}

#[test]
fn empty_operand_identities() {
    let a = square_a();
    let empty: Geometry<f64> = Geometry::GeometryCollection(GeometryCollection(vec![]));

    let union = overlay(&a, &empty, OpType::Union, &options()).unwrap();
    assert!(approx_eq(total_area(&union), 100.0));

    let difference = overlay(&a, &empty, OpType::Difference, &options()).unwrap();
    assert!(approx_eq(total_area(&difference), 100.0));

    let sym_difference = overlay(&a, &empty, OpType::SymDifference, &options()).unwrap();
    assert!(approx_eq(total_area(&sym_difference), 100.0));

    // intersecting with an empty operand has undefined dimension: the result
    // is an empty collection
    let intersection = overlay(&a, &empty, OpType::Intersection, &options()).unwrap();
    let Geometry::GeometryCollection(collection) = intersection else {
        panic!("intersection with empty should be an empty collection");
    };
    assert!(collection.is_empty());
}

#[test]
fn commutative_operations() {
    let a = square_a();
    let b = notch();
    for op in [OpType::Union, OpType::Intersection, OpType::SymDifference] {
        let ab = overlay(&a, &b, op, &options()).unwrap();
        let ba = overlay(&b, &a, op, &options()).unwrap();
        assert!(
            approx_eq(total_area(&ab), total_area(&ba)),
            "area of {op:?} should not depend on operand order"
        );
        assert_matches_predicate(&b, &a, &ba, |in_b, in_a| match op {
            OpType::Union => in_a || in_b,
            OpType::Intersection => in_a && in_b,
            OpType::SymDifference => in_a != in_b,
            OpType::Difference => unreachable!(),
        });
    }
}

#[test]
fn symmetric_difference_is_union_of_differences() {
    let a = square_a();
    let b = notch();

    let sym_difference = overlay(&a, &b, OpType::SymDifference, &options()).unwrap();
    let a_minus_b = overlay(&a, &b, OpType::Difference, &options()).unwrap();
    let b_minus_a = overlay(&b, &a, OpType::Difference, &options()).unwrap();
    let union_of_differences =
        overlay(&a_minus_b, &b_minus_a, OpType::Union, &options()).unwrap();

    assert!(approx_eq(
        total_area(&sym_difference),
        total_area(&union_of_differences)
    ));

    // spatially equivalent: membership agrees everywhere off the boundaries
    assert_matches_predicate(&a, &b, &sym_difference, |in_a, in_b| in_a != in_b);
    assert_matches_predicate(&a, &b, &union_of_differences, |in_a, in_b| in_a != in_b);
}

#[test]
fn union_and_intersection_conserve_area() {
    let pairs = [
        (square_a(), square_b()),
        (square_a(), notch()),
        (square_b(), notch()),
    ];
    for (a, b) in pairs {
        let union = overlay(&a, &b, OpType::Union, &options()).unwrap();
        let intersection = overlay(&a, &b, OpType::Intersection, &options()).unwrap();
        assert!(
            approx_eq(
                total_area(&a) + total_area(&b),
                total_area(&union) + total_area(&intersection)
            ),
            "area must be conserved across union/intersection"
        );
    }
}

#[test]
fn results_match_point_sampling() {
    let a = square_a();
    let b = notch();
    let cases: [(OpType, fn(bool, bool) -> bool); 4] = [
        (OpType::Intersection, |in_a, in_b| in_a && in_b),
        (OpType::Union, |in_a, in_b| in_a || in_b),
        (OpType::Difference, |in_a, in_b| in_a && !in_b),
        (OpType::SymDifference, |in_a, in_b| in_a != in_b),
    ];
    for (op, predicate) in cases {
        let result = overlay(&a, &b, op, &options()).unwrap();
        assert_matches_predicate(&a, &b, &result, predicate);
    }
}
