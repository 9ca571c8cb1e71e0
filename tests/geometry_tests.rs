//! Integration tests for geometry and ray casting

use asciiscape::core::{Line, Polygon, RayCaster, Rectangle, Shape, Text};
use asciiscape::core::{Ray, TextOptions};
use asciiscape::types::Point;

#[test]
fn test_rectangle_contains_is_half_open() {
    let rect = Rectangle::from_corners(Point::new(0.0, 0.0), Point::new(10.0, 10.0)).unwrap();
    assert!(rect.contains(Point::new(0.0, 0.0)));
    assert!(rect.contains(Point::new(9.0, 9.0)));
    assert!(!rect.contains(Point::new(10.0, 10.0)));
    assert!(!rect.contains(Point::new(10.0, 0.0)));
    assert!(!rect.contains(Point::new(-1.0, 5.0)));
}

#[test]
fn test_ray_hits_points_nearest_first() {
    let origin = Point::new(2.0, 3.0);
    let haystack = [
        Shape::Point(Point::new(12.0, 3.0)),
        Shape::Point(Point::new(3.0, 3.0)),
        Shape::Point(Point::new(7.0, 3.0)),
        Shape::Point(Point::new(7.0, 4.0)),
    ];
    let ray = Ray::new(origin, Point::new(1.0, 0.0), 20.0);
    let caster = RayCaster::new(ray, &haystack);

    let distances: Vec<f64> = caster
        .intersections()
        .iter()
        .map(|hit| origin.distance_to(hit.point))
        .collect();
    assert_eq!(distances, vec![1.0, 5.0, 10.0]);

    let first = caster.first_intersection().unwrap();
    assert_eq!(first.point, Point::new(3.0, 3.0));
    assert_eq!(first.shape_index, 1);
    assert!(caster.has_intersection());
}

#[test]
fn test_ray_against_mixed_shapes() {
    let haystack = [
        Shape::from(Polygon::new(vec![
            Point::new(10.0, -2.0),
            Point::new(14.0, -2.0),
            Point::new(12.0, 2.0),
        ])),
        Shape::from(Line::new((5.0, -5.0), (5.0, 5.0))),
    ];
    let caster = RayCaster::new(Line::new((0.0, 0.0), (20.0, 0.0)), &haystack);
    let first = caster.first_intersection().unwrap();
    assert_eq!(first.shape_index, 1);
    assert_eq!(first.point, Point::new(5.0, 0.0));
    assert_eq!(caster.intersections().len(), 3);
}

#[test]
fn test_parallel_and_degenerate_lines_never_intersect() {
    let a = Line::new((0.0, 0.0), (10.0, 0.0));
    let b = Line::new((0.0, 1.0), (10.0, 1.0));
    let dot = Line::new((5.0, 0.0), (5.0, 0.0));
    assert_eq!(a.intersection(&b), None);
    assert_eq!(a.intersection(&dot), None);
    assert_eq!(dot.intersection(&a), None);
}

#[test]
fn test_text_box_shifts_with_alignment() {
    let left = Text::new((10.0, 0.0), "abcd");
    let right = Text::new((10.0, 0.0), "abcd").with_options(TextOptions {
        align: asciiscape::core::Align::Right,
        ..TextOptions::default()
    });
    assert_eq!(left.bounding_box().left, 10.0);
    assert_eq!(right.bounding_box().left, 6.0);
}
