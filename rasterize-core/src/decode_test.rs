//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use super::*;
use geo_types::{line_string, polygon, Geometry, GeometryCollection, MultiPoint, Point};

#[test]
fn polygon_decodes_to_a_single_ring() {
    let poly = polygon![(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 4.0), (x: 0.0, y: 4.0)];
    let input = GeometryInput::Native(Geometry::Polygon(poly));
    let primitives = decode_record(&input, 0).unwrap();
    assert_eq!(primitives.len(), 1);
    assert!(matches!(primitives[0], Primitive::Ring(_)));
}

#[test]
fn polygon_with_hole_decodes_to_shell_and_hole_rings() {
    let shell = line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0), (x: 0.0, y: 0.0)];
    let hole = line_string![(x: 3.0, y: 3.0), (x: 7.0, y: 3.0), (x: 7.0, y: 7.0), (x: 3.0, y: 7.0), (x: 3.0, y: 3.0)];
    let poly = geo_types::Polygon::new(shell, vec![hole]);
    let input = GeometryInput::Native(Geometry::Polygon(poly));
    let primitives = decode_record(&input, 0).unwrap();
    assert_eq!(primitives.len(), 2);
    assert!(primitives.iter().all(|p| matches!(p, Primitive::Ring(_))));
}

#[test]
fn closing_vertex_is_dropped_by_normalization() {
    let closed = line_string![(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 4.0), (x: 0.0, y: 0.0)];
    let poly = geo_types::Polygon::new(closed, vec![]);
    let input = GeometryInput::Native(Geometry::Polygon(poly));
    let primitives = decode_record(&input, 0).unwrap();
    match &primitives[0] {
        Primitive::Ring(r) => assert_eq!(r.points.len(), 3),
        _ => panic!("expected a ring"),
    }
}

#[test]
fn geometry_collection_is_recursively_flattened() {
    let point = Geometry::Point(Point::new(1.0, 1.0));
    let poly = polygon![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 2.0)];
    let nested = Geometry::GeometryCollection(GeometryCollection(vec![Geometry::Polygon(poly)]));
    let collection = Geometry::GeometryCollection(GeometryCollection(vec![point, nested]));
    let input = GeometryInput::Native(collection);
    let primitives = decode_record(&input, 0).unwrap();
    assert_eq!(primitives.len(), 2);
    assert!(primitives.iter().any(|p| matches!(p, Primitive::Point(_))));
    assert!(primitives.iter().any(|p| matches!(p, Primitive::Ring(_))));
}

#[test]
fn multipoint_emits_one_point_primitive_per_member() {
    let multi = Geometry::MultiPoint(MultiPoint(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 2.0)]));
    let input = GeometryInput::Native(multi);
    let primitives = decode_record(&input, 0).unwrap();
    assert_eq!(primitives.len(), 3);
    assert!(primitives.iter().all(|p| matches!(p, Primitive::Point(_))));
}

#[test]
fn linestring_with_fewer_than_two_points_produces_nothing() {
    let degenerate = geo_types::LineString(vec![geo_types::Coord { x: 0.0, y: 0.0 }]);
    let input = GeometryInput::Native(Geometry::LineString(degenerate));
    let primitives = decode_record(&input, 0).unwrap();
    assert!(primitives.is_empty());
}

#[test]
fn rect_geometry_is_rejected_as_unsupported() {
    let rect = geo_types::Rect::new(geo_types::Coord { x: 0.0, y: 0.0 }, geo_types::Coord { x: 1.0, y: 1.0 });
    let input = GeometryInput::Native(Geometry::Rect(rect));
    let err = decode_record(&input, 3).unwrap_err();
    match err {
        RasterizeError::UnsupportedGeometry { record_index, kind } => {
            assert_eq!(record_index, 3);
            assert_eq!(kind, "rect");
        }
        other => panic!("expected UnsupportedGeometry, got {other:?}"),
    }
}

#[test]
fn wkt_polygon_decodes_successfully() {
    let input = GeometryInput::Wkt("POLYGON((0 0, 4 0, 4 4, 0 4, 0 0))".to_string());
    let primitives = decode_record(&input, 0).unwrap();
    assert_eq!(primitives.len(), 1);
    assert!(matches!(primitives[0], Primitive::Ring(_)));
}

#[test]
fn malformed_wkt_is_a_malformed_geometry_error() {
    let input = GeometryInput::Wkt("NOT WKT AT ALL".to_string());
    let err = decode_record(&input, 2).unwrap_err();
    match err {
        RasterizeError::MalformedGeometry { record_index, .. } => assert_eq!(record_index, 2),
        other => panic!("expected MalformedGeometry, got {other:?}"),
    }
}

#[test]
fn auto_falls_back_from_wkb_to_wkt_on_text_payloads() {
    let wkt_bytes = b"POINT(1 2)".to_vec();
    let input = GeometryInput::Auto(wkt_bytes);
    let primitives = decode_record(&input, 0).unwrap();
    assert_eq!(primitives.len(), 1);
    match &primitives[0] {
        Primitive::Point(p) => {
            assert_eq!(p.point.x, 1.0);
            assert_eq!(p.point.y, 2.0);
        }
        other => panic!("expected a point, got {other:?}"),
    }
}
