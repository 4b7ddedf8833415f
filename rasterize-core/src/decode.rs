//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Normalizes heterogeneous geometry inputs into a uniform stream of
//! [`Primitive`]s, recursively flattening geometry collections.

use geo_types::Geometry;
use std::io::Cursor;
use wkt::TryFromWkt;

use crate::errors::{RasterizeError, Result};
use crate::primitive::{Coord, GeometryInput, Polyline, Primitive, Ring};

/// Decode one record's geometry into its constituent primitives.
///
/// Empty geometries produce zero primitives, which is not an error.
/// Unsupported geometry kinds (anything `geo-types` can express that isn't
/// named in §4.2 — rects, triangles, lines as bare segments are accepted as
/// degenerate polylines, everything else is rejected) fail with
/// [`RasterizeError::UnsupportedGeometry`].
pub fn decode_record(input: &GeometryInput, record_index: usize) -> Result<Vec<Primitive>> {
    trace!("decoding record {record_index}");
    let geometry = to_native(input, record_index)?;
    let mut out = Vec::new();
    flatten(&geometry, record_index, &mut out)?;
    if out.is_empty() {
        debug!("record {record_index} decoded to zero primitives (empty geometry)");
    }
    Ok(out)
}

fn to_native(input: &GeometryInput, record_index: usize) -> Result<Geometry<f64>> {
    match input {
        GeometryInput::Native(g) => Ok(g.clone()),
        GeometryInput::Wkb(bytes) => decode_wkb(bytes, record_index),
        GeometryInput::Wkt(text) => decode_wkt(text, record_index),
        GeometryInput::Auto(bytes) => decode_wkb(bytes, record_index)
            .or_else(|_| {
                let text = std::str::from_utf8(bytes).map_err(|e| RasterizeError::MalformedGeometry {
                    record_index,
                    reason: format!("neither valid WKB nor valid UTF-8 WKT: {e}"),
                })?;
                decode_wkt(text, record_index)
            }),
    }
}

fn decode_wkb(bytes: &[u8], record_index: usize) -> Result<Geometry<f64>> {
    let mut cursor = Cursor::new(bytes);
    wkb::wkb_to_geom(&mut cursor).map_err(|e| {
        warn!("record {record_index}: invalid WKB ({e:?})");
        RasterizeError::MalformedGeometry {
            record_index,
            reason: format!("invalid WKB: {e:?}"),
        }
    })
}

fn decode_wkt(text: &str, record_index: usize) -> Result<Geometry<f64>> {
    Geometry::try_from_wkt_str(text).map_err(|e| {
        warn!("record {record_index}: invalid WKT ({e})");
        RasterizeError::MalformedGeometry {
            record_index,
            reason: format!("invalid WKT: {e}"),
        }
    })
}

fn flatten(geometry: &Geometry<f64>, record_index: usize, out: &mut Vec<Primitive>) -> Result<()> {
    match geometry {
        Geometry::Polygon(polygon) => {
            push_polygon_rings(polygon, out);
        }
        Geometry::MultiPolygon(multi) => {
            for polygon in multi {
                push_polygon_rings(polygon, out);
            }
        }
        Geometry::LineString(line) => {
            if let Some(polyline) = to_polyline(line) {
                out.push(Primitive::Polyline(polyline));
            }
        }
        Geometry::MultiLineString(multi) => {
            for line in multi {
                if let Some(polyline) = to_polyline(line) {
                    out.push(Primitive::Polyline(polyline));
                }
            }
        }
        Geometry::Line(line) => {
            out.push(Primitive::Polyline(Polyline {
                points: vec![
                    Coord::from((line.start.x, line.start.y)),
                    Coord::from((line.end.x, line.end.y)),
                ],
            }));
        }
        Geometry::Point(point) => {
            out.push(Primitive::Point(crate::primitive::PointPrim {
                point: Coord::from((point.x(), point.y())),
            }));
        }
        Geometry::MultiPoint(multi) => {
            for point in multi {
                out.push(Primitive::Point(crate::primitive::PointPrim {
                    point: Coord::from((point.x(), point.y())),
                }));
            }
        }
        Geometry::GeometryCollection(collection) => {
            for member in collection {
                flatten(member, record_index, out)?;
            }
        }
        Geometry::Rect(_) => {
            return Err(RasterizeError::UnsupportedGeometry {
                record_index,
                kind: "rect".to_string(),
            });
        }
        Geometry::Triangle(_) => {
            return Err(RasterizeError::UnsupportedGeometry {
                record_index,
                kind: "triangle".to_string(),
            });
        }
    }
    Ok(())
}

fn push_polygon_rings(polygon: &geo_types::Polygon<f64>, out: &mut Vec<Primitive>) {
    if let Some(ring) = to_ring(polygon.exterior()) {
        out.push(Primitive::Ring(ring));
    }
    for hole in polygon.interiors() {
        if let Some(ring) = to_ring(hole) {
            out.push(Primitive::Ring(ring));
        }
    }
}

fn to_ring(line: &geo_types::LineString<f64>) -> Option<Ring> {
    if line.0.len() < 3 {
        return None;
    }
    let points = line.0.iter().map(|c| Coord::from((c.x, c.y))).collect();
    Some(Ring { points }.normalized())
}

fn to_polyline(line: &geo_types::LineString<f64>) -> Option<Polyline> {
    if line.0.len() < 2 {
        return None;
    }
    let points = line.0.iter().map(|c| Coord::from((c.x, c.y))).collect();
    Some(Polyline { points })
}

#[cfg(test)]
#[path = "decode_test.rs"]
mod decode_test;
