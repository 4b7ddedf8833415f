//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Uniform primitive representation produced by [`crate::decode`] and
//! consumed by [`crate::scan`].

/// A world-coordinate vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl From<(f64, f64)> for Coord {
    fn from((x, y): (f64, f64)) -> Self {
        Coord { x, y }
    }
}

/// A closed ring (polygon shell or hole), implicitly closed: the first and
/// last vertex need not be repeated, and the fill algorithm treats the
/// vertex list as a cycle.
#[derive(Clone, Debug)]
pub struct Ring {
    pub points: Vec<Coord>,
}

/// An open chain of at least two vertices.
#[derive(Clone, Debug)]
pub struct Polyline {
    pub points: Vec<Coord>,
}

/// A single point.
#[derive(Clone, Copy, Debug)]
pub struct PointPrim {
    pub point: Coord,
}

/// One primitive emitted by the geometry decoder.
#[derive(Clone, Debug)]
pub enum Primitive {
    Ring(Ring),
    Polyline(Polyline),
    Point(PointPrim),
}

impl Ring {
    /// Drop a final vertex that exactly repeats the first, since the fill
    /// algorithm already treats the ring as closed.
    pub fn normalized(mut self) -> Self {
        if self.points.len() >= 2 {
            let first = self.points[0];
            let last = *self.points.last().unwrap();
            if first == last {
                self.points.pop();
            }
        }
        self
    }

    pub fn bounds(&self) -> Option<(Coord, Coord)> {
        bounds_of(&self.points)
    }
}

impl Polyline {
    pub fn bounds(&self) -> Option<(Coord, Coord)> {
        bounds_of(&self.points)
    }
}

fn bounds_of(points: &[Coord]) -> Option<(Coord, Coord)> {
    let mut iter = points.iter();
    let first = *iter.next()?;
    let mut min = first;
    let mut max = first;
    for p in iter {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((min, max))
}

impl Primitive {
    pub fn bounds(&self) -> Option<(Coord, Coord)> {
        match self {
            Primitive::Ring(r) => r.bounds(),
            Primitive::Polyline(p) => p.bounds(),
            Primitive::Point(p) => Some((p.point, p.point)),
        }
    }
}

/// Raw geometry payload for one input record, before decoding.
#[derive(Clone, Debug)]
pub enum GeometryInput {
    /// Already-decoded `geo-types` geometry.
    Native(geo_types::Geometry<f64>),
    /// Well-Known Binary.
    Wkb(Vec<u8>),
    /// Well-Known Text.
    Wkt(String),
    /// Format unknown ahead of time; the decoder auto-detects WKB vs. WKT.
    Auto(Vec<u8>),
}

/// One input row: a geometry plus its optional pixel contribution and band
/// key.
#[derive(Clone, Debug)]
pub struct Record {
    pub geometry: GeometryInput,
    /// The `field` contribution, or `None` to fall back to `burn`/`1`.
    pub value: Option<f64>,
    /// The `by` group key, or `None` for the single implicit band.
    pub group: Option<String>,
}

impl Record {
    pub fn new(geometry: GeometryInput) -> Self {
        Record {
            geometry,
            value: None,
            group: None,
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}
