//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Scan conversion: turns primitives into the set of `(row, col)` pixels
//! they cover on a resolved [`raster_grid::Grid`].

use raster_grid::Grid;

use crate::primitive::{Coord, Polyline, Ring};

/// Axis-aligned bounding box, used for the early-reject test before any
/// per-edge work.
fn bbox_overlaps_grid(min: Coord, max: Coord, grid: &Grid) -> bool {
    !(max.x < grid.xmin || min.x > grid.xmax || max.y < grid.ymin || min.y > grid.ymax)
}

/// Even-odd polygon fill (§4.3, default rule). `rings` is every ring of the
/// current record (all constituent polygons' shells and holes together);
/// even-odd parity across all of them implicitly handles holes without
/// needing to track orientation.
pub fn scan_fill<F: FnMut(usize, usize)>(rings: &[Ring], grid: &Grid, mut emit: F) {
    if rings.is_empty() {
        return;
    }
    let (min, max) = match combined_bounds(rings) {
        Some(b) => b,
        None => return,
    };
    if !bbox_overlaps_grid(min, max, grid) {
        debug!("skipping record: bbox ({:?})-({:?}) falls entirely outside the grid", min, max);
        return;
    }

    let mut xs: Vec<f64> = Vec::new();
    for row in 0..grid.nrows {
        let y = grid.scanline_y(row);
        xs.clear();
        for ring in rings {
            accumulate_crossings(ring, y, &mut xs);
        }
        if xs.is_empty() {
            continue;
        }
        xs.sort_by(|a, b| a.partial_cmp(b).expect("crossing x is never NaN"));

        let mut i = 0;
        while i + 1 < xs.len() {
            let x_left = xs[i];
            let x_right = xs[i + 1];
            let c_left = ((x_left - grid.xmin) / grid.xres).floor() as i64;
            let c_right = ((x_right - grid.xmin) / grid.xres).floor() as i64 - 1;
            let ncols_max = grid.ncols as i64 - 1;
            // Clamp the start up and the end down only — a span lying
            // entirely outside the grid (both bounds clamped to the same
            // edge column) must emit nothing, not a boundary pixel.
            let c_left = c_left.max(0);
            let c_right = c_right.min(ncols_max);
            if c_right >= c_left {
                for c in c_left..=c_right {
                    emit(row, c as usize);
                }
            }
            i += 2;
        }
    }
}

fn combined_bounds(rings: &[Ring]) -> Option<(Coord, Coord)> {
    let mut bounds: Option<(Coord, Coord)> = None;
    for ring in rings {
        if let Some((rmin, rmax)) = ring.bounds() {
            bounds = Some(match bounds {
                None => (rmin, rmax),
                Some((min, max)) => (
                    Coord {
                        x: min.x.min(rmin.x),
                        y: min.y.min(rmin.y),
                    },
                    Coord {
                        x: max.x.max(rmax.x),
                        y: max.y.max(rmax.y),
                    },
                ),
            });
        }
    }
    bounds
}

/// Accumulate the x-coordinates where scanline `y` crosses `ring`'s edges,
/// under the half-open convention: a crossing counts iff
/// `min(y1,y2) <= y < max(y1,y2)`.
fn accumulate_crossings(ring: &Ring, y: f64, xs: &mut Vec<f64>) {
    let n = ring.points.len();
    if n < 3 {
        return;
    }
    for i in 0..n {
        let p1 = ring.points[i];
        let p2 = ring.points[(i + 1) % n];
        if p1.y == p2.y {
            continue;
        }
        let (lo, hi) = if p1.y < p2.y { (p1.y, p2.y) } else { (p2.y, p1.y) };
        if y < lo || y >= hi {
            continue;
        }
        let x = p1.x + (y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y);
        xs.push(x);
    }
}

/// Rasterize every edge of `rings` as a closed polyline, for the
/// all-touched rule.
pub fn scan_ring_edges<F: FnMut(usize, usize)>(rings: &[Ring], grid: &Grid, mut emit: F) {
    for ring in rings {
        let n = ring.points.len();
        if n < 2 {
            continue;
        }
        for i in 0..n {
            let a = ring.points[i];
            let b = ring.points[(i + 1) % n];
            scan_segment(a, b, grid, &mut emit);
        }
    }
}

/// Bresenham rasterization of an open chain (§4.3). Used for line
/// geometries always, and for polygon edges under all-touched.
pub fn scan_polyline<F: FnMut(usize, usize)>(line: &Polyline, grid: &Grid, mut emit: F) {
    for pair in line.points.windows(2) {
        scan_segment(pair[0], pair[1], grid, &mut emit);
    }
}

fn scan_segment<F: FnMut(usize, usize)>(a: Coord, b: Coord, grid: &Grid, emit: &mut F) {
    let (x0, y0) = grid.fractional_pixel(a.x, a.y);
    let (x1, y1) = grid.fractional_pixel(b.x, b.y);
    bresenham(x0, y0, x1, y1, grid, emit);
}

/// Integer DDA with error accumulator (a standard Bresenham line walk),
/// emitting every pixel entered along the segment, clipped to the grid.
fn bresenham<F: FnMut(usize, usize)>(x0: f64, y0: f64, x1: f64, y1: f64, grid: &Grid, emit: &mut F) {
    let mut cx = x0.floor() as i64;
    let mut cy = y0.floor() as i64;
    let ex = x1.floor() as i64;
    let ey = y1.floor() as i64;

    let dx = (ex - cx).abs();
    let dy = -(ey - cy).abs();
    let sx = if cx < ex { 1 } else { -1 };
    let sy = if cy < ey { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        clip_emit(cx, cy, grid, emit);
        if cx == ex && cy == ey {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            cx += sx;
        }
        if e2 <= dx {
            err += dx;
            cy += sy;
        }
    }
}

fn clip_emit<F: FnMut(usize, usize)>(cx: i64, cy: i64, grid: &Grid, emit: &mut F) {
    if cx >= 0 && cy >= 0 && (cx as usize) < grid.ncols && (cy as usize) < grid.nrows {
        emit(cy as usize, cx as usize);
    }
}

/// Point mapping (§4.3): emit the containing pixel, if any.
pub fn scan_point<F: FnMut(usize, usize)>(p: Coord, grid: &Grid, mut emit: F) {
    let c = (p.x - grid.xmin) / grid.xres;
    let r = (grid.ymax - p.y) / grid.yres;
    if c < 0.0 || r < 0.0 {
        return;
    }
    let (c, r) = (c.floor() as usize, r.floor() as usize);
    if c < grid.ncols && r < grid.nrows {
        emit(r, c);
    }
}

#[cfg(test)]
#[path = "scan_test.rs"]
mod scan_test;
