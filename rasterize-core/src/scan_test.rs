//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use super::*;
use crate::primitive::{Coord, Polyline, Ring};
use raster_grid::Grid;

fn grid(xmin: f64, ymin: f64, xmax: f64, ymax: f64, ncols: usize, nrows: usize) -> Grid {
    Grid {
        xmin,
        ymin,
        xmax,
        ymax,
        xres: (xmax - xmin) / ncols as f64,
        yres: (ymax - ymin) / nrows as f64,
        ncols,
        nrows,
    }
}

fn ring(points: &[(f64, f64)]) -> Ring {
    Ring {
        points: points.iter().map(|&p| Coord::from(p)).collect(),
    }
}

fn collect_pixels<F: FnOnce(&mut dyn FnMut(usize, usize))>(f: F) -> Vec<(usize, usize)> {
    let mut pixels = Vec::new();
    f(&mut |r, c| pixels.push((r, c)));
    pixels
}

#[test]
fn square_fill_covers_the_expected_interior_pixels() {
    // A 4x4 grid over [0,4]x[0,4], unit pixels. A square from (1,1) to (3,3)
    // should fill the 2x2 block of pixels whose centres fall inside it.
    let g = grid(0.0, 0.0, 4.0, 4.0, 4, 4);
    let r = ring(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
    let pixels = collect_pixels(|emit| scan_fill(&[r], &g, emit));
    let mut sorted = pixels.clone();
    sorted.sort();
    // rows increase downward: world y=3..1 maps to rows 1..2 (pixel centres
    // at y=2.5 -> row 1, y=1.5 -> row 2); cols 1..2 for x centres 1.5, 2.5.
    assert_eq!(sorted, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
}

#[test]
fn horizontal_edges_contribute_no_crossings() {
    let g = grid(0.0, 0.0, 4.0, 4.0, 4, 4);
    // A perfectly horizontal sliver should still fill a row because the two
    // non-horizontal side edges still cross every scanline in range.
    let r = ring(&[(1.0, 2.0), (3.0, 2.0), (3.0, 2.0), (1.0, 2.0)]);
    let pixels = collect_pixels(|emit| scan_fill(&[r], &g, emit));
    // A degenerate zero-height ring has no edges spanning any scanline.
    assert!(pixels.is_empty());
}

#[test]
fn even_odd_parity_subtracts_a_hole() {
    let g = grid(0.0, 0.0, 10.0, 10.0, 10, 10);
    let shell = ring(&[(1.0, 1.0), (9.0, 1.0), (9.0, 9.0), (1.0, 9.0)]);
    let hole = ring(&[(3.0, 3.0), (7.0, 3.0), (7.0, 7.0), (3.0, 7.0)]);
    let with_hole = collect_pixels(|emit| scan_fill(&[shell.clone(), hole], &g, emit));
    let without_hole = collect_pixels(|emit| scan_fill(&[shell], &g, emit));
    assert!(with_hole.len() < without_hole.len());
    // the hole's centre pixel must not be filled when the hole ring is present
    assert!(!with_hole.contains(&(5, 5)));
    assert!(without_hole.contains(&(5, 5)));
}

#[test]
fn column_span_is_clamped_to_grid_bounds() {
    let g = grid(0.0, 0.0, 4.0, 4.0, 4, 4);
    // extends well past the left and right edges of the grid
    let r = ring(&[(-10.0, 1.0), (10.0, 1.0), (10.0, 3.0), (-10.0, 3.0)]);
    let pixels = collect_pixels(|emit| scan_fill(&[r], &g, emit));
    for (_, c) in &pixels {
        assert!(*c < 4);
    }
}

#[test]
fn crossing_pair_fully_outside_grid_emits_nothing() {
    // A record with two rings (as a multipolygon's constituent parts would
    // decode): one inside the grid, one far to the right of it. The
    // *combined* bounding box overlaps the grid (so the bbox early reject
    // doesn't fire), but the far ring's own crossing-pair interval on every
    // scanline it spans lies entirely outside the grid's columns. GDAL's
    // filled-polygon walk emits nothing for such a span; it must not be
    // clamped onto the boundary column.
    let g = grid(0.0, 0.0, 4.0, 4.0, 4, 4);
    let near = ring(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
    let far = ring(&[(100.0, 1.0), (110.0, 1.0), (110.0, 3.0), (100.0, 3.0)]);

    let near_only = collect_pixels(|emit| scan_fill(&[near.clone()], &g, emit));
    let with_far = collect_pixels(|emit| scan_fill(&[near, far], &g, emit));

    let mut near_only_sorted = near_only;
    near_only_sorted.sort();
    let mut with_far_sorted = with_far;
    with_far_sorted.sort();
    assert_eq!(
        near_only_sorted, with_far_sorted,
        "the far-away ring must not contribute any spurious boundary pixels"
    );
}

#[test]
fn bbox_fully_outside_grid_is_rejected_before_edge_work() {
    let g = grid(0.0, 0.0, 4.0, 4.0, 4, 4);
    let r = ring(&[(100.0, 100.0), (110.0, 100.0), (110.0, 110.0), (100.0, 110.0)]);
    let pixels = collect_pixels(|emit| scan_fill(&[r], &g, emit));
    assert!(pixels.is_empty());
}

#[test]
fn polyline_bresenham_walks_a_diagonal() {
    let g = grid(0.0, 0.0, 4.0, 4.0, 4, 4);
    let line = Polyline {
        points: vec![Coord::from((0.5, 3.5)), Coord::from((3.5, 0.5))],
    };
    let pixels = collect_pixels(|emit| scan_polyline(&line, &g, emit));
    assert_eq!(pixels.first(), Some(&(0, 0)));
    assert_eq!(pixels.last(), Some(&(3, 3)));
    assert!(pixels.len() >= 4);
}

#[test]
fn point_maps_to_its_containing_pixel() {
    let g = grid(0.0, 0.0, 4.0, 4.0, 4, 4);
    let mut hit = None;
    scan_point(Coord::from((2.5, 1.5)), &g, |r, c| hit = Some((r, c)));
    // x=2.5 -> col 2; y=1.5 -> row from top: (4-1.5)/1 = 2.5 -> row 2
    assert_eq!(hit, Some((2, 2)));
}

#[test]
fn point_outside_grid_emits_nothing() {
    let g = grid(0.0, 0.0, 4.0, 4.0, 4, 4);
    let mut hit = None;
    scan_point(Coord::from((-1.0, 1.0)), &g, |r, c| hit = Some((r, c)));
    assert_eq!(hit, None);
}

#[test]
fn all_touched_edges_emit_the_boundary_even_when_fill_would_miss_it() {
    let g = grid(0.0, 0.0, 4.0, 4.0, 4, 4);
    // a sliver triangle whose fill may miss pixel centres but whose edges
    // still graze several pixels
    let r = ring(&[(0.1, 0.1), (3.9, 0.2), (0.2, 3.9)]);
    let edge_pixels = collect_pixels(|emit| scan_ring_edges(&[r], &g, emit));
    assert!(!edge_pixels.is_empty());
}
