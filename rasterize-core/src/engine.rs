//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! The single entry point named at §6: decode, resolve the grid, scan-
//! convert, reduce, dispatch into bands, and encode.

use std::collections::HashMap;

use rayon::prelude::*;

use raster_grid::Extent;

use crate::band::BandStack;
use crate::decode::decode_record;
use crate::dispatch_dtype;
use crate::dtype::Pixel;
use crate::encode::{encode_dense, encode_sparse, DenseWrap, EncodedOutput};
use crate::errors::Result;
use crate::options::{Burn, Encoding, RasterizeOptions};
use crate::primitive::{Primitive, Record};
use crate::reduce::Reduction;
use crate::scan::{scan_fill, scan_point, scan_polyline, scan_ring_edges};

/// One decoded record ready for scan conversion.
struct Decoded {
    rings: Vec<crate::primitive::Ring>,
    polylines: Vec<crate::primitive::Polyline>,
    points: Vec<crate::primitive::Coord>,
    value: f64,
    band_key: String,
}

fn decode_all(records: Vec<Record>, options: &RasterizeOptions) -> Result<(Vec<Decoded>, Option<Extent>)> {
    let mut decoded = Vec::with_capacity(records.len());
    let mut bounds: Option<Extent> = None;

    for (i, record) in records.into_iter().enumerate() {
        let primitives = decode_record(&record.geometry, i)?;
        let mut rings = Vec::new();
        let mut polylines = Vec::new();
        let mut points = Vec::new();
        for primitive in primitives {
            if let Some((min, max)) = primitive.bounds() {
                let b = Extent {
                    xmin: min.x,
                    ymin: min.y,
                    xmax: max.x,
                    ymax: max.y,
                };
                bounds = Some(match bounds {
                    None => b,
                    Some(existing) => existing.union(&b),
                });
            }
            match primitive {
                Primitive::Ring(r) => rings.push(r),
                Primitive::Polyline(p) => polylines.push(p),
                Primitive::Point(p) => points.push(p.point),
            }
        }
        let value = record.value.unwrap_or(match options.burn {
            Burn::Default => 1.0,
            Burn::Constant(k) => k,
        });
        let band_key = record
            .group
            .unwrap_or_else(|| crate::band::DEFAULT_BAND_KEY.to_string());
        decoded.push(Decoded {
            rings,
            polylines,
            points,
            value,
            band_key,
        });
    }

    Ok((decoded, bounds))
}

/// Scan-convert and reduce one record into `stack`.
///
/// Two independent de-duplication decisions: `dedup_others` follows §4.4
/// (every reduction but `sum`/`count` is deduplicated per record, since a
/// geometry should contribute at most once per pixel under those
/// reductions). `dedup_rings` is additionally forced on under all-touched
/// regardless of reduction, because the fill pass and the boundary
/// Bresenham pass can both emit the same pixel for the same ring set — §4.3
/// requires that specific overlap de-duplicated even for `sum`/`count`,
/// while distinct overlapping primitives must still count twice for those
/// two reductions (§4.4).
fn process_record<T: Pixel>(
    record: &Decoded,
    band: usize,
    stack: &mut BandStack<T>,
    grid: &raster_grid::Grid,
    reduction: Reduction,
    all_touched: bool,
) {
    let v = T::from_contribution(record.value);
    let dedup_others = !reduction.counts_repeats_within_record();
    let dedup_rings = all_touched || dedup_others;

    if !record.rings.is_empty() {
        if dedup_rings {
            let mut touched = std::collections::HashSet::new();
            {
                let mut emit = |row: usize, col: usize| {
                    touched.insert((row, col));
                };
                scan_fill(&record.rings, grid, &mut emit);
                if all_touched {
                    scan_ring_edges(&record.rings, grid, &mut emit);
                }
            }
            for (row, col) in touched {
                stack.update(band, row, col, v, reduction);
            }
        } else {
            scan_fill(&record.rings, grid, &mut |row, col| {
                stack.update(band, row, col, v, reduction);
            });
        }
    }

    if dedup_others {
        let mut touched = std::collections::HashSet::new();
        {
            let mut emit = |row: usize, col: usize| {
                touched.insert((row, col));
            };
            for line in &record.polylines {
                scan_polyline(line, grid, &mut emit);
            }
            for point in &record.points {
                scan_point(*point, grid, &mut emit);
            }
        }
        for (row, col) in touched {
            stack.update(band, row, col, v, reduction);
        }
    } else {
        let mut emit = |row: usize, col: usize| {
            stack.update(band, row, col, v, reduction);
        };
        for line in &record.polylines {
            scan_polyline(line, grid, &mut emit);
        }
        for point in &record.points {
            scan_point(*point, grid, &mut emit);
        }
    }
}

fn run_pipeline<T: Pixel>(
    decoded: Vec<Decoded>,
    grid: raster_grid::Grid,
    reduction: Reduction,
    all_touched: bool,
) -> BandStack<T> {
    // First pass: establish band order deterministically (first appearance)
    // before any parallel work, per §4.5's ordering contract.
    let mut order_stack: BandStack<T> = BandStack::new(grid.ncols, grid.nrows);
    let mut band_of = Vec::with_capacity(decoded.len());
    for record in &decoded {
        band_of.push(order_stack.band_index(&record.band_key));
    }
    let nbands = order_stack.band_keys().len();

    if nbands <= 1 {
        debug!("single band, running the serialized writer path");
        let mut stack = order_stack;
        for (record, &band) in decoded.iter().zip(band_of.iter()) {
            process_record(record, band, &mut stack, &grid, reduction, all_touched);
        }
        return stack;
    }

    // Per-band parallelism (§4.5/§5): partition records by band, run each
    // band's records on its own worker, merge the resulting single-band
    // partials back in band-index order.
    debug!("{nbands} bands, running the per-band parallel path");
    let mut groups: HashMap<usize, Vec<&Decoded>> = HashMap::new();
    for (record, &band) in decoded.iter().zip(band_of.iter()) {
        groups.entry(band).or_default().push(record);
    }
    let keys = order_stack.band_keys();

    let partials: Vec<(usize, BandStack<T>)> = groups
        .into_par_iter()
        .map(|(band, records)| {
            let mut partial: BandStack<T> = BandStack::new(grid.ncols, grid.nrows);
            let key = &keys[band];
            let local_band = partial.band_index(key);
            for record in records {
                process_record(record, local_band, &mut partial, &grid, reduction, all_touched);
            }
            (band, partial)
        })
        .collect();

    let mut merged: BandStack<T> = BandStack::new(grid.ncols, grid.nrows);
    let mut ordered = partials;
    ordered.sort_by_key(|(band, _)| *band);
    for (_, partial) in ordered {
        merged.merge_from(partial, reduction);
    }
    merged
}

/// The single externally visible entry point (§6): rasterize `records`
/// according to `options`.
pub fn rasterize(records: Vec<Record>, options: &RasterizeOptions) -> Result<EncodedOutput> {
    options.validate()?;

    info!("rasterizing {} record(s), fun={:?}, all_touched={}", records.len(), options.reduction, options.all_touched);
    let (decoded, bounds) = decode_all(records, options)?;
    debug!("decoded into {} record(s) of primitives", decoded.len());
    let grid = raster_grid::resolve_grid(&options.grid.clone().into_grid_spec(), bounds)?;
    info!("resolved grid: {}x{} pixels", grid.ncols, grid.nrows);
    let reduction = options.reduction;
    let all_touched = options.all_touched;
    let background_f64 = options.background;

    dispatch_dtype!(options.dtype, |T| {
        let stack: BandStack<T> = run_pipeline(decoded, grid, reduction, all_touched);
        debug!("scan conversion and reduction complete, {} band(s)", stack.band_keys().len());
        let background = T::coerce_background(background_f64);
        let band_keys = stack.band_keys();

        match options.encoding {
            Encoding::Dense => EncodedOutput::Dense {
                data: T::wrap_dense(encode_dense(&stack, reduction, background)),
                band_keys,
            },
            Encoding::GeoreferencedDense => EncodedOutput::DenseGeoreferenced {
                data: T::wrap_dense(encode_dense(&stack, reduction, background)),
                band_keys,
                geotransform: grid.geotransform(),
                epsg: options.epsg,
            },
            Encoding::Sparse => EncodedOutput::Sparse {
                data: T::wrap_sparse(encode_sparse(&stack, reduction, background)),
                band_keys,
            },
        }
    })
    .pipe(Ok)
}

// Tiny inline `.pipe` to keep the `dispatch_dtype!` arms expression-valued
// without repeating the match at every call site.
trait Pipe: Sized {
    fn pipe<R>(self, f: impl FnOnce(Self) -> R) -> R {
        f(self)
    }
}
impl<T> Pipe for T {}

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;
