//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use super::*;
use raster_grid::Extent;

use crate::dtype::Dtype;
use crate::encode::{DenseOutput, EncodedOutput, SparseOutput};
use crate::errors::RasterizeError;
use crate::options::{Burn, Encoding, GridRequest, RasterizeOptions};
use crate::primitive::{GeometryInput, Record};
use crate::reduce::Reduction;

fn square_options(encoding: Encoding, dtype: Dtype, reduction: Reduction) -> RasterizeOptions {
    RasterizeOptions {
        grid: GridRequest::Derive {
            res: Some((1.0, 1.0)),
            out_shape: None,
            extent: Some(Extent {
                xmin: 0.0,
                ymin: 0.0,
                xmax: 4.0,
                ymax: 4.0,
            }),
            tap: false,
        },
        reduction,
        burn: Burn::Default,
        background: 0.0,
        all_touched: false,
        encoding,
        dtype,
        epsg: None,
    }
}

fn square_record() -> Record {
    Record::new(GeometryInput::Wkt("POLYGON((1 1, 3 1, 3 3, 1 3, 1 1))".to_string()))
}

#[test]
fn dense_rasterization_of_a_single_square_covers_four_pixels() {
    let options = square_options(Encoding::Dense, Dtype::U8, Reduction::Sum);
    let output = rasterize(vec![square_record()], &options).unwrap();
    match output {
        EncodedOutput::Dense { data, band_keys } => {
            assert_eq!(band_keys, vec!["".to_string()]);
            match data {
                DenseOutput::U8(arr) => {
                    assert_eq!(arr.dim(), (1, 4, 4));
                    let touched: usize = arr.iter().filter(|&&v| v != 0).count();
                    assert_eq!(touched, 4);
                }
                _ => panic!("expected the U8 dense variant"),
            }
        }
        _ => panic!("expected Dense output"),
    }
}

#[test]
fn georeferenced_dense_carries_the_grids_geotransform() {
    let options = square_options(Encoding::GeoreferencedDense, Dtype::F64, Reduction::Sum);
    let output = rasterize(vec![square_record()], &options).unwrap();
    match output {
        EncodedOutput::DenseGeoreferenced { geotransform, .. } => {
            assert_eq!(geotransform, [0.0, 1.0, 0.0, 4.0, 0.0, -1.0]);
        }
        _ => panic!("expected DenseGeoreferenced output"),
    }
}

#[test]
fn sparse_encoding_reports_only_touched_pixels() {
    let options = square_options(Encoding::Sparse, Dtype::U32, Reduction::Sum);
    let output = rasterize(vec![square_record()], &options).unwrap();
    match output {
        EncodedOutput::Sparse { data, .. } => match data {
            SparseOutput::U32(bands) => {
                assert_eq!(bands[0].rows.len(), 4);
            }
            _ => panic!("expected the U32 sparse variant"),
        },
        _ => panic!("expected Sparse output"),
    }
}

#[test]
fn by_group_key_splits_records_into_separate_bands_in_first_seen_order() {
    let options = square_options(Encoding::Dense, Dtype::U8, Reduction::Sum);
    let records = vec![
        Record::new(GeometryInput::Wkt("POLYGON((1 1, 2 1, 2 2, 1 2, 1 1))".to_string())).with_group("b"),
        Record::new(GeometryInput::Wkt("POLYGON((2 2, 3 2, 3 3, 2 3, 2 2))".to_string())).with_group("a"),
    ];
    let output = rasterize(records, &options).unwrap();
    match output {
        EncodedOutput::Dense { band_keys, .. } => {
            assert_eq!(band_keys, vec!["b".to_string(), "a".to_string()]);
        }
        _ => panic!("expected Dense output"),
    }
}

#[test]
fn sum_reduction_accumulates_overlapping_contributions() {
    let options = square_options(Encoding::Dense, Dtype::U32, Reduction::Sum);
    let records = vec![
        Record::new(GeometryInput::Wkt("POLYGON((1 1, 3 1, 3 3, 1 3, 1 1))".to_string())).with_value(2.0),
        Record::new(GeometryInput::Wkt("POLYGON((1 1, 3 1, 3 3, 1 3, 1 1))".to_string())).with_value(5.0),
    ];
    let output = rasterize(records, &options).unwrap();
    match output {
        EncodedOutput::Dense { data, .. } => match data {
            DenseOutput::U32(arr) => {
                assert_eq!(arr[[0, 1, 1]], 7);
            }
            _ => panic!("expected the U32 dense variant"),
        },
        _ => panic!("expected Dense output"),
    }
}

#[test]
fn all_touched_sum_does_not_double_count_fill_and_edge_overlap() {
    // Under all-touched, the boundary pixels are emitted once by the fill
    // pass and again by the Bresenham edge pass. §4.3 requires that overlap
    // de-duplicated even under `sum`, so every touched pixel must carry
    // exactly the record's contribution, never double it.
    let mut options = square_options(Encoding::Dense, Dtype::U32, Reduction::Sum);
    options.all_touched = true;
    let record = Record::new(GeometryInput::Wkt("POLYGON((1 1, 3 1, 3 3, 1 3, 1 1))".to_string()))
        .with_value(10.0);
    let output = rasterize(vec![record], &options).unwrap();
    match output {
        EncodedOutput::Dense { data, .. } => match data {
            DenseOutput::U32(arr) => {
                for &v in arr.iter() {
                    assert!(v == 0 || v == 10, "expected every touched pixel to equal 10, got {v}");
                }
            }
            _ => panic!("expected the U32 dense variant"),
        },
        _ => panic!("expected Dense output"),
    }
}

#[test]
fn empty_input_with_an_explicit_extent_produces_an_all_background_grid() {
    let options = square_options(Encoding::Dense, Dtype::U8, Reduction::Sum);
    let output = rasterize(vec![], &options).unwrap();
    match output {
        EncodedOutput::Dense { data, .. } => match data {
            DenseOutput::U8(arr) => assert!(arr.iter().all(|&v| v == 0)),
            _ => panic!("expected the U8 dense variant"),
        },
        _ => panic!("expected Dense output"),
    }
}

#[test]
fn malformed_geometry_surfaces_the_record_index() {
    let options = square_options(Encoding::Dense, Dtype::U8, Reduction::Sum);
    let records = vec![square_record(), Record::new(GeometryInput::Wkt("GARBAGE".to_string()))];
    let err = rasterize(records, &options).unwrap_err();
    match err {
        RasterizeError::MalformedGeometry { record_index, .. } => assert_eq!(record_index, 1),
        other => panic!("expected MalformedGeometry, got {other:?}"),
    }
}
