//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Output encoder (§4.6): materializes a [`BandStack`] as a dense array,
//! a dense array with an attached geo-transform, or sparse COO triples.

use ndarray::Array3;

use crate::band::BandStack;
use crate::dtype::Pixel;
use crate::reduce::{Cell, Reduction};

/// One band's non-background pixels as three equal-length vectors.
pub struct SparseBand<T> {
    pub key: String,
    pub rows: Vec<u32>,
    pub cols: Vec<u32>,
    pub values: Vec<T>,
}

/// Materialize every band as a dense `[band, row, col]` array, background-
/// filled, in band order.
pub fn encode_dense<T: Pixel>(stack: &BandStack<T>, reduction: Reduction, background: T) -> Array3<T> {
    let nbands = stack.bands().len();
    let mut arr = Array3::from_elem((nbands, stack.nrows, stack.ncols), background);
    for (b, band) in stack.bands().iter().enumerate() {
        for row in 0..stack.nrows {
            for col in 0..stack.ncols {
                let cell = band.cells()[row * stack.ncols + col];
                arr[[b, row, col]] = cell.finalize(reduction, background);
            }
        }
    }
    arr
}

/// Materialize every band as sparse COO triples. For `count`, every pixel
/// is included (its finalized value is never the background sentinel); for
/// every other reduction, only pixels whose state is not [`Cell::Unset`]
/// are included.
pub fn encode_sparse<T: Pixel>(
    stack: &BandStack<T>,
    reduction: Reduction,
    background: T,
) -> Vec<SparseBand<T>> {
    stack
        .bands()
        .iter()
        .map(|band| {
            let mut rows = Vec::new();
            let mut cols = Vec::new();
            let mut values = Vec::new();
            for row in 0..stack.nrows {
                for col in 0..stack.ncols {
                    let cell = band.cells()[row * stack.ncols + col];
                    if reduction == Reduction::Count || !matches!(cell, Cell::Unset) {
                        rows.push(row as u32);
                        cols.push(col as u32);
                        values.push(cell.finalize(reduction, background));
                    }
                }
            }
            SparseBand {
                key: band.key.clone(),
                rows,
                cols,
                values,
            }
        })
        .collect()
}

/// Per-dtype dense array, the tagged union carrying the engine's
/// monomorphized result to callers that don't want to be generic over
/// [`Pixel`] (§9).
pub enum DenseOutput {
    U8(Array3<u8>),
    U16(Array3<u16>),
    U32(Array3<u32>),
    U64(Array3<u64>),
    I8(Array3<i8>),
    I16(Array3<i16>),
    I32(Array3<i32>),
    I64(Array3<i64>),
    F32(Array3<f32>),
    F64(Array3<f64>),
}

/// Per-dtype sparse output.
pub enum SparseOutput {
    U8(Vec<SparseBand<u8>>),
    U16(Vec<SparseBand<u16>>),
    U32(Vec<SparseBand<u32>>),
    U64(Vec<SparseBand<u64>>),
    I8(Vec<SparseBand<i8>>),
    I16(Vec<SparseBand<i16>>),
    I32(Vec<SparseBand<i32>>),
    I64(Vec<SparseBand<i64>>),
    F32(Vec<SparseBand<f32>>),
    F64(Vec<SparseBand<f64>>),
}

/// The three output encodings named at the engine entry point (§4.6/§6).
pub enum EncodedOutput {
    /// `dense, plain`.
    Dense { data: DenseOutput, band_keys: Vec<String> },
    /// `dense, georeferenced`.
    DenseGeoreferenced {
        data: DenseOutput,
        band_keys: Vec<String>,
        geotransform: [f64; 6],
        epsg: Option<i32>,
    },
    /// `sparse`.
    Sparse { data: SparseOutput, band_keys: Vec<String> },
}

/// Wraps a monomorphized result into its [`DenseOutput`]/[`SparseOutput`]
/// variant. One `dispatch_dtype!` arm fixes `Self` to a single concrete
/// type, so this is plain static dispatch, not a runtime type tag.
pub trait DenseWrap: Pixel {
    fn wrap_dense(array: Array3<Self>) -> DenseOutput;
    fn wrap_sparse(bands: Vec<SparseBand<Self>>) -> SparseOutput;
}

macro_rules! impl_dense_wrap {
    ($t:ty, $dense_variant:ident, $sparse_variant:ident) => {
        impl DenseWrap for $t {
            fn wrap_dense(array: Array3<Self>) -> DenseOutput {
                DenseOutput::$dense_variant(array)
            }
            fn wrap_sparse(bands: Vec<SparseBand<Self>>) -> SparseOutput {
                SparseOutput::$sparse_variant(bands)
            }
        }
    };
}

impl_dense_wrap!(u8, U8, U8);
impl_dense_wrap!(u16, U16, U16);
impl_dense_wrap!(u32, U32, U32);
impl_dense_wrap!(u64, U64, U64);
impl_dense_wrap!(i8, I8, I8);
impl_dense_wrap!(i16, I16, I16);
impl_dense_wrap!(i32, I32, I32);
impl_dense_wrap!(i64, I64, I64);
impl_dense_wrap!(f32, F32, F32);
impl_dense_wrap!(f64, F64, F64);

#[cfg(test)]
#[path = "encode_test.rs"]
mod encode_test;
