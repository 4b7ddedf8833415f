//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Errors produced while resolving a [`crate::GridSpec`] into a [`crate::Grid`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GridError>;

/// Failures in deriving a pixel grid from a partial specification.
///
/// These map directly onto the `GridUnderspecified`, `GridInconsistent` and
/// `EmptyInput` error kinds named at the top-level engine interface; callers
/// that expose a richer error enum (e.g. `rasterize-core`) wrap this type via
/// `#[from]` rather than duplicating its variants.
#[derive(Error, Debug, PartialEq)]
pub enum GridError {
    /// None of `res`, `out_shape`, `extent` were given.
    #[error("grid is underspecified: at least one of res, out_shape or extent must be given")]
    Underspecified,

    /// `res`, `out_shape` and `extent` were all given but disagree.
    #[error(
        "inconsistent grid: res and extent imply {computed_ncols}x{computed_nrows} pixels, \
         but out_shape gave {given_ncols}x{given_nrows}"
    )]
    Inconsistent {
        computed_ncols: usize,
        computed_nrows: usize,
        given_ncols: usize,
        given_nrows: usize,
    },

    /// No geometries were supplied and no explicit extent was given, so the
    /// grid bounds cannot be derived from data.
    #[error("no geometries and no user-supplied extent: cannot derive grid bounds")]
    EmptyInput,

    /// `xres`/`yres` must both be strictly positive.
    #[error("invalid resolution: xres and yres must be positive, got ({xres}, {yres})")]
    InvalidResolution { xres: f64, yres: f64 },

    /// `out_shape` must be two strictly positive integers.
    #[error("invalid output shape: ncols and nrows must be positive, got ({ncols}, {nrows})")]
    InvalidShape { ncols: i64, nrows: i64 },

    /// `extent` must satisfy `xmin < xmax` and `ymin < ymax`.
    #[error(
        "invalid extent: xmin/ymin must be less than xmax/ymax, got ({xmin}, {ymin}, {xmax}, {ymax})"
    )]
    InvalidExtent {
        xmin: f64,
        ymin: f64,
        xmax: f64,
        ymax: f64,
    },
}
