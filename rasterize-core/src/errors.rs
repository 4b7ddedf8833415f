//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use raster_grid::GridError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RasterizeError>;

/// Errors surfaced by the rasterization engine.
#[derive(Error, Debug)]
pub enum RasterizeError {
    /// Type or shape mismatch in the user-supplied options: non-positive
    /// resolution, `out_shape` not two positive integers, unknown reduction
    /// name, unknown dtype name, unknown encoding name.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Two mutually exclusive options were both supplied (`field`+`burn`,
    /// `like`+`res`/`out_shape`/`extent`).
    #[error("conflicting options: {0}")]
    ConflictingOptions(String),

    /// `field` or `by` does not name an existing column on the geometry
    /// source.
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// A geometry kind not covered by §4.2 (e.g. a curved or TIN geometry).
    #[error("unsupported geometry at record {record_index}: {kind}")]
    UnsupportedGeometry { record_index: usize, kind: String },

    /// A WKB/WKT payload (or native geometry) failed to decode.
    #[error("malformed geometry at record {record_index}: {reason}")]
    MalformedGeometry { record_index: usize, reason: String },

    /// Grid derivation failed; wraps [`raster_grid::GridError`].
    #[error(transparent)]
    Grid(#[from] GridError),
}

impl RasterizeError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn conflicting_options(msg: impl Into<String>) -> Self {
        Self::ConflictingOptions(msg.into())
    }

    pub fn column_not_found(name: impl Into<String>) -> Self {
        Self::ColumnNotFound(name.into())
    }
}
