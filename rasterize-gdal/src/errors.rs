//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Errors produced at the GDAL edge: opening datasets, missing layers or
//! fields, and writing raster output. Wraps into
//! [`rasterize_core::RasterizeError`] via `#[from]` so callers that drive
//! the whole pipeline (`rasterize-cli`) see one error type.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GdalAdapterError>;

#[derive(Error, Debug)]
pub enum GdalAdapterError {
    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("layer not found: {0}")]
    LayerNotFound(String),

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("dtype {0} has no direct GDAL raster band type and cannot be written to GeoTIFF")]
    UnsupportedDtypeForOutput(&'static str),
}

impl From<GdalAdapterError> for rasterize_core::RasterizeError {
    fn from(err: GdalAdapterError) -> Self {
        match err {
            GdalAdapterError::ColumnNotFound(name) => {
                rasterize_core::RasterizeError::column_not_found(name)
            }
            other => rasterize_core::RasterizeError::invalid_argument(other.to_string()),
        }
    }
}
