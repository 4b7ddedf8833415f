//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Writes a finished band stack out as a GDAL raster dataset (§2 component
//! 3, "writing ... a GDAL raster dataset (GeoTIFF) for interoperability").

use std::path::Path;

use gdal::raster::{Buffer, GdalType};
use gdal::{Driver, DriverManager};
use ndarray::Array3;

use rasterize_core::encode::{DenseOutput, EncodedOutput};

use crate::errors::{GdalAdapterError, Result};

/// Write `output` to `path` as a GeoTIFF. Only the dense encodings carry a
/// geotransform and a regular grid shape that map onto a raster dataset;
/// `EncodedOutput::Sparse` has no raster-file representation and is
/// rejected with `InvalidArgument` by the caller before this is reached.
pub fn write_geotiff(path: impl AsRef<Path>, output: &EncodedOutput) -> Result<()> {
    match output {
        EncodedOutput::Dense { data, band_keys } => {
            write_dense(path.as_ref(), data, band_keys, None)
        }
        EncodedOutput::DenseGeoreferenced {
            data,
            band_keys,
            geotransform,
            epsg,
        } => write_dense(path.as_ref(), data, band_keys, Some((*geotransform, *epsg))),
        EncodedOutput::Sparse { .. } => Err(GdalAdapterError::UnsupportedDtypeForOutput(
            "sparse encoding has no raster representation",
        )),
    }
}

fn write_dense(
    path: &Path,
    data: &DenseOutput,
    band_keys: &[String],
    georef: Option<([f64; 6], Option<i32>)>,
) -> Result<()> {
    macro_rules! write_arm {
        ($arr:expr) => {
            write_array(path, $arr, band_keys, georef)
        };
    }
    match data {
        DenseOutput::U8(a) => write_arm!(a),
        DenseOutput::U16(a) => write_arm!(a),
        DenseOutput::U32(a) => write_arm!(a),
        DenseOutput::I16(a) => write_arm!(a),
        DenseOutput::I32(a) => write_arm!(a),
        DenseOutput::F32(a) => write_arm!(a),
        DenseOutput::F64(a) => write_arm!(a),
        // GDAL's classic raster band types stop at the above seven; U64,
        // I64 and I8 have no direct `GdalType` mapping in this crate's GDAL
        // binding version (some are GDAL 3.5+ extensions not yet exposed).
        DenseOutput::U64(_) => Err(GdalAdapterError::UnsupportedDtypeForOutput("u64")),
        DenseOutput::I64(_) => Err(GdalAdapterError::UnsupportedDtypeForOutput("i64")),
        DenseOutput::I8(_) => Err(GdalAdapterError::UnsupportedDtypeForOutput("i8")),
    }
}

fn write_array<T: GdalType + Copy>(
    path: &Path,
    array: &Array3<T>,
    band_keys: &[String],
    georef: Option<([f64; 6], Option<i32>)>,
) -> Result<()> {
    let (nbands, nrows, ncols) = array.dim();
    debug!("writing GeoTIFF {:?}: {}x{} pixels, {} band(s)", path, ncols, nrows, nbands);
    let driver: Driver = DriverManager::get_driver_by_name("GTiff")?;
    let mut dataset = driver.create_with_band_type::<T, _>(path, ncols, nrows, nbands)?;

    if let Some((geotransform, epsg)) = georef {
        dataset.set_geo_transform(&geotransform)?;
        if let Some(epsg) = epsg {
            let srs = gdal::spatial_ref::SpatialRef::from_epsg(epsg as u32)?;
            dataset.set_spatial_ref(&srs)?;
        }
    }

    for b in 0..nbands {
        let mut band = dataset.rasterband(b + 1)?;
        if let Some(key) = band_keys.get(b) {
            if !key.is_empty() {
                band.set_description(key)?;
            }
        }
        let mut row_major = Vec::with_capacity(nrows * ncols);
        for r in 0..nrows {
            for c in 0..ncols {
                row_major.push(array[[b, r, c]]);
            }
        }
        band.write((0, 0), (ncols, nrows), &mut Buffer::new((ncols, nrows), row_major))?;
    }
    Ok(())
}
