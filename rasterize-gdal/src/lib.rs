//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! GDAL-backed edge adapters for the rasterize engine (§2 component 3):
//! reading OGR vector sources into the engine's `Record` stream, and
//! writing a finished band stack out as a GeoTIFF. No rasterization
//! semantics live here — `rasterize-core` owns those; this crate only
//! handles interoperability with the outside world, matching the teacher's
//! own split between `t-rex-core` (engine) and `t-rex-gdal` (adapter).

#[macro_use]
extern crate log;

mod errors;
mod sink;
mod source;

pub use errors::{GdalAdapterError, Result};
pub use sink::write_geotiff;
pub use source::GdalSource;

pub fn gdal_version() -> String {
    gdal::version::version_info("RELEASE_NAME")
}
