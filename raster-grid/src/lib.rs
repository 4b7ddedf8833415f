//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Affine pixel grid derivation for vector rasterization.
//!
//! A [`Grid`] is a fully resolved, single-resolution pixel grid: an extent,
//! an x/y pixel resolution, and a column/row count. [`resolve_grid`] derives
//! one from whatever partial specification a caller has on hand — an
//! explicit resolution, an explicit output shape, an explicit extent, any
//! pairwise combination of those, or a request to reuse another grid
//! verbatim ("like").
//!
//! ```rust
//! use raster_grid::{resolve_grid, Extent, GridSpec};
//!
//! let spec = GridSpec::Derive {
//!     res: Some((10.0, 10.0)),
//!     out_shape: None,
//!     extent: Some(Extent {
//!         xmin: 0.0,
//!         ymin: 0.0,
//!         xmax: 100.0,
//!         ymax: 50.0,
//!     }),
//!     tap: false,
//! };
//! let grid = resolve_grid(&spec, None).unwrap();
//! assert_eq!((grid.ncols, grid.nrows), (10, 5));
//! ```

#[macro_use]
extern crate log;

mod errors;
mod grid;

pub use errors::{GridError, Result};
pub use grid::{resolve_grid, Extent, Grid, GridSpec};
