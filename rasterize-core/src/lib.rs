//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! The rasterization engine: geometry decoding, scan conversion, pixel
//! reductions, band dispatch and output encoding (§2 of the design doc).
//!
//! [`engine::rasterize`] is the single entry point; everything else is an
//! implementation detail reachable through it, exposed publicly only so
//! `rasterize-gdal` and `rasterize-cli` can build `Record`s and interpret
//! `EncodedOutput` without duplicating logic.

#[macro_use]
extern crate log;

pub mod band;
pub mod config;
pub mod decode;
pub mod dtype;
pub mod encode;
pub mod engine;
pub mod errors;
pub mod options;
pub mod primitive;
pub mod reduce;
pub mod scan;

pub use engine::rasterize;
pub use errors::{RasterizeError, Result};
