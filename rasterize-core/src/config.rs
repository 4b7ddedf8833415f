//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! TOML configuration for the engine's default options (§10 "Configuration"
//! in the ambient stack), generalizing the teacher's `ApplicationCfg`/
//! `Config` trait pattern (`from_config`/`gen_config`) from a tileset-server
//! config to a single rasterization-options config.

use std::fs;

use serde::Deserialize;

use crate::dtype::Dtype;
use crate::errors::{RasterizeError, Result};
use crate::options::{Burn, Encoding, GridRequest, RasterizeOptions};
use crate::reduce::Reduction;
use raster_grid::Extent;

/// Reads a config value (`C`) from some external representation and
/// produces `Self`. Mirrors the teacher's `core::Config` trait, trimmed to
/// the one direction this crate needs (TOML -> options), since there is no
/// runtime state here to serialize back out besides a template.
pub trait Config<'a, C: Deserialize<'a>>: Sized {
    fn from_config(config: &C) -> Result<Self>;
    /// A commented TOML template a user can copy and edit.
    fn gen_config() -> String;
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct GridCfg {
    pub res: Option<(f64, f64)>,
    pub out_shape: Option<(usize, usize)>,
    /// `(xmin, ymin, xmax, ymax)`.
    pub extent: Option<(f64, f64, f64, f64)>,
    #[serde(default)]
    pub tap: bool,
}

fn default_fun() -> String {
    "sum".to_string()
}

fn default_encoding() -> String {
    "georeferenced_dense".to_string()
}

fn default_dtype() -> String {
    "f64".to_string()
}

/// The on-disk shape of a rasterize-cli config file: one set of default
/// options, analogous to the teacher's single `ApplicationCfg` but scoped
/// to this engine rather than a whole tileset server.
#[derive(Deserialize, Clone, Debug)]
pub struct RasterizeCfg {
    #[serde(default)]
    pub grid: GridCfg,
    #[serde(default = "default_fun")]
    pub fun: String,
    pub field: Option<String>,
    pub by: Option<String>,
    pub burn: Option<f64>,
    #[serde(default)]
    pub background: f64,
    #[serde(default)]
    pub all_touched: bool,
    #[serde(default = "default_encoding")]
    pub encoding: String,
    #[serde(default = "default_dtype")]
    pub dtype: String,
    pub epsg: Option<i32>,
}

pub const DEFAULT_CONFIG: &str = r#"
# rasterize-cli configuration. Every key has a command-line equivalent;
# command-line flags override the config file.

[grid]
# res = [1.0, 1.0]
# out_shape = [512, 512]
# extent = [-180.0, -90.0, 180.0, 90.0]
tap = false

fun = "sum"
# field = "value"
# by = "category"
# burn = 1.0
background = 0.0
all_touched = false
encoding = "georeferenced_dense"
dtype = "f64"
# epsg = 4326
"#;

impl Config<'_, RasterizeCfg> for RasterizeOptions {
    fn from_config(cfg: &RasterizeCfg) -> Result<Self> {
        let grid = GridRequest::Derive {
            res: cfg.grid.res,
            out_shape: cfg.grid.out_shape,
            extent: cfg.grid.extent.map(|(xmin, ymin, xmax, ymax)| Extent {
                xmin,
                ymin,
                xmax,
                ymax,
            }),
            tap: cfg.grid.tap,
        };
        let burn = match cfg.burn {
            Some(k) => Burn::Constant(k),
            None => Burn::Default,
        };
        crate::options::validate_field_burn(cfg.field.is_some(), &burn)?;
        Ok(RasterizeOptions {
            grid,
            reduction: Reduction::parse(&cfg.fun)?,
            burn,
            background: cfg.background,
            all_touched: cfg.all_touched,
            encoding: Encoding::parse(&cfg.encoding)?,
            dtype: Dtype::parse(&cfg.dtype)?,
            epsg: cfg.epsg,
        })
    }

    fn gen_config() -> String {
        DEFAULT_CONFIG.to_string()
    }
}

/// Load and parse a config file into `RasterizeCfg`.
pub fn read_config(path: &str) -> Result<RasterizeCfg> {
    let text = fs::read_to_string(path)
        .map_err(|e| RasterizeError::invalid_argument(format!("could not read config file {path}: {e}")))?;
    parse_config(&text)
}

/// Parse config file contents into `RasterizeCfg`.
pub fn parse_config(text: &str) -> Result<RasterizeCfg> {
    toml::from_str(text)
        .map_err(|e| RasterizeError::invalid_argument(format!("invalid config: {e}")))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
