//
// Derived from the t-rex tile grid (Copyright (c) Pirmin Kalberer). Generalized
// from a fixed tile/zoom pyramid to a single-resolution raster grid.
//

use crate::errors::{GridError, Result};

/// Axis-aligned geographic extent, in the geometries' native coordinate system.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Extent {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Extent {
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Smallest extent covering both `self` and `other`.
    pub fn union(&self, other: &Extent) -> Extent {
        Extent {
            xmin: self.xmin.min(other.xmin),
            ymin: self.ymin.min(other.ymin),
            xmax: self.xmax.max(other.xmax),
            ymax: self.ymax.max(other.ymax),
        }
    }

    fn validate(&self) -> Result<()> {
        if !(self.xmin < self.xmax) || !(self.ymin < self.ymax) {
            return Err(GridError::InvalidExtent {
                xmin: self.xmin,
                ymin: self.ymin,
                xmax: self.xmax,
                ymax: self.ymax,
            });
        }
        Ok(())
    }
}

/// A fully resolved affine pixel grid.
///
/// Row 0 is the topmost row (at `ymax`); rows increase downward. Column 0 is
/// the leftmost column (at `xmin`); columns increase rightward. Pixel centres
/// map to world coordinates via `x = xmin + (col+0.5)*xres`,
/// `y = ymax - (row+0.5)*yres`.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Grid {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
    pub xres: f64,
    pub yres: f64,
    pub ncols: usize,
    pub nrows: usize,
}

impl Grid {
    /// GDAL-style 6-element geotransform: `[x_ul, xres, 0, y_ul, 0, -yres]`.
    pub fn geotransform(&self) -> [f64; 6] {
        [self.xmin, self.xres, 0.0, self.ymax, 0.0, -self.yres]
    }

    pub fn extent(&self) -> Extent {
        Extent {
            xmin: self.xmin,
            ymin: self.ymin,
            xmax: self.xmax,
            ymax: self.ymax,
        }
    }

    /// World coordinate of the centre of pixel `(col, row)`.
    pub fn pixel_centre(&self, col: usize, row: usize) -> (f64, f64) {
        let x = self.xmin + (col as f64 + 0.5) * self.xres;
        let y = self.ymax - (row as f64 + 0.5) * self.yres;
        (x, y)
    }

    /// World y-coordinate of the pixel-centre scanline for row `r`.
    pub fn scanline_y(&self, row: usize) -> f64 {
        self.ymax - (row as f64 + 0.5) * self.yres
    }

    /// Column containing world x-coordinate `x`, or `None` if `x` falls
    /// outside the grid. The right edge (`xmax`) is exclusive.
    pub fn col_of(&self, x: f64) -> Option<usize> {
        if x < self.xmin || x >= self.xmax {
            return None;
        }
        let c = ((x - self.xmin) / self.xres).floor() as usize;
        Some(c.min(self.ncols.saturating_sub(1)))
    }

    /// Row containing world y-coordinate `y`, or `None` if `y` falls outside
    /// the grid.
    pub fn row_of(&self, y: f64) -> Option<usize> {
        if y < self.ymin || y > self.ymax {
            return None;
        }
        let r = ((self.ymax - y) / self.yres).floor() as usize;
        Some(r.min(self.nrows.saturating_sub(1)))
    }

    /// Fractional pixel coordinate of world point `(x, y)`, unclamped — used
    /// by the Bresenham line rasterizer.
    pub fn fractional_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.xmin) / self.xres, (self.ymax - y) / self.yres)
    }
}

/// How the pixel grid should be derived.
#[derive(Clone, Debug)]
pub enum GridSpec {
    /// Reuse an already-resolved grid verbatim (the "like" input). Mutually
    /// exclusive with `res`/`out_shape`/`extent` by construction — callers
    /// that accept independent `like`/`res`/`out_shape`/`extent` arguments
    /// from users must reject that combination as `ConflictingOptions`
    /// before ever constructing a `GridSpec`, since that check belongs to
    /// the caller's argument validation, not to grid derivation itself.
    Like(Grid),

    /// Derive the grid from some combination of resolution, output shape and
    /// extent, per the derivation table.
    Derive {
        res: Option<(f64, f64)>,
        out_shape: Option<(usize, usize)>,
        extent: Option<Extent>,
        /// Target-Aligned-Pixels: snap the derived extent outward to whole
        /// multiples of the resolution. Ignored when `extent` is given.
        tap: bool,
    },
}

/// Resolve a [`GridSpec`] into a concrete [`Grid`].
///
/// `data_bounds` is the union of the bounding boxes of all decoded
/// geometries, or `None` if there were none; it is only consulted when
/// `extent` was not supplied.
pub fn resolve_grid(spec: &GridSpec, data_bounds: Option<Extent>) -> Result<Grid> {
    match spec {
        GridSpec::Like(grid) => {
            debug!("reusing template grid verbatim: {}x{} pixels", grid.ncols, grid.nrows);
            Ok(*grid)
        }
        GridSpec::Derive {
            res,
            out_shape,
            extent,
            tap,
        } => resolve_derived(*res, *out_shape, *extent, *tap, data_bounds),
    }
}

fn validate_res(res: (f64, f64)) -> Result<()> {
    if !(res.0 > 0.0) || !(res.1 > 0.0) {
        return Err(GridError::InvalidResolution {
            xres: res.0,
            yres: res.1,
        });
    }
    Ok(())
}

fn validate_shape(shape: (usize, usize)) -> Result<()> {
    if shape.0 == 0 || shape.1 == 0 {
        return Err(GridError::InvalidShape {
            ncols: shape.0 as i64,
            nrows: shape.1 as i64,
        });
    }
    Ok(())
}

/// Expand `bounds` outward by half a pixel on each side, so that geometry
/// touching the edge of the data envelope doesn't fall outside the grid.
fn half_pixel_buffer(bounds: Extent, xres: f64, yres: f64) -> Extent {
    let buffered = Extent {
        xmin: bounds.xmin - xres / 2.0,
        ymin: bounds.ymin - yres / 2.0,
        xmax: bounds.xmax + xres / 2.0,
        ymax: bounds.ymax + yres / 2.0,
    };
    trace!("half-pixel buffer: {:?} -> {:?}", bounds, buffered);
    buffered
}

/// Target-Aligned-Pixels: snap outward to whole multiples of the resolution.
fn apply_tap(bounds: Extent, xres: f64, yres: f64) -> Extent {
    let snapped = Extent {
        xmin: (bounds.xmin / xres).floor() * xres,
        ymin: (bounds.ymin / yres).floor() * yres,
        xmax: (bounds.xmax / xres).ceil() * xres,
        ymax: (bounds.ymax / yres).ceil() * yres,
    };
    debug!("TAP snapping: {:?} -> {:?}", bounds, snapped);
    snapped
}

fn resolve_derived(
    res: Option<(f64, f64)>,
    out_shape: Option<(usize, usize)>,
    extent: Option<Extent>,
    tap: bool,
    data_bounds: Option<Extent>,
) -> Result<Grid> {
    debug!(
        "resolving grid: res={:?} out_shape={:?} extent given={} tap={}",
        res,
        out_shape,
        extent.is_some(),
        tap
    );
    if res.is_none() && out_shape.is_none() && extent.is_none() {
        return Err(GridError::Underspecified);
    }
    // `extent` alone, without `res` or `out_shape` to derive a resolution or
    // shape from it, is also underspecified (§4.1's derivation table has no
    // row for "extent only").
    if extent.is_some() && res.is_none() && out_shape.is_none() {
        return Err(GridError::Underspecified);
    }
    if let Some(r) = res {
        validate_res(r)?;
    }
    if let Some(s) = out_shape {
        validate_shape(s)?;
    }
    if let Some(e) = extent {
        e.validate()?;
    }

    // extent given: no half-pixel buffer, no TAP — both only apply when the
    // extent must be derived from data.
    if let Some(extent) = extent {
        debug!("extent supplied directly, skipping half-pixel buffer and TAP: {:?}", extent);
        return match (res, out_shape) {
            (Some((xres, yres)), None) => {
                let ncols = (extent.width() / xres).ceil().max(1.0) as usize;
                let nrows = (extent.height() / yres).ceil().max(1.0) as usize;
                Ok(Grid {
                    xmin: extent.xmin,
                    ymin: extent.ymin,
                    xmax: extent.xmax,
                    ymax: extent.ymax,
                    xres,
                    yres,
                    ncols,
                    nrows,
                })
            }
            (None, Some((ncols, nrows))) => {
                let xres = extent.width() / ncols as f64;
                let yres = extent.height() / nrows as f64;
                Ok(Grid {
                    xmin: extent.xmin,
                    ymin: extent.ymin,
                    xmax: extent.xmax,
                    ymax: extent.ymax,
                    xres,
                    yres,
                    ncols,
                    nrows,
                })
            }
            (Some((xres, yres)), Some((ncols, nrows))) => {
                let computed_ncols = (extent.width() / xres).ceil() as usize;
                let computed_nrows = (extent.height() / yres).ceil() as usize;
                if computed_ncols != ncols || computed_nrows != nrows {
                    return Err(GridError::Inconsistent {
                        computed_ncols,
                        computed_nrows,
                        given_ncols: ncols,
                        given_nrows: nrows,
                    });
                }
                Ok(Grid {
                    xmin: extent.xmin,
                    ymin: extent.ymin,
                    xmax: extent.xmax,
                    ymax: extent.ymax,
                    xres,
                    yres,
                    ncols,
                    nrows,
                })
            }
            (None, None) => {
                unreachable!("checked above: at least one of res/out_shape/extent is set")
            }
        };
    }

    // extent not given: need the decoded geometries' bounds to derive one.
    let bounds = data_bounds.ok_or(GridError::EmptyInput)?;
    bounds.validate()?;

    let grid = match (res, out_shape) {
        (Some((xres, yres)), _) => {
            let mut bounds = half_pixel_buffer(bounds, xres, yres);
            if tap {
                bounds = apply_tap(bounds, xres, yres);
            }
            let ncols = ((bounds.xmax - bounds.xmin) / xres).ceil().max(1.0) as usize;
            let nrows = ((bounds.ymax - bounds.ymin) / yres).ceil().max(1.0) as usize;
            // re-snap the upper bound so the grid exactly covers a whole
            // number of pixels after rounding ncols/nrows up
            let xmax = bounds.xmin + ncols as f64 * xres;
            let ymax = bounds.ymin + nrows as f64 * yres;
            Grid {
                xmin: bounds.xmin,
                ymin: bounds.ymin,
                xmax,
                ymax,
                xres,
                yres,
                ncols,
                nrows,
            }
        }
        (None, Some((ncols, nrows))) => {
            // Approximate a resolution from the raw bounds to buffer/TAP
            // with, then derive the final resolution from the result so
            // the requested shape is hit exactly.
            let approx_xres = bounds.width() / ncols as f64;
            let approx_yres = bounds.height() / nrows as f64;
            let mut buffered = half_pixel_buffer(bounds, approx_xres, approx_yres);
            if tap {
                buffered = apply_tap(buffered, approx_xres, approx_yres);
            }
            let xres = buffered.width() / ncols as f64;
            let yres = buffered.height() / nrows as f64;
            Grid {
                xmin: buffered.xmin,
                ymin: buffered.ymin,
                xmax: buffered.xmax,
                ymax: buffered.ymax,
                xres,
                yres,
                ncols,
                nrows,
            }
        }
        (None, None) => unreachable!("checked above: at least one of res/out_shape/extent is set"),
    };
    debug!(
        "resolved grid from data bounds: {}x{} pixels at ({},{})-({},{})",
        grid.ncols, grid.nrows, grid.xmin, grid.ymin, grid.xmax, grid.ymax
    );
    Ok(grid)
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;
