//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Insertion-ordered band table and band stack (§4.5).

use std::collections::HashMap;

use crate::dtype::Pixel;
use crate::reduce::{Cell, Reduction};

/// A single 2-D layer of the output, row-major, `ncols * nrows` cells.
pub struct Band<T> {
    pub key: String,
    cells: Vec<Cell<T>>,
}

impl<T: Pixel> Band<T> {
    fn new(key: String, ncols: usize, nrows: usize) -> Self {
        Band {
            key,
            cells: vec![Cell::Unset; ncols * nrows],
        }
    }

    pub fn cells(&self) -> &[Cell<T>] {
        &self.cells
    }
}

/// The band table plus band stack: an insertion-ordered mapping from
/// stringified `by` group key to band index, growing lazily on first write
/// to a new group, with the default single implicit band when there is no
/// `by`.
pub struct BandStack<T> {
    pub ncols: usize,
    pub nrows: usize,
    bands: Vec<Band<T>>,
    index: HashMap<String, usize>,
}

/// Key used for the single implicit band when the caller supplies no `by`.
pub const DEFAULT_BAND_KEY: &str = "";

impl<T: Pixel> BandStack<T> {
    pub fn new(ncols: usize, nrows: usize) -> Self {
        BandStack {
            ncols,
            nrows,
            bands: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Look up (or lazily allocate) the band for `key`, returning its
    /// index. Band order is the order of first appearance of each key.
    pub fn band_index(&mut self, key: &str) -> usize {
        if let Some(&i) = self.index.get(key) {
            return i;
        }
        let i = self.bands.len();
        self.bands.push(Band::new(key.to_string(), self.ncols, self.nrows));
        self.index.insert(key.to_string(), i);
        i
    }

    pub fn update(&mut self, band: usize, row: usize, col: usize, v: T, reduction: Reduction) {
        let idx = row * self.ncols + col;
        let cell = &mut self.bands[band].cells[idx];
        *cell = cell.update(reduction, v);
    }

    pub fn bands(&self) -> &[Band<T>] {
        &self.bands
    }

    pub fn into_bands(self) -> Vec<Band<T>> {
        self.bands
    }

    pub fn band_keys(&self) -> Vec<String> {
        self.bands.iter().map(|b| b.key.clone()).collect()
    }

    /// Merge per-worker partial stacks built over disjoint band subsets
    /// (the per-band parallel path, §4.5/§5) into `self`, preserving the
    /// original first-appearance order recorded by each partial's own
    /// insertion history.
    pub fn merge_from(&mut self, other: BandStack<T>, reduction: Reduction) {
        for band in other.bands {
            let idx = self.band_index(&band.key);
            let dest = &mut self.bands[idx];
            for (cell, incoming) in dest.cells.iter_mut().zip(band.cells.into_iter()) {
                *cell = cell.combine(incoming, reduction);
            }
        }
    }
}

#[cfg(test)]
#[path = "band_test.rs"]
mod band_test;
