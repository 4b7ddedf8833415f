//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! The seven pixel functions (§4.4), expressed as `init`/`update`/`combine`/
//! `finalize` over a per-pixel [`Cell`] state.

use crate::dtype::Pixel;
use crate::errors::{RasterizeError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reduction {
    First,
    Last,
    Sum,
    Min,
    Max,
    Count,
    Any,
}

impl Reduction {
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "first" => Ok(Reduction::First),
            "last" => Ok(Reduction::Last),
            "sum" => Ok(Reduction::Sum),
            "min" => Ok(Reduction::Min),
            "max" => Ok(Reduction::Max),
            "count" => Ok(Reduction::Count),
            "any" => Ok(Reduction::Any),
            other => Err(RasterizeError::invalid_argument(format!(
                "unknown reduction {other:?}, expected one of sum/first/last/min/max/count/any"
            ))),
        }
    }

    /// Whether a pixel may be updated more than once within a single record
    /// (§4.4: true only for `sum`/`count`; every other reduction is
    /// deduplicated per record via a touched-set).
    pub fn counts_repeats_within_record(self) -> bool {
        matches!(self, Reduction::Sum | Reduction::Count)
    }
}

/// Per-pixel reduction state. `Unset` is the initial state for every cell.
#[derive(Clone, Copy, Debug)]
pub enum Cell<T> {
    Unset,
    Set(T),
}

impl<T: Pixel> Default for Cell<T> {
    fn default() -> Self {
        Cell::Unset
    }
}

impl<T: Pixel> Cell<T> {
    pub fn update(self, reduction: Reduction, v: T) -> Self {
        match reduction {
            Reduction::First => match self {
                Cell::Unset => Cell::Set(v),
                set => set,
            },
            Reduction::Last => Cell::Set(v),
            Reduction::Sum => match self {
                Cell::Unset => Cell::Set(v),
                Cell::Set(acc) => Cell::Set(acc.saturating_add(v)),
            },
            Reduction::Min => match self {
                Cell::Unset => Cell::Set(v),
                Cell::Set(acc) => Cell::Set(acc.pixel_min(v)),
            },
            Reduction::Max => match self {
                Cell::Unset => Cell::Set(v),
                Cell::Set(acc) => Cell::Set(acc.pixel_max(v)),
            },
            Reduction::Count => match self {
                Cell::Unset => Cell::Set(T::one()),
                Cell::Set(acc) => Cell::Set(acc.saturating_add(T::one())),
            },
            Reduction::Any => Cell::Set(T::one()),
        }
    }

    /// Algebraic combinator for merging per-worker partial bands. Mandatory
    /// only for the parallel path (§9); `first`/`last` implement it as
    /// "left wins"/"right wins", which is only correct when the caller
    /// guarantees `self` was written before `other` in input order (the
    /// parallel band dispatcher enforces this by partitioning whole records
    /// to a single worker, never splitting one record's writes).
    pub fn combine(self, other: Self, reduction: Reduction) -> Self {
        match (self, other) {
            (Cell::Unset, other) => other,
            (this, Cell::Unset) => this,
            (Cell::Set(a), Cell::Set(b)) => Cell::Set(match reduction {
                Reduction::First => a,
                Reduction::Last => b,
                Reduction::Sum | Reduction::Count => a.saturating_add(b),
                Reduction::Min => a.pixel_min(b),
                Reduction::Max => a.pixel_max(b),
                Reduction::Any => a,
            }),
        }
    }

    pub fn finalize(self, reduction: Reduction, background: T) -> T {
        match self {
            Cell::Unset => {
                if reduction == Reduction::Count {
                    T::zero()
                } else {
                    background
                }
            }
            Cell::Set(v) => v,
        }
    }

    pub fn is_background(self) -> bool {
        matches!(self, Cell::Unset)
    }
}

#[cfg(test)]
#[path = "reduce_test.rs"]
mod reduce_test;
