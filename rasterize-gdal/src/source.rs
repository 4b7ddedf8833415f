//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Reads an OGR vector source (Shapefile, GeoJSON, GeoPackage, ...) into the
//! engine's [`rasterize_core::primitive::Record`] stream (§2 component 3 /
//! "out of scope" dataframe adapter, reduced to the one native path this
//! crate needs).
//!
//! Geometries are pulled out as WKB and handed to
//! [`rasterize_core::decode`] unchanged rather than walked field-by-field
//! the way the teacher's `ToGeo` trait did — the engine already owns a WKB
//! decoder, so duplicating geometry conversion here would just be a second,
//! divergent implementation of the same thing.

use std::path::Path;

use gdal::vector::{Feature, FieldValue, LayerAccess};
use gdal::Dataset;

use rasterize_core::primitive::{GeometryInput, Record};

use crate::errors::{GdalAdapterError, Result};

/// An opened OGR vector dataset.
pub struct GdalSource {
    dataset: Dataset,
}

impl GdalSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        debug!("opening OGR dataset {:?}", path.as_ref());
        let dataset = Dataset::open(path.as_ref())?;
        Ok(GdalSource { dataset })
    }

    /// Names of every layer in the dataset, in file order.
    pub fn layer_names(&self) -> Vec<String> {
        self.dataset.layers().map(|l| l.name()).collect()
    }

    /// Read every feature of `layer_name` into a [`Record`], extracting
    /// `field` as the pixel contribution and `by` as the band key when
    /// given. Missing `field`/`by` columns fail with
    /// [`GdalAdapterError::ColumnNotFound`], matching spec.md §7.
    pub fn read_records(
        &mut self,
        layer_name: &str,
        field: Option<&str>,
        by: Option<&str>,
    ) -> Result<Vec<Record>> {
        debug!("reading features in layer {layer_name:?}");
        let mut layer = self
            .dataset
            .layer_by_name(layer_name)
            .map_err(|_| GdalAdapterError::LayerNotFound(layer_name.to_string()))?;

        let field_names: Vec<String> = layer
            .defn()
            .fields()
            .map(|f| f.name().to_string())
            .collect();
        if let Some(name) = field {
            if !field_names.iter().any(|f| f == name) {
                return Err(GdalAdapterError::ColumnNotFound(name.to_string()));
            }
        }
        if let Some(name) = by {
            if !field_names.iter().any(|f| f == name) {
                return Err(GdalAdapterError::ColumnNotFound(name.to_string()));
            }
        }

        let mut records = Vec::new();
        for feature in layer.features() {
            // A feature with no geometry decodes to zero primitives further
            // down the pipeline (empty geometries are not an error, §4.2),
            // so an empty WKB polygon stand-in is fine here; in practice
            // OGR features for the layer types this crate targets always
            // carry a geometry.
            let wkb = feature.geometry().wkb()?;

            let mut record = Record::new(GeometryInput::Wkb(wkb));
            if let Some(name) = field {
                if let Some(v) = field_value_as_f64(&feature, name)? {
                    record = record.with_value(v);
                }
            }
            if let Some(name) = by {
                if let Some(v) = field_value_as_string(&feature, name)? {
                    record = record.with_group(v);
                }
            }
            records.push(record);
        }
        info!("read {} feature(s) from layer {layer_name:?}", records.len());
        Ok(records)
    }
}

fn field_value_as_f64(feature: &Feature, name: &str) -> Result<Option<f64>> {
    Ok(match feature.field(name)? {
        Some(FieldValue::RealValue(v)) => Some(v),
        Some(FieldValue::IntegerValue(v)) => Some(v as f64),
        Some(FieldValue::Integer64Value(v)) => Some(v as f64),
        Some(FieldValue::StringValue(s)) => s.parse::<f64>().ok(),
        _ => None,
    })
}

fn field_value_as_string(feature: &Feature, name: &str) -> Result<Option<String>> {
    Ok(match feature.field(name)? {
        Some(FieldValue::StringValue(s)) => Some(s),
        Some(FieldValue::IntegerValue(v)) => Some(v.to_string()),
        Some(FieldValue::Integer64Value(v)) => Some(v.to_string()),
        Some(FieldValue::RealValue(v)) => Some(v.to_string()),
        _ => None,
    })
}
// No unit tests here: every operation needs an opened OGR dataset, and
// (matching the teacher's own `gdal_ds_test.rs`, which required a
// `natural_earth.gpkg` fixture checked in alongside it) that means an
// on-disk fixture this crate doesn't carry. The GDAL-comparison tests in
// `compare_test` exercise the rest of the GDAL binding surface instead,
// building geometries in memory rather than reading them from a file.
