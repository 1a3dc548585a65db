/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “TROPO” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! the contracts of the external computation engines the batch driver runs against.
//! The engines own the physics - this crate only schedules them and routes their results

use std::path::{Path,PathBuf};

use async_trait::async_trait;
use chrono::{DateTime,Utc};
use thiserror::Error;

use tropo_common::geo::GeoRect;

use crate::{Aoi,LookDir,LosConfig};

/// opaque runtime failure reported by an external computation engine
#[derive(Error,Debug)]
#[error("{0}")]
pub struct EngineError(pub String);

impl EngineError {
    pub fn new (msg: impl ToString) -> Self { EngineError( msg.to_string()) }
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// acquires and prepares weather model data for one epoch over given geographic bounds,
/// returning the path of the prepared model artifact
#[async_trait]
pub trait WeatherModelEngine: Send + Sync {
    async fn prepare (&self, date: DateTime<Utc>, bounds: &GeoRect, storage_dir: &Path,
                      zref: f64, download_only: bool, make_plots: bool) -> EngineResult<PathBuf>;
}

/// computes the tropospheric delay products for one epoch from a prepared weather model artifact
#[async_trait]
pub trait DelayEngine: Send + Sync {
    async fn compute (&self, date: DateTime<Utc>, weather_model: &Path, aoi: &Aoi, los: &LosConfig,
                      height_levels: Option<&[f64]>, out_proj: &str, look_dir: LookDir,
                      cube_spacing_m: f64) -> EngineResult<DelayProduct>;
}

/// what a delay computation hands back: either one combined dataset covering both delay
/// components, or separate wet/hydrostatic fields for point and raster queries
pub enum DelayProduct {
    Cube( Box<dyn DelayCube> ),
    Fields( Box<dyn DelayFields> ),
}

/// a combined gridded delay dataset that serializes itself into one of the two
/// supported container formats
pub trait DelayCube: Send {
    fn write_netcdf (&self, path: &Path) -> std::io::Result<()>;
    fn write_hdf5 (&self, path: &Path) -> std::io::Result<()>;
}

/// separate wet/hydrostatic delay fields written as tabular or raster artifacts
pub trait DelayFields: Send {
    fn write (&self, aoi: &Aoi, wet_path: &Path, hydro_path: &Path, format: &str) -> std::io::Result<()>;
}
