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
#![allow(unused)]

//! batch computation of tropospheric delay products over a list of processing epochs.
//! The driver iterates the epoch list, invokes the external weather-model and delay engines
//! per date and routes the results into output artifacts - one bad date never aborts the batch

use std::path::PathBuf;

use chrono::{DateTime,Utc};
use itertools::izip;
use serde::{Deserialize,Serialize};
use strum::Display;

use tropo_common::geo::GeoRect;

pub mod errors;
pub mod engines;
pub mod driver;
pub mod router;

/// delay integration cap height [m] above the ellipsoid
pub const DEFAULT_ZREF: f64 = 15_000.0;

/// weather model margin [deg] added around the AOI when rays leave the zenith column
pub const RAY_TRACE_BUFFER_DEG: f64 = 1.0;

/// raster format value that selects the built-in default
pub const AUTO_RASTER_FORMAT: &str = "auto";
pub const DEFAULT_RASTER_FORMAT: &str = "GTiff";

/* #region run parameters *******************************************************************************/

/// how slant observation geometry enters the delay computation
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum LosMode {
    /// vertical integration only
    Zenith,
    /// zenith delays projected into the line of sight
    Projected,
    /// full ray tracing along the line of sight
    RayTrace,
}

/// line-of-sight configuration handed to the delay engine. The mode also selects weather model
/// bounds expansion and the output naming rules
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct LosConfig {
    pub mode: LosMode,

    /// orbit files backing the slant geometry (not used for zenith runs)
    pub orbit_files: Vec<PathBuf>,
}

impl LosConfig {
    pub fn zenith () -> Self {
        LosConfig{ mode: LosMode::Zenith, orbit_files: Vec::new() }
    }

    pub fn new (mode: LosMode, orbit_files: Vec<PathBuf>) -> Self {
        LosConfig{ mode, orbit_files }
    }

    #[inline] pub fn ray_trace (&self) -> bool { self.mode == LosMode::RayTrace }
    #[inline] pub fn is_projected (&self) -> bool { self.mode == LosMode::Projected }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize,Display)]
#[strum(serialize_all = "lowercase")]
pub enum LookDir { Right, Left }

/// the kind of spatial query driving output format selection
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize,Display)]
#[strum(serialize_all = "snake_case")]
pub enum AoiKind {
    BoundingBox,
    StationFile,
    RadarRasters,
    GeocodedFile,
    Geocube,
}

/// the area of interest of a run: its kind plus geographic bounds
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct Aoi {
    kind: AoiKind,
    bounds: GeoRect,
}

impl Aoi {
    pub fn new (kind: AoiKind, bounds: GeoRect) -> Self {
        Aoi{ kind, bounds }
    }

    #[inline] pub fn kind (&self) -> AoiKind { self.kind }
    #[inline] pub fn bounds (&self) -> GeoRect { self.bounds }

    /// grow the bounds by `margin` degrees on each edge
    pub fn add_buffer (&mut self, margin: f64) {
        self.bounds = self.bounds.expanded( margin);
    }
}

/// the validated parameter structure of one batch run, as produced by the upstream
/// configuration front end. Date list and output name lists are parallel sequences
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct RunParams {
    pub date_list: Vec<DateTime<Utc>>,
    pub wet_filenames: Vec<String>,
    pub hydro_filenames: Vec<String>,

    pub aoi: Aoi,
    pub los: LosConfig,

    pub zref: f64,
    pub height_levels: Option<Vec<f64>>,
    pub output_projection: String,
    pub look_dir: LookDir,
    pub cube_spacing_m: f64,
    pub raster_format: String,

    pub download_only: bool,
    pub verbose: bool,

    /// where the weather model engine stores prepared model files
    pub weather_model_dir: PathBuf,
}

impl RunParams {
    /// one job per processing date, drawn in fixed order from the three parallel lists
    pub fn epoch_jobs (&self) -> Vec<driver::EpochJob> {
        izip!( &self.date_list, &self.wet_filenames, &self.hydro_filenames)
            .map( |(date, wet, hydro)| driver::EpochJob {
                date: *date,
                wet_name: wet.clone(),
                hydro_name: hydro.clone()
            })
            .collect()
    }
}

/* #endregion run parameters */
