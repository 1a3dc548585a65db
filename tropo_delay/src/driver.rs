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

//! the sequential epoch pipeline: weather model preparation, delay computation and output
//! routing per processing date, with per-date failure isolation

use std::path::PathBuf;

use chrono::{DateTime,Utc};
use tracing::{info_span,Span};

use tropo_common::datetime::fmt_date;
use tropo_common::geo::GeoRect;
use tropo_common::{debug,error,info};

use crate::{RunParams, RAY_TRACE_BUFFER_DEG};
use crate::engines::{DelayEngine, WeatherModelEngine};
use crate::router::route_delays;

/// one unit of batch work: a processing date plus its designated output names
#[derive(Debug,Clone,PartialEq)]
pub struct EpochJob {
    pub date: DateTime<Utc>,
    pub wet_name: String,
    pub hydro_name: String,
}

/// what happened to one epoch job. Failures carry the engine message so a summary has enough
/// context to retry the date manually
#[derive(Debug)]
pub enum EpochOutcome {
    Success { wet: PathBuf, hydro: Option<PathBuf> },
    /// weather model data acquired, computation skipped on request
    DownloadOnly,
    WeatherModelFailed( String ),
    DelayComputationFailed( String ),
    OutputFailed( String ),
}

impl EpochOutcome {
    pub fn is_success (&self) -> bool {
        matches!( self, EpochOutcome::Success{..} | EpochOutcome::DownloadOnly)
    }
}

/// the batch driver: runs every epoch job against the two external engines, in input order.
/// Engine failures are contained per date - the batch itself never aborts because of one epoch
pub struct EpochPipeline<'a> {
    params: &'a RunParams,
    wm_engine: &'a dyn WeatherModelEngine,
    delay_engine: &'a dyn DelayEngine,
    log: Span,
}

impl<'a> EpochPipeline<'a> {
    pub fn new (params: &'a RunParams, wm_engine: &'a dyn WeatherModelEngine, delay_engine: &'a dyn DelayEngine) -> Self {
        let log = info_span!("epochs");
        EpochPipeline{ params, wm_engine, delay_engine, log }
    }

    /// process all jobs sequentially and report one outcome per job, keyed by date and
    /// preserving input order
    pub async fn run_batch (&self, jobs: Vec<EpochJob>) -> Vec<(DateTime<Utc>, EpochOutcome)> {
        let wm_bounds = self.weather_model_bounds();

        let mut outcomes: Vec<(DateTime<Utc>, EpochOutcome)> = Vec::with_capacity( jobs.len());
        for job in jobs {
            let outcome = self.process_epoch( &job, &wm_bounds).await;
            outcomes.push( (job.date, outcome));
        }

        let n_ok = outcomes.iter().filter( |(_,o)| o.is_success()).count();
        self.log.in_scope( || info!("processed {} epochs, {} failed", outcomes.len(), outcomes.len() - n_ok));
        outcomes
    }

    /// slanted rays leave the vertical column above the AOI, so ray tracing needs weather model
    /// data beyond the query bounds
    fn weather_model_bounds (&self) -> GeoRect {
        if self.params.los.ray_trace() {
            self.params.aoi.bounds().expanded( RAY_TRACE_BUFFER_DEG)
        } else {
            self.params.aoi.bounds()
        }
    }

    async fn process_epoch (&self, job: &EpochJob, wm_bounds: &GeoRect) -> EpochOutcome {
        let p = self.params;
        self.log.in_scope( || debug!("starting weather model preparation for {}", fmt_date(&job.date)));

        let wm_file = match self.wm_engine.prepare(
            job.date, wm_bounds, &p.weather_model_dir, p.zref, p.download_only, p.verbose
        ).await {
            Ok(path) => path,
            Err(e) => {
                self.log.in_scope( || error!("weather model preparation failed for {}: {e}", fmt_date(&job.date)));
                return EpochOutcome::WeatherModelFailed( e.to_string())
            }
        };

        if p.download_only {
            return EpochOutcome::DownloadOnly
        }

        let product = match self.delay_engine.compute(
            job.date, &wm_file, &p.aoi, &p.los,
            p.height_levels.as_deref(), &p.output_projection, p.look_dir, p.cube_spacing_m
        ).await {
            Ok(product) => product,
            Err(e) => {
                self.log.in_scope( || error!("delay computation failed for {}: {e}", fmt_date(&job.date)));
                return EpochOutcome::DelayComputationFailed( e.to_string())
            }
        };

        match route_delays( &p.los, &p.aoi, product, &job.wet_name, &job.hydro_name, &p.raster_format, &self.log) {
            Ok((wet,hydro)) => EpochOutcome::Success{ wet, hydro },
            Err(e) => {
                self.log.in_scope( || error!("writing delay output failed for {}: {e}", fmt_date(&job.date)));
                EpochOutcome::OutputFailed( e.to_string())
            }
        }
    }
}
