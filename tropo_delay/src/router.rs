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

//! derives final artifact names from line-of-sight mode and AOI kind and dispatches delay
//! results to the matching serialization path

use std::path::{Path,PathBuf};

use tracing::Span;

use tropo_common::info;

use crate::{Aoi, AoiKind, LosConfig, AUTO_RASTER_FORMAT, DEFAULT_RASTER_FORMAT};
use crate::engines::DelayProduct;
use crate::errors::Result;

/// the two supported delay cube container extensions, first one is the fallback
pub const CUBE_EXTENSIONS: [&str;2] = ["nc", "h5"];

/// line-of-sight naming rule, applied to both output names before any I/O:
/// projected runs turn the zenith suffix into `_std`, ray-traced runs turn `_std` into `_ray`
pub fn los_output_names (los: &LosConfig, wet_name: &str, hydro_name: &str) -> (String,String) {
    if los.is_projected() {
        (wet_name.replace( "_ztd", "_std"), hydro_name.replace( "_ztd", "_std"))
    } else if los.ray_trace() {
        (wet_name.replace( "_std", "_ray"), hydro_name.replace( "_std", "_ray"))
    } else {
        (wet_name.to_string(), hydro_name.to_string())
    }
}

/// the `auto` sentinel selects the built-in default raster format
pub fn resolve_raster_format (format: &str) -> &str {
    if format == AUTO_RASTER_FORMAT { DEFAULT_RASTER_FORMAT } else { format }
}

fn extension_of (name: &str) -> Option<&str> {
    Path::new(name).extension().and_then( |e| e.to_str())
}

fn with_extension (name: &str, ext: &str) -> String {
    let mut path = PathBuf::from(name);
    path.set_extension( ext);
    path.to_string_lossy().to_string()
}

/// route one epoch's delay results into output artifacts and return the derived
/// (wet, hydrostatic) paths. Combined datasets go into a single cube container selected by
/// extension; separate fields go through the tabular/raster writer for point and raster AOIs
pub fn route_delays (los: &LosConfig, aoi: &Aoi, product: DelayProduct,
                     wet_name: &str, hydro_name: &str, raster_format: &str, log: &Span)
    -> Result<(PathBuf, Option<PathBuf>)>
{
    let (wet_name, hydro_name) = los_output_names( los, wet_name, hydro_name);

    match product {
        DelayProduct::Cube(cube) => {
            // one combined dataset for both components
            let mut out_name = wet_name.replace( "wet", "tropo");
            match extension_of( &out_name) {
                Some(ext) if CUBE_EXTENSIONS.contains( &ext) => {}
                _ => out_name = with_extension( &out_name, CUBE_EXTENSIONS[0])
            }

            let path = PathBuf::from( &out_name);
            if out_name.ends_with( ".nc") {
                cube.write_netcdf( &path)?;
            } else {
                cube.write_hdf5( &path)?;
            }
            log.in_scope( || info!("wrote delay cube to {}", path.display()));

            Ok( (path, None) )
        }

        DelayProduct::Fields(fields) => {
            let wet_name = if aoi.kind() == AoiKind::StationFile {
                with_extension( &wet_name, "csv")
            } else {
                wet_name
            };

            let wet_path = PathBuf::from( &wet_name);
            let hydro_path = PathBuf::from( &hydro_name);

            match aoi.kind() {
                AoiKind::StationFile | AoiKind::RadarRasters | AoiKind::GeocodedFile => {
                    fields.write( aoi, &wet_path, &hydro_path, resolve_raster_format( raster_format))?;
                    log.in_scope( || info!("wrote delays to {} / {}", wet_path.display(), hydro_path.display()));
                }
                _ => {} // cube/bounding-box field output is owned by a downstream writer
            }

            Ok( (wet_path, Some(hydro_path)) )
        }
    }
}
