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

//! acquisition of auxiliary spacecraft orbit files: resolve scene identifiers into time-bounded
//! download requests, keep provider credentials in a local netrc style store, and fall back
//! across data providers per request

use std::path::{Path,PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use chrono::{DateTime,Utc};
use regex::Regex;
use serde::{Deserialize,Serialize};
use tracing::{info_span,Span};

use tropo_common::datetime::{parse_time_token, secs};
use tropo_common::{info,warn};

pub mod errors;
use errors::{malformed_scene_id, Result, TropoOrbitsError};

pub mod credentials;
use credentials::{default_store_path, ensure_host_credentials, env_credentials};

pub mod download;
use download::{HttpOrbitFetch, OrbitFetch, OrbitProviderConfig};

/// scene identifier fields are produced by splitting on one-or-more consecutive underscores
static SCENE_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new( r"_+").unwrap());

const START_TOKEN_FIELD: usize = 4;
const STOP_TOKEN_FIELD: usize = 5;

/* #region scene identifiers ****************************************************************************/

/// acquisition metadata extracted from an opaque scene/product identifier
#[derive(Debug,Clone,PartialEq)]
pub struct SceneId {
    pub mission: String,
    pub start_token: String,
    pub stop_token: String,
    pub start: DateTime<Utc>,
    pub stop: DateTime<Utc>,
}

/// fixed-position parsing of a scene identifier: the mission code is the 3-char prefix and the
/// underscore separated fields 4 and 5 are the acquisition start/stop time tokens. This is the
/// identifier's contract - anything that does not yield all three parts is a malformed identifier
pub fn parse_scene_id (scene_id: &str) -> Result<SceneId> {
    if !scene_id.is_ascii() || scene_id.len() < 3 {
        return Err( malformed_scene_id!("{}", scene_id))
    }
    let mission = scene_id[0..3].to_string();

    let fields: Vec<&str> = SCENE_FIELD_RE.split( scene_id).collect();
    if fields.len() <= STOP_TOKEN_FIELD {
        return Err( malformed_scene_id!("{} (missing acquisition time fields)", scene_id))
    }

    let start_token = fields[START_TOKEN_FIELD].to_string();
    let stop_token = fields[STOP_TOKEN_FIELD].to_string();

    let start = parse_time_token( &start_token)
        .ok_or( malformed_scene_id!("{} (invalid start time {})", scene_id, start_token))?;
    let stop = parse_time_token( &stop_token)
        .ok_or( malformed_scene_id!("{} (invalid stop time {})", scene_id, stop_token))?;

    Ok( SceneId{ mission, start_token, stop_token, start, stop })
}

/// one orbit acquisition unit: a time token plus the mission it belongs to
#[derive(Debug,Clone,PartialEq)]
pub struct OrbitRequest {
    pub token: String,
    pub time: DateTime<Utc>,
    pub mission: String,
}

/// every scene contributes two requests sharing its mission code, ordered as starts ++ stops
/// so that the downloaded files cover the entire acquisition start->stop window
pub fn orbit_requests (scenes: &[SceneId]) -> Vec<OrbitRequest> {
    let mut requests: Vec<OrbitRequest> = Vec::with_capacity( scenes.len() * 2);
    for scene in scenes {
        requests.push( OrbitRequest{ token: scene.start_token.clone(), time: scene.start, mission: scene.mission.clone() });
    }
    for scene in scenes {
        requests.push( OrbitRequest{ token: scene.stop_token.clone(), time: scene.stop, mission: scene.mission.clone() });
    }
    requests
}

/* #endregion scene identifiers */

/* #region resolver *************************************************************************************/

/// orbit acquisition configuration: a primary and a fallback provider plus credential store
/// location and request timeout
#[derive(Clone,Serialize,Deserialize,Debug)]
pub struct OrbitConfig {
    pub primary: OrbitProviderConfig,
    pub secondary: OrbitProviderConfig,

    /// credential store location override (defaults to the user netrc store)
    pub credential_store: Option<PathBuf>,

    /// per-request timeout so that a stuck provider cannot block acquisition indefinitely
    pub request_timeout: Duration,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        OrbitConfig {
            primary: OrbitProviderConfig {
                name: "asf".to_string(),
                urls: vec![
                    "https://s1qc.asf.alaska.edu/aux_poeorb/".to_string(),
                    "https://s1qc.asf.alaska.edu/aux_resorb/".to_string(),
                ],
                download_url_pattern: None,
                auth_host: None,
            },
            secondary: OrbitProviderConfig {
                name: "cdse".to_string(),
                urls: vec![
                    "https://catalogue.dataspace.copernicus.eu/odata/v1/Products?$filter=contains(Name,'${mission}_OPER_AUX')".to_string(),
                ],
                download_url_pattern: Some( "https://zipper.dataspace.copernicus.eu/download/${filename}".to_string()),
                auth_host: Some( credentials::ESA_CDSE_HOST.to_string()),
            },
            credential_store: None,
            request_timeout: secs(60),
        }
    }
}

impl OrbitConfig {
    pub fn store_path (&self) -> Result<PathBuf> {
        match &self.credential_store {
            Some(path) => Ok( path.clone()),
            None => default_store_path()
        }
    }
}

/// multi-source orbit resolver: requests every (time token, mission) pair from the primary
/// provider with strict matching and falls back to the secondary provider per pair. A secondary
/// failure aborts the whole resolution
pub struct OrbitResolver {
    config: OrbitConfig,
    fetch: Box<dyn OrbitFetch>,
    log: Span,
}

impl OrbitResolver {
    pub fn new (config: OrbitConfig) -> Result<Self> {
        let fetch = HttpOrbitFetch::new( config.request_timeout, config.store_path()?)?;
        Ok( Self::with_fetch( config, Box::new(fetch)))
    }

    pub fn with_fetch (config: OrbitConfig, fetch: Box<dyn OrbitFetch>) -> Self {
        let log = info_span!("orbits");
        OrbitResolver{ config, fetch, log }
    }

    /// download all orbit files for a set of scene identifiers into `dir`.
    /// Returns one local path per (time token, mission) pair, in request order
    pub async fn fetch_scene_orbits (&self, scene_ids: &[String], dir: &Path) -> Result<Vec<PathBuf>> {
        self.ensure_provider_credentials()?;

        let scenes = scene_ids.iter()
            .map( |id| parse_scene_id( id))
            .collect::<Result<Vec<SceneId>>>()?;
        let requests = orbit_requests( &scenes);

        let mut files: Vec<PathBuf> = Vec::with_capacity( requests.len());
        for req in &requests {
            match self.fetch.fetch_orbit( req, &self.config.primary, true, dir).await {
                Ok(path) => files.push( path),
                Err(e) => {
                    self.log.in_scope( || warn!(
                        "could not get orbit for {} from {}: {e}, trying {}..",
                        req.token, self.config.primary.name, self.config.secondary.name
                    ));
                    // a secondary failure is not caught - it aborts the resolution
                    files.push( self.fetch.fetch_orbit( req, &self.config.secondary, false, dir).await?);
                }
            }
        }

        // guard against a provider handing back a short result - a silent partial acquisition
        // would only surface far downstream
        if files.len() != requests.len() {
            return Err( TropoOrbitsError::OrbitCountMismatch {
                missing: requests.len() - files.len(),
                tokens: requests.iter().map( |r| r.token.clone()).collect()
            })
        }

        self.log.in_scope( || info!("acquired {} orbit files", files.len()));
        Ok(files)
    }

    /// acquisition cannot proceed without credentials for the authenticated providers, so
    /// credential errors propagate unchanged
    fn ensure_provider_credentials (&self) -> Result<()> {
        for provider in [&self.config.primary, &self.config.secondary] {
            if let Some(host) = &provider.auth_host {
                ensure_host_credentials( &self.config.store_path()?, host, env_credentials())?;
            }
        }
        Ok(())
    }
}

/* #endregion resolver */
