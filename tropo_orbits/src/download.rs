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

use std::path::{Path,PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime,Utc};
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize,Serialize};
use tempfile::NamedTempFile;
use tracing::{info_span,Span};

use tropo_common::datetime::parse_time_token;
use tropo_common::fs::ensure_writable_dir;
use tropo_common::info;
use tropo_common::net::{download_url, get_text, BasicAuth};

use crate::credentials::host_auth;
use crate::errors::{op_failed, Result, TropoOrbitsError};
use crate::OrbitRequest;

/// regex to extract orbit (EOF) filenames with their mission, orbit class, production time and
/// validity window from listing/response bodies,
/// e.g. `S1A_OPER_AUX_POEORB_OPOD_20200120T120745_V20191230T225942_20200101T005942.EOF`
pub static ORBIT_FNAME_RE: LazyLock<Regex> = LazyLock::new(||
    Regex::new( r"([A-Z0-9]{3})_OPER_AUX_(POEORB|RESORB)_OPOD_(\d{8}T\d{6})_V(\d{8}T\d{6})_(\d{8}T\d{6})\.EOF").unwrap()
);

/// one named orbit data provider: listing URLs to scan for orbit filenames plus an optional
/// credential-store host for providers that require authenticated requests.
/// URL patterns can use a `${mission}` field that is expanded per request
#[derive(Clone,Serialize,Deserialize,Debug)]
pub struct OrbitProviderConfig {
    pub name: String,

    /// listing URLs scanned for orbit filenames, in preference order
    pub urls: Vec<String>,

    /// download URL pattern with a `${filename}` field. If not set the file is fetched
    /// from the directory of the listing URL that named it
    pub download_url_pattern: Option<String>,

    /// credential store host to authenticate requests with
    pub auth_host: Option<String>,
}

/// orbit file metadata as encoded in its filename
#[derive(Debug,Clone,PartialEq)]
pub struct OrbitFileInfo {
    pub name: String,
    pub mission: String,
    pub precise: bool,   // precise (POEORB) vs restituted (RESORB)
    pub produced: DateTime<Utc>,
    pub start: DateTime<Utc>,
    pub stop: DateTime<Utc>,
}

/// collect all orbit file candidates named in a response body
pub fn scan_orbit_filenames (text: &str) -> Vec<OrbitFileInfo> {
    ORBIT_FNAME_RE.captures_iter( text).filter_map( |cap| {
        let produced = parse_time_token( &cap[3])?;
        let start = parse_time_token( &cap[4])?;
        let stop = parse_time_token( &cap[5])?;
        Some( OrbitFileInfo {
            name: cap[0].to_string(),
            mission: cap[1].to_string(),
            precise: &cap[2] == "POEORB",
            produced, start, stop
        })
    }).collect()
}

/// pick the orbit file to download for a (time, mission) pair: the validity window has to cover
/// the requested time, strict selection only accepts precise orbits, and among the remaining
/// candidates the newest generation wins (precise over restituted)
pub fn select_orbit_file<'a> (candidates: &'a [OrbitFileInfo], mission: &str, t: DateTime<Utc>, strict: bool) -> Option<&'a OrbitFileInfo> {
    candidates.iter()
        .filter( |c| c.mission == mission && c.start <= t && t <= c.stop)
        .filter( |c| c.precise || !strict)
        .max_by_key( |c| (c.precise, c.produced))
}

fn expand_url (pattern: &str, req: &OrbitRequest) -> String {
    pattern
        .replace( "${mission}", &req.mission)
        .replace( "${yyyyMMdd}", &req.token[0..req.token.len().min(8)])
}

/// directory part of a listing URL (query stripped) joined with a filename
fn listing_file_url (listing_url: &str, fname: &str) -> String {
    let base = listing_url.split('?').next().unwrap_or(listing_url);
    format!( "{}/{}", base.trim_end_matches('/'), fname)
}

/// a single authenticated fetch of one orbit file for one (time token, mission) pair
/// against one named provider
#[async_trait]
pub trait OrbitFetch: Send + Sync {
    async fn fetch_orbit (&self, req: &OrbitRequest, provider: &OrbitProviderConfig, strict: bool, dir: &Path) -> Result<PathBuf>;
}

/// live OrbitFetch against HTTP providers
pub struct HttpOrbitFetch {
    client: Client,
    store_path: PathBuf,
    log: Span,
}

impl HttpOrbitFetch {
    pub fn new (request_timeout: Duration, store_path: PathBuf) -> Result<Self> {
        let client = Client::builder().timeout( request_timeout).build()?;
        let log = info_span!("orbit_download");
        Ok( HttpOrbitFetch{ client, store_path, log })
    }

    fn provider_auth (&self, provider: &OrbitProviderConfig) -> Result<Option<BasicAuth>> {
        match &provider.auth_host {
            Some(host) => Ok( Some( host_auth( &self.store_path, host)?)),
            None => Ok(None)
        }
    }

    /// retrieve one selected orbit file into `dir`. Files we already have are not fetched again
    async fn download_file (&self, url: &str, fname: &str, auth: &Option<BasicAuth>, dir: &Path) -> Result<PathBuf> {
        let path = dir.join( fname);

        if path.is_file() { // we already have it (from a previous run)
            self.log.in_scope( || info!("orbit file {} already downloaded", fname));
            return Ok(path)
        }

        ensure_writable_dir( dir)?;

        // don't use path yet as that would expose partial downloads to the world
        let tmp = NamedTempFile::new_in( dir)?;
        let len = download_url( &self.client, url, auth, tmp.path()).await?;
        if len == 0 {
            return Err( op_failed!("empty orbit file {}", url))
        }
        tmp.persist( &path).map_err( |e| TropoOrbitsError::IOError(e.error))?;

        self.log.in_scope( || info!("{} kB saved to {}", len / 1024, path.display()));
        Ok(path)
    }
}

#[async_trait]
impl OrbitFetch for HttpOrbitFetch {
    async fn fetch_orbit (&self, req: &OrbitRequest, provider: &OrbitProviderConfig, strict: bool, dir: &Path) -> Result<PathBuf> {
        let auth = self.provider_auth( provider)?;

        for url_pattern in &provider.urls {
            let listing_url = expand_url( url_pattern, req);
            let listing = get_text( &self.client, &listing_url, &auth).await?;
            let candidates = scan_orbit_filenames( &listing);

            if let Some(info) = select_orbit_file( &candidates, &req.mission, req.time, strict) {
                let file_url = match &provider.download_url_pattern {
                    Some(pattern) => expand_url( pattern, req).replace( "${filename}", &info.name),
                    None => listing_file_url( &listing_url, &info.name),
                };
                return self.download_file( &file_url, &info.name, &auth, dir).await
            }
        }

        Err( TropoOrbitsError::ProviderError {
            provider: provider.name.clone(),
            token: req.token.clone(),
            msg: "no orbit file covers the acquisition time".to_string()
        })
    }
}
