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

use std::collections::HashSet;
use std::path::{Path,PathBuf};
use std::sync::{Arc,Mutex};
use std::time::Duration;

use async_trait::async_trait;

use tropo_orbits::{OrbitConfig, OrbitRequest, OrbitResolver};
use tropo_orbits::download::{OrbitFetch, OrbitProviderConfig};
use tropo_orbits::errors::{Result, TropoOrbitsError};

const SCENE_A: &str = "S1A_IW_SLC__1SDV_20200101T000000_20200101T000030_030606_038244_BFCD";
const SCENE_B: &str = "S1B_IW_SLC__1SDV_20200606T120000_20200606T120030_019685_025332_1C54";

/* #region mock provider fetch ***************************************************************/

#[derive(Debug,Clone,PartialEq)]
struct FetchCall {
    provider: String,
    token: String,
    mission: String,
    strict: bool,
}

type CallLog = Arc<Mutex<Vec<FetchCall>>>;

struct MockFetch {
    fail_primary: HashSet<String>,    // tokens that fail on the primary provider
    fail_secondary: HashSet<String>,  // tokens that also fail on the secondary provider
    calls: CallLog,
}

impl MockFetch {
    fn new (fail_primary: &[&str], fail_secondary: &[&str]) -> (Self, CallLog) {
        let calls: CallLog = Arc::new( Mutex::new( Vec::new()));
        let fetch = MockFetch {
            fail_primary: fail_primary.iter().map( |s| s.to_string()).collect(),
            fail_secondary: fail_secondary.iter().map( |s| s.to_string()).collect(),
            calls: calls.clone(),
        };
        (fetch, calls)
    }
}

#[async_trait]
impl OrbitFetch for MockFetch {
    async fn fetch_orbit (&self, req: &OrbitRequest, provider: &OrbitProviderConfig, strict: bool, dir: &Path) -> Result<PathBuf> {
        self.calls.lock().unwrap().push( FetchCall {
            provider: provider.name.clone(),
            token: req.token.clone(),
            mission: req.mission.clone(),
            strict
        });

        let fails = match provider.name.as_str() {
            "asf" => &self.fail_primary,
            _ => &self.fail_secondary
        };
        if fails.contains( &req.token) {
            return Err( TropoOrbitsError::ProviderError {
                provider: provider.name.clone(),
                token: req.token.clone(),
                msg: "unavailable".to_string()
            })
        }
        Ok( dir.join( format!("{}_V{}.EOF", req.mission, req.token)))
    }
}

fn test_config () -> OrbitConfig {
    // no auth_host anywhere so the resolver does not touch a credential store
    let mut config = OrbitConfig::default();
    config.primary.auth_host = None;
    config.secondary.auth_host = None;
    config.request_timeout = Duration::from_secs(1);
    config
}

fn resolver (fetch: MockFetch) -> OrbitResolver {
    OrbitResolver::with_fetch( test_config(), Box::new(fetch))
}

/* #endregion mock provider fetch */

#[tokio::test]
async fn test_resolution_complete_and_ordered() {
    let (fetch,_calls) = MockFetch::new( &[], &[]);
    let ids = vec![SCENE_A.to_string(), SCENE_B.to_string()];

    let files = resolver(fetch).fetch_scene_orbits( &ids, Path::new("/tmp/orbits")).await.unwrap();

    // 2N files in (starts..., stops...) order
    assert_eq!( files.len(), 4);
    let names: Vec<String> = files.iter().map( |p| p.file_name().unwrap().to_str().unwrap().to_string()).collect();
    assert_eq!( names, [
        "S1A_V20200101T000000.EOF",
        "S1B_V20200606T120000.EOF",
        "S1A_V20200101T000030.EOF",
        "S1B_V20200606T120030.EOF",
    ]);
}

#[tokio::test]
async fn test_primary_failure_falls_back_once() {
    let (fetch,calls) = MockFetch::new( &["20200101T000030"], &[]);
    let ids = vec![SCENE_A.to_string()];

    let files = resolver(fetch).fetch_scene_orbits( &ids, Path::new("/tmp/orbits")).await.unwrap();
    assert_eq!( files.len(), 2);

    // the failing pair is retried against the secondary exactly once, same token and mission,
    // without strict matching; the other pair never reaches the secondary
    let calls = calls.lock().unwrap();
    let secondary: Vec<&FetchCall> = calls.iter().filter( |c| c.provider == "cdse").collect();
    assert_eq!( secondary.len(), 1);
    assert_eq!( secondary[0].token, "20200101T000030");
    assert_eq!( secondary[0].mission, "S1A");
    assert!( !secondary[0].strict);

    let primary: Vec<&FetchCall> = calls.iter().filter( |c| c.provider == "asf").collect();
    assert_eq!( primary.len(), 2);
    assert!( primary.iter().all( |c| c.strict));
}

#[tokio::test]
async fn test_secondary_failure_aborts() {
    let (fetch,_calls) = MockFetch::new( &["20200101T000000"], &["20200101T000000"]);
    let ids = vec![SCENE_A.to_string()];

    match resolver(fetch).fetch_scene_orbits( &ids, Path::new("/tmp/orbits")).await {
        Err(TropoOrbitsError::ProviderError{ provider, token, .. }) => {
            assert_eq!( provider, "cdse");
            assert_eq!( token, "20200101T000000");
        }
        other => panic!("expected secondary ProviderError, got {:?}", other)
    }
}

#[tokio::test]
async fn test_malformed_id_aborts_before_any_download() {
    let (fetch,calls) = MockFetch::new( &[], &[]);
    let ids = vec![SCENE_A.to_string(), "not_a_scene".to_string()];

    match resolver(fetch).fetch_scene_orbits( &ids, Path::new("/tmp/orbits")).await {
        Err(TropoOrbitsError::MalformedSceneId(_)) => {}
        other => panic!("expected MalformedSceneId, got {:?}", other)
    }
    assert!( calls.lock().unwrap().is_empty());
}
