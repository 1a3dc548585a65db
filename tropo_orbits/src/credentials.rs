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

use std::env;
use std::fmt::Write as FmtWrite;
use std::path::{Path,PathBuf};

use tropo_common::fs::{create_private_file, filepath_contents_as_string, set_owner_only_permissions, store_string_in_file};
use tropo_common::net::BasicAuth;

use crate::errors::{op_failed, Result, TropoOrbitsError};

/// the fixed provider host for which download credentials have to exist
pub const ESA_CDSE_HOST: &str = "dataspace.copernicus.eu";

pub const USERNAME_ENV: &str = "ESA_USERNAME";
pub const PASSWORD_ENV: &str = "ESA_PASSWORD";

/// default credential store location (`~/.netrc`, `~/_netrc` on Windows)
pub fn default_store_path () -> Result<PathBuf> {
    let fname = if cfg!(windows) { "_netrc" } else { ".netrc" };
    let home = env::home_dir().ok_or( op_failed!("no home directory for credential store"))?;
    Ok( home.join( fname))
}

/// read the env-supplied credential pair. A record needs both fields so a half-set pair counts as unset
pub fn env_credentials () -> Option<(String,String)> {
    let username = env::var( USERNAME_ENV).ok()?;
    let password = env::var( PASSWORD_ENV).ok()?;
    Some( (username, password) )
}

/// one host record of a netrc style credential store
#[derive(Debug,Clone,PartialEq)]
pub struct NetrcEntry {
    pub machine: String,
    pub login: String,
    pub account: Option<String>,
    pub password: String,
}

/// a line oriented netrc style credential store mapping hosts to login/password records.
/// The store file is only readable/writable by the owning user since it holds plaintext secrets
#[derive(Debug)]
pub struct NetrcStore {
    path: PathBuf,
    entries: Vec<NetrcEntry>,
}

impl NetrcStore {
    /// load the store from `path`, creating an empty owner-only file if there is none yet
    pub fn open (path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.is_file() {
            create_private_file( &path)?;
            return Ok( NetrcStore{ path, entries: Vec::new() })
        }

        let text = filepath_contents_as_string( &path)?;
        let entries = parse_netrc( &text)?;
        Ok( NetrcStore{ path, entries })
    }

    pub fn path (&self) -> &Path { &self.path }

    pub fn host (&self, machine: &str) -> Option<&NetrcEntry> {
        self.entries.iter().find( |e| e.machine == machine)
    }

    /// add or replace the record for the entry's host
    pub fn insert (&mut self, entry: NetrcEntry) {
        if let Some(e) = self.entries.iter_mut().find( |e| e.machine == entry.machine) {
            *e = entry;
        } else {
            self.entries.push( entry);
        }
    }

    pub fn save (&self) -> Result<()> {
        store_string_in_file( &self.path, &self.to_text())?;
        set_owner_only_permissions( &self.path)?;
        Ok(())
    }

    fn to_text (&self) -> String {
        let mut s = String::new();
        for e in &self.entries {
            write!( s, "machine {} login {}", e.machine, e.login);
            if let Some(account) = &e.account {
                write!( s, " account {}", account);
            }
            writeln!( s, " password {}", e.password);
        }
        s
    }
}

fn parse_netrc (text: &str) -> Result<Vec<NetrcEntry>> {
    let mut entries: Vec<NetrcEntry> = Vec::new();
    let mut toks = text.split_whitespace();

    fn value<'a> (toks: &mut impl Iterator<Item=&'a str>, key: &str) -> Result<&'a str> {
        toks.next().ok_or( op_failed!("credential store: '{}' without value", key))
    }

    while let Some(tok) = toks.next() {
        match tok {
            "machine" => {
                let machine = value( &mut toks, tok)?.to_string();
                entries.push( NetrcEntry{ machine, login: String::new(), account: None, password: String::new() });
            }
            "login" | "account" | "password" => {
                let v = value( &mut toks, tok)?;
                let entry = entries.last_mut().ok_or( op_failed!("credential store: '{}' before machine", tok))?;
                match tok {
                    "login" => entry.login = v.to_string(),
                    "account" => entry.account = Some(v.to_string()),
                    _ => entry.password = v.to_string(),
                }
            }
            _ => {} // tolerate tokens we don't manage (default/macdef lines)
        }
    }

    Ok(entries)
}

/// make sure the store at `store_path` has a record for `host`.
///
/// An existing record is never overwritten. A missing record is populated from the
/// provided credential pair and persisted - the single store write of a run.
/// Returns whether the store was mutated
pub fn ensure_host_credentials (store_path: &Path, host: &str, creds: Option<(String,String)>) -> Result<bool> {
    let mut store = NetrcStore::open( store_path)?;

    if store.host( host).is_some() {
        return Ok(false)
    }

    let (login,password) = creds.ok_or_else( || TropoOrbitsError::MissingCredentials( format!(
        "credentials are required for fetching orbit data from {host} - either add a machine entry to {} \
         or set the {USERNAME_ENV} and {PASSWORD_ENV} environment variables",
        store.path().display()
    )))?;

    store.insert( NetrcEntry{ machine: host.to_string(), login, account: None, password });
    store.save()?;
    Ok(true)
}

/// ensure credentials for the fixed orbit provider host, from the default store and process environment
pub fn ensure_orbit_credentials () -> Result<bool> {
    ensure_host_credentials( &default_store_path()?, ESA_CDSE_HOST, env_credentials())
}

/// look up the stored credential record for an authenticated provider host
pub fn host_auth (store_path: &Path, host: &str) -> Result<BasicAuth> {
    let store = NetrcStore::open( store_path)?;
    let entry = store.host( host).ok_or( op_failed!("no stored credentials for {}", host))?;
    Ok( BasicAuth{ login: entry.login.clone(), password: entry.password.clone() })
}
