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

///! common utility functions for network operations

use std::{fs::File, io::Write, path::Path};
use reqwest::{Client, RequestBuilder, StatusCode};

use crate::define_error;

/// host credentials for providers that require authenticated requests
#[derive(Debug,Clone)]
pub struct BasicAuth {
    pub login: String,
    pub password: String,
}

define_error!{ pub TropoNetError =
    IOError(#[from] std::io::Error) : "IO error: {0}",
    NotFoundError(String) : "not found {0}",
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    OpFailed(String) : "operation failed: {0}"
}

pub type Result<T> = std::result::Result<T, TropoNetError>;

fn with_auth (req: RequestBuilder, opt_auth: &Option<BasicAuth>) -> RequestBuilder {
    if let Some(auth) = opt_auth {
        req.basic_auth( &auth.login, Some(&auth.password))
    } else {
        req
    }
}

/// fetch the body of an URL as text (directory listings, small query responses)
pub async fn get_text (client: &Client, url: &str, opt_auth: &Option<BasicAuth>) -> Result<String> {
    let response = with_auth( client.get(url), opt_auth).send().await?;

    match response.status() {
        StatusCode::OK => Ok( response.text().await? ),
        StatusCode::NOT_FOUND => Err( TropoNetError::NotFoundError(format!("{url}"))),
        other => Err( TropoNetError::OpFailed(format!("response status {other:?}")))
    }
}

/// fetch file from URL using HTTP GET method. Retrieve in chunks to support large files
pub async fn download_url (client: &Client, url: &str, opt_auth: &Option<BasicAuth>, path: impl AsRef<Path>) -> Result<u64> {
    let mut file = File::create(path)?;
    let mut len: u64 = 0;

    let mut response = with_auth( client.get(url), opt_auth).send().await?;

    match response.status() {
        StatusCode::OK => {
            while let Some(chunk) = response.chunk().await? {
                len += chunk.len() as u64;
                file.write_all(&chunk)?;
            }

            file.flush()?;
            Ok(len)
        }
        StatusCode::NOT_FOUND => {
            Err( TropoNetError::NotFoundError(format!("{url}")))
        }
        other => {
            Err( TropoNetError::OpFailed(format!("response status {other:?}")))
        }
    }
}
