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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TropoOrbitsError>;

#[derive(Error,Debug)]
pub enum TropoOrbitsError {

   #[error("{0}")]
   MissingCredentials( String ),

   #[error("malformed scene identifier {0}")]
   MalformedSceneId( String ),

   #[error("provider {provider} failed for time token {token}: {msg}")]
   ProviderError{ provider: String, token: String, msg: String },

   #[error("missing {missing} orbit files for time tokens {tokens:?}")]
   OrbitCountMismatch{ missing: usize, tokens: Vec<String> },

   #[error("IO error {0}")]
   IOError( #[from] std::io::Error),

   #[error("http error {0}")]
   HttpError( #[from] reqwest::Error),

   #[error("net error {0}")]
   NetError( #[from] tropo_common::net::TropoNetError),

   #[error("operation failed {0}")]
   OpFailedError(String),
}

macro_rules! malformed_scene_id {
    ($fmt:literal $(, $arg:expr )* ) => {
        TropoOrbitsError::MalformedSceneId( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use malformed_scene_id;

macro_rules! op_failed {
    ($fmt:literal $(, $arg:expr )* ) => {
        TropoOrbitsError::OpFailedError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use op_failed;
