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

use std::path::Path;
use serde::Deserialize;

pub mod macros;
pub mod fs;
pub mod datetime;
pub mod geo;
pub mod net;

/// load a RON config struct from an explicit file path
pub fn load_config_path<C,P> (path: P) -> std::io::Result<C> where C: for <'a> Deserialize<'a>, P: AsRef<Path> {
    let data = fs::filepath_contents( &path)?;
    ron::de::from_bytes( data.as_slice()).map_err(|e| std::io::Error::other( e.to_string()))
}

// a global fn that can be used with serde(skip_serializing_if="tropo_common::is_none")
#[inline] pub fn is_none<T> (opt: &Option<T>)->bool { opt.is_none() }

/*
 * we intercept logging/tracing macros here to have a central place where we can remove/replace them
 */

#[macro_export]
macro_rules! trace {
    ( $( $id:ident = $e:expr ),* ) => { tracing::trace!( $( $id = $e ),* ) };
    ( $( $e: expr ),* ) => { tracing::trace!( $( $e ),* ) }
}

#[macro_export]
macro_rules! debug {
    ( $( $id:ident = $e:expr ),* ) => { tracing::debug!( $( $id = $e ),* ) };
    ( $( $e: expr ),* ) => { tracing::debug!( $( $e ),* ) }
}

#[macro_export]
macro_rules! info {
    ( $( $id:ident = $e:expr ),* ) => { tracing::info!( $( $id = $e ),* ) };
    ( $( $e: expr ),* ) => { tracing::info!( $( $e ),* ) }
}

#[macro_export]
macro_rules! warn {
    ( $( $id:ident = $e:expr ),* ) => { tracing::warn!( $( $id = $e ),* ) };
    ( $( $e: expr ),* ) => { tracing::warn!( $( $e ),* ) }
}

#[macro_export]
macro_rules! error {
    ( $( $id:ident = $e:expr ),* ) => { tracing::error!( $( $id = $e ),* ) };
    ( $( $e: expr ),* ) => { tracing::error!( $( $e ),* ) }
}
