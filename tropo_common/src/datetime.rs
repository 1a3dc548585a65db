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

use std::time::Duration;
use chrono::{DateTime,NaiveDate,NaiveDateTime,SecondsFormat,Utc};

#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }
#[inline] pub fn minutes (n: u64)->Duration { Duration::from_secs(n * 60) }
#[inline] pub fn hours (n: u64)->Duration { Duration::from_secs(n * 3600) }

/// compact acquisition timestamp as it appears in scene identifiers and orbit filenames (`yyyymmddThhmmss`)
pub const TIME_TOKEN_FMT: &str = "%Y%m%dT%H%M%S";

pub fn parse_time_token (s: &str)->Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str( s, TIME_TOKEN_FMT).ok().map(|ndt| ndt.and_utc())
}

pub fn format_time_token<Tz:chrono::TimeZone> (dt: &DateTime<Tz>)->String where Tz::Offset: std::fmt::Display {
    dt.naive_utc().format(TIME_TOKEN_FMT).to_string()
}

/// compact `yyyymmdd` date spec as used for epoch lists
pub fn parse_date_spec (s: &str)->Option<DateTime<Utc>> {
    NaiveDate::parse_from_str( s, "%Y%m%d").ok()
        .and_then(|nd| nd.and_hms_opt(0,0,0))
        .map(|ndt| ndt.and_utc())
}

pub fn fmt_date (dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts( SecondsFormat::Secs, true)
}
