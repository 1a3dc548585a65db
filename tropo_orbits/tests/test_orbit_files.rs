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

use tropo_common::datetime::parse_time_token;
use tropo_orbits::download::{scan_orbit_filenames, select_orbit_file};

// listing snippet as served by an aux-data index page
const LISTING: &str = r#"
<a href="S1A_OPER_AUX_POEORB_OPOD_20200120T120745_V20191230T225942_20200101T005942.EOF">poe</a>
<a href="S1A_OPER_AUX_POEORB_OPOD_20200121T120745_V20191231T225942_20200102T005942.EOF">poe</a>
<a href="S1A_OPER_AUX_RESORB_OPOD_20200101T034532_V20191231T225942_20200101T025942.EOF">res</a>
<a href="S1B_OPER_AUX_POEORB_OPOD_20200120T110000_V20191230T225942_20200101T005942.EOF">poe</a>
"#;

#[test]
fn test_scan_orbit_filenames() {
    let files = scan_orbit_filenames(LISTING);
    assert_eq!( files.len(), 4);

    let first = &files[0];
    assert_eq!( first.mission, "S1A");
    assert!( first.precise);
    assert_eq!( first.start, parse_time_token("20191230T225942").unwrap());
    assert_eq!( first.stop, parse_time_token("20200101T005942").unwrap());
}

#[test]
fn test_selection_prefers_newest_precise_orbit() {
    let files = scan_orbit_filenames(LISTING);
    let t = parse_time_token("20200101T000000").unwrap();

    // two S1A precise files cover t, the newer generation wins
    let selected = select_orbit_file( &files, "S1A", t, true).unwrap();
    assert!( selected.name.starts_with("S1A_OPER_AUX_POEORB_OPOD_20200121"));
}

#[test]
fn test_selection_mission_and_window() {
    let files = scan_orbit_filenames(LISTING);

    let t = parse_time_token("20200101T000000").unwrap();
    let selected = select_orbit_file( &files, "S1B", t, true).unwrap();
    assert_eq!( selected.mission, "S1B");

    // nothing covers a time outside every validity window
    let late = parse_time_token("20200301T000000").unwrap();
    assert!( select_orbit_file( &files, "S1A", late, false).is_none());
}

#[test]
fn test_strict_selection_rejects_restituted() {
    let listing = "S1A_OPER_AUX_RESORB_OPOD_20200101T034532_V20191231T225942_20200101T025942.EOF";
    let files = scan_orbit_filenames(listing);
    let t = parse_time_token("20200101T000000").unwrap();

    assert!( select_orbit_file( &files, "S1A", t, true).is_none());
    let selected = select_orbit_file( &files, "S1A", t, false).unwrap();
    assert!( !selected.precise);
}
