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

use geo::{Coord,Rect};
use serde::{Deserialize,Deserializer,Serialize,Serializer,ser::SerializeStruct};

/* #region GeoRect ***************************************************************************************/

/// a geographic bounding box with west/south/east/north edges in (WGS84) degrees
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct GeoRect(Rect<f64>);

impl GeoRect {
    pub fn from_wsen (west: f64, south: f64, east: f64, north: f64) -> Self {
        GeoRect( Rect::new( Coord{ x: west, y: south }, Coord{ x: east, y: north }))
    }

    #[inline] pub fn west(&self)->f64 { self.0.min().x }
    #[inline] pub fn east(&self)->f64 { self.0.max().x }
    #[inline] pub fn south(&self)->f64 { self.0.min().y }
    #[inline] pub fn north(&self)->f64 { self.0.max().y }

    /// edges as a `[south,north,west,east]` quadruple
    pub fn snwe (&self)->[f64;4] {
        [self.south(), self.north(), self.west(), self.east()]
    }

    /// a new rect grown by `margin` degrees on each edge, latitudes clamped to the poles
    pub fn expanded (&self, margin: f64) -> GeoRect {
        GeoRect::from_wsen(
            self.west() - margin,
            (self.south() - margin).max(-90.0),
            self.east() + margin,
            (self.north() + margin).min(90.0)
        )
    }

    pub fn contains (&self, lon: f64, lat: f64) -> bool {
        lon >= self.west() && lon <= self.east() && lat >= self.south() && lat <= self.north()
    }
}

impl Serialize for GeoRect {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        let mut state = serializer.serialize_struct("GeoRect", 4)?;
        state.serialize_field("west", &self.west())?;
        state.serialize_field("south", &self.south())?;
        state.serialize_field("east", &self.east())?;
        state.serialize_field("north", &self.north())?;
        state.end()
    }
}

#[derive(Deserialize)]
#[serde(rename = "GeoRect")]
struct WsenRect { west: f64, south: f64, east: f64, north: f64 }

impl<'de> Deserialize<'de> for GeoRect {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: Deserializer<'de> {
        let r = WsenRect::deserialize(deserializer)?;
        Ok( GeoRect::from_wsen( r.west, r.south, r.east, r.north))
    }
}

/* #endregion GeoRect */
