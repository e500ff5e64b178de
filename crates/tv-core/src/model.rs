//! Domain model for recorded tornado events and the reference tables
//! that accompany them.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calendar year of an event
pub type Year = i32;

/// Tornado intensity rating
pub type Magnitude = i32;

/// Magnitude value used for events whose rating was never recorded
pub const UNKNOWN_MAGNITUDE: Magnitude = -1;

/// Two-letter postal code of a US state or territory
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct StateCode(String);

impl StateCode {
    /// Create a state code, normalizing surrounding whitespace and case
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for StateCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl From<StateCode> for String {
    fn from(code: StateCode) -> Self {
        code.0
    }
}

/// A longitude/latitude pair in decimal degrees.
///
/// The source data records a missing coordinate as `0.0`, so a point with
/// either component equal to zero carries no location.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Whether this point holds a real location rather than the zero sentinel
    pub fn is_present(&self) -> bool {
        self.lon != 0.0 && self.lat != 0.0
    }
}

/// How an event can be drawn on the map
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathShape {
    /// Both ends of the track are known
    Path { start: GeoPoint, end: GeoPoint },
    /// At most one usable location; `None` when neither end is known
    Point(Option<GeoPoint>),
}

/// One recorded tornado
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TornadoEvent {
    pub year: Year,
    pub state: StateCode,
    pub magnitude: Magnitude,
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub injuries: u32,
    pub fatalities: u32,
    pub date: Option<NaiveDate>,
}

impl TornadoEvent {
    pub fn shape(&self) -> PathShape {
        match (self.start.is_present(), self.end.is_present()) {
            (true, true) => PathShape::Path {
                start: self.start,
                end: self.end,
            },
            (true, false) => PathShape::Point(Some(self.start)),
            (false, true) => PathShape::Point(Some(self.end)),
            (false, false) => PathShape::Point(None),
        }
    }
}

/// Polygon outline of a state, used only as map background
#[derive(Debug, Clone, PartialEq)]
pub struct StateBoundary {
    pub state: StateCode,
    pub name: Option<String>,
    pub geometry: geojson::Geometry,
}

/// Land area of a state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateAreaFact {
    pub state: StateCode,
    pub square_miles: f64,
}
