//! Collision Record Module
//! Typed view of one normalized row of the collision table.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Name of the merged date + time column after normalization.
pub const DATE_TIME: &str = "date/time";

pub const CRASH_DATE: &str = "crash_date";
pub const CRASH_TIME: &str = "crash_time";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";
pub const INJURED_PERSONS: &str = "injured_persons";
pub const INJURED_PEDESTRIANS: &str = "injured_pedestrians";
pub const INJURED_CYCLISTS: &str = "injured_cyclists";
pub const INJURED_MOTORISTS: &str = "injured_motorists";
pub const ON_STREET_NAME: &str = "on_street_name";

/// One collision entry with time, location and injury counts.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionRecord {
    pub timestamp: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
    pub injured_persons: Option<u32>,
    pub injured_pedestrians: Option<u32>,
    pub injured_cyclists: Option<u32>,
    pub injured_motorists: Option<u32>,
    pub on_street_name: Option<String>,
}

impl CollisionRecord {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Injury count for the given affected class.
    pub fn injured(&self, class: AffectedClass) -> Option<u32> {
        match class {
            AffectedClass::Pedestrians => self.injured_pedestrians,
            AffectedClass::Cyclists => self.injured_cyclists,
            AffectedClass::Motorists => self.injured_motorists,
        }
    }
}

/// A geographic coordinate pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Class of person affected by a collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, clap::ValueEnum)]
pub enum AffectedClass {
    #[default]
    Pedestrians,
    Cyclists,
    Motorists,
}

impl AffectedClass {
    pub const ALL: [AffectedClass; 3] = [
        AffectedClass::Pedestrians,
        AffectedClass::Cyclists,
        AffectedClass::Motorists,
    ];

    /// Label shown in the select box.
    pub fn label(self) -> &'static str {
        match self {
            AffectedClass::Pedestrians => "Pedestrians",
            AffectedClass::Cyclists => "Cyclists",
            AffectedClass::Motorists => "Motorists",
        }
    }

    /// Column holding the injury count for this class.
    pub fn column(self) -> &'static str {
        match self {
            AffectedClass::Pedestrians => INJURED_PEDESTRIANS,
            AffectedClass::Cyclists => INJURED_CYCLISTS,
            AffectedClass::Motorists => INJURED_MOTORISTS,
        }
    }
}
