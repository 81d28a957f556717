//! GPS positions and conversion into the local scene frame.
//!
//! The local frame is a Y-up Cartesian system measured in feet with the
//! mission home position at the origin:
//!
//! ```text
//!   +X  east   (longitude)
//!   +Y  up     (altitude MSL)
//!   -Z  north  (latitude)
//! ```
//!
//! Each horizontal axis is measured independently with the haversine
//! distance, holding the other coordinate at the reference value, and signed
//! by the raw coordinate difference. This is a short-range approximation and
//! judging tolerances assume it; do not swap in bearing or ellipsoid math.

use glam::{DVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::units;

/// Mean Earth radius (6371 km) in feet.
pub const EARTH_RADIUS_FT: f64 = units::kilometers_to_feet(6371.0);

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsPosition {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A GPS position with an altitude in feet above mean sea level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AerialPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_msl: f64,
}

impl AerialPosition {
    pub const fn new(latitude: f64, longitude: f64, altitude_msl: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude_msl,
        }
    }

    /// The horizontal component of this position.
    pub const fn gps(&self) -> GpsPosition {
        GpsPosition::new(self.latitude, self.longitude)
    }
}

impl From<AerialPosition> for GpsPosition {
    fn from(pos: AerialPosition) -> Self {
        pos.gps()
    }
}

/// Great-circle distance between two lat/long pairs, in feet.
pub fn haversine_feet(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1.0 for antipodal points.
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_FT * c
}

/// Convert `position` to local feet relative to `reference`.
///
/// Longitude distance is measured along the reference latitude; latitude
/// distance along the reference longitude. `altitude` passes through to Y.
pub fn to_local_feet(reference: GpsPosition, position: GpsPosition, altitude: f64) -> DVec3 {
    let east = haversine_feet(
        reference.latitude,
        reference.longitude,
        reference.latitude,
        position.longitude,
    );
    let north = haversine_feet(
        reference.latitude,
        reference.longitude,
        position.latitude,
        reference.longitude,
    );

    let east = if position.longitude < reference.longitude {
        -east
    } else {
        east
    };
    let north = if position.latitude < reference.latitude {
        -north
    } else {
        north
    };

    DVec3::new(east, altitude, -north)
}

/// Local frame anchored at a mission home position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    origin: GpsPosition,
}

impl LocalFrame {
    pub const fn new(origin: GpsPosition) -> Self {
        Self { origin }
    }

    pub const fn origin(&self) -> GpsPosition {
        self.origin
    }

    /// Full-precision local coordinates in feet.
    pub fn to_local(&self, position: GpsPosition, altitude: f64) -> DVec3 {
        to_local_feet(self.origin, position, altitude)
    }

    /// Local coordinates narrowed to render precision.
    pub fn to_render(&self, position: GpsPosition, altitude: f64) -> Vec3 {
        self.to_local(position, altitude).as_vec3()
    }

    /// Place an aerial position at its reported altitude.
    pub fn aerial(&self, position: &AerialPosition) -> Vec3 {
        self.to_render(position.gps(), position.altitude_msl)
    }

    /// Place an aerial position flat on the ground plane.
    pub fn ground(&self, position: GpsPosition) -> Vec3 {
        self.to_render(position, 0.0)
    }
}
