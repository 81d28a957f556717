//! Length unit conversions.
//!
//! Everything in the scene is measured in feet. Inputs that arrive in other
//! units go through these helpers first.

/// Feet in one international meter.
pub const FEET_PER_METER: f64 = 3.280_839_895;
/// Feet in one statute mile.
pub const FEET_PER_MILE: f64 = 5280.0;

pub const fn meters_to_feet(meters: f64) -> f64 {
    meters * FEET_PER_METER
}

pub const fn feet_to_meters(feet: f64) -> f64 {
    feet / FEET_PER_METER
}

pub const fn kilometers_to_feet(kilometers: f64) -> f64 {
    meters_to_feet(kilometers * 1000.0)
}

pub const fn feet_to_kilometers(feet: f64) -> f64 {
    feet_to_meters(feet) / 1000.0
}

pub const fn miles_to_feet(miles: f64) -> f64 {
    miles * FEET_PER_MILE
}

pub const fn feet_to_miles(feet: f64) -> f64 {
    feet / FEET_PER_MILE
}
