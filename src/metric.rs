//! The four cost metrics a route can be optimised for.
//!
//! Each metric pairs an exact per-segment cost with an estimate of the
//! remaining cost to the goal. Every estimate is derived from the
//! great-circle distance and never exceeds the true remaining cost, which
//! keeps the best-first search optimal.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::types::{Location, LocationTable, Segment};

const METERS_PER_MILE: f64 = 1609.344;

/// Longest single segment in the road data set.
pub const LONGEST_SEGMENT_MILES: f64 = 99.0;
/// Highest speed limit in the road data set.
pub const TOP_SPEED_MPH: f64 = 65.0;
/// Segments at or above this limit risk a return trip for the delivery driver.
pub const DELIVERY_PENALTY_MIN_MPH: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    SegmentCount,
    Distance,
    Time,
    Delivery,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::SegmentCount,
        Metric::Distance,
        Metric::Time,
        Metric::Delivery,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::SegmentCount => "segments",
            Metric::Distance => "distance",
            Metric::Time => "time",
            Metric::Delivery => "delivery",
        }
    }

    /// Lower bound on the cost of getting from `from` to `goal`.
    ///
    /// Delivery borrows the driving-time bound: delivery time is never
    /// shorter than plain driving time.
    pub fn heuristic(self, from: &str, goal: &str, locations: &LocationTable) -> f64 {
        match self {
            Metric::SegmentCount => segments_estimate(from, goal, locations),
            Metric::Distance => miles_estimate(from, goal, locations),
            Metric::Time | Metric::Delivery => hours_estimate(from, goal, locations),
        }
    }

    /// Exact cost of driving `segment` after `g_so_far` has already been spent.
    pub fn cost(self, segment: &Segment, g_so_far: f64) -> f64 {
        match self {
            Metric::SegmentCount => segment_cost(segment),
            Metric::Distance => distance_cost(segment),
            Metric::Time => time_cost(segment),
            Metric::Delivery => delivery_cost(segment, g_so_far),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "segments" | "segment-count" | "segment_count" => Ok(Metric::SegmentCount),
            "distance" => Ok(Metric::Distance),
            "time" => Ok(Metric::Time),
            "delivery" => Ok(Metric::Delivery),
            other => Err(Error::UnknownMetric(other.to_string())),
        }
    }
}

/// Haversine distance between two coordinates, in statute miles.
pub fn great_circle_miles(a: &Location, b: &Location) -> f64 {
    let ap = haversine_rs::point::Point { latitude: a.latitude, longitude: a.longitude };
    let bp = haversine_rs::point::Point { latitude: b.latitude, longitude: b.longitude };
    haversine_rs::distance(ap, bp, haversine_rs::units::Unit::Meters) / METERS_PER_MILE
}

// Junctions have no coordinate, so there is nothing to measure.
fn straight_line_miles(from: &str, goal: &str, locations: &LocationTable) -> Option<f64> {
    Some(great_circle_miles(locations.get(from)?, locations.get(goal)?))
}

pub fn segments_estimate(from: &str, goal: &str, locations: &LocationTable) -> f64 {
    straight_line_miles(from, goal, locations).map_or(0.0, |miles| miles / LONGEST_SEGMENT_MILES)
}

pub fn miles_estimate(from: &str, goal: &str, locations: &LocationTable) -> f64 {
    straight_line_miles(from, goal, locations).unwrap_or(0.0)
}

pub fn hours_estimate(from: &str, goal: &str, locations: &LocationTable) -> f64 {
    straight_line_miles(from, goal, locations).map_or(0.0, |miles| miles / TOP_SPEED_MPH)
}

pub fn segment_cost(_segment: &Segment) -> f64 {
    1.0
}

pub fn distance_cost(segment: &Segment) -> f64 {
    segment.length_miles
}

pub fn time_cost(segment: &Segment) -> f64 {
    segment.hours()
}

/// Driving time plus the expected extra time of returning for a new package.
///
/// The chance of a mistake grows with segment length (`tanh(miles / 1000)`)
/// and only applies on roads signed 50 mph or faster. A mistake costs the
/// segment twice more plus everything driven so far.
pub fn delivery_cost(segment: &Segment, g_so_far: f64) -> f64 {
    let hours = segment.hours();
    let mistake_probability = if segment.speed_limit_mph >= DELIVERY_PENALTY_MIN_MPH {
        (segment.length_miles / 1000.0).tanh()
    } else {
        0.0
    };
    hours + mistake_probability * 2.0 * (hours + g_so_far)
}
