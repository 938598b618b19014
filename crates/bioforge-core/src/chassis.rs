//! Chassis selection
//!
//! Maps (salinity, stress) onto the thermal/osmotic tolerance class of the
//! host organism. Total and referentially transparent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Salinity (PSU) above which a salt-tolerant chassis is required
pub const HALOPHILE_SALINITY_THRESHOLD: f64 = 35.0;

/// Thermal/osmotic tolerance category of a proposed organism
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChassisClass {
    /// Neutral default host for temperate, low-stress water
    Mesophile,
    /// Heat-tolerant host for stressed sites
    Thermophile,
    /// Salt-tolerant host for hypersaline water
    Halophile,
}

impl ChassisClass {
    pub const ALL: [ChassisClass; 3] = [
        ChassisClass::Mesophile,
        ChassisClass::Thermophile,
        ChassisClass::Halophile,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChassisClass::Mesophile => "MESOPHILE",
            ChassisClass::Thermophile => "THERMOPHILE",
            ChassisClass::Halophile => "HALOPHILE",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ChassisClass::Mesophile => "neutral mesophilic host",
            ChassisClass::Thermophile => "heat-tolerant thermophilic host",
            ChassisClass::Halophile => "salt-tolerant halophilic host",
        }
    }

    /// Whether this chassis fits the salinity regime.
    ///
    /// Halophile is consistent exactly when salinity exceeds the threshold;
    /// any other chassis is consistent at or below it.
    pub fn is_consistent_with(self, salinity: f64) -> bool {
        let hypersaline = salinity > HALOPHILE_SALINITY_THRESHOLD;
        (self == ChassisClass::Halophile) == hypersaline
    }
}

impl fmt::Display for ChassisClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a chassis name is not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChassis(pub String);

impl fmt::Display for UnknownChassis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown chassis type {:?}", self.0)
    }
}

impl std::error::Error for UnknownChassis {}

impl FromStr for ChassisClass {
    type Err = UnknownChassis;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "mesophile" | "neutral" | "default" | "standard" => Ok(ChassisClass::Mesophile),
            "thermophile" | "heat tolerant" => Ok(ChassisClass::Thermophile),
            "halophile" | "salt tolerant" => Ok(ChassisClass::Halophile),
            _ => Err(UnknownChassis(s.to_string())),
        }
    }
}

/// Select the chassis for a site. Salinity overrides stress.
pub fn select_chassis(salinity: f64, stress: bool) -> ChassisClass {
    if salinity > HALOPHILE_SALINITY_THRESHOLD {
        ChassisClass::Halophile
    } else if stress {
        ChassisClass::Thermophile
    } else {
        ChassisClass::Mesophile
    }
}
