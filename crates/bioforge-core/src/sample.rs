//! Sample descriptors and the input normalizer
//!
//! A [`RawSampleReading`] is whatever the caller measured; [`normalize`]
//! turns it into the canonical, immutable [`SampleDescriptor`] consumed
//! once per engine invocation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Upper bound of the practical salinity range (PSU)
pub const PRACTICAL_SALINITY_MAX: f64 = 50.0;

/// The six polymer categories the engine designs remediation for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContaminantClass {
    /// Polyethylene terephthalate
    Pet,
    /// Polyethylene
    Pe,
    /// Polypropylene
    Pp,
    /// Polystyrene
    Ps,
    /// Polyvinyl chloride
    Pvc,
    /// Polyurethane
    Pu,
}

impl ContaminantClass {
    pub const ALL: [ContaminantClass; 6] = [
        ContaminantClass::Pet,
        ContaminantClass::Pe,
        ContaminantClass::Pp,
        ContaminantClass::Ps,
        ContaminantClass::Pvc,
        ContaminantClass::Pu,
    ];

    /// Short polymer code, e.g. `PET`
    pub fn code(self) -> &'static str {
        match self {
            ContaminantClass::Pet => "PET",
            ContaminantClass::Pe => "PE",
            ContaminantClass::Pp => "PP",
            ContaminantClass::Ps => "PS",
            ContaminantClass::Pvc => "PVC",
            ContaminantClass::Pu => "PU",
        }
    }

    pub fn polymer_name(self) -> &'static str {
        match self {
            ContaminantClass::Pet => "polyethylene terephthalate",
            ContaminantClass::Pe => "polyethylene",
            ContaminantClass::Pp => "polypropylene",
            ContaminantClass::Ps => "polystyrene",
            ContaminantClass::Pvc => "polyvinyl chloride",
            ContaminantClass::Pu => "polyurethane",
        }
    }
}

impl fmt::Display for ContaminantClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ContaminantClass {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        let class = match normalized.as_str() {
            "pet" | "pete" | "polyethylene terephthalate" => ContaminantClass::Pet,
            "pe" | "hdpe" | "ldpe" | "polyethylene" => ContaminantClass::Pe,
            "pp" | "polypropylene" => ContaminantClass::Pp,
            "ps" | "polystyrene" => ContaminantClass::Ps,
            "pvc" | "polyvinyl chloride" => ContaminantClass::Pvc,
            "pu" | "pur" | "polyurethane" => ContaminantClass::Pu,
            _ => return Err(ValidationError::UnknownContaminant(s.to_string())),
        };
        Ok(class)
    }
}

/// Unvalidated environmental reading as received from a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSampleReading {
    pub lat: f64,
    pub lng: f64,
    pub salinity: f64,
    pub contaminant: String,
    #[serde(default)]
    pub stress: bool,
}

/// Canonical, validated environmental sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleDescriptor {
    pub latitude: f64,
    pub longitude: f64,
    /// Practical salinity units; passed through unclamped
    pub salinity: f64,
    pub contaminant: ContaminantClass,
    /// Environmental stress (e.g. thermal anomaly) present at the site
    pub stress: bool,
}

impl SampleDescriptor {
    /// True when salinity sits outside the practical 0..=50 range.
    /// Such values are accepted but callers may want to log them.
    pub fn salinity_out_of_practical_range(&self) -> bool {
        self.salinity > PRACTICAL_SALINITY_MAX
    }
}

/// Validate a raw reading into a [`SampleDescriptor`]
pub fn normalize(raw: &RawSampleReading) -> Result<SampleDescriptor, ValidationError> {
    if !raw.lat.is_finite() || !(-90.0..=90.0).contains(&raw.lat) {
        return Err(ValidationError::LatitudeOutOfRange(raw.lat));
    }
    if !raw.lng.is_finite() || !(-180.0..=180.0).contains(&raw.lng) {
        return Err(ValidationError::LongitudeOutOfRange(raw.lng));
    }
    if !raw.salinity.is_finite() || raw.salinity < 0.0 {
        return Err(ValidationError::InvalidSalinity(raw.salinity));
    }

    let contaminant = raw.contaminant.parse::<ContaminantClass>()?;

    Ok(SampleDescriptor {
        latitude: raw.lat,
        longitude: raw.lng,
        salinity: raw.salinity,
        contaminant,
        stress: raw.stress,
    })
}
