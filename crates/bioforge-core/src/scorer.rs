//! Efficiency Scorer
//!
//! Predicted efficacy of a design under the sampled conditions. Arithmetic is
//! done in hundredths so identical inputs always give bit-identical scores.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::chassis::ChassisClass;

const BASE_CENTS: i32 = 60;
const CONSISTENT_CHASSIS_BONUS: i32 = 15;
const NO_STRESS_BONUS: i32 = 10;
const UNADAPTED_STRESS_PENALTY: i32 = 10;
const PER_MUTATION_BONUS: i32 = 5;
const MUTATION_CAP: usize = 3;
const CEILING_CENTS: i32 = 95;

/// Lowest score the scorer can emit
pub const SCORE_FLOOR: f64 = 0.60;
/// Highest score the scorer can emit
pub const SCORE_CEILING: f64 = 0.95;

const CONFIDENCE_BASE: i32 = 85;
const CONFIDENCE_STRESS_PENALTY: i32 = 15;
const CONFIDENCE_SALINITY_PENALTY: i32 = 10;
const CONFIDENCE_FLOOR: i32 = 50;
const CONFIDENCE_SALINITY_LIMIT: f64 = 40.0;

/// Qualitative efficiency band reported by the simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EfficiencyBand {
    Optimal,
    Suboptimal,
    Marginal,
}

impl EfficiencyBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.85 {
            EfficiencyBand::Optimal
        } else if score >= 0.70 {
            EfficiencyBand::Suboptimal
        } else {
            EfficiencyBand::Marginal
        }
    }
}

impl fmt::Display for EfficiencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EfficiencyBand::Optimal => write!(f, "optimal"),
            EfficiencyBand::Suboptimal => write!(f, "suboptimal"),
            EfficiencyBand::Marginal => write!(f, "marginal"),
        }
    }
}

/// Outcome of the simulation phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub score: f64,
    pub band: EfficiencyBand,
    pub confidence: f64,
}

/// Score a design, clamped to `[SCORE_FLOOR, SCORE_CEILING]`
pub fn efficiency_score(
    salinity: f64,
    stress: bool,
    chassis: ChassisClass,
    mutation_count: usize,
) -> f64 {
    let mut cents = BASE_CENTS;

    if chassis.is_consistent_with(salinity) {
        cents += CONSISTENT_CHASSIS_BONUS;
    }
    if !stress {
        cents += NO_STRESS_BONUS;
    }
    if stress && chassis == ChassisClass::Mesophile {
        cents -= UNADAPTED_STRESS_PENALTY;
    }
    cents += PER_MUTATION_BONUS * mutation_count.min(MUTATION_CAP) as i32;

    f64::from(cents.clamp(BASE_CENTS, CEILING_CENTS)) / 100.0
}

/// Confidence in a simulated score given site conditions
pub fn confidence(salinity: f64, stress: bool) -> f64 {
    let mut cents = CONFIDENCE_BASE;
    if stress {
        cents -= CONFIDENCE_STRESS_PENALTY;
    }
    if salinity > CONFIDENCE_SALINITY_LIMIT {
        cents -= CONFIDENCE_SALINITY_PENALTY;
    }
    f64::from(cents.max(CONFIDENCE_FLOOR)) / 100.0
}

/// Round a score to two decimals and cap it at the ceiling
pub fn normalize_score(raw: f64) -> f64 {
    ((raw.min(SCORE_CEILING) * 100.0).round() / 100.0).max(0.0)
}
