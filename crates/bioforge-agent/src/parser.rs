//! Remote Response Parser
//!
//! Extracts the design payload from model output. Models often wrap JSON in
//! a fenced code block; the first fenced block wins, otherwise the whole
//! text is the payload.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use bioforge_core::scorer::normalize_score;
use bioforge_core::{ChassisClass, EngineError, Result};

lazy_static! {
    // (?s) makes . match newlines inside the block
    static ref FENCED_BLOCK: Regex = Regex::new(r"(?s)```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)```")
        .expect("fenced block pattern is valid");
}

/// Design object exactly as the remote model is asked to return it
#[derive(Debug, Clone, Deserialize)]
struct RemoteDesignPayload {
    enzyme_name: String,
    mutation_list: Vec<String>,
    predicted_efficiency_score: f64,
    #[serde(default)]
    safety_lock_type: Option<String>,
    chassis_type: String,
    design_rationale: String,
    #[serde(default)]
    references: Vec<String>,
}

/// Validated remote design, still untrusted with respect to containment
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteDesign {
    pub enzyme_name: String,
    pub mutation_list: Vec<String>,
    /// Clamped to the score ceiling and rounded to two decimals
    pub predicted_efficiency_score: f64,
    /// As reported; may be missing or wrong
    pub safety_lock_type: Option<String>,
    pub chassis_type: ChassisClass,
    pub design_rationale: String,
    pub references: Vec<String>,
}

/// Return the first fenced block's body, or the trimmed text itself
pub fn extract_payload(response: &str) -> &str {
    FENCED_BLOCK
        .captures(response)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or_else(|| response.trim())
}

/// Parse model output into a [`RemoteDesign`]
pub fn parse_remote_design(response: &str) -> Result<RemoteDesign> {
    let payload = extract_payload(response);
    if payload.is_empty() {
        return Err(EngineError::RemoteParse("empty response payload".to_string()));
    }

    let raw: RemoteDesignPayload = serde_json::from_str(payload)?;

    if raw.enzyme_name.trim().is_empty() {
        return Err(EngineError::RemoteParse("enzyme_name is empty".to_string()));
    }

    let score = raw.predicted_efficiency_score;
    if !score.is_finite() || !(0.0..=1.0).contains(&score) {
        return Err(EngineError::RemoteParse(format!(
            "predicted_efficiency_score {} is outside [0, 1]",
            score
        )));
    }

    let chassis_type = raw
        .chassis_type
        .parse::<ChassisClass>()
        .map_err(|e| EngineError::RemoteParse(e.to_string()))?;

    let safety_lock_type = raw
        .safety_lock_type
        .map(|lock| lock.trim().to_string())
        .filter(|lock| !lock.is_empty());

    Ok(RemoteDesign {
        enzyme_name: raw.enzyme_name.trim().to_string(),
        mutation_list: raw.mutation_list,
        predicted_efficiency_score: normalize_score(score),
        safety_lock_type,
        chassis_type,
        design_rationale: raw.design_rationale,
        references: raw.references,
    })
}
