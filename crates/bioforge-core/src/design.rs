//! Design proposals and final design results

use serde::{Deserialize, Serialize};

use crate::chassis::ChassisClass;
use crate::error::{EngineError, Result};

/// The one containment mechanism every successful design must carry
pub const MANDATORY_SAFETY_LOCK: &str = "Auxotrophic Kill Switch";

/// Working design record passed between committee phases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignProposal {
    pub organism: String,
    pub organism_description: String,
    pub chassis: ChassisClass,
    pub enzyme: String,
    pub mutations: Vec<String>,
    pub rationale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_lock: Option<String>,
}

impl DesignProposal {
    /// Copy of this proposal carrying `lock` as its containment mechanism.
    /// Applying the same lock twice yields an identical proposal.
    pub fn with_safety_lock(&self, lock: impl Into<String>) -> Self {
        Self {
            safety_lock: Some(lock.into()),
            ..self.clone()
        }
    }

    pub fn has_mandatory_lock(&self) -> bool {
        self.safety_lock.as_deref() == Some(MANDATORY_SAFETY_LOCK)
    }
}

/// Final, immutable output of a successful run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignResult {
    pub enzyme_name: String,
    pub mutation_list: Vec<String>,
    pub predicted_efficiency_score: f64,
    pub safety_lock_type: String,
    pub chassis_type: ChassisClass,
    pub design_rationale: String,
    pub references: Vec<String>,
}

impl DesignResult {
    /// Assemble a result, refusing any proposal without the mandatory lock
    pub fn assemble(
        proposal: &DesignProposal,
        score: f64,
        references: Vec<String>,
    ) -> Result<Self> {
        if !proposal.has_mandatory_lock() {
            return Err(EngineError::InvariantViolation(format!(
                "design for {} reached assembly with containment {:?}, expected {:?}",
                proposal.enzyme, proposal.safety_lock, MANDATORY_SAFETY_LOCK
            )));
        }

        Ok(Self {
            enzyme_name: proposal.enzyme.clone(),
            mutation_list: proposal.mutations.clone(),
            predicted_efficiency_score: score,
            safety_lock_type: MANDATORY_SAFETY_LOCK.to_string(),
            chassis_type: proposal.chassis,
            design_rationale: proposal.rationale.clone(),
            references,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal() -> DesignProposal {
        DesignProposal {
            organism: "Ideonella sakaiensis".into(),
            organism_description: "PET degrader".into(),
            chassis: ChassisClass::Mesophile,
            enzyme: "PETase".into(),
            mutations: vec!["S121E".into()],
            rationale: "test".into(),
            safety_lock: None,
        }
    }

    #[test]
    fn test_with_safety_lock_is_idempotent() {
        let once = proposal().with_safety_lock(MANDATORY_SAFETY_LOCK);
        let twice = once.with_safety_lock(MANDATORY_SAFETY_LOCK);

        assert_eq!(once, twice);
        assert!(twice.has_mandatory_lock());
    }

    #[test]
    fn test_assemble_requires_mandatory_lock() {
        let err = DesignResult::assemble(&proposal(), 0.9, vec![]).unwrap_err();
        assert!(matches!(err, EngineError::InvariantViolation(_)));

        let wrong = proposal().with_safety_lock("Plasmid Curing");
        assert!(DesignResult::assemble(&wrong, 0.9, vec![]).is_err());
    }

    #[test]
    fn test_assemble_copies_fields() {
        let locked = proposal().with_safety_lock(MANDATORY_SAFETY_LOCK);
        let result = DesignResult::assemble(&locked, 0.85, vec!["ref".into()]).unwrap();

        assert_eq!(result.enzyme_name, "PETase");
        assert_eq!(result.mutation_list, vec!["S121E".to_string()]);
        assert_eq!(result.safety_lock_type, MANDATORY_SAFETY_LOCK);
        assert_eq!(result.chassis_type, ChassisClass::Mesophile);
        assert_eq!(result.references.len(), 1);
    }
}
