//! Safety Officer - enforces the mandatory containment mechanism
//!
//! The validator is stateless and never loops. A non-compliant proposal is
//! not a failure: it is rejected together with a corrected copy, and the
//! orchestrator runs the single correction cycle.

use crate::design::{DesignProposal, MANDATORY_SAFETY_LOCK};
use crate::monologue::{AgentRole, MonologueEntry};

/// Outcome of a safety review
#[derive(Debug, Clone, PartialEq)]
pub enum SafetyVerdict {
    /// Proposal already compliant, returned unchanged
    Approved {
        proposal: DesignProposal,
        entry: MonologueEntry,
    },
    /// Proposal lacked (or mislabelled) the lock; `corrected` carries it
    Rejected {
        corrected: DesignProposal,
        entry: MonologueEntry,
        retry_reason: String,
    },
}

impl SafetyVerdict {
    pub fn is_rejected(&self) -> bool {
        matches!(self, SafetyVerdict::Rejected { .. })
    }

    /// The proposal that continues down the pipeline
    pub fn proposal(&self) -> &DesignProposal {
        match self {
            SafetyVerdict::Approved { proposal, .. } => proposal,
            SafetyVerdict::Rejected { corrected, .. } => corrected,
        }
    }
}

fn retry_reason_for(lock: Option<&str>) -> String {
    match lock {
        None => format!(
            "Containment mechanism missing; {} is mandatory for environmental release.",
            MANDATORY_SAFETY_LOCK
        ),
        Some(other) => format!(
            "Containment mechanism {:?} is not approved; {} is mandatory for environmental release.",
            other, MANDATORY_SAFETY_LOCK
        ),
    }
}

/// Review a proposal against the containment invariant
pub fn review(proposal: &DesignProposal) -> SafetyVerdict {
    if proposal.has_mandatory_lock() {
        let entry = MonologueEntry::new(
            AgentRole::SafetyOfficer,
            format!(
                "{} design carries the {} containment mechanism. Biosafety requirements met.",
                proposal.enzyme, MANDATORY_SAFETY_LOCK
            ),
        )
        .with_decision("APPROVED");

        return SafetyVerdict::Approved {
            proposal: proposal.clone(),
            entry,
        };
    }

    let retry_reason = retry_reason_for(proposal.safety_lock.as_deref());
    let entry = MonologueEntry::new(
        AgentRole::SafetyOfficer,
        format!(
            "{} design cannot be released without {}. Inserting the mandatory containment mechanism.",
            proposal.enzyme, MANDATORY_SAFETY_LOCK
        ),
    )
    .with_decision("REJECTED - RETRY REQUIRED")
    .rejected_with(retry_reason.clone());

    SafetyVerdict::Rejected {
        corrected: proposal.with_safety_lock(MANDATORY_SAFETY_LOCK),
        entry,
        retry_reason,
    }
}

/// Warning recorded when a remote payload arrives without the mandatory lock
pub fn remote_warning(reported_lock: Option<&str>) -> MonologueEntry {
    let reason = retry_reason_for(reported_lock);
    MonologueEntry::new(
        AgentRole::SafetyOfficer,
        format!("WARNING: remote design is non-compliant. {}", reason),
    )
    .with_decision("WARNING - CORRECTION ENFORCED")
    .rejected_with(reason)
}
