//! Architect - proposes the organism, enzyme and chassis

use crate::catalog::DesignCatalog;
use crate::chassis::select_chassis;
use crate::design::DesignProposal;
use crate::monologue::{AgentRole, MonologueEntry};
use crate::sample::SampleDescriptor;

/// Build the initial proposal for a site from the chassis rules and catalog
pub fn propose(descriptor: &SampleDescriptor) -> (DesignProposal, MonologueEntry) {
    let entry = DesignCatalog::lookup(descriptor.contaminant);
    let chassis = select_chassis(descriptor.salinity, descriptor.stress);

    let stress_note = if descriptor.stress {
        "environmental stress present"
    } else {
        "no environmental stress"
    };

    let rationale = format!(
        "{} contamination at ({:.2}, {:.2}) with salinity {:.1} PSU and {}. \
         {} ({}) expressing {} with {} beneficial mutation(s), hosted in a {}.",
        descriptor.contaminant.polymer_name(),
        descriptor.latitude,
        descriptor.longitude,
        descriptor.salinity,
        stress_note,
        entry.organism,
        entry.organism_description,
        entry.enzyme,
        entry.mutations.len(),
        chassis.description(),
    );

    let proposal = DesignProposal {
        organism: entry.organism.to_string(),
        organism_description: entry.organism_description.to_string(),
        chassis,
        enzyme: entry.enzyme.to_string(),
        mutations: entry.mutations.iter().map(|m| m.to_string()).collect(),
        rationale,
        safety_lock: None,
    };

    let thought = format!(
        "Detected {} ({}) in water at {:.1} PSU, {}. Proposing {} expressing {} [{}] on a {} chassis.",
        descriptor.contaminant.polymer_name(),
        descriptor.contaminant,
        descriptor.salinity,
        stress_note,
        proposal.organism,
        proposal.enzyme,
        proposal.mutations.join(", "),
        chassis,
    );

    let monologue_entry = MonologueEntry::new(AgentRole::Architect, thought)
        .with_decision(format!("PROPOSE {} / {}", proposal.enzyme, chassis));

    (proposal, monologue_entry)
}

/// Acknowledge the safety officer's correction
pub fn retry_accepted(corrected: &DesignProposal) -> MonologueEntry {
    let lock = corrected.safety_lock.as_deref().unwrap_or_default();
    MonologueEntry::new(
        AgentRole::Architect,
        format!(
            "Accepted safety correction: {} design now carries the {} containment mechanism.",
            corrected.enzyme, lock
        ),
    )
    .with_decision("RETRY ACCEPTED")
}

/// Announce that proposal generation is delegated to a remote backend
pub fn delegation(backend_name: &str) -> MonologueEntry {
    MonologueEntry::new(
        AgentRole::Architect,
        format!(
            "Delegating design proposal to remote inference backend {} with the full committee rule set.",
            backend_name
        ),
    )
    .with_decision("DELEGATE")
}

/// Record that the remote attempt failed and the local pipeline takes over
pub fn fallback(reason: &str) -> MonologueEntry {
    MonologueEntry::new(
        AgentRole::Architect,
        format!(
            "Remote inference failed ({}). Falling back to deterministic local mode.",
            reason
        ),
    )
    .with_decision("FALLBACK")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chassis::ChassisClass;
    use crate::sample::ContaminantClass;

    fn descriptor(salinity: f64, stress: bool, contaminant: ContaminantClass) -> SampleDescriptor {
        SampleDescriptor {
            latitude: 32.0,
            longitude: -145.0,
            salinity,
            contaminant,
            stress,
        }
    }

    #[test]
    fn test_propose_uses_catalog_and_selector() {
        let (proposal, entry) = propose(&descriptor(20.0, true, ContaminantClass::Ps));

        assert_eq!(proposal.enzyme, "Styrene monooxygenase (StyA)");
        assert_eq!(proposal.chassis, ChassisClass::Thermophile);
        assert!(proposal.safety_lock.is_none());
        assert_eq!(entry.agent, AgentRole::Architect);
        assert!(entry.thought.contains("polystyrene"));
        assert!(entry.thought.contains("THERMOPHILE"));
    }

    #[test]
    fn test_propose_is_deterministic() {
        let d = descriptor(38.0, false, ContaminantClass::Pet);
        assert_eq!(propose(&d).0, propose(&d).0);
    }

    #[test]
    fn test_fallback_entry_mentions_reason() {
        let entry = fallback("connection refused");
        assert_eq!(entry.agent, AgentRole::Architect);
        assert!(entry.thought.contains("connection refused"));
        assert!(entry.thought.contains("Falling back"));
    }
}
