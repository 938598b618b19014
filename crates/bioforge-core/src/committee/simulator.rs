//! Simulator - scores the reviewed design

use crate::design::DesignProposal;
use crate::monologue::{AgentRole, MonologueEntry};
use crate::sample::SampleDescriptor;
use crate::scorer::{confidence, efficiency_score, EfficiencyBand, SimulationReport};

fn report_entry(report: &SimulationReport, source: &str) -> MonologueEntry {
    MonologueEntry::new(
        AgentRole::Simulator,
        format!(
            "{} predicted efficiency {:.2} ({}), confidence {:.2}.",
            source, report.score, report.band, report.confidence
        ),
    )
    .with_decision(format!("EFFICIENCY {:.2} - {}", report.score, report.band))
}

/// Run the efficiency model against a (possibly corrected) proposal
pub fn simulate(
    descriptor: &SampleDescriptor,
    proposal: &DesignProposal,
) -> (SimulationReport, MonologueEntry) {
    let score = efficiency_score(
        descriptor.salinity,
        descriptor.stress,
        proposal.chassis,
        proposal.mutations.len(),
    );
    let report = SimulationReport {
        score,
        band: EfficiencyBand::from_score(score),
        confidence: confidence(descriptor.salinity, descriptor.stress),
    };
    let entry = report_entry(&report, "Simulation of the deterministic efficiency model:");
    (report, entry)
}

/// Report a score that was supplied by a remote backend
pub fn report_remote(descriptor: &SampleDescriptor, score: f64) -> (SimulationReport, MonologueEntry) {
    let report = SimulationReport {
        score,
        band: EfficiencyBand::from_score(score),
        confidence: confidence(descriptor.salinity, descriptor.stress),
    };
    let entry = report_entry(&report, "Remote model");
    (report, entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::committee::architect;
    use crate::sample::ContaminantClass;

    #[test]
    fn test_simulate_reports_score_band_and_confidence() {
        let descriptor = SampleDescriptor {
            latitude: 32.0,
            longitude: -145.0,
            salinity: 35.5,
            contaminant: ContaminantClass::Pet,
            stress: true,
        };
        let (proposal, _) = architect::propose(&descriptor);
        let (report, entry) = simulate(&descriptor, &proposal);

        assert_eq!(report.score, 0.90);
        assert_eq!(report.band, EfficiencyBand::Optimal);
        assert_eq!(report.confidence, 0.70);
        assert_eq!(entry.agent, AgentRole::Simulator);
        assert!(entry.thought.contains("0.90"));
        assert!(entry.thought.contains("optimal"));
    }
}
