//! Remote Inference Adapter
//!
//! Delegates proposal generation to an [`InferenceBackend`]. The backend gets
//! the full committee rule set as its system instruction and the sample
//! descriptor as a JSON user message. Transport failures and timeouts map to
//! [`EngineError::RemoteTransport`]; unusable payloads map to
//! [`EngineError::RemoteParse`]. Either one hands control to the fallback
//! policy.

use std::sync::Arc;
use std::time::Duration;

use bioforge_core::chassis::HALOPHILE_SALINITY_THRESHOLD;
use bioforge_core::{
    DesignCatalog, DesignProposal, EngineError, Result, SampleDescriptor, MANDATORY_SAFETY_LOCK,
};

use crate::backend::InferenceBackend;
use crate::parser::{parse_remote_design, RemoteDesign};

/// Remote proposal mapped onto the pipeline's types
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteProposal {
    /// Proposal carrying whatever safety lock the model reported
    pub proposal: DesignProposal,
    pub score: f64,
    pub references: Vec<String>,
}

/// Fixed rule text sent as the system instruction
pub fn system_instruction() -> String {
    let mut rules = format!(
        "You are the Architect of a biosafety committee designing engineered microbes \
         that degrade plastic contamination in water. Apply these rules exactly.\n\n\
         CHASSIS RULES\n\
         - salinity > {threshold} PSU: HALOPHILE (overrides stress)\n\
         - salinity <= {threshold} PSU and stress = true: THERMOPHILE\n\
         - salinity <= {threshold} PSU and stress = false: MESOPHILE\n\n\
         SCORING RULES\n\
         - start at 0.60\n\
         - +0.15 if the chassis matches the salinity regime\n\
         - +0.10 if stress is false\n\
         - -0.10 if stress is true and the chassis is MESOPHILE\n\
         - +0.05 per mutation, at most 3 mutations counted\n\
         - cap at 0.95, round to two decimals\n\n\
         SAFETY RULE\n\
         - every design MUST set safety_lock_type to exactly \"{lock}\"\n\n\
         DESIGN CATALOG (contaminant: organism / enzyme / mutations)\n",
        threshold = HALOPHILE_SALINITY_THRESHOLD,
        lock = MANDATORY_SAFETY_LOCK,
    );

    for entry in DesignCatalog::entries() {
        rules.push_str(&format!(
            "- {}: {} / {} / {}\n",
            entry.contaminant,
            entry.organism,
            entry.enzyme,
            entry.mutations.join(", ")
        ));
    }

    rules.push_str(
        "\nRespond with ONLY a JSON object with these fields:\n\
         {\"enzyme_name\": string, \"mutation_list\": [string], \
         \"predicted_efficiency_score\": number in [0, 1], \"safety_lock_type\": string, \
         \"chassis_type\": \"MESOPHILE\" | \"THERMOPHILE\" | \"HALOPHILE\", \
         \"design_rationale\": string, \"references\": [string]}",
    );
    rules
}

/// Serialise the descriptor as the user message
pub fn user_message(descriptor: &SampleDescriptor) -> Result<String> {
    let sample = serde_json::to_string_pretty(descriptor)
        .map_err(|e| EngineError::PipelineFault(format!("cannot serialise sample: {}", e)))?;
    Ok(format!(
        "Design a remediation organism for this water sample:\n{}",
        sample
    ))
}

/// Outermost context plus the root cause. Intermediate layers of a
/// transport error chain repeat each other and are dropped.
fn transport_summary(err: &anyhow::Error) -> String {
    let root = err.root_cause();
    if err.chain().count() > 1 {
        format!("{}: {}", err, root)
    } else {
        err.to_string()
    }
}

/// Adapter wrapping one backend with a call timeout
#[derive(Debug, Clone)]
pub struct RemoteInferenceAdapter {
    backend: Arc<dyn InferenceBackend>,
    timeout: Duration,
}

impl RemoteInferenceAdapter {
    pub fn new(backend: Arc<dyn InferenceBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Call the backend and parse its answer
    pub async fn request_design(&self, descriptor: &SampleDescriptor) -> Result<RemoteDesign> {
        let system = system_instruction();
        let user = user_message(descriptor)?;

        let completion = tokio::time::timeout(
            self.timeout,
            self.backend.chat_completion(&system, &user),
        )
        .await
        .map_err(|_| {
            EngineError::RemoteTransport(format!(
                "{} timed out after {:?}",
                self.backend.name(),
                self.timeout
            ))
        })?
        .map_err(|e| EngineError::RemoteTransport(transport_summary(&e)))?;

        tracing::debug!(
            backend = %completion.backend_name,
            tokens = completion.token_cost,
            "remote completion received"
        );

        parse_remote_design(&completion.content)
    }

    /// Request a design and map it onto a [`DesignProposal`]
    pub async fn propose(&self, descriptor: &SampleDescriptor) -> Result<RemoteProposal> {
        let design = self.request_design(descriptor).await?;
        let catalog = DesignCatalog::lookup(descriptor.contaminant);

        let proposal = DesignProposal {
            organism: catalog.organism.to_string(),
            organism_description: catalog.organism_description.to_string(),
            chassis: design.chassis_type,
            enzyme: design.enzyme_name,
            mutations: design.mutation_list,
            rationale: design.design_rationale,
            safety_lock: design.safety_lock_type,
        };

        Ok(RemoteProposal {
            proposal,
            score: design.predicted_efficiency_score,
            references: design.references,
        })
    }
}
