//! Committee Orchestrator - sequences the three committee phases
//!
//! One invocation runs as a single async sequence. Every invocation owns its
//! own descriptor, proposal and monologue, so runs may execute concurrently
//! without coordination.
//!
//! # Local state machine
//!
//! ```text
//! PROPOSE ──> REVIEW ──┬── approved ──────────────> SIMULATE ──> ASSEMBLE ──> DONE
//!                      └── rejected ──> REVIEW_RETRY ──┘
//! ```
//!
//! The rejection path is a correction, not a dead end, so `DONE` is always
//! reached. With a remote backend configured the proposal is delegated first
//! and the [`FallbackPolicy`] decides what happens when delegation fails.
//!
//! Only [`ValidationError`] escapes [`CommitteeOrchestrator::run_reading`].
//! Pipeline errors and panics inside a run become failure envelopes that
//! still carry the partial monologue and the mode that was active.

use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use bioforge_core::committee::{architect, safety_officer, simulator};
use bioforge_core::{
    normalize, DesignCatalog, DesignProposal, DesignResult, EngineError, ExecutionMode,
    Monologue, RawSampleReading, ResponseEnvelope, Result, SafetyVerdict, SampleDescriptor,
    SimulationReport, ValidationError,
};

use crate::config::EngineConfig;
use crate::fallback::FallbackPolicy;
use crate::remote::RemoteInferenceAdapter;

/// Mutable state of one run, owned by the orchestrator boundary
#[derive(Debug, Clone)]
pub struct RunContext {
    pub monologue: Monologue,
    /// Mode currently active; reported on failure envelopes
    pub mode: ExecutionMode,
}

impl RunContext {
    pub fn new(mode: ExecutionMode) -> Self {
        Self {
            monologue: Monologue::new(),
            mode,
        }
    }
}

/// States of the deterministic pipeline
#[derive(Debug, Clone)]
enum Phase {
    Propose,
    Review(DesignProposal),
    ReviewRetry(DesignProposal),
    Simulate(DesignProposal),
    Assemble(DesignProposal, SimulationReport),
    Done(DesignResult),
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::Propose => "PROPOSE",
            Phase::Review(_) => "REVIEW",
            Phase::ReviewRetry(_) => "REVIEW_RETRY",
            Phase::Simulate(_) => "SIMULATE",
            Phase::Assemble(..) => "ASSEMBLE",
            Phase::Done(_) => "DONE",
        }
    }
}

/// The committee decision engine
#[derive(Debug, Clone)]
pub struct CommitteeOrchestrator {
    config: EngineConfig,
    remote: Option<RemoteInferenceAdapter>,
    fallback: FallbackPolicy,
}

impl CommitteeOrchestrator {
    pub fn new(config: EngineConfig) -> Self {
        let remote = config
            .backend
            .clone()
            .map(|backend| RemoteInferenceAdapter::new(backend, config.remote_timeout));

        Self {
            config,
            remote,
            fallback: FallbackPolicy::default(),
        }
    }

    pub fn with_fallback_policy(mut self, policy: FallbackPolicy) -> Self {
        self.fallback = policy;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Mode every run starts in
    pub fn mode(&self) -> ExecutionMode {
        self.config.mode()
    }

    /// Validate a raw reading and run the committee on it
    pub async fn run_reading(
        &self,
        reading: &RawSampleReading,
    ) -> std::result::Result<ResponseEnvelope, ValidationError> {
        let descriptor = normalize(reading)?;
        Ok(self.run_decision(descriptor).await)
    }

    /// Run the committee for one validated sample
    pub async fn run_decision(&self, descriptor: SampleDescriptor) -> ResponseEnvelope {
        let run_id = Uuid::new_v4();
        let mut ctx = RunContext::new(self.mode());

        info!(
            %run_id,
            mode = %ctx.mode,
            contaminant = %descriptor.contaminant,
            salinity = descriptor.salinity,
            stress = descriptor.stress,
            "committee run started"
        );
        if descriptor.salinity_out_of_practical_range() {
            warn!(%run_id, salinity = descriptor.salinity, "salinity above practical range, scoring unclamped");
        }

        let outcome = AssertUnwindSafe(self.execute(&descriptor, &mut ctx))
            .catch_unwind()
            .await;

        let envelope = match outcome {
            Ok(Ok(result)) => {
                ResponseEnvelope::success(run_id, result, ctx.monologue.into_entries(), ctx.mode)
            }
            Ok(Err(err)) => {
                warn!(%run_id, mode = %ctx.mode, error = %err, "committee run failed");
                ResponseEnvelope::failure(
                    run_id,
                    err.to_string(),
                    ctx.monologue.into_entries(),
                    ctx.mode,
                )
            }
            Err(panic) => {
                let err = EngineError::PipelineFault(panic_message(panic.as_ref()));
                warn!(%run_id, mode = %ctx.mode, error = %err, "committee run panicked");
                ResponseEnvelope::failure(
                    run_id,
                    err.to_string(),
                    ctx.monologue.into_entries(),
                    ctx.mode,
                )
            }
        };

        info!(
            %run_id,
            mode = %envelope.mode(),
            success = envelope.is_success(),
            entries = envelope.monologue().len(),
            "committee run finished"
        );
        envelope
    }

    async fn execute(&self, descriptor: &SampleDescriptor, ctx: &mut RunContext) -> Result<DesignResult> {
        let Some(remote) = &self.remote else {
            return self.run_local(descriptor, ctx).await;
        };

        match self.run_remote(remote, descriptor, ctx).await {
            Ok(result) => Ok(result),
            Err(err) if self.fallback.should_fall_back(&err) => {
                warn!(backend = remote.backend_name(), error = %err, "remote inference failed, falling back to local mode");
                self.fallback.begin_local_retry(ctx, &err);
                self.run_local(descriptor, ctx).await
            }
            Err(err) => Err(err),
        }
    }

    async fn run_remote(
        &self,
        remote: &RemoteInferenceAdapter,
        descriptor: &SampleDescriptor,
        ctx: &mut RunContext,
    ) -> Result<DesignResult> {
        ctx.monologue.push(architect::delegation(remote.backend_name()));

        let remote_proposal = remote.propose(descriptor).await?;

        // Remote output is untrusted: a missing or wrong lock is recorded as a
        // warning and then corrected exactly like the local path.
        let proposal = match safety_officer::review(&remote_proposal.proposal) {
            SafetyVerdict::Approved { proposal, entry } => {
                ctx.monologue.push(entry);
                proposal
            }
            SafetyVerdict::Rejected { corrected, .. } => {
                warn!(
                    reported = ?remote_proposal.proposal.safety_lock,
                    "remote design lacked the mandatory containment mechanism"
                );
                ctx.monologue.push(safety_officer::remote_warning(
                    remote_proposal.proposal.safety_lock.as_deref(),
                ));
                corrected
            }
        };

        let (_, entry) = simulator::report_remote(descriptor, remote_proposal.score);
        ctx.monologue.push(entry);

        DesignResult::assemble(&proposal, remote_proposal.score, remote_proposal.references)
    }

    async fn run_local(&self, descriptor: &SampleDescriptor, ctx: &mut RunContext) -> Result<DesignResult> {
        let mut phase = Phase::Propose;

        loop {
            debug!(phase = phase.name(), "committee phase");

            phase = match phase {
                Phase::Propose => {
                    self.pause().await;
                    let (proposal, entry) = architect::propose(descriptor);
                    ctx.monologue.push(entry);
                    Phase::Review(proposal)
                }
                Phase::Review(proposal) => {
                    self.pause().await;
                    match safety_officer::review(&proposal) {
                        SafetyVerdict::Approved { proposal, entry } => {
                            ctx.monologue.push(entry);
                            Phase::Simulate(proposal)
                        }
                        SafetyVerdict::Rejected {
                            corrected,
                            entry,
                            retry_reason,
                        } => {
                            debug!(%retry_reason, "safety review requested a correction");
                            ctx.monologue.push(entry);
                            Phase::ReviewRetry(corrected)
                        }
                    }
                }
                Phase::ReviewRetry(corrected) => {
                    // One correction cycle only.
                    if !corrected.has_mandatory_lock() {
                        return Err(EngineError::PipelineFault(format!(
                            "corrected {} design still lacks the mandatory containment mechanism",
                            corrected.enzyme
                        )));
                    }
                    ctx.monologue.push(architect::retry_accepted(&corrected));
                    Phase::Simulate(corrected)
                }
                Phase::Simulate(proposal) => {
                    self.pause().await;
                    let (report, entry) = simulator::simulate(descriptor, &proposal);
                    ctx.monologue.push(entry);
                    Phase::Assemble(proposal, report)
                }
                Phase::Assemble(proposal, report) => {
                    let references = DesignCatalog::lookup(descriptor.contaminant)
                        .references
                        .iter()
                        .map(|r| r.to_string())
                        .collect();
                    Phase::Done(DesignResult::assemble(&proposal, report.score, references)?)
                }
                Phase::Done(result) => return Ok(result),
            };
        }
    }

    async fn pause(&self) {
        if self.config.phase_delay > Duration::ZERO {
            tokio::time::sleep(self.config.phase_delay).await;
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        format!("panic during committee run: {}", msg)
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        format!("panic during committee run: {}", msg)
    } else {
        "panic during committee run".to_string()
    }
}

#[cfg(test)]
mod tests;
