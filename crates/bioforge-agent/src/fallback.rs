//! Fallback Policy
//!
//! Decides when a failed remote attempt is recovered by the deterministic
//! pipeline. A recovered run reports `LOCAL`; the remote attempt survives
//! only as the leading ARCHITECT entry of the monologue.

use bioforge_core::committee::architect;
use bioforge_core::{EngineError, ExecutionMode, Monologue};

use crate::orchestrator::RunContext;

/// Recovery policy applied after a remote attempt fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Rerun the full local pipeline on transport or parse failures
    #[default]
    LocalOnRemoteFailure,
    /// Surface every remote failure as a failure envelope
    Disabled,
}

impl FallbackPolicy {
    /// Whether `err` should be recovered locally
    pub fn should_fall_back(self, err: &EngineError) -> bool {
        match self {
            FallbackPolicy::LocalOnRemoteFailure => err.is_remote(),
            FallbackPolicy::Disabled => false,
        }
    }

    /// Reset `ctx` for a fresh local run that starts with the fallback notice.
    ///
    /// Entries recorded during the remote attempt are dropped.
    pub fn begin_local_retry(self, ctx: &mut RunContext, err: &EngineError) {
        let mut monologue = Monologue::new();
        monologue.push(architect::fallback(&err.to_string()));
        ctx.monologue = monologue;
        ctx.mode = ExecutionMode::Local;
    }
}
