//! Committee roles
//!
//! Each of the three fixed [`AgentRole`](crate::AgentRole)s has a module of
//! pure handler functions. Handlers build values and monologue entries; they
//! never sleep, log or touch shared state, so the orchestrator owns all
//! sequencing.
//!
//! ```text
//! SampleDescriptor
//!        │
//!        v
//!   ARCHITECT ──── proposal ────> SAFETY_OFFICER ──┬── approved ───────┐
//!                                                  └── rejected + fix ─┤
//!                                                                      v
//!                                                                 SIMULATOR
//! ```

pub mod architect;
pub mod safety_officer;
pub mod simulator;

pub use safety_officer::SafetyVerdict;
