//! Bioforge Agent - the committee decision engine runtime
//!
//! Wraps the deterministic committee of `bioforge-core` in an async engine
//! with an optional remote inference strategy:
//!
//! ```text
//! SampleDescriptor
//!       │
//!       v
//! ┌───────────────────────┐   failure   ┌──────────────────────────┐
//! │ Remote Inference      │────────────>│ Fallback Policy          │
//! │ Adapter (optional)    │             │ (fresh local run)        │
//! └───────────┬───────────┘             └────────────┬─────────────┘
//!             │ proposal                             │
//!             v                                      v
//!    Safety Officer ──> Simulator ──> ResponseEnvelope (REMOTE | LOCAL)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use bioforge_agent::{CommitteeOrchestrator, EngineConfig};
//! use bioforge_core::RawSampleReading;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let engine = CommitteeOrchestrator::new(EngineConfig::local());
//! let envelope = engine
//!     .run_reading(&RawSampleReading {
//!         lat: 32.0,
//!         lng: -145.0,
//!         salinity: 35.5,
//!         contaminant: "PET".into(),
//!         stress: true,
//!     })
//!     .await?;
//! println!("{}", serde_json::to_string_pretty(&envelope)?);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod fallback;
pub mod orchestrator;
pub mod parser;
pub mod providers;
pub mod remote;

pub use backend::{ChatCompletion, InferenceBackend};
pub use config::{EngineConfig, EngineSettings, ProviderKind, RemoteSettings};
pub use fallback::FallbackPolicy;
pub use orchestrator::{CommitteeOrchestrator, RunContext};
pub use parser::{extract_payload, parse_remote_design, RemoteDesign};
pub use remote::{RemoteInferenceAdapter, RemoteProposal};
