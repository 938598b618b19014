//! Bioforge Core - deterministic heart of the committee decision engine
//!
//! Bioforge takes an environmental water-sample description and produces a
//! recommended biological-remediation design plus the committee's audit
//! trail. This crate holds everything that does not need I/O:
//!
//! 1. **Input Normalizer** (`sample`): raw reading → [`SampleDescriptor`]
//! 2. **Chassis Selector** (`chassis`): salinity + stress → [`ChassisClass`]
//! 3. **Design Catalog** (`catalog`): contaminant → enzyme, mutations, organism
//! 4. **Efficiency Scorer** (`scorer`): bounded predicted efficacy
//! 5. **Committee roles** (`committee`): Architect, Safety Officer, Simulator
//! 6. **Envelope** (`envelope`): the success-or-failure result of a run
//!
//! The async orchestration, remote inference and fallback live in
//! `bioforge-agent`.
//!
//! # Quick Start
//!
//! ```
//! use bioforge_core::{normalize, RawSampleReading};
//! use bioforge_core::committee::{architect, safety_officer, simulator};
//!
//! let descriptor = normalize(&RawSampleReading {
//!     lat: 32.0,
//!     lng: -145.0,
//!     salinity: 35.5,
//!     contaminant: "PET".to_string(),
//!     stress: true,
//! })
//! .unwrap();
//!
//! let (proposal, _) = architect::propose(&descriptor);
//! let verdict = safety_officer::review(&proposal);
//! let (report, _) = simulator::simulate(&descriptor, verdict.proposal());
//!
//! assert!(verdict.is_rejected());
//! assert_eq!(report.score, 0.90);
//! ```

#![deny(unsafe_code)]
#![warn(rust_2018_idioms, missing_debug_implementations, clippy::all)]

pub mod catalog;
pub mod chassis;
pub mod committee;
pub mod design;
pub mod envelope;
pub mod error;
pub mod monologue;
pub mod sample;
pub mod scorer;
pub mod types;

// Re-export commonly used types for convenience
pub use catalog::{CatalogEntry, DesignCatalog};
pub use chassis::{select_chassis, ChassisClass};
pub use committee::SafetyVerdict;
pub use design::{DesignProposal, DesignResult, MANDATORY_SAFETY_LOCK};
pub use envelope::ResponseEnvelope;
pub use error::{EngineError, Result, ValidationError};
pub use monologue::{AgentRole, Monologue, MonologueEntry};
pub use sample::{normalize, ContaminantClass, RawSampleReading, SampleDescriptor};
pub use scorer::{efficiency_score, EfficiencyBand, SimulationReport};
pub use types::{ExecutionMode, Timestamp};

pub use uuid::Uuid;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
