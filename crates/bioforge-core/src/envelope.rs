//! Response envelope - the single externally visible artifact of a run
//!
//! On the wire the envelope is a flat object consumers can branch on:
//!
//! ```json
//! { "success": true, "data": { ... }, "timestamp": "...",
//!   "monologue": [ ... ], "mode": "LOCAL", "run_id": "..." }
//! ```
//!
//! `data` is present only when `success` is true, `error` only when false.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::design::DesignResult;
use crate::monologue::MonologueEntry;
use crate::types::{now, ExecutionMode, Timestamp};

/// Success-or-failure result of exactly one engine invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WireEnvelope", try_from = "WireEnvelope")]
pub enum ResponseEnvelope {
    Success {
        run_id: Uuid,
        data: DesignResult,
        timestamp: Timestamp,
        monologue: Vec<MonologueEntry>,
        mode: ExecutionMode,
    },
    Failure {
        run_id: Uuid,
        error: String,
        timestamp: Timestamp,
        monologue: Vec<MonologueEntry>,
        mode: ExecutionMode,
    },
}

impl ResponseEnvelope {
    pub fn success(
        run_id: Uuid,
        data: DesignResult,
        monologue: Vec<MonologueEntry>,
        mode: ExecutionMode,
    ) -> Self {
        ResponseEnvelope::Success {
            run_id,
            data,
            timestamp: now(),
            monologue,
            mode,
        }
    }

    pub fn failure(
        run_id: Uuid,
        error: impl Into<String>,
        monologue: Vec<MonologueEntry>,
        mode: ExecutionMode,
    ) -> Self {
        ResponseEnvelope::Failure {
            run_id,
            error: error.into(),
            timestamp: now(),
            monologue,
            mode,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResponseEnvelope::Success { .. })
    }

    pub fn data(&self) -> Option<&DesignResult> {
        match self {
            ResponseEnvelope::Success { data, .. } => Some(data),
            ResponseEnvelope::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ResponseEnvelope::Success { .. } => None,
            ResponseEnvelope::Failure { error, .. } => Some(error),
        }
    }

    pub fn run_id(&self) -> Uuid {
        match self {
            ResponseEnvelope::Success { run_id, .. } | ResponseEnvelope::Failure { run_id, .. } => {
                *run_id
            }
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        match self {
            ResponseEnvelope::Success { timestamp, .. }
            | ResponseEnvelope::Failure { timestamp, .. } => *timestamp,
        }
    }

    pub fn monologue(&self) -> &[MonologueEntry] {
        match self {
            ResponseEnvelope::Success { monologue, .. }
            | ResponseEnvelope::Failure { monologue, .. } => monologue,
        }
    }

    pub fn mode(&self) -> ExecutionMode {
        match self {
            ResponseEnvelope::Success { mode, .. } | ResponseEnvelope::Failure { mode, .. } => *mode,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireEnvelope {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<DesignResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    timestamp: Timestamp,
    monologue: Vec<MonologueEntry>,
    mode: ExecutionMode,
    run_id: Uuid,
}

impl From<ResponseEnvelope> for WireEnvelope {
    fn from(envelope: ResponseEnvelope) -> Self {
        match envelope {
            ResponseEnvelope::Success {
                run_id,
                data,
                timestamp,
                monologue,
                mode,
            } => WireEnvelope {
                success: true,
                data: Some(data),
                error: None,
                timestamp,
                monologue,
                mode,
                run_id,
            },
            ResponseEnvelope::Failure {
                run_id,
                error,
                timestamp,
                monologue,
                mode,
            } => WireEnvelope {
                success: false,
                data: None,
                error: Some(error),
                timestamp,
                monologue,
                mode,
                run_id,
            },
        }
    }
}

impl TryFrom<WireEnvelope> for ResponseEnvelope {
    type Error = String;

    fn try_from(wire: WireEnvelope) -> Result<Self, Self::Error> {
        match (wire.success, wire.data, wire.error) {
            (true, Some(data), _) => Ok(ResponseEnvelope::Success {
                run_id: wire.run_id,
                data,
                timestamp: wire.timestamp,
                monologue: wire.monologue,
                mode: wire.mode,
            }),
            (true, None, _) => Err("success envelope without data".to_string()),
            (false, _, error) => Ok(ResponseEnvelope::Failure {
                run_id: wire.run_id,
                error: error.unwrap_or_else(|| "unknown error".to_string()),
                timestamp: wire.timestamp,
                monologue: wire.monologue,
                mode: wire.mode,
            }),
        }
    }
}
