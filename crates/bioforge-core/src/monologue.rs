//! Committee monologue - the append-only audit trail of a run

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{now, Timestamp};

/// The three fixed committee roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentRole {
    Architect,
    SafetyOfficer,
    Simulator,
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentRole::Architect => write!(f, "ARCHITECT"),
            AgentRole::SafetyOfficer => write!(f, "SAFETY_OFFICER"),
            AgentRole::Simulator => write!(f, "SIMULATOR"),
        }
    }
}

/// One phase's reasoning and decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonologueEntry {
    pub agent: AgentRole,
    pub timestamp: Timestamp,
    pub thought: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_reason: Option<String>,
}

impl MonologueEntry {
    pub fn new(agent: AgentRole, thought: impl Into<String>) -> Self {
        Self {
            agent,
            timestamp: now(),
            thought: thought.into(),
            decision: None,
            rejected: None,
            retry_reason: None,
        }
    }

    pub fn with_decision(mut self, decision: impl Into<String>) -> Self {
        self.decision = Some(decision.into());
        self
    }

    /// Mark the entry as a rejection carrying the reason a retry is needed
    pub fn rejected_with(mut self, retry_reason: impl Into<String>) -> Self {
        self.rejected = Some(true);
        self.retry_reason = Some(retry_reason.into());
        self
    }

    pub fn is_rejection(&self) -> bool {
        self.rejected.unwrap_or(false)
    }
}

/// Ordered, append-only sequence of entries owned by one invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Monologue {
    entries: Vec<MonologueEntry>,
}

impl Monologue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: MonologueEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[MonologueEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<MonologueEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serialization_skips_empty_fields() {
        let entry = MonologueEntry::new(AgentRole::Simulator, "score 0.90");
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["agent"], "SIMULATOR");
        assert!(json.get("decision").is_none());
        assert!(json.get("rejected").is_none());
        assert!(json.get("retry_reason").is_none());
    }

    #[test]
    fn test_rejected_entry() {
        let entry = MonologueEntry::new(AgentRole::SafetyOfficer, "missing lock")
            .with_decision("REJECTED")
            .rejected_with("containment mechanism absent");

        assert!(entry.is_rejection());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["rejected"], true);
        assert_eq!(json["retry_reason"], "containment mechanism absent");
    }

    #[test]
    fn test_monologue_order_is_preserved() {
        let mut monologue = Monologue::new();
        monologue.push(MonologueEntry::new(AgentRole::Architect, "zero"));
        monologue.push(MonologueEntry::new(AgentRole::Architect, "one"));
        monologue.push(MonologueEntry::new(AgentRole::SafetyOfficer, "two"));

        let thoughts: Vec<_> = monologue.entries().iter().map(|e| e.thought.as_str()).collect();
        assert_eq!(thoughts, vec!["zero", "one", "two"]);
        assert_eq!(serde_json::to_value(&monologue).unwrap().as_array().unwrap().len(), 3);
    }
}
