use super::*;
use crate::backend::{ChatCompletion, InferenceBackend};
use bioforge_core::{AgentRole, ChassisClass, ContaminantClass, MANDATORY_SAFETY_LOCK};
use std::sync::Arc;

#[derive(Debug)]
enum Script {
    Reply(String),
    Fail(&'static str),
    Panic,
}

#[derive(Debug)]
struct ScriptedBackend {
    script: Script,
}

#[async_trait::async_trait]
impl InferenceBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn chat_completion(&self, _system: &str, _user: &str) -> anyhow::Result<ChatCompletion> {
        match &self.script {
            Script::Reply(text) => Ok(ChatCompletion {
                backend_name: "scripted".into(),
                content: text.clone(),
                token_cost: 10,
            }),
            Script::Fail(msg) => anyhow::bail!("{}", msg),
            Script::Panic => panic!("backend exploded"),
        }
    }
}

fn local_engine() -> CommitteeOrchestrator {
    CommitteeOrchestrator::new(EngineConfig::local().without_delays())
}

fn remote_engine(script: Script) -> CommitteeOrchestrator {
    let config = EngineConfig::local()
        .without_delays()
        .with_backend(Arc::new(ScriptedBackend { script }));
    CommitteeOrchestrator::new(config)
}

fn descriptor(salinity: f64, stress: bool, contaminant: ContaminantClass) -> SampleDescriptor {
    SampleDescriptor {
        latitude: 32.0,
        longitude: -145.0,
        salinity,
        contaminant,
        stress,
    }
}

fn remote_payload(lock: Option<&str>) -> String {
    let lock = lock
        .map(|l| format!(r#""safety_lock_type": "{l}","#))
        .unwrap_or_default();
    format!(
        "```json\n{{\"enzyme_name\": \"PETase\", \"mutation_list\": [\"S121E\"], \
         \"predicted_efficiency_score\": 0.81, {lock} \"chassis_type\": \"THERMOPHILE\", \
         \"design_rationale\": \"remote\", \"references\": [\"Remote 2024\"]}}\n```"
    )
}

fn roles(envelope: &ResponseEnvelope) -> Vec<AgentRole> {
    envelope.monologue().iter().map(|e| e.agent).collect()
}

#[tokio::test]
async fn test_local_run_corrects_missing_lock() {
    let envelope = local_engine()
        .run_decision(descriptor(35.5, true, ContaminantClass::Pet))
        .await;

    assert!(envelope.is_success());
    assert_eq!(envelope.mode(), ExecutionMode::Local);

    let data = envelope.data().unwrap();
    assert_eq!(data.chassis_type, ChassisClass::Halophile);
    assert_eq!(data.predicted_efficiency_score, 0.90);
    assert_eq!(data.safety_lock_type, MANDATORY_SAFETY_LOCK);
    assert_eq!(data.enzyme_name, "PETase");
    assert!(!data.references.is_empty());

    // propose, rejected review, retry accepted, simulate
    assert_eq!(
        roles(&envelope),
        vec![
            AgentRole::Architect,
            AgentRole::SafetyOfficer,
            AgentRole::Architect,
            AgentRole::Simulator,
        ]
    );
    let review = &envelope.monologue()[1];
    assert!(review.is_rejection());
    assert!(review.retry_reason.is_some());
}

#[tokio::test]
async fn test_local_runs_are_deterministic() {
    let engine = local_engine();
    let d = descriptor(12.0, false, ContaminantClass::Pu);

    let first = engine.run_decision(d).await;
    let second = engine.run_decision(d).await;

    assert_eq!(first.data(), second.data());
    assert_ne!(first.run_id(), second.run_id());
    assert!(second.timestamp() >= first.timestamp());
}

#[tokio::test]
async fn test_every_contaminant_yields_compliant_design() {
    let engine = local_engine();
    for contaminant in ContaminantClass::ALL {
        for (salinity, stress) in [(5.0, false), (30.0, true), (41.0, false), (48.0, true)] {
            let envelope = engine.run_decision(descriptor(salinity, stress, contaminant)).await;
            let data = envelope.data().expect("local runs succeed");
            assert_eq!(data.safety_lock_type, MANDATORY_SAFETY_LOCK);
            assert!((0.60..=0.95).contains(&data.predicted_efficiency_score));
        }
    }
}

#[tokio::test]
async fn test_run_reading_rejects_invalid_input() {
    let reading = RawSampleReading {
        lat: 120.0,
        lng: 0.0,
        salinity: 10.0,
        contaminant: "PET".into(),
        stress: false,
    };
    let err = local_engine().run_reading(&reading).await.unwrap_err();
    assert_eq!(err, ValidationError::LatitudeOutOfRange(120.0));
}

#[tokio::test]
async fn test_remote_success_reports_remote_mode() {
    let engine = remote_engine(Script::Reply(remote_payload(Some(MANDATORY_SAFETY_LOCK))));
    let envelope = engine
        .run_decision(descriptor(20.0, true, ContaminantClass::Pet))
        .await;

    assert!(envelope.is_success());
    assert_eq!(envelope.mode(), ExecutionMode::Remote);
    let data = envelope.data().unwrap();
    assert_eq!(data.predicted_efficiency_score, 0.81);
    assert_eq!(data.references, vec!["Remote 2024".to_string()]);
    assert_eq!(
        roles(&envelope),
        vec![AgentRole::Architect, AgentRole::SafetyOfficer, AgentRole::Simulator]
    );
    assert!(!envelope.monologue()[1].is_rejection());
}

#[tokio::test]
async fn test_remote_missing_lock_is_warned_and_enforced() {
    let engine = remote_engine(Script::Reply(remote_payload(None)));
    let envelope = engine
        .run_decision(descriptor(20.0, true, ContaminantClass::Pet))
        .await;

    assert_eq!(envelope.mode(), ExecutionMode::Remote);
    assert_eq!(envelope.data().unwrap().safety_lock_type, MANDATORY_SAFETY_LOCK);

    let warning = &envelope.monologue()[1];
    assert_eq!(warning.agent, AgentRole::SafetyOfficer);
    assert!(warning.thought.starts_with("WARNING"));
}

#[tokio::test]
async fn test_remote_corrupt_lock_is_overwritten() {
    let engine = remote_engine(Script::Reply(remote_payload(Some("Optional Plasmid Loss"))));
    let envelope = engine
        .run_decision(descriptor(20.0, true, ContaminantClass::Pet))
        .await;

    assert_eq!(envelope.data().unwrap().safety_lock_type, MANDATORY_SAFETY_LOCK);
    assert!(envelope.monologue()[1]
        .retry_reason
        .as_deref()
        .unwrap()
        .contains("Optional Plasmid Loss"));
}

#[tokio::test]
async fn test_remote_transport_failure_falls_back() {
    let engine = remote_engine(Script::Fail("connection reset by peer"));
    let envelope = engine
        .run_decision(descriptor(35.5, true, ContaminantClass::Pet))
        .await;

    assert!(envelope.is_success());
    assert_eq!(envelope.mode(), ExecutionMode::Local);
    assert_eq!(envelope.data().unwrap().predicted_efficiency_score, 0.90);

    let first = &envelope.monologue()[0];
    assert_eq!(first.agent, AgentRole::Architect);
    assert!(first.thought.contains("connection reset by peer"));
    assert!(first.thought.contains("Falling back"));
    // fallback notice + the four local entries; the delegation entry is gone
    assert_eq!(envelope.monologue().len(), 5);
}

#[tokio::test]
async fn test_remote_garbage_falls_back() {
    let engine = remote_engine(Script::Reply("Sorry, I can't design organisms.".into()));
    let envelope = engine
        .run_decision(descriptor(10.0, false, ContaminantClass::Pe))
        .await;

    assert!(envelope.is_success());
    assert_eq!(envelope.mode(), ExecutionMode::Local);
    assert!(envelope.monologue()[0].thought.contains("Remote parse error"));
}

#[tokio::test]
async fn test_disabled_fallback_surfaces_failure_envelope() {
    let engine = remote_engine(Script::Fail("503 Service Unavailable"))
        .with_fallback_policy(FallbackPolicy::Disabled);
    let envelope = engine
        .run_decision(descriptor(10.0, false, ContaminantClass::Pe))
        .await;

    assert!(!envelope.is_success());
    assert_eq!(envelope.mode(), ExecutionMode::Remote);
    assert!(envelope.error().unwrap().contains("503"));
    assert_eq!(roles(&envelope), vec![AgentRole::Architect]);
}

#[tokio::test]
async fn test_panic_becomes_failure_envelope_with_partial_monologue() {
    let engine = remote_engine(Script::Panic);
    let envelope = engine
        .run_decision(descriptor(10.0, false, ContaminantClass::Pp))
        .await;

    assert!(!envelope.is_success());
    assert!(envelope.data().is_none());
    assert_eq!(envelope.mode(), ExecutionMode::Remote);
    assert!(envelope.error().unwrap().contains("backend exploded"));
    assert_eq!(envelope.monologue().len(), 1);
}

#[tokio::test]
async fn test_phase_delays_are_applied() {
    let engine = CommitteeOrchestrator::new(
        EngineConfig::local().with_phase_delay(Duration::from_millis(20)),
    );
    let started = std::time::Instant::now();
    let envelope = engine
        .run_decision(descriptor(10.0, false, ContaminantClass::Ps))
        .await;

    assert!(envelope.is_success());
    assert!(started.elapsed() >= Duration::from_millis(60));
}
