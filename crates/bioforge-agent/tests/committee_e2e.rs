//! End-to-end tests for the committee decision engine.
//!
//! These drive the public API only: a raw reading goes in, an envelope comes
//! out, and assertions are made on the wire JSON consumers read.

use bioforge_agent::providers::{GeminiClient, OpenAICompatibleClient};
use bioforge_agent::{
    ChatCompletion, CommitteeOrchestrator, EngineConfig, FallbackPolicy, InferenceBackend,
};
use bioforge_core::{RawSampleReading, ResponseEnvelope, MANDATORY_SAFETY_LOCK};
use std::sync::Arc;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn pacific_pet_reading() -> RawSampleReading {
    RawSampleReading {
        lat: 32.0,
        lng: -145.0,
        salinity: 35.5,
        contaminant: "PET".to_string(),
        stress: true,
    }
}

fn local_engine() -> CommitteeOrchestrator {
    CommitteeOrchestrator::new(EngineConfig::local().without_delays())
}

/// Backend that answers with a fixed text, like a misbehaving model would
#[derive(Debug)]
struct CannedBackend(&'static str);

#[async_trait::async_trait]
impl InferenceBackend for CannedBackend {
    fn name(&self) -> &str {
        "canned"
    }

    async fn chat_completion(&self, _: &str, _: &str) -> anyhow::Result<ChatCompletion> {
        Ok(ChatCompletion {
            backend_name: "canned".into(),
            content: self.0.to_string(),
            token_cost: 0,
        })
    }
}

// ---------------------------------------------------------------------------
// Test 1: Pacific PET sample → salt-tolerant chassis, score 0.90, LOCAL
// ---------------------------------------------------------------------------
#[tokio::test]
async fn test_pacific_pet_sample_end_to_end() {
    let envelope = local_engine()
        .run_reading(&pacific_pet_reading())
        .await
        .expect("reading is valid");

    let json = serde_json::to_value(&envelope).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["mode"], "LOCAL");
    assert_eq!(json["data"]["chassis_type"], "HALOPHILE");
    assert_eq!(json["data"]["predicted_efficiency_score"], 0.9);
    assert_eq!(json["data"]["safety_lock_type"], MANDATORY_SAFETY_LOCK);
    assert!(!json["monologue"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test 2: Unreachable remote server → fallback, still a LOCAL success
// ---------------------------------------------------------------------------
#[tokio::test]
async fn test_unreachable_remote_falls_back_to_local() {
    let backend = OpenAICompatibleClient::new("Offline", None, "http://127.0.0.1:9/v1", "none");
    let config = EngineConfig::local()
        .without_delays()
        .with_remote_timeout(Duration::from_secs(5))
        .with_backend(Arc::new(backend));
    let engine = CommitteeOrchestrator::new(config);

    let envelope = engine.run_reading(&pacific_pet_reading()).await.unwrap();

    assert!(envelope.is_success());
    assert_eq!(envelope.mode().to_string(), "LOCAL");
    assert!(envelope.monologue()[0].thought.contains("Falling back"));
    assert_eq!(envelope.data().unwrap().predicted_efficiency_score, 0.90);
}

// ---------------------------------------------------------------------------
// Test 3: Remote payload without a lock never yields a non-compliant result
// ---------------------------------------------------------------------------
#[tokio::test]
async fn test_remote_payload_without_lock_is_still_compliant() {
    let reply = r#"{"enzyme_name": "PETase", "mutation_list": [],
        "predicted_efficiency_score": 0.7, "chassis_type": "HALOPHILE",
        "design_rationale": "no lock", "references": []}"#;
    let config = EngineConfig::local()
        .without_delays()
        .with_backend(Arc::new(CannedBackend(reply)));

    let envelope = CommitteeOrchestrator::new(config)
        .run_reading(&pacific_pet_reading())
        .await
        .unwrap();

    let json = serde_json::to_value(&envelope).unwrap();
    assert_eq!(json["mode"], "REMOTE");
    assert_eq!(json["data"]["safety_lock_type"], MANDATORY_SAFETY_LOCK);
}

// ---------------------------------------------------------------------------
// Test 4: Invalid contaminant is the only error that escapes the engine
// ---------------------------------------------------------------------------
#[tokio::test]
async fn test_unknown_contaminant_is_a_validation_error() {
    let mut reading = pacific_pet_reading();
    reading.contaminant = "kevlar".into();

    let err = local_engine().run_reading(&reading).await.unwrap_err();
    assert!(err.to_string().contains("kevlar"));
}

// ---------------------------------------------------------------------------
// Test 5: Concurrent invocations are independent
// ---------------------------------------------------------------------------
#[tokio::test]
async fn test_concurrent_runs_do_not_share_state() {
    let engine = Arc::new(local_engine());
    let mut handles = Vec::new();

    for contaminant in ["PET", "PE", "PP", "PS", "PVC", "PU"] {
        let engine = Arc::clone(&engine);
        let reading = RawSampleReading {
            contaminant: contaminant.to_string(),
            ..pacific_pet_reading()
        };
        handles.push(tokio::spawn(async move {
            engine.run_reading(&reading).await.unwrap()
        }));
    }

    let mut envelopes: Vec<ResponseEnvelope> = Vec::new();
    for handle in handles {
        envelopes.push(handle.await.unwrap());
    }

    for envelope in &envelopes {
        assert!(envelope.is_success());
        assert_eq!(envelope.monologue().len(), 4);
    }
    let enzymes: std::collections::HashSet<_> = envelopes
        .iter()
        .map(|e| e.data().unwrap().enzyme_name.clone())
        .collect();
    assert_eq!(enzymes.len(), 6);
}

// ---------------------------------------------------------------------------
// Test 6: Transport failures never publish the API key
// ---------------------------------------------------------------------------
#[tokio::test]
async fn test_gemini_transport_failure_keeps_api_key_out_of_envelope() {
    const KEY: &str = "SECRET-KEY-123";

    for policy in [FallbackPolicy::LocalOnRemoteFailure, FallbackPolicy::Disabled] {
        let backend = GeminiClient::new(KEY.to_string(), "m").with_base_url("http://127.0.0.1:9/v1beta");
        let config = EngineConfig::local()
            .without_delays()
            .with_remote_timeout(Duration::from_secs(5))
            .with_backend(Arc::new(backend));
        let engine = CommitteeOrchestrator::new(config).with_fallback_policy(policy);

        let envelope = engine.run_reading(&pacific_pet_reading()).await.unwrap();
        let json = serde_json::to_string(&envelope).unwrap();

        assert!(!json.contains(KEY), "{:?} envelope leaked the key: {}", policy, json);
        assert!(!json.contains("key="));
        assert!(json.contains("Failed to send request to Gemini"));
    }
}
