// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end pipeline tests: config -> router -> breaker -> HTTP -> cleaner.
//!
//! A wiremock server stands in for Ollama so the full request path runs
//! without a model on the machine.

use std::sync::Arc;

use switchyard_config::{SwitchyardConfig, load_and_validate_str};
use switchyard_core::{CustomerTier, GenerationBackend, SwitchyardError};
use switchyard_dispatch::{AgentDispatcher, AgentStatus, FALLBACK_MODEL, Stage, TieredGenerator};
use switchyard_ollama::OllamaBackend;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LIGHT: &str = "llama3.2:3b";
const HEAVY: &str = "gpt-oss:20b";

fn config_for(server: &MockServer, extra: &str) -> SwitchyardConfig {
    let toml = format!(
        r#"
[ollama]
base_url = "{}"
max_retries = 2
retry_delay_ms = 0

[resilience]
failure_threshold = 2
cooldown_secs = 60
{extra}
"#,
        server.uri()
    );
    load_and_validate_str(&toml).expect("test config should validate")
}

fn backend(config: &SwitchyardConfig) -> Arc<dyn GenerationBackend> {
    Arc::new(OllamaBackend::new(config).expect("backend should build"))
}

async fn mount_reply(server: &MockServer, model: &str, text: &str) {
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(serde_json::json!({"model": model})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model": model,
            "response": text,
            "done": true
        })))
        .mount(server)
        .await;
}

async fn mount_failure(server: &MockServer, model: &str, status: u16) {
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(serde_json::json!({"model": model})))
        .respond_with(
            ResponseTemplate::new(status).set_body_json(serde_json::json!({"error": "model crashed"})),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn simple_prompt_reaches_lightweight_and_is_cleaned() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        LIGHT,
        "I understand. Paris is the capital of France. I hope this helps!",
    )
    .await;

    let config = config_for(&server, "");
    let generator = TieredGenerator::new(&config, backend(&config));
    let outcome = generator
        .generate("what is the capital of France", CustomerTier::Basic)
        .await
        .unwrap();

    assert_eq!(outcome.model_used, LIGHT);
    assert_eq!(outcome.stage, Stage::Primary);
    assert_eq!(outcome.content, "Paris is the capital of France.");
    assert!(outcome.error.is_none());
}

#[tokio::test]
async fn enterprise_short_prompt_reaches_heavyweight() {
    let server = MockServer::start().await;
    mount_reply(&server, HEAVY, "Hello.").await;

    let config = config_for(&server, "");
    let generator = TieredGenerator::new(&config, backend(&config));
    let outcome = generator.generate("hi", CustomerTier::Enterprise).await.unwrap();

    assert_eq!(outcome.model_used, HEAVY);
    assert!(outcome.decision.reason.starts_with("enterprise tier"));
}

#[tokio::test]
async fn failed_primary_falls_over_to_alternate_model() {
    let server = MockServer::start().await;
    mount_failure(&server, HEAVY, 500).await;
    mount_reply(&server, LIGHT, "Short answer.").await;

    let config = config_for(&server, "");
    let generator = TieredGenerator::new(&config, backend(&config));
    let outcome = generator
        .generate("/heavy explain consensus", CustomerTier::Premium)
        .await
        .unwrap();

    assert_eq!(outcome.stage, Stage::Alternate);
    assert_eq!(outcome.model_used, LIGHT);
    assert!(outcome.error.is_some());

    let report = generator.stats().report();
    assert_eq!(report.classes[1].failures, 1);
    assert_eq!(report.classes[0].successes, 1);
}

#[tokio::test]
async fn both_models_down_yields_canned_reply() {
    let server = MockServer::start().await;
    mount_failure(&server, LIGHT, 503).await;
    mount_failure(&server, HEAVY, 503).await;

    let config = config_for(&server, "");
    let generator = TieredGenerator::new(&config, backend(&config));
    let outcome = generator
        .generate("help me debug this code", CustomerTier::Basic)
        .await
        .unwrap();

    assert_eq!(outcome.stage, Stage::Fallback);
    assert_eq!(outcome.model_used, FALLBACK_MODEL);
    assert!(!outcome.content.is_empty());
    assert_eq!(generator.stats().report().fallback_count, 1);
}

#[tokio::test]
async fn canned_replies_disabled_surfaces_unavailable() {
    let server = MockServer::start().await;
    mount_failure(&server, LIGHT, 503).await;
    mount_failure(&server, HEAVY, 503).await;

    let config = config_for(&server, "\n[routing]\ncanned_fallback = false\n");
    let generator = TieredGenerator::new(&config, backend(&config));
    let err = generator.generate("hello", CustomerTier::Basic).await.unwrap_err();

    match err {
        SwitchyardError::Unavailable { attempted } => {
            assert_eq!(attempted, vec![LIGHT.to_string(), HEAVY.to_string()]);
        }
        other => panic!("expected Unavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn open_breaker_stops_hitting_the_server() {
    let server = MockServer::start().await;
    // Two requests, two attempts each, then the breaker opens.
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(502))
        .expect(4)
        .mount(&server)
        .await;

    let config = config_for(&server, "\n[routing]\nalternate_on_failure = false\n");
    let generator = TieredGenerator::new(&config, backend(&config));

    for _ in 0..4 {
        let outcome = generator.generate("hello", CustomerTier::Basic).await.unwrap();
        assert_eq!(outcome.stage, Stage::Fallback);
    }

    let last = generator.generate("hello", CustomerTier::Basic).await.unwrap();
    assert!(
        last.error.as_deref().is_some_and(|e| e.contains("circuit")),
        "got {:?}",
        last.error
    );
}

#[tokio::test]
async fn agent_mode_frames_prompt_for_code_agent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(serde_json::json!({"model": HEAVY})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model": HEAVY,
            "response": "Use a HashMap.",
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server, "");
    let dispatcher = AgentDispatcher::new(&config, backend(&config)).unwrap();
    let outcome = dispatcher
        .process("write a function to count words", CustomerTier::Premium)
        .await;

    assert_eq!(outcome.agent, "code");
    assert_eq!(outcome.status, AgentStatus::Operational);
    assert_eq!(outcome.content, "Use a HashMap.");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.ends_with("User: write a function to count words\n\nAssistant:"));
}

#[tokio::test]
async fn agent_mode_falls_back_to_profile_reply() {
    let server = MockServer::start().await;
    mount_failure(&server, LIGHT, 500).await;
    mount_failure(&server, HEAVY, 500).await;

    let config = config_for(&server, "");
    let dispatcher = AgentDispatcher::new(&config, backend(&config)).unwrap();
    let outcome = dispatcher.process("hello there", CustomerTier::Basic).await;

    assert_eq!(outcome.agent, "chat");
    assert_eq!(outcome.status, AgentStatus::FallbackActive);
    assert_eq!(outcome.model_used, FALLBACK_MODEL);
    assert!(!outcome.content.is_empty());
}
