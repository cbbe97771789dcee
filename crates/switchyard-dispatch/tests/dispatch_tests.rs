// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end dispatch tests against the scripted mock backend.

use std::sync::Arc;

use switchyard_config::{SwitchyardConfig, load_config_from_str};
use switchyard_core::CustomerTier;
use switchyard_dispatch::{AgentDispatcher, AgentStatus, ModelStats, Stage, TieredGenerator};
use switchyard_test_utils::MockBackend;

const LIGHT: &str = "llama3.2:3b";
const HEAVY: &str = "gpt-oss:20b";

#[tokio::test]
async fn shared_stats_track_both_dispatch_modes() {
    let config = SwitchyardConfig::default();
    let backend = MockBackend::new();
    let stats = Arc::new(ModelStats::new(config.models.clone()));

    let generator =
        TieredGenerator::new(&config, Arc::new(backend.clone())).with_stats(stats.clone());
    let agents = AgentDispatcher::new(&config, Arc::new(backend.clone()))
        .unwrap()
        .with_stats(stats.clone());

    generator.generate("hello", CustomerTier::Basic).await.unwrap();
    generator
        .generate("analyze the quarterly numbers", CustomerTier::Premium)
        .await
        .unwrap();
    agents.process("hi there", CustomerTier::Premium).await;

    let report = stats.report();
    assert_eq!(report.total_requests, 3);
    assert_eq!(report.classes[0].requests, 2);
    assert_eq!(report.classes[1].requests, 1);
    assert_eq!(report.fallback_count, 0);
}

#[tokio::test]
async fn replies_are_never_empty_with_canned_fallback() {
    let config = SwitchyardConfig::default();
    let backend = MockBackend::new();
    backend.push_reply(LIGHT, "").await;
    backend.push_reply(LIGHT, "I hope this helps!").await;
    let generator = TieredGenerator::new(&config, Arc::new(backend.clone()));

    for _ in 0..2 {
        let outcome = generator.generate("hi", CustomerTier::Basic).await.unwrap();
        assert_eq!(outcome.content, "Completed.");
    }

    backend.fail_model(LIGHT).await;
    backend.fail_model(HEAVY).await;
    let outcome = generator.generate("hi", CustomerTier::Basic).await.unwrap();
    assert_eq!(outcome.stage, Stage::Fallback);
    assert!(!outcome.content.is_empty());
}

#[tokio::test]
async fn config_from_toml_drives_dispatch() {
    let config = load_config_from_str(
        r#"
[models]
lightweight = "phi3:mini"
heavyweight = "llama3.1:70b"

[routing]
basic_allows_heavyweight = false

[cleaner]
enabled = false

[[agents]]
name = "chat"
system_prompt = "Be brief."
model_class = "heavyweight"
"#,
    )
    .unwrap();
    let backend = MockBackend::new();
    backend.push_reply("phi3:mini", "I hope you like it. Sure.").await;

    let generator = TieredGenerator::new(&config, Arc::new(backend.clone()));
    let outcome = generator
        .generate("implement an enterprise integration", CustomerTier::Basic)
        .await
        .unwrap();
    assert_eq!(outcome.model_used, "phi3:mini");
    assert_eq!(outcome.content, "I hope you like it. Sure.");

    let agents = AgentDispatcher::new(&config, Arc::new(backend.clone())).unwrap();
    let outcome = agents.process("anything", CustomerTier::Enterprise).await;
    assert_eq!(outcome.agent, "chat");
    assert_eq!(outcome.model_used, "llama3.1:70b");
    assert_eq!(outcome.status, AgentStatus::Operational);
    assert_eq!(
        backend.calls().await.last().unwrap().1,
        "Be brief.\n\nUser: anything\n\nAssistant:"
    );
}
