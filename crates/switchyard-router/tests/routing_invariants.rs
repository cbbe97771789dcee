// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for routing policy invariants.

use proptest::prelude::*;
use switchyard_config::model::{ModelsConfig, RoutingConfig};
use switchyard_core::{CustomerTier, ModelClass};
use switchyard_router::{ModelRouter, QueryClassifier, TaskComplexity, canned_response};

fn tier_strategy() -> impl Strategy<Value = CustomerTier> {
    prop_oneof![
        Just(CustomerTier::Basic),
        Just(CustomerTier::Premium),
        Just(CustomerTier::Enterprise),
    ]
}

fn prompt_strategy() -> impl Strategy<Value = String> {
    let words = prop::sample::select(vec![
        "hello", "what", "is", "database", "code", "design", "summary", "the", "weather",
        "/heavy", "/light", "list", "enterprise", "architecture", "codec", "this",
    ]);
    prop::collection::vec(words, 0..80).prop_map(|w| w.join(" "))
}

fn router(basic_allows_heavyweight: bool) -> ModelRouter {
    let routing = RoutingConfig {
        basic_allows_heavyweight,
        ..RoutingConfig::default()
    };
    ModelRouter::new(routing, ModelsConfig::default())
}

proptest! {
    #[test]
    fn enterprise_always_heavyweight(prompt in prompt_strategy(), allow in any::<bool>()) {
        let decision = router(allow).route(&prompt, CustomerTier::Enterprise);
        // "/light " overrides are the only way off the heavyweight model.
        if !decision.overridden {
            prop_assert_eq!(decision.class, ModelClass::Heavyweight);
        }
    }

    #[test]
    fn capped_basic_never_heavyweight(prompt in prompt_strategy()) {
        let decision = router(false).route(&prompt, CustomerTier::Basic);
        prop_assert_eq!(decision.class, ModelClass::Lightweight);
        prop_assert_eq!(decision.model.as_str(), "llama3.2:3b");
    }

    #[test]
    fn alternate_is_other_class(prompt in prompt_strategy(), tier in tier_strategy()) {
        let decision = router(true).route(&prompt, tier);
        prop_assert_ne!(&decision.model, &decision.alternate_model);
    }

    #[test]
    fn heavy_grades_go_heavyweight_for_premium(prompt in prompt_strategy()) {
        let decision = router(true).route(&prompt, CustomerTier::Premium);
        if !decision.overridden {
            let heavy = matches!(
                decision.complexity,
                TaskComplexity::Complex | TaskComplexity::Critical
            );
            prop_assert_eq!(decision.class == ModelClass::Heavyweight, heavy);
        }
    }

    #[test]
    fn classifier_never_panics(prompt in ".*") {
        let _ = QueryClassifier::new().classify(&prompt);
    }

    #[test]
    fn canned_response_never_empty(prompt in ".*") {
        prop_assert!(!canned_response(&prompt).is_empty());
    }
}
