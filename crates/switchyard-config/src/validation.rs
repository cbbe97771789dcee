// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as URL schemes, non-zero timeouts, and sampling ranges.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::SwitchyardConfig;

/// Accepted values for `service.log_level`.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &SwitchyardConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if !LOG_LEVELS.contains(&config.service.log_level.as_str()) {
        fail(format!(
            "service.log_level `{}` must be one of: {}",
            config.service.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    let base_url = config.ollama.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        fail(format!(
            "ollama.base_url `{base_url}` must start with http:// or https://"
        ));
    }

    if config.ollama.request_timeout_secs == 0 {
        fail("ollama.request_timeout_secs must be greater than 0".to_string());
    }

    if config.ollama.connect_timeout_secs == 0 {
        fail("ollama.connect_timeout_secs must be greater than 0".to_string());
    }

    if config.ollama.max_retries == 0 {
        fail("ollama.max_retries must be at least 1".to_string());
    }

    if let Some(t) = config.ollama.temperature {
        if !(0.0..=2.0).contains(&t) {
            fail(format!("ollama.temperature must be within 0.0..=2.0, got {t}"));
        }
    }

    if let Some(p) = config.ollama.top_p {
        if !(0.0..=1.0).contains(&p) {
            fail(format!("ollama.top_p must be within 0.0..=1.0, got {p}"));
        }
    }

    if config.models.lightweight.trim().is_empty() {
        fail("models.lightweight must not be empty".to_string());
    }

    if config.models.heavyweight.trim().is_empty() {
        fail("models.heavyweight must not be empty".to_string());
    }

    if config.routing.long_prompt_words == 0 {
        fail("routing.long_prompt_words must be at least 1".to_string());
    }

    if config.resilience.failure_threshold == 0 {
        fail("resilience.failure_threshold must be at least 1".to_string());
    }

    if config.cleaner.empty_placeholder.trim().is_empty() {
        fail("cleaner.empty_placeholder must not be empty".to_string());
    }

    // Agent profiles: unique non-empty names, and the default must exist.
    let mut seen_names = HashSet::new();
    for (i, agent) in config.agents.iter().enumerate() {
        if agent.name.trim().is_empty() {
            fail(format!("agents[{i}].name must not be empty"));
        } else if !seen_names.insert(agent.name.as_str()) {
            fail(format!(
                "duplicate agent name `{}` in [[agents]] array",
                agent.name
            ));
        }
    }

    if !config.agents.is_empty() && !seen_names.contains(config.routing.default_agent.as_str()) {
        fail(format!(
            "routing.default_agent `{}` does not name any [[agents]] entry",
            config.routing.default_agent
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AgentProfileConfig;
    use switchyard_core::ModelClass;

    fn profile(name: &str) -> AgentProfileConfig {
        AgentProfileConfig {
            name: name.to_string(),
            system_prompt: "You help.".to_string(),
            model_class: ModelClass::Heavyweight,
            keywords: vec![],
            fallback: None,
        }
    }

    fn has_error(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        let config = SwitchyardConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn non_http_base_url_fails_validation() {
        let mut config = SwitchyardConfig::default();
        config.ollama.base_url = "localhost:11434".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "ollama.base_url"));
    }

    #[test]
    fn zero_retries_and_threshold_fail_together() {
        let mut config = SwitchyardConfig::default();
        config.ollama.max_retries = 0;
        config.resilience.failure_threshold = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(has_error(&errors, "max_retries"));
        assert!(has_error(&errors, "failure_threshold"));
    }

    #[test]
    fn out_of_range_sampling_fails_validation() {
        let mut config = SwitchyardConfig::default();
        config.ollama.temperature = Some(3.5);
        config.ollama.top_p = Some(-0.1);
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "temperature"));
        assert!(has_error(&errors, "top_p"));
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = SwitchyardConfig::default();
        config.service.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "service.log_level"));
    }

    #[test]
    fn empty_model_name_fails_validation() {
        let mut config = SwitchyardConfig::default();
        config.models.heavyweight = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "models.heavyweight"));
    }

    #[test]
    fn duplicate_agent_names_fails_validation() {
        let mut config = SwitchyardConfig::default();
        config.agents = vec![profile("chat"), profile("chat")];
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "duplicate agent name"));
    }

    #[test]
    fn default_agent_must_exist_when_agents_configured() {
        let mut config = SwitchyardConfig::default();
        config.agents = vec![profile("support")];
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "routing.default_agent"));

        config.routing.default_agent = "support".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn agents_array_deserializes_correctly() {
        let toml_str = r#"
[routing]
default_agent = "general"

[[agents]]
name = "sql"
system_prompt = "You write SQL."
model_class = "heavyweight"
keywords = ["sql", "query"]
fallback = "SELECT 1;"

[[agents]]
name = "general"
system_prompt = "You are helpful."
model_class = "lightweight"
"#;
        let config: SwitchyardConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.agents.len(), 2);
        assert_eq!(config.agents[0].keywords, vec!["sql", "query"]);
        assert_eq!(config.agents[0].fallback.as_deref(), Some("SELECT 1;"));
        assert_eq!(config.agents[1].model_class, ModelClass::Lightweight);
        assert!(config.agents[1].keywords.is_empty());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn agents_deny_unknown_fields() {
        let toml_str = r#"
[[agents]]
name = "sql"
system_prompt = "You write SQL."
temperature = 0.1
"#;
        assert!(toml::from_str::<SwitchyardConfig>(toml_str).is_err());
    }
}
