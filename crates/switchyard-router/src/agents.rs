// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Agent profiles for agent-mode dispatch.
//!
//! A profile bundles a system prompt, a preferred model class, trigger
//! keywords and a canned reply. Profiles are checked in order and the first
//! one whose keywords appear in the prompt handles it.

use switchyard_config::model::AgentProfileConfig;
use switchyard_core::{CustomerTier, ModelClass, SwitchyardError};

use crate::classifier::{contains_phrase, tokenize};
use crate::fallback::DEFAULT_REPLY;

/// Name of the built-in catch-all profile.
pub const DEFAULT_AGENT: &str = "chat";

/// A resolved agent profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentProfile {
    pub name: String,
    pub system_prompt: String,
    /// Preferred class for premium and enterprise tiers.
    pub model_class: ModelClass,
    pub keywords: Vec<String>,
    /// Reply used when the model call fails.
    pub fallback: String,
}

impl AgentProfile {
    fn builtin(
        name: &str,
        system_prompt: &str,
        model_class: ModelClass,
        keywords: &[&str],
        fallback: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            system_prompt: system_prompt.to_string(),
            model_class,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            fallback: fallback.to_string(),
        }
    }

    /// Whether any trigger keyword appears in the tokenized prompt.
    fn matches(&self, words: &[String]) -> bool {
        self.keywords.iter().any(|kw| contains_phrase(words, kw))
    }

    /// Frame a user prompt with this profile's system prompt.
    pub fn enhance(&self, prompt: &str) -> String {
        format!("{}\n\nUser: {}\n\nAssistant:", self.system_prompt, prompt)
    }
}

impl From<&AgentProfileConfig> for AgentProfile {
    fn from(config: &AgentProfileConfig) -> Self {
        Self {
            name: config.name.clone(),
            system_prompt: config.system_prompt.clone(),
            model_class: config.model_class,
            keywords: config.keywords.clone(),
            fallback: config
                .fallback
                .clone()
                .unwrap_or_else(|| DEFAULT_REPLY.to_string()),
        }
    }
}

/// Ordered set of agent profiles with a catch-all default.
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    profiles: Vec<AgentProfile>,
    default_index: usize,
}

impl AgentRegistry {
    /// The built-in profiles: code, business, technical, then catch-all chat.
    pub fn builtin() -> Self {
        let profiles = vec![
            AgentProfile::builtin(
                "code",
                "You are a professional code generator.",
                ModelClass::Heavyweight,
                &["code", "function", "python", "javascript", "programming"],
                "Here's a code template:\n\n```python\n# Your solution here\ndef main():\n    pass\n```",
            ),
            AgentProfile::builtin(
                "business",
                "You are a business strategy expert.",
                ModelClass::Heavyweight,
                &["business", "revenue", "strategy", "market", "profit"],
                "Focus on customer value and operational efficiency to grow revenue sustainably.",
            ),
            AgentProfile::builtin(
                "technical",
                "You are a technical architect.",
                ModelClass::Heavyweight,
                &["architecture", "system", "technical", "infrastructure"],
                "Prioritize scalability, security, and maintainability in your architecture.",
            ),
            AgentProfile::builtin(
                DEFAULT_AGENT,
                "You are a helpful chat assistant.",
                ModelClass::Lightweight,
                &[],
                "Thanks for your message. How can I help you today?",
            ),
        ];
        let default_index = profiles.len() - 1;
        Self {
            profiles,
            default_index,
        }
    }

    /// Build a registry from `[[agents]]` entries.
    ///
    /// An empty list yields the built-in profiles. Otherwise `default_agent`
    /// must name one of the entries.
    pub fn from_config(
        agents: &[AgentProfileConfig],
        default_agent: &str,
    ) -> Result<Self, SwitchyardError> {
        if agents.is_empty() {
            return Ok(Self::builtin());
        }
        let profiles: Vec<AgentProfile> = agents.iter().map(AgentProfile::from).collect();
        let default_index = profiles
            .iter()
            .position(|p| p.name == default_agent)
            .ok_or_else(|| {
                SwitchyardError::Config(format!(
                    "default agent `{default_agent}` is not a configured profile"
                ))
            })?;
        Ok(Self {
            profiles,
            default_index,
        })
    }

    /// All profiles in match order.
    pub fn profiles(&self) -> &[AgentProfile] {
        &self.profiles
    }

    /// The catch-all profile.
    pub fn default_profile(&self) -> &AgentProfile {
        &self.profiles[self.default_index]
    }

    /// Look up a profile by name.
    pub fn get(&self, name: &str) -> Option<&AgentProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// First profile whose keywords appear in the prompt, else the default.
    pub fn classify(&self, prompt: &str) -> &AgentProfile {
        let words = tokenize(prompt);
        self.profiles
            .iter()
            .find(|p| p.matches(&words))
            .unwrap_or_else(|| self.default_profile())
    }

    /// Model class a profile runs on for a tier. Basic tier always gets lightweight.
    pub fn class_for_tier(profile: &AgentProfile, tier: CustomerTier) -> ModelClass {
        match tier {
            CustomerTier::Basic => ModelClass::Lightweight,
            CustomerTier::Premium | CustomerTier::Enterprise => profile.model_class,
        }
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
