// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filler-sentence removal for model output.

use std::sync::LazyLock;

use regex::Regex;
use switchyard_config::model::CleanerConfig;

/// Conversational filler, each matched up to the next `.` or `!`.
static FILLER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)I understand.*?[.!]",
        r"(?i)I'm sorry.*?[.!]",
        r"(?i)I hope.*?[.!]",
        r"(?i)Please let me know.*?[.!]",
        r"(?i)Thank you.*?[.!]",
        r"(?i)I appreciate.*?[.!]",
        r"(?i)I'm happy.*?[.!]",
        r"(?i)I'd be glad.*?[.!]",
        r"(?i)Feel free.*?[.!]",
        r"(?i)Don't hesitate.*?[.!]",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strips filler sentences and normalizes whitespace.
#[derive(Debug, Clone)]
pub struct ResponseCleaner {
    enabled: bool,
    empty_placeholder: String,
}

impl ResponseCleaner {
    pub fn new(config: &CleanerConfig) -> Self {
        Self {
            enabled: config.enabled,
            empty_placeholder: config.empty_placeholder.clone(),
        }
    }

    /// Clean a model response. Never returns an empty string.
    ///
    /// When disabled the text passes through untouched unless it is blank.
    pub fn clean(&self, response: &str) -> String {
        if !self.enabled {
            return if response.trim().is_empty() {
                self.empty_placeholder.clone()
            } else {
                response.to_string()
            };
        }

        let mut cleaned = response.to_string();
        for pattern in FILLER_PATTERNS.iter() {
            cleaned = pattern.replace_all(&cleaned, "").into_owned();
        }
        let cleaned = WHITESPACE.replace_all(&cleaned, " ").trim().to_string();

        if cleaned.is_empty() {
            self.empty_placeholder.clone()
        } else {
            cleaned
        }
    }
}

impl Default for ResponseCleaner {
    fn default() -> Self {
        Self::new(&CleanerConfig::default())
    }
}
