// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic prompt complexity classification.
//!
//! Grades prompts as simple/medium/complex/critical using keyword lists and
//! prompt length. No model pre-call, no network, no latency.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Prompt complexity grades, lowest to highest.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TaskComplexity {
    /// Greetings, definitions, short how-to questions.
    Simple,
    /// Anything without a strong signal either way.
    Medium,
    /// Analysis, design, code, or long prompts.
    Complex,
    /// Production-grade engineering or business work.
    Critical,
}

/// Result of classifying a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    /// The assigned grade.
    pub complexity: TaskComplexity,
    /// The keyword or phrase that decided the grade, if any.
    pub matched: Option<&'static str>,
    /// Number of whitespace-separated words in the prompt.
    pub word_count: usize,
    /// Human-readable reason for the grade.
    pub reason: &'static str,
}

/// Phrases that always require the heavyweight model's depth.
pub const CRITICAL_KEYWORDS: &[&str] = &[
    "create python class",
    "build api",
    "fastapi",
    "database",
    "architecture",
    "system design",
    "integration",
    "enterprise",
    "production code",
    "business strategy",
    "market analysis",
];

/// Words that indicate analytical or engineering work.
pub const COMPLEX_KEYWORDS: &[&str] = &[
    "analyze",
    "design",
    "develop",
    "implement",
    "algorithm",
    "optimization",
    "framework",
    "code",
    "complex",
    "technical",
    "strategy",
    "detailed",
];

/// Words that indicate a short, factual request.
pub const SIMPLE_KEYWORDS: &[&str] = &[
    "hello", "hi", "what is", "how to", "explain", "summary", "quick", "simple", "basic",
    "list",
];

/// Heuristic prompt classifier.
#[derive(Debug, Clone)]
pub struct QueryClassifier {
    /// Prompts with more words than this are graded complex.
    long_prompt_words: usize,
}

impl QueryClassifier {
    /// Create a classifier with the default long-prompt threshold (50 words).
    pub fn new() -> Self {
        Self {
            long_prompt_words: 50,
        }
    }

    /// Create a classifier with a custom long-prompt threshold.
    pub fn with_long_prompt_words(long_prompt_words: usize) -> Self {
        Self { long_prompt_words }
    }

    /// Classify a prompt's complexity.
    ///
    /// Signals are checked in priority order: critical keywords, complex
    /// keywords, prompt length, simple keywords. The first hit decides.
    pub fn classify(&self, prompt: &str) -> ClassificationResult {
        let word_count = prompt.split_whitespace().count();
        let words = tokenize(prompt);

        if words.is_empty() {
            return ClassificationResult {
                complexity: TaskComplexity::Simple,
                matched: None,
                word_count,
                reason: "empty prompt",
            };
        }

        if let Some(kw) = first_match(&words, CRITICAL_KEYWORDS) {
            return ClassificationResult {
                complexity: TaskComplexity::Critical,
                matched: Some(kw),
                word_count,
                reason: "critical keyword",
            };
        }

        if let Some(kw) = first_match(&words, COMPLEX_KEYWORDS) {
            return ClassificationResult {
                complexity: TaskComplexity::Complex,
                matched: Some(kw),
                word_count,
                reason: "complex keyword",
            };
        }

        if word_count > self.long_prompt_words {
            return ClassificationResult {
                complexity: TaskComplexity::Complex,
                matched: None,
                word_count,
                reason: "long prompt",
            };
        }

        if let Some(kw) = first_match(&words, SIMPLE_KEYWORDS) {
            return ClassificationResult {
                complexity: TaskComplexity::Simple,
                matched: Some(kw),
                word_count,
                reason: "simple keyword",
            };
        }

        ClassificationResult {
            complexity: TaskComplexity::Medium,
            matched: None,
            word_count,
            reason: "no strong signal",
        }
    }
}

impl Default for QueryClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Lower-case the text and split it into alphanumeric words.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Whether `phrase` occurs in `words` as a run of whole words.
pub(crate) fn contains_phrase(words: &[String], phrase: &str) -> bool {
    let needle: Vec<String> = tokenize(phrase);
    if needle.is_empty() || needle.len() > words.len() {
        return false;
    }
    words.windows(needle.len()).any(|window| window == needle.as_slice())
}

/// First keyword from `keywords` present in `words`, in list order.
pub(crate) fn first_match<'k>(words: &[String], keywords: &[&'k str]) -> Option<&'k str> {
    keywords
        .iter()
        .copied()
        .find(|kw| contains_phrase(words, kw))
}
