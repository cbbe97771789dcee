// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned replies used when no model produced an answer.

use strum::Display;

use crate::classifier::{first_match, tokenize};

/// Topic of a canned reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FallbackTopic {
    Code,
    Business,
    Technical,
    Default,
}

const CODE_WORDS: &[&str] = &["code", "python", "javascript", "function"];
const BUSINESS_WORDS: &[&str] = &["business", "revenue", "profit", "strategy"];
const TECHNICAL_WORDS: &[&str] = &["technical", "architecture", "system", "design"];

const CODE_REPLY: &str = "I can help you with coding. Here's a basic structure:\n\n\
```python\n# Your code here\ndef solution():\n    pass\n```";
const BUSINESS_REPLY: &str = "Based on current market trends, focus on acquisition and \
retention, then optimize pricing and margins.";
const TECHNICAL_REPLY: &str = "This requires technical analysis. Start from the constraints, \
then work through scalability, security, and maintainability.";

/// Generic reply used when nothing more specific applies.
pub const DEFAULT_REPLY: &str = "The models are busy right now. Here is a short answer: \
please retry in a moment for a full response.";

/// Pick the canned-reply topic for a prompt (first matching topic wins).
pub fn fallback_topic(prompt: &str) -> FallbackTopic {
    let words = tokenize(prompt);
    if first_match(&words, CODE_WORDS).is_some() {
        FallbackTopic::Code
    } else if first_match(&words, BUSINESS_WORDS).is_some() {
        FallbackTopic::Business
    } else if first_match(&words, TECHNICAL_WORDS).is_some() {
        FallbackTopic::Technical
    } else {
        FallbackTopic::Default
    }
}

/// Canned reply for a prompt. Never empty.
pub fn canned_response(prompt: &str) -> &'static str {
    match fallback_topic(prompt) {
        FallbackTopic::Code => CODE_REPLY,
        FallbackTopic::Business => BUSINESS_REPLY,
        FallbackTopic::Technical => TECHNICAL_REPLY,
        FallbackTopic::Default => DEFAULT_REPLY,
    }
}
