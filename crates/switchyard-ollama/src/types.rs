// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama `/api/generate` and `/api/tags` wire types.

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/generate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    /// Always `false`; the full completion is returned in one body.
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<GenerateOptions>,
}

/// Sampling options. Unset fields are left to the server.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

impl GenerateOptions {
    /// `None` when neither option is set, so the field is omitted entirely.
    pub fn from_parts(temperature: Option<f32>, top_p: Option<f32>) -> Option<Self> {
        if temperature.is_none() && top_p.is_none() {
            None
        } else {
            Some(Self { temperature, top_p })
        }
    }
}

/// Response body of a non-streaming `/api/generate` call.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub model: String,
    pub response: String,
    #[serde(default)]
    pub done: bool,
    /// Server-side generation time in nanoseconds.
    #[serde(default)]
    pub total_duration: Option<u64>,
    #[serde(default)]
    pub eval_count: Option<u32>,
}

/// Response body of `GET /api/tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

/// One locally installed model.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelTag {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
}

/// Error body returned by the server on non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_unset_options() {
        let req = GenerateRequest {
            model: "llama3.2:3b".into(),
            prompt: "hi".into(),
            stream: false,
            options: GenerateOptions::from_parts(None, None),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"model": "llama3.2:3b", "prompt": "hi", "stream": false})
        );
    }

    #[test]
    fn request_serializes_partial_options() {
        let req = GenerateRequest {
            model: "gpt-oss:20b".into(),
            prompt: "hi".into(),
            stream: false,
            options: GenerateOptions::from_parts(Some(0.5), None),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["options"], serde_json::json!({"temperature": 0.5}));
    }

    #[test]
    fn response_tolerates_missing_metadata() {
        let resp: GenerateResponse = serde_json::from_str(r#"{"response": "ok"}"#).unwrap();
        assert_eq!(resp.response, "ok");
        assert!(!resp.done);
        assert!(resp.total_duration.is_none());
    }

    #[test]
    fn tags_parse_model_names() {
        let tags: TagsResponse = serde_json::from_str(
            r#"{"models": [{"name": "llama3.2:3b", "size": 2019393189}, {"name": "gpt-oss:20b"}]}"#,
        )
        .unwrap();
        let names: Vec<_> = tags.models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["llama3.2:3b", "gpt-oss:20b"]);
    }
}
