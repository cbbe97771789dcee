// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Switchyard model router.
//!
//! This crate provides the error type, the tier and model-class enums, and
//! the [`GenerationBackend`] trait that every inference backend implements.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SwitchyardError;
pub use traits::GenerationBackend;
pub use types::{Completion, CustomerTier, HealthStatus, ModelClass};

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn customer_tier_parses_case_insensitively() {
        assert_eq!(CustomerTier::from_str("basic").unwrap(), CustomerTier::Basic);
        assert_eq!(CustomerTier::from_str("Premium").unwrap(), CustomerTier::Premium);
        assert_eq!(
            CustomerTier::from_str("ENTERPRISE").unwrap(),
            CustomerTier::Enterprise
        );
        assert!(CustomerTier::from_str("gold").is_err());
    }

    #[test]
    fn customer_tier_defaults_to_basic() {
        assert_eq!(CustomerTier::default(), CustomerTier::Basic);
    }

    #[test]
    fn tier_and_class_display_lowercase() {
        assert_eq!(CustomerTier::Enterprise.to_string(), "enterprise");
        assert_eq!(ModelClass::Lightweight.to_string(), "lightweight");
        assert_eq!(ModelClass::Heavyweight.to_string(), "heavyweight");
    }

    #[test]
    fn model_class_other_flips() {
        assert_eq!(ModelClass::Lightweight.other(), ModelClass::Heavyweight);
        assert_eq!(ModelClass::Heavyweight.other(), ModelClass::Lightweight);
        assert_eq!(ModelClass::Heavyweight.other().other(), ModelClass::Heavyweight);
    }

    #[test]
    fn model_class_serializes_lowercase() {
        let json = serde_json::to_string(&ModelClass::Heavyweight).unwrap();
        assert_eq!(json, "\"heavyweight\"");
        let parsed: CustomerTier = serde_json::from_str("\"premium\"").unwrap();
        assert_eq!(parsed, CustomerTier::Premium);
    }

    #[test]
    fn retryable_classification() {
        assert!(SwitchyardError::backend("connection refused", true).is_retryable());
        assert!(!SwitchyardError::backend("model not found", false).is_retryable());
        assert!(
            SwitchyardError::Timeout {
                duration: std::time::Duration::from_secs(1)
            }
            .is_retryable()
        );
        assert!(
            !SwitchyardError::CircuitOpen {
                model: "llama3.2:3b".into()
            }
            .is_retryable()
        );
    }

    #[test]
    fn unavailable_lists_attempted_models() {
        let err = SwitchyardError::Unavailable {
            attempted: vec!["llama3.2:3b".into(), "gpt-oss:20b".into()],
        };
        assert_eq!(
            err.to_string(),
            "all models unavailable (tried: llama3.2:3b, gpt-oss:20b)"
        );
    }

    #[test]
    fn backend_trait_is_object_safe() {
        fn _assert_dyn(_: &dyn GenerationBackend) {}
    }
}
