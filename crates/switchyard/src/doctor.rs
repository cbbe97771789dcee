// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `switchyard doctor` command implementation.
//!
//! Runs diagnostic checks against the configuration and the inference
//! server to catch unreachable hosts and missing models before traffic does.

use std::io::IsTerminal;
use std::path::Path;
use std::time::{Duration, Instant};

use switchyard_config::SwitchyardConfig;
use switchyard_core::{GenerationBackend, HealthStatus, SwitchyardError};
use switchyard_ollama::OllamaBackend;
use switchyard_ollama::client::is_transport_error;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed successfully.
    Pass,
    /// Check passed with a warning.
    Warn,
    /// Check failed.
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check.
    pub name: String,
    /// Check status.
    pub status: CheckStatus,
    /// Human-readable message.
    pub message: String,
    /// Duration the check took.
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }
}

/// Run the `switchyard doctor` command.
///
/// With `--plain`, disables colored output.
pub async fn run_doctor(
    config: &SwitchyardConfig,
    config_path: Option<&Path>,
    plain: bool,
) -> Result<(), SwitchyardError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    let mut results = vec![check_config(config_path)];

    match OllamaBackend::new(config) {
        Ok(backend) => {
            let server = check_server(&backend, config).await;
            let reachable = server.status == CheckStatus::Pass;
            results.push(server);
            if reachable {
                results.push(check_models(&backend).await);
            }
        }
        Err(e) => results.push(CheckResult::new(
            "Inference server",
            CheckStatus::Fail,
            format!("client error: {e}"),
            Instant::now(),
        )),
    }

    println!();
    println!("  switchyard doctor");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    let mut warn_count = 0;
    for result in &results {
        match result.status {
            CheckStatus::Pass => {}
            CheckStatus::Warn => warn_count += 1,
            CheckStatus::Fail => fail_count += 1,
        }
        println!("{}", format_line(result, use_color));
    }

    println!();
    if fail_count > 0 || warn_count > 0 {
        let issues = fail_count + warn_count;
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();

    Ok(())
}

fn format_line(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();
    if use_color {
        use colored::Colorize;
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green().to_string(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow().to_string(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red().to_string(), result.message.red()),
        };
        format!(
            "    {symbol} {:<20} {message} ({duration_ms}ms)",
            result.name
        )
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!(
            "    {tag} {:<20} {} ({duration_ms}ms)",
            result.name, result.message
        )
    }
}

/// Check configuration loads without errors.
fn check_config(path: Option<&Path>) -> CheckResult {
    let start = Instant::now();
    let loaded = match path {
        Some(path) => switchyard_config::load_and_validate_path(path),
        None => switchyard_config::load_and_validate(),
    };
    match loaded {
        Ok(_) => CheckResult::new("Configuration", CheckStatus::Pass, "valid", start),
        Err(errors) => CheckResult::new(
            "Configuration",
            CheckStatus::Fail,
            format!("{} error(s)", errors.len()),
            start,
        ),
    }
}

/// Check the inference server answers a model listing.
async fn check_server(backend: &dyn GenerationBackend, config: &SwitchyardConfig) -> CheckResult {
    let start = Instant::now();
    match backend.available_models().await {
        Ok(models) => CheckResult::new(
            "Inference server",
            CheckStatus::Pass,
            format!("{} reachable, {} model(s) installed", config.ollama.base_url, models.len()),
            start,
        ),
        Err(SwitchyardError::Timeout { duration }) => CheckResult::new(
            "Inference server",
            CheckStatus::Fail,
            format!("timeout ({}s)", duration.as_secs()),
            start,
        ),
        Err(e) if is_transport_error(&e) => CheckResult::new(
            "Inference server",
            CheckStatus::Fail,
            format!("unreachable: {e}"),
            start,
        ),
        Err(e) => CheckResult::new(
            "Inference server",
            CheckStatus::Fail,
            format!("reachable but returned an error: {e}"),
            start,
        ),
    }
}

/// Check both configured models are installed.
async fn check_models(backend: &dyn GenerationBackend) -> CheckResult {
    let start = Instant::now();
    match backend.health_check().await {
        Ok(HealthStatus::Healthy) => {
            CheckResult::new("Models", CheckStatus::Pass, "lightweight and heavyweight installed", start)
        }
        Ok(HealthStatus::Degraded(reason)) => {
            CheckResult::new("Models", CheckStatus::Warn, reason, start)
        }
        Ok(HealthStatus::Unhealthy(reason)) => {
            CheckResult::new("Models", CheckStatus::Fail, reason, start)
        }
        Err(e) => CheckResult::new("Models", CheckStatus::Fail, e.to_string(), start),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchyard_test_utils::MockBackend;

    #[test]
    fn check_status_equality() {
        assert_eq!(CheckStatus::Pass, CheckStatus::Pass);
        assert_ne!(CheckStatus::Pass, CheckStatus::Fail);
    }

    #[test]
    fn plain_lines_use_bracket_tags() {
        let result = CheckResult {
            name: "Models".to_string(),
            status: CheckStatus::Warn,
            message: "missing: gpt-oss:20b".to_string(),
            duration: Duration::from_millis(12),
        };
        let line = format_line(&result, false);
        assert!(line.contains("[WARN]"));
        assert!(line.contains("missing: gpt-oss:20b"));
        assert!(line.contains("(12ms)"));
    }

    #[tokio::test]
    async fn server_check_passes_with_installed_models() {
        let backend = MockBackend::new();
        backend.set_installed(&["llama3.2:3b", "gpt-oss:20b"]).await;
        let result = check_server(&backend, &SwitchyardConfig::default()).await;
        assert_eq!(result.status, CheckStatus::Pass);
        assert!(result.message.contains("2 model(s)"));
    }

    #[tokio::test]
    async fn models_check_passes_when_healthy() {
        let backend = MockBackend::new();
        let result = check_models(&backend).await;
        assert_eq!(result.status, CheckStatus::Pass);
    }
}
