//! Client for the remote code-execution sandbox.
//!
//! The sandbox runs one (language, source, stdin) triple per call and
//! reports stdout/stderr/exit code. Validation, transport and runtime
//! failures are all folded into [`ExecutionOutcome`]; this client never
//! returns `Err` to its caller, so one broken test case can never abort
//! a grading loop.

use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Per-run execution timeout enforced by the sandbox, in milliseconds.
pub const RUN_TIMEOUT_MS: u64 = 10_000;

const DEFAULT_BASE_URL: &str = "https://emkc.org/api/v2/piston";

/// Uniform result shape for one sandbox run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub success: bool,
    /// Trimmed stdout of the run; empty when execution never happened.
    pub output: String,
    /// Error detail: validation message, transport message, or captured
    /// stderr for runtime failures. Empty on success.
    pub error: String,
}

impl ExecutionOutcome {
    #[must_use]
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            error: String::new(),
        }
    }

    #[must_use]
    pub fn failed(output: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            output: output.into(),
            error: error.into(),
        }
    }
}

/// Something that can run untrusted code against stdin.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run `code` in `language` feeding it `stdin`.
    ///
    /// Infallible by contract: every failure is reported inside the
    /// returned outcome.
    async fn execute(&self, language: &str, code: &str, stdin: &str) -> ExecutionOutcome;
}

/// Pinned sandbox runtime version for a logical language identifier.
///
/// Unknown languages fall back to the wildcard version and let the sandbox
/// pick whatever it has installed.
#[must_use]
pub fn runtime_version(language: &str) -> &'static str {
    match language.to_ascii_lowercase().as_str() {
        "python" => "3.10.0",
        "javascript" => "18.15.0",
        "typescript" => "5.0.3",
        "java" => "15.0.2",
        "c" => "10.2.0",
        "cpp" | "c++" => "10.2.0",
        "csharp" | "c#" => "6.12.0",
        "go" => "1.16.2",
        "rust" => "1.68.2",
        "ruby" => "3.0.1",
        _ => "*",
    }
}

#[derive(Clone, Debug)]
pub struct SandboxConfig {
    pub base_url: String,
}

impl SandboxConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            env::var("ASSESS_SANDBOX_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self { base_url }
    }
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
        }
    }
}

/// HTTP client for the sandbox execution collaborator.
#[derive(Clone)]
pub struct SandboxClient {
    client: Client,
    config: SandboxConfig,
}

impl SandboxClient {
    #[must_use]
    pub fn new(config: SandboxConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(SandboxConfig::from_env())
    }

    async fn dispatch(&self, language: &str, code: &str, stdin: &str) -> ExecutionOutcome {
        let url = format!("{}/execute", self.config.base_url.trim_end_matches('/'));
        let payload = ExecuteRequest {
            language,
            version: runtime_version(language),
            files: vec![FilePayload { content: code }],
            stdin,
            run_timeout: RUN_TIMEOUT_MS,
        };

        let response = match self.client.post(url).json(&payload).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(language, error = %e, "sandbox request failed");
                return ExecutionOutcome::failed("", e.to_string());
            }
        };

        let status = response.status();
        if status == reqwest::StatusCode::BAD_REQUEST {
            return ExecutionOutcome::failed("", "Invalid code or input format");
        }
        if !status.is_success() {
            return ExecutionOutcome::failed("", format!("Execution service error: {status}"));
        }

        let body: ExecuteResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(language, error = %e, "sandbox response unreadable");
                return ExecutionOutcome::failed("", e.to_string());
            }
        };

        interpret_run(&body.run)
    }
}

/// Apply the runtime-failure rule to a sandbox run report.
///
/// A run counts as failed only when stderr is non-empty *and* the exit
/// code is non-zero; warnings on stderr from a clean exit are ignored.
fn interpret_run(run: &RunReport) -> ExecutionOutcome {
    let exit_code = run.code.unwrap_or(-1);
    if !run.stderr.is_empty() && exit_code != 0 {
        ExecutionOutcome::failed(run.stdout.trim(), run.stderr.clone())
    } else {
        ExecutionOutcome::ok(run.stdout.trim())
    }
}

#[async_trait]
impl Executor for SandboxClient {
    async fn execute(&self, language: &str, code: &str, stdin: &str) -> ExecutionOutcome {
        if language.trim().is_empty() || code.trim().is_empty() {
            return ExecutionOutcome::failed("", "Language and code are required");
        }
        self.dispatch(language, code, stdin).await
    }
}

#[derive(Debug, Serialize)]
struct ExecuteRequest<'a> {
    language: &'a str,
    version: &'a str,
    files: Vec<FilePayload<'a>>,
    stdin: &'a str,
    run_timeout: u64,
}

#[derive(Debug, Serialize)]
struct FilePayload<'a> {
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExecuteResponse {
    run: RunReport,
}

#[derive(Debug, Deserialize)]
struct RunReport {
    #[serde(default)]
    stdout: String,
    #[serde(default)]
    stderr: String,
    /// Exit code; null when the process was killed by a signal.
    #[serde(default)]
    code: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_languages_have_pinned_versions() {
        assert_eq!(runtime_version("python"), "3.10.0");
        assert_eq!(runtime_version("PYTHON"), "3.10.0");
        assert_eq!(runtime_version("c++"), "10.2.0");
    }

    #[test]
    fn unknown_language_falls_back_to_wildcard() {
        assert_eq!(runtime_version("brainfudge"), "*");
    }

    #[test]
    fn clean_exit_ignores_stderr_warnings() {
        let run = RunReport {
            stdout: "42\n".into(),
            stderr: "DeprecationWarning: ...".into(),
            code: Some(0),
        };
        let outcome = interpret_run(&run);
        assert!(outcome.success);
        assert_eq!(outcome.output, "42");
        assert!(outcome.error.is_empty());
    }

    #[test]
    fn nonzero_exit_with_stderr_is_runtime_failure() {
        let run = RunReport {
            stdout: "partial".into(),
            stderr: "Traceback (most recent call last): ...".into(),
            code: Some(1),
        };
        let outcome = interpret_run(&run);
        assert!(!outcome.success);
        assert_eq!(outcome.output, "partial");
        assert!(outcome.error.starts_with("Traceback"));
    }

    #[test]
    fn signal_killed_run_with_stderr_is_failure() {
        let run = RunReport {
            stdout: String::new(),
            stderr: "killed".into(),
            code: None,
        };
        assert!(!interpret_run(&run).success);
    }

    #[test]
    fn execute_request_wire_shape() {
        let payload = ExecuteRequest {
            language: "python",
            version: runtime_version("python"),
            files: vec![FilePayload { content: "print(1)" }],
            stdin: "1 2",
            run_timeout: RUN_TIMEOUT_MS,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["language"], "python");
        assert_eq!(value["version"], "3.10.0");
        assert_eq!(value["files"][0]["content"], "print(1)");
        assert_eq!(value["stdin"], "1 2");
        assert_eq!(value["run_timeout"], 10_000);
    }

    #[test]
    fn run_report_tolerates_missing_fields() {
        let body: ExecuteResponse = serde_json::from_str(r#"{"run":{"stdout":"hi"}}"#).unwrap();
        assert_eq!(body.run.stdout, "hi");
        assert!(body.run.stderr.is_empty());
        assert_eq!(body.run.code, None);
    }

    #[tokio::test]
    async fn empty_language_or_code_rejected_without_dispatch() {
        // Unroutable base URL: a dispatch would fail, a validation reject
        // returns the fixed message.
        let client = SandboxClient::new(SandboxConfig {
            base_url: "http://127.0.0.1:0".into(),
        });
        let outcome = client.execute("", "print(1)", "").await;
        assert!(!outcome.success);
        assert_eq!(outcome.error, "Language and code are required");

        let outcome = client.execute("python", "   ", "").await;
        assert_eq!(outcome.error, "Language and code are required");
    }
}
