//! Run report types.
//!
//! The runner records one [`StepOutcome`] per step plus per-secret
//! verification probes. The report is what the CLI prints (human or JSON)
//! and the only source of the process exit code: warnings and probe
//! results never affect it, only fatal-step failures do.

use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::error::Error;

/// The six steps of the remediation sequence, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Load and validate the API keys from the env file
    LoadKeys,
    /// Push each key into its Secrets Manager entry
    UpdateSecrets,
    /// Attach the inline read policy to the execution role
    GrantReadAccess,
    /// Force a new deployment of the service
    Redeploy,
    /// Block until the service stabilizes
    WaitStable,
    /// Probe secret readability and tail service logs
    Verify,
}

impl StepKind {
    /// The full sequence, in order.
    pub const SEQUENCE: [StepKind; 6] = [
        StepKind::LoadKeys,
        StepKind::UpdateSecrets,
        StepKind::GrantReadAccess,
        StepKind::Redeploy,
        StepKind::WaitStable,
        StepKind::Verify,
    ];

    /// Human-readable step title.
    pub fn title(&self) -> &'static str {
        match self {
            StepKind::LoadKeys => "Load API keys",
            StepKind::UpdateSecrets => "Update secret values",
            StepKind::GrantReadAccess => "Grant execution role read access",
            StepKind::Redeploy => "Force new deployment",
            StepKind::WaitStable => "Wait for service stability",
            StepKind::Verify => "Verify secrets and tail logs",
        }
    }

    /// The step's declared failure policy.
    ///
    /// This classification is data, not control flow: the dispatcher
    /// consults it to decide whether a failed step aborts the run.
    pub fn policy(&self) -> FailurePolicy {
        match self {
            StepKind::LoadKeys | StepKind::UpdateSecrets | StepKind::Redeploy => {
                FailurePolicy::Fatal
            }
            StepKind::GrantReadAccess | StepKind::WaitStable => FailurePolicy::Warn,
            StepKind::Verify => FailurePolicy::Observe,
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// What a step failure does to the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Abort the run immediately
    Fatal,
    /// Log a warning and continue
    Warn,
    /// Report per-item results, never abort
    Observe,
}

/// Status of an executed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Step succeeded without remote changes
    Ok,
    /// Step succeeded and mutated remote state
    Changed,
    /// Check mode: step would have mutated remote state
    WouldChange,
    /// Step failed but the run continued
    Warning,
    /// Step failed and aborted the run
    Failed,
    /// Step was not executed
    Skipped,
}

impl StepStatus {
    /// Plain string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Ok => "ok",
            StepStatus::Changed => "changed",
            StepStatus::WouldChange => "would change",
            StepStatus::Warning => "warning",
            StepStatus::Failed => "failed",
            StepStatus::Skipped => "skipped",
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one executed step.
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    /// Which step
    pub step: StepKind,
    /// How it ended
    pub status: StepStatus,
    /// Human-readable detail line
    pub detail: String,
    /// Wall-clock duration of the step
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
}

impl StepOutcome {
    /// Outcome for a step skipped because an earlier step was fatal.
    pub fn skipped(step: StepKind, detail: impl Into<String>) -> Self {
        Self {
            step,
            status: StepStatus::Skipped,
            detail: detail.into(),
            duration: Duration::ZERO,
        }
    }
}

/// Per-secret verification result.
#[derive(Debug, Clone, Serialize)]
pub struct SecretProbe {
    /// The probed secret
    pub secret_id: String,
    /// Whether the value could be read
    pub accessible: bool,
    /// Detail line (version info or classified error)
    pub detail: String,
}

/// Fatal failure summary recorded when a fatal-policy step fails.
#[derive(Debug, Clone, Serialize)]
pub struct FatalFailure {
    /// The step that failed
    pub step: StepKind,
    /// Error message
    pub message: String,
    /// Exit code derived from the error
    pub exit_code: i32,
}

/// Full report of one runner invocation.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Whether the run was a dry run
    pub check_mode: bool,
    /// One outcome per step, in sequence order
    pub steps: Vec<StepOutcome>,
    /// Per-secret verification probes
    pub probes: Vec<SecretProbe>,
    /// The fatal failure, if the run aborted
    pub failure: Option<FatalFailure>,
}

impl RunReport {
    /// Create an empty report.
    pub fn new(check_mode: bool) -> Self {
        Self {
            check_mode,
            steps: Vec::new(),
            probes: Vec::new(),
            failure: None,
        }
    }

    /// Append a step outcome.
    pub fn push(&mut self, outcome: StepOutcome) {
        self.steps.push(outcome);
    }

    /// Record a fatal failure; the exit code comes from the error.
    pub fn record_fatal(&mut self, step: StepKind, error: &Error) {
        self.failure = Some(FatalFailure {
            step,
            message: error.to_string(),
            exit_code: error.exit_code(),
        });
    }

    /// Append a verification probe.
    pub fn push_probe(&mut self, probe: SecretProbe) {
        self.probes.push(probe);
    }

    /// Process exit code: zero unless a fatal-policy step failed.
    pub fn exit_code(&self) -> i32 {
        self.failure.as_ref().map_or(0, |f| f.exit_code)
    }

    /// Whether every fatal-policy step succeeded.
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }

    /// One-line recap in `status=count` form.
    pub fn recap(&self) -> String {
        let count = |status: StepStatus| self.steps.iter().filter(|o| o.status == status).count();
        format!(
            "ok={} changed={} warnings={} failed={} skipped={}",
            count(StepStatus::Ok) + count(StepStatus::WouldChange),
            count(StepStatus::Changed),
            count(StepStatus::Warning),
            count(StepStatus::Failed),
            count(StepStatus::Skipped),
        )
    }
}
