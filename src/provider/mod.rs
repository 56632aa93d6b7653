//! Cloud provider boundary.
//!
//! Every remote call the runner makes goes through the [`CloudProvider`]
//! trait, so the remediation sequence can be tested against a mock and the
//! production implementation swapped without touching the runner.

mod aws;

pub use aws::AwsProvider;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use crate::sensitive::SensitiveString;

/// Result type for provider operations.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Errors returned by the cloud provider boundary.
///
/// Remote failures are classified by AWS error code so the runner and the
/// verification report can distinguish a missing secret from a permission
/// problem without parsing message strings.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The named resource does not exist.
    #[error("{operation}: resource not found: {message}")]
    NotFound {
        /// API operation that failed
        operation: &'static str,
        /// Error message from the service
        message: String,
    },

    /// The caller's credentials lack permission for the operation.
    #[error("{operation}: access denied: {message}")]
    AccessDenied {
        /// API operation that failed
        operation: &'static str,
        /// Error message from the service
        message: String,
    },

    /// The service rejected the call due to rate limiting.
    #[error("{operation}: rate limited: {message}")]
    Throttled {
        /// API operation that failed
        operation: &'static str,
        /// Error message from the service
        message: String,
    },

    /// Any other service or transport failure.
    #[error("{operation} failed: {message}")]
    Api {
        /// API operation that failed
        operation: &'static str,
        /// AWS error code, when the service supplied one
        code: Option<String>,
        /// Error message
        message: String,
    },
}

impl ProviderError {
    /// Create a generic API error.
    pub fn api(
        operation: &'static str,
        code: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Api {
            operation,
            code,
            message: message.into(),
        }
    }

    /// Check if this error means the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound { .. })
    }

    /// Check if this error is a permission failure.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, ProviderError::AccessDenied { .. })
    }

    /// Check if retrying the call later could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProviderError::Throttled { .. })
    }
}

/// Result of writing a secret value.
#[derive(Debug, Clone, Serialize)]
pub struct SecretWrite {
    /// Version id assigned by the secret store, when reported.
    pub version_id: Option<String>,
}

/// Result of forcing a new deployment.
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentInfo {
    /// Identifier of the primary deployment, when reported.
    pub deployment_id: Option<String>,
    /// Rollout state reported by the orchestrator (e.g. `IN_PROGRESS`).
    pub rollout_state: Option<String>,
}

/// Outcome of the stabilization wait.
///
/// A timeout is an expected, classified outcome rather than an error: the
/// runner treats it as a warning and proceeds to verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stabilization {
    /// The service reached its desired state.
    Stable {
        /// How long the wait took
        waited: Duration,
    },
    /// The timeout elapsed before the service stabilized.
    TimedOut {
        /// How long was waited before giving up
        waited: Duration,
    },
}

/// One log event fetched from the service's log group.
#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    /// Event timestamp, when the service supplied one.
    pub timestamp: Option<DateTime<Utc>>,
    /// Log line content.
    pub message: String,
}

/// Interface to the cloud services the remediation sequence touches.
///
/// The production implementation is [`AwsProvider`]; tests substitute a
/// mock to script per-call outcomes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CloudProvider: Send + Sync {
    /// Overwrite the value of a named secret.
    async fn put_secret_value(
        &self,
        secret_id: &str,
        value: &SensitiveString,
    ) -> ProviderResult<SecretWrite>;

    /// Fetch the current value of a named secret.
    async fn get_secret_value(&self, secret_id: &str) -> ProviderResult<SensitiveString>;

    /// Attach an inline policy document to a role.
    async fn put_role_policy(
        &self,
        role_name: &str,
        policy_name: &str,
        document: &str,
    ) -> ProviderResult<()>;

    /// Force a new deployment of a service without changing its definition.
    async fn force_new_deployment(
        &self,
        cluster: &str,
        service: &str,
    ) -> ProviderResult<DeploymentInfo>;

    /// Block until the service is stable or the timeout elapses.
    async fn wait_for_service_stable(
        &self,
        cluster: &str,
        service: &str,
        timeout: Duration,
    ) -> ProviderResult<Stabilization>;

    /// Fetch recent log events from a log group, newest-window first.
    async fn recent_log_events(
        &self,
        log_group: &str,
        lookback: Duration,
        limit: i32,
    ) -> ProviderResult<Vec<LogEvent>>;
}
