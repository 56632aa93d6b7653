//! Configuration module for ecs-remedy
//!
//! Handles loading and merging configuration from multiple sources:
//! - Default values (the original remediation targets)
//! - User configuration (~/.config/ecs-remedy/config.toml)
//! - Project configuration (./ecs-remedy.toml)
//! - Environment variables
//! - Command-line arguments
//!
//! Every AWS resource name the runner touches lives here; nothing is
//! hard-coded at a call site, so tests and other environments can inject
//! their own targets.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemedyConfig {
    /// AWS account scope
    pub aws: AwsConfig,

    /// Secrets to update, in order
    pub secrets: Vec<SecretTarget>,

    /// ECS service and IAM targets
    pub service: ServiceConfig,

    /// Stabilization wait settings
    pub wait: WaitConfig,

    /// Verification settings
    pub verify: VerifyConfig,

    /// Path to the env file supplying the secret values
    pub env_file: PathBuf,

    /// Operator next-step URLs printed at the end of every run
    pub next_steps: Vec<String>,
}

impl Default for RemedyConfig {
    fn default() -> Self {
        Self {
            aws: AwsConfig::default(),
            secrets: vec![
                SecretTarget::new("ANTHROPIC_API_KEY", "content-ai-agent/anthropic-api-key"),
                SecretTarget::new("SERP_API_KEY", "content-ai-agent/serp-api-key"),
                SecretTarget::new("YOUTUBE_API_KEY", "content-ai-agent/youtube-api-key"),
            ],
            service: ServiceConfig::default(),
            wait: WaitConfig::default(),
            verify: VerifyConfig::default(),
            env_file: PathBuf::from(".env"),
            next_steps: vec![
                "curl http://<alb-dns-name>/health".to_string(),
                "open http://<alb-dns-name>/api/v1/docs".to_string(),
            ],
        }
    }
}

/// AWS account scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsConfig {
    /// Region every call is scoped to
    pub region: String,

    /// Account id used when building secret ARNs
    pub account_id: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            account_id: "123456789012".to_string(),
        }
    }
}

/// One secret to push: which env file key supplies the value, and which
/// Secrets Manager entry receives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretTarget {
    /// Key in the env file
    pub env_key: String,

    /// Secret name or ARN in Secrets Manager
    pub secret_id: String,
}

impl SecretTarget {
    /// Create a new secret target.
    pub fn new(env_key: impl Into<String>, secret_id: impl Into<String>) -> Self {
        Self {
            env_key: env_key.into(),
            secret_id: secret_id.into(),
        }
    }
}

/// ECS service and IAM targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// ECS cluster name
    pub cluster: String,

    /// ECS service name
    pub service: String,

    /// Task execution role the read policy is attached to
    pub execution_role: String,

    /// Name of the inline policy
    pub policy_name: String,

    /// CloudWatch log group tailed during verification
    pub log_group: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cluster: "content-ai-agent-cluster".to_string(),
            service: "content-ai-agent-service".to_string(),
            execution_role: "content-ai-agent-execution-role".to_string(),
            policy_name: "content-ai-agent-secrets-read".to_string(),
            log_group: "/ecs/content-ai-agent".to_string(),
        }
    }
}

/// Stabilization wait settings.
///
/// Defaults match the provider waiter's documented policy: poll every 15
/// seconds, give up after 10 minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitConfig {
    /// Maximum time to wait for the service to stabilize, in seconds
    pub timeout_secs: u64,

    /// Seconds between polls
    pub poll_interval_secs: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 600,
            poll_interval_secs: 15,
        }
    }
}

impl WaitConfig {
    /// Stabilization timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Poll interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Verification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// How far back to fetch log events, in seconds
    pub log_lookback_secs: u64,

    /// Maximum number of log events to fetch
    pub log_limit: i32,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            log_lookback_secs: 600,
            log_limit: 50,
        }
    }
}

impl VerifyConfig {
    /// Log lookback window as a [`Duration`].
    pub fn log_lookback(&self) -> Duration {
        Duration::from_secs(self.log_lookback_secs)
    }
}

impl RemedyConfig {
    /// Load configuration from all sources.
    ///
    /// When `config_path` is given, only that file is read (and it must
    /// exist). Otherwise the standard locations are checked in order, each
    /// existing file replacing the values of the previous one.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            return Self::from_file(path);
        }

        let mut config = Self::default();
        for path in Self::config_paths() {
            if path.exists() {
                config = Self::from_file(&path)?;
            }
        }
        Ok(config)
    }

    /// Standard configuration file locations, lowest precedence first.
    fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("ecs-remedy/config.toml"));
        }
        paths.push(PathBuf::from("ecs-remedy.toml"));

        if let Ok(env_config) = std::env::var("ECS_REMEDY_CONFIG") {
            paths.push(PathBuf::from(env_config));
        }

        paths
    }

    /// Load from a specific TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Validate the configuration before any remote call is attempted.
    pub fn validate(&self) -> Result<()> {
        if self.aws.region.is_empty() {
            return Err(Error::invalid_config("aws.region", "must not be empty"));
        }
        if self.aws.account_id.is_empty() || !self.aws.account_id.chars().all(|c| c.is_ascii_digit())
        {
            return Err(Error::invalid_config(
                "aws.account_id",
                "must be a numeric AWS account id",
            ));
        }
        if self.secrets.is_empty() {
            return Err(Error::invalid_config(
                "secrets",
                "at least one secret target is required",
            ));
        }
        for target in &self.secrets {
            if target.env_key.is_empty() || target.secret_id.is_empty() {
                return Err(Error::invalid_config(
                    "secrets",
                    "env_key and secret_id must not be empty",
                ));
            }
        }
        for (i, target) in self.secrets.iter().enumerate() {
            for other in &self.secrets[i + 1..] {
                if target.env_key == other.env_key {
                    return Err(Error::invalid_config(
                        "secrets",
                        format!("duplicate env_key '{}'", target.env_key),
                    ));
                }
                if target.secret_id == other.secret_id {
                    return Err(Error::invalid_config(
                        "secrets",
                        format!("duplicate secret_id '{}'", target.secret_id),
                    ));
                }
            }
        }
        for (key, value) in [
            ("service.cluster", &self.service.cluster),
            ("service.service", &self.service.service),
            ("service.execution_role", &self.service.execution_role),
            ("service.policy_name", &self.service.policy_name),
            ("service.log_group", &self.service.log_group),
        ] {
            if value.is_empty() {
                return Err(Error::invalid_config(key, "must not be empty"));
            }
        }
        if self.wait.poll_interval_secs == 0 {
            return Err(Error::invalid_config(
                "wait.poll_interval_secs",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
