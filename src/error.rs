//! Error types for ecs-remedy.
//!
//! The remediation sequence distinguishes three failure tiers:
//! configuration errors (fatal before any remote call), remote mutation
//! errors (fatal, no rollback), and non-fatal warnings. The tier a failure
//! lands in is decided by the step's declared policy in the runner; this
//! module only supplies the typed errors and their exit-code mapping.

use std::path::PathBuf;
use thiserror::Error;

use crate::provider::ProviderError;

/// Result type alias for ecs-remedy operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for ecs-remedy.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// The env file is missing or unreadable.
    #[error("Failed to read env file '{path}': {message}")]
    EnvFile {
        /// Path to the env file
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// A required value is absent or empty in the env file.
    #[error("Required value '{key}' is missing or empty in '{path}'")]
    MissingValue {
        /// The required key
        key: String,
        /// Path to the env file
        path: PathBuf,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidConfig {
        /// Configuration key
        key: String,
        /// Error message
        message: String,
    },

    // ========================================================================
    // Remote Mutation Errors
    // ========================================================================
    /// A secret update failed. Aborts the run; already-updated secrets are
    /// not rolled back.
    #[error("Failed to update secret '{secret_id}': {source}")]
    SecretUpdate {
        /// The secret that failed to update
        secret_id: String,
        /// Underlying provider error
        #[source]
        source: ProviderError,
    },

    /// Attaching the inline read policy failed.
    #[error("Failed to attach policy '{policy_name}' to role '{role}': {source}")]
    PolicyAttach {
        /// Inline policy name
        policy_name: String,
        /// Execution role name
        role: String,
        /// Underlying provider error
        #[source]
        source: ProviderError,
    },

    /// Triggering the redeployment failed.
    #[error("Failed to trigger deployment of service '{service}': {source}")]
    Deployment {
        /// Service name
        service: String,
        /// Underlying provider error
        #[source]
        source: ProviderError,
    },

    // ========================================================================
    // Other Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unwrapped provider error.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl Error {
    /// Creates a new env file error.
    pub fn env_file(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::EnvFile {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new missing value error.
    pub fn missing_value(key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::MissingValue {
            key: key.into(),
            path: path.into(),
        }
    }

    /// Creates a new invalid configuration error.
    pub fn invalid_config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Returns the error code for CLI exit status.
    ///
    /// Only fatal-step failures reach this mapping; warnings and
    /// verification results never affect the exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::EnvFile { .. }
            | Error::MissingValue { .. }
            | Error::Config(_)
            | Error::InvalidConfig { .. }
            | Error::TomlParse(_) => 2,
            Error::SecretUpdate { .. } => 3,
            Error::Deployment { .. } => 4,
            _ => 1,
        }
    }
}
