//! # ecs-remedy - ECS Service Remediation Tool
//!
//! ecs-remedy repairs a broken ECS deployment whose tasks cannot read
//! their API-key secrets. One invocation pushes fresh secret values,
//! grants the task execution role read access, forces a redeployment,
//! waits for the service to stabilize, and verifies the result.
//!
//! ## Core Concepts
//!
//! - **Secret targets**: env-file keys mapped to Secrets Manager entries
//! - **Remediation runner**: the ordered six-step sequence with declared
//!   per-step failure policies (fatal, warn, observe)
//! - **Cloud provider**: the trait boundary in front of the AWS SDK,
//!   mockable for tests
//! - **Run report**: per-step outcomes and per-secret probes; the only
//!   source of the process exit code
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     CLI Interface                        │
//! │              (clap-based command parsing)                │
//! └─────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Remediation Runner                      │
//! │     (ordered steps, policy-driven failure handling)      │
//! └─────────────────────────────────────────────────────────┘
//!        │                   │                    │
//!        ▼                   ▼                    ▼
//! ┌─────────────┐   ┌─────────────────┐   ┌──────────────┐
//! │  Env file   │   │  Policy builder │   │  Run report  │
//! │  (API keys) │   │  (IAM document) │   │  (exit code) │
//! └─────────────┘   └─────────────────┘   └──────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                 CloudProvider (trait)                    │
//! │   Secrets Manager · IAM · ECS · CloudWatch Logs (SDK)    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use ecs_remedy::config::RemedyConfig;
//! use ecs_remedy::provider::AwsProvider;
//! use ecs_remedy::runner::{NullObserver, RemediationRunner};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = RemedyConfig::load(None).unwrap();
//!     let provider = AwsProvider::new(&config.aws.region, config.wait.poll_interval()).await;
//!
//!     let runner = RemediationRunner::new(config, Arc::new(provider));
//!     let report = runner.run(&NullObserver).await;
//!
//!     std::process::exit(report.exit_code());
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod envfile;
pub mod error;
pub mod policy;
pub mod provider;
pub mod runner;
pub mod sensitive;

pub use config::RemedyConfig;
pub use error::{Error, Result};
pub use runner::{RemediationRunner, RunReport};
pub use sensitive::SensitiveString;
