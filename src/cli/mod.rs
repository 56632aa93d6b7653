//! CLI module for ecs-remedy
//!
//! This module provides the command-line interface for ecs-remedy,
//! including argument parsing, configuration loading, and subcommand
//! handling.

pub mod commands;
pub mod completions;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// ecs-remedy - ECS service remediation tool
///
/// Rotates a service's API-key secrets, grants its execution role read
/// access, forces a redeployment, and verifies the result.
#[derive(Parser, Debug, Clone)]
#[command(name = "ecs-remedy")]
#[command(author = "ecs-remedy Contributors")]
#[command(version)]
#[command(about = "Remediate an ECS service whose tasks cannot read their secrets", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true, env = "ECS_REMEDY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the env file supplying the secret values
    #[arg(long = "env-file", global = true, env = "ECS_REMEDY_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// AWS region (overrides configuration)
    #[arg(long, global = true, env = "ECS_REMEDY_REGION")]
    pub region: Option<String>,

    /// Stabilization wait timeout in seconds (overrides configuration)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Run in check mode (dry-run, don't make changes)
    #[arg(long = "check", global = true)]
    pub check_mode: bool,

    /// Skip the interactive confirmation before mutating cloud state
    #[arg(short = 'y', long = "yes", global = true)]
    pub assume_yes: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON run report for scripting
    Json,
    /// Minimal output (only errors)
    Minimal,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Human
    }
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the full remediation sequence
    Run(commands::run::RunArgs),

    /// Probe secret readability and tail service logs
    Verify(commands::verify::VerifyArgs),

    /// Validate configuration and env file without touching AWS
    Validate(commands::validate::ValidateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for completions command
#[derive(Parser, Debug, Clone)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Get the effective verbosity level (0-4)
    pub fn verbosity(&self) -> u8 {
        self.verbose.min(4)
    }

    /// Check if JSON output is requested
    pub fn is_json(&self) -> bool {
        matches!(self.output, OutputFormat::Json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["ecs-remedy", "run"]).unwrap();
        assert!(matches!(cli.command, Commands::Run(_)));
        assert!(!cli.check_mode);
    }

    #[test]
    fn test_verbosity() {
        let cli = Cli::try_parse_from(["ecs-remedy", "-vvv", "run"]).unwrap();
        assert_eq!(cli.verbosity(), 3);
    }

    #[test]
    fn test_check_mode_flag() {
        let cli = Cli::try_parse_from(["ecs-remedy", "run", "--check"]).unwrap();
        assert!(cli.check_mode);
    }

    #[test]
    fn test_global_overrides() {
        let cli = Cli::try_parse_from([
            "ecs-remedy",
            "--region",
            "eu-west-1",
            "--env-file",
            "deploy/.env",
            "--timeout",
            "120",
            "validate",
        ])
        .unwrap();
        assert_eq!(cli.region.as_deref(), Some("eu-west-1"));
        assert_eq!(cli.env_file, Some(PathBuf::from("deploy/.env")));
        assert_eq!(cli.timeout, Some(120));
    }

    #[test]
    fn test_output_format() {
        let cli = Cli::try_parse_from(["ecs-remedy", "--output", "json", "verify"]).unwrap();
        assert!(cli.is_json());
    }
}
