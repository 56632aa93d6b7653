//! Subcommands module for ecs-remedy CLI
//!
//! This module contains all the subcommand implementations.

pub mod run;
pub mod validate;
pub mod verify;

use crate::cli::output::OutputFormatter;
use crate::cli::{Cli, OutputFormat};
use anyhow::Result;
use ecs_remedy::config::RemedyConfig;
use ecs_remedy::provider::AwsProvider;
use ecs_remedy::runner::{RunReport, StepStatus};
use std::sync::Arc;

/// Common context shared between commands
pub struct CommandContext {
    /// Configuration with CLI overrides applied
    pub config: RemedyConfig,
    /// Output formatter
    pub output: OutputFormatter,
    /// Check mode (dry-run)
    pub check_mode: bool,
    /// Skip interactive confirmation
    pub assume_yes: bool,
    /// Selected output format
    pub output_format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context from CLI arguments
    pub fn new(cli: &Cli, mut config: RemedyConfig) -> Self {
        // CLI flags take precedence over every config source
        if let Some(env_file) = &cli.env_file {
            config.env_file = env_file.clone();
        }
        if let Some(region) = &cli.region {
            config.aws.region = region.clone();
        }
        if let Some(timeout) = cli.timeout {
            config.wait.timeout_secs = timeout;
        }

        let output = OutputFormatter::new(!cli.no_color, cli.is_json(), cli.verbosity());

        Self {
            config,
            output,
            check_mode: cli.check_mode,
            assume_yes: cli.assume_yes,
            output_format: cli.output,
        }
    }

    /// Build the AWS provider for the configured region.
    pub async fn provider(&self) -> Arc<AwsProvider> {
        self.output.debug(&format!(
            "initializing AWS clients for region {}",
            self.config.aws.region
        ));
        Arc::new(
            AwsProvider::new(
                &self.config.aws.region,
                self.config.wait.poll_interval(),
            )
            .await,
        )
    }

    /// Print the final report in the selected format and return its exit
    /// code. The next-step instructions are printed regardless of outcome.
    pub fn finish(&self, report: &RunReport) -> Result<i32> {
        match self.output_format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(report)?);
            }
            OutputFormat::Human => {
                self.output.section("Recap");
                self.output.info(&report.recap());
                for outcome in report
                    .steps
                    .iter()
                    .filter(|o| o.status == StepStatus::Warning)
                {
                    self.output
                        .warning(&format!("{}: {}", outcome.step, outcome.detail));
                }
                if let Some(failure) = &report.failure {
                    self.output
                        .error(&format!("{}: {}", failure.step, failure.message));
                }
                self.output.next_steps(&self.config.next_steps);
            }
            OutputFormat::Minimal => {
                if let Some(failure) = &report.failure {
                    self.output
                        .error(&format!("{}: {}", failure.step, failure.message));
                }
            }
        }
        Ok(report.exit_code())
    }

    /// Confirm a mutating run with the operator.
    ///
    /// Skipped with `--yes`, in check mode, and when stdin is not a
    /// terminal (automation).
    pub fn confirm_mutation(&self) -> Result<bool> {
        use is_terminal::IsTerminal;

        if self.assume_yes || self.check_mode || !std::io::stdin().is_terminal() {
            return Ok(true);
        }

        let prompt = format!(
            "Update {} secrets and redeploy '{}' in region {}?",
            self.config.secrets.len(),
            self.config.service.service,
            self.config.aws.region
        );
        Ok(dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }
}
