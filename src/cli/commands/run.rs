//! Run command - Execute the full remediation sequence
//!
//! Loads the API keys, updates the secrets, grants the execution role
//! read access, forces a redeployment, waits for stability, and verifies.

use anyhow::Result;
use clap::Parser;

use super::CommandContext;
use crate::cli::output::ConsoleObserver;
use ecs_remedy::runner::RemediationRunner;

/// Arguments for the run command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        if let Err(err) = ctx.config.validate() {
            ctx.output.error(&err.to_string());
            return Ok(err.exit_code());
        }

        let title = if ctx.check_mode {
            "ECS-REMEDY RUN (CHECK MODE)"
        } else {
            "ECS-REMEDY RUN"
        };
        ctx.output.banner(title);
        ctx.output.info(&format!(
            "Target: service '{}' in cluster '{}' ({})",
            ctx.config.service.service, ctx.config.service.cluster, ctx.config.aws.region
        ));

        if !ctx.confirm_mutation()? {
            ctx.output.info("Aborted by operator.");
            return Ok(1);
        }

        let provider = ctx.provider().await;
        let runner = RemediationRunner::new(ctx.config.clone(), provider)
            .with_check_mode(ctx.check_mode);

        let observer = ConsoleObserver::new(&ctx.output);
        let report = runner.run(&observer).await;

        ctx.finish(&report)
    }
}
