//! Verify command - Probe secrets and tail service logs
//!
//! Runs only the verification step of the remediation sequence. Useful
//! for re-checking a service after an earlier run, or after out-of-band
//! changes to the secrets or the role policy.

use anyhow::Result;
use clap::Parser;

use super::CommandContext;
use crate::cli::output::ConsoleObserver;
use ecs_remedy::runner::RemediationRunner;

/// Arguments for the verify command
#[derive(Parser, Debug, Clone)]
pub struct VerifyArgs {}

impl VerifyArgs {
    /// Execute the verify command
    pub async fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        if let Err(err) = ctx.config.validate() {
            ctx.output.error(&err.to_string());
            return Ok(err.exit_code());
        }

        ctx.output.banner("ECS-REMEDY VERIFY");
        ctx.output.info(&format!(
            "Probing {} secrets and log group '{}' ({})",
            ctx.config.secrets.len(),
            ctx.config.service.log_group,
            ctx.config.aws.region
        ));

        let provider = ctx.provider().await;
        let runner = RemediationRunner::new(ctx.config.clone(), provider)
            .with_check_mode(ctx.check_mode);

        let observer = ConsoleObserver::new(&ctx.output);
        let report = runner.verify(&observer).await;

        ctx.finish(&report)
    }
}
