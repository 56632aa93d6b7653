//! Validate command - Offline configuration check
//!
//! Loads the configuration and env file, runs every validation the
//! runner would run before its first remote call, and prints the plan.
//! Issues no AWS calls, so it is safe to run anywhere (including CI).

use anyhow::Result;
use clap::Parser;

use super::CommandContext;
use ecs_remedy::envfile::EnvFile;
use ecs_remedy::policy;

/// Arguments for the validate command
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Also print the IAM policy document that would be attached
    #[arg(long)]
    pub show_policy: bool,
}

impl ValidateArgs {
    /// Execute the validate command
    pub async fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        ctx.output.banner("ECS-REMEDY VALIDATE");

        if let Err(err) = ctx.config.validate() {
            ctx.output.error(&err.to_string());
            return Ok(err.exit_code());
        }
        ctx.output
            .info(&format!("Configuration valid ({} secret targets)", ctx.config.secrets.len()));

        let env = match EnvFile::load(&ctx.config.env_file) {
            Ok(env) => env,
            Err(err) => {
                ctx.output.error(&err.to_string());
                return Ok(err.exit_code());
            }
        };

        for target in &ctx.config.secrets {
            if let Err(err) = env.require(&target.env_key) {
                ctx.output.error(&err.to_string());
                return Ok(err.exit_code());
            }
            ctx.output.info(&format!(
                "  ${} -> {}",
                target.env_key, target.secret_id
            ));
        }

        ctx.output.section("Plan");
        ctx.output.info(&format!(
            "  region:  {} (account {})",
            ctx.config.aws.region, ctx.config.aws.account_id
        ));
        ctx.output.info(&format!(
            "  role:    {} (inline policy '{}')",
            ctx.config.service.execution_role, ctx.config.service.policy_name
        ));
        ctx.output.info(&format!(
            "  service: {} in cluster {}",
            ctx.config.service.service, ctx.config.service.cluster
        ));
        ctx.output.info(&format!(
            "  logs:    {}",
            ctx.config.service.log_group
        ));

        if self.show_policy {
            ctx.output.section("Policy document");
            ctx.output.info(&serde_json::to_string_pretty(
                &policy::read_access_document(&ctx.config),
            )?);
        }

        ctx.output.info("\nValidation passed.");
        Ok(0)
    }
}
