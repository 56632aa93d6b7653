//! AWS implementation of the cloud provider boundary.
//!
//! Thin adapters over the official SDK clients. Each method maps the SDK
//! error into the classified [`ProviderError`] so callers never inspect
//! SDK types directly.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_secretsmanager::error::{ProvideErrorMetadata, SdkError};
use std::time::Duration;
use tokio::time::Instant;

use super::{
    CloudProvider, DeploymentInfo, LogEvent, ProviderError, ProviderResult, SecretWrite,
    Stabilization,
};
use crate::sensitive::SensitiveString;

/// Cloud provider backed by the AWS SDK.
pub struct AwsProvider {
    secrets: aws_sdk_secretsmanager::Client,
    iam: aws_sdk_iam::Client,
    ecs: aws_sdk_ecs::Client,
    logs: aws_sdk_cloudwatchlogs::Client,
    poll_interval: Duration,
}

impl AwsProvider {
    /// Create a provider for a region, resolving credentials from the
    /// default chain (environment, profile, instance role).
    pub async fn new(region: &str, poll_interval: Duration) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_owned()))
            .load()
            .await;
        Self::from_conf(&config, poll_interval)
    }

    /// Create a provider from an already-resolved SDK configuration.
    pub fn from_conf(config: &SdkConfig, poll_interval: Duration) -> Self {
        Self {
            secrets: aws_sdk_secretsmanager::Client::new(config),
            iam: aws_sdk_iam::Client::new(config),
            ecs: aws_sdk_ecs::Client::new(config),
            logs: aws_sdk_cloudwatchlogs::Client::new(config),
            poll_interval,
        }
    }
}

#[async_trait]
impl CloudProvider for AwsProvider {
    async fn put_secret_value(
        &self,
        secret_id: &str,
        value: &SensitiveString,
    ) -> ProviderResult<SecretWrite> {
        let output = self
            .secrets
            .put_secret_value()
            .secret_id(secret_id)
            .secret_string(value.expose())
            .send()
            .await
            .map_err(|e| classify("secretsmanager.PutSecretValue", e))?;

        Ok(SecretWrite {
            version_id: output.version_id().map(str::to_owned),
        })
    }

    async fn get_secret_value(&self, secret_id: &str) -> ProviderResult<SensitiveString> {
        let output = self
            .secrets
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| classify("secretsmanager.GetSecretValue", e))?;

        match output.secret_string() {
            Some(value) => Ok(SensitiveString::new(value)),
            None => Err(ProviderError::api(
                "secretsmanager.GetSecretValue",
                None,
                format!("secret '{}' has no string value", secret_id),
            )),
        }
    }

    async fn put_role_policy(
        &self,
        role_name: &str,
        policy_name: &str,
        document: &str,
    ) -> ProviderResult<()> {
        self.iam
            .put_role_policy()
            .role_name(role_name)
            .policy_name(policy_name)
            .policy_document(document)
            .send()
            .await
            .map_err(|e| classify("iam.PutRolePolicy", e))?;
        Ok(())
    }

    async fn force_new_deployment(
        &self,
        cluster: &str,
        service: &str,
    ) -> ProviderResult<DeploymentInfo> {
        let output = self
            .ecs
            .update_service()
            .cluster(cluster)
            .service(service)
            .force_new_deployment(true)
            .send()
            .await
            .map_err(|e| classify("ecs.UpdateService", e))?;

        let deployment = output
            .service()
            .and_then(|s| s.deployments().first().cloned());

        Ok(DeploymentInfo {
            deployment_id: deployment.as_ref().and_then(|d| d.id().map(str::to_owned)),
            rollout_state: deployment
                .as_ref()
                .and_then(|d| d.rollout_state().map(|s| s.as_str().to_owned())),
        })
    }

    /// Poll DescribeServices until the service settles or the timeout
    /// elapses, following the `services-stable` waiter contract: stable
    /// means a single deployment with `running_count == desired_count`.
    async fn wait_for_service_stable(
        &self,
        cluster: &str,
        service: &str,
        timeout: Duration,
    ) -> ProviderResult<Stabilization> {
        let started = Instant::now();

        loop {
            let output = self
                .ecs
                .describe_services()
                .cluster(cluster)
                .services(service)
                .send()
                .await
                .map_err(|e| classify("ecs.DescribeServices", e))?;

            if let Some(failure) = output.failures().first() {
                return Err(ProviderError::NotFound {
                    operation: "ecs.DescribeServices",
                    message: format!(
                        "service '{}' in cluster '{}': {}",
                        service,
                        cluster,
                        failure.reason().unwrap_or("unknown failure")
                    ),
                });
            }

            let described = output.services().first().ok_or_else(|| {
                ProviderError::NotFound {
                    operation: "ecs.DescribeServices",
                    message: format!("service '{}' not found in cluster '{}'", service, cluster),
                }
            })?;

            let deployments = described.deployments().len();
            let running = described.running_count();
            let desired = described.desired_count();

            if deployments == 1 && running == desired {
                return Ok(Stabilization::Stable {
                    waited: started.elapsed(),
                });
            }

            if started.elapsed() + self.poll_interval > timeout {
                return Ok(Stabilization::TimedOut {
                    waited: started.elapsed(),
                });
            }

            tracing::debug!(
                service,
                deployments,
                running = ?running,
                desired = ?desired,
                "service not yet stable, polling again"
            );
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn recent_log_events(
        &self,
        log_group: &str,
        lookback: Duration,
        limit: i32,
    ) -> ProviderResult<Vec<LogEvent>> {
        let start_time = chrono::Utc::now().timestamp_millis()
            - i64::try_from(lookback.as_millis()).unwrap_or(i64::MAX);

        let output = self
            .logs
            .filter_log_events()
            .log_group_name(log_group)
            .start_time(start_time)
            .limit(limit)
            .send()
            .await
            .map_err(|e| classify("logs.FilterLogEvents", e))?;

        Ok(output
            .events()
            .iter()
            .map(|event| LogEvent {
                timestamp: event
                    .timestamp()
                    .and_then(chrono::DateTime::from_timestamp_millis),
                message: event.message().unwrap_or_default().trim_end().to_owned(),
            })
            .collect())
    }
}

impl std::fmt::Debug for AwsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsProvider")
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

/// Map an SDK error into the classified provider error.
///
/// Error codes are service-agnostic here on purpose: IAM reports
/// `NoSuchEntity`, the data-plane services report `*NotFoundException`,
/// and the runner only cares about the class.
fn classify<E>(operation: &'static str, err: SdkError<E>) -> ProviderError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let code = err.code().map(str::to_owned);
    let message = err
        .message()
        .map(str::to_owned)
        .unwrap_or_else(|| err.to_string());

    match code.as_deref() {
        Some("ResourceNotFoundException") | Some("NoSuchEntity")
        | Some("ClusterNotFoundException") | Some("ServiceNotFoundException") => {
            ProviderError::NotFound { operation, message }
        }
        Some("AccessDeniedException") | Some("AccessDenied") | Some("UnauthorizedException") => {
            ProviderError::AccessDenied { operation, message }
        }
        Some("ThrottlingException") | Some("TooManyRequestsException")
        | Some("LimitExceededException") => ProviderError::Throttled { operation, message },
        _ => ProviderError::Api {
            operation,
            code,
            message,
        },
    }
}
