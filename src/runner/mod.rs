//! The remediation runner.
//!
//! Executes the six-step remediation sequence against a [`CloudProvider`]:
//! load the API keys, push them into Secrets Manager, grant the execution
//! role read access, force a new deployment, wait for stabilization, and
//! verify. Each step carries a declared [`FailurePolicy`]; the dispatcher
//! consults it to decide whether a failure aborts the run, so the
//! fatal/warn/observe classification lives in data rather than in control
//! flow.
//!
//! Already-updated secrets are not rolled back when a later update fails:
//! the sequence is fail-fast, and partially-updated secret state is left
//! for the operator to inspect.

mod report;

pub use report::{
    FailurePolicy, FatalFailure, RunReport, SecretProbe, StepKind, StepOutcome, StepStatus,
};

use std::sync::Arc;
use std::time::Instant;

use crate::config::RemedyConfig;
use crate::envfile::EnvFile;
use crate::error::{Error, Result};
use crate::policy;
use crate::provider::{CloudProvider, LogEvent, Stabilization};

/// Receives progress events while the runner executes.
///
/// The CLI implements this to print live per-step status lines; tests and
/// library callers can use [`NullObserver`].
pub trait StepObserver: Send + Sync {
    /// A step is about to execute.
    fn step_started(&self, _step: StepKind) {}

    /// A step finished (in any status).
    fn step_finished(&self, _outcome: &StepOutcome) {}

    /// A verification probe finished.
    fn probe_finished(&self, _probe: &SecretProbe) {}

    /// A log event was fetched during verification.
    fn log_line(&self, _event: &LogEvent) {}

    /// Informational progress within a step.
    fn note(&self, _message: &str) {}
}

/// Observer that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl StepObserver for NullObserver {}

/// Outcome a step hands back to the dispatcher on success.
struct StepSummary {
    status: StepStatus,
    detail: String,
}

impl StepSummary {
    fn ok(detail: impl Into<String>) -> Self {
        Self {
            status: StepStatus::Ok,
            detail: detail.into(),
        }
    }

    fn changed(detail: impl Into<String>) -> Self {
        Self {
            status: StepStatus::Changed,
            detail: detail.into(),
        }
    }

    fn would_change(detail: impl Into<String>) -> Self {
        Self {
            status: StepStatus::WouldChange,
            detail: detail.into(),
        }
    }

    fn warning(detail: impl Into<String>) -> Self {
        Self {
            status: StepStatus::Warning,
            detail: detail.into(),
        }
    }

    fn skipped(detail: impl Into<String>) -> Self {
        Self {
            status: StepStatus::Skipped,
            detail: detail.into(),
        }
    }
}

/// Executes the remediation sequence.
pub struct RemediationRunner {
    config: RemedyConfig,
    provider: Arc<dyn CloudProvider>,
    check_mode: bool,
}

impl RemediationRunner {
    /// Create a runner over a provider.
    pub fn new(config: RemedyConfig, provider: Arc<dyn CloudProvider>) -> Self {
        Self {
            config,
            provider,
            check_mode: false,
        }
    }

    /// Enable or disable check mode (dry run).
    ///
    /// In check mode the runner walks the same sequence but issues no
    /// remote calls; mutating steps report what they would have done.
    pub fn with_check_mode(mut self, check_mode: bool) -> Self {
        self.check_mode = check_mode;
        self
    }

    /// The configuration this runner was built with.
    pub fn config(&self) -> &RemedyConfig {
        &self.config
    }

    /// Run the full remediation sequence.
    ///
    /// Never returns an error: failures are recorded in the report, and
    /// the report's exit code reflects only fatal-step outcomes.
    pub async fn run(&self, observer: &dyn StepObserver) -> RunReport {
        let mut report = RunReport::new(self.check_mode);
        let mut env: Option<EnvFile> = None;
        let mut aborted = false;

        for step in StepKind::SEQUENCE {
            if aborted {
                report.push(StepOutcome::skipped(step, "earlier fatal failure"));
                continue;
            }

            observer.step_started(step);
            let started = Instant::now();

            let result = match step {
                StepKind::LoadKeys => self.load_keys(&mut env),
                StepKind::UpdateSecrets => self.update_secrets(env.as_ref(), observer).await,
                StepKind::GrantReadAccess => self.grant_read_access().await,
                StepKind::Redeploy => self.redeploy(observer).await,
                StepKind::WaitStable => self.wait_stable().await,
                StepKind::Verify => self.verify_step(&mut report, observer).await,
            };

            aborted = !self.settle(step, result, started, &mut report, observer);
        }

        report
    }

    /// Run only the verification step (probes + log tail).
    pub async fn verify(&self, observer: &dyn StepObserver) -> RunReport {
        let mut report = RunReport::new(self.check_mode);
        let step = StepKind::Verify;

        observer.step_started(step);
        let started = Instant::now();
        let result = self.verify_step(&mut report, observer).await;
        self.settle(step, result, started, &mut report, observer);

        report
    }

    /// Record a step result, applying the step's declared failure policy.
    /// Returns `false` when the run must abort.
    fn settle(
        &self,
        step: StepKind,
        result: Result<StepSummary>,
        started: Instant,
        report: &mut RunReport,
        observer: &dyn StepObserver,
    ) -> bool {
        let duration = started.elapsed();
        let outcome = match result {
            Ok(summary) => StepOutcome {
                step,
                status: summary.status,
                detail: summary.detail,
                duration,
            },
            Err(err) => {
                let status = match step.policy() {
                    FailurePolicy::Fatal => {
                        report.record_fatal(step, &err);
                        StepStatus::Failed
                    }
                    FailurePolicy::Warn | FailurePolicy::Observe => {
                        tracing::warn!(step = %step, error = %err, "non-fatal step failed");
                        StepStatus::Warning
                    }
                };
                StepOutcome {
                    step,
                    status,
                    detail: err.to_string(),
                    duration,
                }
            }
        };

        let proceed = outcome.status != StepStatus::Failed;
        observer.step_finished(&outcome);
        report.push(outcome);
        proceed
    }

    /// Step 1: load the env file and check every required key up front.
    fn load_keys(&self, env: &mut Option<EnvFile>) -> Result<StepSummary> {
        let file = EnvFile::load(&self.config.env_file)?;
        for target in &self.config.secrets {
            file.require(&target.env_key)?;
        }
        let detail = format!(
            "{} keys loaded from {}",
            self.config.secrets.len(),
            file.path().display()
        );
        *env = Some(file);
        Ok(StepSummary::ok(detail))
    }

    /// Step 2: push each key into its secret, fail-fast on the first error.
    async fn update_secrets(
        &self,
        env: Option<&EnvFile>,
        observer: &dyn StepObserver,
    ) -> Result<StepSummary> {
        if self.check_mode {
            for target in &self.config.secrets {
                observer.note(&format!(
                    "would update secret '{}' from ${}",
                    target.secret_id, target.env_key
                ));
            }
            return Ok(StepSummary::would_change(format!(
                "{} secrets would be updated",
                self.config.secrets.len()
            )));
        }

        let env = env.ok_or_else(|| Error::Config("env file was not loaded".into()))?;

        for target in &self.config.secrets {
            let value = env.require(&target.env_key)?;
            let write = self
                .provider
                .put_secret_value(&target.secret_id, value)
                .await
                .map_err(|source| Error::SecretUpdate {
                    secret_id: target.secret_id.clone(),
                    source,
                })?;

            tracing::info!(secret_id = %target.secret_id, version = ?write.version_id, "secret updated");
            observer.note(&format!(
                "updated secret '{}' (version {})",
                target.secret_id,
                write.version_id.as_deref().unwrap_or("unknown")
            ));
        }

        Ok(StepSummary::changed(format!(
            "{} secrets updated",
            self.config.secrets.len()
        )))
    }

    /// Step 3: attach the inline read policy to the execution role.
    async fn grant_read_access(&self) -> Result<StepSummary> {
        let service = &self.config.service;

        if self.check_mode {
            return Ok(StepSummary::would_change(format!(
                "would attach policy '{}' to role '{}'",
                service.policy_name, service.execution_role
            )));
        }

        let document = policy::read_access_document_json(&self.config);
        self.provider
            .put_role_policy(&service.execution_role, &service.policy_name, &document)
            .await
            .map_err(|source| Error::PolicyAttach {
                policy_name: service.policy_name.clone(),
                role: service.execution_role.clone(),
                source,
            })?;

        Ok(StepSummary::changed(format!(
            "policy '{}' attached to role '{}'",
            service.policy_name, service.execution_role
        )))
    }

    /// Step 4: force a new deployment of the service.
    async fn redeploy(&self, observer: &dyn StepObserver) -> Result<StepSummary> {
        let service = &self.config.service;

        if self.check_mode {
            return Ok(StepSummary::would_change(format!(
                "would force new deployment of '{}' in cluster '{}'",
                service.service, service.cluster
            )));
        }

        let info = self
            .provider
            .force_new_deployment(&service.cluster, &service.service)
            .await
            .map_err(|source| Error::Deployment {
                service: service.service.clone(),
                source,
            })?;

        if let Some(id) = &info.deployment_id {
            observer.note(&format!(
                "deployment {} started ({})",
                id,
                info.rollout_state.as_deref().unwrap_or("state unknown")
            ));
        }

        Ok(StepSummary::changed(format!(
            "new deployment of '{}' triggered",
            service.service
        )))
    }

    /// Step 5: wait for the service to stabilize; timeout is a warning.
    async fn wait_stable(&self) -> Result<StepSummary> {
        if self.check_mode {
            return Ok(StepSummary::skipped("skipped in check mode"));
        }

        let service = &self.config.service;
        let outcome = self
            .provider
            .wait_for_service_stable(&service.cluster, &service.service, self.config.wait.timeout())
            .await?;

        Ok(match outcome {
            Stabilization::Stable { waited } => StepSummary::ok(format!(
                "service stable after {}s",
                waited.as_secs()
            )),
            Stabilization::TimedOut { waited } => StepSummary::warning(format!(
                "service not stable after {}s, continuing anyway",
                waited.as_secs()
            )),
        })
    }

    /// Step 6: probe each secret and tail recent logs, best-effort.
    async fn verify_step(
        &self,
        report: &mut RunReport,
        observer: &dyn StepObserver,
    ) -> Result<StepSummary> {
        if self.check_mode {
            return Ok(StepSummary::skipped("skipped in check mode"));
        }

        let mut inaccessible = 0usize;
        for target in &self.config.secrets {
            let probe = match self.provider.get_secret_value(&target.secret_id).await {
                Ok(value) if value.is_empty() => SecretProbe {
                    secret_id: target.secret_id.clone(),
                    accessible: true,
                    detail: "readable, but the stored value is empty".into(),
                },
                Ok(_) => SecretProbe {
                    secret_id: target.secret_id.clone(),
                    accessible: true,
                    detail: "readable".into(),
                },
                Err(err) => {
                    inaccessible += 1;
                    SecretProbe {
                        secret_id: target.secret_id.clone(),
                        accessible: false,
                        detail: err.to_string(),
                    }
                }
            };
            observer.probe_finished(&probe);
            report.push_probe(probe);
        }

        let service = &self.config.service;
        let log_detail = match self
            .provider
            .recent_log_events(
                &service.log_group,
                self.config.verify.log_lookback(),
                self.config.verify.log_limit,
            )
            .await
        {
            Ok(events) => {
                for event in &events {
                    observer.log_line(event);
                }
                format!("{} log events fetched", events.len())
            }
            Err(err) => {
                tracing::warn!(log_group = %service.log_group, error = %err, "log tail failed");
                inaccessible += 1;
                format!("log tail failed: {}", err)
            }
        };

        let detail = format!(
            "{}/{} secrets readable; {}",
            self.config.secrets.len() - report.probes.iter().filter(|p| !p.accessible).count(),
            self.config.secrets.len(),
            log_detail
        );

        Ok(if inaccessible == 0 {
            StepSummary::ok(detail)
        } else {
            StepSummary::warning(detail)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecretTarget;
    use crate::provider::{
        DeploymentInfo, MockCloudProvider, ProviderError, SecretWrite, Stabilization,
    };
    use std::io::Write as _;
    use std::sync::Mutex;
    use std::time::Duration;

    fn write_env_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    /// Config with three secrets pointing at a temp env file.
    fn test_config(env_file: &tempfile::NamedTempFile) -> RemedyConfig {
        RemedyConfig {
            secrets: vec![
                SecretTarget::new("ANTHROPIC_API_KEY", "app/anthropic"),
                SecretTarget::new("SERP_API_KEY", "app/serp"),
                SecretTarget::new("YOUTUBE_API_KEY", "app/youtube"),
            ],
            env_file: env_file.path().to_path_buf(),
            ..RemedyConfig::default()
        }
    }

    const FULL_ENV: &str = "ANTHROPIC_API_KEY=a1\nSERP_API_KEY=s1\nYOUTUBE_API_KEY=y1\n";

    fn ok_write() -> SecretWrite {
        SecretWrite {
            version_id: Some("v1".into()),
        }
    }

    fn api_error(operation: &'static str) -> ProviderError {
        ProviderError::api(operation, None, "simulated failure")
    }

    /// Wire every provider call to succeed.
    fn happy_provider() -> MockCloudProvider {
        let mut mock = MockCloudProvider::new();
        mock.expect_put_secret_value()
            .times(3)
            .returning(|_, _| Ok(ok_write()));
        mock.expect_put_role_policy().times(1).returning(|_, _, _| Ok(()));
        mock.expect_force_new_deployment().times(1).returning(|_, _| {
            Ok(DeploymentInfo {
                deployment_id: Some("ecs-svc/123".into()),
                rollout_state: Some("IN_PROGRESS".into()),
            })
        });
        mock.expect_wait_for_service_stable()
            .times(1)
            .returning(|_, _, _| {
                Ok(Stabilization::Stable {
                    waited: Duration::from_secs(42),
                })
            });
        mock.expect_get_secret_value()
            .times(3)
            .returning(|_| Ok("value".into()));
        mock.expect_recent_log_events()
            .times(1)
            .returning(|_, _, _| Ok(vec![]));
        mock
    }

    fn runner(config: RemedyConfig, mock: MockCloudProvider) -> RemediationRunner {
        RemediationRunner::new(config, Arc::new(mock))
    }

    #[tokio::test]
    async fn full_run_succeeds() {
        let env = write_env_file(FULL_ENV);
        let report = runner(test_config(&env), happy_provider())
            .run(&NullObserver)
            .await;

        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.steps.len(), 6);
        assert_eq!(report.steps[0].status, StepStatus::Ok);
        assert_eq!(report.steps[1].status, StepStatus::Changed);
        assert_eq!(report.steps[5].status, StepStatus::Ok);
        assert_eq!(report.probes.len(), 3);
        assert!(report.probes.iter().all(|p| p.accessible));
    }

    #[tokio::test]
    async fn missing_env_value_fails_before_any_remote_call() {
        // No expectations: any provider call would panic the test.
        let mock = MockCloudProvider::new();
        let env = write_env_file("ANTHROPIC_API_KEY=a1\nSERP_API_KEY=s1\n");
        let report = runner(test_config(&env), mock).run(&NullObserver).await;

        assert_eq!(report.exit_code(), 2);
        assert_eq!(report.steps[0].status, StepStatus::Failed);
        assert!(report.steps[0].detail.contains("YOUTUBE_API_KEY"));
        assert!(report.steps[1..]
            .iter()
            .all(|o| o.status == StepStatus::Skipped));
    }

    #[tokio::test]
    async fn empty_env_value_is_a_config_error() {
        let mock = MockCloudProvider::new();
        let env = write_env_file("ANTHROPIC_API_KEY=a1\nSERP_API_KEY=\nYOUTUBE_API_KEY=y1\n");
        let report = runner(test_config(&env), mock).run(&NullObserver).await;

        assert_eq!(report.exit_code(), 2);
        assert!(report.steps[0].detail.contains("SERP_API_KEY"));
    }

    #[tokio::test]
    async fn secret_update_failure_aborts_without_touching_later_secrets() {
        let calls: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&calls);

        let mut mock = MockCloudProvider::new();
        mock.expect_put_secret_value()
            .returning(move |secret_id, _| {
                recorded.lock().unwrap().push(secret_id.to_string());
                if secret_id == "app/serp" {
                    Err(api_error("secretsmanager.PutSecretValue"))
                } else {
                    Ok(ok_write())
                }
            });
        // No other expectations: the run must not reach the policy step.

        let env = write_env_file(FULL_ENV);
        let report = runner(test_config(&env), mock).run(&NullObserver).await;

        assert_eq!(report.exit_code(), 3);
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["app/anthropic".to_string(), "app/serp".to_string()]
        );
        assert_eq!(report.steps[1].status, StepStatus::Failed);
        assert!(report.steps[2..]
            .iter()
            .all(|o| o.status == StepStatus::Skipped));
    }

    #[tokio::test]
    async fn policy_failure_warns_and_deployment_still_runs() {
        let mut mock = MockCloudProvider::new();
        mock.expect_put_secret_value()
            .times(3)
            .returning(|_, _| Ok(ok_write()));
        mock.expect_put_role_policy()
            .times(1)
            .returning(|_, _, _| Err(api_error("iam.PutRolePolicy")));
        mock.expect_force_new_deployment().times(1).returning(|_, _| {
            Ok(DeploymentInfo {
                deployment_id: None,
                rollout_state: None,
            })
        });
        mock.expect_wait_for_service_stable()
            .times(1)
            .returning(|_, _, _| {
                Ok(Stabilization::Stable {
                    waited: Duration::from_secs(1),
                })
            });
        mock.expect_get_secret_value()
            .times(3)
            .returning(|_| Ok("value".into()));
        mock.expect_recent_log_events()
            .times(1)
            .returning(|_, _, _| Ok(vec![]));

        let env = write_env_file(FULL_ENV);
        let report = runner(test_config(&env), mock).run(&NullObserver).await;

        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.steps[2].status, StepStatus::Warning);
        assert_eq!(report.steps[3].status, StepStatus::Changed);
    }

    #[tokio::test]
    async fn deployment_failure_is_fatal_and_skips_the_wait() {
        let mut mock = MockCloudProvider::new();
        mock.expect_put_secret_value()
            .times(3)
            .returning(|_, _| Ok(ok_write()));
        mock.expect_put_role_policy().times(1).returning(|_, _, _| Ok(()));
        mock.expect_force_new_deployment()
            .times(1)
            .returning(|_, _| Err(api_error("ecs.UpdateService")));
        // No wait/verify expectations: reaching them would panic.

        let env = write_env_file(FULL_ENV);
        let report = runner(test_config(&env), mock).run(&NullObserver).await;

        assert_eq!(report.exit_code(), 4);
        assert_eq!(report.steps[3].status, StepStatus::Failed);
        assert_eq!(report.steps[4].status, StepStatus::Skipped);
        assert_eq!(report.steps[5].status, StepStatus::Skipped);
        assert!(report.probes.is_empty());
    }

    #[tokio::test]
    async fn stabilization_timeout_warns_and_verification_still_runs() {
        let mut mock = MockCloudProvider::new();
        mock.expect_put_secret_value()
            .times(3)
            .returning(|_, _| Ok(ok_write()));
        mock.expect_put_role_policy().times(1).returning(|_, _, _| Ok(()));
        mock.expect_force_new_deployment().times(1).returning(|_, _| {
            Ok(DeploymentInfo {
                deployment_id: None,
                rollout_state: None,
            })
        });
        mock.expect_wait_for_service_stable()
            .times(1)
            .returning(|_, _, _| {
                Ok(Stabilization::TimedOut {
                    waited: Duration::from_secs(600),
                })
            });
        mock.expect_get_secret_value()
            .times(3)
            .returning(|_| Ok("value".into()));
        mock.expect_recent_log_events()
            .times(1)
            .returning(|_, _, _| Ok(vec![]));

        let env = write_env_file(FULL_ENV);
        let report = runner(test_config(&env), mock).run(&NullObserver).await;

        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.steps[4].status, StepStatus::Warning);
        assert_eq!(report.steps[5].status, StepStatus::Ok);
        assert_eq!(report.probes.len(), 3);
    }

    #[tokio::test]
    async fn probe_failures_are_reported_per_secret_and_never_fatal() {
        let mut mock = MockCloudProvider::new();
        mock.expect_put_secret_value()
            .times(3)
            .returning(|_, _| Ok(ok_write()));
        mock.expect_put_role_policy().times(1).returning(|_, _, _| Ok(()));
        mock.expect_force_new_deployment().times(1).returning(|_, _| {
            Ok(DeploymentInfo {
                deployment_id: None,
                rollout_state: None,
            })
        });
        mock.expect_wait_for_service_stable()
            .times(1)
            .returning(|_, _, _| {
                Ok(Stabilization::Stable {
                    waited: Duration::from_secs(1),
                })
            });
        mock.expect_get_secret_value().times(3).returning(|secret_id| {
            if secret_id == "app/serp" {
                Ok("value".into())
            } else {
                Err(ProviderError::AccessDenied {
                    operation: "secretsmanager.GetSecretValue",
                    message: "not authorized".into(),
                })
            }
        });
        mock.expect_recent_log_events()
            .times(1)
            .returning(|_, _, _| Ok(vec![]));

        let env = write_env_file(FULL_ENV);
        let report = runner(test_config(&env), mock).run(&NullObserver).await;

        // Verification results never affect the exit code.
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.steps[5].status, StepStatus::Warning);
        assert_eq!(report.probes.len(), 3);
        assert_eq!(
            report
                .probes
                .iter()
                .filter(|p| p.accessible)
                .map(|p| p.secret_id.as_str())
                .collect::<Vec<_>>(),
            vec!["app/serp"]
        );
    }

    #[tokio::test]
    async fn log_tail_failure_is_a_warning_only() {
        let mut mock = MockCloudProvider::new();
        mock.expect_put_secret_value()
            .times(3)
            .returning(|_, _| Ok(ok_write()));
        mock.expect_put_role_policy().times(1).returning(|_, _, _| Ok(()));
        mock.expect_force_new_deployment().times(1).returning(|_, _| {
            Ok(DeploymentInfo {
                deployment_id: None,
                rollout_state: None,
            })
        });
        mock.expect_wait_for_service_stable()
            .times(1)
            .returning(|_, _, _| {
                Ok(Stabilization::Stable {
                    waited: Duration::from_secs(1),
                })
            });
        mock.expect_get_secret_value()
            .times(3)
            .returning(|_| Ok("value".into()));
        mock.expect_recent_log_events()
            .times(1)
            .returning(|_, _, _| {
                Err(ProviderError::NotFound {
                    operation: "logs.FilterLogEvents",
                    message: "log group missing".into(),
                })
            });

        let env = write_env_file(FULL_ENV);
        let report = runner(test_config(&env), mock).run(&NullObserver).await;

        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.steps[5].status, StepStatus::Warning);
        assert!(report.steps[5].detail.contains("log tail failed"));
    }

    #[tokio::test]
    async fn check_mode_issues_no_remote_calls() {
        // No expectations: any provider call would panic the test.
        let mock = MockCloudProvider::new();
        let env = write_env_file(FULL_ENV);
        let report = runner(test_config(&env), mock)
            .with_check_mode(true)
            .run(&NullObserver)
            .await;

        assert_eq!(report.exit_code(), 0);
        assert!(report.check_mode);
        assert_eq!(report.steps[1].status, StepStatus::WouldChange);
        assert_eq!(report.steps[2].status, StepStatus::WouldChange);
        assert_eq!(report.steps[3].status, StepStatus::WouldChange);
        assert_eq!(report.steps[4].status, StepStatus::Skipped);
        assert_eq!(report.steps[5].status, StepStatus::Skipped);
    }

    #[tokio::test]
    async fn verify_only_runs_just_the_probes() {
        let mut mock = MockCloudProvider::new();
        mock.expect_get_secret_value()
            .times(3)
            .returning(|_| Ok("value".into()));
        mock.expect_recent_log_events()
            .times(1)
            .returning(|_, _, _| Ok(vec![]));

        let env = write_env_file(FULL_ENV);
        let report = runner(test_config(&env), mock).verify(&NullObserver).await;

        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.steps.len(), 1);
        assert_eq!(report.steps[0].step, StepKind::Verify);
        assert_eq!(report.probes.len(), 3);
    }
}
