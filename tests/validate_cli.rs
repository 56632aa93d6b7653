//! CLI tests for the offline `validate` subcommand.
//!
//! `validate` issues no AWS calls, so these tests exercise the real
//! binary end to end: configuration loading, env file checking, exit
//! codes, and the printed plan.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

const FULL_ENV: &str = "ANTHROPIC_API_KEY=a1\nSERP_API_KEY=s1\nYOUTUBE_API_KEY=y1\n";

fn write_env_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn ecs_remedy() -> Command {
    Command::cargo_bin("ecs-remedy").unwrap()
}

#[test]
fn validate_passes_with_complete_env_file() {
    let env = write_env_file(FULL_ENV);

    ecs_remedy()
        .args(["--no-color", "--env-file"])
        .arg(env.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation passed"))
        .stdout(predicate::str::contains(
            "$SERP_API_KEY -> content-ai-agent/serp-api-key",
        ));
}

#[test]
fn validate_fails_on_missing_key() {
    let env = write_env_file("ANTHROPIC_API_KEY=a1\nSERP_API_KEY=s1\n");

    ecs_remedy()
        .args(["--no-color", "--env-file"])
        .arg(env.path())
        .arg("validate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("YOUTUBE_API_KEY"));
}

#[test]
fn validate_fails_on_empty_value() {
    let env = write_env_file("ANTHROPIC_API_KEY=a1\nSERP_API_KEY=\nYOUTUBE_API_KEY=y1\n");

    ecs_remedy()
        .args(["--no-color", "--env-file"])
        .arg(env.path())
        .arg("validate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("SERP_API_KEY"));
}

#[test]
fn validate_fails_on_missing_env_file() {
    ecs_remedy()
        .args([
            "--no-color",
            "--env-file",
            "/nonexistent/path/.env",
            "validate",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("env file"));
}

#[test]
fn validate_show_policy_prints_document() {
    let env = write_env_file(FULL_ENV);

    ecs_remedy()
        .args(["--no-color", "--env-file"])
        .arg(env.path())
        .args(["validate", "--show-policy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("secretsmanager:GetSecretValue"))
        .stdout(predicate::str::contains(
            "secret:content-ai-agent/anthropic-api-key-*",
        ));
}

#[test]
fn validate_respects_config_file() {
    let env = write_env_file("API_KEY=k1\n");
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        config,
        r#"
[[secrets]]
env_key = "API_KEY"
secret_id = "myapp/api-key"

[aws]
region = "eu-west-1"
"#
    )
    .unwrap();
    config.flush().unwrap();

    ecs_remedy()
        .args(["--no-color", "--config"])
        .arg(config.path())
        .arg("--env-file")
        .arg(env.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("$API_KEY -> myapp/api-key"))
        .stdout(predicate::str::contains("eu-west-1"));
}

#[test]
fn explicit_config_must_exist() {
    ecs_remedy()
        .args([
            "--no-color",
            "--config",
            "/nonexistent/ecs-remedy.toml",
            "validate",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn completions_generate_without_config() {
    ecs_remedy()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ecs-remedy"));
}

#[test]
fn help_lists_subcommands() {
    ecs_remedy()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("verify"))
        .stdout(predicate::str::contains("validate"));
}
