//! IAM read-access policy document construction.
//!
//! The execution role gets an inline policy allowing
//! `secretsmanager:GetSecretValue` on exactly the configured secrets.
//! Resource ARNs are wildcard-suffixed because Secrets Manager appends a
//! random six-character suffix to every secret ARN.

use serde_json::{json, Value};

use crate::config::RemedyConfig;

/// Build the wildcard-suffixed ARN for one secret.
pub fn secret_wildcard_arn(region: &str, account_id: &str, secret_id: &str) -> String {
    format!(
        "arn:aws:secretsmanager:{}:{}:secret:{}-*",
        region, account_id, secret_id
    )
}

/// Build the inline policy document as a JSON value.
pub fn read_access_document(config: &RemedyConfig) -> Value {
    let resources: Vec<String> = config
        .secrets
        .iter()
        .map(|t| secret_wildcard_arn(&config.aws.region, &config.aws.account_id, &t.secret_id))
        .collect();

    json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Sid": "ReadServiceSecrets",
            "Effect": "Allow",
            "Action": "secretsmanager:GetSecretValue",
            "Resource": resources,
        }]
    })
}

/// Build the inline policy document as the JSON string the IAM API expects.
pub fn read_access_document_json(config: &RemedyConfig) -> String {
    read_access_document(config).to_string()
}
