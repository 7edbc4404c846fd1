//! Comprehensive CLI tests for Stackforge
//!
//! This test suite covers the CLI surface including:
//! - Argument and subcommand parsing with clap
//! - Template synthesis to stdout and to a file
//! - Output format handling
//! - Config file loading and flag precedence
//! - Error handling for invalid arguments

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

// Helper to get a command for testing, insulated from ambient credentials
fn stackforge_cmd() -> Command {
    let mut cmd = Command::cargo_bin("stackforge").unwrap();
    for var in [
        "STACKFORGE_ACCOUNT",
        "AWS_ACCOUNT_ID",
        "STACKFORGE_REGION",
        "AWS_REGION",
        "AWS_DEFAULT_REGION",
        "STACKFORGE_CONFIG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

// Helper to create a config file
fn create_test_config() -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"[naming]
organization = "acme"
project = "grid"
environment = "prod"

[target]
account = "123456789012"
region = "eu-west-1"

[table]
name = "metering-events"
"#
    )
    .unwrap();
    file
}

#[test]
fn test_help() {
    stackforge_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("declarative cloud stack synthesizer"))
        .stdout(predicate::str::contains("synth"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_version() {
    stackforge_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stackforge"));
}

#[test]
fn test_unknown_subcommand_fails() {
    stackforge_cmd().arg("deploy").assert().failure();
}

#[test]
fn test_synth_emits_parseable_json() {
    let output = stackforge_cmd()
        .args(["synth", "--account", "123456789012"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let doc: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(doc["AWSTemplateFormatVersion"], "2010-09-09");
    assert_eq!(doc["Resources"]["Table"]["Type"], "AWS::DynamoDB::Table");
    assert_eq!(
        doc["Outputs"]["TableLocator"]["Value"],
        "arn:aws:dynamodb:us-east-1:123456789012:table/renewable-energy"
    );
}

#[test]
fn test_synth_without_account_defers_locator() {
    let output = stackforge_cmd()
        .arg("synth")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let doc: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(doc["Outputs"]["TableLocator"]["Value"]["Fn::GetAtt"][0], "Table");
}

#[test]
fn test_synth_yaml_format() {
    let output = stackforge_cmd()
        .args(["synth", "--format", "yaml"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let doc: serde_yaml::Value = serde_yaml::from_slice(&output).unwrap();
    assert_eq!(doc["Resources"]["Network"]["Type"], "AWS::EC2::VPC");
}

#[test]
fn test_synth_writes_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("template.json");

    stackforge_cmd()
        .args(["synth", "-o"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Synthesized"));

    let doc: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(doc["Resources"].as_object().unwrap().len(), 8);
}

#[test]
fn test_synth_respects_flag_overrides() {
    let output = stackforge_cmd()
        .args([
            "synth",
            "--organization",
            "globex",
            "--port",
            "8443",
            "--table-name",
            "audit-log",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let doc: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(doc["Resources"]["Table"]["Properties"]["TableName"], "audit-log");
    let ingress = doc["Resources"]["RuleSet"]["Properties"]["SecurityGroupIngress"]
        .as_array()
        .unwrap();
    assert_eq!(ingress[1]["FromPort"], 8443);
    assert!(doc["Outputs"]["NetworkId"]["Export"]["Name"]
        .as_str()
        .unwrap()
        .starts_with("globex-"));
}

#[test]
fn test_params_json_output() {
    let output = stackforge_cmd()
        .args(["params", "--output", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let doc: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(doc["organization"], "org");
    assert_eq!(doc["prefix"], "org-energy-dev-us-east-1");
    assert_eq!(doc["service_port"], 443);
}

#[test]
fn test_params_human_output() {
    stackforge_cmd()
        .args(["params", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PARAMETER BUNDLE"))
        .stdout(predicate::str::contains("org-energy-dev-us-east-1"));
}

#[test]
fn test_graph_emits_dot() {
    stackforge_cmd()
        .arg("graph")
        .assert()
        .success()
        .stdout(predicate::str::contains("digraph creation_order"))
        .stdout(predicate::str::contains("\"Network\" -> \"RuleSet\""))
        .stdout(predicate::str::contains("\"RuleSet\" -> \"SubnetGroup\""))
        .stdout(predicate::str::contains("\"SubnetGroup\" -> \"Table\""));
}

#[test]
fn test_graph_order() {
    let output = stackforge_cmd()
        .args(["graph", "--order"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let lines: Vec<&str> = std::str::from_utf8(&output).unwrap().lines().collect();
    assert_eq!(lines, vec!["Network", "RuleSet", "SubnetGroup", "Table"]);
}

#[test]
fn test_validate_success() {
    stackforge_cmd()
        .args(["validate", "--account", "123456789012", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn test_validate_warns_on_missing_account() {
    stackforge_cmd()
        .args(["validate", "--no-color"])
        .assert()
        .success()
        .stderr(predicate::str::contains("account is unset"));
}

#[test]
fn test_validate_reports_bad_port() {
    stackforge_cmd()
        .args(["validate", "--port", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("service_port"));
}

#[test]
fn test_synth_fails_on_bad_cidr() {
    stackforge_cmd()
        .args(["synth", "--network-cidr", "10.0.0.0/33"])
        .assert()
        .failure();
}

#[test]
fn test_config_file_is_honored() {
    let config = create_test_config();

    let output = stackforge_cmd()
        .args(["params", "--output", "json", "-c"])
        .arg(config.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let doc: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(doc["organization"], "acme");
    assert_eq!(doc["region"], "eu-west-1");
    assert_eq!(doc["table_name"], "metering-events");
}

#[test]
fn test_flags_beat_config_file() {
    let config = create_test_config();

    let output = stackforge_cmd()
        .args(["params", "--output", "json", "--region", "us-west-2", "-c"])
        .arg(config.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let doc: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(doc["region"], "us-west-2");
    assert_eq!(doc["organization"], "acme");
}

#[test]
fn test_env_beats_config_file() {
    let config = create_test_config();

    let output = stackforge_cmd()
        .args(["params", "--output", "json", "-c"])
        .arg(config.path())
        .env("STACKFORGE_REGION", "ap-northeast-1")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let doc: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(doc["region"], "ap-northeast-1");
}

#[test]
fn test_completions_generate() {
    stackforge_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stackforge"));
}
