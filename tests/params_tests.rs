//! Integration tests for the parameter builder
//!
//! These tests verify parameter bundle assembly including:
//! - Naming prefix derivation
//! - Built-in defaults and setter precedence
//! - Environment variable resolution with documented fallbacks
//! - Port and CIDR parsing errors
//! - Bundle field validation

use serial_test::serial;
use stackforge::error::Error;
use stackforge::params::{
    defaults, ParamBuilder, ENV_ACCOUNT, ENV_ACCOUNT_FALLBACK, ENV_REGION, ENV_REGION_FALLBACKS,
};

fn clear_env() {
    for var in [ENV_ACCOUNT, ENV_ACCOUNT_FALLBACK, ENV_REGION]
        .into_iter()
        .chain(ENV_REGION_FALLBACKS)
    {
        std::env::remove_var(var);
    }
}

// ============================================================================
// Naming Prefix
// ============================================================================

#[test]
fn test_prefix_is_org_project_environment_region() {
    for (org, project, env, region) in [
        ("org", "energy", "dev", "us-east-1"),
        ("acme", "grid", "prod", "eu-west-1"),
        ("globex", "metering", "staging", "ap-southeast-2"),
    ] {
        let bundle = ParamBuilder::new()
            .organization(org)
            .project(project)
            .environment(env)
            .region(region)
            .build()
            .unwrap();
        assert_eq!(
            bundle.naming_prefix(),
            format!("{org}-{project}-{env}-{region}")
        );
    }
}

#[test]
fn test_export_names_extend_prefix() {
    let bundle = ParamBuilder::new().build().unwrap();
    assert_eq!(
        bundle.export_name("table-locator"),
        format!("{}-table-locator", bundle.naming_prefix())
    );
}

// ============================================================================
// Defaults and Precedence
// ============================================================================

#[test]
#[serial]
fn test_zero_config_defaults() {
    clear_env();
    let bundle = ParamBuilder::new().apply_env().build().unwrap();

    assert_eq!(bundle.organization, defaults::ORGANIZATION);
    assert_eq!(bundle.project, defaults::PROJECT);
    assert_eq!(bundle.environment, defaults::ENVIRONMENT);
    assert_eq!(bundle.region, defaults::REGION);
    assert_eq!(bundle.table_name, defaults::TABLE_NAME);
    assert_eq!(bundle.partition_key, defaults::PARTITION_KEY);
    assert_eq!(bundle.service_port, 443);
    assert!(bundle.account.is_none());
}

#[test]
fn test_setters_override_defaults() {
    let bundle = ParamBuilder::new()
        .table_name("metering-events")
        .partition_key("meter_id")
        .service_port("5432")
        .build()
        .unwrap();

    assert_eq!(bundle.table_name, "metering-events");
    assert_eq!(bundle.partition_key, "meter_id");
    assert_eq!(bundle.service_port, 5432);
}

// ============================================================================
// Environment Resolution
// ============================================================================

#[test]
#[serial]
fn test_account_fallback_chain() {
    clear_env();
    std::env::set_var(ENV_ACCOUNT_FALLBACK, "999999999999");
    let bundle = ParamBuilder::new().apply_env().build().unwrap();
    assert_eq!(bundle.account.as_deref(), Some("999999999999"));

    std::env::set_var(ENV_ACCOUNT, "111111111111");
    let bundle = ParamBuilder::new().apply_env().build().unwrap();
    assert_eq!(bundle.account.as_deref(), Some("111111111111"));

    clear_env();
}

#[test]
#[serial]
fn test_region_fallback_order() {
    clear_env();
    std::env::set_var("AWS_DEFAULT_REGION", "us-west-1");
    let bundle = ParamBuilder::new().apply_env().build().unwrap();
    assert_eq!(bundle.region, "us-west-1");

    std::env::set_var("AWS_REGION", "us-west-2");
    let bundle = ParamBuilder::new().apply_env().build().unwrap();
    assert_eq!(bundle.region, "us-west-2");

    std::env::set_var(ENV_REGION, "eu-north-1");
    let bundle = ParamBuilder::new().apply_env().build().unwrap();
    assert_eq!(bundle.region, "eu-north-1");

    clear_env();
}

#[test]
#[serial]
fn test_empty_env_value_is_ignored() {
    clear_env();
    std::env::set_var(ENV_REGION, "");
    std::env::set_var("AWS_REGION", "sa-east-1");

    let bundle = ParamBuilder::new().apply_env().build().unwrap();
    assert_eq!(bundle.region, "sa-east-1");

    clear_env();
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_port_parse_failures() {
    for bad in ["0", "-22", "65536", "", "four-four-three"] {
        let result = ParamBuilder::new().service_port(bad).build();
        assert!(
            matches!(result, Err(Error::InvalidParameter { .. })),
            "port '{bad}' should be rejected"
        );
    }
}

#[test]
fn test_port_upper_bound_accepted() {
    let bundle = ParamBuilder::new().service_port("65535").build().unwrap();
    assert_eq!(bundle.service_port, 65535);
}

#[test]
fn test_every_string_field_must_be_non_empty() {
    let cases: Vec<(&str, Box<dyn Fn(ParamBuilder) -> ParamBuilder>)> = vec![
        ("organization", Box::new(|b: ParamBuilder| b.organization(""))),
        ("project", Box::new(|b: ParamBuilder| b.project(""))),
        ("environment", Box::new(|b: ParamBuilder| b.environment(""))),
        ("table_name", Box::new(|b: ParamBuilder| b.table_name(""))),
        ("partition_key", Box::new(|b: ParamBuilder| b.partition_key(""))),
    ];

    for (field, apply) in cases {
        let result = apply(ParamBuilder::new()).build();
        assert!(
            matches!(result, Err(Error::BundleValidation(_)) | Err(Error::InvalidResourceName { .. })),
            "empty {field} should be rejected"
        );
    }
}

#[test]
fn test_invalid_network_cidr_rejected() {
    assert!(matches!(
        ParamBuilder::new().network_cidr("not-a-cidr").build(),
        Err(Error::InvalidCidr { .. })
    ));
}
