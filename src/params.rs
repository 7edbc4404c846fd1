//! Parameter bundle assembly.
//!
//! The parameter bundle is the single input to stack declaration: a flat,
//! immutable mapping of naming, tagging, environment, network, and table
//! configuration values. It is assembled once by [`ParamBuilder`] and
//! read-only thereafter.
//!
//! ## Sources and precedence
//!
//! Values are layered, later sources overriding earlier ones:
//!
//! 1. Built-in sample defaults
//! 2. Configuration file (seeded by the caller via the builder setters)
//! 3. Process environment (account and region only, see below)
//! 4. Explicit setter calls after [`ParamBuilder::apply_env`] (CLI flags)
//!
//! ## Environment variables
//!
//! | Variable | Fallbacks | Provides |
//! |----------|-----------|----------|
//! | `STACKFORGE_ACCOUNT` | `AWS_ACCOUNT_ID` | Target account |
//! | `STACKFORGE_REGION` | `AWS_REGION`, `AWS_DEFAULT_REGION` | Target region |
//!
//! The account is allowed to stay unset: declarations that need it fall back
//! to engine-side resolution, and direct locator queries return a typed
//! error instead of fabricating a broken identifier.

use crate::error::{Error, Result};
use crate::net::Ipv4Net;
use serde::{Deserialize, Serialize};
use std::env;
use validator::Validate;

/// Primary environment variable for the target account.
pub const ENV_ACCOUNT: &str = "STACKFORGE_ACCOUNT";
/// Fallback environment variable for the target account.
pub const ENV_ACCOUNT_FALLBACK: &str = "AWS_ACCOUNT_ID";
/// Primary environment variable for the target region.
pub const ENV_REGION: &str = "STACKFORGE_REGION";
/// Fallback environment variables for the target region, in order.
pub const ENV_REGION_FALLBACKS: [&str; 2] = ["AWS_REGION", "AWS_DEFAULT_REGION"];

/// Built-in sample defaults. These are the zero-config experience; every one
/// of them can be overridden by config file, environment, or CLI flag.
pub mod defaults {
    /// Default organization name.
    pub const ORGANIZATION: &str = "org";
    /// Default project name.
    pub const PROJECT: &str = "energy";
    /// Default environment name.
    pub const ENVIRONMENT: &str = "dev";
    /// Default region when neither environment nor config supplies one.
    pub const REGION: &str = "us-east-1";
    /// Default service port.
    pub const SERVICE_PORT: &str = "443";
    /// Default network address block.
    pub const NETWORK_CIDR: &str = "10.0.0.0/16";
    /// Default table name.
    pub const TABLE_NAME: &str = "renewable-energy";
    /// Default partition-key attribute name.
    pub const PARTITION_KEY: &str = "id";
}

/// The assembled, immutable parameter bundle.
///
/// Construct through [`ParamBuilder`]; the fields are public for reading but
/// the bundle is never mutated after [`ParamBuilder::build`] returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ParamBundle {
    /// Organization name, first segment of the naming prefix.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub organization: String,

    /// Project name, second segment of the naming prefix.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub project: String,

    /// Environment name (dev, staging, prod, ...).
    #[validate(length(min = 1, message = "must not be empty"))]
    pub environment: String,

    /// Target region.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub region: String,

    /// Target account. Stays unset when nothing supplies it; see module docs.
    pub account: Option<String>,

    /// Service port admitted by the traffic rule set.
    #[validate(range(min = 1, message = "must be a positive port number"))]
    pub service_port: u16,

    /// Parent address block of the declared network.
    pub network_cidr: Ipv4Net,

    /// Derived naming prefix: `<org>-<project>-<environment>-<region>`.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub prefix: String,

    /// Key-value table name.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub table_name: String,

    /// Partition-key attribute name of the table.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub partition_key: String,
}

impl ParamBundle {
    /// The derived naming prefix.
    pub fn naming_prefix(&self) -> &str {
        &self.prefix
    }

    /// Export name for a cross-configuration output, `<prefix>-<suffix>`.
    pub fn export_name(&self, suffix: &str) -> String {
        format!("{}-{}", self.prefix, suffix)
    }

    /// Tags propagated onto every declared resource.
    pub fn tags(&self) -> Vec<(String, String)> {
        vec![
            ("Organization".to_string(), self.organization.clone()),
            ("Project".to_string(), self.project.clone()),
            ("Environment".to_string(), self.environment.clone()),
        ]
    }

    /// Locator partition for the configured region.
    pub fn partition(&self) -> &'static str {
        if self.region.starts_with("cn-") {
            "aws-cn"
        } else if self.region.starts_with("us-gov-") {
            "aws-us-gov"
        } else {
            "aws"
        }
    }

    /// Run field validation over the bundle.
    pub fn check(&self) -> Result<()> {
        self.validate()
            .map_err(|e| Error::BundleValidation(e.to_string()))
    }
}

/// Builder for [`ParamBundle`].
///
/// All setters overwrite: precedence is established by calling order, not by
/// first-wins rules. String-typed inputs (port, CIDR) are kept raw until
/// [`build`](Self::build) so parse failures carry the offending source value.
#[derive(Debug, Clone, Default)]
pub struct ParamBuilder {
    organization: Option<String>,
    project: Option<String>,
    environment: Option<String>,
    region: Option<String>,
    account: Option<String>,
    service_port: Option<String>,
    network_cidr: Option<String>,
    table_name: Option<String>,
    partition_key: Option<String>,
}

impl ParamBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the organization name.
    pub fn organization(mut self, value: impl Into<String>) -> Self {
        self.organization = Some(value.into());
        self
    }

    /// Set the project name.
    pub fn project(mut self, value: impl Into<String>) -> Self {
        self.project = Some(value.into());
        self
    }

    /// Set the environment name.
    pub fn environment(mut self, value: impl Into<String>) -> Self {
        self.environment = Some(value.into());
        self
    }

    /// Set the target region.
    pub fn region(mut self, value: impl Into<String>) -> Self {
        self.region = Some(value.into());
        self
    }

    /// Set the target account.
    pub fn account(mut self, value: impl Into<String>) -> Self {
        self.account = Some(value.into());
        self
    }

    /// Set the service port from its string form.
    pub fn service_port(mut self, value: impl Into<String>) -> Self {
        self.service_port = Some(value.into());
        self
    }

    /// Set the network address block from its string form.
    pub fn network_cidr(mut self, value: impl Into<String>) -> Self {
        self.network_cidr = Some(value.into());
        self
    }

    /// Set the table name.
    pub fn table_name(mut self, value: impl Into<String>) -> Self {
        self.table_name = Some(value.into());
        self
    }

    /// Set the partition-key attribute name.
    pub fn partition_key(mut self, value: impl Into<String>) -> Self {
        self.partition_key = Some(value.into());
        self
    }

    /// Pull account and region from the process environment.
    ///
    /// Environment values override whatever was set before this call, so
    /// call it after seeding from a config file and before applying CLI
    /// flags.
    pub fn apply_env(mut self) -> Self {
        if let Some(account) = env_chain(ENV_ACCOUNT, &[ENV_ACCOUNT_FALLBACK]) {
            self.account = Some(account);
        }
        if let Some(region) = env_chain(ENV_REGION, &ENV_REGION_FALLBACKS) {
            self.region = Some(region);
        }
        self
    }

    /// Assemble the bundle, filling defaults, parsing string-typed inputs,
    /// deriving the naming prefix, and validating every field.
    pub fn build(self) -> Result<ParamBundle> {
        let organization = self
            .organization
            .unwrap_or_else(|| defaults::ORGANIZATION.to_string());
        let project = self.project.unwrap_or_else(|| defaults::PROJECT.to_string());
        let environment = self
            .environment
            .unwrap_or_else(|| defaults::ENVIRONMENT.to_string());
        let region = self.region.unwrap_or_else(|| defaults::REGION.to_string());

        let port_raw = self
            .service_port
            .unwrap_or_else(|| defaults::SERVICE_PORT.to_string());
        let service_port: u16 = port_raw.trim().parse().map_err(|_| Error::InvalidParameter {
            name: "service_port".to_string(),
            message: format!("'{port_raw}' is not a valid port number"),
        })?;
        if service_port == 0 {
            return Err(Error::InvalidParameter {
                name: "service_port".to_string(),
                message: "port 0 is not addressable".to_string(),
            });
        }

        let network_cidr: Ipv4Net = self
            .network_cidr
            .unwrap_or_else(|| defaults::NETWORK_CIDR.to_string())
            .parse()?;

        let prefix = format!("{organization}-{project}-{environment}-{region}");
        tracing::debug!(prefix = %prefix, "derived naming prefix");

        let bundle = ParamBundle {
            organization,
            project,
            environment,
            region,
            account: self.account,
            service_port,
            network_cidr,
            prefix,
            table_name: self
                .table_name
                .unwrap_or_else(|| defaults::TABLE_NAME.to_string()),
            partition_key: self
                .partition_key
                .unwrap_or_else(|| defaults::PARTITION_KEY.to_string()),
        };

        bundle.check()?;
        Ok(bundle)
    }
}

fn env_chain(primary: &str, fallbacks: &[&str]) -> Option<String> {
    std::iter::once(primary)
        .chain(fallbacks.iter().copied())
        .find_map(|var| env::var(var).ok().filter(|v| !v.is_empty()))
}
