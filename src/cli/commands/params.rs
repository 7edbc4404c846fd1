//! The `params` subcommand: show the resolved parameter bundle.

use super::CommandContext;
use crate::cli::{OutputFormat, ParamOverrides};
use anyhow::Result;
use clap::Args;

/// Arguments for the params command
#[derive(Args, Debug, Clone)]
pub struct ParamsArgs {
    /// Parameter overrides
    #[command(flatten)]
    pub overrides: ParamOverrides,
}

impl ParamsArgs {
    /// Execute the params command
    pub fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let params = ctx.resolve_params(&self.overrides)?;

        match ctx.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&params)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&params)?),
            OutputFormat::Human => {
                ctx.output.banner("PARAMETER BUNDLE");
                ctx.output.key_value("organization", &params.organization);
                ctx.output.key_value("project", &params.project);
                ctx.output.key_value("environment", &params.environment);
                ctx.output.key_value("region", &params.region);
                ctx.output
                    .key_value("account", params.account.as_deref().unwrap_or("(unset)"));
                ctx.output
                    .key_value("service port", &params.service_port.to_string());
                ctx.output
                    .key_value("network cidr", &params.network_cidr.to_string());
                ctx.output.key_value("prefix", params.naming_prefix());
                ctx.output.key_value("table", &params.table_name);
                ctx.output.key_value("partition key", &params.partition_key);
            }
        }

        Ok(0)
    }
}
