//! Subcommands module for Stackforge CLI
//!
//! This module contains all the subcommand implementations.

pub mod completions;
pub mod graph;
pub mod params;
pub mod synth;
pub mod validate;

use crate::cli::output::OutputFormatter;
use crate::cli::{OutputFormat, ParamOverrides};
use anyhow::Result;
use stackforge::config::Config;
use stackforge::params::{ParamBuilder, ParamBundle};

/// Common context shared between commands
pub struct CommandContext {
    /// Configuration
    pub config: Config,
    /// Output formatter
    pub output: OutputFormatter,
    /// Output format
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context from CLI arguments
    pub fn new(cli: &crate::cli::Cli, config: Config) -> Self {
        let machine_mode = !matches!(cli.output, OutputFormat::Human);
        let output = OutputFormatter::new(!cli.no_color, machine_mode, cli.verbosity());

        Self {
            config,
            output,
            format: cli.output,
        }
    }

    /// Resolve the parameter bundle from all sources.
    ///
    /// Precedence, lowest to highest: built-in defaults, config file,
    /// environment variables, CLI flags.
    pub fn resolve_params(&self, overrides: &ParamOverrides) -> Result<ParamBundle> {
        let mut builder = ParamBuilder::new();

        // Config file layer
        if let Some(v) = &self.config.naming.organization {
            builder = builder.organization(v);
        }
        if let Some(v) = &self.config.naming.project {
            builder = builder.project(v);
        }
        if let Some(v) = &self.config.naming.environment {
            builder = builder.environment(v);
        }
        if let Some(v) = &self.config.target.account {
            builder = builder.account(v);
        }
        if let Some(v) = &self.config.target.region {
            builder = builder.region(v);
        }
        if let Some(v) = &self.config.network.cidr {
            builder = builder.network_cidr(v);
        }
        if let Some(v) = &self.config.network.service_port {
            builder = builder.service_port(v);
        }
        if let Some(v) = &self.config.table.name {
            builder = builder.table_name(v);
        }
        if let Some(v) = &self.config.table.partition_key {
            builder = builder.partition_key(v);
        }

        // Environment layer
        builder = builder.apply_env();

        // CLI flag layer
        if let Some(v) = &overrides.organization {
            builder = builder.organization(v);
        }
        if let Some(v) = &overrides.project {
            builder = builder.project(v);
        }
        if let Some(v) = &overrides.environment {
            builder = builder.environment(v);
        }
        if let Some(v) = &overrides.region {
            builder = builder.region(v);
        }
        if let Some(v) = &overrides.account {
            builder = builder.account(v);
        }
        if let Some(v) = &overrides.port {
            builder = builder.service_port(v);
        }
        if let Some(v) = &overrides.network_cidr {
            builder = builder.network_cidr(v);
        }
        if let Some(v) = &overrides.table_name {
            builder = builder.table_name(v);
        }
        if let Some(v) = &overrides.partition_key {
            builder = builder.partition_key(v);
        }

        Ok(builder.build()?)
    }
}
