//! CLI module for Stackforge
//!
//! This module provides the command-line interface for Stackforge,
//! including argument parsing, configuration loading, and subcommand
//! handling.

pub mod commands;
pub mod output;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Stackforge - A declarative cloud stack synthesizer
///
/// Declares network, security, and data-tier resources and renders them as
/// provisioning-engine templates.
#[derive(Parser, Debug, Clone)]
#[command(name = "stackforge")]
#[command(author = "Stackforge Contributors")]
#[command(version)]
#[command(about = "A declarative cloud stack synthesizer", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true, env = "STACKFORGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format for command results
    #[arg(long, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON output for scripting
    Json,
    /// YAML output
    Yaml,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Human
    }
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Synthesize the stack into a template
    Synth(commands::synth::SynthArgs),

    /// Show the resolved parameter bundle
    Params(commands::params::ParamsArgs),

    /// Print the creation-order hint graph
    Graph(commands::graph::GraphArgs),

    /// Check parameters and declarations without synthesizing
    Validate(commands::validate::ValidateArgs),

    /// Generate shell completions
    Completions(commands::completions::CompletionsArgs),
}

/// Parameter overrides shared by the stack-building subcommands.
///
/// These are the last layer of precedence: they win over environment
/// variables, which win over config files.
#[derive(Args, Debug, Clone, Default)]
pub struct ParamOverrides {
    /// Organization name
    #[arg(long)]
    pub organization: Option<String>,

    /// Project name
    #[arg(long)]
    pub project: Option<String>,

    /// Environment name
    #[arg(long, short = 'E')]
    pub environment: Option<String>,

    /// Target region
    #[arg(long)]
    pub region: Option<String>,

    /// Target account
    #[arg(long)]
    pub account: Option<String>,

    /// Service port admitted by the rule set
    #[arg(long)]
    pub port: Option<String>,

    /// Parent network address block (CIDR)
    #[arg(long)]
    pub network_cidr: Option<String>,

    /// Key-value table name
    #[arg(long)]
    pub table_name: Option<String>,

    /// Partition-key attribute name
    #[arg(long)]
    pub partition_key: Option<String>,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Get the effective verbosity level (0-3)
    pub fn verbosity(&self) -> u8 {
        self.verbose.min(3)
    }
}

/// Environment variable helper functions
pub mod env {
    use std::env;

    /// Check if colors should be disabled
    pub fn no_color() -> bool {
        env::var("NO_COLOR").is_ok() || env::var("STACKFORGE_NO_COLOR").is_ok()
    }
}
