//! The `synth` subcommand: declare the stack and render the template.

use super::CommandContext;
use crate::cli::ParamOverrides;
use anyhow::Result;
use clap::{Args, ValueEnum};
use stackforge::stack::Stack;
use stackforge::synth::synthesize;
use std::path::PathBuf;

/// Template serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemplateFormat {
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

/// Arguments for the synth command
#[derive(Args, Debug, Clone)]
pub struct SynthArgs {
    /// Write the template to a file instead of stdout
    #[arg(short = 'o', long)]
    pub out: Option<PathBuf>,

    /// Template serialization format
    #[arg(short = 'f', long, default_value = "json")]
    pub format: TemplateFormat,

    /// Parameter overrides
    #[command(flatten)]
    pub overrides: ParamOverrides,
}

impl SynthArgs {
    /// Execute the synth command
    pub fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let params = ctx.resolve_params(&self.overrides)?;
        let stack = Stack::declare(&params)?;
        let template = synthesize(&stack)?;

        let rendered = match self.format {
            TemplateFormat::Json => template.to_json()?,
            TemplateFormat::Yaml => template.to_yaml()?,
        };

        match &self.out {
            Some(path) => {
                std::fs::write(path, rendered.as_bytes())?;
                ctx.output.info(&format!(
                    "Synthesized {} ({} resources, {} outputs) to {}",
                    stack.name(),
                    template.resources.len(),
                    template.outputs.len(),
                    path.display()
                ));
            }
            None => {
                // Template is the command's entire stdout contract; status
                // goes through tracing only.
                tracing::info!(stack = %stack.name(), "synthesized template to stdout");
                println!("{}", rendered);
            }
        }

        Ok(0)
    }
}
