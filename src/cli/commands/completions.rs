//! The `completions` subcommand: generate shell completion scripts.

use super::CommandContext;
use crate::cli::Cli;
use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

/// Arguments for the completions command
#[derive(Args, Debug, Clone)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}

impl CompletionsArgs {
    /// Execute the completions command
    pub fn execute(&self, _ctx: &mut CommandContext) -> Result<i32> {
        let mut cmd = Cli::command();
        generate(self.shell, &mut cmd, "stackforge", &mut io::stdout());
        Ok(0)
    }
}
