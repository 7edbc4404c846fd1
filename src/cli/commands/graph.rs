//! The `graph` subcommand: print the creation-order hint graph.

use super::CommandContext;
use crate::cli::ParamOverrides;
use anyhow::Result;
use clap::Args;
use stackforge::stack::Stack;

/// Arguments for the graph command
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Print the topological creation order instead of DOT
    #[arg(long)]
    pub order: bool,

    /// Parameter overrides
    #[command(flatten)]
    pub overrides: ParamOverrides,
}

impl GraphArgs {
    /// Execute the graph command
    pub fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let params = ctx.resolve_params(&self.overrides)?;
        let stack = Stack::declare(&params)?;

        if self.order {
            for id in stack.hints().creation_order()? {
                println!("{}", id);
            }
        } else {
            print!("{}", stack.hints().to_dot());
        }

        Ok(0)
    }
}
