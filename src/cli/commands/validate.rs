//! The `validate` subcommand: check parameters and declarations.

use super::CommandContext;
use crate::cli::ParamOverrides;
use anyhow::Result;
use clap::Args;
use stackforge::stack::Stack;

/// Arguments for the validate command
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Parameter overrides
    #[command(flatten)]
    pub overrides: ParamOverrides,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        ctx.output.banner("STACK VALIDATION");

        let mut errors = 0;
        let mut warnings = 0;

        let params = match ctx.resolve_params(&self.overrides) {
            Ok(params) => params,
            Err(e) => {
                ctx.output.error(&format!("Parameter bundle: {e}"));
                return Ok(1);
            }
        };
        ctx.output
            .info(&format!("Parameter bundle resolved: {}", params.naming_prefix()));

        if params.account.is_none() {
            ctx.output.warning(
                "account is unset; the table locator output will be resolved by the engine",
            );
            warnings += 1;
        }

        match Stack::declare(&params) {
            Ok(stack) => {
                ctx.output.info(&format!(
                    "Declared {} subnets ({} public, {} isolated), {} ingress rules",
                    stack.network().subnets.len(),
                    stack.network().public_subnets().count(),
                    stack.network().isolated_subnets().count(),
                    stack.rule_set().rules().len(),
                ));

                if let Err(e) = stack.network().verify() {
                    ctx.output.error(&format!("Network invariants: {e}"));
                    errors += 1;
                }

                match stack.hints().creation_order() {
                    Ok(order) => ctx
                        .output
                        .debug(&format!("Creation order: {}", order.join(" -> "))),
                    Err(e) => {
                        ctx.output.error(&format!("Dependency hints: {e}"));
                        errors += 1;
                    }
                }
            }
            Err(e) => {
                ctx.output.error(&format!("Declaration failed: {e}"));
                errors += 1;
            }
        }

        ctx.output.section("Validation Results");
        if errors == 0 && warnings == 0 {
            ctx.output.info("Stack is valid. No issues found.");
            Ok(0)
        } else if errors == 0 {
            ctx.output
                .info(&format!("Stack is valid with {} warning(s)", warnings));
            Ok(0)
        } else {
            ctx.output.error(&format!(
                "Stack has {} error(s) and {} warning(s)",
                errors, warnings
            ));
            Ok(1)
        }
    }
}
