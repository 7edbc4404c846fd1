//! # Stackforge - A Declarative Cloud Stack Synthesizer
//!
//! Stackforge assembles a parameter bundle, declares a cloud resource graph
//! (network, subnets, traffic rule set, data-tier subnet grouping, and a
//! key-value table), wires explicit creation-order hints between the
//! declarations, and synthesizes the whole graph into a provisioning-engine
//! template with named outputs.
//!
//! Stackforge itself never talks to a cloud API: planning, diffing, ordered
//! creation, retries, and rollback all belong to the external provisioning
//! engine that consumes the synthesized template.
//!
//! ## Core Concepts
//!
//! - **Parameter bundle**: a flat, immutable mapping of naming, tagging,
//!   environment, network, and table configuration values
//! - **Network**: an isolated virtual address space with public and
//!   isolated subnet ranges carved from a parent block
//! - **Rule set**: a named, append-only collection of ingress allow rules
//!   attached to the network
//! - **Subnet grouping**: a named set of isolated subnets designated for
//!   the data tier
//! - **Table**: a key-value table with a single partition key and
//!   on-demand capacity billing
//! - **Dependency hints**: directed creation-order edges handed to the
//!   engine alongside the declarations
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       CLI Interface                          │
//! │                (clap-based command parsing)                  │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Parameter Builder                        │
//! │      (defaults ← config file ← environment ← flags)          │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Resource Declaration Unit                    │
//! │   network → rule set → subnet grouping → key-value table     │
//! │              (+ creation-order hint graph)                   │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Template Synthesis                        │
//! │           (JSON/YAML document + named outputs)               │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//!                 external provisioning engine
//! ```
//!
//! ## Quick Example
//!
//! ```rust
//! use stackforge::prelude::*;
//!
//! fn main() -> stackforge::error::Result<()> {
//!     let params = ParamBuilder::new()
//!         .organization("acme")
//!         .project("grid")
//!         .environment("prod")
//!         .region("eu-west-1")
//!         .account("123456789012")
//!         .build()?;
//!
//!     let stack = Stack::declare(&params)?;
//!     let template = synthesize(&stack)?;
//!     println!("{}", template.to_json()?);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod net;
pub mod params;
pub mod stack;
pub mod synth;

/// Convenient re-exports of commonly used types.
pub mod prelude {
    //! Quick access to the most commonly needed types:
    //!
    //! - **Parameters**: [`ParamBundle`], [`ParamBuilder`]
    //! - **Declarations**: [`Stack`] and the resource types it holds
    //! - **Synthesis**: [`synthesize`] and [`Template`]
    //! - **Errors**: [`Error`], [`Result`]

    pub use crate::error::{Error, Result};
    pub use crate::net::Ipv4Net;
    pub use crate::params::{ParamBuilder, ParamBundle};
    pub use crate::stack::graph::{CreationHint, HintGraph, HintNode};
    pub use crate::stack::network::{Network, NetworkSpec, Reachability, Subnet, SubnetSpec};
    pub use crate::stack::outputs::{OutputValue, StackOutput};
    pub use crate::stack::rules::{IngressRule, RuleSet};
    pub use crate::stack::subnet_group::SubnetGroup;
    pub use crate::stack::table::{AttributeType, BillingMode, DeletionPolicy, Table};
    pub use crate::stack::Stack;
    pub use crate::synth::{synthesize, Template};
}
