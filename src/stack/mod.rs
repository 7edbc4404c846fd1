//! The resource declaration unit.
//!
//! [`Stack::declare`] consumes a parameter bundle and declares, in order: a
//! network with public and isolated address ranges, a traffic-filtering rule
//! set attached to that network, a subnet grouping for data-tier placement,
//! and a key-value table with a single partition key and on-demand billing.
//! It attaches explicit creation-order hints between these declarations and
//! registers named outputs identifying each created resource.
//!
//! Every declaration is created once at build time and has no further
//! mutation; the stack is handed wholesale to [`crate::synth`], and the
//! external provisioning engine owns the actual cloud lifecycle.

pub mod graph;
pub mod network;
pub mod outputs;
pub mod rules;
pub mod subnet_group;
pub mod table;

use crate::error::Result;
use crate::params::ParamBundle;
use self::graph::{CreationHint, HintGraph, HintNode};
use self::network::{Network, NetworkSpec};
use self::outputs::{OutputValue, StackOutput};
use self::rules::RuleSet;
use self::subnet_group::SubnetGroup;
use self::table::Table;

/// Engine resource type identifiers for the declarations in this stack.
pub mod resource_types {
    /// The network declaration.
    pub const NETWORK: &str = "AWS::EC2::VPC";
    /// A subnet declaration.
    pub const SUBNET: &str = "AWS::EC2::Subnet";
    /// The traffic rule set declaration.
    pub const RULE_SET: &str = "AWS::EC2::SecurityGroup";
    /// The data-tier subnet grouping declaration.
    pub const SUBNET_GROUP: &str = "AWS::RDS::DBSubnetGroup";
    /// The key-value table declaration.
    pub const TABLE: &str = "AWS::DynamoDB::Table";
}

/// Derive a template logical id from a resource name.
///
/// Splits on non-alphanumeric characters and concatenates the capitalized
/// segments: `public-a-subnet` becomes `PublicASubnet`.
pub fn to_logical_id(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|seg| !seg.is_empty())
        .map(|seg| {
            let mut chars = seg.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// The declared stack: all resources, hints, and outputs.
#[derive(Debug, Clone)]
pub struct Stack {
    name: String,
    description: String,
    params: ParamBundle,
    network: Network,
    rule_set: RuleSet,
    subnet_group: SubnetGroup,
    table: Table,
    hints: HintGraph,
    outputs: Vec<StackOutput>,
}

impl Stack {
    /// Declare the stack from a parameter bundle using the standard wiring.
    pub fn declare(params: &ParamBundle) -> Result<Self> {
        Self::declare_with_network(params, &NetworkSpec::standard(params))
    }

    /// Declare the stack with a caller-supplied network shape.
    pub fn declare_with_network(params: &ParamBundle, spec: &NetworkSpec) -> Result<Self> {
        params.check()?;

        let network = spec.build(params)?;
        let rule_set = RuleSet::standard(params, &network);
        let subnet_group = SubnetGroup::data_tier(params, &network);
        let table = Table::standard(params)?;

        tracing::info!(
            network = %network.name,
            table = %table.name,
            subnets = network.subnets.len(),
            "declared stack resources"
        );

        let mut hints = HintGraph::new();
        hints.add_resource(HintNode::new(
            &network.logical_id,
            &network.name,
            resource_types::NETWORK,
        ));
        hints.add_resource(HintNode::new(
            &rule_set.logical_id,
            &rule_set.name,
            resource_types::RULE_SET,
        ));
        hints.add_resource(HintNode::new(
            &subnet_group.logical_id,
            &subnet_group.name,
            resource_types::SUBNET_GROUP,
        ));
        hints.add_resource(HintNode::new(
            &table.logical_id,
            &table.name,
            resource_types::TABLE,
        ));

        // The required creation chain: network -> rule set -> grouping -> table.
        hints.add_hint(
            CreationHint::new(&network.logical_id, &rule_set.logical_id)
                .with_description("rules attach to the network"),
        )?;
        hints.add_hint(
            CreationHint::new(&rule_set.logical_id, &subnet_group.logical_id)
                .with_description("grouping waits for the rule set"),
        )?;
        hints.add_hint(
            CreationHint::new(&subnet_group.logical_id, &table.logical_id)
                .with_description("table waits for the data tier"),
        )?;

        let outputs = Self::declare_outputs(params, &network, &rule_set, &subnet_group, &table);

        Ok(Self {
            name: params.export_name("stack"),
            description: format!(
                "Network, traffic rules, data-tier grouping, and key-value table for {}",
                params.naming_prefix()
            ),
            params: params.clone(),
            network,
            rule_set,
            subnet_group,
            table,
            hints,
            outputs,
        })
    }

    fn declare_outputs(
        params: &ParamBundle,
        network: &Network,
        rule_set: &RuleSet,
        subnet_group: &SubnetGroup,
        table: &Table,
    ) -> Vec<StackOutput> {
        // The locator can only be spelled out when the account is known;
        // otherwise the engine resolves the attribute at apply time.
        let locator = match table.locator(params) {
            Ok(arn) => OutputValue::Literal(arn),
            Err(_) => OutputValue::Attribute {
                resource: table.logical_id.clone(),
                attribute: "Arn".to_string(),
            },
        };

        vec![
            StackOutput::new(
                "NetworkId",
                "Identifier of the created network",
                OutputValue::Ref(network.logical_id.clone()),
                params.export_name("network-id"),
            ),
            StackOutput::new(
                "RuleSetName",
                "Name of the traffic rule set",
                OutputValue::Literal(rule_set.name.clone()),
                params.export_name("rule-set-name"),
            ),
            StackOutput::new(
                "SubnetGroupName",
                "Name of the data-tier subnet grouping",
                OutputValue::Literal(subnet_group.name.clone()),
                params.export_name("subnet-group-name"),
            ),
            StackOutput::new(
                "TableLocator",
                "Fully qualified locator of the key-value table",
                locator,
                params.export_name("table-locator"),
            ),
        ]
    }

    /// Stack name, `<prefix>-stack`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stack description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The parameter bundle the stack was declared from.
    pub fn params(&self) -> &ParamBundle {
        &self.params
    }

    /// The declared network.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// The declared rule set.
    pub fn rule_set(&self) -> &RuleSet {
        &self.rule_set
    }

    /// The declared subnet grouping.
    pub fn subnet_group(&self) -> &SubnetGroup {
        &self.subnet_group
    }

    /// The declared table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The creation-order hint graph.
    pub fn hints(&self) -> &HintGraph {
        &self.hints
    }

    /// The named outputs.
    pub fn outputs(&self) -> &[StackOutput] {
        &self.outputs
    }
}
