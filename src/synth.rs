//! Template synthesis.
//!
//! Renders a declared [`Stack`] into the external provisioning engine's
//! input contract: a template document holding an insertion-ordered map of
//! resource declarations (logical id to type, properties, creation-order
//! hints, deletion policy) and a map of named outputs. The document
//! serializes to JSON or YAML; the engine performs all planning and change
//! application against it.

use crate::error::{Error, Result};
use crate::stack::outputs::OutputValue;
use crate::stack::{resource_types, Stack};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{json, Value};

/// Template format version understood by the engine.
const FORMAT_VERSION: &str = "2010-09-09";

/// One rendered resource declaration.
#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    /// Engine resource type.
    #[serde(rename = "Type")]
    pub resource_type: String,

    /// Creation-order hints, logical ids this resource waits for.
    #[serde(rename = "DependsOn", skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,

    /// Deletion policy, when it differs from the engine default.
    #[serde(rename = "DeletionPolicy", skip_serializing_if = "Option::is_none")]
    pub deletion_policy: Option<String>,

    /// Resource properties in the engine's published schema.
    #[serde(rename = "Properties")]
    pub properties: Value,
}

/// One rendered output.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateOutput {
    /// Human-readable description.
    #[serde(rename = "Description")]
    pub description: String,

    /// The output value, literal or engine-resolved.
    #[serde(rename = "Value")]
    pub value: Value,

    /// Cross-configuration export.
    #[serde(rename = "Export")]
    pub export: Value,
}

/// The rendered template document.
#[derive(Debug, Clone, Serialize)]
pub struct Template {
    /// Engine format version.
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,

    /// Template description.
    #[serde(rename = "Description")]
    pub description: String,

    /// Resource declarations, in declaration order.
    #[serde(rename = "Resources")]
    pub resources: IndexMap<String, Resource>,

    /// Named outputs.
    #[serde(rename = "Outputs", skip_serializing_if = "IndexMap::is_empty")]
    pub outputs: IndexMap<String, TemplateOutput>,
}

impl Template {
    /// Render the template as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Render {
            format: "json".to_string(),
            message: e.to_string(),
        })
    }

    /// Render the template as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Render {
            format: "yaml".to_string(),
            message: e.to_string(),
        })
    }
}

/// Render a declared stack into a template document.
pub fn synthesize(stack: &Stack) -> Result<Template> {
    let hints = stack.hints();
    let mut resources = IndexMap::new();

    let network = stack.network();
    resources.insert(
        network.logical_id.clone(),
        Resource {
            resource_type: resource_types::NETWORK.to_string(),
            depends_on: hints.prerequisites(&network.logical_id),
            deletion_policy: None,
            properties: json!({
                "CidrBlock": network.cidr.to_string(),
                "EnableDnsSupport": true,
                "EnableDnsHostnames": true,
                "Tags": tags_with_name(stack, &network.name),
            }),
        },
    );

    for subnet in &network.subnets {
        resources.insert(
            subnet.logical_id.clone(),
            Resource {
                resource_type: resource_types::SUBNET.to_string(),
                depends_on: Vec::new(),
                deletion_policy: None,
                properties: json!({
                    "VpcId": reference(&network.logical_id),
                    "CidrBlock": subnet.cidr.to_string(),
                    "AvailabilityZone": subnet.availability_zone,
                    "MapPublicIpOnLaunch": subnet.reachability
                        == crate::stack::network::Reachability::Public,
                    "Tags": tags_with_name(
                        stack,
                        &format!("{}-{}", stack.params().naming_prefix(), subnet.name),
                    ),
                }),
            },
        );
    }

    let rule_set = stack.rule_set();
    let ingress: Vec<Value> = rule_set
        .rules()
        .iter()
        .map(|rule| {
            json!({
                "IpProtocol": "tcp",
                "FromPort": rule.port,
                "ToPort": rule.port,
                "CidrIp": rule.source.to_string(),
                "Description": rule.description,
            })
        })
        .collect();
    resources.insert(
        rule_set.logical_id.clone(),
        Resource {
            resource_type: resource_types::RULE_SET.to_string(),
            depends_on: hints.prerequisites(&rule_set.logical_id),
            deletion_policy: None,
            properties: json!({
                "GroupName": rule_set.name,
                "GroupDescription": rule_set.description,
                "VpcId": reference(&rule_set.network_id),
                "SecurityGroupIngress": ingress,
                "Tags": tags_with_name(stack, &rule_set.name),
            }),
        },
    );

    let group = stack.subnet_group();
    let member_refs: Vec<Value> = group.members().iter().map(|id| reference(id)).collect();
    resources.insert(
        group.logical_id.clone(),
        Resource {
            resource_type: resource_types::SUBNET_GROUP.to_string(),
            depends_on: hints.prerequisites(&group.logical_id),
            deletion_policy: None,
            properties: json!({
                "DBSubnetGroupName": group.name,
                "DBSubnetGroupDescription": group.description,
                "SubnetIds": member_refs,
                "Tags": tags_with_name(stack, &group.name),
            }),
        },
    );

    let table = stack.table();
    let key = table.partition_key();
    resources.insert(
        table.logical_id.clone(),
        Resource {
            resource_type: resource_types::TABLE.to_string(),
            depends_on: hints.prerequisites(&table.logical_id),
            deletion_policy: Some(table.deletion_policy.as_str().to_string()),
            properties: json!({
                "TableName": table.name,
                "AttributeDefinitions": [{
                    "AttributeName": key.name(),
                    "AttributeType": key.attr_type().to_string(),
                }],
                "KeySchema": [{
                    "AttributeName": key.name(),
                    "KeyType": "HASH",
                }],
                "BillingMode": table.billing_mode.as_str(),
                "Tags": tags_with_name(stack, &table.name),
            }),
        },
    );

    let mut outputs = IndexMap::new();
    for output in stack.outputs() {
        outputs.insert(
            output.name.clone(),
            TemplateOutput {
                description: output.description.clone(),
                value: render_output_value(&output.value),
                export: json!({ "Name": output.export_name }),
            },
        );
    }

    tracing::debug!(
        resources = resources.len(),
        outputs = outputs.len(),
        "synthesized template"
    );

    Ok(Template {
        format_version: FORMAT_VERSION.to_string(),
        description: stack.description().to_string(),
        resources,
        outputs,
    })
}

fn reference(logical_id: &str) -> Value {
    json!({ "Ref": logical_id })
}

fn render_output_value(value: &OutputValue) -> Value {
    match value {
        OutputValue::Literal(s) => json!(s),
        OutputValue::Ref(id) => reference(id),
        OutputValue::Attribute {
            resource,
            attribute,
        } => json!({ "Fn::GetAtt": [resource, attribute] }),
    }
}

fn tags_with_name(stack: &Stack, name: &str) -> Value {
    let mut tags = vec![json!({ "Key": "Name", "Value": name })];
    for (key, value) in stack.params().tags() {
        tags.push(json!({ "Key": key, "Value": value }));
    }
    Value::Array(tags)
}
