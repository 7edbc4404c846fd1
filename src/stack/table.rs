//! Key-value table declaration.
//!
//! A table is declared with a name, a single partition-key attribute, a
//! billing mode, and a deletion policy. The partition key is immutable once
//! declared: there is no setter, and the declaration is handed wholesale to
//! the provisioning engine.

use crate::error::{Error, Result};
use crate::params::ParamBundle;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

// Engine-side table name constraint: 3-255 word characters, dots or dashes.
static TABLE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]{3,255}$").expect("table name pattern"));

/// Scalar type of the partition-key attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeType {
    /// String attribute.
    S,
    /// Number attribute.
    N,
    /// Binary attribute.
    B,
}

impl AttributeType {
    /// Parse an attribute type from its string form.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "s" | "string" => Ok(AttributeType::S),
            "n" | "number" => Ok(AttributeType::N),
            "b" | "binary" => Ok(AttributeType::B),
            _ => Err(Error::InvalidParameter {
                name: "partition_key_type".to_string(),
                message: format!("'{s}' is not one of: string, number, binary"),
            }),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::S => write!(f, "S"),
            AttributeType::N => write!(f, "N"),
            AttributeType::B => write!(f, "B"),
        }
    }
}

/// Capacity billing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingMode {
    /// Charge per request.
    PayPerRequest,
    /// Charge for provisioned throughput.
    Provisioned,
}

impl BillingMode {
    /// Template string form of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingMode::PayPerRequest => "PAY_PER_REQUEST",
            BillingMode::Provisioned => "PROVISIONED",
        }
    }
}

/// What the engine does with the table when the declaration is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeletionPolicy {
    /// Remove the table with the declaration.
    Delete,
    /// Keep the table alive after the declaration is gone.
    Retain,
}

impl DeletionPolicy {
    /// Parse a deletion policy from its string form.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "delete" => Ok(DeletionPolicy::Delete),
            "retain" => Ok(DeletionPolicy::Retain),
            _ => Err(Error::InvalidParameter {
                name: "deletion_policy".to_string(),
                message: format!("'{s}' is not one of: delete, retain"),
            }),
        }
    }

    /// Template string form of the policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeletionPolicy::Delete => "Delete",
            DeletionPolicy::Retain => "Retain",
        }
    }
}

/// The partition-key attribute. Immutable once declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionKey {
    name: String,
    attr_type: AttributeType,
}

impl PartitionKey {
    /// Attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute scalar type.
    pub fn attr_type(&self) -> AttributeType {
        self.attr_type
    }
}

/// The declared key-value table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Logical id used in the synthesized template.
    pub logical_id: String,
    partition_key: PartitionKey,
    /// Capacity billing mode.
    pub billing_mode: BillingMode,
    /// Deletion policy.
    pub deletion_policy: DeletionPolicy,
}

impl Table {
    /// Declare a table with an on-demand billing mode.
    pub fn new(
        name: impl Into<String>,
        key_name: impl Into<String>,
        key_type: AttributeType,
        deletion_policy: DeletionPolicy,
    ) -> Result<Self> {
        let name = name.into();
        if !TABLE_NAME_RE.is_match(&name) {
            return Err(Error::InvalidResourceName {
                name,
                message: "table names are 3-255 characters from [A-Za-z0-9_.-]".to_string(),
            });
        }
        Ok(Self {
            name,
            logical_id: "Table".to_string(),
            partition_key: PartitionKey {
                name: key_name.into(),
                attr_type: key_type,
            },
            billing_mode: BillingMode::PayPerRequest,
            deletion_policy,
        })
    }

    /// The standard wiring from the parameter bundle: configured table name,
    /// string partition key, on-demand billing, delete-on-removal.
    pub fn standard(params: &ParamBundle) -> Result<Self> {
        Table::new(
            &params.table_name,
            &params.partition_key,
            AttributeType::S,
            DeletionPolicy::Delete,
        )
    }

    /// The partition-key attribute.
    pub fn partition_key(&self) -> &PartitionKey {
        &self.partition_key
    }

    /// The fully qualified resource locator,
    /// `arn:<partition>:dynamodb:<region>:<account>:table/<name>`.
    ///
    /// Requires a resolved account; callers that can tolerate an unset
    /// account should fall back to an engine-side attribute reference.
    pub fn locator(&self, params: &ParamBundle) -> Result<String> {
        let account = params
            .account
            .as_deref()
            .ok_or_else(|| Error::MissingParameter("account".to_string()))?;
        Ok(format!(
            "arn:{}:dynamodb:{}:{}:table/{}",
            params.partition(),
            params.region,
            account,
            self.name
        ))
    }
}
