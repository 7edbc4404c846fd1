//! Named output declarations.
//!
//! Outputs identify created resources for cross-configuration reference.
//! Each carries an export name derived from the naming prefix.

use serde::{Deserialize, Serialize};

/// How an output's value is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputValue {
    /// A string known at declaration time.
    Literal(String),
    /// The engine-assigned identifier of a resource.
    Ref(String),
    /// An engine-resolved attribute of a resource.
    Attribute {
        /// Logical id of the resource.
        resource: String,
        /// Attribute name.
        attribute: String,
    },
}

/// One named output of the stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackOutput {
    /// Output name within the stack.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// The value to emit.
    pub value: OutputValue,
    /// Cross-configuration export name.
    pub export_name: String,
}

impl StackOutput {
    /// Create an output.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        value: OutputValue,
        export_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            value,
            export_name: export_name.into(),
        }
    }
}
