//! Error types for Stackforge.
//!
//! This module defines the error types used throughout Stackforge, providing
//! rich error information for debugging and user feedback.

use thiserror::Error;

/// Result type alias for Stackforge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Stackforge.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Parameter Errors
    // ========================================================================
    /// A required parameter was never supplied by any source.
    #[error("Missing parameter '{0}'")]
    MissingParameter(String),

    /// A parameter value failed to parse or is out of range.
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// Error message
        message: String,
    },

    /// The assembled bundle failed field validation.
    #[error("Parameter bundle validation failed: {0}")]
    BundleValidation(String),

    // ========================================================================
    // Address Errors
    // ========================================================================
    /// A string did not parse as an IPv4 CIDR block.
    #[error("Invalid CIDR block '{input}': {message}")]
    InvalidCidr {
        /// The rejected input
        input: String,
        /// Error message
        message: String,
    },

    /// A requested subnet prefix is wider than its parent block.
    #[error("Prefix /{prefix} cannot be carved from block {parent}")]
    PrefixTooWide {
        /// Parent block
        parent: String,
        /// Requested prefix length
        prefix: u8,
    },

    /// The parent block ran out of room during subnet allocation.
    #[error("Address block {parent} exhausted while carving a /{prefix} range")]
    BlockExhausted {
        /// Parent block
        parent: String,
        /// Requested prefix length
        prefix: u8,
    },

    /// Two declared subnets claim overlapping ranges.
    #[error("Subnet '{a}' ({a_cidr}) overlaps subnet '{b}' ({b_cidr})")]
    SubnetOverlap {
        /// First subnet name
        a: String,
        /// First subnet range
        a_cidr: String,
        /// Second subnet name
        b: String,
        /// Second subnet range
        b_cidr: String,
    },

    // ========================================================================
    // Declaration Errors
    // ========================================================================
    /// Subnet names must be unique within a network.
    #[error("Duplicate subnet name '{0}'")]
    DuplicateSubnet(String),

    /// A resource name failed the naming pattern check.
    #[error("Invalid resource name '{name}': {message}")]
    InvalidResourceName {
        /// The rejected name
        name: String,
        /// Error message
        message: String,
    },

    /// A dependency hint referenced a resource that was never declared.
    #[error("Resource '{0}' not found in the stack")]
    ResourceNotFound(String),

    // ========================================================================
    // Dependency Graph Errors
    // ========================================================================
    /// The creation-order hints contain a cycle.
    #[error("Dependency hints form a cycle: {0}")]
    DependencyCycle(String),

    // ========================================================================
    // Synthesis Errors
    // ========================================================================
    /// Template serialization failed.
    #[error("Failed to render template as {format}: {message}")]
    Render {
        /// Output format name
        format: String,
        /// Error message
        message: String,
    },
}
