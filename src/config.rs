//! Configuration module for Stackforge
//!
//! Handles loading and merging configuration from multiple sources:
//! - Default values
//! - System configuration (/etc/stackforge/stackforge.toml)
//! - User configuration (~/.stackforge.toml)
//! - Project configuration (./stackforge.toml)
//! - Environment variables and command-line arguments (applied later,
//!   through the parameter builder)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Naming settings
    pub naming: NamingConfig,

    /// Target account and region
    pub target: TargetConfig,

    /// Network settings
    pub network: NetworkConfig,

    /// Table settings
    pub table: TableConfig,
}

/// Naming configuration values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Organization name
    pub organization: Option<String>,

    /// Project name
    pub project: Option<String>,

    /// Environment name
    pub environment: Option<String>,
}

/// Target account and region
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Target account
    pub account: Option<String>,

    /// Target region
    pub region: Option<String>,
}

/// Network configuration values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Parent address block
    pub cidr: Option<String>,

    /// Service port admitted by the rule set
    pub service_port: Option<String>,
}

/// Table configuration values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Table name
    pub name: Option<String>,

    /// Partition-key attribute name
    pub partition_key: Option<String>,
}

impl Config {
    /// Load configuration, merging all discovered files in precedence order.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Config::default();

        for path in Self::get_config_paths(config_path) {
            if path.exists() {
                config = config.merge_from_file(&path)?;
            }
        }

        Ok(config)
    }

    /// Get the list of configuration file paths to check
    fn get_config_paths(explicit_path: Option<&PathBuf>) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Explicit path takes priority
        if let Some(path) = explicit_path {
            paths.push(path.clone());
            return paths;
        }

        // System-wide config
        paths.push(PathBuf::from("/etc/stackforge/stackforge.toml"));

        // User config
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".stackforge.toml"));
            paths.push(home.join(".stackforge/stackforge.toml"));
        }

        // Project config (current directory)
        paths.push(PathBuf::from("stackforge.toml"));
        paths.push(PathBuf::from(".stackforge.toml"));

        paths
    }

    /// Load a config file and merge it over this one
    fn merge_from_file(&self, path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let file_config: Config = match extension {
            "yml" | "yaml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            "toml" => toml::from_str(&content)?,
            _ => {
                // Try TOML first, then YAML
                toml::from_str(&content)
                    .or_else(|_| serde_yaml::from_str(&content))
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))?
            }
        };

        Ok(self.merge(file_config))
    }

    /// Merge another config into this one; set values in `other` win.
    fn merge(&self, other: Config) -> Config {
        Config {
            naming: NamingConfig {
                organization: other.naming.organization.or_else(|| self.naming.organization.clone()),
                project: other.naming.project.or_else(|| self.naming.project.clone()),
                environment: other.naming.environment.or_else(|| self.naming.environment.clone()),
            },
            target: TargetConfig {
                account: other.target.account.or_else(|| self.target.account.clone()),
                region: other.target.region.or_else(|| self.target.region.clone()),
            },
            network: NetworkConfig {
                cidr: other.network.cidr.or_else(|| self.network.cidr.clone()),
                service_port: other
                    .network
                    .service_port
                    .or_else(|| self.network.service_port.clone()),
            },
            table: TableConfig {
                name: other.table.name.or_else(|| self.table.name.clone()),
                partition_key: other
                    .table
                    .partition_key
                    .or_else(|| self.table.partition_key.clone()),
            },
        }
    }
}
