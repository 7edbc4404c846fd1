//! Data-tier subnet grouping.

use crate::params::ParamBundle;
use crate::stack::network::Network;
use serde::{Deserialize, Serialize};

/// A named set of subnet identifiers designated for a resource tier.
///
/// The data-tier grouping draws its members from the network's isolated
/// subnets, count-for-count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubnetGroup {
    /// Grouping name, `<prefix>-data-tier`.
    pub name: String,
    /// Logical id used in the synthesized template.
    pub logical_id: String,
    /// Grouping description.
    pub description: String,
    member_ids: Vec<String>,
}

impl SubnetGroup {
    /// Build the data-tier grouping over the network's isolated subnets.
    pub fn data_tier(params: &ParamBundle, network: &Network) -> Self {
        let member_ids = network
            .isolated_subnets()
            .map(|s| s.logical_id.clone())
            .collect();
        Self {
            name: params.export_name("data-tier"),
            logical_id: "SubnetGroup".to_string(),
            description: format!("Data-tier subnets of {}", network.name),
            member_ids,
        }
    }

    /// Logical ids of the member subnets, in network declaration order.
    pub fn members(&self) -> &[String] {
        &self.member_ids
    }

    /// Number of member subnets.
    pub fn len(&self) -> usize {
        self.member_ids.len()
    }

    /// Whether the grouping has no members.
    pub fn is_empty(&self) -> bool {
        self.member_ids.is_empty()
    }
}
