//! Network and subnet declarations.
//!
//! A [`NetworkSpec`] is the desired shape of the network: a parent address
//! block plus an ordered list of subnet specifications. Building the spec
//! allocates concrete subnet ranges in declaration order and yields an
//! immutable [`Network`].
//!
//! ### Subnet specification fields
//!
//! | Field | Description |
//! |-------|-------------|
//! | `name` | Subnet name, unique within the network |
//! | `prefix` | Address-mask size of the carved range |
//! | `reachability` | `public` (internet-facing) or `isolated` |
//! | `zone` | Availability-zone suffix appended to the region |

use crate::error::{Error, Result};
use crate::net::{Ipv4Net, SubnetAllocator};
use crate::params::ParamBundle;
use crate::stack::to_logical_id;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reachability class of a subnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reachability {
    /// Routable from outside the network.
    Public,
    /// No route in or out; data-tier placement.
    Isolated,
}

impl Reachability {
    /// Parse a reachability class from its string form.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "public" => Ok(Reachability::Public),
            "isolated" | "private" => Ok(Reachability::Isolated),
            _ => Err(Error::InvalidParameter {
                name: "reachability".to_string(),
                message: format!("'{s}' is not one of: public, isolated"),
            }),
        }
    }
}

impl fmt::Display for Reachability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reachability::Public => write!(f, "public"),
            Reachability::Isolated => write!(f, "isolated"),
        }
    }
}

/// Desired shape of one subnet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubnetSpec {
    /// Subnet name, unique within the network.
    pub name: String,
    /// Prefix length of the range to carve.
    pub prefix: u8,
    /// Reachability class.
    pub reachability: Reachability,
    /// Availability-zone suffix (`a`, `b`, ...).
    pub zone: String,
}

impl SubnetSpec {
    /// Create a subnet specification.
    pub fn new(
        name: impl Into<String>,
        prefix: u8,
        reachability: Reachability,
        zone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            prefix,
            reachability,
            zone: zone.into(),
        }
    }
}

/// Desired shape of the network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Parent address block.
    pub cidr: Ipv4Net,
    /// Ordered subnet specifications.
    pub subnets: Vec<SubnetSpec>,
}

impl NetworkSpec {
    /// The standard two-tier layout: two public `/24` ranges and two
    /// isolated `/28` ranges spread over the `a`/`b` zones of the bundle's
    /// region, inside the bundle's network block.
    pub fn standard(params: &ParamBundle) -> Self {
        Self {
            cidr: params.network_cidr,
            subnets: vec![
                SubnetSpec::new("public-a", 24, Reachability::Public, "a"),
                SubnetSpec::new("public-b", 24, Reachability::Public, "b"),
                SubnetSpec::new("isolated-a", 28, Reachability::Isolated, "a"),
                SubnetSpec::new("isolated-b", 28, Reachability::Isolated, "b"),
            ],
        }
    }

    /// Allocate subnet ranges and produce the immutable network declaration.
    pub fn build(&self, params: &ParamBundle) -> Result<Network> {
        let mut allocator = SubnetAllocator::new(self.cidr);
        let mut subnets = Vec::with_capacity(self.subnets.len());

        for spec in &self.subnets {
            if subnets.iter().any(|s: &Subnet| s.name == spec.name) {
                return Err(Error::DuplicateSubnet(spec.name.clone()));
            }

            let cidr = allocator.allocate(spec.prefix)?;
            tracing::debug!(subnet = %spec.name, cidr = %cidr, "allocated subnet range");

            subnets.push(Subnet {
                name: spec.name.clone(),
                logical_id: to_logical_id(&format!("{}-subnet", spec.name)),
                cidr,
                reachability: spec.reachability,
                availability_zone: format!("{}{}", params.region, spec.zone),
            });
        }

        let network = Network {
            name: params.export_name("network"),
            logical_id: "Network".to_string(),
            cidr: self.cidr,
            subnets,
        };
        network.verify()?;
        Ok(network)
    }
}

/// One declared subnet with its allocated range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subnet {
    /// Subnet name.
    pub name: String,
    /// Logical id used in the synthesized template.
    pub logical_id: String,
    /// Allocated address range.
    pub cidr: Ipv4Net,
    /// Reachability class.
    pub reachability: Reachability,
    /// Availability zone, `<region><zone-suffix>`.
    pub availability_zone: String,
}

/// The declared network: parent block plus allocated subnets.
///
/// Created once by [`NetworkSpec::build`] and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    /// Network name, `<prefix>-network`.
    pub name: String,
    /// Logical id used in the synthesized template.
    pub logical_id: String,
    /// Parent address block.
    pub cidr: Ipv4Net,
    /// Declared subnets, in declaration order.
    pub subnets: Vec<Subnet>,
}

impl Network {
    /// Subnets with the `public` reachability class.
    pub fn public_subnets(&self) -> impl Iterator<Item = &Subnet> {
        self.subnets
            .iter()
            .filter(|s| s.reachability == Reachability::Public)
    }

    /// Subnets with the `isolated` reachability class.
    pub fn isolated_subnets(&self) -> impl Iterator<Item = &Subnet> {
        self.subnets
            .iter()
            .filter(|s| s.reachability == Reachability::Isolated)
    }

    /// Check the address-range invariants: every subnet fits inside the
    /// parent block and no two subnets overlap.
    pub fn verify(&self) -> Result<()> {
        for subnet in &self.subnets {
            if !self.cidr.contains(&subnet.cidr) {
                return Err(Error::BlockExhausted {
                    parent: self.cidr.to_string(),
                    prefix: subnet.cidr.prefix(),
                });
            }
        }
        for (i, a) in self.subnets.iter().enumerate() {
            for b in &self.subnets[i + 1..] {
                if a.cidr.overlaps(&b.cidr) {
                    return Err(Error::SubnetOverlap {
                        a: a.name.clone(),
                        a_cidr: a.cidr.to_string(),
                        b: b.name.clone(),
                        b_cidr: b.cidr.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
