//! Traffic rule set declaration.
//!
//! A rule set is attached to a network and holds zero or more ingress
//! rules, each a `(source range, port, description)` triple. Rules are
//! additive only: the API can append but never mutate or remove a rule once
//! it is attached.

use crate::net::Ipv4Net;
use crate::params::ParamBundle;
use crate::stack::network::Network;
use serde::{Deserialize, Serialize};

/// One ingress allow rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngressRule {
    /// Source address range the rule admits.
    pub source: Ipv4Net,
    /// TCP port the rule admits.
    pub port: u16,
    /// Human-readable description carried into the template.
    pub description: String,
}

/// A named, append-only collection of ingress rules attached to a network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSet {
    /// Rule-set name, `<prefix>-rules`.
    pub name: String,
    /// Logical id used in the synthesized template.
    pub logical_id: String,
    /// Rule-set description.
    pub description: String,
    /// Logical id of the network the set is attached to.
    pub network_id: String,
    rules: Vec<IngressRule>,
}

impl RuleSet {
    /// Create an empty rule set attached to `network`.
    pub fn new(name: impl Into<String>, description: impl Into<String>, network: &Network) -> Self {
        Self {
            name: name.into(),
            logical_id: "RuleSet".to_string(),
            description: description.into(),
            network_id: network.logical_id.clone(),
            rules: Vec::new(),
        }
    }

    /// The standard wiring: admit SSH from inside the network block and the
    /// configured service port from anywhere.
    pub fn standard(params: &ParamBundle, network: &Network) -> Self {
        let mut set = Self::new(
            params.export_name("rules"),
            format!("Ingress rules for {}", network.name),
            network,
        );
        set.allow_ingress(network.cidr, 22, "Allow SSH from inside the network");
        set.allow_ingress(
            Ipv4Net::ANY,
            params.service_port,
            format!("Allow service traffic on port {}", params.service_port),
        );
        set
    }

    /// Append an ingress rule. Rules cannot be changed or removed later.
    pub fn allow_ingress(&mut self, source: Ipv4Net, port: u16, description: impl Into<String>) {
        self.rules.push(IngressRule {
            source,
            port,
            description: description.into(),
        });
    }

    /// The attached rules, in attachment order.
    pub fn rules(&self) -> &[IngressRule] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamBuilder;
    use crate::stack::network::NetworkSpec;

    fn fixture() -> (ParamBundle, Network) {
        let params = ParamBuilder::new().build().unwrap();
        let network = NetworkSpec::standard(&params).build(&params).unwrap();
        (params, network)
    }

    #[test]
    fn test_standard_wiring_has_exactly_two_rules() {
        let (params, network) = fixture();
        let set = RuleSet::standard(&params, &network);

        assert_eq!(set.rules().len(), 2);
        assert_eq!(set.rules()[0].port, 22);
        assert_eq!(set.rules()[1].port, 443);
    }

    #[test]
    fn test_ssh_scoped_to_network_block() {
        let (params, network) = fixture();
        let set = RuleSet::standard(&params, &network);

        assert_eq!(set.rules()[0].source, network.cidr);
        assert_eq!(set.rules()[1].source, Ipv4Net::ANY);
    }

    #[test]
    fn test_service_port_follows_bundle() {
        let params = ParamBuilder::new().service_port("8443").build().unwrap();
        let network = NetworkSpec::standard(&params).build(&params).unwrap();
        let set = RuleSet::standard(&params, &network);

        assert_eq!(set.rules()[1].port, 8443);
    }

    #[test]
    fn test_rules_are_append_only() {
        let (params, network) = fixture();
        let mut set = RuleSet::standard(&params, &network);

        set.allow_ingress("192.168.0.0/24".parse().unwrap(), 5432, "Replica sync");
        assert_eq!(set.rules().len(), 3);
        // The earlier rules are untouched by the append.
        assert_eq!(set.rules()[0].port, 22);
        assert_eq!(set.rules()[1].port, 443);
    }
}
