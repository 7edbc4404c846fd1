//! IPv4 address math for network declarations.
//!
//! Provides [`Ipv4Net`], a CIDR block with containment and overlap checks,
//! and [`SubnetAllocator`], which carves fixed-prefix subnet ranges out of a
//! parent block in declaration order. Allocation is sequential and aligned,
//! so ranges produced by one allocator never overlap and always fit inside
//! the parent (or the allocator reports exhaustion).

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// An IPv4 CIDR block.
///
/// The address is normalized to the network address on construction, so
/// `10.0.1.17/16` and `10.0.0.0/16` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Net {
    addr: Ipv4Addr,
    prefix: u8,
}

impl Ipv4Net {
    /// The unrestricted range, `0.0.0.0/0`.
    pub const ANY: Ipv4Net = Ipv4Net {
        addr: Ipv4Addr::new(0, 0, 0, 0),
        prefix: 0,
    };

    /// Create a block from an address and prefix length.
    ///
    /// Host bits in `addr` are masked off. Prefix lengths above 32 are
    /// rejected.
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<Self> {
        if prefix > 32 {
            return Err(Error::InvalidCidr {
                input: format!("{addr}/{prefix}"),
                message: "prefix length must be 0-32".to_string(),
            });
        }
        let masked = u32::from(addr) & prefix_mask(prefix);
        Ok(Self {
            addr: Ipv4Addr::from(masked),
            prefix,
        })
    }

    /// The network address of the block.
    pub fn network(&self) -> Ipv4Addr {
        self.addr
    }

    /// The prefix length of the block.
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Number of addresses covered by the block.
    pub fn size(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix))
    }

    fn first(&self) -> u32 {
        u32::from(self.addr)
    }

    fn last(&self) -> u32 {
        self.first() | !prefix_mask(self.prefix)
    }

    /// Whether `other` lies entirely within this block.
    pub fn contains(&self, other: &Ipv4Net) -> bool {
        self.prefix <= other.prefix
            && self.first() <= other.first()
            && other.last() <= self.last()
    }

    /// Whether the two blocks share any address.
    pub fn overlaps(&self, other: &Ipv4Net) -> bool {
        self.first().max(other.first()) <= self.last().min(other.last())
    }
}

fn prefix_mask(prefix: u8) -> u32 {
    if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - u32::from(prefix))
    }
}

impl fmt::Display for Ipv4Net {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

impl FromStr for Ipv4Net {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |message: &str| Error::InvalidCidr {
            input: s.to_string(),
            message: message.to_string(),
        };

        let (addr_part, prefix_part) = s
            .split_once('/')
            .ok_or_else(|| invalid("expected '<address>/<prefix>'"))?;
        let addr: Ipv4Addr = addr_part
            .parse()
            .map_err(|_| invalid("not a valid IPv4 address"))?;
        let prefix: u8 = prefix_part
            .parse()
            .map_err(|_| invalid("prefix is not a number"))?;
        Ipv4Net::new(addr, prefix)
    }
}

impl Serialize for Ipv4Net {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ipv4Net {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Sequential subnet allocator over a parent block.
///
/// Each call to [`allocate`](Self::allocate) returns the next range of the
/// requested prefix length, aligned to its natural boundary. The cursor only
/// moves forward, so allocated ranges are disjoint by construction.
#[derive(Debug, Clone)]
pub struct SubnetAllocator {
    parent: Ipv4Net,
    // One past the highest address handed out so far, as a u64 to survive
    // the 255.255.255.255 edge.
    cursor: u64,
}

impl SubnetAllocator {
    /// Create an allocator over `parent`.
    pub fn new(parent: Ipv4Net) -> Self {
        Self {
            parent,
            cursor: u64::from(parent.first()),
        }
    }

    /// Carve the next `/{prefix}` range out of the parent block.
    pub fn allocate(&mut self, prefix: u8) -> Result<Ipv4Net> {
        if prefix > 32 || prefix < self.parent.prefix {
            return Err(Error::PrefixTooWide {
                parent: self.parent.to_string(),
                prefix,
            });
        }

        let block = 1u64 << (32 - u32::from(prefix));
        let start = self.cursor.div_ceil(block) * block;
        let end = start + block - 1;

        if end > u64::from(self.parent.last()) {
            return Err(Error::BlockExhausted {
                parent: self.parent.to_string(),
                prefix,
            });
        }

        self.cursor = end + 1;
        // start fits in u32: it is bounded by the parent's last address.
        Ipv4Net::new(Ipv4Addr::from(start as u32), prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let net: Ipv4Net = "10.0.0.0/16".parse().unwrap();
        assert_eq!(net.network(), Ipv4Addr::new(10, 0, 0, 0));
        assert_eq!(net.prefix(), 16);
        assert_eq!(net.to_string(), "10.0.0.0/16");
    }

    #[test]
    fn test_parse_normalizes_host_bits() {
        let net: Ipv4Net = "10.0.1.17/16".parse().unwrap();
        assert_eq!(net.to_string(), "10.0.0.0/16");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("10.0.0.0".parse::<Ipv4Net>().is_err());
        assert!("10.0.0.0/33".parse::<Ipv4Net>().is_err());
        assert!("999.0.0.0/8".parse::<Ipv4Net>().is_err());
        assert!("10.0.0.0/x".parse::<Ipv4Net>().is_err());
    }

    #[test]
    fn test_contains() {
        let parent: Ipv4Net = "10.0.0.0/16".parse().unwrap();
        let child: Ipv4Net = "10.0.3.0/24".parse().unwrap();
        let outside: Ipv4Net = "10.1.0.0/24".parse().unwrap();

        assert!(parent.contains(&child));
        assert!(!parent.contains(&outside));
        assert!(!child.contains(&parent));
    }

    #[test]
    fn test_overlaps() {
        let a: Ipv4Net = "10.0.0.0/24".parse().unwrap();
        let b: Ipv4Net = "10.0.0.128/25".parse().unwrap();
        let c: Ipv4Net = "10.0.1.0/24".parse().unwrap();

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_any_covers_everything() {
        let net: Ipv4Net = "192.168.12.0/24".parse().unwrap();
        assert!(Ipv4Net::ANY.contains(&net));
        assert_eq!(Ipv4Net::ANY.to_string(), "0.0.0.0/0");
    }

    #[test]
    fn test_sequential_allocation() {
        let parent: Ipv4Net = "10.0.0.0/16".parse().unwrap();
        let mut alloc = SubnetAllocator::new(parent);

        assert_eq!(alloc.allocate(24).unwrap().to_string(), "10.0.0.0/24");
        assert_eq!(alloc.allocate(24).unwrap().to_string(), "10.0.1.0/24");
        assert_eq!(alloc.allocate(28).unwrap().to_string(), "10.0.2.0/28");
        assert_eq!(alloc.allocate(28).unwrap().to_string(), "10.0.2.16/28");
    }

    #[test]
    fn test_allocation_realigns_after_small_block() {
        let parent: Ipv4Net = "10.0.0.0/16".parse().unwrap();
        let mut alloc = SubnetAllocator::new(parent);

        assert_eq!(alloc.allocate(28).unwrap().to_string(), "10.0.0.0/28");
        // Next /24 must skip to the next /24 boundary.
        assert_eq!(alloc.allocate(24).unwrap().to_string(), "10.0.1.0/24");
    }

    #[test]
    fn test_allocation_exhaustion() {
        let parent: Ipv4Net = "10.0.0.0/24".parse().unwrap();
        let mut alloc = SubnetAllocator::new(parent);

        assert!(alloc.allocate(25).is_ok());
        assert!(alloc.allocate(25).is_ok());
        assert!(matches!(
            alloc.allocate(25),
            Err(Error::BlockExhausted { .. })
        ));
    }

    #[test]
    fn test_allocation_rejects_wider_prefix() {
        let parent: Ipv4Net = "10.0.0.0/24".parse().unwrap();
        let mut alloc = SubnetAllocator::new(parent);
        assert!(matches!(
            alloc.allocate(16),
            Err(Error::PrefixTooWide { .. })
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let net: Ipv4Net = "172.16.0.0/12".parse().unwrap();
        let json = serde_json::to_string(&net).unwrap();
        assert_eq!(json, "\"172.16.0.0/12\"");
        let back: Ipv4Net = serde_json::from_str(&json).unwrap();
        assert_eq!(back, net);
    }
}
