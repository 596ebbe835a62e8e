//! Flow record types shared across the pipeline

use std::fmt;
use std::net::IpAddr;

use chrono::{DateTime, Utc};

/// One accounted traffic flow from an ipcad interval.
///
/// Created by [`LineParser::parse`](crate::LineParser::parse) and never
/// mutated afterwards. Both addresses are guaranteed to be the same family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowRecord {
    /// Source address
    pub src_addr: IpAddr,

    /// Destination address
    pub dst_addr: IpAddr,

    /// Packet count
    pub packets: u64,

    /// Byte count
    pub bytes: u64,

    /// Source port
    pub src_port: u16,

    /// Destination port
    pub dst_port: u16,

    /// IP protocol number
    pub proto: u8,

    /// Ingress/egress interface name (e.g. "em1")
    pub iface: String,

    /// Collection timestamp, shared by every record of one run
    pub collected: DateTime<Utc>,
}

/// A [`FlowRecord`] augmented with the derived classification.
///
/// Produced by the classifier, consumed by the storage sink. The underlying
/// flow is carried unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRecord {
    /// The original flow
    pub flow: FlowRecord,

    /// Owning user identifier, empty if unresolved
    pub user_id: String,

    /// Flow direction relative to the local networks
    pub direction: Direction,

    /// Derived traffic class
    pub class: TrafficClass,
}

/// Flow direction: whether the locally-classified endpoint sent or received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Unknown,
    In,
    Out,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Unknown => "unknown",
            Direction::In => "in",
            Direction::Out => "out",
        };
        f.write_str(s)
    }
}

/// Traffic class derived from network set membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrafficClass {
    #[default]
    Unknown,
    Local,
    Peering,
    Internet,
    Multicast,
}

impl fmt::Display for TrafficClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrafficClass::Unknown => "unknown",
            TrafficClass::Local => "local",
            TrafficClass::Peering => "peering",
            TrafficClass::Internet => "internet",
            TrafficClass::Multicast => "multicast",
        };
        f.write_str(s)
    }
}

/// Reduce an address to its 32-bit integer form.
///
/// IPv4 is interpreted directly as big-endian. For a 16-byte address the low
/// four bytes are taken, which covers IPv4-mapped IPv6; native IPv6 beyond
/// that case is outside the classification model.
pub fn addr_to_u32(addr: &IpAddr) -> u32 {
    match addr {
        IpAddr::V4(v4) => u32::from_be_bytes(v4.octets()),
        IpAddr::V6(v6) => {
            let octets = v6.octets();
            u32::from_be_bytes([octets[12], octets[13], octets[14], octets[15]])
        }
    }
}
