//! Line parser for ipcad accounting output

use std::net::IpAddr;

use chrono::{DateTime, Utc};

use crate::record::FlowRecord;

/// First field of the column header row emitted by ipcad.
pub const HEADER_TOKEN: &str = "Source";

/// Parses ipcad lines into [`FlowRecord`]s.
///
/// The parser owns the run's collection timestamp: every accepted record is
/// stamped with the same instant, established once when the parser is built.
#[derive(Debug, Clone)]
pub struct LineParser {
    collected: DateTime<Utc>,
}

impl LineParser {
    /// Create a parser stamping records with the given collection time.
    pub fn new(collected: DateTime<Utc>) -> Self {
        Self { collected }
    }

    /// The collection timestamp applied to every accepted record.
    pub fn collected(&self) -> DateTime<Utc> {
        self.collected
    }

    /// Parse one line.
    ///
    /// Returns `None` for anything that is not a well-formed data line: the
    /// header row, blank lines, a field count other than 8, unparseable
    /// numbers or addresses, or a flow mixing IPv4 and IPv6 endpoints.
    /// Rejection is normal control flow, never an error.
    pub fn parse(&self, line: &str) -> Option<FlowRecord> {
        let fields: Vec<&str> = line.split_whitespace().collect();

        if fields.len() != 8 {
            return None;
        }

        if fields[0] == HEADER_TOKEN {
            return None;
        }

        let src_addr: IpAddr = fields[0].parse().ok()?;
        let dst_addr: IpAddr = fields[1].parse().ok()?;

        if src_addr.is_ipv4() != dst_addr.is_ipv4() {
            return None;
        }

        let packets: u64 = fields[2].parse().ok()?;
        let bytes: u64 = fields[3].parse().ok()?;
        let src_port: u16 = fields[4].parse().ok()?;
        let dst_port: u16 = fields[5].parse().ok()?;
        let proto: u8 = fields[6].parse().ok()?;
        let iface = fields[7].to_string();

        Some(FlowRecord {
            src_addr,
            dst_addr,
            packets,
            bytes,
            src_port,
            dst_port,
            proto,
            iface,
            collected: self.collected,
        })
    }
}
