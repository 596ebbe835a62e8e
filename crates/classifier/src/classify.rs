//! Classification tables and the classify algorithm

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};

use ipnet::{IpNet, Ipv4Net};
use tracing::{debug, warn};

use flowch_protocol::{addr_to_u32, ClassifiedRecord, Direction, FlowRecord, TrafficClass};

/// The fixed multicast block checked after the peering set.
const MULTICAST_NET: Ipv4Net = Ipv4Net::new_assert(Ipv4Addr::new(224, 0, 0, 0), 4);

/// Class tag marking a network as the subject's own infrastructure.
const CLASS_LOCAL: &str = "local";

/// Class tag marking a preferential peering network.
const CLASS_PEERING: &str = "peering";

/// Immutable classification tables plus the classify operation.
///
/// Built once before stream processing begins; read-only for the lifetime of
/// a run, so it can be shared freely with the sink task.
#[derive(Debug, Clone)]
pub struct Classifier {
    /// Client address (32-bit form) to owning user id
    users: HashMap<u32, String>,

    /// Local prefixes in configured order
    local: Vec<IpNet>,

    /// Peering prefixes in configured order
    peering: Vec<IpNet>,
}

impl Classifier {
    /// Build tables from user and network entry lists.
    ///
    /// `users` maps address strings to user ids, `networks` maps CIDR
    /// strings to class tags. Entries that fail to parse are logged and
    /// excluded; class tags other than `local` or `peering` are ignored.
    pub fn new<U, N>(users: U, networks: N) -> Self
    where
        U: IntoIterator<Item = (String, String)>,
        N: IntoIterator<Item = (String, String)>,
    {
        let mut user_table = HashMap::new();
        for (addr, id) in users {
            match addr.parse::<IpAddr>() {
                Ok(ip) => {
                    user_table.insert(addr_to_u32(&ip), id);
                }
                Err(_) => {
                    warn!(addr = %addr, user = %id, "could not parse user address, skipping");
                }
            }
        }

        let mut local = Vec::new();
        let mut peering = Vec::new();
        for (cidr, class) in networks {
            let net = match cidr.parse::<IpNet>() {
                Ok(net) => net,
                Err(e) => {
                    warn!(cidr = %cidr, class = %class, error = %e, "could not parse network CIDR, skipping");
                    continue;
                }
            };

            match class.as_str() {
                CLASS_LOCAL => local.push(net),
                CLASS_PEERING => peering.push(net),
                other => {
                    debug!(cidr = %cidr, class = %other, "ignoring network with unknown class");
                }
            }
        }

        Self {
            users: user_table,
            local,
            peering,
        }
    }

    /// Number of user table entries.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of local and peering prefixes.
    pub fn network_counts(&self) -> (usize, usize) {
        (self.local.len(), self.peering.len())
    }

    /// Classify one flow record.
    ///
    /// Pure function of the record and the tables. The local set is scanned
    /// in order and the last containing prefix wins for direction and class;
    /// peering then overwrites class for a matching remote, and the
    /// multicast check runs last so it wins over peering. A flow touching no
    /// local prefix stays entirely unknown with no owner.
    pub fn classify(&self, flow: &FlowRecord) -> ClassifiedRecord {
        let mut direction = Direction::Unknown;
        let mut class = TrafficClass::Unknown;
        let mut client: Option<IpAddr> = None;
        let mut remote: Option<IpAddr> = None;

        for net in &self.local {
            if net.contains(&flow.src_addr) {
                client = Some(flow.src_addr);
                remote = Some(flow.dst_addr);
                direction = Direction::Out;
                class = TrafficClass::Internet;
            }

            if net.contains(&flow.dst_addr) {
                client = Some(flow.dst_addr);
                remote = Some(flow.src_addr);
                direction = Direction::In;
                class = TrafficClass::Internet;
            }

            if let Some(remote) = remote {
                if net.contains(&remote) {
                    class = TrafficClass::Local;
                }
            }
        }

        if let Some(remote) = remote {
            for net in &self.peering {
                if net.contains(&remote) {
                    class = TrafficClass::Peering;
                }
            }

            if let IpAddr::V4(remote_v4) = remote {
                if MULTICAST_NET.contains(&remote_v4) {
                    class = TrafficClass::Multicast;
                }
            }
        }

        let mut user_id = String::new();
        match client {
            Some(client) => {
                if let Some(id) = self.users.get(&addr_to_u32(&client)) {
                    user_id = id.clone();
                }
            }
            None => {
                // No local endpoint: the accumulated direction/class are
                // discarded, the flow stays unknown.
                direction = Direction::Unknown;
                class = TrafficClass::Unknown;
            }
        }

        ClassifiedRecord {
            flow: flow.clone(),
            user_id,
            direction,
            class,
        }
    }
}
