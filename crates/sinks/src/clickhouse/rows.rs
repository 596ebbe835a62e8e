//! Detail table row type and Enum8 mappings

use chrono::{DateTime, Utc};
use clickhouse::Row;
use serde::Serialize;
use serde_repr::Serialize_repr;

use flowch_protocol::{addr_to_u32, ClassifiedRecord, Direction, TrafficClass};

/// Direction codes matching `Enum8('unknown' = 0, 'in' = 1, 'out' = 2)`.
///
/// These values are part of the storage schema; never renumber them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr)]
#[repr(i8)]
pub enum DirEnum {
    Unknown = 0,
    In = 1,
    Out = 2,
}

impl DirEnum {
    /// Convert from the protocol direction.
    pub fn from_direction(dir: Direction) -> Self {
        match dir {
            Direction::Unknown => Self::Unknown,
            Direction::In => Self::In,
            Direction::Out => Self::Out,
        }
    }
}

/// Class codes matching
/// `Enum8('unknown' = 0, 'local' = 1, 'peering' = 2, 'internet' = 3, 'multicast' = 4)`.
///
/// These values are part of the storage schema; never renumber them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr)]
#[repr(i8)]
pub enum ClassEnum {
    Unknown = 0,
    Local = 1,
    Peering = 2,
    Internet = 3,
    Multicast = 4,
}

impl ClassEnum {
    /// Convert from the protocol traffic class.
    pub fn from_class(class: TrafficClass) -> Self {
        match class {
            TrafficClass::Unknown => Self::Unknown,
            TrafficClass::Local => Self::Local,
            TrafficClass::Peering => Self::Peering,
            TrafficClass::Internet => Self::Internet,
            TrafficClass::Multicast => Self::Multicast,
        }
    }
}

/// One row of the `details` table.
///
/// Field order matches the table's column order. Addresses are stored in
/// their 32-bit integer form.
#[derive(Debug, Clone, Row, Serialize)]
pub struct FlowRow {
    /// Collection timestamp (DateTime)
    #[serde(with = "clickhouse::serde::chrono::datetime")]
    pub collected: DateTime<Utc>,

    /// Owning user id, empty if unresolved
    pub user_id: String,

    /// Direction code (Enum8)
    pub dir: DirEnum,

    /// Traffic class code (Enum8)
    pub class: ClassEnum,

    /// Source address as UInt32
    pub src_ip: u32,

    /// Source port
    pub src_port: u16,

    /// Destination address as UInt32
    pub dst_ip: u32,

    /// Destination port
    pub dst_port: u16,

    /// Packet count
    pub packets: u64,

    /// Byte count
    pub bytes: u64,

    /// IP protocol number
    pub proto: u8,
}

impl From<&ClassifiedRecord> for FlowRow {
    fn from(record: &ClassifiedRecord) -> Self {
        Self {
            collected: record.flow.collected,
            user_id: record.user_id.clone(),
            dir: DirEnum::from_direction(record.direction),
            class: ClassEnum::from_class(record.class),
            src_ip: addr_to_u32(&record.flow.src_addr),
            src_port: record.flow.src_port,
            dst_ip: addr_to_u32(&record.flow.dst_addr),
            dst_port: record.flow.dst_port,
            packets: record.flow.packets,
            bytes: record.flow.bytes,
            proto: record.flow.proto,
        }
    }
}
