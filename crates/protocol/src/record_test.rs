//! Tests for record types and address conversion

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use super::*;

#[test]
fn ipv4_to_u32_is_big_endian() {
    let addr: IpAddr = "192.168.0.1".parse().unwrap();
    assert_eq!(addr_to_u32(&addr), 0xC0A80001);
}

#[test]
fn ipv4_mapped_ipv6_takes_low_four_bytes() {
    let v4 = Ipv4Addr::new(188, 218, 183, 98);
    let mapped = IpAddr::V6(v4.to_ipv6_mapped());
    assert_eq!(addr_to_u32(&mapped), addr_to_u32(&IpAddr::V4(v4)));
}

#[test]
fn ipv4_round_trips_through_u32() {
    for s in ["0.0.0.0", "10.10.0.1", "192.168.0.2", "255.255.255.255"] {
        let addr: IpAddr = s.parse().unwrap();
        let back = Ipv4Addr::from(addr_to_u32(&addr));
        assert_eq!(IpAddr::V4(back), addr);
    }
}

#[test]
fn native_ipv6_reduces_to_low_bytes() {
    let addr = IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1));
    assert_eq!(addr_to_u32(&addr), 1);
}

#[test]
fn enums_display_as_storage_labels() {
    assert_eq!(Direction::Unknown.to_string(), "unknown");
    assert_eq!(Direction::In.to_string(), "in");
    assert_eq!(Direction::Out.to_string(), "out");

    assert_eq!(TrafficClass::Unknown.to_string(), "unknown");
    assert_eq!(TrafficClass::Local.to_string(), "local");
    assert_eq!(TrafficClass::Peering.to_string(), "peering");
    assert_eq!(TrafficClass::Internet.to_string(), "internet");
    assert_eq!(TrafficClass::Multicast.to_string(), "multicast");
}

#[test]
fn direction_and_class_default_to_unknown() {
    assert_eq!(Direction::default(), Direction::Unknown);
    assert_eq!(TrafficClass::default(), TrafficClass::Unknown);
}
