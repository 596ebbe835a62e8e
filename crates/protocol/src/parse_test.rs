//! Tests for the ipcad line parser

use chrono::{TimeZone, Utc};

use super::*;

fn parser() -> LineParser {
    LineParser::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
}

#[test]
fn parses_data_line() {
    let line = "188.218.183.98   121.82.188.202         1           82  18218   888     8  em1";
    let record = parser().parse(line).expect("line should parse");

    assert_eq!(record.src_addr.to_string(), "188.218.183.98");
    assert_eq!(record.dst_addr.to_string(), "121.82.188.202");
    assert_eq!(record.packets, 1);
    assert_eq!(record.bytes, 82);
    assert_eq!(record.src_port, 18218);
    assert_eq!(record.dst_port, 888);
    assert_eq!(record.proto, 8);
    assert_eq!(record.iface, "em1");
}

#[test]
fn stamps_run_collection_time() {
    let p = parser();
    let a = p.parse("10.0.0.1 10.0.0.2 1 100 1000 2000 6 em0").unwrap();
    let b = p.parse("10.0.0.3 10.0.0.4 2 200 1001 2001 17 em1").unwrap();

    assert_eq!(a.collected, p.collected());
    assert_eq!(b.collected, p.collected());
}

#[test]
fn rejects_header_row() {
    let line = "Source Destination Packets Bytes SrcPt DstPt Proto IF";
    assert!(parser().parse(line).is_none());
}

#[test]
fn rejects_blank_and_short_lines() {
    let p = parser();
    assert!(p.parse("").is_none());
    assert!(p.parse("   ").is_none());
    assert!(p.parse("10.0.0.1 10.0.0.2 1 82 18218 888 8").is_none());
    assert!(p.parse("10.0.0.1 10.0.0.2 1 82 18218 888 8 em1 extra").is_none());
}

#[test]
fn rejects_bad_numbers() {
    let p = parser();
    // not a number
    assert!(p.parse("10.0.0.1 10.0.0.2 x 82 18218 888 8 em1").is_none());
    // negative
    assert!(p.parse("10.0.0.1 10.0.0.2 -1 82 18218 888 8 em1").is_none());
    // port out of range
    assert!(p.parse("10.0.0.1 10.0.0.2 1 82 70000 888 8 em1").is_none());
    // proto out of range
    assert!(p.parse("10.0.0.1 10.0.0.2 1 82 18218 888 300 em1").is_none());
}

#[test]
fn rejects_bad_addresses() {
    let p = parser();
    assert!(p.parse("10.0.0.256 10.0.0.2 1 82 18218 888 8 em1").is_none());
    assert!(p.parse("not-an-ip 10.0.0.2 1 82 18218 888 8 em1").is_none());
}

#[test]
fn rejects_mixed_address_families() {
    let p = parser();
    assert!(p.parse("10.0.0.1 2001:db8::1 1 82 18218 888 8 em1").is_none());
}

#[test]
fn accepts_ipv6_pair() {
    let p = parser();
    let record = p
        .parse("2001:db8::1 2001:db8::2 1 82 18218 888 8 em1")
        .expect("v6 pair should parse");
    assert!(record.src_addr.is_ipv6());
    assert!(record.dst_addr.is_ipv6());
}

#[test]
fn distinct_lines_parse_to_distinct_records() {
    let p = parser();
    let a = p.parse("10.0.0.1 10.0.0.2 1 82 18218 888 8 em1").unwrap();
    let b = p.parse("10.0.0.1 10.0.0.2 1 82 18218 889 8 em1").unwrap();
    assert_ne!(a, b);
}
