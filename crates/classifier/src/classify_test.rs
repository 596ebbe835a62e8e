//! Tests for the classify algorithm

use chrono::Utc;
use flowch_protocol::{Direction, FlowRecord, TrafficClass};

use super::*;

fn flow(src: &str, dst: &str) -> FlowRecord {
    FlowRecord {
        src_addr: src.parse().unwrap(),
        dst_addr: dst.parse().unwrap(),
        packets: 1,
        bytes: 82,
        src_port: 18218,
        dst_port: 888,
        proto: 8,
        iface: "em1".into(),
        collected: Utc::now(),
    }
}

fn entries(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn classifies_local_entry() {
    let classifier = Classifier::new(
        entries(&[("192.168.0.1", "1"), ("192.168.0.2", "2")]),
        entries(&[("192.168.0.0/16", "local")]),
    );

    let result = classifier.classify(&flow("192.168.0.1", "192.168.0.2"));

    assert_eq!(result.user_id, "2");
    assert_eq!(result.direction, Direction::In);
    assert_eq!(result.class, TrafficClass::Local);
}

#[test]
fn classifies_peering_entry() {
    let classifier = Classifier::new(
        entries(&[("192.168.0.1", "1")]),
        entries(&[("192.168.0.0/16", "local"), ("10.10.0.0/8", "peering")]),
    );

    let result = classifier.classify(&flow("192.168.0.1", "10.10.0.1"));

    assert_eq!(result.user_id, "1");
    assert_eq!(result.direction, Direction::Out);
    assert_eq!(result.class, TrafficClass::Peering);
}

#[test]
fn classifies_internet_entry() {
    let classifier = Classifier::new(
        entries(&[("192.168.0.1", "1")]),
        entries(&[("192.168.0.0/16", "local")]),
    );

    let result = classifier.classify(&flow("192.168.0.1", "10.10.0.1"));

    assert_eq!(result.user_id, "1");
    assert_eq!(result.direction, Direction::Out);
    assert_eq!(result.class, TrafficClass::Internet);
}

#[test]
fn classifies_inbound_direction() {
    let classifier = Classifier::new(
        entries(&[("192.168.0.1", "1")]),
        entries(&[("192.168.0.0/16", "local")]),
    );

    let result = classifier.classify(&flow("10.10.0.1", "192.168.0.1"));

    assert_eq!(result.user_id, "1");
    assert_eq!(result.direction, Direction::In);
    assert_eq!(result.class, TrafficClass::Internet);
}

#[test]
fn multicast_wins_over_peering() {
    let classifier = Classifier::new(
        entries(&[("192.168.0.1", "1")]),
        entries(&[
            ("192.168.0.0/16", "local"),
            ("224.0.0.0/4", "peering"),
        ]),
    );

    let result = classifier.classify(&flow("192.168.0.1", "239.1.1.1"));

    assert_eq!(result.direction, Direction::Out);
    assert_eq!(result.class, TrafficClass::Multicast);
}

#[test]
fn flow_outside_local_networks_stays_unknown() {
    let classifier = Classifier::new(
        entries(&[("192.168.0.1", "1")]),
        entries(&[("192.168.0.0/16", "local")]),
    );

    let result = classifier.classify(&flow("8.8.8.8", "9.9.9.9"));

    assert_eq!(result.user_id, "");
    assert_eq!(result.direction, Direction::Unknown);
    assert_eq!(result.class, TrafficClass::Unknown);
}

#[test]
fn unresolved_user_leaves_id_empty() {
    let classifier =
        Classifier::new(entries(&[]), entries(&[("192.168.0.0/16", "local")]));

    let result = classifier.classify(&flow("192.168.0.1", "10.10.0.1"));

    assert_eq!(result.user_id, "");
    assert_eq!(result.direction, Direction::Out);
    assert_eq!(result.class, TrafficClass::Internet);
}

#[test]
fn last_local_prefix_match_wins() {
    // The first prefix matches the source, the second matches the
    // destination. The later match overwrites the earlier one, so the flow
    // ends up inbound with the destination as client.
    let classifier = Classifier::new(
        entries(&[("192.168.0.1", "1"), ("10.1.1.1", "9")]),
        vec![
            ("192.168.0.0/16".to_string(), "local".to_string()),
            ("10.0.0.0/8".to_string(), "local".to_string()),
        ],
    );

    let result = classifier.classify(&flow("192.168.0.1", "10.1.1.1"));

    assert_eq!(result.direction, Direction::In);
    assert_eq!(result.class, TrafficClass::Internet);
    assert_eq!(result.user_id, "9");
}

#[test]
fn later_prefix_reclassifies_remote_as_local() {
    // A broader prefix later in the list contains both endpoints, flipping
    // the class from internet to local.
    let classifier = Classifier::new(
        entries(&[("192.168.0.1", "1")]),
        vec![
            ("192.168.0.0/24".to_string(), "local".to_string()),
            ("192.168.0.0/16".to_string(), "local".to_string()),
        ],
    );

    let result = classifier.classify(&flow("192.168.200.1", "192.168.0.1"));

    assert_eq!(result.direction, Direction::In);
    assert_eq!(result.class, TrafficClass::Local);
    assert_eq!(result.user_id, "1");
}

#[test]
fn classify_is_pure_and_idempotent() {
    let classifier = Classifier::new(
        entries(&[("192.168.0.1", "1")]),
        entries(&[("192.168.0.0/16", "local"), ("10.10.0.0/8", "peering")]),
    );

    let record = flow("192.168.0.1", "10.10.0.1");
    let first = classifier.classify(&record);
    let second = classifier.classify(&record);

    assert_eq!(first, second);
    assert_eq!(first.flow, record);
}

#[test]
fn bad_table_entries_are_excluded() {
    let classifier = Classifier::new(
        entries(&[("not-an-ip", "1"), ("192.168.0.1", "2")]),
        entries(&[
            ("not-a-cidr", "local"),
            ("192.168.0.0/16", "local"),
            ("10.0.0.0/8", "transit"),
        ]),
    );

    assert_eq!(classifier.user_count(), 1);
    assert_eq!(classifier.network_counts(), (1, 0));
}
