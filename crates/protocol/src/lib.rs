//! flowch - Protocol
//!
//! Typed flow records and the line parser for ipcad accounting output.
//!
//! # Input format
//!
//! ipcad emits newline-delimited ASCII, one flow per line, 8 whitespace
//! separated fields:
//!
//! ```text
//! Source           Destination              Packets     Bytes  SrcPt  DstPt  Proto  IF
//! 188.218.183.98   121.82.188.202                 1        82  18218    888      8  em1
//! ```
//!
//! The header row and any malformed line are rejected by the parser, not
//! treated as errors - the stream simply continues.
//!
//! # Key types
//!
//! - [`FlowRecord`] - one accounted flow, immutable after parse
//! - [`ClassifiedRecord`] - a flow plus direction/class/owner, produced by the
//!   classifier and consumed by the storage sink
//! - [`LineParser`] - carries the run's collection timestamp so every record
//!   of one run shares it

mod parse;
mod record;

pub use parse::{LineParser, HEADER_TOKEN};
pub use record::{addr_to_u32, ClassifiedRecord, Direction, FlowRecord, TrafficClass};

#[cfg(test)]
#[path = "parse_test.rs"]
mod parse_test;

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;
