// Copyright (c) James Kassemi, SC, US. All rights reserved.

//! Capture-to-Parquet pipeline shared by the dialect binaries.
//!
//! One packet at a time: extract the UDP payload, decode the packet
//! header, then walk the count-prefixed batch of length-prefixed messages,
//! emitting one snapshot of the reusable record per message. After the
//! conversion the Parquet file is replayed to the given writer as CSV.

use std::fmt;
use std::io;

use core_types::{Cursor, ItchRecord, PacketHeader, WireError};
use log::warn;
use pcap_source::{udp_payload, Capture, CaptureError};
use storage::{Columnar, StorageError, Writer, DEFAULT_MAX_ROW_GROUP_SIZE};
use thiserror::Error;

/// Converter options. The defaults mirror the historical tool: read
/// `itch.pcap`, write `itch.parquet`, cap row groups at 1000 rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub pcap_file: String,
    pub parquet_file: String,
    pub max_row_group_size: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            pcap_file: "itch.pcap".to_string(),
            parquet_file: "itch.parquet".to_string(),
            max_row_group_size: DEFAULT_MAX_ROW_GROUP_SIZE,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("usage: {program} <pcap_file> [<parquet_file>]")]
pub struct UsageError {
    program: String,
}

impl Options {
    /// Parse `prog <pcap_file> [<parquet_file>]`. Any other arity is a
    /// usage error.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self, UsageError> {
        let program = args.next().unwrap_or_else(|| "itchcap".to_string());
        let rest: Vec<String> = args.collect();
        let mut options = Options::default();
        match rest.as_slice() {
            [pcap_file] => {
                options.pcap_file = pcap_file.clone();
            }
            [pcap_file, parquet_file] => {
                options.pcap_file = pcap_file.clone();
                options.parquet_file = parquet_file.clone();
            }
            _ => return Err(UsageError { program }),
        }
        Ok(options)
    }
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertStats {
    /// Input packets seen, including dropped ones.
    pub packets: u64,
    /// Packets dropped before the ITCH layer (non-IPv4, non-UDP, malformed).
    pub skipped_packets: u64,
    /// Rows written to the Parquet file.
    pub rows: u64,
}

/// Drain the capture file into a Parquet file, one row per decoded message.
pub fn convert<R>(options: &Options) -> Result<ConvertStats, ConvertError>
where
    R: ItchRecord + Columnar,
{
    let mut capture = Capture::open(&options.pcap_file)?;
    let mut writer = Writer::create(&options.parquet_file, options.max_row_group_size)?;
    let mut record = R::default();
    let mut rows = Vec::new();
    let mut stats = ConvertStats::default();

    while let Some(next) = capture.next_packet() {
        let packet = match next {
            Ok(packet) => packet,
            Err(err) => {
                warn!("capture read failed after {} packets: {err}", stats.packets);
                break;
            }
        };
        stats.packets += 1;
        record.envelope_mut().pcap_index += 1;

        let Some(payload) = udp_payload(&packet.data) else {
            stats.skipped_packets += 1;
            continue;
        };
        record.envelope_mut().pcap_timestamp = packet.timestamp_us;

        rows.clear();
        if let Err(err) = decode_packet(&mut record, payload, &mut rows) {
            warn!(
                "packet {}: {err}; dropping the remainder",
                record.envelope().pcap_index
            );
        }
        for row in rows.drain(..) {
            writer.append(row)?;
            stats.rows += 1;
        }
    }

    writer.close()?;
    Ok(stats)
}

/// Decode every message of one packet into row snapshots. A truncated
/// header or body abandons the remainder of the packet; rows decoded
/// before the cut are kept.
fn decode_packet<R: ItchRecord>(
    record: &mut R,
    payload: &[u8],
    rows: &mut Vec<R>,
) -> Result<(), WireError> {
    let mut packet = Cursor::new(payload);
    let header = PacketHeader::decode(&mut packet)?;
    {
        let envelope = record.envelope_mut();
        envelope.session = header.session;
        envelope.message_sequence = header.message_sequence;
    }

    for index in 1..=header.count {
        record.reset_payload();
        let length = packet.u16()?;
        let mut body = Cursor::new(packet.take(usize::from(length))?);
        let message_type = body.u8()?;

        let envelope = record.envelope_mut();
        envelope.message_index = index;
        envelope.message_type = message_type;
        if index > 1 {
            // The header sequence identifies the first message; later
            // messages in the batch follow consecutively.
            envelope.message_sequence += 1;
        }

        record.decode_payload(message_type, &mut body)?;
        rows.push(record.clone());
    }
    Ok(())
}

/// Stream the Parquet file back out as CSV, one line per row.
pub fn replay<R, W>(parquet_file: &str, out: &mut W) -> Result<(), ReplayError>
where
    R: Columnar + fmt::Display,
    W: io::Write,
{
    for row in storage::Reader::<R>::open(parquet_file)? {
        write!(out, "{}", row?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter()
            .map(|arg| arg.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn one_argument_keeps_default_output() {
        let options = Options::from_args(args(&["prog", "capture.pcap"])).unwrap();
        assert_eq!(options.pcap_file, "capture.pcap");
        assert_eq!(options.parquet_file, "itch.parquet");
        assert_eq!(options.max_row_group_size, 1000);
    }

    #[test]
    fn two_arguments_set_both_files() {
        let options =
            Options::from_args(args(&["prog", "capture.pcap", "out.parquet"])).unwrap();
        assert_eq!(options.pcap_file, "capture.pcap");
        assert_eq!(options.parquet_file, "out.parquet");
    }

    #[test]
    fn other_arities_are_usage_errors() {
        assert!(Options::from_args(args(&["prog"])).is_err());
        assert!(Options::from_args(args(&["prog", "a", "b", "c"])).is_err());
    }
}
