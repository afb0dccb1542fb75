// Copyright (c) James Kassemi, SC, US. All rights reserved.

//! Frame context and packet-header fields shared by every emitted row.

use std::fmt;

use crate::csv;
use crate::wire::{Cursor, WireError};

/// Number of bytes in the packet-level session identifier.
pub const SESSION_LEN: usize = 10;

/// The six required leading columns of every record: frame context
/// (`pcap_index`, `pcap_timestamp`) and packet header context (`session`,
/// `message_sequence`, `message_index`, `message_type`).
///
/// `pcap_timestamp` is microseconds since the Unix epoch. `session` keeps
/// its full 10 bytes including any padding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Envelope {
    pub pcap_index: u64,
    pub pcap_timestamp: i64,
    pub session: String,
    pub message_sequence: u64,
    pub message_index: u16,
    pub message_type: u8,
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},", self.pcap_index)?;
        csv::timestamp(f, self.pcap_timestamp)?;
        write!(f, "{},", self.session)?;
        write!(f, "{},", self.message_sequence)?;
        write!(f, "{},", self.message_index)?;
        write!(f, "{},", self.message_type as char)
    }
}

/// MoldUDP-style packet header: 10-byte session, starting sequence number,
/// message count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketHeader {
    pub session: String,
    pub message_sequence: u64,
    pub count: u16,
}

impl PacketHeader {
    pub fn decode(cursor: &mut Cursor<'_>) -> Result<Self, WireError> {
        Ok(Self {
            session: cursor.verbatim_str(SESSION_LEN)?,
            message_sequence: cursor.u64()?,
            count: cursor.u16()?,
        })
    }
}

/// A dialect's flat superset row. The pipeline drives one reusable instance:
/// reset the payload section, decode the dispatched message into it, then
/// snapshot the record per emitted row.
pub trait ItchRecord: Default + Clone {
    fn envelope(&self) -> &Envelope;

    fn envelope_mut(&mut self) -> &mut Envelope;

    /// Clear every optional payload field to "not present".
    fn reset_payload(&mut self);

    /// Decode the message body for `message_type` into the payload section.
    /// Unknown types decode nothing and succeed; the row still carries the
    /// envelope fields.
    fn decode_payload(&mut self, message_type: u8, body: &mut Cursor<'_>)
        -> Result<(), WireError>;
}
