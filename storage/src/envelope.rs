// Copyright (c) James Kassemi, SC, US. All rights reserved.

//! Arrow columns for the six required leading fields shared by both
//! dialect schemas.

use std::sync::Arc;

use arrow::array::{
    ArrayRef, StringArray, TimestampMicrosecondArray, UInt16Array, UInt64Array, UInt8Array,
};
use arrow::datatypes::{DataType, Field, TimeUnit};
use arrow::record_batch::RecordBatch;
use core_types::Envelope;

use crate::column::{
    as_string_array, as_timestamp_us_array, as_u16_array, as_u64_array, as_u8_array,
};
use crate::StorageError;

/// Leading schema fields, in record order.
pub fn fields() -> Vec<Field> {
    vec![
        Field::new("pcap_index", DataType::UInt64, false),
        Field::new(
            "timestamp",
            DataType::Timestamp(TimeUnit::Microsecond, None),
            false,
        ),
        Field::new("session", DataType::Utf8, false),
        Field::new("message_sequence", DataType::UInt64, false),
        Field::new("message_index", DataType::UInt16, false),
        Field::new("message_type", DataType::UInt8, false),
    ]
}

/// Column accumulator for the envelope section of a row group.
#[derive(Default)]
pub struct EnvelopeColumns {
    pcap_index: Vec<u64>,
    pcap_timestamp: Vec<i64>,
    session: Vec<String>,
    message_sequence: Vec<u64>,
    message_index: Vec<u16>,
    message_type: Vec<u8>,
}

impl EnvelopeColumns {
    pub fn with_capacity(rows: usize) -> Self {
        Self {
            pcap_index: Vec::with_capacity(rows),
            pcap_timestamp: Vec::with_capacity(rows),
            session: Vec::with_capacity(rows),
            message_sequence: Vec::with_capacity(rows),
            message_index: Vec::with_capacity(rows),
            message_type: Vec::with_capacity(rows),
        }
    }

    pub fn push(&mut self, envelope: &Envelope) {
        self.pcap_index.push(envelope.pcap_index);
        self.pcap_timestamp.push(envelope.pcap_timestamp);
        self.session.push(envelope.session.clone());
        self.message_sequence.push(envelope.message_sequence);
        self.message_index.push(envelope.message_index);
        self.message_type.push(envelope.message_type);
    }

    /// The six leading arrays, in record order.
    pub fn finish(self) -> Vec<ArrayRef> {
        vec![
            Arc::new(UInt64Array::from(self.pcap_index)),
            Arc::new(TimestampMicrosecondArray::from(self.pcap_timestamp)),
            Arc::new(StringArray::from(self.session)),
            Arc::new(UInt64Array::from(self.message_sequence)),
            Arc::new(UInt16Array::from(self.message_index)),
            Arc::new(UInt8Array::from(self.message_type)),
        ]
    }
}

/// Rebuild the envelope section of one row.
pub fn envelope_at(batch: &RecordBatch, row: usize) -> Result<Envelope, StorageError> {
    Ok(Envelope {
        pcap_index: as_u64_array(batch, 0, "pcap_index")?.value(row),
        pcap_timestamp: as_timestamp_us_array(batch, 1, "timestamp")?.value(row),
        session: as_string_array(batch, 2, "session")?.value(row).to_string(),
        message_sequence: as_u64_array(batch, 3, "message_sequence")?.value(row),
        message_index: as_u16_array(batch, 4, "message_index")?.value(row),
        message_type: as_u8_array(batch, 5, "message_type")?.value(row),
    })
}
