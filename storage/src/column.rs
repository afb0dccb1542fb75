// Copyright (c) James Kassemi, SC, US. All rights reserved.

//! Typed column access for reading rows back out of a record batch.

use arrow::array::{
    StringArray, TimestampMicrosecondArray, UInt16Array, UInt32Array, UInt64Array, UInt8Array,
};
use arrow::record_batch::RecordBatch;

use crate::StorageError;

pub fn as_string_array<'a>(
    batch: &'a RecordBatch,
    index: usize,
    name: &'static str,
) -> Result<&'a StringArray, StorageError> {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or(StorageError::ColumnType { index, name })
}

pub fn as_u8_array<'a>(
    batch: &'a RecordBatch,
    index: usize,
    name: &'static str,
) -> Result<&'a UInt8Array, StorageError> {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<UInt8Array>()
        .ok_or(StorageError::ColumnType { index, name })
}

pub fn as_u16_array<'a>(
    batch: &'a RecordBatch,
    index: usize,
    name: &'static str,
) -> Result<&'a UInt16Array, StorageError> {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<UInt16Array>()
        .ok_or(StorageError::ColumnType { index, name })
}

pub fn as_u32_array<'a>(
    batch: &'a RecordBatch,
    index: usize,
    name: &'static str,
) -> Result<&'a UInt32Array, StorageError> {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<UInt32Array>()
        .ok_or(StorageError::ColumnType { index, name })
}

pub fn as_u64_array<'a>(
    batch: &'a RecordBatch,
    index: usize,
    name: &'static str,
) -> Result<&'a UInt64Array, StorageError> {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<UInt64Array>()
        .ok_or(StorageError::ColumnType { index, name })
}

pub fn as_timestamp_us_array<'a>(
    batch: &'a RecordBatch,
    index: usize,
    name: &'static str,
) -> Result<&'a TimestampMicrosecondArray, StorageError> {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<TimestampMicrosecondArray>()
        .ok_or(StorageError::ColumnType { index, name })
}
