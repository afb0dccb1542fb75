// Copyright (c) James Kassemi, SC, US. All rights reserved.

//! Parquet writer/reader over flat ITCH records.
//!
//! The writer commits one row group per `max_row_group_size` buffered rows
//! and flushes the tail group when closed. The reader streams rows back in
//! file order for the CSV replay.

use std::fs::File;
use std::path::Path;

use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::{ParquetRecordBatchReader, ParquetRecordBatchReaderBuilder};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use thiserror::Error;

pub mod column;
pub mod envelope;

pub use envelope::EnvelopeColumns;

/// Row-group cap used when the caller does not override it.
pub const DEFAULT_MAX_ROW_GROUP_SIZE: usize = 1000;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("column {index} ({name}) has unexpected type")]
    ColumnType { index: usize, name: &'static str },
}

/// A row type with a fixed Arrow schema and a bidirectional record-batch
/// mapping. Round-tripping a batch reproduces every row bit-for-bit.
pub trait Columnar: Sized {
    fn schema() -> arrow::datatypes::SchemaRef;

    fn to_record_batch(rows: &[Self]) -> Result<RecordBatch, StorageError>;

    fn from_record_batch(batch: &RecordBatch) -> Result<Vec<Self>, StorageError>;
}

/// Buffering Parquet writer. Rows accumulate until the row-group cap, then
/// the batch is written and the group closed.
pub struct Writer<R: Columnar> {
    writer: ArrowWriter<File>,
    buffer: Vec<R>,
    max_row_group_size: usize,
}

impl<R: Columnar> Writer<R> {
    pub fn create(
        path: impl AsRef<Path>,
        max_row_group_size: usize,
    ) -> Result<Self, StorageError> {
        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_max_row_group_size(max_row_group_size)
            .build();
        let writer = ArrowWriter::try_new(file, R::schema(), Some(props))?;
        Ok(Self {
            writer,
            buffer: Vec::with_capacity(max_row_group_size),
            max_row_group_size,
        })
    }

    pub fn append(&mut self, row: R) -> Result<(), StorageError> {
        self.buffer.push(row);
        if self.buffer.len() >= self.max_row_group_size {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let batch = R::to_record_batch(&self.buffer)?;
        self.writer.write(&batch)?;
        self.writer.flush()?;
        self.buffer.clear();
        Ok(())
    }

    /// Write the terminal row group and finish the file.
    pub fn close(mut self) -> Result<(), StorageError> {
        self.flush()?;
        self.writer.close()?;
        Ok(())
    }
}

/// Streaming reader yielding rows in file order.
pub struct Reader<R: Columnar> {
    batches: ParquetRecordBatchReader,
    pending: std::vec::IntoIter<R>,
}

impl<R: Columnar> Reader<R> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let file = File::open(path)?;
        let batches = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
        Ok(Self {
            batches,
            pending: Vec::new().into_iter(),
        })
    }
}

impl<R: Columnar> Iterator for Reader<R> {
    type Item = Result<R, StorageError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(row) = self.pending.next() {
                return Some(Ok(row));
            }
            match self.batches.next()? {
                Ok(batch) => match R::from_record_batch(&batch) {
                    Ok(rows) => self.pending = rows.into_iter(),
                    Err(err) => return Some(Err(err)),
                },
                Err(err) => return Some(Err(err.into())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{Array, ArrayRef, UInt32Array};
    use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
    use core_types::Envelope;
    use tempfile::TempDir;

    use super::*;
    use crate::column::as_u32_array;
    use crate::envelope::{envelope_at, fields, EnvelopeColumns};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Row {
        envelope: Envelope,
        quantity: Option<u32>,
    }

    impl Columnar for Row {
        fn schema() -> SchemaRef {
            let mut all = fields();
            all.push(Field::new("quantity", DataType::UInt32, true));
            Arc::new(Schema::new(all))
        }

        fn to_record_batch(rows: &[Self]) -> Result<RecordBatch, StorageError> {
            let mut envelopes = EnvelopeColumns::with_capacity(rows.len());
            let mut quantity = Vec::with_capacity(rows.len());
            for row in rows {
                envelopes.push(&row.envelope);
                quantity.push(row.quantity);
            }
            let mut arrays = envelopes.finish();
            arrays.push(Arc::new(UInt32Array::from(quantity)) as ArrayRef);
            Ok(RecordBatch::try_new(Self::schema(), arrays)?)
        }

        fn from_record_batch(batch: &RecordBatch) -> Result<Vec<Self>, StorageError> {
            let quantity = as_u32_array(batch, 6, "quantity")?;
            let mut rows = Vec::with_capacity(batch.num_rows());
            for row in 0..batch.num_rows() {
                rows.push(Self {
                    envelope: envelope_at(batch, row)?,
                    quantity: (!quantity.is_null(row)).then(|| quantity.value(row)),
                });
            }
            Ok(rows)
        }
    }

    fn sample_row(index: u64) -> Row {
        Row {
            envelope: Envelope {
                pcap_index: index,
                pcap_timestamp: 1_700_000_000_000_000 + index as i64,
                session: "SESSION001".to_string(),
                message_sequence: 50 + index,
                message_index: 1,
                message_type: b'A',
            },
            quantity: (index % 2 == 0).then_some(index as u32 * 10),
        }
    }

    #[test]
    fn round_trip_preserves_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rows.parquet");

        let rows: Vec<Row> = (1..=5).map(sample_row).collect();
        let mut writer = Writer::create(&path, DEFAULT_MAX_ROW_GROUP_SIZE).unwrap();
        for row in &rows {
            writer.append(row.clone()).unwrap();
        }
        writer.close().unwrap();

        let read: Vec<Row> = Reader::open(&path)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(read, rows);
    }

    #[test]
    fn row_groups_are_capped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("groups.parquet");

        let mut writer = Writer::create(&path, 2).unwrap();
        for index in 1..=5 {
            writer.append(sample_row(index)).unwrap();
        }
        writer.close().unwrap();

        let file = File::open(&path).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        assert_eq!(builder.metadata().num_row_groups(), 3);

        let read: Vec<Row> = Reader::open(&path)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(read.len(), 5);
        assert_eq!(read[4], sample_row(5));
    }

    #[test]
    fn empty_file_reads_back_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.parquet");

        let writer: Writer<Row> = Writer::create(&path, 10).unwrap();
        writer.close().unwrap();

        let rows: Vec<Row> = Reader::open(&path)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert!(rows.is_empty());
    }
}
