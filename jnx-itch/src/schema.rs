// Copyright (c) James Kassemi, SC, US. All rights reserved.

//! Arrow schema and record-batch mapping for the JNX superset row.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray, UInt32Array, UInt64Array, UInt8Array};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use storage::column::{as_string_array, as_u32_array, as_u64_array, as_u8_array};
use storage::envelope::{self, envelope_at, EnvelopeColumns};
use storage::{Columnar, StorageError};

use crate::record::Record;

fn payload_fields() -> Vec<Field> {
    vec![
        Field::new("attribution", DataType::Utf8, true),
        Field::new("buy_sell_indicator", DataType::UInt8, true),
        Field::new("executed_quantity", DataType::UInt32, true),
        Field::new("group", DataType::Utf8, true),
        Field::new("lower_price_limit", DataType::UInt32, true),
        Field::new("match_number", DataType::UInt64, true),
        Field::new("new_order_number", DataType::UInt64, true),
        Field::new("order_number", DataType::UInt64, true),
        Field::new("order_type", DataType::UInt8, true),
        Field::new("orderbook_code", DataType::Utf8, true),
        Field::new("orderbook_id", DataType::UInt32, true),
        Field::new("original_order_number", DataType::UInt64, true),
        Field::new("price", DataType::UInt32, true),
        Field::new("price_decimals", DataType::UInt32, true),
        Field::new("price_start", DataType::UInt32, true),
        Field::new("price_tick_size", DataType::UInt32, true),
        Field::new("price_tick_size_table_id", DataType::UInt32, true),
        Field::new("quantity", DataType::UInt32, true),
        Field::new("round_lot_size", DataType::UInt32, true),
        Field::new("short_selling_state", DataType::UInt8, true),
        Field::new("system_event", DataType::UInt8, true),
        Field::new("timestamp_nanoseconds", DataType::UInt32, true),
        Field::new("timestamp_seconds", DataType::UInt32, true),
        Field::new("trading_state", DataType::UInt8, true),
        Field::new("upper_price_limit", DataType::UInt32, true),
    ]
}

impl Columnar for Record {
    fn schema() -> SchemaRef {
        let mut fields = envelope::fields();
        fields.extend(payload_fields());
        Arc::new(Schema::new(fields))
    }

    fn to_record_batch(rows: &[Self]) -> Result<RecordBatch, StorageError> {
        let len = rows.len();
        let mut envelopes = EnvelopeColumns::with_capacity(len);
        let mut attribution: Vec<Option<String>> = Vec::with_capacity(len);
        let mut buy_sell_indicator = Vec::with_capacity(len);
        let mut executed_quantity = Vec::with_capacity(len);
        let mut group: Vec<Option<String>> = Vec::with_capacity(len);
        let mut lower_price_limit = Vec::with_capacity(len);
        let mut match_number = Vec::with_capacity(len);
        let mut new_order_number = Vec::with_capacity(len);
        let mut order_number = Vec::with_capacity(len);
        let mut order_type = Vec::with_capacity(len);
        let mut orderbook_code: Vec<Option<String>> = Vec::with_capacity(len);
        let mut orderbook_id = Vec::with_capacity(len);
        let mut original_order_number = Vec::with_capacity(len);
        let mut price = Vec::with_capacity(len);
        let mut price_decimals = Vec::with_capacity(len);
        let mut price_start = Vec::with_capacity(len);
        let mut price_tick_size = Vec::with_capacity(len);
        let mut price_tick_size_table_id = Vec::with_capacity(len);
        let mut quantity = Vec::with_capacity(len);
        let mut round_lot_size = Vec::with_capacity(len);
        let mut short_selling_state = Vec::with_capacity(len);
        let mut system_event = Vec::with_capacity(len);
        let mut timestamp_nanoseconds = Vec::with_capacity(len);
        let mut timestamp_seconds = Vec::with_capacity(len);
        let mut trading_state = Vec::with_capacity(len);
        let mut upper_price_limit = Vec::with_capacity(len);

        for row in rows {
            envelopes.push(&row.envelope);
            attribution.push(row.attribution.clone());
            buy_sell_indicator.push(row.buy_sell_indicator);
            executed_quantity.push(row.executed_quantity);
            group.push(row.group.clone());
            lower_price_limit.push(row.lower_price_limit);
            match_number.push(row.match_number);
            new_order_number.push(row.new_order_number);
            order_number.push(row.order_number);
            order_type.push(row.order_type);
            orderbook_code.push(row.orderbook_code.clone());
            orderbook_id.push(row.orderbook_id);
            original_order_number.push(row.original_order_number);
            price.push(row.price);
            price_decimals.push(row.price_decimals);
            price_start.push(row.price_start);
            price_tick_size.push(row.price_tick_size);
            price_tick_size_table_id.push(row.price_tick_size_table_id);
            quantity.push(row.quantity);
            round_lot_size.push(row.round_lot_size);
            short_selling_state.push(row.short_selling_state);
            system_event.push(row.system_event);
            timestamp_nanoseconds.push(row.timestamp_nanoseconds);
            timestamp_seconds.push(row.timestamp_seconds);
            trading_state.push(row.trading_state);
            upper_price_limit.push(row.upper_price_limit);
        }

        let mut arrays = envelopes.finish();
        arrays.extend([
            Arc::new(StringArray::from(attribution)) as ArrayRef,
            Arc::new(UInt8Array::from(buy_sell_indicator)),
            Arc::new(UInt32Array::from(executed_quantity)),
            Arc::new(StringArray::from(group)),
            Arc::new(UInt32Array::from(lower_price_limit)),
            Arc::new(UInt64Array::from(match_number)),
            Arc::new(UInt64Array::from(new_order_number)),
            Arc::new(UInt64Array::from(order_number)),
            Arc::new(UInt8Array::from(order_type)),
            Arc::new(StringArray::from(orderbook_code)),
            Arc::new(UInt32Array::from(orderbook_id)),
            Arc::new(UInt64Array::from(original_order_number)),
            Arc::new(UInt32Array::from(price)),
            Arc::new(UInt32Array::from(price_decimals)),
            Arc::new(UInt32Array::from(price_start)),
            Arc::new(UInt32Array::from(price_tick_size)),
            Arc::new(UInt32Array::from(price_tick_size_table_id)),
            Arc::new(UInt32Array::from(quantity)),
            Arc::new(UInt32Array::from(round_lot_size)),
            Arc::new(UInt8Array::from(short_selling_state)),
            Arc::new(UInt8Array::from(system_event)),
            Arc::new(UInt32Array::from(timestamp_nanoseconds)),
            Arc::new(UInt32Array::from(timestamp_seconds)),
            Arc::new(UInt8Array::from(trading_state)),
            Arc::new(UInt32Array::from(upper_price_limit)),
        ]);

        Ok(RecordBatch::try_new(Self::schema(), arrays)?)
    }

    fn from_record_batch(batch: &RecordBatch) -> Result<Vec<Self>, StorageError> {
        let attribution = as_string_array(batch, 6, "attribution")?;
        let buy_sell_indicator = as_u8_array(batch, 7, "buy_sell_indicator")?;
        let executed_quantity = as_u32_array(batch, 8, "executed_quantity")?;
        let group = as_string_array(batch, 9, "group")?;
        let lower_price_limit = as_u32_array(batch, 10, "lower_price_limit")?;
        let match_number = as_u64_array(batch, 11, "match_number")?;
        let new_order_number = as_u64_array(batch, 12, "new_order_number")?;
        let order_number = as_u64_array(batch, 13, "order_number")?;
        let order_type = as_u8_array(batch, 14, "order_type")?;
        let orderbook_code = as_string_array(batch, 15, "orderbook_code")?;
        let orderbook_id = as_u32_array(batch, 16, "orderbook_id")?;
        let original_order_number = as_u64_array(batch, 17, "original_order_number")?;
        let price = as_u32_array(batch, 18, "price")?;
        let price_decimals = as_u32_array(batch, 19, "price_decimals")?;
        let price_start = as_u32_array(batch, 20, "price_start")?;
        let price_tick_size = as_u32_array(batch, 21, "price_tick_size")?;
        let price_tick_size_table_id = as_u32_array(batch, 22, "price_tick_size_table_id")?;
        let quantity = as_u32_array(batch, 23, "quantity")?;
        let round_lot_size = as_u32_array(batch, 24, "round_lot_size")?;
        let short_selling_state = as_u8_array(batch, 25, "short_selling_state")?;
        let system_event = as_u8_array(batch, 26, "system_event")?;
        let timestamp_nanoseconds = as_u32_array(batch, 27, "timestamp_nanoseconds")?;
        let timestamp_seconds = as_u32_array(batch, 28, "timestamp_seconds")?;
        let trading_state = as_u8_array(batch, 29, "trading_state")?;
        let upper_price_limit = as_u32_array(batch, 30, "upper_price_limit")?;

        let mut rows = Vec::with_capacity(batch.num_rows());
        for row in 0..batch.num_rows() {
            rows.push(Record {
                envelope: envelope_at(batch, row)?,
                attribution: (!attribution.is_null(row))
                    .then(|| attribution.value(row).to_string()),
                buy_sell_indicator: (!buy_sell_indicator.is_null(row))
                    .then(|| buy_sell_indicator.value(row)),
                executed_quantity: (!executed_quantity.is_null(row))
                    .then(|| executed_quantity.value(row)),
                group: (!group.is_null(row)).then(|| group.value(row).to_string()),
                lower_price_limit: (!lower_price_limit.is_null(row))
                    .then(|| lower_price_limit.value(row)),
                match_number: (!match_number.is_null(row)).then(|| match_number.value(row)),
                new_order_number: (!new_order_number.is_null(row))
                    .then(|| new_order_number.value(row)),
                order_number: (!order_number.is_null(row)).then(|| order_number.value(row)),
                order_type: (!order_type.is_null(row)).then(|| order_type.value(row)),
                orderbook_code: (!orderbook_code.is_null(row))
                    .then(|| orderbook_code.value(row).to_string()),
                orderbook_id: (!orderbook_id.is_null(row)).then(|| orderbook_id.value(row)),
                original_order_number: (!original_order_number.is_null(row))
                    .then(|| original_order_number.value(row)),
                price: (!price.is_null(row)).then(|| price.value(row)),
                price_decimals: (!price_decimals.is_null(row))
                    .then(|| price_decimals.value(row)),
                price_start: (!price_start.is_null(row)).then(|| price_start.value(row)),
                price_tick_size: (!price_tick_size.is_null(row))
                    .then(|| price_tick_size.value(row)),
                price_tick_size_table_id: (!price_tick_size_table_id.is_null(row))
                    .then(|| price_tick_size_table_id.value(row)),
                quantity: (!quantity.is_null(row)).then(|| quantity.value(row)),
                round_lot_size: (!round_lot_size.is_null(row))
                    .then(|| round_lot_size.value(row)),
                short_selling_state: (!short_selling_state.is_null(row))
                    .then(|| short_selling_state.value(row)),
                system_event: (!system_event.is_null(row)).then(|| system_event.value(row)),
                timestamp_nanoseconds: (!timestamp_nanoseconds.is_null(row))
                    .then(|| timestamp_nanoseconds.value(row)),
                timestamp_seconds: (!timestamp_seconds.is_null(row))
                    .then(|| timestamp_seconds.value(row)),
                trading_state: (!trading_state.is_null(row)).then(|| trading_state.value(row)),
                upper_price_limit: (!upper_price_limit.is_null(row))
                    .then(|| upper_price_limit.value(row)),
            });
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use core_types::{Envelope, ItchRecord};
    use storage::{Reader, Writer};
    use tempfile::TempDir;

    use super::*;

    fn sample_rows() -> Vec<Record> {
        let mut added = Record::default();
        added.envelope = Envelope {
            pcap_index: 1,
            pcap_timestamp: 1_700_000_000_000_000,
            session: "SESSION001".to_string(),
            message_sequence: 100,
            message_index: 1,
            message_type: b'A',
        };
        added.timestamp_nanoseconds = Some(500_000_000);
        added.order_number = Some(7777);
        added.buy_sell_indicator = Some(b'B');
        added.quantity = Some(200);
        added.orderbook_id = Some(1301);
        added.group = Some("STD".to_string());
        added.price = Some(1_234_500);

        let mut unknown = Record::default();
        unknown.envelope = Envelope {
            pcap_index: 2,
            pcap_timestamp: 1_700_000_000_000_001,
            session: "SESSION001".to_string(),
            message_sequence: 101,
            message_index: 1,
            message_type: b'Z',
        };

        vec![added, unknown]
    }

    #[test]
    fn schema_has_thirty_one_columns() {
        assert_eq!(Record::schema().fields().len(), 31);
    }

    #[test]
    fn record_batch_round_trip() {
        let rows = sample_rows();
        let batch = Record::to_record_batch(&rows).unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 31);
        assert_eq!(Record::from_record_batch(&batch).unwrap(), rows);
    }

    #[test]
    fn parquet_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jnx.parquet");

        let rows = sample_rows();
        let mut writer = Writer::create(&path, 1000).unwrap();
        for row in &rows {
            writer.append(row.clone()).unwrap();
        }
        writer.close().unwrap();

        let read: Vec<Record> = Reader::open(&path)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(read, rows);
    }

    #[test]
    fn reset_then_decode_leaves_only_named_fields() {
        let mut record = sample_rows().remove(0);
        record.reset_payload();
        let mut body = Vec::new();
        body.extend_from_slice(&9u32.to_be_bytes());
        body.extend_from_slice(&7777u64.to_be_bytes());
        record
            .decode_payload(b'D', &mut core_types::Cursor::new(&body))
            .unwrap();
        assert_eq!(record.timestamp_nanoseconds, Some(9));
        assert_eq!(record.order_number, Some(7777));
        assert_eq!(record.quantity, None);
        assert_eq!(record.group, None);
        assert_eq!(record.price, None);
    }
}
