// Copyright (c) James Kassemi, SC, US. All rights reserved.

//! Arrow schema and record-batch mapping for the TotalView superset row.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray, UInt16Array, UInt32Array, UInt64Array, UInt8Array};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use storage::column::{as_string_array, as_u16_array, as_u32_array, as_u64_array, as_u8_array};
use storage::envelope::{self, envelope_at, EnvelopeColumns};
use storage::{Columnar, StorageError};

use crate::record::Record;

fn payload_fields() -> Vec<Field> {
    vec![
        Field::new("attribution", DataType::Utf8, true),
        Field::new("auction_collar_extension", DataType::UInt32, true),
        Field::new("auction_collar_reference_price", DataType::UInt32, true),
        Field::new("authenticity", DataType::UInt8, true),
        Field::new("breached_level", DataType::UInt8, true),
        Field::new("buy_sell_indicator", DataType::UInt8, true),
        Field::new("canceled_shares", DataType::UInt32, true),
        Field::new("cross_price", DataType::UInt32, true),
        Field::new("cross_shares", DataType::UInt64, true),
        Field::new("cross_type", DataType::UInt8, true),
        Field::new("current_reference_price", DataType::UInt32, true),
        Field::new("etp_flag", DataType::UInt8, true),
        Field::new("etp_leverage_factor", DataType::UInt32, true),
        Field::new("event_code", DataType::UInt8, true),
        Field::new("executed_shares", DataType::UInt32, true),
        Field::new("execution_price", DataType::UInt32, true),
        Field::new("far_price", DataType::UInt32, true),
        Field::new("financial_status_indicator", DataType::UInt8, true),
        Field::new("imbalance_direction", DataType::UInt8, true),
        Field::new("imbalance_shares", DataType::UInt64, true),
        Field::new("interest_flag", DataType::UInt8, true),
        Field::new("inverse_indicator", DataType::UInt8, true),
        Field::new("ipo_flag", DataType::UInt8, true),
        Field::new("ipo_price", DataType::UInt32, true),
        Field::new("ipo_quotation_release_qualifier", DataType::UInt8, true),
        Field::new("ipo_quotation_release_time", DataType::UInt32, true),
        Field::new("issue_classification", DataType::UInt8, true),
        Field::new("issue_sub_type", DataType::Utf8, true),
        Field::new("level_1", DataType::UInt64, true),
        Field::new("level_2", DataType::UInt64, true),
        Field::new("level_3", DataType::UInt64, true),
        Field::new("locate_code", DataType::UInt16, true),
        Field::new("lower_auction_collar_price", DataType::UInt32, true),
        Field::new("luld_reference_price_tier", DataType::UInt8, true),
        Field::new("market_category", DataType::UInt8, true),
        Field::new("market_maker_mode", DataType::UInt8, true),
        Field::new("market_participant_state", DataType::UInt8, true),
        Field::new("match_number", DataType::UInt64, true),
        Field::new("mpid", DataType::Utf8, true),
        Field::new("near_price", DataType::UInt32, true),
        Field::new("new_order_reference_number", DataType::UInt64, true),
        Field::new("order_reference_number", DataType::UInt64, true),
        Field::new("original_order_reference_number", DataType::UInt64, true),
        Field::new("paired_shares", DataType::UInt64, true),
        Field::new("price", DataType::UInt32, true),
        Field::new("price_variation_indicator", DataType::UInt8, true),
        Field::new("primary_market_maker", DataType::UInt8, true),
        Field::new("printable", DataType::UInt8, true),
        Field::new("reason", DataType::Utf8, true),
        Field::new("reg_sho_action", DataType::UInt8, true),
        Field::new("reserved", DataType::UInt8, true),
        Field::new("round_lot_size", DataType::UInt32, true),
        Field::new("round_lots_only", DataType::UInt8, true),
        Field::new("shares", DataType::UInt32, true),
        Field::new("short_sale_threshold_indicator", DataType::UInt8, true),
        Field::new("stock", DataType::Utf8, true),
        Field::new("stock_locate", DataType::UInt16, true),
        Field::new("timestamp", DataType::UInt64, true),
        Field::new("tracking_number", DataType::UInt16, true),
        Field::new("trading_state", DataType::UInt8, true),
        Field::new("upper_auction_collar_price", DataType::UInt32, true),
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
        let mut auction_collar_extension = Vec::with_capacity(len);
        let mut auction_collar_reference_price = Vec::with_capacity(len);
        let mut authenticity = Vec::with_capacity(len);
        let mut breached_level = Vec::with_capacity(len);
        let mut buy_sell_indicator = Vec::with_capacity(len);
        let mut canceled_shares = Vec::with_capacity(len);
        let mut cross_price = Vec::with_capacity(len);
        let mut cross_shares = Vec::with_capacity(len);
        let mut cross_type = Vec::with_capacity(len);
        let mut current_reference_price = Vec::with_capacity(len);
        let mut etp_flag = Vec::with_capacity(len);
        let mut etp_leverage_factor = Vec::with_capacity(len);
        let mut event_code = Vec::with_capacity(len);
        let mut executed_shares = Vec::with_capacity(len);
        let mut execution_price = Vec::with_capacity(len);
        let mut far_price = Vec::with_capacity(len);
        let mut financial_status_indicator = Vec::with_capacity(len);
        let mut imbalance_direction = Vec::with_capacity(len);
        let mut imbalance_shares = Vec::with_capacity(len);
        let mut interest_flag = Vec::with_capacity(len);
        let mut inverse_indicator = Vec::with_capacity(len);
        let mut ipo_flag = Vec::with_capacity(len);
        let mut ipo_price = Vec::with_capacity(len);
        let mut ipo_quotation_release_qualifier = Vec::with_capacity(len);
        let mut ipo_quotation_release_time = Vec::with_capacity(len);
        let mut issue_classification = Vec::with_capacity(len);
        let mut issue_sub_type: Vec<Option<String>> = Vec::with_capacity(len);
        let mut level_1 = Vec::with_capacity(len);
        let mut level_2 = Vec::with_capacity(len);
        let mut level_3 = Vec::with_capacity(len);
        let mut locate_code = Vec::with_capacity(len);
        let mut lower_auction_collar_price = Vec::with_capacity(len);
        let mut luld_reference_price_tier = Vec::with_capacity(len);
        let mut market_category = Vec::with_capacity(len);
        let mut market_maker_mode = Vec::with_capacity(len);
        let mut market_participant_state = Vec::with_capacity(len);
        let mut match_number = Vec::with_capacity(len);
        let mut mpid: Vec<Option<String>> = Vec::with_capacity(len);
        let mut near_price = Vec::with_capacity(len);
        let mut new_order_reference_number = Vec::with_capacity(len);
        let mut order_reference_number = Vec::with_capacity(len);
        let mut original_order_reference_number = Vec::with_capacity(len);
        let mut paired_shares = Vec::with_capacity(len);
        let mut price = Vec::with_capacity(len);
        let mut price_variation_indicator = Vec::with_capacity(len);
        let mut primary_market_maker = Vec::with_capacity(len);
        let mut printable = Vec::with_capacity(len);
        let mut reason: Vec<Option<String>> = Vec::with_capacity(len);
        let mut reg_sho_action = Vec::with_capacity(len);
        let mut reserved = Vec::with_capacity(len);
        let mut round_lot_size = Vec::with_capacity(len);
        let mut round_lots_only = Vec::with_capacity(len);
        let mut shares = Vec::with_capacity(len);
        let mut short_sale_threshold_indicator = Vec::with_capacity(len);
        let mut stock: Vec<Option<String>> = Vec::with_capacity(len);
        let mut stock_locate = Vec::with_capacity(len);
        let mut timestamp = Vec::with_capacity(len);
        let mut tracking_number = Vec::with_capacity(len);
        let mut trading_state = Vec::with_capacity(len);
        let mut upper_auction_collar_price = Vec::with_capacity(len);

        for row in rows {
            envelopes.push(&row.envelope);
            attribution.push(row.attribution.clone());
            auction_collar_extension.push(row.auction_collar_extension);
            auction_collar_reference_price.push(row.auction_collar_reference_price);
            authenticity.push(row.authenticity);
            breached_level.push(row.breached_level);
            buy_sell_indicator.push(row.buy_sell_indicator);
            canceled_shares.push(row.canceled_shares);
            cross_price.push(row.cross_price);
            cross_shares.push(row.cross_shares);
            cross_type.push(row.cross_type);
            current_reference_price.push(row.current_reference_price);
            etp_flag.push(row.etp_flag);
            etp_leverage_factor.push(row.etp_leverage_factor);
            event_code.push(row.event_code);
            executed_shares.push(row.executed_shares);
            execution_price.push(row.execution_price);
            far_price.push(row.far_price);
            financial_status_indicator.push(row.financial_status_indicator);
            imbalance_direction.push(row.imbalance_direction);
            imbalance_shares.push(row.imbalance_shares);
            interest_flag.push(row.interest_flag);
            inverse_indicator.push(row.inverse_indicator);
            ipo_flag.push(row.ipo_flag);
            ipo_price.push(row.ipo_price);
            ipo_quotation_release_qualifier.push(row.ipo_quotation_release_qualifier);
            ipo_quotation_release_time.push(row.ipo_quotation_release_time);
            issue_classification.push(row.issue_classification);
            issue_sub_type.push(row.issue_sub_type.clone());
            level_1.push(row.level_1);
            level_2.push(row.level_2);
            level_3.push(row.level_3);
            locate_code.push(row.locate_code);
            lower_auction_collar_price.push(row.lower_auction_collar_price);
            luld_reference_price_tier.push(row.luld_reference_price_tier);
            market_category.push(row.market_category);
            market_maker_mode.push(row.market_maker_mode);
            market_participant_state.push(row.market_participant_state);
            match_number.push(row.match_number);
            mpid.push(row.mpid.clone());
            near_price.push(row.near_price);
            new_order_reference_number.push(row.new_order_reference_number);
            order_reference_number.push(row.order_reference_number);
            original_order_reference_number.push(row.original_order_reference_number);
            paired_shares.push(row.paired_shares);
            price.push(row.price);
            price_variation_indicator.push(row.price_variation_indicator);
            primary_market_maker.push(row.primary_market_maker);
            printable.push(row.printable);
            reason.push(row.reason.clone());
            reg_sho_action.push(row.reg_sho_action);
            reserved.push(row.reserved);
            round_lot_size.push(row.round_lot_size);
            round_lots_only.push(row.round_lots_only);
            shares.push(row.shares);
            short_sale_threshold_indicator.push(row.short_sale_threshold_indicator);
            stock.push(row.stock.clone());
            stock_locate.push(row.stock_locate);
            timestamp.push(row.timestamp);
            tracking_number.push(row.tracking_number);
            trading_state.push(row.trading_state);
            upper_auction_collar_price.push(row.upper_auction_collar_price);
        }

        let mut arrays = envelopes.finish();
        arrays.extend([
            Arc::new(StringArray::from(attribution)) as ArrayRef,
            Arc::new(UInt32Array::from(auction_collar_extension)),
            Arc::new(UInt32Array::from(auction_collar_reference_price)),
            Arc::new(UInt8Array::from(authenticity)),
            Arc::new(UInt8Array::from(breached_level)),
            Arc::new(UInt8Array::from(buy_sell_indicator)),
            Arc::new(UInt32Array::from(canceled_shares)),
            Arc::new(UInt32Array::from(cross_price)),
            Arc::new(UInt64Array::from(cross_shares)),
            Arc::new(UInt8Array::from(cross_type)),
            Arc::new(UInt32Array::from(current_reference_price)),
            Arc::new(UInt8Array::from(etp_flag)),
            Arc::new(UInt32Array::from(etp_leverage_factor)),
            Arc::new(UInt8Array::from(event_code)),
            Arc::new(UInt32Array::from(executed_shares)),
            Arc::new(UInt32Array::from(execution_price)),
            Arc::new(UInt32Array::from(far_price)),
            Arc::new(UInt8Array::from(financial_status_indicator)),
            Arc::new(UInt8Array::from(imbalance_direction)),
            Arc::new(UInt64Array::from(imbalance_shares)),
            Arc::new(UInt8Array::from(interest_flag)),
            Arc::new(UInt8Array::from(inverse_indicator)),
            Arc::new(UInt8Array::from(ipo_flag)),
            Arc::new(UInt32Array::from(ipo_price)),
            Arc::new(UInt8Array::from(ipo_quotation_release_qualifier)),
            Arc::new(UInt32Array::from(ipo_quotation_release_time)),
            Arc::new(UInt8Array::from(issue_classification)),
            Arc::new(StringArray::from(issue_sub_type)),
            Arc::new(UInt64Array::from(level_1)),
            Arc::new(UInt64Array::from(level_2)),
            Arc::new(UInt64Array::from(level_3)),
            Arc::new(UInt16Array::from(locate_code)),
            Arc::new(UInt32Array::from(lower_auction_collar_price)),
            Arc::new(UInt8Array::from(luld_reference_price_tier)),
            Arc::new(UInt8Array::from(market_category)),
            Arc::new(UInt8Array::from(market_maker_mode)),
            Arc::new(UInt8Array::from(market_participant_state)),
            Arc::new(UInt64Array::from(match_number)),
            Arc::new(StringArray::from(mpid)),
            Arc::new(UInt32Array::from(near_price)),
            Arc::new(UInt64Array::from(new_order_reference_number)),
            Arc::new(UInt64Array::from(order_reference_number)),
            Arc::new(UInt64Array::from(original_order_reference_number)),
            Arc::new(UInt64Array::from(paired_shares)),
            Arc::new(UInt32Array::from(price)),
            Arc::new(UInt8Array::from(price_variation_indicator)),
            Arc::new(UInt8Array::from(primary_market_maker)),
            Arc::new(UInt8Array::from(printable)),
            Arc::new(StringArray::from(reason)),
            Arc::new(UInt8Array::from(reg_sho_action)),
            Arc::new(UInt8Array::from(reserved)),
            Arc::new(UInt32Array::from(round_lot_size)),
            Arc::new(UInt8Array::from(round_lots_only)),
            Arc::new(UInt32Array::from(shares)),
            Arc::new(UInt8Array::from(short_sale_threshold_indicator)),
            Arc::new(StringArray::from(stock)),
            Arc::new(UInt16Array::from(stock_locate)),
            Arc::new(UInt64Array::from(timestamp)),
            Arc::new(UInt16Array::from(tracking_number)),
            Arc::new(UInt8Array::from(trading_state)),
            Arc::new(UInt32Array::from(upper_auction_collar_price)),
        ]);

        Ok(RecordBatch::try_new(Self::schema(), arrays)?)
    }

    fn from_record_batch(batch: &RecordBatch) -> Result<Vec<Self>, StorageError> {
        let attribution = as_string_array(batch, 6, "attribution")?;
        let auction_collar_extension = as_u32_array(batch, 7, "auction_collar_extension")?;
        let auction_collar_reference_price =
            as_u32_array(batch, 8, "auction_collar_reference_price")?;
        let authenticity = as_u8_array(batch, 9, "authenticity")?;
        let breached_level = as_u8_array(batch, 10, "breached_level")?;
        let buy_sell_indicator = as_u8_array(batch, 11, "buy_sell_indicator")?;
        let canceled_shares = as_u32_array(batch, 12, "canceled_shares")?;
        let cross_price = as_u32_array(batch, 13, "cross_price")?;
        let cross_shares = as_u64_array(batch, 14, "cross_shares")?;
        let cross_type = as_u8_array(batch, 15, "cross_type")?;
        let current_reference_price = as_u32_array(batch, 16, "current_reference_price")?;
        let etp_flag = as_u8_array(batch, 17, "etp_flag")?;
        let etp_leverage_factor = as_u32_array(batch, 18, "etp_leverage_factor")?;
        let event_code = as_u8_array(batch, 19, "event_code")?;
        let executed_shares = as_u32_array(batch, 20, "executed_shares")?;
        let execution_price = as_u32_array(batch, 21, "execution_price")?;
        let far_price = as_u32_array(batch, 22, "far_price")?;
        let financial_status_indicator = as_u8_array(batch, 23, "financial_status_indicator")?;
        let imbalance_direction = as_u8_array(batch, 24, "imbalance_direction")?;
        let imbalance_shares = as_u64_array(batch, 25, "imbalance_shares")?;
        let interest_flag = as_u8_array(batch, 26, "interest_flag")?;
        let inverse_indicator = as_u8_array(batch, 27, "inverse_indicator")?;
        let ipo_flag = as_u8_array(batch, 28, "ipo_flag")?;
        let ipo_price = as_u32_array(batch, 29, "ipo_price")?;
        let ipo_quotation_release_qualifier =
            as_u8_array(batch, 30, "ipo_quotation_release_qualifier")?;
        let ipo_quotation_release_time = as_u32_array(batch, 31, "ipo_quotation_release_time")?;
        let issue_classification = as_u8_array(batch, 32, "issue_classification")?;
        let issue_sub_type = as_string_array(batch, 33, "issue_sub_type")?;
        let level_1 = as_u64_array(batch, 34, "level_1")?;
        let level_2 = as_u64_array(batch, 35, "level_2")?;
        let level_3 = as_u64_array(batch, 36, "level_3")?;
        let locate_code = as_u16_array(batch, 37, "locate_code")?;
        let lower_auction_collar_price = as_u32_array(batch, 38, "lower_auction_collar_price")?;
        let luld_reference_price_tier = as_u8_array(batch, 39, "luld_reference_price_tier")?;
        let market_category = as_u8_array(batch, 40, "market_category")?;
        let market_maker_mode = as_u8_array(batch, 41, "market_maker_mode")?;
        let market_participant_state = as_u8_array(batch, 42, "market_participant_state")?;
        let match_number = as_u64_array(batch, 43, "match_number")?;
        let mpid = as_string_array(batch, 44, "mpid")?;
        let near_price = as_u32_array(batch, 45, "near_price")?;
        let new_order_reference_number = as_u64_array(batch, 46, "new_order_reference_number")?;
        let order_reference_number = as_u64_array(batch, 47, "order_reference_number")?;
        let original_order_reference_number =
            as_u64_array(batch, 48, "original_order_reference_number")?;
        let paired_shares = as_u64_array(batch, 49, "paired_shares")?;
        let price = as_u32_array(batch, 50, "price")?;
        let price_variation_indicator = as_u8_array(batch, 51, "price_variation_indicator")?;
        let primary_market_maker = as_u8_array(batch, 52, "primary_market_maker")?;
        let printable = as_u8_array(batch, 53, "printable")?;
        let reason = as_string_array(batch, 54, "reason")?;
        let reg_sho_action = as_u8_array(batch, 55, "reg_sho_action")?;
        let reserved = as_u8_array(batch, 56, "reserved")?;
        let round_lot_size = as_u32_array(batch, 57, "round_lot_size")?;
        let round_lots_only = as_u8_array(batch, 58, "round_lots_only")?;
        let shares = as_u32_array(batch, 59, "shares")?;
        let short_sale_threshold_indicator =
            as_u8_array(batch, 60, "short_sale_threshold_indicator")?;
        let stock = as_string_array(batch, 61, "stock")?;
        let stock_locate = as_u16_array(batch, 62, "stock_locate")?;
        let timestamp = as_u64_array(batch, 63, "timestamp")?;
        let tracking_number = as_u16_array(batch, 64, "tracking_number")?;
        let trading_state = as_u8_array(batch, 65, "trading_state")?;
        let upper_auction_collar_price = as_u32_array(batch, 66, "upper_auction_collar_price")?;

        let mut rows = Vec::with_capacity(batch.num_rows());
        for row in 0..batch.num_rows() {
            rows.push(Record {
                envelope: envelope_at(batch, row)?,
                attribution: (!attribution.is_null(row))
                    .then(|| attribution.value(row).to_string()),
                auction_collar_extension: (!auction_collar_extension.is_null(row))
                    .then(|| auction_collar_extension.value(row)),
                auction_collar_reference_price: (!auction_collar_reference_price.is_null(row))
                    .then(|| auction_collar_reference_price.value(row)),
                authenticity: (!authenticity.is_null(row)).then(|| authenticity.value(row)),
                breached_level: (!breached_level.is_null(row))
                    .then(|| breached_level.value(row)),
                buy_sell_indicator: (!buy_sell_indicator.is_null(row))
                    .then(|| buy_sell_indicator.value(row)),
                canceled_shares: (!canceled_shares.is_null(row))
                    .then(|| canceled_shares.value(row)),
                cross_price: (!cross_price.is_null(row)).then(|| cross_price.value(row)),
                cross_shares: (!cross_shares.is_null(row)).then(|| cross_shares.value(row)),
                cross_type: (!cross_type.is_null(row)).then(|| cross_type.value(row)),
                current_reference_price: (!current_reference_price.is_null(row))
                    .then(|| current_reference_price.value(row)),
                etp_flag: (!etp_flag.is_null(row)).then(|| etp_flag.value(row)),
                etp_leverage_factor: (!etp_leverage_factor.is_null(row))
                    .then(|| etp_leverage_factor.value(row)),
                event_code: (!event_code.is_null(row)).then(|| event_code.value(row)),
                executed_shares: (!executed_shares.is_null(row))
                    .then(|| executed_shares.value(row)),
                execution_price: (!execution_price.is_null(row))
                    .then(|| execution_price.value(row)),
                far_price: (!far_price.is_null(row)).then(|| far_price.value(row)),
                financial_status_indicator: (!financial_status_indicator.is_null(row))
                    .then(|| financial_status_indicator.value(row)),
                imbalance_direction: (!imbalance_direction.is_null(row))
                    .then(|| imbalance_direction.value(row)),
                imbalance_shares: (!imbalance_shares.is_null(row))
                    .then(|| imbalance_shares.value(row)),
                interest_flag: (!interest_flag.is_null(row)).then(|| interest_flag.value(row)),
                inverse_indicator: (!inverse_indicator.is_null(row))
                    .then(|| inverse_indicator.value(row)),
                ipo_flag: (!ipo_flag.is_null(row)).then(|| ipo_flag.value(row)),
                ipo_price: (!ipo_price.is_null(row)).then(|| ipo_price.value(row)),
                ipo_quotation_release_qualifier: (!ipo_quotation_release_qualifier.is_null(row))
                    .then(|| ipo_quotation_release_qualifier.value(row)),
                ipo_quotation_release_time: (!ipo_quotation_release_time.is_null(row))
                    .then(|| ipo_quotation_release_time.value(row)),
                issue_classification: (!issue_classification.is_null(row))
                    .then(|| issue_classification.value(row)),
                issue_sub_type: (!issue_sub_type.is_null(row))
                    .then(|| issue_sub_type.value(row).to_string()),
                level_1: (!level_1.is_null(row)).then(|| level_1.value(row)),
                level_2: (!level_2.is_null(row)).then(|| level_2.value(row)),
                level_3: (!level_3.is_null(row)).then(|| level_3.value(row)),
                locate_code: (!locate_code.is_null(row)).then(|| locate_code.value(row)),
                lower_auction_collar_price: (!lower_auction_collar_price.is_null(row))
                    .then(|| lower_auction_collar_price.value(row)),
                luld_reference_price_tier: (!luld_reference_price_tier.is_null(row))
                    .then(|| luld_reference_price_tier.value(row)),
                market_category: (!market_category.is_null(row))
                    .then(|| market_category.value(row)),
                market_maker_mode: (!market_maker_mode.is_null(row))
                    .then(|| market_maker_mode.value(row)),
                market_participant_state: (!market_participant_state.is_null(row))
                    .then(|| market_participant_state.value(row)),
                match_number: (!match_number.is_null(row)).then(|| match_number.value(row)),
                mpid: (!mpid.is_null(row)).then(|| mpid.value(row).to_string()),
                near_price: (!near_price.is_null(row)).then(|| near_price.value(row)),
                new_order_reference_number: (!new_order_reference_number.is_null(row))
                    .then(|| new_order_reference_number.value(row)),
                order_reference_number: (!order_reference_number.is_null(row))
                    .then(|| order_reference_number.value(row)),
                original_order_reference_number: (!original_order_reference_number.is_null(row))
                    .then(|| original_order_reference_number.value(row)),
                paired_shares: (!paired_shares.is_null(row)).then(|| paired_shares.value(row)),
                price: (!price.is_null(row)).then(|| price.value(row)),
                price_variation_indicator: (!price_variation_indicator.is_null(row))
                    .then(|| price_variation_indicator.value(row)),
                primary_market_maker: (!primary_market_maker.is_null(row))
                    .then(|| primary_market_maker.value(row)),
                printable: (!printable.is_null(row)).then(|| printable.value(row)),
                reason: (!reason.is_null(row)).then(|| reason.value(row).to_string()),
                reg_sho_action: (!reg_sho_action.is_null(row))
                    .then(|| reg_sho_action.value(row)),
                reserved: (!reserved.is_null(row)).then(|| reserved.value(row)),
                round_lot_size: (!round_lot_size.is_null(row))
                    .then(|| round_lot_size.value(row)),
                round_lots_only: (!round_lots_only.is_null(row))
                    .then(|| round_lots_only.value(row)),
                shares: (!shares.is_null(row)).then(|| shares.value(row)),
                short_sale_threshold_indicator: (!short_sale_threshold_indicator.is_null(row))
                    .then(|| short_sale_threshold_indicator.value(row)),
                stock: (!stock.is_null(row)).then(|| stock.value(row).to_string()),
                stock_locate: (!stock_locate.is_null(row)).then(|| stock_locate.value(row)),
                timestamp: (!timestamp.is_null(row)).then(|| timestamp.value(row)),
                tracking_number: (!tracking_number.is_null(row))
                    .then(|| tracking_number.value(row)),
                trading_state: (!trading_state.is_null(row)).then(|| trading_state.value(row)),
                upper_auction_collar_price: (!upper_auction_collar_price.is_null(row))
                    .then(|| upper_auction_collar_price.value(row)),
            });
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use core_types::Envelope;
    use storage::{Reader, Writer};
    use tempfile::TempDir;

    use super::*;

    fn sample_rows() -> Vec<Record> {
        let mut add = Record::default();
        add.envelope = Envelope {
            pcap_index: 1,
            pcap_timestamp: 1_700_000_000_000_000,
            session: "NSDQ050001".to_string(),
            message_sequence: 1,
            message_index: 1,
            message_type: b'F',
        };
        add.stock_locate = Some(42);
        add.tracking_number = Some(0);
        add.timestamp = Some(34_200_000_000_000);
        add.order_reference_number = Some(1);
        add.buy_sell_indicator = Some(b'B');
        add.shares = Some(100);
        add.stock = Some("AAPL".to_string());
        add.price = Some(1_500_000);
        add.attribution = Some("MMAA".to_string());

        let mut reg_sho = Record::default();
        reg_sho.envelope = Envelope {
            pcap_index: 1,
            pcap_timestamp: 1_700_000_000_000_000,
            session: "NSDQ050001".to_string(),
            message_sequence: 2,
            message_index: 2,
            message_type: b'Y',
        };
        reg_sho.locate_code = Some(7);
        reg_sho.tracking_number = Some(2);
        reg_sho.timestamp = Some(1_000_000);
        reg_sho.stock = Some("ACME".to_string());
        reg_sho.reg_sho_action = Some(b'1');

        vec![add, reg_sho]
    }

    #[test]
    fn schema_has_sixty_seven_columns() {
        assert_eq!(Record::schema().fields().len(), 67);
    }

    #[test]
    fn record_batch_round_trip() {
        let rows = sample_rows();
        let batch = Record::to_record_batch(&rows).unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 67);
        assert_eq!(Record::from_record_batch(&batch).unwrap(), rows);
    }

    #[test]
    fn parquet_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nasdaq.parquet");

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
}
