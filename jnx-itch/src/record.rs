// Copyright (c) James Kassemi, SC, US. All rights reserved.

//! The JNX superset row and its message decoders.
//!
//! Eleven message types share one flat record; a decoded message sets only
//! the fields its wire layout names, everything else stays null. Field
//! widths follow the v1.6 dissection: group is 4 bytes, orderbook_code is
//! 12, prices and quantities are 4-byte unsigned, order numbers 8-byte.

use std::fmt;

use core_types::{csv, Cursor, Envelope, ItchRecord, WireError};

/// One row of the JNX output: envelope plus every payload field that
/// appears in any v1.6 message, in schema order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub envelope: Envelope,

    pub attribution: Option<String>,
    pub buy_sell_indicator: Option<u8>,
    pub executed_quantity: Option<u32>,
    pub group: Option<String>,
    pub lower_price_limit: Option<u32>,
    pub match_number: Option<u64>,
    pub new_order_number: Option<u64>,
    pub order_number: Option<u64>,
    pub order_type: Option<u8>,
    pub orderbook_code: Option<String>,
    pub orderbook_id: Option<u32>,
    pub original_order_number: Option<u64>,
    pub price: Option<u32>,
    pub price_decimals: Option<u32>,
    pub price_start: Option<u32>,
    pub price_tick_size: Option<u32>,
    pub price_tick_size_table_id: Option<u32>,
    pub quantity: Option<u32>,
    pub round_lot_size: Option<u32>,
    pub short_selling_state: Option<u8>,
    pub system_event: Option<u8>,
    pub timestamp_nanoseconds: Option<u32>,
    pub timestamp_seconds: Option<u32>,
    pub trading_state: Option<u8>,
    pub upper_price_limit: Option<u32>,
}

impl ItchRecord for Record {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }

    fn reset_payload(&mut self) {
        self.attribution = None;
        self.buy_sell_indicator = None;
        self.executed_quantity = None;
        self.group = None;
        self.lower_price_limit = None;
        self.match_number = None;
        self.new_order_number = None;
        self.order_number = None;
        self.order_type = None;
        self.orderbook_code = None;
        self.orderbook_id = None;
        self.original_order_number = None;
        self.price = None;
        self.price_decimals = None;
        self.price_start = None;
        self.price_tick_size = None;
        self.price_tick_size_table_id = None;
        self.quantity = None;
        self.round_lot_size = None;
        self.short_selling_state = None;
        self.system_event = None;
        self.timestamp_nanoseconds = None;
        self.timestamp_seconds = None;
        self.trading_state = None;
        self.upper_price_limit = None;
    }

    fn decode_payload(
        &mut self,
        message_type: u8,
        body: &mut Cursor<'_>,
    ) -> Result<(), WireError> {
        match message_type {
            b'T' => self.decode_timestamp_seconds(body),
            b'S' => self.decode_system_event(body),
            b'L' => self.decode_price_tick_size(body),
            b'R' => self.decode_orderbook_directory(body),
            b'H' => self.decode_trading_state(body),
            b'Y' => self.decode_short_selling_restriction_state(body),
            b'A' => self.decode_order_added(body),
            b'F' => self.decode_order_added_with_attributes(body),
            b'E' => self.decode_order_executed(body),
            b'D' => self.decode_order_deleted(body),
            b'U' => self.decode_order_replaced(body),
            _ => Ok(()),
        }
    }
}

impl Record {
    fn decode_timestamp_seconds(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.timestamp_seconds = Some(body.u32()?);
        Ok(())
    }

    fn decode_system_event(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.timestamp_nanoseconds = Some(body.u32()?);
        self.group = Some(body.padded_str(4)?);
        self.system_event = Some(body.code()?);
        Ok(())
    }

    fn decode_price_tick_size(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.timestamp_nanoseconds = Some(body.u32()?);
        self.price_tick_size_table_id = Some(body.u32()?);
        self.price_tick_size = Some(body.u32()?);
        self.price_start = Some(body.u32()?);
        Ok(())
    }

    fn decode_orderbook_directory(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.timestamp_nanoseconds = Some(body.u32()?);
        self.orderbook_id = Some(body.u32()?);
        self.orderbook_code = Some(body.padded_str(12)?);
        self.group = Some(body.padded_str(4)?);
        self.round_lot_size = Some(body.u32()?);
        self.price_tick_size_table_id = Some(body.u32()?);
        self.price_decimals = Some(body.u32()?);
        self.upper_price_limit = Some(body.u32()?);
        self.lower_price_limit = Some(body.u32()?);
        Ok(())
    }

    fn decode_trading_state(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.timestamp_nanoseconds = Some(body.u32()?);
        self.orderbook_id = Some(body.u32()?);
        self.group = Some(body.padded_str(4)?);
        self.trading_state = Some(body.code()?);
        Ok(())
    }

    fn decode_short_selling_restriction_state(
        &mut self,
        body: &mut Cursor<'_>,
    ) -> Result<(), WireError> {
        self.timestamp_nanoseconds = Some(body.u32()?);
        self.orderbook_id = Some(body.u32()?);
        self.group = Some(body.padded_str(4)?);
        self.short_selling_state = Some(body.code()?);
        Ok(())
    }

    fn decode_order_added(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.timestamp_nanoseconds = Some(body.u32()?);
        self.order_number = Some(body.u64()?);
        self.buy_sell_indicator = Some(body.code()?);
        self.quantity = Some(body.u32()?);
        self.orderbook_id = Some(body.u32()?);
        self.group = Some(body.padded_str(4)?);
        self.price = Some(body.u32()?);
        Ok(())
    }

    fn decode_order_added_with_attributes(
        &mut self,
        body: &mut Cursor<'_>,
    ) -> Result<(), WireError> {
        self.decode_order_added(body)?;
        self.attribution = Some(body.padded_str(4)?);
        self.order_type = Some(body.code()?);
        Ok(())
    }

    fn decode_order_executed(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.timestamp_nanoseconds = Some(body.u32()?);
        self.order_number = Some(body.u64()?);
        self.executed_quantity = Some(body.u32()?);
        self.match_number = Some(body.u64()?);
        Ok(())
    }

    fn decode_order_deleted(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.timestamp_nanoseconds = Some(body.u32()?);
        self.order_number = Some(body.u64()?);
        Ok(())
    }

    fn decode_order_replaced(&mut self, body: &mut Cursor<'_>) -> Result<(), WireError> {
        self.timestamp_nanoseconds = Some(body.u32()?);
        self.original_order_number = Some(body.u64()?);
        self.new_order_number = Some(body.u64()?);
        self.quantity = Some(body.u32()?);
        self.price = Some(body.u32()?);
        Ok(())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.envelope)?;
        csv::opt(f, &self.attribution)?;
        csv::code(f, &self.buy_sell_indicator)?;
        csv::opt(f, &self.executed_quantity)?;
        csv::opt(f, &self.group)?;
        csv::opt(f, &self.lower_price_limit)?;
        csv::opt(f, &self.match_number)?;
        csv::opt(f, &self.new_order_number)?;
        csv::opt(f, &self.order_number)?;
        csv::code(f, &self.order_type)?;
        csv::opt(f, &self.orderbook_code)?;
        csv::opt(f, &self.orderbook_id)?;
        csv::opt(f, &self.original_order_number)?;
        csv::opt(f, &self.price)?;
        csv::opt(f, &self.price_decimals)?;
        csv::opt(f, &self.price_start)?;
        csv::opt(f, &self.price_tick_size)?;
        csv::opt(f, &self.price_tick_size_table_id)?;
        csv::opt(f, &self.quantity)?;
        csv::opt(f, &self.round_lot_size)?;
        csv::code(f, &self.short_selling_state)?;
        csv::code(f, &self.system_event)?;
        csv::opt(f, &self.timestamp_nanoseconds)?;
        csv::opt(f, &self.timestamp_seconds)?;
        csv::code(f, &self.trading_state)?;
        csv::opt(f, &self.upper_price_limit)?;
        writeln!(f)
    }
}
